pub mod api_models;
pub mod id;
pub mod tone;
pub mod validation;
pub mod voter;
