pub trait IntoApiModel<ApiModel> {
    fn into_api_model(self) -> ApiModel;
}
