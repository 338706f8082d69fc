use serde::Serialize;


/// The body of every response this API produces.
///
/// `data` is `null` on failures and on operations that have nothing to return;
/// `message` is `null` when there is nothing worth saying.
#[derive(Serialize, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde_impls_for_client_on_models", derive(serde::Deserialize))]
pub struct ResponseEnvelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ResponseEnvelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message<M>(message: M, data: T) -> Self
    where
        M: Into<String>,
    {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ResponseEnvelope<()> {
    pub fn success_without_data<M>(message: M) -> Self
    where
        M: Into<String>,
    {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn failure<M>(message: M) -> Self
    where
        M: Into<String>,
    {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}



#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;

    #[test]
    fn failure_serializes_with_null_data() {
        let envelope = ResponseEnvelope::failure("Phrase not found!");

        assert_eq!(
            serde_json::to_value(envelope).unwrap(),
            json!({
                "success": false,
                "message": "Phrase not found!",
                "data": null
            })
        );
    }

    #[test]
    fn success_serializes_with_null_message() {
        let envelope = ResponseEnvelope::success(vec![1, 2, 3]);

        assert_eq!(
            serde_json::to_value(envelope).unwrap(),
            json!({
                "success": true,
                "message": null,
                "data": [1, 2, 3]
            })
        );
    }
}
