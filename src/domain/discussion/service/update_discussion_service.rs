use tracing::debug;
use validator::Validate;

use crate::core::client::api_client_trait::ApiClient;
use crate::domain::discussion::dto::update_discussion_request::UpdateDiscussionInput;
use crate::domain::discussion::model::discussion::Discussion;
use crate::domain::discussion::service::{discussion_path, encode_body};
use crate::errors::ClientError;

/// Validate `data` and send it as `PATCH /discussions/{discussion_id}`.
///
/// Nothing is sent when validation fails. The server's record is returned
/// untouched; transport errors are passed through as-is.
pub async fn update_discussion<A: ApiClient + ?Sized>(
    api: &A,
    discussion_id: &str,
    data: &UpdateDiscussionInput,
) -> Result<Discussion, ClientError> {
    if discussion_id.is_empty() {
        return Err(ClientError::required("discussion_id"));
    }
    data.validate()?;

    let path = discussion_path(discussion_id);
    let body = encode_body(data)?;

    debug!(%discussion_id, "updating discussion");
    let resp = api.patch(&path, body).await?;

    serde_json::from_value(resp).map_err(|e| ClientError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    #[derive(Default)]
    struct MockApi {
        patches: Mutex<Vec<(String, Value)>>,
        response: Mutex<Option<Result<Value, ClientError>>>,
    }

    impl MockApi {
        fn responding(value: Value) -> Self {
            let api = Self::default();
            *api.response.lock().unwrap() = Some(Ok(value));
            api
        }

        fn failing(status: u16) -> Self {
            let api = Self::default();
            *api.response.lock().unwrap() = Some(Err(ClientError::Transport {
                status: Some(status),
                message: "Internal Server Error".into(),
            }));
            api
        }

        fn patch_calls(&self) -> Vec<(String, Value)> {
            self.patches.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ApiClient for MockApi {
        async fn get(&self, _path: &str) -> Result<Value, ClientError> {
            unreachable!("update never reads")
        }

        async fn patch(&self, path: &str, body: Value) -> Result<Value, ClientError> {
            self.patches.lock().unwrap().push((path.to_string(), body));
            self.response
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(json!({ "id": "unset" })))
        }
    }

    #[tokio::test]
    async fn sends_single_patch_with_exact_body() {
        let api = MockApi::responding(json!({ "id": "42", "title": "Hi", "body": "There" }));

        let discussion = update_discussion(&api, "42", &UpdateDiscussionInput::new("Hi", "There"))
            .await
            .expect("update should succeed");

        assert_eq!(
            api.patch_calls(),
            vec![("/discussions/42".to_string(), json!({ "title": "Hi", "body": "There" }))]
        );
        assert_eq!(
            serde_json::to_value(&discussion).unwrap(),
            json!({ "id": "42", "title": "Hi", "body": "There" })
        );
    }

    #[tokio::test]
    async fn empty_title_fails_before_network() {
        let api = MockApi::default();

        let err = update_discussion(&api, "42", &UpdateDiscussionInput::new("", "There"))
            .await
            .unwrap_err();

        assert_eq!(err.field_messages("title"), ["Required".to_string()]);
        assert!(api.patch_calls().is_empty());
    }

    #[tokio::test]
    async fn empty_id_fails_before_network() {
        let api = MockApi::default();

        let err = update_discussion(&api, "", &UpdateDiscussionInput::new("Hi", "There"))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert!(api.patch_calls().is_empty());
    }

    #[tokio::test]
    async fn transport_error_passes_through() {
        let api = MockApi::failing(500);

        let err = update_discussion(&api, "42", &UpdateDiscussionInput::new("Hi", "There"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(api.patch_calls().len(), 1);
    }

    #[tokio::test]
    async fn response_without_id_is_decode_error() {
        let api = MockApi::responding(json!({ "title": "Hi" }));

        let err = update_discussion(&api, "42", &UpdateDiscussionInput::new("Hi", "There"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn repeated_submit_sends_twice() {
        let api = MockApi::default();
        let input = UpdateDiscussionInput::new("Hi", "There");

        update_discussion(&api, "42", &input).await.unwrap();
        update_discussion(&api, "42", &input).await.unwrap();

        assert_eq!(api.patch_calls().len(), 2);
    }

    #[tokio::test]
    async fn id_is_percent_encoded() {
        let api = MockApi::default();

        update_discussion(&api, "a/b c", &UpdateDiscussionInput::new("Hi", "There"))
            .await
            .unwrap();

        assert_eq!(api.patch_calls()[0].0, "/discussions/a%2Fb%20c");
    }
}
