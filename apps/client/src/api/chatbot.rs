use serde_json::Value;

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::chat::{ChatReply, ChatRequest};

pub const CHATBOT_MESSAGE_PATH: &str = "/chatbot/message";

impl ApiClient {
    /// Sends one chat message. The reply text is meant for `format_reply`.
    pub async fn send_message(
        &self,
        message: &str,
        system_prompt: &str,
        context: Option<&Value>,
    ) -> Result<ChatReply, ClientError> {
        let request = ChatRequest {
            message,
            system_prompt,
            context,
        };
        self.post_json(CHATBOT_MESSAGE_PATH, &request).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::api::test_support::signed_in;
    use crate::models::user::Role;

    #[tokio::test]
    async fn test_send_message_uses_bearer_and_system_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chatbot/message"))
            .and(header("authorization", "Bearer tok-9"))
            .and(body_json(serde_json::json!({
                "message": "hello",
                "system_prompt": "be brief",
                "context": null
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "reply": "# Hi\n- one",
                "model": "m-1",
                "usage": {"input_tokens": 3, "output_tokens": 5}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = signed_in(&server, "tok-9", Role::User);
        let reply = api.send_message("hello", "be brief", None).await.unwrap();
        assert_eq!(reply.reply, "# Hi\n- one");
        assert_eq!(reply.model.as_deref(), Some("m-1"));
        assert_eq!(reply.usage.unwrap().output_tokens, Some(5));
    }
}
