use crate::models::request;
use crate::models::request::MessageRole;

pub fn create_test_chat_request(model: &str, user_message: &str) -> request::ChatCompletionCreate {
    request::ChatCompletionCreate {
        model: model.to_string(),
        messages: vec![request::Message::new(MessageRole::User, user_message)],
        max_tokens: Some(1000),
        stop: None,
        temperature: None,
        stream: None,
        extra: Default::default(),
    }
}

pub fn create_empty_messages_request() -> request::ChatCompletionCreate {
    request::ChatCompletionCreate {
        messages: vec![],
        ..create_test_chat_request("test-model", "")
    }
}
