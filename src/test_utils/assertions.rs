use crate::models::Usage;
use crate::models::response_direct::ChatCompletion;

pub fn assert_chat_completion_response(
    response: &ChatCompletion,
    expected_model: &str,
    expected_content: &str,
) {
    assert_eq!(&response.model, expected_model);
    assert_eq!(response.object, "chat.completion");
    assert_eq!(response.system_fingerprint, response.id);
    assert_eq!(response.choices.len(), 1);

    let choice = &response.choices[0];
    assert_eq!(choice.index, 0);
    assert_eq!(choice.message.content, expected_content);
}

pub fn assert_usage(
    usage: &Usage,
    expected_prompt_tokens: u32,
    expected_completion_tokens: u32,
    expected_total_tokens: u32,
) {
    assert_eq!(usage.prompt_tokens, expected_prompt_tokens);
    assert_eq!(usage.completion_tokens, expected_completion_tokens);
    assert_eq!(usage.total_tokens, expected_total_tokens);
}
