use serde_json::{Value, json};

use bedrock_chat_proxy::models::request::ChatCompletionCreate;

pub fn sample_chat_request() -> ChatCompletionCreate {
    serde_json::from_value(sample_request_body()).unwrap()
}

pub fn sample_request_body() -> Value {
    json!({
        "model": "anthropic.claude-3-haiku-20240307-v1:0",
        "messages": [
            {"role": "system", "content": "You are a helpful assistant."},
            {"role": "user", "content": "Hello!"}
        ],
        "max_tokens": 100,
        "temperature": 0.7
    })
}

pub fn sample_stream_request_body() -> Value {
    let mut body = sample_request_body();
    body["stream"] = json!(true);
    body
}

pub fn sample_backend_response() -> Value {
    json!({
        "id": "msg_bdrk_01XyZ",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-haiku-20240307",
        "content": [{"type": "text", "text": "Hello! How can I help you today?"}],
        "stop_reason": "end_turn",
        "stop_sequence": null,
        "usage": {"input_tokens": 10, "output_tokens": 5}
    })
}

pub fn sample_stream_events() -> Vec<Value> {
    vec![
        json!({
            "type": "message_start",
            "message": {
                "id": "msg_bdrk_stream",
                "type": "message",
                "role": "assistant",
                "model": "claude-3-haiku-20240307",
                "content": [],
                "stop_reason": null,
                "usage": {"input_tokens": 12, "output_tokens": 1}
            }
        }),
        json!({"type": "content_block_start", "index": 0, "content_block": {"type": "text", "text": ""}}),
        json!({"type": "content_block_delta", "index": 0, "delta": {"type": "text_delta", "text": "Hi"}}),
        json!({"type": "content_block_delta", "index": 0, "delta": {"type": "text_delta", "text": " there"}}),
        json!({"type": "content_block_stop", "index": 0}),
        json!({"type": "message_delta", "delta": {"stop_reason": "end_turn", "stop_sequence": null}, "usage": {"output_tokens": 4}}),
        json!({
            "type": "message_stop",
            "amazon-bedrock-invocationMetrics": {
                "inputTokenCount": 12,
                "outputTokenCount": 4,
                "invocationLatency": 321,
                "firstByteLatency": 120
            }
        }),
    ]
}
