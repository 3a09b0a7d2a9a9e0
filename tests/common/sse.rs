use serde_json::Value;

/// Splits an SSE body into the payloads of its `data:` lines.
pub fn parse_sse_data(body: &str) -> Vec<String> {
    body.split("\n\n")
        .filter(|frame| !frame.is_empty())
        .map(|frame| {
            frame
                .strip_prefix("data: ")
                .unwrap_or_else(|| panic!("not an SSE data frame: {:?}", frame))
                .to_string()
        })
        .collect()
}

pub fn frame_json(frame: &str) -> Value {
    let data = frame
        .strip_prefix("data: ")
        .and_then(|rest| rest.strip_suffix("\n\n"))
        .unwrap_or(frame);
    serde_json::from_str(data).unwrap()
}
