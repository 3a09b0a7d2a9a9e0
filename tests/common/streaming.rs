use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use actix_web::web::Bytes;
use bedrock_chat_proxy::errors::ProxyError;

pub struct CollectedStream {
    pub frames: Vec<String>,
    pub error: Option<ProxyError>,
}

pub async fn collect_stream_frames(
    receiver: &mut mpsc::Receiver<Result<Bytes, ProxyError>>,
) -> CollectedStream {
    let mut frames = vec![];
    let mut error = None;
    let timeout = Duration::from_secs(5);
    let start_time = Instant::now();

    loop {
        match tokio::time::timeout(timeout, receiver.recv()).await {
            Ok(Some(Ok(bytes))) => frames.push(String::from_utf8_lossy(&bytes).to_string()),
            Ok(Some(Err(e))) => {
                error = Some(e);
            }
            Ok(None) => break,
            Err(_) => {
                eprintln!("Timeout waiting for frames");
                break;
            }
        }
        if start_time.elapsed() > timeout {
            eprintln!("Timeout waiting for frames");
            break;
        }
    }

    CollectedStream { frames, error }
}
