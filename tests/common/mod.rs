pub mod setup;
pub mod sse;
pub mod streaming;
