pub mod app;
pub mod auth;
pub mod backend;
pub mod claude_request;
pub mod claude_response;
pub mod claude_stream;
pub mod config;
pub mod consts;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod service;

#[cfg(test)]
mod test_utils;
