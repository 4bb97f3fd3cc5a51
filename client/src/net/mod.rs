//! Networking modules for the external knowledge-base API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` handles REST calls, `stream_decode` parses the chat stream's frame
//! protocol, `stream` drives a live streamed request, and `types` defines the
//! shared wire schema.

pub mod api;
pub mod stream;
pub mod stream_decode;
pub mod types;
