//! HTTP API: server, response types and the SSE activity log.

pub mod logs;
pub mod server;
pub mod types;
