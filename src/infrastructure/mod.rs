// Infrastructure layer - Configuration and the push channel transport
pub mod config;
pub mod push_channel;
pub mod sse;
