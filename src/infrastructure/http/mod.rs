//! HTTP API: thin transport over the answer pipeline.

pub mod handlers;
pub mod server;

pub use handlers::ApiState;
pub use server::{router, serve};
