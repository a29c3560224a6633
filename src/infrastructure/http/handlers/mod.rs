//! HTTP Handlers

mod chat;
mod fallback;
mod models;

pub use chat::*;
pub use fallback::*;
pub use models::*;
