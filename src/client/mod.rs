//! Game backend transport: HTTP client plus a channel-based worker.

pub mod api;
pub mod pipeline;

pub use api::{ChatApi, ClientConfig, TurnResponse};
pub use pipeline::{ChatCommand, ChatEvent, ChatHandle, ChatPipeline};
