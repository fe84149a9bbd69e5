//! WebSocket search sessions.
//!
//! Each socket owns one [`SearchSession`](reel_pipeline::SearchSession):
//! inbound frames set the query, outbound frames mirror the session's
//! request state and trending list.

pub mod handler;
pub mod messages;

pub use messages::{parse_client_text, ServerMessage};
