use reel_core::state::RequestState;
use reel_core::types::SearchCountRecord;
use serde::{Deserialize, Serialize};

/// Frames pushed to the client.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    State { state: RequestState },
    Trending { records: Vec<SearchCountRecord> },
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Deserialize)]
struct ClientMessage {
    query: String,
}

/// Extract the query from an inbound text frame.
///
/// Accepts `{"query": "..."}`; anything else is taken verbatim as the
/// query text.
pub fn parse_client_text(text: &str) -> String {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => message.query,
        Err(_) => text.to_string(),
    }
}
