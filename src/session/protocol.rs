//! Session HTTP Protocol
//!
//! Endpoints and DTOs shared between the Axum handlers and the page shell script.

use crate::widget::types::Event;
use serde::{Deserialize, Serialize};
use std::time::Duration;

// --- API Endpoints ---

/// Serves the page shell and opens a fresh session.
pub const ENDPOINT_PAGE: &str = "/";
/// Accepts one `UiEvent` for a session.
pub const ENDPOINT_EVENTS: &str = "/api/sessions/:id/events";
/// Long-polls the rendered view of a session.
pub const ENDPOINT_VIEW: &str = "/api/sessions/:id/view";
/// Closes a session (sent by the page on unload).
pub const ENDPOINT_CLOSE: &str = "/api/sessions/:id/close";
pub const ENDPOINT_HEALTH: &str = "/health";

/// Longest time a view request waits for a newer version.
pub const LONG_POLL_WAIT: Duration = Duration::from_secs(25);

// --- Data Transfer Objects ---

/// A user interaction reported by the page shell.
///
/// Serialized with an internal `type` tag, e.g. `{"type":"input","text":"Dune","seq":4}`
/// or `{"type":"next_page"}`. `seq` counts keystrokes on the page so inputs that
/// arrive out of order can be dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    Input { text: String, seq: u64 },
    PreviousPage,
    NextPage,
    Select { key: String },
    CloseDetail,
}

impl From<UiEvent> for Event {
    fn from(event: UiEvent) -> Self {
        match event {
            UiEvent::Input { text, seq } => Event::InputChanged { text, seq },
            UiEvent::PreviousPage => Event::PreviousPage,
            UiEvent::NextPage => Event::NextPage,
            UiEvent::Select { key } => Event::Select { key },
            UiEvent::CloseDetail => Event::CloseDetail,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EventResponse {
    pub accepted: bool,
}

#[derive(Debug, Deserialize)]
pub struct ViewParams {
    /// Last version the page has; omit to get the current view immediately.
    pub since: Option<u64>,
}

/// Markup for everything below the search box, with its version number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewResponse {
    pub version: u64,
    pub html: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub sessions: usize,
}
