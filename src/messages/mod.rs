//! The channel between the interception layer and the overlay controller.
//!
//! Notifications are fire-and-forget: publishing with nobody listening is not an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast;
use uuid::Uuid;

pub mod consts;

use consts::PAGE_MESSAGE_BUS_CAPACITY;

/// Identifies one page context, i.e. one run of this service.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageId(Uuid);

impl PageId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageOrigin {
    pub page: PageId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PageMessage {
    #[serde(rename = "GEO_GUESSER_COORDS")]
    Coordinates { lat: f64, lng: f64 },
    #[serde(rename = "GEO_GUESSER_NAVIGATION")]
    Navigation { href: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub origin: MessageOrigin,
    pub message: PageMessage,
}

#[derive(Clone)]
pub struct MessageBus {
    sender: broadcast::Sender<Envelope>,
}

impl Default for MessageBus {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(PAGE_MESSAGE_BUS_CAPACITY);
        Self { sender }
    }
}

impl MessageBus {
    /// Returns how many listeners the message reached.
    pub fn publish(&self, origin: MessageOrigin, message: PageMessage) -> usize {
        self.sender
            .send(Envelope { origin, message })
            .unwrap_or_else(|_no_listeners| {
                tracing::debug!("Dropping a page message because nobody is listening.");
                0
            })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Envelope> {
        self.sender.subscribe()
    }
}
