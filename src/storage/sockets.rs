use axum::extract::ws::Message;
use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::sync::{atomic::AtomicUsize, Arc};
use tokio::sync::{mpsc, RwLock};

pub static NEXT_SOCKET_ID: AtomicUsize = AtomicUsize::new(1);

/// Outgoing halves of the connected overlay pages.
#[derive(Clone, Default)]
pub struct OverlaySockets {
    storage: Arc<RwLock<HashMap<usize, mpsc::UnboundedSender<Message>>>>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Delivery {
    pub delivered: usize,
    pub failed: usize,
}

impl OverlaySockets {
    pub async fn add(&self, socket: mpsc::UnboundedSender<Message>) -> usize {
        let socket_id = NEXT_SOCKET_ID.fetch_add(1, Ordering::Relaxed);
        self.storage.write().await.insert(socket_id, socket);
        socket_id
    }

    pub async fn remove(&self, socket_id: usize) {
        self.storage.write().await.remove(&socket_id);
    }

    pub async fn send_msg(&self, msg: &str, socket_id: usize) -> bool {
        match self.storage.read().await.get(&socket_id) {
            Some(tx) => tx.send(Message::Text(msg.to_string())).is_ok(),
            None => false,
        }
    }

    pub async fn broadcast_msg(&self, msg: &str) -> Delivery {
        let mut delivery = Delivery::default();
        for (&socket_id, tx) in self.storage.read().await.iter() {
            if tx.send(Message::Text(msg.to_string())).is_ok() {
                delivery.delivered += 1;
            } else {
                // The socket's own task removes it once it notices the disconnect.
                tracing::debug!(socket_id, "Failed to queue a message for an overlay socket.");
                delivery.failed += 1;
            }
        }
        delivery
    }
}
