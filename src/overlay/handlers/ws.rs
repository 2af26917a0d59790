use crate::app_context::AppContext;
use crate::messages::{MessageOrigin, PageMessage};
use crate::overlay::bridge::SocketBridge;
use crate::overlay::message_types::{self, ClientSentSocketMessage, ServerSentSocketMessage};
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use std::time::Instant;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

pub async fn ws(ws: WebSocketUpgrade, State(app_context): State<AppContext>) -> Response {
    ws.on_upgrade(move |socket| async move {
        let mut handler = OverlayWsHandler::new(app_context, socket).await;
        handler.on_viewer_connected().await;
    })
}

/// One connected overlay page.
pub struct OverlayWsHandler {
    app_context: AppContext,
    socket_id: usize,
    viewer_ws_tx: Option<SplitSink<WebSocket, Message>>,
    viewer_ws_rx: SplitStream<WebSocket>,
    rx: Option<UnboundedReceiverStream<Message>>,
}

impl OverlayWsHandler {
    pub async fn new(app_context: AppContext, websocket: WebSocket) -> Self {
        // Buffer outgoing messages in an unbounded channel so that renderers never wait on a
        // slow page.
        let (viewer_ws_tx, viewer_ws_rx) = websocket.split();
        let (tx, rx) = mpsc::unbounded_channel();
        let rx = UnboundedReceiverStream::new(rx);
        let socket_id = app_context.sockets.add(tx).await;
        Self {
            app_context,
            socket_id,
            viewer_ws_tx: Some(viewer_ws_tx),
            viewer_ws_rx,
            rx: Some(rx),
        }
    }

    pub async fn on_viewer_connected(&mut self) {
        let socket_id = self.socket_id;
        if let (Some(mut viewer_ws_tx), Some(mut rx)) = (self.viewer_ws_tx.take(), self.rx.take()) {
            tokio::task::spawn(async move {
                while let Some(message) = rx.next().await {
                    if let Err(err) = viewer_ws_tx.send(message).await {
                        tracing::debug!(socket_id, "Overlay websocket send error: {err}");
                        break;
                    }
                }
            });
        }
        tracing::info!(socket_id, "Overlay viewer connected.");
        let viewer = SocketBridge::viewer(self.app_context.sockets.clone(), socket_id);
        self.app_context.overlay.viewer_connected(viewer).await;
        while let Some(result) = self.viewer_ws_rx.next().await {
            let message = match result {
                Ok(message) => message,
                Err(err) => {
                    tracing::debug!(socket_id, "Overlay websocket error: {err}");
                    break;
                }
            };
            match message {
                Message::Text(raw_message) => self.on_new_message(&raw_message).await,
                Message::Close(_) => break,
                _ => {}
            }
        }
        self.on_viewer_disconnected().await;
    }

    async fn on_new_message(&self, raw_message: &str) {
        let start_time = Instant::now();
        let socket_message = match serde_json::from_str::<ClientSentSocketMessage>(raw_message) {
            Ok(socket_message) => socket_message,
            Err(err) => {
                tracing::warn!(
                    socket_id = self.socket_id,
                    "Failed to deserialize overlay message {raw_message:?}: {err}"
                );
                return;
            }
        };
        let message_type = socket_message.message_type_as_str();
        match socket_message {
            ClientSentSocketMessage::ToggleVisibility { .. } => {
                self.app_context.overlay.toggle().await;
            }
            ClientSentSocketMessage::Navigated { payload, .. } => {
                self.app_context.bus.publish(
                    MessageOrigin {
                        page: self.app_context.page,
                    },
                    PageMessage::Navigation { href: payload.href },
                );
            }
            ClientSentSocketMessage::Ping { .. } => {
                let pong = ServerSentSocketMessage::Pong {
                    r#type: message_types::Pong,
                };
                match serde_json::to_string(&pong) {
                    Ok(raw_pong) => {
                        self.app_context
                            .sockets
                            .send_msg(&raw_pong, self.socket_id)
                            .await;
                    }
                    Err(err) => tracing::warn!("Failed to serialize pong: {err}"),
                }
            }
        }
        tracing::info!(
            task = "overlay_ws_message",
            message_type,
            socket_id = self.socket_id,
            processing_time_us = start_time.elapsed().as_micros() as u64,
        );
    }

    async fn on_viewer_disconnected(&self) {
        self.app_context.sockets.remove(self.socket_id).await;
        tracing::info!(socket_id = self.socket_id, "Overlay viewer disconnected.");
    }
}
