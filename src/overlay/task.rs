use crate::messages::Envelope;
use crate::overlay::bridge::SocketBridge;
use crate::overlay::consts::OVERLAY_COMMAND_CHANNEL_CAPACITY;
use crate::overlay::controller::OverlayController;
use crate::overlay::render::{MapRenderer, OverlayRenderer};
use crate::overlay::state::OverlaySnapshot;
use crate::overlay::surface::SurfaceBuilder;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc, oneshot};

pub enum OverlayCommand {
    Toggle(oneshot::Sender<OverlaySnapshot>),
    ViewerConnected(SocketBridge),
    Snapshot(oneshot::Sender<OverlaySnapshot>),
}

/// Talks to the task that owns the [`OverlayController`].
///
/// Every method returns `None` once that task is gone.
#[derive(Clone)]
pub struct OverlayHandle {
    commands: mpsc::Sender<OverlayCommand>,
}

impl OverlayHandle {
    pub async fn toggle(&self) -> Option<OverlaySnapshot> {
        self.request(OverlayCommand::Toggle).await
    }

    pub async fn snapshot(&self) -> Option<OverlaySnapshot> {
        self.request(OverlayCommand::Snapshot).await
    }

    pub async fn viewer_connected(&self, viewer: SocketBridge) -> Option<()> {
        self.commands
            .send(OverlayCommand::ViewerConnected(viewer))
            .await
            .ok()
    }

    async fn request(
        &self,
        command: impl FnOnce(oneshot::Sender<OverlaySnapshot>) -> OverlayCommand,
    ) -> Option<OverlaySnapshot> {
        let (tx, rx) = oneshot::channel();
        self.commands.send(command(tx)).await.ok()?;
        rx.await.ok()
    }
}

pub fn spawn<R, B>(
    mut controller: OverlayController<R, B>,
    mut page_messages: broadcast::Receiver<Envelope>,
) -> OverlayHandle
where
    R: OverlayRenderer + MapRenderer + 'static,
    B: SurfaceBuilder + 'static,
{
    let (commands, mut command_rx) = mpsc::channel(OVERLAY_COMMAND_CHANNEL_CAPACITY);
    tokio::spawn(async move {
        loop {
            tokio::select! {
                // Page messages go first so that a snapshot requested after a notification was
                // published already reflects it.
                biased;
                received = page_messages.recv() => match received {
                    Ok(envelope) => controller.on_envelope(envelope).await,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Overlay controller fell behind on page messages.");
                    }
                    Err(RecvError::Closed) => break,
                },
                command = command_rx.recv() => match command {
                    Some(OverlayCommand::Toggle(reply)) => {
                        controller.toggle_visibility().await;
                        let _ = reply.send(controller.snapshot());
                    }
                    Some(OverlayCommand::ViewerConnected(viewer)) => {
                        controller.on_viewer_connected(&viewer).await;
                    }
                    Some(OverlayCommand::Snapshot(reply)) => {
                        let _ = reply.send(controller.snapshot());
                    }
                    None => break,
                },
            }
        }
        tracing::info!("Overlay controller stopped.");
    });
    OverlayHandle { commands }
}
