use crate::coords::CoordinatePair;
use crate::overlay::consts::{TILE_MAX_ZOOM, TILE_SUBDOMAINS, TILE_URL_TEMPLATE};
use crate::overlay::message_types::{
    self, CreateMapPayload, LayoutPayload, MountSurfacePayload, ServerSentSocketMessage,
    SetViewPayload, TileLayerPayload, UnmountSurfacePayload,
};
use crate::overlay::render::{MapRenderer, OverlayRenderer, RenderError};
use crate::overlay::state::Layout;
use crate::overlay::surface::UiSurface;
use crate::storage::sockets::OverlaySockets;
use async_trait::async_trait;

/// Renders by sending commands to connected overlay pages.
///
/// A bridge made with [`SocketBridge::new`] talks to every page. Having no page connected is not a
/// failure: a page that connects later is brought up to date through a bridge made with
/// [`SocketBridge::viewer`], which talks to that page alone.
#[derive(Clone)]
pub struct SocketBridge {
    sockets: OverlaySockets,
    viewer: Option<usize>,
}

impl SocketBridge {
    pub fn new(sockets: OverlaySockets) -> Self {
        Self {
            sockets,
            viewer: None,
        }
    }

    pub fn viewer(sockets: OverlaySockets, socket_id: usize) -> Self {
        Self {
            sockets,
            viewer: Some(socket_id),
        }
    }

    async fn send(&self, message: ServerSentSocketMessage) -> Result<(), RenderError> {
        let raw_message = serde_json::to_string(&message)?;
        if let Some(socket_id) = self.viewer {
            if !self.sockets.send_msg(&raw_message, socket_id).await {
                return Err(RenderError::Disconnected { failed: 1 });
            }
            return Ok(());
        }
        let delivery = self.sockets.broadcast_msg(&raw_message).await;
        if delivery.delivered == 0 && delivery.failed > 0 {
            return Err(RenderError::Disconnected {
                failed: delivery.failed,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl OverlayRenderer for SocketBridge {
    async fn mount(&self, surface: &UiSurface, layout: Layout) -> Result<(), RenderError> {
        self.send(ServerSentSocketMessage::MountSurface {
            r#type: message_types::MountSurface,
            payload: MountSurfacePayload {
                ids: surface.ids.clone(),
                stylesheet: surface.stylesheet.clone(),
                icons: surface.icons.clone(),
                layout: LayoutPayload::new(&surface.ids.host, layout),
            },
        })
        .await
    }

    async fn set_layout(&self, surface: &UiSurface, layout: Layout) -> Result<(), RenderError> {
        self.send(ServerSentSocketMessage::SetLayout {
            r#type: message_types::SetLayout,
            payload: LayoutPayload::new(&surface.ids.host, layout),
        })
        .await
    }

    async fn unmount(&self, surface: &UiSurface) -> Result<(), RenderError> {
        self.send(ServerSentSocketMessage::UnmountSurface {
            r#type: message_types::UnmountSurface,
            payload: UnmountSurfacePayload {
                host_id: surface.ids.host.clone(),
            },
        })
        .await
    }
}

#[async_trait]
impl MapRenderer for SocketBridge {
    async fn create_map(
        &self,
        container_id: &str,
        center: CoordinatePair,
        zoom: u8,
    ) -> Result<(), RenderError> {
        self.send(ServerSentSocketMessage::CreateMap {
            r#type: message_types::CreateMap,
            payload: CreateMapPayload {
                container_id: container_id.to_string(),
                center,
                zoom,
                tiles: TileLayerPayload {
                    url_template: TILE_URL_TEMPLATE,
                    subdomains: TILE_SUBDOMAINS,
                    max_zoom: TILE_MAX_ZOOM,
                },
            },
        })
        .await
    }

    async fn set_view(&self, center: CoordinatePair, zoom: Option<u8>) -> Result<(), RenderError> {
        self.send(ServerSentSocketMessage::SetView {
            r#type: message_types::SetView,
            payload: SetViewPayload { center, zoom },
        })
        .await
    }

    async fn place_marker(&self, position: CoordinatePair) -> Result<(), RenderError> {
        self.send(ServerSentSocketMessage::PlaceMarker {
            r#type: message_types::PlaceMarker,
            payload: position,
        })
        .await
    }

    async fn invalidate_size(&self) -> Result<(), RenderError> {
        self.send(ServerSentSocketMessage::InvalidateSize {
            r#type: message_types::InvalidateSize,
        })
        .await
    }
}
