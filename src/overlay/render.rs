//! Seams to whatever puts the overlay and its map on screen.

use crate::coords::CoordinatePair;
use crate::overlay::state::Layout;
use crate::overlay::surface::UiSurface;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize render command: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("every overlay viewer is disconnected ({failed} failed)")]
    Disconnected { failed: usize },
}

#[async_trait]
pub trait OverlayRenderer: Send + Sync {
    async fn mount(&self, surface: &UiSurface, layout: Layout) -> Result<(), RenderError>;

    async fn set_layout(&self, surface: &UiSurface, layout: Layout) -> Result<(), RenderError>;

    async fn unmount(&self, surface: &UiSurface) -> Result<(), RenderError>;
}

/// The mapping library. Owns exactly one map and one position marker.
#[async_trait]
pub trait MapRenderer: Send + Sync {
    async fn create_map(
        &self,
        container_id: &str,
        center: CoordinatePair,
        zoom: u8,
    ) -> Result<(), RenderError>;

    /// Recenters the map; `None` keeps the current zoom.
    async fn set_view(&self, center: CoordinatePair, zoom: Option<u8>) -> Result<(), RenderError>;

    /// Adds the marker if there is none yet, otherwise moves it.
    async fn place_marker(&self, position: CoordinatePair) -> Result<(), RenderError>;

    async fn invalidate_size(&self) -> Result<(), RenderError>;
}
