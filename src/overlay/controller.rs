use crate::coords::consts::COORD_UPDATE_THRESHOLD;
use crate::coords::{is_significant_change, CoordinatePair};
use crate::messages::{Envelope, PageId, PageMessage};
use crate::overlay::consts::INITIAL_ZOOM_LEVEL;
use crate::overlay::navigation::is_in_round;
use crate::overlay::render::{MapRenderer, OverlayRenderer, RenderError};
use crate::overlay::state::{
    Layout, MountedSurface, OverlayPhase, OverlaySnapshot, OverlayState, SurfaceState,
};
use crate::overlay::surface::{SurfaceBuilder, SurfaceError};
use std::mem;

/// What became of a coordinate notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Not two finite numbers.
    Rejected,
    /// Too close to what is already shown.
    Insignificant,
    /// The surface could not be built; the next update starts from scratch.
    SurfaceUnavailable,
    /// The map kept its previous state.
    MapUpdateFailed,
    Displayed,
}

enum MapFailure {
    Creation(RenderError),
    Update(RenderError),
}

/// Decides which coordinates are worth showing and owns the overlay's lifecycle.
///
/// The controller is meant to be owned by a single task (see [`crate::overlay::task`]), so
/// surface construction can never be entered twice at the same time.
pub struct OverlayController<R, B> {
    page: PageId,
    renderer: R,
    builder: B,
    surface: SurfaceState,
    state: OverlayState,
    construction_failed: bool,
}

impl<R, B> OverlayController<R, B>
where
    R: OverlayRenderer + MapRenderer,
    B: SurfaceBuilder,
{
    pub fn new(page: PageId, renderer: R, builder: B) -> Self {
        Self {
            page,
            renderer,
            builder,
            surface: SurfaceState::Absent,
            state: OverlayState::default(),
            construction_failed: false,
        }
    }

    pub fn phase(&self) -> OverlayPhase {
        match &self.surface {
            SurfaceState::Absent if self.construction_failed => OverlayPhase::HiddenNoSurface,
            SurfaceState::Absent => OverlayPhase::Uninitialized,
            SurfaceState::Shown(_) if self.state.visible => OverlayPhase::VisibleExpanded,
            SurfaceState::Shown(_) => OverlayPhase::VisibleCollapsed,
            SurfaceState::Retained(_) => OverlayPhase::HiddenSurfaceExists,
        }
    }

    pub fn snapshot(&self) -> OverlaySnapshot {
        OverlaySnapshot {
            phase: self.phase(),
            visible: self.state.visible,
            last_coordinate: self.state.last_coordinate,
        }
    }

    pub async fn on_envelope(&mut self, envelope: Envelope) {
        if envelope.origin.page != self.page {
            tracing::debug!(
                origin = %envelope.origin.page,
                "Ignoring a page message from another page."
            );
            return;
        }
        match envelope.message {
            PageMessage::Coordinates { lat, lng } => {
                let outcome = self.on_coordinate_notification(lat, lng).await;
                tracing::debug!(?outcome, lat, lng, "Handled coordinate notification.");
            }
            PageMessage::Navigation { href } => self.on_navigation(&href).await,
        }
    }

    pub async fn on_coordinate_notification(&mut self, lat: f64, lng: f64) -> UpdateOutcome {
        let Some(coordinates) = CoordinatePair::new(lat, lng) else {
            return UpdateOutcome::Rejected;
        };
        if !is_significant_change(
            self.state.last_coordinate,
            coordinates,
            COORD_UPDATE_THRESHOLD,
        ) {
            return UpdateOutcome::Insignificant;
        }
        if let Err(err) = self.ensure_surface().await {
            tracing::warn!("Failed to build the overlay surface: {err}");
            return UpdateOutcome::SurfaceUnavailable;
        }
        self.show_expanded().await;
        let result = match &mut self.surface {
            SurfaceState::Shown(mounted) => {
                render_position(&self.renderer, mounted, coordinates).await
            }
            SurfaceState::Absent | SurfaceState::Retained(_) => {
                return UpdateOutcome::SurfaceUnavailable;
            }
        };
        match result {
            Ok(()) => {
                self.state.last_coordinate = Some(coordinates);
                UpdateOutcome::Displayed
            }
            Err(MapFailure::Creation(err)) => {
                tracing::warn!("Failed to create the overlay map: {err}");
                self.discard_surface().await;
                UpdateOutcome::SurfaceUnavailable
            }
            Err(MapFailure::Update(err)) => {
                tracing::warn!("Failed to update the overlay map: {err}");
                self.state.last_coordinate = Some(coordinates);
                UpdateOutcome::MapUpdateFailed
            }
        }
    }

    /// Builds and mounts the surface unless one already exists.
    pub async fn ensure_surface(&mut self) -> Result<(), SurfaceError> {
        if !matches!(self.surface, SurfaceState::Absent) {
            return Ok(());
        }
        let surface = match self.builder.build().await {
            Ok(surface) => surface,
            Err(err) => {
                self.construction_failed = true;
                return Err(err);
            }
        };
        if let Err(err) = self.renderer.mount(&surface, self.current_layout()).await {
            if let Err(unmount_err) = self.renderer.unmount(&surface).await {
                tracing::debug!("Failed to unmount a half-built overlay surface: {unmount_err}");
            }
            self.construction_failed = true;
            return Err(err.into());
        }
        tracing::info!(host = %surface.ids.host, "Built the overlay surface.");
        self.surface = SurfaceState::Shown(MountedSurface {
            surface,
            map_created: false,
        });
        Ok(())
    }

    /// Returns whether the map is visible afterwards.
    pub async fn toggle_visibility(&mut self) -> bool {
        self.state.visible = !self.state.visible;
        if let SurfaceState::Shown(mounted) = &self.surface {
            let layout = self.current_layout();
            if let Err(err) = self.renderer.set_layout(&mounted.surface, layout).await {
                tracing::warn!("Failed to change the overlay layout: {err}");
            }
            if self.state.visible && mounted.map_created {
                if let Err(err) = self.renderer.invalidate_size().await {
                    tracing::warn!("Failed to relayout the overlay map: {err}");
                }
            }
        }
        self.state.visible
    }

    pub async fn on_navigation(&mut self, href: &str) {
        if is_in_round(href) {
            return;
        }
        tracing::debug!(href, "Navigated away from a round.");
        self.on_navigation_away().await;
    }

    /// Hides the surface without dropping it and forgets the displayed coordinate.
    pub async fn on_navigation_away(&mut self) {
        self.surface = match mem::take(&mut self.surface) {
            SurfaceState::Shown(mounted) => {
                if let Err(err) = self
                    .renderer
                    .set_layout(&mounted.surface, Layout::Hidden)
                    .await
                {
                    tracing::warn!("Failed to hide the overlay: {err}");
                }
                SurfaceState::Retained(mounted)
            }
            other => other,
        };
        self.state = OverlayState::default();
    }

    /// Replays the current surface to an overlay page that just connected, through `viewer`
    /// rather than the renderer every page listens to.
    pub async fn on_viewer_connected<V>(&self, viewer: &V)
    where
        V: OverlayRenderer + MapRenderer,
    {
        let (mounted, layout) = match &self.surface {
            SurfaceState::Absent => return,
            SurfaceState::Shown(mounted) => (mounted, self.current_layout()),
            SurfaceState::Retained(mounted) => (mounted, Layout::Hidden),
        };
        if let Err(err) = viewer.mount(&mounted.surface, layout).await {
            tracing::warn!("Failed to replay the overlay surface: {err}");
            return;
        }
        let Some(coordinates) = self.state.last_coordinate.filter(|_| mounted.map_created) else {
            return;
        };
        if let Err(err) = viewer
            .create_map(&mounted.surface.ids.map, coordinates, INITIAL_ZOOM_LEVEL)
            .await
        {
            tracing::warn!("Failed to replay the overlay map: {err}");
            return;
        }
        if let Err(err) = viewer.place_marker(coordinates).await {
            tracing::warn!("Failed to replay the overlay marker: {err}");
        }
    }

    fn current_layout(&self) -> Layout {
        if self.state.visible {
            Layout::Expanded
        } else {
            Layout::Collapsed
        }
    }

    /// Forces the surface (if any) on screen with the map expanded.
    async fn show_expanded(&mut self) {
        self.state.visible = true;
        self.surface = match mem::take(&mut self.surface) {
            SurfaceState::Shown(mounted) | SurfaceState::Retained(mounted) => {
                if let Err(err) = self
                    .renderer
                    .set_layout(&mounted.surface, Layout::Expanded)
                    .await
                {
                    tracing::warn!("Failed to expand the overlay: {err}");
                }
                SurfaceState::Shown(mounted)
            }
            SurfaceState::Absent => SurfaceState::Absent,
        };
    }

    async fn discard_surface(&mut self) {
        if let SurfaceState::Shown(mounted) | SurfaceState::Retained(mounted) =
            mem::take(&mut self.surface)
        {
            if let Err(err) = self.renderer.unmount(&mounted.surface).await {
                tracing::debug!("Failed to unmount the discarded overlay surface: {err}");
            }
        }
        self.construction_failed = true;
    }
}

async fn render_position<R: MapRenderer>(
    renderer: &R,
    mounted: &mut MountedSurface,
    coordinates: CoordinatePair,
) -> Result<(), MapFailure> {
    if !mounted.map_created {
        renderer
            .create_map(&mounted.surface.ids.map, coordinates, INITIAL_ZOOM_LEVEL)
            .await
            .map_err(MapFailure::Creation)?;
        mounted.map_created = true;
        return renderer
            .place_marker(coordinates)
            .await
            .map_err(MapFailure::Update);
    }
    renderer
        .set_view(coordinates, None)
        .await
        .map_err(MapFailure::Update)?;
    renderer
        .place_marker(coordinates)
        .await
        .map_err(MapFailure::Update)?;
    renderer
        .invalidate_size()
        .await
        .map_err(MapFailure::Update)
}
