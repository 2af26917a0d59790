use crate::coords::CoordinatePair;
use crate::overlay::consts::{OVERLAY_COLLAPSED_HEIGHT, OVERLAY_EXPANDED_HEIGHT};
use crate::overlay::surface::UiSurface;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayState {
    pub visible: bool,
    pub last_coordinate: Option<CoordinatePair>,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            visible: true,
            last_coordinate: None,
        }
    }
}

#[derive(Debug)]
pub struct MountedSurface {
    pub surface: UiSurface,
    pub map_created: bool,
}

/// The overlay surface is either not built, shown, or hidden but kept around for reuse.
#[derive(Debug, Default)]
pub enum SurfaceState {
    #[default]
    Absent,
    Shown(MountedSurface),
    Retained(MountedSurface),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlayPhase {
    Uninitialized,
    HiddenNoSurface,
    VisibleExpanded,
    VisibleCollapsed,
    HiddenSurfaceExists,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlaySnapshot {
    pub phase: OverlayPhase,
    pub visible: bool,
    pub last_coordinate: Option<CoordinatePair>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Layout {
    Expanded,
    Collapsed,
    Hidden,
}

impl Layout {
    pub fn host_height(&self) -> &'static str {
        match self {
            Layout::Collapsed => OVERLAY_COLLAPSED_HEIGHT,
            Layout::Expanded | Layout::Hidden => OVERLAY_EXPANDED_HEIGHT,
        }
    }

    pub fn host_displayed(&self) -> bool {
        !matches!(self, Layout::Hidden)
    }

    pub fn map_displayed(&self) -> bool {
        matches!(self, Layout::Expanded)
    }

    pub fn toggle_label(&self) -> &'static str {
        match self {
            Layout::Collapsed => "+",
            Layout::Expanded | Layout::Hidden => "\u{2212}",
        }
    }
}
