use crate::coords::CoordinatePair;
use crate::overlay::state::Layout;
use crate::overlay::surface::{ElementIds, MarkerIcons};
use serde::{Deserialize, Serialize};
use serde_unit_struct::{Deserialize_unit_struct, Serialize_unit_struct};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ClientSentSocketMessage {
    ToggleVisibility {
        #[allow(dead_code)]
        // Only used to tell the variants apart.
        r#type: ToggleVisibility,
    },
    Navigated {
        #[allow(dead_code)]
        r#type: Navigated,
        payload: NavigatedPayload,
    },
    Ping {
        #[allow(dead_code)]
        r#type: Ping,
    },
}

impl ClientSentSocketMessage {
    pub fn message_type_as_str(&self) -> &'static str {
        match self {
            ClientSentSocketMessage::ToggleVisibility { .. } => "ToggleVisibility",
            ClientSentSocketMessage::Navigated { .. } => "Navigated",
            ClientSentSocketMessage::Ping { .. } => "Ping",
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ServerSentSocketMessage {
    MountSurface {
        r#type: MountSurface,
        payload: MountSurfacePayload,
    },
    SetLayout {
        r#type: SetLayout,
        payload: LayoutPayload,
    },
    UnmountSurface {
        r#type: UnmountSurface,
        payload: UnmountSurfacePayload,
    },
    CreateMap {
        r#type: CreateMap,
        payload: CreateMapPayload,
    },
    SetView {
        r#type: SetView,
        payload: SetViewPayload,
    },
    PlaceMarker {
        r#type: PlaceMarker,
        payload: CoordinatePair,
    },
    InvalidateSize {
        r#type: InvalidateSize,
    },
    Pong {
        r#type: Pong,
    },
}

#[derive(Debug, Serialize_unit_struct, Deserialize_unit_struct)]
pub struct ToggleVisibility;

#[derive(Debug, Serialize_unit_struct, Deserialize_unit_struct)]
pub struct Navigated;

#[derive(Debug, Serialize_unit_struct, Deserialize_unit_struct)]
pub struct Ping;

#[derive(Debug, Serialize_unit_struct, Deserialize_unit_struct)]
pub struct MountSurface;

#[derive(Debug, Serialize_unit_struct, Deserialize_unit_struct)]
pub struct SetLayout;

#[derive(Debug, Serialize_unit_struct, Deserialize_unit_struct)]
pub struct UnmountSurface;

#[derive(Debug, Serialize_unit_struct, Deserialize_unit_struct)]
pub struct CreateMap;

#[derive(Debug, Serialize_unit_struct, Deserialize_unit_struct)]
pub struct SetView;

#[derive(Debug, Serialize_unit_struct, Deserialize_unit_struct)]
pub struct PlaceMarker;

#[derive(Debug, Serialize_unit_struct, Deserialize_unit_struct)]
pub struct InvalidateSize;

#[derive(Debug, Serialize_unit_struct, Deserialize_unit_struct)]
pub struct Pong;

#[derive(Debug, Deserialize)]
pub struct NavigatedPayload {
    pub href: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MountSurfacePayload {
    pub ids: ElementIds,
    pub stylesheet: String,
    pub icons: MarkerIcons,
    pub layout: LayoutPayload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutPayload {
    pub host_id: String,
    pub layout: Layout,
    pub host_height: &'static str,
    pub host_displayed: bool,
    pub map_displayed: bool,
    pub toggle_label: &'static str,
}

impl LayoutPayload {
    pub fn new(host_id: &str, layout: Layout) -> Self {
        Self {
            host_id: host_id.to_string(),
            layout,
            host_height: layout.host_height(),
            host_displayed: layout.host_displayed(),
            map_displayed: layout.map_displayed(),
            toggle_label: layout.toggle_label(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmountSurfacePayload {
    pub host_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMapPayload {
    pub container_id: String,
    pub center: CoordinatePair,
    pub zoom: u8,
    pub tiles: TileLayerPayload,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayerPayload {
    pub url_template: &'static str,
    pub subdomains: &'static str,
    pub max_zoom: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetViewPayload {
    pub center: CoordinatePair,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<u8>,
}
