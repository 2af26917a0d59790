pub const INITIAL_ZOOM_LEVEL: u8 = 6;
pub const OVERLAY_EXPANDED_HEIGHT: &str = "300px";
/// Just enough room for the toggle control.
pub const OVERLAY_COLLAPSED_HEIGHT: &str = "25px";
pub const OVERLAY_COMMAND_CHANNEL_CAPACITY: usize = 32;

pub const TILE_URL_TEMPLATE: &str =
    "https://{s}.basemaps.cartocdn.com/rastertiles/voyager/{z}/{x}/{y}{r}.png";
pub const TILE_SUBDOMAINS: &str = "abcd";
pub const TILE_MAX_ZOOM: u8 = 20;

pub const MARKER_ICON: &str = "marker-icon.png";
pub const MARKER_ICON_RETINA: &str = "marker-icon-2x.png";
pub const MARKER_SHADOW: &str = "marker-shadow.png";
pub const MARKER_ICON_SIZE: [i32; 2] = [25, 41];
pub const MARKER_ICON_ANCHOR: [i32; 2] = [12, 41];
pub const MARKER_POPUP_ANCHOR: [i32; 2] = [1, -34];
pub const MARKER_SHADOW_SIZE: [i32; 2] = [41, 41];

/// Route fragments of pages where a round can be in progress.
pub const IN_ROUND_ROUTES: [&str; 8] = [
    "/game/",
    "/challenge/",
    "/duels/",
    "/battle-royale/",
    "/live-challenge/",
    "/country-streak/",
    "/us-state-streak/",
    "/world-streak/",
];
