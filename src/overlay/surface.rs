use crate::cli::Args;
use crate::overlay::consts::{
    MARKER_ICON, MARKER_ICON_ANCHOR, MARKER_ICON_RETINA, MARKER_ICON_SIZE, MARKER_POPUP_ANCHOR,
    MARKER_SHADOW, MARKER_SHADOW_SIZE,
};
use crate::overlay::render::RenderError;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementIds {
    pub host: String,
    pub overlay: String,
    pub map: String,
    pub toggle: String,
}

impl ElementIds {
    pub fn random() -> Self {
        Self {
            host: random_id("host-"),
            overlay: random_id("overlay-"),
            map: random_id("map-"),
            toggle: random_id("toggle-"),
        }
    }
}

fn random_id(prefix: &str) -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    format!("{prefix}{id}")
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerIcons {
    pub icon_url: Url,
    pub icon_retina_url: Url,
    pub shadow_url: Url,
    pub icon_size: [i32; 2],
    pub icon_anchor: [i32; 2],
    pub popup_anchor: [i32; 2],
    pub shadow_size: [i32; 2],
}

impl MarkerIcons {
    pub fn from_base(base: &Url) -> Result<Self, url::ParseError> {
        Ok(Self {
            icon_url: base.join(MARKER_ICON)?,
            icon_retina_url: base.join(MARKER_ICON_RETINA)?,
            shadow_url: base.join(MARKER_SHADOW)?,
            icon_size: MARKER_ICON_SIZE,
            icon_anchor: MARKER_ICON_ANCHOR,
            popup_anchor: MARKER_POPUP_ANCHOR,
            shadow_size: MARKER_SHADOW_SIZE,
        })
    }
}

/// Everything an overlay page needs to put the overlay on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct UiSurface {
    pub ids: ElementIds,
    pub stylesheet: String,
    pub icons: MarkerIcons,
}

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("failed to fetch the map stylesheet: {0}")]
    StylesheetFetch(#[from] reqwest::Error),
    #[error("map stylesheet request answered with {0}")]
    StylesheetStatus(StatusCode),
    #[error("invalid marker icon URL: {0}")]
    IconUrl(#[from] url::ParseError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

#[async_trait]
pub trait SurfaceBuilder: Send + Sync {
    async fn build(&self) -> Result<UiSurface, SurfaceError>;
}

/// Builds surfaces from the configured stylesheet and icon locations.
pub struct AssetSurfaceBuilder {
    client: reqwest::Client,
    stylesheet_url: Url,
    icon_base_url: Url,
}

impl AssetSurfaceBuilder {
    pub fn new(args: &Args) -> Result<Self, reqwest::Error> {
        // Builds run on the controller task, so a stalled asset host must not hold it forever.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(args.asset_timeout_ms))
            .build()?;
        Ok(Self {
            client,
            stylesheet_url: args.stylesheet_url.clone(),
            icon_base_url: args.icon_base_url.clone(),
        })
    }
}

#[async_trait]
impl SurfaceBuilder for AssetSurfaceBuilder {
    async fn build(&self) -> Result<UiSurface, SurfaceError> {
        let icons = MarkerIcons::from_base(&self.icon_base_url)?;
        let response = self.client.get(self.stylesheet_url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(SurfaceError::StylesheetStatus(response.status()));
        }
        let stylesheet = response.text().await?;
        Ok(UiSurface {
            ids: ElementIds::random(),
            stylesheet,
            icons,
        })
    }
}
