use clap::Parser;
use std::net::SocketAddr;
use url::Url;

#[derive(Debug, Parser)]
#[command(about = "Shows the current panorama location on a small map overlay.")]
pub struct Args {
    #[arg(long)]
    #[arg(default_value = "127.0.0.1:3030")]
    pub listen_address: SocketAddr,
    /// Origin that proxied requests are forwarded to.
    #[arg(long)]
    #[arg(default_value = "https://maps.googleapis.com")]
    pub upstream_url: Url,
    /// Origin allowed to call the service from the browser; may be repeated.
    #[arg(long = "allowed-origin")]
    #[arg(default_value = "https://www.geoguessr.com")]
    pub allowed_origins: Vec<String>,
    #[arg(long)]
    #[arg(default_value = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css")]
    pub stylesheet_url: Url,
    /// Directory URL holding the marker images; keep the trailing slash.
    #[arg(long)]
    #[arg(default_value = "https://unpkg.com/leaflet@1.9.4/dist/images/")]
    pub icon_base_url: Url,
    /// How long fetching overlay assets may take before the surface build fails.
    #[arg(long)]
    #[arg(default_value_t = 10_000)]
    pub asset_timeout_ms: u64,
    #[arg(long)]
    #[arg(default_value = "geo_overlay=info")]
    pub log_filter: String,
}
