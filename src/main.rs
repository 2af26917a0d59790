use crate::cli::Args;
use crate::intercept::InterceptorInstaller;
use crate::overlay::surface::AssetSurfaceBuilder;
use crate::proxy::UpstreamService;
use clap::Parser;
use tokio::net::TcpListener;

mod app_context;
mod cli;
mod coords;
mod extraction;
mod health;
mod html;
mod http;
mod intercept;
mod logging;
mod messages;
mod overlay;
mod proxy;
mod storage;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(&args);
    let surface_builder =
        AssetSurfaceBuilder::new(&args).expect("Failed to build the overlay asset client.");
    let app_context = app_context::init(surface_builder);
    let installer = InterceptorInstaller::new(app_context.page, app_context.bus.clone());
    let installation = installer
        .install()
        .expect("Fresh installer refused to install.");
    let upstream = UpstreamService::new(&args).expect("Failed to build the upstream client.");
    let router = crate::http::router::new(&args, app_context, installation, upstream);
    let listener = TcpListener::bind(args.listen_address)
        .await
        .expect("Failed to bind the listen address.");
    tracing::info!(address = %args.listen_address, upstream = %args.upstream_url, "Serving overlay.");
    axum::serve(listener, router)
        .await
        .expect("Failed to start server.");
}
