use crate::messages::{MessageBus, PageId};
use crate::overlay::bridge::SocketBridge;
use crate::overlay::surface::SurfaceBuilder;
use crate::overlay::{self, OverlayController, OverlayHandle};
use crate::storage::sockets::OverlaySockets;

#[derive(Clone)]
pub struct AppContext {
    pub page: PageId,
    pub bus: MessageBus,
    pub overlay: OverlayHandle,
    pub sockets: OverlaySockets,
}

/// Starts a fresh page context with its overlay controller running.
pub fn init<B>(surface_builder: B) -> AppContext
where
    B: SurfaceBuilder + 'static,
{
    let page = PageId::random();
    let bus = MessageBus::default();
    let sockets = OverlaySockets::default();
    let controller = OverlayController::new(page, SocketBridge::new(sockets.clone()), surface_builder);
    let overlay = overlay::spawn(controller, bus.subscribe());
    tracing::info!(%page, "Initialized page context.");
    AppContext {
        page,
        bus,
        overlay,
        sockets,
    }
}
