use crate::messages::{MessageBus, MessageOrigin, PageId};
use std::sync::atomic::{AtomicBool, Ordering};

/// Hands out the right to wrap the upstream service, once per page context.
pub struct InterceptorInstaller {
    installed: AtomicBool,
    page: PageId,
    bus: MessageBus,
}

/// Proof that the interceptor was installed. Only [`InterceptorInstaller::install`] makes one.
pub struct Installation {
    pub(super) origin: MessageOrigin,
    pub(super) bus: MessageBus,
}

impl InterceptorInstaller {
    pub fn new(page: PageId, bus: MessageBus) -> Self {
        Self {
            installed: AtomicBool::new(false),
            page,
            bus,
        }
    }

    pub fn install(&self) -> Option<Installation> {
        if self.installed.swap(true, Ordering::SeqCst) {
            tracing::warn!(page = %self.page, "Metadata interceptor is already installed.");
            return None;
        }
        tracing::info!(page = %self.page, "Installed metadata interceptor.");
        Some(Installation {
            origin: MessageOrigin { page: self.page },
            bus: self.bus.clone(),
        })
    }
}
