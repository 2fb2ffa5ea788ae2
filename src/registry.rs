//! Process-wide access to the mounted toast.
//!
//! Any part of an application holding a [`ToastRegistry`] clone can raise a
//! toast without a reference to the widget. Calls made while nothing is
//! mounted are dropped.

use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::config::{Position, ToastConfig};
use crate::controller::ToastController;
use crate::severity::Severity;

#[derive(Debug, Clone, Default)]
pub struct ToastRegistry {
    slot: Arc<Mutex<Option<ToastController>>>,
}

impl ToastRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a controller for `config` and makes it the current one.
    /// Dropping the returned guard unmounts it.
    pub fn mount(&self, config: ToastConfig) -> MountedToast {
        let controller = ToastController::new(config);
        self.register(controller.clone());
        MountedToast {
            controller,
            registry: self.clone(),
        }
    }

    /// Makes `controller` the dispatch target. The last registration wins.
    pub fn register(&self, controller: ToastController) {
        let mut slot = self.lock();
        if let Some(previous) = slot.as_ref().filter(|previous| !previous.same(&controller)) {
            warn!(
                previous = previous.id(),
                controller = controller.id(),
                "replacing the registered toast controller"
            );
        }
        debug!(controller = controller.id(), "toast controller registered");
        *slot = Some(controller);
    }

    /// Clears the slot if it still holds `controller`.
    pub fn unregister(&self, controller: &ToastController) -> bool {
        let mut slot = self.lock();
        if slot.as_ref().is_some_and(|current| current.same(controller)) {
            *slot = None;
            debug!(controller = controller.id(), "toast controller unregistered");
            true
        } else {
            false
        }
    }

    pub fn current(&self) -> Option<ToastController> {
        self.lock().clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.lock().is_some()
    }

    pub fn show(&self, message: impl Into<String>, severity: Severity, position: Option<Position>) {
        let message = message.into();
        match self.current() {
            Some(controller) => controller.show(message, severity, position),
            None => debug!(%severity, %message, "no toast mounted; dropping toast"),
        }
    }

    pub fn info(&self, message: impl Into<String>, position: Option<Position>) {
        self.show(message, Severity::Info, position);
    }

    pub fn success(&self, message: impl Into<String>, position: Option<Position>) {
        self.show(message, Severity::Success, position);
    }

    pub fn warn(&self, message: impl Into<String>, position: Option<Position>) {
        self.show(message, Severity::Warn, position);
    }

    pub fn error(&self, message: impl Into<String>, position: Option<Position>) {
        self.show(message, Severity::Error, position);
    }

    /// Hides the current toast, if any.
    pub fn hide(&self) {
        if let Some(controller) = self.current() {
            controller.hide();
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<ToastController>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A controller that stays registered for as long as this guard lives.
#[derive(Debug)]
pub struct MountedToast {
    controller: ToastController,
    registry: ToastRegistry,
}

impl MountedToast {
    pub fn controller(&self) -> &ToastController {
        &self.controller
    }

    /// Unregisters the controller and cancels its timer, same as dropping
    /// the guard.
    pub fn unmount(self) {
        drop(self);
    }
}

impl Deref for MountedToast {
    type Target = ToastController;

    fn deref(&self) -> &Self::Target {
        &self.controller
    }
}

impl Drop for MountedToast {
    fn drop(&mut self) {
        self.registry.unregister(&self.controller);
        self.controller.teardown();
    }
}
