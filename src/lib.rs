//! Transient toast notifications for ratatui applications.
//!
//! Mount a toast once with [`ToastRegistry::mount`], draw it every frame with
//! [`ToastWidget`], and raise messages from anywhere through a registry
//! clone:
//!
//! ```no_run
//! use toastify::{ToastConfig, ToastRegistry};
//!
//! # #[tokio::main] async fn main() {
//! let registry = ToastRegistry::new();
//! let toast = registry.mount(ToastConfig::default());
//! registry.success("Saved", None);
//! assert!(toast.is_visible());
//! # }
//! ```

pub mod animation;
pub mod config;
pub mod controller;
pub mod countdown;
pub mod error;
pub mod gesture;
pub mod registry;
pub mod severity;
pub mod ui;

pub use animation::{AnimationKind, AnimationStyle};
pub use config::{Position, Theme, ToastConfig, ToastDuration};
pub use controller::{HideReason, ToastController, ToastEvent, ToastView};
pub use error::ConfigError;
pub use gesture::{Gesture, GestureRecognizer, SwipeDirection};
pub use registry::{MountedToast, ToastRegistry};
pub use severity::{ColorRole, IconName, Severity, ToastStyle};
pub use ui::{ToastLayout, ToastWidget};
