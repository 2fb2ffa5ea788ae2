pub mod icons;
pub mod layout;
pub mod overlays;

pub use icons::{Icon, glyph};
pub use layout::ToastLayout;
pub use overlays::{ToastWidget, render};
