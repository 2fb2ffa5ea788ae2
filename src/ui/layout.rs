use ratatui::layout::Rect;

use crate::animation::Transform;
use crate::config::{MIN_HEIGHT, MIN_WIDTH, Position, ToastConfig};
use crate::controller::ToastView;

/// Where each part of a toast lands on screen for one frame.
///
/// Parts that fall off screen (or do not fit a zoomed-out toast) are empty
/// rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastLayout {
    pub toast: Rect,
    pub close: Rect,
    pub icon: Rect,
    pub message: Rect,
    pub bar: Rect,
    pub dim: bool,
}

impl ToastLayout {
    /// Lays out `view` inside `area`, or `None` when nothing is on screen.
    pub fn compute(area: Rect, config: &ToastConfig, view: &ToastView) -> Option<Self> {
        let (animation, hidden) = view
            .phase
            .animation(config.animation_in(), config.animation_out())?;
        let rest = resting_rect(area, config, view.position)?;
        let transform = animation.transform(hidden, rest, area);
        Self::place(area, rest, transform)
    }

    fn place(area: Rect, rest: Rect, transform: Transform) -> Option<Self> {
        let scale = transform.scale.clamp(0.0, 1.0);
        let width = (f64::from(rest.width) * scale).round() as i32;
        let height = (f64::from(rest.height) * scale).round() as i32;
        if width <= 0 || height <= 0 {
            return None;
        }

        let x = i32::from(rest.x) + (i32::from(rest.width) - width) / 2 + transform.dx;
        let y = i32::from(rest.y) + (i32::from(rest.height) - height) / 2 + transform.dy;

        let toast = clip(area, x, y, width, height);
        if toast.is_empty() {
            return None;
        }

        let mut layout = ToastLayout {
            toast,
            close: Rect::default(),
            icon: Rect::default(),
            message: Rect::default(),
            bar: Rect::default(),
            dim: transform.dim,
        };

        if width >= i32::from(MIN_WIDTH) / 2 && height >= i32::from(MIN_HEIGHT) {
            let (inner_x, inner_y) = (x + 1, y + 1);
            let (inner_w, inner_h) = (width - 2, height - 2);
            layout.close = clip(area, x + width - 3, y, 1, 1);
            layout.icon = clip(area, inner_x + 1, inner_y, 1, 1);
            layout.message = clip(area, inner_x + 3, inner_y, inner_w - 4, inner_h - 1);
            layout.bar = clip(area, inner_x, inner_y + inner_h - 1, inner_w, 1);
        }

        Some(layout)
    }
}

/// The toast rectangle once its entry animation is over.
pub fn resting_rect(area: Rect, config: &ToastConfig, position: Option<Position>) -> Option<Rect> {
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        return None;
    }
    let width = config.width.min(area.width);
    let height = config.height.min(area.height);
    let top = config
        .resolve_position(position, area.height)
        .min(area.height - height);
    let x = area.x + (area.width - width) / 2;

    Some(Rect::new(x, area.y + top, width, height))
}

/// Intersects a rectangle given in signed coordinates with `area`.
fn clip(area: Rect, x: i32, y: i32, width: i32, height: i32) -> Rect {
    let left = x.max(i32::from(area.x));
    let top = y.max(i32::from(area.y));
    let right = (x + width).min(i32::from(area.right()));
    let bottom = (y + height).min(i32::from(area.bottom()));

    if right <= left || bottom <= top {
        return Rect::default();
    }
    Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    )
}
