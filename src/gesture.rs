use ratatui::crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position as Cell;

use crate::ui::layout::ToastLayout;

/// Columns a press has to travel horizontally to count as a swipe.
pub const SWIPE_COLUMNS: u16 = 6;
/// Rows a press has to travel vertically to count as a swipe.
pub const SWIPE_ROWS: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Pointer interactions the toast reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    TouchStart,
    TouchEnd,
    Swipe(SwipeDirection),
    CloseTap,
}

#[derive(Debug, Clone, Copy)]
struct Press {
    column: u16,
    row: u16,
    on_close: bool,
}

/// Turns raw mouse events over a toast into [`Gesture`]s.
#[derive(Debug, Default)]
pub struct GestureRecognizer {
    press: Option<Press>,
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one mouse event. `layout` is where the toast was last drawn, if
    /// it was drawn at all.
    pub fn handle(&mut self, event: &MouseEvent, layout: Option<&ToastLayout>) -> Vec<Gesture> {
        let at = Cell::new(event.column, event.row);

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(layout) = layout.filter(|layout| layout.toast.contains(at)) else {
                    self.press = None;
                    return Vec::new();
                };
                let on_close = layout.close.contains(at);
                self.press = Some(Press {
                    column: event.column,
                    row: event.row,
                    on_close,
                });
                if on_close {
                    Vec::new()
                } else {
                    vec![Gesture::TouchStart]
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let Some(press) = self.press.take() else {
                    return Vec::new();
                };
                if press.on_close {
                    let released_on_close = layout.is_some_and(|layout| layout.close.contains(at));
                    return if released_on_close {
                        vec![Gesture::CloseTap]
                    } else {
                        Vec::new()
                    };
                }

                let mut gestures = vec![Gesture::TouchEnd];
                if let Some(direction) = swipe_direction(press, event.column, event.row) {
                    gestures.push(Gesture::Swipe(direction));
                }
                gestures
            }
            _ => Vec::new(),
        }
    }

    /// Forgets a press in flight, e.g. when the toast disappears under it.
    pub fn reset(&mut self) {
        self.press = None;
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }
}

fn swipe_direction(press: Press, column: u16, row: u16) -> Option<SwipeDirection> {
    let dx = i32::from(column) - i32::from(press.column);
    let dy = i32::from(row) - i32::from(press.row);
    let horizontal = dx.unsigned_abs() >= u32::from(SWIPE_COLUMNS);
    let vertical = dy.unsigned_abs() >= u32::from(SWIPE_ROWS);

    // Cells are about twice as tall as they are wide.
    match (horizontal, vertical) {
        (false, false) => None,
        (true, true) if dy.abs() * 2 >= dx.abs() => Some(vertical_direction(dy)),
        (true, _) => Some(if dx > 0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        }),
        (false, true) => Some(vertical_direction(dy)),
    }
}

fn vertical_direction(dy: i32) -> SwipeDirection {
    if dy > 0 {
        SwipeDirection::Down
    } else {
        SwipeDirection::Up
    }
}
