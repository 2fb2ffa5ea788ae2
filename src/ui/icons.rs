use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::severity::IconName;

pub fn glyph(name: IconName) -> &'static str {
    match name {
        IconName::Information => "ℹ",
        IconName::Checkmark => "✔",
        IconName::Warning => "⚠",
        IconName::Alert => "✖",
        IconName::Close => "✕",
    }
}

/// A single named glyph drawn in the top-left cell of its area.
pub struct Icon {
    name: IconName,
    style: Style,
}

impl Icon {
    pub fn new(name: IconName) -> Self {
        Self {
            name,
            style: Style::default(),
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.style = self.style.fg(color);
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = self.style.patch(style);
        self
    }
}

impl Widget for Icon {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        if let Some(cell) = buf.cell_mut((area.x, area.y)) {
            cell.set_symbol(glyph(self.name)).set_style(self.style);
        }
    }
}
