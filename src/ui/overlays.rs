use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::config::ToastConfig;
use crate::controller::ToastView;
use crate::severity::IconName;
use crate::ui::icons::Icon;
use crate::ui::layout::ToastLayout;

const BAR_FILLED: &str = "━";
const BAR_EMPTY: &str = "─";

/// Draws the toast overlay (backdrop included) for one controller snapshot.
pub struct ToastWidget<'a> {
    config: &'a ToastConfig,
    view: &'a ToastView,
}

impl<'a> ToastWidget<'a> {
    pub fn new(config: &'a ToastConfig, view: &'a ToastView) -> Self {
        Self { config, view }
    }
}

impl Widget for ToastWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        render_backdrop(self.config, self.view, area, buf);
        if let Some(layout) = ToastLayout::compute(area, self.config, self.view) {
            render_toast(&layout, self.config, self.view, buf);
        }
    }
}

/// Renders the overlay over the whole frame and returns where the toast
/// landed, for hit-testing pointer events.
pub fn render(frame: &mut Frame, config: &ToastConfig, view: &ToastView) -> Option<ToastLayout> {
    let area = frame.area();
    frame.render_widget(ToastWidget::new(config, view), area);
    ToastLayout::compute(area, config, view)
}

fn render_backdrop(config: &ToastConfig, view: &ToastView, area: Rect, buf: &mut Buffer) {
    if !config.has_backdrop {
        return;
    }
    let level = view.backdrop_level * f64::from(config.backdrop_opacity);
    if level <= 0.0 {
        return;
    }

    // Terminals have no alpha: strong backdrops repaint, faint ones dim.
    let style = if level >= 0.5 {
        Style::default().bg(config.backdrop_color)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    buf.set_style(area, style);
}

fn render_toast(layout: &ToastLayout, config: &ToastConfig, view: &ToastView, buf: &mut Buffer) {
    let palette = config.theme.palette();
    let accent = view.style.color.color();

    let mut body = Style::default().fg(palette.text).bg(palette.back);
    if let Some(style) = &config.style {
        body = body.patch(style.to_style());
    }

    Clear.render(layout.toast, buf);
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(
            Style::default()
                .fg(accent)
                .add_modifier(Modifier::BOLD),
        )
        .style(body)
        .render(layout.toast, buf);

    Icon::new(IconName::Close)
        .style(body)
        .render(layout.close, buf);
    Icon::new(view.style.icon)
        .style(body)
        .color(accent)
        .render(layout.icon, buf);

    Paragraph::new(view.message.as_str())
        .style(body)
        .wrap(Wrap { trim: true })
        .render(layout.message, buf);

    render_bar(layout.bar, view.fraction, accent, body, buf);

    if layout.dim {
        buf.set_style(layout.toast, Style::default().add_modifier(Modifier::DIM));
    }
}

fn render_bar(area: Rect, fraction: f64, accent: Color, body: Style, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let filled = (fraction.clamp(0.0, 1.0) * f64::from(area.width)).round() as u16;

    for offset in 0..area.width {
        let Some(cell) = buf.cell_mut((area.x + offset, area.y)) else {
            continue;
        };
        if offset < filled {
            cell.set_symbol(BAR_FILLED).set_style(body.fg(accent));
        } else {
            cell.set_symbol(BAR_EMPTY)
                .set_style(body.add_modifier(Modifier::DIM));
        }
    }
}
