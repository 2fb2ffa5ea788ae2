use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

pub fn render(frame: &mut Frame, app: &mut App) {
    let [status_bar, body, controls] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(controls_height(frame.area().height)),
    ])
    .areas(frame.area());

    render_status_bar(frame, app, status_bar);
    render_actions(frame, app, body);
    render_controls(frame, controls);

    let view = app.toast.view();
    app.layout = toastify::ui::render(frame, app.toast.config(), &view);
}

fn controls_height(frame_height: u16) -> u16 {
    if frame_height < 20 { 3 } else { 4 }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let now = Local::now();
    let view = app.toast.view();

    let (toast_text, toast_color) = if view.paused {
        ("● Toast: paused", Color::Yellow)
    } else if view.visible {
        ("● Toast: visible", Color::Green)
    } else {
        ("○ Toast: hidden", Color::Gray)
    };
    let position = app
        .position
        .map_or_else(|| "config".to_string(), |position| position.to_string());

    let status_line = Line::from(vec![
        Span::styled(
            "toastify-demo",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            concat!("v", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}", now.format("%H:%M:%S")),
            Style::default().fg(Color::Gray),
        ),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::styled(toast_text, Style::default().fg(toast_color)),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Position: {position}"),
            Style::default().fg(Color::White),
        ),
        Span::styled("  |  ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Shown: {}", app.shown),
            Style::default().fg(Color::White),
        ),
    ]);

    let status_bar = Paragraph::new(status_line).block(
        Block::default()
            .title(" Overview ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(status_bar, area);
}

fn render_actions(frame: &mut Frame, app: &App, area: Rect) {
    let visible_rows = usize::from(area.height.saturating_sub(2));
    let skip = app.last_actions.len().saturating_sub(visible_rows);
    let lines: Vec<Line> = app
        .last_actions
        .iter()
        .skip(skip)
        .map(|action| Line::from(action.as_str()))
        .collect();

    let actions = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Events ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });

    frame.render_widget(actions, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    push_key(&mut spans, "Quit", "q", Color::Red);
    spans.push(sep());
    push_key(&mut spans, "Info", "i", Color::LightBlue);
    spans.push(sep());
    push_key(&mut spans, "Success", "s", Color::LightGreen);
    spans.push(sep());
    push_key(&mut spans, "Warn", "w", Color::Yellow);
    spans.push(sep());
    push_key(&mut spans, "Error", "e", Color::LightRed);
    spans.push(sep());
    push_key(&mut spans, "Pause", "space", Color::Magenta);
    spans.push(sep());
    push_key(&mut spans, "Hide", "x", Color::Cyan);
    spans.push(sep());
    push_key(&mut spans, "Position", "p", Color::Blue);
    spans.push(sep());
    push_key(&mut spans, "Remount", "m", Color::Gray);

    let controls = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .title(" Controls ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });

    frame.render_widget(controls, area);
}

fn push_key(spans: &mut Vec<Span<'static>>, label: &str, value: &'static str, color: Color) {
    spans.push(Span::styled(format!("{label} "), Style::default().fg(color)));
    spans.push(Span::styled("[", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(
        value,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled("]", Style::default().fg(Color::DarkGray)));
}

fn sep() -> Span<'static> {
    Span::styled(" · ", Style::default().fg(Color::DarkGray))
}
