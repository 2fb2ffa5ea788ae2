use std::collections::VecDeque;

use chrono::Local;
use ratatui::crossterm::event::MouseEvent;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

use toastify::{
    GestureRecognizer, HideReason, MountedToast, Position, Severity, ToastConfig, ToastEvent,
    ToastLayout, ToastRegistry,
};

const MAX_ACTIONS: usize = 20;

const INFO_MESSAGES: &[&str] = &[
    "Sync started in the background",
    "3 new messages",
    "Press x to dismiss this toast early",
];
const SUCCESS_MESSAGES: &[&str] = &["Settings saved", "Upload finished", "Connected"];
const WARN_MESSAGES: &[&str] = &[
    "Battery below 15%",
    "Disk almost full, consider cleaning up old builds",
];
const ERROR_MESSAGES: &[&str] = &["Connection refused", "Could not write config file"];

pub struct App {
    pub registry: ToastRegistry,
    pub config: ToastConfig,
    pub toast: MountedToast,
    pub events: UnboundedReceiver<ToastEvent>,
    pub gestures: GestureRecognizer,
    /// Where the toast was drawn last frame, for mouse hit-testing.
    pub layout: Option<ToastLayout>,
    pub last_actions: VecDeque<String>,
    /// Per-toast position override, `None` uses the configured one.
    pub position: Option<Position>,
    pub shown: usize,
    pub mounts: usize,
}

impl App {
    pub fn new(config: ToastConfig) -> Self {
        let registry = ToastRegistry::new();
        let toast = registry.mount(config.clone());
        let events = toast.subscribe();

        let mut app = Self {
            registry,
            config,
            toast,
            events,
            gestures: GestureRecognizer::new(),
            layout: None,
            last_actions: VecDeque::new(),
            position: None,
            shown: 0,
            mounts: 1,
        };
        app.registry.info("Welcome to toastify", None);
        app
    }

    pub fn notify(&mut self, severity: Severity) {
        let messages = match severity {
            Severity::Info => INFO_MESSAGES,
            Severity::Success => SUCCESS_MESSAGES,
            Severity::Warn => WARN_MESSAGES,
            Severity::Error => ERROR_MESSAGES,
        };
        let message = messages[self.shown % messages.len()];
        self.shown += 1;
        self.registry.show(message, severity, self.position);
    }

    pub fn toggle_pause(&mut self) {
        if self.toast.is_paused() {
            self.toast.resume();
        } else {
            self.toast.pause();
        }
    }

    pub fn hide(&mut self) {
        self.registry.hide();
    }

    pub fn cycle_position(&mut self) {
        self.position = match self.position {
            None => Some(Position::Top),
            Some(Position::Top) => Some(Position::Center),
            Some(Position::Center) => Some(Position::Bottom),
            Some(Position::Bottom) => None,
        };
        let label = self
            .position
            .map_or_else(|| "config".to_string(), |position| position.to_string());
        self.push_action(format!("Position override: {label}"));
    }

    /// Replaces the mounted toast with a fresh one. The old toast's pending
    /// timer dies with it.
    pub fn remount(&mut self) {
        self.toast = self.registry.mount(self.config.clone());
        self.events = self.toast.subscribe();
        self.gestures.reset();
        self.layout = None;
        self.mounts += 1;
        info!(mounts = self.mounts, "toast remounted");
        self.push_action(format!("Remounted toast (#{})", self.mounts));
    }

    pub fn on_mouse(&mut self, event: MouseEvent) {
        for gesture in self.gestures.handle(&event, self.layout.as_ref()) {
            self.toast.apply(gesture);
        }
    }

    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            let text = match event {
                ToastEvent::Shown { message, severity } => format!("Shown [{severity}] {message}"),
                ToastEvent::Paused => "Paused".to_string(),
                ToastEvent::Resumed => "Resumed".to_string(),
                ToastEvent::Hidden(reason) => format!("Hidden ({})", describe(reason)),
            };
            self.push_action(text);
        }
    }

    pub fn push_action(&mut self, text: impl Into<String>) {
        let stamp = Local::now().format("%H:%M:%S");
        self.last_actions
            .push_back(format!("{stamp}  {}", text.into()));
        if self.last_actions.len() > MAX_ACTIONS {
            self.last_actions.pop_front();
        }
    }
}

fn describe(reason: HideReason) -> &'static str {
    match reason {
        HideReason::Timeout => "timed out",
        HideReason::Closed => "closed",
        HideReason::Swiped => "swiped away",
        HideReason::Manual => "hidden",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn new_app_greets_and_logs_it() {
        let mut app = App::new(ToastConfig::default());
        assert!(app.toast.is_visible());

        app.drain_events();
        assert_eq!(app.last_actions.len(), 1);
        assert!(app.last_actions[0].ends_with("Shown [info] Welcome to toastify"));
    }

    #[tokio::test(start_paused = true)]
    async fn position_override_applies_to_the_next_toast() {
        let mut app = App::new(ToastConfig::default());
        app.cycle_position();
        app.cycle_position();
        app.notify(Severity::Warn);
        assert_eq!(app.toast.view().position, Some(Position::Center));
    }

    #[tokio::test(start_paused = true)]
    async fn remount_keeps_dispatch_working() {
        let mut app = App::new(ToastConfig::default());
        app.remount();
        assert!(!app.toast.is_visible());

        app.notify(Severity::Success);
        assert!(app.toast.is_visible());
        assert!(app.registry.current().is_some_and(|c| c.same(app.toast.controller())));
    }
}
