//! The toast state machine.
//!
//! A [`ToastController`] owns one toast slot: what is shown, how it is styled
//! and when it goes away. The dismiss timer is a tokio task sleeping until the
//! [`Countdown`] deadline. Every cancellation bumps a generation number that the
//! task re-checks under the state lock, so a superseded timer can never hide a
//! newer toast.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

use crate::animation::{Phase, Presence};
use crate::config::{Position, ToastConfig, ToastDuration};
use crate::countdown::Countdown;
use crate::gesture::Gesture;
use crate::severity::{Severity, ToastStyle};

/// Why a toast went away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideReason {
    Timeout,
    Closed,
    Swiped,
    Manual,
}

/// State transitions published to [`ToastController::subscribe`] receivers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastEvent {
    Shown { message: String, severity: Severity },
    Paused,
    Resumed,
    Hidden(HideReason),
}

/// Read-only copy of the controller state, taken at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastView {
    pub visible: bool,
    pub message: String,
    pub style: ToastStyle,
    pub position: Option<Position>,
    /// Progress bar fill in `0.0..=1.0`.
    pub fraction: f64,
    pub paused: bool,
    pub phase: Phase,
    pub backdrop_level: f64,
}

#[derive(Debug)]
struct ToastState {
    mounted: bool,
    visible: bool,
    message: String,
    style: ToastStyle,
    position: Option<Position>,
    countdown: Countdown,
    presence: Presence,
    generation: u64,
    timer: Option<JoinHandle<()>>,
    subscribers: Vec<UnboundedSender<ToastEvent>>,
}

impl ToastState {
    fn new() -> Self {
        Self {
            mounted: true,
            visible: false,
            message: String::new(),
            style: ToastStyle::default(),
            position: None,
            countdown: Countdown::persistent(),
            presence: Presence::default(),
            generation: 0,
            timer: None,
            subscribers: Vec::new(),
        }
    }

    fn cancel_timer(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }

    fn hide(&mut self, reason: HideReason, now: Instant) -> bool {
        if !self.visible {
            return false;
        }
        self.cancel_timer();
        self.countdown.pause(now);
        self.visible = false;
        self.presence.exit(now);
        self.publish(ToastEvent::Hidden(reason));
        true
    }

    fn publish(&mut self, event: ToastEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to one toast slot. Clones share the same state.
#[derive(Debug, Clone)]
pub struct ToastController {
    id: u64,
    config: Arc<ToastConfig>,
    runtime: Option<Handle>,
    state: Arc<Mutex<ToastState>>,
}

impl ToastController {
    /// Creates a hidden controller. Dismiss timers run on the tokio runtime
    /// current at this call, or else on the one current when a toast is shown.
    pub fn new(config: ToastConfig) -> Self {
        let runtime = Handle::try_current().ok();
        if runtime.is_none() {
            debug!("toast controller created outside a tokio runtime");
        }
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            config: Arc::new(config),
            runtime,
            state: Arc::new(Mutex::new(ToastState::new())),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn config(&self) -> &ToastConfig {
        &self.config
    }

    /// Whether both handles point at the same controller.
    pub fn same(&self, other: &ToastController) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }

    /// Receives every transition from now on. Dropped on unmount.
    pub fn subscribe(&self) -> UnboundedReceiver<ToastEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().subscribers.push(tx);
        rx
    }

    /// Shows `message`, replacing whatever is on screen and restarting the
    /// countdown. `position` overrides the configured one for this toast only.
    pub fn show(&self, message: impl Into<String>, severity: Severity, position: Option<Position>) {
        let now = Instant::now();
        let mut state = self.lock();
        if !state.mounted {
            trace!(controller = self.id, "show on unmounted controller ignored");
            return;
        }

        state.cancel_timer();
        state.visible = true;
        state.message = message.into();
        state.style = severity.style();
        state.position = position.or(self.config.position);
        state.presence.enter(
            now,
            self.config.animation_in_timing(),
            self.config.animation_out_timing(),
        );
        state.countdown = match self.config.duration {
            ToastDuration::Persist => Countdown::persistent(),
            ToastDuration::After(duration) => Countdown::start(duration, now),
        };
        self.arm_timer(&mut state);

        debug!(
            controller = self.id,
            %severity,
            position = ?state.position,
            "toast shown"
        );
        let message = state.message.clone();
        state.publish(ToastEvent::Shown { message, severity });
    }

    /// Stops the countdown and the bar where they are.
    pub fn pause(&self) {
        let now = Instant::now();
        let mut state = self.lock();
        if state.visible && state.countdown.is_expired(now) {
            // The timer task lost the race; time is up all the same.
            if state.hide(HideReason::Timeout, now) {
                debug!(controller = self.id, "toast timed out before pause");
            }
            return;
        }
        if !state.visible || !state.countdown.pause(now) {
            trace!(controller = self.id, "pause ignored");
            return;
        }
        state.cancel_timer();
        debug!(
            controller = self.id,
            remaining_ms = state.countdown.remaining(now).as_millis() as u64,
            "toast paused"
        );
        state.publish(ToastEvent::Paused);
    }

    /// Continues a paused countdown from where it stopped.
    pub fn resume(&self) {
        let now = Instant::now();
        let mut state = self.lock();
        if !state.visible || !state.countdown.resume(now) {
            trace!(controller = self.id, "resume ignored");
            return;
        }
        self.arm_timer(&mut state);
        debug!(controller = self.id, "toast resumed");
        state.publish(ToastEvent::Resumed);
    }

    pub fn hide(&self) {
        self.dismiss(HideReason::Manual);
    }

    /// Hides the toast, recording `reason`. No-op when already hidden.
    pub fn dismiss(&self, reason: HideReason) {
        let now = Instant::now();
        let mut state = self.lock();
        if state.hide(reason, now) {
            debug!(controller = self.id, ?reason, "toast hidden");
        } else {
            trace!(controller = self.id, ?reason, "hide ignored");
        }
    }

    /// Routes a recognized pointer gesture to the matching operation.
    pub fn apply(&self, gesture: Gesture) {
        match gesture {
            Gesture::TouchStart => self.pause(),
            Gesture::TouchEnd => self.resume(),
            Gesture::Swipe(_) => self.dismiss(HideReason::Swiped),
            Gesture::CloseTap => self.dismiss(HideReason::Closed),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.lock().visible
    }

    pub fn is_paused(&self) -> bool {
        let state = self.lock();
        state.visible && state.countdown.is_paused()
    }

    /// Whether a dismiss timer is currently pending.
    pub fn is_timer_armed(&self) -> bool {
        self.lock()
            .timer
            .as_ref()
            .is_some_and(|timer| !timer.is_finished())
    }

    /// Top row of the resting toast for a screen `screen_height` rows tall.
    pub fn resolve_position(&self, screen_height: u16) -> u16 {
        let position = self.lock().position;
        self.config.resolve_position(position, screen_height)
    }

    pub fn view(&self) -> ToastView {
        self.view_at(Instant::now())
    }

    pub fn view_at(&self, now: Instant) -> ToastView {
        let state = self.lock();
        let config = &self.config;
        ToastView {
            visible: state.visible,
            message: state.message.clone(),
            style: state.style,
            position: state.position,
            fraction: state.countdown.fraction(now),
            paused: state.visible && state.countdown.is_paused(),
            phase: state.presence.phase(
                now,
                config.animation_in_timing(),
                config.animation_out_timing(),
            ),
            backdrop_level: state.presence.backdrop_level(
                now,
                config.backdrop_transition_in_timing(),
                config.backdrop_transition_out_timing(),
            ),
        }
    }

    /// Cancels the timer and detaches subscribers. The controller ignores
    /// every later call.
    pub(crate) fn teardown(&self) {
        let mut state = self.lock();
        state.cancel_timer();
        state.mounted = false;
        state.visible = false;
        state.presence.reset();
        state.subscribers.clear();
        debug!(controller = self.id, "toast controller unmounted");
    }

    fn arm_timer(&self, state: &mut ToastState) {
        let Some(deadline) = state.countdown.deadline() else {
            return;
        };
        let Some(runtime) = self
            .runtime
            .clone()
            .or_else(|| Handle::try_current().ok())
        else {
            warn!(controller = self.id, "no tokio runtime; dismiss timer not armed");
            return;
        };

        state.cancel_timer();
        let generation = state.generation;
        let weak = Arc::downgrade(&self.state);
        let id = self.id;
        state.timer = Some(runtime.spawn(async move {
            time::sleep_until(deadline).await;
            expire(&weak, generation, id);
        }));
    }

    fn lock(&self) -> MutexGuard<'_, ToastState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn expire(state: &Weak<Mutex<ToastState>>, generation: u64, id: u64) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
    if state.generation != generation {
        trace!(controller = id, "stale dismiss timer ignored");
        return;
    }
    state.timer = None;
    if state.hide(HideReason::Timeout, Instant::now()) {
        debug!(controller = id, "toast timed out");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn controller(duration_ms: u64) -> ToastController {
        ToastController::new(ToastConfig::default().with_duration(duration_ms.into()))
    }

    #[tokio::test(start_paused = true)]
    async fn show_applies_the_severity_style() {
        let toast = controller(3000);
        for severity in Severity::ALL {
            toast.show("hello", severity, None);
            let view = toast.view();
            assert!(view.visible);
            assert_eq!(view.message, "hello");
            assert_eq!(view.style, severity.style());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn show_accepts_an_empty_message() {
        let toast = controller(3000);
        toast.show("", Severity::Info, None);
        assert!(toast.is_visible());
        assert_eq!(toast.view().message, "");
    }

    #[tokio::test(start_paused = true)]
    async fn toast_hides_when_the_countdown_runs_out() {
        let toast = controller(3000);
        toast.show("bye", Severity::Success, None);
        assert!(toast.is_timer_armed());

        time::sleep(Duration::from_millis(2999)).await;
        assert!(toast.is_visible());
        assert!(toast.view().fraction > 0.0);

        time::sleep(Duration::from_millis(2)).await;
        assert!(!toast.is_visible());
        assert_eq!(toast.view().fraction, 0.0);
        assert!(!toast.is_timer_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn position_override_only_lasts_for_one_toast() {
        let toast = ToastController::new(
            ToastConfig::default().with_position(Some(Position::Top)),
        );
        toast.show("a", Severity::Info, Some(Position::Center));
        assert_eq!(toast.view().position, Some(Position::Center));

        toast.show("b", Severity::Info, None);
        assert_eq!(toast.view().position, Some(Position::Top));
        assert_eq!(toast.resolve_position(40), toast.config().position_value);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_stops_the_timer_and_freezes_the_bar() {
        let toast = controller(4000);
        toast.show("hold", Severity::Warn, None);

        time::sleep(Duration::from_secs(1)).await;
        toast.pause();
        assert!(toast.is_paused());
        assert!(!toast.is_timer_armed());
        let frozen = toast.view().fraction;

        time::sleep(Duration::from_secs(60)).await;
        assert!(toast.is_visible());
        assert_eq!(toast.view().fraction, frozen);

        toast.resume();
        assert!(toast.is_timer_armed());
        time::sleep(Duration::from_millis(2999)).await;
        assert!(toast.is_visible());
        time::sleep(Duration::from_millis(2)).await;
        assert!(!toast.is_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn redundant_calls_are_no_ops() {
        let toast = controller(3000);
        let mut events = toast.subscribe();

        toast.hide();
        toast.pause();
        toast.resume();
        assert!(events.try_recv().is_err());

        toast.show("x", Severity::Info, None);
        toast.resume();
        toast.pause();
        toast.pause();
        toast.hide();
        toast.hide();

        assert!(matches!(events.try_recv(), Ok(ToastEvent::Shown { .. })));
        assert_eq!(events.try_recv(), Ok(ToastEvent::Paused));
        assert_eq!(events.try_recv(), Ok(ToastEvent::Hidden(HideReason::Manual)));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn persistent_toast_keeps_a_full_bar() {
        let toast = controller(0);
        toast.show("sticky", Severity::Error, None);
        assert!(!toast.is_timer_armed());

        time::sleep(Duration::from_secs(3600)).await;
        let view = toast.view();
        assert!(view.visible);
        assert_eq!(view.fraction, 1.0);
        assert!(!view.paused);
    }

    #[tokio::test(start_paused = true)]
    async fn gestures_map_to_operations() {
        let toast = controller(3000);
        let mut events = toast.subscribe();
        toast.show("touch me", Severity::Info, None);

        toast.apply(Gesture::TouchStart);
        assert!(toast.is_paused());
        toast.apply(Gesture::TouchEnd);
        assert!(!toast.is_paused());
        toast.apply(Gesture::CloseTap);
        assert!(!toast.is_visible());

        toast.show("again", Severity::Info, None);
        toast.apply(Gesture::Swipe(crate::gesture::SwipeDirection::Left));
        assert!(!toast.is_visible());

        let reasons: Vec<ToastEvent> = std::iter::from_fn(|| events.try_recv().ok())
            .filter(|event| matches!(event, ToastEvent::Hidden(_)))
            .collect();
        assert_eq!(
            reasons,
            vec![
                ToastEvent::Hidden(HideReason::Closed),
                ToastEvent::Hidden(HideReason::Swiped)
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn exit_phase_runs_after_hide() {
        let toast = controller(3000);
        toast.show("anim", Severity::Info, None);
        assert!(matches!(toast.view().phase, Phase::Entering(_)));

        time::sleep(Duration::from_millis(400)).await;
        assert_eq!(toast.view().phase, Phase::Shown);

        toast.hide();
        assert!(matches!(toast.view().phase, Phase::Exiting(_)));
        time::sleep(Duration::from_millis(400)).await;
        assert_eq!(toast.view().phase, Phase::Gone);
    }

    #[test]
    fn pause_after_the_deadline_hides_the_toast() {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let _guard = runtime.enter();
        let toast = controller(50);
        let mut events = toast.subscribe();

        // The runtime is not driven, so the armed timer cannot fire yet.
        toast.show("late", Severity::Info, None);
        std::thread::sleep(Duration::from_millis(100));
        toast.pause();
        toast.resume();

        assert!(!toast.is_visible());
        assert!(!toast.is_paused());
        assert!(!toast.is_timer_armed());
        assert!(matches!(events.try_recv(), Ok(ToastEvent::Shown { .. })));
        assert_eq!(events.try_recv(), Ok(ToastEvent::Hidden(HideReason::Timeout)));
        assert!(events.try_recv().is_err());

        runtime.block_on(time::sleep(Duration::from_millis(200)));
        assert!(!toast.is_visible());
    }

    #[test]
    fn controller_built_outside_a_runtime_arms_timers_inside_one() {
        let toast = controller(3000);
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();

        runtime.block_on(async {
            toast.show("later", Severity::Success, None);
            assert!(toast.is_timer_armed());
            time::sleep(Duration::from_millis(3001)).await;
            assert!(!toast.is_visible());
        });
    }

    #[test]
    fn controller_without_runtime_still_shows() {
        let toast = ToastController::new(ToastConfig::default());
        toast.show("no runtime", Severity::Info, None);
        assert!(toast.is_visible());
        assert!(!toast.is_timer_armed());
        toast.hide();
        assert!(!toast.is_visible());
    }
}
