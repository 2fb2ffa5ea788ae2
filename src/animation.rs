//! Entry/exit animations for the toast overlay.
//!
//! A toast is either gone, entering, shown or exiting. Entering and exiting
//! are timed by the configured in/out timings; the renderer turns the current
//! phase into a [`Transform`] (cell offset, scale, dimming) of the resting
//! toast rectangle.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use ratatui::layout::Rect;
use serde::Deserialize;
use tokio::time::Instant;

use crate::error::ConfigError;

/// Paired entry/exit animation presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum AnimationStyle {
    #[default]
    UpInUpOut,
    RightInOut,
    ZoomInOut,
}

impl AnimationStyle {
    /// The `(animation_in, animation_out)` pair this preset stands for.
    pub fn pair(self) -> (AnimationKind, AnimationKind) {
        match self {
            AnimationStyle::UpInUpOut => (AnimationKind::SlideInDown, AnimationKind::SlideOutUp),
            AnimationStyle::RightInOut => {
                (AnimationKind::SlideInRight, AnimationKind::SlideOutRight)
            }
            AnimationStyle::ZoomInOut => (AnimationKind::ZoomInDown, AnimationKind::ZoomOutUp),
        }
    }
}

impl FromStr for AnimationStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "upinupout" => Ok(AnimationStyle::UpInUpOut),
            "rightinout" => Ok(AnimationStyle::RightInOut),
            "zoominout" => Ok(AnimationStyle::ZoomInOut),
            _ => Err(ConfigError::UnknownAnimationStyle(s.to_string())),
        }
    }
}

impl TryFrom<String> for AnimationStyle {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A single entry or exit animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum AnimationKind {
    SlideInDown,
    SlideInUp,
    SlideInLeft,
    SlideInRight,
    SlideOutUp,
    SlideOutDown,
    SlideOutLeft,
    SlideOutRight,
    ZoomIn,
    ZoomInDown,
    ZoomOut,
    ZoomOutUp,
    FadeIn,
    FadeOut,
}

impl AnimationKind {
    const ALL: [AnimationKind; 14] = [
        AnimationKind::SlideInDown,
        AnimationKind::SlideInUp,
        AnimationKind::SlideInLeft,
        AnimationKind::SlideInRight,
        AnimationKind::SlideOutUp,
        AnimationKind::SlideOutDown,
        AnimationKind::SlideOutLeft,
        AnimationKind::SlideOutRight,
        AnimationKind::ZoomIn,
        AnimationKind::ZoomInDown,
        AnimationKind::ZoomOut,
        AnimationKind::ZoomOutUp,
        AnimationKind::FadeIn,
        AnimationKind::FadeOut,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AnimationKind::SlideInDown => "slideInDown",
            AnimationKind::SlideInUp => "slideInUp",
            AnimationKind::SlideInLeft => "slideInLeft",
            AnimationKind::SlideInRight => "slideInRight",
            AnimationKind::SlideOutUp => "slideOutUp",
            AnimationKind::SlideOutDown => "slideOutDown",
            AnimationKind::SlideOutLeft => "slideOutLeft",
            AnimationKind::SlideOutRight => "slideOutRight",
            AnimationKind::ZoomIn => "zoomIn",
            AnimationKind::ZoomInDown => "zoomInDown",
            AnimationKind::ZoomOut => "zoomOut",
            AnimationKind::ZoomOutUp => "zoomOutUp",
            AnimationKind::FadeIn => "fadeIn",
            AnimationKind::FadeOut => "fadeOut",
        }
    }

    /// Where the toast sits when it is `hidden` (0.0 = at rest, 1.0 = fully
    /// off) relative to its resting rectangle `rest` inside `screen`.
    pub fn transform(self, hidden: f64, rest: Rect, screen: Rect) -> Transform {
        let hidden = hidden.clamp(0.0, 1.0);
        let travel = |distance: u16| (f64::from(distance) * hidden).round() as i32;

        let above = rest.bottom().saturating_sub(screen.y);
        let below = screen.bottom().saturating_sub(rest.y);
        let left = rest.right().saturating_sub(screen.x);
        let right = screen.right().saturating_sub(rest.x);

        match self {
            AnimationKind::SlideInDown | AnimationKind::SlideOutUp => Transform {
                dy: -travel(above),
                ..Transform::IDENTITY
            },
            AnimationKind::SlideInUp | AnimationKind::SlideOutDown => Transform {
                dy: travel(below),
                ..Transform::IDENTITY
            },
            AnimationKind::SlideInLeft | AnimationKind::SlideOutLeft => Transform {
                dx: -travel(left),
                ..Transform::IDENTITY
            },
            AnimationKind::SlideInRight | AnimationKind::SlideOutRight => Transform {
                dx: travel(right),
                ..Transform::IDENTITY
            },
            AnimationKind::ZoomIn | AnimationKind::ZoomOut => Transform {
                scale: 1.0 - hidden,
                ..Transform::IDENTITY
            },
            AnimationKind::ZoomInDown | AnimationKind::ZoomOutUp => Transform {
                dy: -travel(rest.height),
                scale: 1.0 - hidden,
                ..Transform::IDENTITY
            },
            AnimationKind::FadeIn | AnimationKind::FadeOut => Transform {
                dim: hidden > 0.3,
                ..Transform::IDENTITY
            },
        }
    }
}

impl fmt::Display for AnimationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AnimationKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        AnimationKind::ALL
            .into_iter()
            .find(|kind| normalize(kind.name()) == wanted)
            .ok_or_else(|| ConfigError::UnknownAnimation(s.to_string()))
    }
}

impl TryFrom<String> for AnimationKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Accepts both `slideInDown` and `slide_in_down` spellings.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Offset/scale applied to the resting toast rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub dx: i32,
    pub dy: i32,
    pub scale: f64,
    pub dim: bool,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        dx: 0,
        dy: 0,
        scale: 1.0,
        dim: false,
    };
}

/// Where the overlay is in its show/hide lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Gone,
    Entering(f64),
    Shown,
    Exiting(f64),
}

impl Phase {
    /// Picks the running animation and how far off-screen it currently is.
    pub fn animation(
        self,
        animation_in: AnimationKind,
        animation_out: AnimationKind,
    ) -> Option<(AnimationKind, f64)> {
        match self {
            Phase::Gone => None,
            Phase::Shown => Some((animation_in, 0.0)),
            Phase::Entering(progress) => Some((animation_in, 1.0 - ease_out(progress))),
            Phase::Exiting(progress) => Some((animation_out, ease_in(progress))),
        }
    }
}

fn ease_out(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

fn ease_in(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

/// Timestamps of the last show/hide transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct Presence {
    visible: bool,
    since: Option<Instant>,
}

impl Presence {
    /// Starts the entry animation. Already visible overlays keep their phase.
    /// An overlay caught mid-exit enters from where it is instead of from
    /// fully off screen.
    pub fn enter(&mut self, now: Instant, in_timing: Duration, out_timing: Duration) {
        if self.visible {
            return;
        }
        let since = match self.phase(now, in_timing, out_timing) {
            // Entry at `1 - p` is as far off screen as exit at `p`.
            Phase::Exiting(p) => now
                .checked_sub(in_timing.mul_f64(1.0 - p))
                .unwrap_or(now),
            _ => now,
        };
        self.visible = true;
        self.since = Some(since);
    }

    pub fn exit(&mut self, now: Instant) {
        if self.visible {
            self.visible = false;
            self.since = Some(now);
        }
    }

    /// Drops any running exit animation.
    pub fn reset(&mut self) {
        self.visible = false;
        self.since = None;
    }

    pub fn phase(&self, now: Instant, in_timing: Duration, out_timing: Duration) -> Phase {
        let Some(since) = self.since else {
            return Phase::Gone;
        };
        let elapsed = now.saturating_duration_since(since);

        match (self.visible, progress(elapsed, in_timing), progress(elapsed, out_timing)) {
            (true, Some(p), _) => Phase::Entering(p),
            (true, None, _) => Phase::Shown,
            (false, _, Some(p)) => Phase::Exiting(p),
            (false, _, None) => Phase::Gone,
        }
    }

    /// Backdrop intensity in `0.0..=1.0`, fading with the backdrop timings.
    pub fn backdrop_level(&self, now: Instant, in_timing: Duration, out_timing: Duration) -> f64 {
        let Some(since) = self.since else {
            return 0.0;
        };
        let elapsed = now.saturating_duration_since(since);

        if self.visible {
            progress(elapsed, in_timing).unwrap_or(1.0)
        } else {
            progress(elapsed, out_timing).map_or(0.0, |p| 1.0 - p)
        }
    }
}

/// `Some(fraction)` while `elapsed` is still inside `timing`.
fn progress(elapsed: Duration, timing: Duration) -> Option<f64> {
    if elapsed >= timing {
        None
    } else {
        Some(elapsed.as_secs_f64() / timing.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 80,
        height: 24,
    };

    const REST: Rect = Rect {
        x: 20,
        y: 2,
        width: 40,
        height: 4,
    };

    #[test]
    fn animation_style_accepts_both_spellings() {
        assert_eq!(
            "upInUpOut".parse::<AnimationStyle>().unwrap(),
            AnimationStyle::UpInUpOut
        );
        assert_eq!(
            "zoom_in_out".parse::<AnimationStyle>().unwrap(),
            AnimationStyle::ZoomInOut
        );
    }

    #[test]
    fn unknown_animation_style_is_rejected() {
        let err = "bounceInOut".parse::<AnimationStyle>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownAnimationStyle(s) if s == "bounceInOut"));
    }

    #[test]
    fn presets_pair_the_expected_animations() {
        assert_eq!(
            AnimationStyle::UpInUpOut.pair(),
            (AnimationKind::SlideInDown, AnimationKind::SlideOutUp)
        );
        assert_eq!(
            AnimationStyle::RightInOut.pair(),
            (AnimationKind::SlideInRight, AnimationKind::SlideOutRight)
        );
        assert_eq!(
            AnimationStyle::ZoomInOut.pair(),
            (AnimationKind::ZoomInDown, AnimationKind::ZoomOutUp)
        );
    }

    #[test]
    fn slide_in_down_starts_fully_above_the_screen() {
        let t = AnimationKind::SlideInDown.transform(1.0, REST, SCREEN);
        assert_eq!(t.dy, -i32::from(REST.bottom()));
        assert_eq!(t.dx, 0);

        let rest = AnimationKind::SlideInDown.transform(0.0, REST, SCREEN);
        assert_eq!(rest, Transform::IDENTITY);
    }

    #[test]
    fn slide_out_right_leaves_past_the_right_edge() {
        let t = AnimationKind::SlideOutRight.transform(1.0, REST, SCREEN);
        assert_eq!(t.dx, i32::from(SCREEN.right() - REST.x));
    }

    #[test]
    fn zoom_scales_down_while_hidden() {
        let t = AnimationKind::ZoomOut.transform(0.5, REST, SCREEN);
        assert!((t.scale - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn presence_walks_through_all_phases() {
        let timing = Duration::from_millis(300);
        let start = Instant::now();
        let mut presence = Presence::default();
        assert_eq!(presence.phase(start, timing, timing), Phase::Gone);

        presence.enter(start, timing, timing);
        match presence.phase(start + Duration::from_millis(150), timing, timing) {
            Phase::Entering(p) => assert!((p - 0.5).abs() < 1e-9),
            other => panic!("expected entering, got {other:?}"),
        }
        assert_eq!(presence.phase(start + timing, timing, timing), Phase::Shown);

        let hide_at = start + Duration::from_secs(1);
        presence.exit(hide_at);
        assert!(matches!(
            presence.phase(hide_at + Duration::from_millis(100), timing, timing),
            Phase::Exiting(_)
        ));
        assert_eq!(presence.phase(hide_at + timing, timing, timing), Phase::Gone);
    }

    #[test]
    fn reentering_a_visible_overlay_keeps_it_shown() {
        let timing = Duration::from_millis(300);
        let start = Instant::now();
        let mut presence = Presence::default();
        presence.enter(start, timing, timing);

        let later = start + Duration::from_secs(2);
        presence.enter(later, timing, timing);
        assert_eq!(presence.phase(later, timing, timing), Phase::Shown);
    }

    #[test]
    fn reentering_mid_exit_resumes_from_the_same_offset() {
        let timing = Duration::from_millis(300);
        let start = Instant::now();
        let mut presence = Presence::default();
        presence.enter(start, timing, timing);

        let hide_at = start + Duration::from_secs(1);
        presence.exit(hide_at);
        let show_at = hide_at + Duration::from_millis(60);
        let exit_hidden = match presence.phase(show_at, timing, timing) {
            Phase::Exiting(p) => {
                assert!((p - 0.2).abs() < 1e-9);
                Phase::Exiting(p)
                    .animation(AnimationKind::SlideInDown, AnimationKind::SlideOutUp)
                    .map(|(_, hidden)| hidden)
            }
            other => panic!("expected exiting, got {other:?}"),
        };

        presence.enter(show_at, timing, timing);
        let phase = presence.phase(show_at, timing, timing);
        match phase {
            Phase::Entering(p) => assert!((p - 0.8).abs() < 1e-6),
            other => panic!("expected entering, got {other:?}"),
        }
        let enter_hidden = phase
            .animation(AnimationKind::SlideInDown, AnimationKind::SlideOutUp)
            .map(|(_, hidden)| hidden);
        let (exit_hidden, enter_hidden) = (exit_hidden.unwrap(), enter_hidden.unwrap());
        assert!((exit_hidden - enter_hidden).abs() < 1e-6);
        assert_eq!(
            presence.phase(show_at + Duration::from_millis(61), timing, timing),
            Phase::Shown
        );
    }

    #[test]
    fn backdrop_fades_out_after_exit() {
        let timing = Duration::from_millis(200);
        let start = Instant::now();
        let mut presence = Presence::default();
        presence.enter(start, timing, timing);
        assert!((presence.backdrop_level(start + timing, timing, timing) - 1.0).abs() < 1e-9);

        let hide_at = start + Duration::from_secs(1);
        presence.exit(hide_at);
        let halfway = presence.backdrop_level(hide_at + Duration::from_millis(100), timing, timing);
        assert!((halfway - 0.5).abs() < 1e-9);
        assert_eq!(presence.backdrop_level(hide_at + timing, timing, timing), 0.0);
    }
}
