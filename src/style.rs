//! Light/dark themes and the animated transition between them.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::color::Color;

// Gray levels at either end of the transition.
const DARK_LEVEL: f32 = 25.0;
const LIGHT_LEVEL: f32 = 255.0;

/// Which theme is active or being moved towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Dark background, light foreground.
    #[default]
    Dark,
    /// Light background, dark foreground.
    Light,
}

impl ThemeMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Colors the renderer paints with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Background fill.
    pub background: Color,
    /// Axes, gridline label outlines.
    pub foreground: Color,
}

impl Theme {
    /// The dark theme.
    pub fn dark() -> Self {
        Self::at_progress(ThemeMode::Dark, 1.0)
    }

    /// The light theme.
    pub fn light() -> Self {
        Self::at_progress(ThemeMode::Light, 1.0)
    }

    /// Theme part-way into a transition towards `target`.
    ///
    /// The moving gray level is `25 + 230 * p`, where `p` runs from 0 to 1
    /// towards light and from 1 to 0 towards dark.
    pub fn at_progress(target: ThemeMode, progress: f32) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        let towards_light = match target {
            ThemeMode::Light => progress,
            ThemeMode::Dark => 1.0 - progress,
        };
        let background = DARK_LEVEL + (LIGHT_LEVEL - DARK_LEVEL) * towards_light;
        let foreground = LIGHT_LEVEL - (LIGHT_LEVEL - DARK_LEVEL) * towards_light;
        Self {
            background: Color::gray(background),
            foreground: Color::gray(foreground),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// An in-flight transition towards a theme mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeTransition {
    /// Mode being moved towards.
    pub target: ThemeMode,
    /// When the transition started.
    pub started: Instant,
    /// Total length of the transition.
    pub duration: Duration,
}

impl ThemeTransition {
    /// Fraction of the transition elapsed at `now`, clamped to 0..=1.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Check whether the transition is complete at `now`.
    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

/// Current theme mode plus any transition in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeState {
    mode: ThemeMode,
    transition: Option<ThemeTransition>,
    duration: Duration,
}

impl ThemeState {
    /// Start in `mode` with transitions lasting `duration`.
    pub fn new(mode: ThemeMode, duration: Duration) -> Self {
        Self {
            mode,
            transition: None,
            duration,
        }
    }

    /// Target mode (the mode reached once any transition finishes).
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Access the transition in progress, if any.
    pub fn transition(&self) -> Option<&ThemeTransition> {
        self.transition.as_ref()
    }

    /// Flip the mode and start a transition, overwriting any in flight.
    pub fn toggle(&mut self, now: Instant) {
        self.mode = self.mode.toggled();
        debug!(mode = ?self.mode, "toggle theme");
        self.transition = Some(ThemeTransition {
            target: self.mode,
            started: now,
            duration: self.duration,
        });
    }

    /// Advance the ticker. Returns true while another frame is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.transition {
            Some(transition) if transition.is_finished(now) => {
                self.transition = None;
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Colors to paint with at `now`.
    pub fn theme(&self, now: Instant) -> Theme {
        match self.transition {
            Some(transition) => Theme::at_progress(transition.target, transition.progress(now)),
            None => Theme::at_progress(self.mode, 1.0),
        }
    }
}
