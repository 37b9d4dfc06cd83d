//! Interaction helpers for panning, zooming and keyboard commands.
//!
//! These helpers are used by render backends to implement consistent
//! interaction semantics across platforms.

use crate::geom::{RealPoint, ScreenPoint};
use crate::transform::Transform;

pub use crate::scene::ZoomDirection;

/// Pointer state tracked between events.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Last known pointer position.
    pub position: Option<ScreenPoint>,
    /// Primary button held.
    pub dragging: bool,
}

impl PointerState {
    /// Record a new pointer position, returning the previous one.
    pub fn move_to(&mut self, position: ScreenPoint) -> Option<ScreenPoint> {
        self.position.replace(position)
    }
}

/// Commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Restore camera and scale.
    ResetView,
    /// Switch between light and dark.
    ToggleTheme,
    /// Zoom in by the button step.
    ZoomIn,
    /// Zoom out by the button step.
    ZoomOut,
}

impl KeyCommand {
    /// Map a key name to a command. Only `r` and `t` are bound.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "r" => Some(Self::ResetView),
            "t" => Some(Self::ToggleTheme),
            _ => None,
        }
    }
}

/// Camera position after dragging the pointer from `from` to `to`.
///
/// The real-space displacement is subtracted so the content under the
/// pointer follows it.
pub fn pan_camera(camera: RealPoint, from: ScreenPoint, to: ScreenPoint, transform: &Transform) -> RealPoint {
    let previous = transform.to_real(from);
    let current = transform.to_real(to);
    RealPoint::new(
        camera.x - (current.x - previous.x),
        camera.y - (current.y - previous.y),
    )
}

/// Zoom direction for a wheel delta: negative zooms in, positive zooms out.
pub fn wheel_zoom_direction(delta_y: f64) -> Option<ZoomDirection> {
    if delta_y < 0.0 {
        Some(ZoomDirection::In)
    } else if delta_y > 0.0 {
        Some(ZoomDirection::Out)
    } else {
        None
    }
}
