//! Pointer state shared between input sources and the force model.
//!
//! Two sources can move the pointer: the manual one (mouse/touch, fed from
//! window events) and an external hand tracker. Each logical field has a
//! single writer at any moment — while the tracker is active, manual writes
//! are suppressed entirely, so the force model never sees a mix of the two.
//!
//! The simulation reads the state exactly once per tick and tolerates it
//! being one frame stale; there is no locking anywhere in this path.

use glam::Vec2;
use winit::event::WindowEvent;

/// What kind of device produced the pointer position.
///
/// A tracked hand is noisier than a real pointer, so the force model gives
/// it a wider repulsion radius and more push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerKind {
    /// Direct pointing device: mouse, stylus, touch.
    #[default]
    Precise,

    /// Externally detected hand position.
    Tracked,
}

/// Snapshot of the pointer for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    /// Position in viewport pixel coordinates.
    pub position: Vec2,
    /// Whether any source is currently supplying a position.
    pub active: bool,
    /// Which source supplied it.
    pub kind: PointerKind,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            active: false,
            kind: PointerKind::Precise,
        }
    }
}

/// Owner of the pointer state, arbitrating between input sources.
#[derive(Debug, Default)]
pub struct Pointer {
    state: PointerState,
    tracker_active: bool,
}

impl Pointer {
    /// Create an inactive pointer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a manual (mouse/touch) position.
    ///
    /// Ignored while the tracker is active; the tracker owns the pointer
    /// until it reports lost.
    pub fn set_manual(&mut self, position: Vec2) {
        if self.tracker_active {
            return;
        }
        self.state = PointerState {
            position,
            active: true,
            kind: PointerKind::Precise,
        };
    }

    /// Deactivate the manual source (cursor left the surface).
    pub fn clear_manual(&mut self) {
        if self.tracker_active {
            return;
        }
        self.state.active = false;
    }

    /// Report a tracker detection, or `None` when tracking is lost.
    ///
    /// A detection takes the pointer over; loss hands it back to the manual
    /// source, which stays inactive until its next event.
    pub fn set_tracked(&mut self, detection: Option<Vec2>) {
        match detection {
            Some(position) => {
                self.tracker_active = true;
                self.state = PointerState {
                    position,
                    active: true,
                    kind: PointerKind::Tracked,
                };
            }
            None => {
                if self.tracker_active {
                    self.tracker_active = false;
                    self.state.active = false;
                }
            }
        }
    }

    /// The current snapshot. Read once per tick by the force model.
    #[inline]
    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Feed a window event into the manual source.
    ///
    /// Only cursor motion and cursor-left events are relevant; everything
    /// else passes through untouched.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.set_manual(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::CursorLeft { .. } => {
                self.clear_manual();
            }
            _ => {}
        }
    }
}
