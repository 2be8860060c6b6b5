//! # Input Events
//!
//! Bounded channel from the input/render layer into the session.
//!
//! ```text
//! ┌──────────────┐   InputSender   ┌──────────────┐
//! │ Input layer  │────────────────>│   Session    │
//! │ (any thread) │   InputQueue    │ frame(dt)    │
//! └──────────────┘                 └──────────────┘
//! ```
//!
//! The session drains the queue once per frame and applies events in
//! arrival order.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::warn;

/// Directional movement at the configured move speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heading {
    /// Towards negative Y.
    Up,
    /// Towards positive Y.
    Down,
    /// Towards negative X.
    Left,
    /// Towards positive X.
    Right,
}

impl Heading {
    /// World delta of one step at `speed`.
    #[must_use]
    pub const fn delta(self, speed: i64) -> (i64, i64) {
        match self {
            Self::Up => (0, -speed),
            Self::Down => (0, speed),
            Self::Left => (-speed, 0),
            Self::Right => (speed, 0),
        }
    }
}

/// Events from the input layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    // =========================================================================
    // Navigation
    // =========================================================================
    /// Drag the view by a world delta.
    Pan {
        /// X delta.
        dx: i64,
        /// Y delta.
        dy: i64,
    },
    /// One directional step.
    Move(Heading),
    /// The window changed size.
    Resize {
        /// New width.
        width: i64,
        /// New height.
        height: i64,
    },

    // =========================================================================
    // Pointer
    // =========================================================================
    /// Pointer position in screen coordinates.
    PointerMoved {
        /// Screen X.
        x: i64,
        /// Screen Y.
        y: i64,
    },
    /// Click at the current pointer position.
    Select,

    // =========================================================================
    // Orbit and land views
    // =========================================================================
    /// Orbit speed slider.
    SetSpeed(u8),
    /// Leave the orbit view.
    CloseOrbit,
    /// Show the open planet's surface.
    OpenLand,
    /// Leave the land view.
    CloseLand,
}

/// Bounded input queue. The receiving end belongs to the session.
#[derive(Debug)]
pub struct InputQueue {
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
}

impl InputQueue {
    /// Creates a queue holding at most `capacity` undrained events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        Self { sender, receiver }
    }

    /// Creates a sender handle (clone for multiple producers).
    #[must_use]
    pub fn sender(&self) -> InputSender {
        InputSender {
            sender: self.sender.clone(),
        }
    }

    /// Takes every pending event (non-blocking).
    pub fn drain(&self) -> Vec<InputEvent> {
        self.receiver.try_iter().collect()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}

/// Handle for sending input events.
#[derive(Clone, Debug)]
pub struct InputSender {
    sender: Sender<InputEvent>,
}

impl InputSender {
    /// Sends an event (non-blocking).
    ///
    /// Returns `false` if the queue is full or the session is gone; the
    /// event is dropped.
    #[inline]
    pub fn send(&self, event: InputEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(?event, "input queue full; dropping event");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}
