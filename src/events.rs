//! Cart Events
//!
//! The manager reports every change it makes as a [`CartEvent`]. Presentation
//! (toasts, logs, badges) lives in a [`CartObserver`] so cart logic can be
//! exercised without any notification surface attached.

use std::fmt;

use thiserror::Error;
use tracing::info;

/// Notification level for a user-facing toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Something was added to the cart.
    Success,

    /// Something was removed from the cart.
    Info,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success => f.write_str("success"),
            Notice::Info => f.write_str("info"),
        }
    }
}

/// A change made to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A new line was appended.
    Added {
        /// Line id
        id: String,
        /// Item name
        name: String,
    },

    /// An existing line absorbed an addition with the same id.
    Merged {
        /// Line id
        id: String,
        /// Item name
        name: String,
        /// Quantity after the merge
        quantity: u32,
    },

    /// A line's quantity was set directly.
    QuantityChanged {
        /// Line id
        id: String,
        /// New quantity
        quantity: u32,
    },

    /// A line was removed.
    Removed {
        /// Line id
        id: String,
        /// Item name
        name: String,
    },

    /// Every line was removed.
    Cleared,
}

impl CartEvent {
    /// The toast level for this event, if it should be shown at all.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            CartEvent::Added { .. } | CartEvent::Merged { .. } => Some(Notice::Success),
            CartEvent::Removed { .. } | CartEvent::Cleared => Some(Notice::Info),
            CartEvent::QuantityChanged { .. } => None,
        }
    }

    /// Human-readable message.
    pub fn message(&self) -> String {
        match self {
            CartEvent::Added { name, .. } => format!("Added {name} to cart"),
            CartEvent::Merged { name, .. } => format!("Updated {name} quantity in cart"),
            CartEvent::QuantityChanged { id, quantity } => {
                format!("Set quantity of {id} to {quantity}")
            }
            CartEvent::Removed { name, .. } => format!("Removed {name} from cart"),
            CartEvent::Cleared => "Cart cleared".to_string(),
        }
    }
}

/// Errors an observer may report. The manager logs these and carries on.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The notification surface is not attached.
    #[error("notification channel unavailable")]
    Unavailable,

    /// The notification surface refused the message.
    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// Receives cart events in the order the manager produced them.
pub trait CartObserver {
    /// Called after the change has been applied and persisted.
    ///
    /// # Errors
    ///
    /// Returns a [`NotifyError`] if the event could not be delivered. The cart
    /// change itself is never rolled back.
    fn on_event(&mut self, event: &CartEvent) -> Result<(), NotifyError>;
}

impl<F> CartObserver for F
where
    F: FnMut(&CartEvent),
{
    fn on_event(&mut self, event: &CartEvent) -> Result<(), NotifyError> {
        self(event);

        Ok(())
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl CartObserver for NoopObserver {
    fn on_event(&mut self, _event: &CartEvent) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Observer that keeps every event it receives.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<CartEvent>,
}

impl EventLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far, oldest first.
    pub fn events(&self) -> &[CartEvent] {
        &self.events
    }

    /// Takes the received events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<CartEvent> {
        std::mem::take(&mut self.events)
    }
}

impl CartObserver for EventLog {
    fn on_event(&mut self, event: &CartEvent) -> Result<(), NotifyError> {
        self.events.push(event.clone());

        Ok(())
    }
}

/// Observer that writes toast-worthy events to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CartObserver for TracingObserver {
    fn on_event(&mut self, event: &CartEvent) -> Result<(), NotifyError> {
        if let Some(notice) = event.notice() {
            info!(%notice, message = %event.message(), "cart notification");
        }

        Ok(())
    }
}
