//! Door monitor implementation
//!
//! Tracks the fridge and freezer door sensors and decides which alert,
//! if any, is on screen.

use hestia_protocol::{Door, DoorState};

/// Alert text for an open fridge
pub const FRIDGE_ALERT: &str = "Fridge Door Open!";

/// Alert text for an open freezer
pub const FREEZER_ALERT: &str = "Freezer Door Open!";

/// Door monitor for alert decisions
///
/// The most recent open report owns the alert. A close report releases the
/// alert only once no door remains open; if the other door is still open
/// the alert re-points at it, so the message on screen never names a
/// closed door.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DoorMonitor {
    fridge_open: bool,
    freezer_open: bool,
    /// Door currently named by the on-screen alert
    alert: Option<Door>,
}

impl Default for DoorMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl DoorMonitor {
    /// Create a new monitor with both doors assumed closed
    pub fn new() -> Self {
        Self {
            fridge_open: false,
            freezer_open: false,
            alert: None,
        }
    }

    /// Apply a sensor report
    ///
    /// Open reports raise (or re-point) the alert. Close reports only ever
    /// lower it; a close can never create an alert, even when the other
    /// door is still open but its alert was dismissed earlier.
    pub fn update(&mut self, door: Door, state: DoorState) {
        match door {
            Door::Fridge => self.fridge_open = state.is_open(),
            Door::Freezer => self.freezer_open = state.is_open(),
        }

        if state.is_open() {
            self.alert = Some(door);
        } else if self.alert == Some(door) {
            self.alert = if self.fridge_open {
                Some(Door::Fridge)
            } else if self.freezer_open {
                Some(Door::Freezer)
            } else {
                None
            };
        }
    }

    /// Dismiss the alert without touching the sensor flags (user button)
    pub fn clear_alert(&mut self) {
        self.alert = None;
    }

    /// Returns true while an alert is on screen
    pub fn is_alert_active(&self) -> bool {
        self.alert.is_some()
    }

    /// Message for the on-screen alert, if one is active
    pub fn alert_message(&self) -> Option<&'static str> {
        self.alert.map(|door| match door {
            Door::Fridge => FRIDGE_ALERT,
            Door::Freezer => FREEZER_ALERT,
        })
    }

    /// Returns true if any door is reported open
    pub fn any_open(&self) -> bool {
        self.fridge_open || self.freezer_open
    }

    /// Fridge state as last reported
    pub fn fridge_state(&self) -> DoorState {
        if self.fridge_open {
            DoorState::Open
        } else {
            DoorState::Closed
        }
    }

    /// Freezer state as last reported
    pub fn freezer_state(&self) -> DoorState {
        if self.freezer_open {
            DoorState::Open
        } else {
            DoorState::Closed
        }
    }
}
