//! Input events for the controller

/// The three front buttons, delivered as press edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Move the selection up (left zone)
    Up,
    /// Activate the selected row (middle zone)
    Select,
    /// Move the selection down (right zone)
    Down,
}

impl Button {
    /// Selection movement for this button, in rows
    pub fn nav_delta(self) -> i8 {
        match self {
            Button::Up => -1,
            Button::Select => 0,
            Button::Down => 1,
        }
    }

    /// Returns true if this button activates the selected row
    pub fn is_select(self) -> bool {
        matches!(self, Button::Select)
    }
}

/// Connectivity as reported by the network task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    /// Associating with the wireless network
    WifiConnecting,
    /// Wireless is up, broker session being established
    BrokerConnecting,
    /// Last broker attempt failed with this reason code, retrying shortly
    BrokerRetry(u8),
    /// Broker session live with subscriptions in place
    Up,
}

impl LinkState {
    /// Returns true once the broker session is usable
    pub fn is_up(self) -> bool {
        matches!(self, LinkState::Up)
    }
}
