//! Payload alphabets for the status and control topics

/// Door sensor identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Door {
    Fridge,
    Freezer,
}

/// Reported state of a door sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DoorState {
    Open,
    Closed,
}

impl DoorState {
    /// Parse a status payload.
    ///
    /// Whitespace is trimmed and case is ignored. Anything that is not
    /// `OPEN` reads as `Closed`, so a garbled payload can never raise a
    /// phantom alert.
    pub fn parse(payload: &str) -> Self {
        if payload.trim().eq_ignore_ascii_case("OPEN") {
            DoorState::Open
        } else {
            DoorState::Closed
        }
    }

    /// Wire form, as the sensors publish it
    pub fn as_str(self) -> &'static str {
        match self {
            DoorState::Open => "OPEN",
            DoorState::Closed => "CLOSED",
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, DoorState::Open)
    }
}

/// Commanded switch position on a device control topic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    pub fn from_active(active: bool) -> Self {
        if active {
            SwitchState::On
        } else {
            SwitchState::Off
        }
    }

    /// Wire form of the command payload
    pub fn as_str(self) -> &'static str {
        match self {
            SwitchState::On => "ON",
            SwitchState::Off => "OFF",
        }
    }
}
