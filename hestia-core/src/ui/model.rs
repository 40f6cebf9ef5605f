//! Aggregate UI state owned by the controller

use core::fmt;
use core::fmt::Write;

use heapless::String;

use crate::config::{NUM_DEVICES, SCREEN_TIMEOUT_MS};
use crate::doors::DoorMonitor;

use super::cursor::Cursor;
use super::event::LinkState;
use super::page::Page;

/// Longest banner line
pub const MAX_BANNER_LEN: usize = 32;

/// A transient full-screen confirmation message
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Banner {
    pub text: String<MAX_BANNER_LEN>,
    /// Uptime at which the banner stops owning the screen
    pub until_ms: u64,
}

impl Banner {
    /// Banner with formatted text, shown until `until_ms`
    pub fn new(args: fmt::Arguments<'_>, until_ms: u64) -> Self {
        let mut text = String::new();
        let _ = text.write_fmt(args);
        Self { text, until_ms }
    }
}

/// Screen power bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScreenPower {
    pub asleep: bool,
    pub last_activity_ms: u64,
}

impl Default for ScreenPower {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenPower {
    pub fn new() -> Self {
        Self {
            asleep: false,
            last_activity_ms: 0,
        }
    }

    /// Record user activity at `now_ms`
    pub fn touch(&mut self, now_ms: u64) {
        self.last_activity_ms = now_ms;
    }

    /// Returns true once the inactivity window has elapsed
    pub fn timed_out(&self, now_ms: u64) -> bool {
        now_ms.wrapping_sub(self.last_activity_ms) > SCREEN_TIMEOUT_MS
    }
}

/// Everything the renderer needs to draw one frame
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UiModel {
    /// Current page and cursor position
    pub cursor: Cursor,
    /// Door state and the active alert
    pub doors: DoorMonitor,
    /// Last commanded state per device, in table order
    pub device_active: [bool; NUM_DEVICES],
    /// Live confirmation banner, if any
    pub banner: Option<Banner>,
    /// Screen power state
    pub screen: ScreenPower,
    /// Connectivity, as last reported by the network task
    pub link: LinkState,
}

impl Default for UiModel {
    fn default() -> Self {
        Self::new()
    }
}

impl UiModel {
    pub fn new() -> Self {
        Self {
            cursor: Cursor::top_of(Page::Main),
            doors: DoorMonitor::new(),
            device_active: [false; NUM_DEVICES],
            banner: None,
            screen: ScreenPower::new(),
            link: LinkState::WifiConnecting,
        }
    }

    /// Returns true while a confirmation banner owns the screen
    pub fn banner_live(&self, now_ms: u64) -> bool {
        match &self.banner {
            Some(banner) => now_ms < banner.until_ms,
            None => false,
        }
    }
}
