//! Screen geometry
//!
//! Layout constants for the 320x240 panel. The menu band sits between the
//! title area at the top and the status bar at the bottom.

pub const SCREEN_WIDTH: u16 = 320;
pub const SCREEN_HEIGHT: u16 = 240;

/// Vertical pitch of one menu row, in pixels
pub const LINE_HEIGHT: u16 = 30;

/// Y offset of the first menu row, below the title
pub const MENU_TOP_OFFSET: u16 = 40;

/// Height of the status bar band at the bottom of the panel
pub const STATUS_BAR_HEIGHT: u16 = 40;

/// Menu rows that fit between the title band and the status bar
pub const VISIBLE_ROWS: usize =
    ((SCREEN_HEIGHT - MENU_TOP_OFFSET - STATUS_BAR_HEIGHT) / LINE_HEIGHT) as usize;

/// Text size for titles, menu rows, banners, and the status bar
pub const TEXT_SCALE: u8 = 2;

/// Text size for the door alert
pub const ALERT_TEXT_SCALE: u8 = 3;
