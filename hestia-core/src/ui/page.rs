//! Menu pages
//!
//! Each page is a variant whose title and item list are pure functions of
//! the variant, so there is exactly one source of truth for row counts.

use crate::config::{BACK_LABEL, DEVICES, MAIN_MENU_ITEMS, NUM_DEVICES, NUM_SCENES, SCENES};

/// Menu page identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Page {
    #[default]
    Main,
    Devices,
    Scenes,
}

impl Page {
    /// Page heading
    pub fn title(self) -> &'static str {
        match self {
            Page::Main => "Main Menu",
            Page::Devices => "Devices",
            Page::Scenes => "Scenes",
        }
    }

    /// Number of menu rows, including the trailing Back row
    pub fn item_count(self) -> usize {
        match self {
            Page::Main => MAIN_MENU_ITEMS.len(),
            Page::Devices => NUM_DEVICES + 1,
            Page::Scenes => NUM_SCENES + 1,
        }
    }

    /// Label of row `index`
    ///
    /// Callers keep `index` below `item_count`. On the devices and scenes
    /// pages the final row is the Back label.
    pub fn item(self, index: usize) -> &'static str {
        match self {
            Page::Main => MAIN_MENU_ITEMS[index],
            Page::Devices => {
                if index < NUM_DEVICES {
                    DEVICES[index].name
                } else {
                    BACK_LABEL
                }
            }
            Page::Scenes => {
                if index < NUM_SCENES {
                    SCENES[index]
                } else {
                    BACK_LABEL
                }
            }
        }
    }

    /// Returns true if row `index` is the trailing Back row
    pub fn is_back_row(self, index: usize) -> bool {
        match self {
            Page::Main => false,
            Page::Devices => index == NUM_DEVICES,
            Page::Scenes => index == NUM_SCENES,
        }
    }
}
