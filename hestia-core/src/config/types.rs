//! Device and scene tables
//!
//! The fixed inventory this remote commands. Order matters: menu rows and
//! the power-off-all publish sequence both follow declaration order.

/// A controllable appliance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Device {
    /// Display name, as shown in the menu
    pub name: &'static str,
    /// Topic slug under `devices/` on the broker
    pub slug: &'static str,
}

/// Devices in declared order
pub const DEVICES: [Device; 6] = [
    Device {
        name: "Hallway Lights",
        slug: "hallway",
    },
    Device {
        name: "Living Room Tree",
        slug: "living_tree",
    },
    Device {
        name: "Left Lamp",
        slug: "left_lamp",
    },
    Device {
        name: "Right Lamp 1",
        slug: "right_lamp1",
    },
    Device {
        name: "Right Lamp 2",
        slug: "right_lamp2",
    },
    Device {
        name: "Spotlight",
        slug: "spotlight",
    },
];

pub const NUM_DEVICES: usize = DEVICES.len();

/// Scene names, published verbatim to the scenes control topic
pub const SCENES: [&str; 10] = [
    "Bright/Normal",
    "Christmas",
    "Freezer/Fridge",
    "Seahawks",
    "Sounders",
    "Vibes",
    "Warm",
    "Warm Bright",
    "Custom Scene 1",
    "Custom Scene 2",
];

pub const NUM_SCENES: usize = SCENES.len();

/// Fixed rows of the main menu
pub const MAIN_MENU_ITEMS: [&str; 4] = ["Devices", "Scenes", "Power Off All Devices", "Exit"];

/// Trailing row of the devices and scenes pages
pub const BACK_LABEL: &str = "< Back>";
