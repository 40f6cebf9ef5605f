//! UI controller
//!
//! Single owner of the UI model. Button presses, broker deliveries, link
//! transitions, and timer ticks funnel through here one at a time; each
//! handler mutates the model and returns the side effects the firmware
//! must carry out, in order.

use heapless::{String, Vec};

use hestia_protocol::{
    device_control_topic, door_for_topic, DoorState, SwitchState, MAX_TOPIC_LEN,
    SCENES_CONTROL_TOPIC,
};

use crate::config::{
    DEVICES, POWER_OFF_BANNER_MS, SCENE_BANNER_MS, SCENES, TOGGLE_BANNER_MS,
};

use super::cursor::Cursor;
use super::event::{Button, LinkState};
use super::model::{Banner, UiModel};
use super::page::Page;

/// Longest publish payload (scene names)
pub const MAX_PAYLOAD_LEN: usize = 16;

/// Most side effects a single event can produce: power-off-all publishes
/// one OFF per device and then renders.
pub const MAX_ACTIONS: usize = 8;

/// Side effects requested by an event handler, executed in order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Publish a payload to the broker, fire-and-forget
    Publish {
        topic: String<MAX_TOPIC_LEN>,
        payload: String<MAX_PAYLOAD_LEN>,
    },
    /// Redraw from the current model
    Render,
    /// Clear the panel to black without redrawing
    Blank,
    /// Put the panel to sleep
    Sleep,
    /// Wake the panel
    Wake,
}

/// Ordered effects from one event
pub type Actions = Vec<Action, MAX_ACTIONS>;

/// Event-driven UI controller
pub struct Controller {
    model: UiModel,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Self {
            model: UiModel::new(),
        }
    }

    /// Read access for the renderer
    pub fn model(&self) -> &UiModel {
        &self.model
    }

    /// Handle a button press edge
    pub fn handle_button(&mut self, button: Button, now_ms: u64) -> Actions {
        let mut actions = Actions::new();

        // The offline screens take no input
        if !self.model.link.is_up() {
            return actions;
        }
        // A confirmation banner owns the screen; presses are swallowed
        if self.model.banner_live(now_ms) {
            return actions;
        }

        self.model.screen.touch(now_ms);

        // A press that wakes the screen or dismisses an alert is consumed
        // by that effect and never navigates.
        if self.model.screen.asleep {
            self.model.screen.asleep = false;
            let _ = actions.push(Action::Wake);
            let _ = actions.push(Action::Render);
            return actions;
        }
        if self.model.doors.is_alert_active() {
            self.model.doors.clear_alert();
            let _ = actions.push(Action::Render);
            return actions;
        }

        if button.is_select() {
            self.handle_select(now_ms, &mut actions);
        } else {
            self.model.cursor.step(button.nav_delta());
            let _ = actions.push(Action::Render);
        }
        actions
    }

    /// Handle a broker delivery
    pub fn handle_message(&mut self, topic: &str, payload: &str, _now_ms: u64) -> Actions {
        let mut actions = Actions::new();

        let Some(door) = door_for_topic(topic) else {
            return actions;
        };
        self.model.doors.update(door, DoorState::parse(payload));

        // An alert must be seen; bring the panel back if it sleeps
        if self.model.doors.is_alert_active() && self.model.screen.asleep {
            self.model.screen.asleep = false;
            let _ = actions.push(Action::Wake);
        }

        let _ = actions.push(Action::Render);
        actions
    }

    /// Handle a connectivity transition from the network task
    pub fn handle_link(&mut self, link: LinkState, now_ms: u64) -> Actions {
        let mut actions = Actions::new();

        let came_up = link.is_up() && !self.model.link.is_up();
        self.model.link = link;

        if came_up {
            // Restart the idle window now that the UI is interactive
            self.model.screen.touch(now_ms);
        } else if !link.is_up() && self.model.screen.asleep {
            // Keep the retry diagnostics visible
            self.model.screen.asleep = false;
            let _ = actions.push(Action::Wake);
        }

        let _ = actions.push(Action::Render);
        actions
    }

    /// Timer tick. Drives banner expiry and the inactivity timeout.
    pub fn tick(&mut self, now_ms: u64) -> Actions {
        let mut actions = Actions::new();

        if let Some(banner) = &self.model.banner {
            if now_ms >= banner.until_ms {
                self.model.banner = None;
                let _ = actions.push(Action::Render);
            }
        }

        if self.model.link.is_up()
            && !self.model.screen.asleep
            && !self.model.doors.is_alert_active()
            && self.model.screen.timed_out(now_ms)
        {
            self.model.screen.asleep = true;
            let _ = actions.push(Action::Sleep);
        }

        actions
    }

    fn handle_select(&mut self, now_ms: u64, actions: &mut Actions) {
        match self.model.cursor.page {
            Page::Main => match self.model.cursor.selected {
                // Devices
                0 => {
                    self.model.cursor = Cursor::top_of(Page::Devices);
                    let _ = actions.push(Action::Render);
                }
                // Scenes
                1 => {
                    self.model.cursor = Cursor::top_of(Page::Scenes);
                    let _ = actions.push(Action::Render);
                }
                // Power Off All Devices
                2 => {
                    self.model.cursor = Cursor::top_of(Page::Main);
                    self.power_off_all(now_ms, actions);
                }
                // Exit
                _ => {
                    self.model.cursor = Cursor::top_of(Page::Main);
                    let _ = actions.push(Action::Blank);
                }
            },
            Page::Devices => {
                let index = self.model.cursor.selected;
                if self.model.cursor.page.is_back_row(index) {
                    self.model.cursor = Cursor::top_of(Page::Main);
                    let _ = actions.push(Action::Render);
                } else {
                    self.model.cursor = Cursor::top_of(Page::Devices);
                    self.toggle_device(index, now_ms, actions);
                }
            }
            Page::Scenes => {
                let index = self.model.cursor.selected;
                if self.model.cursor.page.is_back_row(index) {
                    self.model.cursor = Cursor::top_of(Page::Main);
                    let _ = actions.push(Action::Render);
                } else {
                    self.model.cursor = Cursor::top_of(Page::Scenes);
                    self.apply_scene(index, now_ms, actions);
                }
            }
        }
    }

    fn toggle_device(&mut self, index: usize, now_ms: u64, actions: &mut Actions) {
        let device = &DEVICES[index];
        self.model.device_active[index] = !self.model.device_active[index];
        let state = SwitchState::from_active(self.model.device_active[index]);

        let _ = actions.push(Action::Publish {
            topic: device_control_topic(device.slug),
            payload: copy_str(state.as_str()),
        });

        self.model.banner = Some(Banner::new(
            format_args!("{} {}", device.name, state.as_str()),
            now_ms + TOGGLE_BANNER_MS,
        ));
        let _ = actions.push(Action::Render);
    }

    fn apply_scene(&mut self, index: usize, now_ms: u64, actions: &mut Actions) {
        let name = SCENES[index];

        let _ = actions.push(Action::Publish {
            topic: copy_str(SCENES_CONTROL_TOPIC),
            payload: copy_str(name),
        });

        self.model.banner = Some(Banner::new(
            format_args!("Scene: {}", name),
            now_ms + SCENE_BANNER_MS,
        ));
        let _ = actions.push(Action::Render);
    }

    fn power_off_all(&mut self, now_ms: u64, actions: &mut Actions) {
        for (index, device) in DEVICES.iter().enumerate() {
            self.model.device_active[index] = false;
            let _ = actions.push(Action::Publish {
                topic: device_control_topic(device.slug),
                payload: copy_str(SwitchState::Off.as_str()),
            });
        }

        self.model.banner = Some(Banner::new(
            format_args!("All Devices Off"),
            now_ms + POWER_OFF_BANNER_MS,
        ));
        let _ = actions.push(Action::Render);
    }
}

fn copy_str<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    let _ = out.push_str(s);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hestia_protocol::{FREEZER_STATUS_TOPIC, FRIDGE_STATUS_TOPIC};

    /// Controller with the link already up, as after a normal boot
    fn make_controller() -> Controller {
        let mut controller = Controller::new();
        let _ = controller.handle_link(LinkState::Up, 0);
        controller
    }

    fn publishes(actions: &Actions) -> Vec<(&str, &str), MAX_ACTIONS> {
        let mut out = Vec::new();
        for action in actions {
            if let Action::Publish { topic, payload } = action {
                let _ = out.push((topic.as_str(), payload.as_str()));
            }
        }
        out
    }

    fn has_render(actions: &Actions) -> bool {
        actions.iter().any(|a| matches!(a, Action::Render))
    }

    #[test]
    fn test_select_enters_devices_then_toggles_first() {
        let mut controller = make_controller();

        let actions = controller.handle_button(Button::Select, 10);
        assert_eq!(controller.model().cursor.page, Page::Devices);
        assert_eq!(controller.model().cursor.selected, 0);
        assert!(publishes(&actions).is_empty());

        let actions = controller.handle_button(Button::Select, 20);
        assert_eq!(
            publishes(&actions)[..],
            [("home/m5stack/core2/devices/hallway/control", "ON")]
        );
        assert!(controller.model().device_active[0]);
        assert_eq!(controller.model().cursor.selected, 0);

        let banner = controller.model().banner.as_ref().unwrap();
        assert_eq!(banner.text.as_str(), "Hallway Lights ON");
        assert_eq!(banner.until_ms, 20 + TOGGLE_BANNER_MS);
    }

    #[test]
    fn test_toggle_back_off() {
        let mut controller = make_controller();
        controller.handle_button(Button::Select, 10);
        controller.handle_button(Button::Select, 20);

        // Let the first banner lapse, then toggle the same device again
        controller.tick(2_000);
        let actions = controller.handle_button(Button::Select, 2_010);
        assert_eq!(
            publishes(&actions)[..],
            [("home/m5stack/core2/devices/hallway/control", "OFF")]
        );
        assert!(!controller.model().device_active[0]);
        assert_eq!(
            controller.model().banner.as_ref().unwrap().text.as_str(),
            "Hallway Lights OFF"
        );
    }

    #[test]
    fn test_power_off_all_publishes_in_order() {
        let mut controller = make_controller();

        controller.handle_button(Button::Down, 10);
        controller.handle_button(Button::Down, 20);
        let actions = controller.handle_button(Button::Select, 30);

        let published = publishes(&actions);
        assert_eq!(published.len(), 6);
        assert_eq!(
            published[0],
            ("home/m5stack/core2/devices/hallway/control", "OFF")
        );
        assert_eq!(
            published[5],
            ("home/m5stack/core2/devices/spotlight/control", "OFF")
        );
        assert!(controller.model().device_active.iter().all(|a| !a));
        assert_eq!(
            controller.model().banner.as_ref().unwrap().text.as_str(),
            "All Devices Off"
        );
        assert_eq!(controller.model().cursor.page, Page::Main);
        assert_eq!(controller.model().cursor.selected, 0);
    }

    #[test]
    fn test_apply_scene_publishes_name() {
        let mut controller = make_controller();

        controller.handle_button(Button::Down, 10);
        controller.handle_button(Button::Select, 20);
        assert_eq!(controller.model().cursor.page, Page::Scenes);

        controller.handle_button(Button::Down, 30);
        let actions = controller.handle_button(Button::Select, 40);
        assert_eq!(
            publishes(&actions)[..],
            [("home/m5stack/core2/scenes/control", "Christmas")]
        );
        assert_eq!(
            controller.model().banner.as_ref().unwrap().text.as_str(),
            "Scene: Christmas"
        );
        assert_eq!(controller.model().cursor.page, Page::Scenes);
        assert_eq!(controller.model().cursor.selected, 0);
    }

    #[test]
    fn test_back_returns_to_main_top() {
        let mut controller = make_controller();
        controller.handle_button(Button::Select, 10);

        // Up wraps straight to the Back row
        controller.handle_button(Button::Up, 20);
        assert_eq!(controller.model().cursor.selected, 6);

        let actions = controller.handle_button(Button::Select, 30);
        assert_eq!(controller.model().cursor.page, Page::Main);
        assert_eq!(controller.model().cursor.selected, 0);
        assert_eq!(controller.model().cursor.scroll, 0);
        assert!(publishes(&actions).is_empty());
        assert!(has_render(&actions));
    }

    #[test]
    fn test_scenes_back_row_after_full_walk() {
        let mut controller = make_controller();
        controller.handle_button(Button::Down, 10);
        controller.handle_button(Button::Select, 20);

        for i in 0..10 {
            controller.handle_button(Button::Down, 30 + i);
        }
        assert_eq!(controller.model().cursor.selected, 10);
        assert_eq!(controller.model().cursor.scroll, 6);

        controller.handle_button(Button::Select, 50);
        assert_eq!(controller.model().cursor.page, Page::Main);
        assert_eq!(controller.model().cursor.selected, 0);
        assert_eq!(controller.model().cursor.scroll, 0);
    }

    #[test]
    fn test_exit_blanks_screen() {
        let mut controller = make_controller();
        controller.handle_button(Button::Up, 10);
        assert_eq!(controller.model().cursor.selected, 3);

        let actions = controller.handle_button(Button::Select, 20);
        assert_eq!(actions[..], [Action::Blank]);
        assert_eq!(controller.model().cursor.page, Page::Main);
        assert_eq!(controller.model().cursor.selected, 0);
    }

    #[test]
    fn test_button_updates_last_activity() {
        let mut controller = make_controller();
        controller.handle_button(Button::Down, 777);
        assert_eq!(controller.model().screen.last_activity_ms, 777);
    }

    #[test]
    fn test_alert_raises_and_button_only_clears() {
        let mut controller = make_controller();
        controller.handle_button(Button::Down, 10);

        let actions = controller.handle_message(FRIDGE_STATUS_TOPIC, "open", 20);
        assert!(has_render(&actions));
        assert!(controller.model().doors.is_alert_active());

        // The press clears the alert and does nothing else
        let actions = controller.handle_button(Button::Down, 30);
        assert!(!controller.model().doors.is_alert_active());
        assert_eq!(controller.model().cursor.selected, 1);
        assert_eq!(actions[..], [Action::Render]);

        // Sensor flag survives the dismissal for the status bar
        assert_eq!(
            controller.model().doors.fridge_state(),
            DoorState::Open
        );
    }

    #[test]
    fn test_alert_clears_only_when_no_door_open() {
        let mut controller = make_controller();
        controller.handle_message(FRIDGE_STATUS_TOPIC, "OPEN", 10);
        controller.handle_message(FREEZER_STATUS_TOPIC, "OPEN", 20);

        controller.handle_message(FRIDGE_STATUS_TOPIC, "CLOSED", 30);
        assert_eq!(
            controller.model().doors.alert_message(),
            Some("Freezer Door Open!")
        );

        controller.handle_message(FREEZER_STATUS_TOPIC, "CLOSED", 40);
        assert!(!controller.model().doors.is_alert_active());
    }

    #[test]
    fn test_trailing_space_payload() {
        let mut controller = make_controller();
        controller.handle_message(FREEZER_STATUS_TOPIC, "OPEN", 10);
        assert!(controller.model().doors.is_alert_active());

        controller.handle_message(FREEZER_STATUS_TOPIC, "closed ", 20);
        assert!(!controller.model().doors.is_alert_active());
        assert_eq!(
            controller.model().doors.freezer_state(),
            DoorState::Closed
        );
    }

    #[test]
    fn test_unrelated_topic_ignored() {
        let mut controller = make_controller();
        let actions = controller.handle_message("home/m5stack/core2/scenes/control", "OPEN", 10);
        assert!(actions.is_empty());
        assert!(!controller.model().doors.is_alert_active());
    }

    #[test]
    fn test_sleep_after_timeout_and_wake_press_consumed() {
        let mut controller = make_controller();
        controller.handle_button(Button::Down, 0);
        assert_eq!(controller.model().cursor.selected, 1);

        // Not yet: the window is strictly greater-than
        let actions = controller.tick(30_000);
        assert!(actions.is_empty());

        let actions = controller.tick(30_001);
        assert_eq!(actions[..], [Action::Sleep]);
        assert!(controller.model().screen.asleep);

        // The waking press is consumed without navigating
        let actions = controller.handle_button(Button::Down, 30_100);
        assert_eq!(actions[..], [Action::Wake, Action::Render]);
        assert!(!controller.model().screen.asleep);
        assert_eq!(controller.model().cursor.selected, 1);
        assert_eq!(controller.model().screen.last_activity_ms, 30_100);
    }

    #[test]
    fn test_no_sleep_while_alert_active() {
        let mut controller = make_controller();
        controller.handle_message(FRIDGE_STATUS_TOPIC, "OPEN", 10);

        let actions = controller.tick(60_000);
        assert!(actions.is_empty());
        assert!(!controller.model().screen.asleep);
    }

    #[test]
    fn test_alert_wakes_sleeping_screen() {
        let mut controller = make_controller();
        controller.tick(30_001);
        assert!(controller.model().screen.asleep);

        let actions = controller.handle_message(FRIDGE_STATUS_TOPIC, "OPEN", 31_000);
        assert_eq!(actions[..], [Action::Wake, Action::Render]);
        assert!(!controller.model().screen.asleep);
    }

    #[test]
    fn test_banner_swallows_presses_until_expiry() {
        let mut controller = make_controller();
        controller.handle_button(Button::Select, 10);
        controller.handle_button(Button::Select, 20); // banner until 1020

        let actions = controller.handle_button(Button::Down, 500);
        assert!(actions.is_empty());
        assert_eq!(controller.model().cursor.selected, 0);
        assert_eq!(controller.model().screen.last_activity_ms, 20);

        // Expiry renders the menu again, then input works
        let actions = controller.tick(1_020);
        assert_eq!(actions[..], [Action::Render]);
        assert!(controller.model().banner.is_none());

        controller.handle_button(Button::Down, 1_030);
        assert_eq!(controller.model().cursor.selected, 1);
    }

    #[test]
    fn test_message_during_banner_updates_state() {
        let mut controller = make_controller();
        controller.handle_button(Button::Select, 10);
        controller.handle_button(Button::Select, 20);

        controller.handle_message(FRIDGE_STATUS_TOPIC, "OPEN", 500);
        assert!(controller.model().doors.is_alert_active());
        assert!(controller.model().banner_live(500));
    }

    #[test]
    fn test_offline_drops_buttons() {
        let mut controller = Controller::new();
        let actions = controller.handle_button(Button::Down, 10);
        assert!(actions.is_empty());
        assert_eq!(controller.model().cursor.selected, 0);

        controller.handle_link(LinkState::BrokerRetry(5), 20);
        let actions = controller.handle_button(Button::Select, 30);
        assert!(actions.is_empty());
    }

    #[test]
    fn test_no_sleep_while_offline() {
        let mut controller = Controller::new();
        let actions = controller.tick(60_000);
        assert!(actions.is_empty());
        assert!(!controller.model().screen.asleep);
    }

    #[test]
    fn test_link_up_restarts_idle_window() {
        let mut controller = Controller::new();
        let actions = controller.handle_link(LinkState::Up, 45_000);
        assert!(has_render(&actions));

        // Idle is measured from the moment the link came up
        assert!(controller.tick(46_000).is_empty());
        let actions = controller.tick(75_001);
        assert_eq!(actions[..], [Action::Sleep]);
    }

    #[test]
    fn test_link_drop_wakes_screen_for_diagnostics() {
        let mut controller = make_controller();
        controller.tick(30_001);
        assert!(controller.model().screen.asleep);

        let actions = controller.handle_link(LinkState::BrokerConnecting, 31_000);
        assert_eq!(actions[..], [Action::Wake, Action::Render]);
        assert!(!controller.model().screen.asleep);
    }

    #[test]
    fn test_device_state_tracks_last_publish() {
        let mut controller = make_controller();
        controller.handle_button(Button::Select, 0);

        let mut now = 0u64;
        for index in 0..3 {
            // Walk to the row, toggle, wait out the banner
            for _ in 0..index {
                now += 10;
                controller.handle_button(Button::Down, now);
            }
            now += 10;
            let actions = controller.handle_button(Button::Select, now);
            let published = publishes(&actions);
            assert_eq!(published.len(), 1);
            assert_eq!(published[0].1, "ON");
            assert!(controller.model().device_active[index]);
            now += TOGGLE_BANNER_MS;
            controller.tick(now);
        }
    }
}
