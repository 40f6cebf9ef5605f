//! Button input task
//!
//! Polls the three front keys and sends debounced press edges to the
//! controller. The keys are active low with board pull-ups.

use defmt::*;
use embassy_time::{Duration, Ticker};
use esp_hal::gpio::Input;

use hestia_core::ui::Button;

use crate::channels::BUTTON_CHANNEL;

/// Poll interval for the key pins, in milliseconds
const POLL_INTERVAL_MS: u64 = 10;

/// How many polls a level must hold before a transition is accepted (50 ms)
const DEBOUNCE_POLLS: u8 = 5;

struct Key {
    pin: Input<'static>,
    button: Button,
    pressed: bool,
    last_raw: bool,
    stable_polls: u8,
}

impl Key {
    fn new(pin: Input<'static>, button: Button) -> Self {
        Self {
            pin,
            button,
            pressed: false,
            last_raw: false,
            stable_polls: 0,
        }
    }

    /// Advance the debounce state; returns the button on a clean press edge
    fn poll(&mut self) -> Option<Button> {
        let raw = self.pin.is_low();
        if raw != self.last_raw {
            self.last_raw = raw;
            self.stable_polls = 0;
            return None;
        }
        if self.stable_polls < DEBOUNCE_POLLS {
            self.stable_polls += 1;
            if self.stable_polls == DEBOUNCE_POLLS && raw != self.pressed {
                self.pressed = raw;
                if raw {
                    return Some(self.button);
                }
            }
        }
        None
    }
}

/// Button task - debounces the key pins and forwards press events
#[embassy_executor::task]
pub async fn buttons_task(up: Input<'static>, select: Input<'static>, down: Input<'static>) {
    info!("Buttons task started");

    let mut keys = [
        Key::new(up, Button::Up),
        Key::new(select, Button::Select),
        Key::new(down, Button::Down),
    ];

    let mut ticker = Ticker::every(Duration::from_millis(POLL_INTERVAL_MS));

    loop {
        ticker.next().await;

        for key in &mut keys {
            if let Some(button) = key.poll() {
                debug!("Button pressed: {:?}", button);
                if BUTTON_CHANNEL.try_send(button).is_err() {
                    warn!("buttons: channel full, dropping press");
                }
            }
        }
    }
}
