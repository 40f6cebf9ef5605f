//! Controller task
//!
//! Owns the UI state machine and the panel. Button presses, broker
//! deliveries, link transitions, and timer ticks funnel into the
//! controller one at a time; the actions it returns are carried out in
//! order: publishes queue for the network task, everything else drives
//! the panel.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_time::Instant;

use hestia_core::config::DEVICES;
use hestia_core::render::render;
use hestia_core::traits::{Color, DisplaySurface};
use hestia_core::ui::{Action, Actions, Controller};
use hestia_protocol::{device_control_topic, SCENES_CONTROL_TOPIC};

use crate::channels::{NetEvent, PublishRequest, BUTTON_CHANNEL, NET_CHANNEL, PUBLISH_CHANNEL};
use crate::display::Core2Display;
use crate::tasks::tick::TICK_SIGNAL;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(mut display: Core2Display) {
    info!("Controller task started");

    let mut controller = Controller::new();

    // First paint shows the Wi-Fi progress screen while the network task
    // brings the link up.
    redraw(&controller, &mut display);

    loop {
        let actions = match select3(
            BUTTON_CHANNEL.receive(),
            NET_CHANNEL.receive(),
            async { TICK_SIGNAL.wait().await },
        )
        .await
        {
            Either3::First(button) => controller.handle_button(button, now_ms()),
            Either3::Second(NetEvent::Link(link)) => {
                info!("Link state: {:?}", link);
                controller.handle_link(link, now_ms())
            }
            Either3::Second(NetEvent::Message { topic, payload }) => {
                info!("Message arrived [{}] {}", topic.as_str(), payload.as_str());
                controller.handle_message(topic.as_str(), payload.as_str(), now_ms())
            }
            Either3::Third(tick_ms) => controller.tick(tick_ms),
        };

        run_actions(&actions, &controller, &mut display).await;
    }
}

async fn run_actions(actions: &Actions, controller: &Controller, display: &mut Core2Display) {
    let publish_count = actions
        .iter()
        .filter(|action| matches!(action, Action::Publish { .. }))
        .count();

    for action in actions {
        match action {
            Action::Publish { topic, payload } => {
                log_publish(topic.as_str(), payload.as_str(), publish_count);
                let request = PublishRequest {
                    topic: topic.clone(),
                    payload: payload.clone(),
                };
                if PUBLISH_CHANNEL.try_send(request).is_err() {
                    warn!("controller: publish queue full, dropping {}", topic.as_str());
                }
            }
            Action::Render => redraw(controller, display),
            Action::Blank => {
                if display.clear(Color::Black).is_err() {
                    warn!("display: clear failed");
                }
            }
            Action::Sleep => {
                info!("Screen timeout, turning off display");
                if display.sleep().is_err() {
                    warn!("display: sleep failed");
                }
            }
            Action::Wake => {
                info!("Waking display");
                if display.wake().is_err() {
                    warn!("display: wake failed");
                }
            }
        }
    }
}

fn redraw(controller: &Controller, display: &mut Core2Display) {
    if render(controller.model(), now_ms(), display).is_err() {
        warn!("display: redraw failed");
    }
}

/// Per-publish diagnostics. Power-off-all is the only multi-publish batch,
/// so the batch size tells the sweep apart from a single toggle.
fn log_publish(topic: &str, payload: &str, batch: usize) {
    if topic == SCENES_CONTROL_TOPIC {
        info!("Applying scene: {}", payload);
        return;
    }
    let name = DEVICES
        .iter()
        .find(|device| device_control_topic(device.slug).as_str() == topic)
        .map(|device| device.name)
        .unwrap_or("?");
    if batch > 1 {
        info!("Turning off device: {}", name);
    } else {
        info!("Toggling device: {} State: {}", name, payload);
    }
}

fn now_ms() -> u64 {
    Instant::now().as_millis()
}
