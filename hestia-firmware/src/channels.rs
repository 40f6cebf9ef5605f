//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use heapless::String;

use hestia_core::ui::{Button, LinkState, MAX_PAYLOAD_LEN};
use hestia_protocol::MAX_TOPIC_LEN;

/// Channel capacity for button press events
const BUTTON_CHANNEL_SIZE: usize = 8;

/// Channel capacity for events coming out of the network task
const NET_CHANNEL_SIZE: usize = 8;

/// Channel capacity for outbound publishes
const PUBLISH_CHANNEL_SIZE: usize = 8;

/// Longest status payload copied out of an inbound publish
pub const MAX_STATUS_LEN: usize = 32;

/// Events from the network task to the controller, in arrival order
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NetEvent {
    /// Connectivity transition
    Link(LinkState),
    /// Inbound publish on a subscribed topic
    Message {
        topic: String<MAX_TOPIC_LEN>,
        payload: String<MAX_STATUS_LEN>,
    },
}

/// An outbound publish requested by the controller
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PublishRequest {
    pub topic: String<MAX_TOPIC_LEN>,
    pub payload: String<MAX_PAYLOAD_LEN>,
}

/// Debounced button presses from the key pins
pub static BUTTON_CHANNEL: Channel<CriticalSectionRawMutex, Button, BUTTON_CHANNEL_SIZE> =
    Channel::new();

/// Link transitions and inbound publishes from the network task
pub static NET_CHANNEL: Channel<CriticalSectionRawMutex, NetEvent, NET_CHANNEL_SIZE> =
    Channel::new();

/// Outbound publishes from the controller to the broker session
pub static PUBLISH_CHANNEL: Channel<CriticalSectionRawMutex, PublishRequest, PUBLISH_CHANNEL_SIZE> =
    Channel::new();
