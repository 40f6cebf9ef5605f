//! Broker Vocabulary for the Hestia Remote
//!
//! This crate defines the MQTT topic layout and payload formats shared between
//! the remote and the rest of the household automation. It is deliberately
//! small: string constants, one topic builder, and the two payload alphabets.
//!
//! # Topic layout
//!
//! ```text
//! home/m5stack/core2
//! ├── fridge_door/status       OPEN | CLOSED   (inbound, retained by sensor)
//! ├── freezer_door/status      OPEN | CLOSED   (inbound, retained by sensor)
//! ├── devices/<slug>/control   ON | OFF        (outbound)
//! └── scenes/control           scene name      (outbound, verbatim)
//! ```
//!
//! The remote is a commander, not an authority: it publishes ON/OFF and scene
//! names and renders whatever door state the sensors report. Broker-side
//! automation owns the real device state.

#![no_std]
#![deny(unsafe_code)]

pub mod payload;
pub mod topics;

pub use payload::{Door, DoorState, SwitchState};
pub use topics::{
    device_control_topic, door_for_topic, FREEZER_STATUS_TOPIC, FRIDGE_STATUS_TOPIC,
    MAX_TOPIC_LEN, SCENES_CONTROL_TOPIC, TOPIC_ROOT,
};
