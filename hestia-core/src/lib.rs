//! Board-agnostic core logic for the household remote firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Device, scene, and menu tables
//! - Menu state machine (pages, cursor, selection dispatch)
//! - Door alert monitoring logic
//! - Screen power bookkeeping and the inactivity timeout
//! - Stateless view renderer
//! - Display surface trait

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod doors;
pub mod render;
pub mod traits;
pub mod ui;
