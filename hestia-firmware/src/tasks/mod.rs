//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod buttons;
pub mod controller;
pub mod net;
pub mod tick;

pub use buttons::buttons_task;
pub use controller::controller_task;
pub use net::{net_runner_task, net_task};
pub use tick::tick_task;
