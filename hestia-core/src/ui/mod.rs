//! Menu state machine
//!
//! Pages, cursor, and the controller that owns the whole UI model.

pub mod controller;
pub mod cursor;
pub mod event;
pub mod model;
pub mod page;

pub use controller::{Action, Actions, Controller, MAX_PAYLOAD_LEN};
pub use cursor::Cursor;
pub use event::{Button, LinkState};
pub use model::{Banner, ScreenPower, UiModel};
pub use page::Page;
