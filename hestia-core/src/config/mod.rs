//! Static configuration
//!
//! Device and scene tables, screen geometry, and timing constants. All of
//! it is known at build time; nothing is parsed or persisted.

pub mod screen;
pub mod timing;
pub mod types;

pub use screen::*;
pub use timing::*;
pub use types::*;
