//! Stateless view rendering

pub mod view;

pub use view::render;
