//! Display surface trait for the panel

/// Errors that can occur with the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus or controller communication failure
    Bus,
    /// Requested region falls outside the panel
    OutOfBounds,
}

/// The color set the UI draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Black,
    White,
    Yellow,
    Red,
    DarkGray,
}

/// Trait for the panel the renderer draws on
///
/// Text is positioned by the top-left pixel of its bounding box. `scale`
/// selects the text size: 2 for menu and status text, 3 for the alert
/// message.
pub trait DisplaySurface {
    /// Fill the whole panel with one color
    fn clear(&mut self, color: Color) -> Result<(), DisplayError>;

    /// Draw one line of text with its top-left corner at `(x, y)`
    fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        scale: u8,
        color: Color,
    ) -> Result<(), DisplayError>;

    /// Fill a rectangle
    fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Color,
    ) -> Result<(), DisplayError>;

    /// Put the panel into sleep mode
    fn sleep(&mut self) -> Result<(), DisplayError>;

    /// Wake the panel from sleep mode
    fn wake(&mut self) -> Result<(), DisplayError>;

    /// Panel size in pixels as `(width, height)`
    fn dimensions(&self) -> (u16, u16);
}
