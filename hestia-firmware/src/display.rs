//! ILI9342C panel adapter
//!
//! Implements the core `DisplaySurface` trait on top of mipidsi for the
//! Core2's 320x240 TFT. Text scales map onto the embedded-graphics mono
//! fonts; sleep and wake issue the panel's sleep-in/sleep-out commands.

use embassy_time::Delay;

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::gpio::Output;
use esp_hal::spi::master::Spi;
use esp_hal::Blocking;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9342CRgb565;
use mipidsi::{Display, NoResetPin};

use hestia_core::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use hestia_core::traits::{Color, DisplayError, DisplaySurface};

pub type PanelSpiDevice =
    ExclusiveDevice<Spi<'static, Blocking>, Output<'static>, esp_hal::delay::Delay>;
pub type PanelInterface = SpiInterface<'static, PanelSpiDevice, Output<'static>>;
pub type Panel = Display<PanelInterface, ILI9342CRgb565, NoResetPin>;

/// The Core2 panel as seen by the renderer
pub struct Core2Display {
    panel: Panel,
    delay: Delay,
}

impl Core2Display {
    pub fn new(panel: Panel) -> Self {
        Self {
            panel,
            delay: Delay,
        }
    }
}

impl DisplaySurface for Core2Display {
    fn clear(&mut self, color: Color) -> Result<(), DisplayError> {
        self.panel.clear(rgb(color)).map_err(|_| DisplayError::Bus)
    }

    fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        scale: u8,
        color: Color,
    ) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(font_for_scale(scale), rgb(color));
        Text::with_baseline(text, Point::new(x as i32, y as i32), style, Baseline::Top)
            .draw(&mut self.panel)
            .map(|_| ())
            .map_err(|_| DisplayError::Bus)
    }

    fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        height: u16,
        color: Color,
    ) -> Result<(), DisplayError> {
        Rectangle::new(
            Point::new(x as i32, y as i32),
            Size::new(width as u32, height as u32),
        )
        .into_styled(PrimitiveStyle::with_fill(rgb(color)))
        .draw(&mut self.panel)
        .map_err(|_| DisplayError::Bus)
    }

    fn sleep(&mut self) -> Result<(), DisplayError> {
        self.panel
            .sleep(&mut self.delay)
            .map_err(|_| DisplayError::Bus)
    }

    fn wake(&mut self) -> Result<(), DisplayError> {
        self.panel
            .wake(&mut self.delay)
            .map_err(|_| DisplayError::Bus)
    }

    fn dimensions(&self) -> (u16, u16) {
        (SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

/// Text scales map onto the built-in mono fonts. The panel is large
/// enough that the 10x20 face covers both the menu and the alert.
fn font_for_scale(scale: u8) -> &'static MonoFont<'static> {
    if scale >= 2 {
        &FONT_10X20
    } else {
        &FONT_6X10
    }
}

fn rgb(color: Color) -> Rgb565 {
    match color {
        Color::Black => Rgb565::BLACK,
        Color::White => Rgb565::WHITE,
        Color::Yellow => Rgb565::YELLOW,
        Color::Red => Rgb565::RED,
        // ILI9342C dark grey, 0x7BEF
        Color::DarkGray => Rgb565::new(15, 31, 15),
    }
}
