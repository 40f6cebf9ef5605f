//! Screen rendering
//!
//! Builds frames for the different UI states.
//!
//! The panel is a 320x240 TFT. Every screen is scaled text on black; the
//! selected menu row is marked with a yellow "> " prefix and the bottom
//! band carries the door status bar.

use core::fmt;

use heapless::String;

use crate::config::{
    ALERT_TEXT_SCALE, LINE_HEIGHT, MENU_TOP_OFFSET, SCREEN_HEIGHT, SCREEN_WIDTH,
    STATUS_BAR_HEIGHT, TEXT_SCALE, VISIBLE_ROWS,
};
use crate::traits::{Color, DisplayError, DisplaySurface};
use crate::ui::{LinkState, UiModel};

/// Left margin for titles, alerts, and status text
const MARGIN: u16 = 10;

/// Menu rows are indented one extra cursor column
const ITEM_INDENT: u16 = 20;

/// Repaint one full frame from the model.
///
/// A live banner owns the whole frame; an offline link shows the connect
/// progress screen; otherwise the current menu page is drawn with either
/// the door alert or the status bar below it.
pub fn render<D: DisplaySurface>(
    model: &UiModel,
    now_ms: u64,
    surface: &mut D,
) -> Result<(), DisplayError> {
    surface.clear(Color::Black)?;

    if let Some(banner) = &model.banner {
        if now_ms < banner.until_ms {
            return render_banner(banner.text.as_str(), surface);
        }
    }

    if !model.link.is_up() {
        return render_connecting(model.link, surface);
    }

    render_menu(model, surface)?;

    if let Some(message) = model.doors.alert_message() {
        render_alert(message, surface)
    } else {
        render_status_bar(model, surface)
    }
}

fn render_banner<D: DisplaySurface>(text: &str, surface: &mut D) -> Result<(), DisplayError> {
    surface.draw_text(
        MARGIN,
        SCREEN_HEIGHT / 2 - 10,
        text,
        TEXT_SCALE,
        Color::White,
    )
}

fn render_connecting<D: DisplaySurface>(
    link: LinkState,
    surface: &mut D,
) -> Result<(), DisplayError> {
    match link {
        LinkState::WifiConnecting => surface.draw_text(
            MARGIN,
            MARGIN,
            "Connecting to WiFi...",
            TEXT_SCALE,
            Color::White,
        ),
        LinkState::BrokerConnecting => surface.draw_text(
            MARGIN,
            MARGIN,
            "Attempting MQTT connection...",
            TEXT_SCALE,
            Color::White,
        ),
        LinkState::BrokerRetry(code) => {
            surface.draw_text(
                MARGIN,
                MARGIN,
                "Attempting MQTT connection...",
                TEXT_SCALE,
                Color::White,
            )?;
            let mut line: String<48> = String::new();
            let _ = write_to_string(
                &mut line,
                format_args!("failed, rc={} try again in 5 seconds", code),
            );
            surface.draw_text(MARGIN, MARGIN + LINE_HEIGHT, &line, TEXT_SCALE, Color::White)
        }
        LinkState::Up => Ok(()),
    }
}

fn render_menu<D: DisplaySurface>(model: &UiModel, surface: &mut D) -> Result<(), DisplayError> {
    let page = model.cursor.page;
    surface.draw_text(MARGIN, MARGIN, page.title(), TEXT_SCALE, Color::White)?;

    let start = model.cursor.scroll;
    let end = (start + VISIBLE_ROWS).min(page.item_count());
    for (row, index) in (start..end).enumerate() {
        let selected = index == model.cursor.selected;
        let mut line: String<32> = String::new();
        let _ = write_to_string(
            &mut line,
            format_args!(
                "{}{}",
                if selected { "> " } else { "  " },
                page.item(index)
            ),
        );
        surface.draw_text(
            ITEM_INDENT,
            MENU_TOP_OFFSET + row as u16 * LINE_HEIGHT,
            &line,
            TEXT_SCALE,
            if selected { Color::Yellow } else { Color::White },
        )?;
    }
    Ok(())
}

fn render_alert<D: DisplaySurface>(message: &str, surface: &mut D) -> Result<(), DisplayError> {
    surface.draw_text(
        MARGIN,
        SCREEN_HEIGHT / 2 - 20,
        message,
        ALERT_TEXT_SCALE,
        Color::Red,
    )
}

fn render_status_bar<D: DisplaySurface>(
    model: &UiModel,
    surface: &mut D,
) -> Result<(), DisplayError> {
    let top = SCREEN_HEIGHT - STATUS_BAR_HEIGHT;
    surface.fill_rect(0, top, SCREEN_WIDTH, STATUS_BAR_HEIGHT, Color::DarkGray)?;

    let mut line: String<32> = String::new();
    let _ = write_to_string(
        &mut line,
        format_args!(
            "FRZR: {}  FRDG: {}",
            model.doors.freezer_state().as_str(),
            model.doors.fridge_state().as_str()
        ),
    );
    surface.draw_text(MARGIN, top + 10, &line, TEXT_SCALE, Color::White)
}

/// Helper to write formatted output to a heapless String
fn write_to_string<const N: usize>(
    s: &mut String<N>,
    args: fmt::Arguments<'_>,
) -> fmt::Result {
    use core::fmt::Write;
    s.write_fmt(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{Banner, Page};
    use heapless::Vec;
    use hestia_protocol::{Door, DoorState};

    #[derive(Default)]
    struct RecordingSurface {
        clears: Vec<Color, 4>,
        texts: Vec<(u16, u16, String<48>, u8, Color), 16>,
        rects: Vec<(u16, u16, u16, u16, Color), 4>,
    }

    impl RecordingSurface {
        fn text_at(&self, x: u16, y: u16) -> &str {
            self.texts
                .iter()
                .find(|t| t.0 == x && t.1 == y)
                .map(|t| t.2.as_str())
                .unwrap_or("")
        }

        fn color_at(&self, x: u16, y: u16) -> Option<Color> {
            self.texts.iter().find(|t| t.0 == x && t.1 == y).map(|t| t.4)
        }
    }

    impl DisplaySurface for RecordingSurface {
        fn clear(&mut self, color: Color) -> Result<(), DisplayError> {
            let _ = self.clears.push(color);
            Ok(())
        }

        fn draw_text(
            &mut self,
            x: u16,
            y: u16,
            text: &str,
            scale: u8,
            color: Color,
        ) -> Result<(), DisplayError> {
            let mut copy: String<48> = String::new();
            let _ = copy.push_str(text);
            let _ = self.texts.push((x, y, copy, scale, color));
            Ok(())
        }

        fn fill_rect(
            &mut self,
            x: u16,
            y: u16,
            width: u16,
            height: u16,
            color: Color,
        ) -> Result<(), DisplayError> {
            let _ = self.rects.push((x, y, width, height, color));
            Ok(())
        }

        fn sleep(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }

        fn wake(&mut self) -> Result<(), DisplayError> {
            Ok(())
        }

        fn dimensions(&self) -> (u16, u16) {
            (SCREEN_WIDTH, SCREEN_HEIGHT)
        }
    }

    fn online_model() -> UiModel {
        let mut model = UiModel::new();
        model.link = LinkState::Up;
        model
    }

    #[test]
    fn test_render_main_menu() {
        let model = online_model();
        let mut surface = RecordingSurface::default();
        render(&model, 0, &mut surface).unwrap();

        assert_eq!(surface.clears[..], [Color::Black]);
        assert_eq!(surface.text_at(10, 10), "Main Menu");
        assert_eq!(surface.text_at(20, 40), "> Devices");
        assert_eq!(surface.color_at(20, 40), Some(Color::Yellow));
        assert_eq!(surface.text_at(20, 70), "  Scenes");
        assert_eq!(surface.color_at(20, 70), Some(Color::White));
        assert_eq!(surface.text_at(20, 100), "  Power Off All Devices");
        assert_eq!(surface.text_at(20, 130), "  Exit");

        // Title + 4 rows + status line
        assert_eq!(surface.texts.len(), 6);
    }

    #[test]
    fn test_render_status_bar_closed() {
        let model = online_model();
        let mut surface = RecordingSurface::default();
        render(&model, 0, &mut surface).unwrap();

        assert_eq!(surface.rects[..], [(0, 200, 320, 40, Color::DarkGray)]);
        assert_eq!(surface.text_at(10, 210), "FRZR: CLOSED  FRDG: CLOSED");
    }

    #[test]
    fn test_render_status_bar_open_door() {
        let mut model = online_model();
        model.doors.update(Door::Freezer, DoorState::Open);
        model.doors.clear_alert();

        let mut surface = RecordingSurface::default();
        render(&model, 0, &mut surface).unwrap();
        assert_eq!(surface.text_at(10, 210), "FRZR: OPEN  FRDG: CLOSED");
    }

    #[test]
    fn test_render_alert_replaces_status_bar() {
        let mut model = online_model();
        model.doors.update(Door::Fridge, DoorState::Open);

        let mut surface = RecordingSurface::default();
        render(&model, 0, &mut surface).unwrap();

        assert_eq!(surface.text_at(10, 100), "Fridge Door Open!");
        assert_eq!(
            surface
                .texts
                .iter()
                .find(|t| t.0 == 10 && t.1 == 100)
                .map(|t| t.3),
            Some(ALERT_TEXT_SCALE)
        );
        assert_eq!(surface.color_at(10, 100), Some(Color::Red));
        assert!(surface.rects.is_empty());
    }

    #[test]
    fn test_render_scroll_window() {
        let mut model = online_model();
        model.cursor.page = Page::Scenes;
        model.cursor.selected = 6;
        model.cursor.scroll = 2;

        let mut surface = RecordingSurface::default();
        render(&model, 0, &mut surface).unwrap();

        assert_eq!(surface.text_at(10, 10), "Scenes");
        assert_eq!(surface.text_at(20, 40), "  Freezer/Fridge");
        assert_eq!(surface.text_at(20, 160), "> Warm");
        assert_eq!(surface.color_at(20, 160), Some(Color::Yellow));
        // Title + 5 rows + status line
        assert_eq!(surface.texts.len(), 7);
    }

    #[test]
    fn test_render_window_clamps_at_list_end() {
        let mut model = online_model();
        model.cursor.page = Page::Devices;
        model.cursor.selected = 6;
        model.cursor.scroll = 3;

        let mut surface = RecordingSurface::default();
        render(&model, 0, &mut surface).unwrap();

        // Only four rows remain past the window start
        assert_eq!(surface.text_at(20, 130), "> < Back>");
        assert_eq!(surface.texts.len(), 6);
    }

    #[test]
    fn test_render_live_banner_owns_frame() {
        let mut model = online_model();
        model.banner = Some(Banner::new(format_args!("Hallway Lights ON"), 1_000));

        let mut surface = RecordingSurface::default();
        render(&model, 500, &mut surface).unwrap();

        assert_eq!(surface.texts.len(), 1);
        assert_eq!(surface.text_at(10, 110), "Hallway Lights ON");
        assert!(surface.rects.is_empty());
    }

    #[test]
    fn test_render_expired_banner_falls_through() {
        let mut model = online_model();
        model.banner = Some(Banner::new(format_args!("Scene: Warm"), 1_000));

        let mut surface = RecordingSurface::default();
        render(&model, 1_000, &mut surface).unwrap();
        assert_eq!(surface.text_at(10, 10), "Main Menu");
    }

    #[test]
    fn test_render_wifi_connect_screen() {
        let model = UiModel::new();
        let mut surface = RecordingSurface::default();
        render(&model, 0, &mut surface).unwrap();

        assert_eq!(surface.texts.len(), 1);
        assert_eq!(surface.text_at(10, 10), "Connecting to WiFi...");
    }

    #[test]
    fn test_render_broker_retry_screen() {
        let mut model = UiModel::new();
        model.link = LinkState::BrokerRetry(5);

        let mut surface = RecordingSurface::default();
        render(&model, 0, &mut surface).unwrap();

        assert_eq!(surface.text_at(10, 10), "Attempting MQTT connection...");
        assert_eq!(
            surface.text_at(10, 40),
            "failed, rc=5 try again in 5 seconds"
        );
    }
}
