//! Hestia - Household Remote Firmware
//!
//! Main firmware binary for the M5Stack Core2 household remote.
//! Three buttons drive a paged menu on the TFT; selections publish MQTT
//! commands to the home broker, and retained door-sensor topics feed the
//! fridge and freezer alerts.
//!
//! Named after the Greek goddess of the hearth - the fixed point the
//! household turns around.

#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]

extern crate alloc;

use alloc::boxed::Box;

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::interrupt::software::SoftwareInterruptControl;
use esp_hal::spi::master::Spi;
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use esp_radio::wifi::{ClientConfig, ModeConfig};

use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9342CRgb565;
use mipidsi::options::{ColorInversion, ColorOrder};
use mipidsi::Builder;

use panic_rtt_target as _;
use static_cell::StaticCell;

use crate::display::Core2Display;

mod channels;
mod credentials;
mod display;
mod tasks;

esp_bootloader_esp_idf::esp_app_desc!();

static NET_RESOURCES: StaticCell<embassy_net::StackResources<4>> = StaticCell::new();

// Pixel batch buffer for the panel interface (must live forever)
static DISPLAY_BUFFER: StaticCell<[u8; 512]> = StaticCell::new();

/// Main entry point
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    rtt_target::rtt_init_defmt!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 65536);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt = SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    info!("Hestia firmware starting...");
    info!("Display pins: SCK=GPIO18 MOSI=GPIO23 CS=GPIO5 DC=GPIO15");
    info!("Button pins: UP=GPIO39 SELECT=GPIO38 DOWN=GPIO37");
    info!(
        "mqtt: broker={}:{}, client_id={}",
        credentials::BROKER_HOST,
        credentials::broker_port(),
        credentials::CLIENT_ID
    );

    // ILI9342C panel on SPI2
    let spi_config = esp_hal::spi::master::Config::default()
        .with_frequency(Rate::from_mhz(40))
        .with_mode(esp_hal::spi::Mode::_0);
    let spi = Spi::new(peripherals.SPI2, spi_config)
        .unwrap()
        .with_sck(peripherals.GPIO18)
        .with_mosi(peripherals.GPIO23);

    let cs = Output::new(peripherals.GPIO5, Level::High, OutputConfig::default());
    let dc = Output::new(peripherals.GPIO15, Level::Low, OutputConfig::default());

    let mut delay = esp_hal::delay::Delay::new();
    let spi_device = ExclusiveDevice::new(spi, cs, esp_hal::delay::Delay::new()).unwrap();
    let interface = SpiInterface::new(spi_device, dc, DISPLAY_BUFFER.init([0; 512]));
    let panel = Builder::new(ILI9342CRgb565, interface)
        .display_size(320, 240)
        .color_order(ColorOrder::Bgr)
        .invert_colors(ColorInversion::Inverted)
        .init(&mut delay)
        .unwrap();
    let display = Core2Display::new(panel);
    info!("Display initialized");

    // GPIO 37-39 are input-only pads; the board supplies the pull-ups
    let input_config = InputConfig::default().with_pull(Pull::None);
    let button_up = Input::new(peripherals.GPIO39, input_config);
    let button_select = Input::new(peripherals.GPIO38, input_config);
    let button_down = Input::new(peripherals.GPIO37, input_config);

    if credentials::WIFI_SSID.is_empty() {
        warn!("wifi: set WIFI_SSID/WIFI_PASS env vars at build time to reach the broker");
    }

    let radio = esp_radio::init().unwrap();
    let radio: &'static _ = Box::leak(Box::new(radio));
    let (mut wifi_controller, interfaces) =
        esp_radio::wifi::new(radio, peripherals.WIFI, esp_radio::wifi::Config::default()).unwrap();

    let client_config = ClientConfig::default()
        .with_ssid(credentials::WIFI_SSID.into())
        .with_password(credentials::WIFI_PASS.into());
    wifi_controller
        .set_config(&ModeConfig::Client(client_config))
        .unwrap();

    let stack_config = embassy_net::Config::dhcpv4(Default::default());
    let (stack, net_runner) = embassy_net::new(
        interfaces.sta,
        stack_config,
        NET_RESOURCES.init(embassy_net::StackResources::<4>::new()),
        0x7D41_C0A8_3F19_55E2,
    );

    spawner.spawn(tasks::tick_task()).unwrap();
    spawner
        .spawn(tasks::buttons_task(button_up, button_select, button_down))
        .unwrap();
    spawner.spawn(tasks::net_runner_task(net_runner)).unwrap();
    spawner.spawn(tasks::net_task(wifi_controller, stack)).unwrap();
    spawner.spawn(tasks::controller_task(display)).unwrap();
    info!("All tasks spawned");

    // All work happens in the spawned tasks
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
