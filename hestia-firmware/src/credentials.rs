//! Build-time network credentials
//!
//! Credentials are baked in from environment variables at compile time:
//!
//! ```sh
//! WIFI_SSID=... WIFI_PASS=... BROKER_HOST=192.168.1.10 \
//!     cargo build -p hestia-firmware --release
//! ```
//!
//! `BROKER_HOST` accepts an IPv4 address or a hostname (resolved over DNS).
//! Leave `BROKER_USER` empty for an anonymous broker connection.

pub const WIFI_SSID: &str = match option_env!("WIFI_SSID") {
    Some(ssid) => ssid,
    None => "",
};

pub const WIFI_PASS: &str = match option_env!("WIFI_PASS") {
    Some(pass) => pass,
    None => "",
};

pub const BROKER_HOST: &str = match option_env!("BROKER_HOST") {
    Some(host) => host,
    None => "",
};

pub const BROKER_USER: &str = match option_env!("BROKER_USER") {
    Some(user) => user,
    None => "",
};

pub const BROKER_PASS: &str = match option_env!("BROKER_PASS") {
    Some(pass) => pass,
    None => "",
};

const DEFAULT_BROKER_PORT: u16 = 1883;

/// Broker TCP port, `BROKER_PORT` env var or 1883
pub fn broker_port() -> u16 {
    match option_env!("BROKER_PORT") {
        Some(port) => port.parse().unwrap_or(DEFAULT_BROKER_PORT),
        None => DEFAULT_BROKER_PORT,
    }
}

/// MQTT client identifier presented to the broker
pub const CLIENT_ID: &str = "M5StackCore2";
