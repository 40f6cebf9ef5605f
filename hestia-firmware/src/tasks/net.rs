//! Network task
//!
//! Brings up the Wi-Fi station, then runs the broker session loop: TCP
//! connect, MQTT connect, subscribe to both door topics, then serve
//! inbound publishes, outbound publishes, and the keep-alive ping.
//! Failures are reported as link transitions and retried after a fixed
//! delay; the UI shows the matching progress screen for each state.

use core::net::Ipv4Addr;
use core::str::FromStr;

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_net::dns::DnsQueryType;
use embassy_net::tcp::TcpSocket;
use embassy_net::{IpAddress, Runner, Stack};
use embassy_time::{Duration, Ticker, Timer};
use esp_radio::wifi::{WifiController, WifiDevice};
use heapless::String;

use rust_mqtt::client::client::MqttClient;
use rust_mqtt::client::client_config::{ClientConfig, MqttVersion};
use rust_mqtt::packet::v5::publish_packet::QualityOfService;
use rust_mqtt::packet::v5::reason_codes::ReasonCode;
use rust_mqtt::utils::rng_generator::CountingRng;

use hestia_core::config::RECONNECT_DELAY_MS;
use hestia_core::ui::LinkState;
use hestia_protocol::{FREEZER_STATUS_TOPIC, FRIDGE_STATUS_TOPIC, MAX_TOPIC_LEN};

use crate::channels::{NetEvent, PublishRequest, MAX_STATUS_LEN, NET_CHANNEL, PUBLISH_CHANNEL};
use crate::credentials;

/// Keep-alive ping interval, half the broker keep-alive window
const PING_INTERVAL_SECS: u64 = 30;

/// MQTT session buffer size; fits the largest retained status packet
const MQTT_BUF_SIZE: usize = 512;

/// What the session loop wants done once the client borrow is released
enum SessionStep {
    Delivered,
    Publish(PublishRequest),
    Ping,
    Failed(ReasonCode),
}

/// Network runner task - drives the TCP/IP stack
#[embassy_executor::task]
pub async fn net_runner_task(mut runner: Runner<'static, WifiDevice<'static>>) {
    runner.run().await;
}

/// Network task - owns the Wi-Fi association and the broker session
#[embassy_executor::task]
pub async fn net_task(mut wifi: WifiController<'static>, stack: Stack<'static>) {
    info!("Network task started");

    loop {
        send_link(LinkState::WifiConnecting).await;
        connect_wifi(&mut wifi, stack).await;

        // Broker sessions continue on this association until it drops
        while wifi_up(&wifi, stack) {
            send_link(LinkState::BrokerConnecting).await;
            let rc = broker_session(stack).await;
            warn!("mqtt: session ended, rc={}", rc as u8);
            send_link(LinkState::BrokerRetry(rc as u8)).await;
            Timer::after(Duration::from_millis(RECONNECT_DELAY_MS)).await;
        }

        warn!("wifi: association lost, reconnecting");
        let _ = wifi.disconnect_async().await;
    }
}

/// Associate with the access point and wait for a DHCP lease
async fn connect_wifi(wifi: &mut WifiController<'static>, stack: Stack<'static>) {
    loop {
        if !wifi.is_started().unwrap_or(false) {
            if let Err(e) = wifi.start_async().await {
                warn!("wifi: start failed: {:?}", e);
                Timer::after(Duration::from_millis(RECONNECT_DELAY_MS)).await;
                continue;
            }
        }

        if let Err(e) = wifi.connect_async().await {
            warn!("wifi: connect failed: {:?}", e);
            let _ = wifi.disconnect_async().await;
            Timer::after(Duration::from_millis(RECONNECT_DELAY_MS)).await;
            continue;
        }

        info!("wifi: associated, waiting for DHCP");
        stack.wait_config_up().await;
        if let Some(config) = stack.config_v4() {
            info!("wifi: up, address {}", config.address);
        }
        return;
    }
}

fn wifi_up(wifi: &WifiController<'static>, stack: Stack<'static>) -> bool {
    stack.is_link_up() && matches!(wifi.is_connected(), Ok(true))
}

/// One broker session: connect, subscribe, serve. Returns the reason the
/// session ended.
async fn broker_session(stack: Stack<'static>) -> ReasonCode {
    let Some(address) = resolve_broker(stack).await else {
        return ReasonCode::NetworkError;
    };

    let mut rx_buffer = [0u8; 1024];
    let mut tx_buffer = [0u8; 1024];
    let mut socket = TcpSocket::new(stack, &mut rx_buffer, &mut tx_buffer);
    // Pings flow every 30s, so a 90s quiet window means the link is gone
    socket.set_timeout(Some(Duration::from_secs(90)));

    let port = credentials::broker_port();
    info!("mqtt: connecting to {}:{}", credentials::BROKER_HOST, port);
    if let Err(e) = socket.connect((address, port)).await {
        warn!("mqtt: tcp connect failed: {:?}", e);
        return ReasonCode::NetworkError;
    }

    let mut config: ClientConfig<'_, 5, CountingRng> =
        ClientConfig::new(MqttVersion::MQTTv5, CountingRng(20000));
    config.add_client_id(credentials::CLIENT_ID);
    config.add_max_subscribe_qos(QualityOfService::QoS0);
    if !credentials::BROKER_USER.is_empty() {
        config.add_username(credentials::BROKER_USER);
        config.add_password(credentials::BROKER_PASS);
    }
    config.max_packet_size = MQTT_BUF_SIZE as u32;

    let mut write_buffer = [0u8; MQTT_BUF_SIZE];
    let mut recv_buffer = [0u8; MQTT_BUF_SIZE];
    let mut client = MqttClient::<_, 5, CountingRng>::new(
        socket,
        &mut write_buffer,
        MQTT_BUF_SIZE,
        &mut recv_buffer,
        MQTT_BUF_SIZE,
        config,
    );

    if let Err(rc) = client.connect_to_broker().await {
        warn!("mqtt: broker connect failed, rc={}", rc as u8);
        return rc;
    }

    // Both door topics are retained, so the current state arrives right away
    for topic in [FRIDGE_STATUS_TOPIC, FREEZER_STATUS_TOPIC] {
        if let Err(rc) = client.subscribe_to_topic(topic).await {
            warn!("mqtt: subscribe {} failed, rc={}", topic, rc as u8);
            return rc;
        }
    }

    info!("mqtt: connected as {}", credentials::CLIENT_ID);
    send_link(LinkState::Up).await;

    let mut ping = Ticker::every(Duration::from_secs(PING_INTERVAL_SECS));

    loop {
        // The inbound arm borrows the client's receive buffer, so copy the
        // delivery out before acting on the other arms.
        let step = match select3(
            client.receive_message(),
            PUBLISH_CHANNEL.receive(),
            ping.next(),
        )
        .await
        {
            Either3::First(Ok((topic, payload))) => {
                debug!("mqtt: inbound {} ({} bytes)", topic, payload.len());
                NET_CHANNEL.send(inbound_event(topic, payload)).await;
                SessionStep::Delivered
            }
            Either3::First(Err(rc)) => SessionStep::Failed(rc),
            Either3::Second(request) => SessionStep::Publish(request),
            Either3::Third(_) => SessionStep::Ping,
        };

        match step {
            SessionStep::Delivered => {}
            SessionStep::Publish(request) => {
                debug!(
                    "mqtt: publish {} -> {}",
                    request.topic.as_str(),
                    request.payload.as_str()
                );
                if let Err(rc) = client
                    .send_message(
                        request.topic.as_str(),
                        request.payload.as_bytes(),
                        QualityOfService::QoS0,
                        false,
                    )
                    .await
                {
                    return rc;
                }
            }
            SessionStep::Ping => {
                if let Err(rc) = client.send_ping().await {
                    return rc;
                }
            }
            SessionStep::Failed(rc) => return rc,
        }
    }
}

/// Broker host as a literal IPv4 address, or resolved over DNS
async fn resolve_broker(stack: Stack<'static>) -> Option<IpAddress> {
    let host = credentials::BROKER_HOST;
    if let Ok(address) = Ipv4Addr::from_str(host) {
        return Some(IpAddress::from(address));
    }
    match stack.dns_query(host, DnsQueryType::A).await {
        Ok(addresses) => addresses.first().copied(),
        Err(e) => {
            warn!("mqtt: dns lookup for {} failed: {:?}", host, e);
            None
        }
    }
}

fn inbound_event(topic: &str, payload: &[u8]) -> NetEvent {
    let mut topic_copy: String<MAX_TOPIC_LEN> = String::new();
    let _ = topic_copy.push_str(topic);

    // Non-text or oversized payloads end up empty, which reads as CLOSED
    let mut payload_copy: String<MAX_STATUS_LEN> = String::new();
    if let Ok(text) = core::str::from_utf8(payload) {
        let _ = payload_copy.push_str(text);
    }

    NetEvent::Message {
        topic: topic_copy,
        payload: payload_copy,
    }
}

async fn send_link(link: LinkState) {
    NET_CHANNEL.send(NetEvent::Link(link)).await;
}
