//! Prices Receiver Tests - Subscribe-and-Stream Protocol
//!
//! Drives `RemotePricesReceiver` with a scripted socket-port spy and a
//! recording listener, and asserts the protocol state machine: connect,
//! subscribe on open, one-shot receive arming, wholesale rejection of
//! invalid payloads, and the no-re-arm-after-receive-error asymmetry.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crypto_price_feed::domain::market::{MarketPrice, PriceSnapshot};
use crypto_price_feed::ports::prices_listener::PricesListener;
use crypto_price_feed::ports::websocket::{WebsocketClient, WebsocketEvent};
use crypto_price_feed::usecases::RemotePricesReceiver;

const WS_URL: &str = "wss://any-host/ws/futures";

const SAMPLE_PRICES: &str =
    r#"{"topic":"coinIndex","data":{"ANT_1":{"id":"ANT","name":"ANT","type":1,"price":3.273782}}}"#;

// ---- Socket Port Spy ----

#[derive(Debug, Clone, PartialEq, Eq)]
enum PortCall {
    Connect(String),
    Disconnect,
    Send(Vec<u8>),
    Receive,
}

/// Scripted transport: records every command and replays a fixed event
/// sequence through `next_event`, ending the session when the script runs
/// out.
struct WebsocketClientSpy {
    calls: Mutex<Vec<PortCall>>,
    events: Mutex<VecDeque<WebsocketEvent>>,
}

impl WebsocketClientSpy {
    fn scripted(events: Vec<WebsocketEvent>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            events: Mutex::new(events.into()),
        })
    }

    fn calls(&self) -> Vec<PortCall> {
        self.calls.lock().unwrap().clone()
    }

    fn receive_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| **c == PortCall::Receive)
            .count()
    }
}

#[async_trait]
impl WebsocketClient for WebsocketClientSpy {
    async fn connect(&self, url: &str) {
        self.calls.lock().unwrap().push(PortCall::Connect(url.to_string()));
    }

    async fn disconnect(&self) {
        self.calls.lock().unwrap().push(PortCall::Disconnect);
    }

    async fn send(&self, payload: Vec<u8>) {
        self.calls.lock().unwrap().push(PortCall::Send(payload));
    }

    async fn receive(&self) {
        self.calls.lock().unwrap().push(PortCall::Receive);
    }

    async fn next_event(&self) -> Option<WebsocketEvent> {
        self.events.lock().unwrap().pop_front()
    }
}

// ---- Listener Spy ----

#[derive(Debug, Clone, PartialEq)]
enum Notified {
    Closed,
    Opened,
    SubscribeError,
    SubscribeSuccess,
    ReceiveError,
    ReceiveInvalidData,
    Prices(PriceSnapshot),
}

#[derive(Default)]
struct ListenerSpy {
    notifications: Mutex<Vec<Notified>>,
}

impl ListenerSpy {
    fn notifications(&self) -> Vec<Notified> {
        self.notifications.lock().unwrap().clone()
    }
}

impl PricesListener for ListenerSpy {
    fn on_closed(&self) {
        self.notifications.lock().unwrap().push(Notified::Closed);
    }

    fn on_opened(&self) {
        self.notifications.lock().unwrap().push(Notified::Opened);
    }

    fn on_subscribe_error(&self) {
        self.notifications.lock().unwrap().push(Notified::SubscribeError);
    }

    fn on_subscribe_success(&self) {
        self.notifications.lock().unwrap().push(Notified::SubscribeSuccess);
    }

    fn on_receive_error(&self) {
        self.notifications.lock().unwrap().push(Notified::ReceiveError);
    }

    fn on_receive_invalid_data(&self) {
        self.notifications
            .lock()
            .unwrap()
            .push(Notified::ReceiveInvalidData);
    }

    fn on_prices(&self, prices: PriceSnapshot) {
        self.notifications.lock().unwrap().push(Notified::Prices(prices));
    }
}

fn make_receiver(
    events: Vec<WebsocketEvent>,
) -> (RemotePricesReceiver, Arc<WebsocketClientSpy>, Arc<ListenerSpy>) {
    let client = WebsocketClientSpy::scripted(events);
    let listener = Arc::new(ListenerSpy::default());
    let weak: std::sync::Weak<dyn PricesListener> = Arc::<ListenerSpy>::downgrade(&listener);
    let port: Arc<dyn WebsocketClient> = client.clone();
    let receiver = RemotePricesReceiver::new(WS_URL, port, weak);
    (receiver, client, listener)
}

// ---- Connection & Subscription ----

#[tokio::test]
async fn start_receive_connects_once_to_the_configured_url() {
    let (receiver, client, listener) = make_receiver(vec![]);

    receiver.start_receive().await;

    assert_eq!(client.calls(), vec![PortCall::Connect(WS_URL.into())]);
    assert!(listener.notifications().is_empty());
}

#[tokio::test]
async fn open_event_sends_exactly_one_subscribe_message() {
    let (receiver, client, listener) = make_receiver(vec![WebsocketEvent::Opened]);

    receiver.start_receive().await;

    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], PortCall::Connect(WS_URL.into()));

    let PortCall::Send(payload) = &calls[1] else {
        panic!("expected a send, got {:?}", calls[1]);
    };
    let sent: serde_json::Value = serde_json::from_slice(payload).unwrap();
    assert_eq!(
        sent,
        serde_json::json!({"op": "subscribe", "args": ["coinIndex"]})
    );

    assert_eq!(listener.notifications(), vec![Notified::Opened]);
}

#[tokio::test]
async fn send_success_arms_exactly_one_receive() {
    let (receiver, client, listener) =
        make_receiver(vec![WebsocketEvent::Opened, WebsocketEvent::SendSuccess]);

    receiver.start_receive().await;

    assert_eq!(client.receive_count(), 1);
    assert_eq!(
        listener.notifications(),
        vec![Notified::Opened, Notified::SubscribeSuccess]
    );
}

#[tokio::test]
async fn send_failure_reports_subscribe_error_without_arming_receive() {
    let (receiver, client, listener) =
        make_receiver(vec![WebsocketEvent::Opened, WebsocketEvent::SendFailure]);

    receiver.start_receive().await;

    assert_eq!(client.receive_count(), 0);
    assert_eq!(
        listener.notifications(),
        vec![Notified::Opened, Notified::SubscribeError]
    );
}

// ---- Streaming ----

#[tokio::test]
async fn decoded_snapshot_reaches_the_listener_and_rearms_receive() {
    let (receiver, client, listener) = make_receiver(vec![
        WebsocketEvent::Opened,
        WebsocketEvent::SendSuccess,
        WebsocketEvent::Data(SAMPLE_PRICES.as_bytes().to_vec()),
    ]);

    receiver.start_receive().await;

    // One arm after subscribe, one re-arm after the delivery.
    assert_eq!(client.receive_count(), 2);

    let notifications = listener.notifications();
    let Some(Notified::Prices(snapshot)) = notifications.last() else {
        panic!("expected prices, got {notifications:?}");
    };
    assert_eq!(
        snapshot.get("ANT_1"),
        Some(&MarketPrice {
            id: Some("ANT".into()),
            name: Some("ANT".into()),
            kind: Some(1),
            price: 3.273782,
        })
    );
}

#[tokio::test]
async fn invalid_payloads_surface_exactly_one_invalid_data_event() {
    let invalid: &[&[u8]] = &[
        b"",
        b"invalid data",
        br#"{"topic":"coinIndex"}"#,
        br#"{"topic":"coinIndex","data":{}}"#,
        br#"{"topic":"coinIndex","data":{"ANT_1":{"id":"ANT"}}}"#,
    ];

    for payload in invalid {
        let (receiver, client, listener) = make_receiver(vec![
            WebsocketEvent::Opened,
            WebsocketEvent::SendSuccess,
            WebsocketEvent::Data(payload.to_vec()),
        ]);

        receiver.start_receive().await;

        let notifications = listener.notifications();
        let invalid_count = notifications
            .iter()
            .filter(|n| **n == Notified::ReceiveInvalidData)
            .count();
        assert_eq!(invalid_count, 1, "payload {payload:?}");
        assert!(
            !notifications.iter().any(|n| matches!(n, Notified::Prices(_))),
            "no snapshot for payload {payload:?}"
        );

        // Invalid data still re-arms the stream.
        assert_eq!(client.receive_count(), 2, "payload {payload:?}");
    }
}

#[tokio::test]
async fn receive_failure_reports_error_and_does_not_rearm() {
    let (receiver, client, listener) = make_receiver(vec![
        WebsocketEvent::Opened,
        WebsocketEvent::SendSuccess,
        WebsocketEvent::ReceiveFailure,
    ]);

    receiver.start_receive().await;

    // Only the arm that followed subscribe success.
    assert_eq!(client.receive_count(), 1);
    assert_eq!(
        listener.notifications(),
        vec![
            Notified::Opened,
            Notified::SubscribeSuccess,
            Notified::ReceiveError
        ]
    );
}

// ---- Session End ----

#[tokio::test]
async fn closed_event_ends_the_session_and_ignores_later_events() {
    let (receiver, client, listener) = make_receiver(vec![
        WebsocketEvent::Opened,
        WebsocketEvent::Closed,
        WebsocketEvent::SendSuccess,
    ]);

    receiver.start_receive().await;

    assert_eq!(
        listener.notifications(),
        vec![Notified::Opened, Notified::Closed]
    );
    // The trailing SendSuccess was never consumed.
    assert_eq!(client.receive_count(), 0);
}

#[tokio::test]
async fn stop_receive_issues_exactly_one_disconnect() {
    let (receiver, client, _listener) = make_receiver(vec![]);

    receiver.stop_receive().await;

    assert_eq!(client.calls(), vec![PortCall::Disconnect]);
}

#[tokio::test]
async fn dropped_listener_is_skipped_without_panicking() {
    let client = WebsocketClientSpy::scripted(vec![
        WebsocketEvent::Opened,
        WebsocketEvent::SendSuccess,
        WebsocketEvent::Data(SAMPLE_PRICES.as_bytes().to_vec()),
        WebsocketEvent::Closed,
    ]);

    let listener = Arc::new(ListenerSpy::default());
    let weak: std::sync::Weak<dyn PricesListener> = Arc::<ListenerSpy>::downgrade(&listener);
    let port: Arc<dyn WebsocketClient> = client.clone();
    let receiver = RemotePricesReceiver::new(WS_URL, port, weak);

    drop(listener);
    receiver.start_receive().await;

    // The protocol still ran to completion against the transport.
    assert_eq!(client.receive_count(), 2);
    assert!(client
        .calls()
        .iter()
        .any(|c| matches!(c, PortCall::Send(_))));
}
