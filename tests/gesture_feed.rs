//! End-to-end checks over a real loopback socket.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use byteorder::{BigEndian, WriteBytesExt};
use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr, UdpSocket},
    sync::Arc,
    thread,
    time::{Duration, Instant},
};
use wandlink::{
    connection::ConnectionState,
    gesture::WireFormat,
    listener::{ListenerConfig, ListenerError},
    log::NoopLogSink,
    read_model::GestureSource,
    receiver::GestureReceiver,
};

fn loopback() -> ListenerConfig {
    ListenerConfig::default()
        .with_bind_addr(IpAddr::V4(Ipv4Addr::LOCALHOST))
        .with_port(0)
}

fn start(config: ListenerConfig) -> GestureReceiver {
    GestureReceiver::start(config, Arc::new(NoopLogSink)).expect("receiver starts")
}

fn send(to: SocketAddr, payload: &[u8]) {
    let tx = UdpSocket::bind("127.0.0.1:0").unwrap();
    tx.send_to(payload, to).unwrap();
}

/// Polls `cond` every few milliseconds; returns how long it took, if it held in time.
fn wait_for(timeout: Duration, mut cond: impl FnMut() -> bool) -> Option<Duration> {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if cond() {
            return Some(start.elapsed());
        }
        thread::sleep(Duration::from_millis(5));
    }
    None
}

#[test]
fn valid_datagram_is_published() {
    let rx = start(loopback());
    send(rx.local_addr(), b"CircleGesture|87.3");

    wait_for(Duration::from_secs(2), || rx.gesture() == "CircleGesture").expect("published");
    assert_eq!(rx.confidence(), 87.3);
    assert_eq!(rx.connection_state(), ConnectionState::Connected);
}

#[test]
fn out_of_range_confidence_is_clamped() {
    let rx = start(loopback());
    send(rx.local_addr(), b"Wave|120");

    wait_for(Duration::from_secs(2), || rx.gesture() == "Wave").expect("published");
    assert_eq!(rx.confidence(), 100.0);
}

#[test]
fn malformed_datagram_keeps_sample_but_connects() {
    let rx = start(loopback());
    send(rx.local_addr(), b"Wave|42,5");
    wait_for(Duration::from_secs(2), || rx.gesture() == "Wave").expect("first sample");
    assert_eq!(rx.confidence(), 42.5);

    send(rx.local_addr(), b"BadPacketNoSeparator");
    wait_for(Duration::from_secs(2), || rx.stats().received == 2).expect("second datagram seen");

    let snap = rx.snapshot();
    assert_eq!(snap.sample.label(), "Wave");
    assert_eq!(snap.sample.confidence(), 42.5);
    assert_eq!(snap.state, ConnectionState::Connected);
    assert_eq!(rx.stats().rejected, 1);
}

#[test]
fn empty_label_with_confidence_is_published() {
    let rx = start(loopback());
    send(rx.local_addr(), b"Wave|10");
    wait_for(Duration::from_secs(2), || rx.gesture() == "Wave").expect("first sample");

    send(rx.local_addr(), b"|50");
    wait_for(Duration::from_secs(2), || rx.gesture().is_empty()).expect("empty label published");
    let snap = rx.snapshot();
    assert_eq!(snap.sample.confidence(), 50.0);
    assert!(snap.has_received());
    assert_eq!(rx.stats().rejected, 0);
}

#[test]
fn malformed_first_datagram_still_counts_as_alive() {
    let rx = start(loopback().with_warmup(Duration::from_secs(10)));
    send(rx.local_addr(), b"BadPacketNoSeparator");

    wait_for(Duration::from_secs(2), || {
        rx.connection_state() == ConnectionState::Connected
    })
    .expect("arrival alone connects");
    assert_eq!(rx.gesture(), "");
    assert_eq!(rx.confidence(), 0.0);
}

#[test]
fn second_receiver_on_same_port_fails_to_bind() {
    let first = start(loopback());
    let taken = loopback().with_port(first.local_addr().port());

    let err = GestureReceiver::start(taken, Arc::new(NoopLogSink))
        .err()
        .expect("port already in use");
    assert!(err.is_bind_error(), "{err}");
    assert!(matches!(err, ListenerError::Bind { .. }));
    assert!(first.is_running());
}

#[test]
fn silent_feed_disconnects_after_warmup() {
    let warmup = Duration::from_millis(300);
    let rx = start(loopback().with_warmup(warmup));
    assert_eq!(rx.connection_state(), ConnectionState::Waiting);

    let took = wait_for(Duration::from_secs(3), || {
        rx.connection_state() == ConnectionState::Disconnected
    })
    .expect("disconnected after warm-up");
    assert!(took >= Duration::from_millis(250), "too early: {took:?}");
}

#[test]
fn packet_during_warmup_connects_immediately() {
    let rx = start(loopback().with_warmup(Duration::from_secs(5)));
    thread::sleep(Duration::from_millis(100));
    send(rx.local_addr(), b"UpDownWave|77");

    let took = wait_for(Duration::from_secs(1), || {
        rx.connection_state() == ConnectionState::Connected
    })
    .expect("connected");
    assert!(took < Duration::from_millis(500));
}

#[test]
fn silence_after_connect_disconnects_within_timeout_and_poll() {
    let timeout = Duration::from_millis(300);
    let poll = Duration::from_millis(100);
    let rx = start(
        loopback()
            .with_warmup(Duration::from_millis(100))
            .with_liveness_timeout(timeout)
            .with_poll_interval(poll),
    );

    send(rx.local_addr(), b"Wave|50");
    wait_for(Duration::from_secs(1), || {
        rx.connection_state() == ConnectionState::Connected
    })
    .expect("connected");
    let silent_since = Instant::now();

    wait_for(Duration::from_secs(3), || {
        rx.connection_state() == ConnectionState::Disconnected
    })
    .expect("timed out");
    let silent_for = silent_since.elapsed();
    assert!(silent_for >= Duration::from_millis(250), "too early: {silent_for:?}");
    assert!(
        silent_for <= timeout + poll + Duration::from_millis(250),
        "too late: {silent_for:?}"
    );

    send(rx.local_addr(), b"Wave|60");
    wait_for(Duration::from_secs(1), || {
        rx.connection_state() == ConnectionState::Connected
    })
    .expect("reconnected");
    assert_eq!(rx.confidence(), 60.0);
}

#[test]
fn stop_twice_closes_the_socket_once() {
    let rx = start(loopback());
    let addr = rx.local_addr();
    send(addr, b"Wave|10");
    wait_for(Duration::from_secs(2), || rx.gesture() == "Wave").expect("published");

    let began = Instant::now();
    rx.stop();
    rx.stop();
    assert!(began.elapsed() < Duration::from_secs(2));
    assert!(!rx.is_running());
    assert_eq!(rx.connection_state(), ConnectionState::Disconnected);
    assert_eq!(rx.gesture(), "Wave");

    let rebound = start(loopback().with_port(addr.port()));
    assert_eq!(rebound.local_addr(), addr);
}

fn wekinator_packet(class: f32) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"/wek/outputs\0\0\0\0");
    buf.extend_from_slice(b",f\0\0");
    buf.write_f32::<BigEndian>(class).unwrap();
    buf
}

#[test]
fn wekinator_osc_outputs_map_to_gestures() {
    let rx = start(loopback().with_wire_format(WireFormat::WekinatorOsc));

    send(rx.local_addr(), &wekinator_packet(3.0));
    wait_for(Duration::from_secs(2), || rx.gesture() == "CircularMotion").expect("class 3");
    assert_eq!(rx.confidence(), 100.0);

    send(rx.local_addr(), b"Wave|50");
    wait_for(Duration::from_secs(2), || rx.stats().rejected == 1).expect("text rejected");
    assert_eq!(rx.gesture(), "CircularMotion");

    send(rx.local_addr(), &wekinator_packet(1.2));
    wait_for(Duration::from_secs(2), || rx.gesture() == "LeftRightWave").expect("class 1");
}
