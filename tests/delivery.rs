//! End-to-end delivery scenarios.
//!
//! Each test wires two endpoints through channels of varying hostility and
//! checks the delivery contract: every sent message arrives exactly once, in
//! send order, and window capacity is recovered through acknowledgment.
//! Simulated links are seeded, so lossy runs are reproducible.

use std::time::Duration;

use carrier_protocol::prelude::*;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn payloads(messages: &[&str]) -> Vec<Vec<u8>> {
    messages.iter().map(|m| m.as_bytes().to_vec()).collect()
}

// ---------------------------------------------------------------------------
// Zero loss: one flush, one round trip
// ---------------------------------------------------------------------------

#[test]
fn test_lossless_round_trip_clears_window() {
    let config = EndpointConfig::for_rtt(ms(100)).with_window_size(4);
    let mut sender = Endpoint::new(config.clone()).unwrap();
    let mut receiver = Endpoint::new(config).unwrap();

    for msg in ["A", "B", "C"] {
        assert!(sender.send(msg.as_bytes().to_vec()));
    }

    let frames = sender.flush_new_transmissions();
    let sequences: Vec<u64> = frames.iter().map(Frame::sequence).collect();
    assert_eq!(sequences, vec![0, 1, 2]);

    let frames = Lossless.transmit(frames);
    let delivery = receiver.receive(&frames);
    assert_eq!(delivery.messages, payloads(&["A", "B", "C"]));

    let acks = Lossless.transmit(delivery.acks);
    sender.receive(&acks);
    assert_eq!(sender.in_flight_len(), 0);
    assert!(sender.is_idle());
}

// ---------------------------------------------------------------------------
// Window exhaustion: window = 1
// ---------------------------------------------------------------------------

#[test]
fn test_window_of_one_blocks_until_acked() {
    let config = EndpointConfig::for_rtt(ms(100)).with_window_size(1);
    let mut sender = Endpoint::new(config.clone()).unwrap();
    let mut receiver = Endpoint::new(config).unwrap();

    assert!(sender.send(b"first".to_vec()));
    assert!(!sender.send(b"second".to_vec()));

    let frames = sender.flush_new_transmissions();
    assert!(!sender.send(b"second".to_vec()));

    let delivery = receiver.receive(&frames);
    sender.receive(&delivery.acks);
    assert!(sender.send(b"second".to_vec()));
}

// ---------------------------------------------------------------------------
// Lossy link: eventual in-order delivery
// ---------------------------------------------------------------------------

#[test]
fn test_lossy_link_eventually_delivers_in_order() {
    let config = EndpointConfig {
        window_size: 4,
        retransmit_timeout: ms(100),
        ack_mode: AckMode::PerFrame,
    };
    let mut link = Loopback::new(
        Endpoint::new(config.clone()).unwrap(),
        Endpoint::new(config).unwrap(),
        SimulatedLink::new(LinkFaults::with_loss(0.2), 1234),
        SimulatedLink::new(LinkFaults::with_loss(0.2), 5678),
    );

    let sent = payloads(&["m0", "m1", "m2", "m3", "m4", "m5"]);
    let mut backlog = sent.clone();

    let mut delivered = Vec::new();
    for _ in 0..200 {
        // Continuous re-submission: push whatever the window rejects back
        // to the front of the application backlog.
        while let Some(msg) = backlog.first() {
            if link.left_mut().send(msg.clone()) {
                backlog.remove(0);
            } else {
                break;
            }
        }

        let report = link.step(ms(50));
        delivered.extend(report.delivered_right);

        if backlog.is_empty() && link.left().is_idle() {
            break;
        }
    }

    assert_eq!(delivered, sent);
    assert!(link.left().is_idle());
}

// ---------------------------------------------------------------------------
// Duplicating link: exactly-once delivery
// ---------------------------------------------------------------------------

#[test]
fn test_duplicating_link_delivers_exactly_once() {
    let mut link = Loopback::new(
        Endpoint::default(),
        Endpoint::default(),
        SimulatedLink::new(LinkFaults::default().with_duplication(1.0), 9),
        SimulatedLink::perfect(),
    );

    let sent = payloads(&["x", "y", "z"]);
    for msg in &sent {
        assert!(link.left_mut().send(msg.clone()));
    }

    let report = link.run(5, ms(50));
    assert_eq!(report.delivered_right, sent);
    assert!(link.is_quiescent());
}

// ---------------------------------------------------------------------------
// Reordering link: contiguous prefix delivery
// ---------------------------------------------------------------------------

#[test]
fn test_reordering_link_preserves_send_order() {
    let config = EndpointConfig::for_rtt(ms(100)).with_window_size(8);
    let mut link = Loopback::new(
        Endpoint::new(config.clone()).unwrap(),
        Endpoint::new(config).unwrap(),
        SimulatedLink::new(LinkFaults::default().with_reordering(), 21),
        SimulatedLink::new(LinkFaults::default().with_reordering(), 22),
    );

    let sent = payloads(&["a", "b", "c", "d", "e", "f", "g", "h"]);
    for msg in &sent {
        assert!(link.left_mut().send(msg.clone()));
    }

    let report = link.run(10, ms(50));
    assert_eq!(report.delivered_right, sent);
}

// ---------------------------------------------------------------------------
// Hostile link, cumulative acks, sustained load
// ---------------------------------------------------------------------------

#[test]
fn test_cumulative_mode_survives_hostile_link() {
    let config = EndpointConfig {
        window_size: 4,
        retransmit_timeout: ms(100),
        ack_mode: AckMode::Cumulative,
    };
    let faults = LinkFaults::with_loss(0.25)
        .with_duplication(0.1)
        .with_reordering();
    let mut link = Loopback::new(
        Endpoint::new(config.clone()).unwrap(),
        Endpoint::new(config).unwrap(),
        SimulatedLink::new(faults, 77),
        SimulatedLink::new(faults, 78),
    );

    let sent: Vec<Vec<u8>> = (0u8..20).map(|n| vec![n]).collect();
    let mut backlog = sent.clone();

    let mut delivered = Vec::new();
    for _ in 0..600 {
        while let Some(msg) = backlog.first() {
            if link.left_mut().send(msg.clone()) {
                backlog.remove(0);
            } else {
                break;
            }
        }

        let report = link.step(ms(50));
        delivered.extend(report.delivered_right);

        if backlog.is_empty() && link.is_quiescent() {
            break;
        }
    }

    assert_eq!(delivered, sent);
}

// ---------------------------------------------------------------------------
// Ack-loss direction: duplicates must be re-acked
// ---------------------------------------------------------------------------

#[test]
fn test_lost_acks_recovered_by_duplicate_acking() {
    let config = EndpointConfig {
        window_size: 2,
        retransmit_timeout: ms(100),
        ack_mode: AckMode::PerFrame,
    };
    // Data always arrives; acks are lossy. The receiver sees duplicates and
    // must keep acking them until one ack survives the return path.
    let mut link = Loopback::new(
        Endpoint::new(config.clone()).unwrap(),
        Endpoint::new(config).unwrap(),
        SimulatedLink::perfect(),
        SimulatedLink::new(LinkFaults::with_loss(0.5), 404),
    );

    let sent = payloads(&["p", "q", "r", "s"]);
    let mut backlog = sent.clone();

    let mut delivered = Vec::new();
    for _ in 0..200 {
        while let Some(msg) = backlog.first() {
            if link.left_mut().send(msg.clone()) {
                backlog.remove(0);
            } else {
                break;
            }
        }

        let report = link.step(ms(50));
        delivered.extend(report.delivered_right);

        if backlog.is_empty() && link.left().is_idle() {
            break;
        }
    }

    assert_eq!(delivered, sent);
    assert!(link.left().is_idle());
}
