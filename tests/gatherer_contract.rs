/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

mod support;

use stage_flow::{
    CompletionListener, CreditPolicy, FixedCreditPolicy, Gatherer, InboundPath, PeerHandle,
    StreamError, StreamMessage, StreamPriority,
};
use std::sync::Arc;
use support::{RecordingChannel, RecordingLiveness};

fn make_gatherer(
    name: &str,
    policy: Arc<dyn CreditPolicy>,
) -> (Gatherer, Arc<RecordingChannel>, Arc<RecordingLiveness>) {
    let channel = RecordingChannel::new();
    let liveness = RecordingLiveness::new();
    let gatherer = Gatherer::new(name, channel.clone(), liveness.clone(), policy);
    (gatherer, channel, liveness)
}

#[tokio::test(flavor = "multi_thread")]
async fn attach_ack_and_duplicate_refusal_contract() {
    support::init_logging();

    let (mut gatherer, channel, liveness) =
        make_gatherer("attach-gatherer", Arc::new(FixedCreditPolicy::new(16)));
    let producer = PeerHandle::new("producer");
    let stage = PeerHandle::new("origin-stage");

    assert!(
        gatherer
            .add_path(7, producer.clone(), &stage, StreamPriority::High, 40, true, None)
            .await
    );
    assert_eq!(
        channel.sent_to(&stage),
        vec![StreamMessage::AckOpen {
            slot: 7,
            granted_credit: 16,
            redeployable: true,
        }]
    );
    assert_eq!(liveness.active_watches(), 1);

    // Duplicate (slot, peer) is refused to the offending peer; the stage is
    // not told again and the registry is untouched.
    assert!(
        !gatherer
            .add_path(7, producer.clone(), &stage, StreamPriority::High, 40, true, None)
            .await
    );
    assert_eq!(gatherer.len(), 1);
    assert_eq!(
        channel.sent_to(&producer),
        vec![StreamMessage::ForcedClose {
            slot: 7,
            reason: StreamError::CannotAddUpstream,
        }]
    );
    assert_eq!(channel.sent_to(&stage).len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn credit_emission_follows_the_assignment_vector() {
    support::init_logging();

    let (mut gatherer, channel, _liveness) =
        make_gatherer("credit-gatherer", Arc::new(FixedCreditPolicy::new(64)));
    let stage = PeerHandle::new("origin-stage");
    let eager = PeerHandle::new("eager");
    let parked = PeerHandle::new("parked");
    for (slot, peer) in [(0, &eager), (1, &parked)] {
        gatherer
            .add_path(slot, peer.clone(), &stage, StreamPriority::Normal, 8, false, None)
            .await;
    }

    // Fresh paths start with zero pending credit: nothing is emitted.
    gatherer.emit_credits().await;
    assert!(channel.sent_to(&eager).is_empty());
    assert!(channel.sent_to(&parked).is_empty());

    // The host's recompute cycle raises one path's pending amount.
    assert!(gatherer.set_pending_credit(0, &eager, 12));
    gatherer.emit_credits().await;
    gatherer.emit_credits().await;

    // Pending credit is granted on every pass until the policy resets it.
    assert_eq!(
        channel.sent_to(&eager),
        vec![
            StreamMessage::AckBatch {
                slot: 0,
                new_credit: 12
            },
            StreamMessage::AckBatch {
                slot: 0,
                new_credit: 12
            },
        ]
    );
    assert!(channel.sent_to(&parked).is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn listeners_resolve_exactly_once_on_close() {
    support::init_logging();

    let (mut gatherer, _channel, liveness) =
        make_gatherer("close-gatherer", Arc::new(FixedCreditPolicy::new(8)));
    let stage = PeerHandle::new("origin-stage");
    let (first, first_rx) = CompletionListener::pair();
    let (second, second_rx) = CompletionListener::pair();

    gatherer
        .add_path(
            0,
            PeerHandle::new("a"),
            &stage,
            StreamPriority::Normal,
            4,
            false,
            Some(first),
        )
        .await;
    gatherer
        .add_path(
            1,
            PeerHandle::new("b"),
            &stage,
            StreamPriority::Normal,
            4,
            false,
            Some(second),
        )
        .await;
    assert_eq!(gatherer.pending_listeners(), 2);

    gatherer.close(Arc::new(b"final".to_vec()));

    assert!(gatherer.is_empty());
    assert_eq!(gatherer.pending_listeners(), 0);
    assert_eq!(liveness.active_watches(), 0);
    assert_eq!(first_rx.await.unwrap(), Ok(Arc::new(b"final".to_vec())));
    assert_eq!(second_rx.await.unwrap(), Ok(Arc::new(b"final".to_vec())));
}

#[tokio::test(flavor = "multi_thread")]
async fn listeners_resolve_with_the_failure_on_abort() {
    support::init_logging();

    let (mut gatherer, _channel, liveness) =
        make_gatherer("abort-gatherer", Arc::new(FixedCreditPolicy::new(8)));
    let stage = PeerHandle::new("origin-stage");
    let (first, first_rx) = CompletionListener::pair();
    let (second, second_rx) = CompletionListener::pair();

    gatherer
        .add_path(
            0,
            PeerHandle::new("a"),
            &stage,
            StreamPriority::Normal,
            4,
            false,
            Some(first),
        )
        .await;
    gatherer
        .add_path(
            1,
            PeerHandle::new("b"),
            &stage,
            StreamPriority::Normal,
            4,
            false,
            Some(second),
        )
        .await;

    let reason = StreamError::StageFailed("pipeline torn down".to_string());
    gatherer.abort(reason.clone());

    assert!(gatherer.is_empty());
    assert_eq!(liveness.active_watches(), 0);
    assert_eq!(first_rx.await.unwrap(), Err(reason.clone()));
    assert_eq!(second_rx.await.unwrap(), Err(reason));
}

#[tokio::test(flavor = "multi_thread")]
async fn liveness_trigger_cleans_up_like_an_explicit_removal() {
    support::init_logging();

    let (mut gatherer, channel, liveness) =
        make_gatherer("liveness-gatherer", Arc::new(FixedCreditPolicy::new(8)));
    let stage = PeerHandle::new("origin-stage");
    let healthy = PeerHandle::new("healthy");
    let doomed = PeerHandle::new("doomed");
    for (slot, peer) in [(0, &healthy), (1, &doomed)] {
        gatherer
            .add_path(slot, peer.clone(), &stage, StreamPriority::Normal, 8, false, None)
            .await;
    }
    assert!(gatherer.set_pending_credit(0, &healthy, 3));
    assert!(gatherer.set_pending_credit(1, &doomed, 9));
    let sent_before = channel.total_sent();

    assert!(gatherer.peer_terminated(1, &doomed).await);

    // The dead peer is gone, silently, and its watch is dropped; the
    // surviving path keeps its pending credit through the swap.
    assert!(gatherer.path(1, &doomed).is_none());
    assert_eq!(channel.total_sent(), sent_before);
    assert_eq!(liveness.active_watches(), 1);
    assert_eq!(gatherer.pending_credit(0, &healthy), Some(3));

    gatherer.emit_credits().await;
    assert_eq!(
        channel.sent_to(&healthy),
        vec![StreamMessage::AckBatch {
            slot: 0,
            new_credit: 3
        }]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn priority_aware_policies_see_path_state_at_attach() {
    support::init_logging();

    struct PriorityBoostPolicy;

    impl CreditPolicy for PriorityBoostPolicy {
        fn initial_credit(&self, requested: u64, path: &InboundPath) -> u64 {
            if path.priority >= StreamPriority::High {
                requested * 2
            } else {
                requested
            }
        }
    }

    let (mut gatherer, channel, _liveness) =
        make_gatherer("priority-gatherer", Arc::new(PriorityBoostPolicy));
    let stage = PeerHandle::new("origin-stage");

    gatherer
        .add_path(
            0,
            PeerHandle::new("bulk"),
            &stage,
            StreamPriority::Low,
            10,
            false,
            None,
        )
        .await;
    gatherer
        .add_path(
            1,
            PeerHandle::new("urgent"),
            &stage,
            StreamPriority::High,
            10,
            false,
            None,
        )
        .await;

    assert_eq!(
        channel.sent_to(&stage),
        vec![
            StreamMessage::AckOpen {
                slot: 0,
                granted_credit: 10,
                redeployable: false,
            },
            StreamMessage::AckOpen {
                slot: 1,
                granted_credit: 20,
                redeployable: false,
            },
        ]
    );
}
