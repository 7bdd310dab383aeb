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

//! Producer-side gathering: attach acknowledgment, credit grants, completion
//! listener fulfillment.

use crate::channel::PeerChannel;
use crate::gatherer::path::{InboundPath, StreamPriority};
use crate::listener::CompletionListener;
use crate::liveness::LivenessWatch;
use crate::message::{Chunk, StreamError, StreamMessage, StreamSlot};
use crate::observability::events;
use crate::peer::PeerHandle;
use crate::policy::CreditPolicy;
use crate::registry::PathRegistry;
use std::sync::Arc;
use tracing::{debug, warn};

const COMPONENT: &str = "gatherer";

/// Upstream gatherer collecting data from producer peers.
///
/// Lives inside one hosting actor's sequential processing context, like
/// [`DownstreamMux`][crate::DownstreamMux]. The pending-credit assignment
/// vector is index-aligned 1:1 with the path registry; every structural
/// mutation applies the identical swap-erase to both.
pub struct Gatherer {
    name: String,
    channel: Arc<dyn PeerChannel>,
    liveness: Arc<dyn LivenessWatch>,
    policy: Arc<dyn CreditPolicy>,
    paths: PathRegistry<InboundPath>,
    // Pending credit to grant on the next emit_credits() pass, one entry per
    // registry index.
    assignment: Vec<i64>,
    listeners: Vec<CompletionListener>,
}

impl Gatherer {
    /// Creates an empty gatherer named `name` for log correlation.
    pub fn new(
        name: &str,
        channel: Arc<dyn PeerChannel>,
        liveness: Arc<dyn LivenessWatch>,
        policy: Arc<dyn CreditPolicy>,
    ) -> Self {
        Self {
            name: name.to_string(),
            channel,
            liveness,
            policy,
            paths: PathRegistry::new(),
            assignment: Vec::new(),
            listeners: Vec::new(),
        }
    }

    /// Returns the number of registered producer paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` when no producers are registered.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Looks up one producer path without mutating state.
    pub fn path(&self, slot: StreamSlot, peer: &PeerHandle) -> Option<&InboundPath> {
        self.paths.find(&(slot, peer.clone()))
    }

    /// Number of completion listeners still awaiting fulfillment.
    pub fn pending_listeners(&self) -> usize {
        self.listeners.len()
    }

    /// Paths in current registry order.
    pub fn paths(&self) -> impl Iterator<Item = &InboundPath> {
        self.paths.iter()
    }

    /// Registers a producer path for `(slot, peer)`.
    ///
    /// A duplicate attach is a protocol-level refusal: the offending peer is
    /// notified with a forced close carrying
    /// [`StreamError::CannotAddUpstream`] and local state stays unchanged.
    /// Otherwise the path is registered, a liveness watch is set up, a
    /// zero-pending assignment entry is appended, an optional completion
    /// listener is retained, and the open is acknowledged to `original_stage`
    /// with the credit granted by the injected policy.
    #[allow(clippy::too_many_arguments)]
    pub async fn add_path(
        &mut self,
        slot: StreamSlot,
        peer: PeerHandle,
        original_stage: &PeerHandle,
        priority: StreamPriority,
        available_credit: u64,
        redeployable: bool,
        listener: Option<CompletionListener>,
    ) -> bool {
        if self.paths.find(&(slot, peer.clone())).is_some() {
            warn!(
                event = events::GATHER_PATH_ADD_REFUSED,
                component = COMPONENT,
                gatherer = self.name.as_str(),
                slot,
                peer = %peer,
                "refusing duplicate upstream attach"
            );
            self.channel
                .notify(
                    &peer,
                    StreamMessage::ForcedClose {
                        slot,
                        reason: StreamError::CannotAddUpstream,
                    },
                )
                .await;
            return false;
        }

        let mut path = InboundPath::new(slot, peer.clone(), priority, redeployable);
        let granted_credit = self.policy.initial_credit(available_credit, &path);
        path.assigned_credit = granted_credit;

        self.liveness.watch(&peer, slot);
        self.paths.add(path);
        self.assignment.push(0);
        if let Some(listener) = listener {
            self.listeners.push(listener);
        }

        debug!(
            event = events::GATHER_PATH_ADD_OK,
            component = COMPONENT,
            gatherer = self.name.as_str(),
            slot,
            peer = %peer,
            granted_credit,
            redeployable,
            "producer path added"
        );
        self.channel
            .notify(
                original_stage,
                StreamMessage::AckOpen {
                    slot,
                    granted_credit,
                    redeployable,
                },
            )
            .await;
        true
    }

    /// Removes the path for `(slot, peer)`.
    ///
    /// Returns `false` when no such path exists; no notification is sent and
    /// nothing is mutated. On success the assignment entry mirrors the
    /// registry's swap-erase, the liveness watch is dropped, and unless
    /// `silent` the peer is told why it was removed.
    pub async fn remove_path(
        &mut self,
        slot: StreamSlot,
        peer: &PeerHandle,
        reason: StreamError,
        silent: bool,
    ) -> bool {
        let Some((index, removed)) = self.paths.remove(&(slot, peer.clone())) else {
            debug!(
                event = events::GATHER_PATH_REMOVE_MISSING,
                component = COMPONENT,
                gatherer = self.name.as_str(),
                slot,
                peer = %peer,
                "no such producer path"
            );
            return false;
        };
        // Identical swap keeps the vector index-aligned with the registry.
        self.assignment.swap_remove(index);
        self.liveness.unwatch(&removed.peer, slot);

        debug!(
            event = events::GATHER_PATH_REMOVE_OK,
            component = COMPONENT,
            gatherer = self.name.as_str(),
            slot,
            peer = %removed.peer,
            reason = %reason,
            silent,
            "producer path removed"
        );
        if !silent {
            self.channel
                .notify(&removed.peer, StreamMessage::ForcedClose { slot, reason })
                .await;
        }
        true
    }

    /// Funnel for liveness-watch triggers: an unexpectedly terminated peer is
    /// cleaned up through the exact same routine as an explicit removal, with
    /// no notification back to the dead peer.
    pub async fn peer_terminated(&mut self, slot: StreamSlot, peer: &PeerHandle) -> bool {
        debug!(
            event = events::GATHER_PEER_TERMINATED,
            component = COMPONENT,
            gatherer = self.name.as_str(),
            slot,
            peer = %peer,
            "liveness watch reported peer termination"
        );
        self.remove_path(slot, peer, StreamError::PeerUnreachable, true)
            .await
    }

    /// Completes the stage: drops every liveness watch, clears the registry
    /// and assignment vector, and fulfills every pending listener with
    /// `result`. Each listener resolves exactly once.
    pub fn close(&mut self, result: Chunk) {
        debug!(
            event = events::GATHER_CLOSE,
            component = COMPONENT,
            gatherer = self.name.as_str(),
            remaining_paths = self.paths.len(),
            listeners = self.listeners.len(),
            "closing gatherer"
        );
        for path in self.paths.iter() {
            self.liveness.unwatch(&path.peer, path.slot);
        }
        self.paths.take_all();
        self.assignment.clear();
        for listener in self.listeners.drain(..) {
            listener.fulfill(Ok(result.clone()));
        }
    }

    /// Fails the stage: drops every liveness watch, stamps `reason` onto each
    /// path ahead of teardown, clears the registry and assignment vector, and
    /// fulfills every pending listener with `reason` as a failure.
    pub fn abort(&mut self, reason: StreamError) {
        warn!(
            event = events::GATHER_ABORT,
            component = COMPONENT,
            gatherer = self.name.as_str(),
            remaining_paths = self.paths.len(),
            listeners = self.listeners.len(),
            reason = %reason,
            "aborting gatherer"
        );
        for path in self.paths.iter_mut() {
            path.shutdown_reason = Some(reason.clone());
        }
        for path in self.paths.iter() {
            self.liveness.unwatch(&path.peer, path.slot);
        }
        self.paths.take_all();
        self.assignment.clear();
        for listener in self.listeners.drain(..) {
            listener.fulfill(Err(reason.clone()));
        }
    }

    /// Grants pending credit: every assignment entry with a positive amount
    /// produces one credit acknowledgment for its path's peer, granting
    /// exactly that amount. Zero and negative entries are skipped. Pending
    /// amounts are not reset here; the credit policy recomputes them between
    /// passes.
    pub async fn emit_credits(&self) {
        for (path, pending) in self.paths.iter().zip(self.assignment.iter()) {
            if *pending <= 0 {
                continue;
            }
            debug!(
                event = events::GATHER_CREDIT_EMIT,
                component = COMPONENT,
                gatherer = self.name.as_str(),
                slot = path.slot,
                peer = %path.peer,
                amount = *pending,
                "granting credit"
            );
            self.channel
                .notify(
                    &path.peer,
                    StreamMessage::AckBatch {
                        slot: path.slot,
                        new_credit: *pending as u64,
                    },
                )
                .await;
        }
    }

    /// Reads the pending credit for `(slot, peer)`.
    pub fn pending_credit(&self, slot: StreamSlot, peer: &PeerHandle) -> Option<i64> {
        self.assignment_index(slot, peer)
            .map(|index| self.assignment[index])
    }

    /// Sets the pending credit for `(slot, peer)`, the mutation surface used
    /// by the external credit policy between emit passes. Returns `false`
    /// when no such path exists.
    pub fn set_pending_credit(&mut self, slot: StreamSlot, peer: &PeerHandle, amount: i64) -> bool {
        let Some(index) = self.assignment_index(slot, peer) else {
            return false;
        };
        self.assignment[index] = amount;
        true
    }

    fn assignment_index(&self, slot: StreamSlot, peer: &PeerHandle) -> Option<usize> {
        self.paths
            .iter()
            .position(|path| path.slot == slot && path.peer == *peer)
    }
}
