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

//! Consumer-side fan-out: credit aggregation, batch dispatch, shutdown delivery.

use crate::channel::PeerChannel;
use crate::downstream::path::{DownstreamPath, Filter};
use crate::message::{Batch, Chunk, StreamError, StreamMessage};
use crate::observability::events;
use crate::peer::PeerHandle;
use crate::registry::PathRegistry;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

const COMPONENT: &str = "downstream_mux";

/// Downstream multiplexer fanning batches out to consumer peers.
///
/// One instance lives inside the sequential processing context of a single
/// hosting actor; it holds no locks and is never invoked concurrently with
/// itself. All peer interaction goes through the injected [`PeerChannel`] as
/// asynchronous one-way sends.
pub struct DownstreamMux {
    name: String,
    channel: Arc<dyn PeerChannel>,
    paths: PathRegistry<DownstreamPath>,
    active_filters: HashSet<Filter>,
}

impl DownstreamMux {
    /// Creates an empty multiplexer named `name` for log correlation.
    pub fn new(name: &str, channel: Arc<dyn PeerChannel>) -> Self {
        Self {
            name: name.to_string(),
            channel,
            paths: PathRegistry::new(),
            active_filters: HashSet::new(),
        }
    }

    /// Returns the number of registered consumer paths.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` when no consumers are registered.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Looks up one consumer path without mutating state.
    pub fn path(&self, peer: &PeerHandle) -> Option<&DownstreamPath> {
        self.paths.find(peer)
    }

    /// Looks up one consumer path for mutation, e.g. for credit assignment.
    pub fn path_mut(&mut self, peer: &PeerHandle) -> Option<&mut DownstreamPath> {
        self.paths.find_mut(peer)
    }

    /// Sum of all consumers' open credit.
    pub fn total_credit(&self) -> u64 {
        self.paths.iter().fold(0, |acc, path| acc + path.open_credit)
    }

    /// Largest open credit across consumers, 0 when none are registered.
    pub fn max_credit(&self) -> u64 {
        self.paths
            .iter()
            .fold(0, |acc, path| acc.max(path.open_credit))
    }

    /// Smallest open credit across consumers.
    ///
    /// Returns `u64::MAX` when the registry is empty; the fold's identity
    /// element is the documented result for that boundary, not an error.
    pub fn min_credit(&self) -> u64 {
        self.paths
            .iter()
            .fold(u64::MAX, |acc, path| acc.min(path.open_credit))
    }

    /// Registers a consumer path.
    ///
    /// Returns `false` without mutation when `peer` already has a path;
    /// otherwise inserts the path and recomputes the active filter set.
    pub fn add_path(&mut self, peer: PeerHandle, filter: Filter, redeployable: bool) -> bool {
        if !self
            .paths
            .add(DownstreamPath::new(peer.clone(), filter, redeployable))
        {
            warn!(
                event = events::DOWNSTREAM_PATH_ADD_DUPLICATE,
                component = COMPONENT,
                mux = self.name.as_str(),
                peer = %peer,
                "consumer already registered"
            );
            return false;
        }
        self.recalculate_active_filters();
        debug!(
            event = events::DOWNSTREAM_PATH_ADD_OK,
            component = COMPONENT,
            mux = self.name.as_str(),
            peer = %peer,
            redeployable,
            "consumer path added"
        );
        true
    }

    /// Removes a consumer path and notifies the removed peer with a close.
    ///
    /// Returns `false` when `peer` has no path. Removal swap-erases the path
    /// and recomputes the active filter set, keeping one consistent
    /// filter-maintenance policy for every structural change.
    pub async fn remove_path(&mut self, peer: &PeerHandle) -> bool {
        let Some((_, removed)) = self.paths.remove(peer) else {
            debug!(
                event = events::DOWNSTREAM_PATH_REMOVE_MISSING,
                component = COMPONENT,
                mux = self.name.as_str(),
                peer = %peer,
                "no such consumer path"
            );
            return false;
        };
        self.recalculate_active_filters();
        debug!(
            event = events::DOWNSTREAM_PATH_REMOVE_OK,
            component = COMPONENT,
            mux = self.name.as_str(),
            peer = %removed.peer,
            "consumer path removed"
        );
        self.channel.notify(&removed.peer, StreamMessage::Close).await;
        true
    }

    /// Gracefully closes the stream: one close notification per remaining
    /// consumer, then the registry is cleared. Calling this again on an empty
    /// multiplexer sends nothing.
    pub async fn close(&mut self) {
        let remaining = self.paths.take_all();
        debug!(
            event = events::DOWNSTREAM_CLOSE,
            component = COMPONENT,
            mux = self.name.as_str(),
            remaining_paths = remaining.len(),
            "closing downstream"
        );
        for path in remaining {
            self.channel.notify(&path.peer, StreamMessage::Close).await;
        }
        self.recalculate_active_filters();
    }

    /// Propagates a failure to every consumer except `cause`.
    ///
    /// The peer whose failure triggered the abort must not be told about its
    /// own failure. The registry is intentionally left intact; a host that
    /// discards the stage clears it separately.
    pub async fn abort(&self, cause: &PeerHandle, reason: StreamError) {
        warn!(
            event = events::DOWNSTREAM_ABORT,
            component = COMPONENT,
            mux = self.name.as_str(),
            cause = %cause,
            reason = %reason,
            "aborting downstream"
        );
        for path in self.paths.iter() {
            if path.peer != *cause {
                self.channel
                    .notify(
                        &path.peer,
                        StreamMessage::Abort {
                            reason: reason.clone(),
                        },
                    )
                    .await;
            }
        }
    }

    /// Sends one batch to `peer`, allocating the path's next batch id.
    ///
    /// When the path is redeployable the batch is retained in its
    /// unacknowledged queue before dispatch. Dispatch is fire-and-forget.
    /// Returns the allocated batch id, or `None` when `peer` has no path.
    pub async fn send_batch(
        &mut self,
        peer: &PeerHandle,
        chunk_size: u32,
        chunk: Chunk,
    ) -> Option<u64> {
        let Some(path) = self.paths.find_mut(peer) else {
            warn!(
                event = events::DOWNSTREAM_BATCH_NO_PATH,
                component = COMPONENT,
                mux = self.name.as_str(),
                peer = %peer,
                "dropping batch for unknown consumer"
            );
            return None;
        };
        let batch_id = path.next_batch_id;
        path.next_batch_id += 1;
        let batch = Batch {
            size: chunk_size,
            id: batch_id,
            chunk,
        };
        if path.redeployable {
            path.unacknowledged_batches.push_back((batch_id, batch.clone()));
        }
        let dest = path.peer.clone();
        debug!(
            event = events::DOWNSTREAM_BATCH_SEND,
            component = COMPONENT,
            mux = self.name.as_str(),
            peer = %dest,
            batch_id,
            chunk_size,
            "dispatching batch"
        );
        self.channel.notify(&dest, StreamMessage::Batch(batch)).await;
        Some(batch_id)
    }

    /// Reorders the registry descending by open credit so outbound scheduling
    /// can prefer consumers with the most slack. Stability between
    /// equal-credit consumers is not guaranteed.
    pub fn sort_by_credit(&mut self) {
        self.paths
            .sort_unstable_by(|a, b| b.open_credit.cmp(&a.open_credit));
    }

    /// Union of all current consumers' filters, recomputed wholesale on every
    /// structural change to rule out drift from the registry.
    pub fn active_filters(&self) -> &HashSet<Filter> {
        &self.active_filters
    }

    /// Paths in current registry order, e.g. for scheduling after
    /// [`sort_by_credit`][Self::sort_by_credit].
    pub fn paths(&self) -> impl Iterator<Item = &DownstreamPath> {
        self.paths.iter()
    }

    fn recalculate_active_filters(&mut self) {
        self.active_filters.clear();
        for path in self.paths.iter() {
            self.active_filters.insert(path.filter.clone());
        }
    }
}
