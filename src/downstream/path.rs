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

//! Per-consumer connection state for the downstream face.

use crate::message::Batch;
use crate::peer::PeerHandle;
use crate::registry::Keyed;
use std::collections::VecDeque;

/// One classifier token a consumer subscribes to.
pub type FilterToken = String;

/// Ordered classifier sequence describing what a consumer wants to receive.
pub type Filter = Vec<FilterToken>;

/// State of one consumer connection, exclusively owned by its registry.
#[derive(Debug)]
pub struct DownstreamPath {
    /// Identity of the connected consumer actor.
    pub peer: PeerHandle,
    /// Classifier tokens this consumer is interested in.
    pub filter: Filter,
    /// Amount of further data units the consumer currently permits.
    pub open_credit: u64,
    /// Whether sent batches are retained until acknowledged for redeploy.
    pub redeployable: bool,
    /// Sequence id assigned to the next outgoing batch. Never decreases.
    pub next_batch_id: u64,
    /// Sent-but-unacknowledged batches, oldest first. Populated only when
    /// `redeployable` is set.
    pub unacknowledged_batches: VecDeque<(u64, Batch)>,
}

impl DownstreamPath {
    pub(crate) fn new(peer: PeerHandle, filter: Filter, redeployable: bool) -> Self {
        Self {
            peer,
            filter,
            open_credit: 0,
            redeployable,
            next_batch_id: 0,
            unacknowledged_batches: VecDeque::new(),
        }
    }

    /// Drops retained batches with id `<= up_to_id`, returning how many were
    /// released. Retained batches are ordered by id, so this pops from the
    /// front only.
    pub fn acknowledge_batches(&mut self, up_to_id: u64) -> usize {
        let mut released = 0;
        while let Some((id, _)) = self.unacknowledged_batches.front() {
            if *id > up_to_id {
                break;
            }
            self.unacknowledged_batches.pop_front();
            released += 1;
        }
        released
    }
}

impl Keyed for DownstreamPath {
    type Key = PeerHandle;

    fn key(&self) -> PeerHandle {
        self.peer.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::DownstreamPath;
    use crate::message::Batch;
    use crate::peer::PeerHandle;
    use std::sync::Arc;

    fn retained(id: u64) -> (u64, Batch) {
        (
            id,
            Batch {
                size: 1,
                id,
                chunk: Arc::new(vec![id as u8]),
            },
        )
    }

    #[test]
    fn acknowledge_batches_releases_up_to_requested_id() {
        let mut path = DownstreamPath::new(PeerHandle::new("consumer"), vec![], true);
        path.unacknowledged_batches.extend([retained(0), retained(1), retained(2)]);

        assert_eq!(path.acknowledge_batches(1), 2);
        assert_eq!(path.unacknowledged_batches.len(), 1);
        assert_eq!(path.unacknowledged_batches[0].0, 2);
    }

    #[test]
    fn acknowledge_batches_with_no_retention_is_a_noop() {
        let mut path = DownstreamPath::new(PeerHandle::new("consumer"), vec![], false);

        assert_eq!(path.acknowledge_batches(10), 0);
    }
}
