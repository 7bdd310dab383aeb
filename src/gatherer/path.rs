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

//! Per-producer connection state for the gatherer face.

use crate::message::{StreamError, StreamSlot};
use crate::peer::PeerHandle;
use crate::registry::Keyed;

/// Scheduling weight a producer was attached with.
#[derive(Clone, Copy, Debug, Default, Eq, Ord, PartialEq, PartialOrd)]
pub enum StreamPriority {
    VeryLow,
    Low,
    #[default]
    Normal,
    High,
    VeryHigh,
}

/// State of one producer connection, exclusively owned by its registry.
#[derive(Debug)]
pub struct InboundPath {
    /// Logical input stream within the stage this path feeds.
    pub slot: StreamSlot,
    /// Identity of the connected producer actor.
    pub peer: PeerHandle,
    /// Scheduling weight requested at attach time.
    pub priority: StreamPriority,
    /// Credit currently granted to the producer.
    pub assigned_credit: u64,
    /// Whether the producer retains sent batches for redeploy.
    pub redeployable: bool,
    /// Stamped on stage abort. Only observable during teardown itself; the
    /// registry is cleared immediately afterwards.
    pub shutdown_reason: Option<StreamError>,
}

impl InboundPath {
    pub(crate) fn new(
        slot: StreamSlot,
        peer: PeerHandle,
        priority: StreamPriority,
        redeployable: bool,
    ) -> Self {
        Self {
            slot,
            peer,
            priority,
            assigned_credit: 0,
            redeployable,
            shutdown_reason: None,
        }
    }
}

impl Keyed for InboundPath {
    type Key = (StreamSlot, PeerHandle);

    fn key(&self) -> (StreamSlot, PeerHandle) {
        (self.slot, self.peer.clone())
    }
}
