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

//! Liveness-watch capability for detecting unexpected peer termination.

use crate::message::StreamSlot;
use crate::peer::PeerHandle;

/// External subsystem that observes peer termination.
///
/// The gatherer registers a watch when a path is added and deregisters it on
/// every removal route (explicit remove, close, abort). When a watched peer
/// terminates, the host is expected to call
/// [`Gatherer::peer_terminated`][crate::Gatherer::peer_terminated], which
/// funnels into the same cleanup as an explicit removal. This callback route
/// is the sole cancellation mechanism; there are no timeouts in this engine.
pub trait LivenessWatch: Send + Sync {
    /// Starts watching `peer` on behalf of the path feeding `slot`.
    fn watch(&self, peer: &PeerHandle, slot: StreamSlot);

    /// Stops watching `peer` for `slot`. Must tolerate unknown pairs.
    fn unwatch(&self, peer: &PeerHandle, slot: StreamSlot);
}
