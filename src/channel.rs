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

//! Outbound peer-messaging capability injected into both stream faces.

use crate::message::StreamMessage;
use crate::peer::PeerHandle;
use async_trait::async_trait;

/// Fire-and-forget message channel to peer actors.
///
/// Implementations enqueue `message` into the addressed peer's own processing
/// context and return immediately. They must never wait for a reply inline;
/// any response arrives later as an independently scheduled inbound message.
#[async_trait]
pub trait PeerChannel: Send + Sync {
    /// Enqueues one message for `peer`.
    async fn notify(&self, peer: &PeerHandle, message: StreamMessage);
}
