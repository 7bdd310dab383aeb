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

//! Stream control and data messages exchanged with peer actors.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Identifier for one logical input stream feeding a stage.
pub type StreamSlot = u64;

/// Opaque payload carried by a batch or delivered as a stage result.
///
/// The wire encoding of chunk contents is owned by the hosting transport.
pub type Chunk = Arc<Vec<u8>>;

/// One tagged unit of data sent on a path.
///
/// `id` is allocated per path and is strictly increasing starting at 0.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Batch {
    /// Number of data items contained in `chunk`.
    pub size: u32,
    /// Per-path sequence id.
    pub id: u64,
    /// The payload itself.
    pub chunk: Chunk,
}

/// Stream-level failure reasons carried by abort and refusal messages.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StreamError {
    /// A peer attempted to attach a slot/peer pair that is already registered.
    CannotAddUpstream,
    /// A watched peer terminated while its stream was still live.
    PeerUnreachable,
    /// The hosting stage gave up on the stream.
    StageFailed(String),
}

impl Display for StreamError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamError::CannotAddUpstream => {
                write!(f, "cannot add upstream: slot and peer already registered")
            }
            StreamError::PeerUnreachable => write!(f, "peer terminated unexpectedly"),
            StreamError::StageFailed(cause) => write!(f, "stage failed: {cause}"),
        }
    }
}

impl Error for StreamError {}

/// Messages this engine sends to peer actors.
///
/// Every variant is delivered through [`PeerChannel::notify`][crate::PeerChannel::notify]
/// as an asynchronous one-way send; none of them solicit an inline reply.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StreamMessage {
    /// Acknowledges a successful upstream attach, carrying the initial grant.
    AckOpen {
        /// Slot the new path feeds.
        slot: StreamSlot,
        /// Credit granted by the stage's credit policy.
        granted_credit: u64,
        /// Whether sent batches are retained for redeploy after failure.
        redeployable: bool,
    },
    /// Data delivery on a downstream path.
    Batch(Batch),
    /// Grants additional credit to an upstream peer.
    AckBatch {
        /// Slot the grant applies to.
        slot: StreamSlot,
        /// Amount of further data units the peer may send.
        new_credit: u64,
    },
    /// Graceful end of stream.
    Close,
    /// Unrecoverable stage failure propagated to remaining peers.
    Abort {
        /// Why the stage aborted.
        reason: StreamError,
    },
    /// Single-path shutdown, including protocol refusals on attach.
    ForcedClose {
        /// Slot of the affected path.
        slot: StreamSlot,
        /// Why the path was shut down.
        reason: StreamError,
    },
}

#[cfg(test)]
mod tests {
    use super::StreamError;

    #[test]
    fn stream_error_display_is_stable() {
        assert_eq!(
            StreamError::CannotAddUpstream.to_string(),
            "cannot add upstream: slot and peer already registered"
        );
        assert_eq!(
            StreamError::StageFailed("oom".to_string()).to_string(),
            "stage failed: oom"
        );
    }
}
