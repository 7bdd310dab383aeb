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

//! Deferred completion results for callers awaiting stage shutdown.

use crate::message::{Chunk, StreamError};
use tokio::sync::oneshot;

/// Final outcome delivered to completion listeners.
pub type StageOutcome = Result<Chunk, StreamError>;

/// A deferred result handle registered by a caller awaiting stage completion.
///
/// Fulfillment consumes the listener, so each one resolves at most once by
/// construction. A listener dropped without fulfillment closes the paired
/// receiver with a recv error instead of hanging it.
#[derive(Debug)]
pub struct CompletionListener {
    sender: oneshot::Sender<StageOutcome>,
}

impl CompletionListener {
    /// Creates a listener and the receiver a caller awaits on.
    pub fn pair() -> (Self, oneshot::Receiver<StageOutcome>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    /// Resolves the listener with `outcome`.
    ///
    /// A receiver that has already gone away is not an error; the outcome is
    /// simply discarded.
    pub fn fulfill(self, outcome: StageOutcome) {
        let _ = self.sender.send(outcome);
    }
}
