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

//! Pluggable credit-assignment policy seam.

use crate::gatherer::path::InboundPath;

/// Decides how much credit a stage grants to its producers.
///
/// The numeric policy is an external collaborator: this engine only invokes
/// it when a path opens and exposes the pending-credit assignment surface for
/// recompute cycles between [`Gatherer::emit_credits`][crate::Gatherer::emit_credits]
/// calls.
pub trait CreditPolicy: Send + Sync {
    /// Computes the credit granted to a newly opened inbound path.
    ///
    /// `requested` is the credit the producer asked for at attach time.
    fn initial_credit(&self, requested: u64, path: &InboundPath) -> u64;
}

/// Grants requested credit clamped to a fixed per-path cap.
pub struct FixedCreditPolicy {
    cap: u64,
}

impl FixedCreditPolicy {
    /// Creates a policy granting at most `cap` units per path.
    pub fn new(cap: u64) -> Self {
        Self { cap }
    }
}

impl CreditPolicy for FixedCreditPolicy {
    fn initial_credit(&self, requested: u64, _path: &InboundPath) -> u64 {
        requested.min(self.cap)
    }
}
