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

//! Identity handles for connected peer actors.

use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

struct PeerInner {
    name: String,
    correlation_id: Uuid,
}

///
/// [`PeerHandle`] is the stable identity of one connected peer actor.
///
/// Two handles are equal only when they were cloned from the same original
/// handle; equality and hashing are by allocation identity, never by the
/// display name. Cloning is cheap and both clones address the same peer.
///
/// # Examples
///
/// ```
/// use stage_flow::PeerHandle;
///
/// let consumer = PeerHandle::new("consumer-a");
/// let same = consumer.clone();
/// let other = PeerHandle::new("consumer-a");
///
/// assert_eq!(consumer, same);
/// assert_ne!(consumer, other);
/// ```
#[derive(Clone)]
pub struct PeerHandle {
    inner: Arc<PeerInner>,
}

impl PeerHandle {
    /// Creates a fresh handle with a new correlation id.
    pub fn new(name: &str) -> Self {
        Self {
            inner: Arc::new(PeerInner {
                name: name.to_string(),
                correlation_id: Uuid::new_v4(),
            }),
        }
    }

    /// Returns the human-readable peer name used in logs.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the unique correlation id for structured log fields.
    pub fn correlation_id(&self) -> Uuid {
        self.inner.correlation_id
    }
}

impl Hash for PeerHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.inner).hash(state);
    }
}

impl PartialEq for PeerHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for PeerHandle {}

impl Debug for PeerHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeerHandle")
            .field("name", &self.inner.name)
            .field("correlation_id", &self.inner.correlation_id)
            .finish()
    }
}

impl Display for PeerHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.inner.name, self.inner.correlation_id)
    }
}
