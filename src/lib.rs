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

//! # stage-flow
//!
//! `stage-flow` implements credit-based flow control for a multi-peer
//! streaming pipeline stage hosted inside an actor-style runtime.
//!
//! A stage has two faces: a [`DownstreamMux`] fanning batches out to consumer
//! peers, and a [`Gatherer`] collecting data from producer peers. Both manage
//! a dynamic set of peer paths, account per-path credit, and guarantee
//! at-most-once shutdown delivery to peers and completion listeners when
//! peers disconnect or fail mid-stream.
//!
//! The engine is a library consumed by a hosting actor. The surrounding
//! scheduler, the wire encoding, and the numeric credit computation are
//! external collaborators injected as capabilities: [`PeerChannel`] for
//! fire-and-forget peer messaging, [`LivenessWatch`] for peer-termination
//! detection, and [`CreditPolicy`] for grant sizing.
//!
//! ## Downstream fan-out
//!
//! ```
//! use stage_flow::{DownstreamMux, PeerChannel, PeerHandle, StreamMessage};
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct NoopChannel;
//!
//! #[async_trait]
//! impl PeerChannel for NoopChannel {
//!     async fn notify(&self, _peer: &PeerHandle, _message: StreamMessage) {}
//! }
//!
//! let mut mux = DownstreamMux::new("doc-mux", Arc::new(NoopChannel));
//! let fast = PeerHandle::new("fast-consumer");
//! let slow = PeerHandle::new("slow-consumer");
//!
//! assert!(mux.add_path(fast.clone(), vec!["video".to_string()], false));
//! assert!(mux.add_path(slow.clone(), vec!["audio".to_string()], true));
//! assert!(!mux.add_path(fast.clone(), vec![], false));
//!
//! mux.path_mut(&fast).unwrap().open_credit = 8;
//! mux.path_mut(&slow).unwrap().open_credit = 2;
//!
//! assert_eq!(mux.total_credit(), 10);
//! mux.sort_by_credit();
//! assert_eq!(mux.paths().next().unwrap().peer, fast);
//! ```
//!
//! ## Gathering with completion listeners
//!
//! ```
//! use stage_flow::{
//!     CompletionListener, FixedCreditPolicy, Gatherer, LivenessWatch, PeerChannel,
//!     PeerHandle, StreamMessage, StreamPriority, StreamSlot,
//! };
//! use async_trait::async_trait;
//! use std::sync::Arc;
//!
//! struct NoopChannel;
//!
//! #[async_trait]
//! impl PeerChannel for NoopChannel {
//!     async fn notify(&self, _peer: &PeerHandle, _message: StreamMessage) {}
//! }
//!
//! struct NoopLiveness;
//!
//! impl LivenessWatch for NoopLiveness {
//!     fn watch(&self, _peer: &PeerHandle, _slot: StreamSlot) {}
//!     fn unwatch(&self, _peer: &PeerHandle, _slot: StreamSlot) {}
//! }
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut gatherer = Gatherer::new(
//!     "doc-gatherer",
//!     Arc::new(NoopChannel),
//!     Arc::new(NoopLiveness),
//!     Arc::new(FixedCreditPolicy::new(32)),
//! );
//! let producer = PeerHandle::new("producer");
//! let stage = PeerHandle::new("stage");
//! let (listener, outcome) = CompletionListener::pair();
//!
//! assert!(
//!     gatherer
//!         .add_path(0, producer, &stage, StreamPriority::Normal, 64, false, Some(listener))
//!         .await
//! );
//!
//! gatherer.close(Arc::new(b"done".to_vec()));
//! assert_eq!(outcome.await.unwrap(), Ok(Arc::new(b"done".to_vec())));
//! # });
//! ```
//!
//! ## Internal architecture map
//!
//! - Capabilities: [`PeerChannel`], [`LivenessWatch`], [`CreditPolicy`],
//!   [`CompletionListener`]
//! - Shared storage: [`PathRegistry`] with identity lookup and swap-erase
//!   removal
//! - Downstream face: consumer paths, credit aggregation, batch sequencing
//! - Gatherer face: producer paths, assignment vector, listener fulfillment
//!
//! ## Observability model
//!
//! The crate uses `tracing` for logs/events. Library code emits structured
//! events and does not initialize a global subscriber; hosts and tests are
//! responsible for one-time `tracing_subscriber` initialization at process
//! boundaries.

mod channel;
pub use channel::PeerChannel;

mod peer;
pub use peer::PeerHandle;

mod message;
pub use message::{Batch, Chunk, StreamError, StreamMessage, StreamSlot};

mod listener;
pub use listener::{CompletionListener, StageOutcome};

mod liveness;
pub use liveness::LivenessWatch;

mod policy;
pub use policy::{CreditPolicy, FixedCreditPolicy};

mod registry;
pub use registry::{Keyed, PathRegistry};

mod downstream;
pub use downstream::{DownstreamMux, DownstreamPath, Filter, FilterToken};

mod gatherer;
pub use gatherer::{Gatherer, InboundPath, StreamPriority};

#[doc(hidden)]
pub mod observability;
