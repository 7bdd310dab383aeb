use async_trait::async_trait;
use stage_flow::{LivenessWatch, PeerChannel, PeerHandle, StreamMessage, StreamSlot};
use std::sync::{Arc, Mutex};

pub(crate) fn init_logging() {
    let _ = tracing_subscriber::fmt::try_init();
}

/// Records every outbound notification so tests can assert on delivery
/// counts and per-peer message sequences.
#[derive(Default)]
pub(crate) struct RecordingChannel {
    sent: Mutex<Vec<(PeerHandle, StreamMessage)>>,
}

impl RecordingChannel {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn sent_to(&self, peer: &PeerHandle) -> Vec<StreamMessage> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(dest, _)| dest == peer)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub(crate) fn total_sent(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl PeerChannel for RecordingChannel {
    async fn notify(&self, peer: &PeerHandle, message: StreamMessage) {
        self.sent.lock().unwrap().push((peer.clone(), message));
    }
}

/// Tracks active liveness watches so tests can assert registration and
/// deregistration stay balanced across path lifecycles.
#[derive(Default)]
#[allow(dead_code)]
pub(crate) struct RecordingLiveness {
    active: Mutex<Vec<(PeerHandle, StreamSlot)>>,
}

#[allow(dead_code)]
impl RecordingLiveness {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn active_watches(&self) -> usize {
        self.active.lock().unwrap().len()
    }
}

impl LivenessWatch for RecordingLiveness {
    fn watch(&self, peer: &PeerHandle, slot: StreamSlot) {
        self.active.lock().unwrap().push((peer.clone(), slot));
    }

    fn unwatch(&self, peer: &PeerHandle, slot: StreamSlot) {
        self.active
            .lock()
            .unwrap()
            .retain(|(p, s)| !(p == peer && *s == slot));
    }
}
