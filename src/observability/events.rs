//! Canonical structured event names used across `stage-flow`.

// Downstream multiplexer events.
pub const DOWNSTREAM_PATH_ADD_OK: &str = "downstream_path_add_ok";
pub const DOWNSTREAM_PATH_ADD_DUPLICATE: &str = "downstream_path_add_duplicate";
pub const DOWNSTREAM_PATH_REMOVE_OK: &str = "downstream_path_remove_ok";
pub const DOWNSTREAM_PATH_REMOVE_MISSING: &str = "downstream_path_remove_missing";
pub const DOWNSTREAM_CLOSE: &str = "downstream_close";
pub const DOWNSTREAM_ABORT: &str = "downstream_abort";
pub const DOWNSTREAM_BATCH_SEND: &str = "downstream_batch_send";
pub const DOWNSTREAM_BATCH_NO_PATH: &str = "downstream_batch_no_path";

// Gatherer events.
pub const GATHER_PATH_ADD_OK: &str = "gather_path_add_ok";
pub const GATHER_PATH_ADD_REFUSED: &str = "gather_path_add_refused";
pub const GATHER_PATH_REMOVE_OK: &str = "gather_path_remove_ok";
pub const GATHER_PATH_REMOVE_MISSING: &str = "gather_path_remove_missing";
pub const GATHER_CLOSE: &str = "gather_close";
pub const GATHER_ABORT: &str = "gather_abort";
pub const GATHER_CREDIT_EMIT: &str = "gather_credit_emit";
pub const GATHER_PEER_TERMINATED: &str = "gather_peer_terminated";
