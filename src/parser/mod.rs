pub mod reply;

pub use reply::{answer_from_reply, enforce_cardinality, normalize_reply, valid_keys_in_reply};
