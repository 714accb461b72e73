//! Playback queue and history core: an ordered, mutable sequence of
//! tracks with a current-position pointer that stays consistent across
//! insertion, removal, reordering, shuffling, searching, and
//! advancement. Queue state is session-scoped; only the library folder
//! list is persisted.

pub mod config;
pub mod library;
pub mod model;
pub mod queue;
pub mod reorder;
pub mod search;
