//! Bounded occupancy history for the sampling core.
//!
//! The crate exposes:
//! - [`HistoryStore`]: fixed-capacity ring buffer of recorded days with
//!   write-through persistence and on-demand aggregation.
//! - [`Day`] / [`TimeSlotRecord`]: the recorded tree, one snapshot per
//!   catalog time slot.
//! - [`HistoryConfig`]: construction-supplied capacities, catalog, and state
//!   paths.

pub mod config;
pub mod day;
pub mod document;
pub mod error;
pub mod render;
pub mod store;

pub use config::{HistoryConfig, DEFAULT_DAY_CAPACITY, DEFAULT_SLOT_COUNT};
pub use day::{Day, TimeSlotRecord};
pub use document::{decode_spots, encode_spots};
pub use error::{Result, StoreError};
pub use store::HistoryStore;
