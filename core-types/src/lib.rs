// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! Shared types for the occupancy history core.
//!
//! The crate exposes:
//! - [`OccupancySnapshot`]: the occupancy of every monitored slot at one instant.
//! - [`TimeSlotCatalog`]: the fixed ordered catalog of time-of-day labels a
//!   day's records are keyed against.
//! - [`StatusHandle`]: the health surface each managed component publishes
//!   through.
//! - [`fixtures`]: random data generators for tests and demos.

pub mod catalog;
pub mod fixtures;
pub mod snapshot;
pub mod status;

pub use catalog::{CatalogError, TimeSlotCatalog, DEFAULT_TIME_LABELS};
pub use snapshot::OccupancySnapshot;
pub use status::{Health, StatusGauge, StatusHandle, StatusSnapshot};
