// Copyright (c) James Kassemi, SC, US. All rights reserved.

//! Multi-rate sampling engine.
//!
//! One background task ticks at a base frequency, invokes the sampling
//! callback every tick, and drives registered secondary tasks at
//! sub-multiples of the base rate. The crate exposes:
//! - [`Scheduler`]: the tick loop and its lifecycle (start, gated start,
//!   bounded stop).
//! - [`SharedSnapshot`]: the atomically-swapped latest-snapshot cell shared
//!   between the sampling source and readers.
//! - [`SlotBoundaryGate`]: the at-most-once-per-half-hour recording latch.
//! - [`UpdateQueue`]: fire-and-forget callback handoff to a presentation
//!   collaborator's own thread.

pub mod error;
pub mod gate;
pub mod queue;
pub mod scheduler;
pub mod shared;

pub use error::{CallbackError, SchedulerError};
pub use gate::SlotBoundaryGate;
pub use queue::{update_queue, UpdateDrain, UpdateQueue, UpdateTask};
pub use scheduler::{Scheduler, SchedulerConfig};
pub use shared::SharedSnapshot;
