//! Tessera scheduling crate.
//!
//! This crate owns the cooperative, frame-budgeted task scheduling used to
//! spread expensive tile work (fetching, decoding, tile object creation)
//! across render frames without dropping below a target frame rate.
//!
//! Layering, leaves first:
//! - [`queue`]: a pure priority/expiry queue partitioned into groups; no
//!   notion of frames or time.
//! - [`sched`]: wraps one queue, adds the per-frame time budget and the
//!   group service order.
//! - [`time`]: frame clock and interval helpers every host loop needs to
//!   call the scheduler correctly.

pub mod queue;
pub mod sched;
pub mod time;

pub mod logging;
