//! Application-level orchestration utilities.
//!
//! This module owns the calculation lifecycle (compute, reveal delay, record)
//! and post-calculation processing such as benchmark comparison and stats
//! refresh. CLI layers call into this module to keep responsibilities
//! separated.

mod controller;
mod post_process;

pub(crate) use controller::{run_calculation, CalcRequest, SleepDelay};
pub(crate) use post_process::{process_calculation, ProcessedCalculation};
