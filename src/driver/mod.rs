//! Batch driver: one input file in, one report out.
//!
//! [`InputConfig`] ─▶ [`run_all`] ─▶ [`MethodRun`] × 5 ─▶ [`write_report`]

pub mod input;
pub mod report;
pub mod run;

pub use input::{InputConfig, InputError};
pub use report::{render, write_report};
pub use run::{run_all, run_method, MethodRun, RunError};
