// common helpers
pub mod algorithms;
pub mod report;
pub mod errors;
pub mod history;
pub(crate) mod config;
pub(crate) mod signs;
pub(crate) mod common;

// algorithms
pub mod bisection;
pub mod fixed_point;
pub mod newton;
pub mod secant;
pub mod regula_falsi;
