pub mod expression;
pub mod root_finding;
pub mod driver;
