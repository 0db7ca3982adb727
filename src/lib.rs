//! Conditional-visibility rule engine and readiness scoring for assessment
//! forms. The engine consumes a form schema and an answer set, and produces a
//! per-question visibility map plus a normalized 0-100 readiness score; form
//! rendering, persistence, and tier selection live in downstream layers.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
