//! Flow-field curve model: generation, per-frame geometry, wraparound and the frame engine.

/// Tuning constants and reading direction.
pub mod config;
/// Curve record and population.
pub mod curve;
/// Frame updater.
pub mod engine;
/// Curve generator.
pub mod generator;
pub mod geometry;
/// Wraparound policy.
pub mod wrap;
