//! Progress bands
//!
//! Overall progress is partitioned into one fixed 20-point band per phase
//! so a caller can render a single bar across the whole run. Progress never
//! decreases within a run.

use crate::workflow::WorkflowPhase;

/// The progress band a phase occupies, as (start, end)
pub fn band(phase: WorkflowPhase) -> (u8, u8) {
    match phase {
        WorkflowPhase::Idle => (0, 0),
        WorkflowPhase::ContentGeneration => (0, 20),
        WorkflowPhase::ImageGeneration => (20, 40),
        WorkflowPhase::ContentEnhancement => (40, 60),
        WorkflowPhase::Interlinking => (60, 80),
        WorkflowPhase::PublishingPreparation => (80, 100),
        WorkflowPhase::Completed | WorkflowPhase::Failed => (100, 100),
    }
}

/// Progress for a fraction of a phase's band, clamped to the band
pub fn within_band(phase: WorkflowPhase, fraction: f64) -> u8 {
    let (start, end) = band(phase);
    let span = f64::from(end - start);
    let offset = (span * fraction.clamp(0.0, 1.0)).round() as u8;
    (start + offset).min(end)
}
