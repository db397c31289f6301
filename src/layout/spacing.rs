//! # Vertical Spacing
//!
//! Decides the gap between rows and where the block of rows starts inside
//! the content band. Rows never shrink; only the gaps flex. When there is
//! room, gaps grow up to `max_spacing` and the block is centered. When
//! there isn't, gaps clamp to `min_spacing` and the block is allowed to run
//! past the band.

use serde::Serialize;

/// Outcome of distributing the band's free space between rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingDecision {
    /// Gap between consecutive rows.
    pub spacing: f64,
    /// Distance from the top of the band to the first row. Never negative.
    pub offset: f64,
    /// Sum of row heights plus all gaps.
    pub content_height: f64,
    /// The rows do not fit in the band even at minimum spacing.
    pub overflows: bool,
}

/// Distribute `available` height between rows of the given heights.
pub fn distribute(
    row_heights: &[f64],
    available: f64,
    min_spacing: f64,
    max_spacing: f64,
) -> SpacingDecision {
    let total_required: f64 = row_heights.iter().sum();
    let gaps = row_heights.len().saturating_sub(1);

    // Zero or one row: there is nothing to space, only to center.
    let spacing = if gaps == 0 {
        0.0
    } else {
        let min_total = gaps as f64 * min_spacing;
        if total_required + min_total <= available {
            max_spacing.min((available - total_required) / gaps as f64)
        } else {
            min_spacing
        }
    };

    let content_height = total_required + gaps as f64 * spacing;
    let offset = ((available - content_height) / 2.0).max(0.0);

    SpacingDecision {
        spacing,
        offset,
        content_height,
        overflows: content_height > available,
    }
}
