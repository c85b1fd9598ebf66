// 🍩 Ring Chart - proportional arc geometry for the report screen
//
// Maps weighted items onto a ring: each item gets `magnitude / total * 360`
// degrees, laid end to end starting at 12 o'clock (-90°). Angles follow the
// usual canvas convention: 0° is 3 o'clock and positive sweeps go clockwise.
//
// Total policy: the caller's total is trusted but must cover the item sum.
// A total larger than the sum leaves an undrawn gap at the end of the ring;
// pass `report_total(items)` to close the ring.

use crate::entities::{signed_amount_label, ReportItem, Rgb, TransactionKind};
use serde::Serialize;
use thiserror::Error;

/// Reference angle of the first segment (12 o'clock)
pub const START_ANGLE_DEG: f64 = -90.0;

/// Relative slack allowed when the item sum is compared against the total
const SUM_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid chart input: {0}")]
    InvalidInput(String),
}

// ============================================================================
// ARC SEGMENTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArcSegment {
    pub label: String,
    pub color: Rgb,
    pub start_angle_deg: f64,
    pub sweep_angle_deg: f64,
}

impl ArcSegment {
    pub fn end_angle_deg(&self) -> f64 {
        self.start_angle_deg + self.sweep_angle_deg
    }
}

/// Sum of item magnitudes; the total that yields a closed ring
pub fn report_total(items: &[ReportItem]) -> f64 {
    items.iter().map(|item| item.magnitude).sum()
}

/// Converts a weighted breakdown into contiguous arc segments.
///
/// Fails with `InvalidInput` when the total is not a positive finite
/// number, when a magnitude is negative or not finite, or when the items
/// add up to more than the total.
pub fn arc_segments(total: f64, items: &[ReportItem]) -> Result<Vec<ArcSegment>, ChartError> {
    if !total.is_finite() || total <= 0.0 {
        return Err(ChartError::InvalidInput(format!(
            "total must be a positive finite number, got {}",
            total
        )));
    }

    if let Some(bad) = items
        .iter()
        .find(|item| !item.magnitude.is_finite() || item.magnitude < 0.0)
    {
        return Err(ChartError::InvalidInput(format!(
            "magnitude of {:?} must be finite and non-negative, got {}",
            bad.name, bad.magnitude
        )));
    }

    let sum = report_total(items);
    if sum > total * (1.0 + SUM_EPSILON) {
        return Err(ChartError::InvalidInput(format!(
            "items add up to {} which exceeds total {}",
            sum, total
        )));
    }

    let mut running = START_ANGLE_DEG;
    let segments = items
        .iter()
        .map(|item| {
            let sweep = item.magnitude / total * 360.0;
            let segment = ArcSegment {
                label: item.name.clone(),
                color: item.color,
                start_angle_deg: running,
                sweep_angle_deg: sweep,
            };
            running += sweep;
            segment
        })
        .collect();

    Ok(segments)
}

// ============================================================================
// LIST VIEW (rows under the ring)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub label: String,
    pub color: Rgb,
    /// "- Ksh 120" / "+ Ksh 5000"
    pub amount_label: String,
    /// Share of the item sum, 0..=100
    pub share_percent: f64,
}

pub fn list_rows(items: &[ReportItem], kind: TransactionKind) -> Vec<ReportRow> {
    let sum = report_total(items);
    items
        .iter()
        .map(|item| ReportRow {
            label: item.name.clone(),
            color: item.color,
            amount_label: signed_amount_label(kind, item.magnitude),
            share_percent: if sum > 0.0 {
                item.magnitude / sum * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

// ============================================================================
// RENDERING SURFACE
// ============================================================================

/// Anything that can stroke circles and arcs. The terminal canvas is one
/// implementation; tests record the calls.
pub trait RingSurface {
    fn draw_track(&mut self, radius: f64, stroke_width: f64, color: Rgb);
    fn draw_arc(&mut self, start_deg: f64, sweep_deg: f64, radius: f64, stroke_width: f64, color: Rgb);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingStyle {
    pub radius: f64,
    pub stroke_width: f64,
    pub track_color: Rgb,
}

impl Default for RingStyle {
    fn default() -> Self {
        RingStyle {
            radius: 1.0,
            stroke_width: 0.25,
            track_color: Rgb(0xF5F5F5),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RingOutcome {
    Drawn(Vec<ArcSegment>),
    /// Input was rejected; only the empty track was drawn
    Placeholder(ChartError),
}

/// Draws the background track and then every segment. Invalid input
/// degrades to an empty ring instead of failing the frame.
pub fn draw_ring<S: RingSurface + ?Sized>(
    surface: &mut S,
    total: f64,
    items: &[ReportItem],
    style: &RingStyle,
) -> RingOutcome {
    surface.draw_track(style.radius, style.stroke_width, style.track_color);

    match arc_segments(total, items) {
        Ok(segments) => {
            for segment in &segments {
                surface.draw_arc(
                    segment.start_angle_deg,
                    segment.sweep_angle_deg,
                    style.radius,
                    style.stroke_width,
                    segment.color,
                );
            }
            RingOutcome::Drawn(segments)
        }
        Err(err) => {
            tracing::debug!("ring chart falls back to placeholder: {}", err);
            RingOutcome::Placeholder(err)
        }
    }
}

/// Upper bound on samples per arc, whatever `step_deg` asks for
const MAX_ARC_STEPS: f64 = 3600.0;

/// Samples points along an arc in a y-up frame (12 o'clock is `(0, radius)`).
/// Always includes both ends; `step_deg` bounds the spacing between points,
/// up to `MAX_ARC_STEPS` samples.
pub fn arc_points(start_deg: f64, sweep_deg: f64, radius: f64, step_deg: f64) -> Vec<(f64, f64)> {
    if !sweep_deg.is_finite() || !start_deg.is_finite() || step_deg.is_nan() || step_deg <= 0.0 {
        return Vec::new();
    }

    let steps = (sweep_deg.abs() / step_deg).ceil().clamp(1.0, MAX_ARC_STEPS) as usize;
    (0..=steps)
        .map(|i| {
            let angle = (start_deg + sweep_deg * i as f64 / steps as f64).to_radians();
            (radius * angle.cos(), -radius * angle.sin())
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn expense_items() -> Vec<ReportItem> {
        vec![
            ReportItem::new("Shopping", 120.0, Rgb(0xFFA500)),
            ReportItem::new("Subscription", 80.0, Rgb(0x9370DB)),
            ReportItem::new("Food", 32.0, Rgb(0xFF6347)),
        ]
    }

    #[derive(Default)]
    struct Recorder {
        tracks: usize,
        arcs: Vec<(f64, f64, Rgb)>,
    }

    impl RingSurface for Recorder {
        fn draw_track(&mut self, _radius: f64, _stroke_width: f64, _color: Rgb) {
            self.tracks += 1;
        }

        fn draw_arc(&mut self, start_deg: f64, sweep_deg: f64, _radius: f64, _stroke_width: f64, color: Rgb) {
            self.arcs.push((start_deg, sweep_deg, color));
        }
    }

    #[test]
    fn test_expense_example_sweeps() {
        let segments = arc_segments(232.0, &expense_items()).unwrap();

        let sweeps: Vec<f64> = segments.iter().map(|s| s.sweep_angle_deg).collect();
        assert!((sweeps[0] - 186.2).abs() < 0.05);
        assert!((sweeps[1] - 124.1).abs() < 0.05);
        assert!((sweeps[2] - 49.7).abs() < 0.05);
        assert!((sweeps.iter().sum::<f64>() - 360.0).abs() < EPS);
    }

    #[test]
    fn test_first_segment_starts_at_twelve() {
        let segments = arc_segments(232.0, &expense_items()).unwrap();
        assert_eq!(segments[0].start_angle_deg, START_ANGLE_DEG);
        assert_eq!(segments[0].start_angle_deg, -90.0);
    }

    #[test]
    fn test_segments_are_contiguous_and_ordered() {
        let items = expense_items();
        let segments = arc_segments(232.0, &items).unwrap();

        for (segment, item) in segments.iter().zip(&items) {
            assert_eq!(segment.label, item.name);
            assert_eq!(segment.color, item.color);
        }
        for pair in segments.windows(2) {
            assert!((pair[1].start_angle_deg - pair[0].end_angle_deg()).abs() < EPS);
        }
        assert!((segments[2].end_angle_deg() - 270.0).abs() < EPS);
    }

    #[test]
    fn test_zero_total_is_invalid() {
        let result = arc_segments(0.0, &expense_items());
        assert!(matches!(result, Err(ChartError::InvalidInput(_))));
    }

    #[test]
    fn test_non_finite_total_is_invalid() {
        assert!(arc_segments(f64::NAN, &expense_items()).is_err());
        assert!(arc_segments(f64::INFINITY, &expense_items()).is_err());
        assert!(arc_segments(-10.0, &expense_items()).is_err());
    }

    #[test]
    fn test_negative_magnitude_is_invalid() {
        let items = vec![ReportItem::new("Refund", -5.0, Rgb(0))];
        assert!(matches!(arc_segments(10.0, &items), Err(ChartError::InvalidInput(_))));
    }

    #[test]
    fn test_total_below_sum_is_invalid() {
        assert!(arc_segments(200.0, &expense_items()).is_err());
    }

    #[test]
    fn test_total_above_sum_leaves_gap() {
        // the report screen historically passed 332 for a 232 breakdown
        let segments = arc_segments(332.0, &expense_items()).unwrap();
        let swept: f64 = segments.iter().map(|s| s.sweep_angle_deg).sum();
        assert!(swept < 360.0);
        assert!((swept - 232.0 / 332.0 * 360.0).abs() < EPS);
    }

    #[test]
    fn test_empty_items_emit_nothing() {
        assert!(arc_segments(100.0, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_zero_magnitude_gets_zero_sweep() {
        let items = vec![
            ReportItem::new("Salary", 5000.0, Rgb(0x00A86B)),
            ReportItem::new("Gift", 0.0, Rgb(0xFFC107)),
        ];
        let segments = arc_segments(5000.0, &items).unwrap();
        assert_eq!(segments[1].sweep_angle_deg, 0.0);
        assert!((segments[1].start_angle_deg - 270.0).abs() < EPS);
    }

    #[test]
    fn test_list_rows() {
        let rows = list_rows(&expense_items(), TransactionKind::Expense);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].amount_label, "- Ksh 120");
        assert!((rows.iter().map(|r| r.share_percent).sum::<f64>() - 100.0).abs() < EPS);

        let income = vec![ReportItem::new("Salary", 5000.0, Rgb(0x00A86B))];
        let rows = list_rows(&income, TransactionKind::Income);
        assert_eq!(rows[0].amount_label, "+ Ksh 5000");
        assert_eq!(rows[0].share_percent, 100.0);
    }

    #[test]
    fn test_list_rows_zero_sum() {
        let items = vec![ReportItem::new("Gift", 0.0, Rgb(0))];
        let rows = list_rows(&items, TransactionKind::Income);
        assert_eq!(rows[0].share_percent, 0.0);
    }

    #[test]
    fn test_draw_ring_draws_track_then_arcs() {
        let mut surface = Recorder::default();
        let items = expense_items();
        let outcome = draw_ring(&mut surface, report_total(&items), &items, &RingStyle::default());

        assert!(matches!(outcome, RingOutcome::Drawn(ref s) if s.len() == 3));
        assert_eq!(surface.tracks, 1);
        assert_eq!(surface.arcs.len(), 3);
        assert_eq!(surface.arcs[0].0, -90.0);
        assert_eq!(surface.arcs[2].2, Rgb(0xFF6347));
    }

    #[test]
    fn test_draw_ring_placeholder_on_zero_total() {
        let mut surface = Recorder::default();
        let outcome = draw_ring(&mut surface, 0.0, &[], &RingStyle::default());

        assert!(matches!(outcome, RingOutcome::Placeholder(ChartError::InvalidInput(_))));
        assert_eq!(surface.tracks, 1);
        assert!(surface.arcs.is_empty());
    }

    #[test]
    fn test_arc_points_quarter_turn() {
        let points = arc_points(-90.0, 90.0, 1.0, 10.0);
        assert_eq!(points.len(), 10);

        let (x0, y0) = points[0];
        assert!(x0.abs() < EPS && (y0 - 1.0).abs() < EPS);

        // clockwise from 12 o'clock lands on 3 o'clock
        let (x1, y1) = points[points.len() - 1];
        assert!((x1 - 1.0).abs() < EPS && y1.abs() < EPS);
    }

    #[test]
    fn test_arc_points_rejects_bad_step() {
        assert!(arc_points(0.0, 90.0, 1.0, 0.0).is_empty());
        assert!(arc_points(0.0, f64::NAN, 1.0, 5.0).is_empty());
        assert!(arc_points(0.0, 90.0, 1.0, f64::NAN).is_empty());
    }

    #[test]
    fn test_arc_points_tiny_step_is_capped() {
        let points = arc_points(-90.0, 360.0, 1.0, 1e-300);
        assert_eq!(points.len(), MAX_ARC_STEPS as usize + 1);

        let (x, y) = points[points.len() - 1];
        assert!(x.abs() < EPS && (y - 1.0).abs() < EPS);
    }
}
