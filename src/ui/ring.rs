// Terminal canvas as a ring-chart surface

use crate::chart::{arc_points, RingSurface};
use crate::entities::Rgb;
use ratatui::style::Color;
use ratatui::widgets::canvas::{Context, Points};

/// Angular spacing between plotted points
const STEP_DEG: f64 = 1.5;
/// Concentric passes used to give the stroke some width
const STROKE_PASSES: usize = 4;

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r(), rgb.g(), rgb.b())
}

pub struct CanvasRing<'a, 'b> {
    ctx: &'a mut Context<'b>,
}

impl<'a, 'b> CanvasRing<'a, 'b> {
    pub fn new(ctx: &'a mut Context<'b>) -> Self {
        CanvasRing { ctx }
    }

    fn stroke(&mut self, start_deg: f64, sweep_deg: f64, radius: f64, stroke_width: f64, color: Rgb) {
        for pass in 0..STROKE_PASSES {
            let offset = stroke_width * (pass as f64 / (STROKE_PASSES - 1) as f64 - 0.5);
            let coords = arc_points(start_deg, sweep_deg, radius + offset, STEP_DEG);
            self.ctx.draw(&Points {
                coords: &coords,
                color: to_color(color),
            });
        }
    }
}

impl RingSurface for CanvasRing<'_, '_> {
    fn draw_track(&mut self, radius: f64, stroke_width: f64, color: Rgb) {
        self.stroke(0.0, 360.0, radius, stroke_width, color);
        // arcs must paint over the track, not blend with it
        self.ctx.layer();
    }

    fn draw_arc(&mut self, start_deg: f64, sweep_deg: f64, radius: f64, stroke_width: f64, color: Rgb) {
        self.stroke(start_deg, sweep_deg, radius, stroke_width, color);
    }
}
