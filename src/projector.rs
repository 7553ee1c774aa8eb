//! Projection screen strip and intensity graph.
//!
//! Both read the right-edge intensity profile of the current frame and run
//! at native resolution; rows map back to the low-resolution profile by
//! nearest neighbour. Neither keeps anything between frames.

use glam::Vec2;

use crate::field::IntensityProfile;
use crate::palette;
use crate::params::{colors, ColorTheme, FieldTuning};
use crate::surface::{Rgba, Surface};

/// Paint each screen row uniformly with the palette color of its profile sample
pub fn project_screen(
    profile: &IntensityProfile,
    screen: &mut Surface,
    theme: ColorTheme,
    tuning: &FieldTuning,
    resolution_scale: f32,
) {
    for y in 0..screen.height() {
        let amplitude = profile.at_scaled_row(y, resolution_scale);
        let color = palette::map(theme, amplitude, tuning.screen_gain);
        screen.row_mut(y).fill(color);
    }
}

/// Draw |amplitude| per row as a sideways polyline, measured leftwards from
/// the right edge of the graph
pub fn project_graph(
    profile: &IntensityProfile,
    graph: &mut Surface,
    theme: ColorTheme,
    tuning: &FieldTuning,
    resolution_scale: f32,
) {
    graph.fill(colors::CLEAR);

    let width = graph.width() as f32;
    let color = graph_color(theme);
    let mut previous: Option<Vec2> = None;

    for y in 0..graph.height() {
        let amplitude = profile.at_scaled_row(y, resolution_scale).abs();
        let point = Vec2::new(width - amplitude * width * tuning.graph_reach, y as f32);
        if !point.x.is_finite() {
            previous = None;
            continue;
        }
        let from = previous.unwrap_or(point);
        stroke_segment(graph, from, point, tuning.graph_stroke_px, color);
        previous = Some(point);
    }
}

/// Trace color for a theme
pub fn graph_color(theme: ColorTheme) -> Rgba {
    match theme {
        ColorTheme::LaserRed => colors::GRAPH_RED,
        _ => colors::GRAPH_YELLOW,
    }
}

/// Blank both derived outputs (laser off)
pub fn clear_outputs(screen: &mut Surface, graph: &mut Surface) {
    screen.fill(colors::SCREEN_OFF);
    graph.fill(colors::CLEAR);
}

/// Stamp a square brush of `stroke` pixels along the segment
fn stroke_segment(surface: &mut Surface, from: Vec2, to: Vec2, stroke: u32, color: Rgba) {
    let stroke = stroke.max(1);
    let half = stroke as f32 / 2.0;
    let delta = to - from;
    let steps = delta.abs().max_element().ceil().max(1.0) as u32;

    for step in 0..=steps {
        let point = from + delta * (step as f32 / steps as f32);
        let left = (point.x - half).round() as i64;
        let top = (point.y - half).round() as i64;
        for dy in 0..stroke as i64 {
            for dx in 0..stroke as i64 {
                surface.plot(left + dx, top + dy, color);
            }
        }
    }
}
