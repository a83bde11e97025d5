use macroquad::prelude::*;

use parabolic_viz::core::kinematics::marker_radius;
use parabolic_viz::core::viewport::{PlotArea, ScreenMapping};

use crate::constants::{
    GRID_COLOR, GROUND_COLOR, GROUND_THICKNESS_PX, RISER_COLOR, RISER_WIDTH_PX, X_GRID_LINES,
    Y_GRID_LINES,
};

fn format_axis_value(value: f32, axis_max: f32) -> String {
    if axis_max >= 1000.0 {
        format!("{value:.0}")
    } else if axis_max >= 100.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

pub(crate) fn to_screen(mapping: &ScreenMapping, x_m: f64, y_m: f64) -> Vec2 {
    let (x, y) = mapping.world_to_screen(x_m, y_m);
    vec2(x as f32, y as f32)
}

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

pub(crate) fn draw_grid(area: PlotArea) {
    let (left, top, right, bottom) = (
        area.left as f32,
        area.top as f32,
        area.right as f32,
        area.bottom as f32,
    );
    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = left + t * (right - left);
        draw_line(x, top, x, bottom, 1.0, GRID_COLOR);
    }
    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = bottom - t * (bottom - top);
        draw_line(left, y, right, y, 1.0, GRID_COLOR);
    }
}

/// Axes with tick labels in metres for the part of the world `mapping`
/// shows inside `area`.
pub(crate) fn draw_axes(area: PlotArea, mapping: &ScreenMapping, font: Option<&Font>) {
    let (left, top, right, bottom) = (
        area.left as f32,
        area.top as f32,
        area.right as f32,
        area.bottom as f32,
    );
    let (visible_x, visible_y) = mapping.visible_world(area);
    let (world_max_x, world_max_y) = (visible_x as f32, visible_y as f32);
    let label_color = Color::from_rgba(105, 113, 124, 255);
    let tick_font_size: u16 = 16;

    draw_line(left, top, left, bottom, 2.0, DARKGRAY);

    for i in 0..=X_GRID_LINES {
        let t = i as f32 / X_GRID_LINES as f32;
        let x = left + t * (right - left);
        let label = format_axis_value(t * world_max_x, world_max_x);
        let size = measure_text(&label, font, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            x - (size.width * 0.5),
            bottom + 22.0,
            tick_font_size,
            label_color,
            font,
        );
    }

    for i in 0..=Y_GRID_LINES {
        let t = i as f32 / Y_GRID_LINES as f32;
        let y = bottom - t * (bottom - top);
        let label = format_axis_value(t * world_max_y, world_max_y);
        let size = measure_text(&label, font, tick_font_size, 1.0);
        draw_ui_text(
            &label,
            (left - 8.0) - size.width,
            y + (size.height * 0.35),
            tick_font_size,
            label_color,
            font,
        );
    }

    draw_ui_text(
        "Distance (m)",
        right - 130.0,
        bottom + 48.0,
        18,
        label_color,
        font,
    );
    draw_ui_text("Height (m)", left + 10.0, top - 8.0, 18, label_color, font);
}

pub(crate) fn draw_ground(area: PlotArea, mapping: &ScreenMapping) {
    let y = to_screen(mapping, 0.0, 0.0).y;
    draw_line(
        area.left as f32,
        y,
        area.right as f32,
        y,
        GROUND_THICKNESS_PX,
        GROUND_COLOR,
    );
}

/// Launch platform from the ground up to the initial height.
pub(crate) fn draw_height_riser(mapping: &ScreenMapping, height_m: f64) {
    if height_m <= 0.0 {
        return;
    }
    let base = to_screen(mapping, 0.0, 0.0);
    let top = to_screen(mapping, 0.0, height_m);
    draw_rectangle(
        base.x - RISER_WIDTH_PX * 0.5,
        top.y,
        RISER_WIDTH_PX,
        (base.y - top.y).max(1.0),
        RISER_COLOR,
    );
}

pub(crate) fn draw_path(
    points: &[(f64, f64)],
    mapping: &ScreenMapping,
    thickness: f32,
    color: Color,
) {
    for pair in points.windows(2) {
        let a = to_screen(mapping, pair[0].0, pair[0].1);
        let b = to_screen(mapping, pair[1].0, pair[1].1);
        draw_line(a.x, a.y, b.x, b.y, thickness, color);
    }
}

/// Splits a polyline into dash pieces. The dash pattern carries over from
/// one polyline segment to the next.
pub(crate) fn dash_segments(points: &[Vec2], dash: f32, gap: f32) -> Vec<(Vec2, Vec2)> {
    let mut dashes = Vec::new();
    if points.len() < 2 || dash <= 0.0 {
        return dashes;
    }

    let period = dash + gap.max(0.0);
    let mut phase = 0.0f32;
    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let length = a.distance(b);
        if length <= f32::EPSILON {
            continue;
        }
        let dir = (b - a) / length;

        let mut travelled = 0.0f32;
        while length - travelled > 1e-4 {
            let in_dash = phase < dash;
            let boundary = if in_dash { dash } else { period };
            let step = (boundary - phase).min(length - travelled);
            if in_dash {
                dashes.push((a + dir * travelled, a + dir * (travelled + step)));
            }
            travelled += step;
            phase += step;
            if phase >= period - 1e-4 {
                phase = 0.0;
            }
        }
    }
    dashes
}

pub(crate) fn draw_dashed_path(
    points: &[(f64, f64)],
    mapping: &ScreenMapping,
    dash: f32,
    gap: f32,
    thickness: f32,
    color: Color,
) {
    let screen: Vec<Vec2> = points
        .iter()
        .map(|&(x, y)| to_screen(mapping, x, y))
        .collect();
    for (a, b) in dash_segments(&screen, dash, gap) {
        draw_line(a.x, a.y, b.x, b.y, thickness, color);
    }
}

pub(crate) fn draw_projectile(mapping: &ScreenMapping, x_m: f64, y_m: f64, mass_kg: f64) {
    let p = to_screen(mapping, x_m, y_m);
    let radius = marker_radius(mass_kg) as f32;
    draw_circle(p.x, p.y, radius, RED);
    draw_circle_lines(p.x, p.y, radius, 2.0, MAROON);
}
