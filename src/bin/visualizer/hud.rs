use macroquad::prelude::*;

use parabolic_viz::core::kinematics::TelemetrySample;
use parabolic_viz::core::viewport::{FlightEnvelope, PlotArea, ScreenMapping};
use parabolic_viz::narration::NarrationStatus;

use crate::constants::{
    CONTROLS_Y, NARRATION_BOX_H, NARRATION_CHAR_W_PX, NARRATION_MAX_LINES, TITLE_Y,
};
use crate::controls::phase_text;
use crate::render::{draw_ui_text, to_screen};
use crate::state::AppRuntime;

pub(crate) fn draw_hud(state: &AppRuntime, area: PlotArea, mapping: &ScreenMapping, font: Option<&Font>) {
    let params = state.store.params();
    if let Some(envelope) = FlightEnvelope::analytic(&params) {
        draw_range_label(&envelope, area, mapping, font);
    }
    draw_header_block(area, font);
    draw_telemetry_block(state.session.current(), area, font);
    draw_status_block(state, area, font);
    draw_narration_box(state.narration.status(), state.narration_page, area, font);
}

fn draw_range_label(
    envelope: &FlightEnvelope,
    area: PlotArea,
    mapping: &ScreenMapping,
    font: Option<&Font>,
) {
    let (left, top, right, bottom) = (
        area.left as f32,
        area.top as f32,
        area.right as f32,
        area.bottom as f32,
    );
    let range_label = format!("{:.2} m", envelope.max_range_m.max(0.0));
    let size = measure_text(&range_label, font, 18, 1.0);
    let landing = to_screen(mapping, envelope.max_range_m.max(0.0), 0.0);
    let label_x = (landing.x - (size.width * 0.5)).clamp(left + 4.0, (right - size.width - 4.0).max(left + 4.0));
    let label_y = (bottom - 12.0).max(top + 20.0);
    draw_ui_text(&range_label, label_x, label_y, 18, DARKGRAY, font);
}

fn draw_header_block(area: PlotArea, font: Option<&Font>) {
    let left = area.left as f32;
    draw_ui_text(
        "Projectile Motion Lab",
        left,
        TITLE_Y,
        30,
        Color::from_rgba(30, 30, 35, 255),
        font,
    );
    draw_ui_text(
        "Space launch/pause | R reset | E explain | M more",
        left,
        CONTROLS_Y,
        20,
        DARKGRAY,
        font,
    );
}

fn draw_telemetry_block(sample: &TelemetrySample, area: PlotArea, font: Option<&Font>) {
    let left = area.left as f32;
    let y = area.bottom as f32 + 80.0;
    let column_w = 150.0;
    for (i, (label, value)) in sample.readouts().iter().enumerate() {
        let x = left + (i as f32 * column_w);
        draw_ui_text(label, x, y, 18, DARKGRAY, font);
        draw_ui_text(value, x, y + 24.0, 24, Color::from_rgba(30, 30, 35, 255), font);
    }
}

fn draw_status_block(state: &AppRuntime, area: PlotArea, font: Option<&Font>) {
    let params = state.store.params();
    let y = area.bottom as f32 + 134.0;
    draw_ui_text(
        &format!(
            "Angle: {:.1} deg | Speed: {:.1} m/s | Height: {:.1} m | g: {:.2} m/s^2 ({}) | Mass: {:.1} kg",
            params.angle_deg,
            params.initial_speed_mps,
            params.initial_height_m,
            params.gravity_mps2,
            state.store.preset(),
            params.mass_kg
        ),
        area.left as f32,
        y,
        20,
        BLUE,
        font,
    );
    draw_ui_text(
        &format!(
            "State: {} | Frames: {} | {}",
            phase_text(&state.session),
            state.session.trajectory().len(),
            state.status_line
        ),
        area.left as f32,
        y + 26.0,
        18,
        DARKGRAY,
        font,
    );
}

fn draw_narration_box(status: &NarrationStatus, page: usize, area: PlotArea, font: Option<&Font>) {
    let x = 18.0;
    let w = (area.left as f32 - 36.0).max(120.0);
    let y = screen_height() - NARRATION_BOX_H - 18.0;
    draw_rectangle(x, y, w, NARRATION_BOX_H, Color::from_rgba(241, 245, 249, 255));
    draw_rectangle_lines(x, y, w, NARRATION_BOX_H, 1.5, Color::from_rgba(148, 163, 184, 255));

    let (heading, body, body_color) = match status {
        NarrationStatus::Idle => (
            "Explanation".to_string(),
            "Press E for an explanation of this launch.".to_string(),
            DARKGRAY,
        ),
        NarrationStatus::Pending { requested_at } => (
            format!("Explanation (asked {})", requested_at.format("%H:%M:%S")),
            "Thinking...".to_string(),
            DARKGRAY,
        ),
        NarrationStatus::Ready { text, received_at } => (
            format!("Explanation ({})", received_at.format("%H:%M:%S")),
            text.clone(),
            Color::from_rgba(30, 30, 35, 255),
        ),
        NarrationStatus::Failed { message, received_at } => (
            format!("Explanation failed ({})", received_at.format("%H:%M:%S")),
            message.clone(),
            MAROON,
        ),
    };

    let wrap = ((w - 20.0) / NARRATION_CHAR_W_PX).max(20.0) as usize;
    let shown = narration_page(wrap_text(&body, wrap), page, NARRATION_MAX_LINES);
    let heading = if shown.count > 1 {
        format!("{heading}  [{}/{}, M for more]", shown.index + 1, shown.count)
    } else {
        heading
    };

    draw_ui_text(&heading, x + 10.0, y + 22.0, 18, DARKBLUE, font);
    for (i, line) in shown.lines.iter().enumerate() {
        draw_ui_text(line, x + 10.0, y + 46.0 + (i as f32 * 18.0), 15, body_color, font);
    }
}

pub(crate) struct NarrationPage {
    pub(crate) lines: Vec<String>,
    pub(crate) index: usize,
    pub(crate) count: usize,
}

/// Page `page` of the wrapped text, cycling past the end. Every page but the
/// last ends in an ellipsis.
pub(crate) fn narration_page(lines: Vec<String>, page: usize, per_page: usize) -> NarrationPage {
    let per_page = per_page.max(1);
    let count = lines.len().div_ceil(per_page).max(1);
    let index = page % count;
    let mut shown: Vec<String> = lines
        .into_iter()
        .skip(index * per_page)
        .take(per_page)
        .collect();
    if let Some(last) = shown.last_mut().filter(|_| index + 1 < count) {
        last.push_str(" \u{2026}");
    }
    NarrationPage {
        lines: shown,
        index,
        count,
    }
}

/// Greedy word wrap. Words longer than `max_chars` get a line of their own.
pub(crate) fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}
