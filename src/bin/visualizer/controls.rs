use macroquad::prelude::*;
use macroquad::ui::{hash, root_ui, widgets};

use parabolic_viz::core::params::{GravityPreset, MAX_ANGLE_DEG, MAX_CUSTOM_GRAVITY_MPS2};
use parabolic_viz::core::session::SimulationSession;

use crate::constants::{PANEL_H, PANEL_W, PANEL_X, PANEL_Y};
use crate::state::AppRuntime;

#[derive(Default, Clone, Copy)]
pub(crate) struct FrameActions {
    pub(crate) launch_pause: bool,
    pub(crate) reset: bool,
    pub(crate) explain: bool,
    pub(crate) dismiss_narration: bool,
    pub(crate) next_narration_page: bool,
    pub(crate) preset: Option<GravityPreset>,
}

impl FrameActions {
    pub(crate) fn merge(self, other: Self) -> Self {
        Self {
            launch_pause: self.launch_pause || other.launch_pause,
            reset: self.reset || other.reset,
            explain: self.explain || other.explain,
            dismiss_narration: self.dismiss_narration || other.dismiss_narration,
            next_narration_page: self.next_narration_page || other.next_narration_page,
            preset: other.preset.or(self.preset),
        }
    }
}

pub(crate) fn hotkey_actions() -> FrameActions {
    FrameActions {
        launch_pause: is_key_pressed(KeyCode::Space),
        reset: is_key_pressed(KeyCode::R),
        explain: is_key_pressed(KeyCode::E),
        next_narration_page: is_key_pressed(KeyCode::M),
        ..Default::default()
    }
}

pub(crate) fn draw_control_panel(state: &mut AppRuntime) -> FrameActions {
    let preset = state.store.preset();
    let running = state.session.is_running();
    let narration_pending = state.narration.is_pending();

    let mut actions = FrameActions::default();
    widgets::Window::new(hash!(), vec2(PANEL_X, PANEL_Y), vec2(PANEL_W, PANEL_H))
        .label("Launch Parameters")
        .ui(&mut *root_ui(), |ui| {
            ui.slider(
                hash!(),
                "Angle (deg)",
                0.0..MAX_ANGLE_DEG as f32,
                &mut state.controls.angle_deg,
            );
            ui.slider(
                hash!(),
                "Speed (m/s)",
                0.5..100.0,
                &mut state.controls.speed_mps,
            );
            ui.slider(
                hash!(),
                "Height (m)",
                0.0..100.0,
                &mut state.controls.height_m,
            );
            ui.slider(hash!(), "Mass (kg)", 0.1..20.0, &mut state.controls.mass_kg);
            ui.separator();
            ui.label(None, &format!("Gravity preset: {preset}"));
            for candidate in GravityPreset::ALL {
                let label = match candidate.gravity_mps2() {
                    Some(g) => format!("{candidate} ({g:.2} m/s^2)"),
                    None => candidate.to_string(),
                };
                if ui.button(None, label.as_str()) {
                    actions.preset = Some(candidate);
                }
            }
            ui.slider(
                hash!(),
                "Gravity (m/s^2)",
                0.0..MAX_CUSTOM_GRAVITY_MPS2 as f32,
                &mut state.controls.gravity_mps2,
            );
            ui.separator();
            if ui.button(None, if running { "Pause (Space)" } else { "Launch (Space)" }) {
                actions.launch_pause = true;
            }
            if ui.button(None, "Reset (R)") {
                actions.reset = true;
            }
            if ui.button(
                None,
                if narration_pending {
                    "Explaining..."
                } else {
                    "Explain (E)"
                },
            ) {
                actions.explain = true;
            }
            if ui.button(None, "More Explanation (M)") {
                actions.next_narration_page = true;
            }
            if ui.button(None, "Clear Explanation") {
                actions.dismiss_narration = true;
            }
        });

    actions
}

pub(crate) fn phase_text(session: &SimulationSession) -> &'static str {
    if session.is_running() {
        "Running"
    } else if session.has_landed() {
        "Landed"
    } else if session.trajectory().is_empty() {
        "Ready"
    } else {
        "Paused"
    }
}
