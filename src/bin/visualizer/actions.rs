use log::{debug, info};

use parabolic_viz::core::params::ParameterStore;
use parabolic_viz::core::session::TickOutcome;
use parabolic_viz::error::ParamError;

use crate::constants::SLIDER_EPSILON;
use crate::controls::FrameActions;
use crate::state::AppRuntime;

type Setter = fn(&mut ParameterStore, f64) -> Result<(), ParamError>;

/// Pushes a moved slider into the store. Untouched sliders are skipped so an
/// f32 round trip never counts as an edit.
fn push_edit(store: &mut ParameterStore, slider: f32, current: f64, set: Setter) -> Option<ParamError> {
    let value = f64::from(slider);
    if (value - current).abs() < SLIDER_EPSILON {
        return None;
    }
    set(store, value).err()
}

pub(crate) fn apply_control_edits(state: &mut AppRuntime) {
    let current = state.store.params();
    let controls = state.controls;
    let edits: [(f32, f64, Setter); 5] = [
        (controls.angle_deg, current.angle_deg, ParameterStore::set_angle),
        (
            controls.speed_mps,
            current.initial_speed_mps,
            ParameterStore::set_initial_speed,
        ),
        (
            controls.height_m,
            current.initial_height_m,
            ParameterStore::set_initial_height,
        ),
        (controls.mass_kg, current.mass_kg, ParameterStore::set_mass),
        (
            controls.gravity_mps2,
            current.gravity_mps2,
            ParameterStore::set_gravity,
        ),
    ];

    for (slider, value, set) in edits {
        if let Some(err) = push_edit(&mut state.store, slider, value, set) {
            debug!("rejected parameter edit: {err}");
            state.status_line = err.to_string();
        }
    }
}

pub(crate) fn apply_actions(state: &mut AppRuntime, actions: FrameActions) {
    if let Some(preset) = actions.preset {
        state.store.select_preset(preset);
        state.status_line = format!("Gravity preset: {preset}");
    }

    if actions.launch_pause {
        // Launching again after touchdown starts a new flight.
        if state.session.has_landed() {
            state.session.reset();
        }
        state.session.set_params(state.store.params());
        state.session.toggle();
        state.status_line = if state.session.is_running() {
            "Launched".to_string()
        } else {
            "Paused".to_string()
        };
    }

    if actions.reset {
        state.session.reset();
        info!("session reset");
        state.status_line = "Reset".to_string();
    }

    if actions.explain {
        state.status_line = if state.narration.request(state.store.params()) {
            state.narration_page = 0;
            "Requesting explanation...".to_string()
        } else {
            "An explanation is already on its way".to_string()
        };
    }

    if actions.next_narration_page {
        state.narration_page = state.narration_page.wrapping_add(1);
    }

    if actions.dismiss_narration {
        state.narration.dismiss();
        state.narration_page = 0;
    }

    state.sync_controls();
}

/// One display refresh worth of simulation, fed with the latest inputs.
pub(crate) fn step_flight(state: &mut AppRuntime, now_s: f64) {
    state.session.set_params(state.store.params());
    if state.session.on_frame(now_s) == TickOutcome::Landed {
        let landing = state.session.current();
        state.status_line = format!(
            "Landed at x={:.2} m, stopped at t={:.2} s",
            landing.x_m,
            state.session.elapsed_s()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchanged_slider_is_not_an_edit() {
        let mut store = ParameterStore::default();
        store.set_gravity(9.81).expect("valid");
        let before = store.params();
        assert!(push_edit(&mut store, 9.81f32, 9.81, ParameterStore::set_gravity).is_none());
        assert_eq!(store.params(), before);
    }

    #[test]
    fn rejected_slider_reports_error() {
        let mut store = ParameterStore::default();
        let err = push_edit(&mut store, 0.0, 9.81, ParameterStore::set_gravity);
        assert!(matches!(err, Some(ParamError::GravityOutOfRange { .. })));
        assert_eq!(store.params().gravity_mps2, 9.81);
    }

    #[test]
    fn moved_slider_updates_store() {
        let mut store = ParameterStore::default();
        assert!(push_edit(&mut store, 60.0, 45.0, ParameterStore::set_angle).is_none());
        assert_eq!(store.params().angle_deg, 60.0);
    }
}
