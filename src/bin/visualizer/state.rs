use std::sync::Arc;

use parabolic_viz::core::params::{ParameterStore, PhysicsParams};
use parabolic_viz::core::session::SimulationSession;
use parabolic_viz::narration::{GeminiClient, NarrationConfig, NarrationPanel};

/// Slider-side copies of the inputs. Sliders edit these freely; the store
/// decides what is accepted.
#[derive(Clone, Copy)]
pub(crate) struct ControlValues {
    pub(crate) angle_deg: f32,
    pub(crate) speed_mps: f32,
    pub(crate) height_m: f32,
    pub(crate) gravity_mps2: f32,
    pub(crate) mass_kg: f32,
}

impl ControlValues {
    pub(crate) fn from_params(params: &PhysicsParams) -> Self {
        Self {
            angle_deg: params.angle_deg as f32,
            speed_mps: params.initial_speed_mps as f32,
            height_m: params.initial_height_m as f32,
            gravity_mps2: params.gravity_mps2 as f32,
            mass_kg: params.mass_kg as f32,
        }
    }
}

pub(crate) struct AppRuntime {
    pub(crate) store: ParameterStore,
    pub(crate) controls: ControlValues,
    pub(crate) session: SimulationSession,
    pub(crate) narration: NarrationPanel,
    pub(crate) narration_page: usize,
    pub(crate) status_line: String,
}

impl AppRuntime {
    pub(crate) fn new() -> Self {
        let store = ParameterStore::default();
        let params = store.params();
        let client = GeminiClient::new(NarrationConfig::from_env());
        Self {
            controls: ControlValues::from_params(&params),
            session: SimulationSession::new(params),
            narration: NarrationPanel::new(Arc::new(client)),
            narration_page: 0,
            store,
            status_line: "Ready".to_string(),
        }
    }

    /// Snaps the sliders back to what the store holds.
    pub(crate) fn sync_controls(&mut self) {
        self.controls = ControlValues::from_params(&self.store.params());
    }
}
