//! Frame-driven flight. The landing frame's time advance is discarded.

use log::info;

use crate::core::kinematics::{TelemetrySample, evaluate};
use crate::core::params::PhysicsParams;
use crate::core::trajectory::Trajectory;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Advanced,
    Landed,
}

#[derive(Clone, Debug)]
pub struct SimulationSession {
    params: PhysicsParams,
    elapsed_s: f64,
    state: DriverState,
    current: TelemetrySample,
    trajectory: Trajectory,
    last_frame_s: Option<f64>,
    landed: bool,
}

/// Fresh idle session at t = 0.
pub fn init(params: PhysicsParams) -> SimulationSession {
    SimulationSession::new(params)
}

pub fn tick(mut session: SimulationSession, delta_s: f64) -> SimulationSession {
    session.tick(delta_s);
    session
}

impl SimulationSession {
    pub fn new(params: PhysicsParams) -> Self {
        Self {
            params,
            elapsed_s: 0.0,
            state: DriverState::Idle,
            current: TelemetrySample::ZERO,
            trajectory: Trajectory::new(),
            last_frame_s: None,
            landed: false,
        }
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    /// Recorded samples are left as they are.
    pub fn set_params(&mut self, params: PhysicsParams) {
        self.params = params;
    }

    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    /// True after a run stopped on ground impact, until the next launch or reset.
    pub fn has_landed(&self) -> bool {
        self.landed
    }

    pub fn current(&self) -> &TelemetrySample {
        &self.current
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Starts or resumes the run. Elapsed time carries over unless a reset
    /// came first.
    pub fn launch(&mut self) {
        if self.is_running() {
            return;
        }
        self.state = DriverState::Running;
        self.last_frame_s = None;
        self.landed = false;
        info!(
            "launch at t={:.3}s (angle {:.1} deg, v0 {:.2} m/s, h0 {:.2} m, g {:.2} m/s^2)",
            self.elapsed_s,
            self.params.angle_deg,
            self.params.initial_speed_mps,
            self.params.initial_height_m,
            self.params.gravity_mps2
        );
    }

    pub fn pause(&mut self) {
        if !self.is_running() {
            return;
        }
        self.state = DriverState::Idle;
        self.last_frame_s = None;
        info!("paused at t={:.3}s", self.elapsed_s);
    }

    pub fn toggle(&mut self) {
        if self.is_running() {
            self.pause();
        } else {
            self.launch();
        }
    }

    pub fn reset(&mut self) {
        self.state = DriverState::Idle;
        self.elapsed_s = 0.0;
        self.current = TelemetrySample::ZERO;
        self.trajectory.clear();
        self.last_frame_s = None;
        self.landed = false;
    }

    /// First frame after launch, pause or reset advances by zero.
    pub fn on_frame(&mut self, timestamp_s: f64) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }
        let delta_s = self
            .last_frame_s
            .map_or(0.0, |last| timestamp_s - last);
        self.last_frame_s = Some(timestamp_s);
        self.tick(delta_s)
    }

    pub fn tick(&mut self, delta_s: f64) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }

        let delta_s = if delta_s.is_finite() { delta_s.max(0.0) } else { 0.0 };
        let candidate_s = self.elapsed_s + delta_s;
        let sample = evaluate(candidate_s, &self.params);
        self.trajectory.push(sample);
        self.current = sample;

        if sample.has_descended_through_ground() && candidate_s > 0.0 {
            self.state = DriverState::Idle;
            self.last_frame_s = None;
            self.landed = true;
            info!(
                "landed at x={:.2}m after {} frames, stopped at t={:.3}s",
                sample.x_m,
                self.trajectory.len(),
                self.elapsed_s
            );
            return TickOutcome::Landed;
        }

        self.elapsed_s = candidate_s;
        TickOutcome::Advanced
    }
}
