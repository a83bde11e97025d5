use crate::core::kinematics::launch_velocity;
use crate::core::params::PhysicsParams;

const RANGE_MARGIN: f64 = 1.2;
const HEIGHT_MARGIN: f64 = 1.5;
const MIN_VISIBLE_RANGE_M: f64 = 50.0;
const MIN_VISIBLE_HEIGHT_M: f64 = 30.0;

/// Pixels per metre used when the flight has no analytic envelope.
pub const DEFAULT_SCALE_PX_PER_M: f64 = 10.0;

/// Closed-form extent of a flight, known before any frame runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightEnvelope {
    pub time_to_apex_s: f64,
    pub apex_height_m: f64,
    pub flight_time_s: f64,
    pub max_range_m: f64,
}

impl FlightEnvelope {
    /// `None` when gravity is not positive or the result is not finite.
    pub fn analytic(params: &PhysicsParams) -> Option<Self> {
        let g = params.gravity_mps2;
        if g <= 0.0 || !g.is_finite() {
            return None;
        }

        let (vx0, vy0) = launch_velocity(params);
        let h0 = params.initial_height_m;

        let time_to_apex_s = vy0 / g;
        let apex_height_m = h0 + (vy0 * time_to_apex_s) - (0.5 * g * time_to_apex_s * time_to_apex_s);
        let disc = (vy0 * vy0) + (2.0 * g * h0);
        if disc < 0.0 {
            return None;
        }
        let flight_time_s = (vy0 + disc.sqrt()) / g;
        let max_range_m = vx0 * flight_time_s;

        let envelope = Self {
            time_to_apex_s,
            apex_height_m,
            flight_time_s,
            max_range_m,
        };
        envelope.is_finite().then_some(envelope)
    }

    fn is_finite(&self) -> bool {
        self.time_to_apex_s.is_finite()
            && self.apex_height_m.is_finite()
            && self.flight_time_s.is_finite()
            && self.max_range_m.is_finite()
    }
}

/// Pixel rectangle the flight is drawn into. Screen y grows downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        (self.right - self.left).max(1.0)
    }

    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(1.0)
    }
}

/// Uniform world-to-screen transform: the world origin sits on the plot
/// area's bottom-left corner and both axes share one scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenMapping {
    pub scale_px_per_m: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl ScreenMapping {
    /// Fits the whole analytic flight into `area`.
    pub fn fit(params: &PhysicsParams, area: PlotArea) -> Self {
        let scale_px_per_m = match FlightEnvelope::analytic(params) {
            Some(envelope) => fit_scale(&envelope, area),
            None => DEFAULT_SCALE_PX_PER_M,
        };
        Self {
            scale_px_per_m,
            origin_x: area.left,
            origin_y: area.bottom,
        }
    }

    pub fn world_to_screen(&self, x_m: f64, y_m: f64) -> (f64, f64) {
        (
            self.origin_x + (x_m * self.scale_px_per_m),
            self.origin_y - (y_m * self.scale_px_per_m),
        )
    }

    pub fn screen_to_world(&self, x_px: f64, y_px: f64) -> (f64, f64) {
        (
            (x_px - self.origin_x) / self.scale_px_per_m,
            (self.origin_y - y_px) / self.scale_px_per_m,
        )
    }

    pub fn visible_world(&self, area: PlotArea) -> (f64, f64) {
        (
            area.width() / self.scale_px_per_m,
            area.height() / self.scale_px_per_m,
        )
    }
}

fn fit_scale(envelope: &FlightEnvelope, area: PlotArea) -> f64 {
    let span_x = (envelope.max_range_m * RANGE_MARGIN).max(MIN_VISIBLE_RANGE_M);
    let span_y = (envelope.apex_height_m * HEIGHT_MARGIN).max(MIN_VISIBLE_HEIGHT_M);
    let scale = (area.width() / span_x).min(area.height() / span_y);
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        DEFAULT_SCALE_PX_PER_M
    }
}
