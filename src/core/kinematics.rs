use crate::core::params::PhysicsParams;

pub const MIN_MARKER_RADIUS: f64 = 5.0;
pub const MARKER_RADIUS_PER_KG: f64 = 2.0;

/// Instantaneous state of the projectile. `y_m` is clamped at the ground.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TelemetrySample {
    pub elapsed_s: f64,
    pub x_m: f64,
    pub y_m: f64,
    pub vx_mps: f64,
    pub vy_mps: f64,
    pub speed_mps: f64,
}

impl TelemetrySample {
    pub const ZERO: TelemetrySample = TelemetrySample {
        elapsed_s: 0.0,
        x_m: 0.0,
        y_m: 0.0,
        vx_mps: 0.0,
        vy_mps: 0.0,
        speed_mps: 0.0,
    };

    /// Below or on the ground while still moving down.
    pub fn has_descended_through_ground(&self) -> bool {
        self.y_m <= 0.0 && self.vy_mps < 0.0
    }

    /// Label/value pairs for the telemetry readout, two decimals each.
    pub fn readouts(&self) -> [(&'static str, String); 6] {
        [
            ("Time", format!("{:.2} s", self.elapsed_s)),
            ("X", format!("{:.2} m", self.x_m)),
            ("Y", format!("{:.2} m", self.y_m)),
            ("Speed", format!("{:.2} m/s", self.speed_mps)),
            ("Vx", format!("{:.2} m/s", self.vx_mps)),
            ("Vy", format!("{:.2} m/s", self.vy_mps)),
        ]
    }
}

impl Default for TelemetrySample {
    fn default() -> Self {
        Self::ZERO
    }
}

pub fn launch_velocity(params: &PhysicsParams) -> (f64, f64) {
    let theta = params.angle_deg.to_radians();
    let vx = params.initial_speed_mps * theta.cos();
    let vy = params.initial_speed_mps * theta.sin();
    (vx, vy)
}

/// Closed-form state at `time_s` seconds after launch.
pub fn evaluate(time_s: f64, params: &PhysicsParams) -> TelemetrySample {
    let (vx0, vy0) = launch_velocity(params);
    let g = params.gravity_mps2;

    let x = vx0 * time_s;
    let y_raw = params.initial_height_m + (vy0 * time_s) - (0.5 * g * time_s * time_s);
    let vy = vy0 - (g * time_s);

    TelemetrySample {
        elapsed_s: time_s,
        x_m: x,
        y_m: y_raw.max(0.0),
        vx_mps: vx0,
        vy_mps: vy,
        speed_mps: (vx0 * vx0 + vy * vy).sqrt(),
    }
}

/// Evenly spaced `(x, y)` points over `[0, time_of_flight_s]`.
pub fn sample_path(
    params: &PhysicsParams,
    time_of_flight_s: f64,
    samples: usize,
) -> Vec<(f64, f64)> {
    let sample_count = samples.max(2);
    (0..=sample_count)
        .map(|i| {
            let t = (i as f64 * time_of_flight_s) / sample_count as f64;
            let s = evaluate(t, params);
            (s.x_m, s.y_m)
        })
        .collect()
}

/// Marker radius in pixels: grows with mass, never below the floor.
pub fn marker_radius(mass_kg: f64) -> f64 {
    (mass_kg * MARKER_RADIUS_PER_KG).max(MIN_MARKER_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn params(angle_deg: f64, speed_mps: f64, height_m: f64) -> PhysicsParams {
        PhysicsParams {
            angle_deg,
            initial_speed_mps: speed_mps,
            initial_height_m: height_m,
            ..PhysicsParams::default()
        }
    }

    #[test]
    fn launch_state_matches_inputs() {
        let p = params(30.0, 12.0, 4.0);
        let s = evaluate(0.0, &p);
        let theta = 30.0f64.to_radians();

        assert_eq!(s.elapsed_s, 0.0);
        assert_eq!(s.x_m, 0.0);
        assert_close(s.y_m, 4.0, 1e-12);
        assert_close(s.vx_mps, 12.0 * theta.cos(), 1e-12);
        assert_close(s.vy_mps, 12.0 * theta.sin(), 1e-12);
        assert_close(s.speed_mps, 12.0, 1e-12);
    }

    #[test]
    fn speed_is_norm_of_velocity() {
        let p = params(63.0, 27.5, 3.0);
        for i in 0..200 {
            let s = evaluate(i as f64 * 0.037, &p);
            let expected = s.vx_mps * s.vx_mps + s.vy_mps * s.vy_mps;
            assert_close(s.speed_mps * s.speed_mps, expected, 1e-9);
        }
    }

    #[test]
    fn height_is_clamped_at_ground() {
        let p = params(45.0, 20.0, 0.0);
        let s = evaluate(10.0, &p);
        assert_eq!(s.y_m, 0.0);
        assert!(s.vy_mps < 0.0);
        assert!(s.has_descended_through_ground());
    }

    #[test]
    fn horizontal_position_never_decreases() {
        let p = params(70.0, 15.0, 2.0);
        let mut last_x = f64::NEG_INFINITY;
        for i in 0..300 {
            let s = evaluate(i as f64 * 0.01, &p);
            assert!(s.x_m >= last_x);
            last_x = s.x_m;
        }
    }

    #[test]
    fn height_rises_then_falls() {
        let p = params(50.0, 18.0, 0.0);
        let heights: Vec<f64> = (0..=250).map(|i| evaluate(i as f64 * 0.01, &p).y_m).collect();
        let peak = heights
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |acc, (i, &y)| if y > acc.1 { (i, y) } else { acc })
            .0;

        assert!(peak > 0 && peak < heights.len() - 1);
        assert!(heights[..=peak].windows(2).all(|w| w[1] >= w[0]));
        assert!(heights[peak..].windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn mass_does_not_change_the_flight() {
        let light = PhysicsParams {
            mass_kg: 0.1,
            ..PhysicsParams::default()
        };
        let heavy = PhysicsParams {
            mass_kg: 50.0,
            ..PhysicsParams::default()
        };
        assert_eq!(evaluate(1.3, &light), evaluate(1.3, &heavy));
    }

    #[test]
    fn sample_path_spans_the_flight() {
        let p = params(45.0, 10.0, 0.0);
        let points = sample_path(&p, 1.4416, 10);
        assert_eq!(points.len(), 11);
        assert_eq!(points[0], (0.0, 0.0));
        assert_close(points[10].0, 10.194, 0.01);
    }

    #[test]
    fn marker_radius_has_a_floor() {
        assert_eq!(marker_radius(0.5), MIN_MARKER_RADIUS);
        assert_eq!(marker_radius(4.0), 8.0);
    }

    #[test]
    fn readouts_use_two_decimals() {
        let s = TelemetrySample {
            elapsed_s: 1.23456,
            x_m: 10.0,
            y_m: 0.005,
            vx_mps: -1.0,
            vy_mps: 2.5,
            speed_mps: 3.14159,
        };
        let readouts = s.readouts();
        assert_eq!(readouts[0], ("Time", "1.23 s".to_string()));
        assert_eq!(readouts[1].1, "10.00 m");
        assert_eq!(readouts[3].1, "3.14 m/s");
        assert_eq!(readouts[4].1, "-1.00 m/s");
    }
}
