use approx::assert_abs_diff_eq;

use parabolic_viz::core::params::{GravityPreset, ParameterStore, PhysicsParams};
use parabolic_viz::core::session::{DriverState, SimulationSession, TickOutcome};
use parabolic_viz::core::viewport::{DEFAULT_SCALE_PX_PER_M, FlightEnvelope, PlotArea, ScreenMapping};

const FRAME_S: f64 = 1.0 / 60.0;

fn run_to_landing(session: &mut SimulationSession, dt: f64) -> usize {
    session.launch();
    for frame in 1..=100_000 {
        if session.tick(dt) == TickOutcome::Landed {
            return frame;
        }
    }
    panic!("flight never landed");
}

#[test]
fn ground_launch_stops_on_first_frame_below_ground() {
    let params = ParameterStore::default().params();
    let flight_time = FlightEnvelope::analytic(&params)
        .expect("earth launch has an envelope")
        .flight_time_s;
    let mut session = SimulationSession::new(params);

    let frames = run_to_landing(&mut session, FRAME_S);

    assert_eq!(session.state(), DriverState::Idle);
    assert!(session.has_landed());
    assert_eq!(session.trajectory().len(), frames);

    let landing = *session.current();
    assert!(landing.y_m <= 0.0);
    assert!(landing.vy_mps < 0.0);
    assert_eq!(session.trajectory().last(), Some(&landing));

    // The landing frame's advance is discarded.
    assert!(session.elapsed_s() < flight_time);
    assert!(flight_time - session.elapsed_s() <= FRAME_S + 1e-9);
    assert!(landing.elapsed_s >= flight_time - 1e-9);
    assert_abs_diff_eq!(landing.x_m, 40.77, epsilon = 0.3);
}

#[test]
fn every_recorded_sample_before_landing_is_airborne() {
    let mut session = SimulationSession::new(ParameterStore::default().params());
    run_to_landing(&mut session, FRAME_S);

    let samples = session.trajectory().samples();
    let (last, airborne) = samples.split_last().expect("at least one sample");
    assert!(airborne.iter().all(|s| s.y_m > 0.0 || s.vy_mps >= 0.0));
    assert!(last.has_descended_through_ground());
    assert!(
        samples
            .windows(2)
            .all(|pair| pair[1].elapsed_s > pair[0].elapsed_s)
    );
}

#[test]
fn horizontal_launch_from_a_ledge() {
    let mut store = ParameterStore::default();
    store.set_angle(0.0).expect("angle");
    store.set_initial_speed(10.0).expect("speed");
    store.set_initial_height(50.0).expect("height");
    let params = store.params();

    let mut session = SimulationSession::new(params);
    run_to_landing(&mut session, FRAME_S);

    let expected = (2.0 * 50.0 / 9.81f64).sqrt();
    assert_abs_diff_eq!(session.elapsed_s(), expected, epsilon = FRAME_S + 1e-9);
    assert!(session.elapsed_s() < expected);

    for sample in session.trajectory() {
        assert_abs_diff_eq!(sample.x_m, 10.0 * sample.elapsed_s, epsilon = 1e-9);
        assert_abs_diff_eq!(sample.vx_mps, 10.0, epsilon = 1e-12);
    }
}

#[test]
fn dropped_ball_stays_on_the_vertical_axis() {
    let params = PhysicsParams {
        angle_deg: 0.0,
        initial_speed_mps: 0.0,
        initial_height_m: 50.0,
        gravity_mps2: 9.81,
        mass_kg: 1.0,
    };
    let mut session = SimulationSession::new(params);
    run_to_landing(&mut session, FRAME_S);

    assert!(session.trajectory().iter().all(|s| s.x_m == 0.0));
    assert_abs_diff_eq!(
        session.current().elapsed_s,
        (100.0 / 9.81f64).sqrt(),
        epsilon = FRAME_S + 1e-9
    );
}

#[test]
fn mass_does_not_change_the_flight() {
    let mut light = ParameterStore::default();
    let mut heavy = ParameterStore::default();
    light.set_mass(0.1).expect("mass");
    heavy.set_mass(20.0).expect("mass");

    let mut a = SimulationSession::new(light.params());
    let mut b = SimulationSession::new(heavy.params());
    run_to_landing(&mut a, FRAME_S);
    run_to_landing(&mut b, FRAME_S);

    let pa: Vec<(f64, f64)> = a.trajectory().points().collect();
    let pb: Vec<(f64, f64)> = b.trajectory().points().collect();
    assert_eq!(pa, pb);
}

#[test]
fn moon_flight_lasts_longer_than_earth_flight() {
    let mut store = ParameterStore::default();
    let earth = FlightEnvelope::analytic(&store.params()).expect("earth");
    store.select_preset(GravityPreset::Moon);
    let moon = FlightEnvelope::analytic(&store.params()).expect("moon");

    assert_abs_diff_eq!(
        moon.flight_time_s / earth.flight_time_s,
        9.81 / 1.62,
        epsilon = 1e-9
    );
    assert!(moon.max_range_m > earth.max_range_m);
}

#[test]
fn reset_after_landing_allows_a_fresh_flight() {
    let mut session = SimulationSession::new(ParameterStore::default().params());
    let first = run_to_landing(&mut session, FRAME_S);

    session.reset();
    session.reset();
    assert_eq!(session.elapsed_s(), 0.0);
    assert!(session.trajectory().is_empty());
    assert!(!session.has_landed());
    assert_eq!(session.state(), DriverState::Idle);

    let second = run_to_landing(&mut session, FRAME_S);
    assert_eq!(first, second);
}

#[test]
fn mapper_keeps_the_whole_flight_on_screen() {
    let area = PlotArea::new(440.0, 120.0, 1560.0, 650.0);
    let mut store = ParameterStore::default();

    for preset in [GravityPreset::Earth, GravityPreset::Moon, GravityPreset::Sun] {
        store.select_preset(preset);
        let params = store.params();
        let envelope = FlightEnvelope::analytic(&params).expect("envelope");
        let mapping = ScreenMapping::fit(&params, area);

        let (land_x, land_y) = mapping.world_to_screen(envelope.max_range_m, 0.0);
        let (_, apex_y) = mapping.world_to_screen(0.0, envelope.apex_height_m);
        assert!(land_x <= area.right + 1e-9);
        assert_abs_diff_eq!(land_y, area.bottom, epsilon = 1e-9);
        assert!(apex_y >= area.top - 1e-9);
    }
}

#[test]
fn tiny_flights_use_the_minimum_visible_window() {
    let mut store = ParameterStore::default();
    store.set_initial_speed(0.5).expect("speed");
    let area = PlotArea::new(0.0, 0.0, 500.0, 300.0);
    let mapping = ScreenMapping::fit(&store.params(), area);

    // 50 m of range and 30 m of height are always visible.
    assert_abs_diff_eq!(mapping.scale_px_per_m, 10.0, epsilon = 1e-9);
    let (visible_x, visible_y) = mapping.visible_world(area);
    assert!(visible_x >= 50.0 - 1e-9);
    assert!(visible_y >= 30.0 - 1e-9);
}

#[test]
fn weightless_parameters_fall_back_to_the_default_scale() {
    let params = PhysicsParams {
        gravity_mps2: 0.0,
        ..PhysicsParams::default()
    };
    let mapping = ScreenMapping::fit(&params, PlotArea::new(0.0, 0.0, 800.0, 600.0));
    assert_eq!(mapping.scale_px_per_m, DEFAULT_SCALE_PX_PER_M);
}
