use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, ValueEnum};
use log::warn;

use parabolic_viz::core::kinematics::TelemetrySample;
use parabolic_viz::core::params::{
    EARTH_GRAVITY_MPS2, GravityPreset, ParameterStore, PhysicsParams,
};
use parabolic_viz::core::session::{SimulationSession, TickOutcome};
use parabolic_viz::core::viewport::FlightEnvelope;
use parabolic_viz::narration::{GeminiClient, NarrationConfig, request_narration};
use parabolic_viz::plot::{ChartOptions, default_plot_path, render_svg, write_svg};
use parabolic_viz::{Error, Result};

const MAX_FRAMES: usize = 5_000_000;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetArg {
    Earth,
    Moon,
    Mars,
    Sun,
}

impl From<PresetArg> for GravityPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Earth => GravityPreset::Earth,
            PresetArg::Moon => GravityPreset::Moon,
            PresetArg::Mars => GravityPreset::Mars,
            PresetArg::Sun => GravityPreset::Sun,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "parabolic_viz")]
#[command(about = "Flight report for a projectile under constant gravity", long_about = None)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// Launch angle (degrees, 0-90)
    #[arg(default_value_t = 45.0)]
    angle: f64,

    /// Initial speed (m/s)
    #[arg(default_value_t = 20.0)]
    speed: f64,

    /// Initial height (m)
    #[arg(default_value_t = 0.0)]
    height: f64,

    /// Named gravity preset
    #[arg(short, long, value_enum, conflicts_with = "gravity")]
    preset: Option<PresetArg>,

    /// Custom gravity (m/s^2, up to 300)
    #[arg(short, long)]
    gravity: Option<f64>,

    /// Mass (kg); only reported, it does not change the flight
    #[arg(short, long, default_value_t = 1.0)]
    mass: f64,

    /// Frame rate of the simulated run
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Number of telemetry rows to print
    #[arg(long, default_value_t = 10)]
    samples: usize,

    /// Write an SVG chart (timestamped file name when no path is given)
    #[arg(long, num_args = 0..=1, value_name = "PATH")]
    plot: Option<Option<PathBuf>>,

    /// Ask the explanation service to describe this flight
    #[arg(long)]
    explain: bool,
}

fn params_from_cli(cli: &Cli) -> Result<PhysicsParams> {
    let gravity_mps2 = cli
        .gravity
        .or_else(|| cli.preset.and_then(|p| GravityPreset::from(p).gravity_mps2()))
        .unwrap_or(EARTH_GRAVITY_MPS2);
    let mut store = ParameterStore::default();
    store.replace(PhysicsParams {
        angle_deg: cli.angle,
        initial_speed_mps: cli.speed,
        initial_height_m: cli.height,
        gravity_mps2,
        mass_kg: cli.mass,
    })?;
    Ok(store.params())
}

/// Runs a session at a fixed frame step until it lands or `max_frames` run out.
fn fly(params: PhysicsParams, frame_dt_s: f64, max_frames: usize) -> SimulationSession {
    let mut session = SimulationSession::new(params);
    session.launch();
    for _ in 0..max_frames {
        if session.tick(frame_dt_s) == TickOutcome::Landed {
            break;
        }
    }
    session
}

/// `count` samples spread evenly over `samples`, first and last included.
fn pick_evenly(samples: &[TelemetrySample], count: usize) -> Vec<TelemetrySample> {
    if samples.is_empty() || count == 0 {
        return Vec::new();
    }
    if count == 1 || samples.len() == 1 {
        return vec![samples[samples.len() - 1]];
    }
    let count = count.min(samples.len());
    (0..count)
        .map(|i| samples[i * (samples.len() - 1) / (count - 1)])
        .collect()
}

fn print_envelope(params: &PhysicsParams) {
    match FlightEnvelope::analytic(params) {
        Some(envelope) => {
            println!("Time to apex: {:.4} s", envelope.time_to_apex_s);
            println!("Apex height: {:.4} m", envelope.apex_height_m);
            println!("Time of flight: {:.4} s", envelope.flight_time_s);
            println!("Horizontal distance: {:.4} m", envelope.max_range_m);
        }
        None => println!("No analytic flight envelope for these inputs."),
    }
}

fn stop_summary(session: &SimulationSession) -> String {
    if session.has_landed() {
        format!("Stopped at: {:.4} s (last accepted frame)", session.elapsed_s())
    } else {
        format!(
            "Did not land within {} frames (simulated {:.4} s)",
            session.trajectory().len(),
            session.elapsed_s()
        )
    }
}

fn print_run(session: &SimulationSession, rows: usize) {
    let trajectory = session.trajectory();
    println!("\nFrames processed: {}", trajectory.len());
    println!("{}", stop_summary(session));
    if let Some(landing) = trajectory.last().filter(|_| session.has_landed()) {
        println!(
            "Landing frame: t={:.4} s, x={:.4} m, vy={:.4} m/s",
            landing.elapsed_s, landing.x_m, landing.vy_mps
        );
    }

    println!(
        "\n{:>8} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "t (s)", "x (m)", "y (m)", "v (m/s)", "vx (m/s)", "vy (m/s)"
    );
    for s in pick_evenly(trajectory.samples(), rows) {
        println!(
            "{:>8.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            s.elapsed_s, s.x_m, s.y_m, s.speed_mps, s.vx_mps, s.vy_mps
        );
    }
}

fn write_chart(params: &PhysicsParams, session: &SimulationSession, path: PathBuf) -> Result<()> {
    let svg = match render_svg(params, session.trajectory(), ChartOptions::default()) {
        Ok(svg) => svg,
        Err(err) => {
            warn!("labelled chart failed ({err}); writing it without text");
            render_svg(
                params,
                session.trajectory(),
                ChartOptions {
                    labels: false,
                    ..ChartOptions::default()
                },
            )?
        }
    };
    write_svg(&path, &svg)?;
    println!("\nChart written to {}", path.display());
    Ok(())
}

fn explain(params: &PhysicsParams) {
    let client = GeminiClient::new(NarrationConfig::from_env());
    println!();
    match request_narration(&client, params) {
        Ok(text) => println!("{text}"),
        Err(err) => println!("Explanation unavailable: {err}"),
    }
}

fn run(cli: Cli) -> Result<()> {
    if !(cli.fps.is_finite() && cli.fps > 0.0) {
        return Err(Error::Usage(format!(
            "Frame rate must be a positive number (got {}).",
            cli.fps
        )));
    }

    let params = params_from_cli(&cli)?;
    print_envelope(&params);

    let session = fly(params, 1.0 / cli.fps, MAX_FRAMES);
    print_run(&session, cli.samples);

    if let Some(path) = cli.plot.clone() {
        let path = path.unwrap_or_else(|| default_plot_path(&Local::now()));
        write_chart(&params, &session, path)?;
    }

    if cli.explain {
        explain(&params);
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
