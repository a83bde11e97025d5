use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use plotters::prelude::*;

use crate::core::kinematics::sample_path;
use crate::core::params::PhysicsParams;
use crate::core::trajectory::Trajectory;
use crate::core::viewport::FlightEnvelope;
use crate::error::PlotError;

const PATH_SAMPLES: usize = 320;

#[derive(Clone, Copy, Debug)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    /// Caption, axis labels and legend. Text needs a system font.
    pub labels: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
            labels: true,
        }
    }
}

fn render_err(err: impl Display) -> PlotError {
    PlotError::Render(err.to_string())
}

pub fn render_svg(
    params: &PhysicsParams,
    trajectory: &Trajectory,
    options: ChartOptions,
) -> Result<String, PlotError> {
    let analytic = FlightEnvelope::analytic(params)
        .map(|envelope| sample_path(params, envelope.flight_time_s, PATH_SAMPLES))
        .unwrap_or_default();
    let recorded: Vec<(f64, f64)> = trajectory.points().collect();
    let (max_x, max_y) = analytic
        .iter()
        .chain(recorded.iter())
        .fold((1.0f64, 1.0f64), |(mx, my), &(x, y)| (mx.max(x), my.max(y)));

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
            .into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut builder = ChartBuilder::on(&root);
        builder.margin(16);
        if options.labels {
            builder
                .caption(
                    format!(
                        "{:.1} deg, {:.1} m/s, h0 {:.1} m, g {:.2} m/s^2",
                        params.angle_deg,
                        params.initial_speed_mps,
                        params.initial_height_m,
                        params.gravity_mps2
                    ),
                    ("sans-serif", 22),
                )
                .x_label_area_size(40)
                .y_label_area_size(50);
        }
        let mut chart = builder
            .build_cartesian_2d(0.0..max_x * 1.05, 0.0..max_y * 1.1)
            .map_err(render_err)?;

        if options.labels {
            chart
                .configure_mesh()
                .x_desc("Distance (m)")
                .y_desc("Height (m)")
                .draw()
                .map_err(render_err)?;
        }

        let analytic_series = chart
            .draw_series(LineSeries::new(analytic, BLUE.mix(0.6).stroke_width(2)))
            .map_err(render_err)?;
        if options.labels {
            analytic_series
                .label("Analytic path")
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));
        }

        let frame_series = chart
            .draw_series(
                recorded
                    .iter()
                    .map(|&point| Circle::new(point, 2, RED.filled())),
            )
            .map_err(render_err)?;
        if options.labels {
            frame_series
                .label("Recorded frames")
                .legend(|(x, y)| Circle::new((x + 10, y), 3, RED.filled()));

            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
    }
    Ok(svg)
}

pub fn write_svg(path: &Path, svg: &str) -> Result<(), PlotError> {
    fs::write(path, svg).map_err(|source| PlotError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// `trajectory-YYYYMMDD-HHMMSS.svg`
pub fn default_plot_path<Tz: TimeZone>(now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: Display,
{
    PathBuf::from(format!("trajectory-{}.svg", now.format("%Y%m%d-%H%M%S")))
}
