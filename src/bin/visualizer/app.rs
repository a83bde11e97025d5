use log::{info, warn};
use macroquad::prelude::*;

use parabolic_viz::core::kinematics::sample_path;
use parabolic_viz::core::viewport::{FlightEnvelope, PlotArea, ScreenMapping};

use crate::actions::{apply_actions, apply_control_edits, step_flight};
use crate::constants::{
    BACKGROUND, BOTTOM_MARGIN, DASH_GAP_PX, DASH_LENGTH_PX, INITIAL_WINDOW_HEIGHT,
    INITIAL_WINDOW_WIDTH, LEFT_MARGIN, MSAA_SAMPLES, PATH_COLOR, PATH_THICKNESS_PX,
    PREVIEW_COLOR, PREVIEW_SAMPLES, RIGHT_MARGIN, TOP_MARGIN, UI_FONT_PATH,
};
use crate::controls::{draw_control_panel, hotkey_actions};
use crate::hud::draw_hud;
use crate::render::{
    draw_axes, draw_dashed_path, draw_grid, draw_ground, draw_height_riser, draw_path,
    draw_projectile,
};
use crate::state::AppRuntime;

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Projectile Motion Lab".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

pub(crate) async fn run() {
    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            warn!("could not load '{UI_FONT_PATH}': {err}; falling back to default font");
            None
        }
    };

    let mut state = AppRuntime::new();
    info!("visualizer ready");

    loop {
        let screen_w = screen_width();
        let screen_h = screen_height();

        let actions = hotkey_actions().merge(draw_control_panel(&mut state));
        apply_control_edits(&mut state);
        apply_actions(&mut state, actions);
        step_flight(&mut state, get_time());
        if state.narration.poll() {
            state.narration_page = 0;
        }

        let params = state.store.params();
        let area = PlotArea::new(
            f64::from(LEFT_MARGIN),
            f64::from(TOP_MARGIN),
            f64::from(screen_w - RIGHT_MARGIN),
            f64::from(screen_h - BOTTOM_MARGIN),
        );
        let mapping = ScreenMapping::fit(&params, area);

        clear_background(BACKGROUND);
        draw_grid(area);
        draw_axes(area, &mapping, ui_font.as_ref());
        draw_ground(area, &mapping);
        draw_height_riser(&mapping, params.initial_height_m);

        let trajectory = state.session.trajectory();
        if trajectory.is_empty() {
            if let Some(envelope) = FlightEnvelope::analytic(&params) {
                let preview = sample_path(&params, envelope.flight_time_s, PREVIEW_SAMPLES);
                draw_path(&preview, &mapping, 2.0, PREVIEW_COLOR);
            }
            draw_projectile(&mapping, 0.0, params.initial_height_m, params.mass_kg);
        } else {
            let points: Vec<(f64, f64)> = trajectory.points().collect();
            draw_dashed_path(
                &points,
                &mapping,
                DASH_LENGTH_PX,
                DASH_GAP_PX,
                PATH_THICKNESS_PX,
                PATH_COLOR,
            );
            let current = state.session.current();
            draw_projectile(&mapping, current.x_m, current.y_m, params.mass_kg);
        }

        draw_hud(&state, area, &mapping, ui_font.as_ref());

        next_frame().await;
    }
}
