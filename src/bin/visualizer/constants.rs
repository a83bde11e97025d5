use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1600;
pub const INITIAL_WINDOW_HEIGHT: i32 = 900;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

pub const LEFT_MARGIN: f32 = 440.0;
pub const RIGHT_MARGIN: f32 = 40.0;
pub const TOP_MARGIN: f32 = 120.0;
pub const BOTTOM_MARGIN: f32 = 250.0;

pub const TITLE_Y: f32 = 46.0;
pub const CONTROLS_Y: f32 = 84.0;
pub const PREVIEW_SAMPLES: usize = 200;
pub const X_GRID_LINES: usize = 10;
pub const Y_GRID_LINES: usize = 8;

pub const DASH_LENGTH_PX: f32 = 10.0;
pub const DASH_GAP_PX: f32 = 6.0;
pub const PATH_THICKNESS_PX: f32 = 3.0;
pub const GROUND_THICKNESS_PX: f32 = 4.0;
pub const RISER_WIDTH_PX: f32 = 8.0;

pub const PANEL_X: f32 = 18.0;
pub const PANEL_Y: f32 = 110.0;
pub const PANEL_W: f32 = 390.0;
pub const PANEL_H: f32 = 500.0;

pub const NARRATION_BOX_H: f32 = 150.0;
pub const NARRATION_CHAR_W_PX: f32 = 7.0;
pub const NARRATION_MAX_LINES: usize = 6;

/// Slider movements smaller than this are not edits.
pub const SLIDER_EPSILON: f64 = 1e-4;

pub const BACKGROUND: Color = Color::new(0.98, 0.98, 0.99, 1.0);
pub const GRID_COLOR: Color = Color::new(0.89, 0.91, 0.93, 1.0);
pub const GROUND_COLOR: Color = Color::new(0.35, 0.55, 0.27, 1.0);
pub const RISER_COLOR: Color = Color::new(0.45, 0.45, 0.50, 1.0);
pub const PATH_COLOR: Color = Color::new(0.21, 0.48, 0.96, 1.0);
pub const PREVIEW_COLOR: Color = Color::new(0.30, 0.55, 0.96, 0.35);
