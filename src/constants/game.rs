use ratatui::style::Color;

/// Side of one grid tile; every size in the play area is a multiple of it.
pub const TILE: i32 = 32;

pub const PLAY_WIDTH: i32 = 800;
pub const PLAY_HEIGHT: i32 = 600;

pub const BIRD_X: i32 = 200;
pub const BIRD_SIZE: i32 = TILE;
pub const BIRD_START_Y: i32 = PLAY_HEIGHT / 2 - BIRD_SIZE / 2;

/// Ticks of upward motion after a flap.
pub const FLAP_TICKS: u32 = 15;
/// Velocity is subtracted from y, so positive means up.
pub const RISE_VELOCITY: i32 = 3;
pub const FALL_VELOCITY: i32 = -3;

pub const PIPE_WIDTH: i32 = TILE;
pub const PIPE_SPEED: i32 = 2;
pub const PIPE_PAIRS: usize = 3;
pub const PIPE_SPACING: i32 = 10 * TILE;
pub const FIRST_PIPE_X: i32 = PLAY_WIDTH - PIPE_WIDTH;

/// Height of the opening between the top and bottom pipe of a pair.
pub const GAP_BAND: i32 = 3 * TILE;
/// Top pipe heights are drawn from `TILE * 1..=TILE * GAP_STEPS`.
pub const GAP_STEPS: i32 = 14;

pub const SKY_COLOR: Color = Color::Rgb(135, 206, 235);
pub const BIRD_COLOR: Color = Color::Rgb(255, 0, 0);
pub const PIPE_COLOR: Color = Color::Rgb(0, 128, 0);
pub const BORDER_COLOR: Color = Color::Rgb(0, 0, 0);
