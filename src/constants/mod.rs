pub mod game;

/// Simulation steps per second. Physics constants are tuned for this rate.
pub const TICK_RATE: f64 = 60.0;

/// Prefix of every window title the game sets.
pub const TITLE: &str = "FunkyBird";

/// Size of the game window in terminal cells, border and status line included.
///
/// With half-block markers this gives a 100x74 pixel grid, close to the 4:3
/// shape of the play area.
pub const WIDTH: u16 = 102;
pub const HEIGHT: u16 = 40;
