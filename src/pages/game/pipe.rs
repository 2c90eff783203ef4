use rand::Rng;

use crate::{
    constants::game,
    pages::game::object::{Bounds, Object},
};

/// Top and bottom obstacle sharing one gap.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipePair {
    top: Bounds,
    bottom: Bounds,
}

impl PipePair {
    /// Builds a pair at `x` whose top pipe is `gap_top` pixels tall.
    pub fn new(x: i32, gap_top: i32) -> Self {
        let top = Bounds::new(x, 0, game::PIPE_WIDTH, gap_top);
        let bottom_y = gap_top + game::GAP_BAND;
        let bottom = Bounds::new(x, bottom_y, game::PIPE_WIDTH, game::PLAY_HEIGHT - bottom_y);
        PipePair { top, bottom }
    }

    /// Builds a pair at `x` with a freshly drawn gap height.
    pub fn spawn<R: Rng>(x: i32, rng: &mut R) -> Self {
        Self::new(x, sample_gap_top(rng))
    }

    pub fn top(&self) -> Bounds {
        self.top
    }

    pub fn bottom(&self) -> Bounds {
        self.bottom
    }

    pub fn x(&self) -> i32 {
        self.top.x
    }

    /// Trailing edge of the pair.
    pub fn right(&self) -> i32 {
        self.top.right()
    }

    pub fn gap_top(&self) -> i32 {
        self.top.h
    }

    pub fn move_left(&mut self, step: i32) {
        self.top.x -= step;
        self.bottom.x -= step;
    }

    pub fn collides_with<T: Object>(&self, other: &T) -> bool {
        self.top.collides_with(other) || self.bottom.collides_with(other)
    }
}

/// Draws a top-pipe height uniformly from `{32, 64, .., 448}`.
pub fn sample_gap_top<R: Rng>(rng: &mut R) -> i32 {
    game::TILE * rng.gen_range(1..=game::GAP_STEPS)
}
