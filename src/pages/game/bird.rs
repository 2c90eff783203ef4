use crate::{
    constants::game,
    pages::game::object::{Bounds, Object},
};

/// The player sprite. Its column is fixed; only `y` moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bird {
    bounds: Bounds,
    velocity: i32,
    rise_ticks: u32,
}

impl Default for Bird {
    fn default() -> Self {
        Self::new()
    }
}

impl Bird {
    pub fn new() -> Self {
        Bird {
            bounds: Bounds::new(game::BIRD_X, game::BIRD_START_Y, game::BIRD_SIZE, game::BIRD_SIZE),
            velocity: 0,
            rise_ticks: 0,
        }
    }

    /// Starts a fresh rise, replacing whatever phase the bird was in.
    pub fn flap(&mut self) {
        self.rise_ticks = game::FLAP_TICKS;
        self.velocity = game::RISE_VELOCITY;
    }

    /// One fixed step: rise while the counter lasts, then fall at constant speed.
    pub fn update(&mut self) {
        if self.rise_ticks == 0 {
            self.velocity = game::FALL_VELOCITY;
        }

        self.bounds.y -= self.velocity;

        if self.rise_ticks > 0 {
            self.rise_ticks -= 1;
        }
    }

    /// Moves the bird back to its start row. A rise in progress carries on.
    pub fn recenter(&mut self) {
        self.bounds.y = game::BIRD_START_Y;
    }

    pub fn velocity(&self) -> i32 {
        self.velocity
    }

    pub fn rise_ticks(&self) -> u32 {
        self.rise_ticks
    }

    pub fn out_of_bounds(&self, height: i32) -> bool {
        self.bounds.y < 0 || self.bounds.bottom() > height
    }

    #[cfg(test)]
    pub(crate) fn set_y(&mut self, y: i32) {
        self.bounds.y = y;
    }
}

impl Object for Bird {
    fn bounds(&self) -> Bounds {
        self.bounds
    }
}
