//! Fixed-step simulation of one game session.
//!
//! [`Engine`] owns every piece of mutable game state. The host calls
//! [`Engine::process_input`] and then [`Engine::tick`] once per frame; nothing
//! here reads the clock, so a run is fully determined by its inputs and the
//! random source handed to [`Engine::new`].

use std::fmt;

use rand::Rng;

use crate::{
    constants::{game, TITLE},
    pages::game::{
        bird::Bird,
        object::{Bounds, Object},
        pipe::PipePair,
    },
};

/// Outcome of a single [`Engine::tick`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// The bird left the play area or hit a pipe; the engine has been reset.
    pub collided: bool,
    /// The bird passed a pipe pair this tick.
    pub scored: bool,
}

/// Messages for the title bar, queued until the host drains them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Scored { score: u32 },
    RunOver { best: u32, last: u32 },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Scored { score } => write!(f, "{TITLE} - {score}"),
            Notice::RunOver { best, last } => write!(f, "{TITLE} - Best: {best} Last: {last}"),
        }
    }
}

#[derive(Debug)]
pub struct Engine<R> {
    rng: R,
    bird: Bird,
    pipes: [PipePair; game::PIPE_PAIRS],
    next_pair: usize,
    score: u32,
    best: u32,
    paused: bool,
    notices: Vec<Notice>,
}

impl<R: Rng> Engine<R> {
    /// Creates the engine and lays out the first run.
    pub fn new(rng: R) -> Self {
        let mut engine = Engine {
            rng,
            bird: Bird::new(),
            pipes: [PipePair::default(); game::PIPE_PAIRS],
            next_pair: 0,
            score: 0,
            best: 0,
            paused: true,
            notices: Vec::new(),
        };
        engine.reset();
        engine
    }

    /// Applies one frame's worth of player input. The toggle goes first, so a
    /// flap in the same frame always leaves the game running.
    pub fn process_input(&mut self, flap: bool, toggle_pause: bool) {
        if toggle_pause {
            self.paused = !self.paused;
        }
        if flap {
            self.paused = false;
            self.bird.flap();
        }
    }

    /// Advances the simulation by one fixed step.
    pub fn tick(&mut self) -> TickResult {
        if !self.paused {
            self.bird.update();
            for pair in self.pipes.iter_mut() {
                pair.move_left(game::PIPE_SPEED);
            }
        }

        if self.bird.out_of_bounds(game::PLAY_HEIGHT) || self.pipes[self.next_pair].collides_with(&self.bird) {
            self.reset();
            return TickResult { collided: true, scored: false };
        }

        let mut result = TickResult::default();
        if self.paused {
            return result;
        }

        // Exact match: with a step of 2 and a width of 32 this holds for
        // exactly one tick per pair.
        if self.bird.get_pos().0 == self.pipes[self.next_pair].right() {
            self.score += 1;
            self.best = self.best.max(self.score);
            self.notices.push(Notice::Scored { score: self.score });
            result.scored = true;
        }

        if self.pipes[self.next_pair].right() < 0 {
            self.recycle_next_pair();
        }

        result
    }

    /// Starts a new run. `best` survives, everything else is laid out afresh.
    pub fn reset(&mut self) {
        self.notices.push(Notice::RunOver { best: self.best, last: self.score });
        self.score = 0;
        self.paused = true;

        let mut x = game::FIRST_PIPE_X;
        for pair in self.pipes.iter_mut() {
            *pair = PipePair::spawn(x, &mut self.rng);
            x += game::PIPE_SPACING;
        }

        self.bird.recenter();
        self.next_pair = 0;
    }

    /// Respawns the pair that just left the screen behind the most recently
    /// spawned one, then moves the cursor on.
    fn recycle_next_pair(&mut self) {
        let last_spawned = (self.next_pair + game::PIPE_PAIRS - 1) % game::PIPE_PAIRS;
        let x = self.pipes[last_spawned].x() + game::PIPE_SPACING;
        self.pipes[self.next_pair] = PipePair::spawn(x, &mut self.rng);
        self.next_pair = (self.next_pair + 1) % game::PIPE_PAIRS;
    }

    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pipes(&self) -> &[PipePair; game::PIPE_PAIRS] {
        &self.pipes
    }

    /// All six pipe rectangles, top before bottom, in pool order.
    pub fn pipe_rects(&self) -> [Bounds; game::PIPE_PAIRS * 2] {
        let mut rects = [Bounds::default(); game::PIPE_PAIRS * 2];
        for (i, pair) in self.pipes.iter().enumerate() {
            rects[2 * i] = pair.top();
            rects[2 * i + 1] = pair.bottom();
        }
        rects
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pool index of the top pipe the bird is approaching: 0, 2 or 4.
    pub fn next_pipe(&self) -> usize {
        self.next_pair * 2
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn engine() -> Engine<ChaCha8Rng> {
        Engine::new(ChaCha8Rng::seed_from_u64(42))
    }

    fn assert_pairing(engine: &Engine<ChaCha8Rng>) {
        let rects = engine.pipe_rects();
        for i in 0..game::PIPE_PAIRS {
            let (top, bottom) = (rects[2 * i], rects[2 * i + 1]);
            assert_eq!(top.y, 0);
            assert_eq!(top.w, 32);
            assert_eq!(bottom.w, 32);
            assert_eq!(bottom.x, top.x);
            assert_eq!(bottom.y, top.h + 96);
            assert_eq!(bottom.h, 600 - bottom.y);
            assert_eq!(top.h % 32, 0);
            assert!((32..=448).contains(&top.h));
        }
    }

    fn assert_canonical(engine: &Engine<ChaCha8Rng>) {
        assert_eq!(engine.bird().bounds(), Bounds::new(200, 284, 32, 32));
        assert_eq!(engine.next_pipe(), 0);
        assert_eq!(engine.score(), 0);
        assert!(engine.is_paused());
        let xs: Vec<i32> = engine.pipes().iter().map(|p| p.x()).collect();
        assert_eq!(xs, vec![768, 1088, 1408]);
        assert_pairing(engine);
    }

    /// Places the pair the bird is approaching so its trailing edge reaches
    /// the bird on the next running tick, with the bird inside the gap.
    fn line_up_score(engine: &mut Engine<ChaCha8Rng>) {
        let y = engine.bird().get_pos().1;
        let x = game::BIRD_X - game::PIPE_WIDTH + game::PIPE_SPEED;
        engine.pipes[engine.next_pair] = PipePair::new(x, y - 32);
    }

    #[test]
    fn test_new_engine_is_canonical() {
        let mut engine = engine();
        assert_canonical(&engine);
        assert_eq!(engine.best(), 0);
        assert_eq!(engine.drain_notices(), vec![Notice::RunOver { best: 0, last: 0 }]);
        assert!(engine.drain_notices().is_empty());
    }

    #[test]
    fn test_reset_restores_canonical_layout() {
        let mut engine = engine();
        engine.process_input(true, false);
        for _ in 0..40 {
            engine.tick();
        }
        engine.best = 7;
        engine.score = 3;
        engine.reset();
        assert_canonical(&engine);
        assert_eq!(engine.best(), 7);
        // 40 ticks into a 15-tick rise: already falling.
        assert_eq!(engine.bird().velocity(), -3);
        assert_eq!(engine.bird().rise_ticks(), 0);
    }

    #[test]
    fn test_resume_after_reset_finishes_the_rise() {
        let mut engine = engine();
        let mut ticks = 0;
        loop {
            engine.process_input(true, false);
            ticks += 1;
            if engine.tick().collided {
                break;
            }
            assert!(ticks < 1000);
        }
        assert_canonical(&engine);
        assert_eq!(engine.bird().rise_ticks(), 14);

        engine.process_input(false, true);
        assert_eq!(engine.tick(), TickResult::default());
        assert_eq!(engine.bird().get_pos().1, 281);
        assert_eq!(engine.bird().rise_ticks(), 13);
    }

    #[test]
    fn test_reset_notice_reports_score_before_clearing() {
        let mut engine = engine();
        engine.drain_notices();
        engine.best = 9;
        engine.score = 4;
        engine.reset();
        assert_eq!(engine.drain_notices(), vec![Notice::RunOver { best: 9, last: 4 }]);
    }

    #[test]
    fn test_reset_redraws_gaps() {
        let mut engine = engine();
        let mut layouts = std::collections::HashSet::new();
        for _ in 0..20 {
            engine.reset();
            layouts.insert(engine.pipes().map(|p| p.gap_top()));
        }
        assert!(layouts.len() > 1);
    }

    #[test]
    fn test_pause_toggle() {
        let mut engine = engine();
        engine.process_input(false, true);
        assert!(!engine.is_paused());
        engine.process_input(false, true);
        assert!(engine.is_paused());
    }

    #[test]
    fn test_flap_unpauses_and_sets_rise() {
        let mut engine = engine();
        engine.process_input(true, false);
        assert!(!engine.is_paused());
        assert_eq!(engine.bird().rise_ticks(), 15);
        assert_eq!(engine.bird().velocity(), 3);
    }

    #[test]
    fn test_flap_wins_over_toggle_in_same_frame() {
        let mut engine = engine();
        engine.process_input(false, true);
        assert!(!engine.is_paused());
        engine.process_input(true, true);
        assert!(!engine.is_paused());
    }

    #[test]
    fn test_running_tick_moves_bird_and_pipes() {
        let mut engine = engine();
        engine.process_input(true, false);
        let result = engine.tick();
        assert_eq!(result, TickResult::default());
        assert_eq!(engine.bird().get_pos().1, 281);
        let xs: Vec<i32> = engine.pipes().iter().map(|p| p.x()).collect();
        assert_eq!(xs, vec![766, 1086, 1406]);
        assert_pairing(&engine);
    }

    #[test]
    fn test_paused_ticks_are_frozen() {
        let mut engine = engine();
        engine.process_input(true, false);
        for _ in 0..30 {
            engine.tick();
        }
        engine.process_input(false, true);
        assert!(engine.is_paused());

        let bird = engine.bird().clone();
        let rects = engine.pipe_rects();
        let score = engine.score();
        for _ in 0..500 {
            assert_eq!(engine.tick(), TickResult::default());
        }
        assert_eq!(engine.bird(), &bird);
        assert_eq!(engine.pipe_rects(), rects);
        assert_eq!(engine.score(), score);
    }

    #[test]
    fn test_paused_on_scoring_position_does_not_rescore() {
        let mut engine = engine();
        engine.process_input(false, true);
        line_up_score(&mut engine);
        assert!(engine.tick().scored);
        engine.process_input(false, true);
        for _ in 0..100 {
            assert!(!engine.tick().scored);
        }
        assert_eq!(engine.score(), 1);
    }

    #[test]
    fn scenario_a_idle_engine_never_changes() {
        let mut engine = engine();
        let bird = engine.bird().clone();
        let rects = engine.pipe_rects();
        for _ in 0..1000 {
            engine.process_input(false, false);
            assert_eq!(engine.tick(), TickResult::default());
        }
        assert_eq!(engine.bird(), &bird);
        assert_eq!(engine.pipe_rects(), rects);
        assert_eq!(engine.score(), 0);
        assert!(engine.is_paused());
    }

    #[test]
    fn scenario_b_single_flap_ends_in_one_reset() {
        let mut engine = engine();
        engine.drain_notices();
        engine.process_input(true, false);

        let mut max_score = 0;
        let mut resets = 0;
        for _ in 0..10_000 {
            let result = engine.tick();
            if result.collided {
                resets += 1;
                break;
            }
            max_score = max_score.max(engine.score());
        }

        assert_eq!(resets, 1);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.best(), max_score);
        assert_canonical(&engine);
        assert_eq!(engine.drain_notices(), vec![Notice::RunOver { best: max_score, last: max_score }]);
    }

    #[test]
    fn test_floor_ends_the_run() {
        let mut engine = engine();
        engine.process_input(false, true);
        engine.bird.set_y(566);
        let result = engine.tick();
        assert_eq!(result, TickResult { collided: true, scored: false });
        assert_canonical(&engine);
    }

    #[test]
    fn test_ceiling_ends_the_run() {
        let mut engine = engine();
        engine.process_input(true, false);
        engine.bird.set_y(2);
        assert!(engine.tick().collided);
        assert_canonical(&engine);
    }

    #[test]
    fn test_pipe_collision_ends_the_run() {
        let mut engine = engine();
        engine.score = 5;
        engine.best = 5;
        engine.process_input(false, true);
        // Top pipe covers the bird's rows, overlapping by one column after the scroll.
        engine.pipes[0] = PipePair::new(game::BIRD_X + game::BIRD_SIZE + 1, 448);
        let result = engine.tick();
        assert!(result.collided);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.best(), 5);
        assert_canonical(&engine);
    }

    #[test]
    fn test_touching_pipe_is_not_a_collision() {
        let mut engine = engine();
        engine.process_input(false, true);
        engine.pipes[0] = PipePair::new(game::BIRD_X + game::BIRD_SIZE + game::PIPE_SPEED, 448);
        let result = engine.tick();
        assert!(!result.collided);
        assert!(!engine.is_paused());
    }

    #[test]
    fn test_only_the_approached_pair_collides() {
        let mut engine = engine();
        engine.process_input(false, true);
        // Pair 1 sits on the bird but the cursor points at pair 0.
        engine.pipes[1] = PipePair::new(game::BIRD_X, 448);
        assert!(!engine.tick().collided);
    }

    #[test]
    fn scenario_c_recycle_off_screen_pair() {
        let mut engine = engine();
        engine.process_input(false, true);
        engine.pipes[0] = PipePair::new(-32, 64);
        let before_last = engine.pipes[2].x();

        let result = engine.tick();
        assert!(!result.collided);

        // Spawned behind pair 2 as it stands after this tick's scroll.
        assert_eq!(engine.pipes[0].x(), before_last - 2 + 320);
        assert_eq!(engine.pipes[0].x(), engine.pipes[2].x() + 320);
        assert_eq!(engine.next_pipe(), 2);
        assert_pairing(&engine);
    }

    #[test]
    fn test_pair_at_left_edge_is_not_yet_recycled() {
        let mut engine = engine();
        engine.process_input(false, true);
        engine.pipes[0] = PipePair::new(-30, 64);
        engine.tick();
        assert_eq!(engine.pipes[0].right(), 0);
        assert_eq!(engine.next_pipe(), 0);
        engine.tick();
        assert_eq!(engine.next_pipe(), 2);
    }

    #[test]
    fn test_cursor_cycles_and_spacing_holds() {
        let mut engine = engine();
        engine.process_input(false, true);
        for expected in [2, 4, 0, 2, 4, 0] {
            let cursor = engine.next_pair;
            let previous = (cursor + 2) % 3;
            engine.pipes[cursor] = PipePair::new(-32, 64);
            engine.tick();
            assert_eq!(engine.next_pipe(), expected);
            assert_eq!(engine.pipes[cursor].x() - engine.pipes[previous].x(), 320);
        }
    }

    #[test]
    fn scenario_d_exact_pass_scores_once() {
        let mut engine = engine();
        engine.drain_notices();
        engine.process_input(false, true);
        line_up_score(&mut engine);

        let result = engine.tick();
        assert_eq!(result, TickResult { collided: false, scored: true });
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.best(), 1);
        assert_eq!(engine.drain_notices(), vec![Notice::Scored { score: 1 }]);

        // The trailing edge has moved past the bird; no second point.
        assert!(!engine.tick().scored);
        assert_eq!(engine.score(), 1);
    }

    #[test]
    fn test_scoring_below_best_keeps_best() {
        let mut engine = engine();
        engine.best = 10;
        engine.score = 2;
        engine.process_input(false, true);
        line_up_score(&mut engine);
        assert!(engine.tick().scored);
        assert_eq!(engine.score(), 3);
        assert_eq!(engine.best(), 10);
    }

    #[test]
    fn test_off_by_one_step_does_not_score() {
        let mut engine = engine();
        engine.process_input(false, true);
        let y = engine.bird().get_pos().1;
        // Trailing edge lands at 201 after the scroll, then 199.
        engine.pipes[0] = PipePair::new(game::BIRD_X - game::PIPE_WIDTH + game::PIPE_SPEED + 1, y - 32);
        assert!(!engine.tick().scored);
        assert!(!engine.tick().scored);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_best_is_monotonic_over_long_runs() {
        let mut engine = Engine::new(ChaCha8Rng::seed_from_u64(3));
        let mut best = engine.best();
        for tick in 0..20_000u32 {
            // Flap every 20 ticks to keep the bird around mid-height.
            engine.process_input(tick % 20 == 0, false);
            engine.tick();
            assert!(engine.best() >= best);
            assert!(engine.best() >= engine.score());
            best = engine.best();
            assert_pairing(&engine);
        }
    }

    #[test]
    fn test_notice_text() {
        assert_eq!(Notice::Scored { score: 3 }.to_string(), "FunkyBird - 3");
        assert_eq!(Notice::RunOver { best: 5, last: 2 }.to_string(), "FunkyBird - Best: 5 Last: 2");
    }
}
