pub mod bird;
pub mod engine;
pub mod object;
pub mod pipe;

use std::collections::HashMap;

use color_eyre::eyre::Result;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use rand::{rngs::StdRng, SeedableRng};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Context},
        Block, Paragraph,
    },
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info};

use super::PageId;
use crate::{
    action::{act, Action, ActionState, Command, GameAction},
    components::shapes::FilledRect,
    config::{key_event_to_string, Config, PageKeyBindings},
    constants::game,
    pages::game::{
        engine::Engine,
        object::{Bounds, Object},
    },
};

/// Colours used to draw the scene, overridable through `styles.Game`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub sky: Color,
    pub bird: Color,
    pub pipe: Color,
    pub border: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Palette { sky: game::SKY_COLOR, bird: game::BIRD_COLOR, pipe: game::PIPE_COLOR, border: game::BORDER_COLOR }
    }
}

impl Palette {
    fn from_styles(styles: Option<&HashMap<String, Style>>) -> Self {
        let mut palette = Palette::default();
        let Some(styles) = styles else {
            return palette;
        };
        let pick = |name: &str, fallback: Color| styles.get(name).and_then(|style| style.fg).unwrap_or(fallback);
        palette.sky = pick("sky", palette.sky);
        palette.bird = pick("bird", palette.bird);
        palette.pipe = pick("pipe", palette.pipe);
        palette.border = pick("border", palette.border);
        palette
    }
}

/// The game screen: latches input between ticks, steps the engine once per
/// tick and draws the play area.
pub struct GamePage {
    pub action_tx: Option<UnboundedSender<Action>>,
    pub keymap: PageKeyBindings,
    palette: Palette,
    engine: Engine<StdRng>,
    flap_requested: bool,
    pause_requested: bool,
}

impl GamePage {
    /// A fixed `seed` reproduces the same sequence of pipe gaps.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        GamePage {
            action_tx: None,
            keymap: PageKeyBindings::default(),
            palette: Palette::default(),
            engine: Engine::new(rng),
            flap_requested: false,
            pause_requested: false,
        }
    }

    fn step(&mut self) -> Result<()> {
        let flap = std::mem::take(&mut self.flap_requested);
        let toggle_pause = std::mem::take(&mut self.pause_requested);
        if toggle_pause {
            debug!("Pause toggled");
        }
        self.engine.process_input(flap, toggle_pause);

        let last_score = self.engine.score();
        let result = self.engine.tick();
        if result.collided {
            info!(last_score, best = self.engine.best(), "Run over");
        }
        if result.scored {
            debug!(score = self.engine.score(), "Scored");
        }

        self.publish_notices()
    }

    /// Forwards queued title messages to the app.
    fn publish_notices(&mut self) -> Result<()> {
        let notices = self.engine.drain_notices();
        if let Some(action_tx) = &self.action_tx {
            for notice in notices {
                action_tx.send(act!(Command::SetTitle(notice.to_string())))?;
            }
        }
        Ok(())
    }

    /// Play-area rectangle (y down) to canvas rectangle (y up), clipped to the area.
    fn to_canvas(bounds: Bounds, color: Color) -> Option<FilledRect> {
        let left = bounds.x.max(0);
        let right = bounds.right().min(game::PLAY_WIDTH);
        let top = bounds.y.max(0);
        let bottom = bounds.bottom().min(game::PLAY_HEIGHT);
        if left >= right || top >= bottom {
            return None;
        }
        Some(FilledRect {
            x: left as f64,
            y: (game::PLAY_HEIGHT - bottom) as f64,
            width: (right - left) as f64,
            height: (bottom - top) as f64,
            color,
        })
    }

    fn paint_scene(&self, ctx: &mut Context<'_>) {
        if let Some(bird) = Self::to_canvas(self.engine.bird().bounds(), self.palette.bird) {
            ctx.draw(&bird);
        }
        for rect in self.engine.pipe_rects() {
            if let Some(pipe) = Self::to_canvas(rect, self.palette.pipe) {
                ctx.draw(&pipe);
            }
        }
    }

    /// Keys bound to `action` on this page, sorted, e.g. `"esc"`.
    fn keys_for(&self, action: GameAction) -> Vec<String> {
        let command = Command::Game(action);
        let mut keys: Vec<String> = self
            .keymap
            .0
            .iter()
            .filter(|(_, bound)| bound.command == command && bound.state == ActionState::Start)
            .map(|(key, _)| key_event_to_string(key))
            .collect();
        keys.sort();
        keys
    }

    fn pause_hint(&self) -> String {
        let flap = self.keys_for(GameAction::Flap);
        let toggle = self.keys_for(GameAction::TogglePause);
        let mut hint = if flap.is_empty() {
            "Paused: flap to play".to_string()
        } else {
            format!("Paused: {} or click to play", flap.join("/"))
        };
        if !toggle.is_empty() {
            hint.push_str(&format!(", {} to toggle pause", toggle.join("/")));
        }
        hint
    }

    fn status_line(&self) -> Line<'static> {
        let mut spans = vec![
            Span::raw(format!(" Score: {} ", self.engine.score())).bold(),
            Span::raw(format!(" Best: {} ", self.engine.best())),
        ];
        if self.engine.is_paused() {
            spans.push(Span::raw(format!(" {} ", self.pause_hint())).italic());
        }
        Line::from(spans)
    }

    #[cfg(test)]
    fn engine(&self) -> &Engine<StdRng> {
        &self.engine
    }

    pub fn id(&self) -> PageId {
        PageId::Game
    }

    pub fn register_action_handler(&mut self, tx: UnboundedSender<Action>) {
        self.action_tx = Some(tx);
    }

    /// Picks up this page's key bindings (for the pause hint) and palette.
    pub fn register_config_handler(&mut self, config: &Config) {
        if let Some(keymap) = config.keybindings.pages.get(&self.id()) {
            self.keymap = keymap.clone();
        }
        self.palette = Palette::from_styles(config.styles.get(&self.id()));
    }

    pub fn init(&mut self) -> Result<()> {
        // Title for the initial reset.
        self.publish_notices()
    }

    pub fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(act!(Command::Game(GameAction::Flap))),
            _ => None,
        }
    }

    pub fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action.command {
            Command::Game(GameAction::Flap) => self.flap_requested = true,
            // A second toggle before the next tick cancels the first.
            Command::Game(GameAction::TogglePause) => self.pause_requested = !self.pause_requested,
            Command::Tick => self.step()?,
            _ => {},
        }
        Ok(None)
    }

    pub fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let [play_area, status_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        let canvas = Canvas::default()
            .block(Block::bordered().border_style(Style::new().fg(self.palette.border)))
            .marker(Marker::HalfBlock)
            .background_color(self.palette.sky)
            .x_bounds([0.0, game::PLAY_WIDTH as f64])
            .y_bounds([0.0, game::PLAY_HEIGHT as f64])
            .paint(|ctx| self.paint_scene(ctx));
        f.render_widget(canvas, play_area);

        f.render_widget(Paragraph::new(self.status_line()), status_area);
    }
}
