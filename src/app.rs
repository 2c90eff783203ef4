use color_eyre::eyre::Result;
use ratatui::{
    layout::{Constraint, Layout},
    prelude::Rect,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::{
    action::{act, Action, Command},
    components::help::Help,
    config::Config,
    constants::{HEIGHT, TICK_RATE, TITLE, WIDTH},
    pages::game::GamePage,
    tui,
};

pub struct App {
    config: Config,
    frame_rate: f64,
    should_quit: bool,
    should_suspend: bool,
    show_help: bool,
    page: GamePage,
}

impl App {
    pub fn new(frame_rate: f64, seed: Option<u64>) -> Result<Self> {
        let config = Config::new()?;

        Ok(Self {
            frame_rate,
            should_quit: false,
            should_suspend: false,
            show_help: false,
            config,
            page: GamePage::new(seed),
        })
    }

    fn start_tui(&self) -> Result<tui::Tui> {
        let mut tui = tui::Tui::new()?;
        tui.frame_rate(self.frame_rate);
        tui.mouse(true);
        tui.enter()?;
        tui.set_title(TITLE)?;
        Ok(tui)
    }

    /// Page bindings first, global bindings take precedence.
    fn lookup_key(&self, key: &crossterm::event::KeyEvent) -> Option<Action> {
        let mut action = self.config.keybindings.pages.get(&self.page.id()).and_then(|keymap| keymap.0.get(key));
        if let Some(global) = self.config.keybindings.global.0.get(key) {
            action = Some(global);
        }
        action.cloned()
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        let mut tui = self.start_tui()?;
        info!(tick_rate = TICK_RATE, frame_rate = self.frame_rate, "Started");

        self.page.register_action_handler(action_tx.clone());
        self.page.register_config_handler(&self.config);
        self.page.init()?;

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    tui::Event::Quit => action_tx.send(act!(Command::Quit))?,
                    tui::Event::Tick => action_tx.send(act!(Command::Tick))?,
                    tui::Event::Render => action_tx.send(act!(Command::Render))?,
                    tui::Event::Resize(x, y) => action_tx.send(act!(Command::Resize(x, y)))?,
                    tui::Event::Key(key) => {
                        if let Some(action) = self.lookup_key(&key) {
                            debug!("Got action: {action:?}");
                            action_tx.send(action)?;
                        }
                    },
                    tui::Event::Mouse(mouse) => {
                        if let Some(action) = self.page.handle_mouse_events(mouse) {
                            action_tx.send(action)?;
                        }
                    },
                    _ => {},
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                let Action { command, .. } = &action;
                if *command != Command::Tick && *command != Command::Render {
                    debug!("{command:?}");
                }
                match command {
                    Command::Tick => {},
                    Command::Quit => self.should_quit = true,
                    Command::Suspend => self.should_suspend = true,
                    Command::Resume => self.should_suspend = false,
                    Command::ToggleShowHelp => self.show_help = !self.show_help,
                    Command::SetTitle(title) => tui.set_title(title)?,
                    Command::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                        self.render(&mut tui)?;
                    },
                    Command::Render => {
                        self.render(&mut tui)?;
                    },
                    _ => {},
                }
                // The help overlay freezes the game.
                if !self.show_help {
                    if let Some(action) = self.page.update(action)? {
                        action_tx.send(action)?
                    }
                }
            }
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(act!(Command::Resume))?;
                tui = self.start_tui()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        info!("Quit");
        Ok(())
    }

    fn render(&self, tui: &mut tui::Tui) -> Result<()> {
        let help = if self.show_help { Some(self.help()) } else { None };
        tui.draw(|f| {
            let area = f.area();

            let [_, area, _] =
                Layout::vertical([Constraint::Fill(1), Constraint::Length(HEIGHT), Constraint::Fill(1)]).areas(area);
            let [_, area, _] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(WIDTH), Constraint::Fill(1)]).areas(area);

            self.page.draw(f, area);

            if let Some(help) = help {
                f.render_widget(help, area);
            }
        })?;

        Ok(())
    }

    fn help(&self) -> Help {
        let page_id = self.page.id();
        let mut groups = vec![("System".to_string(), self.config.keybindings.global.clone())];
        if let Some(keymap) = self.config.keybindings.pages.get(&page_id) {
            groups.push((page_id.to_string(), keymap.clone()));
        }
        Help::new(groups)
    }
}
