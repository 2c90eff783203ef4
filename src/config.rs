use std::{collections::HashMap, fmt::Debug, path::PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use derive_deref::{Deref, DerefMut};
use ratatui::style::{Color, Modifier, Style};
use serde::{
    de::{self, Deserializer},
    Deserialize,
};

use crate::{
    action::{Action, ActionState, Command, GameAction},
    pages::PageId,
};

const CONFIG: &str = include_str!("../.config/config.yaml");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub _data_dir: PathBuf,
    #[serde(default)]
    pub _config_dir: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub styles: Styles,
}

impl Config {
    pub fn new() -> Result<Self, config::ConfigError> {
        let default_config: Config =
            serde_yaml::from_str(CONFIG).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        let data_dir = crate::utils::get_data_dir();
        let config_dir = crate::utils::get_config_dir();
        let mut builder = config::Config::builder()
            .set_default("_data_dir", data_dir.to_string_lossy().as_ref())?
            .set_default("_config_dir", config_dir.to_string_lossy().as_ref())?;

        let config_files = [("config.yaml", config::FileFormat::Yaml)];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(config::File::from(config_dir.join(file)).format(*format).required(false));
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::info!("No user configuration found in {}, using defaults", config_dir.display());
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        cfg.merge_defaults(default_config);

        Ok(cfg)
    }

    /// Fills in every binding and style the user left out.
    fn merge_defaults(&mut self, default_config: Config) {
        for (scope, default_bindings) in default_config.keybindings.pages {
            let user_bindings = self.keybindings.pages.entry(scope).or_default();
            for (key, cmd) in default_bindings.0 {
                user_bindings.0.entry(key).or_insert(cmd);
            }
        }
        let user_bindings = &mut self.keybindings.global;
        for (key, cmd) in default_config.keybindings.global.0 {
            user_bindings.0.entry(key).or_insert(cmd);
        }
        for (scope, default_styles) in default_config.styles.0 {
            let user_styles = self.styles.entry(scope).or_default();
            for (name, style) in default_styles {
                user_styles.entry(name).or_insert(style);
            }
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
struct _RawPageKeyBindings {
    pub click: Option<HashMap<String, String>>,
    pub hold: Option<HashMap<String, String>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
struct _RawKeyBindings {
    #[serde(default)]
    pub global: _RawPageKeyBindings,
    #[serde(default)]
    pub pages: HashMap<String, _RawPageKeyBindings>,
}

#[derive(Clone, Debug, Default)]
pub struct PageKeyBindings(pub HashMap<KeyEvent, Action>);

#[derive(Clone, Debug, Default)]
pub struct KeyBindings {
    pub global: PageKeyBindings,
    pub pages: HashMap<PageId, PageKeyBindings>,
}

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw_keybindings: _RawKeyBindings = _RawKeyBindings::deserialize(deserializer)?;

        let global_keybindings = PageKeyBindings(
            parse_global_keybindings(&raw_keybindings.global)
                .map_err(de::Error::custom)?
                .into_iter()
                .map(|(event, (command, state))| (event, Action { command, state }))
                .collect(),
        );
        let page_keybindings = raw_keybindings
            .pages
            .iter()
            .map(|(page, keybindings)| match_page_keybindings(page, keybindings))
            .collect::<Result<_, String>>()
            .map_err(de::Error::custom)?;

        Ok(KeyBindings { global: global_keybindings, pages: page_keybindings })
    }
}

macro_rules! parse_and_map_actions {
    ( $( ( $page_id_variant:path, $action_type:ty, $action_variant:path ) ),* ) => {
        fn match_page_keybindings(
            page: &str,
            raw_page_keybindings: &_RawPageKeyBindings,
        ) -> Result<(PageId, PageKeyBindings), String> {
            let page_id: PageId = serde_yaml::from_str(page).map_err(|e| format!("Unknown page `{page}`: {e}"))?;
            let map = match page_id {
                $(
                    $page_id_variant => {
                        parse_page_keybindings::<$action_type>(raw_page_keybindings)?
                            .into_iter()
                            .map(|(event, (command, state))| (event, Action { command: $action_variant(command), state }))
                            .collect()
                    },
                )*
            };

            Ok((page_id, PageKeyBindings(map)))
        }
    };
}

parse_and_map_actions![(PageId::Game, GameAction, Command::Game)];

fn parse_binding_pairs<T>(map: &Option<HashMap<String, String>>) -> Result<HashMap<KeyEvent, T>, String>
where
    T: for<'a> Deserialize<'a>,
{
    let Some(inner_map) = map else {
        return Ok(HashMap::new());
    };
    inner_map
        .iter()
        .map(|(key_str, action_str)| -> Result<(KeyEvent, T), String> {
            let action: T =
                serde_yaml::from_str(action_str).map_err(|e| format!("Unknown command `{action_str}`: {e}"))?;
            Ok((parse_key_event(key_str)?, action))
        })
        .collect()
}

fn parse_global_keybindings(
    raw_keybindings: &_RawPageKeyBindings,
) -> Result<HashMap<KeyEvent, (Command, ActionState)>, String> {
    let click_keybindings = parse_binding_pairs(&raw_keybindings.click)?;
    let hold_keybindings = parse_binding_pairs(&raw_keybindings.hold)?;

    Ok(merge_keybinding_maps(click_keybindings, hold_keybindings))
}

fn parse_page_keybindings<T>(
    raw_page_keybindings: &_RawPageKeyBindings,
) -> Result<HashMap<KeyEvent, (T, ActionState)>, String>
where
    T: for<'a> Deserialize<'a> + Clone + Debug,
{
    let click_keybindings = parse_binding_pairs(&raw_page_keybindings.click)?;
    let hold_keybindings = parse_binding_pairs(&raw_page_keybindings.hold)?;

    Ok(merge_keybinding_maps(click_keybindings, hold_keybindings))
}

/// Click bindings fire once on press. Hold bindings fire on press, repeat and
/// release, tagged with the matching [`ActionState`].
fn merge_keybinding_maps<A: Clone>(
    click: HashMap<KeyEvent, A>,
    hold: HashMap<KeyEvent, A>,
) -> HashMap<KeyEvent, (A, ActionState)> {
    let mut click: HashMap<KeyEvent, (A, ActionState)> =
        click.into_iter().map(|(event, command)| (event, (command, ActionState::default()))).collect();
    for (mut key_event, action) in hold {
        click.insert(key_event, (action.clone(), ActionState::Start));
        key_event.kind = KeyEventKind::Release;
        click.insert(key_event, (action.clone(), ActionState::End));
        key_event.kind = KeyEventKind::Repeat;
        click.insert(key_event, (action, ActionState::Repeat));
    }

    click
}

pub fn parse_key_event(raw: &str) -> Result<KeyEvent, String> {
    if raw.chars().filter(|c| *c == '>').count() != raw.chars().filter(|c| *c == '<').count() {
        return Err(format!("Unable to parse `{}`", raw));
    }
    let raw = if !raw.contains("><") {
        let raw = raw.strip_prefix('<').unwrap_or(raw);
        let raw = raw.strip_prefix('>').unwrap_or(raw);
        raw
    } else {
        raw
    };
    let raw = raw.trim_start_matches('<').trim_end_matches('>');

    let raw_lower = raw.to_ascii_lowercase();
    let (remaining, modifiers) = extract_modifiers(&raw_lower);
    parse_key_code_with_modifiers(remaining, modifiers)
}

fn extract_modifiers(raw: &str) -> (&str, KeyModifiers) {
    let mut modifiers = KeyModifiers::empty();
    let mut current = raw;

    loop {
        match current {
            rest if rest.starts_with("ctrl-") => {
                modifiers.insert(KeyModifiers::CONTROL);
                current = &rest[5..];
            },
            rest if rest.starts_with("alt-") => {
                modifiers.insert(KeyModifiers::ALT);
                current = &rest[4..];
            },
            rest if rest.starts_with("shift-") => {
                modifiers.insert(KeyModifiers::SHIFT);
                current = &rest[6..];
            },
            _ => break,
        };
    }

    (current, modifiers)
}

fn parse_key_code_with_modifiers(raw: &str, mut modifiers: KeyModifiers) -> Result<KeyEvent, String> {
    let c = match raw {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "backtab" => {
            modifiers.insert(KeyModifiers::SHIFT);
            KeyCode::BackTab
        },
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "f1" => KeyCode::F(1),
        "f2" => KeyCode::F(2),
        "f3" => KeyCode::F(3),
        "f4" => KeyCode::F(4),
        "f5" => KeyCode::F(5),
        "f6" => KeyCode::F(6),
        "f7" => KeyCode::F(7),
        "f8" => KeyCode::F(8),
        "f9" => KeyCode::F(9),
        "f10" => KeyCode::F(10),
        "f11" => KeyCode::F(11),
        "f12" => KeyCode::F(12),
        "space" => KeyCode::Char(' '),
        "hyphen" => KeyCode::Char('-'),
        "minus" => KeyCode::Char('-'),
        "tab" => KeyCode::Tab,
        c if c.chars().count() == 1 => {
            let Some(mut c) = c.chars().next() else {
                return Err(format!("Unable to parse {raw}"));
            };
            if modifiers.contains(KeyModifiers::SHIFT) {
                c = c.to_ascii_uppercase();
            }
            KeyCode::Char(c)
        },
        _ => return Err(format!("Unable to parse {raw}")),
    };
    Ok(KeyEvent::new(c, modifiers))
}

pub fn key_event_to_string(key_event: &KeyEvent) -> String {
    let char;
    let key_code = match key_event.code {
        KeyCode::Backspace => "backspace",
        KeyCode::Enter => "enter",
        KeyCode::Left => "left",
        KeyCode::Right => "right",
        KeyCode::Up => "up",
        KeyCode::Down => "down",
        KeyCode::Home => "home",
        KeyCode::End => "end",
        KeyCode::PageUp => "pageup",
        KeyCode::PageDown => "pagedown",
        KeyCode::Tab => "tab",
        KeyCode::BackTab => "backtab",
        KeyCode::Delete => "delete",
        KeyCode::Insert => "insert",
        KeyCode::F(c) => {
            char = format!("f{c}");
            &char
        },
        KeyCode::Char(' ') => "space",
        KeyCode::Char(c) => {
            char = c.to_string();
            &char
        },
        KeyCode::Esc => "esc",
        KeyCode::Null
        | KeyCode::CapsLock
        | KeyCode::Menu
        | KeyCode::ScrollLock
        | KeyCode::Media(_)
        | KeyCode::NumLock
        | KeyCode::PrintScreen
        | KeyCode::Pause
        | KeyCode::KeypadBegin
        | KeyCode::Modifier(_) => "",
    };

    let mut modifiers = Vec::with_capacity(3);

    if key_event.modifiers.intersects(KeyModifiers::CONTROL) {
        modifiers.push("ctrl");
    }

    if key_event.modifiers.intersects(KeyModifiers::ALT) {
        modifiers.push("alt");
    }

    if key_event.modifiers.intersects(KeyModifiers::SHIFT) {
        modifiers.push("shift");
    }

    let mut key = modifiers.join("-");

    if !key.is_empty() {
        key.push('-');
    }
    key.push_str(key_code);

    key
}

/// Named styles per page, e.g. `styles.Game.bird`.
#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct Styles(pub HashMap<PageId, HashMap<String, Style>>);

impl<'de> Deserialize<'de> for Styles {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parsed_map = HashMap::<PageId, HashMap<String, String>>::deserialize(deserializer)?;

        let styles = parsed_map
            .into_iter()
            .map(|(page, inner_map)| {
                let converted_inner_map =
                    inner_map.into_iter().map(|(str, style)| (str, parse_style(&style))).collect();
                (page, converted_inner_map)
            })
            .collect();

        Ok(Styles(styles))
    }
}

pub fn parse_style(line: &str) -> Style {
    let (foreground, background) = line.split_at(line.to_lowercase().find("on ").unwrap_or(line.len()));
    let foreground = process_color_string(foreground);
    let background = process_color_string(&background.replace("on ", ""));

    let mut style = Style::default();
    if let Some(fg) = parse_color(&foreground.0) {
        style = style.fg(fg);
    }
    if let Some(bg) = parse_color(&background.0) {
        style = style.bg(bg);
    }
    style = style.add_modifier(foreground.1 | background.1);
    style
}

fn process_color_string(color_str: &str) -> (String, Modifier) {
    let color = color_str
        .replace("grey", "gray")
        .replace("bright ", "")
        .replace("bold ", "")
        .replace("underline ", "")
        .replace("inverse ", "");

    let mut modifiers = Modifier::empty();
    if color_str.contains("underline") {
        modifiers |= Modifier::UNDERLINED;
    }
    if color_str.contains("bold") {
        modifiers |= Modifier::BOLD;
    }
    if color_str.contains("inverse") {
        modifiers |= Modifier::REVERSED;
    }

    (color, modifiers)
}

fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.contains("color") {
        let c = s.trim_start_matches("color").parse::<u8>().unwrap_or_default();
        Some(Color::Indexed(c))
    } else if s.contains("gray") {
        let c = 232 + s.trim_start_matches("gray").parse::<u8>().unwrap_or_default();
        Some(Color::Indexed(c))
    } else if s.contains("rgb") && s.len() >= 6 {
        let digit = |i: usize| (s.as_bytes()[i] as char).to_digit(10).unwrap_or_default().min(5) as u8;
        let c = 16 + digit(3) * 36 + digit(4) * 6 + digit(5);
        Some(Color::Indexed(c))
    } else {
        match s {
            "black" => Some(Color::Indexed(0)),
            "red" => Some(Color::Indexed(1)),
            "green" => Some(Color::Indexed(2)),
            "yellow" => Some(Color::Indexed(3)),
            "blue" => Some(Color::Indexed(4)),
            "magenta" => Some(Color::Indexed(5)),
            "cyan" => Some(Color::Indexed(6)),
            "white" => Some(Color::Indexed(7)),
            _ => None,
        }
    }
}
