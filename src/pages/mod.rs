use serde::Deserialize;
use strum::Display;

pub mod game;

/// Names a screen in the `keybindings.pages` and `styles` config sections.
#[derive(Debug, Deserialize, Hash, Eq, PartialEq, Clone, Copy, Display)]
pub enum PageId {
    // Some config loaders lowercase keys.
    #[serde(alias = "game")]
    Game,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_page_id_names() {
        assert_eq!(serde_yaml::from_str::<PageId>("Game").unwrap(), PageId::Game);
        assert_eq!(serde_yaml::from_str::<PageId>("game").unwrap(), PageId::Game);
        assert!(serde_yaml::from_str::<PageId>("Home").is_err());
        assert_eq!(PageId::Game.to_string(), "Game");
    }
}
