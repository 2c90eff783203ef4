use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Borders, Clear, Padding, Row, Table, Widget},
};

use crate::{
    action::ActionState,
    config::{key_event_to_string, PageKeyBindings},
};

const COLUMN_SPACING: u16 = 5;
const MARGIN_VERTICAL: u16 = 1;
const MARGIN_HORIZONTAL: u16 = 2;

/// Overlay listing key bindings, one bordered table per group.
#[derive(Debug)]
pub struct Help {
    groups: Vec<(String, Vec<(String, String)>)>,
}

impl Help {
    pub fn new(keybinding_groups: Vec<(String, PageKeyBindings)>) -> Self {
        let groups = keybinding_groups
            .into_iter()
            .map(|(group_name, keybindings)| {
                let mut keybindings: Vec<(String, String)> = keybindings
                    .0
                    .into_iter()
                    .filter(|(_, action)| action.state == ActionState::Start)
                    .map(|(event, action)| (key_event_to_string(&event), action.command.string()))
                    .collect();
                keybindings.sort();
                (group_name, keybindings)
            })
            .collect();

        Self { groups }
    }

    fn key_width(&self) -> u16 {
        self.groups.iter().flat_map(|(_, rows)| rows.iter().map(|(key, _)| key.len())).max().unwrap_or(0) as u16
    }

    fn command_width(&self) -> u16 {
        self.groups.iter().flat_map(|(_, rows)| rows.iter().map(|(_, cmd)| cmd.len())).max().unwrap_or(0) as u16
    }

    fn render_group(name: &str, rows: &[(String, String)], key_width: u16, area: Rect, buf: &mut Buffer) {
        let rows: Vec<Row> = rows.iter().map(|(key, cmd)| Row::new(vec![key.clone(), cmd.clone()])).collect();
        let table = Table::new(rows, [Constraint::Length(key_width), Constraint::Min(0)])
            .column_spacing(COLUMN_SPACING)
            .header(Row::new(vec!["Key", "Command"]).style(Style::new().bold()).bottom_margin(1))
            .block(
                Block::new()
                    .title(name.to_string())
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::new().bold().fg(Color::Cyan))
                    .padding(Padding::symmetric(MARGIN_HORIZONTAL, MARGIN_VERTICAL)),
            );

        Clear.render(area, buf);
        table.render(area, buf);
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let key_width = self.key_width();
        // columns + spacing + padding + border
        let width = key_width + self.command_width() + COLUMN_SPACING + MARGIN_HORIZONTAL * 2 + 2;
        // rows + padding + header with its margin + border
        let heights = self.groups.iter().map(|(_, rows)| Constraint::Length(rows.len() as u16 + MARGIN_VERTICAL * 2 + 2 + 2));

        let [area] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(area);
        let areas = Layout::vertical(heights).flex(Flex::Center).split(area);

        for ((name, rows), area) in self.groups.iter().zip(areas.iter()) {
            Self::render_group(name, rows, key_width, *area, buf);
        }
    }
}
