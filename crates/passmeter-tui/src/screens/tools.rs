//! Tools screen: the security tool catalog.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use passmeter_core::catalog::PASSWORD_VALIDATOR_ID;
use passmeter_core::{Catalog, CatalogSource, Tool};

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::theme;

pub struct ToolsScreen {
    focused: bool,
    catalog: Option<Arc<Catalog>>,
    selected: usize,
    notice: Option<String>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl ToolsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            catalog: None,
            selected: 0,
            notice: None,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn tools(&self) -> &[Tool] {
        self.catalog
            .as_deref()
            .map(|c| c.tools.as_slice())
            .unwrap_or_default()
    }

    fn select_next(&mut self) {
        let len = self.tools().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Only the password validator has a screen behind it.
    fn open_selected(&mut self) -> Option<Action> {
        let tool = self.tools().get(self.selected)?;
        if tool.available && tool.id == PASSWORD_VALIDATOR_ID {
            self.notice = None;
            Some(Action::SwitchScreen(ScreenId::Validator))
        } else {
            self.notice = Some(format!("{} is coming soon", tool.name));
            None
        }
    }

    fn render_list(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .title(Span::styled(" Security Tools ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);

        if self.catalog.is_none() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let throbber = throbber_widgets_tui::Throbber::default()
                .label("  Loading tools...")
                .style(Style::default().fg(theme::NEON_CYAN))
                .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
            frame.render_stateful_widget(throbber, inner, &mut self.throbber_state.clone());
            return;
        }

        let items: Vec<ListItem> = self
            .tools()
            .iter()
            .map(|tool| {
                let status = if tool.available {
                    Span::styled("available", Style::default().fg(theme::SUCCESS_GREEN))
                } else {
                    Span::styled("coming soon", theme::key_hint())
                };
                ListItem::new(vec![
                    Line::from(vec![
                        Span::raw(format!(" {} ", tool.icon)),
                        Span::styled(tool.name.clone(), theme::title_style()),
                        Span::raw("  "),
                        status,
                    ]),
                    Line::from(Span::styled(
                        format!("    {}", tool.description),
                        theme::table_row(),
                    )),
                ])
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(theme::table_selected());
        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(ref notice) = self.notice {
            Line::from(Span::styled(format!(" {notice}"), theme::warning()))
        } else if self
            .catalog
            .as_ref()
            .is_some_and(|c| c.source == CatalogSource::Fallback)
        {
            Line::from(Span::styled(
                " Service unreachable, showing the built-in catalog",
                theme::key_hint(),
            ))
        } else {
            Line::default()
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Default for ToolsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ToolsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Ok(None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_prev();
                Ok(None)
            }
            KeyCode::Enter => Ok(self.open_selected()),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::CatalogLoaded(catalog) => {
                self.catalog = Some(Arc::clone(catalog));
                self.selected = self.selected.min(catalog.tools.len().saturating_sub(1));
            }
            Action::Tick if self.catalog.is_none() => {
                self.throbber_state.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).split(area);
        self.render_list(frame, layout[0]);
        self.render_footer(frame, layout[1]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.notice = None;
        }
    }

    fn key_hints(&self) -> &'static str {
        "↑/↓ select  Enter open"
    }
}
