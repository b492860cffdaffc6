//! Validator screen: live password strength feedback.
//!
//! The orchestrator lives only while this screen is active. Focusing the
//! screen mounts a fresh orchestrator and state bridge; leaving it shuts
//! both down and wipes the field.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tui_input::{Input, InputRequest};

use passmeter_core::present::check_rows;
use passmeter_core::{
    AnalysisResult, OrchestratorConfig, OrchestratorState, ScoringClient, StrengthMeter,
    ValidationOrchestrator,
};

use crate::action::Action;
use crate::component::Component;
use crate::screen::ScreenId;
use crate::state_bridge::spawn_state_bridge;
use crate::theme;
use crate::widgets::entropy_gauge::EntropyGauge;
use crate::widgets::strength_meter::StrengthMeterWidget;

const MASK: &str = "●";

pub struct ValidatorScreen {
    focused: bool,
    client: Arc<ScoringClient>,
    config: OrchestratorConfig,
    action_tx: Option<UnboundedSender<Action>>,
    orchestrator: Option<ValidationOrchestrator<ScoringClient>>,
    bridge_cancel: CancellationToken,
    input: Input,
    show_password: bool,
    state: Arc<OrchestratorState>,
    throbber_state: throbber_widgets_tui::ThrobberState,
}

impl ValidatorScreen {
    pub fn new(client: Arc<ScoringClient>, config: OrchestratorConfig) -> Self {
        Self {
            focused: false,
            client,
            config,
            action_tx: None,
            orchestrator: None,
            bridge_cancel: CancellationToken::new(),
            input: Input::default(),
            show_password: false,
            state: Arc::new(OrchestratorState::default()),
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        }
    }

    fn mount(&mut self) {
        if self.orchestrator.is_some() {
            return;
        }
        let orchestrator = ValidationOrchestrator::new(Arc::clone(&self.client), self.config);
        self.bridge_cancel = CancellationToken::new();
        if let Some(ref tx) = self.action_tx {
            spawn_state_bridge(
                orchestrator.subscribe(),
                tx.clone(),
                self.bridge_cancel.clone(),
            );
        }
        self.orchestrator = Some(orchestrator);
        debug!("validator mounted");
    }

    fn unmount(&mut self) {
        if let Some(mut orchestrator) = self.orchestrator.take() {
            orchestrator.shutdown();
            debug!("validator unmounted");
        }
        self.bridge_cancel.cancel();
        self.input.reset();
        self.show_password = false;
        self.state = Arc::new(OrchestratorState::default());
    }

    fn notify_input(&mut self) {
        if let Some(ref mut orchestrator) = self.orchestrator {
            orchestrator.on_input_change(self.input.value());
        }
    }

    fn input_request(key: KeyEvent) -> Option<InputRequest> {
        let plain = !key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        match key.code {
            KeyCode::Char(c) if plain => Some(InputRequest::InsertChar(c)),
            KeyCode::Backspace => Some(InputRequest::DeletePrevChar),
            KeyCode::Delete => Some(InputRequest::DeleteNextChar),
            KeyCode::Left => Some(InputRequest::GoToPrevChar),
            KeyCode::Right => Some(InputRequest::GoToNextChar),
            KeyCode::Home => Some(InputRequest::GoToStart),
            KeyCode::End => Some(InputRequest::GoToEnd),
            _ => None,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    fn render_input(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let title = if self.show_password {
            " Password (visible) "
        } else {
            " Password "
        };
        let block = Block::default()
            .title(Span::styled(title, theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style);

        let (text, cursor) = if self.show_password {
            (self.input.value().to_owned(), self.input.visual_cursor())
        } else {
            (
                MASK.repeat(self.input.value().chars().count()),
                self.input.cursor(),
            )
        };

        let inner = block.inner(area);
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(theme::NEON_CYAN))).block(block),
            area,
        );

        if self.focused && inner.width > 0 {
            let offset = u16::try_from(cursor).unwrap_or(u16::MAX);
            let x = inner.x.saturating_add(offset.min(inner.width - 1));
            frame.set_cursor_position(Position::new(x, inner.y));
        }
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        if let Some(ref error) = self.state.error {
            let line = Line::from(vec![
                Span::styled(format!(" ⚠ {error}"), theme::error_banner()),
                Span::styled("  Esc dismiss", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(line), area);
        } else if self.state.loading {
            let throbber = throbber_widgets_tui::Throbber::default()
                .label(" Analyzing...")
                .style(Style::default().fg(theme::NEON_CYAN))
                .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
            frame.render_stateful_widget(throbber, area, &mut self.throbber_state.clone());
        }
    }

    fn render_result(frame: &mut Frame, area: Rect, result: &AnalysisResult) {
        let layout = Layout::vertical([
            Constraint::Length(1), // Strength meter
            Constraint::Length(1), // Entropy gauge
            Constraint::Length(1), // Common-password warning
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Checks | feedback
        ])
        .split(area);

        frame.render_widget(
            StrengthMeterWidget::new(&StrengthMeter::from_result(result)),
            layout[0],
        );
        frame.render_widget(EntropyGauge::new(result.entropy_bits), layout[1]);

        if result.is_common {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    " ⚠ This password appears in lists of common passwords",
                    theme::error_banner(),
                )),
                layout[2],
            );
        }

        let columns =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(layout[4]);
        Self::render_checks(frame, columns[0], result);
        Self::render_feedback(frame, columns[1], result);
    }

    fn render_checks(frame: &mut Frame, area: Rect, result: &AnalysisResult) {
        let lines: Vec<Line> = check_rows(&result.checks)
            .into_iter()
            .map(|row| {
                let (mark, color) = if row.passed {
                    ("✓", theme::SUCCESS_GREEN)
                } else {
                    ("✗", theme::ERROR_RED)
                };
                Line::from(vec![
                    Span::styled(format!(" {mark} "), Style::default().fg(color)),
                    Span::styled(row.label, theme::table_row()),
                ])
            })
            .collect();

        let block = Block::default()
            .title(Span::styled(" Checks ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_feedback(frame: &mut Frame, area: Rect, result: &AnalysisResult) {
        let mut lines: Vec<Line> = Vec::new();
        for tip in &result.tips {
            lines.push(Line::from(vec![
                Span::styled(" • ", theme::warning()),
                Span::styled(tip.clone(), theme::table_row()),
            ]));
        }
        if !result.tips.is_empty() && !result.positive_feedbacks.is_empty() {
            lines.push(Line::default());
        }
        for positive in &result.positive_feedbacks {
            lines.push(Line::from(vec![
                Span::styled(" ✓ ", Style::default().fg(theme::SUCCESS_GREEN)),
                Span::styled(positive.clone(), theme::table_row()),
            ]));
        }

        let block = Block::default()
            .title(Span::styled(" Feedback ", theme::title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            area,
        );
    }

    fn render_hint(frame: &mut Frame, area: Rect) {
        let hint = Paragraph::new(Line::from(Span::styled(
            " Start typing to check how strong a password is.",
            theme::key_hint(),
        )));
        frame.render_widget(hint, area);
    }
}

impl Component for ValidatorScreen {
    fn init(&mut self, action_tx: UnboundedSender<Action>) -> Result<()> {
        self.action_tx = Some(action_tx);
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('s')) => {
                self.show_password = !self.show_password;
                return Ok(None);
            }
            (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                if !self.input.value().is_empty() {
                    self.input.reset();
                    self.notify_input();
                }
                return Ok(None);
            }
            (_, KeyCode::Esc) => {
                if self.state.error.is_some() {
                    if let Some(ref orchestrator) = self.orchestrator {
                        orchestrator.dismiss_error();
                    }
                    return Ok(None);
                }
                return Ok(Some(Action::SwitchScreen(ScreenId::Tools)));
            }
            _ => {}
        }

        if let Some(request) = Self::input_request(key) {
            if self.input.handle(request).is_some_and(|changed| changed.value) {
                self.notify_input();
            }
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            // Snapshots for text no longer in the field are from a torn-down
            // mount or already superseded.
            Action::ValidationUpdated(state) => {
                if self.orchestrator.is_some() && state.raw_input == self.input.value() {
                    self.state = Arc::clone(state);
                }
            }
            Action::Tick if self.state.loading => {
                self.throbber_state.calc_next();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let layout = Layout::vertical([
            Constraint::Length(3), // Input
            Constraint::Length(1), // Throbber / error banner
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Result
        ])
        .split(area);

        self.render_input(frame, layout[0]);
        self.render_status(frame, layout[1]);

        match self.state.result {
            Some(ref result) => Self::render_result(frame, layout[3], result),
            None if self.input.value().is_empty() => Self::render_hint(frame, layout[3]),
            None => {}
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if focused {
            self.mount();
        } else {
            self.unmount();
        }
    }

    fn wants_text_input(&self) -> bool {
        true
    }

    fn key_hints(&self) -> &'static str {
        "Ctrl+S show/hide  Ctrl+U clear  Esc back"
    }
}

impl Drop for ValidatorScreen {
    fn drop(&mut self) {
        self.bridge_cancel.cancel();
    }
}
