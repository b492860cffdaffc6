//! Five-segment strength meter: `━━━ ━━━ ━━━ ─── ───  Fair`.
//!
//! Filled segments take the service's color token; the label follows.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use passmeter_core::StrengthMeter;

use crate::theme;

const FILLED: &str = "━━━━";
const EMPTY: &str = "────";

pub struct StrengthMeterWidget<'a> {
    meter: &'a StrengthMeter,
}

impl<'a> StrengthMeterWidget<'a> {
    pub fn new(meter: &'a StrengthMeter) -> Self {
        Self { meter }
    }
}

impl Widget for StrengthMeterWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = theme::token_color(&self.meter.color);

        let mut spans: Vec<Span> = Vec::with_capacity(self.meter.segments().len() * 2 + 2);
        for filled in self.meter.segments() {
            let span = if filled {
                Span::styled(FILLED, Style::default().fg(color))
            } else {
                Span::styled(EMPTY, Style::default().fg(theme::BORDER_GRAY))
            };
            spans.push(span);
            spans.push(Span::raw(" "));
        }
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            self.meter.label.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
