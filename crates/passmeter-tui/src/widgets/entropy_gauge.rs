//! Entropy gauge. One percent of fill per bit, capped at 100 bits.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Gauge, Widget},
};

use passmeter_core::EntropyLevel;
use passmeter_core::present::entropy_fill_percent;

use crate::theme;

pub struct EntropyGauge {
    bits: f64,
}

impl EntropyGauge {
    pub fn new(bits: f64) -> Self {
        Self { bits }
    }

    fn label(&self) -> String {
        format!(
            "{:.1} bits, {}",
            self.bits,
            EntropyLevel::classify(self.bits).label()
        )
    }
}

impl Widget for EntropyGauge {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let level = EntropyLevel::classify(self.bits);
        let ratio = (entropy_fill_percent(self.bits) / 100.0).clamp(0.0, 1.0);

        Gauge::default()
            .ratio(ratio)
            .label(self.label())
            .gauge_style(
                Style::default()
                    .fg(theme::token_color(level.color_token()))
                    .bg(theme::BG_HIGHLIGHT),
            )
            .render(area, buf);
    }
}
