//! Reusable widgets for the validator screen.

pub mod entropy_gauge;
pub mod strength_meter;

#[cfg(test)]
pub(crate) fn buffer_text(buf: &ratatui::buffer::Buffer) -> String {
    buf.content().iter().map(ratatui::buffer::Cell::symbol).collect()
}
