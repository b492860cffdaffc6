//! Component trait: the building block for every screen.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;

/// Lifecycle: `init` → (`set_focused` | `handle_key_event` | `update` | `render`)*
pub trait Component: Send {
    /// Called once at startup with the app's action sender.
    fn init(&mut self, _action_tx: UnboundedSender<Action>) -> Result<()> {
        Ok(())
    }

    /// Handle a keyboard event. Return an Action to dispatch, or None.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Process a dispatched action. May return a follow-up action.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect);

    /// Called when the screen becomes (or stops being) the active one.
    fn set_focused(&mut self, _focused: bool) {}

    /// When `true`, printable keys go to the component instead of the
    /// global keymap.
    fn wants_text_input(&self) -> bool {
        false
    }

    /// Key hints shown in the status bar.
    fn key_hints(&self) -> &'static str {
        ""
    }
}
