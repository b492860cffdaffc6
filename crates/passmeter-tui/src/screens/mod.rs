//! Screen implementations. Each screen is a top-level Component.

pub mod tools;
pub mod validator;

use std::sync::Arc;

use passmeter_core::{OrchestratorConfig, ScoringClient};

use crate::component::Component;
use crate::screen::ScreenId;

/// Create screen components for the tab bar.
pub fn create_screens(
    client: Arc<ScoringClient>,
    config: OrchestratorConfig,
) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Tools, Box::new(tools::ToolsScreen::new())),
        (
            ScreenId::Validator,
            Box::new(validator::ValidatorScreen::new(client, config)),
        ),
    ]
}
