//! Tool catalog command handler.

use tabled::Tabled;

use passmeter_core::{CatalogSource, ScoringClient, Tool, load_catalog};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct ToolRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Description")]
    description: String,
}

fn tool_row(t: &Tool) -> ToolRow {
    ToolRow {
        id: t.id.clone(),
        name: format!("{} {}", t.icon, t.name).trim().to_owned(),
        status: if t.available { "available" } else { "coming soon" },
        description: t.description.clone(),
    }
}

pub async fn handle(client: &ScoringClient, global: &GlobalOpts) -> Result<(), CliError> {
    let catalog = load_catalog(client).await;
    if catalog.source == CatalogSource::Fallback && !global.quiet {
        eprintln!("note: scoring service unreachable, showing the built-in catalog");
    }

    let out = output::render_list(&global.output, &catalog.tools, tool_row)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
