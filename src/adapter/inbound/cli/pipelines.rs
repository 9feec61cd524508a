//! `floatarb pipelines`: the closed catalog of source pipelines.

use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::output;
use crate::application::pipeline::{OutputKind, PipelineId};

#[derive(Tabled)]
struct PipelineRow {
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Output")]
    output: &'static str,
    #[tabled(rename = "Description")]
    description: &'static str,
}

impl From<PipelineId> for PipelineRow {
    fn from(id: PipelineId) -> Self {
        Self {
            name: id.name(),
            output: match id.output_kind() {
                OutputKind::Listings => "listings",
                OutputKind::Identity => "identity",
            },
            description: id.description(),
        }
    }
}

/// List every pipeline the registry can build.
pub fn list() {
    if output::is_json() {
        for id in PipelineId::ALL {
            output::emit_json_line(
                "pipeline",
                serde_json::json!({ "name": id.name(), "description": id.description() }),
            );
        }
        return;
    }

    output::section("Available pipelines");
    let rows: Vec<PipelineRow> = PipelineId::ALL.into_iter().map(PipelineRow::from).collect();
    output::table(&Table::new(rows).to_string());
    output::note(&format!(
        "Pick two listing pipelines with {}",
        output::highlight("[matching] source_a / source_b")
    ));
}
