//! Label command handler

use super::utils::open_store;
use crate::cli::{LabelArgs, OutputFormat};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use formcast_core::RequestValidator;
use serde::Serialize;
use tracing::{debug, instrument};

#[derive(Debug, Serialize)]
struct ModelLabel<'a> {
    model: &'a str,
    label: String,
}

/// Handle the label command
#[instrument(skip(config, output), fields(model = %args.model))]
pub fn handle_label(args: LabelArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let store = open_store(config, args.models.as_deref());
    let leaf = RequestValidator::new(store).leaf(&args.model)?;
    let label = leaf.form_label();
    debug!(label = %label, "Built form label");

    match output.format() {
        OutputFormat::Human => output.writeln(&label),
        _ => output.value(&ModelLabel {
            model: &args.model,
            label,
        }),
    }
}
