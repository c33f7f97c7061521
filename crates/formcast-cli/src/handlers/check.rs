//! Schema check command handler

use super::utils::open_store;
use crate::cli::CheckArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{ModelCheck, OutputWriter, SchemaReport};
use formcast_schemas::{ModelSource, RequestSchema};
use tracing::{instrument, warn};

/// Handle the check command
///
/// Loads the request schema and resolves every model it references, so
/// configuration faults surface before any request is validated.
#[instrument(skip(config, output), fields(schema = %args.schema.display()))]
pub fn handle_check(args: CheckArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    if !args.schema.exists() {
        return Err(Error::FileNotFound { path: args.schema });
    }
    output.info(&format!("Checking request schema: {}", args.schema.display()))?;

    let schema = RequestSchema::from_path(&args.schema)?;
    let store = open_store(config, args.models.as_deref());

    let models = schema
        .model_names()
        .into_iter()
        .map(|model| ModelCheck {
            model: model.to_string(),
            error: store.resolve(model).err().map(|e| e.to_string()),
        })
        .collect();

    let report = SchemaReport {
        schema: args.schema.display().to_string(),
        fields: schema.fields().len(),
        models,
    };
    output.schema_report(&report)?;

    let missing = report.missing().count();
    if missing > 0 {
        warn!(missing, "Request schema references unresolvable models");
        return Err(Error::other(format!("{missing} model(s) could not be resolved")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_check_reports_missing_models() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("user_seq.json"), r#"{"type": "int"}"#).unwrap();
        let schema = dir.path().join("schema.json");
        fs::write(
            &schema,
            r#"{
                "user_seq": {"type": "item", "format": "user_seq"},
                "icons": {"type": "list", "items": {"type": "item", "format": "icon_path"}}
            }"#,
        )
        .unwrap();

        let args = CheckArgs {
            schema: schema.clone(),
            models: Some(dir.path().to_path_buf()),
        };
        let mut output = OutputWriter::with_writer(OutputFormat::Json, false, true, Box::new(std::io::sink()));
        let err = handle_check(args, &Config::default(), &mut output).unwrap_err();
        assert_eq!(err.to_string(), "1 model(s) could not be resolved");

        fs::write(dir.path().join("icon_path.yaml"), "type: string\n").unwrap();
        let args = CheckArgs {
            schema,
            models: Some(dir.path().to_path_buf()),
        };
        handle_check(args, &Config::default(), &mut output).unwrap();
    }

    #[test]
    fn test_check_rejects_malformed_schema() {
        let dir = tempdir().unwrap();
        let schema = dir.path().join("schema.yaml");
        fs::write(&schema, "broken:\n  type: list\n").unwrap();

        let args = CheckArgs {
            schema,
            models: Some(dir.path().to_path_buf()),
        };
        let mut output = OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(std::io::sink()));
        let err = handle_check(args, &Config::default(), &mut output).unwrap_err();
        assert!(matches!(err, Error::Loader(_)));
    }
}
