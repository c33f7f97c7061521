//! Validation command handler

use super::utils::{load_parameters, open_store};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{redaction, timing::Timer};
use crate::output::OutputWriter;
use formcast_core::RequestValidator;
use formcast_schemas::RequestSchema;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(skip(config, output), fields(params = %args.params.display(), schema = %args.schema.display()))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("params: {}", args.params.display()));
    output.info(&format!(
        "Validating {} against {}",
        args.params.display(),
        args.schema.display()
    ))?;

    if !args.schema.exists() {
        return Err(Error::FileNotFound { path: args.schema });
    }
    let schema = RequestSchema::from_path(&args.schema)?;
    debug!(fields = schema.fields().len(), "Request schema loaded");

    let params = load_parameters(&args.params)?;
    let mut logged = Value::Object(params.clone());
    redaction::redact_json_value(&mut logged);
    debug!(params = %logged, "Request parameters loaded");

    let mut validator_config = config.validator_config();
    if let Some(policy) = args.policy {
        validator_config = validator_config.with_condition_policy(policy.into());
    }

    let store = open_store(config, args.models.as_deref());
    let validator = RequestValidator::with_config(store, validator_config);

    let outcome = {
        let _validation_timer = Timer::new("request_validation");
        validator.validate(&schema, &params)?
    };
    output.outcome(&outcome)?;

    if outcome.is_valid() {
        info!("Parameters are valid");
        Ok(())
    } else {
        warn!(errors = outcome.errors().len(), "Parameters failed validation");
        Err(Error::ValidationFailed {
            count: outcome.errors().len(),
        })
    }
}
