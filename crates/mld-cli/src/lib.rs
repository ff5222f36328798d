//! MLD demo host
//!
//! Loads a service configuration, assembles every chain against the
//! built-in model and decorator registries, and exposes the result as
//! JSON documents for the `mld` binary.

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod models;

use anyhow::{bail, Context};
use mld_chain::{AssembledService, ChainAssembler, DecoratorRegistry, ServiceConfig};
use mld_contract::Record;
use mld_model::Model;
use serde_json::{json, Value};
use std::path::Path;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Assembler over the demo models and built-in decorators
#[must_use]
pub fn assembler() -> ChainAssembler {
    ChainAssembler::new(DecoratorRegistry::with_defaults(), models::registry())
}

/// Load a configuration file and assemble every chain it declares
///
/// # Errors
/// Fails if the file cannot be loaded or any chain cannot be assembled
pub fn load_service(path: &Path) -> anyhow::Result<AssembledService> {
    let config = ServiceConfig::from_path(path)
        .with_context(|| format!("failed to load service configuration {}", path.display()))?;
    let service = assembler()
        .assemble(&config)
        .with_context(|| format!("failed to assemble service from {}", path.display()))?;

    tracing::info!(
        path = %path.display(),
        title = service.title().unwrap_or_default(),
        models = service.len(),
        "service assembled"
    );
    Ok(service)
}

/// Identity and contract documentation for one served model
#[must_use]
pub fn describe(model: &dyn Model) -> Value {
    json!({
        "qualified_name": model.qualified_name(),
        "display_name": model.display_name(),
        "version": model.version(),
        "description": model.description(),
        "input_schema": model.input_contract().json_schema(),
        "output_schema": model.output_contract().json_schema(),
    })
}

/// Documentation for every served model, in configuration order
#[must_use]
pub fn describe_service(service: &AssembledService) -> Value {
    let models: Vec<Value> = service.iter().map(|(_, model)| describe(model.as_ref())).collect();
    json!({
        "service_title": service.title(),
        "models": models,
    })
}

/// Run one prediction against a served model
///
/// `input` is a JSON object.
///
/// # Errors
/// Fails for unknown models, malformed input or a failed prediction
pub fn predict(service: &AssembledService, qualified_name: &str, input: &str) -> anyhow::Result<Value> {
    let Some(model) = service.get(qualified_name) else {
        let served: Vec<&str> = service.names().collect();
        bail!("model '{qualified_name}' is not served (available: {})", served.join(", "));
    };

    let record: Record = serde_json::from_str(input).context("input must be a JSON object")?;
    let output = model
        .predict(&record)
        .with_context(|| format!("prediction by '{qualified_name}' failed"))?;

    Ok(serde_json::to_value(output)?)
}

/// Registered base models and decorators
#[must_use]
pub fn catalog() -> Value {
    let assembler = assembler();
    json!({
        "models": assembler.models().names(),
        "decorators": assembler.decorators().names(),
    })
}
