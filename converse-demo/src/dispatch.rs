//! Sends the shared converse request to one or many models
//!
//! The two entry points handle failures differently: `single_converse` only
//! absorbs access-denied errors and returns everything else, while
//! `compare_models` records every failure and keeps going.

use anyhow::{Context, Result};
use llm_client::{ConverseProvider, ConverseRequest, ModelRegistry};
use log::debug;
use serde::Serialize;
use std::io::Write;
use std::time::Instant;

const ACCESS_HINT: &str = "Please ensure you have the necessary permissions for Amazon Bedrock.";

/// Outcome of calling one model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelResult {
    #[serde(skip)]
    pub name: String,
    /// Model text, or "Error: <reason>" when the call failed
    pub response: String,
    /// Seconds taken, rounded to two decimals (None on failure)
    pub time: Option<f64>,
}

impl ModelResult {
    pub fn is_error(&self) -> bool {
        self.response.starts_with("Error:")
    }
}

/// Call a single model and print its answer
///
/// An access-denied reply is reported on `out` and treated as handled. Any
/// other failure is returned.
pub async fn single_converse<W: Write>(
    provider: &dyn ConverseProvider,
    model_id: &str,
    request: &ConverseRequest,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Invoking the basic converse function: \n")?;

    match provider.converse(model_id, request).await {
        Ok(response) => {
            writeln!(out, "{} {} (Converse API)", response.text, response.model_id)?;
        }
        Err(e) if e.is_access_denied() => {
            writeln!(out, "\x1b[41m{}\x1b[0m", e)?;
            writeln!(out, "{}", ACCESS_HINT)?;
        }
        Err(e) => {
            return Err(e).context(format!("Converse call to {} failed", model_id));
        }
    }

    Ok(())
}

/// Call every registered model in order, collecting one result per model
///
/// Never fails: model errors become "Error: ..." records and progress lines
/// that cannot be written are dropped.
pub async fn compare_models<W: Write>(
    provider: &dyn ConverseProvider,
    registry: &ModelRegistry,
    request: &ConverseRequest,
    out: &mut W,
) -> Vec<ModelResult> {
    progress(
        out,
        format_args!("\nInvoking different models with the same converse request: \n"),
    );

    let mut results = Vec::with_capacity(registry.len());

    for entry in registry.iter() {
        debug!("Calling {} ({})", entry.name, entry.id);

        let start = Instant::now();
        match provider.converse(&entry.id, request).await {
            Ok(response) => {
                let time = round_secs(start.elapsed().as_secs_f64());
                results.push(ModelResult {
                    name: entry.name.clone(),
                    response: response.text,
                    time: Some(time),
                });
                progress(
                    out,
                    format_args!(
                        "✅ Successfully called {} (took {} seconds)",
                        entry.name,
                        format_secs(time)
                    ),
                );
            }
            Err(e) => {
                results.push(ModelResult {
                    name: entry.name.clone(),
                    response: format!("Error: {}", e),
                    time: None,
                });
                progress(out, format_args!("❌ Error calling {}: {}", entry.name, e));
            }
        }
    }

    results
}

fn progress<W: Write>(out: &mut W, line: std::fmt::Arguments<'_>) {
    if let Err(e) = writeln!(out, "{}", line) {
        debug!("Progress line not written: {}", e);
    }
}

/// Round seconds to two decimal places
fn round_secs(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}

/// Seconds as printed in progress lines and reports (always with a fraction)
pub fn format_secs(secs: f64) -> String {
    format!("{:?}", secs)
}
