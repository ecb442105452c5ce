// SPDX-FileCopyrightText: 2026 OmniPA Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `omnipa route` command implementation.
//!
//! Reads a chat request body, validates it at the boundary, and prints the
//! routing decision as JSON. The router itself cannot fail; every error here
//! comes from reading or validating the request.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use omnipa_config::OmnipaConfig;
use omnipa_core::{parse_router_input_str, ModelSelection, OmnipaError};
use omnipa_router::ModelSelector;
use tracing::{info, warn};

/// Run the `omnipa route` command.
///
/// Reads from `input` or stdin when `None`. With `lenient`, a request that
/// fails validation is answered with the caller default instead of an error.
pub fn run_route(
    config: &OmnipaConfig,
    input: Option<&Path>,
    lenient: bool,
    out: &mut impl Write,
) -> Result<(), OmnipaError> {
    let selector = ModelSelector::new(config.routing.clone());

    let selection = match input {
        Some(path) => route_reader(&selector, File::open(path)?, lenient)?,
        None => route_reader(&selector, io::stdin().lock(), lenient)?,
    };

    info!(
        tier = %selection.tier,
        model = selection.model.as_str(),
        confidence = selection.confidence,
        "routing decision"
    );

    serde_json::to_writer_pretty(&mut *out, &selection)?;
    writeln!(out)?;
    Ok(())
}

/// Read one request body from `reader` and route it.
pub fn route_reader(
    selector: &ModelSelector,
    mut reader: impl Read,
    lenient: bool,
) -> Result<ModelSelection, OmnipaError> {
    let mut body = String::new();
    reader.read_to_string(&mut body)?;

    match parse_router_input_str(&body) {
        Ok(input) => Ok(selector.select(&input)),
        Err(err) if lenient => {
            warn!(error = %err, "request rejected, using caller default");
            Ok(ModelSelection::caller_default(
                &selector.config().capable_model,
            ))
        }
        Err(err) => Err(err),
    }
}
