// SPDX-FileCopyrightText: 2025 Contributors to the glapi project.
// SPDX-License-Identifier: Apache-2.0

//! `glapi` command-line tool.

mod cli;

use std::process::ExitCode;

use clap::Parser;
use glapi::{BindingSurface, LibraryResolver, LoadReport, TemplateSet};
use tracing::info;

use crate::cli::Cli;

/// Initializes the tracing subscriber.
///
/// Logs at INFO by default; `RUST_LOG` overrides the filter.
fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
}

fn main() -> ExitCode {
    setup_logging();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("glapi: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> glapi::Result<()> {
    let settings = cli.settings()?;
    let templates = match &cli.templates {
        Some(dir) => TemplateSet::from_dir(dir)?,
        None => TemplateSet::builtin(),
    };

    let surface = glapi::load_surface(&settings)?;
    let header = glapi::render_header(&surface, &templates, &cli.emit_options())?;
    glapi::write_output(&settings.output, &header)?;

    if let Some(path) = &cli.dump_surface {
        glapi::write_output(path, &surface.to_json()?)?;
    }
    if let Some(library) = &cli.check_symbols {
        check_symbols(&surface, LibraryResolver::open(library)?);
    }

    info!(
        output = %settings.output.display(),
        version = %settings.version,
        profile = %settings.profile,
        features = surface.features.len(),
        constants = surface.constant_count(),
        commands = surface.command_count(),
        "Generated loader"
    );
    Ok(())
}

/// Logs, per feature, the entry points `resolver` cannot provide.
fn check_symbols(surface: &BindingSurface, resolver: LibraryResolver) {
    let report = LoadReport::probe(surface, &resolver);
    for feature in report.features.iter().filter(|feature| !feature.missing.is_empty()) {
        info!(
            feature = %feature.name,
            resolved = feature.resolved.len(),
            "Missing: {}",
            feature.missing.join(", ")
        );
    }
    info!(
        resolved = report.resolved_count(),
        missing = report.missing_count(),
        complete = report.is_complete(),
        "Symbol check finished"
    );
}
