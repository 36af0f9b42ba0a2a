// SPDX-FileCopyrightText: 2025 Contributors to the glapi project.
// SPDX-License-Identifier: Apache-2.0

//! Command-line options.

use std::path::PathBuf;

use clap::Parser;
use glapi::{
    EmitOptions, GlVersion, Profile, Settings, TypeSpelling,
    config::{output_in_dir, validate_input},
};

/// Generates a single-header OpenGL function loader from the Khronos XML registry.
///
/// Values are taken as plain strings and validated by [`Cli::settings`], so a bad
/// version or path is reported as `glapi: <reason>` with exit status 1.
#[derive(Debug, Parser)]
#[command(name = "glapi")]
pub struct Cli {
    /// OpenGL version to expose: 1.0-1.5, 2.0, 2.1, 3.0-3.3 or 4.0-4.6.
    #[arg(short = 'v', long = "version", value_name = "VERSION", default_value = "4.6")]
    pub gl_version: String,

    /// Context profile: core or compatibility.
    #[arg(short = 'p', long, default_value = "core")]
    pub profile: String,

    /// Path to the registry; the file must be named gl.xml.
    #[arg(short = 'i', long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Directory to write glapi.h into.
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Read loader.txt, api-dec.txt, api-def.txt and api-static.txt from DIR
    /// instead of the built-in templates.
    #[arg(short = 't', long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Emit full declared C types (`const GLfloat *`) rather than the bare type names.
    #[arg(long)]
    pub declared_types: bool,

    /// Also write the binding surface as JSON to FILE.
    #[arg(long, value_name = "FILE")]
    pub dump_surface: Option<PathBuf>,

    /// Open LIB and report which entry points of the surface it resolves.
    #[arg(long, value_name = "LIB")]
    pub check_symbols: Option<PathBuf>,
}

impl Cli {
    /// Validates the options and builds the generation settings.
    pub fn settings(&self) -> glapi::Result<Settings> {
        let defaults = Settings::default();
        Ok(Settings {
            version: self.gl_version.parse::<GlVersion>()?,
            profile: self.profile.parse::<Profile>()?,
            input: match &self.input {
                Some(path) => validate_input(path)?,
                None => defaults.input,
            },
            output: match &self.output {
                Some(dir) => output_in_dir(dir)?,
                None => defaults.output,
            },
            api: defaults.api,
        })
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            spelling: if self.declared_types {
                TypeSpelling::Declared
            } else {
                TypeSpelling::Marker
            },
            ..EmitOptions::default()
        }
    }
}
