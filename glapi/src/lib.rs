// SPDX-FileCopyrightText: 2025 Contributors to the glapi project.
// SPDX-License-Identifier: Apache-2.0

//! # glapi - OpenGL registry compiler
//!
//! Compiles the Khronos OpenGL XML registry into a single C header exposing one
//! version and profile of the API through function pointers that are resolved
//! at runtime.
//!
//! ## Pipeline
//!
//! ```text
//! gl.xml ──► Registry (types/enums/commands) ─────────┐
//!    │                                                ▼
//!    └────► index_features ──────────────────────► accumulate
//!           (per-version blocks)                      │
//!                                                     ▼
//!           glapi.h ◄── TemplateSet ◄── Emitter ◄── BindingSurface
//! ```
//!
//! - [`Registry`] extracts the type aliases, constants and command signatures.
//! - [`feature::index_features`] lists the `<feature>` blocks of one API family
//!   in document order; [`feature::accumulate`] walks them up to the requested
//!   version and resolves their references.
//! - [`Emitter`] renders the version macros, declarations, definitions and
//!   runtime-load statements, every version inside its own `# if defined` guard.
//! - [`TemplateSet`] splices those blocks into the header boilerplate.
//!
//! ## Examples
//!
//! ```no_run
//! use glapi::{EmitOptions, Settings, TemplateSet, config::GlVersion};
//!
//! # fn main() -> Result<(), glapi::Error> {
//! let settings = Settings {
//!     version: GlVersion::V3_3,
//!     ..Settings::default()
//! };
//! let header = glapi::generate(&settings, &TemplateSet::builtin(), &EmitOptions::default())?;
//! glapi::write_output(&settings.output, &header)?;
//! # Ok(())
//! # }
//! ```

mod error;
mod registry;
mod surface;
mod xml;

pub mod config;
pub mod emit;
pub mod feature;
pub mod loader;
pub mod template;

use std::path::Path;

use tracing::info;

pub use config::{GlVersion, Profile, Settings};
pub use emit::{EmitOptions, Emitter, RenderedBlocks, TypeSpelling};
pub use error::{Error, Result};
pub use feature::{FeatureBlock, ResolvedFeature};
pub use loader::{LibraryResolver, LoadReport, SymbolResolver};
pub use registry::{CommandSignature, CommandTable, ConstantTable, Param, Registry, TypeEntry};
pub use surface::{BindingSurface, Request};
pub use template::TemplateSet;

/// Reads the registry named by `settings` and builds its binding surface.
///
/// # Errors
///
/// Returns [`Error::Io`] if the registry cannot be read, and any parse error
/// from [`BindingSurface::from_document`].
pub fn load_surface(settings: &Settings) -> Result<BindingSurface> {
    let document = std::fs::read_to_string(&settings.input)
        .map_err(|error| Error::io(&settings.input, error))?;
    BindingSurface::from_document(&document, &settings.request())
}

/// Renders `surface` and assembles the complete header text.
///
/// # Errors
///
/// Returns a template error if `templates` contain an unknown or unterminated
/// placeholder.
pub fn render_header(
    surface: &BindingSurface,
    templates: &TemplateSet,
    options: &EmitOptions,
) -> Result<String> {
    let blocks = Emitter::new(surface, options).render();
    templates.assemble(&blocks, &surface.version, &surface.profile)
}

/// Runs the whole pipeline and returns the header text.
///
/// Nothing is written; pass the result to [`write_output`].
pub fn generate(
    settings: &Settings,
    templates: &TemplateSet,
    options: &EmitOptions,
) -> Result<String> {
    let surface = load_surface(settings)?;
    render_header(&surface, templates, options)
}

/// Writes `text` to `path` in a single call.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
pub fn write_output(path: impl AsRef<Path>, text: &str) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, text).map_err(|error| Error::io(path, error))?;
    info!(path = %path.display(), bytes = text.len(), "Wrote output");
    Ok(())
}
