// SPDX-FileCopyrightText: 2025 Contributors to the glapi project.
// SPDX-License-Identifier: Apache-2.0

//! Template assembly.
//!
//! The header is produced by splicing the rendered blocks into four boilerplate
//! templates. Placeholders are `{_NAME_}` tokens:
//!
//! - `{_PROFILE_}`, `{_VERSION_}`: the request strings
//! - `{_GL_VERSION_DEF_}`, `{_GL_TYPES_}`, `{_GL_API_DEC_}`, `{_GL_API_DEF_}`,
//!   `{_GL_API_IMPL_}`: the emitted blocks
//! - `{_API_DEC_}`, `{_API_DEF_}`, `{_API_STATIC_}`: the rendered fragment
//!   templates (only available to `loader`)
//!
//! Each template is scanned once; substituted text is never rescanned.

use std::path::Path;

use tracing::debug;

use crate::{Error, Result, emit::RenderedBlocks};

/// The four boilerplate templates making up a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    /// The outer header skeleton.
    pub loader: String,
    /// Loader API declarations.
    pub api_dec: String,
    /// Loader API definitions, including the runtime-load block.
    pub api_def: String,
    /// Static helpers: library open/close and the `load` function.
    pub api_static: String,
}

impl TemplateSet {
    /// The templates compiled into this crate.
    pub fn builtin() -> Self {
        Self {
            loader: include_str!("../templates/loader.txt").to_owned(),
            api_dec: include_str!("../templates/api-dec.txt").to_owned(),
            api_def: include_str!("../templates/api-def.txt").to_owned(),
            api_static: include_str!("../templates/api-static.txt").to_owned(),
        }
    }

    /// Reads `loader.txt`, `api-dec.txt`, `api-def.txt` and `api-static.txt`
    /// from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] naming the first file that cannot be read.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let read = |file: &str| {
            let path = dir.join(file);
            std::fs::read_to_string(&path).map_err(|error| Error::io(path, error))
        };
        let templates = Self {
            loader: read("loader.txt")?,
            api_dec: read("api-dec.txt")?,
            api_def: read("api-def.txt")?,
            api_static: read("api-static.txt")?,
        };
        debug!(dir = %dir.display(), "Loaded templates");
        Ok(templates)
    }

    /// Splices `blocks` and the request strings into the templates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPlaceholder`] or [`Error::UnterminatedPlaceholder`]
    /// if a template contains a token the assembler cannot fill.
    pub fn assemble(
        &self,
        blocks: &RenderedBlocks,
        version: &str,
        profile: &str,
    ) -> Result<String> {
        let mut values = vec![
            ("PROFILE", profile),
            ("VERSION", version),
            ("GL_VERSION_DEF", blocks.version_macros.as_str()),
            ("GL_TYPES", blocks.types.as_str()),
            ("GL_API_DEC", blocks.declarations.as_str()),
            ("GL_API_DEF", blocks.definitions.as_str()),
            ("GL_API_IMPL", blocks.loads.as_str()),
        ];

        let api_dec = substitute(self.api_dec.trim_end(), &values)?;
        let api_def = substitute(self.api_def.trim_end(), &values)?;
        let api_static = substitute(self.api_static.trim_end(), &values)?;
        values.extend([
            ("API_DEC", api_dec.as_str()),
            ("API_DEF", api_def.as_str()),
            ("API_STATIC", api_static.as_str()),
        ]);
        substitute(&self.loader, &values)
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Replaces every `{_NAME_}` in `template` with its value from `values`.
///
/// # Errors
///
/// Returns [`Error::UnknownPlaceholder`] for a name missing from `values` and
/// [`Error::UnterminatedPlaceholder`] for a `{_` without a closing `_}`.
///
/// # Examples
///
/// ```
/// let text = glapi::template::substitute("v{_VERSION_};", &[("VERSION", "4.6")])?;
/// assert_eq!(text, "v4.6;");
/// # Ok::<(), glapi::Error>(())
/// ```
pub fn substitute(template: &str, values: &[(&str, &str)]) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some(start) = rest.find("{_") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("_}")
            .ok_or(Error::UnterminatedPlaceholder(offset + start))?;
        let name = &after[..end];
        let value = values
            .iter()
            .find_map(|(key, value)| (*key == name).then_some(*value))
            .ok_or_else(|| Error::UnknownPlaceholder(name.to_owned()))?;
        out.push_str(value);

        let consumed = start + 2 + end + 2;
        offset += consumed;
        rest = &rest[consumed..];
    }
    out.push_str(rest);
    Ok(out)
}
