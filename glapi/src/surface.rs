// SPDX-FileCopyrightText: 2025 Contributors to the glapi project.
// SPDX-License-Identifier: Apache-2.0

//! The binding surface: everything a generated header exposes for one request.

use serde::Serialize;
use tracing::info;

use crate::{
    Registry, Result, TypeEntry,
    feature::{ResolvedFeature, accumulate, index_features},
};

/// What to compile: an API family, a version and a profile.
///
/// The version is a free-form string here. Validation against the supported
/// set happens in [`crate::config`] before a request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// API family tag matched against `<feature api="...">`.
    pub api: String,
    /// Version identifier matched against `<feature number="...">`.
    pub version: String,
    /// Profile name. Does not filter anything; it is threaded into the output text.
    pub profile: String,
}

impl Request {
    pub fn new(
        api: impl Into<String>,
        version: impl Into<String>,
        profile: impl Into<String>,
    ) -> Self {
        Self {
            api: api.into(),
            version: version.into(),
            profile: profile.into(),
        }
    }
}

/// Types plus the resolved features up to (and including) the requested version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingSurface {
    pub api: String,
    pub version: String,
    pub profile: String,
    /// Emitted once, independent of version.
    pub types: Vec<TypeEntry>,
    pub features: Vec<ResolvedFeature>,
    /// Whether a feature block carried the requested version.
    pub version_matched: bool,
}

impl BindingSurface {
    /// Parses `document` and builds the surface for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Xml`] for text that is not XML and
    /// [`crate::Error::MalformedRegistry`] for missing required parts.
    ///
    /// # Examples
    ///
    /// ```
    /// use glapi::{BindingSurface, Request};
    ///
    /// # fn main() -> Result<(), glapi::Error> {
    /// let xml = r#"<registry>
    ///   <enums><enum name="GL_A" value="0x1"/></enums>
    ///   <feature api="gl" name="GL_VERSION_1_0" number="1.0">
    ///     <require><enum name="GL_A"/></require>
    ///   </feature>
    /// </registry>"#;
    /// let surface = BindingSurface::from_document(xml, &Request::new("gl", "1.0", "core"))?;
    /// assert_eq!(surface.features.len(), 1);
    /// assert_eq!(surface.features[0].constants[0].value, "0x1");
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_document(document: &str, request: &Request) -> Result<Self> {
        let document = roxmltree::Document::parse(document)?;
        let root = document.root_element();
        let registry = Registry::from_root(root)?;
        let blocks = index_features(root, &request.api)?;
        Ok(Self::build(registry, &blocks, request))
    }

    /// Accumulates `blocks` against `registry` for `request`.
    pub fn build(registry: Registry, blocks: &[crate::FeatureBlock], request: &Request) -> Self {
        let accumulation = accumulate(blocks, &registry, &request.version);
        let surface = Self {
            api: request.api.clone(),
            version: request.version.clone(),
            profile: request.profile.clone(),
            types: registry.types,
            features: accumulation.features,
            version_matched: accumulation.matched,
        };
        info!(
            api = %surface.api,
            version = %surface.version,
            profile = %surface.profile,
            features = surface.features.len(),
            constants = surface.constant_count(),
            commands = surface.command_count(),
            "Built binding surface"
        );
        surface
    }

    /// Total number of constants across all included features.
    pub fn constant_count(&self) -> usize {
        self.features.iter().map(|feature| feature.constants.len()).sum()
    }

    /// Total number of commands across all included features.
    pub fn command_count(&self) -> usize {
        self.features.iter().map(|feature| feature.commands.len()).sum()
    }

    /// Pretty-printed JSON rendering of the surface.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
