// SPDX-FileCopyrightText: 2025 Contributors to the glapi project.
// SPDX-License-Identifier: Apache-2.0

//! Feature index and accumulation.
//!
//! The registry declares one `<feature>` block per API version. Each block lists
//! only what is new at that version, so exposing version N means walking every
//! block up to and including N.
//!
//! Document order is the version order. Nothing in this module sorts.

use roxmltree::Node;
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    CommandSignature, Error, Registry, Result,
    xml::{children_named, elements},
};

/// The names introduced by one version of one API family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureBlock {
    /// Version identifier, e.g. `"4.6"`.
    pub version: String,
    /// Feature macro name, e.g. `"GL_VERSION_4_6"`.
    pub name: String,
    /// Constant names in declaration order.
    pub constants: Vec<String>,
    /// Command names in declaration order.
    pub commands: Vec<String>,
}

/// A constant reference resolved against the constant table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConstant {
    pub name: String,
    pub value: String,
}

/// A command reference resolved against the command table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCommand {
    pub name: String,
    pub signature: CommandSignature,
}

/// A [`FeatureBlock`] whose references have been resolved.
///
/// Unknown names are dropped; the remaining ones keep their relative order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedFeature {
    pub version: String,
    pub name: String,
    pub constants: Vec<ResolvedConstant>,
    pub commands: Vec<ResolvedCommand>,
}

/// Result of [`accumulate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulation {
    /// Included features, in document order.
    pub features: Vec<ResolvedFeature>,
    /// `false` when no block carried the requested version and every block was
    /// included as a consequence.
    pub matched: bool,
}

/// Collects the feature blocks of API family `api`, in document order.
///
/// Only `<require>` children are read; `<remove>` blocks and requirement
/// attributes such as `profile` are ignored.
///
/// # Errors
///
/// Returns [`Error::MalformedRegistry`] if a `<feature>` lacks `api`, `number`
/// or `name`, or a required `<enum>`/`<command>` lacks `name`.
pub fn index_features(root: Node<'_, '_>, api: &str) -> Result<Vec<FeatureBlock>> {
    let mut blocks = Vec::new();
    for feature in children_named(root, "feature") {
        let family = feature
            .attribute("api")
            .ok_or_else(|| Error::malformed("feature", "attribute `api`"))?;
        if family != api {
            continue;
        }

        let version = feature
            .attribute("number")
            .ok_or_else(|| Error::malformed("feature", "attribute `number`"))?;
        let name = feature
            .attribute("name")
            .ok_or_else(|| Error::malformed(format!("feature {version}"), "attribute `name`"))?;

        let mut block = FeatureBlock {
            version: version.to_owned(),
            name: name.to_owned(),
            constants: Vec::new(),
            commands: Vec::new(),
        };
        for require in children_named(feature, "require") {
            for reference in elements(require) {
                let list = match reference.tag_name().name() {
                    "enum" => &mut block.constants,
                    "command" => &mut block.commands,
                    _ => continue,
                };
                let referenced = reference.attribute("name").ok_or_else(|| {
                    Error::malformed(format!("require of {name}"), "attribute `name`")
                })?;
                list.push(referenced.to_owned());
            }
        }

        trace!(
            version = %block.version,
            constants = block.constants.len(),
            commands = block.commands.len(),
            "Indexed feature {}",
            block.name
        );
        blocks.push(block);
    }
    debug!(api, features = blocks.len(), "Indexed features");
    Ok(blocks)
}

/// Resolves one block against the registry tables, dropping unknown names.
pub fn resolve(block: &FeatureBlock, registry: &Registry) -> ResolvedFeature {
    let constants = block
        .constants
        .iter()
        .filter_map(|name| match registry.constants.get(name) {
            Some(value) => Some(ResolvedConstant {
                name: name.clone(),
                value: value.clone(),
            }),
            None => {
                debug!(feature = %block.name, constant = %name, "Dropping unresolved constant");
                None
            }
        })
        .collect();
    let commands = block
        .commands
        .iter()
        .filter_map(|name| match registry.commands.get(name) {
            Some(signature) => Some(ResolvedCommand {
                name: name.clone(),
                signature: signature.clone(),
            }),
            None => {
                debug!(feature = %block.name, command = %name, "Dropping unresolved command");
                None
            }
        })
        .collect();

    ResolvedFeature {
        version: block.version.clone(),
        name: block.name.clone(),
        constants,
        commands,
    }
}

/// Walks `blocks` in order, resolving each one, and stops after the first
/// block whose version equals `version`.
///
/// When no block matches, every block is included. Callers that prefer to
/// reject such a request can check [`Accumulation::matched`].
pub fn accumulate(blocks: &[FeatureBlock], registry: &Registry, version: &str) -> Accumulation {
    let mut features = Vec::new();
    for block in blocks {
        features.push(resolve(block, registry));
        if block.version == version {
            return Accumulation {
                features,
                matched: true,
            };
        }
    }

    debug!(
        version,
        features = features.len(),
        "Requested version not declared, accumulated every feature"
    );
    Accumulation {
        features,
        matched: false,
    }
}
