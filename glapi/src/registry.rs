// SPDX-FileCopyrightText: 2025 Contributors to the glapi project.
// SPDX-License-Identifier: Apache-2.0

//! Registry model and parser.
//!
//! A single forward scan over the registry root builds three independent tables:
//!
//! - the [`TypeEntry`] sequence, in document order,
//! - the [`ConstantTable`] (`<enums>/<enum>` name to value),
//! - the [`CommandTable`] (`<commands>/<command>` name to [`CommandSignature`]).
//!
//! # Examples
//!
//! ```
//! use glapi::Registry;
//!
//! # fn main() -> Result<(), glapi::Error> {
//! let registry = Registry::parse_str(
//!     r#"<registry>
//!          <types><type>typedef unsigned int <name>GLenum</name>;</type></types>
//!          <enums><enum name="GL_ONE" value="1"/></enums>
//!        </registry>"#,
//! )?;
//! assert_eq!(registry.types[0].as_str(), "typedef unsigned int GLenum;");
//! assert_eq!(registry.constants["GL_ONE"], "1");
//! # Ok(())
//! # }
//! ```

use std::{collections::HashMap, fmt};

use roxmltree::Node;
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    Error, Result,
    xml::{children_named, collapse_whitespace, elements, first_child},
};

/// One type alias declaration, exactly as it is emitted.
///
/// Order matters: later aliases may refer to earlier ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TypeEntry(String);

impl TypeEntry {
    /// Returns the declaration text, terminated by a single `;`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Constant name to literal value. Output order never comes from this table.
pub type ConstantTable = HashMap<String, String>;

/// Command name to signature.
pub type CommandTable = HashMap<String, CommandSignature>;

/// A single command parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    /// Type marker text when present, otherwise the element's leading text (kept raw).
    pub ty: String,
    /// Every fragment preceding the name marker, whitespace collapsed
    /// (e.g. `const GLfloat *`).
    pub declared_ty: String,
    /// Parameter name.
    pub name: String,
}

/// Return type and ordered parameter list of a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSignature {
    /// Type marker text when present, otherwise the prototype's leading text, trimmed.
    pub return_type: String,
    /// Full declared return type, whitespace collapsed.
    pub declared_return_type: String,
    /// Parameters in declaration order.
    pub params: Vec<Param>,
}

/// The three tables extracted from a registry document.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Type aliases in document order.
    pub types: Vec<TypeEntry>,
    /// All constants carrying a value.
    pub constants: ConstantTable,
    /// All command prototypes.
    pub commands: CommandTable,
}

impl Registry {
    /// Parses a registry document held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Xml`] if the text is not well-formed XML and
    /// [`Error::MalformedRegistry`] if a command lacks a required part.
    pub fn parse_str(text: &str) -> Result<Self> {
        let document = roxmltree::Document::parse(text)?;
        Self::from_root(document.root_element())
    }

    /// Builds the tables from the registry root element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedRegistry`] if a `<command>` has no `<proto>`, a
    /// prototype has no name or return type, or a parameter has no name or type.
    pub fn from_root(root: Node<'_, '_>) -> Result<Self> {
        let registry = Registry {
            types: parse_types(root),
            constants: parse_constants(root),
            commands: parse_commands(root)?,
        };
        debug!(
            types = registry.types.len(),
            constants = registry.constants.len(),
            commands = registry.commands.len(),
            "Parsed registry"
        );
        Ok(registry)
    }
}

fn parse_types(root: Node<'_, '_>) -> Vec<TypeEntry> {
    children_named(root, "types")
        .flat_map(elements)
        .filter_map(parse_type)
        .collect()
}

/// Only elements whose leading text contains `typedef` are aliases; the rest
/// (`#include` lines, platform guards) are skipped.
fn parse_type(node: Node<'_, '_>) -> Option<TypeEntry> {
    let lead = node.text().filter(|text| text.contains("typedef"))?;
    let mut decl = String::from(lead);
    for child in elements(node) {
        match child.tag_name().name() {
            "name" => decl.push_str(child.text().unwrap_or_default()),
            "apientry" => decl.push_str("APIENTRY "),
            _ => {}
        }
        if let Some(tail) = child.tail() {
            decl.push_str(tail.trim());
        }
    }

    let mut decl = collapse_whitespace(&decl);
    if !decl.ends_with(';') {
        decl.push(';');
    }
    Some(TypeEntry(decl))
}

fn parse_constants(root: Node<'_, '_>) -> ConstantTable {
    let mut constants = ConstantTable::new();
    for entry in children_named(root, "enums").flat_map(|group| children_named(group, "enum")) {
        match (entry.attribute("name"), entry.attribute("value")) {
            (Some(name), Some(value)) => {
                constants.insert(name.to_owned(), value.to_owned());
            }
            (name, _) => trace!(?name, "Skipping enum without name/value"),
        }
    }
    constants
}

fn parse_commands(root: Node<'_, '_>) -> Result<CommandTable> {
    let mut commands = CommandTable::new();
    let entries = children_named(root, "commands")
        .flat_map(|group| children_named(group, "command"));
    for command in entries {
        let (name, signature) = parse_command(command)?;
        commands.insert(name, signature);
    }
    Ok(commands)
}

fn parse_command(command: Node<'_, '_>) -> Result<(String, CommandSignature)> {
    let proto =
        first_child(command, "proto").ok_or_else(|| Error::malformed("command", "<proto>"))?;
    let name = first_child(proto, "name")
        .and_then(|name| name.text())
        .map(str::trim)
        .ok_or_else(|| Error::malformed("proto", "<name>"))?;

    let return_type = match first_child(proto, "ptype") {
        Some(ptype) => ptype.text().unwrap_or_default().trim(),
        None => proto
            .text()
            .map(str::trim)
            .ok_or_else(|| Error::malformed(format!("proto {name}"), "a return type"))?,
    };

    let params = children_named(command, "param")
        .map(|param| parse_param(param, name))
        .collect::<Result<Vec<_>>>()?;

    let signature = CommandSignature {
        return_type: return_type.to_owned(),
        declared_return_type: declared_type(proto),
        params,
    };
    Ok((name.to_owned(), signature))
}

fn parse_param(param: Node<'_, '_>, command: &str) -> Result<Param> {
    let mut ty = param.text();
    let mut name = None;
    for child in elements(param) {
        match child.tag_name().name() {
            "ptype" => ty = Some(child.text().unwrap_or_default()),
            "name" => name = child.text(),
            _ => {}
        }
    }

    let name = name.ok_or_else(|| Error::malformed(format!("param of {command}"), "<name>"))?;
    let ty = ty.ok_or_else(|| Error::malformed(format!("param {name} of {command}"), "a type"))?;
    Ok(Param {
        ty: ty.to_owned(),
        declared_ty: declared_type(param),
        name: name.to_owned(),
    })
}

/// Concatenates every text fragment that precedes the `<name>` marker.
fn declared_type(node: Node<'_, '_>) -> String {
    let mut spelled = String::from(node.text().unwrap_or_default());
    for child in elements(node) {
        if child.tag_name().name() == "name" {
            break;
        }
        spelled.push_str(child.text().unwrap_or_default());
        spelled.push_str(child.tail().unwrap_or_default());
    }
    collapse_whitespace(&spelled)
}
