// SPDX-FileCopyrightText: 2025 Contributors to the glapi project.
// SPDX-License-Identifier: Apache-2.0

//! Binding emitter.
//!
//! Renders a [`BindingSurface`] into the text blocks spliced into the header:
//!
//! | block            | contents                                                   |
//! |------------------|------------------------------------------------------------|
//! | version macros   | `# define GL_VERSION_x_y`, one per included feature         |
//! | types            | the registry's type aliases                                |
//! | declarations     | guarded `#define` constants, then guarded pointer typedefs, |
//! |                  | `extern` pointers and redirect macros                      |
//! | definitions      | guarded pointer storage                                    |
//! | loads            | guarded `glapi_x = (PFNXPROC) load("x");` statements       |
//!
//! Each pass is a small [`fmt::Display`] node over the resolved features. All
//! guarded passes open and close their regions through the same `Guard` value,
//! so the two directive lines of a region always name the same macro. A feature
//! with nothing to emit in a pass still gets its (empty) region.

use std::fmt;

use crate::{
    BindingSurface,
    feature::{ResolvedCommand, ResolvedFeature},
    registry::Param,
};

/// Which spelling of parameter and return types to emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TypeSpelling {
    /// The type marker text, or the leading text when there is no marker.
    #[default]
    Marker,
    /// The full declared type, qualifiers and pointer declarators included.
    Declared,
}

/// Knobs for the generated identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Prefix of the function pointer variables (`glapi_glClear`).
    pub symbol_prefix: String,
    /// Name of the symbol-resolution function called by the load block.
    pub loader_fn: String,
    pub spelling: TypeSpelling,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            symbol_prefix: "glapi_".to_owned(),
            loader_fn: "load".to_owned(),
            spelling: TypeSpelling::Marker,
        }
    }
}

/// The rendered blocks, ready for the template assembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBlocks {
    pub version_macros: String,
    pub types: String,
    pub declarations: String,
    pub definitions: String,
    pub loads: String,
}

/// Renders the blocks of one [`BindingSurface`].
pub struct Emitter<'a> {
    surface: &'a BindingSurface,
    options: &'a EmitOptions,
}

impl<'a> Emitter<'a> {
    pub fn new(surface: &'a BindingSurface, options: &'a EmitOptions) -> Self {
        Self { surface, options }
    }

    /// Runs every render pass.
    pub fn render(&self) -> RenderedBlocks {
        RenderedBlocks {
            version_macros: self.version_macros(),
            types: self.types(),
            declarations: self.declarations(),
            definitions: self.definitions(),
            loads: self.loads(),
        }
    }

    /// One unguarded `# define` per included feature, newline separated.
    pub fn version_macros(&self) -> String {
        VersionMacros(&self.surface.features).to_string()
    }

    /// Type aliases, newline separated.
    pub fn types(&self) -> String {
        self.surface
            .types
            .iter()
            .map(|entry| entry.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Guarded constants, a blank line, then guarded command declarations.
    pub fn declarations(&self) -> String {
        format!(
            "{}\n{}",
            ConstantPass(&self.surface.features),
            DeclarationPass {
                features: &self.surface.features,
                options: self.options,
            }
        )
    }

    /// Guarded pointer storage, indented one level for the implementation section.
    pub fn definitions(&self) -> String {
        DefinitionPass {
            features: &self.surface.features,
            options: self.options,
        }
        .to_string()
    }

    /// Guarded runtime-load statements.
    pub fn loads(&self) -> String {
        LoadPass {
            features: &self.surface.features,
            options: self.options,
        }
        .to_string()
    }
}

/// A preprocessor region keyed by a feature macro.
///
/// `depth` is the number of spaces between `#` and the directive.
#[derive(Debug, Clone, Copy)]
struct Guard<'a> {
    name: &'a str,
    depth: usize,
}

impl Guard<'_> {
    /// `# if defined (NAME)`
    fn open(&self, f: &mut impl fmt::Write) -> fmt::Result {
        writeln!(f, "#{:depth$}if defined ({})", "", self.name, depth = self.depth)
    }

    /// `# endif /* NAME */`
    fn close(&self, f: &mut impl fmt::Write) -> fmt::Result {
        writeln!(f, "#{:depth$}endif /* {} */", "", self.name, depth = self.depth)
    }

    /// Writes `body` between [`Self::open`] and [`Self::close`].
    fn wrap<W: fmt::Write>(
        &self,
        f: &mut W,
        body: impl FnOnce(&mut W) -> fmt::Result,
    ) -> fmt::Result {
        self.open(f)?;
        body(f)?;
        self.close(f)
    }
}

/// `PFNGLCLEARPROC` for `glClear`.
struct ProcType<'a>(&'a str);

impl fmt::Display for ProcType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PFN{}PROC", self.0.to_ascii_uppercase())
    }
}

/// Comma separated parameter list, or `void` when there are none.
struct ParamList<'a> {
    params: &'a [Param],
    spelling: TypeSpelling,
}

impl fmt::Display for ParamList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            return f.write_str("void");
        }
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            let ty = match self.spelling {
                TypeSpelling::Marker => &param.ty,
                TypeSpelling::Declared => &param.declared_ty,
            };
            write!(f, "{ty} {}", param.name)?;
        }
        Ok(())
    }
}

struct VersionMacros<'a>(&'a [ResolvedFeature]);

impl fmt::Display for VersionMacros<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, feature) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            write!(f, "# define {}", feature.name)?;
        }
        Ok(())
    }
}

struct ConstantPass<'a>(&'a [ResolvedFeature]);

impl fmt::Display for ConstantPass<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for feature in self.0 {
            let guard = Guard {
                name: &feature.name,
                depth: 1,
            };
            guard.wrap(f, |f| {
                for constant in &feature.constants {
                    writeln!(f, "#  define {} {}", constant.name, constant.value)?;
                }
                Ok(())
            })?;
        }
        Ok(())
    }
}

struct DeclarationPass<'a> {
    features: &'a [ResolvedFeature],
    options: &'a EmitOptions,
}

impl DeclarationPass<'_> {
    fn command(&self, f: &mut fmt::Formatter<'_>, command: &ResolvedCommand) -> fmt::Result {
        let proc_type = ProcType(&command.name);
        let signature = &command.signature;
        let return_type = match self.options.spelling {
            TypeSpelling::Marker => &signature.return_type,
            TypeSpelling::Declared => &signature.declared_return_type,
        };
        let params = ParamList {
            params: &signature.params,
            spelling: self.options.spelling,
        };
        let prefix = &self.options.symbol_prefix;

        writeln!(f, "typedef {return_type} (APIENTRYP {proc_type})({params});")?;
        writeln!(f, "extern {proc_type} {prefix}{};", command.name)?;
        writeln!(f, "#  define {} {prefix}{}", command.name, command.name)
    }
}

impl fmt::Display for DeclarationPass<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for feature in self.features {
            let guard = Guard {
                name: &feature.name,
                depth: 1,
            };
            guard.wrap(f, |f| {
                for (index, command) in feature.commands.iter().enumerate() {
                    if index > 0 {
                        f.write_str("\n")?;
                    }
                    self.command(f, command)?;
                }
                Ok(())
            })?;
        }
        Ok(())
    }
}

struct DefinitionPass<'a> {
    features: &'a [ResolvedFeature],
    options: &'a EmitOptions,
}

impl fmt::Display for DefinitionPass<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for feature in self.features {
            let guard = Guard {
                name: &feature.name,
                depth: 2,
            };
            guard.wrap(f, |f| {
                for command in &feature.commands {
                    writeln!(
                        f,
                        "{} {}{};",
                        ProcType(&command.name),
                        self.options.symbol_prefix,
                        command.name
                    )?;
                }
                Ok(())
            })?;
        }
        Ok(())
    }
}

struct LoadPass<'a> {
    features: &'a [ResolvedFeature],
    options: &'a EmitOptions,
}

impl fmt::Display for LoadPass<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for feature in self.features {
            let guard = Guard {
                name: &feature.name,
                depth: 1,
            };
            guard.wrap(f, |f| {
                for command in &feature.commands {
                    writeln!(
                        f,
                        "\t{}{} = ({}) {}(\"{}\");",
                        self.options.symbol_prefix,
                        command.name,
                        ProcType(&command.name),
                        self.options.loader_fn,
                        command.name
                    )?;
                }
                Ok(())
            })?;
        }
        Ok(())
    }
}
