// SPDX-FileCopyrightText: 2025 Contributors to the glapi project.
// SPDX-License-Identifier: Apache-2.0

//! Runtime symbol resolution.
//!
//! The generated header resolves every entry point by name through a `load`
//! function. This module exposes the same capability on the Rust side so a
//! binding surface can be checked against an actual OpenGL library before the
//! header ships.

use std::{
    ffi::{CString, OsStr, c_void},
    ptr::NonNull,
};

use tracing::{debug, trace};

use crate::{BindingSurface, Result};

/// Resolves a symbol by its literal name.
pub trait SymbolResolver {
    /// Returns the symbol's address, or `None` if it cannot be found.
    fn resolve(&self, name: &str) -> Option<NonNull<c_void>>;
}

impl<F> SymbolResolver for F
where
    F: Fn(&str) -> Option<NonNull<c_void>>,
{
    fn resolve(&self, name: &str) -> Option<NonNull<c_void>> {
        self(name)
    }
}

/// A [`SymbolResolver`] backed by a shared library opened with `libloading`.
pub struct LibraryResolver {
    library: libloading::Library,
}

impl LibraryResolver {
    /// Opens the shared library at `path` (e.g. `libGL.so.1`).
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::LibLoading`] if the library cannot be opened.
    pub fn open(path: impl AsRef<OsStr>) -> Result<Self> {
        // Safety: opening runs the library's initialisers; OpenGL libraries have
        // no initialisers with preconditions on the caller.
        let library = unsafe { libloading::Library::new(path.as_ref()) }?;
        debug!(path = ?path.as_ref(), "Opened library");
        Ok(Self { library })
    }
}

impl SymbolResolver for LibraryResolver {
    fn resolve(&self, name: &str) -> Option<NonNull<c_void>> {
        let symbol = CString::new(name).ok()?;
        // Safety: the address is only inspected, never called or dereferenced.
        let address = unsafe { self.library.get::<*mut c_void>(symbol.as_bytes_with_nul()) }.ok()?;
        NonNull::new(*address)
    }
}

/// Per-feature outcome of [`LoadReport::probe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureLoad {
    /// Feature macro name.
    pub name: String,
    /// Commands the resolver found, in emission order.
    pub resolved: Vec<String>,
    /// Commands the resolver did not find, in emission order.
    pub missing: Vec<String>,
}

/// Which commands of a binding surface a resolver can provide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub features: Vec<FeatureLoad>,
}

impl LoadReport {
    /// Resolves every command of `surface`, feature by feature, like the
    /// generated runtime-load block does.
    pub fn probe(surface: &BindingSurface, resolver: &dyn SymbolResolver) -> Self {
        let features = surface
            .features
            .iter()
            .map(|feature| {
                let (resolved, missing) = feature
                    .commands
                    .iter()
                    .map(|command| command.name.clone())
                    .partition::<Vec<_>, _>(|name| resolver.resolve(name).is_some());
                for name in &missing {
                    trace!(feature = %feature.name, command = %name, "Symbol not found");
                }
                FeatureLoad {
                    name: feature.name.clone(),
                    resolved,
                    missing,
                }
            })
            .collect();
        Self { features }
    }

    /// Number of commands that resolved.
    pub fn resolved_count(&self) -> usize {
        self.features.iter().map(|feature| feature.resolved.len()).sum()
    }

    /// Number of commands that did not resolve.
    pub fn missing_count(&self) -> usize {
        self.features.iter().map(|feature| feature.missing.len()).sum()
    }

    /// `true` when every command resolved.
    pub fn is_complete(&self) -> bool {
        self.missing_count() == 0
    }
}
