// SPDX-FileCopyrightText: 2025 Contributors to the glapi project.
// SPDX-License-Identifier: Apache-2.0

//! Generation settings and their validation.
//!
//! [`Settings`] is built once by the front end and handed to
//! [`crate::generate`] by reference. Everything here is checked before the
//! registry is even opened; the core itself never re-validates.

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{Error, Request, Result};

/// Registry file name the input path must carry.
pub const REGISTRY_FILE_NAME: &str = "gl.xml";

/// File name written inside the output directory.
pub const OUTPUT_FILE_NAME: &str = "glapi.h";

/// Default registry location, relative to the working directory.
pub const DEFAULT_INPUT: &str = "./OpenGL-Registry/xml/gl.xml";

/// Default output location, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "./glapi.h";

/// API family compiled by default.
pub const DEFAULT_API: &str = "gl";

/// The desktop OpenGL versions a header can be generated for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GlVersion {
    V1_0,
    V1_1,
    V1_2,
    V1_3,
    V1_4,
    V1_5,
    V2_0,
    V2_1,
    V3_0,
    V3_1,
    V3_2,
    V3_3,
    V4_0,
    V4_1,
    V4_2,
    V4_3,
    V4_4,
    V4_5,
    #[default]
    V4_6,
}

impl GlVersion {
    /// Every supported version, ascending.
    pub const ALL: [GlVersion; 19] = [
        GlVersion::V1_0,
        GlVersion::V1_1,
        GlVersion::V1_2,
        GlVersion::V1_3,
        GlVersion::V1_4,
        GlVersion::V1_5,
        GlVersion::V2_0,
        GlVersion::V2_1,
        GlVersion::V3_0,
        GlVersion::V3_1,
        GlVersion::V3_2,
        GlVersion::V3_3,
        GlVersion::V4_0,
        GlVersion::V4_1,
        GlVersion::V4_2,
        GlVersion::V4_3,
        GlVersion::V4_4,
        GlVersion::V4_5,
        GlVersion::V4_6,
    ];

    /// The registry's `number` attribute for this version, e.g. `"4.6"`.
    pub fn as_str(self) -> &'static str {
        match self {
            GlVersion::V1_0 => "1.0",
            GlVersion::V1_1 => "1.1",
            GlVersion::V1_2 => "1.2",
            GlVersion::V1_3 => "1.3",
            GlVersion::V1_4 => "1.4",
            GlVersion::V1_5 => "1.5",
            GlVersion::V2_0 => "2.0",
            GlVersion::V2_1 => "2.1",
            GlVersion::V3_0 => "3.0",
            GlVersion::V3_1 => "3.1",
            GlVersion::V3_2 => "3.2",
            GlVersion::V3_3 => "3.3",
            GlVersion::V4_0 => "4.0",
            GlVersion::V4_1 => "4.1",
            GlVersion::V4_2 => "4.2",
            GlVersion::V4_3 => "4.3",
            GlVersion::V4_4 => "4.4",
            GlVersion::V4_5 => "4.5",
            GlVersion::V4_6 => "4.6",
        }
    }
}

impl fmt::Display for GlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GlVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        GlVersion::ALL
            .into_iter()
            .find(|version| version.as_str() == s)
            .ok_or_else(|| Error::InvalidVersion(s.to_owned()))
    }
}

/// OpenGL context profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Profile {
    #[default]
    Core,
    Compatibility,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Profile::Core => "core",
            Profile::Compatibility => "compatibility",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "core" => Ok(Profile::Core),
            "compatibility" => Ok(Profile::Compatibility),
            other => Err(Error::InvalidProfile(other.to_owned())),
        }
    }
}

/// Immutable settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub version: GlVersion,
    pub profile: Profile,
    /// API family tag, `gl` for desktop OpenGL.
    pub api: String,
    /// Path to the registry document.
    pub input: PathBuf,
    /// Path of the header to write.
    pub output: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: GlVersion::default(),
            profile: Profile::default(),
            api: DEFAULT_API.to_owned(),
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Settings {
    /// The core request these settings describe.
    pub fn request(&self) -> Request {
        Request::new(&self.api, self.version.as_str(), self.profile.as_str())
    }
}

/// Checks that `path` exists and is named `gl.xml`.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] otherwise.
pub fn validate_input(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::InvalidPath {
            path: path.to_owned(),
            reason: "argument isn't a valid path",
        });
    }
    if path.file_name().and_then(|name| name.to_str()) != Some(REGISTRY_FILE_NAME) {
        return Err(Error::InvalidPath {
            path: path.to_owned(),
            reason: "invalid file",
        });
    }
    Ok(path.to_owned())
}

/// Checks that `dir` is a directory and returns `dir/glapi.h`.
///
/// # Errors
///
/// Returns [`Error::InvalidPath`] if `dir` is not a directory.
pub fn output_in_dir(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(Error::InvalidPath {
            path: dir.to_owned(),
            reason: "not a directory",
        });
    }
    Ok(dir.join(OUTPUT_FILE_NAME))
}
