//! Checker options, language features and the shared per-body context.

use crate::error_reporter::DiagnosticBag;
use csz_solver::{DefId, TypeCatalog};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

// =============================================================================
// Configuration errors
// =============================================================================

/// Infrastructure failures while building a checker configuration.
///
/// Semantic problems in the checked code are never reported this way; they
/// are diagnostics.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid checker options: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown language version '{0}'")]
    UnknownLanguageVersion(String),
}

// =============================================================================
// Language version and features
// =============================================================================

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum LanguageVersion {
    CSharp6,
    CSharp7,
    CSharp7_3,
    CSharp8,
    CSharp9,
    #[default]
    Latest,
}

impl LanguageVersion {
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        match text.trim() {
            "6" => Ok(Self::CSharp6),
            "7" | "7.0" => Ok(Self::CSharp7),
            "7.3" => Ok(Self::CSharp7_3),
            "8" | "8.0" => Ok(Self::CSharp8),
            "9" | "9.0" => Ok(Self::CSharp9),
            "latest" | "preview" => Ok(Self::Latest),
            other => Err(ConfigError::UnknownLanguageVersion(other.to_string())),
        }
    }

    /// Version as shown in `FeatureNotAvailable` messages.
    pub const fn display(self) -> &'static str {
        match self {
            Self::CSharp6 => "6",
            Self::CSharp7 => "7.0",
            Self::CSharp7_3 => "7.3",
            Self::CSharp8 => "8.0",
            Self::CSharp9 => "9.0",
            Self::Latest => "latest",
        }
    }
}

impl TryFrom<String> for LanguageVersion {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// Language capabilities gated by version.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Feature {
    Tuples,
    RefForeach,
    AsyncStreams,
    PatternDispose,
    ExtensionGetEnumerator,
}

impl Feature {
    pub const fn required_version(self) -> LanguageVersion {
        match self {
            Self::Tuples => LanguageVersion::CSharp7,
            Self::RefForeach => LanguageVersion::CSharp7_3,
            Self::AsyncStreams | Self::PatternDispose => LanguageVersion::CSharp8,
            Self::ExtensionGetEnumerator => LanguageVersion::CSharp9,
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Tuples => "tuples",
            Self::RefForeach => "ref foreach iteration variables",
            Self::AsyncStreams => "async streams",
            Self::PatternDispose => "pattern-based disposal",
            Self::ExtensionGetEnumerator => "extension GetEnumerator",
        }
    }
}

// =============================================================================
// CheckerOptions
// =============================================================================

/// Options for a checking session.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckerOptions {
    pub language_version: LanguageVersion,
    /// Report `PatternStaticOrInaccessible` / `PatternIsAmbiguous` warnings.
    pub report_pattern_warnings: bool,
    /// File name recorded on every diagnostic.
    pub file_name: String,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            language_version: LanguageVersion::Latest,
            report_pattern_warnings: true,
            file_name: "main.cs".to_string(),
        }
    }
}

impl CheckerOptions {
    /// Parse options from JSON; missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    #[must_use]
    pub fn with_language_version(mut self, version: LanguageVersion) -> Self {
        self.language_version = version;
        self
    }

    pub fn supports(&self, feature: Feature) -> bool {
        self.language_version >= feature.required_version()
    }
}

// =============================================================================
// MemberContext
// =============================================================================

/// Facts about the member whose body is being checked.
#[derive(Clone, Debug, Default)]
pub struct MemberContext {
    pub is_async: bool,
    pub is_iterator: bool,
    /// Type whose members are accessible as `private`/`protected` from here.
    pub containing_type: Option<DefId>,
    /// Static classes whose extension methods are in scope, nearest scope first.
    pub extension_scopes: Vec<Vec<DefId>>,
}

impl MemberContext {
    #[must_use]
    pub fn inside(mut self, containing_type: DefId) -> Self {
        self.containing_type = Some(containing_type);
        self
    }

    #[must_use]
    pub fn with_extension_scope(mut self, scope: Vec<DefId>) -> Self {
        self.extension_scopes.push(scope);
        self
    }
}

// =============================================================================
// CheckerContext
// =============================================================================

/// Shared state for checking one method body.
pub struct CheckerContext<'a> {
    /// The read-only symbol/type catalog shared by every worker.
    pub catalog: &'a TypeCatalog,

    pub options: &'a CheckerOptions,

    pub member: &'a MemberContext,

    /// Diagnostics reported while checking this body.
    pub diagnostics: DiagnosticBag,
}

impl<'a> CheckerContext<'a> {
    pub fn new(catalog: &'a TypeCatalog, options: &'a CheckerOptions, member: &'a MemberContext) -> Self {
        Self {
            catalog,
            options,
            member,
            diagnostics: DiagnosticBag::new(&options.file_name),
        }
    }
}
