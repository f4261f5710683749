//! Case-conversion naming policy shared across all artifact kinds.
//!
//! Each call-site accepts its own closed set of case styles, so an illegal
//! combination is unrepresentable once configuration parsing has succeeded.
//! The only fallible step is [`std::str::FromStr`] at the configuration
//! boundary, which turns an unknown token into a fatal
//! [`Error::Config`](crate::error::Error::Config).

use std::fmt;
use std::str::FromStr;

use convert_case::{Case, Casing};
use serde::Deserialize;

use crate::error::Error;
use crate::model::RelationType;

/// Case style for entity, DTO, service, module and controller names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityCase {
    Camel,
    #[default]
    Pascal,
    None,
}

impl EntityCase {
    #[must_use]
    pub fn apply(self, raw: &str) -> String {
        match self {
            Self::Camel => raw.to_case(Case::Camel),
            Self::Pascal => raw.to_case(Case::Pascal),
            Self::None => raw.to_owned(),
        }
    }
}

impl FromStr for EntityCase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "camel" => Ok(Self::Camel),
            "pascal" => Ok(Self::Pascal),
            "none" => Ok(Self::None),
            other => Err(Error::Config(format!(
                "unknown entity case style '{other}' (expected camel, pascal or none)"
            ))),
        }
    }
}

/// Case style for generated file stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCase {
    Camel,
    #[default]
    Param,
    Pascal,
    None,
}

impl FileCase {
    #[must_use]
    pub fn apply(self, raw: &str) -> String {
        match self {
            Self::Camel => raw.to_case(Case::Camel),
            Self::Param => raw.to_case(Case::Kebab),
            Self::Pascal => raw.to_case(Case::Pascal),
            Self::None => raw.to_owned(),
        }
    }
}

impl FromStr for FileCase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "camel" => Ok(Self::Camel),
            "param" => Ok(Self::Param),
            "pascal" => Ok(Self::Pascal),
            "none" => Ok(Self::None),
            other => Err(Error::Config(format!(
                "unknown file case style '{other}' (expected camel, param, pascal or none)"
            ))),
        }
    }
}

/// Case style for property names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyCase {
    #[default]
    Camel,
    Pascal,
    Snake,
    None,
}

impl PropertyCase {
    #[must_use]
    pub fn apply(self, raw: &str) -> String {
        match self {
            Self::Camel => raw.to_case(Case::Camel),
            Self::Pascal => raw.to_case(Case::Pascal),
            Self::Snake => raw.to_case(Case::Snake),
            Self::None => raw.to_owned(),
        }
    }
}

impl FromStr for PropertyCase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "camel" => Ok(Self::Camel),
            "pascal" => Ok(Self::Pascal),
            "snake" => Ok(Self::Snake),
            "none" => Ok(Self::None),
            other => Err(Error::Config(format!(
                "unknown property case style '{other}' (expected camel, pascal, snake or none)"
            ))),
        }
    }
}

/// Access modifier emitted before generated properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
    #[default]
    None,
}

impl Visibility {
    /// Token plus trailing space, or the empty string for `None`.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Public => "public ",
            Self::Protected => "protected ",
            Self::Private => "private ",
            Self::None => "",
        }
    }
}

impl FromStr for Visibility {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "protected" => Ok(Self::Protected),
            "private" => Ok(Self::Private),
            "none" => Ok(Self::None),
            other => Err(Error::Config(format!(
                "unknown property visibility '{other}' (expected public, protected, private or none)"
            ))),
        }
    }
}

/// Whether generated symbols are the artifact's default export or named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportType {
    Default,
    #[default]
    Named,
}

impl FromStr for ExportType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "named" => Ok(Self::Named),
            other => Err(Error::Config(format!(
                "unknown export type '{other}' (expected default or named)"
            ))),
        }
    }
}

/// Definite-assignment marker appended to property declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrictMode {
    #[default]
    None,
    /// `?` — optional property.
    Optional,
    /// `!` — definite assignment assertion.
    Definite,
}

impl StrictMode {
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Optional => "?",
            Self::Definite => "!",
        }
    }
}

impl FromStr for StrictMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "?" | "optional" => Ok(Self::Optional),
            "!" | "definite" => Ok(Self::Definite),
            other => Err(Error::Config(format!(
                "unknown strict mode '{other}' (expected none, ? or !)"
            ))),
        }
    }
}

impl fmt::Display for StrictMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Immutable naming policy for one generation run.
///
/// A plain value passed into the renderer; there is no process-wide helper
/// registry. Template contexts carry names precomputed through this policy.
#[derive(Debug, Clone, Copy)]
pub struct NamingPolicy {
    pub entity_case: EntityCase,
    pub file_case: FileCase,
    pub property_case: PropertyCase,
    pub visibility: Visibility,
    pub export_type: ExportType,
    pub strict_mode: StrictMode,
    /// Wrap related-type expressions in a deferred `Promise<...>`.
    pub lazy: bool,
}

impl NamingPolicy {
    /// Cased model class name: `user_profile` under pascal ⇒ `UserProfileModel`.
    #[must_use]
    pub fn model_name(&self, base: &str) -> String {
        format!("{}Model", self.entity_case.apply(base))
    }

    #[must_use]
    pub fn dto_name(&self, base: &str) -> String {
        format!("{}Dto", self.entity_case.apply(base))
    }

    #[must_use]
    pub fn service_name(&self, base: &str) -> String {
        format!("{}Service", self.entity_case.apply(base))
    }

    #[must_use]
    pub fn controller_name(&self, base: &str) -> String {
        format!("{}Controller", self.entity_case.apply(base))
    }

    /// Module class name, derived from the terminal segment of the results
    /// directory rather than from an entity.
    #[must_use]
    pub fn module_name(&self, base: &str) -> String {
        format!("{}Module", self.entity_case.apply(base))
    }

    #[must_use]
    pub fn property_name(&self, base: &str) -> String {
        self.property_case.apply(base)
    }

    /// File stem for a model artifact. The dotted suffix is appended after
    /// file-casing and never re-cased.
    #[must_use]
    pub fn model_file_stem(&self, base: &str) -> String {
        format!("{}.model", self.file_case.apply(base))
    }

    #[must_use]
    pub fn dto_file_stem(&self, base: &str) -> String {
        format!("{}.dto", self.file_case.apply(base))
    }

    #[must_use]
    pub fn service_file_stem(&self, base: &str) -> String {
        format!("{}.service", self.file_case.apply(base))
    }

    #[must_use]
    pub fn controller_file_stem(&self, base: &str) -> String {
        format!("{}.controller", self.file_case.apply(base))
    }

    /// File stem for the module artifact. The stem reuses the results
    /// directory's terminal segment as-is; file casing applies to
    /// entity-derived stems only.
    #[must_use]
    pub fn module_file_stem(&self, base: &str) -> String {
        format!("{base}.module")
    }

    #[must_use]
    pub fn index_file_stem(&self) -> String {
        self.file_case.apply("index")
    }

    /// Related-type expression for a relation property.
    ///
    /// Collections become `T[]`; the lazy flag wraps the result in
    /// `Promise<...>` independent of cardinality.
    #[must_use]
    pub fn relation_expr(&self, related_type: &str, relation_type: RelationType) -> String {
        let mut expr = related_type.to_owned();
        if relation_type.is_collection() {
            expr.push_str("[]");
        }
        if self.lazy {
            expr = format!("Promise<{expr}>");
        }
        expr
    }

    /// `"default "` when the artifact is its file's default export.
    #[must_use]
    pub const fn export_token(&self) -> &'static str {
        match self.export_type {
            ExportType::Default => "default ",
            ExportType::Named => "",
        }
    }

    /// How downstream files import a generated symbol.
    #[must_use]
    pub fn local_import(&self, name: &str) -> String {
        match self.export_type {
            ExportType::Default => name.to_owned(),
            ExportType::Named => format!("{{{name}}}"),
        }
    }

    /// Re-export clause used by the index artifact.
    #[must_use]
    pub fn index_export(&self, name: &str) -> String {
        match self.export_type {
            ExportType::Default => format!("{{ default as {name} }}"),
            ExportType::Named => format!("{{ {name} }}"),
        }
    }

    #[must_use]
    pub const fn visibility_prefix(&self) -> &'static str {
        self.visibility.prefix()
    }

    #[must_use]
    pub const fn strict_marker(&self) -> &'static str {
        self.strict_mode.marker()
    }
}
