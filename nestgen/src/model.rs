//! Schema model handed over by the introspection step.
//!
//! The generator treats this graph as immutable input: it is built once,
//! read once per artifact kind, and never mutated. Per-artifact column and
//! relation subsets are derived as shallow copies in [`crate::filter`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Relation cardinality between two entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationType {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl RelationType {
    /// Whether the relation yields a collection of related instances.
    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }

    /// Decorator name emitted into generated source.
    #[must_use]
    pub const fn decorator(self) -> &'static str {
        match self {
            Self::OneToOne => "OneToOne",
            Self::OneToMany => "OneToMany",
            Self::ManyToOne => "ManyToOne",
            Self::ManyToMany => "ManyToMany",
        }
    }
}

/// Foreign-key column backing the owning side of a to-one relation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinColumn {
    pub name: String,
}

/// A relation endpoint on an entity.
///
/// `related_table` is a weak reference by name; the generator never chases
/// it back into the entity list. `join_column_options` is present only on
/// the owning side of a to-one relation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    pub relation_type: RelationType,
    pub related_table: String,
    pub field_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_column_options: Option<Vec<JoinColumn>>,
}

impl Relation {
    /// Whether `column_name` is one of this relation's foreign-key columns.
    #[must_use]
    pub fn joins_on(&self, column_name: &str) -> bool {
        self.join_column_options
            .as_deref()
            .is_some_and(|joins| joins.iter().any(|j| j.name == column_name))
    }
}

/// Nullability and default metadata carried through to the templates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColumnOptions {
    #[serde(default)]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// A single table column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub tsc_name: String,
    #[serde(default)]
    pub primary: bool,
    /// Semantic type descriptor in the target language.
    pub ts_type: String,
    #[serde(default)]
    pub options: ColumnOptions,
}

/// A schema table projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Canonical identifier fed to the naming policy.
    pub tsc_name: String,
    /// Canonical file stem, case-independent of artifact kind.
    pub file_name: String,
    /// Source table name, used only for diagnostics.
    pub sql_name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl Entity {
    /// Check the invariants the rendering pipeline relies on.
    ///
    /// Column names must be unique within the entity. Composite primary
    /// keys (multiple `primary` columns) are legal.
    pub fn validate(&self) -> Result<()> {
        let mut seen = Vec::with_capacity(self.columns.len());
        for column in &self.columns {
            if seen.contains(&column.tsc_name.as_str()) {
                return Err(Error::Schema(format!(
                    "entity '{}' declares column '{}' more than once",
                    self.tsc_name, column.tsc_name
                )));
            }
            seen.push(column.tsc_name.as_str());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str) -> Column {
        Column {
            tsc_name: name.to_owned(),
            primary: false,
            ts_type: "string".to_owned(),
            options: ColumnOptions::default(),
        }
    }

    #[test]
    fn duplicate_column_names_are_rejected() {
        let entity = Entity {
            tsc_name: "user".to_owned(),
            file_name: "user".to_owned(),
            sql_name: "users".to_owned(),
            columns: vec![column("name"), column("name")],
            relations: vec![],
        };
        assert!(matches!(entity.validate(), Err(Error::Schema(_))));
    }

    #[test]
    fn composite_primary_keys_are_legal() {
        let mut a = column("tenant_id");
        a.primary = true;
        let mut b = column("user_id");
        b.primary = true;
        let entity = Entity {
            tsc_name: "membership".to_owned(),
            file_name: "membership".to_owned(),
            sql_name: "memberships".to_owned(),
            columns: vec![a, b],
            relations: vec![],
        };
        assert!(entity.validate().is_ok());
    }

    #[test]
    fn joins_on_matches_join_column_names() {
        let relation = Relation {
            relation_type: RelationType::ManyToOne,
            related_table: "user".to_owned(),
            field_name: "owner".to_owned(),
            join_column_options: Some(vec![JoinColumn {
                name: "ownerId".to_owned(),
            }]),
        };
        assert!(relation.joins_on("ownerId"));
        assert!(!relation.joins_on("name"));
    }
}
