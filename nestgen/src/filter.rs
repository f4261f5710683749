//! Per-artifact-kind visibility rules.
//!
//! Each function derives the column/relation subset one artifact kind is
//! allowed to see. The source [`Entity`] is never mutated; every projection
//! is a shallow copy consumed only by the corresponding template render.

use serde::Serialize;

use crate::model::{Column, Entity, Relation, RelationType};

/// The slice of one entity visible to a single artifact render.
#[derive(Debug, Clone, Serialize)]
pub struct EntityProjection {
    pub tsc_name: String,
    pub file_name: String,
    pub sql_name: String,
    pub columns: Vec<Column>,
    pub relations: Vec<Relation>,
}

impl EntityProjection {
    fn unfiltered(entity: &Entity) -> Self {
        Self {
            tsc_name: entity.tsc_name.clone(),
            file_name: entity.file_name.clone(),
            sql_name: entity.sql_name.clone(),
            columns: entity.columns.clone(),
            relations: entity.relations.clone(),
        }
    }
}

/// Controller render data: the unfiltered entity plus its to-many subset.
#[derive(Debug, Clone, Serialize)]
pub struct ControllerProjection {
    pub entity: EntityProjection,
    pub relations_one_to_many: Vec<Relation>,
}

/// Model artifact: all relations, columns minus primary keys.
///
/// Primary keys are supplied by the shared base abstraction and never
/// redeclared on the generated class.
#[must_use]
pub fn model_projection(entity: &Entity) -> EntityProjection {
    let mut projection = EntityProjection::unfiltered(entity);
    projection.columns.retain(|c| !c.primary);
    projection
}

/// DTO artifact: OneToMany relations only; columns minus primary keys and
/// minus any column that backs a ManyToOne relation's foreign key.
///
/// To-one relations are not embedded in a DTO and their foreign-key values
/// travel through the relation navigation instead of a raw scalar.
#[must_use]
pub fn dto_projection(entity: &Entity) -> EntityProjection {
    let mut projection = EntityProjection::unfiltered(entity);
    projection.columns.retain(|column| {
        if column.primary {
            return false;
        }
        !entity
            .relations
            .iter()
            .filter(|r| r.relation_type == RelationType::ManyToOne)
            .any(|r| r.joins_on(&column.tsc_name))
    });
    projection
        .relations
        .retain(|r| r.relation_type == RelationType::OneToMany);
    projection
}

/// Service artifact: the full entity, no filtering.
#[must_use]
pub fn service_projection(entity: &Entity) -> EntityProjection {
    EntityProjection::unfiltered(entity)
}

/// Controller artifact: unfiltered entity alongside the OneToMany subset,
/// computed identically to the DTO relation rule.
#[must_use]
pub fn controller_projection(entity: &Entity) -> ControllerProjection {
    let relations_one_to_many = entity
        .relations
        .iter()
        .filter(|r| r.relation_type == RelationType::OneToMany)
        .cloned()
        .collect();
    ControllerProjection {
        entity: EntityProjection::unfiltered(entity),
        relations_one_to_many,
    }
}
