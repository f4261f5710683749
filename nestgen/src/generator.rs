//! Generation orchestrator.
//!
//! Drives the per-artifact-kind loop over all entities: filter → render →
//! normalize → prune → format → write. The entity graph is read-only and
//! shared across stages; entities are processed in input order within a
//! kind, and the reference order of stages is index (optional), models,
//! services, controllers, module, DTOs. No artifact reads another
//! artifact's output.

use std::path::PathBuf;

use convert_case::{Case, Casing};
use serde_json::{json, Value};

use crate::config::GenerationOptions;
use crate::error::Result;
use crate::filter::{self, ControllerProjection, EntityProjection};
use crate::model::{Column, Entity};
use crate::naming::NamingPolicy;
use crate::output::{self, OutputLayout, ARTIFACT_EXT};
use crate::render::{self, Formatter};
use crate::templates::TemplateSet;

/// One generated file kind per entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Model,
    Dto,
    Service,
    Controller,
}

impl ArtifactKind {
    const fn template(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Dto => "dto",
            Self::Service => "service",
            Self::Controller => "controller",
        }
    }

    const fn description(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Dto => "DTO",
            Self::Service => "service",
            Self::Controller => "controller",
        }
    }
}

/// Record of one written artifact, for caller-side reporting.
#[derive(Debug)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub description: String,
}

/// Orchestrates one generation run.
pub struct Generator<'a> {
    options: &'a GenerationOptions,
    policy: NamingPolicy,
    layout: OutputLayout,
    templates: TemplateSet,
    formatter: &'a dyn Formatter,
}

impl<'a> Generator<'a> {
    /// Compile templates and resolve the output layout.
    pub fn new(options: &'a GenerationOptions, formatter: &'a dyn Formatter) -> Result<Self> {
        Ok(Self {
            options,
            policy: options.naming(),
            layout: OutputLayout::resolve(options),
            templates: TemplateSet::new()?,
            formatter,
        })
    }

    /// Generate every artifact for `entities`.
    ///
    /// Schema validation and directory creation happen before the first
    /// write. Configuration, template and I/O failures abort the run;
    /// formatter failures are recovered per artifact.
    pub fn run(&self, entities: &[Entity]) -> Result<Vec<GeneratedFile>> {
        for entity in entities {
            entity.validate()?;
        }
        self.layout.ensure()?;

        let mut written = Vec::new();
        if self.options.index_file {
            written.push(self.emit_index(entities)?);
        }
        written.extend(self.emit_kind(ArtifactKind::Model, entities)?);
        written.extend(self.emit_kind(ArtifactKind::Service, entities)?);
        written.extend(self.emit_kind(ArtifactKind::Controller, entities)?);
        written.push(self.emit_module(entities)?);
        written.extend(self.emit_kind(ArtifactKind::Dto, entities)?);
        Ok(written)
    }

    /// One loop serves all four entity-level kinds; only the filter rule,
    /// template and file suffix differ.
    fn emit_kind(&self, kind: ArtifactKind, entities: &[Entity]) -> Result<Vec<GeneratedFile>> {
        let mut files = Vec::with_capacity(entities.len());
        for entity in entities {
            let context = self.context_for(kind, entity);
            let rendered = self.templates.render(kind.template(), &context)?;
            let finished = render::finish(
                &rendered,
                self.options.convert_eol,
                self.formatter,
                &entity.sql_name,
            );

            let stem = match kind {
                ArtifactKind::Model => self.policy.model_file_stem(&entity.file_name),
                ArtifactKind::Dto => self.policy.dto_file_stem(&entity.file_name),
                ArtifactKind::Service => self.policy.service_file_stem(&entity.file_name),
                ArtifactKind::Controller => self.policy.controller_file_stem(&entity.file_name),
            };
            let dir = match kind {
                ArtifactKind::Model => self.layout.models(),
                ArtifactKind::Dto => self.layout.dtos(),
                ArtifactKind::Service => self.layout.services(),
                ArtifactKind::Controller => self.layout.controllers(),
            };
            let path = dir.join(format!("{stem}.{ARTIFACT_EXT}"));
            output::write_artifact(&path, &finished)?;
            files.push(GeneratedFile {
                path,
                description: format!("{} for {}", kind.description(), entity.tsc_name),
            });
        }
        Ok(files)
    }

    fn emit_module(&self, entities: &[Entity]) -> Result<GeneratedFile> {
        let base = self.layout.module_base();
        let context = self.module_context(&base, entities);
        let rendered = self.templates.render("module", &context)?;
        let finished = render::finish(&rendered, self.options.convert_eol, self.formatter, &base);

        let stem = self.policy.module_file_stem(&base);
        let path = self.layout.results().join(format!("{stem}.{ARTIFACT_EXT}"));
        output::write_artifact(&path, &finished)?;
        Ok(GeneratedFile {
            path,
            description: format!("module aggregate {}", self.policy.module_name(&base)),
        })
    }

    fn emit_index(&self, entities: &[Entity]) -> Result<GeneratedFile> {
        let context = json!({
            "entities": entities
                .iter()
                .map(|e| {
                    let model_name = self.policy.model_name(&e.tsc_name);
                    json!({
                        "export_clause": self.policy.index_export(&model_name),
                        "model_file": self.policy.model_file_stem(&e.file_name),
                    })
                })
                .collect::<Vec<_>>(),
        });
        let rendered = self.templates.render("index", &context)?;
        // Re-export clauses carry no decorator usage, so pruning must not run.
        let finished =
            render::finish_unpruned(&rendered, self.options.convert_eol, self.formatter, "index");

        let stem = self.policy.index_file_stem();
        let path = self.layout.models().join(format!("{stem}.{ARTIFACT_EXT}"));
        output::write_artifact(&path, &finished)?;
        Ok(GeneratedFile {
            path,
            description: "model index".to_owned(),
        })
    }

    fn context_for(&self, kind: ArtifactKind, entity: &Entity) -> Value {
        match kind {
            ArtifactKind::Model => self.model_context(&filter::model_projection(entity)),
            ArtifactKind::Dto => self.dto_context(&filter::dto_projection(entity)),
            ArtifactKind::Service => self.service_context(&filter::service_projection(entity)),
            ArtifactKind::Controller => {
                self.controller_context(&filter::controller_projection(entity))
            }
        }
    }

    fn column_contexts(&self, columns: &[Column]) -> Vec<Value> {
        columns
            .iter()
            .map(|c| {
                json!({
                    "name": self.policy.property_name(&c.tsc_name),
                    "ts_type": c.ts_type,
                    "nullable": c.options.nullable,
                })
            })
            .collect()
    }

    fn model_context(&self, projection: &EntityProjection) -> Value {
        json!({
            "sql_name": projection.sql_name,
            "model_name": self.policy.model_name(&projection.tsc_name),
            "export": self.policy.export_token(),
            "visibility": self.policy.visibility_prefix(),
            "strict": self.policy.strict_marker(),
            "columns": self.column_contexts(&projection.columns),
            "relations": projection
                .relations
                .iter()
                .map(|r| {
                    let related_model = self.policy.model_name(&r.related_table);
                    json!({
                        "decorator": r.relation_type.decorator(),
                        "property": self.policy.property_name(&r.field_name),
                        "related_model": related_model,
                        "related_import": self.policy.local_import(&related_model),
                        "related_file": self.policy.model_file_stem(&r.related_table),
                        "type_expr": self.policy.relation_expr(&related_model, r.relation_type),
                        "join_column": r
                            .join_column_options
                            .as_deref()
                            .and_then(<[_]>::first)
                            .map(|j| j.name.clone()),
                    })
                })
                .collect::<Vec<_>>(),
        })
    }

    fn dto_context(&self, projection: &EntityProjection) -> Value {
        json!({
            "dto_name": self.policy.dto_name(&projection.tsc_name),
            "export": self.policy.export_token(),
            "visibility": self.policy.visibility_prefix(),
            "strict": self.policy.strict_marker(),
            "columns": self.column_contexts(&projection.columns),
            "relations": projection
                .relations
                .iter()
                .map(|r| {
                    let related_dto = self.policy.dto_name(&r.related_table);
                    json!({
                        "property": self.policy.property_name(&r.field_name),
                        "related_import": self.policy.local_import(&related_dto),
                        "related_file": self.policy.dto_file_stem(&r.related_table),
                        "type_expr": self.policy.relation_expr(&related_dto, r.relation_type),
                    })
                })
                .collect::<Vec<_>>(),
        })
    }

    fn service_context(&self, projection: &EntityProjection) -> Value {
        let model_name = self.policy.model_name(&projection.tsc_name);
        json!({
            "service_name": self.policy.service_name(&projection.tsc_name),
            "model_name": model_name,
            "model_import": self.policy.local_import(&model_name),
            "model_path": self.sibling_path("models", &self.policy.model_file_stem(&projection.file_name)),
            "export": self.policy.export_token(),
        })
    }

    fn controller_context(&self, projection: &ControllerProjection) -> Value {
        let entity = &projection.entity;
        let model_name = self.policy.model_name(&entity.tsc_name);
        let service_name = self.policy.service_name(&entity.tsc_name);
        json!({
            "controller_name": self.policy.controller_name(&entity.tsc_name),
            "service_name": service_name,
            "service_import": self.policy.local_import(&service_name),
            "service_path": self.sibling_path("services", &self.policy.service_file_stem(&entity.file_name)),
            "model_name": model_name,
            "model_import": self.policy.local_import(&model_name),
            "model_path": self.sibling_path("models", &self.policy.model_file_stem(&entity.file_name)),
            "route": entity.tsc_name.to_case(Case::Kebab),
            "export": self.policy.export_token(),
            "relations_one_to_many": projection
                .relations_one_to_many
                .iter()
                .map(|r| {
                    json!({
                        "route_segment": self.policy.property_name(&r.field_name),
                        "accessor": format!("find{}", r.field_name.to_case(Case::Pascal)),
                    })
                })
                .collect::<Vec<_>>(),
        })
    }

    fn module_context(&self, base: &str, entities: &[Entity]) -> Value {
        json!({
            "module_name": self.policy.module_name(base),
            "export": self.policy.export_token(),
            "entities": entities
                .iter()
                .map(|e| {
                    let model_name = self.policy.model_name(&e.tsc_name);
                    let service_name = self.policy.service_name(&e.tsc_name);
                    let controller_name = self.policy.controller_name(&e.tsc_name);
                    json!({
                        "model_name": model_name,
                        "service_name": service_name,
                        "controller_name": controller_name,
                        "model_import": self.policy.local_import(&model_name),
                        "service_import": self.policy.local_import(&service_name),
                        "controller_import": self.policy.local_import(&controller_name),
                        "model_path": self.root_path("models", &self.policy.model_file_stem(&e.file_name)),
                        "service_path": self.root_path("services", &self.policy.service_file_stem(&e.file_name)),
                        "controller_path": self.root_path("controllers", &self.policy.controller_file_stem(&e.file_name)),
                    })
                })
                .collect::<Vec<_>>(),
        })
    }

    /// Import path from a per-kind subdirectory to a sibling kind's file.
    fn sibling_path(&self, kind_dir: &str, stem: &str) -> String {
        if self.options.no_configs {
            format!("./{stem}")
        } else {
            format!("../{kind_dir}/{stem}")
        }
    }

    /// Import path from the results root into a kind subdirectory.
    fn root_path(&self, kind_dir: &str, stem: &str) -> String {
        if self.options.no_configs {
            format!("./{stem}")
        } else {
            format!("./{kind_dir}/{stem}")
        }
    }
}
