//! Static templates for every artifact kind.
//!
//! Templates are MiniJinja sources rendered with auto-escaping disabled.
//! They receive contexts whose names are already cased through the
//! [`NamingPolicy`](crate::naming::NamingPolicy); the templates themselves
//! never convert case. Entity-level templates open with a single grouped
//! import that deliberately lists every symbol they might emit — the
//! import-pruning pass drops the unused ones afterwards.

use minijinja::{AutoEscape, Environment};
use serde_json::Value;

use crate::error::Result;

/// Model artifact: one class per entity, extending the shared base.
pub const MODEL_TEMPLATE: &str = r#"import {BaseEntity,Column,Entity,JoinColumn,ManyToMany,ManyToOne,OneToMany,OneToOne} from "typeorm";
{% for rel in relations %}import {{ rel.related_import }} from "./{{ rel.related_file }}";
{% endfor %}
@Entity("{{ sql_name }}")
export {{ export }}class {{ model_name }} extends BaseEntity {
{% for col in columns %}  @Column()
  {{ visibility }}{{ col.name }}{{ strict }}: {{ col.ts_type }}{% if col.nullable %} | null{% endif %};

{% endfor %}{% for rel in relations %}  @{{ rel.decorator }}(() => {{ rel.related_model }})
{% if rel.join_column %}  @JoinColumn({ name: "{{ rel.join_column }}" })
{% endif %}  {{ visibility }}{{ rel.property }}{{ strict }}: {{ rel.type_expr }};

{% endfor %}}
"#;

/// DTO artifact: scalar fields plus embedded to-many relations.
pub const DTO_TEMPLATE: &str = r#"import {ApiProperty} from "@nestjs/swagger";
{% for rel in relations %}import {{ rel.related_import }} from "./{{ rel.related_file }}";
{% endfor %}
export {{ export }}class {{ dto_name }} {
{% for col in columns %}  @ApiProperty()
  {{ visibility }}{{ col.name }}{{ strict }}: {{ col.ts_type }}{% if col.nullable %} | null{% endif %};

{% endfor %}{% for rel in relations %}  @ApiProperty()
  {{ visibility }}{{ rel.property }}{{ strict }}: {{ rel.type_expr }};

{% endfor %}}
"#;

/// Service artifact: repository wrapper over the entity's model.
pub const SERVICE_TEMPLATE: &str = r#"import {Injectable} from "@nestjs/common";
import {InjectRepository} from "@nestjs/typeorm";
import {Repository} from "typeorm";
import {{ model_import }} from "{{ model_path }}";

@Injectable()
export {{ export }}class {{ service_name }} {
  constructor(
    @InjectRepository({{ model_name }})
    private readonly repository: Repository<{{ model_name }}>,
  ) {}

  findAll(): Promise<{{ model_name }}[]> {
    return this.repository.find();
  }

  findOne(id: number): Promise<{{ model_name }} | null> {
    return this.repository.findOneBy({ id });
  }

  save(entity: {{ model_name }}): Promise<{{ model_name }}> {
    return this.repository.save(entity);
  }

  async remove(id: number): Promise<void> {
    await this.repository.delete(id);
  }
}
"#;

/// Controller artifact: CRUD routes plus one nested route per to-many
/// relation.
pub const CONTROLLER_TEMPLATE: &str = r#"import {Controller,Delete,Get,Param} from "@nestjs/common";
import {{ service_import }} from "{{ service_path }}";
import {{ model_import }} from "{{ model_path }}";

@Controller("{{ route }}")
export {{ export }}class {{ controller_name }} {
  constructor(private readonly service: {{ service_name }}) {}

  @Get()
  findAll(): Promise<{{ model_name }}[]> {
    return this.service.findAll();
  }

  @Get(":id")
  findOne(@Param("id") id: number): Promise<{{ model_name }} | null> {
    return this.service.findOne(id);
  }

  @Delete(":id")
  remove(@Param("id") id: number): Promise<void> {
    return this.service.remove(id);
  }
{% for rel in relations_one_to_many %}
  @Get(":id/{{ rel.route_segment }}")
  {{ rel.accessor }}(@Param("id") id: number): Promise<{{ model_name }} | null> {
    return this.service.findOne(id);
  }
{% endfor %}}
"#;

/// Module artifact: one aggregate file wiring every entity's pieces.
pub const MODULE_TEMPLATE: &str = r#"import {Module} from "@nestjs/common";
import {TypeOrmModule} from "@nestjs/typeorm";
{% for e in entities %}import {{ e.model_import }} from "{{ e.model_path }}";
import {{ e.service_import }} from "{{ e.service_path }}";
import {{ e.controller_import }} from "{{ e.controller_path }}";
{% endfor %}
@Module({
  imports: [TypeOrmModule.forFeature([{% for e in entities %}{{ e.model_name }}{% if not loop.last %}, {% endif %}{% endfor %}])],
  controllers: [{% for e in entities %}{{ e.controller_name }}{% if not loop.last %}, {% endif %}{% endfor %}],
  providers: [{% for e in entities %}{{ e.service_name }}{% if not loop.last %}, {% endif %}{% endfor %}],
})
export {{ export }}class {{ module_name }} {}
"#;

/// Optional index artifact: re-exports every model.
pub const INDEX_TEMPLATE: &str = r#"{% for e in entities %}export {{ e.export_clause }} from "./{{ e.model_file }}";
{% endfor %}"#;

/// Compiled template environment for one generation run.
pub struct TemplateSet {
    env: Environment<'static>,
}

impl TemplateSet {
    /// Compile the built-in templates.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template("model", MODEL_TEMPLATE)?;
        env.add_template("dto", DTO_TEMPLATE)?;
        env.add_template("service", SERVICE_TEMPLATE)?;
        env.add_template("controller", CONTROLLER_TEMPLATE)?;
        env.add_template("module", MODULE_TEMPLATE)?;
        env.add_template("index", INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    /// Render one template against a precomputed context.
    pub fn render(&self, name: &str, context: &Value) -> Result<String> {
        Ok(self.env.get_template(name)?.render(context)?)
    }
}
