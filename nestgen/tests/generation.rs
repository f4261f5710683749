//! End-to-end generation tests over a small two-entity schema.

use std::fs;
use std::path::{Path, PathBuf};

use nestgen::{
    Column, ColumnOptions, Entity, ExportType, FormatError, Formatter, GenerationOptions,
    Generator, JoinColumn, NoopFormatter, Relation, RelationType,
};

struct FailingFormatter;

impl Formatter for FailingFormatter {
    fn format(&self, _source: &str) -> Result<String, FormatError> {
        Err(FormatError::InvalidOutput {
            command: "broken-formatter".to_owned(),
        })
    }
}

fn column(name: &str, ts_type: &str, primary: bool) -> Column {
    Column {
        tsc_name: name.to_owned(),
        primary,
        ts_type: ts_type.to_owned(),
        options: ColumnOptions::default(),
    }
}

/// `user_profile` has many `post`s; `post` owns the foreign key `ownerId`.
fn schema() -> Vec<Entity> {
    vec![
        Entity {
            tsc_name: "user_profile".to_owned(),
            file_name: "user_profile".to_owned(),
            sql_name: "user_profiles".to_owned(),
            columns: vec![column("id", "number", true), column("name", "string", false)],
            relations: vec![Relation {
                relation_type: RelationType::OneToMany,
                related_table: "post".to_owned(),
                field_name: "posts".to_owned(),
                join_column_options: None,
            }],
        },
        Entity {
            tsc_name: "post".to_owned(),
            file_name: "post".to_owned(),
            sql_name: "posts".to_owned(),
            columns: vec![
                column("id", "number", true),
                column("title", "string", false),
                column("ownerId", "number", false),
            ],
            relations: vec![Relation {
                relation_type: RelationType::ManyToOne,
                related_table: "user_profile".to_owned(),
                field_name: "owner".to_owned(),
                join_column_options: Some(vec![JoinColumn {
                    name: "ownerId".to_owned(),
                }]),
            }],
        },
    ]
}

fn generate_into(root: &Path, configure: impl FnOnce(&mut GenerationOptions)) -> Vec<PathBuf> {
    let mut options = GenerationOptions::new(root);
    configure(&mut options);
    let generator = Generator::new(&options, &NoopFormatter).unwrap();
    generator
        .run(&schema())
        .unwrap()
        .into_iter()
        .map(|f| f.path)
        .collect()
}

fn read(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    fs::read_to_string(path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

#[test]
fn emits_one_file_per_entity_per_kind_plus_module() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let written = generate_into(&out, |_| {});

    assert_eq!(written.len(), 9);
    for expected in [
        "models/user-profile.model.ts",
        "models/post.model.ts",
        "dtos/user-profile.dto.ts",
        "dtos/post.dto.ts",
        "services/user-profile.service.ts",
        "services/post.service.ts",
        "controllers/user-profile.controller.ts",
        "controllers/post.controller.ts",
        "out.module.ts",
    ] {
        assert!(out.join(expected).is_file(), "missing {expected}");
    }
}

#[test]
fn model_excludes_primary_columns_and_prunes_imports() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    generate_into(&out, |_| {});

    let user = read(out.join("models/user-profile.model.ts"));
    assert!(user.starts_with("import {BaseEntity,Column,Entity,OneToMany} from \"typeorm\";"));
    assert!(user.contains("export class UserProfileModel extends BaseEntity {"));
    assert!(user.contains("name: string;"));
    assert!(!user.contains("id: number"));
    assert!(user.contains("@OneToMany(() => PostModel)"));
    assert!(user.contains("posts: PostModel[];"));
    assert!(user.contains("import {PostModel} from \"./post.model\";"));

    let post = read(out.join("models/post.model.ts"));
    assert!(post.starts_with(
        "import {BaseEntity,Column,Entity,JoinColumn,ManyToOne} from \"typeorm\";"
    ));
    assert!(post.contains("ownerId: number;"));
    assert!(post.contains("@ManyToOne(() => UserProfileModel)"));
    assert!(post.contains("@JoinColumn({ name: \"ownerId\" })"));
    assert!(post.contains("owner: UserProfileModel;"));
}

#[test]
fn dto_drops_primary_and_foreign_key_columns() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    generate_into(&out, |_| {});

    let post = read(out.join("dtos/post.dto.ts"));
    assert!(post.contains("export class PostDto {"));
    assert!(post.contains("title: string;"));
    assert!(!post.contains("ownerId"));
    assert!(!post.contains("id: number"));
    // To-one relations are not embedded in a DTO.
    assert!(!post.contains("owner:"));

    let user = read(out.join("dtos/user-profile.dto.ts"));
    assert!(user.contains("posts: PostDto[];"));
    assert!(user.contains("import {PostDto} from \"./post.dto\";"));
}

#[test]
fn services_and_controllers_render_the_full_entity() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    generate_into(&out, |_| {});

    let service = read(out.join("services/user-profile.service.ts"));
    assert!(service.contains("export class UserProfileService {"));
    assert!(service.contains("@InjectRepository(UserProfileModel)"));
    assert!(service.contains("import {UserProfileModel} from \"../models/user-profile.model\";"));

    let controller = read(out.join("controllers/user-profile.controller.ts"));
    assert!(controller.contains("export class UserProfileController {"));
    assert!(controller.contains("@Controller(\"user-profile\")"));
    // One nested route per OneToMany relation.
    assert!(controller.contains("@Get(\":id/posts\")"));
    assert!(controller.contains("findPosts(@Param(\"id\") id: number)"));

    let post_controller = read(out.join("controllers/post.controller.ts"));
    assert!(!post_controller.contains(":id/owner"));
}

#[test]
fn module_aggregates_every_entity() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    generate_into(&out, |_| {});

    let module = read(out.join("out.module.ts"));
    assert!(module.contains("export class OutModule {}"));
    assert!(module.contains("TypeOrmModule.forFeature([UserProfileModel, PostModel])"));
    assert!(module.contains("controllers: [UserProfileController, PostController]"));
    assert!(module.contains("providers: [UserProfileService, PostService]"));
    assert!(module.contains("import {UserProfileModel} from \"./models/user-profile.model\";"));
}

#[test]
fn index_file_is_emitted_on_request() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let written = generate_into(&out, |o| o.index_file = true);

    assert_eq!(written.len(), 10);
    let index = read(out.join("models/index.ts"));
    assert_eq!(
        index,
        "export { UserProfileModel } from \"./user-profile.model\";\n\
         export { PostModel } from \"./post.model\";\n"
    );
}

#[test]
fn no_configs_flattens_the_output_tree() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    generate_into(&out, |o| o.no_configs = true);

    assert!(out.join("user-profile.model.ts").is_file());
    assert!(out.join("post.controller.ts").is_file());
    assert!(!out.join("models").exists());

    let service = read(out.join("user-profile.service.ts"));
    assert!(service.contains("import {UserProfileModel} from \"./user-profile.model\";"));
    let module = read(out.join("out.module.ts"));
    assert!(module.contains("import {UserProfileService} from \"./user-profile.service\";"));
}

#[test]
fn default_export_and_lazy_relations() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    generate_into(&out, |o| {
        o.export_type = ExportType::Default;
        o.lazy = true;
    });

    let user = read(out.join("models/user-profile.model.ts"));
    assert!(user.contains("export default class UserProfileModel"));
    assert!(user.contains("posts: Promise<PostModel[]>;"));
    assert!(user.contains("import PostModel from \"./post.model\";"));

    let post = read(out.join("models/post.model.ts"));
    assert!(post.contains("owner: Promise<UserProfileModel>;"));
}

#[test]
fn formatter_failure_is_recovered_per_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let options = GenerationOptions::new(&out);
    let generator = Generator::new(&options, &FailingFormatter).unwrap();
    let written = generator.run(&schema()).unwrap();

    // Every artifact is still produced, carrying the pruned text.
    assert_eq!(written.len(), 9);
    let user = read(out.join("models/user-profile.model.ts"));
    assert!(user.starts_with("import {BaseEntity,Column,Entity,OneToMany} from \"typeorm\";"));
}

fn collect_files(root: &Path, into: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(root).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(&path, into);
        } else {
            into.push(path);
        }
    }
}

#[test]
fn reruns_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let out_a = dir.path().join("out");
    generate_into(&out_a, |o| o.index_file = true);

    let other = tempfile::tempdir().unwrap();
    let out_b = other.path().join("out");
    generate_into(&out_b, |o| o.index_file = true);

    let mut files_a = Vec::new();
    collect_files(&out_a, &mut files_a);
    files_a.sort();
    assert_eq!(files_a.len(), 10);

    for path_a in files_a {
        let rel = path_a.strip_prefix(&out_a).unwrap();
        let path_b = out_b.join(rel);
        assert_eq!(
            fs::read(&path_a).unwrap(),
            fs::read(&path_b).unwrap(),
            "differs: {}",
            rel.display()
        );
    }
}

#[cfg(not(windows))]
#[test]
fn configured_eol_rewrites_line_endings() {
    use nestgen::Eol;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    generate_into(&out, |o| o.convert_eol = Eol::Crlf);

    let user = read(out.join("models/user-profile.model.ts"));
    assert!(user.contains("\r\n"));
    assert!(!user.replace("\r\n", "").contains('\n'));
}

#[test]
fn schema_violations_abort_before_any_write() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    let options = GenerationOptions::new(&out);
    let generator = Generator::new(&options, &NoopFormatter).unwrap();

    let mut entities = schema();
    let dup = entities[0].columns[1].clone();
    entities[0].columns.push(dup);

    assert!(generator.run(&entities).is_err());
    assert!(!out.exists());
}
