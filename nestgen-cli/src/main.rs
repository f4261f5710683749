//! nestgen CLI.
//!
//! Loads a schema model produced by the introspection step, builds the
//! generation options from flags, and runs the generator.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use nestgen::{
    Entity, EntityCase, Eol, ExportType, ExternalFormatter, FileCase, Formatter, GenerationOptions,
    Generator, NoopFormatter, PropertyCase, StrictMode, Visibility,
};

#[derive(Parser)]
#[command(name = "nestgen")]
#[command(version)]
#[command(about = "Generate NestJS-style source artifacts from a relational schema model", long_about = None)]
struct Cli {
    /// Schema model JSON produced by the introspection step
    #[arg(long, value_name = "FILE")]
    schema: PathBuf,

    /// Output directory for generated artifacts
    #[arg(short, long, value_name = "DIR")]
    output: PathBuf,

    /// Case style for file stems: camel, param, pascal, none
    #[arg(long, value_name = "STYLE", default_value = "param")]
    case_file: FileCase,

    /// Case style for class names: camel, pascal, none
    #[arg(long, value_name = "STYLE", default_value = "pascal")]
    case_entity: EntityCase,

    /// Case style for properties: camel, pascal, snake, none
    #[arg(long, value_name = "STYLE", default_value = "camel")]
    case_property: PropertyCase,

    /// Line endings for generated files: lf, crlf (default: platform)
    #[arg(long, value_name = "EOL")]
    eol: Option<Eol>,

    /// Wrap related-type expressions in Promise<...>
    #[arg(long)]
    lazy: bool,

    /// Property visibility: public, protected, private, none
    #[arg(long, value_name = "VIS", default_value = "none")]
    visibility: Visibility,

    /// Export style for generated symbols: default, named
    #[arg(long, value_name = "STYLE", default_value = "named")]
    export: ExportType,

    /// Strict-mode property marker: none, ?, !
    #[arg(long, value_name = "MODE", default_value = "none")]
    strict_mode: StrictMode,

    /// Write everything at the output root instead of per-kind directories
    #[arg(long)]
    no_configs: bool,

    /// Emit an aggregate index file in the model directory
    #[arg(long)]
    index_file: bool,

    /// External pretty-printer command, e.g. "prettier --parser typescript"
    #[arg(long, value_name = "CMD")]
    formatter: Option<String>,
}

impl Cli {
    fn options(&self) -> GenerationOptions {
        let mut options = GenerationOptions::new(&self.output);
        options.no_configs = self.no_configs;
        options.index_file = self.index_file;
        options.convert_case_file = self.case_file;
        options.convert_case_entity = self.case_entity;
        options.convert_case_property = self.case_property;
        if let Some(eol) = self.eol {
            options.convert_eol = eol;
        }
        options.lazy = self.lazy;
        options.property_visibility = self.visibility;
        options.export_type = self.export;
        options.strict_mode = self.strict_mode;
        options
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let raw = fs::read_to_string(&cli.schema)
        .with_context(|| format!("Failed to read schema file: {}", cli.schema.display()))?;
    let entities: Vec<Entity> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse schema file: {}", cli.schema.display()))?;

    println!(
        "\n{} {} entities from {}",
        style("Loaded").cyan().bold(),
        style(entities.len()).green().bold(),
        style(cli.schema.display()).dim()
    );

    let options = cli.options();
    let formatter: Box<dyn Formatter> = match cli.formatter.as_deref() {
        Some(cmd) => Box::new(ExternalFormatter::from_command_line(cmd)),
        None => Box::new(NoopFormatter),
    };

    let generator = Generator::new(&options, formatter.as_ref())
        .context("Failed to initialize generator")?;
    let written = generator
        .run(&entities)
        .context("Generation failed")?;

    println!();
    for file in &written {
        println!(
            "  {} {} ({})",
            style("✓").green(),
            style(file.path.display()).dim(),
            style(&file.description).dim()
        );
    }

    println!(
        "\n{} Generated {} files into {}",
        style("✨").green().bold(),
        style(written.len()).green().bold(),
        style(cli.output.display()).cyan()
    );

    Ok(())
}
