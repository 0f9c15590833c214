//! APImd CLI
//!
//! Command-line interface for turning OpenAPI documents and hand-written
//! endpoint definitions into Markdown API docs.

use anyhow::{Context, Result};
use apimd_common::{Config, Document, RenderOptions};
use apimd_generator::MarkdownGenerator;
use apimd_parser::{load_document, OpenApiParser};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "apimd")]
#[command(version, about = "Generate Markdown API documentation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to apimd.yaml or apimd.yml in the current directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import an OpenAPI / Swagger JSON document and render it
    #[command(after_help = "EXAMPLES:\n  \
        # Print Markdown for an OpenAPI document\n  \
        apimd import --spec openapi.json\n\n  \
        # Write to a file without heading numbers\n  \
        apimd import --spec openapi.json -o docs/API.md --no-numbering\n\n  \
        # Dump the imported document as JSON\n  \
        apimd import --spec openapi.json --format json")]
    Import {
        /// Path to the OpenAPI JSON file
        #[arg(short, long)]
        spec: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable automatic numbering for endpoint headings
        #[arg(long)]
        no_numbering: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Markdown)]
        format: OutputFormat,
    },

    /// Render Markdown from a YAML/JSON document definition
    #[command(after_help = "EXAMPLES:\n  \
        # Print Markdown for a definition file\n  \
        apimd render api.yaml\n\n  \
        # Write to a file\n  \
        apimd render api.yaml -o docs/API.md")]
    Render {
        /// Path to the YAML/JSON document definition
        definition: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable automatic numbering for endpoint headings
        #[arg(long)]
        no_numbering: bool,
    },

    /// Import an OpenAPI document and list the endpoints found
    Inspect {
        /// Path to the OpenAPI JSON file
        #[arg(short, long)]
        spec: PathBuf,
    },

    /// Validate a document definition without rendering
    Validate {
        /// Definition file to validate
        definition: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Rendered Markdown
    Markdown,
    /// The imported document as JSON
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        eprintln!("{} Verbose mode enabled", "→".cyan());
    }

    let config = load_config(cli.config.as_deref())?;
    debug!(?config, "loaded configuration");

    match cli.command {
        Commands::Import {
            spec,
            output,
            no_numbering,
            format,
        } => {
            import_command(
                &spec,
                output.as_deref(),
                render_options(&config, no_numbering),
                format,
                &config,
            )?;
        }
        Commands::Render {
            definition,
            output,
            no_numbering,
        } => {
            render_command(
                &definition,
                output.as_deref(),
                render_options(&config, no_numbering),
                &config,
            )?;
        }
        Commands::Inspect { spec } => {
            inspect_command(&spec, cli.verbose)?;
        }
        Commands::Validate { definition } => {
            validate_command(&definition)?;
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match explicit {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            Config::discover(&cwd).context("Failed to load config")
        }
    }
}

fn render_options(config: &Config, no_numbering: bool) -> RenderOptions {
    RenderOptions {
        numbering: config.render.numbering && !no_numbering,
    }
}

/// Explicit `--output` first, then the configured output directory
fn resolve_output(explicit: Option<&Path>, config: &Config) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| config.output.target_path())
}

fn import_openapi(spec_path: &Path) -> Result<Document> {
    let parser = OpenApiParser::from_file(spec_path)
        .with_context(|| format!("Failed to load OpenAPI document {}", spec_path.display()))?;
    parser.parse().context("Failed to import OpenAPI document")
}

fn import_command(
    spec_path: &Path,
    output: Option<&Path>,
    options: RenderOptions,
    format: OutputFormat,
    config: &Config,
) -> Result<()> {
    eprintln!("{} Importing: {}", "→".cyan(), spec_path.display());

    let document = import_openapi(spec_path)?;
    eprintln!(
        "{} Imported {} endpoints",
        "✓".green(),
        document.endpoints.len()
    );

    match format {
        OutputFormat::Markdown => {
            emit_markdown(&document, options, resolve_output(output, config).as_deref())
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&document)
                .context("Failed to serialize document")?;
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        fs::create_dir_all(parent).with_context(|| {
                            format!("Failed to create directory {}", parent.display())
                        })?;
                    }
                    fs::write(path, format!("{}\n", json))
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    eprintln!("{} Document written to {}", "✓".green(), path.display());
                }
                None => println!("{}", json),
            }
            Ok(())
        }
    }
}

fn render_command(
    definition: &Path,
    output: Option<&Path>,
    options: RenderOptions,
    config: &Config,
) -> Result<()> {
    eprintln!("{} Loading definition: {}", "→".cyan(), definition.display());

    let document = load_document(definition)
        .with_context(|| format!("Failed to load definition {}", definition.display()))?;

    emit_markdown(&document, options, resolve_output(output, config).as_deref())
}

fn emit_markdown(document: &Document, options: RenderOptions, output: Option<&Path>) -> Result<()> {
    let generator = MarkdownGenerator::new(options);

    match output {
        Some(path) => {
            generator
                .generate_to_file(document, path)
                .context("Failed to write Markdown")?;
            eprintln!("{} Markdown written to {}", "✓".green(), path.display());
        }
        None => println!("{}", generator.render(document)),
    }

    Ok(())
}

fn inspect_command(spec_path: &Path, verbose: bool) -> Result<()> {
    eprintln!("{} Inspecting: {}", "→".cyan(), spec_path.display());

    let document = import_openapi(spec_path)?;

    println!("\n{}", "✓ Import successful!".green().bold());
    println!("\n{}", "Document:".bold());
    println!("  Title: {}", display_or_unset(&document.title).yellow());
    println!("  Endpoints: {}", document.endpoints.len());

    println!("\n{}", "Endpoints:".bold());
    for endpoint in &document.endpoints {
        println!(
            "  • {} {} ({})",
            endpoint.method.as_str().cyan(),
            display_or_unset(&endpoint.path),
            endpoint.name
        );
        println!(
            "    Headers: {}, Parameters: {}",
            endpoint.headers.len(),
            endpoint.parameters.len()
        );

        let examples = [
            ("request", &endpoint.request_example),
            ("response", &endpoint.response_example),
        ]
        .iter()
        .filter(|(_, text)| !text.is_empty())
        .map(|(kind, _)| *kind)
        .collect::<Vec<_>>();
        if examples.is_empty() {
            println!("    Examples: {}", "none".yellow());
        } else {
            println!("    Examples: {}", examples.join(", "));
        }

        if verbose {
            for param in &endpoint.parameters {
                println!(
                    "      - {}: {} ({})",
                    param.name,
                    param.param_type,
                    if param.required.is_required() { "required" } else { "optional" }
                );
            }
        }
    }

    Ok(())
}

fn validate_command(definition: &Path) -> Result<()> {
    let document = load_document(definition)
        .with_context(|| format!("Invalid definition {}", definition.display()))?;

    println!(
        "{} Definition is valid ({} endpoints)",
        "✓".green(),
        document.endpoints.len()
    );
    if document.endpoints.is_empty() {
        println!("{} Definition has no endpoints", "!".yellow());
    }

    Ok(())
}

fn display_or_unset(text: &str) -> &str {
    if text.trim().is_empty() {
        "(unset)"
    } else {
        text
    }
}
