/*!
fieldviz Command Line Interface

Tabulates operation data and draws field boundaries or guidance groups from a
JSON data catalog.
*/

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use fieldviz::model::{Catalog, FieldBoundary, GuidanceGroup, GuidancePattern};
use fieldviz::reader::{JsonReader, Reader};
use fieldviz::render::{Canvas, RecordingCanvas};
use fieldviz::table::Table;
use fieldviz::{Config, Visualizer, VERSION};

#[cfg(feature = "svg")]
use fieldviz::render::SvgCanvas;

#[derive(Parser)]
#[command(name = "fieldviz")]
#[command(about = "Plan views and meter tables for agricultural field-operation data")]
#[command(version = VERSION)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Canvas width override
    #[arg(long, global = true)]
    pub width: Option<f64>,

    /// Canvas height override
    #[arg(long, global = true)]
    pub height: Option<f64>,

    /// Canvas margin override
    #[arg(long, global = true)]
    pub margin: Option<f64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the contents of a data catalog
    Inspect {
        /// JSON data catalog
        data: PathBuf,
    },

    /// Tabulate an operation's meter values
    Table {
        /// JSON data catalog
        data: PathBuf,

        /// Operation data id (defaults to the first operation)
        #[arg(long)]
        operation: Option<i32>,

        /// Output format
        #[arg(long, value_enum, default_value = "pretty")]
        format: TableFormat,
    },

    /// Draw a field boundary
    Boundary {
        /// JSON data catalog
        data: PathBuf,

        /// Field boundary id
        #[arg(long)]
        id: i32,

        /// SVG output path (prints the shapes as JSON when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Draw the patterns of a guidance group
    Guidance {
        /// JSON data catalog
        data: PathBuf,

        /// Guidance group id
        #[arg(long)]
        group: i32,

        /// SVG output path (prints the shapes as JSON when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TableFormat {
    Pretty,
    Json,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fieldviz=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Inspect { data } => {
            let catalog = load_catalog(&data)?;
            print_inventory(&catalog);
        }

        Commands::Table {
            data,
            operation,
            format,
        } => {
            let catalog = load_catalog(&data)?;
            let operation = match operation {
                Some(id) => catalog.operation(id)?,
                None => catalog
                    .operations()
                    .next()
                    .context("Catalog contains no operation data")?,
            };

            let mut viz = Visualizer::new(&config, RecordingCanvas::new(), Table::default())?;
            for warning in viz.process_operation_data(operation) {
                eprintln!("Warning: {}", warning);
            }
            let (_, table) = viz.into_parts();

            match format {
                TableFormat::Pretty => println!("{}", table.to_dataframe()?),
                TableFormat::Json => {
                    let json = serde_json::json!({
                        "columns": table.columns,
                        "rows": table.rows,
                    });
                    println!("{}", serde_json::to_string_pretty(&json)?);
                }
            }
        }

        Commands::Boundary { data, id, output } => {
            let catalog = load_catalog(&data)?;
            let boundary = catalog.field_boundary(id)?;
            draw(&config, output.as_deref(), |viz| viz.process_boundary(boundary))?;
        }

        Commands::Guidance {
            data,
            group,
            output,
        } => {
            let catalog = load_catalog(&data)?;
            let group = catalog.guidance_group(group)?;
            draw(&config, output.as_deref(), |viz| {
                viz.process_guidance(group, &catalog.guidance_patterns)
            })?;
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_path(path)?,
        None => Config::default(),
    };
    if let Some(width) = cli.width {
        config.viewport.width = width;
    }
    if let Some(height) = cli.height {
        config.viewport.height = height;
    }
    if let Some(margin) = cli.margin {
        config.viewport.margin = margin;
    }
    config.validate()?;
    Ok(config)
}

fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    Ok(JsonReader::from_path(path).read_catalog()?)
}

/// Run a drawing entry point against an SVG file or, without an output path,
/// against an in-memory canvas printed as JSON
fn draw<F>(config: &Config, output: Option<&Path>, render: F) -> anyhow::Result<()>
where
    F: Fn(&mut dyn DrawTarget) -> fieldviz::Result<()>,
{
    match output {
        #[cfg(feature = "svg")]
        Some(path) => {
            let canvas = SvgCanvas::new(path, config.viewport);
            let mut viz = Visualizer::new(config, canvas, Table::default())?;
            render(&mut viz)?;
            println!("SVG written to: {}", path.display());
        }
        #[cfg(not(feature = "svg"))]
        Some(_) => {
            anyhow::bail!("SVG output not compiled in. Rebuild with --features svg");
        }
        None => {
            let mut viz = Visualizer::new(config, RecordingCanvas::new(), Table::default())?;
            render(&mut viz)?;
            println!("{}", viz.canvas().to_json()?);
        }
    }
    Ok(())
}

/// Object-safe view of the drawing entry points, so `draw` can pick the canvas
trait DrawTarget {
    fn process_boundary(&mut self, boundary: &FieldBoundary) -> fieldviz::Result<()>;

    fn process_guidance(
        &mut self,
        group: &GuidanceGroup,
        patterns: &[GuidancePattern],
    ) -> fieldviz::Result<()>;
}

impl<C: Canvas> DrawTarget for Visualizer<C, Table> {
    fn process_boundary(&mut self, boundary: &FieldBoundary) -> fieldviz::Result<()> {
        Visualizer::process_boundary(self, boundary)
    }

    fn process_guidance(
        &mut self,
        group: &GuidanceGroup,
        patterns: &[GuidancePattern],
    ) -> fieldviz::Result<()> {
        Visualizer::process_guidance(self, group, patterns)
    }
}

fn print_inventory(catalog: &Catalog) {
    println!("Logged data: {}", catalog.logged_data.len());
    for logged in &catalog.logged_data {
        println!(
            "  #{} {}",
            logged.id,
            logged.description.as_deref().unwrap_or("")
        );
        for op in &logged.operation_data {
            println!(
                "    operation #{} ({}): {} section(s), {} record(s)",
                op.id,
                op.operation_type.as_deref().unwrap_or("unknown"),
                op.sections.len(),
                op.spatial_records.len()
            );
        }
    }

    println!("Field boundaries: {}", catalog.field_boundaries.len());
    for boundary in &catalog.field_boundaries {
        println!(
            "  #{}: {} polygon(s)",
            boundary.id,
            boundary.spatial_data.polygons.len()
        );
    }

    println!("Guidance groups: {}", catalog.guidance_groups.len());
    for group in &catalog.guidance_groups {
        println!("  #{}: patterns {:?}", group.id, group.guidance_pattern_ids);
    }

    println!("Guidance patterns: {}", catalog.guidance_patterns.len());
    for pattern in &catalog.guidance_patterns {
        println!("  #{}: {}", pattern.id, pattern.kind.name());
    }
}
