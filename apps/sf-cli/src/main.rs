use clap::{Parser, Subcommand};
use std::error::Error;
use std::path::{Path, PathBuf};

use sf_graph::{GraphStyle, build_graph};
use sf_model::load_model;
use sf_render::{OutputFormat, RankDir, write_output};

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(about = "Sigflow CLI - State-space schematic generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a schematic from a state-space definition
    Build {
        /// Path to the YAML or JSON model file
        model_path: PathBuf,
        /// Output format (dot, svg, png, pdf)
        #[arg(short = 'f', long = "format", default_value = "dot")]
        format: String,
        /// Graph style (sfg or integrator)
        #[arg(short = 's', long = "style", default_value = "sfg")]
        style: String,
        /// Output file path (defaults to <model name>.<format>)
        #[arg(short = 'o', long = "out")]
        out: Option<PathBuf>,
        /// Graphviz rank direction (LR or TB)
        #[arg(long, default_value = "LR")]
        rankdir: String,
        /// Simplify symbolic gains before display
        #[arg(long)]
        simplify: bool,
        /// Drop edges whose gain simplifies to zero
        #[arg(long)]
        prune_zeros: bool,
        /// Format numeric gains to N significant figures
        #[arg(long = "float", value_name = "N")]
        float_digits: Option<usize>,
        /// Use Unicode labels for sums and derivatives
        #[arg(long = "unicode")]
        unicode_labels: bool,
    },
    /// Validate a model file without producing output
    Validate {
        /// Path to the YAML or JSON model file
        model_path: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Build {
            model_path,
            format,
            style,
            out,
            rankdir,
            simplify,
            prune_zeros,
            float_digits,
            unicode_labels,
        } => cmd_build(BuildArgs {
            model_path,
            format,
            style,
            out,
            rankdir,
            simplify,
            prune_zeros,
            float_digits,
            unicode_labels,
        }),
        Commands::Validate { model_path } => cmd_validate(&model_path),
    }
}

struct BuildArgs {
    model_path: PathBuf,
    format: String,
    style: String,
    out: Option<PathBuf>,
    rankdir: String,
    simplify: bool,
    prune_zeros: bool,
    float_digits: Option<usize>,
    unicode_labels: bool,
}

fn cmd_build(args: BuildArgs) -> Result<(), Box<dyn Error>> {
    let format: OutputFormat = args.format.parse()?;
    let style: GraphStyle = args.style.parse()?;
    let rankdir: RankDir = args.rankdir.parse()?;

    let model = load_model(&args.model_path)?;
    tracing::debug!(name = model.name(), order = model.order(), %style, "building schematic");
    let graph = build_graph(&model, style, args.unicode_labels, args.prune_zeros);
    let output_path = args
        .out
        .unwrap_or_else(|| PathBuf::from(format!("{}.{format}", model.name())));
    write_output(
        &graph,
        &output_path,
        format,
        rankdir,
        args.simplify,
        args.float_digits,
    )?;
    println!("Wrote {format} to {}", output_path.display());
    Ok(())
}

fn cmd_validate(model_path: &Path) -> Result<(), Box<dyn Error>> {
    let model = load_model(model_path)?;
    println!(
        "✓ Model '{}' is valid (order {})",
        model.name(),
        model.order()
    );
    Ok(())
}
