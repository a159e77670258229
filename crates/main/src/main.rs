use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::debug;
use tex_worksheet::{
    parse_plan_json, persist_plan, sample, PageGeometry, PlanStep, PreambleOptions,
};
use tracing_subscriber::EnvFilter;

/// Renders LaTeX handwriting worksheets.
///
/// Log output is controlled through `RUST_LOG` (defaults to `info`).
#[derive(Parser)]
#[command(author, version, about = "Assemble LaTeX worksheets from fragments")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    layout: LayoutArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the sample handwriting worksheet.
    #[command(name = "sample")]
    Sample {
        /// Destination `.tex` file.
        #[arg(short, long, default_value = "output.tex")]
        output: PathBuf,
    },

    /// Render a worksheet described by a JSON plan.
    #[command(name = "render", aliases = ["plan"])]
    Render {
        /// JSON file containing an array of plan steps.
        plan: PathBuf,

        /// Destination `.tex` file.
        #[arg(short, long, default_value = "output.tex")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// Base font size in points.
    #[arg(long, global = true, default_value_t = 12)]
    font_size: u8,

    /// Use the 6in × 8in text block instead of the compact 4in × 6in one.
    #[arg(long, global = true)]
    roomy: bool,

    /// Leave out checklist support and its symbol package.
    #[arg(long, global = true)]
    no_checklist: bool,

    /// Suppress page numbers.
    #[arg(long, global = true)]
    no_page_numbers: bool,
}

impl LayoutArgs {
    fn options(&self) -> PreambleOptions {
        let geometry = if self.roomy {
            PageGeometry::roomy()
        } else {
            PageGeometry::compact()
        };
        PreambleOptions::new()
            .with_font_size_pt(self.font_size)
            .with_geometry(geometry)
            .with_checklist(!self.no_checklist)
            .with_page_numbers(!self.no_page_numbers)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let options = cli.layout.options();
    let (plan, output) = match cli.command {
        Commands::Sample { output } => (sample::handwriting_worksheet(), output),
        Commands::Render { plan, output } => (load_plan(&plan)?, output),
    };

    let assembler = persist_plan(&plan, options, &output)?;
    println!(
        "Generated {} ({} bytes)",
        output.display(),
        assembler.as_str().len()
    );
    Ok(())
}

fn load_plan(path: &Path) -> Result<Vec<PlanStep>, Box<dyn Error>> {
    debug!("Loading worksheet plan from {}", path.display());
    let json = fs::read_to_string(path)
        .map_err(|err| format!("failed to read plan {}: {}", path.display(), err))?;
    Ok(parse_plan_json(&json)?)
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
