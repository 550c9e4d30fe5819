use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

mod diagnostics;
mod error;
mod log;
mod model;
mod plan;
mod render;
mod report;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "stage-breakdown")]
#[command(about = "Per-stage time breakdown for client/server benchmark logs", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the percentage breakdown for each selectivity.
    Report {
        /// Directory holding `client_<N>` and `server_<N>` logs.
        #[arg(long)]
        dir: PathBuf,

        /// Selectivity to process; repeat to list several (default 1, 10, 100).
        #[arg(short, long = "selectivity")]
        selectivities: Vec<u32>,

        /// JSON run plan (selectivities, roles).
        #[arg(long)]
        plan: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Also write an HTML chart page here.
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Print raw accumulated stage totals for one selectivity.
    Stages {
        #[arg(long)]
        dir: PathBuf,

        #[arg(short, long)]
        selectivity: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    diagnostics::init_logging(cli.verbose);

    match cli.cmd {
        Commands::Report {
            dir,
            selectivities,
            plan,
            format,
            html,
        } => {
            // 1) Resolve which selectivities and roles to process.
            let base = match &plan {
                Some(path) => plan::RunPlan::load(path)?,
                None => plan::RunPlan::default(),
            };
            let plan = base.resolve(&selectivities)?;

            // 2) Read, aggregate and normalize each selectivity in turn.
            //    Text blocks go out as soon as their selectivity is done.
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            let batch = report::run_batch(&dir, &plan, |outcome| {
                if let Format::Text = format {
                    report::write_outcome(outcome, &mut out)?;
                    out.flush()?;
                }
                Ok(())
            })?;

            // 3) Whole-batch outputs.
            if let Format::Json = format {
                batch.write_json(&mut out)?;
                out.flush()?;
            }

            if let Some(path) = html {
                let page = render::render_html_report(&batch.to_view())?;
                std::fs::write(&path, page)?;
                tracing::info!(path = %path.display(), "wrote HTML report");
            }
        }
        Commands::Stages { dir, selectivity } => {
            let parser = log::LineParser::new()?;
            let totals = report::stage_totals_for(&dir, &log::Role::ALL, selectivity, &parser)?;
            if totals.is_empty() {
                diagnostics::warn(format!(
                    "no `label: value` lines found for selectivity {}%",
                    selectivity
                ));
            }
            for entry in totals.iter() {
                println!("{}\t{}\t{}", entry.label, entry.total, entry.samples);
            }
        }
    }

    Ok(())
}
