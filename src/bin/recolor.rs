use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as Clap_parser;
use log::{error, LevelFilter};
use recolor::config::{self, FileConfig, Overrides, RecolorConfig};
use recolor::pipeline::{run_batch, FileOutcome};
use recolor::prompt::{AlwaysConfirm, Confirm, ConsolePrompt};
use recolor::recolor::SaturationMode;

#[derive(Clap_parser, Debug, Clone)]
#[command(author, version, about = "Recolor - recolor single-colored graphic elements", long_about = None)]
struct Args {
    /// Input file names
    #[arg(name = "infile", value_name = "INFILE", required = true, num_args = 1..)]
    infile: Vec<PathBuf>,

    /// Color in #RRGGBB, #RGB, rgb(100%, 0%, 0%), rgb(255,0,0),
    /// hsl(359,100%,50%) format. Color names are also supported.
    #[arg(short, long)]
    color: Option<String>,

    /// Directory to write the recolored files to. Without it the output is
    /// written to original_filename.out.original_extension
    #[arg(long)]
    outdir: Option<PathBuf>,

    /// Name of the output file (single input only)
    #[arg(long, conflicts_with = "outdir")]
    outfile: Option<PathBuf>,

    /// Factor by which change in value should be accounted for
    #[arg(long = "valuefactor", value_name = "FACTOR")]
    value_factor: Option<f32>,

    /// How saturation follows the target color
    #[arg(long, value_enum)]
    saturation_mode: Option<SaturationMode>,

    /// Overwrite without prompting
    #[arg(short, long)]
    force: bool,

    /// TOML file with default options
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log per-stage timings
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    env_logger::builder()
        .filter_level(default_level)
        .parse_default_env()
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(
                buf,
                "[{} {style}{}{style:#} {}:{}] {}",
                buf.timestamp_seconds(),
                record.level(),
                record
                    .file()
                    .unwrap_or("None")
                    .split('/')
                    .next_back()
                    .unwrap_or("None"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}

fn build_config(args: &Args) -> recolor::Result<RecolorConfig> {
    let file = match &args.config {
        Some(path) => config::parse_config(path)?,
        None => FileConfig::default(),
    };
    let overrides = Overrides {
        color: args.color.clone(),
        value_factor: args.value_factor,
        saturation_mode: args.saturation_mode,
        outdir: args.outdir.clone(),
        outfile: args.outfile.clone(),
        force: args.force,
    };
    RecolorConfig::resolve(overrides, file, args.infile.len())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.verbose);

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            return ExitCode::from(2);
        }
    };

    let mut confirm: Box<dyn Confirm> = if config.force {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(ConsolePrompt::stdio())
    };
    let reports = run_batch(&config, &args.infile, confirm.as_mut());

    let mut failed = 0;
    for report in &reports {
        match &report.result {
            Ok(FileOutcome::Written(path)) => println!("{} -> {}", report.input.display(), path.display()),
            Ok(FileOutcome::Skipped(_)) => println!("Nothing done for {}. Continuing.", report.input.display()),
            Err(err) => {
                failed += 1;
                eprintln!("{}: {} ({})", report.input.display(), err, err.kind());
            }
        }
    }

    if failed > 0 {
        eprintln!("{failed} of {} files failed", reports.len());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
