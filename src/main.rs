use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use diarnorm::{
    ConvertError, NullSpeakerPolicy, OrderConfig, OrderingKey, ParseConfig, PipelineConfig,
    RoundConfig, TrimConfig, read_transcript_file, run_pipeline, write_timeline_file,
};

#[derive(Parser)]
#[command(name = "diarnorm")]
#[command(author, version, about = "Convert Azure/Google STT output into a diarization file for DER scoring", long_about = None)]
struct Cli {
    /// Input transcript file (Azure or Google JSON)
    input: PathBuf,

    /// Output diarization file (JSON array of [speaker, start, end])
    output: PathBuf,

    /// Start time in seconds for processing
    #[arg(short, long)]
    start_time: Option<f64>,

    /// End time in seconds for processing
    #[arg(short, long)]
    end_time: Option<f64>,

    /// Shift the output so the start time becomes 0
    #[arg(short, long)]
    offset_start: bool,

    /// Treat null speakers as: ignore, previous or next
    #[arg(short = 'n', long, default_value = "ignore")]
    treat_null_as: String,

    /// Decimal places kept on segment boundaries
    #[arg(long, default_value = "2")]
    precision: u32,

    /// Azure ticks per second
    #[arg(long, default_value = "10000000")]
    tick_divisor: f64,

    /// Sort key for the output timeline (end or start)
    #[arg(long, default_value = "end")]
    order_by: OrderingKey,

    /// Indent the output JSON
    #[arg(long)]
    pretty: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(cli.verbose) {
        eprintln!("{:#}", e);
    }

    match convert(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to install logger")
}

fn build_config(cli: &Cli) -> Result<PipelineConfig, ConvertError> {
    let null_policy: NullSpeakerPolicy = cli.treat_null_as.parse()?;

    let trim = TrimConfig {
        start_time: cli.start_time,
        end_time: cli.end_time,
        offset_start: cli.offset_start,
    };

    Ok(PipelineConfig {
        parse: ParseConfig {
            tick_divisor: cli.tick_divisor,
        },
        null_policy,
        trim: trim.is_requested().then_some(trim),
        order: OrderConfig { key: cli.order_by },
        round: RoundConfig {
            precision: cli.precision,
        },
    })
}

fn convert(cli: &Cli) -> Result<(), ConvertError> {
    let config = build_config(cli)?;

    info!("Loading transcript from {:?}", cli.input);
    let transcript = read_transcript_file(&cli.input)?;

    let conversion = run_pipeline(&transcript, &config)?;

    write_timeline_file(&cli.output, &conversion.timeline, cli.pretty)?;
    info!(
        "Output written to {:?} ({} segments, {} speakers)",
        cli.output,
        conversion.timeline.len(),
        conversion.timeline.speakers().len()
    );

    Ok(())
}
