use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sky_color::config::{Backend, SamplerConfig};
use sky_color::{logger, Export, HttpFetcher, SampleStore, SamplingService};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum BackendArg {
    Jsonl,
    Sqlite,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Jsonl => Backend::JsonLines,
            BackendArg::Sqlite => Backend::Sqlite,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Json,
    Csv,
    Md,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch the webcam image now and record its average color
    Sample,
    /// Print every recorded sample
    History(HistoryArguments),
}

#[derive(Args, Debug)]
struct HistoryArguments {
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Parser, Debug)]
#[command(version, about)]
struct Arguments {
    /// Path of the sample store
    #[arg(long, global = true)]
    store: Option<PathBuf>,
    #[arg(long, value_enum, global = true)]
    backend: Option<BackendArg>,
    /// Image to sample
    #[arg(long, global = true)]
    url: Option<String>,
    /// Fetch timeout in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

fn resolve_config(args: &Arguments) -> Result<SamplerConfig, Box<dyn Error>> {
    let mut config = SamplerConfig::from_env()?;
    if let Some(store) = &args.store {
        config.store_path = store.clone();
    }
    if let Some(backend) = args.backend {
        config.backend = backend.into();
    }
    if let Some(url) = &args.url {
        config.image_url = url.clone();
    }
    if let Some(secs) = args.timeout {
        config.fetch_timeout = Duration::from_secs(secs);
    }
    Ok(config)
}

type Service = SamplingService<HttpFetcher, Box<dyn SampleStore>>;

fn sample(service: &Service) -> Result<(), Box<dyn Error>> {
    let sample = service.sample()?;
    println!("{}", serde_json::to_string(&sample)?);
    Ok(())
}

fn history(service: &Service, args: &HistoryArguments) -> Result<(), Box<dyn Error>> {
    let series = service.history()?;
    let output = match args.format {
        Format::Json => series.to_json()?,
        Format::Csv => series.to_csv()?,
        Format::Md => series.to_md()?,
    };
    print!("{}", output);
    if matches!(args.format, Format::Json) {
        println!();
    }
    Ok(())
}

fn run(args: &Arguments) -> Result<(), Box<dyn Error>> {
    let level = std::env::var("SKY_COLOR_LOG")
        .ok()
        .and_then(|v| logger::parse_level(&v))
        .unwrap_or_else(|| logger::level_from_verbosity(args.verbose));
    logger::init(level)?;

    let config = resolve_config(args)?;
    log::debug!("using {:?}", config);
    let store = config.open_store()?;
    let fetcher = HttpFetcher::new(config.fetch_timeout)?;
    let service = SamplingService::new(fetcher, store, config.image_url.clone());

    match &args.command {
        Commands::Sample => sample(&service),
        Commands::History(history_args) => history(&service, history_args),
    }
}

fn main() -> ExitCode {
    let args = Arguments::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sky-color failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_must_be_positive_integer() {
        for bad in ["0", "-3", "soon"] {
            let result = Arguments::try_parse_from(["sky-color", "--timeout", bad, "sample"]);
            assert!(result.is_err(), "{}", bad);
        }
    }

    #[test]
    fn test_timeout_overrides_config() {
        let args = Arguments::try_parse_from(["sky-color", "history", "--timeout", "7"]).unwrap();
        assert_eq!(args.timeout, Some(7));
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.fetch_timeout, Duration::from_secs(7));
    }
}
