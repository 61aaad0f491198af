use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use medi_diagnose::{ArtifactStore, PredictionService, UnknownSymptomPolicy};
use medi_ml_server::{router, AppState, ServerConfig};

#[derive(Debug, Parser)]
#[command(
    name = "medi_ml_server",
    version,
    author = "MediLang Team",
    about = "Symptom-based disease prediction service",
    long_about = "medi_ml_server loads a trained symptom encoder, classifier and precaution\n\
        mapping and answers prediction requests over HTTP.\n\n\
        EXAMPLES:\n\
        \n  medi_ml_server                             Serve on 127.0.0.1:5001\n\
        \n  medi_ml_server --config medi_ml.toml serve Serve with a config file\n\
        \n  medi_ml_server symptoms                    List known symptoms\n\
        \n  medi_ml_server predict fever cough         Predict without a server"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// TOML configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Args, Default)]
struct Overrides {
    /// Address to bind
    #[arg(long, global = true)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Directory holding the model artifacts
    #[arg(long = "artifacts", global = true, value_name = "DIR")]
    artifacts_dir: Option<PathBuf>,

    /// Include internal error detail in responses
    #[arg(long, global = true)]
    debug: bool,

    /// Answer 400 when a request names symptoms the model does not know
    #[arg(long, global = true)]
    reject_unknown: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Print the known symptom vocabulary
    Symptoms,
    /// Predict a disease from symptoms without starting a server
    Predict(PredictArgs),
    /// Load and validate the artifacts
    Check,
}

#[derive(Debug, Args)]
struct PredictArgs {
    /// Symptom names
    #[arg(value_name = "SYMPTOM", required = true)]
    symptoms: Vec<String>,
}

impl Cli {
    fn resolve_config(&self) -> Result<ServerConfig, medi_ml_server::ConfigError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::from_file(path)?,
            None => ServerConfig::default(),
        };
        let o = &self.overrides;
        if let Some(host) = &o.host {
            config.host = host.clone();
        }
        if let Some(port) = o.port {
            config.port = port;
        }
        if let Some(dir) = &o.artifacts_dir {
            config.artifacts_dir = dir.clone();
        }
        if o.debug {
            config.debug = true;
        }
        if o.reject_unknown {
            config.unknown_symptoms = UnknownSymptomPolicy::Reject;
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8, debug: bool) {
    let level = match (verbose, debug) {
        (0, false) => "info",
        (0, true) | (1, _) => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

fn load_service(config: &ServerConfig) -> Option<PredictionService> {
    match ArtifactStore::load(&config.artifacts_dir) {
        Ok(store) => Some(PredictionService::new(store, config.unknown_symptoms)),
        Err(e) => {
            log::error!(
                "failed to load artifacts from '{}': {e}",
                config.artifacts_dir.display()
            );
            None
        }
    }
}

fn run_serve(config: ServerConfig) -> i32 {
    let addr = match config.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            log::error!("{e}");
            return 2;
        }
    };
    let Some(service) = load_service(&config) else {
        return 1;
    };
    let app = router(AppState::new(service, config.debug));

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("failed to start runtime: {e}");
            return 1;
        }
    };

    runtime.block_on(async move {
        let listener = match tokio::net::TcpListener::bind(addr).await {
            Ok(l) => l,
            Err(e) => {
                log::error!("cannot bind {addr}: {e}");
                return 1;
            }
        };
        log::info!("medi_ml_server listening on http://{addr}");
        if config.debug {
            log::warn!("debug mode: error detail is included in responses");
        }
        match axum::serve(listener, app).await {
            Ok(()) => 0,
            Err(e) => {
                log::error!("server error: {e}");
                1
            }
        }
    })
}

fn run_symptoms(config: &ServerConfig) -> i32 {
    let Some(service) = load_service(config) else {
        return 1;
    };
    for symptom in service.symptoms() {
        println!("{symptom}");
    }
    0
}

fn run_predict(config: &ServerConfig, args: &PredictArgs) -> i32 {
    let Some(service) = load_service(config) else {
        return 1;
    };
    match service.predict(&args.symptoms) {
        Ok(prediction) => match serde_json::to_string_pretty(&prediction) {
            Ok(json) => {
                println!("{json}");
                0
            }
            Err(e) => {
                eprintln!("error: {e}");
                1
            }
        },
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    }
}

fn run_check(config: &ServerConfig) -> i32 {
    let Some(service) = load_service(config) else {
        return 1;
    };
    let classifier = service.store().classifier();
    println!(
        "artifacts in '{}' are valid",
        config.artifacts_dir.display()
    );
    println!("  symptoms:   {}", service.symptoms().len());
    println!(
        "  classifier: {} ({} diseases)",
        classifier.backend_name(),
        classifier.classes().len()
    );
    0
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    let config = match cli.resolve_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return 2;
        }
    };
    init_logging(cli.verbose, config.debug);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_serve(config),
        Command::Symptoms => run_symptoms(&config),
        Command::Predict(args) => run_predict(&config, &args),
        Command::Check => run_check(&config),
    }
}

fn main() {
    std::process::exit(run_cli());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["medi_ml_server"]).unwrap();
        assert!(cli.command.is_none());
        let config = cli.resolve_config().unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "medi_ml_server",
            "--port",
            "6000",
            "--artifacts",
            "/tmp/models",
            "--debug",
            "--reject-unknown",
            "serve",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.port, 6000);
        assert_eq!(config.artifacts_dir, PathBuf::from("/tmp/models"));
        assert!(config.debug);
        assert_eq!(config.unknown_symptoms, UnknownSymptomPolicy::Reject);
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medi_ml.toml");
        std::fs::write(&path, "port = 7000\nhost = \"0.0.0.0\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "medi_ml_server",
            "--config",
            path.to_str().unwrap(),
            "--port",
            "7001",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 7001);
    }

    #[test]
    fn predict_requires_symptoms() {
        assert!(Cli::try_parse_from(["medi_ml_server", "predict"]).is_err());
        let cli = Cli::try_parse_from(["medi_ml_server", "predict", "fever", "cough"]).unwrap();
        match cli.command {
            Some(Command::Predict(args)) => assert_eq!(args.symptoms, vec!["fever", "cough"]),
            _ => panic!("expected Predict command"),
        }
    }

    #[test]
    fn cli_parses_verbose_flag() {
        let cli = Cli::try_parse_from(["medi_ml_server", "-vv", "check"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
