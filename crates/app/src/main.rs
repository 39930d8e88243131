use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use medlearn_core::model::SessionId;
use services::{ApiConfig, BackendPort, ConfigError, HttpBackend, InMemoryBackend, LearningLoopService};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};
use url::Url;

const SESSION_VAR: &str = "MEDLEARN_SESSION_ID";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String, source: ConfigError },
    InvalidSessionId { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw, source } => {
                write!(f, "invalid --api-url value {raw}: {source}")
            }
            ArgsError::InvalidSessionId { raw } => write!(f, "invalid --session value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArgsError::InvalidApiUrl { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    learning_loop: Arc<LearningLoopService>,
    media_base: Option<Url>,
    resume_session: Option<SessionId>,
    backend_label: String,
}

impl UiApp for DesktopApp {
    fn learning_loop(&self) -> Arc<LearningLoopService> {
        Arc::clone(&self.learning_loop)
    }

    fn media_base(&self) -> Option<Url> {
        self.media_base.clone()
    }

    fn resume_session(&self) -> Option<SessionId> {
        self.resume_session.clone()
    }

    fn backend_label(&self) -> String {
        self.backend_label.clone()
    }
}

#[derive(Debug)]
enum BackendChoice {
    Http(ApiConfig),
    Demo,
}

#[derive(Debug)]
struct Args {
    backend: BackendChoice,
    session: Option<SessionId>,
    verbose: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--session <id>] [--demo] [--verbose]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --api-url <url>   lesson backend (default http://localhost:8000)");
    eprintln!("  --session <id>    reopen a session the backend already holds");
    eprintln!("  --demo            use the built-in offline lesson generator");
    eprintln!("  --verbose         debug logging (RUST_LOG takes precedence)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MEDLEARN_API_URL, MEDLEARN_SESSION_ID, RUST_LOG");
}

fn parse_session(raw: String) -> Result<SessionId, ArgsError> {
    SessionId::new(raw.clone()).map_err(|_| ArgsError::InvalidSessionId { raw })
}

fn parse_api_url(raw: String) -> Result<ApiConfig, ArgsError> {
    ApiConfig::parse(&raw).map_err(|source| ArgsError::InvalidApiUrl { raw, source })
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, Box<dyn std::error::Error>> {
        let mut api_url: Option<ApiConfig> = None;
        let mut demo = false;
        let mut verbose = false;
        let mut session = match std::env::var(SESSION_VAR) {
            Ok(raw) if !raw.trim().is_empty() => Some(parse_session(raw)?),
            _ => None,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    api_url = Some(parse_api_url(value)?);
                }
                "--session" => {
                    let value = require_value(args, "--session")?;
                    session = Some(parse_session(value)?);
                }
                "--demo" => demo = true,
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg).into()),
            }
        }

        let backend = if demo {
            BackendChoice::Demo
        } else {
            match api_url {
                Some(config) => BackendChoice::Http(config),
                None => BackendChoice::Http(ApiConfig::from_env()?),
            }
        };

        Ok(Self {
            backend,
            session,
            verbose,
        })
    }
}

fn init_tracing(verbose: bool) {
    // RUST_LOG wins over --verbose, which wins over the info default.
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn build_app(args: Args) -> DesktopApp {
    let (backend, media_base, backend_label): (Arc<dyn BackendPort>, _, _) = match args.backend {
        BackendChoice::Http(config) => {
            let base = config.base_url.clone();
            let label = base.to_string();
            (Arc::new(HttpBackend::new(config)), Some(base), label)
        }
        BackendChoice::Demo => (Arc::new(InMemoryBackend::new()), None, "demo (in-memory)".to_string()),
    };

    DesktopApp {
        learning_loop: Arc::new(LearningLoopService::new(backend)),
        media_base,
        resume_session: args.session,
        backend_label,
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing(args.verbose);
    tracing::info!(backend = ?args.backend, session = ?args.session, "MedLearn starting");

    let app: Arc<dyn UiApp> = Arc::new(build_app(args));
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("MedLearn AI")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
