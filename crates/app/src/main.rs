use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use exam_core::model::{Subject, SubjectParseError};
use exam_core::{ExamConfig, ExamIntent};
use services::{
    ChatClient, Clock, ExamController, GenerativeAnalysisProvider, GenerativeQuestionProvider,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSubject { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSubject { raw } => write!(f, "invalid --subject value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<SubjectParseError> for ArgsError {
    fn from(err: SubjectParseError) -> Self {
        ArgsError::InvalidSubject { raw: err.0 }
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    controller: ExamController,
    providers_enabled: bool,
}

impl UiApp for DesktopApp {
    fn exam_controller(&self) -> ExamController {
        self.controller.clone()
    }

    fn providers_enabled(&self) -> bool {
        self.providers_enabled
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    ListSubjects,
    Help,
}

#[derive(Debug)]
struct Args {
    command: Command,
    subject: Option<Subject>,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--subject <slug>]");
    eprintln!("  cargo run -p app -- --list-subjects");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  EXAM_AI_API_KEY   key for the OpenAI-compatible backend (required to generate)");
    eprintln!("  EXAM_AI_BASE_URL  default https://api.openai.com/v1");
    eprintln!("  EXAM_AI_MODEL     default gpt-4o-mini");
    eprintln!("  EXAM_SUBJECT      subject preselected on launch");
    eprintln!("  EXAM_LOG          log filter (falls back to RUST_LOG, then info)");
}

fn print_subjects() {
    for subject in Subject::ALL {
        println!("{:<16} {}", subject.slug(), subject.label());
    }
}

impl Args {
    /// Parse command-line flags. `env_subject` is the raw `EXAM_SUBJECT`
    /// value; `--subject` overrides it.
    fn parse(
        args: impl IntoIterator<Item = String>,
        env_subject: Option<&str>,
    ) -> Result<Self, ArgsError> {
        let mut subject = match env_subject.map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(raw.parse::<Subject>()?),
            _ => None,
        };
        let mut command = Command::Ui;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--subject" | "-s" => {
                    let value = require_value(&mut args, "--subject")?;
                    subject = Some(value.parse::<Subject>()?);
                }
                "--list-subjects" => command = Command::ListSubjects,
                "--help" | "-h" => command = Command::Help,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { command, subject })
    }
}

fn init_logging() {
    let filter = std::env::var("EXAM_LOG")
        .ok()
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let env_subject = std::env::var("EXAM_SUBJECT").ok();
    let parsed = Args::parse(std::env::args().skip(1), env_subject.as_deref()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    match parsed.command {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::ListSubjects => {
            print_subjects();
            return Ok(());
        }
        Command::Ui => {}
    }

    init_logging();

    let chat = ChatClient::from_env();
    let providers_enabled = chat.enabled();
    if providers_enabled {
        info!(model = chat.model().unwrap_or_default(), "generative backend configured");
    } else {
        warn!("EXAM_AI_API_KEY is not set; question generation is disabled");
    }

    let controller = ExamController::new(
        ExamConfig::default(),
        Clock::default(),
        Arc::new(GenerativeQuestionProvider::new(chat.clone())),
        Arc::new(GenerativeAnalysisProvider::new(chat)),
    );
    if let Some(subject) = parsed.subject {
        controller.dispatch(ExamIntent::SelectSubject(subject))?;
    }

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        controller: controller.clone(),
        providers_enabled,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Prelims Mock Test")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);

    controller.shutdown();
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
