//! Ambient logging setup and `git` command tracing, grounded on the
//! teacher's `src/log.rs`. Scaled down from the original: no Chrome trace
//! file and no `indicatif` progress integration, since this crate's
//! pipelines are single-pass streams with nothing resembling toprepo's
//! multi-step fetch/push progress to report.

use colored::Colorize as _;
use std::ops::Deref;
use std::ops::DerefMut;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Initializes the global `tracing` subscriber and bridges the `log`
/// facade into it, so dependencies (and this crate's own `log::debug!`
/// call sites) funnel through one subscriber. Call once, near the start
/// of `main`.
pub fn init(default_level: log::LevelFilter) {
    let _ = tracing_log::LogTracer::init();
    log::set_max_level(default_level);

    let filter = EnvFilter::try_from_env("GIT_QUARRY_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level.as_str().to_lowercase()));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .without_time();
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn log_level_colored_str(level: log::Level) -> colored::ColoredString {
    let s = level.as_str();
    match level {
        log::Level::Error => s.red().bold(),
        log::Level::Warn => s.yellow().bold(),
        log::Level::Info => s.green(),
        log::Level::Debug => s.blue(),
        log::Level::Trace => s.into(),
    }
}

/// Prints `level: msg` directly to stderr, bypassing any configured
/// subscriber. Used by the CLI for messages that must reach the user even
/// before logging has been initialized.
pub fn eprint_log(level: log::Level, msg: &str) {
    eprintln!("{}: {msg}", log_level_colored_str(level));
}

/// Formats a command argument for a shell command line, quoting when
/// needed. Not a complete implementation.
pub fn format_arg_lossy(arg: &std::ffi::OsStr) -> String {
    let s = arg.to_string_lossy();
    if [' ', '"', '$'].iter().any(|c| s.contains(*c)) {
        format!("'{}'", s.replace('\'', "'\\''"))
    } else if s.contains('\'') {
        s.replace('\'', "\\'")
    } else {
        s.to_string()
    }
}

pub fn command_to_string_lossy(cmd: &std::process::Command) -> String {
    format!(
        "{} {}",
        format_arg_lossy(cmd.get_program()),
        cmd.get_args()
            .map(format_arg_lossy)
            .collect::<Vec<_>>()
            .join(" ")
    )
}

/// A `tracing` span entered for the lifetime of one `git` invocation, so
/// every spawn shows up with its arguments and working directory in
/// structured logs.
pub struct CommandSpanScope<'a> {
    command: &'a mut std::process::Command,
    entered_span: Option<tracing::span::EnteredSpan>,
}

impl<'a> CommandSpanScope<'a> {
    pub fn new(command: &'a mut std::process::Command, span: tracing::Span) -> Self {
        let cmd_string = command_to_string_lossy(command);
        log::debug!("Running {cmd_string}");
        CommandSpanScope {
            command,
            entered_span: Some(span.entered()),
        }
    }

    pub fn spawn(mut self) -> std::io::Result<std::process::Child> {
        let _entered_span = self.entered_span.take().unwrap();
        self.command.spawn().inspect_err(|err| {
            log::error!("Failed to start command: {err}");
        })
    }
}

impl Deref for CommandSpanScope<'_> {
    type Target = std::process::Command;

    fn deref(&self) -> &Self::Target {
        self.command
    }
}

impl DerefMut for CommandSpanScope<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.command
    }
}

pub trait CommandSpanExt {
    fn trace_command(&mut self, name: &'static str) -> CommandSpanScope<'_>;
}

impl CommandSpanExt for std::process::Command {
    fn trace_command(&mut self, name: &'static str) -> CommandSpanScope<'_> {
        let span = tracing::debug_span!(
            "git",
            name,
            args = ?self.get_args().map(|a| a.to_string_lossy()).collect::<Vec<_>>(),
        );
        CommandSpanScope::new(self, span)
    }
}
