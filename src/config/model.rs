// src/config/model.rs

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cli::CliArgs;

/// Default quiet window between bursts of filesystem events, in milliseconds.
pub const DEFAULT_SPOOL_MS: u64 = 200;

/// Extensions that trigger a re-run when nothing else is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".py"];

/// File-extension filter applied to change notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionFilter {
    /// `--ext='*'`: every file counts.
    All,
    /// Lower-cased extensions including the leading dot, e.g. ".py".
    Only(BTreeSet<String>),
}

impl ExtensionFilter {
    /// Build a filter from raw extension strings, normalising each to a
    /// lower-cased ".ext" form.
    pub fn from_list<I, S>(exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = exts
            .into_iter()
            .map(|e| {
                let e = e.as_ref().trim().to_lowercase();
                if e.starts_with('.') { e } else { format!(".{e}") }
            })
            .filter(|e| e != ".")
            .collect();
        ExtensionFilter::Only(set)
    }

    /// Parse the `--ext` argument: `"*"` means all files, otherwise a
    /// comma-separated extension list.
    pub fn parse(value: &str) -> Self {
        if value.trim() == "*" {
            ExtensionFilter::All
        } else {
            ExtensionFilter::from_list(value.split(','))
        }
    }

    pub fn default_set() -> Self {
        ExtensionFilter::from_list(DEFAULT_EXTENSIONS.iter().copied())
    }

    /// True if the path's extension is allowed. Files without an extension
    /// only match the [`ExtensionFilter::All`] sentinel.
    pub fn matches(&self, path: &Path) -> bool {
        match self {
            ExtensionFilter::All => true,
            ExtensionFilter::Only(set) => extension_of(path)
                .map(|ext| set.contains(&ext))
                .unwrap_or(false),
        }
    }
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
}

/// The lifecycle hook commands, each optional.
///
/// TOML keys mirror the CLI flags (`beforerun`, `onpass`, ...).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HookSet {
    #[serde(default, rename = "beforerun")]
    pub before: Option<String>,

    #[serde(default, rename = "afterrun")]
    pub after: Option<String>,

    #[serde(default, rename = "onpass")]
    pub on_pass: Option<String>,

    #[serde(default, rename = "onfail")]
    pub on_fail: Option<String>,

    #[serde(default, rename = "oninterrupt")]
    pub on_interrupt: Option<String>,

    #[serde(default, rename = "onexit")]
    pub on_exit: Option<String>,
}

/// Configuration as read from `testwatch.toml`.
///
/// Every knob here has a CLI counterpart; CLI arguments take precedence when
/// both are given. All fields are optional:
///
/// ```toml
/// runner = "pytest -x"
/// ext = ".py,.pyi"
/// ignore = ["build"]
/// spool = 500
///
/// [hooks]
/// onpass = "notify-send 'tests passed'"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub directories: Vec<PathBuf>,

    #[serde(default)]
    pub ignore: Vec<PathBuf>,

    #[serde(default)]
    pub ext: Option<String>,

    #[serde(default)]
    pub runner: Option<String>,

    #[serde(default)]
    pub spool: Option<u64>,

    #[serde(default)]
    pub wait: bool,

    #[serde(default)]
    pub clear: bool,

    #[serde(default)]
    pub nobeep: bool,

    #[serde(default)]
    pub poll: bool,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub quiet: bool,

    #[serde(default)]
    pub hooks: HookSet,
}

/// The resolved, immutable configuration the supervisor runs with.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Test command argv, already including ignore and trailing arguments.
    pub command: Vec<String>,
    pub directories: Vec<PathBuf>,
    pub ignore: Vec<PathBuf>,
    pub extensions: ExtensionFilter,
    /// Quiet window after the last event before a batch is handed over.
    pub cooldown: Duration,
    /// If true, an in-flight run is never interrupted by new events.
    pub wait_for_completion: bool,
    pub beep_on_failure: bool,
    pub auto_clear: bool,
    pub use_polling: bool,
    pub verbose: bool,
    pub quiet: bool,
    pub hooks: HookSet,
}

impl RunConfig {
    /// Merge CLI arguments over file-config values into the final config.
    pub fn resolve(cli: &CliArgs, file: FileConfig) -> Self {
        let directories = if !cli.directories.is_empty() {
            cli.directories.clone()
        } else if !file.directories.is_empty() {
            file.directories
        } else {
            vec![PathBuf::from(".")]
        };

        let ignore = if !cli.ignore.is_empty() {
            cli.ignore.clone()
        } else {
            file.ignore
        };

        let extensions = match cli.ext.as_deref().or(file.ext.as_deref()) {
            Some(value) => ExtensionFilter::parse(value),
            None => ExtensionFilter::default_set(),
        };

        let spool = cli.spool.or(file.spool).unwrap_or(DEFAULT_SPOOL_MS);
        let runner = cli.runner.clone().or(file.runner);
        let command = build_command(runner.as_deref(), &ignore, &cli.runner_args);

        let hooks = HookSet {
            before: cli.beforerun.clone().or(file.hooks.before),
            after: cli.afterrun.clone().or(file.hooks.after),
            on_pass: cli.onpass.clone().or(file.hooks.on_pass),
            on_fail: cli.onfail.clone().or(file.hooks.on_fail),
            on_interrupt: cli.oninterrupt.clone().or(file.hooks.on_interrupt),
            on_exit: cli.onexit.clone().or(file.hooks.on_exit),
        };

        RunConfig {
            command,
            directories,
            ignore,
            extensions,
            cooldown: Duration::from_millis(spool),
            wait_for_completion: cli.wait || file.wait,
            beep_on_failure: !(cli.nobeep || file.nobeep),
            auto_clear: cli.clear || file.clear,
            use_polling: cli.poll || file.poll,
            verbose: cli.verbose || file.verbose,
            quiet: cli.quiet || file.quiet,
            hooks,
        }
    }

    /// The exact command line shown in summaries.
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }
}

/// Build the test command argv: the custom runner split on whitespace (or
/// `pytest`), `--ignore <dir>` pairs for each ignored directory, and any
/// trailing arguments appended verbatim.
fn build_command(runner: Option<&str>, ignore: &[PathBuf], extra: &[String]) -> Vec<String> {
    let mut argv: Vec<String> = match runner {
        Some(cmd) => cmd.split_whitespace().map(str::to_string).collect(),
        None => vec!["pytest".to_string()],
    };

    for dir in ignore {
        argv.push("--ignore".to_string());
        argv.push(dir.display().to_string());
    }

    argv.extend(extra.iter().cloned());
    argv
}
