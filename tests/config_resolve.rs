use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use testwatch::cli::CliArgs;
use testwatch::config::{ExtensionFilter, FileConfig, RunConfig};

type TestResult = Result<(), Box<dyn Error>>;

fn cli(args: &[&str]) -> CliArgs {
    let argv = std::iter::once("testwatch").chain(args.iter().copied());
    CliArgs::try_parse_from(argv).expect("valid CLI args")
}

#[test]
fn defaults_without_cli_or_file_values() {
    let cfg = RunConfig::resolve(&cli(&[]), FileConfig::default());

    assert_eq!(cfg.command, vec!["pytest".to_string()]);
    assert_eq!(cfg.directories, vec![PathBuf::from(".")]);
    assert_eq!(cfg.cooldown, Duration::from_millis(200));
    assert_eq!(cfg.extensions, ExtensionFilter::parse(".py"));
    assert!(cfg.beep_on_failure);
    assert!(!cfg.wait_for_completion);
    assert!(!cfg.auto_clear);
    assert!(!cfg.use_polling);
}

#[test]
fn cli_values_override_file_values() -> TestResult {
    let file: FileConfig = toml::from_str(
        r#"
        runner = "cargo test"
        spool = 500
        ext = ".rs"
        wait = true

        [hooks]
        onpass = "echo pass"
        "#,
    )?;

    let cfg = RunConfig::resolve(&cli(&["--runner", "make check", "--spool", "100"]), file);

    assert_eq!(
        cfg.command,
        vec!["make".to_string(), "check".to_string()]
    );
    assert_eq!(cfg.cooldown, Duration::from_millis(100));
    // Values the CLI did not set survive from the file.
    assert_eq!(cfg.extensions, ExtensionFilter::parse(".rs"));
    assert!(cfg.wait_for_completion);
    assert_eq!(cfg.hooks.on_pass.as_deref(), Some("echo pass"));
    Ok(())
}

#[test]
fn ignored_directories_are_passed_to_the_runner() {
    let cfg = RunConfig::resolve(&cli(&["--ignore", "build"]), FileConfig::default());
    assert_eq!(
        cfg.command,
        vec![
            "pytest".to_string(),
            "--ignore".to_string(),
            "build".to_string()
        ]
    );
}

#[test]
fn trailing_arguments_are_appended_to_the_runner() {
    let cfg = RunConfig::resolve(&cli(&["--", "-x", "-q"]), FileConfig::default());
    assert_eq!(
        cfg.command,
        vec!["pytest".to_string(), "-x".to_string(), "-q".to_string()]
    );
}

#[test]
fn ext_star_means_every_file() {
    let cfg = RunConfig::resolve(&cli(&["--ext", "*"]), FileConfig::default());
    assert_eq!(cfg.extensions, ExtensionFilter::All);
}

#[test]
fn extensions_are_normalized() {
    let filter = ExtensionFilter::parse("py,TXT");
    assert!(filter.matches(&PathBuf::from("app.py")));
    assert!(filter.matches(&PathBuf::from("notes.txt")));
    assert!(filter.matches(&PathBuf::from("NOTES.TXT")));
    assert!(!filter.matches(&PathBuf::from("lib.rs")));
    assert!(!filter.matches(&PathBuf::from("Makefile")));

    assert_eq!(filter, ExtensionFilter::parse(".py,.txt"));
}

#[test]
fn nobeep_from_either_source_disables_the_beep() {
    let cfg = RunConfig::resolve(&cli(&["--nobeep"]), FileConfig::default());
    assert!(!cfg.beep_on_failure);

    let file: FileConfig = toml::from_str("nobeep = true").unwrap();
    let cfg = RunConfig::resolve(&cli(&[]), file);
    assert!(!cfg.beep_on_failure);
}
