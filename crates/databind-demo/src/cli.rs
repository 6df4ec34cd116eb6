#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `DATABIND_DEMO_*` prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
databind demo: a person model bound to a logging view

USAGE:
    databind-demo [OPTIONS]

OPTIONS:
    --first=NAME         First name applied by the first command (default: NewFirstName)
    --last=NAME          Last name applied by the first command (default: NewLastName)
    --then-first=NAME    First name applied by the second command (default: NewestFirstName)
    --then-last=NAME     Last name applied by the second command (default: NewestLastName)
    --reject-blank       Install a pre-transform validator vetoing blank names
    --log=FILTER         tracing filter directive (default: info)
    --help, -h           Show this help message
    --version, -V        Show version

ENVIRONMENT VARIABLES:
    DATABIND_DEMO_FIRST         Override --first
    DATABIND_DEMO_LAST          Override --last
    DATABIND_DEMO_REJECT_BLANK  Override --reject-blank (1/true to enable)
    DATABIND_DEMO_LOG           Override --log (falls back to RUST_LOG)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    /// First name applied by the first rename command.
    pub first_name: String,
    /// Last name applied by the first rename command.
    pub last_name: String,
    /// First name applied by the second rename command.
    pub then_first_name: String,
    /// Last name applied by the second rename command.
    pub then_last_name: String,
    /// Install the blank-name validator.
    pub reject_blank: bool,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ParseError {
    Help,
    Version,
    MissingValue(&'static str),
    UnknownArg(String),
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            first_name: "NewFirstName".into(),
            last_name: "NewLastName".into(),
            then_first_name: "NewestFirstName".into(),
            then_last_name: "NewestLastName".into(),
            reject_blank: false,
            log_filter: "info".into(),
        }
    }
}

fn is_truthy(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("databind-demo {VERSION}");
                process::exit(0);
            }
            Err(ParseError::MissingValue(flag)) => {
                eprintln!("Missing value for {flag}");
                process::exit(1);
            }
            Err(ParseError::UnknownArg(arg)) => {
                eprintln!("Unknown argument: {arg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = get_env("DATABIND_DEMO_FIRST") {
            opts.first_name = val;
        }
        if let Some(val) = get_env("DATABIND_DEMO_LAST") {
            opts.last_name = val;
        }
        if let Some(val) = get_env("DATABIND_DEMO_REJECT_BLANK") {
            opts.reject_blank = is_truthy(&val);
        }
        if let Some(val) = get_env("DATABIND_DEMO_LOG").or_else(|| get_env("RUST_LOG"))
            && !val.trim().is_empty()
        {
            opts.log_filter = val;
        }

        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => return Err(ParseError::Help),
                "--version" | "-V" => return Err(ParseError::Version),
                "--reject-blank" => opts.reject_blank = true,
                _ => {
                    let Some((flag, value)) = arg.split_once('=') else {
                        return Err(match arg {
                            "--first" => ParseError::MissingValue("--first"),
                            "--last" => ParseError::MissingValue("--last"),
                            "--then-first" => ParseError::MissingValue("--then-first"),
                            "--then-last" => ParseError::MissingValue("--then-last"),
                            "--log" => ParseError::MissingValue("--log"),
                            other => ParseError::UnknownArg(other.to_string()),
                        });
                    };
                    let value = value.to_string();
                    match flag {
                        "--first" => opts.first_name = value,
                        "--last" => opts.last_name = value,
                        "--then-first" => opts.then_first_name = value,
                        "--then-last" => opts.then_last_name = value,
                        "--log" => opts.log_filter = value,
                        _ => return Err(ParseError::UnknownArg(arg.to_string())),
                    }
                }
            }
        }

        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse_with(args: &[&str], env: &[(&str, &str)]) -> Result<Opts, ParseError> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Opts::parse_from_env_and_args(args.iter().copied(), |key| env.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let opts = parse_with(&[], &[]).expect("defaults parse");
        assert_eq!(opts, Opts::default());
        assert_eq!(opts.first_name, "NewFirstName");
        assert_eq!(opts.log_filter, "info");
        assert!(!opts.reject_blank);
    }

    #[test]
    fn flags_override_env() {
        let opts = parse_with(
            &["--first=Ada", "--log=debug"],
            &[("DATABIND_DEMO_FIRST", "Grace"), ("DATABIND_DEMO_LOG", "warn")],
        )
        .expect("parse");
        assert_eq!(opts.first_name, "Ada");
        assert_eq!(opts.log_filter, "debug");
    }

    #[test]
    fn env_applies_without_flags() {
        let opts = parse_with(
            &[],
            &[
                ("DATABIND_DEMO_LAST", "Hopper"),
                ("DATABIND_DEMO_REJECT_BLANK", "TRUE"),
            ],
        )
        .expect("parse");
        assert_eq!(opts.last_name, "Hopper");
        assert!(opts.reject_blank);
    }

    #[test]
    fn rust_log_is_fallback_filter() {
        let opts = parse_with(&[], &[("RUST_LOG", "trace")]).expect("parse");
        assert_eq!(opts.log_filter, "trace");

        let opts = parse_with(
            &[],
            &[("RUST_LOG", "trace"), ("DATABIND_DEMO_LOG", "databind=debug")],
        )
        .expect("parse");
        assert_eq!(opts.log_filter, "databind=debug");
    }

    #[test]
    fn empty_value_is_allowed_for_names() {
        let opts = parse_with(&["--then-first=", "--reject-blank"], &[]).expect("parse");
        assert_eq!(opts.then_first_name, "");
        assert!(opts.reject_blank);
    }

    #[test]
    fn help_and_version() {
        assert_eq!(parse_with(&["-h"], &[]), Err(ParseError::Help));
        assert_eq!(parse_with(&["--version"], &[]), Err(ParseError::Version));
    }

    #[test]
    fn missing_value_and_unknown() {
        assert_eq!(
            parse_with(&["--first"], &[]),
            Err(ParseError::MissingValue("--first"))
        );
        assert_eq!(
            parse_with(&["--bogus"], &[]),
            Err(ParseError::UnknownArg("--bogus".into()))
        );
        assert_eq!(
            parse_with(&["--bogus=1"], &[]),
            Err(ParseError::UnknownArg("--bogus=1".into()))
        );
    }
}
