#![forbid(unsafe_code)]

//! Command-line argument parsing for the renderer.
//!
//! Parses args manually to keep the binary lean. Supports environment
//! variable overrides via the `MBROT_*` prefix; explicit flags win over the
//! environment, which wins over defaults.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use mbrot_core::scheduler::{DEFAULT_CHECK_INTERVAL, DEFAULT_FRAME_BUDGET};
use mbrot_core::{Power, RenderConfig, ScanConfig, Viewport};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENV_VIEWPORT: &str = "MBROT_VIEWPORT";
pub const ENV_POWER: &str = "MBROT_POWER";
pub const ENV_FRAME_BUDGET_MS: &str = "MBROT_FRAME_BUDGET_MS";
pub const ENV_CHECK_INTERVAL: &str = "MBROT_CHECK_INTERVAL";
pub const ENV_EXIT_AFTER_MS: &str = "MBROT_EXIT_AFTER_MS";
pub const ENV_LOG_FILE: &str = "MBROT_LOG_FILE";

pub const HELP_TEXT: &str = "\
mbrot: progressive Mandelbrot renderer for the terminal

The image starts as a one-iteration silhouette and sharpens every time a
full pass over the screen completes. Resizing the terminal starts over.

USAGE:
    mbrot [OPTIONS]

OPTIONS:
    --viewport=XA,XB,YA,YB  Complex-plane bounds (default: -2,2,-1.125,1.125)
    --power=P               Exponent d in z^d + c (default: 2)
    --frame-budget-ms=N     Scan time per frame in milliseconds (default: 16)
    --check-interval=N      Pixels between clock checks (default: 10000)
    --exit-after-ms=N       Quit after N milliseconds, 0 = never (default: 0)
    --log-file=PATH         Write logs to PATH (default: no logging)
    --log-json              Log as JSON lines instead of text
    --help, -h              Show this help message
    --version, -V           Show version

KEYBINDINGS:
    q / Esc / Ctrl+C        Quit

ENVIRONMENT VARIABLES:
    MBROT_VIEWPORT          Override --viewport
    MBROT_POWER             Override --power
    MBROT_FRAME_BUDGET_MS   Override --frame-budget-ms
    MBROT_CHECK_INTERVAL    Override --check-interval
    MBROT_EXIT_AFTER_MS     Auto-quit after N milliseconds (for testing)
    MBROT_LOG_FILE          Override --log-file
    MBROT_LOG               Log filter directives (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    pub viewport: Viewport,
    pub power: Power,
    pub frame_budget_ms: u64,
    pub check_interval: u32,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
    pub log_file: Option<PathBuf>,
    pub log_json: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            viewport: Viewport::DEFAULT,
            power: Power::MANDELBROT,
            frame_budget_ms: DEFAULT_FRAME_BUDGET.as_millis() as u64,
            check_interval: DEFAULT_CHECK_INTERVAL,
            exit_after_ms: 0,
            log_file: None,
            log_json: false,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Opts),
    Help,
    Version,
}

/// Command-line error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    UnknownArgument(String),
    InvalidValue {
        flag: &'static str,
        value: String,
        reason: String,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownArgument(arg) => write!(f, "Unknown argument: {arg}"),
            Self::InvalidValue {
                flag,
                value,
                reason,
            } => write!(f, "Invalid {flag} value: {value} ({reason})"),
        }
    }
}

impl std::error::Error for CliError {}

fn invalid(flag: &'static str, value: &str, reason: impl fmt::Display) -> CliError {
    CliError::InvalidValue {
        flag,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

impl Opts {
    /// Parse the process arguments and environment, printing help/version or
    /// an error and exiting where appropriate.
    pub fn parse() -> Self {
        match Self::parse_from(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(Command::Run(opts)) => opts,
            Ok(Command::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Command::Version) => {
                println!("mbrot {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                eprintln!("{err}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse `args` (without the program name) over environment values read
    /// through `env`.
    ///
    /// Environment values that fail to parse are ignored; flag values that
    /// fail to parse are errors.
    pub fn parse_from<I, S, F>(args: I, env: F) -> Result<Command, CliError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Some(val) = env(ENV_VIEWPORT)
            && let Ok(vp) = Viewport::parse(&val)
        {
            opts.viewport = vp;
        }
        if let Some(val) = env(ENV_POWER)
            && let Ok(p) = Power::parse(&val)
        {
            opts.power = p;
        }
        if let Some(val) = env(ENV_FRAME_BUDGET_MS)
            && let Ok(n) = val.trim().parse()
        {
            opts.frame_budget_ms = n;
        }
        if let Some(val) = env(ENV_CHECK_INTERVAL)
            && let Ok(n) = val.trim().parse()
        {
            opts.check_interval = n;
        }
        if let Some(val) = env(ENV_EXIT_AFTER_MS)
            && let Ok(n) = val.trim().parse()
        {
            opts.exit_after_ms = n;
        }
        if let Some(val) = env(ENV_LOG_FILE)
            && !val.is_empty()
        {
            opts.log_file = Some(PathBuf::from(val));
        }

        // Command-line args override env vars
        for arg in args {
            let arg = arg.as_ref();
            match arg {
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-V" => return Ok(Command::Version),
                "--log-json" => opts.log_json = true,
                other => {
                    if let Some(val) = other.strip_prefix("--viewport=") {
                        opts.viewport =
                            Viewport::parse(val).map_err(|e| invalid("--viewport", val, e))?;
                    } else if let Some(val) = other.strip_prefix("--power=") {
                        opts.power = Power::parse(val).map_err(|e| invalid("--power", val, e))?;
                    } else if let Some(val) = other.strip_prefix("--frame-budget-ms=") {
                        opts.frame_budget_ms = val
                            .parse()
                            .map_err(|e| invalid("--frame-budget-ms", val, e))?;
                    } else if let Some(val) = other.strip_prefix("--check-interval=") {
                        opts.check_interval = val
                            .parse()
                            .map_err(|e| invalid("--check-interval", val, e))?;
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = val
                            .parse()
                            .map_err(|e| invalid("--exit-after-ms", val, e))?;
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        if val.is_empty() {
                            return Err(invalid("--log-file", val, "empty path"));
                        }
                        opts.log_file = Some(PathBuf::from(val));
                    } else {
                        return Err(CliError::UnknownArgument(other.to_string()));
                    }
                }
            }
        }

        Ok(Command::Run(opts))
    }

    /// Engine configuration for these options.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            viewport: self.viewport,
            scan: ScanConfig::default()
                .with_power(self.power)
                .with_check_interval(self.check_interval)
                .with_frame_budget(Duration::from_millis(self.frame_budget_ms)),
        }
    }

    pub fn exit_after(&self) -> Option<Duration> {
        (self.exit_after_ms > 0).then(|| Duration::from_millis(self.exit_after_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn run(args: &[&str]) -> Opts {
        match Opts::parse_from(args.iter().copied(), no_env) {
            Ok(Command::Run(opts)) => opts,
            other => panic!("expected Run, got {other:?}"),
        }
    }

    fn run_with_env(args: &[&str], env: &[(&str, &str)]) -> Opts {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        match Opts::parse_from(args.iter().copied(), |k| env.get(k).cloned()) {
            Ok(Command::Run(opts)) => opts,
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn default_opts() {
        let opts = run(&[]);
        assert_eq!(opts, Opts::default());
        assert_eq!(opts.viewport, Viewport::DEFAULT);
        assert_eq!(opts.power, Power::MANDELBROT);
        assert_eq!(opts.frame_budget_ms, 16);
        assert_eq!(opts.check_interval, 10_000);
        assert_eq!(opts.exit_after(), None);
        assert!(opts.log_file.is_none());
        assert!(!opts.log_json);
    }

    #[test]
    fn each_flag_is_parsed() {
        let opts = run(&[
            "--viewport=-1,1,-0.5,0.5",
            "--power=3",
            "--frame-budget-ms=33",
            "--check-interval=500",
            "--exit-after-ms=2000",
            "--log-file=/tmp/mbrot.log",
            "--log-json",
        ]);
        assert_eq!(opts.viewport, Viewport::new(-1.0, 1.0, -0.5, 0.5));
        assert_eq!(opts.power.get(), 3.0);
        assert_eq!(opts.frame_budget_ms, 33);
        assert_eq!(opts.check_interval, 500);
        assert_eq!(opts.exit_after(), Some(Duration::from_secs(2)));
        assert_eq!(opts.log_file, Some(PathBuf::from("/tmp/mbrot.log")));
        assert!(opts.log_json);
    }

    #[test]
    fn env_overrides_defaults() {
        let opts = run_with_env(
            &[],
            &[
                (ENV_VIEWPORT, "0,1,0,1"),
                (ENV_POWER, "4"),
                (ENV_FRAME_BUDGET_MS, "8"),
                (ENV_CHECK_INTERVAL, "64"),
                (ENV_EXIT_AFTER_MS, "100"),
                (ENV_LOG_FILE, "render.log"),
            ],
        );
        assert_eq!(opts.viewport, Viewport::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(opts.power.get(), 4.0);
        assert_eq!(opts.frame_budget_ms, 8);
        assert_eq!(opts.check_interval, 64);
        assert_eq!(opts.exit_after_ms, 100);
        assert_eq!(opts.log_file, Some(PathBuf::from("render.log")));
    }

    #[test]
    fn flags_override_env() {
        let opts = run_with_env(
            &["--power=2.5", "--check-interval=7"],
            &[(ENV_POWER, "4"), (ENV_CHECK_INTERVAL, "64")],
        );
        assert_eq!(opts.power.get(), 2.5);
        assert_eq!(opts.check_interval, 7);
    }

    #[test]
    fn invalid_env_is_ignored() {
        let opts = run_with_env(
            &[],
            &[
                (ENV_VIEWPORT, "1,2,3"),
                (ENV_POWER, "NaN"),
                (ENV_FRAME_BUDGET_MS, "soon"),
            ],
        );
        assert_eq!(opts, Opts::default());
    }

    #[test]
    fn invalid_flags_are_errors() {
        for (arg, flag) in [
            ("--viewport=0,0,0,1", "--viewport"),
            ("--power=inf", "--power"),
            ("--frame-budget-ms=-1", "--frame-budget-ms"),
            ("--check-interval=lots", "--check-interval"),
            ("--exit-after-ms=1.5", "--exit-after-ms"),
            ("--log-file=", "--log-file"),
        ] {
            match Opts::parse_from([arg], no_env) {
                Err(CliError::InvalidValue { flag: f, .. }) => assert_eq!(f, flag, "{arg}"),
                other => panic!("{arg}: expected InvalidValue, got {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_argument_is_an_error() {
        let err = Opts::parse_from(["--zoom=2"], no_env).unwrap_err();
        assert_eq!(err, CliError::UnknownArgument("--zoom=2".into()));
        assert_eq!(err.to_string(), "Unknown argument: --zoom=2");
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(
            Opts::parse_from(["--help", "--bogus"], no_env),
            Ok(Command::Help)
        );
        assert_eq!(Opts::parse_from(["-V"], no_env), Ok(Command::Version));
    }

    #[test]
    fn render_config_carries_scan_settings() {
        let opts = run(&["--check-interval=0", "--frame-budget-ms=5", "--power=3"]);
        let config = opts.render_config();
        assert_eq!(config.scan.check_interval, 1);
        assert_eq!(config.scan.frame_budget, Duration::from_millis(5));
        assert_eq!(config.scan.power.get(), 3.0);
        assert_eq!(config.viewport, Viewport::DEFAULT);
    }

    #[test]
    fn version_string_nonempty() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn help_text_contains_env_vars() {
        for var in [
            ENV_VIEWPORT,
            ENV_POWER,
            ENV_FRAME_BUDGET_MS,
            ENV_CHECK_INTERVAL,
            ENV_EXIT_AFTER_MS,
            ENV_LOG_FILE,
            "MBROT_LOG",
        ] {
            assert!(HELP_TEXT.contains(var), "{var} missing from help");
        }
    }
}
