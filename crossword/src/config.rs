use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use crate::error::ConfigError;

pub const USER_ENV: &str = "NYT_USER";
pub const PASS_ENV: &str = "NYT_PASS";
pub const DIR_ENV: &str = "NYT_CROSSWORD_DIR";

pub const DATE_FORMAT: &str = "%Y.%m.%d";

pub const DEFAULT_LOGIN_URL: &str = "https://myaccount.nytimes.com/auth/login";
pub const DEFAULT_PUZZLE_BASE_URL: &str = "https://www.nytimes.com/svc/crosswords/v2/puzzle/print";
pub const DEFAULT_PRINT_COMMAND: &str = "/usr/bin/lpr";
pub const DEFAULT_PRINTER: &str = "Brother";

/// How the login token is pulled out of the login page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ExtractorKind {
    /// Line-by-line regular expressions
    #[default]
    Regex,
    /// Parse the page and read the form inputs
    Html,
}

/// Fetch the daily crossword and send it to the printer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Username (defaults to $NYT_USER)
    #[arg(short, long)]
    pub user: Option<String>,

    /// Password (defaults to $NYT_PASS)
    #[arg(short, long)]
    pub pass: Option<String>,

    /// Directory to save crosswords to; will not be created (defaults to $NYT_CROSSWORD_DIR)
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Skip today's crossword
    #[arg(short, long)]
    pub skip_today: bool,

    /// Print this one date and exit, format YYYY.MM.DD
    #[arg(short, long, conflicts_with = "range")]
    pub one: Option<String>,

    /// Print this range of dates (inclusive) and exit, format YYYY.MM.DD:YYYY.MM.DD
    #[arg(short, long)]
    pub range: Option<String>,

    /// Fetch the crossword but do not print it
    #[arg(short, long)]
    pub fetch_only: bool,

    /// Printer to send the crossword to
    #[arg(short = 'P', long, default_value = DEFAULT_PRINTER)]
    pub printer: String,

    /// Program used to print
    #[arg(long, default_value = DEFAULT_PRINT_COMMAND)]
    pub print_command: String,

    /// How to read the login form
    #[arg(long, value_enum, default_value_t = ExtractorKind::Regex)]
    pub extractor: ExtractorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Poll forever, one crossword per day
    Daemon,
    Single(NaiveDate),
    /// Inclusive, `from <= to`
    Range(NaiveDate, NaiveDate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub pass: String,
}

#[derive(Debug, Clone)]
pub struct Endpoints {
    pub login_url: String,
    pub puzzle_base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            login_url: DEFAULT_LOGIN_URL.to_string(),
            puzzle_base_url: DEFAULT_PUZZLE_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub dir: PathBuf,
    pub skip_today: bool,
    pub mode: RunMode,
    /// `None` means fetch only
    pub printer: Option<String>,
    pub print_command: String,
    pub extractor: ExtractorKind,
    pub endpoints: Endpoints,
}

impl Config {
    /// Resolve the command line against environment defaults.
    ///
    /// `env` is consulted for any of username, password and directory not given
    /// as flags. Empty values count as missing.
    pub fn from_cli<F>(cli: Cli, env: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |flag: Option<String>, var: &str| {
            flag.filter(|v| !v.is_empty())
                .or_else(|| env(var).filter(|v| !v.is_empty()))
        };

        let user = lookup(cli.user, USER_ENV);
        let pass = lookup(cli.pass, PASS_ENV);
        let (user, pass) = match (user, pass) {
            (Some(user), Some(pass)) => (user, pass),
            _ => return Err(ConfigError::MissingCredentials),
        };

        let dir = cli
            .dir
            .filter(|d| !d.as_os_str().is_empty())
            .or_else(|| env(DIR_ENV).filter(|v| !v.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        let mode = match (cli.one, cli.range) {
            (Some(one), _) => RunMode::Single(parse_date(&one)?),
            (None, Some(range)) => {
                let (from, to) = parse_range(&range)?;
                RunMode::Range(from, to)
            }
            (None, None) => RunMode::Daemon,
        };

        Ok(Config {
            credentials: Credentials { user, pass },
            dir,
            skip_today: cli.skip_today,
            mode,
            printer: if cli.fetch_only { None } else { Some(cli.printer) },
            print_command: cli.print_command,
            extractor: cli.extractor,
            endpoints: Endpoints::default(),
        })
    }
}

/// Parse a YYYY.MM.DD date given on the command line
pub fn parse_date(s: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|source| ConfigError::BadDate {
        input: s.to_string(),
        source,
    })
}

/// Parse `FROM:TO`, returning the bounds in ascending order
pub fn parse_range(s: &str) -> Result<(NaiveDate, NaiveDate), ConfigError> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| ConfigError::BadRange(s.to_string()))?;
    if to.contains(':') {
        return Err(ConfigError::BadRange(s.to_string()));
    }
    let (from, to) = (parse_date(from)?, parse_date(to)?);
    if to < from {
        Ok((to, from))
    } else {
        Ok((from, to))
    }
}
