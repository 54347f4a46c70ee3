use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Exit status for a failed pipeline run in the batch modes.
pub const EXIT_PIPELINE: i32 = 1;
/// Exit status for unusable configuration.
pub const EXIT_CONFIG: i32 = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("must provide a username and password, either on the command line or via NYT_USER/NYT_PASS")]
    MissingCredentials,
    #[error("could not parse date {input:?}, expected YYYY.MM.DD: {source}")]
    BadDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("date range must be of the form YYYY.MM.DD:YYYY.MM.DD, got {0:?}")]
    BadRange(String),
}

impl ConfigError {
    pub fn exit_code(&self) -> i32 {
        EXIT_CONFIG
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("failed to extract {0} from login page")]
    MissingField(&'static str),
    #[error("login request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("fetch failed with status {0}")]
    Status(u16),
    #[error("expected content type application/pdf, got {0:?}")]
    ContentType(Option<String>),
    #[error("fetch request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum PrintError {
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}")]
    Exit {
        program: String,
        status: std::process::ExitStatus,
    },
}

/// A failure of one pipeline run, tagged with the stage that produced it.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("login failed: {0}")]
    Auth(#[from] AuthError),
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("save to {path} failed: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("printing failed: {0}")]
    Print(#[from] PrintError),
}

impl PipelineError {
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Auth(_) => "auth",
            PipelineError::Fetch(_) => "fetch",
            PipelineError::Save { .. } => "save",
            PipelineError::Print(_) => "print",
        }
    }

    pub fn exit_code(&self) -> i32 {
        EXIT_PIPELINE
    }
}
