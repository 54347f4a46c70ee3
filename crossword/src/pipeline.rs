use std::path::PathBuf;

use chrono::NaiveDate;

use crate::auth::{extractor_for, Authenticator, LoginFieldExtractor};
use crate::config::Config;
use crate::error::PipelineError;
use crate::fetch::fetch_puzzle;
use crate::persist::{puzzle_path, save_puzzle};
use crate::print::print_file;

/// One full attempt at a date: log in, fetch, save, print.
pub trait Pipeline {
    /// Returns where the puzzle was saved
    fn process(&mut self, date: NaiveDate) -> Result<PathBuf, PipelineError>;
}

pub struct CrosswordPipeline {
    config: Config,
    extractor: Box<dyn LoginFieldExtractor>,
}

impl CrosswordPipeline {
    pub fn new(config: Config) -> CrosswordPipeline {
        let extractor = extractor_for(config.extractor);
        CrosswordPipeline::with_extractor(config, extractor)
    }

    pub fn with_extractor(
        config: Config,
        extractor: Box<dyn LoginFieldExtractor>,
    ) -> CrosswordPipeline {
        CrosswordPipeline { config, extractor }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl Pipeline for CrosswordPipeline {
    fn process(&mut self, date: NaiveDate) -> Result<PathBuf, PipelineError> {
        let config = &self.config;

        let session = Authenticator::new(&config.endpoints.login_url, self.extractor.as_ref())
            .login(&config.credentials)?;
        let pdf = fetch_puzzle(&session, &config.endpoints.puzzle_base_url, date)?;
        drop(session);

        let path = puzzle_path(&config.dir, date);
        save_puzzle(&path, &pdf).map_err(|source| PipelineError::Save {
            path: path.clone(),
            source,
        })?;

        if let Some(printer) = &config.printer {
            print_file(&config.print_command, printer, &path)?;
        }

        Ok(path)
    }
}
