use std::env;
use std::iter;
use std::process;

use clap::Parser;
use daily_crossword::config::{Cli, Config, RunMode};
use daily_crossword::pipeline::CrosswordPipeline;
use daily_crossword::schedule::{dates_inclusive, run_dates, LocalClock, Scheduler, ThreadSleeper};
use log::{error, info};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match Config::from_cli(cli, |var| env::var(var).ok()) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            process::exit(e.exit_code());
        }
    };

    let mode = config.mode;
    let skip_today = config.skip_today;
    let mut pipeline = CrosswordPipeline::new(config);

    let result = match mode {
        RunMode::Single(date) => run_dates(iter::once(date), &mut pipeline),
        RunMode::Range(from, to) => {
            info!("Printing date range {} to {}", from, to);
            run_dates(dates_inclusive(from, to), &mut pipeline)
        }
        RunMode::Daemon => {
            let clock = LocalClock;
            let mut scheduler = Scheduler::starting(skip_today, &clock);
            scheduler.run_forever(&clock, &mut ThreadSleeper, &mut pipeline)
        }
    };

    if let Err(e) = result {
        error!("Failed: {}", e);
        process::exit(e.exit_code());
    }
}
