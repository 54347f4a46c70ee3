use std::thread;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use log::{error, info};

use crate::error::PipelineError;
use crate::pipeline::Pipeline;

/// Wait between checks once today's puzzle is done
pub const IDLE_INTERVAL: Duration = Duration::from_secs(60 * 60);
/// Wait before retrying a failed day
pub const RETRY_INTERVAL: Duration = Duration::from_secs(15 * 60);

pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The local calendar date
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration)
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Today was already processed; slept the idle interval
    AlreadyDone(NaiveDate),
    Processed(NaiveDate),
    /// The pipeline failed; slept the retry interval
    Failed(NaiveDate),
}

/// Polls once per day, remembering the last date that went all the way
/// through the pipeline. The marker lives in memory only.
#[derive(Debug, Clone)]
pub struct Scheduler {
    last: Option<NaiveDate>,
    idle_interval: Duration,
    retry_interval: Duration,
}

impl Scheduler {
    pub fn new(last: Option<NaiveDate>) -> Scheduler {
        Scheduler {
            last,
            idle_interval: IDLE_INTERVAL,
            retry_interval: RETRY_INTERVAL,
        }
    }

    /// With `skip_today` the marker starts at today so the first run waits
    /// for tomorrow.
    pub fn starting<C: Clock + ?Sized>(skip_today: bool, clock: &C) -> Scheduler {
        Scheduler::new(skip_today.then(|| clock.today()))
    }

    pub fn with_intervals(mut self, idle: Duration, retry: Duration) -> Scheduler {
        self.idle_interval = idle;
        self.retry_interval = retry;
        self
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.last
    }

    pub fn tick<C, S, P>(&mut self, clock: &C, sleeper: &mut S, pipeline: &mut P) -> Tick
    where
        C: Clock + ?Sized,
        S: Sleeper + ?Sized,
        P: Pipeline + ?Sized,
    {
        let today = clock.today();

        if self.last == Some(today) {
            info!("Already printed {}, sleeping...", today);
            sleeper.sleep(self.idle_interval);
            return Tick::AlreadyDone(today);
        }

        info!("Processing {}", today);
        match pipeline.process(today) {
            Ok(path) => {
                info!("Finished {} ({})", today, path.display());
                self.last = Some(today);
                Tick::Processed(today)
            }
            Err(e) => {
                error!("Error processing {} at {} stage: {}", today, e.stage(), e);
                sleeper.sleep(self.retry_interval);
                Tick::Failed(today)
            }
        }
    }

    pub fn run_forever<C, S, P>(&mut self, clock: &C, sleeper: &mut S, pipeline: &mut P) -> !
    where
        C: Clock + ?Sized,
        S: Sleeper + ?Sized,
        P: Pipeline + ?Sized,
    {
        loop {
            self.tick(clock, sleeper, pipeline);
        }
    }
}

/// Every date between the bounds, inclusive, in ascending order
pub fn dates_inclusive(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let (from, to) = if to < from { (to, from) } else { (from, to) };
    from.iter_days().take_while(move |day| *day <= to)
}

/// Process a fixed list of dates, stopping at the first failure
pub fn run_dates<I, P>(dates: I, pipeline: &mut P) -> Result<(), PipelineError>
where
    I: IntoIterator<Item = NaiveDate>,
    P: Pipeline + ?Sized,
{
    for date in dates {
        info!("Processing {}", date);
        let path = pipeline.process(date).map_err(|e| {
            error!("Failed {} at {} stage: {}", date, e.stage(), e);
            e
        })?;
        info!("Finished {} ({})", date, path.display());
    }
    Ok(())
}
