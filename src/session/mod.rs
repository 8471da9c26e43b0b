// src/session/mod.rs

pub mod prompt;

use anyhow::{Context, Result};
use std::{fmt::Display, io::Write, time::Instant};
use tracing::{debug, error, info, warn};

pub use prompt::{ConsolePrompter, Prompter, ScriptedPrompter};

use crate::config::{CityTable, DurationUnit};
use crate::data::{DataLoader, TripTable};
use crate::filter::{
    parse_city, parse_day, parse_month, CitySelection, FilterSelection, MonthFilter,
};
use crate::stats::{DurationStats, StationStats, TimeStats, UserStats};
use crate::viewer::{render_page, RawDataPager};

const GREETING: &str = "Hello! Let's explore some US bikeshare data!";
const SEPARATOR: &str = "----------------------------------------";

const ASK_CITY: &str = "Would you like to explore Chicago, New York City, Washington or all?";
const RETRY_CITY: &str = "I'm sorry we can't explore that city right now or the city is misspelled. Would you like to explore Chicago, New York City, Washington or all?";
const ASK_MONTH: &str = "What month are we looking at? Please enter the entire name or 'all'.";
const RETRY_MONTH: &str = "I think the month is misspelled. Please re-enter the month or enter 'all'.";
const ASK_DAY: &str = "Day of the week should we focus on? Please enter the entire name or enter 'all'.";
const RETRY_DAY: &str = "I think the week day is misspelled. Please re-enter the day of the week or enter 'all'.";
const ASK_RAW: &str = "Would you like to see a sample of raw data?";
const RETRY_RAW: &str = "I'm sorry, your response was not understood. Please enter yes or no";
const ASK_MORE: &str = "Would you like to see more raw data?";
const ASK_RESTART: &str = "\nWould you like to restart? Enter yes or no.";

/// Where the interactive loop currently stands.
#[derive(Debug, Clone, PartialEq)]
pub enum State {
    AwaitingCity,
    AwaitingMonth {
        city: CitySelection,
    },
    AwaitingDay {
        city: CitySelection,
        month: MonthFilter,
    },
    /// Filters are complete; the table has yet to be read.
    Loaded(FilterSelection),
    Reporting(TripTable),
    AwaitingRawDataChoice(TripTable),
    Browsing {
        table: TripTable,
        offset: usize,
    },
    AwaitingRestart,
    Terminal,
}

impl State {
    pub fn name(&self) -> &'static str {
        match self {
            State::AwaitingCity => "awaiting_city",
            State::AwaitingMonth { .. } => "awaiting_month",
            State::AwaitingDay { .. } => "awaiting_day",
            State::Loaded(_) => "loaded",
            State::Reporting(_) => "reporting",
            State::AwaitingRawDataChoice(_) => "awaiting_raw_data_choice",
            State::Browsing { .. } => "browsing",
            State::AwaitingRestart => "awaiting_restart",
            State::Terminal => "terminal",
        }
    }
}

/// `yes`/`y` → true, `no`/`n` → false, anything else is rejected.
pub fn parse_yes_no(input: &str) -> Result<bool, String> {
    match input.trim().to_lowercase().as_str() {
        "yes" | "y" => Ok(true),
        "no" | "n" => Ok(false),
        other => Err(format!("`{}` is not yes or no", other)),
    }
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "yes" | "y")
}

/// Drives the state machine, printing reports to `out` and reading answers from `prompter`.
pub struct Session<'a, P, W> {
    loader: DataLoader<'a>,
    duration_unit: DurationUnit,
    prompter: P,
    out: W,
}

impl<'a, P: Prompter, W: Write> Session<'a, P, W> {
    pub fn new(cities: &'a CityTable, duration_unit: DurationUnit, prompter: P, out: W) -> Self {
        Self {
            loader: DataLoader::new(cities),
            duration_unit,
            prompter,
            out,
        }
    }

    /// Step from `AwaitingCity` until `Terminal`.
    pub fn run(&mut self) -> Result<()> {
        let mut state = State::AwaitingCity;
        while state != State::Terminal {
            state = self.step(state)?;
        }
        info!("session finished");
        Ok(())
    }

    pub fn into_parts(self) -> (P, W) {
        (self.prompter, self.out)
    }

    /// Perform one transition. End of input from any prompt yields `Terminal`.
    pub fn step(&mut self, state: State) -> Result<State> {
        debug!(state = state.name(), "step");
        let next = match state {
            State::AwaitingCity => {
                writeln!(self.out, "{}", GREETING)?;
                match self.ask_valid(ASK_CITY, RETRY_CITY, parse_city)? {
                    Some(city) => State::AwaitingMonth { city },
                    None => State::Terminal,
                }
            }
            State::AwaitingMonth { city } => {
                match self.ask_valid(ASK_MONTH, RETRY_MONTH, parse_month)? {
                    Some(month) => State::AwaitingDay { city, month },
                    None => State::Terminal,
                }
            }
            State::AwaitingDay { city, month } => {
                match self.ask_valid(ASK_DAY, RETRY_DAY, parse_day)? {
                    Some(day) => {
                        writeln!(self.out, "{}", SEPARATOR)?;
                        State::Loaded(FilterSelection { city, month, day })
                    }
                    None => State::Terminal,
                }
            }
            State::Loaded(selection) => self.load(selection)?,
            State::Reporting(table) => {
                self.report(&table)?;
                State::AwaitingRawDataChoice(table)
            }
            State::AwaitingRawDataChoice(table) => {
                match self.ask_valid(ASK_RAW, RETRY_RAW, parse_yes_no)? {
                    Some(true) => State::Browsing { table, offset: 0 },
                    Some(false) => State::AwaitingRestart,
                    None => State::Terminal,
                }
            }
            State::Browsing { table, offset } => self.browse(table, offset)?,
            State::AwaitingRestart => match self.ask(ASK_RESTART)? {
                Some(answer) if is_yes(&answer) => State::AwaitingCity,
                _ => State::Terminal,
            },
            State::Terminal => State::Terminal,
        };
        Ok(next)
    }

    fn ask(&mut self, question: &str) -> Result<Option<String>> {
        self.prompter
            .ask(question)
            .context("reading answer from prompt")
    }

    /// Re-prompt with `retry` until `parse` accepts the answer.
    fn ask_valid<T, E, F>(&mut self, question: &str, retry: &str, parse: F) -> Result<Option<T>>
    where
        E: Display,
        F: Fn(&str) -> std::result::Result<T, E>,
    {
        let mut q = question;
        loop {
            let Some(answer) = self.ask(q)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(v) => return Ok(Some(v)),
                Err(e) => {
                    debug!(%e, "rejected input");
                    q = retry;
                }
            }
        }
    }

    fn load(&mut self, selection: FilterSelection) -> Result<State> {
        match self.loader.load(&selection) {
            Ok(table) if table.is_empty() => {
                writeln!(self.out, "No trips match {}.", selection)?;
                writeln!(self.out, "{}", SEPARATOR)?;
                Ok(State::AwaitingRestart)
            }
            Ok(table) => Ok(State::Reporting(table)),
            Err(e) if e.is_recoverable() => {
                warn!(%e, "restarting filter selection");
                writeln!(
                    self.out,
                    "Sorry, {}. Let's restart so you can choose a new city and/or month.\n",
                    e
                )?;
                Ok(State::AwaitingCity)
            }
            Err(e) => {
                error!(error = %e, "load failed");
                writeln!(self.out, "Error: {}", e)?;
                writeln!(self.out, "{}", SEPARATOR)?;
                Ok(State::AwaitingRestart)
            }
        }
    }

    fn report(&mut self, table: &TripTable) -> Result<()> {
        let unit = self.duration_unit;
        self.stage("Calculating The Most Frequent Times of Travel...", || {
            TimeStats::compute(table).map(|s| s.to_string())
        })?;
        self.stage("Calculating The Most Popular Stations and Trip...", || {
            StationStats::compute(table).map(|s| s.to_string())
        })?;
        self.stage("Calculating Trip Duration...", || {
            DurationStats::compute(table, unit).map(|s| s.to_string())
        })?;
        self.stage("Calculating User Stats...", || {
            Some(UserStats::compute(table).to_string())
        })
    }

    /// Print a heading, the stage's text, and how long it took to compute.
    fn stage<F>(&mut self, heading: &str, compute: F) -> Result<()>
    where
        F: FnOnce() -> Option<String>,
    {
        writeln!(self.out, "\n{}\n", heading)?;
        let start = Instant::now();
        let body = compute();
        let elapsed = start.elapsed();
        match body {
            Some(text) => write!(self.out, "{}", text)?,
            None => writeln!(self.out, "No trips to summarise.")?,
        }
        writeln!(self.out, "\nThis took {} seconds.", elapsed.as_secs_f64())?;
        writeln!(self.out, "{}", SEPARATOR)?;
        Ok(())
    }

    fn browse(&mut self, table: TripTable, offset: usize) -> Result<State> {
        let (shown, exhausted, next_offset) = {
            let mut pager = RawDataPager::at(&table, offset);
            let rows = pager.next_page();
            if !rows.is_empty() {
                write!(self.out, "{}", render_page(rows, offset, table.schema()))?;
            }
            (!rows.is_empty(), pager.is_exhausted(), pager.offset())
        };

        if !shown {
            writeln!(self.out, "No more raw data to display.")?;
            return Ok(State::AwaitingRestart);
        }
        if exhausted {
            writeln!(self.out, "That's all the raw data for this selection.")?;
            return Ok(State::AwaitingRestart);
        }
        match self.ask(ASK_MORE)? {
            Some(answer) if is_yes(&answer) => Ok(State::Browsing {
                table,
                offset: next_offset,
            }),
            _ => Ok(State::AwaitingRestart),
        }
    }
}
