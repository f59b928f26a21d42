//! A terminal front-end for the scheduler
//!
//! ```text
//! scheduler [--sqlite <file>] [--year <year>] [--month <name>] [--day <n> [--json] [--add <name> <hh> <mm> <AM|PM> <hh> <mm> <AM|PM>]]
//! ```
//!
//! Without `--sqlite`, the MySQL server described by `.env` (or the environment) is used.

use std::path::PathBuf;
use std::process::exit;

use chrono::{Datelike, Local};

use scheduler_core::calendar::parse_month;
use scheduler_core::config::Settings;
use scheduler_core::event::NewEvent;
use scheduler_core::store::{MySqlStore, SqliteStore};
use scheduler_core::traits::EventStore;
use scheduler_core::{utils, Scheduler, SchedulerError};

#[derive(Debug, Default)]
struct Args {
    sqlite: Option<PathBuf>,
    year: Option<i32>,
    month: Option<String>,
    day: Option<u32>,
    json: bool,
    add: Option<Vec<String>>,
}

fn parse_args<I: Iterator<Item = String>>(mut it: I) -> Result<Args, String> {
    let mut args = Args::default();

    while let Some(arg) = it.next() {
        let mut value = |name: &str| it.next().ok_or_else(|| format!("{} expects a value", name));
        match arg.as_str() {
            "--sqlite" => args.sqlite = Some(PathBuf::from(value("--sqlite")?)),
            "--year" => args.year = Some(value("--year")?.parse().map_err(|_| "invalid --year".to_string())?),
            "--month" => args.month = Some(value("--month")?),
            "--day" => args.day = Some(value("--day")?.parse().map_err(|_| "invalid --day".to_string())?),
            "--json" => args.json = true,
            "--add" => {
                let mut fields = Vec::with_capacity(7);
                for _ in 0..7 {
                    fields.push(value("--add")?);
                }
                args.add = Some(fields);
            },
            other => return Err(format!("unknown argument {:?}", other)),
        }
    }

    if args.day.is_none() {
        if args.add.is_some() {
            return Err("--add needs a --day".to_string());
        }
        if args.json {
            return Err("--json needs a --day".to_string());
        }
    }
    Ok(args)
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}", err);
            exit(2);
        },
    };

    let result = match &args.sqlite {
        Some(path) => match SqliteStore::open(path).await {
            Ok(store) => run(Scheduler::new(store), &args).await,
            Err(err) => Err(err),
        },
        None => match Settings::load() {
            Ok(settings) => {
                log::info!("Using {}", settings.target());
                run(Scheduler::new(MySqlStore::new(&settings)), &args).await
            },
            Err(err) => Err(err),
        },
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        exit(1);
    }
}

async fn run<S: EventStore>(scheduler: Scheduler<S>, args: &Args) -> Result<(), SchedulerError> {
    let today = Local::now().date_naive();
    let year = args.year.unwrap_or_else(|| today.year());
    let month = match &args.month {
        Some(name) => parse_month(name)?,
        None => today.month(),
    };
    let state = scheduler.get_grid(year, month).await?;

    let day_of_month = match args.day {
        None => {
            utils::print_grid(&state);
            return Ok(());
        },
        Some(d) => d,
    };

    let day = state.days()
        .find(|cell| cell.day.day_of_month() == day_of_month)
        .map(|cell| cell.day.clone())
        .ok_or_else(|| SchedulerError::validation(format!("{} {} has no day {}", state.month_name(), state.year(), day_of_month)))?;

    if let Some(fields) = &args.add {
        let event = NewEvent::from_selection(&fields[0],
            (fields[1].as_str(), fields[2].as_str(), fields[3].as_str()),
            (fields[4].as_str(), fields[5].as_str(), fields[6].as_str()))?;
        let id = scheduler.add_event(&day, event).await?;
        println!("Added event {} to {}", id, day.describe());
    }

    if args.json {
        let events = scheduler.try_get_events(&day).await?;
        match serde_json::to_string_pretty(&events) {
            Ok(json) => println!("{}", json),
            Err(err) => log::error!("Unable to serialize the events: {}", err),
        }
    } else {
        utils::print_day(&scheduler.day_view(&day).await);
    }
    Ok(())
}
