//! Render one report without the interactive menu.
//!
//! Usage:
//!   render_report month 10 --out raportti.txt

use anyhow::{bail, Context, Result};
use energy_domain::queries::{DateRange, Period};
use report_service::{
    config::AppConfig,
    format::parse_date,
    observability,
    pipeline::{ReportError, Sink},
    report,
    sinks::{ConsoleSink, TextFileSink},
    sources,
};
use std::{env, fs::File};

const USAGE: &str = "usage: render_report (range <d.m.yyyy> <d.m.yyyy> | month <1-12> | year | days <d.m.yyyy> <d.m.yyyy>) [--out <path>]";

fn take_out_flag(args: &mut Vec<String>) -> Result<Option<String>> {
    let Some(idx) = args.iter().position(|a| a == "--out") else {
        return Ok(None);
    };
    if idx + 1 >= args.len() {
        bail!("--out needs a path\n{USAGE}");
    }
    let path = args.remove(idx + 1);
    args.remove(idx);
    Ok(Some(path))
}

fn main() -> Result<()> {
    observability::init_tracing();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let out = take_out_flag(&mut args)?;

    let cfg = AppConfig::load()?;
    let file = File::open(&cfg.source.path)
        .with_context(|| format!("failed to open measurement file '{}'", cfg.source.path))?;
    let records = sources::load_from_reader(&cfg.source, file)?;

    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let lines = match args.as_slice() {
        ["range", start, end] => report::build(&records, &Period::range(parse_date(start)?, parse_date(end)?)),
        ["month", number] => {
            let number: u8 = number
                .parse()
                .map_err(|_| ReportError::InvalidMonth(format!("'{number}' is not a month number")))?;
            report::build(&records, &Period::month_number(number, cfg.report.year)?)
        }
        ["year"] => report::build(&records, &Period::Year(cfg.report.year)),
        ["days", start, end] => report::daily_table(&records, DateRange::new(parse_date(start)?, parse_date(end)?)),
        _ => bail!(USAGE),
    };

    match out {
        Some(path) => TextFileSink::new(path).write(&lines)?,
        None => ConsoleSink::stdout().write(&lines)?,
    }

    Ok(())
}
