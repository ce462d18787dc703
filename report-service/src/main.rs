use std::{
    fs::File,
    io::{self, BufRead, Write},
};

use anyhow::{Context, Result};
use energy_domain::queries::{DateRange, Period};
use report_service::{
    config::AppConfig,
    format::parse_date,
    observability,
    pipeline::Sink,
    report,
    sinks::{ConsoleSink, TextFileSink},
    sources,
};
use time::Date;

/// Line-oriented questions on stdin. `None` means the input ended.
struct Prompt<R> {
    input: R,
}

impl<R: BufRead> Prompt<R> {
    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        print!("{question}");
        io::stdout().flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }
        Ok(Some(answer.trim().to_string()))
    }

    fn ask_date(&mut self, question: &str) -> io::Result<Option<Date>> {
        loop {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            match parse_date(&answer) {
                Ok(date) => return Ok(Some(date)),
                Err(e) => {
                    tracing::debug!(error = %e, "rejected date input");
                    println!("Virheellinen päivämäärä. Yritä uudelleen (muoto pv.kk.vvvv).");
                }
            }
        }
    }

    fn ask_range(&mut self) -> io::Result<Option<DateRange>> {
        let Some(start) = self.ask_date("Anna alkupäivä (pv.kk.vvvv): ")? else {
            return Ok(None);
        };
        let Some(end) = self.ask_date("Anna loppupäivä (pv.kk.vvvv): ")? else {
            return Ok(None);
        };
        Ok(Some(DateRange::new(start, end)))
    }

    fn ask_month(&mut self, year: i32) -> io::Result<Option<Period>> {
        loop {
            let Some(answer) = self.ask("Anna kuukauden numero (1-12): ")? else {
                return Ok(None);
            };
            match answer.parse::<u8>().map(|n| Period::month_number(n, year)) {
                Ok(Ok(period)) => return Ok(Some(period)),
                Ok(Err(_)) => println!("Kuukausi 1–12."),
                Err(_) => println!("Virheellinen syöte. Anna numero 1–12."),
            }
        }
    }
}

enum Next {
    NewReport,
    Quit,
}

fn after_report<R: BufRead>(prompt: &mut Prompt<R>, file_sink: &mut TextFileSink, lines: &[String]) -> Result<Next> {
    loop {
        println!("\nMitä haluat tehdä seuraavaksi?");
        println!("1) Kirjoita raportti tiedostoon {}", file_sink.path().display());
        println!("2) Luo uusi raportti");
        println!("3) Lopeta");

        let Some(choice) = prompt.ask("Valintasi: ")? else {
            return Ok(Next::Quit);
        };
        match choice.as_str() {
            "1" => {
                file_sink.write(lines)?;
                println!("Raportti kirjoitettu tiedostoon {}.", file_sink.path().display());
            }
            "2" => return Ok(Next::NewReport),
            "3" => return Ok(Next::Quit),
            _ => println!("Virheellinen valinta."),
        }
    }
}

fn main() -> Result<()> {
    observability::init_tracing();

    let cfg = AppConfig::load()?;

    let file = File::open(&cfg.source.path)
        .with_context(|| format!("failed to open measurement file '{}'", cfg.source.path))?;
    let records = sources::load_from_reader(&cfg.source, file)?;

    let stdin = io::stdin();
    let mut prompt = Prompt { input: stdin.lock() };
    let mut console = ConsoleSink::stdout();
    let mut file_sink = TextFileSink::new(&cfg.report.output_path);

    loop {
        println!("\nValitse raporttityyppi:");
        println!("1) Päiväkohtainen yhteenveto aikaväliltä");
        println!("2) Kuukausikohtainen yhteenveto yhdelle kuukaudelle");
        println!("3) Vuoden {} kokonaisyhteenveto", cfg.report.year);
        println!("4) Päivittäinen erittely aikaväliltä");
        println!("5) Lopeta ohjelma");

        let Some(choice) = prompt.ask("Valintasi: ")? else {
            break;
        };

        let lines = match choice.as_str() {
            "1" => match prompt.ask_range()? {
                Some(range) => report::build(&records, &Period::Range(range)),
                None => break,
            },
            "2" => match prompt.ask_month(cfg.report.year)? {
                Some(period) => report::build(&records, &period),
                None => break,
            },
            "3" => report::build(&records, &Period::Year(cfg.report.year)),
            "4" => match prompt.ask_range()? {
                Some(range) => report::daily_table(&records, range),
                None => break,
            },
            "5" => break,
            _ => {
                println!("Virheellinen valinta.");
                continue;
            }
        };

        console.write(&lines)?;

        match after_report(&mut prompt, &mut file_sink, &lines)? {
            Next::NewReport => continue,
            Next::Quit => break,
        }
    }

    println!("Ohjelma lopetetaan.");
    Ok(())
}
