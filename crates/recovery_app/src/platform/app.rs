use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use recovery_core::{status_line, AsyncOperationState, RecoveryView};
use recovery_engine::{to_checksum_address, Bip39Wordlist, RecoveryEngine};
use recovery_logging::{recovery_info, recovery_warn};
use tokio::runtime::Runtime;

use super::cli::Args;
use super::{config, logging, render};

const RENDER_INTERVAL: Duration = Duration::from_millis(75);

const EXIT_NOT_FOUND: u8 = 1;
const EXIT_USAGE: u8 = 2;
const EXIT_INTERRUPTED: u8 = 130;

pub fn run_app() -> ExitCode {
    let args = Args::parse();

    let level = match recovery_logging::parse_level(&args.log_level) {
        Some(level) => level,
        None => {
            eprintln!("Warning: unknown log level {:?}, using warn", args.log_level);
            LevelFilter::Warn
        }
    };
    logging::initialize(args.log, &args.log_file, level);

    let config = config::apply_overrides(config::load_config(args.config.as_deref()), &args);

    let runtime = match Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to start async runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    let engine = match RecoveryEngine::new(&config, runtime.handle().clone()) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let words = match args.words {
        Some(words) => words,
        None => match prompt_words(engine.word_count() - 1) {
            Ok(words) => words,
            Err(err) => {
                eprintln!("Failed to read words from stdin: {err}");
                return ExitCode::from(EXIT_USAGE);
            }
        },
    };

    let outcome = runtime.block_on(drive(&engine, &words, &args.address));
    report(outcome, &args.address)
}

enum Outcome {
    Settled(RecoveryView),
    Interrupted,
}

async fn drive(engine: &RecoveryEngine, words: &str, address: &str) -> Outcome {
    let wordlist = Bip39Wordlist::english();
    let mut updates = engine.subscribe();
    let ticket = engine.start_from_input(words, address);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut tick = tokio::time::interval(RENDER_INTERVAL);
    let mut status = StatusLine::default();

    loop {
        tokio::select! {
            signal = &mut ctrl_c => {
                if let Err(err) = signal {
                    recovery_warn!("Failed to listen for Ctrl-C: {}", err);
                }
                engine.reset();
                status.clear();
                ticket.finished().await;
                return Outcome::Interrupted;
            }
            _ = tick.tick() => {
                let view = engine.view();
                if view.state.is_pending() {
                    status.show(&render::render(&view, engine.word_count(), &wordlist));
                }
            }
            changed = updates.changed() => {
                if changed.is_err() || updates.borrow_and_update().state().is_settled() {
                    break;
                }
            }
        }
    }

    status.clear();
    ticket.finished().await;
    Outcome::Settled(engine.view())
}

fn report(outcome: Outcome, address: &str) -> ExitCode {
    let view = match outcome {
        Outcome::Settled(view) => view,
        Outcome::Interrupted => {
            eprintln!("Search cancelled.");
            return ExitCode::from(EXIT_INTERRUPTED);
        }
    };

    match &view.state {
        AsyncOperationState::Resolved(found) => {
            recovery_info!("Found word at position {}", found.position + 1);
            println!("{}", status_line(&view));
            let address = address.trim();
            println!(
                "Address: {}",
                to_checksum_address(address).unwrap_or_else(|| address.to_string())
            );
            ExitCode::SUCCESS
        }
        AsyncOperationState::Rejected(error) => {
            eprintln!("{}", error.message());
            match error.code() {
                Some("invalid_input") => ExitCode::from(EXIT_USAGE),
                _ => ExitCode::from(EXIT_NOT_FOUND),
            }
        }
        AsyncOperationState::Inactive | AsyncOperationState::Pending => {
            recovery_warn!("Search ended in state {}", view.state.label());
            ExitCode::FAILURE
        }
    }
}

fn prompt_words(expected: usize) -> io::Result<String> {
    eprint!("Enter the {expected} words you know, in order: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}

/// Single rewritable progress line on stderr.
#[derive(Default)]
struct StatusLine {
    width: usize,
}

impl StatusLine {
    fn show(&mut self, text: &str) {
        let pad = self.width.saturating_sub(text.len());
        eprint!("\r{text}{:pad$}", "");
        let _ = io::stderr().flush();
        self.width = text.len();
    }

    fn clear(&mut self) {
        if self.width > 0 {
            eprint!("\r{:width$}\r", "", width = self.width);
            let _ = io::stderr().flush();
            self.width = 0;
        }
    }
}
