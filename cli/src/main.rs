//! Terminal front end for the QueryQuest SQL mystery game.
//!
//! A line-oriented REPL over [`queryquest_session::Session`]. Wall-clock
//! time elapsed between inputs is converted into `Tick` events and fed
//! through the same reducer as submissions, so the countdown and the
//! query flow stay serialized exactly as the session requires.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use queryquest_core::QueryResult;
use queryquest_session::{
    CACHE_PURGE_PLACEHOLDER, Event, Feedback, Session, TIME_BUDGET_SECONDS, load_pack,
    mystery_campaign,
};

#[derive(Debug, Parser)]
#[command(name = "queryquest")]
#[command(about = "Solve a station mystery by writing SQL against a seeded in-memory database")]
struct Cli {
    /// Seconds on the clock for each level attempt.
    #[arg(long, default_value_t = TIME_BUDGET_SECONDS)]
    time_budget: u32,

    /// Path to a custom level pack (JSON array of levels). Defaults to
    /// the built-in mystery campaign.
    #[arg(long)]
    levels: Option<PathBuf>,
}

/// One parsed line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    /// Forward to the session's shell path (`ls`, `hint`, raw SQL probes).
    Shell(String),
    /// Submit as the answer to the current level.
    Submit(String),
    /// Navigate to a level (zero-based index).
    Level(usize),
    /// Toggle the manual overlay (pauses the timer).
    Manual,
    /// Reseed the database.
    Reset,
    Retry,
    Restart,
    Quit,
}

/// Maps a raw input line onto a session event or REPL command.
///
/// Shell aliases (`ls`, `ls tables`, `hint`) and the probe prefix `?` go
/// to the shell path; everything else is a level submission.
fn parse_input(line: &str) -> Option<Input> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();

    let input = match lower.as_str() {
        "quit" | "exit" => Input::Quit,
        "retry" => Input::Retry,
        "restart" => Input::Restart,
        "reset" | "reset db" => Input::Reset,
        "manual" => Input::Manual,
        "ls" | "ls tables" | "hint" => Input::Shell(trimmed.to_string()),
        _ => {
            if let Some(rest) = lower.strip_prefix("level ") {
                match rest.trim().parse::<usize>() {
                    Ok(n) if n >= 1 => Input::Level(n - 1),
                    _ => Input::Submit(trimmed.to_string()),
                }
            } else if let Some(probe) = trimmed.strip_prefix('?') {
                Input::Shell(probe.trim().to_string())
            } else {
                Input::Submit(trimmed.to_string())
            }
        }
    };
    Some(input)
}

/// Formats the remaining time as the familiar `T-m:ss` countdown.
fn format_timer(seconds: u32) -> String {
    format!("T-{}:{:02}", seconds / 60, seconds % 60)
}

/// Renders a result set as an aligned plain-text table.
fn render_table(result: &QueryResult) -> String {
    if result.columns.is_empty() {
        return result.message.clone().unwrap_or_default();
    }

    let mut widths: Vec<usize> = result.columns.iter().map(|c| c.len()).collect();
    let rows: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() && cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();
    let header: Vec<String> = result
        .columns
        .iter()
        .zip(widths.iter().copied())
        .map(|(c, w)| format!("{c:<w$}"))
        .collect();
    out.push_str(&header.join(" | "));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    for row in &rows {
        out.push('\n');
        let line: Vec<String> = row
            .iter()
            .zip(widths.iter().copied())
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect();
        out.push_str(&line.join(" | "));
    }
    if let Some(message) = &result.message {
        out.push('\n');
        out.push_str(message);
    }
    out
}

fn print_level(session: &Session) {
    let level = session.current_level();
    println!();
    println!("== Level {} :: {} ==", level.id, level.title);
    println!("{}", level.description);
    println!("(type `hint` for a clue, `ls` to list tables, `manual` to pause)");
}

/// Prints feedback items in order; returns whether progression advanced.
fn print_feedback(feedback: &[Feedback]) -> bool {
    let mut advanced = false;
    for item in feedback {
        match item {
            Feedback::Results(result) => println!("{}", render_table(result)),
            Feedback::QueryFailed(message) => println!("!! {message}"),
            Feedback::Hint(hint) => println!(">> HINT :: {hint}"),
            Feedback::LevelComplete { level_id } => {
                println!(">> SUCCESS :: Level {level_id} complete!");
            }
            Feedback::CachePurge => println!("{CACHE_PURGE_PLACEHOLDER}"),
            Feedback::Advanced { .. } => advanced = true,
            Feedback::MissionComplete => {
                println!(">> MISSION COMPLETE :: The station is safe. Type `restart` to play again.");
            }
            Feedback::SystemFailure => {
                println!("!! SYSTEM FAILURE :: The clock ran out. Type `retry` to start over.");
            }
            Feedback::DatabaseReset => println!(":: database reseeded"),
        }
    }
    advanced
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let levels = match &cli.levels {
        Some(path) => load_pack(path)?,
        None => mystery_campaign()?,
    };
    let mut session = Session::with_budget(levels, cli.time_budget)?;

    println!("QUERYQUEST :: terminal access granted");
    println!("Answer each level by typing a SQL query. `quit` exits.");
    session.apply(Event::Begin);
    print_level(&session);

    let stdin = io::stdin();
    let mut last_input = Instant::now();
    let mut manual_open = false;

    loop {
        print!("{} sql> ", format_timer(session.state().timer));
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        // Convert wall-clock time spent thinking into timer ticks, applied
        // before the input so an expired clock wins over the submission.
        let elapsed = last_input.elapsed().as_secs().min(u64::from(u32::MAX)) as u32;
        last_input = Instant::now();
        for _ in 0..elapsed {
            let feedback = session.apply(Event::Tick);
            print_feedback(&feedback);
        }

        let Some(input) = parse_input(&line) else {
            continue;
        };

        let event = match input {
            Input::Quit => break,
            Input::Manual => {
                manual_open = !manual_open;
                if manual_open {
                    println!(":: manual open, timer paused (type `manual` again to resume)");
                    Event::OpenManual
                } else {
                    println!(":: manual closed, timer running");
                    Event::CloseManual
                }
            }
            Input::Level(index) => Event::SelectLevel(index),
            Input::Reset => Event::ResetDatabase,
            Input::Retry => Event::Retry,
            Input::Restart => {
                let feedback = session.apply(Event::RestartMission);
                print_feedback(&feedback);
                if !session.state().started {
                    session.apply(Event::Begin);
                    print_level(&session);
                }
                continue;
            }
            Input::Shell(command) => Event::Shell(command),
            Input::Submit(sql) => Event::Submit(sql),
        };

        let selected_before = session.state().current_level;
        let feedback = session.apply(event);
        let advanced = print_feedback(&feedback);

        if advanced || session.state().current_level != selected_before {
            print_level(&session);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
