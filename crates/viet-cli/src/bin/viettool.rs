use std::fs;
use std::io::{self, BufRead};
use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};

use viet_core::keys::char_to_key_code;
use viet_core::macros::{parse_macros_toml, MacroTable};
use viet_core::settings::{InputMethod, Settings};
use viet_session::{InputSession, KeyOutcome};

#[derive(Parser)]
#[command(name = "viettool", about = "Vietnamese input engine diagnostics")]
struct Cli {
    /// Input method (overrides the settings file)
    #[arg(long, value_enum)]
    method: Option<Method>,

    /// Old-style tone placement on ambiguous clusters (túy instead of tuý)
    #[arg(long)]
    old_orthography: bool,

    /// Path to a settings TOML file
    #[arg(long)]
    settings: Option<String>,

    /// Path to a macro table TOML file
    #[arg(long)]
    macros: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Method {
    Telex,
    Vni,
}

#[derive(Subcommand)]
enum Command {
    /// Type a string through a fresh session and print the composed text
    Type {
        /// Raw keystrokes, e.g. "tieengs vieetj" or "tie6ng1 vie6t5"
        text: String,
    },

    /// Show the per-keystroke outcome for a string
    Explain {
        text: String,
    },

    /// Read lines from stdin, typing each through a fresh session
    Pipe,
}

fn main() {
    let cli = Cli::parse();
    let settings = load_settings(&cli);
    let macros = cli.macros.as_deref().map(load_macros);

    match &cli.command {
        Command::Type { text } => {
            let mut session = make_session(&settings, macros.as_ref());
            println!("{}", type_text(&mut session, text));
        }
        Command::Explain { text } => {
            let mut session = make_session(&settings, macros.as_ref());
            explain(&mut session, text);
        }
        Command::Pipe => {
            for line in io::stdin().lock().lines() {
                let line = line.unwrap_or_else(|e| {
                    eprintln!("Failed to read stdin: {}", e);
                    process::exit(1);
                });
                let mut session = make_session(&settings, macros.as_ref());
                println!("{}", type_text(&mut session, &line));
            }
        }
    }
}

fn load_settings(cli: &Cli) -> Settings {
    let mut settings = match &cli.settings {
        Some(path) => {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Failed to read settings at {}: {}", path, e);
                process::exit(1);
            });
            Settings::from_toml(&text).unwrap_or_else(|e| {
                eprintln!("Invalid settings file {}: {}", path, e);
                process::exit(1);
            })
        }
        None => Settings::default(),
    };
    if let Some(method) = cli.method {
        settings.input_method = match method {
            Method::Telex => InputMethod::Telex,
            Method::Vni => InputMethod::Vni,
        };
    }
    if cli.old_orthography {
        settings.modern_orthography = false;
    }
    settings
}

fn load_macros(path: &str) -> Arc<MacroTable> {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read macro file {}: {}", path, e);
        process::exit(1);
    });
    let table = parse_macros_toml(&text).unwrap_or_else(|e| {
        eprintln!("Invalid macro file {}: {}", path, e);
        process::exit(1);
    });
    Arc::new(table)
}

fn make_session(settings: &Settings, macros: Option<&Arc<MacroTable>>) -> InputSession {
    let session = InputSession::new(settings.clone());
    match macros {
        Some(table) => session.with_macros(table.clone()),
        None => session,
    }
}

/// Feed one typed character, routing word breaks the way a host would.
fn feed(session: &mut InputSession, ch: char) -> KeyOutcome {
    if ch == ' ' || ch.is_ascii_punctuation() {
        return session.process_word_break(ch);
    }
    match char_to_key_code(ch) {
        Some((code, caps)) => session.process_key(ch, code, caps),
        None => session.process_word_break(ch),
    }
}

fn apply(screen: &mut String, typed: char, outcome: &KeyOutcome) {
    if outcome.consumed {
        for _ in 0..outcome.backspace_count {
            screen.pop();
        }
        screen.push_str(&outcome.output);
    } else {
        screen.push(typed);
    }
}

fn type_text(session: &mut InputSession, text: &str) -> String {
    let mut screen = String::new();
    for ch in text.chars() {
        let outcome = feed(session, ch);
        apply(&mut screen, ch, &outcome);
    }
    screen
}

fn explain(session: &mut InputSession, text: &str) {
    let mut screen = String::new();
    println!("{:>4}  {:^9}  {:>3}  {:<12}  screen", "key", "consumed", "bs", "output");
    for ch in text.chars() {
        let outcome = feed(session, ch);
        apply(&mut screen, ch, &outcome);
        println!(
            "{:>4}  {:^9}  {:>3}  {:<12}  {}",
            ch,
            if outcome.consumed { "yes" } else { "no" },
            outcome.backspace_count,
            outcome.output,
            screen,
        );
    }
    println!();
    println!("word:  {}", session.current_word());
    println!("final: {}", screen);
}
