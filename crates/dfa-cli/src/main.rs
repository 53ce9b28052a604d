//! DFA Matcher CLI
//!
//! CLI tool for compiling table definitions, inspecting tables and filtering
//! candidate strings through them.

mod table_file;

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use serde::Serialize;

use dfa_compiler::{build_table, from_json, optimize_definition, parse_definition, to_json};
use dfa_core::types::escape_symbol;
use dfa_core::{ab_star_c, Matcher, StateId, TransitionTable};

use table_file::{read_table, write_table};

#[derive(Parser)]
#[command(name = "dfa-cli")]
#[command(about = "Table-driven DFA compiler and matcher")]
struct Cli {
    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a table definition into a JSON table
    Compile {
        /// Input definition file
        #[arg(short, long)]
        input: PathBuf,

        /// Output table file
        #[arg(short, long, default_value = "table.json")]
        output: PathBuf,
    },

    /// Validate a JSON table or definition file
    Validate {
        /// Table file to validate
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Dump table states and transitions
    Info {
        /// Table file to inspect (built-in ab*c when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the candidates accepted by a table
    Match {
        /// Table file (built-in ab*c when omitted)
        #[arg(short, long)]
        table: Option<PathBuf>,

        /// File with one candidate per line
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print every candidate with its result as JSON
        #[arg(long)]
        json: bool,

        /// Print rejected candidates instead of accepted ones
        #[arg(long)]
        invert: bool,

        /// Print the visited states for each candidate
        #[arg(long)]
        trace: bool,

        /// Candidates given on the command line
        words: Vec<String>,
    },
}

#[derive(Serialize)]
struct MatchRecord<'a> {
    input: &'a str,
    matched: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compile { input, output } => cmd_compile(&input, &output),
        Commands::Validate { input } => cmd_validate(&input),
        Commands::Info { input } => cmd_info(input.as_deref()),
        Commands::Match {
            table,
            file,
            json,
            invert,
            trace,
            words,
        } => cmd_match(table.as_deref(), file.as_deref(), &words, json, invert, trace),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn cmd_compile(input: &Path, output: &Path) -> Result<(), String> {
    let start = Instant::now();

    let content = fs::read_to_string(input)
        .map_err(|e| format!("Failed to read '{}': {}", input.display(), e))?;
    let line_count = content.lines().count();

    let mut def = parse_definition(&content)
        .map_err(|e| format!("Failed to parse '{}': {}", input.display(), e))?;
    let parse_time = start.elapsed();

    let opt_start = Instant::now();
    let stats = optimize_definition(&mut def);
    let opt_time = opt_start.elapsed();

    let build_start = Instant::now();
    let table = build_table(&def)
        .map_err(|e| format!("Failed to build '{}': {}", input.display(), e))?;
    let json = to_json(&table).map_err(|e| e.to_string())?;
    let build_time = build_start.elapsed();

    let reloaded = from_json(&json)
        .map_err(|e| format!("Generated table failed validation: {}", e))?;
    if reloaded != table {
        return Err("Generated table does not reload to the same table".to_string());
    }

    write_table(output, &json)?;

    let total_time = start.elapsed();

    println!("Compiled '{}' to '{}'", input.display(), output.display());
    println!("  Lines:        {}", line_count);
    println!("  States:       {} ({} accepting)", table.state_count(), table.accepting_states().count());
    println!("  Transitions:  {} -> {} (dedupe removed {})", stats.before, stats.after, stats.deduped);
    if !stats.unreachable.is_empty() {
        println!("  Unreachable:  {}", stats.unreachable.join(", "));
    }
    println!("  Time:         {:.1}ms (parse: {:.1}ms, opt: {:.1}ms, build: {:.1}ms)",
        total_time.as_secs_f64() * 1000.0,
        parse_time.as_secs_f64() * 1000.0,
        opt_time.as_secs_f64() * 1000.0,
        build_time.as_secs_f64() * 1000.0,
    );

    Ok(())
}

fn cmd_validate(input: &Path) -> Result<(), String> {
    let table = read_table(input)?;

    println!("Table '{}' is valid", input.display());
    println!("  States:       {}", table.state_count());
    println!("  Accepting:    {}", table.accepting_states().count());
    println!("  Transitions:  {}", table.transition_count());

    Ok(())
}

fn cmd_info(input: Option<&Path>) -> Result<(), String> {
    let loaded;
    let table: &TransitionTable = match input {
        Some(path) => {
            loaded = read_table(path)?;
            println!("Table: {}", path.display());
            &loaded
        }
        None => {
            println!("Table: built-in ab*c");
            ab_star_c()
        }
    };

    let name = |state: StateId| table.state_name(state).unwrap_or("?");

    println!("  States:       {}", table.state_count());
    println!("  Transitions:  {}", table.transition_count());
    println!();

    println!("States:");
    for state in table.states() {
        let start = if state == table.start() { "->" } else { "  " };
        let accept = if table.is_accepting(state) { "*" } else { " " };
        println!("  {}{} {} ({} out)", start, accept, name(state), table.row(state).len());
    }
    println!();

    println!("Transitions:");
    for t in table.transitions() {
        println!("  {} {} {}", name(t.from), escape_symbol(t.symbol), name(t.to));
    }

    Ok(())
}

fn cmd_match(
    table_path: Option<&Path>,
    file: Option<&Path>,
    words: &[String],
    json: bool,
    invert: bool,
    trace: bool,
) -> Result<(), String> {
    let loaded;
    let table: &TransitionTable = match table_path {
        Some(path) => {
            loaded = read_table(path)?;
            &loaded
        }
        None => ab_star_c(),
    };
    let matcher = Matcher::new(table);

    let candidates = collect_candidates(file, words)?;
    log::debug!("evaluating {} candidates", candidates.len());

    let start = Instant::now();
    let records = evaluate_candidates(&matcher, &candidates);
    log::debug!(
        "evaluated {} candidates in {:.3}ms",
        records.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    if json {
        println!("{}", records_to_json(&records)?);
        return Ok(());
    }

    for record in selected(&records, invert) {
        if trace {
            let path = matcher.trace(record.input);
            let states: Vec<&str> = path
                .visited
                .iter()
                .map(|&s| table.state_name(s).unwrap_or("?"))
                .collect();
            let tail = match path.failed_at {
                Some(pos) => format!(" -> failed at {}", pos),
                None => String::new(),
            };
            println!("{}\t{}{}", record.input, states.join(" -> "), tail);
        } else {
            println!("{}", record.input);
        }
    }

    Ok(())
}

fn evaluate_candidates<'a>(matcher: &Matcher<'_>, candidates: &'a [String]) -> Vec<MatchRecord<'a>> {
    candidates
        .iter()
        .map(|input| MatchRecord {
            input: input.as_str(),
            matched: matcher.evaluate(input),
        })
        .collect()
}

/// Accepted records, or rejected ones when `invert` is set.
fn selected<'r, 'a>(records: &'r [MatchRecord<'a>], invert: bool) -> impl Iterator<Item = &'r MatchRecord<'a>> {
    records.iter().filter(move |r| r.matched != invert)
}

fn records_to_json(records: &[MatchRecord<'_>]) -> Result<String, String> {
    serde_json::to_string_pretty(records).map_err(|e| format!("Failed to serialize results: {}", e))
}

fn collect_candidates(file: Option<&Path>, words: &[String]) -> Result<Vec<String>, String> {
    let mut candidates = Vec::new();

    if let Some(path) = file {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
        candidates.extend(content.lines().map(str::to_string));
    }
    candidates.extend(words.iter().cloned());

    if file.is_none() && words.is_empty() {
        for line in io::stdin().lock().lines() {
            candidates.push(line.map_err(|e| format!("Failed to read stdin: {}", e))?);
        }
    }

    Ok(candidates)
}
