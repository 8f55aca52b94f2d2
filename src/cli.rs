// File: ./src/cli.rs
//! Console front end: help text, logging setup and response framing.
use crate::context::AppContext;
use crate::controller::Session;
use crate::help;
use crate::model::DATE_TIME_PATTERN;
use crate::response::Response;
use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::OpenOptions;
use std::io::{BufRead, Write};
use std::path::PathBuf;

const RULE: &str = "____________________________________________________________";

pub fn print_help(binary_name: &str) {
    println!(
        "Duke v{} - a chat-style task tracker",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>]", binary_name);
    println!("    {} export [--root <path>]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("EXPORT COMMAND:");
    println!("    {} export                 Print the stored task records", binary_name);
    println!("    {} export > backup.txt    Save them to a file", binary_name);
    println!();
    println!("COMMANDS (inside the chat):");
    for line in help::command_lines() {
        println!("    {}", line);
    }
    println!();
    println!("Dates are written as {} (24-hour clock).", DATE_TIME_PATTERN);
}

/// What the command line asked for.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub root: Option<PathBuf>,
    pub help: bool,
    pub export: bool,
}

/// Parses the arguments after the binary name.
pub fn parse_args<I>(args: I) -> Result<CliArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut positional = Vec::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => parsed.help = true,
            "-r" | "--root" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{} needs a directory", arg))?;
                parsed.root = Some(PathBuf::from(value));
            }
            flag if flag.starts_with('-') => anyhow::bail!("Unknown option '{}'", flag),
            _ => positional.push(arg),
        }
    }

    match positional.first().map(String::as_str) {
        None => {}
        Some("help") => parsed.help = true,
        Some("export") => parsed.export = true,
        Some(other) => anyhow::bail!("Unknown command '{}'", other),
    }
    if positional.len() > 1 {
        anyhow::bail!("Unexpected argument '{}'", positional[1]);
    }
    Ok(parsed)
}

/// Runs the chat until `bye` or end of input, then performs the shutdown save.
///
/// The save happens even when reading or writing fails; that error is returned afterwards.
pub fn run_chat<R, W>(
    mut session: Session,
    opening: &[Response],
    input: R,
    mut out: W,
) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let outcome = chat_loop(&mut session, opening, input, &mut out);
    if let Err(e) = &outcome {
        log::error!("Chat loop stopped: {:#}", e);
    }

    if let Some(response) = session.shutdown()
        && let Err(e) = write_responses(&mut out, std::slice::from_ref(&response))
    {
        log::error!("Could not report shutdown failure: {:#}", e);
    }
    outcome
}

fn chat_loop<R: BufRead, W: Write>(
    session: &mut Session,
    opening: &[Response],
    mut input: R,
    out: &mut W,
) -> Result<()> {
    write_responses(out, opening)?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .context("Failed to read input")?;
        if read == 0 {
            log::info!("End of input");
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let responses = session.handle(&line);
        write_responses(out, &responses)?;
        if session.is_terminated() {
            break;
        }
    }
    Ok(())
}

fn write_responses<W: Write>(out: &mut W, responses: &[Response]) -> Result<()> {
    for response in responses {
        writeln!(out, "{}", render(response)).context("Failed to write output")?;
    }
    out.flush().context("Failed to write output")?;
    Ok(())
}

/// Frames a response the way the console shows it: indented lines between two rules.
pub fn render(response: &Response) -> String {
    let mut out = String::new();
    out.push('\t');
    out.push_str(RULE);
    out.push('\n');
    for line in response.lines() {
        out.push('\t');
        out.push_str(&line);
        out.push('\n');
    }
    out.push('\t');
    out.push_str(RULE);
    out
}

/// Sends `log` output to the log file in the data directory, keeping the console clean.
pub fn init_logging(ctx: &dyn AppContext, level: LevelFilter) -> Result<()> {
    let path = ctx
        .get_log_file_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine log file path"))?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();
    WriteLogger::init(level, log_config, file)
        .context("Failed to initialise logger")?;
    Ok(())
}
