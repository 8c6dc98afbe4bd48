// bastoc: structured-BASIC to C translator

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use crossterm::style::Stylize;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bastoc::emitter::Emitter;
use bastoc::parser::lexer::Lexer;
use bastoc::parser::parse::{ParseError, Parser};

/// Command-line options
#[derive(Debug, Default)]
struct Options {
    script: Option<PathBuf>,
    output: Option<PathBuf>,
    dump_tokens: bool,
    help: bool,
}

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("bastoc");

    let options = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(options) => options,
        Err(message) => {
            report(&message);
            eprintln!();
            print_usage(program_name);
            process::exit(1);
        }
    };

    if options.help {
        print_usage(program_name);
        return;
    }

    if let Err(message) = run(options) {
        report(&message);
        process::exit(1);
    }
}

/// Logs go to stderr; verbosity comes from `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .with(filter)
        .init();
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [OPTIONS] [SCRIPT]", program_name);
    eprintln!();
    eprintln!("Translates a BASIC script to C. Prompts for the script when none is given.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -o, --output <FILE>  Where to write the C source (default: SCRIPT with a .c extension)");
    eprintln!("      --tokens         Print the token stream instead of translating");
    eprintln!("  -h, --help           Show this message");
    eprintln!();
    eprintln!("Set RUST_LOG=bastoc=trace to follow the parser rule by rule.");
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => options.help = true,
            "--tokens" => options.dump_tokens = true,
            "-o" | "--output" => {
                let path = iter
                    .next()
                    .ok_or_else(|| format!("Error. Missing file name after '{}'", arg))?;
                options.output = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!("Error. Unknown option '{}'", flag));
            }
            path => {
                if options.script.is_some() {
                    return Err(format!("Error. Unexpected extra argument '{}'", path));
                }
                options.script = Some(PathBuf::from(path));
            }
        }
    }

    Ok(options)
}

fn run(options: Options) -> Result<(), String> {
    let script = match options.script {
        Some(script) => script,
        None => prompt_for_script().map_err(|e| format!("ERROR: {}", e))?,
    };

    let source = fs::read_to_string(&script)
        .map_err(|e| format!("ERROR: Could not read '{}': {}", script.display(), e))?;
    debug!(script = %script.display(), bytes = source.len(), "read script");

    if options.dump_tokens {
        return dump_tokens(&source);
    }

    let output = options.output.unwrap_or_else(|| script.with_extension("c"));
    if output == script {
        return Err(format!(
            "ERROR: Output path '{}' is the script itself",
            output.display()
        ));
    }

    info!(script = %script.display(), "parsing");
    let mut emitter = Emitter::new();
    let parser = Parser::new(Lexer::new(&source), &mut emitter).map_err(|e| e.diagnostic())?;
    parser.program().map_err(|e| e.diagnostic())?;

    emitter
        .write(&output)
        .map_err(|e| format!("ERROR: Could not write '{}': {}", output.display(), e))?;
    info!(output = %output.display(), "translation written");

    println!("Parsing completed!");
    println!("Wrote {}", output.display());
    Ok(())
}

fn prompt_for_script() -> io::Result<PathBuf> {
    print!("Script file: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let name = line.trim();
    if name.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "No script file given"));
    }
    Ok(PathBuf::from(name))
}

fn dump_tokens(source: &str) -> Result<(), String> {
    for token in Lexer::new(source) {
        let token = token.map_err(|e| ParseError::from(e).diagnostic())?;
        println!("{:<8} {}", token.kind, token.text.escape_debug());
    }
    Ok(())
}

fn report(message: &str) {
    eprintln!("{}", message.bold().red());
}
