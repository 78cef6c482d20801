mod debug_report;

use deprewrite::{Options, SentenceTree};
use std::io::{self, IsTerminal, Read};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DEPREWRITE_LOG";

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let tree = match SentenceTree::from_json(&config.input) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    debug_report::print_run(&tree, &config.options, config.color);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

struct CliConfig {
    input: String,
    options: Options,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input_path: Option<String> = None;
    let mut options = Options::default();
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("deprewrite {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--config" | "-c" => {
                let value = args.next().ok_or_else(|| "error: --config expects a file".to_string())?;
                options = read_options(&value)?;
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a file".to_string())?;
                if input_path.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input_path = Some(value);
            }
            _ if arg.starts_with("--config=") => {
                options = read_options(arg.trim_start_matches("--config="))?;
            }
            _ if arg.starts_with("--input=") => {
                if input_path.is_some() {
                    return Err("error: input provided multiple times".to_string());
                }
                input_path = Some(arg.trim_start_matches("--input=").to_string());
            }
            _ => {
                return Err(format!("error: unknown argument '{arg}'\n\n{}", help_text()));
            }
        }
    }

    let input = match input_path {
        Some(path) => read_file(&path)?,
        None => read_stdin_input()?,
    };

    if input.trim().is_empty() {
        return Err(format!("error: no input provided\n\n{}", help_text()));
    }

    Ok(CliConfig { input, options, color })
}

fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|err| format!("error: failed to read '{path}': {err}"))
}

fn read_options(path: &str) -> Result<Options, String> {
    let text = read_file(path)?;
    Options::from_json(&text).map_err(|err| format!("error: invalid config '{path}': {err}"))
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "deprewrite {version}

Merges, extracts triples from, and splits a dependency-parsed sentence.

Usage:
  deprewrite [OPTIONS] < sentence.json
  deprewrite [OPTIONS] --input <file>

The input is a JSON array of tokens, or an object with a \"tokens\" array:
  {{\"text\": \"apple\", \"pos\": \"NOUN\", \"dep\": \"nsubj\", \"head\": 3, \"ws\": true}}

Options:
  -i, --input <file>         Tree to read. Default: stdin.
  -c, --config <file>        JSON options ({{\"merge\": {{...}}, \"split\": {{...}}}}).
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}             Log filter (e.g. debug, deprewrite::engine=trace).
                             Default: warn.

Exit codes:
  0  Success.
  1  Malformed tree.
  2  Invalid arguments or missing input.
",
        version = env!("CARGO_PKG_VERSION"),
        log_env = LOG_ENV,
    )
}
