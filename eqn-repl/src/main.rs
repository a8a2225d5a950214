use clap::Parser;
use eqn_compute::{Config, Equation};
use eqn_error::Error;
use log::LevelFilter;
use rustyline::{error::ReadlineError, DefaultEditor};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::io::{self, IsTerminal, Read};

/// Simplifies, compares and solves LaTeX-like equations step by step.
#[derive(Parser)]
#[command(name = "eqn")]
#[command(version)]
struct Args {
    /// The equation to work on. Without it, equations are read from stdin, or from a prompt when
    /// stdin is a terminal.
    equation: Option<String>,

    /// The number of decimal places numbers are displayed with.
    #[arg(short, long, default_value_t = Config::default().decimals)]
    decimals: usize,

    /// The most rewrite cycles run before giving up.
    #[arg(long, default_value_t = Config::default().max_cycles)]
    max_cycles: usize,

    /// The most verbose level of log messages to print.
    #[arg(long, default_value = "warn")]
    log_level: LevelFilter,
}

/// Parses the equation and prints its steps, or the error that stopped it from being parsed.
fn run(input: &str, config: Config) {
    let input = input.trim();
    match Equation::parse(input) {
        Ok(equation) => print_steps(&equation.with_config(config)),
        Err(err) => report(&err, input),
    }
}

fn print_steps(equation: &Equation) {
    for step in equation.steps() {
        println!("{}", step);
        let message = step.message();
        if !message.is_empty() {
            println!("    {}", message);
        }
    }
}

fn report(err: &Error, input: &str) {
    if let Err(io_err) = err.report_to_stderr("input", input) {
        eprintln!("{} ({})", err, io_err);
    }
}

fn main() {
    let args = Args::parse();
    if TermLogger::init(args.log_level, simplelog::Config::default(), TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        eprintln!("could not install the logger");
    }

    let config = Config { max_cycles: args.max_cycles, decimals: args.decimals };

    if let Some(input) = args.equation {
        run(&input, config);
    } else if !io::stdin().is_terminal() {
        // one equation per line
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("{}", err);
            return;
        }

        for line in input.lines().filter(|line| !line.trim().is_empty()) {
            run(line, config);
        }
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("{}", err);
                return;
            },
        };

        fn process_line(rl: &mut DefaultEditor, config: Config) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            run(&input, config);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, config) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}
