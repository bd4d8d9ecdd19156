mod error;
mod session;

use rustyline::{error::ReadlineError, DefaultEditor};
use session::Session;
use std::{io::{self, BufRead, IsTerminal}, process::ExitCode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Handles one line of input, printing the result or the error.
fn read_eval(input: &str, session: &mut Session) {
    match session.process(input) {
        Ok(lines) => lines.iter().for_each(|line| println!("{}", line)),
        Err(err) => {
            if let Err(io_err) = err.report_to_stderr(input) {
                eprintln!("{}", io_err);
            }
        },
    }
}

/// Reads the optional `[variable] [decimals]` arguments.
fn session_from_args() -> Result<Session, String> {
    let mut args = std::env::args().skip(1);

    let variable = match args.next() {
        Some(arg) => {
            let mut chars = arg.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => return Err(format!("the variable must be a single letter, found `{}`", arg)),
            }
        },
        None => 'x',
    };
    let decimals = match args.next() {
        Some(arg) => arg.parse::<i32>()
            .map_err(|err| format!("invalid precision `{}`: {}", arg, err))?,
        None => 10,
    };

    Session::new(variable, decimals).map_err(|err| err.to_string())
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let mut session = match session_from_args() {
        Ok(session) => session,
        Err(msg) => {
            eprintln!("error: {}", msg);
            eprintln!("usage: deriv [variable] [decimals]");
            return ExitCode::FAILURE;
        },
    };

    if !io::stdin().is_terminal() {
        // read functions from stdin, one per line
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) if line.trim().is_empty() => (),
                Ok(line) => read_eval(&line, &mut session),
                Err(err) => {
                    eprintln!("{}", err);
                    return ExitCode::FAILURE;
                },
            }
        }
        return ExitCode::SUCCESS;
    }

    // run the repl / interactive mode
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        },
    };

    fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        read_eval(&input, session);
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, &mut session) {
            match err {
                ReadlineError::Eof | ReadlineError::Interrupted => (),
                _ => eprintln!("{}", err),
            }
            break;
        }
    }
    ExitCode::SUCCESS
}
