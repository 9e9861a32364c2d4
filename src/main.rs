//! `bash-std`: resolve a bash script's arguments against the option specification on stdin.
//!
//! ```console
//! eval "$(bash-std "$@" <<< "$OPTIONS")"
//! ```

use std::env;
use std::io::{self, Read};
use std::path::Path;
use std::process;

use bash_std::{evaluate, CliError, Evaluation, Settings, ShellInterface};

const PROGRAM: &str = "bash-std";

fn main() {
    #[cfg(feature = "tracing_debug")]
    bash_std::logger::init_logger();

    let mut args = env::args();
    let program = args
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| PROGRAM.to_string());
    let tokens: Vec<String> = args.collect();

    match run(&program, &tokens) {
        Ok(evaluation) => {
            for line in evaluation.script() {
                println!("{line}");
            }

            process::exit(evaluation.exit_code());
        }
        Err(error) => {
            eprintln!("{error}");
            println!("{}", Evaluation::Exit(error.exit_code()).script().join("\n"));
            process::exit(error.exit_code());
        }
    }
}

fn run(program: &str, tokens: &[String]) -> Result<Evaluation, CliError> {
    let mut spec_text = String::default();
    io::stdin().read_to_string(&mut spec_text)?;
    let settings = Settings::from_env();

    evaluate(
        &spec_text,
        tokens
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .as_slice(),
        &settings,
        program,
        Box::new(ShellInterface::default()),
    )
}
