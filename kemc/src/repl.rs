use std::io::Write;

use kem_core::{
    eval::prelude::{Interpreter, StdIO},
    session::parse_program
};

use crate::{cli::{print_error, print_failure}, rppl::with_fences};

const PROMPT: &str = ">>> ";
const CONTINUATION: &str = "... ";

/// Multi-line shell. Lines are collected until a blank one, then run as a
/// single program with a fresh global scope.
pub fn start() -> std::io::Result<()> {
    ctrlc::set_handler(|| {
        println!("\nAavjo bhai!");
        std::process::exit(0);
    })
    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;

    println!("KemLang REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Finish a snippet with an empty line, leave with `.exit` or Ctrl+D.");
    println!("`kem bhai` ... `aavjo bhai` is added when missing.\n");

    let stdin = std::io::stdin();

    loop {
        let mut lines: Vec<String> = vec![];

        loop {
            print!("{}", if lines.is_empty() { PROMPT } else { CONTINUATION });
            std::io::stdout().flush()?;

            let mut input = String::new();

            if stdin.read_line(&mut input)? == 0 {
                if !lines.is_empty() {
                    println!();
                    execute(&lines.join("\n"));
                }

                println!();
                return Ok(());
            }

            let input = input.trim_end_matches(&['\n', '\r'][..]);

            if lines.is_empty() && input.trim() == ".exit" {
                return Ok(());
            }

            if input.trim().is_empty() {
                break;
            }

            lines.push(input.to_string());
        }

        if !lines.is_empty() {
            execute(&lines.join("\n"));
        }
    }
}

fn execute(snippet: &str) {
    let src = with_fences(snippet);

    let code = match parse_program(&src) {
        Ok(program) => {
            let mut io = StdIO;
            Interpreter::new(&mut io).interpret(&program)
        },
        Err(err) => {
            print_error(&err.with_path("<repl>"));
            1
        }
    };

    if code != 0 {
        print_failure("Execution failed");
    }
}
