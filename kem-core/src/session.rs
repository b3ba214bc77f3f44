use std::path::{Path, PathBuf};

use utf8_chars::BufReadCharsExt;

use crate::{
    eval::prelude::{Interpreter, InterpreterIO},
    parser::prelude::{Parser, Program},
    utils::prelude::Error
};

pub use crate::lexer::prelude::tokenize;

pub fn parse_program(src: &str) -> Result<Program, Error> {
    let tokens = tokenize(src).map_err(|error| Error::Lex {
        path: PathBuf::new(),
        src: src.to_string(),
        error
    })?;

    let mut parser = Parser::new(tokens);

    match parser.parse() {
        Ok(program) => Ok(program),
        Err(error) => {
            let mut errors = parser.diagnostics().to_vec();

            if errors.is_empty() {
                errors.push(error);
            }

            Err(Error::Parse {
                path: PathBuf::new(),
                src: src.to_string(),
                errors
            })
        }
    }
}

/// Parses and runs `src`, keeping every failure as an [`Error`].
pub fn execute_source(src: &str, io: &mut dyn InterpreterIO) -> Result<(), Error> {
    let program = parse_program(src)?;

    Interpreter::new(io).execute(&program).map_err(|error| Error::Runtime {
        path: PathBuf::new(),
        src: src.to_string(),
        error
    })
}

/// Parses and runs `src`, reporting any failure through `io`. Returns the
/// exit status: 0 on success, 1 otherwise.
pub fn run_source(src: &str, io: &mut dyn InterpreterIO) -> i32 {
    let program = match parse_program(src) {
        Ok(program) => program,
        Err(err) => {
            let message = err.position()
                .map(|(message, _, _)| message)
                .unwrap_or_else(|| err.to_string());

            let report = format!("Error: {message}");

            if io.write_line(&report).is_err() {
                eprintln!("{report}");
            }

            return 1;
        }
    };

    Interpreter::new(io).interpret(&program)
}

/// Reads a whole source file as a UTF-8 character stream.
pub fn read_source(path: &Path) -> Result<String, Error> {
    let file = std::fs::File::open(path)
        .map_err(|err| Error::from(err).with_path(path))?;

    let file_size = file.metadata()
        .map_err(|err| Error::from(err).with_path(path))?
        .len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut reader = std::io::BufReader::new(file);

    for ch in reader.chars() {
        src.push(ch.map_err(|err| Error::from(err).with_path(path))?);
    }

    Ok(src)
}
