mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::path::{Path, PathBuf};

use clap::Parser;
use cli::{
    print_error, print_failure, print_finished, print_formatted, print_running,
    print_unchanged, print_warning, print_would_format
};
use kem_core::{
    eval::prelude::{Interpreter, StdIO},
    fmt::format_source,
    lexer::prelude::Spanned,
    session::{parse_program, read_source, tokenize},
    utils::prelude::Error
};
use walkdir::WalkDir;

const SOURCE_EXTENSION: &str = "jsk";
const TRACED_TOKENS: usize = 20;

#[derive(Parser)]
#[command(name = "kemc", version, about = "KemLang, a Gujarati-flavoured scripting language")]
enum Command {
    /// Runs a KemLang program
    Run {
        /// Path of source file
        path: PathBuf,
        /// Print tokens and the syntax tree before running
        #[arg(long, default_value_t = false)]
        trace: bool,
    },
    /// Prints every token of a source file
    Tokens {
        /// Path of source file
        path: PathBuf,
    },
    /// Prints the syntax tree of a source file
    Ast {
        /// Path of source file
        path: PathBuf,
    },
    /// Formats a source file, or every `.jsk` file under a directory
    Fmt {
        /// File or directory to format
        path: PathBuf,
        /// Only report files that would change, exit with 1 if any would
        #[arg(long, default_value_t = false)]
        check: bool,
    },
    /// Starts the interactive KemLang shell
    Repl,
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl
}

fn main() {
    let code = match Command::parse() {
        Command::Run { path, trace } => run(&path, trace),
        Command::Tokens { path } => tokens(&path),
        Command::Ast { path } => ast(&path),
        Command::Fmt { path, check } => fmt(&path, check),
        Command::Repl => exit_code(repl::start()),
        Command::Rlpl => exit_code(rlpl::start()),
        Command::Rppl => exit_code(rppl::start()),
    };

    std::process::exit(code);
}

fn exit_code(result: std::io::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            print_error(&Error::from(err));
            1
        }
    }
}

fn read(path: &Path) -> Result<String, i32> {
    read_source(path).map_err(|err| {
        print_error(&err);
        1
    })
}

fn print_token(spanned: &Spanned) {
    let lexeme = format!("{:?}", spanned.lexeme);

    println!(
        "  {:15} {:15} {}",
        spanned.token.name(), lexeme, spanned.location
    );
}

fn run(path: &Path, trace: bool) -> i32 {
    if path.extension().and_then(|ext| ext.to_str()) != Some(SOURCE_EXTENSION) {
        print_warning(&format!("'{}' doesn't have the .{SOURCE_EXTENSION} extension", path.display()));
    }

    let src = match read(path) {
        Ok(src) => src,
        Err(code) => return code,
    };

    if trace {
        if let Err(err) = print_trace(&src) {
            print_error(&err.with_path(path));
            return 1;
        }
    }

    print_running(path);
    let start = std::time::Instant::now();

    let program = match parse_program(&src) {
        Ok(program) => program,
        Err(err) => {
            print_error(&err.with_path(path));
            return 1;
        }
    };

    let mut io = StdIO;
    let code = Interpreter::new(&mut io).interpret(&program);

    match code {
        0 => print_finished(std::time::Instant::now() - start),
        _ => print_failure(&path.display().to_string()),
    }

    code
}

fn print_trace(src: &str) -> Result<(), Error> {
    let tokens = tokenize(src).map_err(|error| Error::Lex {
        path: PathBuf::new(),
        src: src.to_string(),
        error
    })?;

    println!("Tokens:");
    tokens.iter().take(TRACED_TOKENS).for_each(print_token);

    if tokens.len() > TRACED_TOKENS {
        println!("  ... and {} more tokens", tokens.len() - TRACED_TOKENS);
    }

    println!("\nAST:");
    println!("{:#?}\n", parse_program(src)?);

    Ok(())
}

fn tokens(path: &Path) -> i32 {
    let src = match read(path) {
        Ok(src) => src,
        Err(code) => return code,
    };

    match tokenize(&src) {
        Ok(tokens) => {
            println!("Tokens for {}:", path.display());
            tokens.iter().for_each(print_token);

            0
        },
        Err(error) => {
            print_error(&Error::Lex { path: path.to_path_buf(), src, error });

            1
        }
    }
}

fn ast(path: &Path) -> i32 {
    let src = match read(path) {
        Ok(src) => src,
        Err(code) => return code,
    };

    match parse_program(&src) {
        Ok(program) => {
            println!("AST for {}:", path.display());
            println!("{program:#?}");

            0
        },
        Err(err) => {
            print_error(&err.with_path(path));

            1
        }
    }
}

fn fmt(path: &Path, check: bool) -> i32 {
    let files = if path.is_file() {
        vec![path.to_path_buf()]
    } else if path.is_dir() {
        match collect_sources(path) {
            Ok(files) => files,
            Err(err) => {
                print_error(&Error::from(err).with_path(path));
                return 1;
            }
        }
    } else {
        print_failure(&format!("'{}' is not a file or directory", path.display()));
        return 1;
    };

    if files.is_empty() {
        print_warning(&format!("No .{SOURCE_EXTENSION} files found"));
        return 0;
    }

    let mut changed = 0;

    for file in files.iter() {
        let original = match read(file) {
            Ok(src) => src,
            Err(code) => return code,
        };

        let formatted = match format_source(&original) {
            Ok(formatted) => formatted,
            Err(err) => {
                print_error(&err.with_path(file));
                return 1;
            }
        };

        if original == formatted {
            if !check {
                print_unchanged(file);
            }

            continue;
        }

        changed += 1;

        if check {
            print_would_format(file);
            continue;
        }

        if let Err(err) = std::fs::write(file, formatted) {
            print_error(&Error::from(err).with_path(file));
            return 1;
        }

        print_formatted(file);
    }

    if check && changed > 0 {
        print_failure(&format!("{changed} file(s) need formatting"));
        return 1;
    }

    0
}

/// Every `.jsk` file below `dir`, sorted. Symlinked directories are not
/// followed.
fn collect_sources(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = vec![];

    for entry in WalkDir::new(dir) {
        let entry = entry?;

        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
        {
            files.push(entry.into_path());
        }
    }

    files.sort();

    Ok(files)
}
