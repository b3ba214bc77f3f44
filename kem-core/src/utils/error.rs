use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::prelude::RuntimeError,
    lexer::prelude::LexicalError,
    parser::prelude::{ParseError, ParseErrorType},
    utils::prelude::SrcSpan,
};
use super::diagnostic::{render_diagnostic, Diagnostic, Label, Level, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to tokenize source code")]
    Lex {
        path: PathBuf,
        src: String,
        error: LexicalError
    },
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        errors: Vec<ParseError>
    },
    #[error("program failed at runtime")]
    Runtime {
        path: PathBuf,
        src: String,
        error: RuntimeError
    },
    #[error("IO operation failed")]
    StdIo {
        path: Option<PathBuf>,
        err: std::io::ErrorKind
    }
}

impl Error {
    /// Attaches a file path to errors produced from in-memory source.
    pub fn with_path(self, new_path: impl Into<PathBuf>) -> Self {
        let new_path = new_path.into();

        match self {
            Error::Lex { src, error, .. } => Error::Lex { path: new_path, src, error },
            Error::Parse { src, errors, .. } => Error::Parse { path: new_path, src, errors },
            Error::Runtime { src, error, .. } => Error::Runtime { path: new_path, src, error },
            Error::StdIo { err, .. } => Error::StdIo { path: Some(new_path), err },
        }
    }

    /// Error kind label used by plain rendering.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Lex { .. } => "LexerError",
            Error::Parse { .. } => "ParseError",
            Error::Runtime { .. } => "RuntimeError",
            Error::StdIo { .. } => "IOError",
        }
    }

    /// Headline message and 1-based position of the (first) error.
    pub fn position(&self) -> Option<(String, u32, u32)> {
        match self {
            Error::Lex { error, .. } => Some((error.message(), error.line(), error.col())),
            Error::Parse { errors, .. } => errors.first()
                .map(|error| (error.message(), error.line(), error.col())),
            Error::Runtime { error, .. } => Some((error.message(), error.line(), error.col())),
            Error::StdIo { .. } => None,
        }
    }

    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        let _ = self.pretty(&mut nocolor);

        String::from_utf8_lossy(&nocolor.into_inner()).into_owned()
    }

    pub fn pretty(&self, buf: &mut Buffer) -> std::io::Result<()> {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf)?;
            writeln!(buf)?;
        }

        Ok(())
    }

    /// One caret diagnostic per recorded error, without colour or codespan
    /// framing.
    pub fn plain(&self) -> String {
        match self {
            Error::Lex { src, .. } | Error::Runtime { src, .. } => match self.position() {
                Some((message, line, col)) => render_diagnostic(src, line, col, &message, self.kind()),
                None => self.to_string(),
            },
            Error::Parse { src, errors, .. } => errors.iter()
                .map(|error| render_diagnostic(src, error.line(), error.col(), &error.message(), self.kind()))
                .collect::<Vec<_>>()
                .join("\n"),
            Error::StdIo { path: Some(path), err } => {
                format!("{}: {err} ({})", self.kind(), path.display())
            },
            Error::StdIo { path: None, err } => format!("{}: {err}", self.kind()),
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Error::Lex { path, src, error } => {
                let (label, extra) = error.details();

                vec![Diagnostic {
                    title: "Lexical error".into(),
                    text: extra.join("\n"),
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label {
                            text: Some(label),
                            span: error.location,
                        },
                        extra_labels: vec![],
                    }),
                }]
            },
            Error::Parse { path, src, errors } => {
                errors.iter()
                    .map(|error| {
                        let (label, extra) = error.details();

                        let adjusted_location = match error.error {
                            ParseErrorType::UnexpectedEof | ParseErrorType::ExpectedEnd => SrcSpan {
                                start: src.len() as u32,
                                end: src.len() as u32,
                                ..error.location
                            },
                            _ => error.location
                        };

                        Diagnostic {
                            title: "Syntax error".into(),
                            text: extra.join("\n"),
                            level: Level::Error,
                            location: Some(Location {
                                src,
                                path: path.clone(),
                                label: Label {
                                    text: Some(label),
                                    span: adjusted_location,
                                },
                                extra_labels: vec![],
                            }),
                        }
                    })
                    .collect()
            },
            Error::Runtime { path, src, error } => {
                let (label, extra) = error.details();

                vec![Diagnostic {
                    title: "Runtime error".into(),
                    text: extra.join("\n"),
                    level: Level::Error,
                    location: Some(Location {
                        src,
                        path: path.clone(),
                        label: Label {
                            text: Some(label),
                            span: error.location,
                        },
                        extra_labels: vec![],
                    }),
                }]
            },
            Error::StdIo { path, err } => {
                let text = match path {
                    Some(path) => format!("{err} ({})", path.display()),
                    None => format!("{err}"),
                };

                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text,
                    level: Level::Error,
                    location: None,
                }]
            }
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::StdIo { path: None, err: err.kind() }
    }
}
