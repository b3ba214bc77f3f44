use std::fmt::Display;

use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnexpectedCharacter { ch: char },
    UnterminatedString,
    UnknownEscape { ch: char },
    IntegerTooLarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn details(&self) -> (String, Vec<String>) {
        match self.error {
            LexicalErrorType::UnexpectedCharacter { ch: '=' } => {
                ("Unexpected character '='".into(), vec!["Use `che` to bind a value, `==` to compare".into()])
            },
            LexicalErrorType::UnexpectedCharacter { ch: '!' } => {
                ("Unexpected character '!'".into(), vec!["Only `!=` is supported".into()])
            },
            LexicalErrorType::UnexpectedCharacter { ch } => {
                (format!("Unexpected character '{ch}'"), vec![])
            },
            LexicalErrorType::UnterminatedString => {
                ("Unterminated string".into(), vec![])
            },
            LexicalErrorType::UnknownEscape { ch } => {
                (format!("Unknown escape sequence '\\{ch}'"), vec!["Supported escapes: \\n \\t \\\" \\\\".into()])
            },
            LexicalErrorType::IntegerTooLarge => {
                ("Integer literal is too large".into(), vec![format!("The largest integer is {}", i64::MAX)])
            },
        }
    }

    pub fn message(&self) -> String {
        self.details().0
    }

    pub fn line(&self) -> u32 {
        self.location.line
    }

    pub fn col(&self) -> u32 {
        self.location.col
    }
}

impl Display for LexicalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for LexicalError {}
