use std::fmt::Display;

use crate::{lexer::prelude::Token, utils::prelude::SrcSpan};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    ExpectedStart,
    ExpectedEnd,
    ExpectedIdent {
        reserved: Option<Token>,
    },
    ExpectedToken {
        expected: Token,
        after: &'static str,
    },
    LoopControlOutsideLoop {
        keyword: Token,
    },
    UnexpectedToken {
        found: String,
    },
    UnexpectedEof,
    NestingTooDeep {
        limit: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub location: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (String, Vec<String>) {
        match &self.error {
            ParseErrorType::ExpectedStart => (
                "Program must start with 'kem bhai'".into(),
                vec!["Every program is wrapped in `kem bhai` ... `aavjo bhai`".into()]
            ),
            ParseErrorType::ExpectedEnd => (
                "Program must end with 'aavjo bhai'".into(),
                vec![]
            ),
            ParseErrorType::ExpectedIdent { reserved } => (
                "Expected variable name after 'aa'".into(),
                reserved.iter()
                    .map(|keyword| format!("'{}' is a reserved word and can't name a variable", keyword.as_literal()))
                    .collect()
            ),
            ParseErrorType::ExpectedToken { expected, after } => (
                format!("Expected '{}' after {after}", expected.as_literal()),
                vec![]
            ),
            ParseErrorType::LoopControlOutsideLoop { keyword } => (
                format!("'{}' used outside of a loop", keyword.as_literal()),
                vec!["`tame jao` and `aagal vado` only work inside `farvu { ... }`".into()]
            ),
            ParseErrorType::UnexpectedToken { found } => (
                format!("Unexpected token '{found}'"),
                vec![]
            ),
            ParseErrorType::UnexpectedEof => (
                "Unexpected end of input".into(),
                vec![]
            ),
            ParseErrorType::NestingTooDeep { limit } => (
                format!("Nesting is deeper than {limit} levels"),
                vec!["Split the expression or block into smaller pieces".into()]
            ),
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

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ParseError {}
