use crate::{lexer::prelude::{Spanned, Token}, utils::prelude::SrcSpan};
use super::error::{ParseError, ParseErrorType};
use super::ast::{Expression, Identifier, Program, Statement};

pub trait Parse
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

pub trait InfixParse
    where Self: Sized,
{
    fn parse(
        parser: &mut Parser,
        left: Expression,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError>;
}

/// Deepest nesting of blocks, parentheses, unary minus and operator chains
/// the parser accepts. Anything beyond is reported instead of overflowing the
/// stack of the parser or of whatever walks the tree afterwards.
pub const MAX_NESTING: usize = 256;

/// Recursive-descent parser over an already lexed token stream.
///
/// Newlines carry no meaning in the grammar and are dropped on construction.
/// The stream always ends with a single `Eof`, so `current_token` never runs
/// off the end.
pub struct Parser {
    tokens: Vec<Spanned>,
    current: usize,
    loop_depth: usize,
    nesting: usize,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(input: impl IntoIterator<Item = Spanned>) -> Self {
        let mut tokens = input.into_iter()
            .filter(|spanned| spanned.token != Token::Newline)
            .collect::<Vec<_>>();

        if !matches!(tokens.last(), Some(Spanned { token: Token::Eof, .. })) {
            let location = tokens.last()
                .map(|last| SrcSpan::from(last.location.end, last.location.end, last.location.line, last.location.col))
                .unwrap_or(SrcSpan::from(0, 0, 1, 1));

            tokens.push(Spanned::new(Token::Eof, "", location));
        }

        Self {
            tokens,
            current: 0,
            loop_depth: 0,
            nesting: 0,
            errors: vec![],
        }
    }

    pub fn current_token(&self) -> &Spanned {
        let last = self.tokens.len() - 1;

        &self.tokens[self.current.min(last)]
    }

    pub fn check(&self, token: &Token) -> bool {
        self.current_token().token == *token
    }

    pub fn is_at_end(&self) -> bool {
        self.check(&Token::Eof)
    }

    pub fn step(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    pub fn next_token(&mut self) -> Spanned {
        let token = self.current_token().clone();
        self.step();

        token
    }

    pub fn current_precedence(&self) -> Precedence {
        Precedence::from(&self.current_token().token)
    }

    pub fn in_loop(&self) -> bool {
        self.loop_depth > 0
    }

    pub fn enter_loop(&mut self) {
        self.loop_depth += 1;
    }

    pub fn exit_loop(&mut self) {
        self.loop_depth = self.loop_depth.saturating_sub(1);
    }

    pub fn nesting(&self) -> usize {
        self.nesting
    }

    /// Goes one level deeper, failing at `location` once [`MAX_NESTING`] is passed.
    pub fn nest(&mut self, location: SrcSpan) -> Result<(), ParseError> {
        if self.nesting >= MAX_NESTING {
            return parse_error(ParseErrorType::NestingTooDeep { limit: MAX_NESTING }, location);
        }

        self.nesting += 1;

        Ok(())
    }

    pub fn restore_nesting(&mut self, nesting: usize) {
        self.nesting = nesting;
    }

    /// Parses the whole stream. Fails with the first error met; the rest are
    /// available through [`Parser::diagnostics`].
    pub fn parse(&mut self) -> Result<Program, ParseError> {
        self.current = 0;
        self.loop_depth = 0;
        self.nesting = 0;
        self.errors.clear();

        match Program::parse(self, None) {
            Ok(program) if self.errors.is_empty() => Ok(program),
            Ok(_) => Err(self.errors[0].clone()),
            Err(err) => {
                self.errors.push(err);
                Err(self.errors[0].clone())
            }
        }
    }

    /// Every error recorded by the last call to [`Parser::parse`], in source order.
    pub fn diagnostics(&self) -> &[ParseError] {
        &self.errors
    }

    /// Parses one statement. On failure the error is recorded and the stream
    /// is skipped forward to the next place a statement may begin.
    pub fn parse_statement(&mut self) -> Option<Statement> {
        let start = self.current;

        match Statement::parse(self, None) {
            Ok(statement) => Some(statement),
            Err(err) => {
                self.errors.push(err);
                self.synchronize(start);

                None
            }
        }
    }

    fn synchronize(&mut self, start: usize) {
        if self.current == start {
            self.step();
        }

        while !self.is_at_end() {
            let token = &self.current_token().token;

            if token.starts_statement() || matches!(token, Token::RBrace | Token::AavjoBhai) {
                return;
            }

            self.step();
        }
    }

    pub fn expect_one(&mut self, token: Token, after: &'static str) -> Result<Spanned, ParseError> {
        if self.check(&token) {
            return Ok(self.next_token());
        }

        parse_error(
            ParseErrorType::ExpectedToken { expected: token, after },
            self.current_token().location
        )
    }

    pub fn expect_ident(&mut self) -> Result<Identifier, ParseError> {
        let Spanned { token, location, .. } = self.current_token().clone();

        match token {
            Token::Ident(name) => {
                self.step();
                Ok(Identifier { name, location })
            },
            token => {
                let reserved = token.is_reserved_word().then_some(token);

                parse_error(ParseErrorType::ExpectedIdent { reserved }, location)
            }
        }
    }
}

/// Binding strength of binary operators, weakest first. Unary minus binds
/// tighter than any of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix
}

impl From<&Token> for Precedence {
    fn from(value: &Token) -> Self {
        match value {
            Token::EqualEqual | Token::NotEqual => Self::Equals,
            Token::Less | Token::Greater |
            Token::LessEqual | Token::GreaterEqual => Self::LessGreater,
            Token::Plus | Token::Minus => Self::Sum,
            Token::Star | Token::Slash | Token::Percent => Self::Product,
            _ => Self::Lowest,
        }
    }
}

pub fn parse_tokens(tokens: Vec<Spanned>) -> Result<Program, ParseError> {
    Parser::new(tokens).parse()
}

pub fn parse_error<T>(error: ParseErrorType, location: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, location })
}
