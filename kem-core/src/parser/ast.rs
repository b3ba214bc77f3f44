use crate::{
    lexer::prelude::{Spanned, Token},
    parser::prelude::{parse_error, InfixParse, Parse, ParseError, ParseErrorType, Parser, Precedence},
    utils::prelude::SrcSpan
};

// program -> kem bhai { <statement> } aavjo bhai
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl Parse for Program {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let start = parser.current_token().location;

        if !parser.check(&Token::KemBhai) {
            return parse_error(ParseErrorType::ExpectedStart, start);
        }

        parser.step();

        let mut statements = vec![];

        while !parser.check(&Token::AavjoBhai) && !parser.is_at_end() {
            if let Some(statement) = parser.parse_statement() {
                statements.push(statement);
            }
        }

        let end = parser.current_token().location;

        if !parser.check(&Token::AavjoBhai) {
            return parse_error(ParseErrorType::ExpectedEnd, end);
        }

        parser.step();

        Ok(Self {
            statements,
            location: start.to(end)
        })
    }
}

// statement -> <print> | <declaration> | <assignment> | <if> | <while> | tame jao | aagal vado | <block>
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Print(Print),
    Declaration(Declaration),
    Assignment(Assignment),
    If(Conditional),
    While(DoWhile),
    Break {
        location: SrcSpan
    },
    Continue {
        location: SrcSpan
    },
    Block(Block),
}

impl Parse for Statement {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let Spanned { token, lexeme, location } = parser.current_token().clone();

        let statement = match token {
            Token::BhaiBol => Self::Print(Print::parse(parser, None)?),
            Token::Aa => Self::Declaration(Declaration::parse(parser, None)?),
            Token::Jo => Self::If(Conditional::parse(parser, None)?),
            Token::Farvu => Self::While(DoWhile::parse(parser, None)?),
            Token::TameJao | Token::AagalVado => {
                if !parser.in_loop() {
                    return parse_error(
                        ParseErrorType::LoopControlOutsideLoop { keyword: token },
                        location
                    );
                }

                parser.step();

                match token {
                    Token::TameJao => Self::Break { location },
                    _ => Self::Continue { location },
                }
            },
            Token::LBrace => Self::Block(Block::parse(parser, None)?),
            Token::Ident(_) => Self::Assignment(Assignment::parse(parser, None)?),
            Token::Eof => return parse_error(ParseErrorType::UnexpectedEof, location),
            _ => return parse_error(
                ParseErrorType::UnexpectedToken { found: lexeme },
                location
            )
        };

        Ok(statement)
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Print(print) => print.location,
            Self::Declaration(declaration) => declaration.location,
            Self::Assignment(assignment) => assignment.location,
            Self::If(conditional) => conditional.location,
            Self::While(loop_) => loop_.location,
            Self::Break { location } | Self::Continue { location } => *location,
            Self::Block(block) => block.location,
        }
    }
}

// print -> bhai bol <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Print {
    pub expression: Expression,
    pub location: SrcSpan
}

impl Parse for Print {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let start = parser.next_token().location;
        let expression = Expression::parse(parser, None)?;

        Ok(Self {
            location: start.to(expression.location()),
            expression
        })
    }
}

// declaration -> aa <identifier> che <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub identifier: Identifier,
    pub initializer: Expression,
    pub location: SrcSpan
}

impl Parse for Declaration {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let start = parser.next_token().location;
        let identifier = parser.expect_ident()?;

        parser.expect_one(Token::Che, "variable name")?;

        let initializer = Expression::parse(parser, None)?;

        Ok(Self {
            identifier,
            location: start.to(initializer.location()),
            initializer
        })
    }
}

// assignment -> <identifier> che <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub identifier: Identifier,
    pub value: Expression,
    pub location: SrcSpan
}

impl Parse for Assignment {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let identifier = parser.expect_ident()?;

        parser.expect_one(Token::Che, "variable name")?;

        let value = Expression::parse(parser, None)?;

        Ok(Self {
            location: identifier.location.to(value.location()),
            identifier,
            value
        })
    }
}

// if -> jo <expression> <block> [nahi to <block>]
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional {
    pub condition: Expression,
    pub resolution: Block,
    pub alternative: Option<Block>,
    pub location: SrcSpan
}

impl Parse for Conditional {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let start = parser.next_token().location;

        let condition = Expression::parse(parser, None)?;
        let resolution = Block::parse_after(parser, "if condition")?;

        let alternative = match parser.check(&Token::NahiTo) {
            true => {
                parser.step();
                Some(Block::parse_after(parser, "'nahi to'")?)
            },
            false => None
        };

        let end = alternative.as_ref()
            .map(|block| block.location)
            .unwrap_or(resolution.location);

        Ok(Self {
            condition,
            resolution,
            alternative,
            location: start.to(end)
        })
    }
}

// while -> farvu <block> jya sudhi <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct DoWhile {
    pub body: Block,
    pub condition: Expression,
    pub location: SrcSpan
}

impl Parse for DoWhile {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let start = parser.next_token().location;

        parser.enter_loop();
        let body = Block::parse_after(parser, "'farvu'");
        parser.exit_loop();
        let body = body?;

        parser.expect_one(Token::JyaSudhi, "while body")?;

        let condition = Expression::parse(parser, None)?;

        Ok(Self {
            body,
            location: start.to(condition.location()),
            condition
        })
    }
}

// block -> { { <statement> } }
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl Parse for Block {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Result<Self, ParseError> {
        Self::parse_after(parser, "statement start")
    }
}

impl Block {
    /// Parses a braced block; `after` names what the `{` must follow.
    pub fn parse_after(parser: &mut Parser, after: &'static str) -> Result<Self, ParseError> {
        let nesting = parser.nesting();
        let block = Self::parse_nested(parser, after);
        parser.restore_nesting(nesting);

        block
    }

    fn parse_nested(parser: &mut Parser, after: &'static str) -> Result<Self, ParseError> {
        let location = parser.current_token().location;
        parser.nest(location)?;

        let open = parser.expect_one(Token::LBrace, after)?;

        let mut statements = vec![];

        while !parser.check(&Token::RBrace)
            && !parser.check(&Token::AavjoBhai)
            && !parser.is_at_end()
        {
            if let Some(statement) = parser.parse_statement() {
                statements.push(statement);
            }
        }

        let close = parser.expect_one(Token::RBrace, "block")?;

        Ok(Self {
            statements,
            location: open.location.to(close.location)
        })
    }
}

// expression -> <binary> | <unary> | <literal> | <identifier> | bapu tame bolo | "(" <expression> ")"
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Binary(Binary),
    Unary(Unary),
    Literal(Literal),
    Variable(Identifier),
    Input {
        location: SrcSpan
    },
}

impl Parse for Expression {
    fn parse(parser: &mut Parser, precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let nesting = parser.nesting();
        let expression = Self::parse_nested(parser, precedence);
        parser.restore_nesting(nesting);

        expression
    }
}

impl Expression {
    fn parse_nested(parser: &mut Parser, precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let Spanned { token, lexeme, location } = parser.current_token().clone();

        parser.nest(location)?;

        let mut expr = match token {
            Token::Ident(name) => {
                parser.step();

                Self::Variable(Identifier { name, location })
            },
            Token::Minus => Self::Unary(Unary::parse(parser, None)?),
            Token::Int(_)
            | Token::Str(_)
            | Token::BhaiChhe
            | Token::BhaiNathi => Self::Literal(Literal::parse(parser, None)?),
            Token::BapuTameBolo => {
                parser.step();

                Self::Input { location }
            },
            Token::LParen => {
                parser.step();

                let expression = Expression::parse(parser, None)?;

                parser.expect_one(Token::RParen, "expression")?;

                expression
            },
            Token::Eof => return parse_error(ParseErrorType::UnexpectedEof, location),
            _ => return parse_error(
                ParseErrorType::UnexpectedToken { found: lexeme },
                location
            )
        };

        // every link of a chain deepens the left spine by one
        while precedence.unwrap_or(Precedence::Lowest) < parser.current_precedence() {
            let location = parser.current_token().location;
            parser.nest(location)?;
            expr = Self::Binary(Binary::parse(parser, expr, precedence)?);
        }

        Ok(expr)
    }

    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Binary(binary) => binary.location,
            Self::Unary(unary) => unary.location,
            Self::Literal(literal) => literal.location(),
            Self::Variable(identifier) => identifier.location,
            Self::Input { location } => *location,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub location: SrcSpan
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl BinaryOperator {
    pub fn from_token(token: &Token) -> Option<Self> {
        Some(match token {
            Token::Plus => Self::Add,
            Token::Minus => Self::Subtract,
            Token::Star => Self::Multiply,
            Token::Slash => Self::Divide,
            Token::Percent => Self::Modulo,
            Token::EqualEqual => Self::Equal,
            Token::NotEqual => Self::NotEqual,
            Token::Less => Self::Less,
            Token::LessEqual => Self::LessEqual,
            Token::Greater => Self::Greater,
            Token::GreaterEqual => Self::GreaterEqual,
            _ => return None
        })
    }

    pub fn as_literal(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        }
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Multiply | Self::Divide | Self::Modulo => Precedence::Product,
            Self::Add | Self::Subtract => Precedence::Sum,
            Self::Less | Self::LessEqual | Self::Greater | Self::GreaterEqual => Precedence::LessGreater,
            Self::Equal | Self::NotEqual => Precedence::Equals,
        }
    }
}

// binary -> <expression> <operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
    pub operator_location: SrcSpan,
    pub location: SrcSpan
}

impl InfixParse for Binary {
    fn parse(
        parser: &mut Parser,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let precedence = parser.current_precedence();
        let Spanned { token, lexeme, location } = parser.next_token();

        let operator = match BinaryOperator::from_token(&token) {
            Some(operator) => operator,
            None => return parse_error(
                ParseErrorType::UnexpectedToken { found: lexeme },
                location
            )
        };

        let right = Expression::parse(parser, Some(precedence))?;

        Ok(Self {
            location: left.location().to(right.location()),
            left: Box::new(left),
            operator,
            right: Box::new(right),
            operator_location: location
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Negate,
}

impl UnaryOperator {
    pub fn as_literal(&self) -> &'static str {
        match self {
            Self::Negate => "-",
        }
    }
}

// unary -> - <unary>
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub operator: UnaryOperator,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl Parse for Unary {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let Spanned { token, lexeme, location } = parser.next_token();

        let operator = match token {
            Token::Minus => UnaryOperator::Negate,
            _ => return parse_error(
                ParseErrorType::UnexpectedToken { found: lexeme },
                location
            )
        };

        let right = Expression::parse(parser, Some(Precedence::Prefix))?;

        Ok(Self {
            operator,
            location: location.to(right.location()),
            right: Box::new(right)
        })
    }
}

// literal -> <string> | <int> | bhai chhe | bhai nathi
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int {
        value: i64,
        location: SrcSpan
    },
    Str {
        value: String,
        location: SrcSpan
    },
    Bool {
        value: bool,
        location: SrcSpan
    }
}

impl Parse for Literal {
    fn parse(parser: &mut Parser, _precedence: Option<Precedence>) -> Result<Self, ParseError> {
        let Spanned { token, lexeme, location } = parser.next_token();

        match token {
            Token::Int(value) => Ok(Self::Int { value, location }),
            Token::Str(value) => Ok(Self::Str { value, location }),
            Token::BhaiChhe => Ok(Self::Bool { value: true, location }),
            Token::BhaiNathi => Ok(Self::Bool { value: false, location }),
            Token::Eof => parse_error(ParseErrorType::UnexpectedEof, location),
            _ => parse_error(
                ParseErrorType::UnexpectedToken { found: lexeme },
                location
            )
        }
    }
}

impl Literal {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Int { location, .. }
            | Self::Str { location, .. }
            | Self::Bool { location, .. } => *location
        }
    }
}
