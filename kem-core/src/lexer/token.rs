use crate::utils::prelude::SrcSpan;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    // <буква>|_ {<буква>|<цифра>|_}
    Ident(String),
    // {/ <цифра> /}
    Int(i64),
    // " ... " with \n \t \" \\ escapes, already decoded
    Str(String),

    // Многословные ключевые слова
    KemBhai, // kem bhai
    AavjoBhai, // aavjo bhai
    BhaiBol, // bhai bol
    BapuTameBolo, // bapu tame bolo
    BhaiChhe, // bhai chhe
    BhaiNathi, // bhai nathi
    JyaSudhi, // jya sudhi
    TameJao, // tame jao
    AagalVado, // aagal vado
    NahiTo, // nahi to

    // Ключевые слова
    Aa, // aa
    Che, // che
    Jo, // jo
    Nahi, // nahi
    To, // to
    Farvu, // farvu

    // Операции
    Plus, // +
    Minus, // -
    Star, // *
    Slash, // /
    Percent, // %
    EqualEqual, // ==
    NotEqual, // !=
    Less, // <
    LessEqual, // <=
    Greater, // >
    GreaterEqual, // >=

    // Разделители
    LParen, // (
    RParen, // )
    LBrace, // {
    RBrace, // }

    Newline, // перевод строки
    Eof,
}

impl Token {
    pub fn is_reserved_word(&self) -> bool {
        matches!(self,
            Token::KemBhai
            | Token::AavjoBhai
            | Token::BhaiBol
            | Token::BapuTameBolo
            | Token::BhaiChhe
            | Token::BhaiNathi
            | Token::JyaSudhi
            | Token::TameJao
            | Token::AagalVado
            | Token::NahiTo
            | Token::Aa
            | Token::Che
            | Token::Jo
            | Token::Nahi
            | Token::To
            | Token::Farvu
        )
    }

    /// Tokens panic-mode recovery may resume at.
    pub fn starts_statement(&self) -> bool {
        matches!(self,
            Token::BhaiBol
            | Token::Aa
            | Token::Jo
            | Token::Farvu
            | Token::TameJao
            | Token::AagalVado
        )
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Ident(value) => value.clone(),
            Token::Int(value) => value.to_string(),
            Token::Str(value) => format!("{value:?}"),

            Token::KemBhai => "kem bhai".to_string(),
            Token::AavjoBhai => "aavjo bhai".to_string(),
            Token::BhaiBol => "bhai bol".to_string(),
            Token::BapuTameBolo => "bapu tame bolo".to_string(),
            Token::BhaiChhe => "bhai chhe".to_string(),
            Token::BhaiNathi => "bhai nathi".to_string(),
            Token::JyaSudhi => "jya sudhi".to_string(),
            Token::TameJao => "tame jao".to_string(),
            Token::AagalVado => "aagal vado".to_string(),
            Token::NahiTo => "nahi to".to_string(),

            Token::Aa => "aa".to_string(),
            Token::Che => "che".to_string(),
            Token::Jo => "jo".to_string(),
            Token::Nahi => "nahi".to_string(),
            Token::To => "to".to_string(),
            Token::Farvu => "farvu".to_string(),

            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Percent => "%".to_string(),
            Token::EqualEqual => "==".to_string(),
            Token::NotEqual => "!=".to_string(),
            Token::Less => "<".to_string(),
            Token::LessEqual => "<=".to_string(),
            Token::Greater => ">".to_string(),
            Token::GreaterEqual => ">=".to_string(),

            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::LBrace => "{".to_string(),
            Token::RBrace => "}".to_string(),

            Token::Newline => "\n".to_string(),
            Token::Eof => "\0".to_string(),
        }
    }

    /// Kind tag shown by token listings.
    pub fn name(&self) -> &'static str {
        match self {
            Token::Ident(_) => "IDENTIFIER",
            Token::Int(_) => "INTEGER",
            Token::Str(_) => "STRING",
            Token::KemBhai => "KEM_BHAI",
            Token::AavjoBhai => "AAVJO_BHAI",
            Token::BhaiBol => "BHAI_BOL",
            Token::BapuTameBolo => "BAPU_TAME_BOLO",
            Token::BhaiChhe => "BHAI_CHHE",
            Token::BhaiNathi => "BHAI_NATHI",
            Token::JyaSudhi => "JYA_SUDHI",
            Token::TameJao => "TAME_JAO",
            Token::AagalVado => "AAGAL_VADO",
            Token::NahiTo => "ELSE",
            Token::Aa => "AA",
            Token::Che => "CHE",
            Token::Jo => "JO",
            Token::Nahi => "NAHI",
            Token::To => "TO",
            Token::Farvu => "FARVU",
            Token::Plus => "PLUS",
            Token::Minus => "MINUS",
            Token::Star => "MULTIPLY",
            Token::Slash => "DIVIDE",
            Token::Percent => "MODULO",
            Token::EqualEqual => "EQUAL",
            Token::NotEqual => "NOT_EQUAL",
            Token::Less => "LESS",
            Token::LessEqual => "LESS_EQUAL",
            Token::Greater => "GREATER",
            Token::GreaterEqual => "GREATER_EQUAL",
            Token::LParen => "LEFT_PAREN",
            Token::RParen => "RIGHT_PAREN",
            Token::LBrace => "LEFT_BRACE",
            Token::RBrace => "RIGHT_BRACE",
            Token::Newline => "NEWLINE",
            Token::Eof => "EOF",
        }
    }
}

/// A token together with the exact source text it was read from and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub lexeme: String,
    pub location: SrcSpan,
}

impl Spanned {
    pub fn new(token: Token, lexeme: impl Into<String>, location: SrcSpan) -> Self {
        Self {
            token,
            lexeme: lexeme.into(),
            location,
        }
    }
}
