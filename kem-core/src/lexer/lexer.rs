use super::error::{LexicalError, LexicalErrorType};
use super::token::{Spanned, Token};
use std::fmt::Display;
use crate::utils::prelude::SrcSpan;

pub type LexResult = std::result::Result<Spanned, LexicalError>;

/// Multi-word keywords, longest first, so a keyword is never shadowed by one
/// of its own prefixes.
pub static MULTIWORD_KEYWORDS: [(&str, Token); 10] = [
	("bapu tame bolo", Token::BapuTameBolo),
	("aavjo bhai", Token::AavjoBhai),
	("bhai nathi", Token::BhaiNathi),
	("aagal vado", Token::AagalVado),
	("bhai chhe", Token::BhaiChhe),
	("jya sudhi", Token::JyaSudhi),
	("kem bhai", Token::KemBhai),
	("bhai bol", Token::BhaiBol),
	("tame jao", Token::TameJao),
	("nahi to", Token::NahiTo),
];

pub fn str_to_keyword(word: &str) -> Option<Token> {
	Some(match word {
		"aa" => Token::Aa,
		"che" => Token::Che,
		"jo" => Token::Jo,
		"nahi" => Token::Nahi,
		"to" => Token::To,
		"farvu" => Token::Farvu,

		_ => return None
	})
}

pub fn is_ident_start(ch: char) -> bool {
	ch.is_alphabetic() || ch == '_'
}

pub fn is_ident_continue(ch: char) -> bool {
	ch.is_alphanumeric() || ch == '_'
}

/// Byte offset, line and column of the character under the cursor.
#[derive(Debug, Clone, Copy)]
struct Mark {
	position: usize,
	line: u32,
	col: u32,
}

#[derive(Debug)]
pub struct Lexer<'a> {
	src: &'a str,
	position: usize,
	line: u32,
	col: u32,
	finished: bool,
}

impl<'a> Display for Lexer<'a> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tline: {}, col: {},\n\tch: {:?}, next_ch: {:?}\n}}",
			self.position, self.line, self.col, self.ch(), self.next_ch()
		)
	}
}

impl<'a> Lexer<'a> {
	pub fn new(src: &'a str) -> Self {
		Self {
			src,
			position: 0,
			line: 1,
			col: 1,
			finished: false,
		}
	}

	pub fn next_token(&mut self) -> LexResult {
		loop {
			let ch = match self.ch() {
				Some(ch) => ch,
				None => return Ok(self.eat_nothing(Token::Eof)),
			};

			let spanned = match ch {
				' ' | '\t' | '\r' => {
					self.next_char();
					continue;
				},
				'\n' => self.eat_one_char(Token::Newline),
				'(' => self.eat_one_char(Token::LParen),
				')' => self.eat_one_char(Token::RParen),
				'{' => self.eat_one_char(Token::LBrace),
				'}' => self.eat_one_char(Token::RBrace),
				'+' => self.eat_one_char(Token::Plus),
				'-' => self.eat_one_char(Token::Minus),
				'*' => self.eat_one_char(Token::Star),
				'/' => self.eat_one_char(Token::Slash),
				'%' => self.eat_one_char(Token::Percent),
				'=' => return self.eat_pair(Token::EqualEqual, None),
				'!' => return self.eat_pair(Token::NotEqual, None),
				'<' => return self.eat_pair(Token::LessEqual, Some(Token::Less)),
				'>' => return self.eat_pair(Token::GreaterEqual, Some(Token::Greater)),
				'"' => return self.lex_string(),
				'0'..='9' => return self.lex_number(),
				c if is_ident_start(c) => self.lex_ident(),
				c => {
					let start = self.mark();
					return Err(LexicalError {
						error: LexicalErrorType::UnexpectedCharacter { ch: c },
						location: self.point(start, c),
					});
				}
			};

			return Ok(spanned);
		}
	}

	fn ch(&self) -> Option<char> {
		self.src[self.position..].chars().next()
	}

	fn next_ch(&self) -> Option<char> {
		self.src[self.position..].chars().nth(1)
	}

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch()?;

		self.position += ch.len_utf8();

		if ch == '\n' {
			self.line += 1;
			self.col = 1;
		} else {
			self.col += 1;
		}

		Some(ch)
	}

	fn mark(&self) -> Mark {
		Mark {
			position: self.position,
			line: self.line,
			col: self.col,
		}
	}

	fn span_from(&self, start: Mark) -> SrcSpan {
		SrcSpan::from(start.position as u32, self.position as u32, start.line, start.col)
	}

	fn point(&self, at: Mark, ch: char) -> SrcSpan {
		SrcSpan::from(at.position as u32, (at.position + ch.len_utf8()) as u32, at.line, at.col)
	}

	fn spanned(&self, token: Token, start: Mark) -> Spanned {
		let lexeme = &self.src[start.position..self.position];

		Spanned::new(token, lexeme, self.span_from(start))
	}

	fn eat_nothing(&mut self, token: Token) -> Spanned {
		self.finished = token == Token::Eof;

		self.spanned(token, self.mark())
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start = self.mark();
		self.next_char();

		self.spanned(token, start)
	}

	/// `=`-suffixed operators; `single` is what the first character means alone.
	fn eat_pair(&mut self, pair: Token, single: Option<Token>) -> LexResult {
		let start = self.mark();
		let first = self.next_char().unwrap_or_default();

		if self.ch() == Some('=') {
			self.next_char();
			return Ok(self.spanned(pair, start));
		}

		match single {
			Some(token) => Ok(self.spanned(token, start)),
			None => Err(LexicalError {
				error: LexicalErrorType::UnexpectedCharacter { ch: first },
				location: self.point(start, first),
			})
		}
	}

	fn lex_ident(&mut self) -> Spanned {
		let start = self.mark();
		let rest = &self.src[self.position..];

		for (keyword, token) in MULTIWORD_KEYWORDS.iter() {
			if !rest.starts_with(keyword) {
				continue;
			}

			let at_boundary = !rest[keyword.len()..].chars()
				.next()
				.is_some_and(is_ident_continue);

			if at_boundary {
				for _ in keyword.chars() {
					self.next_char();
				}

				return self.spanned(token.clone(), start);
			}
		}

		while self.ch().is_some_and(is_ident_continue) {
			self.next_char();
		}

		let ident = &self.src[start.position..self.position];

		match str_to_keyword(ident) {
			Some(tok) => self.spanned(tok, start),
			None => self.spanned(Token::Ident(ident.to_string()), start),
		}
	}

	fn lex_number(&mut self) -> LexResult {
		let start = self.mark();

		while self.ch().is_some_and(|ch| ch.is_ascii_digit()) {
			self.next_char();
		}

		let digits = &self.src[start.position..self.position];

		match digits.parse::<i64>() {
			Ok(value) => Ok(self.spanned(Token::Int(value), start)),
			Err(_) => Err(LexicalError {
				error: LexicalErrorType::IntegerTooLarge,
				location: self.span_from(start),
			})
		}
	}

	fn lex_string(&mut self) -> LexResult {
		let start = self.mark();
		let mut value = String::new();

		self.next_char(); // skip opening quote

		loop {
			match self.ch() {
				None => return Err(LexicalError {
					error: LexicalErrorType::UnterminatedString,
					location: self.point(start, '"'),
				}),
				Some('"') => {
					self.next_char();
					break;
				},
				Some('\\') => {
					let escape = self.mark();
					self.next_char();

					let decoded = match self.ch() {
						Some('n') => '\n',
						Some('t') => '\t',
						Some('"') => '"',
						Some('\\') => '\\',
						Some(ch) => return Err(LexicalError {
							error: LexicalErrorType::UnknownEscape { ch },
							location: self.point(escape, '\\'),
						}),
						None => return Err(LexicalError {
							error: LexicalErrorType::UnterminatedString,
							location: self.point(start, '"'),
						}),
					};

					self.next_char();
					value.push(decoded);
				},
				Some(_) => {
					if let Some(ch) = self.next_char() {
						value.push(ch);
					}
				}
			}
		}

		Ok(self.spanned(Token::Str(value), start))
	}
}

impl<'a> Iterator for Lexer<'a> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let token = self.next_token();

		if token.is_err() {
			self.finished = true;
		}

		Some(token)
	}
}

/// Lexes the whole source, ending with exactly one `Eof` token, or fails on
/// the first malformed input.
pub fn tokenize(src: &str) -> Result<Vec<Spanned>, LexicalError> {
	Lexer::new(src).collect()
}
