use std::io::Write;

use kem_core::lexer::prelude::{Lexer, Token};

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;

		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		if let Some('\n') = input.chars().next_back() {
			input.pop();
		}
		if let Some('\r') = input.chars().next_back() {
			input.pop();
		}

		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				for res in Lexer::new(&input) {
					match res {
						Ok(spanned) => {
							if spanned.token == Token::Eof {
								break;
							}

							println!("{:<15} {:?} at {}", spanned.token.name(), spanned.lexeme, spanned.location);
						},
						Err(err) => {
							let (message, hints) = err.details();
							println!("[at {}] Lexical Error: {}", err.location, message);
							if !hints.is_empty() {
								println!("{}", hints.join("\n"));
							}
						}
					}
				}
			}
		}
	}
}
