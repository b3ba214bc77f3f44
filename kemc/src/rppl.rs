use std::io::Write;

use kem_core::session::parse_program;

const PROMPT: &str = ">> ";

/// Wraps a snippet in `kem bhai` ... `aavjo bhai` unless it already opens
/// with the start fence.
pub fn with_fences(src: &str) -> String {
	if src.contains("kem bhai") {
		src.to_string()
	} else {
		format!("kem bhai\n{src}\naavjo bhai")
	}
}

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
				match parse_program(&with_fences(&input)) {
					Ok(program) => {
						print!("{}", program);
					},
					Err(err) => {
						println!("{}", err.plain());
					}
				}
			}
		}
	}
}
