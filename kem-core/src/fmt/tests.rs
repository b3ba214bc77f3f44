use crate::{
    eval::prelude::VectorIO,
    fmt::{escape_string, format_source},
    lexer::prelude::Token,
    session::{parse_program, run_source, tokenize},
    utils::{prelude::Error, sample::Sampler}
};

fn formatted_expression(expression: &str) -> Result<String, Error> {
    let formatted = format_source(&format!("kem bhai bhai bol {expression} aavjo bhai"))?;

    let line = formatted.lines()
        .nth(1)
        .unwrap_or_default()
        .trim_start_matches("bhai bol ")
        .to_string();

    Ok(line)
}

#[test]
fn test_canonical_layout() -> Result<(), Error> {
    let input = r#"kem bhai
aa x che   1+2*3
    jo x>5 { bhai bol "big\n" } nahi to {bhai bol "small"}
farvu { x che x-1 jo x == 3 { tame jao } aagal vado } jya sudhi x > 0
{ aa y che (1+2)*3 }
  aa name che bapu tame bolo
aavjo bhai"#;

    let expected = r#"kem bhai
aa x che 1 + 2 * 3
jo x > 5 {
  bhai bol "big\n"
} nahi to {
  bhai bol "small"
}
farvu {
  x che x - 1
  jo x == 3 {
    tame jao
  }
  aagal vado
} jya sudhi x > 0
{
  aa y che (1 + 2) * 3
}
aa name che bapu tame bolo
aavjo bhai
"#;

    assert_eq!(format_source(input)?, expected);

    Ok(())
}

#[test]
fn test_empty_program_and_blocks() -> Result<(), Error> {
    assert_eq!(format_source("kem bhai aavjo bhai")?, "kem bhai\naavjo bhai\n");
    assert_eq!(
        format_source("kem bhai jo bhai chhe {} aavjo bhai")?,
        "kem bhai\njo bhai chhe {\n}\naavjo bhai\n"
    );

    Ok(())
}

#[test]
fn test_parentheses() -> Result<(), Error> {
    let cases = vec![
        ("1 - (2 - 3)", "1 - (2 - 3)"),
        ("(1 - 2) - 3", "1 - 2 - 3"),
        ("(1 + 2) * 3", "(1 + 2) * 3"),
        ("1 + (2 * 3)", "1 + 2 * 3"),
        ("8 / (4 / 2)", "8 / (4 / 2)"),
        ("(1 < 2) == (3 > 4)", "1 < 2 == 3 > 4"),
        ("1 == (2 == 3)", "1 == (2 == 3)"),
        ("-(1 + 2)", "-(1 + 2)"),
        ("- -x", "--x"),
        ("-x * 2", "-x * 2"),
        ("((bhai nathi))", "bhai nathi"),
    ];

    for (input, expected) in cases {
        assert_eq!(formatted_expression(input)?, expected, "{input}");
    }

    Ok(())
}

#[test]
fn test_string_escapes() {
    assert_eq!(escape_string("plain"), "\"plain\"");
    assert_eq!(escape_string("a\"b"), "\"a\\\"b\"");
    assert_eq!(escape_string("tab\tnew\nslash\\"), "\"tab\\tnew\\nslash\\\\\"");
}

#[test]
fn test_formatting_is_idempotent() -> Result<(), Error> {
    let programs = vec![
        "kem bhai aavjo bhai",
        "kem bhai\n\n\n   bhai bol   1\n\naavjo bhai\n\n",
        r#"kem bhai aa s che "q\"uote\\" bhai bol s + "\t" aavjo bhai"#,
        "kem bhai aa i che 0 farvu { { aa j che i } i che i + 1 } jya sudhi i < (3 - 1) * 2 aavjo bhai",
        "kem bhai farvu { jo 1 { jo 2 { jo 3 { bhai bol -(-(1)) } } nahi to { aagal vado } } } jya sudhi bhai nathi aavjo bhai",
        "kem bhai bhai bol 10 - (4 - (3 - 1)) % 3 / (2 * 1) aavjo bhai",
    ];

    for program in programs {
        let once = format_source(program)?;
        let twice = format_source(&once)?;

        assert_eq!(once, twice, "{program:?}");
    }

    Ok(())
}

#[test]
fn test_formatting_keeps_behaviour() -> Result<(), Error> {
    let program = r#"kem bhai
aa i che 0 aa total che 0
farvu { i che i + 1 jo i % 2 == 0 { aagal vado } total che total + i * (i - 1) } jya sudhi i < 7
bhai bol total bhai bol 10 - (4 - 3) bhai bol 7 / 2
aavjo bhai"#;

    let formatted = format_source(program)?;

    let mut before = VectorIO::default();
    let mut after = VectorIO::default();

    assert_eq!(run_source(program, &mut before), 0);
    assert_eq!(run_source(&formatted, &mut after), 0);
    assert_eq!(before.output(), after.output());

    Ok(())
}

#[test]
fn test_invalid_source_is_not_formatted() {
    assert!(matches!(
        format_source("kem bhai\naa\naavjo bhai"),
        Err(Error::Parse { .. })
    ));
    assert!(matches!(format_source("kem bhai @"), Err(Error::Lex { .. })));
}

const NAMES: [&str; 5] = ["x", "y", "total", "ગમ", "_tmp"];
const OPERATORS: [&str; 11] = ["+", "-", "*", "/", "%", "==", "!=", "<", "<=", ">", ">="];
const GAPS: [&str; 4] = [" ", "  ", "\n", " \n\t "];
const STRING_CHARS: [char; 8] = ['a', 'b', ' ', '"', '\\', '\n', '\t', 'ગ'];

/// Writes random but grammatical programs with irregular spacing.
struct ProgramWriter {
    sampler: Sampler,
    out: String,
}

impl ProgramWriter {
    fn new(seed: u64) -> Self {
        Self { sampler: Sampler::new(seed), out: String::new() }
    }

    fn program(mut self) -> String {
        self.word("kem bhai");
        self.statements(3, false);
        self.word("aavjo bhai");

        self.out
    }

    fn word(&mut self, text: &str) {
        let gap = *self.sampler.pick(&GAPS);

        self.out.push_str(text);
        self.out.push_str(gap);
    }

    fn statements(&mut self, depth: usize, in_loop: bool) {
        for _ in 0..self.sampler.below(4) {
            self.statement(depth, in_loop);
        }
    }

    fn statement(&mut self, depth: usize, in_loop: bool) {
        match self.sampler.below(9) {
            1 => {
                let name = *self.sampler.pick(&NAMES);

                self.word("aa");
                self.word(name);
                self.word("che");
                self.expression(2);
            },
            2 => {
                let name = *self.sampler.pick(&NAMES);

                self.word(name);
                self.word("che");
                self.expression(2);
            },
            3 if depth > 0 => {
                self.word("jo");
                self.expression(2);
                self.block(depth - 1, in_loop);

                if self.sampler.below(2) == 0 {
                    self.word("nahi to");
                    self.block(depth - 1, in_loop);
                }
            },
            4 if depth > 0 => {
                self.word("farvu");
                self.block(depth - 1, true);
                self.word("jya sudhi");
                self.expression(2);
            },
            5 if depth > 0 => self.block(depth - 1, in_loop),
            6 if in_loop => self.word("tame jao"),
            7 if in_loop => self.word("aagal vado"),
            _ => {
                self.word("bhai bol");
                self.expression(2);
            },
        }
    }

    fn block(&mut self, depth: usize, in_loop: bool) {
        self.word("{");
        self.statements(depth, in_loop);
        self.word("}");
    }

    fn expression(&mut self, depth: usize) {
        let choices = if depth == 0 { 5 } else { 9 };

        match self.sampler.below(choices) {
            0 => {
                let value = self.sampler.below(1_000).to_string();
                self.word(&value);
            },
            1 => {
                let len = self.sampler.below(5);
                let value = (0..len)
                    .map(|_| *self.sampler.pick(&STRING_CHARS))
                    .collect::<String>();

                self.word(&escape_string(&value));
            },
            2 => {
                let value = *self.sampler.pick(&["bhai chhe", "bhai nathi"]);
                self.word(value);
            },
            3 => {
                let name = *self.sampler.pick(&NAMES);
                self.word(name);
            },
            4 => self.word("bapu tame bolo"),
            5 => {
                self.word("-");
                self.expression(depth - 1);
            },
            6 => {
                self.word("(");
                self.expression(depth - 1);
                self.word(")");
            },
            _ => {
                let operator = *self.sampler.pick(&OPERATORS);

                self.expression(depth - 1);
                self.word(operator);
                self.expression(depth - 1);
            },
        }
    }
}

fn formatted(src: &str) -> String {
    format_source(src).unwrap_or_else(|err| panic!("{src:?} did not format:\n{}", err.plain()))
}

#[test]
fn test_generated_programs_format_idempotently() -> Result<(), Error> {
    for seed in 0..300 {
        let src = ProgramWriter::new(seed).program();

        let tokens = tokenize(&src).map_err(|error| Error::Lex {
            path: Default::default(),
            src: src.clone(),
            error
        })?;
        assert_eq!(tokens.iter().filter(|spanned| spanned.token == Token::Eof).count(), 1);

        let once = formatted(&src);
        let twice = formatted(&once);

        assert_eq!(once, twice, "seed {seed}: {src:?}");
        assert_eq!(
            parse_program(&src)?.statements.len(),
            parse_program(&once)?.statements.len(),
            "seed {seed}"
        );
    }

    Ok(())
}
