use crate::{
    lexer::prelude::{tokenize, Token},
    parser::prelude::*
};

fn parse(src: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(src).expect("test source must lex");

    parse_tokens(tokens)
}

fn parse_with_diagnostics(src: &str) -> (Result<Program, ParseError>, Vec<ParseError>) {
    let tokens = tokenize(src).expect("test source must lex");
    let mut parser = Parser::new(tokens);
    let result = parser.parse();

    (result, parser.diagnostics().to_vec())
}

fn render(expression: &Expression) -> String {
    match expression {
        Expression::Binary(Binary { left, operator, right, .. }) => {
            format!("({} {} {})", operator.as_literal(), render(left), render(right))
        },
        Expression::Unary(Unary { operator, right, .. }) => {
            format!("({} {})", operator.as_literal(), render(right))
        },
        Expression::Literal(Literal::Int { value, .. }) => value.to_string(),
        Expression::Literal(Literal::Str { value, .. }) => format!("{value:?}"),
        Expression::Literal(Literal::Bool { value, .. }) => value.to_string(),
        Expression::Variable(identifier) => identifier.name.clone(),
        Expression::Input { .. } => "input".into(),
    }
}

fn printed(expression: &str) -> Result<String, ParseError> {
    let program = parse(&format!("kem bhai\nbhai bol {expression}\naavjo bhai"))?;

    match &program.statements[..] {
        [Statement::Print(Print { expression, .. })] => Ok(render(expression)),
        other => panic!("expected a single print, got {other:?}"),
    }
}

fn first_error(src: &str) -> ParseError {
    match parse(src) {
        Err(err) => err,
        Ok(program) => panic!("Expected an error for {src:?} but got {program:?}"),
    }
}

#[test]
fn test_empty_program() -> Result<(), ParseError> {
    let program = parse("kem bhai\naavjo bhai")?;

    assert!(program.statements.is_empty());

    Ok(())
}

#[test]
fn test_statements() -> Result<(), ParseError> {
    let input = r#"
        kem bhai
            aa x che 10
            x che x + 1
            bhai bol x
            aa name che bapu tame bolo
            {
                aa y che "inner"
            }
        aavjo bhai
    "#;

    let program = parse(input)?;

    assert_eq!(program.statements.len(), 5);

    match &program.statements[0] {
        Statement::Declaration(Declaration { identifier, initializer, .. }) => {
            assert_eq!(identifier.name, "x");
            assert_eq!(render(initializer), "10");
        },
        other => panic!("expected a declaration, got {other:?}"),
    }

    match &program.statements[1] {
        Statement::Assignment(Assignment { identifier, value, .. }) => {
            assert_eq!(identifier.name, "x");
            assert_eq!(render(value), "(+ x 1)");
        },
        other => panic!("expected an assignment, got {other:?}"),
    }

    assert!(matches!(program.statements[2], Statement::Print(_)));

    match &program.statements[3] {
        Statement::Declaration(Declaration { initializer: Expression::Input { .. }, .. }) => {},
        other => panic!("expected an input declaration, got {other:?}"),
    }

    match &program.statements[4] {
        Statement::Block(Block { statements, .. }) => assert_eq!(statements.len(), 1),
        other => panic!("expected a block, got {other:?}"),
    }

    Ok(())
}

#[test]
fn test_precedence_shape() -> Result<(), ParseError> {
    let program = parse("kem bhai bhai bol 1 + 2 * 3 aavjo bhai")?;

    let Statement::Print(Print { expression, .. }) = &program.statements[0] else {
        panic!("expected a print");
    };

    let Expression::Binary(Binary { left, operator: BinaryOperator::Add, right, .. }) = expression else {
        panic!("expected an addition at the root, got {expression:?}");
    };

    assert!(matches!(**left, Expression::Literal(Literal::Int { value: 1, .. })));

    match &**right {
        Expression::Binary(Binary { left, operator: BinaryOperator::Multiply, right, .. }) => {
            assert!(matches!(**left, Expression::Literal(Literal::Int { value: 2, .. })));
            assert!(matches!(**right, Expression::Literal(Literal::Int { value: 3, .. })));
        },
        other => panic!("expected a multiplication, got {other:?}"),
    }

    Ok(())
}

#[test]
fn test_infixes() -> Result<(), ParseError> {
    let cases = vec![
        ("1 + 2 * 3", "(+ 1 (* 2 3))"),
        ("10 - 4 - 3", "(- (- 10 4) 3)"),
        ("8 / 2 / 2", "(/ (/ 8 2) 2)"),
        ("7 % 3 + 1", "(+ (% 7 3) 1)"),
        ("(1 + 2) * 3", "(* (+ 1 2) 3)"),
        ("1 < 2 == bhai chhe", "(== (< 1 2) true)"),
        ("a + 1 >= b * 2", "(>= (+ a 1) (* b 2))"),
        ("x != \"a\"", "(!= x \"a\")"),
        ("((x))", "x"),
    ];

    for (input, expected) in cases {
        assert_eq!(printed(input)?, expected, "{input}");
    }

    Ok(())
}

#[test]
fn test_prefix() -> Result<(), ParseError> {
    let cases = vec![
        ("-2 * 3", "(* (- 2) 3)"),
        ("- -x", "(- (- x))"),
        ("-(1 + 2)", "(- (+ 1 2))"),
        ("1 - -1", "(- 1 (- 1))"),
    ];

    for (input, expected) in cases {
        assert_eq!(printed(input)?, expected, "{input}");
    }

    Ok(())
}

#[test]
fn test_conditionals() -> Result<(), ParseError> {
    let input = r#"
        kem bhai
            jo x > 1 {
                bhai bol "big"
            } nahi to {
                bhai bol "small"
            }
            jo bhai nathi {}
        aavjo bhai
    "#;

    let program = parse(input)?;

    match &program.statements[0] {
        Statement::If(Conditional { condition, resolution, alternative: Some(alternative), .. }) => {
            assert_eq!(render(condition), "(> x 1)");
            assert_eq!(resolution.statements.len(), 1);
            assert_eq!(alternative.statements.len(), 1);
        },
        other => panic!("expected if/else, got {other:?}"),
    }

    assert!(matches!(
        program.statements[1],
        Statement::If(Conditional { alternative: None, .. })
    ));

    Ok(())
}

#[test]
fn test_loops() -> Result<(), ParseError> {
    let input = r#"
        kem bhai
            aa i che 0
            farvu {
                jo i == 2 {
                    tame jao
                }
                {
                    aagal vado
                }
                farvu {
                    tame jao
                } jya sudhi bhai chhe
                i che i + 1
            } jya sudhi i < 10
        aavjo bhai
    "#;

    let program = parse(input)?;

    match &program.statements[1] {
        Statement::While(DoWhile { body, condition, .. }) => {
            assert_eq!(body.statements.len(), 4);
            assert_eq!(render(condition), "(< i 10)");
        },
        other => panic!("expected a loop, got {other:?}"),
    }

    Ok(())
}

#[test]
fn test_tokens_after_end_fence_are_ignored() -> Result<(), ParseError> {
    let program = parse("kem bhai aavjo bhai bhai bol 1 }")?;

    assert!(program.statements.is_empty());

    Ok(())
}

#[test]
fn test_statement_locations() -> Result<(), ParseError> {
    let program = parse("kem bhai\n  aa x che 1 + 2\n  bhai bol x\naavjo bhai")?;

    let locations = program.statements.iter()
        .map(|statement| (statement.location().line, statement.location().col))
        .collect::<Vec<_>>();

    assert_eq!(locations, vec![(2, 3), (3, 3)]);

    match &program.statements[0] {
        Statement::Declaration(Declaration { initializer: Expression::Binary(binary), .. }) => {
            assert_eq!((binary.operator_location.line, binary.operator_location.col), (2, 14));
        },
        other => panic!("expected a declaration, got {other:?}"),
    }

    Ok(())
}

#[test]
fn test_invalid_programs() {
    let fails = vec![
        ("", "Program must start with 'kem bhai'", (1, 1)),
        ("aa x che 1\naavjo bhai", "Program must start with 'kem bhai'", (1, 1)),
        ("kem bhai\nbhai bol 1\n", "Program must end with 'aavjo bhai'", (3, 1)),
        ("kem bhai\naa che 5\naavjo bhai", "Expected variable name after 'aa'", (2, 4)),
        ("kem bhai\naa x 5\naavjo bhai", "Expected 'che' after variable name", (2, 6)),
        ("kem bhai\nx 5\naavjo bhai", "Expected 'che' after variable name", (2, 3)),
        ("kem bhai\njo x bhai bol 1\naavjo bhai", "Expected '{' after if condition", (2, 6)),
        ("kem bhai\njo x {} nahi to bhai bol 1\naavjo bhai", "Expected '{' after 'nahi to'", (2, 17)),
        ("kem bhai\nfarvu bhai bol 1\naavjo bhai", "Expected '{' after 'farvu'", (2, 7)),
        ("kem bhai\nfarvu {\n}\nx che 1\naavjo bhai", "Expected 'jya sudhi' after while body", (4, 1)),
        ("kem bhai\nbhai bol (1 + 2\naavjo bhai", "Expected ')' after expression", (3, 1)),
        ("kem bhai\njo x {\nbhai bol 1\naavjo bhai", "Expected '}' after block", (4, 1)),
        ("kem bhai\n5\naavjo bhai", "Unexpected token '5'", (2, 1)),
        ("kem bhai\nbhai bol\naavjo bhai", "Unexpected token 'aavjo bhai'", (3, 1)),
        ("kem bhai\nbhai bol 1 +", "Unexpected end of input", (2, 13)),
        ("kem bhai\ntame jao\naavjo bhai", "'tame jao' used outside of a loop", (2, 1)),
        ("kem bhai\njo x {\naagal vado\n}\naavjo bhai", "'aagal vado' used outside of a loop", (3, 1)),
        (
            "kem bhai\nfarvu {} jya sudhi bhai nathi\ntame jao\naavjo bhai",
            "'tame jao' used outside of a loop",
            (3, 1)
        ),
    ];

    for (input, message, (line, col)) in fails {
        let err = first_error(input);

        assert_eq!(err.message(), message, "{input:?}");
        assert_eq!((err.line(), err.col()), (line, col), "{input:?}");
    }
}

#[test]
fn test_recovery_collects_every_error() {
    let input = "kem bhai\naa che 1\nbhai bol 2\naa y 3\naavjo bhai";

    let (result, diagnostics) = parse_with_diagnostics(input);

    let messages = diagnostics.iter()
        .map(|err| (err.message(), err.line()))
        .collect::<Vec<_>>();

    assert_eq!(messages, vec![
        ("Expected variable name after 'aa'".to_string(), 2),
        ("Expected 'che' after variable name".to_string(), 4),
    ]);

    assert_eq!(result, Err(diagnostics[0].clone()));
}

#[test]
fn test_recovery_resumes_after_block_error() {
    let input = "kem bhai\nfarvu { 5 } jya sudhi bhai nathi\nbhai bol )\naavjo bhai";

    let (_, diagnostics) = parse_with_diagnostics(input);

    let messages = diagnostics.iter()
        .map(|err| err.message())
        .collect::<Vec<_>>();

    assert_eq!(messages, vec!["Unexpected token '5'", "Unexpected token ')'"]);
}

#[test]
fn test_parser_skips_newlines() {
    let tokens = tokenize("kem bhai\n\n\naavjo bhai\n").expect("lexes");
    let parser = Parser::new(tokens);

    assert_eq!(parser.current_token().token, Token::KemBhai);
}

#[test]
fn test_nesting_limit() {
    let parens = 10_000;
    let input = format!("kem bhai\nbhai bol {}1{}\naavjo bhai", "(".repeat(parens), ")".repeat(parens));

    let err = first_error(&input);

    assert_eq!(err.error, ParseErrorType::NestingTooDeep { limit: MAX_NESTING });
    assert_eq!(err.message(), "Nesting is deeper than 256 levels");
    assert_eq!((err.line(), err.col()), (2, MAX_NESTING as u32 + 10));

    let negations = format!("kem bhai\nbhai bol {}1\naavjo bhai", "-".repeat(parens));
    assert_eq!(first_error(&negations).error, ParseErrorType::NestingTooDeep { limit: MAX_NESTING });

    let blocks = 1_000;
    let braces = format!("kem bhai\n{}{}\naavjo bhai", "{".repeat(blocks), "}".repeat(blocks));
    assert_eq!(first_error(&braces).error, ParseErrorType::NestingTooDeep { limit: MAX_NESTING });

    let chain = format!("kem bhai\nbhai bol 1{}\naavjo bhai", " + 1".repeat(parens));
    assert_eq!(first_error(&chain).error, ParseErrorType::NestingTooDeep { limit: MAX_NESTING });
}

#[test]
fn test_nesting_below_limit() -> Result<(), ParseError> {
    let depth = 120;

    let parens = format!("kem bhai\nbhai bol {}1{}\naavjo bhai", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(parse(&parens)?.statements.len(), 1);

    let braces = format!("kem bhai\n{}{}\naavjo bhai", "{".repeat(depth), "}".repeat(depth));
    assert_eq!(parse(&braces)?.statements.len(), 1);

    let chain = format!("kem bhai\nbhai bol 1{}\nbhai bol 2\naavjo bhai", " + 1".repeat(depth));
    assert_eq!(parse(&chain)?.statements.len(), 2);

    Ok(())
}

#[test]
fn test_nesting_resets_after_recovery() {
    let deep = format!("{}1{}", "(".repeat(1_000), ")".repeat(1_000));
    let input = format!("kem bhai\nbhai bol {deep}\nbhai bol {}1{}\naa che 1\naavjo bhai", "(".repeat(100), ")".repeat(100));

    let (_, diagnostics) = parse_with_diagnostics(&input);

    let messages = diagnostics.iter()
        .map(|err| (err.message(), err.line()))
        .collect::<Vec<_>>();

    assert_eq!(messages, vec![
        ("Nesting is deeper than 256 levels".to_string(), 2),
        ("Expected variable name after 'aa'".to_string(), 4),
    ]);
}

#[test]
fn test_reserved_word_as_variable_name() {
    let err = first_error("kem bhai\naa che 5\naavjo bhai");

    assert_eq!(err.error, ParseErrorType::ExpectedIdent { reserved: Some(Token::Che) });
    assert_eq!(err.details().1, vec!["'che' is a reserved word and can't name a variable"]);

    let err = first_error("kem bhai\naa 5 che 5\naavjo bhai");

    assert_eq!(err.error, ParseErrorType::ExpectedIdent { reserved: None });
    assert!(err.details().1.is_empty());
}
