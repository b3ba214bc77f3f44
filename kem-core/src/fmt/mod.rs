//! Canonical source layout.
//!
//! Fences sit on their own lines, every statement gets its own line and each
//! block level indents by two spaces. Parentheses are only written where the
//! tree would otherwise parse differently.

#[cfg(test)]
mod tests;

use std::fmt::Display;

use crate::{
    parser::prelude::{Binary, Block, Expression, Literal, Program, Statement, Unary},
    session::parse_program,
    utils::prelude::Error
};

const INDENT: &str = "  ";

#[derive(Debug, Default)]
pub struct Formatter {
    output: String,
    depth: usize,
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format_program(mut self, program: &Program) -> String {
        self.line("kem bhai");

        for statement in program.statements.iter() {
            self.statement(statement);
        }

        self.line("aavjo bhai");

        self.output
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.output.push_str(INDENT);
        }

        self.output.push_str(text);
        self.output.push('\n');
    }

    fn block_body(&mut self, block: &Block) {
        self.depth += 1;

        for statement in block.statements.iter() {
            self.statement(statement);
        }

        self.depth -= 1;
    }

    fn statement(&mut self, statement: &Statement) {
        match statement {
            Statement::Print(print) => {
                self.line(&format!("bhai bol {}", print.expression));
            },
            Statement::Declaration(declaration) => {
                self.line(&format!("aa {} che {}", declaration.identifier.name, declaration.initializer));
            },
            Statement::Assignment(assignment) => {
                self.line(&format!("{} che {}", assignment.identifier.name, assignment.value));
            },
            Statement::If(conditional) => {
                self.line(&format!("jo {} {{", conditional.condition));
                self.block_body(&conditional.resolution);

                if let Some(alternative) = &conditional.alternative {
                    self.line("} nahi to {");
                    self.block_body(alternative);
                }

                self.line("}");
            },
            Statement::While(loop_) => {
                self.line("farvu {");
                self.block_body(&loop_.body);
                self.line(&format!("}} jya sudhi {}", loop_.condition));
            },
            Statement::Break { .. } => self.line("tame jao"),
            Statement::Continue { .. } => self.line("aagal vado"),
            Statement::Block(block) => {
                self.line("{");
                self.block_body(block);
                self.line("}");
            },
        }
    }
}

pub fn format_program(program: &Program) -> String {
    Formatter::new().format_program(program)
}

/// Parses and re-emits `src`. Source that does not parse is returned as the
/// parse error.
pub fn format_source(src: &str) -> Result<String, Error> {
    Ok(format_program(&parse_program(src)?))
}

pub fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len() + 2);

    escaped.push('"');

    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            ch => escaped.push(ch),
        }
    }

    escaped.push('"');
    escaped
}

fn write_operand(f: &mut std::fmt::Formatter<'_>, operand: &Expression, wrap: bool) -> std::fmt::Result {
    match wrap {
        true => write!(f, "({operand})"),
        false => write!(f, "{operand}"),
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_program(self))
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Binary(binary) => write!(f, "{binary}"),
            Expression::Unary(unary) => write!(f, "{unary}"),
            Expression::Literal(literal) => write!(f, "{literal}"),
            Expression::Variable(identifier) => write!(f, "{}", identifier.name),
            Expression::Input { .. } => write!(f, "bapu tame bolo"),
        }
    }
}

impl Display for Binary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tier = self.operator.precedence();

        // Operators are left-associative, so an equal tier on the right
        // still needs parentheses.
        let wrap_left = matches!(&*self.left, Expression::Binary(left) if left.operator.precedence() < tier);
        let wrap_right = matches!(&*self.right, Expression::Binary(right) if right.operator.precedence() <= tier);

        write_operand(f, &self.left, wrap_left)?;
        write!(f, " {} ", self.operator.as_literal())?;
        write_operand(f, &self.right, wrap_right)
    }
}

impl Display for Unary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.operator.as_literal())?;
        write_operand(f, &self.right, matches!(&*self.right, Expression::Binary(_)))
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Int { value, .. } => write!(f, "{value}"),
            Literal::Str { value, .. } => write!(f, "{}", escape_string(value)),
            Literal::Bool { value: true, .. } => write!(f, "bhai chhe"),
            Literal::Bool { value: false, .. } => write!(f, "bhai nathi"),
        }
    }
}
