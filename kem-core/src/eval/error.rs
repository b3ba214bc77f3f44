use std::fmt::Display;

use crate::{
    environment::prelude::ValueType,
    parser::prelude::BinaryOperator,
    utils::prelude::SrcSpan
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeErrorType {
    UndefinedVariable {
        name: String,
    },
    AlreadyDeclared {
        name: String,
    },
    InvalidAddition {
        left: ValueType,
        right: ValueType,
    },
    NonNumericOperands {
        operator: BinaryOperator,
    },
    NonNumericNegation,
    NonIntegerModulo,
    DivisionByZero,
    ModuloByZero,
    IntegerOverflow,
    InputExhausted,
    LoopControlOutsideLoop {
        keyword: &'static str,
    },
    Output {
        kind: std::io::ErrorKind,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeError {
    pub error: RuntimeErrorType,
    pub location: SrcSpan
}

impl RuntimeError {
    pub fn new(error: RuntimeErrorType, location: SrcSpan) -> Self {
        Self { error, location }
    }

    pub fn details(&self) -> (String, Vec<String>) {
        match &self.error {
            RuntimeErrorType::UndefinedVariable { name } => (
                format!("Undefined variable '{name}'"),
                vec![format!("Declare it first with `aa {name} che ...`")]
            ),
            RuntimeErrorType::AlreadyDeclared { name } => (
                format!("Variable '{name}' already declared in this scope"),
                vec![format!("Use `{name} che ...` to change its value")]
            ),
            RuntimeErrorType::InvalidAddition { left, right } => (
                format!("TypeError: cannot `+` {left} and {right}"),
                vec![]
            ),
            RuntimeErrorType::NonNumericOperands { operator } => (
                format!("Operator '{}' requires numeric operands", operator.as_literal()),
                vec![]
            ),
            RuntimeErrorType::NonNumericNegation => (
                "Unary minus requires numeric operand".into(),
                vec![]
            ),
            RuntimeErrorType::NonIntegerModulo => (
                "Modulo operator requires integer operands".into(),
                vec![]
            ),
            RuntimeErrorType::DivisionByZero => ("Division by zero".into(), vec![]),
            RuntimeErrorType::ModuloByZero => ("Modulo by zero".into(), vec![]),
            RuntimeErrorType::IntegerOverflow => (
                "Integer overflow".into(),
                vec![format!("Integers range from {} to {}", i64::MIN, i64::MAX)]
            ),
            RuntimeErrorType::InputExhausted => ("No more input available".into(), vec![]),
            RuntimeErrorType::LoopControlOutsideLoop { keyword } => (
                format!("'{keyword}' used outside of a loop"),
                vec![]
            ),
            RuntimeErrorType::Output { kind } => (
                format!("Failed to write output: {kind}"),
                vec![]
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

impl Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for RuntimeError {}
