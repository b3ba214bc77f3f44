pub mod error;
pub mod io;

pub mod prelude {
    pub use super::{
        error::*,
        io::*,
        binary_operation,
        Flow,
        Interpreter,
    };
}


use std::cmp::Ordering;

use crate::{
    environment::prelude::{Environment, ScopeError, Value},
    parser::prelude::{
        Binary, BinaryOperator, Block, Expression, Identifier, Literal, Program, Statement, Unary, UnaryOperator
    },
    utils::prelude::SrcSpan
};
use self::{error::{RuntimeError, RuntimeErrorType}, io::InterpreterIO};

/// How a statement finished. Only a loop may absorb `Break` and `Continue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Completed,
    Break {
        location: SrcSpan
    },
    Continue {
        location: SrcSpan
    },
}

fn runtime_error<T>(error: RuntimeErrorType, location: SrcSpan) -> Result<T, RuntimeError> {
    Err(RuntimeError::new(error, location))
}

/// Tree-walking evaluator. Every run owns a fresh global frame; input and
/// output go through the injected [`InterpreterIO`].
pub struct Interpreter<'io> {
    environment: Environment,
    io: &'io mut dyn InterpreterIO,
}

impl<'io> Interpreter<'io> {
    pub fn new(io: &'io mut dyn InterpreterIO) -> Self {
        Self {
            environment: Environment::new(),
            io,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Runs the program and reports a runtime error through the output
    /// channel. Returns the process exit status.
    pub fn interpret(&mut self, program: &Program) -> i32 {
        match self.execute(program) {
            Ok(()) => 0,
            Err(err) => {
                let report = format!("Runtime Error: {}", err.message());

                if self.io.write_line(&report).is_err() {
                    eprintln!("{report}");
                }

                1
            }
        }
    }

    pub fn execute(&mut self, program: &Program) -> Result<(), RuntimeError> {
        for statement in program.statements.iter() {
            match self.execute_statement(statement)? {
                Flow::Completed => {},
                Flow::Break { location } => return runtime_error(
                    RuntimeErrorType::LoopControlOutsideLoop { keyword: "tame jao" },
                    location
                ),
                Flow::Continue { location } => return runtime_error(
                    RuntimeErrorType::LoopControlOutsideLoop { keyword: "aagal vado" },
                    location
                ),
            }
        }

        Ok(())
    }

    pub fn execute_statement(&mut self, statement: &Statement) -> Result<Flow, RuntimeError> {
        match statement {
            Statement::Print(print) => {
                let value = self.evaluate(&print.expression)?;

                if let Err(err) = self.io.write_line(&value.stringify()) {
                    return runtime_error(RuntimeErrorType::Output { kind: err.kind() }, print.location);
                }
            },
            Statement::Declaration(declaration) => {
                let value = self.evaluate(&declaration.initializer)?;

                self.declare(&declaration.identifier, value)?;
            },
            Statement::Assignment(assignment) => {
                let value = self.evaluate(&assignment.value)?;

                self.assign(&assignment.identifier, value)?;
            },
            Statement::If(conditional) => {
                let condition = self.evaluate(&conditional.condition)?;

                if condition.is_truthy() {
                    return self.execute_block(&conditional.resolution);
                }

                if let Some(alternative) = &conditional.alternative {
                    return self.execute_block(alternative);
                }
            },
            Statement::While(loop_) => {
                loop {
                    // Continue falls through to the condition check
                    if let Flow::Break { .. } = self.execute_block(&loop_.body)? {
                        break;
                    }

                    if !self.evaluate(&loop_.condition)?.is_truthy() {
                        break;
                    }
                }
            },
            Statement::Break { location } => return Ok(Flow::Break { location: *location }),
            Statement::Continue { location } => return Ok(Flow::Continue { location: *location }),
            Statement::Block(block) => return self.execute_block(block),
        }

        Ok(Flow::Completed)
    }

    /// Runs the statements inside a fresh frame. The frame is dropped on
    /// every exit path, including errors.
    pub fn execute_block(&mut self, block: &Block) -> Result<Flow, RuntimeError> {
        self.environment.push_frame();

        let mut result = Ok(Flow::Completed);

        for statement in block.statements.iter() {
            result = self.execute_statement(statement);

            if !matches!(result, Ok(Flow::Completed)) {
                break;
            }
        }

        self.environment.pop_frame();

        result
    }

    fn declare(&mut self, identifier: &Identifier, value: Value) -> Result<(), RuntimeError> {
        self.environment.declare(&identifier.name, value)
            .map_err(|err| scope_error(err, identifier))
    }

    fn assign(&mut self, identifier: &Identifier, value: Value) -> Result<(), RuntimeError> {
        self.environment.assign(&identifier.name, value)
            .map_err(|err| scope_error(err, identifier))
    }

    pub fn evaluate(&mut self, expression: &Expression) -> Result<Value, RuntimeError> {
        match expression {
            Expression::Literal(literal) => Ok(match literal {
                Literal::Int { value, .. } => Value::Integer { value: *value },
                Literal::Str { value, .. } => Value::String { value: value.clone() },
                Literal::Bool { value, .. } => Value::Boolean { value: *value },
            }),
            Expression::Variable(identifier) => match self.environment.get(&identifier.name) {
                Some(value) => Ok(value.clone()),
                None => runtime_error(
                    RuntimeErrorType::UndefinedVariable { name: identifier.name.clone() },
                    identifier.location
                ),
            },
            Expression::Binary(binary) => self.evaluate_binary(binary),
            Expression::Unary(unary) => self.evaluate_unary(unary),
            Expression::Input { location } => match self.io.read_line() {
                Some(line) => Ok(Value::String {
                    value: line.trim_end_matches('\n').to_string()
                }),
                None => runtime_error(RuntimeErrorType::InputExhausted, *location),
            },
        }
    }

    fn evaluate_binary(&mut self, binary: &Binary) -> Result<Value, RuntimeError> {
        let left = self.evaluate(&binary.left)?;
        let right = self.evaluate(&binary.right)?;

        binary_operation(binary.operator, left, right)
            .map_err(|error| RuntimeError::new(error, binary.operator_location))
    }

    fn evaluate_unary(&mut self, unary: &Unary) -> Result<Value, RuntimeError> {
        let right = self.evaluate(&unary.right)?;

        match (unary.operator, right) {
            (UnaryOperator::Negate, Value::Integer { value }) => match value.checked_neg() {
                Some(value) => Ok(Value::Integer { value }),
                None => runtime_error(RuntimeErrorType::IntegerOverflow, unary.location),
            },
            (UnaryOperator::Negate, Value::Float { value }) => Ok(Value::Float { value: -value }),
            (UnaryOperator::Negate, _) => runtime_error(RuntimeErrorType::NonNumericNegation, unary.location),
        }
    }
}

fn scope_error(error: ScopeError, identifier: &Identifier) -> RuntimeError {
    let name = identifier.name.clone();

    let error = match error {
        ScopeError::AlreadyDeclared => RuntimeErrorType::AlreadyDeclared { name },
        ScopeError::Undefined => RuntimeErrorType::UndefinedVariable { name },
    };

    RuntimeError::new(error, identifier.location)
}

/// Applies a binary operator to two already evaluated operands.
pub fn binary_operation(
    operator: BinaryOperator,
    left: Value,
    right: Value
) -> Result<Value, RuntimeErrorType> {
    use BinaryOperator::*;

    match operator {
        Add => match (left, right) {
            (Value::String { value: left }, Value::String { value: right }) => Ok(Value::String {
                value: left + &right
            }),
            (left, right) if left.is_numeric() && right.is_numeric() => {
                arithmetic(operator, &left, &right)
            },
            (left, right) => Err(RuntimeErrorType::InvalidAddition {
                left: left._type(),
                right: right._type(),
            }),
        },
        Subtract | Multiply => {
            require_numeric(operator, &left, &right)?;
            arithmetic(operator, &left, &right)
        },
        Divide => {
            require_numeric(operator, &left, &right)?;

            let (left, right) = as_floats(&left, &right);

            if right == 0.0 {
                return Err(RuntimeErrorType::DivisionByZero);
            }

            Ok(Value::Float { value: left / right })
        },
        Modulo => match (left, right) {
            (Value::Integer { .. }, Value::Integer { value: 0 }) => Err(RuntimeErrorType::ModuloByZero),
            (Value::Integer { value: left }, Value::Integer { value: right }) => {
                // floored: the result takes the sign of the divisor
                let remainder = left.wrapping_rem(right);

                let value = match remainder != 0 && (remainder < 0) != (right < 0) {
                    true => remainder + right,
                    false => remainder,
                };

                Ok(Value::Integer { value })
            },
            _ => Err(RuntimeErrorType::NonIntegerModulo),
        },
        Equal => Ok(Value::from(left == right)),
        NotEqual => Ok(Value::from(left != right)),
        Less | LessEqual | Greater | GreaterEqual => {
            require_numeric(operator, &left, &right)?;

            let result = match (operator, left.numeric_cmp(&right)) {
                (_, None) => false,
                (Less, Some(ordering)) => ordering == Ordering::Less,
                (LessEqual, Some(ordering)) => ordering != Ordering::Greater,
                (Greater, Some(ordering)) => ordering == Ordering::Greater,
                (_, Some(ordering)) => ordering != Ordering::Less,
            };

            Ok(Value::from(result))
        },
    }
}

fn require_numeric(operator: BinaryOperator, left: &Value, right: &Value) -> Result<(), RuntimeErrorType> {
    match left.is_numeric() && right.is_numeric() {
        true => Ok(()),
        false => Err(RuntimeErrorType::NonNumericOperands { operator }),
    }
}

fn as_floats(left: &Value, right: &Value) -> (f64, f64) {
    (left.as_f64().unwrap_or_default(), right.as_f64().unwrap_or_default())
}

/// `+`, `-` and `*` on numbers. Two integers stay integers and overflow is
/// an error, anything mixed is done in floating point.
fn arithmetic(operator: BinaryOperator, left: &Value, right: &Value) -> Result<Value, RuntimeErrorType> {
    if let (Value::Integer { value: left }, Value::Integer { value: right }) = (left, right) {
        let value = match operator {
            BinaryOperator::Add => left.checked_add(*right),
            BinaryOperator::Subtract => left.checked_sub(*right),
            _ => left.checked_mul(*right),
        };

        return value
            .map(|value| Value::Integer { value })
            .ok_or(RuntimeErrorType::IntegerOverflow);
    }

    let (left, right) = as_floats(left, right);

    let value = match operator {
        BinaryOperator::Add => left + right,
        BinaryOperator::Subtract => left - right,
        _ => left * right,
    };

    Ok(Value::Float { value })
}
