//! The `(result, steps, explanation)` triple returned by every operation.

use std::fmt;

use itertools::Itertools;
use linstep_linalg::{Matrix, Num, Vector};

/// The outcome of an operation: its result, the derivation that led to it, and a one-sentence
/// rationale.
///
/// Operations return the result with its concrete type (`OperationResult<Vector>`,
/// `OperationResult<f64>`, ...). Callers that handle results generically can erase the type with
/// [`OperationResult::into_value`].
///
/// The [`Display`][fmt::Display] impl prints the numbered steps, one per line, followed by the
/// explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult<T = Value> {
    pub result: T,
    /// Derivation lines in the order they were produced.
    pub steps: Vec<String>,
    pub explanation: String,
}

impl<T> OperationResult<T> {
    pub fn new(result: T, steps: Vec<String>, explanation: impl Into<String>) -> Self {
        Self {
            result,
            steps,
            explanation: explanation.into(),
        }
    }

    /// Transforms the result while keeping the derivation.
    pub fn map<U, F>(self, f: F) -> OperationResult<U>
    where
        F: FnOnce(T) -> U,
    {
        OperationResult {
            result: f(self.result),
            steps: self.steps,
            explanation: self.explanation,
        }
    }

    /// Converts the result into the tagged [`Value`] variant.
    pub fn into_value(self) -> OperationResult<Value>
    where
        T: Into<Value>,
    {
        self.map(Into::into)
    }
}

impl<T> fmt::Display for OperationResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, step)?;
        }
        write!(f, "{}", self.explanation)
    }
}

/// The result of an operation, with its type erased.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Vector(Vector),
    Vectors(Vec<Vector>),
    Matrix(Matrix),
    Scalar(f64),
    Text(String),
    Boolean(bool),
}

impl From<Vector> for Value {
    fn from(value: Vector) -> Self {
        Self::Vector(value)
    }
}

impl From<Vec<Vector>> for Value {
    fn from(value: Vec<Vector>) -> Self {
        Self::Vectors(value)
    }
}

impl From<Matrix> for Value {
    fn from(value: Matrix) -> Self {
        Self::Matrix(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Vector(v) => write!(f, "{v}"),
            Value::Vectors(vs) => write!(f, "{}", vs.iter().format(", ")),
            Value::Matrix(m) => write!(f, "{m}"),
            Value::Scalar(s) => write!(f, "{}", Num(*s)),
            Value::Text(t) => f.write_str(t),
            Value::Boolean(b) => write!(f, "{b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use linstep_linalg::vec3;

    use super::*;

    #[test]
    fn display_numbers_steps() {
        let res = OperationResult::new(
            3.0,
            vec!["first".to_string(), "second".to_string()],
            "Because.",
        );
        assert_eq!(res.to_string(), "1. first\n2. second\nBecause.");
    }

    #[test]
    fn erase() {
        let res = OperationResult::new(vec3(1.0, 2.0, 3.0), Vec::new(), "x").into_value();
        assert_eq!(res.result, Value::Vector(vec3(1.0, 2.0, 3.0)));
        assert_eq!(res.result.to_string(), "(1, 2, 3)");

        let pair = vec![vec3(1.0, 0.0, 0.0), vec3(0.5, 2.0, 0.0)];
        let res = OperationResult::new(pair, Vec::new(), "x").into_value();
        assert_eq!(res.result.to_string(), "(1, 0, 0), (0.5, 2, 0)");

        let res = OperationResult::new(0.25, Vec::new(), "x").into_value();
        match res.result {
            Value::Scalar(s) => assert_eq!(s, 0.25),
            other => panic!("unexpected result {other:?}"),
        }
    }
}
