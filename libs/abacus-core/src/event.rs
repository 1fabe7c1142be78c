//! Key events driving the calculator state machine.

use serde::{Deserialize, Serialize};

/// Binary operator on the keypad.
///
/// Multiply and divide display as `×`/`÷`; the evaluation service expects
/// `*`/`/`, substituted when an expression is finalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Glyph shown on the keypad and accumulated into the expression.
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }
}

/// Scientific keypad function.
///
/// Serialized form is the lowercase name the trigonometry endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MathFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sqrt,
}

impl MathFunction {
    /// Name used on the keypad and in history labels (`√` for square root).
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sqrt => "√",
        }
    }
}

/// A single keypad event.
///
/// Reducer-style dispatch: the state machine branches on this and nothing
/// else, so every front-end gesture (button, key binding) reduces to one
/// of these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A digit 0-9.
    Digit(u8),
    /// The decimal point.
    Decimal,
    Operator(Operator),
    Equals,
    /// `AC`: reset to the initial state.
    Clear,
    /// `±`: flip the sign of the current value.
    Negate,
    /// `%`: divide the current value by 100. Local, no service call.
    Percent,
    Function(MathFunction),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_glyphs() {
        assert_eq!(Operator::Add.glyph(), "+");
        assert_eq!(Operator::Subtract.glyph(), "-");
        assert_eq!(Operator::Multiply.glyph(), "×");
        assert_eq!(Operator::Divide.glyph(), "÷");
    }

    #[test]
    fn test_function_labels() {
        assert_eq!(MathFunction::Sin.label(), "sin");
        assert_eq!(MathFunction::Sqrt.label(), "√");
    }

    #[test]
    #[allow(clippy::disallowed_methods)] // unwrap() is acceptable in tests
    fn test_function_serializes_lowercase() {
        let json = serde_json::to_string(&MathFunction::Asin).unwrap();
        assert_eq!(json, "\"asin\"");
    }
}
