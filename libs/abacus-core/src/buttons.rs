//! Static keypad descriptors for the Basic and Scientific layouts.
//!
//! Layouts are data, not behavior: a renderer walks the slice row-major
//! (four columns) and feeds each button's [`Key`] back into the machine
//! when activated. Defined once, never mutated.

use crate::event::{Key, MathFunction, Operator};
use crate::machine::Mode;

/// Buttons per keypad row.
pub const GRID_COLUMNS: usize = 4;

/// Visual style of a keypad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// Digits and the decimal point.
    #[default]
    Default,
    /// Operators and equals.
    Primary,
    /// Clear, negate, percent, and the scientific functions.
    Secondary,
}

/// Static descriptor for one keypad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonConfig {
    pub label: &'static str,
    pub key: Key,
    pub variant: ButtonVariant,
    /// Rendered double width (the Basic layout's `0`).
    pub wide: bool,
}

const fn btn(label: &'static str, key: Key, variant: ButtonVariant) -> ButtonConfig {
    ButtonConfig {
        label,
        key,
        variant,
        wide: false,
    }
}

const fn digit(label: &'static str, value: u8) -> ButtonConfig {
    btn(label, Key::Digit(value), ButtonVariant::Default)
}

const fn operator(label: &'static str, op: Operator) -> ButtonConfig {
    btn(label, Key::Operator(op), ButtonVariant::Primary)
}

const fn function(label: &'static str, f: MathFunction) -> ButtonConfig {
    btn(label, Key::Function(f), ButtonVariant::Secondary)
}

static BASIC_LAYOUT: [ButtonConfig; 19] = [
    btn("AC", Key::Clear, ButtonVariant::Secondary),
    btn("±", Key::Negate, ButtonVariant::Secondary),
    btn("%", Key::Percent, ButtonVariant::Secondary),
    operator("÷", Operator::Divide),
    digit("7", 7),
    digit("8", 8),
    digit("9", 9),
    operator("×", Operator::Multiply),
    digit("4", 4),
    digit("5", 5),
    digit("6", 6),
    operator("-", Operator::Subtract),
    digit("1", 1),
    digit("2", 2),
    digit("3", 3),
    operator("+", Operator::Add),
    ButtonConfig {
        label: "0",
        key: Key::Digit(0),
        variant: ButtonVariant::Default,
        wide: true,
    },
    btn(".", Key::Decimal, ButtonVariant::Default),
    btn("=", Key::Equals, ButtonVariant::Primary),
];

static SCIENTIFIC_LAYOUT: [ButtonConfig; 20] = [
    function("sin", MathFunction::Sin),
    function("cos", MathFunction::Cos),
    function("tan", MathFunction::Tan),
    operator("÷", Operator::Divide),
    digit("7", 7),
    digit("8", 8),
    digit("9", 9),
    operator("×", Operator::Multiply),
    digit("4", 4),
    digit("5", 5),
    digit("6", 6),
    operator("-", Operator::Subtract),
    digit("1", 1),
    digit("2", 2),
    digit("3", 3),
    operator("+", Operator::Add),
    function("√", MathFunction::Sqrt),
    digit("0", 0),
    btn(".", Key::Decimal, ButtonVariant::Default),
    btn("=", Key::Equals, ButtonVariant::Primary),
];

/// The Basic keypad, row-major. The final row is `0` (double width), `.`,
/// `=`.
pub fn basic_layout() -> &'static [ButtonConfig] {
    &BASIC_LAYOUT
}

/// The Scientific keypad, row-major. Trades the clear/negate/percent row
/// for `sin`/`cos`/`tan` and slots `√` beside `0`.
pub fn scientific_layout() -> &'static [ButtonConfig] {
    &SCIENTIFIC_LAYOUT
}

/// Layout for the given display mode.
pub fn layout(mode: Mode) -> &'static [ButtonConfig] {
    match mode {
        Mode::Basic => basic_layout(),
        Mode::Scientific => scientific_layout(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_shapes() {
        // 5 rows of 4, minus one slot for the wide zero.
        assert_eq!(basic_layout().len(), 19);
        assert_eq!(scientific_layout().len(), 20);
    }

    #[test]
    fn test_wide_zero_only_in_basic() {
        let wide: Vec<_> = basic_layout().iter().filter(|b| b.wide).collect();
        assert_eq!(wide.len(), 1);
        assert_eq!(wide[0].label, "0");
        assert!(scientific_layout().iter().all(|b| !b.wide));
    }

    #[test]
    fn test_digits_present_in_both_layouts() {
        for layout in [basic_layout(), scientific_layout()] {
            for d in 0..=9u8 {
                assert!(
                    layout.iter().any(|b| b.key == Key::Digit(d)),
                    "digit {d} missing"
                );
            }
        }
    }

    #[test]
    fn test_scientific_has_no_clear_button() {
        // Faithful to the original grid: AC/±/% give way to sin/cos/tan.
        assert!(!scientific_layout().iter().any(|b| b.key == Key::Clear));
        assert!(basic_layout().iter().any(|b| b.key == Key::Clear));
    }

    #[test]
    fn test_operator_buttons_are_primary() {
        for b in basic_layout() {
            if matches!(b.key, Key::Operator(_) | Key::Equals) {
                assert_eq!(b.variant, ButtonVariant::Primary);
            }
        }
    }
}
