//! Keyboard bindings.

use abacus_core::{Key, MathFunction, Mode, Operator};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a terminal key press does at the application level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Feed a calculator key into the state machine.
    Press(Key),
    ToggleMode,
    ToggleUnit,
    ToggleHistory,
    Quit,
}

/// Map a key event to an action, or `None` when the key is unbound.
///
/// Function bindings are live in Scientific mode only, mirroring the keypad
/// (the Basic keypad carries no function buttons). Shift is part of the
/// translated character, so `S`/`C`/`T` arrive as uppercase chars.
pub fn map_key(event: &KeyEvent, mode: Mode) -> Option<Action> {
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }
    let action = match event.code {
        KeyCode::Char(ch @ '0'..='9') => Action::Press(Key::Digit(ch as u8 - b'0')),
        KeyCode::Char('.') => Action::Press(Key::Decimal),
        KeyCode::Char('+') => Action::Press(Key::Operator(Operator::Add)),
        KeyCode::Char('-') => Action::Press(Key::Operator(Operator::Subtract)),
        KeyCode::Char('*') => Action::Press(Key::Operator(Operator::Multiply)),
        KeyCode::Char('/') => Action::Press(Key::Operator(Operator::Divide)),
        KeyCode::Char('%') => Action::Press(Key::Percent),
        KeyCode::Char('n') => Action::Press(Key::Negate),
        KeyCode::Char('=') | KeyCode::Enter => Action::Press(Key::Equals),
        KeyCode::Esc => Action::Press(Key::Clear),
        KeyCode::Char('m') => Action::ToggleMode,
        KeyCode::Char('u') => Action::ToggleUnit,
        KeyCode::Char('h') => Action::ToggleHistory,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char(ch) if mode == Mode::Scientific => function_key(ch)?,
        _ => return None,
    };
    Some(action)
}

fn function_key(ch: char) -> Option<Action> {
    let function = match ch {
        's' => MathFunction::Sin,
        'c' => MathFunction::Cos,
        't' => MathFunction::Tan,
        'S' => MathFunction::Asin,
        'C' => MathFunction::Acos,
        'T' => MathFunction::Atan,
        'r' => MathFunction::Sqrt,
        _ => return None,
    };
    Some(Action::Press(Key::Function(function)))
}
