//! The input state machine.
//!
//! Owns `current_value` (the operand being typed) and `expression` (the
//! accumulated left-hand side plus pending operator) and transitions them
//! per key event. Presses that need the evaluation service return a
//! [`Dispatch`]; the driver performs the call and folds the outcome back
//! with [`Calculator::settle`].
//!
//! Invariants:
//! - `current_value` is a valid partial numeral (optional leading `-`,
//!   digits, at most one `.`) or the literal [`ERROR_DISPLAY`] sentinel.
//! - `expression` is empty, ends with an operator token plus surrounding
//!   spaces, or ends with ` =` once finalized.
//! - At most one dispatched ticket is live; Clear or a newer dispatch
//!   invalidates older tickets, so stale results settle as no-ops.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::event::{Key, MathFunction, Operator};
use crate::format::{format_number, format_result};

/// Display value shown after a failed evaluation.
pub const ERROR_DISPLAY: &str = "Error";

/// Error message for the unparsable-operand guard on function keys.
const INVALID_FUNCTION_INPUT: &str = "Invalid input for function";

/// Which keypad is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Basic,
    Scientific,
}

/// Unit for trigonometric input values.
///
/// Serialized form is the lowercase name the trigonometry endpoint expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

/// Conceptual machine state, derived from the fields rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Normal typing.
    Entering,
    /// An operator was just pressed; the next digit starts a new operand.
    AwaitingOperand,
    /// A request is in flight.
    Evaluating,
    /// The expression is finalized; the display shows a result.
    Result,
    /// A failed evaluation or rejected function input is on display.
    Error,
}

/// What the driver must send to the evaluation service.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalRequest {
    /// POST the expression string to the arithmetic endpoint.
    Arithmetic { expression: String },
    /// POST function, value, and unit to the trigonometry endpoint.
    Trigonometry {
        function: MathFunction,
        value: f64,
        unit: AngleUnit,
    },
}

/// Handle for one dispatched evaluation.
///
/// Only the most recently issued, un-cleared ticket may settle into state;
/// everything older is discarded on arrival (last-writer-wins, no
/// cancellation token).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalTicket(u64);

/// A request the driver must dispatch, plus the ticket to settle it with.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    pub ticket: EvalTicket,
    pub request: EvalRequest,
}

/// What a live ticket resolves into when it settles successfully.
#[derive(Debug, Clone, PartialEq)]
enum PendingKind {
    /// Equals: history line is `<finalized expr> = <result>`.
    Expression { finalized: String },
    /// Function key: history line is `<label> = <result>`; the expression
    /// clears on success.
    Function { label: String },
}

#[derive(Debug, Clone, PartialEq)]
struct Pending {
    ticket: EvalTicket,
    kind: PendingKind,
}

/// Session calculator state.
///
/// Single writer: the driving loop owns it and mutates it exclusively
/// through [`press`](Self::press) and [`settle`](Self::settle); rendering
/// reads through the accessors. Created once per session, reset (not
/// destroyed) by Clear.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    current_value: String,
    expression: String,
    mode: Mode,
    angle_unit: AngleUnit,
    error: Option<String>,
    pending: Option<Pending>,
    next_ticket: u64,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}

impl Calculator {
    /// Fresh session state: display `0`, empty expression, Basic mode,
    /// degrees.
    pub fn new() -> Self {
        Self {
            current_value: "0".to_string(),
            expression: String::new(),
            mode: Mode::default(),
            angle_unit: AngleUnit::default(),
            error: None,
            pending: None,
            next_ticket: 0,
        }
    }

    // === Accessors ===

    /// The operand being typed, or the last result, or [`ERROR_DISPLAY`].
    pub fn current_value(&self) -> &str {
        &self.current_value
    }

    /// Accumulated left-hand side. Ends with ` =` once finalized.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn angle_unit(&self) -> AngleUnit {
        self.angle_unit
    }

    /// Message from the last failed evaluation or rejected function input.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while a dispatched request has not settled.
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Conceptual machine state, derived from the fields.
    pub fn phase(&self) -> Phase {
        if self.error.is_some() {
            Phase::Error
        } else if self.pending.is_some() {
            Phase::Evaluating
        } else if self.expression.ends_with('=') {
            Phase::Result
        } else if !self.expression.is_empty() && self.current_value == "0" {
            Phase::AwaitingOperand
        } else {
            Phase::Entering
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            Mode::Basic => Mode::Scientific,
            Mode::Scientific => Mode::Basic,
        };
    }

    pub fn set_angle_unit(&mut self, unit: AngleUnit) {
        self.angle_unit = unit;
    }

    pub fn toggle_angle_unit(&mut self) {
        self.angle_unit = match self.angle_unit {
            AngleUnit::Degrees => AngleUnit::Radians,
            AngleUnit::Radians => AngleUnit::Degrees,
        };
    }

    // === Transitions ===

    /// Apply one key press.
    ///
    /// Returns the evaluation request the driver must dispatch when the
    /// press needs the service (Equals on a non-finalized expression, or a
    /// function key with a parsable operand). Every press clears a shown
    /// error first.
    pub fn press(&mut self, key: Key) -> Option<Dispatch> {
        self.error = None;
        match key {
            Key::Digit(digit) => {
                self.enter_digit(digit);
                None
            }
            Key::Decimal => {
                self.enter_decimal();
                None
            }
            Key::Operator(op) => {
                self.push_operator(op);
                None
            }
            Key::Clear => {
                self.clear();
                None
            }
            Key::Negate => {
                self.negate();
                None
            }
            Key::Percent => {
                self.percent();
                None
            }
            Key::Equals => self.finalize(),
            Key::Function(function) => self.apply_function(function),
        }
    }

    /// Fold an evaluation outcome back into state.
    ///
    /// Returns the history entry to persist when the outcome produced one.
    /// A stale ticket (superseded or cleared since dispatch) settles as a
    /// no-op and returns `None`.
    pub fn settle(&mut self, ticket: EvalTicket, outcome: Result<f64, String>) -> Option<String> {
        let Some(pending) = self.pending.take_if(|p| p.ticket == ticket) else {
            debug!(?ticket, "discarding stale evaluation result");
            return None;
        };
        match outcome {
            Ok(result) => {
                let formatted = format_result(result);
                self.current_value = formatted.clone();
                match pending.kind {
                    PendingKind::Expression { finalized } => {
                        Some(format!("{finalized} = {formatted}"))
                    }
                    PendingKind::Function { label } => {
                        self.expression.clear();
                        Some(format!("{label} = {formatted}"))
                    }
                }
            }
            Err(message) => {
                debug!(%message, "evaluation failed");
                self.error = Some(message);
                self.current_value = ERROR_DISPLAY.to_string();
                None
            }
        }
    }

    /// Recall a history entry: its result becomes the current value.
    ///
    /// Entries without a result part after `=` are ignored.
    pub fn recall(&mut self, entry: &str) {
        let Some((_, result)) = entry.split_once('=') else {
            return;
        };
        let result = result.trim();
        if result.is_empty() {
            return;
        }
        self.current_value = result.to_string();
        self.expression.clear();
        self.error = None;
    }

    fn enter_digit(&mut self, digit: u8) {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            return;
        };
        if self.expression.ends_with('=') {
            // New calculation after a result.
            self.expression.clear();
            self.current_value = ch.to_string();
        } else if self.current_value == "0" || self.current_value == ERROR_DISPLAY {
            self.current_value = ch.to_string();
        } else {
            self.current_value.push(ch);
        }
    }

    fn enter_decimal(&mut self) {
        if self.current_value == ERROR_DISPLAY {
            self.current_value = "0.".to_string();
        } else if !self.current_value.contains('.') {
            self.current_value.push('.');
        }
    }

    fn push_operator(&mut self, op: Operator) {
        let segment = format!("{} {} ", self.current_value, op.glyph());
        if self.expression.ends_with('=') {
            // Chain from the displayed result.
            self.expression = segment;
        } else {
            self.expression.push_str(&segment);
        }
        self.current_value = "0".to_string();
    }

    fn clear(&mut self) {
        self.current_value = "0".to_string();
        self.expression.clear();
        self.error = None;
        // Any in-flight result is stale from here on.
        self.pending = None;
    }

    fn negate(&mut self) {
        if let Ok(value) = self.current_value.parse::<f64>() {
            self.current_value = format_number(value * -1.0);
        }
    }

    fn percent(&mut self) {
        if let Ok(value) = self.current_value.parse::<f64>() {
            self.current_value = format_number(value / 100.0);
        }
    }

    fn finalize(&mut self) -> Option<Dispatch> {
        if self.expression.ends_with('=') {
            // Already finalized: at most one request per result.
            return None;
        }
        let finalized = wire_form(&format!("{}{}", self.expression, self.current_value));
        self.expression = format!("{finalized} =");
        debug!(expression = %finalized, "dispatching arithmetic evaluation");
        let ticket = self.issue(PendingKind::Expression {
            finalized: finalized.clone(),
        });
        Some(Dispatch {
            ticket,
            request: EvalRequest::Arithmetic {
                expression: finalized,
            },
        })
    }

    fn apply_function(&mut self, function: MathFunction) -> Option<Dispatch> {
        let Ok(value) = self.current_value.parse::<f64>() else {
            self.error = Some(INVALID_FUNCTION_INPUT.to_string());
            return None;
        };
        let (label, request) = match function {
            MathFunction::Sqrt => (
                format!("√({})", format_number(value)),
                EvalRequest::Arithmetic {
                    expression: format!("sqrt({})", format_number(value)),
                },
            ),
            trig => (
                // The degree sign is cosmetic and fixed, whatever the unit.
                format!("{}({}°)", trig.label(), format_number(value)),
                EvalRequest::Trigonometry {
                    function: trig,
                    value,
                    unit: self.angle_unit,
                },
            ),
        };
        debug!(function = function.label(), value, "dispatching function evaluation");
        let ticket = self.issue(PendingKind::Function { label });
        Some(Dispatch { ticket, request })
    }

    fn issue(&mut self, kind: PendingKind) -> EvalTicket {
        self.next_ticket += 1;
        let ticket = EvalTicket(self.next_ticket);
        self.pending = Some(Pending { ticket, kind });
        ticket
    }
}

/// Substitute display glyphs for the tokens the service parses.
fn wire_form(expression: &str) -> String {
    expression.replace('×', "*").replace('÷', "/")
}
