//! abacus-core - Input state machine and keypad model for the abacus calculator
//!
//! Turns sequential key presses into an expression string, evaluation
//! requests, and formatted results. Evaluation itself happens on a remote
//! service; this crate performs no I/O. A press that needs the service
//! returns a [`Dispatch`] for the driver to send, and the outcome is folded
//! back in with [`Calculator::settle`].
//!
//! # Features
//!
//! - **Tagged-union dispatch**: every UI gesture reduces to one [`Key`]
//! - **Ticketed settlement**: stale results (superseded or cleared since
//!   dispatch) are discarded, last writer wins
//! - **Keypad descriptors**: the Basic/Scientific button grids as static data
//!
//! # Example
//!
//! ```rust
//! use abacus_core::{Calculator, Key, Operator};
//!
//! let mut calc = Calculator::new();
//! calc.press(Key::Digit(2));
//! calc.press(Key::Operator(Operator::Add));
//! calc.press(Key::Digit(3));
//!
//! // Equals finalizes the expression and hands the driver a request.
//! let dispatch = calc.press(Key::Equals).unwrap();
//! assert_eq!(calc.expression(), "2 + 3 =");
//! assert!(calc.is_loading());
//!
//! // The driver evaluates it remotely, then settles the outcome.
//! let entry = calc.settle(dispatch.ticket, Ok(5.0)).unwrap();
//! assert_eq!(calc.current_value(), "5");
//! assert_eq!(entry, "2 + 3 = 5");
//! ```

pub mod buttons;
pub mod event;
pub mod format;
pub mod machine;

// Re-exports for convenience
pub use buttons::{basic_layout, scientific_layout, ButtonConfig, ButtonVariant, GRID_COLUMNS};
pub use event::{Key, MathFunction, Operator};
pub use format::{format_number, format_result};
pub use machine::{
    AngleUnit, Calculator, Dispatch, EvalRequest, EvalTicket, Mode, Phase, ERROR_DISPLAY,
};
