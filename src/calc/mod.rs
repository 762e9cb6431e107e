//! On-screen calculator: expression evaluator and keypad state.

/// Infix expression evaluator.
pub mod eval;
/// Keypad state machine.
pub mod keypad;
