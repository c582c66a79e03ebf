//! Terminal demo: a command window that opens, takes input and closes.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (Scene, Action, Transition, App)
//! - `update`: Pure scene transitions
//! - `view`: Pure rendering
//! - `theme`: Style constants
//! - `run`: Effects (terminal, frame loop, blocking close)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
