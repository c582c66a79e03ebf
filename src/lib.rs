//! window-openness: frame-stepped window transitions and cursor navigation.
//!
//! A window owns an openness ramp ([`openness`]) and a cursor navigator
//! ([`selection`]). [`window::Window::update`] runs both once per frame,
//! and [`blocking`] pumps the host until a transition finishes. The host
//! engine plugs in through the traits in [`host`].

pub mod blocking;
pub mod config;
pub mod error;
pub mod host;
pub mod input;
pub mod openness;
pub mod report;
pub mod selection;
pub mod simulate;
pub mod tui;
pub mod types;
pub mod window;
