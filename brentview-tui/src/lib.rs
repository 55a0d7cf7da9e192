//! Brent oil change-point dashboard: terminal front end.
//!
//! Shows the Brent price series for a chosen date range with the model's
//! median change point marked, the change-point summary, the event nearest
//! to it, and the events recorded inside the range.

pub mod app;
pub mod input;
pub mod logging;
pub mod theme;
pub mod ui;
pub mod worker;

pub use app::AppState;

#[cfg(test)]
mod test_helpers;
