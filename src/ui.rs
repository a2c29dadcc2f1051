//! Ratatui front-end for the Roster Manager. The rosters hold every record;
//! this layer turns key presses into store calls and redraws from the stores.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
