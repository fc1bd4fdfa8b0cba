//! Application state module

mod app_state;
mod forms;
mod query;

pub use app_state::*;
pub use forms::*;
pub use query::*;
