//! Form rendering module
//!
//! - `field_renderer`: bound fields with their error line
//! - `post_form`: the "Add a post" panel

mod field_renderer;
mod post_form;

pub use post_form::{draw_post_form, POST_FORM_MIN_HEIGHT};
