//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod page;
mod user_list;
mod widgets;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (page_area, status_area) = layout::create_layout(frame.area());

    page::draw(frame, page_area, app);
    layout::draw_status_bar(frame, status_area, app);

    if let Some(toast) = &app.state.toast {
        components::render_toast(frame, page_area, &toast.message);
    }

    // Error dialog goes on top of everything
    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, error, app.state.errors.len() - 1);
    }
}
