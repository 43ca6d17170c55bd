//! UI module
//!
//! Terminal widgets shared by the file selector and the configuration
//! editor:
//! - Styles for consistent theming
//! - Header and footer bars
//! - File list and diff preview
//! - Popup menus

mod styles;
mod header;
pub mod footer;
pub mod file_list;
pub mod diff_pane;
pub mod menu;

pub use styles::Styles;
pub use header::render_header;
pub use footer::render_footer;
pub use file_list::{render_file_list, FILE_LIST_WIDTH};
pub use diff_pane::render_diff_pane;
pub use menu::{render_confirm, render_menu, render_text_entry, MenuItem};
