// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - layout: Calculates the dashboard layout and centred popups
// - render: Main orchestration function that coordinates all rendering
// - auth: Login and register forms
// - dashboard: Header, stat cards, tonality chart, empty state
// - review_table: Filtered and sorted review table
// - filter_panel: Filter/sort modal for a table column
// - demo: Single-text prediction screen
// - legend: Renders hotkey legend
// - status_bar: Renders bottom status bar (user, counts, connection)
// - dialogs: Version picker, import/metrics dialogs, delete confirmation
// - toast: Renders toast notifications (brief pop-up messages)

pub mod auth;
pub mod dashboard;
pub mod demo;
pub mod dialogs;
pub mod filter_panel;
pub mod layout;
pub mod legend;
pub mod render;
pub mod review_table;
pub mod status_bar;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;
