//! UI widget modules for the TUI frontend.
//!
//! Each sub-module renders a single UI component using ratatui.

pub mod basket;
pub mod breadcrumb;
pub mod command_palette;
pub mod panel;
pub mod popup;
pub mod search_bar;
pub mod statusbar;
