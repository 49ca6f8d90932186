//! User configuration.
//!
//! Settings ([`settings::Config`]), key bindings ([`keymap::Keymap`]) and
//! colours ([`theme::Theme`]) are TOML files read at startup.

pub mod keymap;
pub mod settings;
pub mod theme;
