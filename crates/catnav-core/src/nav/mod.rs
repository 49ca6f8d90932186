//! Catalog navigation.
//!
//! [`navigator::CatalogNavigator`] is the pure state machine,
//! [`fetch`] runs its requests against a catalog service, and
//! [`browser::CatalogBrowser`] drives both sequentially for headless use.

pub mod browser;
pub mod fetch;
pub mod navigator;
pub mod view;
