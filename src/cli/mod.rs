//! Interactive text-menu front end.
//!
//! The menu drives the same service functions as the HTTP API against
//! whichever [`Store`](crate::store::Store) it is given.

pub mod format;
pub mod menu;
pub mod ui;

pub use menu::Menu;
