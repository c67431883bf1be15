//! Terminal front-end. Each command reads from and writes to a [`Session`]
//! and renders the result; no conversion logic lives here.
//!
//! [`Session`]: crate::core::session::Session

pub mod convert;
pub mod history;
pub mod lists;
pub mod rates;
pub mod setup;
pub mod ui;
pub mod watch;
