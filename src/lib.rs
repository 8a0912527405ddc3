//! bitacora - Journal and food log
//!
//! Entries are stored twice: as a structured record in a key-value table and
//! as a rendered markdown document in a blob bucket. The same library backs
//! the command-line interface, the interactive menu and the HTTP handler.

pub mod api;
pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::BitacoraError;
