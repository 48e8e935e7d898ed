//! Interactive console: the command grammar and its dispatch onto a session.

pub mod commands;
pub mod console;
