//! Data models for the object catalog client.
//!
//! `object` holds the catalog entries as the remote lists them, `envelope`
//! the `{ success, ... }` wire shapes, and `upload` the locally selected file.

pub mod envelope;
pub mod object;
pub mod upload;
