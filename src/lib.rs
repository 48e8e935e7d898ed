//! Client-side orchestration for browsing and mutating a remote object catalog.
//!
//! The [`services::controller::OperationController`] issues list, upload,
//! download and delete requests through an [`services::remote::ObjectService`],
//! keeps the [`services::catalog::CatalogStore`] in sync with the remote, and
//! reports outcomes through timed notices. A [`services::session::Session`]
//! adds the preview pane and start-up / tear-down.

pub mod config;
pub mod errors;
pub mod formatting;
pub mod handlers;
pub mod models;
pub mod services;
