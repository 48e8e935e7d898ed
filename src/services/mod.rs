//! Client-side services: the remote seam, the three state stores, and the
//! controller that drives them.

pub mod catalog;
pub mod controller;
pub mod downloads;
pub mod notifications;
pub mod preview;
pub mod remote;
pub mod session;
