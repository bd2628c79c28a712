//! Client side of the MAJEX Consulting site.
//!
//! The crate resolves site image keys to URLs through a cached catalog, keeps
//! the admin session in a persistent store, and talks to the REST backend for
//! events and contact messages. [`site::Site`] wires everything together.

pub mod assets;
pub mod auth;
pub mod config;
pub mod contacts;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod http;
pub mod routes;
pub mod session;
pub mod site;
pub mod telemetry;
pub mod upload;

mod lock;
