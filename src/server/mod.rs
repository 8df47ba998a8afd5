//! Server application core modules.
//!
//! This module contains all server-side functionality for AutoRBI: configuration, HTTP
//! routing, session handling, database repositories and the services implementing user
//! management, work and equipment records, corrections, analytics and Excel masterfile
//! checks.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
