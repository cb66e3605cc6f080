//! # mldcat
//!
//! HTTP surface, configuration and legacy compatibility check of the
//! MLDCAT-AP metadata service.
//!
//! The binary (`src/main.rs`) adds the CLI on top of this library; the
//! integration tests drive the router directly through [`api::create_router`].

pub mod api;
pub mod compat;
pub mod config;
