//! Composition root for the portal mock data layer.
//!
//! [`Portal`] owns one store per domain, built from a [`PortalConfig`].
//! Nothing is global: every `Portal` starts from its own copy of the
//! bundled fixtures, so tests and demo runs never share state.

mod config;
mod demo;
mod fixtures;
mod portal;

pub use config::PortalConfig;
pub use demo::{run_demo, DemoReport};
pub use portal::Portal;
