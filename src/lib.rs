//! Prometheus exporter for Panasonic WTY2001 lighting controllers.
//!
//! The controller exposes light state as a script payload on its CGI
//! endpoint; this crate scrapes it on demand and exposes per-channel
//! brightness via an HTTP `/metrics` endpoint.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐     ┌─────────────────┐
//! │ WTY2001 or mock │────>│     Parser      │────>│   HTTP Server   │
//! │ (status page)   │     │ (LightStatus)   │     │   (/metrics)    │
//! └─────────────────┘     └─────────────────┘     └─────────────────┘
//! ```
//!
//! Every scrape triggers an independent fetch-and-parse cycle; there is no
//! caching, retrying, or shared state between requests.
//!
//! # Usage
//!
//! ```bash
//! wty2001-exporter --target http://192.168.1.50:12380/cgi-bin/index.cgi?p=dataget
//! ```
//!
//! # Configuration
//!
//! See [`config::ExporterConfig`] for configuration options.

pub mod config;
pub mod error;
pub mod exposition;
pub mod http;
pub mod parser;
pub mod upstream;

pub use config::ExporterConfig;
pub use error::ScrapeError;
pub use http::HttpServer;
pub use parser::LightStatus;
pub use upstream::Upstream;
