//! Hoptrace
//!
//! Repeated traceroute sampling with hop-by-hop RTT parsing,
//! per-hop statistics and SVG charts.
//!
//! The heart of the crate is [`parser::parse_traceroute`], which turns the
//! free-form text printed by `traceroute` into one [`parser::HopRecord`]
//! per hop. Everything else (running the tool, repeated sampling,
//! statistics, charts) is built around it.
//!
//! ## Getting Started
//!
//! ```bash
//! cargo install hoptrace
//! hoptrace trace example.com --traces 3 --interval 5
//! traceroute example.com | hoptrace parse
//! ```

pub mod aggregator;
pub mod chart;
pub mod commands;
pub mod executor;
pub mod output;
pub mod parser;
pub mod utils;
