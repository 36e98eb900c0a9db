//! costmap-cli
//! ===========
//!
//! Command-line interface for the `costmap-core` engine.
//!
//! This crate primarily provides a binary (`costmap`). The library target
//! exists so docs.rs renders this overview.
//!
//! Basic usage:
//!
//! ```text
//! costmap --help
//! costmap stats
//! costmap countries --sort income
//! costmap compare Canada France
//! costmap legend --metric ppi --policy sequential
//! costmap regression --outliers 2
//! ```
//!
//! For programmatic access use the [`costmap-core`] crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

// This library target intentionally exposes no API; the binary is the primary
// deliverable.
