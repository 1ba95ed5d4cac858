//! # DEPMAP
//!
//! File-level dependency maps and function audits for codebases too loosely
//! typed for real static analysis.
//!
//! Declarations and references are recognised with regular expressions over raw
//! text, not parsed. The result is a best-effort structural map:
//!
//! - **Symbols**: `class Name` declarations, owned by the first file (in the
//!   configured order) that declares them.
//! - **References**: instantiation, capitalised member access, string-keyed
//!   service lookup, enumerated service lookup and inheritance.
//! - **Graph**: one labeled edge per (file, owner, name), never reflexive,
//!   rendered as Graphviz DOT or compact JSON.
//!
//! The `audit` module is a separate line-based scan that inventories functions
//! and flags common health issues.

pub mod audit;
pub mod config;
pub mod core;
pub mod error;
pub mod formatters;
