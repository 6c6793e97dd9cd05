//! This crate implements the reading (lexical) phase of the Vesper toolchain. This phase turns raw
//! source text into a sequence of located token nodes by dispatching per-character behavior
//! through a replaceable [`readtable::Readtable`].
//!
//! The final output of this phase is a sequence of [`token::TokenNode`]s, optionally wrapped into
//! hygiene-context-tagged [`syntax::Syntax`] nodes at the macro-expander boundary.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod char_stream;
pub mod default_readtable;
pub mod error;
pub mod readtable;
pub mod reader;
pub mod syntax;
pub mod token;
