//! Tool capability set and the catalog tools register into.
//!
//! A tool exposes an id, descriptive metadata, the space it is grouped under,
//! a fresh input form and a processing entry point. The [`catalog`] indexes
//! registered tools by id and by space for discovery.

#![warn(missing_docs, clippy::pedantic)]

pub mod catalog;
pub mod tool;
