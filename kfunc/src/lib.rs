//! Declare-once tool input forms and a discoverable tool catalog.
//!
//! Depend on this crate to get the form engine and the tool catalog behind
//! feature flags. Records deriving `FormRecord` through this facade need
//! `#[form(crate = "kfunc::forms")]` so the generated code finds its paths.

#![warn(missing_docs, clippy::pedantic)]

/// Schema extraction and input binding (enabled by `forms` feature).
#[cfg(feature = "forms")]
pub use kfunc_forms as forms;

/// Tool capability trait and catalog (enabled by `tools` feature).
#[cfg(feature = "tools")]
pub use kfunc_tools as tools;
