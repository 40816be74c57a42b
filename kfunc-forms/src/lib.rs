//! Form schemas and input binding for kfunc tools.
//!
//! A tool declares its input once as a plain struct deriving [`FormRecord`].
//! Each public field carries an optional `#[form("key=value,...")]` attribute
//! describing how it should be presented. From that declaration this crate
//! produces a [`Schema`] for rendering an input surface and binds flat,
//! string-keyed submissions ([`FormValues`]) back onto a fresh instance.
//!
//! ```
//! use kfunc_forms::{bind, FormRecord, FormValues, Schema};
//!
//! #[derive(Debug, Default, FormRecord)]
//! pub struct Greeting {
//!     #[form("type=textarea,label=Name,required=true")]
//!     pub name: String,
//!     #[form("type=number,label=Times")]
//!     pub times: u32,
//! }
//!
//! let schema = Schema::of::<Greeting>();
//! assert_eq!(schema.len(), 2);
//!
//! let values: FormValues = [("name", "Ada"), ("times", "3")].into_iter().collect();
//! let mut greeting = Greeting::default();
//! bind(&mut greeting, &values).unwrap();
//! assert_eq!(greeting.times, 3);
//! ```

#![warn(missing_docs, clippy::pedantic)]

extern crate self as kfunc_forms;

mod bind;
mod descriptor;
mod error;
mod instance;
mod record;
mod schema;
mod tag;
mod values;

/// Populates a record from flat string-keyed input.
pub use bind::bind;
/// Presentation metadata for a single field.
pub use descriptor::{FieldDescriptor, FieldKind};
/// Error type and result alias for binding.
pub use error::{FormError, FormResult};
/// Type-erased access to a form record.
pub use instance::FormInstance;
/// Compile-time field table of a record type.
pub use record::{FieldEntry, FieldSlot, FormRecord, NativeKind, ScalarField};
/// Ordered field descriptors of a record type.
pub use schema::{extract, Schema};
/// Field metadata grammar.
pub use tag::parse_tag;
/// Multi-valued input map.
pub use values::FormValues;

/// Derives [`FormRecord`] for a struct with named fields.
///
/// Only public fields enter the field table; private fields are ignored and
/// keep whatever value [`Default`] gives them. Metadata is attached with
/// `#[form("type=number,label=Amount,required=true")]`. Generated code refers
/// to `::kfunc_forms`; use `#[form(crate = "path::to::forms")]` on the struct
/// when the crate is reached through a re-export.
pub use kfunc_forms_macros::FormRecord;
