//! Compile-time field tables for form records.

use std::fmt;

use crate::descriptor::FieldDescriptor;
use crate::tag::parse_tag;

/// A struct whose public fields form a tool's input.
///
/// Usually derived with `#[derive(FormRecord)]`. [`Default`] supplies the
/// fresh, zero-valued instance that binding starts from.
pub trait FormRecord: Default + Send + 'static {
    /// Addressable fields of the record in declaration order.
    fn fields() -> &'static [FieldEntry<Self>];
}

/// One addressable field: its declared name, raw metadata and an accessor.
pub struct FieldEntry<R> {
    declared_name: &'static str,
    tag: &'static str,
    slot: for<'a> fn(&'a mut R) -> FieldSlot<'a>,
}

impl<R> FieldEntry<R> {
    /// Creates a table entry.
    #[must_use]
    pub const fn new(
        declared_name: &'static str,
        tag: &'static str,
        slot: for<'a> fn(&'a mut R) -> FieldSlot<'a>,
    ) -> Self {
        Self {
            declared_name,
            tag,
            slot,
        }
    }

    /// Field name as written in the struct.
    #[must_use]
    pub fn declared_name(&self) -> &'static str {
        self.declared_name
    }

    /// Raw metadata string, empty when the field has none.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Parses the metadata into a fresh descriptor.
    #[must_use]
    pub fn describe(&self) -> FieldDescriptor {
        parse_tag(self.declared_name, self.tag)
    }

    /// Borrows the field's storage on `record`.
    pub fn slot<'a>(&self, record: &'a mut R) -> FieldSlot<'a> {
        (self.slot)(record)
    }
}

impl<R> Clone for FieldEntry<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for FieldEntry<R> {}

impl<R> fmt::Debug for FieldEntry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldEntry")
            .field("declared_name", &self.declared_name)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}

/// Mutable view of a field's storage, grouped by how it is bound.
pub enum FieldSlot<'a> {
    /// Text, integer, floating-point or boolean storage bound from the first value.
    Scalar(&'a mut dyn ScalarField),
    /// Text list bound from every submitted value.
    TextList(&'a mut Vec<String>),
    /// Storage the binder does not populate.
    Unbound,
}

impl FieldSlot<'_> {
    /// Native representation behind the slot, `None` when unbound.
    #[must_use]
    pub fn native_kind(&self) -> Option<NativeKind> {
        match self {
            Self::Scalar(field) => Some(field.native_kind()),
            Self::TextList(_) => Some(NativeKind::TextList),
            Self::Unbound => None,
        }
    }
}

/// Native representation of a bindable field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NativeKind {
    /// `String`.
    Text,
    /// Signed integer.
    Signed,
    /// Unsigned integer.
    Unsigned,
    /// Floating-point number.
    Float,
    /// `bool`.
    Bool,
    /// `Vec<String>`.
    TextList,
}

impl fmt::Display for NativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Signed => "signed integer",
            Self::Unsigned => "unsigned integer",
            Self::Float => "number",
            Self::Bool => "boolean",
            Self::TextList => "text list",
        })
    }
}

/// Storage that is assigned from a single raw string.
pub trait ScalarField {
    /// Native representation, used in error messages.
    fn native_kind(&self) -> NativeKind;

    /// Replaces the stored value with `raw` converted to the native type.
    ///
    /// # Errors
    ///
    /// Returns the parser's message when `raw` cannot be converted. The
    /// stored value is left untouched in that case.
    fn coerce(&mut self, raw: &str) -> Result<(), String>;
}

impl ScalarField for String {
    fn native_kind(&self) -> NativeKind {
        NativeKind::Text
    }

    fn coerce(&mut self, raw: &str) -> Result<(), String> {
        raw.clone_into(self);
        Ok(())
    }
}

impl ScalarField for bool {
    fn native_kind(&self) -> NativeKind {
        NativeKind::Bool
    }

    // Checkbox submissions send `on`; anything else reads as unchecked.
    fn coerce(&mut self, raw: &str) -> Result<(), String> {
        *self = matches!(raw, "on" | "true");
        Ok(())
    }
}

macro_rules! parsed_scalar {
    ($kind:expr => $($ty:ty),+ $(,)?) => {$(
        impl ScalarField for $ty {
            fn native_kind(&self) -> NativeKind {
                $kind
            }

            fn coerce(&mut self, raw: &str) -> Result<(), String> {
                *self = raw.parse::<$ty>().map_err(|err| err.to_string())?;
                Ok(())
            }
        }
    )+};
}

parsed_scalar!(NativeKind::Signed => i8, i16, i32, i64, i128, isize);
parsed_scalar!(NativeKind::Unsigned => u8, u16, u32, u64, u128, usize);
parsed_scalar!(NativeKind::Float => f32, f64);
