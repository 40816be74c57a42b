//! Schema extraction from record field tables.

use std::slice;

use serde::{Deserialize, Serialize};

use crate::descriptor::FieldDescriptor;
use crate::record::{FieldEntry, FormRecord};

/// Ordered descriptors of a record's addressable fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Builds the schema of `R`, parsing each field's metadata afresh.
    #[must_use]
    pub fn of<R: FormRecord>() -> Self {
        Self {
            fields: R::fields().iter().map(FieldEntry::describe).collect(),
        }
    }

    /// Descriptors in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a descriptor by its external name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Iterates over the descriptors.
    pub fn iter(&self) -> slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` when the record has no addressable fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldDescriptor;
    type IntoIter = slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Schema {
    type Item = FieldDescriptor;
    type IntoIter = std::vec::IntoIter<FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Describes the record behind `record`.
///
/// Only the type matters; the instance's current values are not read.
#[must_use]
pub fn extract<R: FormRecord>(_record: &R) -> Schema {
    Schema::of::<R>()
}
