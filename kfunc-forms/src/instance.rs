//! Type-erased form instances.

use std::any::{type_name, Any};

use crate::bind::bind;
use crate::error::{FormError, FormResult};
use crate::record::FormRecord;
use crate::schema::Schema;
use crate::values::FormValues;

/// Object-safe view of a [`FormRecord`] instance.
///
/// Lets code that only holds `Box<dyn FormInstance>` describe and populate a
/// record without knowing its concrete type. Implemented for every record.
pub trait FormInstance: Any + Send {
    /// Schema of the underlying record type.
    fn schema(&self) -> Schema;

    /// Binds submitted values onto this instance.
    ///
    /// # Errors
    ///
    /// See [`bind`](crate::bind()).
    fn bind(&mut self, values: &FormValues) -> FormResult<()>;

    /// Name of the underlying record type.
    fn type_name(&self) -> &'static str;

    /// Upcasts to [`Any`].
    fn as_any(&self) -> &dyn Any;

    /// Upcasts to mutable [`Any`].
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Upcasts a boxed instance to [`Any`].
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;
}

impl<R: FormRecord> FormInstance for R {
    fn schema(&self) -> Schema {
        Schema::of::<R>()
    }

    fn bind(&mut self, values: &FormValues) -> FormResult<()> {
        bind(self, values)
    }

    fn type_name(&self) -> &'static str {
        type_name::<R>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }
}

impl dyn FormInstance {
    /// Recovers the concrete record.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::InvalidTarget`] when the instance is not an `R`.
    pub fn downcast<R: FormRecord>(self: Box<Self>) -> FormResult<Box<R>> {
        let found = self.type_name();
        self.into_any()
            .downcast::<R>()
            .map_err(|_| FormError::InvalidTarget {
                expected: type_name::<R>(),
                found,
            })
    }

    /// Borrows the concrete record, if the instance is an `R`.
    #[must_use]
    pub fn downcast_ref<R: FormRecord>(&self) -> Option<&R> {
        self.as_any().downcast_ref()
    }

    /// Mutably borrows the concrete record, if the instance is an `R`.
    pub fn downcast_mut<R: FormRecord>(&mut self) -> Option<&mut R> {
        self.as_any_mut().downcast_mut()
    }
}
