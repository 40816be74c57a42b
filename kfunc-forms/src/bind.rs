//! Binding flat string input onto form records.

use tracing::trace;

use crate::error::{FormError, FormResult};
use crate::record::{FieldSlot, FormRecord};
use crate::values::FormValues;

/// Populates `target` from `values`, field by field in declaration order.
///
/// Each field is looked up by the name its metadata resolves to. Missing
/// names and empty value lists leave the field untouched, even for fields
/// marked required. Scalar fields take the first value; `Vec<String>` fields
/// take every value. Fields of any other type are never written.
///
/// # Errors
///
/// Returns [`FormError::Coercion`] on the first value that does not parse as
/// the field's numeric type. Binding stops there, so fields declared earlier
/// keep their new values; discard `target` rather than binding it again.
pub fn bind<R: FormRecord>(target: &mut R, values: &FormValues) -> FormResult<()> {
    for entry in R::fields() {
        let descriptor = entry.describe();
        let Some(raw) = values.get(descriptor.name()).filter(|raw| !raw.is_empty()) else {
            continue;
        };

        match entry.slot(target) {
            FieldSlot::Scalar(field) => {
                let first = &raw[0];
                let expected = field.native_kind();
                field.coerce(first).map_err(|reason| {
                    FormError::coercion(descriptor.name(), first.as_str(), expected, reason)
                })?;
            }
            FieldSlot::TextList(list) => *list = raw.to_vec(),
            FieldSlot::Unbound => {
                trace!(field = descriptor.name(), "skipping field without a bindable type");
            }
        }
    }

    Ok(())
}
