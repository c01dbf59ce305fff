use crate::component::Component;
use arrow::array::{Array, ArrayRef};
use arrowlog_array::{AllocatorRef, BuilderOptions, CodecError, CodecResult, ColumnBuilder, ResultExt};


/// Appends the first `count` records to the builder, one top-level slot per record.
///
/// The builder must have been created for the registered descriptor of `C`.
/// For list columns the child is reserved for the exact number of nested elements
/// before anything is appended.
pub fn fill<C: Component>(builder: &mut ColumnBuilder, records: &[C], count: usize) -> CodecResult<()> {
    if count > records.len() {
        return Err(CodecError::InvalidArgument(format!(
            "{}: asked to fill {} records, but only {} were given",
            C::NAME,
            count,
            records.len()
        )))
    }

    let component = C::component_descriptor();
    if **builder.descriptor() != **component.descriptor() {
        return Err(CodecError::InvalidArgument(format!(
            "{}: builder of {} can't hold {}",
            C::NAME,
            builder.descriptor(),
            component.descriptor()
        )))
    }

    let records = &records[..count];
    if builder.descriptor().is_list() {
        let nested = records.iter().map(|r| r.num_nested()).sum();
        builder.reserve_values(nested)?;
    }

    for record in records {
        record.append_slot(builder)?;
    }
    Ok(())
}


pub fn to_arrow<C: Component>(records: &[C], allocator: &AllocatorRef) -> CodecResult<ArrayRef> {
    to_arrow_with(records, allocator, &BuilderOptions::default())
}


pub fn to_arrow_with<C: Component>(
    records: &[C],
    allocator: &AllocatorRef,
    options: &BuilderOptions
) -> CodecResult<ArrayRef>
{
    let component = C::component_descriptor();
    let mut builder = ColumnBuilder::new(component.descriptor().clone(), allocator)?
        .with_options(options.clone());
    builder.reserve(records.len())?;
    fill(&mut builder, records, records.len())?;
    builder.finish()
}


/// Decodes records of `C` from an array of its registered datatype.
pub fn from_arrow<C: Component>(array: &dyn Array) -> CodecResult<Vec<C>> {
    let component = C::component_descriptor();
    component.validate(array)?;
    C::from_arrow(array).with_context(C::NAME)
}
