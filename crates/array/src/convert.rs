use crate::builder::{AnyBuilder, AnyPrimitive};
use crate::column::ColumnBuilder;
use crate::descriptor::{Descriptor, ScalarType};
use crate::error::{CodecError, CodecResult};
use arrow::array::{Array, ArrowPrimitiveType, AsArray, BooleanArray};
use arrow::compute::filter;
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type, UInt32Type, UInt64Type, UInt8Type};


/// Value that can be written into a column of its [`ArrowSerialize::descriptor`].
pub trait ArrowSerialize: Sized {
    fn descriptor() -> Descriptor;

    /// Values may be null. Makes the enclosing list item or struct field nullable.
    fn is_nullable() -> bool {
        false
    }

    /// Appends exactly one value to a builder created for [`ArrowSerialize::descriptor`].
    fn append_to(&self, builder: &mut AnyBuilder) -> CodecResult<()>;

    /// Appends exactly one top-level slot to a column.
    ///
    /// Nested collections override this to pick between an absent slot
    /// and a slot with values.
    fn append_slot(&self, column: &mut ColumnBuilder) -> CodecResult<()> {
        column.append(self)
    }

    /// Number of child elements this value places into a list column
    fn num_nested(&self) -> usize {
        0
    }
}


pub trait ArrowDeserialize: Sized {
    fn from_arrow(array: &dyn Array) -> CodecResult<Vec<Self>>;

    /// Decodes a column that may hold nulls, mapping them to `None`.
    ///
    /// Only the valid positions are passed on to [`ArrowDeserialize::from_arrow`].
    fn from_arrow_opt(array: &dyn Array) -> CodecResult<Vec<Option<Self>>> {
        let Some(nulls) = array.logical_nulls().filter(|n| n.null_count() > 0) else {
            return Ok(Self::from_arrow(array)?.into_iter().map(Some).collect())
        };

        let valid = filter(array, &BooleanArray::new(nulls.inner().clone(), None))?;
        let mut values = Self::from_arrow(valid.as_ref())?.into_iter();

        nulls.iter().map(|is_valid| {
            if is_valid {
                values.next().map(Some).ok_or_else(|| {
                    CodecError::MissingData("fewer values than valid slots".to_string())
                })
            } else {
                Ok(None)
            }
        }).collect()
    }
}


/// Fails with [`CodecError::MissingData`] when the array holds nulls.
pub fn ensure_no_nulls(array: &dyn Array) -> CodecResult<()> {
    if array.null_count() > 0 {
        Err(CodecError::MissingData(format!(
            "{} of {} values of a non-nullable {} column are null",
            array.null_count(),
            array.len(),
            array.data_type()
        )))
    } else {
        Ok(())
    }
}


fn primitive_from_arrow<T: ArrowPrimitiveType>(array: &dyn Array) -> CodecResult<Vec<T::Native>> {
    let array = array.as_primitive_opt::<T>().ok_or_else(|| {
        CodecError::datatype_mismatch(T::DATA_TYPE, array.data_type())
    })?;
    ensure_no_nulls(array)?;
    Ok(array.values().to_vec())
}


macro_rules! impl_primitive {
    ($native:ty, $arrow:ty, $scalar:ident) => {
        impl ArrowSerialize for $native {
            fn descriptor() -> Descriptor {
                Descriptor::Scalar(ScalarType::$scalar)
            }

            #[inline]
            fn append_to(&self, builder: &mut AnyBuilder) -> CodecResult<()> {
                <$arrow as AnyPrimitive>::downcast(builder)?.append(*self)
            }
        }

        impl ArrowDeserialize for $native {
            fn from_arrow(array: &dyn Array) -> CodecResult<Vec<Self>> {
                primitive_from_arrow::<$arrow>(array)
            }
        }
    };
}
impl_primitive!(i8, Int8Type, Int8);
impl_primitive!(i16, Int16Type, Int16);
impl_primitive!(i32, Int32Type, Int32);
impl_primitive!(i64, Int64Type, Int64);
impl_primitive!(u8, UInt8Type, UInt8);
impl_primitive!(u16, UInt16Type, UInt16);
impl_primitive!(u32, UInt32Type, UInt32);
impl_primitive!(u64, UInt64Type, UInt64);
impl_primitive!(f32, Float32Type, Float32);
impl_primitive!(f64, Float64Type, Float64);


impl ArrowSerialize for bool {
    fn descriptor() -> Descriptor {
        Descriptor::Scalar(ScalarType::Boolean)
    }

    fn append_to(&self, builder: &mut AnyBuilder) -> CodecResult<()> {
        builder.as_boolean_mut()?.append(*self)
    }
}


impl ArrowDeserialize for bool {
    fn from_arrow(array: &dyn Array) -> CodecResult<Vec<Self>> {
        let array = array.as_boolean_opt().ok_or_else(|| {
            CodecError::datatype_mismatch(DataType::Boolean, array.data_type())
        })?;
        ensure_no_nulls(array)?;
        Ok(array.values().iter().collect())
    }
}


impl ArrowSerialize for String {
    fn descriptor() -> Descriptor {
        Descriptor::Utf8
    }

    fn append_to(&self, builder: &mut AnyBuilder) -> CodecResult<()> {
        builder.as_string_mut()?.append(self)
    }
}


impl ArrowDeserialize for String {
    fn from_arrow(array: &dyn Array) -> CodecResult<Vec<Self>> {
        let array = array.as_string_opt::<i32>().ok_or_else(|| {
            CodecError::datatype_mismatch(DataType::Utf8, array.data_type())
        })?;
        ensure_no_nulls(array)?;
        Ok((0..array.len()).map(|i| array.value(i).to_string()).collect())
    }
}


impl ArrowSerialize for Vec<u8> {
    fn descriptor() -> Descriptor {
        Descriptor::Binary
    }

    fn append_to(&self, builder: &mut AnyBuilder) -> CodecResult<()> {
        builder.as_binary_mut()?.append(self)
    }
}


impl ArrowDeserialize for Vec<u8> {
    fn from_arrow(array: &dyn Array) -> CodecResult<Vec<Self>> {
        let array = array.as_binary_opt::<i32>().ok_or_else(|| {
            CodecError::datatype_mismatch(DataType::Binary, array.data_type())
        })?;
        ensure_no_nulls(array)?;
        Ok((0..array.len()).map(|i| array.value(i).to_vec()).collect())
    }
}


/// Null values are written through the builder's validity bitmap.
impl <T: ArrowSerialize> ArrowSerialize for Option<T> {
    fn descriptor() -> Descriptor {
        T::descriptor()
    }

    fn is_nullable() -> bool {
        true
    }

    fn append_to(&self, builder: &mut AnyBuilder) -> CodecResult<()> {
        match self {
            Some(value) => value.append_to(builder),
            None => builder.append_null()
        }
    }

    fn append_slot(&self, column: &mut ColumnBuilder) -> CodecResult<()> {
        match self {
            Some(value) => value.append_slot(column),
            None => column.append_null()
        }
    }

    fn num_nested(&self) -> usize {
        self.as_ref().map_or(0, T::num_nested)
    }
}


impl <T: ArrowDeserialize> ArrowDeserialize for Option<T> {
    fn from_arrow(array: &dyn Array) -> CodecResult<Vec<Self>> {
        T::from_arrow_opt(array)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::alloc::system_allocator;
    use crate::builder::ArrayBuilder;
    use arrow::array::{Int32Array, UInt16Array};

    #[test]
    fn scalars_round_trip() {
        let allocator = system_allocator();
        let mut builder = AnyBuilder::new(&String::descriptor(), &allocator).unwrap();
        for s in ["background", "person"] {
            s.to_string().append_to(&mut builder).unwrap();
        }
        let array = builder.finish();
        assert_eq!(String::from_arrow(&array).unwrap(), vec!["background", "person"]);
    }

    #[test]
    fn wrong_type_is_a_datatype_mismatch() {
        let array = Int32Array::from(vec![1, 2]);
        let err = u16::from_arrow(&array).unwrap_err();
        assert!(matches!(
            err,
            CodecError::DatatypeMismatch { expected: DataType::UInt16, actual: DataType::Int32 }
        ));
    }

    #[test]
    fn nulls_are_missing_data() {
        let array = UInt16Array::from(vec![Some(1), None]);
        assert!(matches!(u16::from_arrow(&array), Err(CodecError::MissingData(_))));
    }

    #[test]
    fn options_write_nulls() {
        let allocator = system_allocator();
        let mut builder = AnyBuilder::new(&Option::<u16>::descriptor(), &allocator).unwrap();
        for v in [Some(1u16), None, Some(3)] {
            v.append_to(&mut builder).unwrap();
        }
        let array = builder.finish();
        assert_eq!(array.null_count(), 1);
        assert!(array.is_null(1));
        assert_eq!(Option::<u16>::from_arrow(&array).unwrap(), vec![Some(1), None, Some(3)]);
        assert!(matches!(u16::from_arrow(&array), Err(CodecError::MissingData(_))));
    }

    #[test]
    fn option_strings_decode_only_valid_slots() {
        let allocator = system_allocator();
        let mut builder = AnyBuilder::new(&String::descriptor(), &allocator).unwrap();
        for v in [None, Some("person".to_string()), None] {
            v.append_to(&mut builder).unwrap();
        }
        let array = builder.finish();
        assert_eq!(
            Option::<String>::from_arrow(&array).unwrap(),
            vec![None, Some("person".to_string()), None]
        );
        assert!(Option::<u16>::is_nullable());
        assert!(!u16::is_nullable());
    }
}
