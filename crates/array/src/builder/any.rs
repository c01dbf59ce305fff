use crate::alloc::AllocatorRef;
use crate::builder::{ArrayBuilder, BinaryBuilder, BooleanBuilder, ListBuilder, PrimitiveBuilder, StringBuilder, StructBuilder};
use crate::descriptor::{Descriptor, ScalarType};
use crate::error::{CodecError, CodecResult};
use arrow::array::{ArrayRef, ArrowPrimitiveType};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type, UInt16Type, UInt32Type, UInt64Type, UInt8Type};


/// Builder for any column a [`Descriptor`] can describe.
pub enum AnyBuilder {
    Boolean(BooleanBuilder),
    Int8(PrimitiveBuilder<Int8Type>),
    Int16(PrimitiveBuilder<Int16Type>),
    Int32(PrimitiveBuilder<Int32Type>),
    Int64(PrimitiveBuilder<Int64Type>),
    UInt8(PrimitiveBuilder<UInt8Type>),
    UInt16(PrimitiveBuilder<UInt16Type>),
    UInt32(PrimitiveBuilder<UInt32Type>),
    UInt64(PrimitiveBuilder<UInt64Type>),
    Float32(PrimitiveBuilder<Float32Type>),
    Float64(PrimitiveBuilder<Float64Type>),
    Binary(BinaryBuilder),
    Utf8(StringBuilder),
    List(Box<ListBuilder<AnyBuilder>>),
    Struct(StructBuilder)
}


macro_rules! dispatch {
    ($this:expr, $b:ident => $body:expr) => {
        match $this {
            AnyBuilder::Boolean($b) => $body,
            AnyBuilder::Int8($b) => $body,
            AnyBuilder::Int16($b) => $body,
            AnyBuilder::Int32($b) => $body,
            AnyBuilder::Int64($b) => $body,
            AnyBuilder::UInt8($b) => $body,
            AnyBuilder::UInt16($b) => $body,
            AnyBuilder::UInt32($b) => $body,
            AnyBuilder::UInt64($b) => $body,
            AnyBuilder::Float32($b) => $body,
            AnyBuilder::Float64($b) => $body,
            AnyBuilder::Binary($b) => $body,
            AnyBuilder::Utf8($b) => $body,
            AnyBuilder::List($b) => $body,
            AnyBuilder::Struct($b) => $body,
        }
    };
}


impl ArrayBuilder for AnyBuilder {
    fn data_type(&self) -> DataType {
        dispatch!(self, b => b.data_type())
    }

    fn len(&self) -> usize {
        dispatch!(self, b => b.len())
    }

    fn byte_size(&self) -> usize {
        dispatch!(self, b => b.byte_size())
    }

    fn reserve(&mut self, additional: usize) -> CodecResult<()> {
        dispatch!(self, b => b.reserve(additional))
    }

    fn finish(self) -> ArrayRef {
        match self {
            AnyBuilder::Boolean(b) => ArrayBuilder::finish(b),
            AnyBuilder::Int8(b) => ArrayBuilder::finish(b),
            AnyBuilder::Int16(b) => ArrayBuilder::finish(b),
            AnyBuilder::Int32(b) => ArrayBuilder::finish(b),
            AnyBuilder::Int64(b) => ArrayBuilder::finish(b),
            AnyBuilder::UInt8(b) => ArrayBuilder::finish(b),
            AnyBuilder::UInt16(b) => ArrayBuilder::finish(b),
            AnyBuilder::UInt32(b) => ArrayBuilder::finish(b),
            AnyBuilder::UInt64(b) => ArrayBuilder::finish(b),
            AnyBuilder::Float32(b) => ArrayBuilder::finish(b),
            AnyBuilder::Float64(b) => ArrayBuilder::finish(b),
            AnyBuilder::Binary(b) => ArrayBuilder::finish(b),
            AnyBuilder::Utf8(b) => ArrayBuilder::finish(b),
            AnyBuilder::List(b) => ArrayBuilder::finish(*b),
            AnyBuilder::Struct(b) => ArrayBuilder::finish(b),
        }
    }
}


impl AnyBuilder {
    pub fn new(descriptor: &Descriptor, allocator: &AllocatorRef) -> CodecResult<Self> {
        let builder = match descriptor {
            Descriptor::Scalar(ty) => match ty {
                ScalarType::Boolean => BooleanBuilder::new(0, allocator)?.into(),
                ScalarType::Int8 => PrimitiveBuilder::<Int8Type>::new(0, allocator)?.into(),
                ScalarType::Int16 => PrimitiveBuilder::<Int16Type>::new(0, allocator)?.into(),
                ScalarType::Int32 => PrimitiveBuilder::<Int32Type>::new(0, allocator)?.into(),
                ScalarType::Int64 => PrimitiveBuilder::<Int64Type>::new(0, allocator)?.into(),
                ScalarType::UInt8 => PrimitiveBuilder::<UInt8Type>::new(0, allocator)?.into(),
                ScalarType::UInt16 => PrimitiveBuilder::<UInt16Type>::new(0, allocator)?.into(),
                ScalarType::UInt32 => PrimitiveBuilder::<UInt32Type>::new(0, allocator)?.into(),
                ScalarType::UInt64 => PrimitiveBuilder::<UInt64Type>::new(0, allocator)?.into(),
                ScalarType::Float32 => PrimitiveBuilder::<Float32Type>::new(0, allocator)?.into(),
                ScalarType::Float64 => PrimitiveBuilder::<Float64Type>::new(0, allocator)?.into(),
            },
            Descriptor::Binary => BinaryBuilder::new(0, 0, allocator)?.into(),
            Descriptor::Utf8 => StringBuilder::new(0, 0, allocator)?.into(),
            Descriptor::List { item, nullable } => {
                let values = Self::new(item, allocator)?;
                ListBuilder::new(0, values, *nullable, allocator)?.into()
            },
            Descriptor::Struct(fields) => StructBuilder::new(fields, allocator)?.into()
        };
        Ok(builder)
    }

    /// Appends a null value.
    ///
    /// Inside a struct, nulls are pushed down to every field,
    /// so child nulls always stay masked by the parent.
    pub fn append_null(&mut self) -> CodecResult<()> {
        match self {
            AnyBuilder::Boolean(b) => b.append_option(None),
            AnyBuilder::Int8(b) => b.append_option(None),
            AnyBuilder::Int16(b) => b.append_option(None),
            AnyBuilder::Int32(b) => b.append_option(None),
            AnyBuilder::Int64(b) => b.append_option(None),
            AnyBuilder::UInt8(b) => b.append_option(None),
            AnyBuilder::UInt16(b) => b.append_option(None),
            AnyBuilder::UInt32(b) => b.append_option(None),
            AnyBuilder::UInt64(b) => b.append_option(None),
            AnyBuilder::Float32(b) => b.append_option(None),
            AnyBuilder::Float64(b) => b.append_option(None),
            AnyBuilder::Binary(b) => b.append_null(),
            AnyBuilder::Utf8(b) => b.append_null(),
            AnyBuilder::List(b) => b.append_null(),
            AnyBuilder::Struct(b) => b.append_null(),
        }
    }

    pub fn as_primitive_mut<T: AnyPrimitive>(&mut self) -> CodecResult<&mut PrimitiveBuilder<T>> {
        T::downcast(self)
    }

    pub fn as_boolean_mut(&mut self) -> CodecResult<&mut BooleanBuilder> {
        match self {
            AnyBuilder::Boolean(b) => Ok(b),
            other => Err(CodecError::builder_mismatch("Boolean", &other.data_type()))
        }
    }

    pub fn as_binary_mut(&mut self) -> CodecResult<&mut BinaryBuilder> {
        match self {
            AnyBuilder::Binary(b) => Ok(b),
            other => Err(CodecError::builder_mismatch("Binary", &other.data_type()))
        }
    }

    pub fn as_string_mut(&mut self) -> CodecResult<&mut StringBuilder> {
        match self {
            AnyBuilder::Utf8(b) => Ok(b),
            other => Err(CodecError::builder_mismatch("Utf8", &other.data_type()))
        }
    }

    pub fn as_list_mut(&mut self) -> CodecResult<&mut ListBuilder<AnyBuilder>> {
        match self {
            AnyBuilder::List(b) => Ok(b.as_mut()),
            other => Err(CodecError::builder_mismatch("List", &other.data_type()))
        }
    }

    pub fn as_struct_mut(&mut self) -> CodecResult<&mut StructBuilder> {
        match self {
            AnyBuilder::Struct(b) => Ok(b),
            other => Err(CodecError::builder_mismatch("Struct", &other.data_type()))
        }
    }
}


/// Primitive types [`AnyBuilder`] has a variant for.
pub trait AnyPrimitive: ArrowPrimitiveType + Sized {
    fn downcast(builder: &mut AnyBuilder) -> CodecResult<&mut PrimitiveBuilder<Self>>;
}


impl From<BooleanBuilder> for AnyBuilder {
    fn from(value: BooleanBuilder) -> Self {
        AnyBuilder::Boolean(value)
    }
}


macro_rules! impl_primitive {
    ($kind:ident, $ty:ident) => {
        impl From<PrimitiveBuilder<$ty>> for AnyBuilder {
            fn from(value: PrimitiveBuilder<$ty>) -> Self {
                AnyBuilder::$kind(value)
            }
        }

        impl AnyPrimitive for $ty {
            fn downcast(builder: &mut AnyBuilder) -> CodecResult<&mut PrimitiveBuilder<Self>> {
                match builder {
                    AnyBuilder::$kind(b) => Ok(b),
                    other => Err(CodecError::builder_mismatch(stringify!($kind), &other.data_type()))
                }
            }
        }
    };
}
impl_primitive!(Int8, Int8Type);
impl_primitive!(Int16, Int16Type);
impl_primitive!(Int32, Int32Type);
impl_primitive!(Int64, Int64Type);
impl_primitive!(UInt8, UInt8Type);
impl_primitive!(UInt16, UInt16Type);
impl_primitive!(UInt32, UInt32Type);
impl_primitive!(UInt64, UInt64Type);
impl_primitive!(Float32, Float32Type);
impl_primitive!(Float64, Float64Type);


impl From<BinaryBuilder> for AnyBuilder {
    fn from(value: BinaryBuilder) -> Self {
        AnyBuilder::Binary(value)
    }
}


impl From<StringBuilder> for AnyBuilder {
    fn from(value: StringBuilder) -> Self {
        AnyBuilder::Utf8(value)
    }
}


impl From<ListBuilder<AnyBuilder>> for AnyBuilder {
    fn from(value: ListBuilder<AnyBuilder>) -> Self {
        AnyBuilder::List(Box::new(value))
    }
}


impl From<StructBuilder> for AnyBuilder {
    fn from(value: StructBuilder) -> Self {
        AnyBuilder::Struct(value)
    }
}
