use crate::error::{invalid_argument, CodecError, CodecResult};
use arrow::datatypes::{DataType, Field, Fields};
use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::sync::Arc;


#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Boolean,
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64
}


impl ScalarType {
    pub fn to_arrow(&self) -> DataType {
        match self {
            ScalarType::Boolean => DataType::Boolean,
            ScalarType::Int8 => DataType::Int8,
            ScalarType::Int16 => DataType::Int16,
            ScalarType::Int32 => DataType::Int32,
            ScalarType::Int64 => DataType::Int64,
            ScalarType::UInt8 => DataType::UInt8,
            ScalarType::UInt16 => DataType::UInt16,
            ScalarType::UInt32 => DataType::UInt32,
            ScalarType::UInt64 => DataType::UInt64,
            ScalarType::Float32 => DataType::Float32,
            ScalarType::Float64 => DataType::Float64
        }
    }

    pub fn from_arrow(data_type: &DataType) -> Option<Self> {
        let ty = match data_type {
            DataType::Boolean => ScalarType::Boolean,
            DataType::Int8 => ScalarType::Int8,
            DataType::Int16 => ScalarType::Int16,
            DataType::Int32 => ScalarType::Int32,
            DataType::Int64 => ScalarType::Int64,
            DataType::UInt8 => ScalarType::UInt8,
            DataType::UInt16 => ScalarType::UInt16,
            DataType::UInt32 => ScalarType::UInt32,
            DataType::UInt64 => ScalarType::UInt64,
            DataType::Float32 => ScalarType::Float32,
            DataType::Float64 => ScalarType::Float64,
            _ => return None
        };
        Some(ty)
    }
}


/// Logical layout of a column.
///
/// A descriptor tree is immutable once built. Component types construct
/// theirs once and share it through [`DescriptorRef`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Descriptor {
    /// Fixed width value
    Scalar(ScalarType),
    /// Variable length byte string
    Binary,
    /// Variable length UTF-8 string
    Utf8,
    List {
        item: Box<Descriptor>,
        nullable: bool
    },
    /// Ordered fields, non-nullable unless declared otherwise
    Struct(Vec<FieldDescriptor>)
}


pub type DescriptorRef = Arc<Descriptor>;


#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: String,
    pub descriptor: Descriptor,
    pub nullable: bool
}


impl FieldDescriptor {
    pub fn new(name: impl Into<String>, descriptor: Descriptor) -> Self {
        Self {
            name: name.into(),
            descriptor,
            nullable: false
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}


impl Descriptor {
    pub fn list(item: Descriptor, nullable: bool) -> Self {
        Descriptor::List {
            item: Box::new(item),
            nullable
        }
    }

    pub fn new_struct(fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        Descriptor::Struct(fields.into_iter().collect())
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Descriptor::List { .. })
    }

    pub fn list_item(&self) -> Option<&Descriptor> {
        match self {
            Descriptor::List { item, .. } => Some(item),
            _ => None
        }
    }

    pub fn to_arrow(&self) -> DataType {
        match self {
            Descriptor::Scalar(ty) => ty.to_arrow(),
            Descriptor::Binary => DataType::Binary,
            Descriptor::Utf8 => DataType::Utf8,
            Descriptor::List { item, nullable } => {
                DataType::List(Arc::new(Field::new_list_field(item.to_arrow(), *nullable)))
            },
            Descriptor::Struct(fields) => DataType::Struct(struct_fields(fields))
        }
    }

    /// Inverse of [`Descriptor::to_arrow`] for the types a descriptor can express.
    pub fn from_arrow(data_type: &DataType) -> CodecResult<Self> {
        if let Some(ty) = ScalarType::from_arrow(data_type) {
            return Ok(Descriptor::Scalar(ty))
        }
        match data_type {
            DataType::Binary => Ok(Descriptor::Binary),
            DataType::Utf8 => Ok(Descriptor::Utf8),
            DataType::List(f) => Ok(Descriptor::list(
                Self::from_arrow(f.data_type())?,
                f.is_nullable()
            )),
            DataType::Struct(fields) => {
                let fields = fields.iter().map(|f| {
                    let descriptor = Self::from_arrow(f.data_type())?;
                    Ok(FieldDescriptor::new(f.name().as_str(), descriptor).with_nullable(f.is_nullable()))
                }).collect::<CodecResult<Vec<_>>>()?;
                Ok(Descriptor::Struct(fields))
            },
            ty => Err(invalid_argument!("unsupported arrow type - {}", ty))
        }
    }

    /// Checks that a builder can be constructed for this descriptor.
    pub fn validate(&self) -> CodecResult<()> {
        match self {
            Descriptor::Scalar(_) | Descriptor::Binary | Descriptor::Utf8 => Ok(()),
            Descriptor::List { item, .. } => item.validate(),
            Descriptor::Struct(fields) => {
                let mut names = HashSet::with_capacity(fields.len());
                for f in fields.iter() {
                    if !names.insert(f.name.as_str()) {
                        return Err(invalid_argument!("duplicate struct field `{}`", f.name))
                    }
                    f.descriptor.validate()?;
                }
                Ok(())
            }
        }
    }

    pub fn matches(&self, data_type: &DataType) -> bool {
        &self.to_arrow() == data_type
    }
}


pub(crate) fn struct_fields(fields: &[FieldDescriptor]) -> Fields {
    fields.iter()
        .map(|f| Field::new(f.name.as_str(), f.descriptor.to_arrow(), f.nullable))
        .collect()
}


impl Display for Descriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Descriptor::Scalar(ty) => write!(f, "{}", ty.to_arrow()),
            Descriptor::Binary => write!(f, "binary"),
            Descriptor::Utf8 => write!(f, "utf8"),
            Descriptor::List { item, nullable: true } => write!(f, "list<{}?>", item),
            Descriptor::List { item, nullable: false } => write!(f, "list<{}>", item),
            Descriptor::Struct(fields) => {
                write!(f, "struct<")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", field.name, field.descriptor)?;
                    if field.nullable {
                        write!(f, "?")?;
                    }
                }
                write!(f, ">")
            }
        }
    }
}


impl From<ScalarType> for Descriptor {
    fn from(value: ScalarType) -> Self {
        Descriptor::Scalar(value)
    }
}


impl TryFrom<&DataType> for Descriptor {
    type Error = CodecError;

    fn try_from(value: &DataType) -> Result<Self, Self::Error> {
        Descriptor::from_arrow(value)
    }
}
