/// Declares a struct datatype serialized as an arrow struct with one child per field.
#[macro_export]
macro_rules! arrow_struct {
    (
        $(#[$meta:meta])*
        $name:ident : $fqname:literal {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $ty,
            )*
        }

        impl $name {
            pub const NAME: &'static str = $fqname;
        }

        impl $crate::array::ArrowSerialize for $name {
            fn descriptor() -> $crate::array::Descriptor {
                use $crate::array::{ArrowSerialize, Descriptor, FieldDescriptor};
                Descriptor::new_struct([
                    $(
                    FieldDescriptor::new(stringify!($field), <$ty as ArrowSerialize>::descriptor())
                        .with_nullable(<$ty as ArrowSerialize>::is_nullable()),
                    )*
                ])
            }

            #[allow(unused_assignments)]
            fn append_to(&self, builder: &mut $crate::array::builder::AnyBuilder) -> $crate::array::CodecResult<()> {
                let builder = builder.as_struct_mut()?;
                let mut i = 0;
                $(
                <$ty as $crate::array::ArrowSerialize>::append_to(&self.$field, builder.field_mut(i)?)?;
                i += 1;
                )*
                builder.append()
            }
        }

        impl $crate::array::ArrowDeserialize for $name {
            fn from_arrow(
                array: &dyn $crate::__arrow::array::Array
            ) -> $crate::array::CodecResult<Vec<Self>>
            {
                use $crate::__arrow::array::{Array, AsArray};
                use $crate::array::{ArrowDeserialize, ArrowSerialize, CodecError, ResultExt};

                let array = array.as_struct_opt().ok_or_else(|| {
                    CodecError::datatype_mismatch(
                        <Self as ArrowSerialize>::descriptor().to_arrow(),
                        array.data_type()
                    )
                }).with_context($fqname)?;

                $crate::array::ensure_no_nulls(array).with_context($fqname)?;

                $(
                let $field = array.column_by_name(stringify!($field)).ok_or_else(|| {
                    CodecError::MissingData("field is not present".to_string())
                }).with_context(concat!($fqname, "#", stringify!($field)))?;

                let mut $field = <$ty as ArrowDeserialize>::from_arrow($field.as_ref())
                    .with_context(concat!($fqname, "#", stringify!($field)))?
                    .into_iter();
                )*

                let mut result = Vec::with_capacity(array.len());
                for _ in 0..array.len() {
                    result.push(Self {
                        $(
                        $field: $field.next().ok_or_else(|| {
                            CodecError::MissingData("child array is shorter than the struct".to_string())
                        }).with_context(concat!($fqname, "#", stringify!($field)))?,
                        )*
                    })
                }
                Ok(result)
            }
        }
    };
}


/// Declares a single field wrapper that is serialized exactly like its field.
#[macro_export]
macro_rules! arrow_newtype {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty) : $fqname:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name(pub $inner);

        impl $name {
            pub const NAME: &'static str = $fqname;
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        $crate::__delegate_arrow!($name, $inner, 0);
    };
    (
        $(#[$meta:meta])*
        $name:ident { $field:ident : $inner:ty } : $fqname:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name {
            pub $field: $inner
        }

        impl $name {
            pub const NAME: &'static str = $fqname;
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self { $field: value }
            }
        }

        $crate::__delegate_arrow!($name, $inner, $field);
    };
}


/// Declares a component: a newtype over a datatype registered under a fully qualified name.
#[macro_export]
macro_rules! component {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty) : $fqname:literal
    ) => {
        $crate::arrow_newtype! {
            $(#[$meta])*
            $name($inner) : $fqname
        }

        impl $crate::Component for $name {
            const NAME: &'static str = $fqname;
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident { $field:ident : $inner:ty } : $fqname:literal
    ) => {
        $crate::arrow_newtype! {
            $(#[$meta])*
            $name { $field : $inner } : $fqname
        }

        impl $crate::Component for $name {
            const NAME: &'static str = $fqname;
        }
    };
}


#[doc(hidden)]
#[macro_export]
macro_rules! __delegate_arrow {
    ($name:ident, $inner:ty, $acc:tt) => {
        impl $crate::array::ArrowSerialize for $name {
            fn descriptor() -> $crate::array::Descriptor {
                <$inner as $crate::array::ArrowSerialize>::descriptor()
            }

            fn is_nullable() -> bool {
                <$inner as $crate::array::ArrowSerialize>::is_nullable()
            }

            #[inline]
            fn append_to(&self, builder: &mut $crate::array::builder::AnyBuilder) -> $crate::array::CodecResult<()> {
                $crate::array::ArrowSerialize::append_to(&self.$acc, builder)
            }

            fn append_slot(&self, column: &mut $crate::array::ColumnBuilder) -> $crate::array::CodecResult<()> {
                $crate::array::ArrowSerialize::append_slot(&self.$acc, column)
            }

            fn num_nested(&self) -> usize {
                $crate::array::ArrowSerialize::num_nested(&self.$acc)
            }
        }

        impl $crate::array::ArrowDeserialize for $name {
            fn from_arrow(
                array: &dyn $crate::__arrow::array::Array
            ) -> $crate::array::CodecResult<Vec<Self>>
            {
                let values = <$inner as $crate::array::ArrowDeserialize>::from_arrow(array)?;
                Ok(values.into_iter().map(|v| Self { $acc: v }).collect())
            }
        }
    };
}


/// Declares an archetype: a record of optional component collections
/// serialized into one batch, one column per set field.
///
/// Every field names its fluent setter after `=>`.
#[macro_export]
macro_rules! archetype {
    (
        $(#[$meta:meta])*
        $name:ident : $fqname:literal, indicator: $indicator:literal {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $component:ty => $setter:ident,
            )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $name {
            $(
                $(#[$field_meta])*
                pub $field: $crate::Collection<$component>,
            )*
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            $(
            pub fn $setter<I>(mut self, values: I) -> Self
            where
                I: IntoIterator,
                I::Item: Into<$component>
            {
                self.$field = values.into_iter().map(Into::into).collect();
                self
            }
            )*
        }

        impl $crate::Archetype for $name {
            const NAME: &'static str = $fqname;
            const INDICATOR: &'static str = $indicator;

            fn archetype_descriptor() -> $crate::ArchetypeDescriptor {
                $crate::ArchetypeDescriptor::new(
                    $fqname,
                    $indicator,
                    vec![
                        $(
                        $crate::ArchetypeField {
                            name: stringify!($field),
                            component: <$component as $crate::Component>::component_descriptor()
                        },
                        )*
                    ]
                )
            }

            fn component_batches(&self) -> Vec<&dyn $crate::ComponentBatch> {
                vec![
                    $(
                    &self.$field as &dyn $crate::ComponentBatch,
                    )*
                ]
            }

            fn from_batch(batch: &$crate::Batch) -> $crate::array::CodecResult<Self> {
                Ok(Self {
                    $(
                    $field: batch.collection::<$component>(stringify!($field))?,
                    )*
                })
            }
        }
    };
}
