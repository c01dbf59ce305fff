use arrow::array::{Array, AsArray};
use arrowlog_array::builder::AnyBuilder;
use arrowlog_array::{ArrowDeserialize, ArrowSerialize, CodecError, CodecResult, ColumnBuilder, Descriptor};


/// Optional sequence of values.
///
/// `Unset` and `Empty` are distinct: an unset archetype field
/// produces no column at all, an empty one produces a zero-length column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Collection<T> {
    Unset,
    Empty,
    Populated(Vec<T>)
}


impl <T> Default for Collection<T> {
    fn default() -> Self {
        Collection::Unset
    }
}


impl <T> Collection<T> {
    /// `Empty` for an empty vector, `Populated` otherwise.
    pub fn new(items: Vec<T>) -> Self {
        if items.is_empty() {
            Collection::Empty
        } else {
            Collection::Populated(items)
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, Collection::Unset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        match self {
            Collection::Populated(items) => items.len(),
            _ => 0
        }
    }

    /// Values of a set collection, `None` when unset.
    pub fn as_slice(&self) -> Option<&[T]> {
        match self {
            Collection::Unset => None,
            Collection::Empty => Some(&[]),
            Collection::Populated(items) => Some(items.as_slice())
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().unwrap_or(&[]).iter()
    }

    pub fn into_vec(self) -> Option<Vec<T>> {
        match self {
            Collection::Unset => None,
            Collection::Empty => Some(Vec::new()),
            Collection::Populated(items) => Some(items)
        }
    }
}


impl <T> From<Vec<T>> for Collection<T> {
    fn from(value: Vec<T>) -> Self {
        Collection::new(value)
    }
}


impl <T> FromIterator<T> for Collection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Collection::new(iter.into_iter().collect())
    }
}


impl <'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


impl <T: ArrowSerialize> ArrowSerialize for Collection<T> {
    fn descriptor() -> Descriptor {
        Descriptor::list(T::descriptor(), T::is_nullable())
    }

    fn append_to(&self, builder: &mut AnyBuilder) -> CodecResult<()> {
        let list = builder.as_list_mut()?;
        match self {
            Collection::Unset => list.append_absent(),
            Collection::Empty => list.append(),
            Collection::Populated(items) => list.append_values(items.as_slice())
        }
    }

    fn append_slot(&self, column: &mut ColumnBuilder) -> CodecResult<()> {
        match self {
            Collection::Unset => column.append_absent(),
            Collection::Empty => column.append_values::<T>(&[]),
            Collection::Populated(items) => column.append_values(items.as_slice())
        }
    }

    fn num_nested(&self) -> usize {
        self.len()
    }
}


/// Null list slots decode as `Unset`, zero-length slots as `Empty`.
impl <T: ArrowSerialize + ArrowDeserialize + Clone> ArrowDeserialize for Collection<T> {
    fn from_arrow(array: &dyn Array) -> CodecResult<Vec<Self>> {
        let list = array.as_list_opt::<i32>().ok_or_else(|| {
            CodecError::datatype_mismatch(Self::descriptor().to_arrow(), array.data_type())
        })?;

        let values = T::from_arrow(list.values())?;
        let offsets = list.value_offsets();

        let mut result = Vec::with_capacity(list.len());
        for (i, w) in offsets.windows(2).enumerate() {
            let start = w[0] as usize;
            let end = w[1] as usize;
            if start > end || end > values.len() {
                return Err(CodecError::OffsetOutOfBounds {
                    start,
                    end,
                    len: values.len()
                })
            }
            let item = if list.is_null(i) {
                Collection::Unset
            } else {
                Collection::new(values[start..end].to_vec())
            };
            result.push(item)
        }
        Ok(result)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ListArray, UInt16Array};
    use arrow::buffer::{NullBuffer, OffsetBuffer};
    use arrow::datatypes::{DataType, Field};
    use std::sync::Arc;

    #[test]
    fn len_and_slices() {
        assert_eq!(Collection::<u16>::Unset.as_slice(), None);
        assert_eq!(Collection::<u16>::Empty.as_slice(), Some(&[][..]));
        assert_eq!(Collection::from(vec![1u16, 2]).len(), 2);
        assert_eq!(Collection::<u16>::from(vec![]), Collection::Empty);
        assert!(!Collection::<u16>::Unset.is_set());
        assert!(Collection::<u16>::Empty.is_set());
    }

    #[test]
    fn null_slots_decode_as_unset() {
        let array = ListArray::new(
            Arc::new(Field::new_list_field(DataType::UInt16, false)),
            OffsetBuffer::new(vec![0, 2, 2, 2].into()),
            Arc::new(UInt16Array::from(vec![5, 6])),
            Some(NullBuffer::from(vec![true, false, true]))
        );
        let decoded = Collection::<u16>::from_arrow(&array).unwrap();
        assert_eq!(decoded, vec![
            Collection::Populated(vec![5, 6]),
            Collection::Unset,
            Collection::Empty
        ]);
    }

    #[test]
    fn wrong_item_type() {
        let array = UInt16Array::from(vec![1]);
        assert!(matches!(
            Collection::<u16>::from_arrow(&array),
            Err(CodecError::DatatypeMismatch { .. })
        ));
    }
}
