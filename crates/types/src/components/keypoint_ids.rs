use crate::datatypes::KeypointId;
use crate::Collection;


crate::component! {
    /// Keypoints of one instance, in the order their points were logged.
    #[derive(Default, Eq)]
    KeypointIds(Collection<KeypointId>) : "arrowlog.components.KeypointIds"
}


impl FromIterator<u16> for KeypointIds {
    fn from_iter<T: IntoIterator<Item = u16>>(iter: T) -> Self {
        Self(iter.into_iter().map(KeypointId).collect())
    }
}
