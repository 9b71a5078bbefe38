//! Element identity.

use slotmap::new_key_type;

new_key_type! {
    /// A stable identifier for an element exposed to the accessibility tree.
    ///
    /// Outbound events are keyed by this ID so the owning application can
    /// route them back to the element that fired them.
    pub struct ElementId;
}

impl ElementId {
    /// Convert the ElementId to a raw u64 value.
    ///
    /// The raw value can be converted back using [`ElementId::from_raw`].
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }

    /// Create an ElementId from a raw u64 value.
    ///
    /// This does not check that the element still exists.
    #[inline]
    pub fn from_raw(raw: u64) -> Self {
        Self::from(slotmap::KeyData::from_ffi(raw))
    }
}
