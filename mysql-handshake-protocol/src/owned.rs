use super::sealed::Sealed;
use super::{Deserialize, DeserializeError};

/// Converts a reference-based packet body to one that owns its fields.
///
/// A [`Borrow`](core::borrow::Borrow) impl for the borrowed record would be nontrivial,
/// since the owned variant joins fields the borrowed one keeps apart, which is why the
/// [`ToOwned`](alloc::borrow::ToOwned) trait isn't used.
///
/// This is also a From-style trait due to a blanket impl for [`Deserialize`] that it is used for.
pub trait FromBorrowedBody: Sealed {
    /// The borrowed variant of this packet body.
    type Borrowed<'b>: Deserialize<'b>;

    /// Converts the borrowed variant of this packet body to its owned variant.
    fn from_borrowed(borrowed: &Self::Borrowed<'_>) -> Self;
}

impl<'b, B: FromBorrowedBody> Deserialize<'b> for B {
    fn deserialize_from_buffer(buffer: &'b [u8]) -> Result<Self, DeserializeError> {
        let borrowed = <B as FromBorrowedBody>::Borrowed::deserialize_from_buffer(buffer)?;
        Ok(Self::from_borrowed(&borrowed))
    }
}
