//! Typed encoding, the mirror of [`crate::decoder`].
//!
//! `impl EncodableTo<T> for E {}` allows `T` to be encoded into `E`, and
//! `impl Encoder<T, E> for T` performs it.

/// Converts `self` (of type `T`) into `E`.
pub trait Encoder<T, E: EncodableTo<T>> {
    /// Error produced when `self` cannot be represented as `E`.
    type Error;

    /// Encodes `self` into `E`.
    fn encode(&self) -> Result<E, Self::Error>;
}

/// Marker for destination types that `T` may be encoded into.
pub trait EncodableTo<T> {}
