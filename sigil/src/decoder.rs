//! Typed decoding between representations.
//!
//! A conversion from `T` to `D` needs two pieces:
//!
//! 1. `impl DecodableFrom<T> for D {}` declares that the pair is legal.
//! 2. `impl Decoder<T, D> for T` carries the conversion itself.
//!
//! Callers then pick the destination with a type annotation:
//!
//! ```no_run
//! use sigil::decoder::{DecodableFrom, Decoder};
//!
//! struct Hex(String);
//! struct Bytes(Vec<u8>);
//!
//! #[derive(Debug)]
//! struct BadHex;
//!
//! impl DecodableFrom<Hex> for Bytes {}
//!
//! impl Decoder<Hex, Bytes> for Hex {
//!     type Error = BadHex;
//!
//!     fn decode(&self) -> Result<Bytes, Self::Error> {
//!         (0..self.0.len())
//!             .step_by(2)
//!             .map(|i| u8::from_str_radix(&self.0[i..i + 2], 16).map_err(|_| BadHex))
//!             .collect::<Result<Vec<u8>, _>>()
//!             .map(Bytes)
//!     }
//! }
//!
//! let bytes: Bytes = Hex("cafe".to_string()).decode().unwrap();
//! assert_eq!(bytes.0, vec![0xca, 0xfe]);
//! ```

/// Converts `self` (of type `T`) into `D`.
pub trait Decoder<T, D: DecodableFrom<T>> {
    /// Error produced when the input does not describe a valid `D`.
    type Error;

    /// Decodes `self` into `D`.
    fn decode(&self) -> Result<D, Self::Error>;
}

/// Marker for destination types that may be decoded from `T`.
///
/// Without an explicit marker impl the compiler rejects `Decoder<T, D>`,
/// so every supported step of the parsing ladder is listed in code.
pub trait DecodableFrom<T> {}
