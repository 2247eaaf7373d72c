//! ASN.1 element model.
//!
//! Turns the DER [`Tlv`] tree into typed [`Element`]s and back. Universal
//! types used by X.509 and key formats are decoded eagerly; context-specific
//! values are kept as tagged wrappers so the schema-aware layers above can
//! interpret them.

use std::{fmt::Display, str::FromStr};

use chrono::NaiveDateTime;
use error::{Error, Result};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::ToPrimitive;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sigil::decoder::{DecodableFrom, Decoder};
use sigil::encoder::{EncodableTo, Encoder};
use sigil_der::{Der, PrimitiveTag, Tag, Tlv};

pub mod error;

#[derive(Debug, Clone)]
pub struct ASN1Object {
    elements: Vec<Element>,
}

impl ASN1Object {
    pub fn new(elements: Vec<Element>) -> Self {
        ASN1Object { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }
}

impl DecodableFrom<Der> for ASN1Object {}

impl Decoder<Der, ASN1Object> for Der {
    type Error = Error;

    fn decode(&self) -> Result<ASN1Object> {
        let elements = self
            .elements()
            .iter()
            .map(Element::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(ASN1Object { elements })
    }
}

impl EncodableTo<ASN1Object> for Der {}

impl Encoder<ASN1Object, Der> for ASN1Object {
    type Error = Error;

    fn encode(&self) -> Result<Der> {
        let tlvs = self
            .elements
            .iter()
            .map(Tlv::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(Der::new(tlvs))
    }
}

impl TryFrom<&[u8]> for ASN1Object {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        let der: Der = value.decode()?;
        der.decode()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    Boolean(bool),
    Integer(Integer),
    BitString(BitString),
    OctetString(OctetString),
    Null,
    ObjectIdentifier(ObjectIdentifier),
    UTF8String(String),
    Sequence(Vec<Element>),
    Set(Vec<Element>),
    PrintableString(String),
    T61String(String),
    IA5String(String),
    BMPString(String),
    UTCTime(NaiveDateTime),
    GeneralizedTime(NaiveDateTime),
    /// `constructed` values are EXPLICIT wrappers; several children are
    /// gathered into a `Sequence`. Primitive (IMPLICIT) values keep their
    /// raw content octets as an `OctetString`.
    ContextSpecific {
        slot: u8,
        constructed: bool,
        element: Box<Element>,
    },
    Unimplemented(Tlv),
}

impl Element {
    /// Text of any of the character string types.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Element::UTF8String(s)
            | Element::PrintableString(s)
            | Element::T61String(s)
            | Element::IA5String(s)
            | Element::BMPString(s) => Some(s),
            _ => None,
        }
    }

    /// Encodes this single element as DER bytes.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        let der = ASN1Object::new(vec![self.clone()]).encode()?;
        Ok(der.encode()?)
    }
}

fn primitive_data(tlv: &Tlv) -> &[u8] {
    tlv.data().unwrap_or_default()
}

fn children(tlv: &Tlv) -> Result<Vec<Element>> {
    tlv.tlvs()
        .unwrap_or_default()
        .iter()
        .map(Element::try_from)
        .collect()
}

impl TryFrom<&Tlv> for Element {
    type Error = Error;

    fn try_from(tlv: &Tlv) -> Result<Self> {
        match tlv.tag() {
            Tag::Primitive(primitive_tag, _) => {
                let data = primitive_data(tlv);
                match primitive_tag {
                    PrimitiveTag::Boolean => match data {
                        [0x00] => Ok(Element::Boolean(false)),
                        [0xff] => Ok(Element::Boolean(true)),
                        _ => Err(Error::InvalidBoolean),
                    },
                    PrimitiveTag::Integer => {
                        if data.is_empty() {
                            return Err(Error::InvalidInteger("no data".to_string()));
                        }
                        Ok(Element::Integer(Integer::from(data)))
                    }
                    PrimitiveTag::BitString => Ok(Element::BitString(BitString::try_from(data)?)),
                    PrimitiveTag::OctetString => Ok(Element::OctetString(OctetString::from(data))),
                    PrimitiveTag::Null => Ok(Element::Null),
                    PrimitiveTag::ObjectIdentifier => Ok(Element::ObjectIdentifier(
                        ObjectIdentifier::try_from(data)?,
                    )),
                    PrimitiveTag::UTF8String => Ok(Element::UTF8String(
                        String::from_utf8(data.to_vec()).map_err(|e| Error::InvalidString {
                            kind: "UTF8String",
                            msg: e.to_string(),
                        })?,
                    )),
                    PrimitiveTag::PrintableString => {
                        Ok(Element::PrintableString(ascii_string("PrintableString", data)?))
                    }
                    PrimitiveTag::IA5String => {
                        Ok(Element::IA5String(ascii_string("IA5String", data)?))
                    }
                    // Teletex text is read as Latin-1, as most decoders do.
                    PrimitiveTag::T61String => Ok(Element::T61String(
                        data.iter().map(|b| char::from(*b)).collect(),
                    )),
                    PrimitiveTag::BMPString => Ok(Element::BMPString(parse_bmp_string(data)?)),
                    PrimitiveTag::UTCTime => Ok(Element::UTCTime(parse_utc_time(data)?)),
                    PrimitiveTag::GeneralizedTime => {
                        Ok(Element::GeneralizedTime(parse_generalized_time(data)?))
                    }
                    PrimitiveTag::Sequence => Ok(Element::Sequence(children(tlv)?)),
                    PrimitiveTag::Set => Ok(Element::Set(children(tlv)?)),
                    PrimitiveTag::Unimplemented(n) => {
                        log::trace!("keeping unimplemented tag 0x{:02x} as raw TLV", n);
                        Ok(Element::Unimplemented(tlv.clone()))
                    }
                }
            }
            Tag::ContextSpecific { slot, constructed } => {
                if !*constructed {
                    return Ok(Element::ContextSpecific {
                        slot: *slot,
                        constructed: false,
                        element: Box::new(Element::OctetString(OctetString::from(
                            primitive_data(tlv),
                        ))),
                    });
                }
                let mut elements = children(tlv)?;
                let element = match elements.len() {
                    0 => {
                        return Err(Error::InvalidContextSpecific {
                            slot: *slot,
                            msg: "constructed value has no content".to_string(),
                        });
                    }
                    1 => elements.remove(0),
                    _ => Element::Sequence(elements),
                };
                Ok(Element::ContextSpecific {
                    slot: *slot,
                    constructed: true,
                    element: Box::new(element),
                })
            }
        }
    }
}

impl TryFrom<&Element> for Tlv {
    type Error = Error;

    fn try_from(element: &Element) -> Result<Self> {
        let primitive = |tag: PrimitiveTag, data: Vec<u8>| -> Result<Tlv> {
            Ok(Tlv::new_primitive(Tag::universal(tag), data))
        };
        let constructed = |tag: PrimitiveTag, elements: &[Element]| -> Result<Tlv> {
            let tlvs = elements
                .iter()
                .map(Tlv::try_from)
                .collect::<Result<Vec<_>>>()?;
            Ok(Tlv::new_constructed(Tag::universal(tag), tlvs))
        };

        match element {
            Element::Boolean(b) => primitive(PrimitiveTag::Boolean, vec![if *b { 0xff } else { 0x00 }]),
            Element::Integer(i) => primitive(PrimitiveTag::Integer, i.to_signed_bytes_be()),
            Element::BitString(bs) => primitive(PrimitiveTag::BitString, Vec::from(bs.clone())),
            Element::OctetString(os) => primitive(PrimitiveTag::OctetString, os.as_bytes().to_vec()),
            Element::Null => primitive(PrimitiveTag::Null, vec![]),
            Element::ObjectIdentifier(oid) => primitive(PrimitiveTag::ObjectIdentifier, Vec::try_from(oid)?),
            Element::UTF8String(s) => primitive(PrimitiveTag::UTF8String, s.as_bytes().to_vec()),
            Element::PrintableString(s) => primitive(PrimitiveTag::PrintableString, s.as_bytes().to_vec()),
            Element::IA5String(s) => primitive(PrimitiveTag::IA5String, s.as_bytes().to_vec()),
            Element::T61String(s) => primitive(
                PrimitiveTag::T61String,
                s.chars()
                    .map(|c| u8::try_from(c).map_err(|e| Error::InvalidString { kind: "T61String", msg: e.to_string() }))
                    .collect::<Result<Vec<u8>>>()?,
            ),
            Element::BMPString(s) => {
                let mut data = Vec::with_capacity(s.len() * 2);
                for unit in s.encode_utf16() {
                    data.extend_from_slice(&unit.to_be_bytes());
                }
                primitive(PrimitiveTag::BMPString, data)
            }
            Element::UTCTime(dt) => primitive(PrimitiveTag::UTCTime, dt.format("%y%m%d%H%M%SZ").to_string().into_bytes()),
            Element::GeneralizedTime(dt) => primitive(PrimitiveTag::GeneralizedTime, dt.format("%Y%m%d%H%M%SZ").to_string().into_bytes()),
            Element::Sequence(elements) => constructed(PrimitiveTag::Sequence, elements),
            Element::Set(elements) => constructed(PrimitiveTag::Set, elements),
            Element::ContextSpecific {
                slot,
                constructed,
                element,
            } => {
                let tag = Tag::context_specific(*slot, *constructed);
                if *constructed {
                    return Ok(Tlv::new_constructed(tag, vec![Tlv::try_from(element.as_ref())?]));
                }
                // IMPLICIT: only the content octets of the inner value are written
                let inner = Tlv::try_from(element.as_ref())?;
                let data = inner.data().ok_or_else(|| {
                    Error::InvalidElement("IMPLICIT tagging requires a primitive inner element".to_string())
                })?;
                Ok(Tlv::new_primitive(tag, data.to_vec()))
            }
            Element::Unimplemented(tlv) => Ok(tlv.clone()),
        }
    }
}

impl EncodableTo<Element> for Tlv {}

impl Encoder<Element, Tlv> for Element {
    type Error = Error;

    fn encode(&self) -> Result<Tlv> {
        Tlv::try_from(self)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Boolean(b) => write!(f, "Boolean({})", b),
            Element::Integer(i) => write!(f, "Integer({})", i),
            Element::BitString(bs) => write!(f, "BitString({})", bs),
            Element::OctetString(os) => write!(f, "OctetString({})", os),
            Element::Null => write!(f, "Null"),
            Element::ObjectIdentifier(oid) => write!(f, "ObjectIdentifier({})", oid),
            Element::UTF8String(s) => write!(f, "UTF8String({})", s),
            Element::PrintableString(s) => write!(f, "PrintableString({})", s),
            Element::T61String(s) => write!(f, "T61String({})", s),
            Element::IA5String(s) => write!(f, "IA5String({})", s),
            Element::BMPString(s) => write!(f, "BMPString({})", s),
            Element::UTCTime(dt) => write!(f, "UTCTime({})", dt),
            Element::GeneralizedTime(dt) => write!(f, "GeneralizedTime({})", dt),
            Element::Sequence(seq) => write!(f, "Sequence({} elements)", seq.len()),
            Element::Set(set) => write!(f, "Set({} elements)", set.len()),
            Element::ContextSpecific {
                slot,
                constructed,
                element,
            } => write!(
                f,
                "ContextSpecific(slot: {}, constructed: {}, element: {})",
                slot, constructed, element
            ),
            Element::Unimplemented(tlv) => write!(f, "Unimplemented({:?})", tlv.tag()),
        }
    }
}

fn ascii_string(kind: &'static str, data: &[u8]) -> Result<String> {
    if !data.is_ascii() {
        return Err(Error::InvalidString {
            kind,
            msg: "non-ASCII byte".to_string(),
        });
    }
    String::from_utf8(data.to_vec()).map_err(|e| Error::InvalidString {
        kind,
        msg: e.to_string(),
    })
}

// BMPString is UCS-2 big-endian; unpaired surrogates are rejected.
fn parse_bmp_string(data: &[u8]) -> Result<String> {
    if data.len() % 2 != 0 {
        return Err(Error::InvalidString {
            kind: "BMPString",
            msg: format!("odd byte length {}", data.len()),
        });
    }
    let units = data
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::InvalidString {
            kind: "BMPString",
            msg: e.to_string(),
        })
}

/// DER INTEGER. Arbitrary precision, two's complement on the wire.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Integer {
    inner: BigInt,
}

impl Integer {
    /// Non-negative integer from unsigned big-endian magnitude bytes.
    pub fn from_unsigned_bytes_be(bytes: &[u8]) -> Self {
        Integer {
            inner: BigInt::from_bytes_be(Sign::Plus, bytes),
        }
    }

    pub fn as_bigint(&self) -> &BigInt {
        &self.inner
    }

    /// `None` for negative values.
    pub fn to_biguint(&self) -> Option<BigUint> {
        self.inner.to_biguint()
    }

    pub fn to_signed_bytes_be(&self) -> Vec<u8> {
        self.inner.to_signed_bytes_be()
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.inner.to_u64()
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.inner.to_i64()
    }
}

impl From<&[u8]> for Integer {
    fn from(value: &[u8]) -> Self {
        Integer {
            inner: BigInt::from_signed_bytes_be(value),
        }
    }
}

impl From<Vec<u8>> for Integer {
    fn from(value: Vec<u8>) -> Self {
        Integer::from(value.as_slice())
    }
}

impl From<BigUint> for Integer {
    fn from(value: BigUint) -> Self {
        Integer {
            inner: BigInt::from(value),
        }
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer {
            inner: BigInt::from(value),
        }
    }
}

impl TryFrom<&Integer> for u64 {
    type Error = Error;

    fn try_from(value: &Integer) -> Result<Self> {
        value
            .to_u64()
            .ok_or_else(|| Error::InvalidInteger("value out of range for u64".to_string()))
    }
}

impl TryFrom<&Integer> for BigUint {
    type Error = Error;

    fn try_from(value: &Integer) -> Result<Self> {
        value
            .to_biguint()
            .ok_or_else(|| Error::InvalidInteger("negative value".to_string()))
    }
}

impl Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl Serialize for Integer {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.inner.to_string())
    }
}

impl<'de> Deserialize<'de> for Integer {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let inner = s.parse::<BigInt>().map_err(serde::de::Error::custom)?;
        Ok(Integer { inner })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier {
    inner: Vec<u64>,
}

impl ObjectIdentifier {
    pub fn arcs(&self) -> &[u64] {
        &self.inner
    }
}

fn read_base128(bytes: &[u8]) -> Result<Vec<u64>> {
    let mut values = Vec::new();
    let mut val = 0u64;
    let mut pending = false;
    for b in bytes {
        if val > (u64::MAX >> 7) {
            return Err(Error::InvalidObjectIdentifier("arc overflows u64".to_string()));
        }
        val = (val << 7) | u64::from(b & 0x7f);
        pending = b & 0x80 != 0;
        if !pending {
            values.push(val);
            val = 0;
        }
    }
    if pending {
        return Err(Error::InvalidObjectIdentifier("incomplete encoding".to_string()));
    }
    Ok(values)
}

fn write_base128(mut value: u64, out: &mut Vec<u8>) {
    let mut encoded = vec![(value & 0x7f) as u8];
    value >>= 7;
    while value > 0 {
        encoded.push((value & 0x7f) as u8 | 0x80);
        value >>= 7;
    }
    out.extend(encoded.iter().rev());
}

impl TryFrom<&[u8]> for ObjectIdentifier {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        let subidentifiers = read_base128(value)?;
        let (first, rest) = subidentifiers
            .split_first()
            .ok_or_else(|| Error::InvalidObjectIdentifier("no data".to_string()))?;
        // X.690 8.19.4: the first subidentifier packs the first two arcs
        let (a, b) = match *first {
            v if v < 40 => (0, v),
            v if v < 80 => (1, v - 40),
            v => (2, v - 80),
        };
        let mut inner = Vec::with_capacity(subidentifiers.len() + 1);
        inner.extend([a, b]);
        inner.extend_from_slice(rest);
        Ok(ObjectIdentifier { inner })
    }
}

impl TryFrom<&ObjectIdentifier> for Vec<u8> {
    type Error = Error;

    fn try_from(oid: &ObjectIdentifier) -> Result<Self> {
        let [a, b, rest @ ..] = oid.inner.as_slice() else {
            return Err(Error::InvalidObjectIdentifier(format!(
                "needs at least two arcs: {}",
                oid
            )));
        };
        if *a > 2 || (*a < 2 && *b >= 40) {
            return Err(Error::InvalidObjectIdentifier(format!(
                "invalid leading arcs: {}",
                oid
            )));
        }
        let mut result = Vec::new();
        write_base128(a * 40 + b, &mut result);
        for v in rest {
            write_base128(*v, &mut result);
        }
        Ok(result)
    }
}

impl Display for ObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arcs = self
            .inner
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", arcs)
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let inner = s
            .split('.')
            .map(|arc| arc.parse::<u64>().map_err(Error::ParseInt))
            .collect::<Result<Vec<u64>>>()?;
        if inner.len() < 2 {
            return Err(Error::InvalidObjectIdentifier(format!(
                "needs at least two arcs: {}",
                s
            )));
        }
        Ok(ObjectIdentifier { inner })
    }
}

impl PartialEq<&str> for ObjectIdentifier {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

impl Serialize for ObjectIdentifier {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ObjectIdentifier {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ObjectIdentifier::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitString {
    unused: u8,
    data: Vec<u8>,
}

impl BitString {
    pub fn new(unused: u8, data: Vec<u8>) -> Self {
        BitString { unused, data }
    }

    pub fn unused_bits(&self) -> u8 {
        self.unused
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn bit_len(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.unused as usize)
    }
}

impl TryFrom<&[u8]> for BitString {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        let (unused, data) = value
            .split_first()
            .ok_or_else(|| Error::InvalidBitString("no data".to_string()))?;
        if *unused > 7 || (data.is_empty() && *unused != 0) {
            return Err(Error::InvalidBitString(format!(
                "unused bits {} out of range",
                unused
            )));
        }
        Ok(BitString {
            unused: *unused,
            data: data.to_vec(),
        })
    }
}

impl From<BitString> for Vec<u8> {
    fn from(value: BitString) -> Self {
        let mut result = Vec::with_capacity(value.data.len() + 1);
        result.push(value.unused);
        result.extend(value.data);
        result
    }
}

impl Display for BitString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hex = self
            .data
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(":");
        write!(f, "{} bits [{}]", self.bit_len(), hex)
    }
}

impl Serialize for BitString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("BitString", 2)?;
        state.serialize_field("bit_length", &self.bit_len())?;
        state.serialize_field(
            "bits",
            &self
                .data
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(":"),
        )?;
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OctetString {
    inner: Vec<u8>,
}

impl OctetString {
    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.inner
    }
}

impl From<&[u8]> for OctetString {
    fn from(value: &[u8]) -> Self {
        OctetString {
            inner: value.to_vec(),
        }
    }
}

impl From<Vec<u8>> for OctetString {
    fn from(value: Vec<u8>) -> Self {
        OctetString { inner: value }
    }
}

impl AsRef<[u8]> for OctetString {
    fn as_ref(&self) -> &[u8] {
        &self.inner
    }
}

impl Display for OctetString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for b in &self.inner {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl Serialize for OctetString {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Reads the DER structure carried inside an OCTET STRING (extension values,
/// PKCS#8 private keys).
impl TryFrom<&OctetString> for ASN1Object {
    type Error = Error;

    fn try_from(value: &OctetString) -> Result<Self> {
        ASN1Object::try_from(value.as_bytes())
    }
}

fn time_str<'a>(data: &'a [u8], err: fn(String) -> Error) -> Result<&'a str> {
    let s = std::str::from_utf8(data).map_err(|e| err(e.to_string()))?;
    if !s.ends_with('Z') {
        return Err(err(format!("not in UTC: {}", s)));
    }
    Ok(s)
}

/// `YYMMDDHHMMSSZ`. RFC 5280 4.1.2.5.1: YY >= 50 is 19YY, otherwise 20YY.
fn parse_utc_time(data: &[u8]) -> Result<NaiveDateTime> {
    let s = time_str(data, Error::InvalidUtcTime)?;
    let yy = s
        .get(0..2)
        .and_then(|y| y.parse::<u32>().ok())
        .ok_or_else(|| Error::InvalidUtcTime(format!("invalid year: {}", s)))?;
    let century = if yy >= 50 { "19" } else { "20" };
    NaiveDateTime::parse_from_str(&format!("{}{}", century, s), "%Y%m%d%H%M%SZ")
        .map_err(|e| Error::InvalidUtcTime(format!("{}: {}", s, e)))
}

/// `YYYYMMDDHHMMSS[.fff]Z`
fn parse_generalized_time(data: &[u8]) -> Result<NaiveDateTime> {
    let s = time_str(data, Error::InvalidGeneralizedTime)?;
    NaiveDateTime::parse_from_str(s, "%Y%m%d%H%M%SZ")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y%m%d%H%M%S%.fZ"))
        .map_err(|e| Error::InvalidGeneralizedTime(format!("{}: {}", s, e)))
}
