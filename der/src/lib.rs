//! DER (X.690 Distinguished Encoding Rules) tag-length-value layer.
//!
//! Parses raw bytes into a tree of [`Tlv`]s and serializes the tree back.
//! Only the definite-length, low-tag-number forms allowed by DER are accepted.

use nom::{IResult, Parser};
use sigil::decoder::{DecodableFrom, Decoder};
use sigil::encoder::{EncodableTo, Encoder};
use sigil_pem::Pem;

pub mod error;

use error::{Error, Result};

pub const TAG_CONSTRUCTED: u8 = 0x20;
const TAG_CLASS_MASK: u8 = 0xc0;
const TAG_CLASS_UNIVERSAL: u8 = 0x00;
const TAG_CLASS_CONTEXT_SPECIFIC: u8 = 0x80;
const TAG_NUMBER_MASK: u8 = 0x1f;
const LENGTH_LONG_FORM: u8 = 0x80;

/// A sequence of top-level TLVs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Der {
    elements: Vec<Tlv>,
}

impl Der {
    pub fn new(elements: Vec<Tlv>) -> Self {
        Der { elements }
    }

    pub fn elements(&self) -> &[Tlv] {
        &self.elements
    }
}

/// Universal class tag numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PrimitiveTag {
    Boolean,
    Integer,
    BitString,
    OctetString,
    Null,
    ObjectIdentifier,
    UTF8String,
    Sequence,
    Set,
    PrintableString,
    T61String,
    IA5String,
    UTCTime,
    GeneralizedTime,
    BMPString,
    Unimplemented(u8),
}

impl From<u8> for PrimitiveTag {
    fn from(number: u8) -> Self {
        match number {
            0x01 => Self::Boolean,
            0x02 => Self::Integer,
            0x03 => Self::BitString,
            0x04 => Self::OctetString,
            0x05 => Self::Null,
            0x06 => Self::ObjectIdentifier,
            0x0c => Self::UTF8String,
            0x10 => Self::Sequence,
            0x11 => Self::Set,
            0x13 => Self::PrintableString,
            0x14 => Self::T61String,
            0x16 => Self::IA5String,
            0x17 => Self::UTCTime,
            0x18 => Self::GeneralizedTime,
            0x1e => Self::BMPString,
            n => Self::Unimplemented(n),
        }
    }
}

impl From<&PrimitiveTag> for u8 {
    fn from(tag: &PrimitiveTag) -> Self {
        match tag {
            PrimitiveTag::Boolean => 0x01,
            PrimitiveTag::Integer => 0x02,
            PrimitiveTag::BitString => 0x03,
            PrimitiveTag::OctetString => 0x04,
            PrimitiveTag::Null => 0x05,
            PrimitiveTag::ObjectIdentifier => 0x06,
            PrimitiveTag::UTF8String => 0x0c,
            PrimitiveTag::Sequence => 0x10,
            PrimitiveTag::Set => 0x11,
            PrimitiveTag::PrintableString => 0x13,
            PrimitiveTag::T61String => 0x14,
            PrimitiveTag::IA5String => 0x16,
            PrimitiveTag::UTCTime => 0x17,
            PrimitiveTag::GeneralizedTime => 0x18,
            PrimitiveTag::BMPString => 0x1e,
            PrimitiveTag::Unimplemented(n) => *n,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// Universal class tag together with the identifier octet it was read from.
    /// Application and private class tags land here as `Unimplemented`.
    Primitive(PrimitiveTag, u8),
    ContextSpecific { slot: u8, constructed: bool },
}

impl Tag {
    /// Universal class tag; SEQUENCE and SET get the constructed bit.
    pub fn universal(tag: PrimitiveTag) -> Self {
        let number = u8::from(&tag);
        match tag {
            PrimitiveTag::Sequence | PrimitiveTag::Set => {
                Tag::Primitive(tag, number | TAG_CONSTRUCTED)
            }
            _ => Tag::Primitive(tag, number),
        }
    }

    pub fn context_specific(slot: u8, constructed: bool) -> Self {
        Tag::ContextSpecific { slot, constructed }
    }

    pub fn is_constructed(&self) -> bool {
        match self {
            Tag::Primitive(_, octet) => octet & TAG_CONSTRUCTED == TAG_CONSTRUCTED,
            Tag::ContextSpecific { constructed, .. } => *constructed,
        }
    }

    fn octet(&self) -> u8 {
        match self {
            Tag::Primitive(_, octet) => *octet,
            Tag::ContextSpecific { slot, constructed } => {
                let octet = TAG_CLASS_CONTEXT_SPECIFIC | (slot & TAG_NUMBER_MASK);
                if *constructed {
                    octet | TAG_CONSTRUCTED
                } else {
                    octet
                }
            }
        }
    }

    // Only universal SEQUENCE/SET and constructed context-specific tags carry nested TLVs.
    fn has_children(&self) -> bool {
        match self {
            Tag::Primitive(PrimitiveTag::Sequence | PrimitiveTag::Set, octet) => {
                octet & TAG_CONSTRUCTED == TAG_CONSTRUCTED
            }
            Tag::Primitive(_, _) => false,
            Tag::ContextSpecific { constructed, .. } => *constructed,
        }
    }
}

impl From<u8> for Tag {
    fn from(octet: u8) -> Self {
        match octet & TAG_CLASS_MASK {
            TAG_CLASS_CONTEXT_SPECIFIC => Tag::ContextSpecific {
                slot: octet & TAG_NUMBER_MASK,
                constructed: octet & TAG_CONSTRUCTED == TAG_CONSTRUCTED,
            },
            TAG_CLASS_UNIVERSAL => {
                Tag::Primitive(PrimitiveTag::from(octet & TAG_NUMBER_MASK), octet)
            }
            _ => Tag::Primitive(PrimitiveTag::Unimplemented(octet), octet),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlv {
    tag: Tag,
    length: usize,
    value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value {
    Tlv(Vec<Tlv>),
    Data(Vec<u8>),
}

impl Tlv {
    pub fn new_primitive(tag: Tag, data: Vec<u8>) -> Self {
        Tlv {
            tag,
            length: data.len(),
            value: Value::Data(data),
        }
    }

    pub fn new_constructed(tag: Tag, tlvs: Vec<Tlv>) -> Self {
        let length = tlvs.iter().map(Tlv::encoded_len).sum();
        Tlv {
            tag,
            length,
            value: Value::Tlv(tlvs),
        }
    }

    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Length of the value octets.
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn data(&self) -> Option<&[u8]> {
        match &self.value {
            Value::Data(data) => Some(data),
            Value::Tlv(_) => None,
        }
    }

    pub fn tlvs(&self) -> Option<&[Tlv]> {
        match &self.value {
            Value::Tlv(tlvs) => Some(tlvs),
            Value::Data(_) => None,
        }
    }

    /// Total size of this TLV once encoded, header included.
    pub fn encoded_len(&self) -> usize {
        1 + length_octets(self.length) + self.length
    }

    fn parse(input: &[u8]) -> IResult<&[u8], Tlv> {
        let (input, tag) = parse_tag(input)?;
        let (input, length) = parse_length(input)?;
        let (input, data) = nom::bytes::complete::take(length).parse(input)?;

        if tag.has_children() {
            let mut tlvs = Vec::new();
            let mut data = data;
            while !data.is_empty() {
                let (rest, tlv) = Self::parse(data)?;
                data = rest;
                tlvs.push(tlv);
            }

            return Ok((
                input,
                Tlv {
                    tag,
                    length,
                    value: Value::Tlv(tlvs),
                },
            ));
        }

        Ok((
            input,
            Tlv {
                tag,
                length,
                value: Value::Data(data.to_vec()),
            },
        ))
    }

    fn write(&self, out: &mut Vec<u8>) {
        out.push(self.tag.octet());
        write_length(self.length, out);
        match &self.value {
            Value::Data(data) => out.extend_from_slice(data),
            Value::Tlv(tlvs) => tlvs.iter().for_each(|tlv| tlv.write(out)),
        }
    }
}

fn parse_tag(input: &[u8]) -> IResult<&[u8], Tag> {
    let (rest, octet) = nom::number::be_u8().parse(input)?;
    if octet & TAG_NUMBER_MASK == TAG_NUMBER_MASK {
        // high-tag-number form never appears in the structures handled here
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TagBits,
        )));
    }
    Ok((rest, Tag::from(octet)))
}

fn parse_length(input: &[u8]) -> IResult<&[u8], usize> {
    let (rest, n) = nom::number::be_u8().parse(input)?;
    if n & LENGTH_LONG_FORM == LENGTH_LONG_FORM {
        // long form: the low 7 bits count the length octets that follow.
        // 0x80 alone is the BER indefinite form, which DER forbids.
        let count = (n & 0x7f) as usize;
        if count == 0 || count > std::mem::size_of::<usize>() {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::LengthValue,
            )));
        }
        let (rest, bs) = nom::bytes::complete::take(count).parse(rest)?;
        let length = bs.iter().fold(0usize, |acc, &b| (acc << 8) | b as usize);
        return Ok((rest, length));
    }
    // short form: 0-127
    Ok((rest, n as usize))
}

fn length_octets(length: usize) -> usize {
    if length < LENGTH_LONG_FORM as usize {
        1
    } else {
        let significant = std::mem::size_of::<usize>() - (length.leading_zeros() as usize / 8);
        1 + significant
    }
}

fn write_length(length: usize, out: &mut Vec<u8>) {
    if length < LENGTH_LONG_FORM as usize {
        out.push(length as u8);
        return;
    }
    let bytes = length.to_be_bytes();
    let skip = bytes.iter().take_while(|b| **b == 0).count();
    out.push(LENGTH_LONG_FORM | (bytes.len() - skip) as u8);
    out.extend_from_slice(&bytes[skip..]);
}

impl DecodableFrom<&[u8]> for Der {}

impl Decoder<&[u8], Der> for &[u8] {
    type Error = Error;

    fn decode(&self) -> Result<Der> {
        if self.is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut elements = Vec::new();
        let mut input: &[u8] = self;
        while !input.is_empty() {
            let (rest, tlv) = Tlv::parse(input)?;
            input = rest;
            elements.push(tlv);
        }
        log::trace!("decoded {} top-level DER element(s)", elements.len());
        Ok(Der { elements })
    }
}

impl DecodableFrom<Vec<u8>> for Der {}

impl Decoder<Vec<u8>, Der> for Vec<u8> {
    type Error = Error;

    fn decode(&self) -> Result<Der> {
        self.as_slice().decode()
    }
}

impl DecodableFrom<Pem> for Der {}

impl Decoder<Pem, Der> for Pem {
    type Error = Error;

    fn decode(&self) -> Result<Der> {
        let bytes: Vec<u8> = self.decode()?;
        bytes.decode()
    }
}

impl EncodableTo<Der> for Vec<u8> {}

impl Encoder<Der, Vec<u8>> for Der {
    type Error = Error;

    fn encode(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.elements.iter().map(Tlv::encoded_len).sum());
        self.elements.iter().for_each(|tlv| tlv.write(&mut out));
        Ok(out)
    }
}
