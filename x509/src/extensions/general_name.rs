//! GeneralName
//!
//! RFC 5280 Section 4.2.1.6
//!
//! ```asn1
//! GeneralName ::= CHOICE {
//!     otherName                 [0] OtherName,
//!     rfc822Name                [1] IA5String,
//!     dNSName                   [2] IA5String,
//!     x400Address               [3] ORAddress,
//!     directoryName             [4] Name,
//!     ediPartyName              [5] EDIPartyName,
//!     uniformResourceIdentifier [6] IA5String,
//!     iPAddress                 [7] OCTET STRING,
//!     registeredID              [8] OBJECT IDENTIFIER
//! }
//!
//! OtherName ::= SEQUENCE {
//!     type-id    OBJECT IDENTIFIER,
//!     value      [0] EXPLICIT ANY DEFINED BY type-id
//! }
//!
//! EDIPartyName ::= SEQUENCE {
//!     nameAssigner [0] DirectoryString OPTIONAL,
//!     partyName    [1] DirectoryString
//! }
//! ```
//!
//! The module uses IMPLICIT tagging, so the string kinds arrive as raw
//! content octets. `directoryName` and the DirectoryString fields are
//! CHOICE types and therefore keep an explicit tag.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use sigil::decoder::{DecodableFrom, Decoder};
use sigil_asn1::{Element, ObjectIdentifier};
use sigil_pkix_types::Name;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtherName {
    pub type_id: ObjectIdentifier,
    pub value: Element,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdiPartyName {
    pub name_assigner: Option<String>,
    pub party_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralName {
    OtherName(OtherName),
    Rfc822Name(String),
    DnsName(String),
    /// ORAddress is kept undecoded.
    X400Address(Element),
    DirectoryName(Name),
    EdiPartyName(EdiPartyName),
    Uri(String),
    IpAddress(IpAddr),
    RegisteredId(ObjectIdentifier),
}

impl GeneralName {
    /// Text form for the kinds that make up a certificate's alt names:
    /// DNS names, email addresses, IP addresses and URIs.
    pub fn as_alt_name(&self) -> Option<String> {
        match self {
            GeneralName::DnsName(s) | GeneralName::Rfc822Name(s) | GeneralName::Uri(s) => {
                Some(s.clone())
            }
            GeneralName::IpAddress(ip) => Some(ip.to_string()),
            _ => None,
        }
    }
}

impl fmt::Display for GeneralName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneralName::OtherName(other) => write!(f, "othername:{}", other.type_id),
            GeneralName::Rfc822Name(s) => write!(f, "email:{}", s),
            GeneralName::DnsName(s) => write!(f, "DNS:{}", s),
            GeneralName::X400Address(_) => write!(f, "X400Name:<unsupported>"),
            GeneralName::DirectoryName(name) => write!(f, "DirName:{}", name),
            GeneralName::EdiPartyName(edi) => write!(f, "EdiPartyName:{}", edi.party_name),
            GeneralName::Uri(s) => write!(f, "URI:{}", s),
            GeneralName::IpAddress(ip) => write!(f, "IP Address:{}", ip),
            GeneralName::RegisteredId(oid) => write!(f, "Registered ID:{}", oid),
        }
    }
}

fn implicit_bytes(slot: u8, constructed: bool, element: &Element) -> Result<&[u8]> {
    match (constructed, element) {
        (false, Element::OctetString(os)) => Ok(os.as_bytes()),
        _ => Err(Error::InvalidGeneralName(format!(
            "[{}] must be primitive",
            slot
        ))),
    }
}

fn ia5_string(slot: u8, constructed: bool, element: &Element) -> Result<String> {
    let bytes = implicit_bytes(slot, constructed, element)?;
    if !bytes.is_ascii() {
        return Err(Error::InvalidGeneralName(format!(
            "[{}] is not an IA5String",
            slot
        )));
    }
    String::from_utf8(bytes.to_vec()).map_err(|e| Error::InvalidGeneralName(e.to_string()))
}

fn ip_address(bytes: &[u8]) -> Result<IpAddr> {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        return Ok(IpAddr::V4(Ipv4Addr::from(octets)));
    }
    if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        // IPv4-mapped addresses print in dotted form.
        return Ok(Ipv6Addr::from(octets).to_canonical());
    }
    Err(Error::InvalidGeneralName(format!(
        "iPAddress of length {}",
        bytes.len()
    )))
}

fn directory_string(element: &Element) -> Result<String> {
    element
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidGeneralName("expected DirectoryString".to_string()))
}

fn other_name(element: &Element) -> Result<OtherName> {
    let Element::Sequence(elements) = element else {
        return Err(Error::InvalidGeneralName(
            "expected SEQUENCE for OtherName".to_string(),
        ));
    };
    match elements.as_slice() {
        [
            Element::ObjectIdentifier(type_id),
            Element::ContextSpecific {
                slot: 0,
                constructed: true,
                element: value,
            },
        ] => Ok(OtherName {
            type_id: type_id.clone(),
            value: value.as_ref().clone(),
        }),
        _ => Err(Error::InvalidGeneralName(
            "OtherName needs type-id and [0] value".to_string(),
        )),
    }
}

fn edi_party_name(element: &Element) -> Result<EdiPartyName> {
    // A lone partyName is unwrapped by the ASN.1 layer.
    let fields = match element {
        Element::Sequence(elements) => elements.as_slice(),
        single => std::slice::from_ref(single),
    };
    let mut name_assigner = None;
    let mut party_name = None;
    for field in fields {
        match field {
            Element::ContextSpecific {
                slot: 0, element, ..
            } => name_assigner = Some(directory_string(element)?),
            Element::ContextSpecific {
                slot: 1, element, ..
            } => party_name = Some(directory_string(element)?),
            _ => {
                return Err(Error::InvalidGeneralName(
                    "unexpected field in EDIPartyName".to_string(),
                ));
            }
        }
    }
    let party_name = party_name.ok_or_else(|| {
        Error::InvalidGeneralName("EDIPartyName without partyName".to_string())
    })?;
    Ok(EdiPartyName {
        name_assigner,
        party_name,
    })
}

impl DecodableFrom<Element> for GeneralName {}

impl Decoder<Element, GeneralName> for Element {
    type Error = Error;

    fn decode(&self) -> Result<GeneralName> {
        let Element::ContextSpecific {
            slot,
            constructed,
            element,
        } = self
        else {
            return Err(Error::InvalidGeneralName(format!(
                "expected context-specific tag, got {}",
                self
            )));
        };
        let (slot, constructed) = (*slot, *constructed);
        match slot {
            0 => Ok(GeneralName::OtherName(other_name(element)?)),
            1 => Ok(GeneralName::Rfc822Name(ia5_string(slot, constructed, element)?)),
            2 => Ok(GeneralName::DnsName(ia5_string(slot, constructed, element)?)),
            3 => Ok(GeneralName::X400Address(element.as_ref().clone())),
            4 => {
                if !constructed {
                    return Err(Error::InvalidGeneralName(
                        "directoryName must be constructed".to_string(),
                    ));
                }
                let name: Name = element.decode()?;
                Ok(GeneralName::DirectoryName(name))
            }
            5 => Ok(GeneralName::EdiPartyName(edi_party_name(element)?)),
            6 => Ok(GeneralName::Uri(ia5_string(slot, constructed, element)?)),
            7 => {
                let bytes = implicit_bytes(slot, constructed, element)?;
                Ok(GeneralName::IpAddress(ip_address(bytes)?))
            }
            8 => {
                let bytes = implicit_bytes(slot, constructed, element)?;
                Ok(GeneralName::RegisteredId(ObjectIdentifier::try_from(bytes)?))
            }
            n => Err(Error::InvalidGeneralName(format!("unknown tag [{}]", n))),
        }
    }
}
