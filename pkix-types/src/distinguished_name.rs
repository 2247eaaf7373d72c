//! Flattened view of a [`Name`].
//!
//! The typed accessors are projections over the ordered attribute list; no
//! value is stored twice. Single-valued accessors return the last attribute
//! carrying their OID, and `None` when the OID is absent, which keeps an
//! absent attribute apart from an empty one.

use serde::{Serialize, ser::SerializeStruct};

use crate::name::{AttributeTypeAndValue, Name};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistinguishedName {
    names: Vec<AttributeTypeAndValue>,
}

impl DistinguishedName {
    pub fn new(names: Vec<AttributeTypeAndValue>) -> Self {
        Self { names }
    }

    /// Every attribute in encoding order, duplicates included.
    pub fn names(&self) -> &[AttributeTypeAndValue] {
        &self.names
    }

    fn last(&self, oid: &str) -> Option<&str> {
        self.names
            .iter()
            .rev()
            .find(|atv| atv.attribute_type == oid)
            .map(AttributeTypeAndValue::value_str)
    }

    fn all(&self, oid: &str) -> Vec<&str> {
        self.names
            .iter()
            .filter(|atv| atv.attribute_type == oid)
            .map(AttributeTypeAndValue::value_str)
            .collect()
    }

    pub fn common_name(&self) -> Option<&str> {
        self.last(AttributeTypeAndValue::OID_COMMON_NAME)
    }

    pub fn country(&self) -> Option<&str> {
        self.last(AttributeTypeAndValue::OID_COUNTRY_NAME)
    }

    pub fn organization_name(&self) -> Option<&str> {
        self.last(AttributeTypeAndValue::OID_ORGANIZATION_NAME)
    }

    pub fn organizational_unit_name(&self) -> Vec<&str> {
        self.all(AttributeTypeAndValue::OID_ORGANIZATIONAL_UNIT_NAME)
    }

    pub fn state_or_province_name(&self) -> Option<&str> {
        self.last(AttributeTypeAndValue::OID_STATE_OR_PROVINCE_NAME)
    }

    pub fn locality_name(&self) -> Option<&str> {
        self.last(AttributeTypeAndValue::OID_LOCALITY_NAME)
    }

    pub fn street_address(&self) -> Option<&str> {
        self.last(AttributeTypeAndValue::OID_STREET_ADDRESS)
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.last(AttributeTypeAndValue::OID_POSTAL_CODE)
    }
}

impl From<&Name> for DistinguishedName {
    fn from(name: &Name) -> Self {
        Self::new(name.attributes().cloned().collect())
    }
}

/// Camel-cased fields; absent single-valued attributes are omitted.
impl Serialize for DistinguishedName {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let single = [
            ("commonName", self.common_name()),
            ("country", self.country()),
            ("stateOrProvinceName", self.state_or_province_name()),
            ("localityName", self.locality_name()),
            ("streetAddress", self.street_address()),
            ("postalCode", self.postal_code()),
            ("organizationName", self.organization_name()),
        ];
        let present = single.iter().filter(|(_, v)| v.is_some()).count();
        let mut state = serializer.serialize_struct("DistinguishedName", present + 2)?;
        for (key, value) in single {
            if let Some(value) = value {
                state.serialize_field(key, value)?;
            } else {
                state.skip_field(key)?;
            }
        }
        state.serialize_field("organizationalUnitName", &self.organizational_unit_name())?;
        state.serialize_field("names", &self.names)?;
        state.end()
    }
}
