use std::fmt::Display;

use crate::{
    resource_record::{rclass::RClass, rtype::RType},
    serde::wire::{
        compression_map::CompressionMap,
        from_wire::FromWire,
        read_wire::{ReadWire, ReadWireError},
        to_wire::ToWire,
        write_wire::{WriteWire, WriteWireError},
    },
    types::domain_name::DomainName,
};

/// https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.2
///
/// Questions are the cache key. Two questions are equal only when the names match octet for
/// octet and the type and class are the same.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Question {
    qname: DomainName,
    qtype: RType,
    qclass: RClass,
}

impl Default for Question {
    #[inline]
    fn default() -> Self {
        Self {
            qname: DomainName::new_root(),
            qtype: RType::new(0),
            qclass: RClass::new(0),
        }
    }
}

impl Question {
    #[inline]
    pub const fn new(qname: DomainName, qtype: RType, qclass: RClass) -> Question {
        Question {
            qname,
            qtype,
            qclass,
        }
    }

    #[inline]
    pub const fn qname(&self) -> &DomainName {
        &self.qname
    }

    #[inline]
    pub const fn qtype(&self) -> RType {
        self.qtype
    }

    #[inline]
    pub const fn qclass(&self) -> RClass {
        self.qclass
    }
}

impl Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Question: {{qname: '{}', qtype: {}, qclass: {}}}",
            self.qname, self.qtype, self.qclass
        )
    }
}

impl ToWire for Question {
    #[inline]
    fn to_wire_format<'a, 'b>(&self, wire: &'b mut WriteWire<'a>, compression: &mut Option<CompressionMap>) -> Result<(), WriteWireError> where 'a: 'b {
        self.qname.to_wire_format(wire, compression)?;
        self.qtype.to_wire_format(wire, compression)?;
        self.qclass.to_wire_format(wire, compression)
    }

    #[inline]
    fn serial_length(&self) -> u16 {
        self.qname.serial_length()
        + self.qtype.serial_length()
        + self.qclass.serial_length()
    }
}

impl FromWire for Question {
    #[inline]
    fn from_wire_format<'a, 'b>(wire: &'b mut ReadWire<'a>) -> Result<Self, ReadWireError> where Self: Sized, 'a: 'b {
        let qname = DomainName::from_wire_format(wire)?;
        let qtype = RType::from_wire_format(wire)?;
        let qclass = RClass::from_wire_format(wire)?;
        Ok(Self::new(qname, qtype, qclass))
    }
}
