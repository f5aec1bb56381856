use std::{fmt::Display, net::Ipv4Addr, time::{Duration, Instant}};

use crate::{
    serde::{
        const_byte_counts::*,
        wire::{
            compression_map::CompressionMap,
            from_wire::FromWire,
            read_wire::{ReadWire, ReadWireError},
            to_wire::ToWire,
            write_wire::{WriteWire, WriteWireError},
        },
    },
    types::domain_name::DomainName,
};

use super::{rclass::RClass, rtype::RType};

/// https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.3
///
/// The rdata is opaque: it is carried byte-for-byte and never interpreted by type. `created_at`
/// is the moment the record was decoded (or built) and is the base of its freshness.
#[derive(Clone, Debug)]
pub struct ResourceRecord {
    name: DomainName,
    rtype: RType,
    rclass: RClass,
    ttl: i32,
    rdata: Vec<u8>,
    created_at: Instant,
}

impl ResourceRecord {
    #[inline]
    pub fn new(name: DomainName, rtype: RType, rclass: RClass, ttl: i32, rdata: Vec<u8>) -> Self {
        Self::new_at(name, rtype, rclass, ttl, rdata, Instant::now())
    }

    #[inline]
    pub fn new_at(name: DomainName, rtype: RType, rclass: RClass, ttl: i32, rdata: Vec<u8>, created_at: Instant) -> Self {
        Self { name, rtype, rclass, ttl, rdata, created_at }
    }

    #[inline]
    pub const fn get_name(&self) -> &DomainName {
        &self.name
    }

    #[inline]
    pub const fn get_rtype(&self) -> RType {
        self.rtype
    }

    #[inline]
    pub const fn get_rclass(&self) -> RClass {
        self.rclass
    }

    #[inline]
    pub const fn get_ttl(&self) -> i32 {
        self.ttl
    }

    #[inline]
    pub fn rdata(&self) -> &[u8] {
        &self.rdata
    }

    /// The RDLENGTH this record is written with. Rdata longer than a `u16` saturates here and is
    /// rejected when the record is serialized.
    #[inline]
    pub fn rd_length(&self) -> u16 {
        u16::try_from(self.rdata.len()).unwrap_or(u16::MAX)
    }

    #[inline]
    pub const fn created_at(&self) -> Instant {
        self.created_at
    }

    /// The first instant at which the record is stale. A negative TTL is stale from the moment it
    /// was created. `None` means the expiry cannot be represented by the clock, so the record
    /// never expires.
    #[inline]
    pub fn expires_at(&self) -> Option<Instant> {
        match u64::try_from(self.ttl) {
            Ok(ttl) => self.created_at.checked_add(Duration::from_secs(ttl)),
            Err(_) => Some(self.created_at),
        }
    }

    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.expires_at() {
            Some(expires_at) => now >= expires_at,
            None => false,
        }
    }

    /// The address carried by an A record. Only used for diagnostics.
    #[inline]
    pub fn ipv4_address(&self) -> Option<Ipv4Addr> {
        if self.rtype != RType::A {
            return None;
        }
        let octets: [u8; IPV4_BYTE_COUNT as usize] = self.rdata.as_slice().try_into().ok()?;
        Some(Ipv4Addr::from(octets))
    }
}

impl PartialEq for ResourceRecord {
    /// The creation time is bookkeeping and does not take part in equality.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
        && self.rtype == other.rtype
        && self.rclass == other.rclass
        && self.ttl == other.ttl
        && self.rdata == other.rdata
    }
}

impl Eq for ResourceRecord {}

impl Display for ResourceRecord {
    /// Presentation-style output. Rdata other than an A address is shown in the RFC 3597 generic
    /// form.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{}\t{}\t", self.name, self.ttl, self.rclass, self.rtype)?;
        if let Some(address) = self.ipv4_address() {
            return write!(f, "{address}");
        }
        write!(f, "\\# {}", self.rdata.len())?;
        if !self.rdata.is_empty() {
            write!(f, " ")?;
            for byte in &self.rdata {
                write!(f, "{byte:02x}")?;
            }
        }
        Ok(())
    }
}

impl ToWire for ResourceRecord {
    #[inline]
    fn to_wire_format<'a, 'b>(&self, wire: &'b mut WriteWire<'a>, compression: &mut Option<CompressionMap>) -> Result<(), WriteWireError> where 'a: 'b {
        let rd_length = match u16::try_from(self.rdata.len()) {
            Ok(rd_length) => rd_length,
            Err(_) => return Err(WriteWireError::ValueError(format!(
                "rdata of {} bytes does not fit in a 16-bit rdlength", self.rdata.len()
            ))),
        };

        self.name.to_wire_format(wire, compression)?;
        self.rtype.to_wire_format(wire, compression)?;
        self.rclass.to_wire_format(wire, compression)?;
        self.ttl.to_wire_format(wire, compression)?;
        rd_length.to_wire_format(wire, compression)?;
        wire.write_bytes(&self.rdata)
    }

    #[inline]
    fn serial_length(&self) -> u16 {
        (self.name.serial_length()
        + self.rtype.serial_length()
        + self.rclass.serial_length()
        + self.ttl.serial_length()
        + U16_BYTE_COUNT)
        .saturating_add(self.rd_length())
    }
}

impl FromWire for ResourceRecord {
    #[inline]
    fn from_wire_format<'a, 'b>(wire: &'b mut ReadWire<'a>) -> Result<Self, ReadWireError> where Self: Sized, 'a: 'b {
        let name = DomainName::from_wire_format(wire)?;
        let rtype = RType::from_wire_format(wire)?;
        let rclass = RClass::from_wire_format(wire)?;
        let ttl = i32::from_wire_format(wire)?;
        let rd_length = u16::from_wire_format(wire)?;
        let rdata = wire.take(rd_length as usize)?.to_vec();

        Ok(Self::new(name, rtype, rclass, ttl, rdata))
    }
}

#[cfg(test)]
mod circular_serde_sanity_test {
    use crate::{resource_record::{rclass::RClass, rtype::RType}, serde::wire::circular_test::gen_test_circular_serde_sanity_test, types::domain_name::DomainName};
    use super::ResourceRecord;

    gen_test_circular_serde_sanity_test!(
        a_record_circular_serde_sanity_test,
        ResourceRecord::new(DomainName::from_utf8("example.com.").unwrap(), RType::A, RClass::IN, 3600, vec![93, 184, 216, 34])
    );
    gen_test_circular_serde_sanity_test!(
        empty_rdata_circular_serde_sanity_test,
        ResourceRecord::new(DomainName::new_root(), RType::new(65280), RClass::CH, 0, vec![])
    );
    gen_test_circular_serde_sanity_test!(
        negative_ttl_circular_serde_sanity_test,
        ResourceRecord::new(DomainName::from_utf8("a.b.c").unwrap(), RType::TXT, RClass::IN, -1, b"\x05hello".to_vec())
    );
}
