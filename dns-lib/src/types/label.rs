use std::fmt::{Debug, Display};

use tinyvec::TinyVec;

use crate::serde::wire::{
    compression_map::CompressionMap,
    from_wire::FromWire,
    read_wire::{ReadWire, ReadWireError},
    to_wire::ToWire,
    write_wire::{WriteWire, WriteWireError},
};

use super::domain_name::DomainNameError;

/// A single non-root label of a domain name.
///
/// Octets are kept exactly as received. No case folding or IDNA processing is applied, so two
/// labels are only equal when their octets are identical.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label {
    // A TinyVec with a length of 14 has a size of 24 bytes. This is the same size as a Vec.
    octets: TinyVec<[u8; 14]>,
}

impl Label {
    pub const MAX_OCTETS: u8 = 63;

    #[inline]
    pub fn from_octets(octets: &[u8]) -> Result<Self, DomainNameError> {
        if octets.is_empty() {
            return Err(DomainNameError::EmptyLabel);
        }
        if octets.len() > (Self::MAX_OCTETS as usize) {
            return Err(DomainNameError::LongLabel);
        }
        Ok(Self { octets: TinyVec::from(octets) })
    }

    #[inline]
    pub fn from_utf8(string: &str) -> Result<Self, DomainNameError> {
        Self::from_octets(string.as_bytes())
    }

    #[inline]
    pub fn octets(&self) -> &[u8] {
        &self.octets
    }

    #[inline]
    pub fn len(&self) -> u8 {
        self.octets.len() as u8
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.octets.is_empty()
    }
}

impl Display for Label {
    /// Each octet is printed as the character with the same code.
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for octet in self.octets.iter() {
            write!(f, "{}", *octet as char)?;
        }
        Ok(())
    }
}

impl Debug for Label {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Label: '{self}'")
    }
}

impl ToWire for Label {
    #[inline]
    fn to_wire_format<'a, 'b>(&self, wire: &'b mut WriteWire<'a>, compression: &mut Option<CompressionMap>) -> Result<(), WriteWireError> where 'a: 'b {
        self.len().to_wire_format(wire, compression)?;
        wire.write_bytes(&self.octets)
    }

    #[inline]
    fn serial_length(&self) -> u16 {
        1 + (self.octets.len() as u16)
    }
}

impl FromWire for Label {
    /// Reads a length octet followed by that many octets. The length octet must describe a
    /// literal, non-root label.
    #[inline]
    fn from_wire_format<'a, 'b>(wire: &'b mut ReadWire<'a>) -> Result<Self, ReadWireError> where Self: Sized, 'a: 'b {
        let length = u8::from_wire_format(wire)?;
        if length > Self::MAX_OCTETS {
            return Err(DomainNameError::LongLabel)?;
        }
        Ok(Self::from_octets(wire.take(length as usize)?)?)
    }
}
