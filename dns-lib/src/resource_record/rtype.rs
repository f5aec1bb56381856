use std::fmt::Display;

use crate::serde::wire::{
    compression_map::CompressionMap,
    from_wire::FromWire,
    read_wire::{ReadWire, ReadWireError},
    to_wire::ToWire,
    write_wire::{WriteWire, WriteWireError},
};

/// A record or query type. Any 16-bit value is representable; the associated constants name the
/// common ones.
///
/// https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-4
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct RType(u16);

impl RType {
    pub const A: Self     = Self(1);
    pub const NS: Self    = Self(2);
    pub const CNAME: Self = Self(5);
    pub const SOA: Self   = Self(6);
    pub const PTR: Self   = Self(12);
    pub const MX: Self    = Self(15);
    pub const TXT: Self   = Self(16);
    pub const AAAA: Self  = Self(28);
    pub const SRV: Self   = Self(33);
    pub const OPT: Self   = Self(41);
    pub const ANY: Self   = Self(255);

    #[inline]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    #[inline]
    pub const fn code(&self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn mnemonic(&self) -> Option<&'static str> {
        match self.0 {
            1   => Some("A"),
            2   => Some("NS"),
            5   => Some("CNAME"),
            6   => Some("SOA"),
            12  => Some("PTR"),
            15  => Some("MX"),
            16  => Some("TXT"),
            28  => Some("AAAA"),
            33  => Some("SRV"),
            41  => Some("OPT"),
            255 => Some("ANY"),
            _ => None,
        }
    }
}

impl From<u16> for RType {
    #[inline]
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<RType> for u16 {
    #[inline]
    fn from(value: RType) -> Self {
        value.0
    }
}

impl Display for RType {
    /// Unnamed types use the RFC 3597 `TYPE<n>` form.
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mnemonic() {
            Some(mnemonic) => write!(f, "{mnemonic}"),
            None => write!(f, "TYPE{}", self.0),
        }
    }
}

impl ToWire for RType {
    #[inline]
    fn to_wire_format<'a, 'b>(&self, wire: &'b mut WriteWire<'a>, compression: &mut Option<CompressionMap>) -> Result<(), WriteWireError> where 'a: 'b {
        self.0.to_wire_format(wire, compression)
    }

    #[inline]
    fn serial_length(&self) -> u16 {
        self.0.serial_length()
    }
}

impl FromWire for RType {
    #[inline]
    fn from_wire_format<'a, 'b>(wire: &'b mut ReadWire<'a>) -> Result<Self, ReadWireError> where Self: Sized, 'a: 'b {
        Ok(Self(u16::from_wire_format(wire)?))
    }
}

#[cfg(test)]
mod circular_serde_sanity_test {
    use crate::serde::wire::circular_test::gen_test_circular_serde_sanity_test;
    use super::RType;

    gen_test_circular_serde_sanity_test!(
        a_circular_serde_sanity_test,
        RType::A
    );
    gen_test_circular_serde_sanity_test!(
        unnamed_circular_serde_sanity_test,
        RType::new(65280)
    );
}

#[cfg(test)]
mod test {
    use super::RType;

    #[test]
    fn display_uses_mnemonic_or_generic_form() {
        assert_eq!("AAAA", RType::AAAA.to_string());
        assert_eq!("TYPE65280", RType::new(65280).to_string());
        assert_eq!(RType::A, RType::from(1));
    }
}
