use std::fmt::Display;

use crate::serde::wire::{
    compression_map::CompressionMap,
    from_wire::FromWire,
    read_wire::{ReadWire, ReadWireError},
    to_wire::ToWire,
    write_wire::{WriteWire, WriteWireError},
};

/// https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-2
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct RClass(u16);

impl RClass {
    pub const IN: Self  = Self(1);
    pub const CH: Self  = Self(3);
    pub const HS: Self  = Self(4);
    pub const ANY: Self = Self(255);

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
            1   => Some("IN"),
            3   => Some("CH"),
            4   => Some("HS"),
            255 => Some("ANY"),
            _ => None,
        }
    }
}

impl Default for RClass {
    #[inline]
    fn default() -> Self {
        Self::IN
    }
}

impl From<u16> for RClass {
    #[inline]
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<RClass> for u16 {
    #[inline]
    fn from(value: RClass) -> Self {
        value.0
    }
}

impl Display for RClass {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.mnemonic() {
            Some(mnemonic) => write!(f, "{mnemonic}"),
            None => write!(f, "CLASS{}", self.0),
        }
    }
}

impl ToWire for RClass {
    #[inline]
    fn to_wire_format<'a, 'b>(&self, wire: &'b mut WriteWire<'a>, compression: &mut Option<CompressionMap>) -> Result<(), WriteWireError> where 'a: 'b {
        self.0.to_wire_format(wire, compression)
    }

    #[inline]
    fn serial_length(&self) -> u16 {
        self.0.serial_length()
    }
}

impl FromWire for RClass {
    #[inline]
    fn from_wire_format<'a, 'b>(wire: &'b mut ReadWire<'a>) -> Result<Self, ReadWireError> where Self: Sized, 'a: 'b {
        Ok(Self(u16::from_wire_format(wire)?))
    }
}
