// https://www.rfc-editor.org/rfc/rfc1700
//
// When serializing and deserializing, recall that network order is defined to be Big Endian.
// Therefore, all data output by serialization must be Big Endian.
// All data input to a deserializer must be Big Endian.

use ux::{u1, u3, u4};

use crate::serde::const_byte_counts::*;

use super::{compression_map::CompressionMap, write_wire::{WriteWire, WriteWireError}};

pub trait ToWire {
    fn to_wire_format<'a, 'b>(&self, wire: &'b mut WriteWire<'a>, compression: &mut Option<CompressionMap>) -> Result<(), WriteWireError> where 'a: 'b;

    /// The length of the uncompressed wire format.
    fn serial_length(&self) -> u16;
}

// #################### BUILT-IN PRIMITIVE TYPES ####################

macro_rules! int_to_wire_impl {
    ($int_name:literal, $int_type:ty, $byte_count:ident) => {
        impl ToWire for $int_type {
            #[inline]
            fn to_wire_format<'a, 'b>(&self, wire: &'b mut WriteWire<'a>, _compression: &mut Option<CompressionMap>) -> Result<(), WriteWireError> where 'a: 'b {
                wire.write_bytes(&self.to_be_bytes())
            }

            #[inline]
            fn serial_length(&self) -> u16 {
                $byte_count
            }
        }
    }
}

int_to_wire_impl!("u8",  u8,  U8_BYTE_COUNT);
int_to_wire_impl!("u16", u16, U16_BYTE_COUNT);
int_to_wire_impl!("u32", u32, U32_BYTE_COUNT);

int_to_wire_impl!("i32", i32, I32_BYTE_COUNT);

// #################### OTHER COMMON TYPES ####################

impl<T: ToWire> ToWire for Option<T> {
    #[inline]
    fn to_wire_format<'a, 'b>(&self, wire: &'b mut WriteWire<'a>, compression: &mut Option<CompressionMap>) -> Result<(), WriteWireError> where 'a: 'b {
        match self {
            None => Ok(()),
            Some(x) => x.to_wire_format(wire, compression),
        }
    }

    #[inline]
    fn serial_length(&self) -> u16 {
        match self {
            None => 0,
            Some(x) => x.serial_length(),
        }
    }
}

impl<T: ToWire> ToWire for Vec<T> {
    #[inline]
    fn to_wire_format<'a, 'b>(&self, wire: &'b mut WriteWire<'a>, compression: &mut Option<CompressionMap>) -> Result<(), WriteWireError> where 'a: 'b {
        for x in self {
            x.to_wire_format(wire, compression)?;
        }

        Ok(())
    }

    #[inline]
    fn serial_length(&self) -> u16 {
        self.iter()
            .fold(0_u16, |sum, x| sum.saturating_add(x.serial_length()))
    }
}

// #################### HEADER FLAG OCTETS ####################

impl ToWire for (u1, u3, u4) {
    #[inline]
    fn to_wire_format<'a, 'b>(&self, wire: &'b mut WriteWire<'a>, compression: &mut Option<CompressionMap>) -> Result<(), WriteWireError> where 'a: 'b {
        let bit_7 = u16::from(self.0) as u8;    //< there is no lossless u1 to u8 conversion
        let bit_6to4 = u8::from(self.1);
        let bit_3to0 = u8::from(self.2);

        // | 0  | 0 0 0 | 0 0 0 0 |
        // | u1 | u3    | u4      |
        let bit_7    = (bit_7    << 7) & 0b10000000;
        let bit_6to4 = (bit_6to4 << 4) & 0b01110000;
        let bit_3to0 = (bit_3to0 << 0) & 0b00001111;
        let result = bit_7 | bit_6to4 | bit_3to0;

        result.to_wire_format(wire, compression)
    }

    #[inline]
    fn serial_length(&self) -> u16 {
        return U8_BYTE_COUNT;
    }
}

impl ToWire for (u1, u4, u1, u1, u1) {
    #[inline]
    fn to_wire_format<'a, 'b>(&self, wire: &'b mut WriteWire<'a>, compression: &mut Option<CompressionMap>) -> Result<(), WriteWireError> where 'a: 'b {
        let bit_7 = u16::from(self.0) as u8;    //< there is no lossless u1 to u8 conversion
        let bit_6to3 = u8::from(self.1);
        let bit_2 = u16::from(self.2) as u8;
        let bit_1 = u16::from(self.3) as u8;
        let bit_0 = u16::from(self.4) as u8;

        // | 0  | 0 0 0 0 | 0  | 0  | 0  |
        // | u1 | u4      | u1 | u1 | u1 |
        let bit_7    = (bit_7    << 7) & 0b10000000;
        let bit_6to3 = (bit_6to3 << 3) & 0b01111000;
        let bit_2    = (bit_2    << 2) & 0b00000100;
        let bit_1    = (bit_1    << 1) & 0b00000010;
        let bit_0    = (bit_0    << 0) & 0b00000001;
        let result = bit_7 | bit_6to3 | bit_2 | bit_1 | bit_0;

        result.to_wire_format(wire, compression)
    }

    #[inline]
    fn serial_length(&self) -> u16 {
        return U8_BYTE_COUNT;
    }
}
