// https://www.rfc-editor.org/rfc/rfc1700
//
// When serializing and deserializing, recall that network order is defined to be Big Endian.
// Therefore, all data output by serialization must be Big Endian.
// All data input to a deserializer must be Big Endian.

use ux::{u1, u3, u4};

use crate::serde::const_byte_counts::*;

use super::read_wire::{ReadWire, ReadWireError};

pub trait FromWire {
    fn from_wire_format<'a, 'b>(wire: &'b mut ReadWire<'a>) -> Result<Self, ReadWireError> where Self: Sized, 'a: 'b;
}

// #################### BUILT-IN PRIMITIVE TYPES ####################

macro_rules! int_from_wire_impl {
    ($int_name:literal, $int_type:ty, $byte_count:ident) => {
        impl FromWire for $int_type {
            #[inline]
            fn from_wire_format<'a, 'b>(wire: &'b mut ReadWire<'a>) -> Result<Self, ReadWireError> where Self: Sized, 'a: 'b {
                if wire.current_state_len() < ($byte_count as usize) {
                    return Err(ReadWireError::UnderflowError(format!("could not read {}; wire length less than {} bytes", $int_name, $byte_count)));
                }

                let mut bytes = [0_u8; $byte_count as usize];
                bytes.copy_from_slice(wire.take($byte_count as usize)?);

                Ok(Self::from_be_bytes(bytes))
            }
        }
    }
}

int_from_wire_impl!("u8",  u8,  U8_BYTE_COUNT);
int_from_wire_impl!("u16", u16, U16_BYTE_COUNT);
int_from_wire_impl!("u32", u32, U32_BYTE_COUNT);

int_from_wire_impl!("i32", i32, I32_BYTE_COUNT);

// #################### HEADER FLAG OCTETS ####################

impl FromWire for (u1, u3, u4) {
    #[inline]
    fn from_wire_format<'a, 'b>(wire: &'b mut ReadWire<'a>) -> Result<Self, ReadWireError> where Self: Sized, 'a: 'b {
        let byte = u8::from_wire_format(wire)?;

        // | 0  | 0 0 0 | 0 0 0 0 |
        // | u1 | u3    | u4      |
        let bit_7    = (byte & 0b10000000) >> 7;
        let bit_6to4 = (byte & 0b01110000) >> 4;
        let bit_3to0 = (byte & 0b00001111) >> 0;

        Ok((u1::new(bit_7), u3::new(bit_6to4), u4::new(bit_3to0)))
    }
}

impl FromWire for (u1, u4, u1, u1, u1) {
    #[inline]
    fn from_wire_format<'a, 'b>(wire: &'b mut ReadWire<'a>) -> Result<Self, ReadWireError> where Self: Sized, 'a: 'b {
        let byte = u8::from_wire_format(wire)?;

        // | 0  | 0 0 0 0 | 0  | 0  | 0  |
        // | u1 | u4      | u1 | u1 | u1 |
        let bit_7    = (byte & 0b10000000) >> 7;
        let bit_6to3 = (byte & 0b01111000) >> 3;
        let bit_2    = (byte & 0b00000100) >> 2;
        let bit_1    = (byte & 0b00000010) >> 1;
        let bit_0    = (byte & 0b00000001) >> 0;

        Ok((u1::new(bit_7), u4::new(bit_6to3), u1::new(bit_2), u1::new(bit_1), u1::new(bit_0)))
    }
}
