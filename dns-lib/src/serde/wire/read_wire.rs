use std::{error::Error, fmt::Display};

use crate::types::domain_name::DomainNameError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadWireError {
    OverflowError(String),
    UnderflowError(String),
    DomainNameError(DomainNameError),
}
impl Error for ReadWireError {}
impl Display for ReadWireError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OverflowError(error) => write!(f, "Read Wire Overflow Error: {error}"),
            Self::UnderflowError(error) => write!(f, "Read Wire Underflow Error: {error}"),

            Self::DomainNameError(error) => write!(f, "Read Wire Domain Name Error: {error}"),
        }
    }
}
impl From<DomainNameError> for ReadWireError {
    fn from(value: DomainNameError) -> Self {
        ReadWireError::DomainNameError(value)
    }
}

/// A read cursor over a complete message.
///
/// The cursor never narrows the underlying slice. Offsets are always absolute positions in the
/// full message so that compression pointers can be followed from anywhere in the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ReadWire<'a> {
    wire: &'a [u8],
    offset: usize,
}

impl<'a> ReadWire<'a> {
    #[inline]
    pub fn from_bytes(wire: &'a [u8]) -> Self {
        Self {
            wire,
            offset: 0,
        }
    }

    #[inline]
    pub fn current_state(&self) -> &'a [u8] {
        &self.wire[self.offset..]
    }

    #[inline]
    pub fn current_state_len(&self) -> usize {
        self.wire.len() - self.offset
    }

    #[inline]
    pub fn current_offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn is_end_reached(&self) -> bool {
        self.offset >= self.wire.len()
    }

    #[inline]
    pub fn set_offset(&mut self, offset: usize) -> Result<(), ReadWireError> {
        if self.wire.len() < offset {
            return Err(ReadWireError::OverflowError(
                String::from("offset went past the end of the wire")
            ));
        } else {
            self.offset = offset;
            return Ok(());
        }
    }

    #[inline]
    pub fn full_state(&self) -> &'a [u8] {
        self.wire
    }

    #[inline]
    pub fn wire_len(&self) -> usize {
        self.wire.len()
    }

    #[inline]
    pub fn shift(&mut self, shift: usize) -> Result<(), ReadWireError> {
        let new_offset = self.offset + shift;
        if self.wire.len() < new_offset {
            return Err(ReadWireError::OverflowError(
                String::from("attempted to shift past the end of the wire")
            ));
        } else {
            self.offset = new_offset;
            return Ok(());
        }
    }

    /// Consumes the next `length` bytes of the wire.
    #[inline]
    pub fn take(&mut self, length: usize) -> Result<&'a [u8], ReadWireError> {
        if self.current_state_len() < length {
            return Err(ReadWireError::UnderflowError(format!(
                "tried to read {length} bytes at offset {} but only {} remain",
                self.offset,
                self.current_state_len(),
            )));
        }

        let bytes = &self.wire[self.offset..(self.offset + length)];
        self.offset += length;
        return Ok(bytes);
    }
}
