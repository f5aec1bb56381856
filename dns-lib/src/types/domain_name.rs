use std::{error::Error, fmt::{Debug, Display}};

use crate::serde::wire::{
    compression_map::CompressionMap,
    from_wire::FromWire,
    read_wire::{ReadWire, ReadWireError},
    to_wire::ToWire,
    write_wire::{WriteWire, WriteWireError},
};

use super::label::Label;

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum DomainNameError {
    LongDomain,
    LongLabel,
    EmptyLabel,
    TooManyPointers,
    ForwardPointer { pointer: u16, offset: usize },
    ReservedLabelType(u8),
}

impl Error for DomainNameError {}
impl Display for DomainNameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LongDomain =>        write!(f, "Domain Name Exceeded {} Wire-Format Octets", DomainName::MAX_OCTETS),
            Self::LongLabel =>         write!(f, "Label Exceeded {} Wire-Format Octets", Label::MAX_OCTETS),
            Self::EmptyLabel =>        write!(f, "Empty Label: only the root label may be empty"),
            Self::TooManyPointers =>   write!(f, "Too Many Compression Pointers: the maximum compression pointers permitted is {}", DomainName::MAX_COMPRESSION_POINTERS),
            Self::ForwardPointer { pointer, offset } => write!(f, "Forward Pointer: the pointer at offset {offset} points to {pointer}. Domain name pointers can only point backwards"),
            Self::ReservedLabelType(byte) => write!(f, "Reserved Label Type: the length octet {byte:#04x} uses a reserved label type"),
        }
    }
}

/// A domain name as an ordered sequence of labels, e.g. `["example", "com"]`.
///
/// The root name has no labels. Equality and hashing are exact over the label octets.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainName {
    labels: Vec<Label>,
}

impl DomainName {
    /// https://datatracker.ietf.org/doc/html/rfc1035#section-2.3.4
    pub const MAX_OCTETS: u16 = 255;
    /// This is the maximum number of compression pointers that should occur in a
    /// semantically valid message. Each label in a domain name must be at least one
    /// octet and is separated by a period. The root label won't be represented by a
    /// compression pointer, hence the -2 to exclude the root label.
    ///
    /// It is possible to construct a valid message that has more compression pointers
    /// than this, and still doesn't loop, by pointing to a previous pointer. This is
    /// not something a well written implementation should ever do, so we treat it
    /// as an error.
    pub const MAX_COMPRESSION_POINTERS: u16 = ((Self::MAX_OCTETS + 1) / 2) - 2;

    const POINTER_PREFIX: u8 = 0b1100_0000;

    #[inline]
    pub fn new_root() -> Self {
        Self { labels: Vec::new() }
    }

    #[inline]
    pub fn from_labels(labels: Vec<Label>) -> Result<Self, DomainNameError> {
        let domain_name = Self { labels };
        if domain_name.serial_length() > Self::MAX_OCTETS {
            return Err(DomainNameError::LongDomain);
        }
        Ok(domain_name)
    }

    /// Parses a dotted name such as `www.example.com`. A single trailing dot is accepted, and
    /// both `""` and `"."` are the root.
    #[inline]
    pub fn from_utf8(string: &str) -> Result<Self, DomainNameError> {
        let string = string.strip_suffix('.').unwrap_or(string);
        if string.is_empty() {
            return Ok(Self::new_root());
        }

        let labels = string.split('.')
            .map(Label::from_utf8)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_labels(labels)
    }

    #[inline]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    #[inline]
    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Display for DomainName {
    /// Labels joined with `.`; the root is printed as `.`.
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_root() {
            return write!(f, ".");
        }

        let mut labels = self.labels.iter();
        if let Some(first) = labels.next() {
            write!(f, "{first}")?;
        }
        for label in labels {
            write!(f, ".{label}")?;
        }
        Ok(())
    }
}

impl Debug for DomainName {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DomainName: '{self}'")
    }
}

impl ToWire for DomainName {
    /// With a compression map, the longest suffix that has already been written is replaced by a
    /// pointer to it, and every newly written suffix is recorded.
    #[inline]
    fn to_wire_format<'a, 'b>(&self, wire: &'b mut WriteWire<'a>, compression: &mut Option<CompressionMap>) -> Result<(), WriteWireError> where 'a: 'b {
        match compression {
            Some(compression_map) => {
                for (index, label) in self.labels.iter().enumerate() {
                    let suffix = &self.labels[index..];
                    if let Some(pointer) = compression_map.find_from_slice_labels(suffix) {
                        let pointer = pointer | ((Self::POINTER_PREFIX as u16) << 8);
                        return pointer.to_wire_format(wire, &mut None);
                    }
                    compression_map.insert_slice_labels(suffix, wire.current_len());
                    label.to_wire_format(wire, &mut None)?;
                }
                0_u8.to_wire_format(wire, &mut None)
            },
            None => {
                for label in &self.labels {
                    label.to_wire_format(wire, &mut None)?;
                }
                0_u8.to_wire_format(wire, &mut None)
            },
        }
    }

    #[inline]
    fn serial_length(&self) -> u16 {
        self.labels.iter()
            .map(|label| label.serial_length())
            .sum::<u16>()
            + 1
    }
}

impl FromWire for DomainName {
    /// Reads labels until the root label. A compression pointer may end any run of labels; the
    /// pointer's offset is absolute within the full message and must point backwards.
    #[inline]
    fn from_wire_format<'a, 'b>(wire: &'b mut ReadWire<'a>) -> Result<Self, ReadWireError> where Self: Sized, 'a: 'b {
        let mut labels = Vec::new();
        let mut serial_length = 1_usize;
        let mut pointer_count = 0;

        // Once the first pointer is followed, this is where the wire must be left when the name
        // has been fully read.
        let mut final_offset = None;

        loop {
            let length_offset = wire.current_offset();
            let first_byte = u8::from_wire_format(wire)?;

            match first_byte & Self::POINTER_PREFIX {
                0b0000_0000 if first_byte == 0 => break,
                0b0000_0000 => {
                    serial_length += 1 + (first_byte as usize);
                    if serial_length > (Self::MAX_OCTETS as usize) {
                        return Err(DomainNameError::LongDomain)?;
                    }
                    labels.push(Label::from_octets(wire.take(first_byte as usize)?)?);
                },
                0b1100_0000 => {
                    pointer_count += 1;
                    if pointer_count > Self::MAX_COMPRESSION_POINTERS {
                        return Err(DomainNameError::TooManyPointers)?;
                    }

                    let second_byte = u8::from_wire_format(wire)?;
                    let pointer = u16::from_be_bytes([first_byte & !Self::POINTER_PREFIX, second_byte]);
                    if final_offset.is_none() {
                        final_offset = Some(wire.current_offset());
                    }

                    if (pointer as usize) >= length_offset {
                        return Err(DomainNameError::ForwardPointer { pointer, offset: length_offset })?;
                    }
                    wire.set_offset(pointer as usize)?;
                },
                // 0x80 and 0x40 are reserved
                _ => return Err(DomainNameError::ReservedLabelType(first_byte))?,
            }
        }

        if let Some(final_offset) = final_offset {
            wire.set_offset(final_offset)?;
        }

        Ok(Self { labels })
    }
}

#[cfg(test)]
mod circular_serde_sanity_test {
    use crate::serde::wire::circular_test::gen_test_circular_serde_sanity_test;
    use super::DomainName;

    gen_test_circular_serde_sanity_test!(
        root_circular_serde_sanity_test,
        DomainName::from_utf8(".").unwrap()
    );
    gen_test_circular_serde_sanity_test!(
        top_level_circular_serde_sanity_test,
        DomainName::from_utf8("com.").unwrap()
    );
    gen_test_circular_serde_sanity_test!(
        three_label_circular_serde_sanity_test,
        DomainName::from_utf8("www.example.com").unwrap()
    );
}

#[cfg(test)]
mod test {
    use rstest::rstest;

    use crate::serde::wire::{
        compression_map::CompressionMap,
        from_wire::FromWire,
        read_wire::{ReadWire, ReadWireError},
        to_wire::ToWire,
        write_wire::WriteWire,
    };

    use super::{DomainName, DomainNameError};

    #[test]
    fn parse_dotted_names() {
        let name = DomainName::from_utf8("www.example.com.").unwrap();

        assert_eq!(3, name.label_count());
        assert_eq!("www.example.com", name.to_string());
        assert_eq!(name, DomainName::from_utf8("www.example.com").unwrap());
        assert!(DomainName::from_utf8("").unwrap().is_root());
        assert_eq!(".", DomainName::new_root().to_string());
        assert_eq!(Err(DomainNameError::EmptyLabel), DomainName::from_utf8("www..com"));
    }

    #[test]
    fn names_longer_than_255_octets_are_rejected() {
        // 4 labels of 63 octets: 4 * 64 + 1 = 257 octets.
        let label = "a".repeat(63);
        let name = [label.as_str(); 4].join(".");

        assert_eq!(Err(DomainNameError::LongDomain), DomainName::from_utf8(&name));
    }

    #[test]
    fn uncompressed_wire_format() {
        let name = DomainName::from_utf8("example.com").unwrap();
        let mut buffer = [0_u8; 64];
        let mut wire = WriteWire::from_bytes(&mut buffer);

        name.to_wire_format(&mut wire, &mut None).unwrap();

        assert_eq!(b"\x07example\x03com\x00", wire.current());
        assert_eq!(13, name.serial_length());
    }

    #[test]
    fn repeated_name_becomes_pointer() {
        let name = DomainName::from_utf8("example.com").unwrap();
        let mut buffer = [0_u8; 64];
        let mut wire = WriteWire::from_bytes(&mut buffer);
        let mut compression = Some(CompressionMap::new());

        name.to_wire_format(&mut wire, &mut compression).unwrap();
        name.to_wire_format(&mut wire, &mut compression).unwrap();

        assert_eq!(b"\x07example\x03com\x00\xC0\x00", wire.current());

        let mut read_wire = wire.as_read_wire();
        assert_eq!(Ok(name.clone()), DomainName::from_wire_format(&mut read_wire));
        assert_eq!(Ok(name), DomainName::from_wire_format(&mut read_wire));
        assert!(read_wire.is_end_reached());
    }

    #[test]
    fn shared_suffix_becomes_pointer() {
        let first = DomainName::from_utf8("example.com").unwrap();
        let second = DomainName::from_utf8("www.example.com").unwrap();
        let mut buffer = [0_u8; 64];
        let mut wire = WriteWire::from_bytes(&mut buffer);
        let mut compression = Some(CompressionMap::new());

        first.to_wire_format(&mut wire, &mut compression).unwrap();
        second.to_wire_format(&mut wire, &mut compression).unwrap();

        assert_eq!(b"\x07example\x03com\x00\x03www\xC0\x00", wire.current());

        let mut read_wire = wire.as_read_wire();
        read_wire.set_offset(13).unwrap();
        assert_eq!(Ok(second), DomainName::from_wire_format(&mut read_wire));
        assert!(read_wire.is_end_reached());
    }

    #[test]
    fn pointer_resolves_against_full_message() {
        // A name at offset 2, followed by a name that is only a pointer to it and a trailing
        // byte that must be left unread.
        let bytes = b"\xFF\xFF\x03abc\x00\xC0\x02\x2A";
        let mut wire = ReadWire::from_bytes(bytes);
        wire.set_offset(7).unwrap();

        let name = DomainName::from_wire_format(&mut wire).unwrap();

        assert_eq!("abc", name.to_string());
        assert_eq!(9, wire.current_offset());
    }

    #[rstest]
    #[case::empty(b"", 0)]
    #[case::label_past_end(b"\x05abc", 0)]
    #[case::missing_root(b"\x03abc", 0)]
    #[case::truncated_pointer(b"\xC0", 0)]
    #[case::forward_pointer(b"\xC0\x02\x00", 0)]
    #[case::self_pointer(b"\x00\xC0\x01", 1)]
    #[case::reserved_0x40(b"\x40", 0)]
    #[case::reserved_0x80(b"\x80", 0)]
    fn malformed_names_are_rejected(#[case] bytes: &[u8], #[case] offset: usize) {
        let mut wire = ReadWire::from_bytes(bytes);
        wire.set_offset(offset).unwrap();

        let result = DomainName::from_wire_format(&mut wire);

        assert!(result.is_err(), "expected an error but got {result:?}");
    }

    #[test]
    fn forward_pointer_error_kind() {
        let bytes = b"\xC0\x05";
        let mut wire = ReadWire::from_bytes(bytes);

        assert_eq!(
            Err(ReadWireError::DomainNameError(DomainNameError::ForwardPointer { pointer: 5, offset: 0 })),
            DomainName::from_wire_format(&mut wire),
        );
    }
}
