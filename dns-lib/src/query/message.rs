use std::sync::Arc;

use tinyvec::TinyVec;
use ux::{u1, u3, u4};

use crate::{
    resource_record::{opcode::OpCode, rcode::RCode, resource_record::ResourceRecord},
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
};

use super::{qr::QR, question::Question};

/// https://datatracker.ietf.org/doc/html/rfc1035#section-4
///
/// The section counts are not stored. They are read to drive decoding and are written from the
/// lengths of the sections, so an encoded message always agrees with its contents.
#[derive(Clone, Debug)]
pub struct Message {
    pub id: u16,

    // Flags
    pub qr: QR,
    pub opcode: OpCode,
    pub authoritative_answer: bool,
    pub truncation: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub z: u3,
    pub rcode: RCode,

    // Data
    pub question: TinyVec<[Question; 1]>,
    pub answer: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,

    /// The buffer the message was decoded from, if any.
    wire: Option<Arc<[u8]>>,
}

impl Message {
    /// The largest message a client may send to, or receive from, a UDP server without EDNS.
    pub const MAX_UDP_MESSAGE_SIZE: usize = 512;
    /// The size of the scratch buffer messages are encoded into.
    pub const MAX_MESSAGE_SIZE: usize = 4096;

    #[inline]
    pub fn qr_flag(&self) -> &QR {
        &self.qr
    }

    #[inline]
    pub fn opcode_flag(&self) -> &OpCode {
        &self.opcode
    }

    #[inline]
    pub fn rcode_flag(&self) -> &RCode {
        &self.rcode
    }

    #[inline]
    pub fn question(&self) -> &[Question] {
        &self.question
    }

    #[inline]
    pub fn answer(&self) -> &[ResourceRecord] {
        &self.answer
    }

    #[inline]
    pub fn authority(&self) -> &[ResourceRecord] {
        &self.authority
    }

    #[inline]
    pub fn additional(&self) -> &[ResourceRecord] {
        &self.additional
    }

    /// The raw bytes this message was decoded from. Messages that were built rather than decoded
    /// have none.
    #[inline]
    pub fn raw_wire(&self) -> Option<&[u8]> {
        self.wire.as_deref()
    }

    /// The second header field, packed as it appears on the wire.
    #[inline]
    pub fn flags(&self) -> u16 {
        (u16::from(self.qr.code()) << 15)
        | ((u8::from(self.opcode.code()) as u16) << 11)
        | ((self.authoritative_answer as u16) << 10)
        | ((self.truncation as u16) << 9)
        | ((self.recursion_desired as u16) << 8)
        | ((self.recursion_available as u16) << 7)
        | ((u8::from(self.z) as u16) << 4)
        | (u8::from(self.rcode.code()) as u16)
    }

    /// Decodes a complete message. The buffer is kept alongside the decoded message so that it can
    /// be relayed unchanged. Bytes after the last section are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReadWireError> {
        if bytes.len() < (HEADER_BYTE_COUNT as usize) {
            return Err(ReadWireError::UnderflowError(format!(
                "a message needs a {HEADER_BYTE_COUNT} byte header but only {} bytes were received",
                bytes.len(),
            )));
        }

        let bytes: Arc<[u8]> = Arc::from(bytes);
        let mut wire = ReadWire::from_bytes(&bytes);
        let mut message = Self::from_wire_format(&mut wire)?;
        message.wire = Some(bytes);
        Ok(message)
    }

    /// Encodes the message with name compression.
    pub fn to_bytes(&self) -> Result<Vec<u8>, WriteWireError> {
        let mut buffer = [0_u8; Self::MAX_MESSAGE_SIZE];
        let mut wire = WriteWire::from_bytes(&mut buffer);
        self.to_wire_format(&mut wire, &mut Some(CompressionMap::new()))?;
        Ok(wire.current().to_vec())
    }

    /// Builds the response to `request`: the same id and flags with QR set, the request's
    /// question, authority, and additional sections, and `answer` as the answer section.
    pub fn response_to(request: &Message, answer: Vec<ResourceRecord>) -> Self {
        Self {
            id: request.id,
            qr: QR::Response,
            opcode: request.opcode,
            authoritative_answer: request.authoritative_answer,
            truncation: request.truncation,
            recursion_desired: request.recursion_desired,
            recursion_available: request.recursion_available,
            z: request.z,
            rcode: request.rcode,
            question: request.question.clone(),
            answer,
            authority: request.authority.clone(),
            additional: request.additional.clone(),
            wire: None,
        }
    }
}

impl PartialEq for Message {
    /// Compares the decoded contents. The raw buffer is not compared.
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
        && self.flags() == other.flags()
        && self.question == other.question
        && self.answer == other.answer
        && self.authority == other.authority
        && self.additional == other.additional
    }
}

impl Eq for Message {}

impl From<Question> for Message {
    #[inline]
    fn from(question: Question) -> Self {
        Self {
            id: 0,
            qr: QR::Query,
            opcode: OpCode::Query,
            authoritative_answer: false,
            truncation: false,
            recursion_desired: true,
            recursion_available: false,
            z: u3::new(0),
            rcode: RCode::NoError,
            question: TinyVec::from([question]),
            answer: vec![],
            authority: vec![],
            additional: vec![],
            wire: None,
        }
    }
}

#[inline]
const fn bool_to_u1(boolean: bool) -> u1 {
    match boolean {
        true => u1::new(1),
        false => u1::new(0),
    }
}

#[inline]
fn u1_to_bool(integer: u1) -> bool {
    match u16::from(integer) {
        1 => true,
        _ => false,
    }
}

#[inline]
fn section_count(length: usize, section: &str) -> Result<u16, WriteWireError> {
    u16::try_from(length).map_err(|_| WriteWireError::OutOfBoundsError(format!(
        "the {section} section has {length} entries but a message can hold at most {}", u16::MAX
    )))
}

/// Limits the up-front allocation for a section to what the remaining bytes could hold.
#[inline]
fn capacity_for(count: u16, wire: &ReadWire<'_>, min_entry_size: u16) -> usize {
    (count as usize).min(wire.current_state_len() / (min_entry_size as usize))
}

impl ToWire for Message {
    #[inline]
    fn to_wire_format<'a, 'b>(&self, wire: &'b mut WriteWire<'a>, compression: &mut Option<CompressionMap>) -> Result<(), WriteWireError> where 'a: 'b {
        self.id.to_wire_format(wire, compression)?;

        let qr = self.qr.code();
        let opcode = self.opcode.code();
        let aa = bool_to_u1(self.authoritative_answer);
        let tc = bool_to_u1(self.truncation);
        let rd = bool_to_u1(self.recursion_desired);
        (qr, opcode, aa, tc, rd).to_wire_format(wire, compression)?;

        let ra = bool_to_u1(self.recursion_available);
        let z = self.z;
        let rcode = self.rcode.code();
        (ra, z, rcode).to_wire_format(wire, compression)?;

        section_count(self.question.len(), "question")?.to_wire_format(wire, compression)?;
        section_count(self.answer.len(), "answer")?.to_wire_format(wire, compression)?;
        section_count(self.authority.len(), "authority")?.to_wire_format(wire, compression)?;
        section_count(self.additional.len(), "additional")?.to_wire_format(wire, compression)?;

        self.question.iter().try_for_each(|question| question.to_wire_format(wire, compression))?;
        self.answer.to_wire_format(wire, compression)?;
        self.authority.to_wire_format(wire, compression)?;
        self.additional.to_wire_format(wire, compression)
    }

    #[inline]
    fn serial_length(&self) -> u16 {
        self.question.iter()
            .fold(HEADER_BYTE_COUNT, |sum, question| sum.saturating_add(question.serial_length()))
            .saturating_add(self.answer.serial_length())
            .saturating_add(self.authority.serial_length())
            .saturating_add(self.additional.serial_length())
    }
}

impl FromWire for Message {
    #[inline]
    fn from_wire_format<'a, 'b>(wire: &'b mut ReadWire<'a>) -> Result<Self, ReadWireError> where Self: Sized, 'a: 'b {
        let id = u16::from_wire_format(wire)?;
        let (qr, opcode, aa, tc, rd) = <(u1, u4, u1, u1, u1)>::from_wire_format(wire)?;

        let qr = QR::from_code(qr);
        let opcode = OpCode::from_code(opcode);
        let aa = u1_to_bool(aa);
        let tc = u1_to_bool(tc);
        let rd = u1_to_bool(rd);

        let (ra, z, rcode) = <(u1, u3, u4)>::from_wire_format(wire)?;

        let ra = u1_to_bool(ra);
        let rcode = RCode::from_code(rcode);

        let qd_count = u16::from_wire_format(wire)?;
        let an_count = u16::from_wire_format(wire)?;
        let ns_count = u16::from_wire_format(wire)?;
        let ar_count = u16::from_wire_format(wire)?;

        let mut question = TinyVec::with_capacity(capacity_for(qd_count, wire, MIN_QUESTION_BYTE_COUNT));
        for _ in 0..qd_count {
            question.push(Question::from_wire_format(wire)?);
        }

        let mut answer = Vec::with_capacity(capacity_for(an_count, wire, MIN_RECORD_BYTE_COUNT));
        for _ in 0..an_count {
            answer.push(ResourceRecord::from_wire_format(wire)?);
        }

        let mut authority = Vec::with_capacity(capacity_for(ns_count, wire, MIN_RECORD_BYTE_COUNT));
        for _ in 0..ns_count {
            authority.push(ResourceRecord::from_wire_format(wire)?);
        }

        let mut additional = Vec::with_capacity(capacity_for(ar_count, wire, MIN_RECORD_BYTE_COUNT));
        for _ in 0..ar_count {
            additional.push(ResourceRecord::from_wire_format(wire)?);
        }

        Ok(Self {
            id,
            qr,
            opcode,
            authoritative_answer: aa,
            truncation: tc,
            recursion_desired: rd,
            recursion_available: ra,
            z,
            rcode,
            question,
            answer,
            authority,
            additional,
            wire: None,
        })
    }
}

#[cfg(test)]
mod circular_serde_sanity_test {
    use tinyvec::TinyVec;
    use ux::u3;

    use crate::{
        query::{qr::QR, question::Question},
        resource_record::{opcode::OpCode, rclass::RClass, rcode::RCode, resource_record::ResourceRecord, rtype::RType},
        serde::wire::circular_test::gen_test_circular_serde_sanity_test,
        types::domain_name::DomainName,
    };

    use super::Message;

    fn name(string: &str) -> DomainName {
        DomainName::from_utf8(string).unwrap()
    }

    gen_test_circular_serde_sanity_test!(
        single_question_circular_serde_sanity_test,
        Message::from(Question::new(name("example.com"), RType::A, RClass::IN))
    );
    gen_test_circular_serde_sanity_test!(
        all_sections_circular_serde_sanity_test,
        Message {
            id: 0xBEEF,
            qr: QR::Response,
            opcode: OpCode::Status,
            authoritative_answer: true,
            truncation: false,
            recursion_desired: true,
            recursion_available: true,
            z: u3::new(5),
            rcode: RCode::NXDomain,
            question: TinyVec::from([Question::new(name("www.example.com"), RType::CNAME, RClass::IN)]),
            answer: vec![
                ResourceRecord::new(name("www.example.com"), RType::CNAME, RClass::IN, 300, b"\x03web\x07example\x03com\x00".to_vec()),
                ResourceRecord::new(name("web.example.com"), RType::A, RClass::IN, 60, vec![10, 0, 0, 1]),
            ],
            authority: vec![
                ResourceRecord::new(name("example.com"), RType::NS, RClass::IN, 86400, b"\x02ns\x07example\x03com\x00".to_vec()),
            ],
            additional: vec![
                ResourceRecord::new(DomainName::new_root(), RType::OPT, RClass::new(4096), 0, vec![]),
            ],
            wire: None,
        }
    );
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use ux::u4;

    use crate::{
        query::{qr::QR, question::Question},
        resource_record::{opcode::OpCode, rclass::RClass, rcode::RCode, resource_record::ResourceRecord, rtype::RType},
        serde::wire::{read_wire::ReadWireError, to_wire::ToWire},
        types::domain_name::DomainName,
    };

    use super::Message;

    const EXAMPLE_QUERY: &[u8] = b"\x12\x34\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\x07example\x03com\x00\x00\x01\x00\x01";
    const EXAMPLE_REPLY: &[u8] = b"\x12\x34\x81\x80\x00\x01\x00\x01\x00\x00\x00\x00\x07example\x03com\x00\x00\x01\x00\x01\xC0\x0C\x00\x01\x00\x01\x00\x00\x0E\x10\x00\x04\x5D\xB8\xD8\x22";

    fn example_question() -> Question {
        Question::new(DomainName::from_utf8("example.com").unwrap(), RType::A, RClass::IN)
    }

    #[test]
    fn decode_query() {
        let message = Message::from_bytes(EXAMPLE_QUERY).unwrap();

        assert_eq!(0x1234, message.id);
        assert_eq!(QR::Query, message.qr);
        assert_eq!(OpCode::Query, message.opcode);
        assert!(message.recursion_desired);
        assert!(!message.recursion_available);
        assert_eq!(RCode::NoError, message.rcode);
        assert_eq!(0x0100, message.flags());
        assert_eq!(&[example_question()], message.question());
        assert!(message.answer().is_empty());
        assert_eq!(Some(EXAMPLE_QUERY), message.raw_wire());
    }

    #[test]
    fn decode_reply_with_pointer() {
        let message = Message::from_bytes(EXAMPLE_REPLY).unwrap();

        assert_eq!(QR::Response, message.qr);
        assert_eq!(0x8180, message.flags());
        assert_eq!(1, message.answer().len());

        let answer = &message.answer()[0];
        assert_eq!("example.com", answer.get_name().to_string());
        assert_eq!(RType::A, answer.get_rtype());
        assert_eq!(RClass::IN, answer.get_rclass());
        assert_eq!(3600, answer.get_ttl());
        assert_eq!(&[93_u8, 184, 216, 34][..], answer.rdata());
    }

    #[test]
    fn response_reuses_pointer_for_answer_name() {
        let query = Message::from_bytes(EXAMPLE_QUERY).unwrap();
        let answer = ResourceRecord::new(
            DomainName::from_utf8("example.com").unwrap(), RType::A, RClass::IN, 3600, vec![93, 184, 216, 34],
        );

        let response = Message::response_to(&query, vec![answer]);
        let bytes = response.to_bytes().unwrap();

        // Same as the upstream reply apart from the RA bit, which the request did not carry.
        let mut expected = EXAMPLE_REPLY.to_vec();
        expected[3] = 0x00;
        assert_eq!(expected, bytes);
        assert_eq!(None, response.raw_wire());
    }

    #[test]
    fn all_flag_bits_survive_decoding() {
        let mut bytes = EXAMPLE_QUERY.to_vec();
        bytes[2] = 0xFF;
        bytes[3] = 0xFF;

        let message = Message::from_bytes(&bytes).unwrap();

        assert_eq!(0xFFFF, message.flags());
        assert_eq!(RCode::Unknown(u4::new(15)), message.rcode);
        assert_eq!(bytes, message.to_bytes().unwrap());
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut bytes = EXAMPLE_QUERY.to_vec();
        bytes.extend_from_slice(&[0xDE, 0xAD]);

        let message = Message::from_bytes(&bytes).unwrap();

        assert_eq!(1, message.question().len());
    }

    #[rstest]
    #[case::empty(b"")]
    #[case::short_header(b"\x12\x34\x01\x00\x00\x01\x00\x00\x00\x00\x00")]
    #[case::missing_question(b"\x12\x34\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00")]
    #[case::truncated_qtype(b"\x12\x34\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\x07example\x03com\x00\x00")]
    #[case::label_past_end(b"\x12\x34\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\x3Fexample")]
    #[case::missing_answer(b"\x12\x34\x81\x80\x00\x01\x00\x01\x00\x00\x00\x00\x07example\x03com\x00\x00\x01\x00\x01")]
    #[case::forward_pointer(b"\x12\x34\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\xC0\x20\x00\x01\x00\x01")]
    #[case::huge_counts(b"\x12\x34\x01\x00\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\x00\x00\x01\x00\x01")]
    fn malformed_messages_are_rejected(#[case] bytes: &[u8]) {
        let result = Message::from_bytes(bytes);

        assert!(result.is_err(), "expected an error but got {result:?}");
    }

    #[test]
    fn short_header_is_underflow() {
        assert!(matches!(Message::from_bytes(&[0; 11]), Err(ReadWireError::UnderflowError(_))));
    }

    #[test]
    fn records_sharing_a_name_are_compressed() {
        let name = DomainName::from_utf8("example.com").unwrap();
        let mut message = Message::from(Question::new(name.clone(), RType::A, RClass::IN));
        message.qr = QR::Response;
        message.answer = vec![
            ResourceRecord::new(name.clone(), RType::A, RClass::IN, 60, vec![1, 1, 1, 1]),
            ResourceRecord::new(name.clone(), RType::A, RClass::IN, 60, vec![2, 2, 2, 2]),
        ];

        let bytes = message.to_bytes().unwrap();

        // header (12) + question (17) + two records that each start with a pointer (16 each)
        assert_eq!(12 + 17 + 16 + 16, bytes.len());
        assert_eq!(&[0xC0_u8, 0x0C][..], &bytes[29..31]);
        assert_eq!(&[0xC0_u8, 0x0C][..], &bytes[45..47]);

        let decoded = Message::from_bytes(&bytes).unwrap();
        assert_eq!(message, decoded);
        assert_eq!(name, *decoded.answer()[1].get_name());
    }

    #[test]
    fn oversized_message_length_saturates() {
        let mut message = Message::from(example_question());
        message.answer = vec![
            ResourceRecord::new(DomainName::new_root(), RType::TXT, RClass::IN, 60, vec![0; 40_000]),
            ResourceRecord::new(DomainName::new_root(), RType::TXT, RClass::IN, 60, vec![0; 40_000]),
        ];

        assert_eq!(u16::MAX, message.answer.serial_length());
        assert_eq!(u16::MAX, message.serial_length());
        assert!(message.to_bytes().is_err());
    }
}
