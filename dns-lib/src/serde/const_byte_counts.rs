use std::net::Ipv4Addr;

// #################### BUILT-IN PRIMITIVE UNSIGNED ####################

pub const  U8_BYTE_COUNT: u16 = ( u8::BITS / 8) as u16;
pub const U16_BYTE_COUNT: u16 = (u16::BITS / 8) as u16;
pub const U32_BYTE_COUNT: u16 = (u32::BITS / 8) as u16;

// #################### BUILT-IN PRIMITIVE SIGNED ####################

pub const I32_BYTE_COUNT: u16 = (i32::BITS / 8) as u16;

// #################### ADDRESS TYPES ####################

pub const IPV4_BYTE_COUNT: u16 = (Ipv4Addr::BITS / 8) as u16;

// #################### MESSAGE SECTIONS ####################

/// id, flags, and the four section counts.
pub const HEADER_BYTE_COUNT: u16 = 6 * U16_BYTE_COUNT;

/// The smallest possible question: a root name, qtype, and qclass.
pub const MIN_QUESTION_BYTE_COUNT: u16 = U8_BYTE_COUNT + (2 * U16_BYTE_COUNT);

/// The smallest possible record: a root name, type, class, ttl, and an empty rdata.
pub const MIN_RECORD_BYTE_COUNT: u16 = U8_BYTE_COUNT + (3 * U16_BYTE_COUNT) + I32_BYTE_COUNT;
