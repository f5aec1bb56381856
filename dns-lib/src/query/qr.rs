use std::fmt::Display;

use ux::u1;

/// The query/response bit of the header.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum QR {
    #[default]
    Query,
    Response,
}

impl Display for QR {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QR::Query => write!(f, "Query"),
            QR::Response => write!(f, "Response"),
        }
    }
}

impl QR {
    #[inline]
    pub const fn is_query(&self) -> bool {
        match self {
            QR::Query => true,
            QR::Response => false,
        }
    }

    #[inline]
    pub const fn is_response(&self) -> bool {
        match self {
            QR::Query => false,
            QR::Response => true,
        }
    }

    #[inline]
    pub const fn code(&self) -> u1 {
        match self {
            QR::Query => u1::new(0),
            QR::Response => u1::new(1),
        }
    }

    #[inline]
    pub fn from_code(value: u1) -> Self {
        match u16::from(value) {
            0 => QR::Query,
            _ => QR::Response,
        }
    }
}
