use std::fmt::Display;

use ux::u4;

/// The 4-bit response code carried in the message header.
///
/// https://www.iana.org/assignments/dns-parameters/dns-parameters.xhtml#dns-parameters-6
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum RCode {
    Unknown(u4),

    NoError,
    FormErr,
    ServFail,
    NXDomain,
    NotImp,
    Refused,
    YXDomain,
    YXRRSet,
    NXRRSet,
    NotAuth,
    NotZone,
    DsoTypeNI,
}

impl RCode {
    pub const MIN: u4 = u4::MIN;
    pub const MAX: u4 = u4::MAX;

    #[inline]
    pub const fn code(&self) -> u4 {
        return match self {
            Self::Unknown(x) => *x,

            Self::NoError   => u4::new(0),
            Self::FormErr   => u4::new(1),
            Self::ServFail  => u4::new(2),
            Self::NXDomain  => u4::new(3),
            Self::NotImp    => u4::new(4),
            Self::Refused   => u4::new(5),
            Self::YXDomain  => u4::new(6),
            Self::YXRRSet   => u4::new(7),
            Self::NXRRSet   => u4::new(8),
            Self::NotAuth   => u4::new(9),
            Self::NotZone   => u4::new(10),
            Self::DsoTypeNI => u4::new(11),
        };
    }

    #[inline]
    pub const fn mnemonic(&self) -> &str {
        return match self {
            Self::Unknown(_) => "Unknown",

            Self::NoError   => "NoError",
            Self::FormErr   => "FormErr",
            Self::ServFail  => "ServFail",
            Self::NXDomain  => "NXDomain",
            Self::NotImp    => "NotImp",
            Self::Refused   => "Refused",
            Self::YXDomain  => "YXDomain",
            Self::YXRRSet   => "YXRRSet",
            Self::NXRRSet   => "NXRRSet",
            Self::NotAuth   => "NotAuth",
            Self::NotZone   => "NotZone",
            Self::DsoTypeNI => "DSOTYPENI",
        };
    }

    #[inline]
    pub fn from_code(value: u4) -> Self {
        return match u8::from(value) {
            0  => Self::NoError,
            1  => Self::FormErr,
            2  => Self::ServFail,
            3  => Self::NXDomain,
            4  => Self::NotImp,
            5  => Self::Refused,
            6  => Self::YXDomain,
            7  => Self::YXRRSet,
            8  => Self::NXRRSet,
            9  => Self::NotAuth,
            10 => Self::NotZone,
            11 => Self::DsoTypeNI,
            _  => Self::Unknown(value),
        };
    }

    #[inline]
    pub const fn is_no_error(&self) -> bool {
        matches!(self, Self::NoError)
    }
}

impl Default for RCode {
    #[inline]
    fn default() -> Self {
        Self::NoError
    }
}

impl Display for RCode {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "RCODE{code}"),
            _ => write!(f, "{}", self.mnemonic()),
        }
    }
}

#[cfg(test)]
mod test {
    use rstest::rstest;
    use ux::u4;

    use super::RCode;

    #[rstest]
    #[case(0, RCode::NoError)]
    #[case(3, RCode::NXDomain)]
    #[case(4, RCode::NotImp)]
    #[case(11, RCode::DsoTypeNI)]
    #[case(12, RCode::Unknown(u4::new(12)))]
    fn codes_round_trip(#[case] code: u8, #[case] expected: RCode) {
        let rcode = RCode::from_code(u4::new(code));

        assert_eq!(expected, rcode);
        assert_eq!(u4::new(code), rcode.code());
    }

    #[test]
    fn unknown_codes_display_numerically() {
        assert_eq!("NXDomain", RCode::NXDomain.to_string());
        assert_eq!("RCODE15", RCode::Unknown(u4::new(15)).to_string());
    }
}
