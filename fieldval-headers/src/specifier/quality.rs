use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::{fmt, str::FromStr};

use crate::ValueError;
use crate::error::QualityBound;
use crate::grammar::{Cursor, ParseError};

/// A quality value, as used by `q` parameters of content negotiation.
///
/// Stored as thousandths in `[0, 1000]`, e.g. `q=0.5` is `Quality(500)`.
///
/// # ABNF
///
/// ```text
/// weight = OWS ";" OWS "q=" qvalue
/// qvalue = ( "0" [ "." 0*3DIGIT ] )
///        / ( "1" [ "." 0*3("0") ] )
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Quality(u16);

impl Quality {
    pub const MAX: Self = Self(1000);
    pub const MIN: Self = Self(0);

    /// Create a quality from thousandths, `None` if above `1000`.
    #[must_use]
    pub const fn new(thousandths: u16) -> Option<Self> {
        if thousandths <= 1000 {
            Some(Self(thousandths))
        } else {
            None
        }
    }

    /// Create a quality from thousandths, clamping to `1000`.
    #[must_use]
    pub const fn new_clamped(thousandths: u16) -> Self {
        if thousandths > 1000 {
            Self::MAX
        } else {
            Self(thousandths)
        }
    }

    #[must_use]
    pub const fn one() -> Self {
        Self::MAX
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self::MIN
    }

    /// Thousandths in `[0, 1000]`.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn as_f32(self) -> f32 {
        f32::from(self.0) / 1000.0
    }

    /// Convert a float in `[0, 1]`, rounding to thousandths.
    pub fn try_from_f32(value: f32) -> Result<Self, ValueError> {
        if value.is_nan() || value < 0.0 {
            Err(ValueError::QualityOutOfRange {
                value: smol_str::format_smolstr!("{value}"),
                bound: QualityBound::Lower,
            })
        } else if value > 1.0 {
            Err(ValueError::QualityOutOfRange {
                value: smol_str::format_smolstr!("{value}"),
                bound: QualityBound::Upper,
            })
        } else {
            Ok(Self((value * 1000.0).round() as u16))
        }
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::MAX
    }
}

impl TryFrom<u16> for Quality {
    type Error = ValueError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| ValueError::QualityOutOfRange {
            value: smol_str::format_smolstr!("{}", f32::from(value) / 1000.0),
            bound: QualityBound::Upper,
        })
    }
}

impl From<Quality> for u16 {
    fn from(q: Quality) -> Self {
        q.0
    }
}

impl FromStr for Quality {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut cursor = Cursor::new(s);
        if let Ok(lexeme) = cursor.read_quality_value()
            && cursor.at_end()
        {
            let n = thousandths(lexeme);
            return if n > 1000 {
                Err(ValueError::QualityOutOfRange {
                    value: SmolStr::new(s),
                    bound: QualityBound::Upper,
                })
            } else {
                Ok(Self(n as u16))
            };
        }
        Err(classify_invalid(s))
    }
}

/// Thousandths for a lexeme of the shape `DIGIT [ "." 0*3DIGIT ]`.
fn thousandths(lexeme: &str) -> u32 {
    let (int, frac) = lexeme.split_once('.').unwrap_or((lexeme, ""));
    let mut n = int.bytes().fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0')) * 1000;
    let mut scale = 100;
    for b in frac.bytes() {
        n += u32::from(b - b'0') * scale;
        scale /= 10;
    }
    n
}

/// Explain why `text` is not a quality value: a number outside of the
/// range, or not a number (in qvalue shape) at all.
fn classify_invalid(text: &str) -> ValueError {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value < 0.0 => ValueError::QualityOutOfRange {
            value: SmolStr::new(text),
            bound: QualityBound::Lower,
        },
        Ok(value) if value.is_finite() && value > 1.0 => ValueError::QualityOutOfRange {
            value: SmolStr::new(text),
            bound: QualityBound::Upper,
        },
        Ok(value) => ParseError::invalid_number(text, non_qvalue_reason(text, value)).into(),
        Err(err) => ParseError::invalid_number(text, err).into(),
    }
}

/// Reason for a numeral within `[0, 1]` (or not finite) that is still no qvalue.
fn non_qvalue_reason(text: &str, value: f64) -> &'static str {
    if !value.is_finite() {
        "expected a finite number"
    } else if text.starts_with(['-', '+']) {
        "a sign is not allowed"
    } else if text.contains(['e', 'E']) {
        "exponent notation is not allowed"
    } else if text.starts_with('.') {
        "expected a digit before the decimal point"
    } else {
        "expected at most three decimal digits"
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1000 => f.write_str("1"),
            0 => f.write_str("0"),
            n => {
                let s = format!("{n:03}");
                write!(f, "0.{}", s.trim_end_matches('0'))
            }
        }
    }
}
