use std::fmt;

use rand::{Rng, RngCore};
use serde::Serialize;

use crate::error::{Error, Result};

const ID_TEMPLATE: &[u8; 36] = b"xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx";
const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Identifier of a knowledge-base node, laid out like a version 4 UUID.
///
/// The same value is the node's declared `id` and its filename stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Validate an externally supplied identifier.
    ///
    /// Only the canonical lowercase hyphenated form is accepted, so a parsed
    /// id always produces the same filename as a generated one.
    pub fn parse(value: &str) -> Result<Self> {
        if value.len() != ID_TEMPLATE.len() {
            return Err(Error::InvalidIdentifier(format!(
                "expected {} characters, got {}",
                ID_TEMPLATE.len(),
                value.len()
            )));
        }

        for (idx, (actual, expected)) in value.bytes().zip(ID_TEMPLATE.iter().copied()).enumerate() {
            let ok = match expected {
                b'-' | b'4' => actual == expected,
                b'y' => matches!(actual, b'8' | b'9' | b'a' | b'b'),
                _ => HEX_DIGITS.contains(&actual),
            };
            if !ok {
                return Err(Error::InvalidIdentifier(format!(
                    "unexpected character at position {} in {value}",
                    idx + 1
                )));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Draw a fresh node id from `rng`.
///
/// Every `x` of the template becomes an independent hex digit; the `y`
/// position keeps only the low two bits of its draw and sets bit 3, giving
/// one of `8`, `9`, `a`, `b`. Not meant to be unpredictable.
pub fn generate_node_id(rng: &mut dyn RngCore) -> NodeId {
    let mut out = String::with_capacity(ID_TEMPLATE.len());
    for &slot in ID_TEMPLATE {
        match slot {
            b'x' => {
                let r: u8 = rng.random_range(0..16);
                out.push(HEX_DIGITS[r as usize] as char);
            }
            b'y' => {
                let r: u8 = rng.random_range(0..16);
                out.push(HEX_DIGITS[((r & 0x3) | 0x8) as usize] as char);
            }
            literal => out.push(literal as char),
        }
    }
    NodeId(out)
}
