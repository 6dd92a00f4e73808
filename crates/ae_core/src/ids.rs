//! crates/ae_core/src/ids.rs
//! Typed join key and output IDs.
//! Deterministic, ASCII-only, strict shapes; no I/O.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

const HEX64_LEN: usize = 64;
const TOKEN_MAX_LEN: usize = 64;

/// Lowercase hex (length must be exactly 64).
#[inline]
pub fn is_valid_sha256(s: &str) -> bool {
    s.len() == HEX64_LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Token for ProjectId: ^[A-Za-z0-9_.:-]{1,64}$ (ASCII only)
#[inline]
pub fn is_valid_token(s: &str) -> bool {
    let len = s.len();
    if len == 0 || len > TOKEN_MAX_LEN {
        return false;
    }
    s.bytes().all(|b| {
        b.is_ascii_alphanumeric() || matches!(b, b'_' | b'.' | b':' | b'-')
    })
}

macro_rules! simple_string_newtype {
    ($(#[$m:meta])* $name:ident) => {
        $(#[$m])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
        pub struct $name(String);

        impl $name {
            #[inline] pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl TryFrom<&str> for $name {
            type Error = CoreError;
            #[inline]
            fn try_from(value: &str) -> Result<Self, Self::Error> { value.parse() }
        }

        impl TryFrom<String> for $name {
            type Error = CoreError;
            #[inline]
            fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
        }

        impl From<$name> for String {
            #[inline]
            fn from(v: $name) -> String { v.0 }
        }
    }
}

simple_string_newtype!(
    /// Stable project identifier: ^[A-Za-z0-9_.:-]{1,64}$
    ProjectId
);

simple_string_newtype!(
    /// "DSH:" + 64-hex lowercase, derived from the canonical dashboard bytes.
    DashboardId
);

impl FromStr for ProjectId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_valid_token(s) { return Err(CoreError::InvalidToken); }
        Ok(ProjectId(s.to_owned()))
    }
}

impl FromStr for DashboardId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix("DSH:") {
            Some(hex) if is_valid_sha256(hex) => Ok(DashboardId(s.to_owned())),
            _ => Err(CoreError::InvalidId),
        }
    }
}

impl DashboardId {
    /// Build from a lowercase 64-hex digest.
    pub fn from_hex(hex: &str) -> Result<Self, CoreError> {
        if !is_valid_sha256(hex) { return Err(CoreError::InvalidId); }
        Ok(DashboardId(format!("DSH:{hex}")))
    }

    #[inline] pub fn as_hex(&self) -> &str { &self.0[4..] }
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;

    const HEX: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn project_tokens() {
        for ok in ["P", "p-1", "proj_42", "org:proj.7"] {
            assert!(is_valid_token(ok));
            let _p: ProjectId = ok.parse().unwrap();
        }
        let long = "x".repeat(65);
        for bad in ["", " ", "with space", "é", long.as_str()] {
            assert!(bad.parse::<ProjectId>().is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn dashboard_id_shape() {
        let id = DashboardId::from_hex(HEX).unwrap();
        assert_eq!(id.as_str(), format!("DSH:{HEX}"));
        assert_eq!(id.as_hex(), HEX);
        assert_eq!(id.to_string().parse::<DashboardId>().unwrap(), id);

        assert!("DSH:DEADBEEF".parse::<DashboardId>().is_err());
        assert!(HEX.parse::<DashboardId>().is_err()); // missing prefix
        assert!(DashboardId::from_hex(&HEX.to_uppercase()).is_err());
    }
}
