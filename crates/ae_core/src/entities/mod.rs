//! Domain entities: inputs handed to the calculators and the derived,
//! presentation-ready values they produce.

/// Fold a wire literal to a comparison key: ASCII alphanumerics, lowercased.
/// `"Very Unlikely"`, `"very_unlikely"` and `"VERY-UNLIKELY"` all fold to `"veryunlikely"`.
pub(crate) fn fold_literal(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Define an enum with explicit wire tokens, lenient `FromStr`, and `Display`.
/// Declaration order is the `Ord` order.
macro_rules! wire_enum {
    ($(#[$m:meta])* $name:ident, $err:expr => { $($variant:ident = $token:literal),+ $(,)? }) => {
        $(#[$m])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum $name {
            $(
                #[cfg_attr(feature = "serde", serde(rename = $token))]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            #[inline]
            pub fn as_str(self) -> &'static str {
                match self { $($name::$variant => $token,)+ }
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::errors::CoreError;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let key = $crate::entities::fold_literal(s);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| $crate::entities::fold_literal(v.as_str()) == key)
                    .ok_or($err)
            }
        }
    };
}

pub mod assessment;
pub mod questionnaire;
pub mod risk;
pub mod scan;
pub mod signals;

pub use assessment::*;
pub use questionnaire::*;
pub use risk::*;
pub use scan::*;
pub use signals::*;
