//! Macro for implementing Display and FromStr for small domain enums
//!
//! Generates a single lowercase string mapping shared by both traits, with
//! case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use tinderbox_domain::impl_domain_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Swipe {
//!     Left,
//!     Right,
//! }
//!
//! impl_domain_enum_conversions!(Swipe {
//!     Left => "left",
//!     Right => "right",
//! });
//!
//! assert_eq!(Swipe::Left.to_string(), "left");
//! assert_eq!("RIGHT".parse::<Swipe>().unwrap(), Swipe::Right);
//! ```

/// Implements Display and FromStr for a fieldless enum.
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of variants to their lowercase names
#[macro_export]
macro_rules! impl_domain_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
