#[doc(hidden)]
#[macro_export]
/// A macro which defines a case-insensitive token enum.
///
/// Each known variant maps to its canonical (lower-case) wire form,
/// optionally with aliases. Anything else lands in `Unknown`, stored
/// lower-cased. The generated type does not implement `FromStr`:
/// the owning crate validates the token grammar first and then calls
/// `from_token` (or `strict_parse` to only accept known values).
/// `Deserialize` goes through that `FromStr` impl.
macro_rules! __enum_builder {
    (
        $(#[$m:meta])*
        @Token
        $enum_vis:vis enum $enum_name:ident
        { $( $(#[$enum_meta:meta])* $enum_var:ident => $enum_val:literal $(| $enum_val_alt:literal)* ),* $(,)? }
    ) => {
        $(#[$m])*
        #[derive(Debug, PartialEq, Eq, Clone, Hash)]
        $enum_vis enum $enum_name {
            $(
                $(#[$enum_meta])*
                $enum_var
            ),*
            ,Unknown($crate::macros::enums::__SmolStr)
        }

        impl $enum_name {
            /// The canonical wire form of this value.
            #[allow(dead_code)]
            $enum_vis fn as_str(&self) -> &str {
                match self {
                    $( $enum_name::$enum_var => $enum_val),*
                    ,$enum_name::Unknown(v) => v.as_str(),
                }
            }

            /// Returns `None` for values that are not known,
            /// matching ASCII case-insensitively (aliases included).
            #[allow(dead_code)]
            $enum_vis fn strict_parse(s: &str) -> Option<Self> {
                $crate::macros::match_ignore_ascii_case_str!(match (s) {
                    $($enum_val $(| $enum_val_alt)* => Some($enum_name::$enum_var)),*
                    , _ => None,
                })
            }

            /// Map an already validated token onto a known variant,
            /// or `Unknown` holding its lower-cased form.
            #[allow(dead_code)]
            $enum_vis fn from_token(s: &str) -> Self {
                match Self::strict_parse(s) {
                    Some(v) => v,
                    None => $enum_name::Unknown($crate::macros::enums::__SmolStr::new(
                        s.trim().to_ascii_lowercase(),
                    )),
                }
            }

            /// Returns `true` for values that did not map onto a known variant.
            #[allow(dead_code)]
            $enum_vis fn is_unknown(&self) -> bool {
                matches!(self, $enum_name::Unknown(_))
            }
        }

        impl ::std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::macros::enums::__SerdeSerialize for $enum_name {
            #[inline]
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::macros::enums::__SerdeSerializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> $crate::macros::enums::__SerdeDeserialize<'de> for $enum_name {
            #[inline]
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::macros::enums::__SerdeDeserializer<'de>,
            {
                let s = <::std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
                s.parse().map_err(<D::Error as $crate::macros::enums::__SerdeDeError>::custom)
            }
        }
    };
}

#[doc(inline)]
pub use crate::__enum_builder as enum_builder;

#[doc(hidden)]
pub use serde::{
    Deserialize as __SerdeDeserialize, Deserializer as __SerdeDeserializer,
    Serialize as __SerdeSerialize, Serializer as __SerdeSerializer,
    de::Error as __SerdeDeError,
};

#[doc(hidden)]
pub use ::smol_str::SmolStr as __SmolStr;
