//! Macros and helpers shared by the typed headers.

/// Separator between the elements of a list header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListSeparator {
    Comma,
    Semicolon,
}

impl ListSeparator {
    pub(crate) const fn as_char(self) -> char {
        match self {
            Self::Comma => ',',
            Self::Semicolon => ';',
        }
    }

    /// The separator as written when serializing, followed by a space.
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Comma => ", ",
            Self::Semicolon => "; ",
        }
    }
}

/// Implement [`TypedHeader`](crate::TypedHeader),
/// [`HeaderDecode`](crate::HeaderDecode), [`HeaderEncode`](crate::HeaderEncode)
/// and [`FromStr`](std::str::FromStr) for a header type.
///
/// The type provides `fn parse_text(&str, &DecodeConfig) -> Result<Self, ValueError>`
/// and a [`Display`](std::fmt::Display) impl producing its wire text.
macro_rules! derive_header {
    ($type:ident, name: $name:expr $(, sep: $sep:ident)? $(,)?) => {
        impl $crate::TypedHeader for $type {
            fn name() -> &'static ::http::header::HeaderName {
                &$name
            }
        }

        impl $crate::HeaderDecode for $type {
            $(const SEPARATOR: &'static str = $crate::util::ListSeparator::$sep.as_str();)?

            fn decode_text(
                text: &str,
                config: &$crate::DecodeConfig,
            ) -> Result<Self, $crate::ValueError> {
                Self::parse_text(text, config)
            }
        }

        impl $crate::HeaderEncode for $type {}

        impl ::std::str::FromStr for $type {
            type Err = $crate::ValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_text(s, $crate::DecodeConfig::global())
            }
        }
    };
}

/// Define a header that wraps a single value type,
/// parsed from the whole field value by `$parse`.
macro_rules! derive_value_header {
    (
        #[header(name = $name:expr, parse = $parse:path)]
        $(#[$m:meta])*
        pub struct $type:ident($field_vis:vis $t:ty);
    ) => {
        $(#[$m])*
        pub struct $type($field_vis $t);

        impl $type {
            fn parse_text(
                text: &str,
                config: &$crate::DecodeConfig,
            ) -> Result<Self, $crate::ValueError> {
                let mut cursor = $crate::grammar::Cursor::with_config(text, config);
                cursor.skip_whitespace();
                let value = $parse(&mut cursor).map_err($crate::ValueError::from)?;
                cursor.finish()?;
                Ok(Self(value))
            }
        }

        impl From<$t> for $type {
            fn from(value: $t) -> Self {
                Self(value)
            }
        }

        impl ::std::fmt::Display for $type {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        derive_header!($type, name: $name);
    };
}

/// Define a `1#element` list header backed by a [`NonEmptyVec`].
///
/// The elements are parsed with `$parse` and separated by `$sep`.
/// No mutable access to the elements is given out: a list is
/// built through its constructors and read through iterators.
///
/// [`NonEmptyVec`]: fieldval_utils::collections::NonEmptyVec
macro_rules! derive_non_empty_list_header {
    (
        #[header(name = $name:expr, sep = $sep:ident, parse = $parse:path)]
        $(#[$m:meta])*
        pub struct $type:ident(NonEmptyVec<$t:ty>);
    ) => {
        $(#[$m])*
        pub struct $type(::fieldval_utils::collections::NonEmptyVec<$t>);

        impl $type {
            /// Create the header with a single element.
            #[must_use]
            pub fn new(value: $t) -> Self {
                Self(::fieldval_utils::collections::NonEmptyVec::new(value))
            }

            #[must_use]
            pub fn from_values(values: ::fieldval_utils::collections::NonEmptyVec<$t>) -> Self {
                Self(values)
            }

            /// Create the header from its elements,
            /// failing with [`ValueError::EmptyList`](crate::ValueError::EmptyList) when there are none.
            pub fn try_from_iter<I>(values: I) -> Result<Self, $crate::ValueError>
            where
                I: IntoIterator<Item = $t>,
            {
                ::fieldval_utils::collections::NonEmptyVec::collect(values)
                    .map(Self)
                    .ok_or($crate::ValueError::EmptyList)
            }

            /// Merge the elements of multiple headers of this kind.
            ///
            /// Fails with [`ValueError::WrongType`](crate::ValueError::WrongType)
            /// for a header of any other kind, and with
            /// [`ValueError::EmptyList`](crate::ValueError::EmptyList) when there are none.
            pub fn try_from_headers<I>(headers: I) -> Result<Self, $crate::ValueError>
            where
                I: IntoIterator<Item = $crate::AnyHeader>,
            {
                let mut values = Vec::new();
                for header in headers {
                    let header = Self::try_from(header)?;
                    values.extend(header.0);
                }
                Self::try_from_iter(values)
            }

            pub fn iter(&self) -> ::fieldval_utils::collections::NonEmptyVecIter<'_, $t> {
                self.0.iter()
            }

            #[must_use]
            pub fn first(&self) -> &$t {
                self.0.first()
            }

            #[must_use]
            #[allow(clippy::len_without_is_empty)]
            pub fn len(&self) -> usize {
                self.0.len()
            }

            #[must_use]
            pub fn into_values(self) -> ::fieldval_utils::collections::NonEmptyVec<$t> {
                self.0
            }

            fn parse_text(
                text: &str,
                config: &$crate::DecodeConfig,
            ) -> Result<Self, $crate::ValueError> {
                let mut cursor = $crate::grammar::Cursor::with_config(text, config);
                let values = $crate::grammar::parse_delimited(
                    &mut cursor,
                    $crate::util::ListSeparator::$sep.as_char(),
                    |cursor| $parse(cursor).map_err($crate::ValueError::from),
                )?;
                cursor.finish()?;
                Ok(Self(values))
            }
        }

        impl From<$t> for $type {
            fn from(value: $t) -> Self {
                Self::new(value)
            }
        }

        impl<'a> IntoIterator for &'a $type {
            type Item = &'a $t;
            type IntoIter = ::fieldval_utils::collections::NonEmptyVecIter<'a, $t>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl ::std::fmt::Display for $type {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                for (i, value) in self.0.iter().enumerate() {
                    if i > 0 {
                        f.write_str($crate::util::ListSeparator::$sep.as_str())?;
                    }
                    ::std::fmt::Display::fmt(value, f)?;
                }
                Ok(())
            }
        }

        derive_header!($type, name: $name, sep: $sep);
    };
}

/// Define a header holding a single [`HttpDate`](crate::specifier::HttpDate).
macro_rules! derive_http_date_header {
    (
        #[header(name = $name:expr)]
        $(#[$m:meta])*
        pub struct $type:ident(HttpDate);
    ) => {
        $(#[$m])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $type($crate::specifier::HttpDate);

        impl $type {
            #[must_use]
            pub fn date(&self) -> $crate::specifier::HttpDate {
                self.0
            }

            fn parse_text(
                text: &str,
                _config: &$crate::DecodeConfig,
            ) -> Result<Self, $crate::ValueError> {
                text.parse().map(Self)
            }
        }

        impl From<$crate::specifier::HttpDate> for $type {
            fn from(date: $crate::specifier::HttpDate) -> Self {
                Self(date)
            }
        }

        impl From<::std::time::SystemTime> for $type {
            fn from(time: ::std::time::SystemTime) -> Self {
                Self(time.into())
            }
        }

        impl From<$type> for ::std::time::SystemTime {
            fn from(date: $type) -> Self {
                date.0.into()
            }
        }

        impl ::std::fmt::Display for $type {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        derive_header!($type, name: $name);
    };
}

/// Define a header holding a single non-negative decimal number.
macro_rules! derive_number_header {
    (
        #[header(name = $name:expr)]
        $(#[$m:meta])*
        pub struct $type:ident(pub u64);
    ) => {
        $(#[$m])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $type(pub u64);

        impl $type {
            fn parse_text(
                text: &str,
                config: &$crate::DecodeConfig,
            ) -> Result<Self, $crate::ValueError> {
                let mut cursor = $crate::grammar::Cursor::with_config(text, config);
                cursor.skip_whitespace();
                let n = $crate::grammar::read_number(&mut cursor)?;
                cursor.finish()?;
                Ok(Self(n))
            }
        }

        impl From<u64> for $type {
            fn from(n: u64) -> Self {
                Self(n)
            }
        }

        impl ::std::fmt::Display for $type {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, f)
            }
        }

        derive_header!($type, name: $name);
    };
}
