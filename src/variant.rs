//! Closed error domains.
//!
//! A domain is declared once with [`variants!`](crate::variants). Each line names a
//! tag, the enum variant that carries it, and the detail type, if any:
//!
//! ```rust
//! use outcome::{Outcome, Variant, variants};
//!
//! variants! {
//!     /// Ways parsing a number can fail.
//!     #[derive(Debug, Clone, PartialEq)]
//!     pub enum ParseError: ParseErrorCases {
//!         invalid_number => InvalidNumber(String),
//!         negative => Negative(i64),
//!         empty => Empty,
//!     }
//! }
//!
//! let failed: Outcome<u64, ParseError> = Outcome::failure(ParseError::Negative(-3));
//! assert_eq!(failed.tag(), Some("negative"));
//! assert_eq!(ParseError::TAGS, &["invalid_number", "negative", "empty"]);
//! ```
//!
//! The macro generates:
//!
//! - the enum itself, with the given attributes;
//! - a [`Variant`] impl mapping each variant to its tag;
//! - a handler struct (`ParseErrorCases` above) with one public field per tag, used by
//!   [`match_nested`](crate::dispatch::match_nested). Because a struct literal must
//!   name every field, leaving a tag unhandled is a compile error;
//! - when the leading attributes include `#[wire]` and the `serde` feature is on, a
//!   codec that writes `{ "tag": ..., "detail": ... }`, omitting `detail` for
//!   variants without one. Decoding accepts the two fields in either order; a
//!   `detail` seen before its tag is buffered as a `serde_json::Value`. Unknown or
//!   repeated fields are rejected, and a variant without detail accepts at most
//!   `"detail": null`.
//!
//! The handler struct uses the tags as its type parameters, so a tag must not share
//! a name with a type used as detail in the same domain.

use std::{fmt, marker::PhantomData};

use crate::outcome::Outcome;

/// A closed set of failure variants, each identified by a tag.
pub trait Variant {
    /// Every tag of the domain, in declaration order.
    const TAGS: &'static [&'static str];

    /// The tag of this failure.
    fn tag(&self) -> &'static str;
}

/// A per-tag failure handler.
///
/// `Args` is `()` for variants without detail and `(D,)` for variants carrying a `D`,
/// so unit variants take `|| ...` and detail variants take `|detail: D| ...`.
pub trait Handler<Args, R> {
    /// Invokes the handler with the variant's detail.
    fn call(self, args: Args) -> R;
}

impl<F, R> Handler<(), R> for F
where
    F: FnOnce() -> R,
{
    #[inline]
    fn call(self, (): ()) -> R {
        self()
    }
}

impl<F, D, R> Handler<(D,), R> for F
where
    F: FnOnce(D) -> R,
{
    #[inline]
    fn call(self, (detail,): (D,)) -> R {
        self(detail)
    }
}

/// An exhaustive set of handlers for the error domain `E`.
///
/// Implemented by the handler struct that [`variants!`](crate::variants) generates.
pub trait Cases<E, R> {
    /// Routes `error` to the handler registered for its tag.
    fn dispatch(self, error: E) -> R;
}

/// Constructors bound to one error domain.
///
/// Carries no data; it only pins the failure type so call sites never spell it out.
///
/// ```rust
/// use outcome::{factory, variants, Outcome};
///
/// variants! {
///     #[derive(Debug, PartialEq)]
///     pub enum QuotaError: QuotaErrorCases {
///         exhausted => Exhausted(u32),
///     }
/// }
///
/// let quota = factory::<QuotaError>();
/// let ok: Outcome<&str, QuotaError> = quota.success("granted");
/// let denied: Outcome<&str, QuotaError> = quota.failure(QuotaError::Exhausted(10));
/// assert!(ok.is_success());
/// assert_eq!(denied.tag(), Some("exhausted"));
/// ```
pub struct Factory<E> {
    _domain: PhantomData<fn() -> E>,
}

impl<E> Factory<E> {
    /// Creates a factory for the domain `E`.
    pub const fn new() -> Self {
        Factory {
            _domain: PhantomData,
        }
    }

    /// Same as [`Outcome::success`], with the failure type fixed to `E`.
    #[inline]
    pub const fn success<V>(&self, value: V) -> Outcome<V, E> {
        Outcome::Success(value)
    }

    /// Same as [`Outcome::failure`], with the failure type fixed to `E`.
    #[inline]
    pub fn failure<V>(&self, error: impl Into<E>) -> Outcome<V, E> {
        Outcome::Failure(error.into())
    }
}

impl<E> Clone for Factory<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Factory<E> {}

impl<E> Default for Factory<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Factory<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Factory")
            .field("domain", &std::any::type_name::<E>())
            .finish()
    }
}

/// Returns the constructor factory for the error domain `E`.
pub const fn factory<E: Variant>() -> Factory<E> {
    Factory::new()
}

/// Declares a closed error domain. See the [module docs](crate::variant).
///
/// A `#[wire]` marker among the leading attributes also generates the serde codec
/// (with the `serde` feature); every detail type must then implement `Serialize`
/// and `Deserialize`.
#[macro_export]
macro_rules! variants {
    (@scan [$($pre:tt)*] #[wire] $($rest:tt)*) => {
        $crate::variants!(@define $($pre)* $($rest)*);
        $crate::variants!(@wire $($rest)*);
    };
    (@scan [$($pre:tt)*] #[$($attr:tt)*] $($rest:tt)*) => {
        $crate::variants!(@scan [$($pre)* #[$($attr)*]] $($rest)*);
    };
    (@scan [$($pre:tt)*] $($rest:tt)*) => {
        $crate::variants!(@define $($pre)* $($rest)*);
    };
    (@wire $(#[$meta:meta])* $vis:vis enum $name:ident : $cases:ident { $($body:tt)* }) => {
        $crate::__variant_serde!($name { $($body)* });
    };
    (
        @define
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $cases:ident {
            $(
                $(#[$vmeta:meta])*
                $tag:ident => $variant:ident $( ( $detail:ty ) )?
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant $( ($detail) )?,
            )+
        }

        impl $crate::Variant for $name {
            const TAGS: &'static [&'static str] = &[$(stringify!($tag)),+];

            fn tag(&self) -> &'static str {
                match self {
                    $( $name::$variant { .. } => stringify!($tag), )+
                }
            }
        }

        #[doc = concat!("Handlers for every tag of [`", stringify!($name), "`].")]
        #[allow(non_camel_case_types)]
        $vis struct $cases<$($tag),+> {
            $( pub $tag: $tag, )+
        }

        #[allow(non_camel_case_types)]
        impl<__Ret, $($tag),+> $crate::Cases<$name, __Ret> for $cases<$($tag),+>
        where
            $( $tag: $crate::Handler<$crate::__variant_args!($($detail)?), __Ret>, )+
        {
            fn dispatch(self, error: $name) -> __Ret {
                match error {
                    $(
                        $crate::__variant_pattern!($name::$variant, detail $(, $detail)?) => {
                            $crate::Handler::call(
                                self.$tag,
                                $crate::__variant_values!(detail $(, $detail)?),
                            )
                        }
                    )+
                }
            }
        }
    };
    (@define $($tokens:tt)*) => {
        ::core::compile_error!(
            "expected `[pub] enum Name: NameCases { tag => Variant, tag => Variant(Detail), .. }`"
        );
    };
    ($($input:tt)*) => {
        $crate::variants!(@scan [] $($input)*);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __variant_args {
    () => { () };
    ($detail:ty) => { ($detail,) };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __variant_values {
    ($binding:ident) => { () };
    ($binding:ident, $detail:ty) => { ($binding,) };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __variant_pattern {
    ($name:ident :: $variant:ident, $binding:ident) => { $name::$variant };
    ($name:ident :: $variant:ident, $binding:ident, $detail:ty) => { $name::$variant($binding) };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __variant_len {
    () => { 1 };
    ($detail:ty) => { 2 };
}

/// Reads `detail` straight from the map once the tag is known.
#[doc(hidden)]
#[macro_export]
macro_rules! __variant_stream {
    ($map:ident, $tag:ident, $name:ident :: $variant:ident) => {
        match $map.next_value::<::core::option::Option<$crate::__private::serde::de::IgnoredAny>>()? {
            ::core::option::Option::None => ::core::result::Result::Ok($name::$variant),
            ::core::option::Option::Some(_) => ::core::result::Result::Err(
                $crate::__private::serde::de::Error::custom(concat!("`", stringify!($tag), "` takes no detail")),
            ),
        }
    };
    ($map:ident, $tag:ident, $name:ident :: $variant:ident, $detail:ty) => {
        $map.next_value::<$detail>().map($name::$variant)
    };
}

/// Builds the variant from a `detail` buffered before the tag was seen, or from its absence.
#[doc(hidden)]
#[macro_export]
macro_rules! __variant_buffered {
    ($buffered:ident, $tag:ident, $name:ident :: $variant:ident) => {
        match $buffered {
            ::core::option::Option::None
            | ::core::option::Option::Some($crate::__private::serde_json::Value::Null) => {
                ::core::result::Result::Ok($name::$variant)
            }
            ::core::option::Option::Some(_) => ::core::result::Result::Err(
                $crate::__private::serde::de::Error::custom(concat!("`", stringify!($tag), "` takes no detail")),
            ),
        }
    };
    ($buffered:ident, $tag:ident, $name:ident :: $variant:ident, $detail:ty) => {
        match $buffered {
            ::core::option::Option::Some(value) => {
                <$detail as $crate::__private::serde::Deserialize>::deserialize(value)
                    .map($name::$variant)
                    .map_err($crate::__private::serde::de::Error::custom)
            }
            ::core::option::Option::None => ::core::result::Result::Err(
                $crate::__private::serde::de::Error::missing_field("detail"),
            ),
        }
    };
}

#[cfg(feature = "serde")]
#[doc(hidden)]
#[macro_export]
macro_rules! __variant_serde {
    ($name:ident {
        $(
            $(#[$vmeta:meta])*
            $tag:ident => $variant:ident $( ($detail:ty) )?
        ),+ $(,)?
    }) => {
        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                use $crate::__private::serde::ser::SerializeStruct as _;

                match self {
                    $(
                        $crate::__variant_pattern!($name::$variant, detail $(, $detail)?) => {
                            let mut state = serializer.serialize_struct(
                                stringify!($name),
                                $crate::__variant_len!($($detail)?),
                            )?;
                            state.serialize_field("tag", stringify!($tag))?;
                            $( state.serialize_field::<$detail>("detail", detail)?; )?
                            state.end()
                        }
                    )+
                }
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                use $crate::__private::serde::de::{self, Error as _};

                const FIELDS: &[&str] = &["tag", "detail"];

                fn stream<'de, A>(tag: &str, map: &mut A) -> ::core::result::Result<$name, A::Error>
                where
                    A: de::MapAccess<'de>,
                {
                    $(
                        if tag == stringify!($tag) {
                            return $crate::__variant_stream!(map, $tag, $name::$variant $(, $detail)?);
                        }
                    )+
                    ::core::result::Result::Err(A::Error::unknown_variant(tag, <$name as $crate::Variant>::TAGS))
                }

                fn buffered<X>(
                    tag: &str,
                    detail: ::core::option::Option<$crate::__private::serde_json::Value>,
                ) -> ::core::result::Result<$name, X>
                where
                    X: de::Error,
                {
                    $(
                        if tag == stringify!($tag) {
                            return $crate::__variant_buffered!(detail, $tag, $name::$variant $(, $detail)?);
                        }
                    )+
                    ::core::result::Result::Err(X::unknown_variant(tag, <$name as $crate::Variant>::TAGS))
                }

                struct TagVisitor;

                impl<'de> de::Visitor<'de> for TagVisitor {
                    type Value = $name;

                    fn expecting(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                        f.write_str(concat!("a tagged ", stringify!($name)))
                    }

                    fn visit_map<A>(self, mut map: A) -> ::core::result::Result<$name, A::Error>
                    where
                        A: de::MapAccess<'de>,
                    {
                        let mut tag: ::core::option::Option<::std::string::String> = ::core::option::Option::None;
                        let mut decoded: ::core::option::Option<$name> = ::core::option::Option::None;
                        let mut early: ::core::option::Option<$crate::__private::serde_json::Value> =
                            ::core::option::Option::None;

                        while let ::core::option::Option::Some(key) = map.next_key::<::std::string::String>()? {
                            match key.as_str() {
                                "tag" => {
                                    if tag.is_some() {
                                        return ::core::result::Result::Err(A::Error::duplicate_field("tag"));
                                    }
                                    let value = map.next_value::<::std::string::String>()?;
                                    if !<$name as $crate::Variant>::TAGS.contains(&value.as_str()) {
                                        return ::core::result::Result::Err(A::Error::unknown_variant(
                                            &value,
                                            <$name as $crate::Variant>::TAGS,
                                        ));
                                    }
                                    tag = ::core::option::Option::Some(value);
                                }
                                "detail" => {
                                    if decoded.is_some() || early.is_some() {
                                        return ::core::result::Result::Err(A::Error::duplicate_field("detail"));
                                    }
                                    match tag.as_deref() {
                                        ::core::option::Option::Some(known) => {
                                            decoded = ::core::option::Option::Some(stream(known, &mut map)?);
                                        }
                                        ::core::option::Option::None => {
                                            early = ::core::option::Option::Some(map.next_value()?);
                                        }
                                    }
                                }
                                other => return ::core::result::Result::Err(A::Error::unknown_field(other, FIELDS)),
                            }
                        }

                        let tag = tag.ok_or_else(|| A::Error::missing_field("tag"))?;
                        match decoded {
                            ::core::option::Option::Some(error) => ::core::result::Result::Ok(error),
                            ::core::option::Option::None => buffered(&tag, early),
                        }
                    }
                }

                deserializer.deserialize_struct(stringify!($name), FIELDS, TagVisitor)
            }
        }
    };
}

#[cfg(not(feature = "serde"))]
#[doc(hidden)]
#[macro_export]
macro_rules! __variant_serde {
    ($($tokens:tt)*) => {};
}
