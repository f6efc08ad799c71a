//! Serde codec for [`Outcome`].
//!
//! A success is written as `{ "ok": true, "value": ... }` and a failure as
//! `{ "ok": false, "error": ... }`. With a `#[wire]` domain as the error type the
//! failure nests as `{ "ok": false, "error": { "tag": ..., "detail": ... } }`.
//!
//! Decoding accepts the fields in any order but rejects duplicates, unknown fields,
//! and payloads that disagree with the `ok` flag.

use std::{fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, Visitor},
    ser::SerializeStruct,
};

use crate::outcome::Outcome;

const FIELDS: &[&str] = &["ok", "value", "error"];

impl<V, E> Serialize for Outcome<V, E>
where
    V: Serialize,
    E: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Outcome", 2)?;
        match self {
            Outcome::Success(value) => {
                state.serialize_field("ok", &true)?;
                state.serialize_field("value", value)?;
            }
            Outcome::Failure(error) => {
                state.serialize_field("ok", &false)?;
                state.serialize_field("error", error)?;
            }
        }
        state.end()
    }
}

impl<'de, V, E> Deserialize<'de> for Outcome<V, E>
where
    V: Deserialize<'de>,
    E: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct("Outcome", FIELDS, OutcomeVisitor(PhantomData))
    }
}

enum Field {
    Ok,
    Value,
    Error,
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FieldVisitor;

        impl Visitor<'_> for FieldVisitor {
            type Value = Field;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("`ok`, `value` or `error`")
            }

            fn visit_str<X>(self, key: &str) -> Result<Field, X>
            where
                X: de::Error,
            {
                match key {
                    "ok" => Ok(Field::Ok),
                    "value" => Ok(Field::Value),
                    "error" => Ok(Field::Error),
                    other => Err(X::unknown_field(other, FIELDS)),
                }
            }
        }

        deserializer.deserialize_identifier(FieldVisitor)
    }
}

struct OutcomeVisitor<V, E>(PhantomData<fn() -> (V, E)>);

impl<'de, V, E> Visitor<'de> for OutcomeVisitor<V, E>
where
    V: Deserialize<'de>,
    E: Deserialize<'de>,
{
    type Value = Outcome<V, E>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an outcome with an `ok` flag")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut ok: Option<bool> = None;
        let mut value: Option<V> = None;
        let mut error: Option<E> = None;

        while let Some(key) = map.next_key::<Field>()? {
            match key {
                Field::Ok => {
                    if ok.is_some() {
                        return Err(de::Error::duplicate_field("ok"));
                    }
                    ok = Some(map.next_value()?);
                }
                Field::Value => {
                    if value.is_some() {
                        return Err(de::Error::duplicate_field("value"));
                    }
                    value = Some(map.next_value()?);
                }
                Field::Error => {
                    if error.is_some() {
                        return Err(de::Error::duplicate_field("error"));
                    }
                    error = Some(map.next_value()?);
                }
            }
        }

        match (ok, value, error) {
            (None, _, _) => Err(de::Error::missing_field("ok")),
            (Some(true), Some(value), None) => Ok(Outcome::Success(value)),
            (Some(true), None, None) => Err(de::Error::missing_field("value")),
            (Some(true), _, Some(_)) => Err(de::Error::custom("a success must not carry `error`")),
            (Some(false), None, Some(error)) => Ok(Outcome::Failure(error)),
            (Some(false), None, None) => Err(de::Error::missing_field("error")),
            (Some(false), Some(_), _) => Err(de::Error::custom("a failure must not carry `value`")),
        }
    }
}
