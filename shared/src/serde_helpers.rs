//! Common serde helpers for lenient numeric decoding
//!
//! The backend serializes decimal columns inconsistently: a price may
//! arrive as a JSON number (`19.9`) or as a numeric string (`"19.90"`).
//! These codecs accept both forms and always serialize back as numbers.

use serde::{Deserialize, Deserializer, Serializer};

/// f64 field that tolerates numeric strings on input
pub mod lenient_f64 {
    use super::*;
    use serde::de::{self, Visitor};
    use std::fmt;

    pub fn serialize<S>(value: &f64, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_f64(*value)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LenientVisitor;

        impl<'de> Visitor<'de> for LenientVisitor {
            type Value = f64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or a numeric string")
            }

            fn visit_f64<E>(self, value: f64) -> Result<f64, E>
            where
                E: de::Error,
            {
                Ok(value)
            }

            fn visit_i64<E>(self, value: i64) -> Result<f64, E>
            where
                E: de::Error,
            {
                Ok(value as f64)
            }

            fn visit_u64<E>(self, value: u64) -> Result<f64, E>
            where
                E: de::Error,
            {
                Ok(value as f64)
            }

            fn visit_str<E>(self, value: &str) -> Result<f64, E>
            where
                E: de::Error,
            {
                value
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| de::Error::custom(format!("invalid numeric string: {value:?}")))
            }
        }

        d.deserialize_any(LenientVisitor)
    }
}

/// i64 field that tolerates numeric strings and whole-number floats
pub mod lenient_i64 {
    use super::*;
    use serde::de::{self, Visitor};
    use std::fmt;

    pub fn serialize<S>(value: &i64, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_i64(*value)
    }

    pub fn deserialize<'de, D>(d: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct LenientVisitor;

        impl<'de> Visitor<'de> for LenientVisitor {
            type Value = i64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an integer or a numeric string")
            }

            fn visit_i64<E>(self, value: i64) -> Result<i64, E>
            where
                E: de::Error,
            {
                Ok(value)
            }

            fn visit_u64<E>(self, value: u64) -> Result<i64, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map_err(|_| de::Error::custom(format!("integer out of range: {value}")))
            }

            fn visit_f64<E>(self, value: f64) -> Result<i64, E>
            where
                E: de::Error,
            {
                if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
                    Ok(value as i64)
                } else {
                    Err(de::Error::custom(format!("not a whole number: {value}")))
                }
            }

            fn visit_str<E>(self, value: &str) -> Result<i64, E>
            where
                E: de::Error,
            {
                value
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| de::Error::custom(format!("invalid integer string: {value:?}")))
            }
        }

        d.deserialize_any(LenientVisitor)
    }
}

/// Deserialize a possibly-null list as an empty Vec
pub fn null_as_empty_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}
