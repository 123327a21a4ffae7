use std::cmp::Ordering;
use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to decode catalog body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },
}

/// A number that may arrive either as a JSON number or as numeric text.
/// Anything else is kept as `Other` and never ranks.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl Numeric {
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => n.as_f64()?,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
            Self::Other(_) => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => match n.as_f64() {
                // whole floats print like integers: 3733.0 -> 3733
                Some(v) if n.is_f64() && v.fract() == 0.0 && v.abs() < 1e15 => {
                    write!(f, "{v:.0}")
                }
                _ => write!(f, "{n}"),
            },
            Self::Text(s) => f.write_str(s),
            Self::Other(serde_json::Value::Null) => Ok(()),
            Self::Other(v) => write!(f, "{v}"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Numeric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<Numeric>,
    /// Fields the pager does not read (`subcategory` and friends).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Strings pass through, `null` becomes empty, anything else is shown as JSON.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

impl Product {
    pub fn price_label(&self) -> String {
        self.price.as_ref().map(Numeric::to_string).unwrap_or_default()
    }
}

/// Anything that can be ordered by popularity.
pub trait Ranked {
    /// `None` when the record carries no usable popularity.
    fn popularity(&self) -> Option<f64>;
}

impl Ranked for Product {
    fn popularity(&self) -> Option<f64> {
        self.popularity.as_ref().and_then(Numeric::as_f64)
    }
}

/// Sorts by descending popularity. Unranked records go last and ties keep
/// their arrival order.
pub fn sort_by_popularity<T: Ranked>(records: &mut [T]) {
    records.sort_by(|a, b| match (a.popularity(), b.popularity()) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Decoded catalog body. `products` is keyed by id on the wire; only the
/// values are kept, in document order.
#[derive(Clone, Debug, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub count: Option<Numeric>,
    #[serde(deserialize_with = "product_values")]
    pub products: Vec<Product>,
}

impl Catalog {
    pub fn from_json(body: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(body).map_err(|source| CatalogError::Decode { source })
    }
}

fn product_values<'de, D>(deserializer: D) -> Result<Vec<Product>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ProductValues;

    impl<'de> Visitor<'de> for ProductValues {
        type Value = Vec<Product>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object of products keyed by id")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut out = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((_, product)) = map.next_entry::<IgnoredAny, Option<Product>>()? {
                out.extend(product);
            }
            Ok(out)
        }
    }

    deserializer.deserialize_map(ProductValues)
}
