//! Front-matter YAML to string lists.
//!
//! Values keep their source text: `1.10`, `True`, `0x10`, and `~` come back
//! exactly as written. Resolving scalars to YAML numbers or booleans first
//! would reformat them, and integers wider than 64 bits would be rejected.
//!
//! Conversion takes two passes over the same text. The first records the
//! shape of every value (null, scalar, sequence, or something nested); the
//! second reads scalars through string deserialization, which yields the
//! text as written.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{
    self, DeserializeSeed, Deserializer, EnumAccess, IgnoredAny, MapAccess, SeqAccess,
    VariantAccess, Visitor,
};
use serde::Deserialize;
use serde_yaml::Value;

use crate::document::FrontMatter;

/// Parse a front-matter block.
///
/// Returns `None` unless the block is empty or a YAML mapping.
pub(crate) fn front_matter_from_yaml(yaml: &str) -> Option<FrontMatter> {
    if yaml.trim().is_empty() {
        return Some(FrontMatter::new());
    }

    let shapes = match serde_yaml::from_str::<Option<BTreeMap<String, Shape>>>(yaml) {
        Ok(Some(shapes)) => shapes,
        Ok(None) => return Some(FrontMatter::new()),
        Err(e) => {
            tracing::debug!(error = %e, "Rejected front matter YAML");
            return None;
        }
    };

    FieldsSeed(&shapes)
        .deserialize(serde_yaml::Deserializer::from_str(yaml))
        .inspect_err(|e| tracing::debug!(error = %e, "Failed to read front matter values"))
        .ok()
}

/// Structure of a YAML value, without its content.
#[derive(Debug, PartialEq, Eq)]
enum Shape {
    /// `~`, `null`, or nothing at all.
    Null,
    Scalar,
    Sequence(Vec<Shape>),
    /// Mappings and tagged values.
    Nested,
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ShapeVisitor)
    }
}

struct ShapeVisitor;

impl<'de> Visitor<'de> for ShapeVisitor {
    type Value = Shape;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Shape, E> {
        Ok(Shape::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Shape, E> {
        Ok(Shape::Null)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Shape, E> {
        Ok(Shape::Scalar)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Shape, E> {
        Ok(Shape::Scalar)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Shape, E> {
        Ok(Shape::Scalar)
    }

    fn visit_i128<E: de::Error>(self, _: i128) -> Result<Shape, E> {
        Ok(Shape::Scalar)
    }

    fn visit_u128<E: de::Error>(self, _: u128) -> Result<Shape, E> {
        Ok(Shape::Scalar)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Shape, E> {
        Ok(Shape::Scalar)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<Shape, E> {
        Ok(Shape::Scalar)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Shape, A::Error> {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element::<Shape>()? {
            items.push(item);
        }
        Ok(Shape::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Shape, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Shape::Nested)
    }

    fn visit_enum<A: EnumAccess<'de>>(self, data: A) -> Result<Shape, A::Error> {
        let (IgnoredAny, variant) = data.variant::<IgnoredAny>()?;
        variant.newtype_variant::<IgnoredAny>()?;
        Ok(Shape::Nested)
    }
}

/// Reads the top-level mapping, guided by the recorded shapes.
struct FieldsSeed<'a>(&'a BTreeMap<String, Shape>);

impl<'de> DeserializeSeed<'de> for FieldsSeed<'_> {
    type Value = FrontMatter;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<FrontMatter, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for FieldsSeed<'_> {
    type Value = FrontMatter;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a front-matter mapping")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<FrontMatter, A::Error> {
        let mut front_matter = FrontMatter::new();
        while let Some(key) = map.next_key::<String>()? {
            let Some(shape) = self.0.get(&key) else {
                map.next_value::<IgnoredAny>()?;
                continue;
            };
            let values = map.next_value_seed(ValuesSeed(shape))?;
            front_matter.insert(key, values);
        }
        Ok(front_matter)
    }
}

/// Reads one field as its list of values.
struct ValuesSeed<'a>(&'a Shape);

impl<'de> DeserializeSeed<'de> for ValuesSeed<'_> {
    type Value = Vec<String>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Vec<String>, D::Error> {
        match self.0 {
            Shape::Null => {
                let text = String::deserialize(deserializer)?;
                Ok(if text.is_empty() { Vec::new() } else { vec![text] })
            }
            Shape::Sequence(items) => deserializer.deserialize_seq(ItemsVisitor(items)),
            shape => Ok(vec![TextSeed(shape).deserialize(deserializer)?]),
        }
    }
}

struct ItemsVisitor<'a>(&'a [Shape]);

impl<'de> Visitor<'de> for ItemsVisitor<'_> {
    type Value = Vec<String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a YAML sequence")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Vec<String>, A::Error> {
        let mut values = Vec::with_capacity(self.0.len());
        for shape in self.0 {
            match seq.next_element_seed(TextSeed(shape))? {
                Some(text) => values.push(text),
                None => break,
            }
        }
        Ok(values)
    }
}

/// Reads one value as a single string.
///
/// Scalars keep their source text; nested structures are serialized back to
/// YAML.
struct TextSeed<'a>(&'a Shape);

impl<'de> DeserializeSeed<'de> for TextSeed<'_> {
    type Value = String;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<String, D::Error> {
        match self.0 {
            Shape::Null | Shape::Scalar => String::deserialize(deserializer),
            Shape::Sequence(_) | Shape::Nested => {
                let value = Value::deserialize(deserializer)?;
                Ok(serde_yaml::to_string(&value)
                    .map(|yaml| yaml.trim_end().to_owned())
                    .unwrap_or_default())
            }
        }
    }
}
