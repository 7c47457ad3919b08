//! Stage map authoring data in Tiled-style JSON.
//!
//! Only object groups are read. Object positions are stored in world space (y up), while
//! polygon and polyline points keep Tiled's y-down offsets relative to the object. Entries
//! that do not deserialize are skipped instead of failing the whole map.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct RawMap {
    #[serde(default)]
    layers: Vec<RawLayer>,
}

#[derive(Debug, Deserialize)]
struct RawLayer {
    #[serde(default)]
    name: String,
    #[serde(default)]
    objects: Vec<Value>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct MapPoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapProperty {
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

/// One authored object. Every field is optional; typed accessors return `None` for
/// whatever is missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MapObject {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub polygon: Option<Vec<MapPoint>>,
    pub polyline: Option<Vec<MapPoint>>,
    #[serde(default)]
    pub properties: Vec<MapProperty>,
}

impl MapObject {
    pub fn position(&self) -> Option<Vec2> {
        Some(Vec2::new(self.x?, self.y?))
    }

    /// Rectangle anchored at the object's position, growing right and up.
    pub fn rect(&self) -> Option<Rect> {
        let origin = self.position()?;
        let (width, height) = (self.width?, self.height?);
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(Rect::from_corners(origin, origin + Vec2::new(width, height)))
    }

    /// Polyline converted to world-space points.
    pub fn polyline_world(&self) -> Option<Vec<Vec2>> {
        self.points_world(self.polyline.as_deref()?)
    }

    /// Polygon converted to world-space points.
    pub fn polygon_world(&self) -> Option<Vec<Vec2>> {
        self.points_world(self.polygon.as_deref()?)
    }

    fn points_world(&self, points: &[MapPoint]) -> Option<Vec<Vec2>> {
        let origin = self.position()?;
        if points.len() < 2 {
            return None;
        }
        Some(
            points
                .iter()
                .map(|p| Vec2::new(origin.x + p.x, origin.y - p.y))
                .collect(),
        )
    }

    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }

    /// String property; empty strings count as absent.
    pub fn property_str(&self, name: &str) -> Option<&str> {
        self.property(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn property_bool(&self, name: &str) -> bool {
        self.property(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// The `tag` property, falling back to the object's type.
    pub fn tag(&self) -> Option<&str> {
        self.property_str("tag")
            .or_else(|| Some(self.kind.as_str()).filter(|s| !s.is_empty()))
    }
}

/// Object groups of one stage, keyed by group name, in authoring order.
#[derive(Resource, Debug, Clone, Default)]
pub struct StageMap {
    groups: HashMap<String, Vec<MapObject>>,
}

impl StageMap {
    pub fn from_json_str(contents: &str) -> Result<Self, serde_json::Error> {
        let raw: RawMap = serde_json::from_str(contents)?;
        let mut groups: HashMap<String, Vec<MapObject>> = HashMap::new();

        for layer in raw.layers {
            let objects = groups.entry(layer.name.clone()).or_default();
            for (index, value) in layer.objects.into_iter().enumerate() {
                match serde_json::from_value::<MapObject>(value) {
                    Ok(object) => objects.push(object),
                    Err(e) => debug!(
                        "Skipping malformed object {} in group '{}': {}",
                        index, layer.name, e
                    ),
                }
            }
        }

        Ok(Self { groups })
    }

    /// Objects in `name`, or an empty slice when the group is absent.
    pub fn group(&self, name: &str) -> &[MapObject] {
        self.groups.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn object(&self, group: &str, name: &str) -> Option<&MapObject> {
        self.group(group).iter().find(|o| o.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    #[cfg(test)]
    pub(crate) fn from_groups(groups: Vec<(&str, Vec<MapObject>)>) -> Self {
        Self {
            groups: groups
                .into_iter()
                .map(|(name, objects)| (name.to_string(), objects))
                .collect(),
        }
    }
}
