//! Areas domain: region selection and the per-region spawn manifest.
//!
//! Regions are re-read from the stage map whenever a new one has to be chosen. The first
//! region in authoring order that contains the point wins; bounds are inclusive on every
//! edge, so a point on a shared edge belongs to the earlier region.

use bevy::prelude::*;

use crate::content::{MapObject, StageMap};

/// Removed when the current region changes.
#[derive(Component, Debug)]
pub struct AreaScoped;

/// One rectangular region of the stage.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaDef {
    /// Position in the `area` group, counted over usable entries only
    pub index: usize,
    pub name: String,
    pub rect: Rect,
    pub background: Option<String>,
    pub bgm: Option<String>,
}

impl AreaDef {
    pub fn contains(&self, point: Vec2) -> bool {
        self.rect.contains(point)
    }
}

/// Usable regions of the stage in authoring order. Entries without a positive size are
/// skipped.
pub fn areas_from_map(stage: &StageMap) -> Vec<AreaDef> {
    stage
        .group("area")
        .iter()
        .filter_map(|object| {
            let rect = object.rect()?;
            Some((object, rect))
        })
        .enumerate()
        .map(|(index, (object, rect))| AreaDef {
            index,
            name: object.name.clone(),
            rect,
            background: object.property_str("background").map(str::to_string),
            bgm: object.property_str("bgm").map(str::to_string),
        })
        .collect()
}

/// First region containing `point`.
pub fn select_area(areas: &[AreaDef], point: Vec2) -> Option<&AreaDef> {
    areas.iter().find(|area| area.contains(point))
}

#[derive(Debug, Clone, PartialEq)]
pub enum SpawnKind {
    Launcher,
    Elevator { waypoints: Vec<Vec2> },
    Enemy { tag: String, boss: bool },
    EventPoint { event_id: String },
    Decoration { size: Vec2 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnDescriptor {
    pub name: String,
    pub position: Vec2,
    pub kind: SpawnKind,
}

/// Everything a region instantiates when it becomes current.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionManifest {
    pub area: AreaDef,
    pub spawns: Vec<SpawnDescriptor>,
}

impl RegionManifest {
    /// Collect every descriptor whose authoring point lies in `area`.
    pub fn build(stage: &StageMap, area: &AreaDef) -> Self {
        let mut spawns = Vec::new();

        collect(stage, area, "launcher", &mut spawns, |_| Some(SpawnKind::Launcher));
        collect(stage, area, "elevator", &mut spawns, |object| {
            Some(SpawnKind::Elevator {
                waypoints: object.polyline_world().unwrap_or_default(),
            })
        });
        collect(stage, area, "enemy", &mut spawns, |object| {
            Some(SpawnKind::Enemy {
                tag: object.tag()?.to_string(),
                boss: object.property_bool("boss"),
            })
        });
        collect(stage, area, "event", &mut spawns, |object| {
            Some(SpawnKind::EventPoint {
                event_id: object.tag()?.to_string(),
            })
        });
        collect(stage, area, "decoration", &mut spawns, |object| {
            Some(SpawnKind::Decoration {
                size: Vec2::new(object.width.unwrap_or(16.0), object.height.unwrap_or(16.0)),
            })
        });

        Self {
            area: area.clone(),
            spawns,
        }
    }

    pub fn count(&self, matches: impl Fn(&SpawnKind) -> bool) -> usize {
        self.spawns.iter().filter(|s| matches(&s.kind)).count()
    }
}

fn collect(
    stage: &StageMap,
    area: &AreaDef,
    group: &str,
    spawns: &mut Vec<SpawnDescriptor>,
    to_kind: impl Fn(&MapObject) -> Option<SpawnKind>,
) {
    for object in stage.group(group) {
        let Some(position) = object.position() else {
            continue;
        };
        if !area.contains(position) {
            continue;
        }
        match to_kind(object) {
            Some(kind) => spawns.push(SpawnDescriptor {
                name: object.name.clone(),
                position,
                kind,
            }),
            None => debug!("Skipping '{}' object '{}'", group, object.name),
        }
    }
}

/// Tracks the current region of the player.
#[derive(Resource, Debug, Default)]
pub struct AreaStreamer {
    current: Option<AreaDef>,
}

impl AreaStreamer {
    pub fn current(&self) -> Option<&AreaDef> {
        self.current.as_ref()
    }

    /// Returns the newly entered region when `player` has left the current one. With no
    /// containing region the current one is kept.
    pub fn update(&mut self, stage: &StageMap, player: Vec2) -> Option<AreaDef> {
        if self.current.as_ref().is_some_and(|area| area.contains(player)) {
            return None;
        }
        let areas = areas_from_map(stage);
        let next = select_area(&areas, player)?.clone();
        self.current = Some(next.clone());
        Some(next)
    }
}
