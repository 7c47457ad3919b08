//! Areas domain: the per-frame region check.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::areas::AreaTuning;
use crate::areas::boss::BossTracker;
use crate::areas::camera::CameraRig;
use crate::areas::spawn::spawn_region;
use crate::areas::streaming::{AreaScoped, AreaStreamer, RegionManifest};
use crate::content::{ContentRegistry, GameplayDefaults, StageMap};
use crate::core::{AudioRequest, GameEvent, PublishExt};
use crate::player::Party;

/// Swap region content once the active player leaves the current region.
pub(crate) fn stream_areas(
    mut commands: Commands,
    stage: Res<StageMap>,
    registry: Res<ContentRegistry>,
    defaults: Res<GameplayDefaults>,
    tuning: Res<AreaTuning>,
    party: Res<Party>,
    players: Query<&Transform>,
    scoped: Query<Entity, With<AreaScoped>>,
    mut streamer: ResMut<AreaStreamer>,
    mut rig: ResMut<CameraRig>,
    mut bosses: ResMut<BossTracker>,
    mut audio: MessageWriter<AudioRequest>,
) {
    let Some(position) = party
        .active()
        .and_then(|player| players.get(player).ok())
        .map(|t| t.translation.truncate())
    else {
        return;
    };
    let Some(area) = streamer.update(&stage, position) else {
        return;
    };

    let mut removed = 0;
    for entity in &scoped {
        commands.entity(entity).try_despawn();
        removed += 1;
    }
    debug!("Tore down {} region entities", removed);

    let manifest = RegionManifest::build(&stage, &area);
    let boss_count = spawn_region(
        &mut commands,
        &manifest,
        &registry,
        &defaults.launcher_style,
        &tuning,
    );
    bosses.reset(boss_count);

    match &area.bgm {
        Some(track) => audio.write(AudioRequest::PlayMusic {
            track: track.clone(),
            looped: true,
        }),
        None => audio.write(AudioRequest::ClearMusic),
    };

    rig.enter_region(area.rect);
    info!("Entered region '{}' ({})", area.name, area.index);
    commands.publish(GameEvent::AreaChanged { area: area.index });
}
