//! Movement domain: debug-only physics visualization.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Collider outlines and contact normals while the `dev-tools` feature is on.
pub(crate) fn add_dev_tools(app: &mut App) {
    app.add_plugins(PhysicsDebugPlugin::default());
    info!("Physics debug rendering enabled");
}
