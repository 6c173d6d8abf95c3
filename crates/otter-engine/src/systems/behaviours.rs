//! Behaviour system: wakes and ticks the components on every game object.

use crate::core::scene::Scene;

/// Activate every object that hasn't been woken yet.
///
/// Call once after a scene is built or loaded. Safe to call again after
/// spawning more objects; already-awake objects are skipped.
pub fn awake_behaviours(scene: &mut Scene) {
    let mut woken = 0;
    for object in scene.iter_mut() {
        if !object.is_awake() {
            object.awake();
            woken += 1;
        }
    }
    if woken > 0 {
        log::debug!("woke {} game objects", woken);
    }
}

/// Tick every component once with this frame's `dt`.
/// Each object's rotation and position are written back after its components run.
pub fn tick_behaviours(scene: &mut Scene, dt: f32) {
    for object in scene.iter_mut() {
        object.update(dt);
    }
}
