// extensions/mod.rs
//
// Pure animation helpers. Nothing here touches GameObject or Scene;
// components wrap these and feed them the owner's transform.

pub mod easing;
pub mod keyframe;

pub use easing::{ease, lerp, Easing};
pub use keyframe::{KeyframeOscillator, DEFAULT_ROTATION_SPEED};
