// extensions/keyframe.rs
//
// Keyframe oscillator: spins an object at a constant angular velocity while
// easing its z position back and forth through a short keypoint path.
//
// Usage:
//   let mut osc = KeyframeOscillator::new(start_time);
//   osc.activate(position);                        // once, samples keypoints
//   let (rot, pos) = osc.tick(dt, rotation, position);  // every frame

use glam::Vec3;
use serde_json::{json, Value};

use super::easing::{ease, Easing};

/// Angular velocity used when none is configured, in degrees per second.
pub const DEFAULT_ROTATION_SPEED: Vec3 = Vec3::new(0.0, 0.0, 30.0);

/// Height of the middle keypoint above the sampled z.
const KEYPOINT_RISE: f32 = 2.0;

/// The timer starts one second in.
const INITIAL_TIMER: f32 = 1.0;

/// Per-tick rotation and z-axis keyframe interpolation for one object.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeOscillator {
    /// Degrees per second around each axis.
    pub rotation_speed: Vec3,
    keypoints: Vec<f32>,
    keyframe: usize,
    /// Span of the first segment, frozen at activation and reused for every
    /// later segment.
    journey_length: f32,
    speed: f32,
    timer: f32,
    start_time: f32,
    /// Time already consumed by completed segments.
    time_stored: f32,
    reported_inactive: bool,
}

impl KeyframeOscillator {
    /// Create an oscillator whose phase origin is `start_time` seconds.
    pub fn new(start_time: f32) -> Self {
        Self {
            rotation_speed: DEFAULT_ROTATION_SPEED,
            keypoints: Vec::with_capacity(3),
            keyframe: 0,
            journey_length: 0.0,
            speed: 1.0,
            timer: INITIAL_TIMER,
            start_time,
            time_stored: 0.0,
            reported_inactive: false,
        }
    }

    pub fn with_rotation_speed(mut self, rotation_speed: Vec3) -> Self {
        self.rotation_speed = rotation_speed;
        self
    }

    /// Replace the angular velocity.
    pub fn configure(&mut self, rotation_speed: Vec3) {
        self.rotation_speed = rotation_speed;
    }

    /// Sample the owner's position into `[z, z + 2, z]` and measure the first segment.
    /// Only the first call has any effect.
    pub fn activate(&mut self, owner_position: Vec3) {
        if self.is_active() {
            log::warn!("keyframe oscillator activated twice; keeping original keypoints");
            return;
        }

        let z = owner_position.z;
        self.keypoints.extend_from_slice(&[z, z + KEYPOINT_RISE, z]);
        self.journey_length = (self.keypoints[0] - self.keypoints[1]).abs();
    }

    /// Whether `activate` has sampled the keypoints.
    pub fn is_active(&self) -> bool {
        self.keypoints.len() >= 2
    }

    /// Advance one frame. Returns the new Euler rotation and position for the owner.
    ///
    /// Only the z component of the position is driven; x and y pass through.
    pub fn tick(&mut self, dt: f32, owner_rotation: Vec3, owner_position: Vec3) -> (Vec3, Vec3) {
        let rotation = owner_rotation + self.rotation_speed * dt;

        self.timer += dt;

        if !self.is_active() {
            if !self.reported_inactive {
                log::debug!("keyframe oscillator ticked before activation; position untouched");
                self.reported_inactive = true;
            }
            return (rotation, owner_position);
        }

        let dist_covered = (self.timer - self.start_time - self.time_stored) * self.speed;
        // A zero-length journey is already complete.
        let fraction = if self.journey_length == 0.0 {
            1.0
        } else {
            dist_covered / self.journey_length
        };

        // Wrap before the index is used as a pair start.
        let last = self.keypoints.len() - 1;
        if self.keyframe == last {
            self.keyframe = 0;
        }

        let z = ease(
            self.keypoints[self.keyframe],
            self.keypoints[self.keyframe + 1],
            fraction,
            Easing::SlowInOut,
        );
        let position = Vec3::new(owner_position.x, owner_position.y, z);

        if fraction >= 1.0 && self.keyframe != last {
            self.time_stored = self.timer - self.start_time;
            self.keyframe += 1;
        }

        (rotation, position)
    }

    /// Persistence record: `{ "speed": [x, y, z] }`.
    pub fn to_json(&self) -> Value {
        json!({ "speed": [self.rotation_speed.x, self.rotation_speed.y, self.rotation_speed.z] })
    }

    /// Rebuild from a persistence record. A missing or malformed `speed`
    /// falls back to [`DEFAULT_ROTATION_SPEED`].
    pub fn from_json(data: &Value) -> Self {
        let rotation_speed = match data.get("speed") {
            None => DEFAULT_ROTATION_SPEED,
            Some(raw) => match serde_json::from_value::<Vec3>(raw.clone()) {
                Ok(speed) => speed,
                Err(err) => {
                    log::warn!("ignoring malformed rotation speed {}: {}", raw, err);
                    DEFAULT_ROTATION_SPEED
                }
            },
        };
        Self::default().with_rotation_speed(rotation_speed)
    }

    // -- Read-only state --

    pub fn keypoints(&self) -> &[f32] {
        &self.keypoints
    }

    pub fn keyframe(&self) -> usize {
        self.keyframe
    }

    pub fn journey_length(&self) -> f32 {
        self.journey_length
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn start_time(&self) -> f32 {
        self.start_time
    }

    pub fn time_stored(&self) -> f32 {
        self.time_stored
    }
}

impl Default for KeyframeOscillator {
    fn default() -> Self {
        Self::new(0.0)
    }
}
