//! Input intents written by the host
//!
//! This is the one place the host mutates simulation inputs. The fields are
//! plain scalars set last-write-wins; the engine copies the whole struct at
//! the start of each tick and never writes back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Digital direction and fire keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectionalKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Keyboard fire key
    pub fire: bool,
}

impl DirectionalKeys {
    /// Raw (un-normalized) direction from the held keys
    pub fn axis(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        if self.up {
            v.y -= 1.0;
        }
        if self.down {
            v.y += 1.0;
        }
        v
    }
}

/// Virtual stick / touch state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Joystick {
    pub active: bool,
    /// Analog deflection, each axis in [-1, 1]
    pub x: f32,
    pub y: f32,
    /// Touch point in field coordinates (drag mode)
    pub target_x: f32,
    pub target_y: f32,
}

/// Everything the player updater reads from the outside world
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputIntent {
    pub keys: DirectionalKeys,
    /// On-screen fire button
    pub shooting: bool,
    pub joystick: Joystick,
}

impl InputIntent {
    /// Either fire control held
    pub fn wants_fire(&self) -> bool {
        self.shooting || self.keys.fire
    }
}
