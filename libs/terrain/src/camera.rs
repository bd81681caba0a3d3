use bevy::prelude::*;

/// Multiplicative zoom change per tick a zoom key is held.
pub const ZOOM_STEP: f32 = 1.1;
/// Rotation change in radians per tick a rotation key is held.
pub const ROTATE_STEP: f32 = 0.1;

/// Orbit state the wireframe projector reads every frame.
#[derive(Resource, Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    pub zoom: f32,
    /// Pitch, applied second.
    pub angle_x: f32,
    /// Yaw, applied first.
    pub angle_y: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            angle_x: 0.0,
            angle_y: 0.0,
        }
    }
}

/// Which camera keys are held during one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CameraKeys {
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
}

impl CameraKeys {
    pub fn any(&self) -> bool {
        self.zoom_in
            || self.zoom_out
            || self.yaw_left
            || self.yaw_right
            || self.pitch_up
            || self.pitch_down
    }
}

impl CameraState {
    /// Applies one tick of held keys. Nothing is clamped or wrapped.
    pub fn apply(&mut self, keys: CameraKeys) {
        if keys.zoom_in {
            self.zoom *= ZOOM_STEP;
        }
        if keys.zoom_out {
            self.zoom /= ZOOM_STEP;
        }

        if keys.yaw_left {
            self.angle_y -= ROTATE_STEP;
        }
        if keys.yaw_right {
            self.angle_y += ROTATE_STEP;
        }
        if keys.pitch_up {
            self.angle_x -= ROTATE_STEP;
        }
        if keys.pitch_down {
            self.angle_x += ROTATE_STEP;
        }
    }
}
