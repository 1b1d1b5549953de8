use crate::foundation::{
    core::Vec3,
    error::{AcquisitionError, AcquisitionResult},
};

/// How the camera follows the focus sweep.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraMode {
    /// The camera body moves so the focal plane lands on each sample; focus distance is fixed.
    Moving { static_focus_distance: f64 },
    /// The camera stays at `(0, 0, base_height)` and refocuses on each sample.
    Static { base_height: f64 },
}

/// Camera body and lens placement of one focus sample.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraState {
    pub location: Vec3,
    pub focus_distance: f64,
}

impl CameraMode {
    /// Camera state that puts the focal plane at height `z`.
    pub fn state_for(self, z: f64) -> CameraState {
        match self {
            Self::Moving {
                static_focus_distance,
            } => CameraState {
                location: Vec3::new(0.0, 0.0, static_focus_distance + z),
                focus_distance: static_focus_distance,
            },
            Self::Static { base_height } => CameraState {
                location: Vec3::new(0.0, 0.0, base_height),
                focus_distance: base_height - z,
            },
        }
    }

    pub fn is_moving(self) -> bool {
        matches!(self, Self::Moving { .. })
    }
}

pub const DEFAULT_LENS_MM: f64 = 50.0;
pub const DEFAULT_CAMERA_HEIGHT: f64 = 2.0;

fn default_lens_mm() -> f64 {
    DEFAULT_LENS_MM
}

fn default_true() -> bool {
    true
}

/// Session-wide camera settings.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CameraConfig {
    pub mode: CameraMode,
    #[serde(default)]
    pub orthographic: bool,
    pub aperture_fstop: f64,
    #[serde(default = "default_lens_mm")]
    pub lens_mm: f64,
    #[serde(default = "default_true")]
    pub depth_of_field: bool,
}

impl CameraConfig {
    pub fn moving(static_focus_distance: f64, aperture_fstop: f64) -> Self {
        Self {
            mode: CameraMode::Moving {
                static_focus_distance,
            },
            orthographic: false,
            aperture_fstop,
            lens_mm: DEFAULT_LENS_MM,
            depth_of_field: true,
        }
    }

    pub fn fixed(base_height: f64, aperture_fstop: f64) -> Self {
        Self {
            mode: CameraMode::Static { base_height },
            orthographic: false,
            aperture_fstop,
            lens_mm: DEFAULT_LENS_MM,
            depth_of_field: true,
        }
    }

    /// Pinhole camera at the default height with depth of field off, for light-only captures.
    pub fn rti_only() -> Self {
        Self {
            depth_of_field: false,
            ..Self::fixed(DEFAULT_CAMERA_HEIGHT, 0.0)
        }
    }

    pub fn validate(&self) -> AcquisitionResult<()> {
        let placement = match self.mode {
            CameraMode::Moving {
                static_focus_distance,
            } => static_focus_distance,
            CameraMode::Static { base_height } => base_height,
        };
        if !placement.is_finite() {
            return Err(AcquisitionError::invalid(
                "camera placement must be a finite number",
            ));
        }
        if !self.aperture_fstop.is_finite() || self.aperture_fstop < 0.0 {
            return Err(AcquisitionError::invalid(
                "camera aperture_fstop must be finite and >= 0",
            ));
        }
        if !self.lens_mm.is_finite() || self.lens_mm <= 0.0 {
            return Err(AcquisitionError::invalid("camera lens_mm must be > 0"));
        }
        Ok(())
    }
}
