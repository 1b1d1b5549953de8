use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    focus::{geometry::MeshObject, sweep::FocusSweep},
    foundation::error::{AcquisitionError, AcquisitionResult},
    output::naming::OutputLayout,
    rig::lights::LightRig,
    schedule::camera::CameraConfig,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum LightSource {
    /// `.lp` light position file; relative paths resolve against the config file.
    LpFile { path: PathBuf },
    /// One light above the origin, for focus-only captures.
    SingleOverhead { height: f64 },
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FocusSettings {
    Manual { min_z: f64, max_z: f64, count: usize },
    Auto { count: usize, target: MeshObject },
    /// One camera sample at height `z`, for light-only captures.
    Fixed { z: f64 },
}

/// A whole acquisition as stored on disk (JSON).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AcquisitionConfig {
    pub lights: LightSource,
    pub focus: FocusSettings,
    pub camera: CameraConfig,
    pub output: OutputLayout,
}

impl AcquisitionConfig {
    /// Read a JSON config and resolve its relative paths against the file's directory.
    #[tracing::instrument]
    pub fn load(path: &Path) -> AcquisitionResult<Self> {
        if !path.is_file() {
            return Err(AcquisitionError::not_found(format!(
                "config file '{}' does not exist",
                path.display()
            )));
        }
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let mut cfg: Self = serde_json::from_reader(BufReader::new(f))?;

        let root = path.parent().unwrap_or_else(|| Path::new("."));
        cfg.resolve_paths(root);
        Ok(cfg)
    }

    pub fn from_json_str(s: &str) -> AcquisitionResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn resolve_paths(&mut self, root: &Path) {
        if let LightSource::LpFile { path } = &mut self.lights
            && path.is_relative()
        {
            *path = root.join(&*path);
        }
        if !self.output.output_path.is_empty() && Path::new(&self.output.output_path).is_relative()
        {
            self.output.output_path = root
                .join(&self.output.output_path)
                .to_string_lossy()
                .into_owned();
        }
    }

    pub fn validate(&self) -> AcquisitionResult<()> {
        match &self.focus {
            FocusSettings::Manual { count, .. } | FocusSettings::Auto { count, .. } => {
                if *count < 1 {
                    return Err(AcquisitionError::invalid(
                        "focus count must be at least 1",
                    ));
                }
            }
            FocusSettings::Fixed { z } => {
                if !z.is_finite() {
                    return Err(AcquisitionError::invalid("focus z must be finite"));
                }
            }
        }
        if let LightSource::SingleOverhead { height } = self.lights
            && !height.is_finite()
        {
            return Err(AcquisitionError::invalid("light height must be finite"));
        }
        self.camera.validate()?;
        self.output.validate()
    }

    pub fn light_rig(&self) -> AcquisitionResult<LightRig> {
        match &self.lights {
            LightSource::LpFile { path } => LightRig::load_lp(path),
            LightSource::SingleOverhead { height } => Ok(LightRig::single_overhead(*height)),
        }
    }

    pub fn focus_sweep(&self) -> AcquisitionResult<FocusSweep> {
        match &self.focus {
            FocusSettings::Manual {
                min_z,
                max_z,
                count,
            } => FocusSweep::manual(*min_z, *max_z, *count),
            FocusSettings::Auto { count, target } => FocusSweep::auto(target, *count),
            FocusSettings::Fixed { z } => Ok(FocusSweep::single(*z)),
        }
    }
}
