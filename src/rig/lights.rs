use std::path::Path;

use anyhow::Context as _;

use crate::foundation::{
    core::{Quat, Vec3},
    error::{AcquisitionError, AcquisitionResult},
};

/// One light of an RTI rig, in file order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LightPosition {
    pub index: usize,
    pub position: Vec3,
}

impl LightPosition {
    pub fn new(index: usize, position: Vec3) -> Self {
        Self { index, position }
    }

    /// Unit vector pointing from the light toward the origin.
    ///
    /// `None` for a light sitting exactly on the origin.
    pub fn direction_to_origin(&self) -> Option<Vec3> {
        (-self.position).try_normalize(f64::EPSILON)
    }

    /// Rotation whose local +Z axis points along the position vector with +Y as the up hint.
    ///
    /// A directional light using this rotation shines along its local -Z, i.e. at the origin.
    pub fn track_rotation(&self) -> Option<Quat> {
        let dir = self.position.try_normalize(f64::EPSILON)?;
        let up = if dir.cross(&Vec3::y()).norm() < 1e-9 {
            Vec3::x()
        } else {
            Vec3::y()
        };
        Some(Quat::face_towards(&dir, &up))
    }
}

/// Ordered light positions for one capture session.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LightRig {
    lights: Vec<LightPosition>,
}

impl LightRig {
    /// Build a rig from positions, assigning indices in order.
    pub fn from_positions(positions: impl IntoIterator<Item = Vec3>) -> Self {
        let lights = positions
            .into_iter()
            .enumerate()
            .map(|(index, position)| LightPosition { index, position })
            .collect();
        Self { lights }
    }

    /// Single light straight above the origin, for focus-only captures.
    pub fn single_overhead(height: f64) -> Self {
        Self::from_positions([Vec3::new(0.0, 0.0, height)])
    }

    /// Parse `.lp` text: a count line, then `count` lines of `<id> <x> <y> <z> ...`.
    pub fn parse_lp(text: &str) -> AcquisitionResult<Self> {
        let mut lines = text.lines();

        let count_line = lines
            .next()
            .ok_or_else(|| AcquisitionError::malformed("light file is empty"))?;
        let count_token = count_line
            .split_whitespace()
            .next()
            .ok_or_else(|| AcquisitionError::malformed("line 1: missing light count"))?;
        let count: usize = count_token.parse().map_err(|_| {
            AcquisitionError::malformed(format!(
                "line 1: light count '{count_token}' is not a non-negative integer"
            ))
        })?;

        let mut lights = Vec::new();
        for index in 0..count {
            let line_no = index + 2;
            let line = lines.next().ok_or_else(|| {
                AcquisitionError::malformed(format!(
                    "declared {count} lights but found only {index}"
                ))
            })?;

            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() < 4 {
                return Err(AcquisitionError::malformed(format!(
                    "line {line_no}: expected at least 4 fields, found {}",
                    cols.len()
                )));
            }

            let coord = |col: usize| -> AcquisitionResult<f64> {
                cols[col].parse::<f64>().map_err(|_| {
                    AcquisitionError::malformed(format!(
                        "line {line_no}: field {col} ('{}') is not a number",
                        cols[col]
                    ))
                })
            };

            lights.push(LightPosition {
                index,
                position: Vec3::new(coord(1)?, coord(2)?, coord(3)?),
            });
        }

        Ok(Self { lights })
    }

    /// Read and parse a `.lp` file.
    ///
    /// A missing or unreadable path fails with `ResourceNotFound` before any parsing happens.
    #[tracing::instrument]
    pub fn load_lp(path: &Path) -> AcquisitionResult<Self> {
        if !path.is_file() {
            return Err(AcquisitionError::not_found(format!(
                "light position file '{}' does not exist",
                path.display()
            )));
        }

        let bytes = std::fs::read(path).map_err(|e| {
            AcquisitionError::not_found(format!(
                "light position file '{}' is not readable: {e}",
                path.display()
            ))
        })?;
        let text = String::from_utf8(bytes)
            .with_context(|| format!("decode '{}' as UTF-8", path.display()))
            .map_err(|e| AcquisitionError::malformed(format!("{e:#}")))?;

        let rig = Self::parse_lp(&text)?;
        tracing::debug!(lights = rig.len(), "parsed light rig");
        Ok(rig)
    }

    pub fn lights(&self) -> &[LightPosition] {
        &self.lights
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LightPosition> {
        self.lights.iter()
    }
}

impl<'a> IntoIterator for &'a LightRig {
    type Item = &'a LightPosition;
    type IntoIter = std::slice::Iter<'a, LightPosition>;

    fn into_iter(self) -> Self::IntoIter {
        self.lights.iter()
    }
}
