use crate::{
    focus::geometry::{GeometrySource, world_z_bounds},
    foundation::error::{AcquisitionError, AcquisitionResult},
};

/// One focus height along the sweep axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FocusSample {
    pub z: f64,
}

/// Ordered focus samples; the order is the camera-sample order of the schedule.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FocusSweep {
    samples: Vec<FocusSample>,
}

impl FocusSweep {
    pub fn from_heights(heights: impl IntoIterator<Item = f64>) -> Self {
        Self {
            samples: heights.into_iter().map(|z| FocusSample { z }).collect(),
        }
    }

    /// A single sample, for captures that only vary the light.
    pub fn single(z: f64) -> Self {
        Self::from_heights([z])
    }

    /// `count` heights evenly spaced over `[min_z, max_z]`, both ends included.
    pub fn manual(min_z: f64, max_z: f64, count: usize) -> AcquisitionResult<Self> {
        if !min_z.is_finite() || !max_z.is_finite() {
            return Err(AcquisitionError::invalid(
                "focus bounds must be finite numbers",
            ));
        }
        Ok(Self::from_heights(linspace(min_z, max_z, count)?))
    }

    /// `count` heights spanning the world-space z extent of `target`.
    #[tracing::instrument(skip(target))]
    pub fn auto(target: &dyn GeometrySource, count: usize) -> AcquisitionResult<Self> {
        let (min_z, max_z) = world_z_bounds(target)?;
        tracing::debug!(min_z, max_z, "derived focus bounds from geometry");
        Self::manual(min_z, max_z, count)
    }

    pub fn samples(&self) -> &[FocusSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn heights(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.z)
    }
}

/// Evenly spaced values over `[start, stop]` with both endpoints included.
///
/// `count == 1` yields `[start]`. The last value is `stop` exactly.
pub fn linspace(start: f64, stop: f64, count: usize) -> AcquisitionResult<Vec<f64>> {
    if count < 1 {
        return Err(AcquisitionError::invalid(
            "focus sample count must be at least 1",
        ));
    }
    if count == 1 {
        return Ok(vec![start]);
    }

    let step = (stop - start) / (count - 1) as f64;
    let mut out: Vec<f64> = (0..count).map(|i| start + step * i as f64).collect();
    out[count - 1] = stop;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::geometry::MeshObject;
    use crate::foundation::core::Pt3;

    #[test]
    fn single_count_returns_min() {
        let sweep = FocusSweep::manual(1.5, 99.0, 1).unwrap();
        assert_eq!(sweep.heights().collect::<Vec<_>>(), vec![1.5]);
    }

    #[test]
    fn five_samples_over_zero_to_four() {
        let sweep = FocusSweep::manual(0.0, 4.0, 5).unwrap();
        assert_eq!(
            sweep.heights().collect::<Vec<_>>(),
            vec![0.0, 1.0, 2.0, 3.0, 4.0]
        );
    }

    #[test]
    fn zero_count_is_invalid() {
        assert!(matches!(
            FocusSweep::manual(0.0, 1.0, 0),
            Err(AcquisitionError::InvalidParameter(_))
        ));
    }

    #[test]
    fn non_finite_bounds_are_invalid() {
        assert!(FocusSweep::manual(f64::NAN, 1.0, 3).is_err());
        assert!(FocusSweep::manual(0.0, f64::INFINITY, 3).is_err());
    }

    #[test]
    fn sweep_is_monotonic_and_hits_stop() {
        let v = linspace(0.1, 0.7, 7).unwrap();
        assert!(v.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(v[0], 0.1);
        assert_eq!(v[6], 0.7);

        let flat = linspace(2.0, 2.0, 4).unwrap();
        assert_eq!(flat, vec![2.0; 4]);
    }

    #[test]
    fn auto_uses_children_bounds() {
        let target = MeshObject::new("root", vec![])
            .with_child(MeshObject::new(
                "a",
                vec![Pt3::new(0.0, 0.0, 1.0), Pt3::new(0.0, 0.0, 3.0)],
            ))
            .with_child(MeshObject::new(
                "b",
                vec![Pt3::new(0.0, 0.0, 2.0), Pt3::new(0.0, 0.0, 5.0)],
            ));
        let sweep = FocusSweep::auto(&target, 5).unwrap();
        assert_eq!(
            sweep.heights().collect::<Vec<_>>(),
            vec![1.0, 2.0, 3.0, 4.0, 5.0]
        );
    }

    #[test]
    fn auto_rejects_empty_geometry() {
        let target = MeshObject::new("empty", vec![]);
        assert!(matches!(
            FocusSweep::auto(&target, 3),
            Err(AcquisitionError::InvalidParameter(_))
        ));
    }
}
