use nalgebra::{Matrix4, Point3, UnitQuaternion, Vector3};

pub type Real = f64;

pub type Vec3 = Vector3<Real>;
pub type Pt3 = Point3<Real>;
pub type Mat4 = Matrix4<Real>;
pub type Quat = UnitQuaternion<Real>;

/// 1-based frame number in acquisition timeline space.
///
/// `FrameIndex(0)` never names a scheduled shot, but it does appear as the "hide before"
/// keyframe of the very first frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    pub fn prev(self) -> Self {
        Self(self.0.saturating_sub(1))
    }

    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of decimal digits in `total_frames` (at least 1).
///
/// Every frame label and every `#` run in the render template is padded to this width.
pub fn frame_pad_width(total_frames: u64) -> usize {
    total_frames.to_string().len()
}

/// `-` followed by `frame` zero-padded to `width`, e.g. `-07`.
pub fn frame_label(frame: FrameIndex, width: usize) -> String {
    format!("-{:0width$}", frame.0, width = width)
}

/// Shortest round-trip float text in plain positional notation, never in exponent form.
///
/// Finite values always carry a decimal point (`2.0`, `-0.1`, `0.00001`).
pub fn fmt_real(v: Real) -> String {
    let mut s = format!("{v}");
    if v.is_finite() && !s.contains('.') {
        s.push_str(".0");
    }
    s
}
