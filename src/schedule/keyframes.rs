use crate::{
    foundation::{
        core::{FrameIndex, Vec3},
        error::AcquisitionResult,
    },
    schedule::builder::ScheduleTimeline,
};

/// Scene object a keyframe or marker applies to.
///
/// The host owns object names; lights are addressed by their rig index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "object", content = "index", rename_all = "snake_case")]
pub enum KeyTarget {
    Light(usize),
    Camera,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    HideRender,
    HideViewport,
    Location,
    FocusDistance,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    Flag(bool),
    Scalar(f64),
    Vector(Vec3),
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe {
    pub target: KeyTarget,
    pub channel: Channel,
    pub frame: FrameIndex,
    pub value: KeyValue,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Marker {
    pub frame: FrameIndex,
    pub camera: KeyTarget,
}

/// Host-side receiver of animation instructions.
///
/// Frames may be `0` or one past the last scheduled frame; sinks decide whether to keep or
/// drop those.
pub trait KeyframeSink {
    /// Called once before any keys; drops previously applied animation and markers.
    fn begin(&mut self) -> AcquisitionResult<()>;
    /// Keys arrive per scheduled frame in increasing order, each group also carrying the hide
    /// keys of that frame's neighbours. No two keys for the same target, channel and frame
    /// disagree.
    fn insert_keyframe(&mut self, key: Keyframe) -> AcquisitionResult<()>;
    fn add_marker(&mut self, marker: Marker) -> AcquisitionResult<()>;
    /// Called once after the last key.
    fn end(&mut self) -> AcquisitionResult<()>;
}

/// Records every instruction; used for tests and JSON plan export.
#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct InMemoryKeyframeSink {
    pub(crate) keyframes: Vec<Keyframe>,
    pub(crate) markers: Vec<Marker>,
}

impl InMemoryKeyframeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Keyframes of one target/channel, in insertion order.
    pub fn track(&self, target: KeyTarget, channel: Channel) -> Vec<&Keyframe> {
        self.keyframes
            .iter()
            .filter(|k| k.target == target && k.channel == channel)
            .collect()
    }
}

impl KeyframeSink for InMemoryKeyframeSink {
    fn begin(&mut self) -> AcquisitionResult<()> {
        self.keyframes.clear();
        self.markers.clear();
        Ok(())
    }

    fn insert_keyframe(&mut self, key: Keyframe) -> AcquisitionResult<()> {
        self.keyframes.push(key);
        Ok(())
    }

    fn add_marker(&mut self, marker: Marker) -> AcquisitionResult<()> {
        self.markers.push(marker);
        Ok(())
    }

    fn end(&mut self) -> AcquisitionResult<()> {
        Ok(())
    }
}

const VISIBILITY_CHANNELS: [Channel; 2] = [Channel::HideRender, Channel::HideViewport];

/// Stream a timeline's visibility and camera instructions into `sink`.
///
/// Per frame the active light is hidden at both neighbours and shown on the frame itself, then
/// the camera is keyed: location for a moving camera, focus distance for a static one. A
/// neighbour that shows the same light (single-light rigs) gets no hide key. A marker is placed
/// on the first frame of every camera sample.
#[tracing::instrument(skip_all, fields(frames = timeline.frames.len()))]
pub fn apply_timeline(
    timeline: &ScheduleTimeline,
    sink: &mut dyn KeyframeSink,
) -> AcquisitionResult<()> {
    sink.begin()?;

    let moving = timeline.camera.mode.is_moving();
    for frame in &timeline.frames {
        if frame.light_index == 0 {
            sink.add_marker(Marker {
                frame: frame.frame_index,
                camera: KeyTarget::Camera,
            })?;
        }

        let light = KeyTarget::Light(frame.light_index);
        let window = frame.visible_window;
        for (at, hidden) in [
            (window.off_before, true),
            (window.off_after, true),
            (window.on, false),
        ] {
            let shows_same_light = timeline
                .get(at)
                .is_some_and(|other| other.light_index == frame.light_index);
            if hidden && shows_same_light {
                continue;
            }
            for channel in VISIBILITY_CHANNELS {
                sink.insert_keyframe(Keyframe {
                    target: light,
                    channel,
                    frame: at,
                    value: KeyValue::Flag(hidden),
                })?;
            }
        }

        let camera_key = if moving {
            Keyframe {
                target: KeyTarget::Camera,
                channel: Channel::Location,
                frame: frame.frame_index,
                value: KeyValue::Vector(frame.camera.location),
            }
        } else {
            Keyframe {
                target: KeyTarget::Camera,
                channel: Channel::FocusDistance,
                frame: frame.frame_index,
                value: KeyValue::Scalar(frame.camera.focus_distance),
            }
        };
        sink.insert_keyframe(camera_key)?;
    }

    sink.end()
}
