use crate::{
    focus::sweep::FocusSweep,
    foundation::{
        core::{FrameIndex, Vec3, frame_pad_width},
        error::{AcquisitionError, AcquisitionResult},
    },
    rig::lights::LightRig,
    schedule::camera::{CameraConfig, CameraState},
};

/// Frames around a shot: the light is shown at `on` and hidden at both neighbours.
///
/// Neighbours are not clamped, so the first frame's `off_before` is `FrameIndex(0)` and the
/// last frame's `off_after` is one past the end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VisibleWindow {
    pub on: FrameIndex,
    pub off_before: FrameIndex,
    pub off_after: FrameIndex,
}

impl VisibleWindow {
    pub fn around(frame: FrameIndex) -> Self {
        Self {
            on: frame,
            off_before: frame.prev(),
            off_after: frame.next(),
        }
    }
}

/// One (camera sample, light) shot.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameDescriptor {
    pub frame_index: FrameIndex,
    pub camera_sample_index: usize,
    pub light_index: usize,
    pub camera: CameraState,
    pub light_position: Vec3,
    pub visible_window: VisibleWindow,
}

/// Full acquisition timeline, `sample_count * light_count` frames in row-major order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleTimeline {
    pub camera: CameraConfig,
    pub sample_count: usize,
    pub light_count: usize,
    pub frames: Vec<FrameDescriptor>,
}

impl ScheduleTimeline {
    pub fn total_frames(&self) -> u64 {
        self.frames.len() as u64
    }

    /// Zero-padding width shared by metadata labels and render filenames.
    pub fn pad_width(&self) -> usize {
        frame_pad_width(self.total_frames())
    }

    /// Frame of shot `(camera_sample_index, light_index)`.
    pub fn frame_of(&self, camera_sample_index: usize, light_index: usize) -> Option<FrameIndex> {
        if camera_sample_index >= self.sample_count || light_index >= self.light_count {
            return None;
        }
        Some(frame_index_of(
            camera_sample_index,
            light_index,
            self.light_count,
        ))
    }

    pub fn get(&self, frame: FrameIndex) -> Option<&FrameDescriptor> {
        let i = usize::try_from(frame.0).ok()?.checked_sub(1)?;
        self.frames.get(i)
    }
}

fn frame_index_of(camera_sample_index: usize, light_index: usize, light_count: usize) -> FrameIndex {
    FrameIndex((camera_sample_index * light_count + light_index + 1) as u64)
}

/// Enumerate every (focus sample, light) pair into a 1-based frame timeline.
///
/// Camera samples form the outer loop and lights the inner loop, so
/// `frame_index = c * lights.len() + l + 1`.
#[tracing::instrument(skip_all, fields(lights = lights.len(), samples = focus.len()))]
pub fn build_schedule(
    lights: &LightRig,
    focus: &FocusSweep,
    camera: &CameraConfig,
) -> AcquisitionResult<ScheduleTimeline> {
    if lights.is_empty() {
        return Err(AcquisitionError::empty(
            "an acquisition needs at least one light",
        ));
    }
    if focus.is_empty() {
        return Err(AcquisitionError::empty(
            "an acquisition needs at least one camera/focus sample",
        ));
    }

    let light_count = lights.len();
    let sample_count = focus.len();
    let mut frames = Vec::with_capacity(sample_count * light_count);

    for (c, sample) in focus.samples().iter().enumerate() {
        let state = camera.mode.state_for(sample.z);

        for (l, light) in lights.iter().enumerate() {
            let frame_index = frame_index_of(c, l, light_count);
            frames.push(FrameDescriptor {
                frame_index,
                camera_sample_index: c,
                light_index: l,
                camera: state,
                light_position: light.position,
                visible_window: VisibleWindow::around(frame_index),
            });
        }
    }

    tracing::debug!(frames = frames.len(), "built acquisition schedule");
    Ok(ScheduleTimeline {
        camera: *camera,
        sample_count,
        light_count,
        frames,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::camera::CameraMode;

    fn rig(n: usize) -> LightRig {
        LightRig::from_positions((0..n).map(|i| Vec3::new(i as f64, 0.0, 1.0)))
    }

    #[test]
    fn row_major_frame_numbers() {
        let focus = FocusSweep::manual(0.0, 2.0, 3).unwrap();
        let tl = build_schedule(&rig(4), &focus, &CameraConfig::moving(1.0, 2.8)).unwrap();

        assert_eq!(tl.frames.len(), 12);
        for f in &tl.frames {
            assert_eq!(
                f.frame_index.0,
                (f.camera_sample_index * 4 + f.light_index + 1) as u64
            );
        }
        assert_eq!(tl.frames[6].camera_sample_index, 1);
        assert_eq!(tl.frames[6].light_index, 2);
        assert_eq!(tl.frame_of(1, 2), Some(FrameIndex(7)));
        assert_eq!(tl.frame_of(3, 0), None);
        assert_eq!(tl.get(FrameIndex(7)).unwrap().light_index, 2);
        assert!(tl.get(FrameIndex(0)).is_none());
        assert!(tl.get(FrameIndex(13)).is_none());
        assert_eq!(tl.pad_width(), 2);
    }

    #[test]
    fn moving_mode_places_camera_per_sample() {
        let focus = FocusSweep::from_heights([0.0, 0.5]);
        let tl = build_schedule(&rig(2), &focus, &CameraConfig::moving(1.0, 4.0)).unwrap();
        assert_eq!(tl.frames[0].camera.location, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(tl.frames[1].camera.location, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(tl.frames[2].camera.location, Vec3::new(0.0, 0.0, 1.5));
        assert!(tl.frames.iter().all(|f| f.camera.focus_distance == 1.0));
    }

    #[test]
    fn static_mode_changes_focus_only() {
        let focus = FocusSweep::from_heights([0.0, 0.5]);
        let cam = CameraConfig {
            mode: CameraMode::Static { base_height: 2.0 },
            ..CameraConfig::moving(0.0, 4.0)
        };
        let tl = build_schedule(&rig(1), &focus, &cam).unwrap();
        assert!(
            tl.frames
                .iter()
                .all(|f| f.camera.location == Vec3::new(0.0, 0.0, 2.0))
        );
        assert_eq!(tl.frames[0].camera.focus_distance, 2.0);
        assert_eq!(tl.frames[1].camera.focus_distance, 1.5);
    }

    #[test]
    fn windows_are_not_clamped() {
        let focus = FocusSweep::single(0.0);
        let tl = build_schedule(&rig(3), &focus, &CameraConfig::rti_only()).unwrap();
        let first = tl.frames.first().unwrap().visible_window;
        let last = tl.frames.last().unwrap().visible_window;
        assert_eq!(first.off_before, FrameIndex(0));
        assert_eq!(first.on, FrameIndex(1));
        assert_eq!(last.on, FrameIndex(3));
        assert_eq!(last.off_after, FrameIndex(4));
    }

    #[test]
    fn lights_keep_world_positions() {
        let lights = rig(3);
        let tl = build_schedule(
            &lights,
            &FocusSweep::from_heights([0.0, 1.0]),
            &CameraConfig::moving(1.0, 2.0),
        )
        .unwrap();
        for f in &tl.frames {
            assert_eq!(f.light_position, lights.lights()[f.light_index].position);
        }
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let cam = CameraConfig::moving(1.0, 2.8);
        let err = build_schedule(&LightRig::default(), &FocusSweep::single(0.0), &cam).unwrap_err();
        assert!(matches!(err, AcquisitionError::EmptyInput(_)));
        let err = build_schedule(&rig(2), &FocusSweep::default(), &cam).unwrap_err();
        assert!(matches!(err, AcquisitionError::EmptyInput(_)));
    }
}
