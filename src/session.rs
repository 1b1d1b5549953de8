use std::path::{Path, PathBuf};

use crate::{
    focus::{geometry::GeometrySource, sweep::FocusSweep},
    foundation::error::{AcquisitionError, AcquisitionResult},
    output::{
        metadata::{emit_metadata, write_metadata_csv},
        naming::OutputLayout,
        render::RenderSettings,
    },
    rig::lights::LightRig,
    schedule::{
        builder::{ScheduleTimeline, build_schedule},
        camera::CameraConfig,
        keyframes::{KeyframeSink, apply_timeline},
    },
};

/// State of one interactive acquisition setup.
///
/// Each step replaces its previous result only when it succeeds; a failed rebuild leaves the
/// last good timeline and metadata in place.
#[derive(Clone, Debug)]
pub struct AcquisitionSession {
    camera: CameraConfig,
    lights: LightRig,
    focus: FocusSweep,
    timeline: Option<ScheduleTimeline>,
    metadata: Vec<String>,
}

impl AcquisitionSession {
    pub fn new(camera: CameraConfig) -> Self {
        Self {
            camera,
            lights: LightRig::default(),
            focus: FocusSweep::default(),
            timeline: None,
            metadata: Vec::new(),
        }
    }

    pub fn camera(&self) -> &CameraConfig {
        &self.camera
    }

    pub fn set_camera(&mut self, camera: CameraConfig) -> AcquisitionResult<()> {
        camera.validate()?;
        self.camera = camera;
        Ok(())
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    pub fn focus(&self) -> &FocusSweep {
        &self.focus
    }

    pub fn timeline(&self) -> Option<&ScheduleTimeline> {
        self.timeline.as_ref()
    }

    pub fn metadata(&self) -> &[String] {
        &self.metadata
    }

    pub fn set_lights(&mut self, lights: LightRig) {
        self.lights = lights;
    }

    pub fn load_lights(&mut self, path: &Path) -> AcquisitionResult<&LightRig> {
        self.lights = LightRig::load_lp(path)?;
        Ok(&self.lights)
    }

    pub fn clear_lights(&mut self) {
        self.lights = LightRig::default();
    }

    pub fn set_focus(&mut self, focus: FocusSweep) {
        self.focus = focus;
    }

    pub fn sweep_manual(
        &mut self,
        min_z: f64,
        max_z: f64,
        count: usize,
    ) -> AcquisitionResult<&FocusSweep> {
        self.focus = FocusSweep::manual(min_z, max_z, count)?;
        Ok(&self.focus)
    }

    pub fn sweep_auto(
        &mut self,
        target: &dyn GeometrySource,
        count: usize,
    ) -> AcquisitionResult<&FocusSweep> {
        self.focus = FocusSweep::auto(target, count)?;
        Ok(&self.focus)
    }

    pub fn clear_focus(&mut self) {
        self.focus = FocusSweep::default();
    }

    /// Rebuild the timeline from the current lights, focus sweep and camera.
    ///
    /// Metadata emitted from an earlier timeline is dropped once the new one is in place.
    pub fn rebuild_schedule(&mut self) -> AcquisitionResult<&ScheduleTimeline> {
        let timeline = build_schedule(&self.lights, &self.focus, &self.camera)?;
        self.metadata.clear();
        Ok(self.timeline.insert(timeline))
    }

    pub fn apply_keyframes(&self, sink: &mut dyn KeyframeSink) -> AcquisitionResult<()> {
        apply_timeline(self.require_timeline()?, sink)
    }

    pub fn emit_metadata(&mut self, base_filename: &str) -> AcquisitionResult<&[String]> {
        let lines = emit_metadata(self.require_timeline()?, base_filename)?;
        self.metadata = lines;
        Ok(&self.metadata)
    }

    pub fn render_settings(&self, layout: &OutputLayout) -> AcquisitionResult<RenderSettings> {
        RenderSettings::for_layout(layout, self.require_timeline()?.total_frames())
    }

    /// Emit metadata for `layout.base_filename` and write it next to the renders.
    pub fn write_csv(&mut self, layout: &OutputLayout) -> AcquisitionResult<PathBuf> {
        layout.validate()?;
        self.emit_metadata(&layout.base_filename)?;
        write_metadata_csv(layout, &self.metadata)
    }

    fn require_timeline(&self) -> AcquisitionResult<&ScheduleTimeline> {
        self.timeline
            .as_ref()
            .ok_or_else(|| AcquisitionError::empty("no schedule has been built yet"))
    }
}
