//! Acquisition planning for synthetic RTI (Reflectance Transformation Imaging) and
//! Shape-From-Focus captures.
//!
//! A capture is one light active and one focus setting active per frame. The pipeline is:
//!
//! 1. Load a light rig: [`LightRig::load_lp`]
//! 2. Derive focus heights: [`FocusSweep::manual`] or [`FocusSweep::auto`]
//! 3. Enumerate every (focus sample, light) pair: [`build_schedule`]
//! 4. Emit one CSV row per frame: [`emit_metadata`] / [`write_metadata_csv`]
//!
//! Frame numbers are 1-based and zero-padded to the digit count of the total frame count; the
//! CSV `image` column and [`OutputLayout::frame_template`] share that padding so every row names
//! exactly one rendered file.
#![forbid(unsafe_code)]

pub mod config;
pub mod focus;
pub mod foundation;
pub mod output;
pub mod rig;
pub mod schedule;
pub mod session;

pub use config::{AcquisitionConfig, FocusSettings, LightSource};
pub use focus::{
    geometry::{GeometrySource, MeshObject, world_z_bounds},
    sweep::{FocusSample, FocusSweep, linspace},
};
pub use foundation::core::{FrameIndex, Mat4, Pt3, Quat, Vec3, frame_label, frame_pad_width};
pub use foundation::error::{AcquisitionError, AcquisitionResult};
pub use output::{
    metadata::{METADATA_HEADER, MetadataRow, emit_metadata, metadata_rows, write_metadata_csv},
    naming::{OutputLayout, expand_frame_template},
    render::{PassOutput, RenderPass, RenderSettings},
};
pub use rig::lights::{LightPosition, LightRig};
pub use schedule::{
    builder::{FrameDescriptor, ScheduleTimeline, VisibleWindow, build_schedule},
    camera::{CameraConfig, CameraMode, CameraState},
    keyframes::{
        Channel, InMemoryKeyframeSink, KeyTarget, KeyValue, Keyframe, KeyframeSink, Marker,
        apply_timeline,
    },
};
pub use session::AcquisitionSession;
