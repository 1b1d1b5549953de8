use std::path::PathBuf;

use crate::{
    foundation::{core::frame_pad_width, error::AcquisitionResult},
    output::naming::OutputLayout,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderPass {
    Combined,
    Depth,
    Normal,
    Shadow,
    DiffuseDirect,
    DiffuseIndirect,
    DiffuseColor,
    GlossyDirect,
    GlossyIndirect,
    GlossyColor,
}

pub const ACQUISITION_PASSES: [RenderPass; 10] = [
    RenderPass::Combined,
    RenderPass::Depth,
    RenderPass::Normal,
    RenderPass::Shadow,
    RenderPass::DiffuseDirect,
    RenderPass::DiffuseIndirect,
    RenderPass::DiffuseColor,
    RenderPass::GlossyDirect,
    RenderPass::GlossyIndirect,
    RenderPass::GlossyColor,
];

/// A compositor file output fed by one render pass.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PassOutput {
    pub pass: RenderPass,
    pub normalize: bool,
    pub base_path: PathBuf,
}

/// Render configuration handed to the host renderer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderSettings {
    pub engine: String,
    pub filepath_template: String,
    pub pad_width: usize,
    pub file_format: String,
    pub color_mode: String,
    pub color_depth: u8,
    pub use_overwrite: bool,
    pub use_compositing: bool,
    pub passes: Vec<RenderPass>,
    pub pass_outputs: Vec<PassOutput>,
}

impl RenderSettings {
    /// Settings for a run of `total_frames` frames written under `layout`.
    ///
    /// Depth is normalized before it is written; normals are written as-is.
    pub fn for_layout(layout: &OutputLayout, total_frames: u64) -> AcquisitionResult<Self> {
        layout.validate()?;
        let pad_width = frame_pad_width(total_frames);

        Ok(Self {
            engine: "CYCLES".to_string(),
            filepath_template: layout.frame_template(pad_width),
            pad_width,
            file_format: "PNG".to_string(),
            color_mode: "RGB".to_string(),
            color_depth: 16,
            use_overwrite: false,
            use_compositing: true,
            passes: ACQUISITION_PASSES.to_vec(),
            pass_outputs: vec![
                PassOutput {
                    pass: RenderPass::Depth,
                    normalize: true,
                    base_path: layout.depth_dir(),
                },
                PassOutput {
                    pass: RenderPass::Normal,
                    normalize: false,
                    base_path: layout.normal_dir(),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::error::AcquisitionError;

    #[test]
    fn template_width_follows_frame_count() {
        let layout = OutputLayout::new("out", "coin");
        let s = RenderSettings::for_layout(&layout, 120).unwrap();
        assert_eq!(s.pad_width, 3);
        assert_eq!(s.filepath_template, "out/PNG/coin-###");
        assert_eq!(s.file_format, "PNG");
        assert_eq!(s.color_depth, 16);
        assert!(!s.use_overwrite);
    }

    #[test]
    fn depth_and_normal_outputs() {
        let layout = OutputLayout::new("out", "coin");
        let s = RenderSettings::for_layout(&layout, 9).unwrap();
        assert_eq!(s.pass_outputs.len(), 2);
        assert_eq!(s.pass_outputs[0].base_path, layout.depth_dir());
        assert!(s.pass_outputs[0].normalize);
        assert_eq!(s.pass_outputs[1].base_path, layout.normal_dir());
        assert_eq!(s.pass_outputs[1].base_path, PathBuf::from("out").join("Normal"));
        assert!(s.passes.contains(&RenderPass::Depth));
        assert!(s.passes.contains(&RenderPass::Normal));
    }

    #[test]
    fn requires_output_names() {
        let layout = OutputLayout::new("out", "");
        assert!(matches!(
            RenderSettings::for_layout(&layout, 4),
            Err(AcquisitionError::InvalidParameter(_))
        ));
    }
}
