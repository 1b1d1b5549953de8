use std::path::PathBuf;

use crate::foundation::{
    core::{FrameIndex, frame_label},
    error::{AcquisitionError, AcquisitionResult},
};

/// Where rendered frames and metadata land.
///
/// Frame images go to `<output_path>/PNG/<base_filename>-<frame>`, metadata to
/// `<output_path>/<base_filename>.csv`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutputLayout {
    pub output_path: String,
    pub base_filename: String,
}

impl OutputLayout {
    pub fn new(output_path: impl Into<String>, base_filename: impl Into<String>) -> Self {
        Self {
            output_path: output_path.into(),
            base_filename: base_filename.into(),
        }
    }

    pub fn validate(&self) -> AcquisitionResult<()> {
        if self.output_path.trim().is_empty() {
            return Err(AcquisitionError::invalid("output path not set"));
        }
        if self.base_filename.trim().is_empty() {
            return Err(AcquisitionError::invalid("output file name not set"));
        }
        Ok(())
    }

    /// Render output template with one `#` per padded digit.
    pub fn frame_template(&self, width: usize) -> String {
        self.png_dir()
            .join(format!("{}-{}", self.base_filename, "#".repeat(width)))
            .to_string_lossy()
            .into_owned()
    }

    /// Path the renderer produces for `frame`, without the image extension.
    pub fn resolve_frame_path(&self, frame: FrameIndex, width: usize) -> String {
        expand_frame_template(&self.frame_template(width), frame)
    }

    /// `<base_filename>-<padded frame>`, the `image` column of the metadata.
    pub fn frame_stem(&self, frame: FrameIndex, width: usize) -> String {
        format!("{}{}", self.base_filename, frame_label(frame, width))
    }

    pub fn csv_path(&self) -> PathBuf {
        PathBuf::from(&self.output_path).join(format!("{}.csv", self.base_filename))
    }

    pub fn png_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_path).join("PNG")
    }

    pub fn depth_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_path).join("Depth")
    }

    pub fn normal_dir(&self) -> PathBuf {
        PathBuf::from(&self.output_path).join("Normal")
    }
}

/// Replace the last run of `#` in `template` with `frame`, zero-padded to the run length.
///
/// Without a `#` run the frame number is appended with a width of 4, which is what common
/// renderers do for such templates.
pub fn expand_frame_template(template: &str, frame: FrameIndex) -> String {
    let Some(end) = template.rfind('#') else {
        return format!("{template}{:04}", frame.0);
    };
    let start = template[..=end].trim_end_matches('#').len();
    let width = end + 1 - start;
    format!(
        "{}{:0width$}{}",
        &template[..start],
        frame.0,
        &template[end + 1..],
        width = width
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_has_one_hash_per_digit() {
        let layout = OutputLayout::new("/tmp/out", "shell");
        assert_eq!(layout.frame_template(3), "/tmp/out/PNG/shell-###");
    }

    #[test]
    fn resolve_pads_frame() {
        let layout = OutputLayout::new("/tmp/out", "shell");
        assert_eq!(
            layout.resolve_frame_path(FrameIndex(7), 2),
            "/tmp/out/PNG/shell-07"
        );
        assert_eq!(
            layout.resolve_frame_path(FrameIndex(123), 3),
            "/tmp/out/PNG/shell-123"
        );
    }

    #[test]
    fn expand_handles_suffix_and_missing_hashes() {
        assert_eq!(expand_frame_template("a-##.png", FrameIndex(5)), "a-05.png");
        assert_eq!(expand_frame_template("##", FrameIndex(5)), "05");
        assert_eq!(expand_frame_template("frame_", FrameIndex(5)), "frame_0005");
    }

    #[test]
    fn stem_matches_rendered_file_name() {
        let layout = OutputLayout::new("out", "coin");
        for f in 1..=12u64 {
            let rendered = layout.resolve_frame_path(FrameIndex(f), 2);
            let stem = layout.frame_stem(FrameIndex(f), 2);
            assert_eq!(rendered, format!("out/PNG/{stem}"));
        }
    }

    #[test]
    fn validate_requires_both_fields() {
        assert!(OutputLayout::new("", "a").validate().is_err());
        assert!(OutputLayout::new("out", " ").validate().is_err());
        assert!(OutputLayout::new("out", "a").validate().is_ok());
    }

    #[test]
    fn side_paths() {
        let layout = OutputLayout::new("out", "coin");
        assert_eq!(layout.csv_path(), PathBuf::from("out").join("coin.csv"));
        assert_eq!(layout.depth_dir(), PathBuf::from("out").join("Depth"));
        assert_eq!(layout.normal_dir(), PathBuf::from("out").join("Normal"));
        assert_eq!(layout.png_dir(), PathBuf::from("out").join("PNG"));
        assert!(PathBuf::from(layout.frame_template(2)).starts_with(layout.png_dir()));
    }
}
