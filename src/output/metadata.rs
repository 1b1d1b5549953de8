use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{Vec3, fmt_real, frame_label},
        error::{AcquisitionError, AcquisitionResult},
    },
    output::naming::OutputLayout,
    schedule::builder::ScheduleTimeline,
};

pub const METADATA_HEADER: &str = "image,x_lamp,y_lamp,z_lamp,z_cam,aperture_fstop,lens";

/// Metadata of one rendered frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MetadataRow {
    pub frame_label: String,
    pub light_position: Vec3,
    pub camera_focus_distance: f64,
    pub aperture_fstop: f64,
    pub lens_or_marker: f64,
}

impl MetadataRow {
    pub fn to_csv_line(&self, base_filename: &str) -> String {
        format!(
            "{}{},{},{},{},{},{},{}",
            base_filename,
            self.frame_label,
            fmt_real(self.light_position.x),
            fmt_real(self.light_position.y),
            fmt_real(self.light_position.z),
            fmt_real(self.camera_focus_distance),
            fmt_real(self.aperture_fstop),
            fmt_real(self.lens_or_marker),
        )
    }
}

/// One row per frame, in timeline order.
pub fn metadata_rows(timeline: &ScheduleTimeline) -> Vec<MetadataRow> {
    let width = timeline.pad_width();
    timeline
        .frames
        .iter()
        .map(|f| MetadataRow {
            frame_label: frame_label(f.frame_index, width),
            light_position: f.light_position,
            camera_focus_distance: f.camera.focus_distance,
            aperture_fstop: timeline.camera.aperture_fstop,
            lens_or_marker: timeline.camera.lens_mm,
        })
        .collect()
}

/// Header plus one CSV line per frame.
///
/// Image names use the same `-<zero padded frame>` suffix as the render output template.
pub fn emit_metadata(
    timeline: &ScheduleTimeline,
    base_filename: &str,
) -> AcquisitionResult<Vec<String>> {
    if base_filename.trim().is_empty() {
        return Err(AcquisitionError::invalid(
            "metadata needs a non-empty base file name",
        ));
    }

    let mut lines = Vec::with_capacity(timeline.frames.len() + 1);
    lines.push(METADATA_HEADER.to_string());
    lines.extend(
        metadata_rows(timeline)
            .iter()
            .map(|row| row.to_csv_line(base_filename)),
    );
    Ok(lines)
}

/// Write `lines` to `<output_path>/<base_filename>.csv`, each newline-terminated.
///
/// Content goes to a sibling temp file first and is renamed into place, so an existing CSV is
/// either fully replaced or left as it was.
#[tracing::instrument(skip(lines), fields(lines = lines.len()))]
pub fn write_metadata_csv(layout: &OutputLayout, lines: &[String]) -> AcquisitionResult<PathBuf> {
    layout.validate()?;
    if lines.first().map(String::as_str) != Some(METADATA_HEADER) {
        return Err(AcquisitionError::invalid(
            "metadata lines must start with the CSV header",
        ));
    }

    let path = layout.csv_path();
    ensure_parent_dir(&path)?;

    let tmp = path.with_extension("csv.tmp");
    let write = || -> anyhow::Result<()> {
        let f = std::fs::File::create(&tmp)
            .with_context(|| format!("create '{}'", tmp.display()))?;
        let mut w = std::io::BufWriter::new(f);
        for line in lines {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
        }
        w.flush()
            .with_context(|| format!("flush '{}'", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("move metadata into '{}'", path.display()))?;
        Ok(())
    };

    if let Err(e) = write() {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }

    tracing::info!(path = %path.display(), rows = lines.len() - 1, "wrote metadata csv");
    Ok(path)
}

pub fn ensure_parent_dir(path: &Path) -> AcquisitionResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}
