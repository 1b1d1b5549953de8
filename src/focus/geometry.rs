use crate::foundation::{
    core::{Mat4, Pt3},
    error::{AcquisitionError, AcquisitionResult},
};

/// Anything that can report local-space vertices and a world transform.
///
/// Implemented by host scene objects; [`MeshObject`] is the in-crate implementation.
pub trait GeometrySource {
    fn local_points(&self) -> &[Pt3];
    fn world_transform(&self) -> Mat4;
    fn children(&self) -> Vec<&dyn GeometrySource>;
}

/// Plain mesh snapshot, loadable from JSON.
///
/// `world` is a column-major 4x4 matrix and defaults to identity.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeshObject {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub vertices: Vec<Pt3>,
    #[serde(default = "Mat4::identity")]
    pub world: Mat4,
    #[serde(default)]
    pub children: Vec<MeshObject>,
}

impl MeshObject {
    pub fn new(name: impl Into<String>, vertices: Vec<Pt3>) -> Self {
        Self {
            name: name.into(),
            vertices,
            world: Mat4::identity(),
            children: Vec::new(),
        }
    }

    pub fn with_world(mut self, world: Mat4) -> Self {
        self.world = world;
        self
    }

    pub fn with_child(mut self, child: MeshObject) -> Self {
        self.children.push(child);
        self
    }
}

impl GeometrySource for MeshObject {
    fn local_points(&self) -> &[Pt3] {
        &self.vertices
    }

    fn world_transform(&self) -> Mat4 {
        self.world
    }

    fn children(&self) -> Vec<&dyn GeometrySource> {
        self.children
            .iter()
            .map(|c| c as &dyn GeometrySource)
            .collect()
    }
}

/// World-space `(min_z, max_z)` of a focus target.
///
/// When the target has children only the children's own vertices count, each transformed by
/// that child's world matrix; otherwise the target's vertices are used.
pub fn world_z_bounds(target: &dyn GeometrySource) -> AcquisitionResult<(f64, f64)> {
    let children = target.children();
    let sources: Vec<&dyn GeometrySource> = if children.is_empty() {
        vec![target]
    } else {
        children
    };

    let mut bounds: Option<(f64, f64)> = None;
    for source in sources {
        let world = source.world_transform();
        for p in source.local_points() {
            let z = world.transform_point(p).z;
            bounds = Some(match bounds {
                None => (z, z),
                Some((lo, hi)) => (lo.min(z), hi.max(z)),
            });
        }
    }

    let (lo, hi) = bounds.ok_or_else(|| {
        AcquisitionError::invalid("focus target has no vertices to derive focus bounds from")
    })?;
    if !lo.is_finite() || !hi.is_finite() {
        return Err(AcquisitionError::invalid(
            "focus target has non-finite vertex coordinates",
        ));
    }
    Ok((lo, hi))
}
