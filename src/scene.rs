// scene.rs — render state carried through the frame loop

use crate::error::MeshError;
use crate::mesh::{SphereMesh, SphereParameters};

/// Everything the frame loop needs about the sphere, passed around explicitly.
///
/// A viewport change never edits the mesh in place: it builds a new one and
/// swaps it in only after generation succeeded.
#[derive(Debug, Clone)]
pub struct SceneState {
    params: SphereParameters,
    mesh: SphereMesh,
    size: Option<(u32, u32)>,
}

impl SceneState {
    pub fn new(params: SphereParameters) -> Result<Self, MeshError> {
        let mesh = SphereMesh::build(params)?;
        Ok(Self {
            params,
            mesh,
            size: None,
        })
    }

    pub fn mesh(&self) -> &SphereMesh {
        &self.mesh
    }

    pub fn params(&self) -> &SphereParameters {
        &self.params
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.params.aspect_ratio
    }

    /// Last non-zero viewport size seen by [`SceneState::resize`].
    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    /// Returns `Ok(true)` when the mesh was regenerated.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<bool, MeshError> {
        // Minimized windows report 0x0.
        if width == 0 || height == 0 {
            log::warn!("ignoring resize to {}x{}", width, height);
            return Ok(false);
        }

        self.size = Some((width, height));

        let aspect = width as f32 / height as f32;
        if aspect == self.params.aspect_ratio {
            return Ok(false);
        }

        log::debug!(
            "viewport {}x{}: aspect {} -> {}",
            width,
            height,
            self.params.aspect_ratio,
            aspect
        );
        self.set_params(self.params.with_aspect_ratio(aspect))?;
        Ok(true)
    }

    pub fn set_params(&mut self, params: SphereParameters) -> Result<(), MeshError> {
        let mesh = SphereMesh::build(params)?;
        self.params = params;
        self.mesh = mesh;
        Ok(())
    }
}
