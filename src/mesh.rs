// mesh.rs — UV sphere mesh generator

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::MeshError;

pub const MIN_SECTORS: u32 = 3;
pub const MIN_STACKS: u32 = 2;

/// Input of the generator. Missing JSON fields fall back to [`Default`];
/// unknown ones are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SphereParameters {
    pub radius: f32,
    /// Longitude subdivisions.
    pub sector_count: u32,
    /// Latitude subdivisions.
    pub stack_count: u32,
    /// Viewport width / height. `>= 1` squeezes x, `< 1` squeezes y.
    pub aspect_ratio: f32,
}

impl Default for SphereParameters {
    fn default() -> Self {
        Self {
            radius: 1.0,
            sector_count: 36,
            stack_count: 18,
            aspect_ratio: 1.0,
        }
    }
}

impl SphereParameters {
    pub fn new(radius: f32, sector_count: u32, stack_count: u32) -> Self {
        Self {
            radius,
            sector_count,
            stack_count,
            aspect_ratio: 1.0,
        }
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    pub fn validate(&self) -> Result<(), MeshError> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(MeshError::invalid(
                "radius",
                format!("must be a positive finite number, got {}", self.radius),
            ));
        }
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(MeshError::invalid(
                "aspect_ratio",
                format!("must be a positive finite number, got {}", self.aspect_ratio),
            ));
        }
        if self.sector_count < MIN_SECTORS {
            return Err(MeshError::invalid(
                "sector_count",
                format!("must be at least {}, got {}", MIN_SECTORS, self.sector_count),
            ));
        }
        if self.stack_count < MIN_STACKS {
            return Err(MeshError::invalid(
                "stack_count",
                format!("must be at least {}, got {}", MIN_STACKS, self.stack_count),
            ));
        }

        // Every vertex must be addressable by a u32 index.
        let vertices = (self.sector_count as u64 + 1) * (self.stack_count as u64 + 1);
        if vertices > u32::MAX as u64 {
            return Err(MeshError::invalid(
                "sector_count",
                format!(
                    "{} x {} grid has {} vertices, more than a u32 index can address",
                    self.sector_count, self.stack_count, vertices
                ),
            ));
        }

        Ok(())
    }

    pub fn vertex_count(&self) -> usize {
        (self.sector_count as usize + 1) * (self.stack_count as usize + 1)
    }

    pub fn triangle_count(&self) -> usize {
        self.sector_count as usize * self.stack_count as usize * 2
    }

    pub fn index_count(&self) -> usize {
        self.triangle_count() * 3
    }
}

/// Interleaved vertex record, laid out for a single vertex buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tex_coord: [f32; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SphereMesh {
    params: SphereParameters,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    tex_coords: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

/// Generate a UV sphere.
///
/// Stacks run from the north pole (`+z`) to the south pole, evenly spaced in
/// latitude angle. Each stack carries `sector_count + 1` vertices: the first
/// and last share a position but differ in `s`, which keeps the texture seam.
///
/// The aspect correction only touches positions. Normals come from the
/// undistorted sphere point and are not renormalized afterwards.
pub fn generate(
    radius: f32,
    sector_count: u32,
    stack_count: u32,
    aspect_ratio: f32,
) -> Result<SphereMesh, MeshError> {
    SphereMesh::build(
        SphereParameters::new(radius, sector_count, stack_count).with_aspect_ratio(aspect_ratio),
    )
}

impl SphereMesh {
    pub fn build(params: SphereParameters) -> Result<Self, MeshError> {
        params.validate()?;

        let SphereParameters {
            radius,
            sector_count: sectors,
            stack_count: stacks,
            aspect_ratio,
        } = params;

        let vertex_count = params.vertex_count();
        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        let mut tex_coords = Vec::with_capacity(vertex_count);
        let mut indices = Vec::with_capacity(params.index_count());

        let sector_step = 2.0 * PI / sectors as f32;
        let stack_step = PI / stacks as f32;
        let length_inv = 1.0 / radius;

        for i in 0..=stacks {
            let stack_angle = FRAC_PI_2 - i as f32 * stack_step;
            let xy = radius * stack_angle.cos();
            let z = radius * stack_angle.sin();

            for j in 0..=sectors {
                let sector_angle = j as f32 * sector_step;

                let raw = Vec3::new(xy * sector_angle.cos(), xy * sector_angle.sin(), z);

                let mut position = raw;
                if aspect_ratio >= 1.0 {
                    position.x /= aspect_ratio;
                } else {
                    position.y *= aspect_ratio;
                }

                positions.push(position.to_array());
                normals.push((raw * length_inv).to_array());
                tex_coords.push([j as f32 / sectors as f32, i as f32 / stacks as f32]);
            }
        }

        for i in 0..stacks {
            let mut k1 = i * (sectors + 1);
            let mut k2 = k1 + sectors + 1;

            for _ in 0..sectors {
                // Pole quads collapse to zero-area triangles; they are kept.
                indices.extend_from_slice(&[
                    k1, k2, k1 + 1,
                    k1 + 1, k2, k2 + 1,
                ]);
                k1 += 1;
                k2 += 1;
            }
        }

        log::debug!(
            "built sphere r={} sectors={} stacks={} aspect={}: {} vertices, {} indices",
            radius,
            sectors,
            stacks,
            aspect_ratio,
            positions.len(),
            indices.len()
        );

        Ok(Self {
            params,
            positions,
            normals,
            tex_coords,
            indices,
        })
    }

    pub fn params(&self) -> &SphereParameters {
        &self.params
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn tex_coords(&self) -> &[[f32; 2]] {
        &self.tex_coords
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Positions as `x, y, z, x, y, z, ...`.
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn flat_normals(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Texture coordinates as `s, t, s, t, ...`.
    pub fn flat_tex_coords(&self) -> &[f32] {
        bytemuck::cast_slice(&self.tex_coords)
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    pub fn interleaved(&self) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.tex_coords)
            .map(|((&position, &normal), &tex_coord)| Vertex {
                position,
                normal,
                tex_coord,
            })
            .collect()
    }

    /// Raw bytes of the position array.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// [`SphereMesh::interleaved`] as bytes, one 32-byte [`Vertex`] per vertex.
    pub fn interleaved_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.interleaved()).to_vec()
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn into_parts(self) -> (Vec<[f32; 3]>, Vec<[f32; 3]>, Vec<[f32; 2]>, Vec<u32>) {
        (self.positions, self.normals, self.tex_coords, self.indices)
    }
}
