//! Geometry buffer storage addressed by opaque handles

use std::collections::HashMap;

use super::error::{BufferKind, RasterError, RasterResult};
use super::math::Vec3;

/// Handle to a registered position list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PosBufId(u32);

/// Handle to a registered index list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndBufId(u32);

/// Handle to a registered color list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColBufId(u32);

impl PosBufId {
    pub fn id(self) -> u32 {
        self.0
    }
}

impl IndBufId {
    pub fn id(self) -> u32 {
        self.0
    }
}

impl ColBufId {
    pub fn id(self) -> u32 {
        self.0
    }
}

/// Position, index and color lists, kept apart from draw calls so the same
/// geometry can be redrawn under different transforms.
#[derive(Debug, Default)]
pub struct GeometryBuffers {
    next_id: u32,
    positions: HashMap<u32, Vec<Vec3>>,
    indices: HashMap<u32, Vec<[u32; 3]>>,
    colors: HashMap<u32, Vec<Vec3>>,
}

impl GeometryBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    // One counter for every kind, so ids never repeat
    fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn load_positions(&mut self, positions: Vec<Vec3>) -> PosBufId {
        let id = self.next_id();
        log::debug!("registered {} positions as buffer {}", positions.len(), id);
        self.positions.insert(id, positions);
        PosBufId(id)
    }

    pub fn load_indices(&mut self, indices: Vec<[u32; 3]>) -> IndBufId {
        let id = self.next_id();
        log::debug!("registered {} index triples as buffer {}", indices.len(), id);
        self.indices.insert(id, indices);
        IndBufId(id)
    }

    pub fn load_colors(&mut self, colors: Vec<Vec3>) -> ColBufId {
        let id = self.next_id();
        log::debug!("registered {} colors as buffer {}", colors.len(), id);
        self.colors.insert(id, colors);
        ColBufId(id)
    }

    pub fn positions(&self, handle: PosBufId) -> RasterResult<&[Vec3]> {
        self.positions
            .get(&handle.0)
            .map(Vec::as_slice)
            .ok_or(RasterError::InvalidHandle { kind: BufferKind::Positions, id: handle.0 })
    }

    pub fn indices(&self, handle: IndBufId) -> RasterResult<&[[u32; 3]]> {
        self.indices
            .get(&handle.0)
            .map(Vec::as_slice)
            .ok_or(RasterError::InvalidHandle { kind: BufferKind::Indices, id: handle.0 })
    }

    pub fn colors(&self, handle: ColBufId) -> RasterResult<&[Vec3]> {
        self.colors
            .get(&handle.0)
            .map(Vec::as_slice)
            .ok_or(RasterError::InvalidHandle { kind: BufferKind::Colors, id: handle.0 })
    }
}
