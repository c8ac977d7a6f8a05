//! Demo scene: registered geometry plus the camera that frames it

use crate::config::SceneConfig;
use crate::rasterizer::{Buffers, ColBufId, DrawStats, IndBufId, PosBufId, Primitive, RasterResult, Rasterizer};
use crate::transform::{axis_rotation, perspective, view_from_eye};

pub struct Scene {
    pub config: SceneConfig,
    pos: PosBufId,
    ind: IndBufId,
    col: ColBufId,
}

impl Scene {
    /// Register the scene's geometry with a rasterizer
    pub fn load(raster: &mut Rasterizer, config: SceneConfig) -> Self {
        let pos = raster.load_positions(config.positions.clone());
        let ind = raster.load_indices(config.indices.clone());
        let col = raster.load_colors(config.colors.clone());
        Self { config, pos, ind, col }
    }

    /// Clear and draw one frame with the model rotated `angle` degrees about the scene axis
    pub fn render(&self, raster: &mut Rasterizer, angle: f32) -> RasterResult<DrawStats> {
        let aspect = raster.width() as f32 / raster.height() as f32;

        raster.clear(Buffers::COLOR | Buffers::DEPTH);
        raster.set_model(axis_rotation(self.config.axis, angle));
        raster.set_view(view_from_eye(self.config.eye));
        raster.set_projection(perspective(self.config.fov, aspect, self.config.z_near, self.config.z_far));

        raster.draw(self.pos, self.ind, self.col, Primitive::Triangle)
    }
}
