//! 材质
//!
//! 颜色、UV 变换和一组纹理槽。槽位在 `finalize` 之后冻结，
//! 之后的绑定只需要按槽位顺序提交纹理句柄。

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

/// 每个材质最多绑定的纹理数量
pub const MAX_TEXTURE_SLOTS: usize = 128;

/// 纹理句柄（由资源系统分配）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub color_tint: Vec4,
    pub uv_scale: Vec2,
    pub uv_offset: Vec2,
    textures: Vec<(u32, TextureHandle)>,
    finalized: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color_tint: Vec4::ONE,
            uv_scale: Vec2::ONE,
            uv_offset: Vec2::ZERO,
            textures: Vec::new(),
            finalized: false,
        }
    }
}

impl Material {
    pub fn new(color_tint: Vec4) -> Self {
        Self {
            color_tint,
            ..Self::default()
        }
    }

    pub fn with_uv(mut self, uv_scale: Vec2, uv_offset: Vec2) -> Self {
        self.uv_scale = uv_scale;
        self.uv_offset = uv_offset;
        self
    }

    /// 绑定纹理到槽位
    ///
    /// 已 finalize、槽位越界或已占用时返回 `false`。
    pub fn add_texture(&mut self, slot: u32, texture: TextureHandle) -> bool {
        if self.finalized || slot as usize >= MAX_TEXTURE_SLOTS {
            return false;
        }
        if self.textures.iter().any(|(existing, _)| *existing == slot) {
            return false;
        }
        self.textures.push((slot, texture));
        true
    }

    /// 冻结槽位分配，纹理按槽位排序
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        self.textures.sort_by_key(|(slot, _)| *slot);
        self.finalized = true;
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn texture(&self, slot: u32) -> Option<TextureHandle> {
        self.textures
            .iter()
            .find(|(existing, _)| *existing == slot)
            .map(|(_, texture)| *texture)
    }

    /// 所有已绑定的 (槽位, 纹理)
    pub fn textures(&self) -> &[(u32, TextureHandle)] {
        &self.textures
    }

    pub fn constants(&self) -> MaterialConstants {
        MaterialConstants {
            color_tint: self.color_tint.to_array(),
            uv_scale: self.uv_scale.to_array(),
            uv_offset: self.uv_offset.to_array(),
        }
    }
}

/// 材质常量缓冲区布局
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MaterialConstants {
    pub color_tint: [f32; 4],
    pub uv_scale: [f32; 2],
    pub uv_offset: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_texture_slots() {
        let mut material = Material::default();
        assert!(material.add_texture(0, TextureHandle(10)));
        assert!(material.add_texture(5, TextureHandle(11)));
        assert!(!material.add_texture(5, TextureHandle(12)));
        assert!(!material.add_texture(MAX_TEXTURE_SLOTS as u32, TextureHandle(13)));

        assert_eq!(material.texture(5), Some(TextureHandle(11)));
        assert_eq!(material.texture(1), None);
    }

    #[test]
    fn test_finalize_freezes_and_sorts() {
        let mut material = Material::default();
        material.add_texture(3, TextureHandle(1));
        material.add_texture(1, TextureHandle(2));
        material.finalize();

        assert!(material.is_finalized());
        assert!(!material.add_texture(2, TextureHandle(3)));
        let slots: Vec<u32> = material.textures().iter().map(|(slot, _)| *slot).collect();
        assert_eq!(slots, vec![1, 3]);
    }

    #[test]
    fn test_constants_layout() {
        assert_eq!(std::mem::size_of::<MaterialConstants>(), 32);

        let material = Material::new(Vec4::new(1.0, 0.5, 0.25, 1.0))
            .with_uv(Vec2::splat(2.0), Vec2::new(0.1, 0.2));
        let constants = material.constants();
        assert_eq!(constants.color_tint, [1.0, 0.5, 0.25, 1.0]);
        assert_eq!(constants.uv_scale, [2.0, 2.0]);
        assert_eq!(constants.uv_offset, [0.1, 0.2]);
    }
}
