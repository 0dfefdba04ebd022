//! 场景模块
//!
//! 变换、相机、实体以及把它们和粒子发射器组织在一起的场景。

pub mod camera;
pub mod entity;
pub mod manager;
pub mod transform;

pub use camera::{Camera, Projection};
pub use entity::{EntityConstants, GameEntity, MeshHandle};
pub use manager::Scene;
pub use transform::Transform;
