//! GPU 粒子系统模块
//!
//! 粒子生命周期在 CPU 上用环形缓冲区管理，每帧把存活窗口整体上传到 GPU。
//!
//! ## 架构设计
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                  Particle Emitter                        │
//! ├─────────────────────────────────────────────────────────┤
//! │  1. Aging Sweep                                          │
//! │     - 从存活窗口头部回收过期粒子（遇到存活粒子即停止）     │
//! │                                                          │
//! │  2. Emission                                             │
//! │     - 按固定间隔发射，累计器保证与帧率无关                 │
//! │     - 容量已满时静默丢弃                                  │
//! │                                                          │
//! │  3. Upload + Draw                                        │
//! │     - 存活窗口按年龄顺序拆成最多两段写入 GPU 缓冲区        │
//! │     - DrawIndexed(6 * living_count)                      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 使用示例
//!
//! ```ignore
//! let mut emitter = ParticleEmitter::new(EmitterConfig::new(1000, 5.0, 100))?;
//! let mut renderer = RecordingRenderer::new(emitter.capacity());
//!
//! emitter.update(delta_time, total_time);
//! emitter.draw(&mut renderer, &camera, total_time)?;
//! ```

pub mod emitter;
pub mod gpu;
pub mod particle;


pub use emitter::{EmitterStats, ParticleEmitter};
pub use gpu::{GpuParticleResources, WgpuParticlePass};
pub use particle::{quad_indices, Particle, ParticleUniforms, INDICES_PER_PARTICLE};
