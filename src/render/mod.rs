pub mod backend;
pub mod lights;
pub mod material;
pub mod particles;

pub use backend::{ParticleRenderer, RecordedDraw, RecordingRenderer};
pub use lights::{generate_lights, Light, LightKind, MAX_LIGHTS};
pub use material::{Material, MaterialConstants, TextureHandle, MAX_TEXTURE_SLOTS};

// Re-export particle system components
pub use particles::{
    EmitterStats, GpuParticleResources, Particle, ParticleEmitter, ParticleUniforms,
    WgpuParticlePass,
};
