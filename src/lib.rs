//! # Particle Engine
//!
//! A CPU-managed particle emitter with a GPU upload path, built with Rust.
//!
//! ## Features
//!
//! - **Ring-buffer lifecycle**: particles live in a fixed-capacity ring, allocated once
//! - **Frame-rate independent emission**: fixed emission interval driven by an accumulator
//! - **Age-ordered upload**: the live window is packed into at most two contiguous copies
//! - **Pluggable backends**: wgpu buffers or a headless recording renderer
//! - **Scene**: camera, transforms, materials, lights and entities around the emitters
//!
//! ### Example
//!
//! ```ignore
//! use particle_engine::config::EmitterConfig;
//! use particle_engine::render::{ParticleEmitter, RecordingRenderer};
//!
//! let mut emitter = ParticleEmitter::new(EmitterConfig::new(1000, 5.0, 100))?;
//! let mut renderer = RecordingRenderer::new(emitter.capacity());
//! emitter.update(1.0 / 60.0, 1.0 / 60.0);
//! emitter.draw(&mut renderer, &camera, 1.0 / 60.0)?;
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Engine entry point and error types
//! - [`config`]: Configuration loading and validation
//! - [`render`]: Particle system, render backends, lights and materials
//! - [`scene`]: Transforms, camera, entities and the scene container

/// Core engine functionality including the headless loop and error types
pub mod core;
/// Configuration management
pub mod config;
/// Particle system and render backends
pub mod render;
/// Scene graph: transforms, camera, entities
pub mod scene;
