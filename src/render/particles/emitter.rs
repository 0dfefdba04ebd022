//! 粒子发射器
//!
//! 粒子存放在一个固定容量的环形数组中，只在构造时分配一次。
//!
//! ```text
//!   index_first_alive          index_first_dead
//!          │                          │
//!   ┌───┬──▼──┬─────┬─────┬─────┬─────▼───┬───┐
//!   │ . │ old │     │ ... │     │ new │ . │ . │
//!   └───┴─────┴─────┴─────┴─────┴─────┴───┴───┘
//!          └────── living_count ──────┘   (可能跨越数组末尾)
//! ```
//!
//! 新粒子只写入 `index_first_dead`，死亡只发生在 `index_first_alive`，
//! 因此存活窗口内没有空洞，且按发射时间单调不减排列。

use crate::config::{ConfigResult, EmitterConfig};
use crate::core::error::{RenderError, RenderResult};
use crate::render::backend::ParticleRenderer;
use crate::render::particles::particle::{Particle, ParticleUniforms, INDICES_PER_PARTICLE};
use crate::scene::{Camera, Transform};

// ============================================================================
// 统计
// ============================================================================

/// 发射器统计
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmitterStats {
    /// 总发射数
    pub total_emitted: u64,
    /// 总死亡数
    pub total_retired: u64,
    /// 因容量已满而丢弃的发射数
    pub total_dropped: u64,
    /// 本帧发射数
    pub frame_emitted: u32,
    /// 本帧死亡数
    pub frame_retired: u32,
}

impl EmitterStats {
    /// 调度器尝试发射的总次数（含被丢弃的）
    pub fn emission_attempts(&self) -> u64 {
        self.total_emitted + self.total_dropped
    }
}

// ============================================================================
// 粒子发射器
// ============================================================================

pub struct ParticleEmitter {
    config: EmitterConfig,
    particles: Box<[Particle]>,
    index_first_alive: usize,
    index_first_dead: usize,
    living_count: usize,
    seconds_per_particle: f32,
    /// 尚未用于发射的时间
    time_accumulator: f32,
    transform: Transform,
    stats: EmitterStats,
}

impl ParticleEmitter {
    /// 创建发射器，参数无效时返回 `ConfigError::ValidationError`
    pub fn new(config: EmitterConfig) -> ConfigResult<Self> {
        config.validate()?;

        let capacity = config.max_particles as usize;
        tracing::debug!(
            target: "particles",
            capacity,
            max_lifetime = config.max_lifetime,
            particles_per_second = config.particles_per_second,
            "Particle emitter created"
        );

        Ok(Self {
            particles: vec![Particle::default(); capacity].into_boxed_slice(),
            index_first_alive: 0,
            index_first_dead: 0,
            living_count: 0,
            seconds_per_particle: config.seconds_per_particle(),
            time_accumulator: 0.0,
            transform: Transform::from_position(config.start_position),
            stats: EmitterStats::default(),
            config,
        })
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn living_count(&self) -> usize {
        self.living_count
    }

    pub fn index_first_alive(&self) -> usize {
        self.index_first_alive
    }

    pub fn index_first_dead(&self) -> usize {
        self.index_first_dead
    }

    pub fn is_empty(&self) -> bool {
        self.living_count == 0
    }

    pub fn is_full(&self) -> bool {
        self.living_count == self.capacity()
    }

    pub fn time_accumulator(&self) -> f32 {
        self.time_accumulator
    }

    pub fn stats(&self) -> &EmitterStats {
        &self.stats
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// 发射器位置只在发射时读取，已发射的粒子不会跟随移动
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// 本帧绘制需要的索引数
    pub fn index_count(&self) -> u32 {
        self.living_count as u32 * INDICES_PER_PARTICLE
    }

    /// 每帧更新：先回收过期粒子，再按累计时间发射
    pub fn update(&mut self, delta_time: f32, current_time: f32) {
        self.stats.frame_retired = self.retire_expired(current_time);
        self.stats.frame_emitted = self.emit(delta_time, current_time);

        tracing::trace!(
            target: "particles",
            living = self.living_count,
            first_alive = self.index_first_alive,
            first_dead = self.index_first_dead,
            emitted = self.stats.frame_emitted,
            retired = self.stats.frame_retired,
            "Emitter updated"
        );
    }

    /// 从窗口头部回收过期粒子，遇到第一个存活粒子即停止
    fn retire_expired(&mut self, current_time: f32) -> u32 {
        let max_lifetime = self.config.max_lifetime;
        let mut retired = 0;

        while self.living_count > 0
            && self.particles[self.index_first_alive].is_expired(current_time, max_lifetime)
        {
            self.index_first_alive = (self.index_first_alive + 1) % self.capacity();
            self.living_count -= 1;
            retired += 1;
        }

        self.stats.total_retired += u64::from(retired);
        retired
    }

    /// 发射间隔固定为 `seconds_per_particle`，与帧率无关。
    ///
    /// 粒子的发射时间是它在虚拟时间轴上的时刻：累计器为 `a` 时发射的粒子
    /// 早于 `current_time` 共 `a - seconds_per_particle` 秒。帧时间超过寿命时，
    /// 虚拟年龄已达到寿命的发射不会写入窗口，计入 `total_dropped`。
    fn emit(&mut self, delta_time: f32, current_time: f32) -> u32 {
        if !delta_time.is_finite() || delta_time < 0.0 {
            tracing::warn!(target: "particles", delta_time, "Ignoring invalid frame delta");
            return 0;
        }

        self.time_accumulator += delta_time;

        let mut spawned = 0;
        while self.time_accumulator > self.seconds_per_particle {
            let spawn_time = current_time - (self.time_accumulator - self.seconds_per_particle);
            if self.spawn(spawn_time, current_time) {
                spawned += 1;
            }
            self.time_accumulator -= self.seconds_per_particle;
        }
        spawned
    }

    /// 写入一个新粒子；出生即过期或已满时静默丢弃
    fn spawn(&mut self, spawn_time: f32, current_time: f32) -> bool {
        let particle = Particle::new(self.transform.position(), spawn_time);
        if particle.is_expired(current_time, self.config.max_lifetime) {
            self.stats.total_dropped += 1;
            tracing::trace!(target: "particles", spawn_time, "Particle expired before spawn, dropped");
            return false;
        }

        if self.is_full() {
            self.stats.total_dropped += 1;
            tracing::trace!(target: "particles", spawn_time, "Emitter saturated, particle dropped");
            return false;
        }

        self.particles[self.index_first_dead] = particle;
        self.index_first_dead = (self.index_first_dead + 1) % self.capacity();
        self.living_count += 1;
        self.stats.total_emitted += 1;
        true
    }

    /// 存活粒子，从旧到新，最多两段连续切片（与 `VecDeque::as_slices` 相同）。
    ///
    /// 窗口跨越数组末尾时，第一段是 `[index_first_alive, capacity)`，
    /// 第二段是 `[0, index_first_dead)`。
    pub fn live_segments(&self) -> (&[Particle], &[Particle]) {
        if self.living_count == 0 {
            return (&[], &[]);
        }

        let end = self.index_first_alive + self.living_count;
        if end <= self.capacity() {
            (&self.particles[self.index_first_alive..end], &[])
        } else {
            (
                &self.particles[self.index_first_alive..],
                &self.particles[..end - self.capacity()],
            )
        }
    }

    /// 按从旧到新的顺序遍历存活粒子
    pub fn iter_live(&self) -> impl Iterator<Item = &Particle> + '_ {
        let (first, second) = self.live_segments();
        first.iter().chain(second.iter())
    }

    /// 把存活窗口打包成一段连续内存（会先清空 `out`）
    pub fn pack_into(&self, out: &mut Vec<Particle>) {
        let (first, second) = self.live_segments();
        out.clear();
        out.extend_from_slice(first);
        out.extend_from_slice(second);
    }

    pub fn packed(&self) -> Vec<Particle> {
        let mut out = Vec::with_capacity(self.living_count);
        self.pack_into(&mut out);
        out
    }

    /// 上传存活粒子并发出绘制调用。
    ///
    /// 两段切片依次写入后端缓冲区的 `[0, n1)` 和 `[n1, n1 + n2)`，
    /// 因此 GPU 看到的是按年龄排序的紧凑数组。没有存活粒子时不绘制。
    pub fn draw<R>(&self, renderer: &mut R, camera: &Camera, current_time: f32) -> RenderResult<()>
    where
        R: ParticleRenderer + ?Sized,
    {
        if renderer.particle_capacity() < self.capacity() {
            return Err(RenderError::BufferTooSmall {
                required: self.capacity(),
                available: renderer.particle_capacity(),
            });
        }

        if self.is_empty() {
            return Ok(());
        }

        let (first, second) = self.live_segments();
        renderer.upload_particles(0, first);
        if !second.is_empty() {
            renderer.upload_particles(first.len(), second);
        }

        let uniforms = ParticleUniforms::new(
            camera.view_matrix(),
            camera.projection_matrix(),
            self.config.color_tint,
            current_time,
            self.config.max_lifetime,
        );
        renderer.draw_particles(self.index_count(), &uniforms);
        Ok(())
    }

    /// 重置发射器
    pub fn reset(&mut self) {
        self.index_first_alive = 0;
        self.index_first_dead = 0;
        self.living_count = 0;
        self.time_accumulator = 0.0;
        self.stats = EmitterStats::default();
    }
}

// ============================================================================
// 测试
// ============================================================================
