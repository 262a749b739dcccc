//! Transient visual effects as plain state records.
//!
//! Every record stores its spawn time and lifetime; rendering reads an
//! [`EffectFrame`] per record for the current unscaled time. Sprites are drawn
//! by the host from [`ShapeKind`] and [`Color`].

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

pub const NUMBER_LIFETIME: f32 = 0.8;
/// Units per second a floating number rises
pub const NUMBER_RISE_SPEED: f32 = 1.5;
pub const HIT_FLASH_LIFETIME: f32 = 0.1;
pub const TEXT_POPUP_LIFETIME: f32 = 1.2;
pub const PARTICLE_GRAVITY: f32 = -9.8;

const PARTICLE_SPEED: (f32, f32) = (2.0, 5.0);
const PARTICLE_LIFETIME: (f32, f32) = (0.4, 0.8);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb(1.0, 0.2, 0.2);
    pub const GREEN: Color = Color::rgb(0.3, 1.0, 0.3);
    pub const YELLOW: Color = Color::rgb(1.0, 0.9, 0.2);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Circle,
    Square,
    Diamond,
    Spark,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EffectKind {
    DamageNumber { amount: u32 },
    HealNumber { amount: u32 },
    HitFlash { color: Color },
    ScreenShake { magnitude: f32 },
    Particle { shape: ShapeKind, color: Color },
    TextPopup { text: String, color: Color },
}

#[derive(Debug, Clone)]
struct ActiveEffect {
    kind: EffectKind,
    origin: Vec2,
    velocity: Vec2,
    started_at: f64,
    lifetime: f32,
}

impl ActiveEffect {
    fn elapsed(&self, now: f64) -> f32 {
        (now - self.started_at).max(0.0) as f32
    }

    fn progress(&self, now: f64) -> f32 {
        (self.elapsed(now) / self.lifetime).clamp(0.0, 1.0)
    }

    fn is_expired(&self, now: f64) -> bool {
        self.elapsed(now) >= self.lifetime
    }
}

/// What to draw for one live effect.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectFrame<'a> {
    pub kind: &'a EffectKind,
    pub position: Vec2,
    pub alpha: f32,
    pub scale: f32,
}

/// Live effect records advanced on unscaled time.
pub struct ActiveEffects {
    effects: Vec<ActiveEffect>,
    rng: fastrand::Rng,
}

impl ActiveEffects {
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(fastrand::Rng::with_seed(seed))
    }

    fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            effects: Vec::new(),
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    fn spawn(&mut self, now: f64, kind: EffectKind, origin: Vec2, velocity: Vec2, lifetime: f32) {
        self.effects.push(ActiveEffect {
            kind,
            origin,
            velocity,
            started_at: now,
            lifetime: lifetime.max(f32::EPSILON),
        });
    }

    pub fn damage_number(&mut self, now: f64, position: Vec2, amount: u32) {
        self.spawn(
            now,
            EffectKind::DamageNumber { amount },
            position,
            Vec2::Y * NUMBER_RISE_SPEED,
            NUMBER_LIFETIME,
        );
    }

    pub fn heal_number(&mut self, now: f64, position: Vec2, amount: u32) {
        self.spawn(
            now,
            EffectKind::HealNumber { amount },
            position,
            Vec2::Y * NUMBER_RISE_SPEED,
            NUMBER_LIFETIME,
        );
    }

    pub fn hit_flash(&mut self, now: f64, position: Vec2, color: Color) {
        self.spawn(
            now,
            EffectKind::HitFlash { color },
            position,
            Vec2::ZERO,
            HIT_FLASH_LIFETIME,
        );
    }

    pub fn screen_shake(&mut self, now: f64, magnitude: f32, duration: f32) {
        let magnitude = if magnitude.is_finite() { magnitude.max(0.0) } else { 0.0 };
        self.spawn(
            now,
            EffectKind::ScreenShake { magnitude },
            Vec2::ZERO,
            Vec2::ZERO,
            duration,
        );
    }

    /// Spawns `count` particles flying out of `origin` in random directions.
    pub fn particle_burst(
        &mut self,
        now: f64,
        origin: Vec2,
        count: usize,
        shape: ShapeKind,
        color: Color,
    ) {
        for _ in 0..count {
            let angle = self.rng.f32() * TAU;
            let speed = lerp_range(PARTICLE_SPEED, self.rng.f32());
            let lifetime = lerp_range(PARTICLE_LIFETIME, self.rng.f32());
            self.spawn(
                now,
                EffectKind::Particle { shape, color },
                origin,
                Vec2::from_angle(angle) * speed,
                lifetime,
            );
        }
    }

    pub fn text_popup(&mut self, now: f64, position: Vec2, text: impl Into<String>, color: Color) {
        self.spawn(
            now,
            EffectKind::TextPopup {
                text: text.into(),
                color,
            },
            position,
            Vec2::Y * NUMBER_RISE_SPEED * 0.5,
            TEXT_POPUP_LIFETIME,
        );
    }

    /// Drops finished records and returns how many expired.
    pub fn update(&mut self, now: f64) -> usize {
        let before = self.effects.len();
        self.effects.retain(|effect| !effect.is_expired(now));
        let expired = before - self.effects.len();
        if expired > 0 {
            tracing::trace!(expired, live = self.effects.len(), "effects expired");
        }
        expired
    }

    /// Render state of every live record except screen shakes.
    pub fn frames(&self, now: f64) -> Vec<EffectFrame<'_>> {
        self.effects
            .iter()
            .filter(|effect| !effect.is_expired(now))
            .filter_map(|effect| frame(effect, now))
            .collect()
    }

    /// Camera offset from every live shake, each decaying linearly to zero.
    pub fn shake_offset(&self, now: f64) -> Vec2 {
        let magnitude: f32 = self
            .effects
            .iter()
            .filter_map(|effect| match effect.kind {
                EffectKind::ScreenShake { magnitude } if !effect.is_expired(now) => {
                    Some(magnitude * (1.0 - effect.progress(now)))
                }
                _ => None,
            })
            .sum();

        if magnitude <= 0.0 {
            return Vec2::ZERO;
        }
        // direction spins fast enough to read as jitter
        Vec2::from_angle(now as f32 * 47.0) * magnitude
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }
}

impl Default for ActiveEffects {
    fn default() -> Self {
        Self::new()
    }
}

fn lerp_range((low, high): (f32, f32), t: f32) -> f32 {
    low + (high - low) * t
}

fn frame(effect: &ActiveEffect, now: f64) -> Option<EffectFrame<'_>> {
    let elapsed = effect.elapsed(now);
    let progress = effect.progress(now);

    let (position, alpha, scale) = match &effect.kind {
        EffectKind::ScreenShake { .. } => return None,
        EffectKind::DamageNumber { .. } | EffectKind::HealNumber { .. } => {
            // pops in slightly oversized
            let scale = if progress < 0.2 { 1.2 - progress } else { 1.0 };
            (effect.origin + effect.velocity * elapsed, 1.0 - progress, scale)
        }
        EffectKind::HitFlash { .. } => (effect.origin, 1.0 - progress, 1.0),
        EffectKind::Particle { .. } => {
            let fall = Vec2::Y * 0.5 * PARTICLE_GRAVITY * elapsed * elapsed;
            (
                effect.origin + effect.velocity * elapsed + fall,
                1.0 - progress,
                1.0 - 0.5 * progress,
            )
        }
        EffectKind::TextPopup { .. } => {
            let alpha = if progress < 0.7 {
                1.0
            } else {
                (1.0 - progress) / 0.3
            };
            (effect.origin + effect.velocity * elapsed, alpha, 1.0)
        }
    };

    Some(EffectFrame {
        kind: &effect.kind,
        position,
        alpha: alpha.clamp(0.0, 1.0),
        scale,
    })
}
