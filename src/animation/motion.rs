//! Particle modes: tilt gravity, shake burst and audio rain.

use palette::Srgb;
use rand::{
    Rng as _,
    rngs::SmallRng,
};

use crate::{
    animation::Input,
    color::{
        self,
        BLACK,
        column_hue,
        hsv,
    },
    frame::Frame,
    gravity::Tilt,
    pool::{
        Lifetime,
        Pool,
    },
};

/// Particle pool capacity shared by every particle mode.
pub const MAX_PARTICLES: usize = 40;

const SPAWN_INTERVAL_MS: u32 = 100;
const TILT_ACCEL: f32 = 0.3 * 10.0;
const RESTITUTION: f32 = 0.7;
const FRICTION: f32 = 0.98;

/// Summed roll and pitch change, in degrees per frame, that counts as a shake.
const SHAKE_THRESHOLD: f32 = 30.0;
const SHAKE_DURATION_MS: u32 = 2000;
const SHAKE_FADE: u8 = 5;

const RAIN_FADE: u8 = 10;
const RAIN_MIN_VOLUME: u8 = 50;

#[derive(Debug, Clone, Copy)]
struct Spark {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    life: u8,
    color: Srgb<u8>,
}

impl Spark {
    const fn at(x: f32, y: f32, color: Srgb<u8>) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            life: u8::MAX,
            color,
        }
    }

    fn advance(&mut self, dt: f32) {
        self.x += self.vx * dt;
        self.y += self.vy * dt;
    }

    fn pixel(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

impl Default for Spark {
    fn default() -> Self {
        Self {
            life: 0,
            ..Self::at(0.0, 0.0, BLACK)
        }
    }
}

impl Lifetime for Spark {
    fn is_alive(&self) -> bool {
        self.life > 0
    }
}

/// Keep `pos` inside `0..=max`, reflecting and damping `vel` on contact.
fn bounce(pos: &mut f32, vel: &mut f32, max: f32) {
    if *pos < 0.0 {
        *pos = 0.0;
        *vel = -*vel * RESTITUTION;
    }
    if *pos > max {
        *pos = max;
        *vel = -*vel * RESTITUTION;
    }
}

/// Particles dropped in at the top that roll around with the tilt.
pub struct GravityField {
    sparks: Pool<Spark, MAX_PARTICLES>,
    spawn_ms: u32,
}

impl GravityField {
    pub fn new() -> Self {
        Self {
            sparks: Pool::new(),
            spawn_ms: 0,
        }
    }

    pub fn live(&self) -> usize {
        self.sparks.live_count()
    }

    pub fn render(&mut self, frame: &mut Frame, input: &Input<'_>, rng: &mut SmallRng) {
        frame.clear();
        let (w, h) = (frame.width(), frame.height());

        self.spawn_ms = self.spawn_ms.saturating_add(input.dt_ms);
        if self.spawn_ms > SPAWN_INTERVAL_MS {
            self.spawn_ms = 0;
            let x = rng.gen_range(0..w) as f32;
            let color = hsv(rng.gen_range(0..255), 255, 40);
            self.sparks.spawn(Spark::at(x, 0.0, color));
        }

        let dt = input.dt_secs();
        let ax = input.tilt.roll * TILT_ACCEL * dt;
        let ay = input.tilt.pitch * TILT_ACCEL * dt;
        for spark in self.sparks.iter_mut() {
            spark.vx += ax;
            spark.vy += ay;
            spark.advance(dt);
            bounce(&mut spark.x, &mut spark.vx, (w - 1) as f32);
            bounce(&mut spark.y, &mut spark.vy, (h - 1) as f32);
            spark.vx *= FRICTION;
            spark.vy *= FRICTION;

            let (x, y) = spark.pixel();
            frame.set(x, y, spark.color);
        }
    }
}

/// A radial firework from the center whenever the board is jerked.
pub struct ShakeBurst {
    sparks: Pool<Spark, MAX_PARTICLES>,
    prev_tilt: Option<Tilt>,
    active_ms: Option<u32>,
}

impl ShakeBurst {
    pub fn new() -> Self {
        Self {
            sparks: Pool::new(),
            prev_tilt: None,
            active_ms: None,
        }
    }

    pub fn live(&self) -> usize {
        self.sparks.live_count()
    }

    pub const fn is_active(&self) -> bool {
        self.active_ms.is_some()
    }

    fn burst(&mut self, frame: &Frame, rng: &mut SmallRng) {
        let cx = frame.width() as f32 / 2.0;
        let cy = frame.height() as f32 / 2.0;
        self.sparks.clear();
        for i in 0..MAX_PARTICLES {
            let angle = i as f32 * core::f32::consts::TAU / MAX_PARTICLES as f32;
            let speed = 5.0 + rng.gen_range(0..50) as f32 / 10.0;
            let hue = (i * 255 / MAX_PARTICLES) as u8;
            if let Some(spark) = self.sparks.spawn(Spark::at(cx, cy, hsv(hue, 255, 50))) {
                spark.vx = libm::cosf(angle) * speed;
                spark.vy = libm::sinf(angle) * speed;
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame, input: &Input<'_>, rng: &mut SmallRng) {
        let delta = self.prev_tilt.map(|prev| input.tilt.delta(&prev));
        self.prev_tilt = Some(input.tilt);

        if let Some(delta) = delta.filter(|&d| d > SHAKE_THRESHOLD) {
            debug!("shake detected, tilt moved {} deg", delta);
            self.burst(frame, rng);
            self.active_ms = Some(0);
        }

        if let Some(elapsed) = self.active_ms {
            let elapsed = elapsed.saturating_add(input.dt_ms);
            if elapsed > SHAKE_DURATION_MS {
                self.active_ms = None;
                self.sparks.clear();
            } else {
                self.active_ms = Some(elapsed);
            }
        }

        frame.clear();
        if !self.is_active() {
            return;
        }

        let dt = input.dt_secs();
        for spark in self.sparks.iter_mut() {
            spark.advance(dt);
            if spark.life > SHAKE_FADE {
                spark.life -= SHAKE_FADE;
            }
            let (x, y) = spark.pixel();
            frame.set(x, y, color::scale(spark.color, spark.life));
        }
    }
}

/// Drops spawned by loud audio that fall and leave fading trails.
pub struct Rain {
    drops: Pool<Spark, MAX_PARTICLES>,
    fresh: bool,
}

impl Rain {
    pub fn new() -> Self {
        Self {
            drops: Pool::new(),
            fresh: true,
        }
    }

    pub fn live(&self) -> usize {
        self.drops.live_count()
    }

    pub fn render(&mut self, frame: &mut Frame, input: &Input<'_>, rng: &mut SmallRng) {
        // The frame still holds whatever the previous mode drew.
        if self.fresh {
            frame.clear();
            self.fresh = false;
        } else {
            frame.fade(RAIN_FADE);
        }

        let (w, h) = (frame.width(), frame.height());
        let dt = input.dt_secs();
        for droplet in self.drops.iter_mut() {
            droplet.advance(dt);
            let (x, y) = droplet.pixel();
            if y >= h as i32 {
                droplet.life = 0;
                continue;
            }
            frame.set(x, y, droplet.color);
        }

        let volume = input.audio.volume;
        if volume > RAIN_MIN_VOLUME && rng.gen_ratio(1, 3) {
            let x = rng.gen_range(0..w);
            let color = hsv(column_hue(x, w), 255, volume.min(color::BRIGHTNESS_CAP));
            if let Some(droplet) = self.drops.spawn(Spark::at(x as f32, 0.0, color)) {
                droplet.vy = 8.0 + f32::from(volume / 32);
                frame.set(x as i32, 0, color);
            }
        }
    }
}
