//! The simulation driver: owns the field, the particles, and the noise clock.
//!
//! One [`Simulation::tick`] advances noise time, recomputes every field
//! cell, then moves and wraps every particle in order. The driver is
//! single-threaded and has no timers; the caller decides when ticks happen.

use crate::config::{ColorConfig, FlowConfig};
use crate::engine::Engine;
use crate::error::EngineError;
use crate::field::FlowField;
use crate::noise_source::{NoiseKind, NoiseSource};
use crate::particle::Particle;
use crate::prng::Xorshift64;
use crate::render::{FrameStyle, RenderSink};
use crate::seed::Seed;
use serde_json::{Map, Value};

/// Flow-field particle simulation over a `width x height` surface.
pub struct Simulation {
    width: usize,
    height: usize,
    cell_size: usize,
    config: FlowConfig,
    color: ColorConfig,
    noise: Box<dyn NoiseSource>,
    rng: Xorshift64,
    field: FlowField,
    particles: Vec<Particle>,
    noise_z: f64,
    ticks: u64,
}

impl Simulation {
    /// Builds a simulation and performs the initial reset: the noise source
    /// is reseeded from `seed` and particles are spawned.
    ///
    /// Returns `EngineError::InvalidCellSize` for a zero cell size and
    /// `EngineError::InvalidDimensions` if the grid would overflow.
    pub fn new(
        width: usize,
        height: usize,
        cell_size: usize,
        seed: u64,
        noise: Box<dyn NoiseSource>,
    ) -> Result<Self, EngineError> {
        let field = FlowField::new(width, height, cell_size)?;
        let mut sim = Self {
            width,
            height,
            cell_size,
            config: FlowConfig::default(),
            color: ColorConfig::default(),
            noise,
            rng: Xorshift64::new(seed),
            field,
            particles: Vec::new(),
            noise_z: 0.0,
            ticks: 0,
        };
        sim.reset();
        Ok(sim)
    }

    /// Builds a simulation from a replay description. Ticks are not run;
    /// the caller drives `seed.ticks` frames itself.
    pub fn from_seed(seed: &Seed) -> Result<Self, EngineError> {
        seed.validate()?;
        let kind = NoiseKind::from_name(&seed.noise)?;
        let mut sim = Self::new(
            seed.width,
            seed.height,
            seed.cell_size,
            seed.seed,
            kind.build(0),
        )?;
        sim.config = FlowConfig::from_json(&seed.params);
        sim.color = ColorConfig::from_json(&seed.color);
        Ok(sim)
    }

    /// Sets the dials read by subsequent ticks.
    pub fn with_config(mut self, config: FlowConfig) -> Self {
        self.set_config(config);
        self
    }

    pub fn with_color(mut self, color: ColorConfig) -> Self {
        self.set_color_config(color);
        self
    }

    /// Restarts from fresh random state on the current surface.
    ///
    /// Reseeds the noise source, zeroes the field and respawns particles.
    /// Noise time keeps running, so the frame hue does not jump.
    pub fn reset(&mut self) {
        self.noise.reseed(self.rng.next_u32());
        self.field.clear();
        let (w, h) = (self.width as f64, self.height as f64);
        let count = Particle::count_for_surface(self.width, self.height);
        let rng = &mut self.rng;
        self.particles = (0..count).map(|_| Particle::spawn(rng, w, h)).collect();
        log::debug!(
            "reset {}x{} surface: {}x{} field, {} particles",
            self.width,
            self.height,
            self.field.columns(),
            self.field.rows(),
            self.particles.len()
        );
    }

    /// Adopts a new surface size and resets.
    ///
    /// On error the simulation is left unchanged.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), EngineError> {
        let field = FlowField::new(width, height, self.cell_size)?;
        self.width = width;
        self.height = height;
        self.field = field;
        self.reset();
        Ok(())
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self) {
        let config = self.config;
        self.noise_z += config.time_step();
        self.field
            .recompute(self.noise_z, self.noise.as_ref(), &config);

        let (w, h) = (self.width as f64, self.height as f64);
        let max_speed = config.max_speed();
        for particle in &mut self.particles {
            let force = self
                .field
                .sample_at(particle.position.x, particle.position.y);
            particle.move_by(force, max_speed);
            particle.wrap(w, h);
        }
        self.ticks += 1;
        log::trace!("tick {} at noise time {}", self.ticks, self.noise_z);
    }

    /// Clear alpha, particle color and draw mode for the next frame.
    pub fn frame_style(&self) -> FrameStyle {
        FrameStyle {
            color: self.color.frame_color(self.noise_z),
            clear_alpha: self.config.clear_alpha,
            line_mode: self.config.line_mode,
        }
    }

    /// Draws the current particle states: a translucent clear, the frame
    /// color, then one trail segment (or square) per particle.
    pub fn render(&self, sink: &mut dyn RenderSink) {
        let style = self.frame_style();
        sink.clear(style.clear_alpha);
        sink.set_color(style.color);
        for p in &self.particles {
            if style.line_mode {
                sink.line(p.previous, p.position);
            } else {
                sink.point(p.position, p.size);
            }
        }
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    /// Replaces the dials. Takes effect at the next tick.
    pub fn set_config(&mut self, config: FlowConfig) {
        self.config = config.clamped();
    }

    pub fn color_config(&self) -> &ColorConfig {
        &self.color
    }

    pub fn set_color_config(&mut self, color: ColorConfig) {
        self.color = color.clamped();
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> usize {
        self.cell_size
    }

    pub fn field(&self) -> &FlowField {
        &self.field
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Noise time: the third noise coordinate.
    pub fn noise_z(&self) -> f64 {
        self.noise_z
    }

    /// Ticks run since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

fn merge_objects(a: Value, b: Value) -> Value {
    let mut merged = Map::new();
    for value in [a, b] {
        if let Value::Object(map) = value {
            merged.extend(map);
        }
    }
    Value::Object(merged)
}

impl Engine for Simulation {
    fn step(&mut self) -> Result<(), EngineError> {
        self.tick();
        Ok(())
    }

    fn reset(&mut self) {
        Simulation::reset(self);
    }

    fn params(&self) -> Value {
        merge_objects(self.config.to_json(), self.color.to_json())
    }

    fn set_params(&mut self, params: &Value) -> Result<(), EngineError> {
        if !params.is_object() {
            return Err(EngineError::InvalidParams(format!(
                "expected a JSON object, got {params}"
            )));
        }
        self.config = self.config.with_json(params);
        self.color = self.color.with_json(params);
        Ok(())
    }

    fn param_schema(&self) -> Value {
        merge_objects(FlowConfig::schema(), ColorConfig::schema())
    }
}
