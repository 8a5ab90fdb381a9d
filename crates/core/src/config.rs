//! Simulation and color configuration.
//!
//! [`FlowConfig`] holds the dials the simulation reads at the start of each
//! tick; [`ColorConfig`] holds the dials behind the per-frame particle
//! color. Both are plain values: the control panel builds a new one and
//! hands it to the driver between ticks.

use crate::color::Hsla;
use crate::params::{clamp_param, param_bool, param_f64};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const DEFAULT_LINE_MODE: bool = true;
const DEFAULT_ANGLE_ZOOM: f64 = 9.0;
const DEFAULT_NOISE_SPEED: f64 = 18.0;
const DEFAULT_PARTICLE_SPEED: f64 = 80.0;
const DEFAULT_FIELD_FORCE: f64 = 10.0;
const DEFAULT_CLEAR_ALPHA: f64 = 0.0;

/// Range shared by the four 1–100 dials.
const DIAL_MIN: f64 = 1.0;
const DIAL_MAX: f64 = 100.0;
const CLEAR_ALPHA_MAX: f64 = 0.1;

/// Maps the particle speed dial to surface units per tick.
const SPEED_SCALE: f64 = 50.0;
/// Maps the noise speed dial to noise time per tick.
const NOISE_TIME_SCALE: f64 = 10_000.0;

const DEFAULT_PARTICLE_OPACITY: f64 = 100.0;
const DEFAULT_BASE_HUE: f64 = 120.0;
const DEFAULT_HUE_RANGE: f64 = 180.0;
const DEFAULT_COLOR_SATURATION: f64 = 100.0;

/// Particle color lightness, in percent.
const LIGHTNESS: f64 = 50.0;
/// Maps the opacity dial (1–100) to an alpha of at most 0.2.
const OPACITY_SCALE: f64 = 500.0;

/// Simulation dials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Draw trails as lines from the previous position (render only).
    pub line_mode: bool,
    /// Spatial frequency divisor of the direction noise (1–100).
    pub angle_zoom: f64,
    /// Noise time advance per tick, in 1/10000 units (1–100).
    pub noise_speed: f64,
    /// Particle speed cap, in 1/50 surface units per tick (1–100).
    pub particle_speed: f64,
    /// Field vector magnitude scale, in 1/20 units (1–100).
    pub field_force: f64,
    /// Background fade per frame (0–0.1, render only).
    pub clear_alpha: f64,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            line_mode: DEFAULT_LINE_MODE,
            angle_zoom: DEFAULT_ANGLE_ZOOM,
            noise_speed: DEFAULT_NOISE_SPEED,
            particle_speed: DEFAULT_PARTICLE_SPEED,
            field_force: DEFAULT_FIELD_FORCE,
            clear_alpha: DEFAULT_CLEAR_ALPHA,
        }
    }
}

impl FlowConfig {
    /// Reads a config from JSON, falling back to defaults for missing keys,
    /// then clamps every dial into its declared range.
    pub fn from_json(params: &Value) -> Self {
        Self::default().with_json(params)
    }

    /// Applies a partial update: keys present in `params` replace the
    /// current values, everything else is kept. The result is clamped.
    pub fn with_json(&self, params: &Value) -> Self {
        Self {
            line_mode: param_bool(params, "line_mode", self.line_mode),
            angle_zoom: param_f64(params, "angle_zoom", self.angle_zoom),
            noise_speed: param_f64(params, "noise_speed", self.noise_speed),
            particle_speed: param_f64(params, "particle_speed", self.particle_speed),
            field_force: param_f64(params, "field_force", self.field_force),
            clear_alpha: param_f64(params, "clear_alpha", self.clear_alpha),
        }
        .clamped()
    }

    /// Returns a copy with every dial pulled into its declared range.
    pub fn clamped(self) -> Self {
        Self {
            line_mode: self.line_mode,
            angle_zoom: clamp_param(
                "angle_zoom",
                self.angle_zoom,
                DIAL_MIN,
                DIAL_MAX,
                DEFAULT_ANGLE_ZOOM,
            ),
            noise_speed: clamp_param(
                "noise_speed",
                self.noise_speed,
                DIAL_MIN,
                DIAL_MAX,
                DEFAULT_NOISE_SPEED,
            ),
            particle_speed: clamp_param(
                "particle_speed",
                self.particle_speed,
                DIAL_MIN,
                DIAL_MAX,
                DEFAULT_PARTICLE_SPEED,
            ),
            field_force: clamp_param(
                "field_force",
                self.field_force,
                DIAL_MIN,
                DIAL_MAX,
                DEFAULT_FIELD_FORCE,
            ),
            clear_alpha: clamp_param(
                "clear_alpha",
                self.clear_alpha,
                0.0,
                CLEAR_ALPHA_MAX,
                DEFAULT_CLEAR_ALPHA,
            ),
        }
    }

    /// Largest particle speed, in surface units per tick.
    pub fn max_speed(&self) -> f64 {
        self.particle_speed / SPEED_SCALE
    }

    /// Noise time added per tick.
    pub fn time_step(&self) -> f64 {
        self.noise_speed / NOISE_TIME_SCALE
    }

    pub fn to_json(&self) -> Value {
        json!({
            "line_mode": self.line_mode,
            "angle_zoom": self.angle_zoom,
            "noise_speed": self.noise_speed,
            "particle_speed": self.particle_speed,
            "field_force": self.field_force,
            "clear_alpha": self.clear_alpha,
        })
    }

    /// Schema describing every dial: type, default, range, description.
    pub fn schema() -> Value {
        json!({
            "line_mode": {
                "type": "boolean",
                "default": DEFAULT_LINE_MODE,
                "description": "Draw trails as lines instead of points"
            },
            "angle_zoom": {
                "type": "number",
                "default": DEFAULT_ANGLE_ZOOM,
                "min": DIAL_MIN,
                "max": DIAL_MAX,
                "description": "Spatial frequency divisor of field direction noise"
            },
            "noise_speed": {
                "type": "number",
                "default": DEFAULT_NOISE_SPEED,
                "min": DIAL_MIN,
                "max": DIAL_MAX,
                "description": "Rate at which the field evolves"
            },
            "particle_speed": {
                "type": "number",
                "default": DEFAULT_PARTICLE_SPEED,
                "min": DIAL_MIN,
                "max": DIAL_MAX,
                "description": "Particle speed cap"
            },
            "field_force": {
                "type": "number",
                "default": DEFAULT_FIELD_FORCE,
                "min": DIAL_MIN,
                "max": DIAL_MAX,
                "description": "Strength of field vectors"
            },
            "clear_alpha": {
                "type": "number",
                "default": DEFAULT_CLEAR_ALPHA,
                "min": 0.0,
                "max": CLEAR_ALPHA_MAX,
                "description": "Background fade per frame"
            }
        })
    }
}

/// Particle color dials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// 1–100, mapped to alpha `opacity / 500`.
    pub particle_opacity: f64,
    /// Hue at noise time 0, in degrees (0–360).
    pub base_hue: f64,
    /// Amplitude of the hue swing, in degrees (0–360).
    pub hue_range: f64,
    /// Saturation percent (0–100).
    pub color_saturation: f64,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            particle_opacity: DEFAULT_PARTICLE_OPACITY,
            base_hue: DEFAULT_BASE_HUE,
            hue_range: DEFAULT_HUE_RANGE,
            color_saturation: DEFAULT_COLOR_SATURATION,
        }
    }
}

impl ColorConfig {
    pub fn from_json(params: &Value) -> Self {
        Self::default().with_json(params)
    }

    /// Partial update, as [`FlowConfig::with_json`].
    pub fn with_json(&self, params: &Value) -> Self {
        Self {
            particle_opacity: param_f64(params, "particle_opacity", self.particle_opacity),
            base_hue: param_f64(params, "base_hue", self.base_hue),
            hue_range: param_f64(params, "hue_range", self.hue_range),
            color_saturation: param_f64(params, "color_saturation", self.color_saturation),
        }
        .clamped()
    }

    pub fn clamped(self) -> Self {
        Self {
            particle_opacity: clamp_param(
                "particle_opacity",
                self.particle_opacity,
                1.0,
                100.0,
                DEFAULT_PARTICLE_OPACITY,
            ),
            base_hue: clamp_param("base_hue", self.base_hue, 0.0, 360.0, DEFAULT_BASE_HUE),
            hue_range: clamp_param("hue_range", self.hue_range, 0.0, 360.0, DEFAULT_HUE_RANGE),
            color_saturation: clamp_param(
                "color_saturation",
                self.color_saturation,
                0.0,
                100.0,
                DEFAULT_COLOR_SATURATION,
            ),
        }
    }

    /// Particle color for a frame at noise time `noise_z`.
    ///
    /// Hue swings sinusoidally with the field's own clock, so the palette
    /// drifts at the same rate the field evolves.
    pub fn frame_color(&self, noise_z: f64) -> Hsla {
        Hsla {
            h: noise_z.sin() * self.hue_range + self.base_hue,
            s: self.color_saturation / 100.0,
            l: LIGHTNESS / 100.0,
            a: self.particle_opacity / OPACITY_SCALE,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "particle_opacity": self.particle_opacity,
            "base_hue": self.base_hue,
            "hue_range": self.hue_range,
            "color_saturation": self.color_saturation,
        })
    }

    pub fn schema() -> Value {
        json!({
            "particle_opacity": {
                "type": "number",
                "default": DEFAULT_PARTICLE_OPACITY,
                "min": 1.0,
                "max": 100.0,
                "description": "Particle opacity"
            },
            "base_hue": {
                "type": "number",
                "default": DEFAULT_BASE_HUE,
                "min": 0.0,
                "max": 360.0,
                "description": "Base hue in degrees"
            },
            "hue_range": {
                "type": "number",
                "default": DEFAULT_HUE_RANGE,
                "min": 0.0,
                "max": 360.0,
                "description": "Hue swing around the base hue"
            },
            "color_saturation": {
                "type": "number",
                "default": DEFAULT_COLOR_SATURATION,
                "min": 0.0,
                "max": 100.0,
                "description": "Saturation percent"
            }
        })
    }
}
