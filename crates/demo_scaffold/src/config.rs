use anyhow::Context;
use bevy::prelude::*;
use scene_core::MotionTuning;
use serde::Deserialize;
use std::{fs, path::Path};
use xr_session::SimulatedXrConfig;

/// Workspace asset directory, shared by every demo binary and the launcher.
#[cfg(not(target_arch = "wasm32"))]
pub const ASSET_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets");
#[cfg(target_arch = "wasm32")]
pub const ASSET_ROOT: &str = "assets";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowSettings {
    pub width: f32,
    pub height: f32,
    pub title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self { width: 1280.0, height: 720.0, title: "AR Showcase".into() }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CameraSettings {
    pub position: [f32; 3],
    pub look_at: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Mouse orbit around `look_at` (non-AR demos).
    pub orbit: bool,
    /// Fraction of the remaining orbit offset closed per 60 Hz frame.
    pub damping: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, -5.0],
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            orbit: false,
            damping: 0.05,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ModelSettings {
    /// Asset path of the glTF file, relative to the asset root.
    pub path: String,
    pub scale: f32,
    pub position: [f32; 3],
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self { path: "models/fruit.gltf".into(), scale: 2.0, position: [0.0, 0.2, -1.5] }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PlacementSettings {
    /// Oldest placed object is removed past this many; `None` keeps everything.
    pub max_placed: Option<usize>,
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct DemoConfig {
    pub window: WindowSettings,
    pub camera: CameraSettings,
    pub motion: MotionTuning,
    pub xr: SimulatedXrConfig,
    pub model: ModelSettings,
    pub placement: PlacementSettings,
    pub log_filter: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            camera: Default::default(),
            motion: Default::default(),
            xr: Default::default(),
            model: Default::default(),
            placement: Default::default(),
            log_filter: "info,wgpu=error,naga=warn".into(),
        }
    }
}

/// Result of layered loading: the config plus which files contributed and what went wrong.
#[derive(Debug, Clone, Default)]
pub struct LayeredConfig {
    pub config: DemoConfig,
    pub used: Vec<String>,
    pub errors: Vec<String>,
}

impl From<DemoConfig> for LayeredConfig {
    fn from(config: DemoConfig) -> Self {
        Self { config, ..Default::default() }
    }
}

fn merge_value(base: &mut ron::Value, overlay: ron::Value) {
    use ron::Value;
    match (base, overlay) {
        (Value::Map(bm), Value::Map(om)) => {
            for (k, v) in om.into_iter() {
                let existing = bm.iter_mut().find(|(ek, _)| **ek == k).map(|(_, ev)| ev);
                match existing {
                    Some(ev) => merge_value(ev, v),
                    None => {
                        bm.insert(k, v);
                    }
                }
            }
        }
        (b, o) => *b = o,
    }
}

impl DemoConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        ron::from_str(&data).with_context(|| format!("parse RON {}", path.display()))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<anyhow::Error>) {
        match Self::load_from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Loads each file in order and merges maps recursively, so later files override only the
    /// keys they mention. Missing or broken files are reported and skipped.
    pub fn load_layered<P, I>(paths: I) -> LayeredConfig
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        let mut merged: Option<ron::Value> = None;
        let mut out = LayeredConfig::default();
        for p in paths {
            let path = p.as_ref();
            let text = match fs::read_to_string(path) {
                Ok(t) => t,
                Err(e) => {
                    out.errors.push(format!("{}: read error: {e}", path.display()));
                    continue;
                }
            };
            match ron::from_str::<ron::Value>(&text) {
                Ok(val) => {
                    match &mut merged {
                        Some(cur) => merge_value(cur, val),
                        None => merged = Some(val),
                    }
                    out.used.push(path.display().to_string());
                }
                Err(e) => out.errors.push(format!("{}: parse error: {e}", path.display())),
            }
        }
        if let Some(val) = merged {
            match val.into_rust::<DemoConfig>() {
                Ok(cfg) => out.config = cfg,
                Err(e) => out.errors.push(format!("failed to deserialize merged config; using defaults: {e}")),
            }
        }
        out
    }

    /// `<assets>/config/<demo>.ron` then `<assets>/config/<demo>.local.ron`.
    pub fn layer_paths(demo: &str) -> [String; 2] {
        [
            format!("{ASSET_ROOT}/config/{demo}.ron"),
            format!("{ASSET_ROOT}/config/{demo}.local.ron"),
        ]
    }

    /// Non-fatal problems worth a warning at startup.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if !(1.0..=179.0).contains(&self.camera.fov_degrees) {
            w.push(format!("camera.fov_degrees {} outside 1..179", self.camera.fov_degrees));
        }
        if self.camera.near <= 0.0 || self.camera.far <= self.camera.near {
            w.push(format!("camera near/far invalid ({} / {})", self.camera.near, self.camera.far));
        }
        if !(0.0..=1.0).contains(&self.camera.damping) {
            w.push(format!("camera.damping {} outside 0..1", self.camera.damping));
        }
        if self.motion.pulse_amplitude < 0.0 || self.motion.placed_pulse_amplitude < 0.0 {
            w.push("motion pulse amplitudes must be >= 0".into());
        }
        if self.motion.pulse_period_ms <= 0.0 || self.motion.jump_period_ms <= 0.0 {
            w.push("motion periods must be > 0".into());
        }
        if self.motion.fast_step < self.motion.normal_step {
            w.push(format!(
                "motion.fast_step {} slower than normal_step {}",
                self.motion.fast_step, self.motion.normal_step
            ));
        }
        if self.xr.planes.is_empty() {
            w.push("xr.planes is empty; hit tests will never find a surface".into());
        }
        if self.xr.max_distance <= 0.0 {
            w.push(format!("xr.max_distance {} must be > 0", self.xr.max_distance));
        }
        if self.model.path.trim().is_empty() {
            w.push("model.path is empty".into());
        }
        if self.model.scale <= 0.0 {
            w.push(format!("model.scale {} must be > 0", self.model.scale));
        }
        if self.placement.max_placed == Some(0) {
            w.push("placement.max_placed 0 treated as unbounded".into());
        }
        w
    }
}
