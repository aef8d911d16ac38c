use bevy::prelude::*;
use scene_core::{Axis, ModelMaterial, MotionParams, MotionTuning, SurfacePreset};
use std::fmt;
use std::str::FromStr;
use ui_binder::{hex_label, ApplyContext, ApplyResult, ControlEvent, ControlId, ControlSpec, ControlState, ControlValue};

use crate::LOG_TARGET;

pub const ROTATION: ControlId = ControlId("rotation");
pub const AXIS: ControlId = ControlId("axis");
pub const MATERIAL: ControlId = ControlId("material");
pub const SCENE_LIGHT: ControlId = ControlId("scene_light");
pub const MODEL_LIGHT: ControlId = ControlId("model_light");
pub const LIGHT_KIND: ControlId = ControlId("model_light_type");
pub const LIGHT_INTENSITY: ControlId = ControlId("model_light_intensity");
pub const LIGHT_COLOR: ControlId = ControlId("model_light_color");

pub const MAX_LIGHT_INTENSITY: f32 = 5.0;

const AXIS_OPTIONS: &[&str] = &["x", "y", "z"];
const MATERIAL_OPTIONS: &[&str] = &["original", "alternative"];
const KIND_OPTIONS: &[&str] = &["point", "spot", "directional"];
const LIGHT_PALETTE: &[&str] = &["#ffffff", "#ffcc00", "#ff6600", "#ff0000", "#00ff00", "#0088ff"];

/// Kind of the light attached to the model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LightKind {
    #[default]
    Point,
    Spot,
    Directional,
}

impl LightKind {
    pub fn label(self) -> &'static str {
        match self {
            LightKind::Point => "point",
            LightKind::Spot => "spot",
            LightKind::Directional => "directional",
        }
    }
}

impl fmt::Display for LightKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LightKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "point" => Ok(LightKind::Point),
            "spot" => Ok(LightKind::Spot),
            "directional" => Ok(LightKind::Directional),
            other => Err(format!("unknown light type '{other}'")),
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewerState {
    pub rotation: bool,
    pub axis: Axis,
    pub material: ModelMaterial,
    pub scene_light: bool,
    pub model_light: bool,
    pub model_light_kind: LightKind,
    pub light_intensity: f32,
    pub light_color: Srgba,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            rotation: true,
            axis: Axis::Y,
            material: ModelMaterial::Original,
            scene_light: true,
            model_light: false,
            model_light_kind: LightKind::Point,
            light_intensity: 1.0,
            light_color: Srgba::WHITE,
        }
    }
}

impl ViewerState {
    /// The model always turns at the normal tier; the axis select overrides the model's own axis.
    pub fn motion_params(&self, tuning: &MotionTuning) -> MotionParams {
        MotionParams {
            spin_step: self.rotation.then_some(tuning.normal_step),
            axis: Some(self.axis),
            pulse: None,
            jump: None,
        }
    }
}

fn material_from_option(option: &str) -> Option<ModelMaterial> {
    match option.parse::<ModelMaterial>() {
        Ok(m @ (ModelMaterial::Original | ModelMaterial::Preset(SurfacePreset::Alternative))) => Some(m),
        _ => None,
    }
}

impl ControlState for ViewerState {
    fn controls() -> Vec<ControlSpec> {
        vec![
            ControlSpec::toggle(ROTATION.0).with_key(KeyCode::KeyR),
            ControlSpec::choice(AXIS.0, AXIS_OPTIONS).with_key(KeyCode::KeyA),
            ControlSpec::choice(MATERIAL.0, MATERIAL_OPTIONS).with_key(KeyCode::KeyM),
            ControlSpec::toggle(SCENE_LIGHT.0).with_key(KeyCode::KeyL),
            ControlSpec::toggle(MODEL_LIGHT.0).with_key(KeyCode::KeyK),
            ControlSpec::choice(LIGHT_KIND.0, KIND_OPTIONS).with_key(KeyCode::KeyJ),
            ControlSpec::range(LIGHT_INTENSITY.0, 0.0, MAX_LIGHT_INTENSITY, 0.1).with_key(KeyCode::KeyI),
            ControlSpec::swatch(LIGHT_COLOR.0, LIGHT_PALETTE).with_key(KeyCode::KeyO),
        ]
    }

    fn apply(&mut self, event: &ControlEvent, _ctx: &ApplyContext) -> ApplyResult {
        match event {
            ControlEvent::Click(ROTATION) => {
                self.rotation = !self.rotation;
                ApplyResult::Applied
            }
            ControlEvent::Click(SCENE_LIGHT) => {
                self.scene_light = !self.scene_light;
                ApplyResult::Applied
            }
            ControlEvent::Click(MODEL_LIGHT) => {
                self.model_light = !self.model_light;
                ApplyResult::Applied
            }
            ControlEvent::Change(AXIS, ControlValue::Text(t)) => match t.parse() {
                Ok(axis) => {
                    self.axis = axis;
                    ApplyResult::Applied
                }
                Err(err) => {
                    debug!(target: LOG_TARGET, "{err}");
                    ApplyResult::Ignored
                }
            },
            ControlEvent::Change(MATERIAL, ControlValue::Text(t)) => match material_from_option(t) {
                Some(material) => {
                    self.material = material;
                    ApplyResult::Applied
                }
                None => ApplyResult::Ignored,
            },
            ControlEvent::Change(LIGHT_KIND, ControlValue::Text(t)) => match t.parse() {
                Ok(kind) => {
                    self.model_light_kind = kind;
                    ApplyResult::Applied
                }
                Err(err) => {
                    debug!(target: LOG_TARGET, "{err}");
                    ApplyResult::Ignored
                }
            },
            ControlEvent::Input(LIGHT_INTENSITY, ControlValue::Number(n)) if n.is_finite() => {
                self.light_intensity = n.clamp(0.0, MAX_LIGHT_INTENSITY);
                ApplyResult::Applied
            }
            ControlEvent::Input(LIGHT_COLOR, ControlValue::Color(c)) => {
                self.light_color = *c;
                ApplyResult::Applied
            }
            _ => ApplyResult::Ignored,
        }
    }

    fn value(&self, id: ControlId) -> Option<ControlValue> {
        match id {
            ROTATION => Some(ControlValue::Bool(self.rotation)),
            AXIS => Some(ControlValue::Text(self.axis.label().into())),
            MATERIAL => Some(ControlValue::Text(self.material.label().into())),
            SCENE_LIGHT => Some(ControlValue::Bool(self.scene_light)),
            MODEL_LIGHT => Some(ControlValue::Bool(self.model_light)),
            LIGHT_KIND => Some(ControlValue::Text(self.model_light_kind.label().into())),
            LIGHT_INTENSITY => Some(ControlValue::Number(self.light_intensity)),
            LIGHT_COLOR => Some(ControlValue::Color(self.light_color)),
            _ => None,
        }
    }

    fn label(&self, id: ControlId) -> String {
        let on_off = |b: bool| if b { "ON" } else { "OFF" };
        match id {
            ROTATION if self.rotation => "Disable Rotation".into(),
            ROTATION => "Enable Rotation".into(),
            AXIS => format!("Axis: {}", self.axis),
            MATERIAL => format!("Material: {}", self.material),
            SCENE_LIGHT => format!("Scene Light: {}", on_off(self.scene_light)),
            MODEL_LIGHT => format!("Model Light: {}", on_off(self.model_light)),
            LIGHT_KIND => format!("Light Type: {}", self.model_light_kind),
            LIGHT_INTENSITY => format!("Intensity: {:.1}", self.light_intensity),
            LIGHT_COLOR => format!("Light Color: {}", hex_label(self.light_color)),
            _ => String::new(),
        }
    }
}
