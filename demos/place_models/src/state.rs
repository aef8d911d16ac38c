use bevy::prelude::*;
use scene_core::{ModelMaterial, MotionParams, MotionTuning, SurfacePreset};
use ui_binder::{hex_label, ApplyContext, ApplyResult, ControlEvent, ControlId, ControlSpec, ControlState, ControlValue};

pub const MATERIAL: ControlId = ControlId("material");
pub const SCENE_LIGHT: ControlId = ControlId("scene_dir_light");
pub const LIGHT_INTENSITY: ControlId = ControlId("light_intensity");
pub const LIGHT_COLOR: ControlId = ControlId("light_color");
pub const JUMP: ControlId = ControlId("jump");
pub const ROTATION: ControlId = ControlId("rotate");

pub const MAX_LIGHT_INTENSITY: f32 = 5.0;

const MATERIAL_OPTIONS: &[&str] = &["original", "gold", "glass", "glow"];
const LIGHT_PALETTE: &[&str] = &["#ffffff", "#ffcc00", "#ff6600", "#ff0000", "#00ff00", "#0088ff"];

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ModelPlacementState {
    pub material: ModelMaterial,
    pub scene_light: bool,
    pub light_intensity: f32,
    pub light_color: Srgba,
    pub jump: bool,
    pub rotation: bool,
}

impl Default for ModelPlacementState {
    fn default() -> Self {
        Self {
            material: ModelMaterial::Original,
            scene_light: true,
            light_intensity: 1.0,
            light_color: Srgba::WHITE,
            jump: false,
            rotation: true,
        }
    }
}

impl ModelPlacementState {
    pub fn motion_params(&self, tuning: &MotionTuning) -> MotionParams {
        MotionParams {
            spin_step: self.rotation.then_some(tuning.normal_step),
            axis: None,
            pulse: None,
            jump: self.jump.then(|| tuning.jump()),
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

impl ControlState for ModelPlacementState {
    fn controls() -> Vec<ControlSpec> {
        vec![
            ControlSpec::choice(MATERIAL.0, MATERIAL_OPTIONS).with_key(KeyCode::KeyM),
            ControlSpec::toggle(SCENE_LIGHT.0).with_key(KeyCode::KeyL),
            ControlSpec::range(LIGHT_INTENSITY.0, 0.0, MAX_LIGHT_INTENSITY, 0.1).with_key(KeyCode::KeyI),
            ControlSpec::swatch(LIGHT_COLOR.0, LIGHT_PALETTE).with_key(KeyCode::KeyO),
            ControlSpec::toggle(JUMP.0).with_key(KeyCode::KeyJ),
            ControlSpec::toggle(ROTATION.0).with_key(KeyCode::KeyR),
        ]
    }

    fn apply(&mut self, event: &ControlEvent, _ctx: &ApplyContext) -> ApplyResult {
        match event {
            ControlEvent::Change(MATERIAL, ControlValue::Text(t)) => match t.parse::<ModelMaterial>() {
                Ok(
                    m @ (ModelMaterial::Original
                    | ModelMaterial::Preset(SurfacePreset::Gold | SurfacePreset::Glass | SurfacePreset::Glow)),
                ) => self.material = m,
                _ => return ApplyResult::Ignored,
            },
            ControlEvent::Click(SCENE_LIGHT) => self.scene_light = !self.scene_light,
            ControlEvent::Input(LIGHT_INTENSITY, ControlValue::Number(n)) if n.is_finite() => {
                self.light_intensity = n.clamp(0.0, MAX_LIGHT_INTENSITY);
            }
            ControlEvent::Input(LIGHT_COLOR, ControlValue::Color(c)) => self.light_color = *c,
            ControlEvent::Click(JUMP) => self.jump = !self.jump,
            ControlEvent::Click(ROTATION) => self.rotation = !self.rotation,
            _ => return ApplyResult::Ignored,
        }
        ApplyResult::Applied
    }

    fn value(&self, id: ControlId) -> Option<ControlValue> {
        match id {
            MATERIAL => Some(ControlValue::Text(self.material.label().into())),
            SCENE_LIGHT => Some(ControlValue::Bool(self.scene_light)),
            LIGHT_INTENSITY => Some(ControlValue::Number(self.light_intensity)),
            LIGHT_COLOR => Some(ControlValue::Color(self.light_color)),
            JUMP => Some(ControlValue::Bool(self.jump)),
            ROTATION => Some(ControlValue::Bool(self.rotation)),
            _ => None,
        }
    }

    fn label(&self, id: ControlId) -> String {
        match id {
            MATERIAL => format!("Material: {}", self.material),
            SCENE_LIGHT => format!("Direction Light: {}", on_off(self.scene_light)),
            LIGHT_INTENSITY => format!("Intensity: {:.1}", self.light_intensity),
            LIGHT_COLOR => format!("Light Color: {}", hex_label(self.light_color)),
            JUMP => format!("Jump: {}", on_off(self.jump)),
            ROTATION => format!("Rotation: {}", on_off(self.rotation)),
            _ => String::new(),
        }
    }
}
