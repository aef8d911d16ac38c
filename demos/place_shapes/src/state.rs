use bevy::prelude::*;
use scene_core::{MotionParams, MotionTuning, SurfacePreset};
use ui_binder::{hex_label, ApplyContext, ApplyResult, ControlEvent, ControlId, ControlSpec, ControlState, ControlValue};

pub const COLOR: ControlId = ControlId("color");
pub const ROTATION: ControlId = ControlId("rotation");
pub const SIZE: ControlId = ControlId("size");
pub const PULSE: ControlId = ControlId("pulse");
pub const MATERIAL: ControlId = ControlId("material");

pub const MIN_SIZE: f32 = 0.05;
pub const MAX_SIZE: f32 = 0.3;
const SIZE_STEP: f32 = 0.05;

const PALETTE: &[&str] = &["#ffcc00", "#ff0000", "#00ff00", "#0088ff", "#ff00ff", "#ffffff"];
const MATERIAL_OPTIONS: &[&str] = &["standard", "emissive", "glass"];

/// Settings applied to the next placed shape; rotation and pulse also drive every placed one.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ShapePlacementState {
    pub color: Srgba,
    pub rotation: bool,
    pub size: f32,
    pub pulse: bool,
    pub material: SurfacePreset,
}

impl Default for ShapePlacementState {
    fn default() -> Self {
        Self {
            color: Srgba::rgb_u8(0xff, 0xcc, 0x00),
            rotation: true,
            size: 0.1,
            pulse: false,
            material: SurfacePreset::Standard,
        }
    }
}

impl ShapePlacementState {
    pub fn motion_params(&self, tuning: &MotionTuning) -> MotionParams {
        MotionParams {
            spin_step: self.rotation.then_some(tuning.normal_step),
            axis: None,
            pulse: self.pulse.then(|| tuning.placed_pulse()),
            jump: None,
        }
    }
}

impl ControlState for ShapePlacementState {
    fn controls() -> Vec<ControlSpec> {
        vec![
            ControlSpec::swatch(COLOR.0, PALETTE).with_key(KeyCode::KeyC),
            ControlSpec::toggle(ROTATION.0).with_key(KeyCode::KeyR),
            ControlSpec::range(SIZE.0, MIN_SIZE, MAX_SIZE, SIZE_STEP).with_key(KeyCode::KeyZ),
            ControlSpec::toggle(PULSE.0).with_key(KeyCode::KeyP),
            ControlSpec::choice(MATERIAL.0, MATERIAL_OPTIONS).with_key(KeyCode::KeyM),
        ]
    }

    fn apply(&mut self, event: &ControlEvent, _ctx: &ApplyContext) -> ApplyResult {
        match event {
            ControlEvent::Input(COLOR, ControlValue::Color(c)) => self.color = *c,
            ControlEvent::Click(ROTATION) => self.rotation = !self.rotation,
            ControlEvent::Input(SIZE, ControlValue::Number(n)) if n.is_finite() => {
                self.size = n.clamp(MIN_SIZE, MAX_SIZE);
            }
            ControlEvent::Click(PULSE) => self.pulse = !self.pulse,
            ControlEvent::Change(MATERIAL, ControlValue::Text(t)) => match t.parse() {
                Ok(preset @ (SurfacePreset::Standard | SurfacePreset::Emissive | SurfacePreset::Glass)) => {
                    self.material = preset;
                }
                _ => return ApplyResult::Ignored,
            },
            _ => return ApplyResult::Ignored,
        }
        ApplyResult::Applied
    }

    fn value(&self, id: ControlId) -> Option<ControlValue> {
        match id {
            COLOR => Some(ControlValue::Color(self.color)),
            ROTATION => Some(ControlValue::Bool(self.rotation)),
            SIZE => Some(ControlValue::Number(self.size)),
            PULSE => Some(ControlValue::Bool(self.pulse)),
            MATERIAL => Some(ControlValue::Text(self.material.label().into())),
            _ => None,
        }
    }

    fn label(&self, id: ControlId) -> String {
        match id {
            COLOR => format!("Color: {}", hex_label(self.color)),
            ROTATION if self.rotation => "Disable Rotation".into(),
            ROTATION => "Enable Rotation".into(),
            SIZE => format!("Size: {:.2}", self.size),
            PULSE if self.pulse => "Disable Pulse".into(),
            PULSE => "Enable Pulse".into(),
            MATERIAL => format!("Material: {}", self.material),
            _ => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(state: &mut ShapePlacementState, event: ControlEvent) -> ApplyResult {
        state.apply(&event, &ApplyContext::default())
    }

    #[test]
    fn defaults_match_first_swatch() {
        let state = ShapePlacementState::default();
        assert_eq!(state.label(COLOR), "Color: #ffcc00");
        assert_eq!(state.label(SIZE), "Size: 0.10");
    }

    #[test]
    fn toggles_twice_restore_state_and_label() {
        for id in [ROTATION, PULSE] {
            let mut state = ShapePlacementState::default();
            let before = (state.clone(), state.label(id));
            apply(&mut state, ControlEvent::Click(id));
            assert_ne!(state.label(id), before.1);
            apply(&mut state, ControlEvent::Click(id));
            assert_eq!((state.clone(), state.label(id)), before);
        }
    }

    #[test]
    fn size_is_clamped_to_slider_range() {
        let mut state = ShapePlacementState::default();
        apply(&mut state, ControlEvent::Input(SIZE, ControlValue::Number(1.0)));
        assert_eq!(state.size, MAX_SIZE);
        apply(&mut state, ControlEvent::Input(SIZE, ControlValue::Number(f32::NAN)));
        assert_eq!(state.size, MAX_SIZE);
    }

    #[test]
    fn material_select_only_takes_its_options() {
        let mut state = ShapePlacementState::default();
        let change = |t: &str| ControlEvent::Change(MATERIAL, ControlValue::Text(t.into()));
        assert_eq!(apply(&mut state, change("physical")), ApplyResult::Applied);
        assert_eq!(state.material, SurfacePreset::Glass);
        assert_eq!(apply(&mut state, change("gold")), ApplyResult::Ignored);
        assert_eq!(state.material, SurfacePreset::Glass);
    }

    #[test]
    fn color_only_changes_color() {
        let mut state = ShapePlacementState::default();
        let blue = Srgba::hex("#0088ff").unwrap();
        apply(&mut state, ControlEvent::Input(COLOR, ControlValue::Color(blue)));
        assert_eq!(state, ShapePlacementState { color: blue, ..default() });
    }

    #[test]
    fn pulse_uses_placed_amplitude() {
        let state = ShapePlacementState { pulse: true, ..default() };
        let defaults = MotionTuning::default();
        assert_eq!(state.motion_params(&defaults).pulse.map(|p| p.amplitude), Some(0.2));
        let tuned = MotionTuning { placed_pulse_amplitude: 0.3, ..default() };
        assert_eq!(state.motion_params(&tuned).pulse.map(|p| p.amplitude), Some(0.3));
    }
}
