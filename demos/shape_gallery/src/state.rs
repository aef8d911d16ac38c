use bevy::prelude::*;
use scene_core::{MotionParams, MotionTuning, SpeedTier};
use ui_binder::{ApplyContext, ApplyResult, ControlEvent, ControlId, ControlSpec, ControlState, ControlValue};

pub const SPECIAL_DURATION_MS: f32 = 2000.0;
pub const SPECIAL_EMISSIVE: f32 = 5.0;
pub const COLOR_EMISSIVE: f32 = 2.0;

pub const ROTATION: ControlId = ControlId("rotation");
pub const COLOR_EMIT: ControlId = ControlId("color_emit");
pub const TEXTURES: ControlId = ControlId("textures");
pub const PULSE: ControlId = ControlId("pulse");
pub const SPEED: ControlId = ControlId("speed");
pub const SPECIAL: ControlId = ControlId("special");

/// A running emissive flash.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialEffect {
    pub started_ms: f32,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GalleryState {
    pub rotation: bool,
    pub color_emit: bool,
    pub textures: bool,
    pub pulse: bool,
    pub speed: SpeedTier,
    pub special: Option<SpecialEffect>,
}

impl Default for GalleryState {
    fn default() -> Self {
        Self {
            rotation: true,
            color_emit: false,
            textures: false,
            pulse: false,
            speed: SpeedTier::Normal,
            special: None,
        }
    }
}

impl GalleryState {
    /// Emissive intensity every gallery material should show right now.
    pub fn emissive_intensity(&self) -> f32 {
        if self.special.is_some() {
            SPECIAL_EMISSIVE
        } else if self.color_emit {
            COLOR_EMISSIVE
        } else {
            0.0
        }
    }

    pub fn motion_params(&self, tuning: &MotionTuning) -> MotionParams {
        MotionParams {
            spin_step: self.rotation.then(|| self.speed.step(tuning)),
            axis: None,
            pulse: self.pulse.then(|| tuning.pulse()),
            jump: None,
        }
    }

    /// Ends the flash once it has run its course. Returns true if it ended.
    pub fn expire_special(&mut self, now_ms: f32) -> bool {
        match self.special {
            Some(effect) if now_ms - effect.started_ms >= SPECIAL_DURATION_MS => {
                self.special = None;
                true
            }
            _ => false,
        }
    }
}

fn flip(flag: &mut bool) -> ApplyResult {
    *flag = !*flag;
    ApplyResult::Applied
}

impl ControlState for GalleryState {
    fn controls() -> Vec<ControlSpec> {
        vec![
            ControlSpec::toggle(ROTATION.0).with_key(KeyCode::KeyR),
            ControlSpec::toggle(COLOR_EMIT.0).with_key(KeyCode::KeyC),
            ControlSpec::toggle(TEXTURES.0).with_key(KeyCode::KeyT),
            ControlSpec::toggle(PULSE.0).with_key(KeyCode::KeyP),
            ControlSpec::toggle(SPEED.0).with_key(KeyCode::KeyF),
            ControlSpec::trigger(SPECIAL.0).with_key(KeyCode::KeyX),
        ]
    }

    fn apply(&mut self, event: &ControlEvent, ctx: &ApplyContext) -> ApplyResult {
        let ControlEvent::Click(id) = event else {
            return ApplyResult::Ignored;
        };
        match *id {
            ROTATION => flip(&mut self.rotation),
            COLOR_EMIT => flip(&mut self.color_emit),
            TEXTURES => flip(&mut self.textures),
            PULSE => flip(&mut self.pulse),
            SPEED => {
                self.speed = self.speed.toggled();
                ApplyResult::Applied
            }
            SPECIAL => {
                // retriggering restarts the timer
                self.special = Some(SpecialEffect { started_ms: ctx.elapsed_ms });
                ApplyResult::Applied
            }
            _ => ApplyResult::Ignored,
        }
    }

    fn value(&self, id: ControlId) -> Option<ControlValue> {
        match id {
            ROTATION => Some(ControlValue::Bool(self.rotation)),
            COLOR_EMIT => Some(ControlValue::Bool(self.color_emit)),
            TEXTURES => Some(ControlValue::Bool(self.textures)),
            PULSE => Some(ControlValue::Bool(self.pulse)),
            SPEED => Some(ControlValue::Bool(self.speed == SpeedTier::Fast)),
            SPECIAL => Some(ControlValue::Bool(self.special.is_some())),
            _ => None,
        }
    }

    fn label(&self, id: ControlId) -> String {
        let text = match id {
            ROTATION if self.rotation => "Disable Rotation",
            ROTATION => "Enable Rotation",
            COLOR_EMIT if self.color_emit => "Disable Color/Emit",
            COLOR_EMIT => "Enable Color/Emit",
            TEXTURES if self.textures => "Disable Textures",
            TEXTURES => "Enable Textures",
            PULSE if self.pulse => "Disable Pulse/Move",
            PULSE => "Enable Pulse/Move",
            SPEED if self.speed == SpeedTier::Fast => "Speed: Fast",
            SPEED => "Speed: Normal",
            SPECIAL if self.special.is_some() => "Special Active",
            SPECIAL => "Special Effect",
            _ => "",
        };
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(state: &mut GalleryState, id: ControlId, at_ms: f32) -> ApplyResult {
        state.apply(&ControlEvent::Click(id), &ApplyContext { elapsed_ms: at_ms })
    }

    #[test]
    fn every_toggle_twice_restores_state_and_label() {
        for id in [ROTATION, COLOR_EMIT, TEXTURES, PULSE, SPEED] {
            let mut state = GalleryState::default();
            let before = (state.clone(), state.label(id));
            click(&mut state, id, 0.0);
            assert_ne!(state, before.0, "{id} did nothing");
            click(&mut state, id, 0.0);
            assert_eq!((state.clone(), state.label(id)), before, "{id}");
        }
    }

    #[test]
    fn special_overrides_then_restores_emissive() {
        let mut state = GalleryState { color_emit: true, ..default() };
        click(&mut state, SPECIAL, 1000.0);
        assert_eq!(state.emissive_intensity(), SPECIAL_EMISSIVE);
        assert_eq!(state.label(SPECIAL), "Special Active");
        assert!(!state.expire_special(2999.0));
        assert!(state.expire_special(3000.0));
        assert_eq!(state.emissive_intensity(), COLOR_EMISSIVE);
        assert_eq!(state.label(SPECIAL), "Special Effect");
    }

    #[test]
    fn special_expiry_without_color_goes_dark() {
        let mut state = GalleryState::default();
        click(&mut state, SPECIAL, 0.0);
        state.expire_special(SPECIAL_DURATION_MS);
        assert_eq!(state.emissive_intensity(), 0.0);
    }

    #[test]
    fn motion_params_follow_toggles() {
        let tuning = MotionTuning::default();
        let mut state = GalleryState::default();
        assert_eq!(state.motion_params(&tuning).spin_step, Some(0.01));
        click(&mut state, SPEED, 0.0);
        assert_eq!(state.motion_params(&tuning).spin_step, Some(0.05));
        click(&mut state, ROTATION, 0.0);
        assert_eq!(state.motion_params(&tuning).spin_step, None);
        assert!(state.motion_params(&tuning).pulse.is_none());
    }

    #[test]
    fn non_click_events_are_ignored() {
        let mut state = GalleryState::default();
        let result = state.apply(
            &ControlEvent::Input(ROTATION, ControlValue::Bool(false)),
            &ApplyContext::default(),
        );
        assert_eq!(result, ApplyResult::Ignored);
        assert!(state.rotation);
    }
}
