use bevy::prelude::*;
use ui_binder::*;

#[derive(Resource, Debug, Clone, PartialEq)]
struct LampState {
    lit: bool,
    brightness: f32,
    mode: &'static str,
}

impl Default for LampState {
    fn default() -> Self {
        Self { lit: true, brightness: 1.0, mode: "warm" }
    }
}

const MODES: &[&str] = &["warm", "cold"];

impl ControlState for LampState {
    fn controls() -> Vec<ControlSpec> {
        vec![
            ControlSpec::toggle("lit").with_key(KeyCode::KeyL),
            ControlSpec::range("brightness", 0.0, 2.0, 0.5),
            ControlSpec::choice("mode", MODES),
        ]
    }

    fn apply(&mut self, event: &ControlEvent, _ctx: &ApplyContext) -> ApplyResult {
        match event {
            ControlEvent::Click(ControlId("lit")) => {
                self.lit = !self.lit;
                ApplyResult::Applied
            }
            ControlEvent::Input(ControlId("brightness"), ControlValue::Number(v)) => {
                self.brightness = *v;
                ApplyResult::Applied
            }
            ControlEvent::Change(ControlId("mode"), ControlValue::Text(t)) => match MODES.iter().find(|m| **m == t.as_str()) {
                Some(m) => {
                    self.mode = *m;
                    ApplyResult::Applied
                }
                None => ApplyResult::Ignored,
            },
            _ => ApplyResult::Ignored,
        }
    }

    fn value(&self, id: ControlId) -> Option<ControlValue> {
        match id.0 {
            "lit" => Some(ControlValue::Bool(self.lit)),
            "brightness" => Some(ControlValue::Number(self.brightness)),
            "mode" => Some(ControlValue::Text(self.mode.to_string())),
            _ => None,
        }
    }

    fn label(&self, id: ControlId) -> String {
        match id.0 {
            "lit" => if self.lit { "Turn Off" } else { "Turn On" }.to_string(),
            "brightness" => format!("Brightness: {:.1}", self.brightness),
            "mode" => format!("Mode: {}", self.mode),
            _ => String::new(),
        }
    }
}

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(ControlPanelPlugin::<LampState>::new("Lamp"));
    app.update(); // spawn panel
    app
}

fn label_text(app: &mut App, id: &'static str) -> String {
    let mut q = app.world_mut().query::<(&ControlLabel, &Text)>();
    q.iter(app.world())
        .find(|(l, _)| l.0 == ControlId(id))
        .map(|(_, t)| t.0.clone())
        .expect("label exists")
}

#[test]
fn toggle_twice_restores_state_and_label() {
    let mut app = test_app();
    let original = app.world().resource::<LampState>().clone();
    let original_label = label_text(&mut app, "lit");

    app.world_mut().send_event(ControlEvent::Click(ControlId("lit")));
    app.update();
    assert!(!app.world().resource::<LampState>().lit);
    assert_eq!(label_text(&mut app, "lit"), "Turn On");

    app.world_mut().send_event(ControlEvent::Click(ControlId("lit")));
    app.update();
    assert_eq!(*app.world().resource::<LampState>(), original);
    assert_eq!(label_text(&mut app, "lit"), original_label);
}

#[test]
fn label_updates_in_the_same_frame_as_the_event() {
    let mut app = test_app();
    app.world_mut()
        .send_event(ControlEvent::Input(ControlId("brightness"), ControlValue::Number(1.5)));
    app.update();
    assert_eq!(label_text(&mut app, "brightness"), "Brightness: 1.5");
}

#[test]
fn each_event_touches_one_field_only() {
    let mut app = test_app();
    app.world_mut()
        .send_event(ControlEvent::Change(ControlId("mode"), ControlValue::Text("cold".into())));
    app.update();
    let state = app.world().resource::<LampState>();
    assert_eq!(state.mode, "cold");
    assert!(state.lit);
    assert_eq!(state.brightness, 1.0);
}

#[test]
fn ignored_events_are_journaled_and_leave_state_alone() {
    let mut app = test_app();
    app.world_mut()
        .send_event(ControlEvent::Change(ControlId("mode"), ControlValue::Text("disco".into())));
    app.update();
    let journal = app.world().resource::<ControlJournal>();
    assert_eq!(journal.len(), 1);
    assert_eq!(journal.iter().last().map(|j| j.result.clone()), Some(ApplyResult::Ignored));
    assert_eq!(app.world().resource::<LampState>().mode, LampState::default().mode);
}

#[test]
fn panel_spawns_a_label_per_control() {
    let mut app = test_app();
    let mut q = app.world_mut().query::<&ControlLabel>();
    assert_eq!(q.iter(app.world()).count(), LampState::controls().len());
}
