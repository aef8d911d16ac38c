use bevy::prelude::*;
use std::fmt;

/// Stable identifier of one control; also the key into the state record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControlId(pub &'static str);

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlValue {
    Bool(bool),
    Number(f32),
    Text(String),
    Color(Srgba),
}

impl ControlValue {
    pub fn as_number(&self) -> Option<f32> {
        match self {
            ControlValue::Number(n) => Some(*n),
            _ => None,
        }
    }
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ControlValue::Text(t) => Some(t),
            _ => None,
        }
    }
    pub fn as_color(&self) -> Option<Srgba> {
        match self {
            ControlValue::Color(c) => Some(*c),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// Flips one boolean; label mirrors the new value.
    Toggle,
    /// Momentary button.
    Trigger,
    /// Slider stepped with -/+ buttons.
    Range { min: f32, max: f32, step: f32 },
    /// Select box; clicking cycles through the options.
    Choice(&'static [&'static str]),
    /// Colour picker limited to a palette of hex colours.
    Swatch(&'static [&'static str]),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlSpec {
    pub id: ControlId,
    pub kind: ControlKind,
    pub key: Option<KeyCode>,
}

impl ControlSpec {
    pub fn toggle(id: &'static str) -> Self {
        Self { id: ControlId(id), kind: ControlKind::Toggle, key: None }
    }
    pub fn trigger(id: &'static str) -> Self {
        Self { id: ControlId(id), kind: ControlKind::Trigger, key: None }
    }
    pub fn range(id: &'static str, min: f32, max: f32, step: f32) -> Self {
        Self { id: ControlId(id), kind: ControlKind::Range { min, max, step }, key: None }
    }
    pub fn choice(id: &'static str, options: &'static [&'static str]) -> Self {
        Self { id: ControlId(id), kind: ControlKind::Choice(options), key: None }
    }
    pub fn swatch(id: &'static str, palette: &'static [&'static str]) -> Self {
        Self { id: ControlId(id), kind: ControlKind::Swatch(palette), key: None }
    }
    pub fn with_key(mut self, key: KeyCode) -> Self {
        self.key = Some(key);
        self
    }
}

/// DOM-style control events: `click` on buttons, `input` on sliders and colour pickers,
/// `change` on select boxes.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum ControlEvent {
    Click(ControlId),
    Input(ControlId, ControlValue),
    Change(ControlId, ControlValue),
}

impl ControlEvent {
    pub fn id(&self) -> ControlId {
        match self {
            ControlEvent::Click(id) | ControlEvent::Input(id, _) | ControlEvent::Change(id, _) => *id,
        }
    }
}

/// Frame information available while applying an event.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyContext {
    pub elapsed_ms: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApplyResult {
    Applied,
    Ignored,
}

/// A state record driven by a fixed control surface.
///
/// Each control maps to exactly one field; `apply` must not touch any other field.
pub trait ControlState: Resource {
    fn controls() -> Vec<ControlSpec>;
    fn apply(&mut self, event: &ControlEvent, ctx: &ApplyContext) -> ApplyResult;
    fn value(&self, id: ControlId) -> Option<ControlValue>;
    fn label(&self, id: ControlId) -> String;
}

/// Which part of a control widget was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetPart {
    Primary,
    Decrement,
    Increment,
}

/// Translates a widget press into the event the control would raise.
pub fn widget_event(spec: &ControlSpec, part: WidgetPart, current: Option<&ControlValue>) -> Option<ControlEvent> {
    match (&spec.kind, part) {
        (ControlKind::Toggle | ControlKind::Trigger, WidgetPart::Primary) => Some(ControlEvent::Click(spec.id)),
        (ControlKind::Range { min, max, step }, WidgetPart::Decrement | WidgetPart::Increment) => {
            let cur = current.and_then(ControlValue::as_number).unwrap_or(*min);
            let delta = if part == WidgetPart::Increment { *step } else { -*step };
            let next = round_to_step(cur + delta, *step).clamp(*min, *max);
            Some(ControlEvent::Input(spec.id, ControlValue::Number(next)))
        }
        (ControlKind::Choice(options), WidgetPart::Primary) => {
            let cur = current.and_then(ControlValue::as_text);
            next_in(options, |o| Some(*o) == cur)
                .map(|o| ControlEvent::Change(spec.id, ControlValue::Text((*o).to_string())))
        }
        (ControlKind::Swatch(palette), WidgetPart::Primary) => {
            let cur = current.and_then(ControlValue::as_color);
            next_in(palette, |hex| Srgba::hex(hex).ok() == cur)
                .and_then(|hex| Srgba::hex(hex).ok())
                .map(|c| ControlEvent::Input(spec.id, ControlValue::Color(c)))
        }
        _ => None,
    }
}

fn next_in<'a, T>(items: &'a [T], is_current: impl Fn(&T) -> bool) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let idx = items.iter().position(is_current).map(|i| (i + 1) % items.len()).unwrap_or(0);
    items.get(idx)
}

fn round_to_step(value: f32, step: f32) -> f32 {
    if step <= 0.0 {
        return value;
    }
    (value / step).round() * step
}

/// Lower-case `#rrggbb` form used in labels.
pub fn hex_label(color: Srgba) -> String {
    color.to_hex().to_ascii_lowercase()
}
