mod control;
mod journal;
mod widgets;

pub use control::*;
pub use journal::*;
pub use widgets::*;

use bevy::prelude::*;
use std::marker::PhantomData;

pub const LOG_TARGET: &str = "ui_binder";

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum ControlFlowSet {
    /// Widget presses and key shortcuts become `ControlEvent`s.
    Collect,
    /// Events are applied to the state record and labels refreshed.
    Apply,
}

/// Binds a `ControlState` resource to an on-screen control panel.
pub struct ControlPanelPlugin<S> {
    pub title: &'static str,
    pub journal_capacity: usize,
    _marker: PhantomData<fn() -> S>,
}

impl<S> ControlPanelPlugin<S> {
    pub fn new(title: &'static str) -> Self {
        Self { title, journal_capacity: 64, _marker: PhantomData }
    }
}

impl<S: ControlState + FromWorld> Plugin for ControlPanelPlugin<S> {
    fn build(&self, app: &mut App) {
        app.init_resource::<S>()
            .add_event::<ControlEvent>()
            .insert_resource(ControlJournal::with_capacity(self.journal_capacity))
            .insert_resource(PanelTitle(self.title))
            .configure_sets(Update, (ControlFlowSet::Collect, ControlFlowSet::Apply).chain())
            .add_systems(Startup, spawn_control_panel::<S>)
            .add_systems(
                Update,
                (
                    (collect_widget_presses::<S>, collect_key_shortcuts::<S>).in_set(ControlFlowSet::Collect),
                    apply_control_events::<S>.in_set(ControlFlowSet::Apply),
                    refresh_all_labels::<S>.after(ControlFlowSet::Apply),
                ),
            );
    }
}

/// Applies queued control events to the state record and refreshes the affected labels
/// within the same system so labels never lag the state.
pub fn apply_control_events<S: ControlState>(
    time: Res<Time>,
    mut state: ResMut<S>,
    mut events: EventReader<ControlEvent>,
    mut journal: ResMut<ControlJournal>,
    mut labels: Query<(&ControlLabel, &mut Text)>,
) {
    let ctx = ApplyContext { elapsed_ms: (time.elapsed_secs_f64() * 1000.0) as f32 };
    for event in events.read() {
        let result = state.apply(event, &ctx);
        let id = event.id();
        if result == ApplyResult::Applied {
            let text = state.label(id);
            for (label, mut t) in &mut labels {
                if label.0 == id {
                    t.0 = text.clone();
                }
            }
            debug!(target: LOG_TARGET, "{id} -> {text}");
        } else {
            debug!(target: LOG_TARGET, "ignored control event {event:?}");
        }
        journal.push(JournalEntry { event: event.clone(), result, elapsed_ms: ctx.elapsed_ms });
    }
}

/// Re-renders every label from the current state; used when state changes outside the binder
/// (e.g. a timed effect expiring).
pub fn refresh_all_labels<S: ControlState>(state: Res<S>, mut labels: Query<(&ControlLabel, &mut Text)>) {
    if !state.is_changed() {
        return;
    }
    for (label, mut text) in &mut labels {
        let next = state.label(label.0);
        if text.0 != next {
            text.0 = next;
        }
    }
}
