use bevy::prelude::*;

use crate::{widget_event, ControlEvent, ControlId, ControlKind, ControlState, WidgetPart};

const NORMAL_BUTTON: Color = Color::srgba(0.18, 0.18, 0.2, 0.95);
const HOVERED_BUTTON: Color = Color::srgba(0.28, 0.28, 0.32, 0.95);
const PRESSED_BUTTON: Color = Color::srgba(0.35, 0.55, 0.35, 0.95);

#[derive(Resource, Debug, Clone, Copy)]
pub struct PanelTitle(pub &'static str);

/// Marker for the root node of the control panel.
#[derive(Component)]
pub struct ControlPanelRoot;

/// Text node mirroring the label of one control.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlLabel(pub ControlId);

/// Pressable part of a control widget.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlButton {
    pub id: ControlId,
    pub part: WidgetPart,
}

fn label_bundle(id: ControlId, text: String) -> impl Bundle {
    (
        Text::new(text),
        TextFont { font_size: 14.0, ..default() },
        TextColor(Color::WHITE),
        ControlLabel(id),
    )
}

fn button_node() -> Node {
    Node {
        padding: UiRect::axes(Val::Px(10.0), Val::Px(5.0)),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

/// Spawns one row per declared control, labels rendered from the current state.
pub fn spawn_control_panel<S: ControlState>(mut commands: Commands, state: Res<S>, title: Res<PanelTitle>) {
    let specs = S::controls();
    commands
        .spawn((
            Name::new("ControlPanel"),
            ControlPanelRoot,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(10.0),
                top: Val::Px(10.0),
                padding: UiRect::all(Val::Px(12.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(6.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.85)),
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new(title.0),
                TextFont { font_size: 18.0, ..default() },
                TextColor(Color::WHITE),
            ));
            for spec in &specs {
                let id = spec.id;
                let label = state.label(id);
                match spec.kind {
                    ControlKind::Range { .. } => {
                        panel
                            .spawn(Node {
                                flex_direction: FlexDirection::Row,
                                align_items: AlignItems::Center,
                                column_gap: Val::Px(6.0),
                                ..default()
                            })
                            .with_children(|row| {
                                row.spawn((
                                    Button,
                                    button_node(),
                                    BackgroundColor(NORMAL_BUTTON),
                                    ControlButton { id, part: WidgetPart::Decrement },
                                ))
                                .with_child((Text::new("-"), TextFont { font_size: 14.0, ..default() }));
                                row.spawn(label_bundle(id, label));
                                row.spawn((
                                    Button,
                                    button_node(),
                                    BackgroundColor(NORMAL_BUTTON),
                                    ControlButton { id, part: WidgetPart::Increment },
                                ))
                                .with_child((Text::new("+"), TextFont { font_size: 14.0, ..default() }));
                            });
                    }
                    _ => {
                        panel
                            .spawn((
                                Button,
                                button_node(),
                                BackgroundColor(NORMAL_BUTTON),
                                ControlButton { id, part: WidgetPart::Primary },
                            ))
                            .with_child(label_bundle(id, label));
                    }
                }
            }
        });
}

/// Turns button presses into control events and gives hover/press feedback.
pub fn collect_widget_presses<S: ControlState>(
    state: Res<S>,
    mut buttons: Query<(&Interaction, &ControlButton, &mut BackgroundColor), Changed<Interaction>>,
    mut events: EventWriter<ControlEvent>,
) {
    for (interaction, button, mut background) in &mut buttons {
        match *interaction {
            Interaction::Pressed => {
                *background = BackgroundColor(PRESSED_BUTTON);
                let Some(spec) = S::controls().into_iter().find(|s| s.id == button.id) else {
                    continue;
                };
                if let Some(ev) = widget_event(&spec, button.part, state.value(button.id).as_ref()) {
                    events.write(ev);
                }
            }
            Interaction::Hovered => *background = BackgroundColor(HOVERED_BUTTON),
            Interaction::None => *background = BackgroundColor(NORMAL_BUTTON),
        }
    }
}

/// Keyboard shortcuts: the bound key acts like the primary button; for ranges it steps up,
/// or down while Shift is held.
pub fn collect_key_shortcuts<S: ControlState>(
    state: Res<S>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut events: EventWriter<ControlEvent>,
) {
    let Some(keys) = keys else {
        return;
    };
    if keys.get_just_pressed().next().is_none() {
        return;
    }
    let shift = keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight);
    for spec in S::controls() {
        let Some(key) = spec.key else {
            continue;
        };
        if !keys.just_pressed(key) {
            continue;
        }
        let part = match spec.kind {
            ControlKind::Range { .. } if shift => WidgetPart::Decrement,
            ControlKind::Range { .. } => WidgetPart::Increment,
            _ => WidgetPart::Primary,
        };
        if let Some(ev) = widget_event(&spec, part, state.value(spec.id).as_ref()) {
            events.write(ev);
        }
    }
}
