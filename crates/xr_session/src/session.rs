use bevy::input::touch::Touches;
use bevy::prelude::*;
use scene_core::ActiveMotion;

use crate::{XrFrame, LOG_TARGET};

/// Whether an AR session is running.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct XrSession {
    pub active: bool,
    /// Sessions started since launch.
    pub started: u32,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum XrSessionRequest {
    Start,
    End,
    Toggle,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct XrSessionStarted;

/// Session-end notification; hit-test handles are released on it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct XrSessionEnded;

/// The device "select" action (screen tap). Only raised while a session is active.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct XrSelect;

/// Tracking frame for this update; `None` outside a session.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct CurrentXrFrame(pub Option<XrFrame>);

/// Marks the camera whose pose stands in for the device.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct XrViewer;

#[derive(Component)]
pub struct ArButton;

#[derive(Component)]
pub struct ArButtonLabel;

pub fn ar_button_text(active: bool) -> &'static str {
    if active {
        "Stop AR"
    } else {
        "Start AR"
    }
}

pub fn spawn_ar_button(mut commands: Commands, session: Res<XrSession>) {
    commands
        .spawn((
            Name::new("ArButton"),
            ArButton,
            Button,
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(20.0),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-50.0)),
                width: Val::Px(100.0),
                padding: UiRect::axes(Val::Px(12.0), Val::Px(8.0)),
                justify_content: JustifyContent::Center,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BorderColor(Color::WHITE),
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.1)),
        ))
        .with_child((
            ArButtonLabel,
            Text::new(ar_button_text(session.active)),
            TextFont { font_size: 13.0, ..default() },
            TextColor(Color::WHITE),
        ));
}

/// AR button clicks and Enter toggle the session.
pub fn collect_session_input(
    buttons: Query<&Interaction, (Changed<Interaction>, With<ArButton>)>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut requests: EventWriter<XrSessionRequest>,
) {
    let clicked = buttons.iter().any(|i| *i == Interaction::Pressed);
    let key = keys.is_some_and(|k| k.just_pressed(KeyCode::Enter));
    if clicked || key {
        requests.write(XrSessionRequest::Toggle);
    }
}

pub fn apply_session_requests(
    mut requests: EventReader<XrSessionRequest>,
    mut session: ResMut<XrSession>,
    mut started: EventWriter<XrSessionStarted>,
    mut ended: EventWriter<XrSessionEnded>,
    mut labels: Query<&mut Text, With<ArButtonLabel>>,
) {
    for request in requests.read() {
        let want_active = match request {
            XrSessionRequest::Start => true,
            XrSessionRequest::End => false,
            XrSessionRequest::Toggle => !session.active,
        };
        if want_active == session.active {
            continue;
        }
        session.active = want_active;
        if want_active {
            session.started += 1;
            info!(target: LOG_TARGET, "AR session {} started", session.started);
            started.write(XrSessionStarted);
        } else {
            info!(target: LOG_TARGET, "AR session ended");
            ended.write(XrSessionEnded);
        }
        for mut text in &mut labels {
            text.0 = ar_button_text(want_active).to_string();
        }
    }
}

/// Builds the tracking frame from the viewer camera while a session is active.
///
/// The viewer is a root entity, so its `Transform` is the world pose and already holds this
/// frame's rig movement; `GlobalTransform` is not propagated until after `FrameSet::Tracking`.
pub fn capture_frame(
    time: Res<Time>,
    session: Res<XrSession>,
    viewers: Query<&Transform, (With<XrViewer>, Without<ChildOf>)>,
    mut frame: ResMut<CurrentXrFrame>,
) {
    let next = match (session.active, viewers.single()) {
        (true, Ok(viewer)) => Some(XrFrame {
            viewer: *viewer,
            timestamp_ms: time.elapsed_secs_f64() * 1000.0,
        }),
        _ => None,
    };
    if next.is_some() || frame.0.is_some() {
        frame.0 = next;
    }
}

/// Placed objects only animate while tracking frames arrive.
pub fn gate_motion_on_frame(frame: Res<CurrentXrFrame>, mut motion: ResMut<ActiveMotion>) {
    let tracking = frame.0.is_some();
    if motion.enabled != tracking {
        motion.enabled = tracking;
    }
}

/// Left click, Space, or a touch raise `XrSelect`, except when the pointer is on a UI widget.
pub fn collect_select(
    session: Res<XrSession>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    touches: Option<Res<Touches>>,
    widgets: Query<&Interaction>,
    mut select: EventWriter<XrSelect>,
) {
    if !session.active {
        return;
    }
    let over_ui = widgets.iter().any(|i| *i != Interaction::None);
    let pointer = !over_ui
        && (mouse.is_some_and(|m| m.just_pressed(MouseButton::Left))
            || touches.is_some_and(|t| t.any_just_pressed()));
    let key = keys.is_some_and(|k| k.just_pressed(KeyCode::Space));
    if pointer || key {
        select.write(XrSelect);
    }
}

/// Desktop stand-in for walking around with the device: arrows turn, W/A/S/D move.
pub fn drive_viewer_rig(
    time: Res<Time>,
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut viewers: Query<&mut Transform, With<XrViewer>>,
) {
    let Some(keys) = keys else {
        return;
    };
    let dt = time.delta_secs();
    let mut yaw = 0.0;
    let mut pitch = 0.0;
    let mut walk = Vec3::ZERO;
    if keys.pressed(KeyCode::ArrowLeft) {
        yaw += 1.0;
    }
    if keys.pressed(KeyCode::ArrowRight) {
        yaw -= 1.0;
    }
    if keys.pressed(KeyCode::ArrowUp) {
        pitch += 1.0;
    }
    if keys.pressed(KeyCode::ArrowDown) {
        pitch -= 1.0;
    }
    if keys.pressed(KeyCode::KeyW) {
        walk.z -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        walk.z += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        walk.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        walk.x += 1.0;
    }
    if yaw == 0.0 && pitch == 0.0 && walk == Vec3::ZERO {
        return;
    }
    for mut transform in &mut viewers {
        transform.rotate_y(yaw * 1.5 * dt);
        transform.rotate_local_x(pitch * 1.0 * dt);
        // walk on the horizontal plane regardless of pitch
        let heading = Quat::from_rotation_y(transform.rotation.to_euler(EulerRot::YXZ).0);
        transform.translation += heading * walk.normalize_or_zero() * 1.5 * dt;
    }
}
