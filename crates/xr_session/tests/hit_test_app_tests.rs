use bevy::prelude::*;
use scene_core::SceneCorePlugin;
use std::time::Duration;
use xr_session::*;

fn test_app(config: SimulatedXrConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(SceneCorePlugin)
        .add_plugins(XrSessionPlugin { ar_button: false, viewer_rig: false })
        .add_plugins(HitTestPlugin::new(SimulatedXr::new(config)));
    // looking straight down at the default floor
    let viewer = Transform::from_xyz(0.0, 0.5, 0.0).looking_to(Vec3::NEG_Y, Vec3::NEG_Z);
    app.world_mut().spawn((XrViewer, viewer, GlobalTransform::from(viewer)));
    app.update();
    app
}

fn start_session(app: &mut App) {
    app.world_mut().send_event(XrSessionRequest::Start);
    app.update();
}

fn run_until(app: &mut App, mut done: impl FnMut(&App) -> bool) -> bool {
    for _ in 0..200 {
        if done(app) {
            return true;
        }
        app.update();
        std::thread::sleep(Duration::from_millis(1));
    }
    done(app)
}

fn reticle_visibility(app: &mut App) -> Visibility {
    let mut q = app.world_mut().query_filtered::<&Visibility, With<Reticle>>();
    *q.single(app.world()).expect("one reticle")
}

#[test]
fn nothing_happens_without_a_session() {
    let mut app = test_app(SimulatedXrConfig::default());
    for _ in 0..5 {
        app.update();
    }
    assert_eq!(app.world().resource::<HitTest>().state(), HitTestState::Uninitialized);
    assert!(app.world().resource::<CurrentXrFrame>().0.is_none());
    assert_eq!(reticle_visibility(&mut app), Visibility::Hidden);
}

#[test]
fn session_reaches_ready_and_shows_reticle() {
    let mut app = test_app(SimulatedXrConfig::default());
    start_session(&mut app);
    assert!(app.world().resource::<CurrentXrFrame>().0.is_some());

    let ready = run_until(&mut app, |app| {
        matches!(app.world().resource::<HitTest>().state(), HitTestState::Ready(_))
    });
    assert!(ready, "acquisition never resolved");
    app.update();
    assert_eq!(reticle_visibility(&mut app), Visibility::Visible);

    let mut q = app.world_mut().query_filtered::<&Transform, With<Reticle>>();
    let reticle = *q.single(app.world()).expect("one reticle");
    assert!((reticle.translation.y - -1.0).abs() < 1e-4);
}

#[test]
fn session_end_reverts_once_and_hides_reticle() {
    let mut app = test_app(SimulatedXrConfig::default());
    start_session(&mut app);
    run_until(&mut app, |app| app.world().resource::<HitTest>().machine.handles().is_some());
    app.update();

    app.world_mut().send_event(XrSessionRequest::End);
    app.update();
    for _ in 0..5 {
        app.update();
    }
    let hit_test = app.world().resource::<HitTest>();
    assert_eq!(hit_test.state(), HitTestState::Uninitialized);
    assert_eq!(hit_test.machine.session_resets(), 1);
    assert_eq!(reticle_visibility(&mut app), Visibility::Hidden);
}

#[test]
fn unsupported_hit_test_keeps_retrying_without_reticle() {
    let mut app = test_app(SimulatedXrConfig { hit_test_unsupported: true, latency_polls: 0, ..default() });
    start_session(&mut app);
    for _ in 0..20 {
        app.update();
        std::thread::sleep(Duration::from_millis(1));
    }
    assert!(!matches!(app.world().resource::<HitTest>().state(), HitTestState::Ready(_)));
    assert!(app.world().resource::<HitTest>().machine.failures() > 1, "no retries happened");
    assert_eq!(reticle_visibility(&mut app), Visibility::Hidden);

    app.world_mut().send_event(XrSessionRequest::End);
    app.update();
    assert_eq!(app.world().resource::<HitTest>().machine.failures(), 0);
}

#[test]
fn looking_away_hides_reticle() {
    let mut app = test_app(SimulatedXrConfig::default());
    start_session(&mut app);
    run_until(&mut app, |app| app.world().resource::<HitTest>().machine.handles().is_some());
    app.update();
    assert_eq!(reticle_visibility(&mut app), Visibility::Visible);

    let horizon = Transform::from_xyz(0.0, 0.5, 0.0).looking_to(Vec3::NEG_Z, Vec3::Y);
    let mut q = app.world_mut().query_filtered::<(&mut Transform, &mut GlobalTransform), With<XrViewer>>();
    for (mut t, mut g) in q.iter_mut(app.world_mut()) {
        *t = horizon;
        *g = GlobalTransform::from(horizon);
    }
    app.update();
    assert_eq!(reticle_visibility(&mut app), Visibility::Hidden);
}

#[test]
fn select_only_fires_during_session() {
    let mut app = test_app(SimulatedXrConfig::default());
    app.insert_resource(ButtonInput::<KeyCode>::default());
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(KeyCode::Space);
    app.update();
    assert!(app.world().resource::<Events<XrSelect>>().is_empty());

    start_session(&mut app);
    {
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.release(KeyCode::Space);
        keys.clear();
        keys.press(KeyCode::Space);
    }
    app.update();
    assert!(!app.world().resource::<Events<XrSelect>>().is_empty());
}

#[test]
fn motion_runs_only_while_tracking() {
    let mut app = test_app(SimulatedXrConfig::default());
    assert!(!app.world().resource::<scene_core::ActiveMotion>().enabled);
    start_session(&mut app);
    assert!(app.world().resource::<scene_core::ActiveMotion>().enabled);
    app.world_mut().send_event(XrSessionRequest::End);
    app.update();
    assert!(!app.world().resource::<scene_core::ActiveMotion>().enabled);
}

#[test]
fn hit_test_uses_the_viewer_pose_from_the_same_frame() {
    let mut app = test_app(SimulatedXrConfig::default());
    start_session(&mut app);
    run_until(&mut app, |app| app.world().resource::<HitTest>().machine.handles().is_some());
    app.update();
    assert_eq!(reticle_visibility(&mut app), Visibility::Visible);

    // only the local transform moves, as the viewer rig does before propagation
    let horizon = Transform::from_xyz(0.0, 0.5, 0.0).looking_to(Vec3::NEG_Z, Vec3::Y);
    let mut q = app.world_mut().query_filtered::<&mut Transform, With<XrViewer>>();
    for mut t in q.iter_mut(app.world_mut()) {
        *t = horizon;
    }
    app.update();
    let frame = app.world().resource::<CurrentXrFrame>().0.expect("tracking frame");
    assert_eq!(frame.viewer, horizon);
    assert_eq!(reticle_visibility(&mut app), Visibility::Hidden);
}
