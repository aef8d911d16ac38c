use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use demo_scaffold::{DemoConfig, DemoScaffoldPlugin};
use scene_core::{Axis, Spin};
use shape_gallery::*;
use std::f32::consts::TAU;
use std::time::Duration;
use ui_binder::{ControlEvent, ControlLabel};

fn gallery_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Assets::<Mesh>::default())
        .insert_resource(Assets::<StandardMaterial>::default())
        .add_plugins(DemoScaffoldPlugin::new(DEMO_NAME, DemoConfig::default()))
        .add_plugins(ShapeGalleryPlugin);
    app.update();
    app
}

fn spin_of(app: &mut App, shape: GalleryShape) -> Spin {
    let mut q = app.world_mut().query::<(&GalleryShape, &Spin)>();
    q.iter(app.world())
        .find(|(s, _)| **s == shape)
        .map(|(_, spin)| *spin)
        .expect("shape spawned")
}

fn scale_of(app: &mut App, shape: GalleryShape) -> Vec3 {
    let mut q = app.world_mut().query::<(&GalleryShape, &Transform)>();
    q.iter(app.world())
        .find(|(s, _)| **s == shape)
        .map(|(_, t)| t.scale)
        .expect("shape spawned")
}

fn label(app: &mut App, id: ui_binder::ControlId) -> String {
    let mut q = app.world_mut().query::<(&ControlLabel, &Text)>();
    q.iter(app.world()).find(|(l, _)| l.0 == id).map(|(_, t)| t.0.clone()).expect("label")
}

fn emissive_red(app: &App, shape: GalleryShape) -> f32 {
    let world = app.world();
    let mut found = None;
    for entity in world.iter_entities() {
        if entity.get::<GalleryShape>() == Some(&shape) {
            let handles = entity.get::<GalleryMaterials>().expect("materials");
            let mats = world.resource::<Assets<StandardMaterial>>();
            found = mats.get(&handles.plain).map(|m| m.emissive.red);
        }
    }
    found.expect("material")
}

#[test]
fn spawns_three_shapes_with_their_senses() {
    let mut app = gallery_app();
    let torus = spin_of(&mut app, GalleryShape::TorusKnot);
    let tube = spin_of(&mut app, GalleryShape::SineTube);
    let frame = spin_of(&mut app, GalleryShape::Frame);
    assert_eq!((torus.axis, torus.direction), (Axis::Y, -1.0));
    assert_eq!((tube.axis, tube.direction), (Axis::Z, 1.0));
    assert_eq!((frame.axis, frame.direction), (Axis::X, -1.0));
}

#[test]
fn hundred_frames_turn_one_radian() {
    let mut app = gallery_app();
    let before = spin_of(&mut app, GalleryShape::SineTube).angle(Axis::Z);
    for _ in 0..100 {
        app.update();
    }
    let after = spin_of(&mut app, GalleryShape::SineTube).angle(Axis::Z);
    assert!(((after - before).rem_euclid(TAU) - 1.0).abs() < 1e-3, "turned {}", after - before);
    let torus = spin_of(&mut app, GalleryShape::TorusKnot).angle(Axis::Y);
    assert!((torus - (TAU - 1.01)).abs() < 1e-3, "torus at {torus}");
}

#[test]
fn rotation_toggle_freezes_shapes() {
    let mut app = gallery_app();
    app.world_mut().send_event(ControlEvent::Click(ROTATION));
    app.update();
    let frozen = spin_of(&mut app, GalleryShape::Frame);
    for _ in 0..10 {
        app.update();
    }
    assert_eq!(spin_of(&mut app, GalleryShape::Frame), frozen);
    assert_eq!(label(&mut app, ROTATION), "Enable Rotation");
}

#[test]
fn color_toggle_drives_emissive() {
    let mut app = gallery_app();
    assert_eq!(emissive_red(&app, GalleryShape::SineTube), 0.0);
    app.world_mut().send_event(ControlEvent::Click(COLOR_EMIT));
    app.update();
    assert!(emissive_red(&app, GalleryShape::SineTube) > 0.0);
    assert_eq!(label(&mut app, COLOR_EMIT), "Disable Color/Emit");
}

#[test]
fn texture_toggle_swaps_material_handle() {
    let mut app = gallery_app();
    app.world_mut().send_event(ControlEvent::Click(TEXTURES));
    app.update();
    let mut q = app.world_mut().query::<(&GalleryMaterials, &MeshMaterial3d<StandardMaterial>)>();
    for (handles, material) in q.iter(app.world()) {
        assert_eq!(material.0, handles.textured);
    }
}

#[test]
fn special_effect_expires_after_two_seconds() {
    let mut app = gallery_app();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
    app.update();
    app.world_mut().send_event(ControlEvent::Click(SPECIAL));
    app.update();
    assert!(app.world().resource::<GalleryState>().special.is_some());
    assert_eq!(label(&mut app, SPECIAL), "Special Active");
    let flash = emissive_red(&app, GalleryShape::Frame);
    assert!(flash > 0.0);

    for _ in 0..15 {
        app.update();
    }
    assert!(app.world().resource::<GalleryState>().special.is_some(), "ended early");

    for _ in 0..10 {
        app.update();
    }
    assert!(app.world().resource::<GalleryState>().special.is_none());
    assert_eq!(label(&mut app, SPECIAL), "Special Effect");
    assert_eq!(emissive_red(&app, GalleryShape::Frame), 0.0);
}

#[test]
fn pulse_swings_meshes_around_unit_scale() {
    let mut app = gallery_app();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(10)));
    app.world_mut().send_event(ControlEvent::Click(PULSE));

    let mut peak = f32::MIN;
    for _ in 0..200 {
        app.update();
        let t_ms = (app.world().resource::<Time>().elapsed_secs_f64() * 1000.0) as f32;
        let expected = 1.0 + 0.1 * (t_ms / 300.0).sin();
        for shape in GalleryShape::ALL {
            let scale = scale_of(&mut app, shape);
            assert!((scale.x - expected).abs() < 1e-4, "{shape:?} at {} for {t_ms} ms", scale.x);
        }
        peak = peak.max(scale_of(&mut app, GalleryShape::SineTube).x);
    }
    assert!((peak - 1.1).abs() < 1e-3, "peak {peak}");

    app.world_mut().send_event(ControlEvent::Click(PULSE));
    app.update();
    let held = scale_of(&mut app, GalleryShape::Frame);
    for _ in 0..5 {
        app.update();
    }
    assert_eq!(scale_of(&mut app, GalleryShape::Frame), held);
}
