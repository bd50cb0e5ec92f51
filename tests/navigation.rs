use magnifier::input::{Command, InputEvent};
use magnifier::{NavigationController, NavigationParams, Vector2};

const EPS: f64 = 1e-9;

fn world_under(controller: &NavigationController, screen: Vector2) -> Vector2 {
    controller.camera().screen_to_world(screen)
}

// ---------------------------------------------------------------------------
// Zoom
// ---------------------------------------------------------------------------

#[test]
fn wheel_zoom_keeps_point_under_cursor() {
    let mut controller = NavigationController::default();
    let cursor = Vector2::new(50.0, 50.0);
    let before = world_under(&controller, cursor);

    controller.push_event(InputEvent::PointerMoved(cursor));
    controller.push_event(InputEvent::Wheel(1.0));

    let mut steps = 0;
    loop {
        controller.update(1.0);
        steps += 1;
        if controller.input().zoom_impulse.abs() <= 0.5 {
            break;
        }
        assert!(steps < 100, "zoom impulse never settled");
    }

    assert!(controller.camera().scale > 1.0);
    assert!((world_under(&controller, cursor) - before).length() < EPS);
}

#[test]
fn zoom_anchor_follows_moving_cursor() {
    let mut controller = NavigationController::default();

    controller.push_event(InputEvent::PointerMoved(Vector2::new(200.0, 120.0)));
    for _ in 0..3 {
        controller.push_event(InputEvent::Wheel(1.0));
    }
    controller.update(0.016);

    for i in 0..30 {
        let cursor = Vector2::new(200.0 + i as f64, 120.0 - i as f64);
        controller.push_event(InputEvent::PointerMoved(cursor));
        // Moving without a drag does not pan, so the new cursor's world
        // point is what the next zoom step must preserve.
        let before = {
            let mut probe = controller.clone();
            probe.update(0.0);
            world_under(&probe, cursor)
        };
        controller.update(0.016);
        assert!((world_under(&controller, cursor) - before).length() < EPS);
    }
}

#[test]
fn scrolling_out_stops_at_scale_floor() {
    let mut controller = NavigationController::default();
    controller.push_event(InputEvent::PointerMoved(Vector2::new(400.0, 300.0)));
    for _ in 0..20 {
        controller.push_event(InputEvent::Wheel(-1.0));
    }

    for _ in 0..50 {
        controller.update(0.1);
        assert!(controller.camera().scale >= 0.5);
    }

    assert_eq!(controller.camera().scale, 0.5);
    assert_eq!(controller.input().zoom_impulse, 0.0);

    let settled = *controller.camera();
    controller.update(0.1);
    assert_eq!(*controller.camera(), settled);
}

// ---------------------------------------------------------------------------
// Pan
// ---------------------------------------------------------------------------

#[test]
fn drag_release_seeds_inertia_that_decays() {
    let mut controller = NavigationController::default();
    controller.push_event(InputEvent::PointerMoved(Vector2::new(0.0, 0.0)));
    controller.push_event(InputEvent::PointerPressed);
    controller.push_event(InputEvent::PointerMoved(Vector2::new(100.0, 0.0)));
    controller.push_event(InputEvent::PointerReleased);
    controller.update(0.0);

    assert_eq!(controller.camera().velocity.x, 2000.0);
    assert_eq!(controller.camera().velocity.y, 0.0);
    assert_eq!(controller.camera().position, Vector2::new(100.0, 0.0));

    let mut last = controller.camera().velocity.length();
    let mut steps = 0;
    while controller.camera().velocity.length() > 20.0 {
        controller.update(0.1);
        let speed = controller.camera().velocity.length();
        assert!(speed <= last);
        assert!(controller.camera().velocity.x >= 0.0);
        last = speed;
        steps += 1;
        assert!(steps < 1000, "inertia never settled");
    }

    let resting = controller.camera().position;
    for _ in 0..10 {
        controller.update(0.1);
    }
    assert_eq!(controller.camera().position, resting);
}

#[test]
fn reset_clears_pan_and_zoom() {
    let mut controller = NavigationController::default();
    controller.push_event(InputEvent::PointerMoved(Vector2::new(10.0, 10.0)));
    controller.push_event(InputEvent::PointerPressed);
    controller.push_event(InputEvent::PointerMoved(Vector2::new(60.0, 40.0)));
    controller.push_event(InputEvent::PointerReleased);
    controller.push_event(InputEvent::Wheel(1.0));
    controller.update(0.05);

    controller.push_event(InputEvent::Command(Command::Reset));
    let snapshot = controller.update(0.05);

    assert_eq!(snapshot.camera_position, Vector2::ZERO);
    assert_eq!(snapshot.camera_scale, 1.0);
    assert_eq!(controller.camera().velocity, Vector2::ZERO);
    assert_eq!(snapshot.lamp_position, Vector2::ZERO);
}

// ---------------------------------------------------------------------------
// Lamp
// ---------------------------------------------------------------------------

#[test]
fn lamp_fades_in_within_one_second() {
    let mut controller = NavigationController::default();
    controller.push_event(InputEvent::Command(Command::ToggleLamp));

    for _ in 0..5 {
        controller.update(0.2);
    }
    assert_eq!(controller.lamp().shadow, 0.8);

    controller.update(0.2);
    assert_eq!(controller.lamp().shadow, 0.8);

    controller.push_event(InputEvent::Command(Command::ToggleLamp));
    for _ in 0..5 {
        controller.update(0.2);
    }
    assert_eq!(controller.lamp().shadow, 0.0);
}

#[test]
fn ctrl_wheel_grows_lamp_instead_of_zooming() {
    let mut controller = NavigationController::default();
    controller.push_event(InputEvent::Command(Command::ToggleLamp));
    controller.push_event(InputEvent::ControlChanged(true));
    controller.push_event(InputEvent::Wheel(1.0));

    for _ in 0..200 {
        controller.update(0.016);
    }
    let snapshot = controller.snapshot();

    assert_eq!(snapshot.camera_scale, 1.0);
    assert!(snapshot.lamp_radius > 60.0);
    assert!(controller.lamp().delta_radius.abs() <= 1.0);
}

#[test]
fn custom_params_change_dynamics() {
    let params = NavigationParams {
        min_scale: 0.25,
        max_shadow: 0.5,
        ..Default::default()
    };
    let mut controller = NavigationController::new(params);
    controller.push_event(InputEvent::Command(Command::ToggleLamp));
    for _ in 0..10 {
        controller.push_event(InputEvent::Wheel(-1.0));
    }
    for _ in 0..20 {
        controller.update(0.1);
    }

    assert_eq!(controller.camera().scale, 0.25);
    assert_eq!(controller.lamp().shadow, 0.5);
}
