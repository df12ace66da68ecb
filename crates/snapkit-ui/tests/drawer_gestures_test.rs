//! End-to-end edge drawer gestures driven through the robot.

use snapkit_testing::SurfaceRobot;
use snapkit_ui::*;

fn drawer_robot() -> SurfaceRobot {
    let drawer =
        mount_surface(SurfaceKind::Drawer, SurfaceConfig::drawer(300.0)).expect("valid config");
    SurfaceRobot::new(drawer)
}

fn open_drawer() -> SurfaceRobot {
    let mut robot = drawer_robot();
    robot.presenter().open(None).expect("valid snap");
    assert!(robot.wait_for_idle());
    robot.clear_frames();
    robot
}

#[test]
fn closed_drawer_gates_on_edge_band() {
    let mut robot = drawer_robot();
    assert!(!robot.press(50.0, 300.0));
    assert_eq!(robot.release(50.0, 300.0), 0);
    assert!(robot.press(5.0, 300.0));
    assert!(robot.presenter().is_dragging());
}

#[test]
fn edge_swipe_opens() {
    let mut robot = drawer_robot();
    robot.drag((5.0, 300.0), (250.0, 300.0), 200, 10);
    assert!(robot.wait_for_idle());
    robot.assert_resting_at(SnapPoint::Open);
    assert_eq!(robot.presenter().revealed(), 300.0);
}

#[test]
fn slow_partial_swipe_opens_past_half_width() {
    let mut robot = drawer_robot();
    robot.drag_and_hold((5.0, 300.0), (200.0, 300.0), 400, 20, 100);
    assert!(robot.wait_for_idle());
    robot.assert_resting_at(SnapPoint::Open);
}

#[test]
fn slow_short_swipe_falls_back_closed() {
    let mut robot = drawer_robot();
    robot.drag_and_hold((5.0, 300.0), (100.0, 300.0), 400, 20, 100);
    assert!(robot.wait_for_idle());
    assert_eq!(robot.presenter().phase(), SurfacePhase::Closed);
}

#[test]
fn leftward_flick_closes() {
    let mut robot = open_drawer();
    robot.drag((250.0, 300.0), (200.0, 300.0), 30, 3);
    assert_eq!(robot.presenter().target_snap(), Some(SnapPoint::Closed));
    assert!(robot.wait_for_idle());
    assert_eq!(robot.presenter().phase(), SurfacePhase::Closed);
    assert_eq!(robot.dispatcher().subscriber_count(), 0);
}

#[test]
fn drawer_never_drags_past_fully_open() {
    let mut robot = open_drawer();
    assert!(robot.press(200.0, 300.0));
    robot.advance_time(16);
    robot.move_to(600.0, 300.0);
    assert_eq!(robot.presenter().offset(), 0.0);
    assert_eq!(robot.presenter().revealed(), 300.0);
}

#[test]
fn scrim_tap_closes_open_drawer() {
    let mut robot = open_drawer();
    assert!(robot.tap(600.0, 300.0));
    assert!(robot.wait_for_idle());
    assert_eq!(robot.presenter().phase(), SurfacePhase::Closed);
}

#[test]
fn hover_preview_in_edge_band() {
    let mut robot = drawer_robot();
    assert!(robot.hover(12.0, 300.0));
    assert!(robot.presenter().is_edge_hover());
    assert!(!robot.hover(30.0, 300.0));
}

#[test]
fn scrim_tracks_reveal_during_drag() {
    let mut robot = drawer_robot();
    assert!(robot.press(5.0, 300.0));
    let mut previous = robot.presenter().scrim_opacity();
    for x in [50.0, 100.0, 150.0, 200.0, 250.0] {
        robot.advance_time(16);
        robot.move_to(x, 300.0);
        let opacity = robot.presenter().scrim_opacity();
        assert!(opacity > previous, "scrim did not deepen at x={}", x);
        previous = opacity;
    }
    assert!(previous <= 0.5);
}
