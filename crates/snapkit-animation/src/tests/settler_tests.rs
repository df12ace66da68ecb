use super::*;

const FRAME: f32 = 1.0 / 60.0;

fn run_to_completion(settler: &mut MotionSettler, max_frames: usize) -> Option<AnimationId> {
    for _ in 0..max_frames {
        if let SettleStatus::Completed(id) = settler.step(FRAME) {
            return Some(id);
        }
    }
    None
}

#[test]
fn idle_settler_reports_idle() {
    let mut settler = MotionSettler::new(42.0);
    assert_eq!(settler.step(FRAME), SettleStatus::Idle);
    assert_eq!(settler.value(), 42.0);
}

#[test]
fn settles_exactly_on_target() {
    let mut settler = MotionSettler::new(800.0);
    let id = settler.animate_to(400.0, SpringSpec::snap(), None);

    let completed = run_to_completion(&mut settler, 600);
    assert_eq!(completed, Some(id));
    assert_eq!(settler.value(), 400.0, "final value is pinned to the target");
    assert_eq!(settler.velocity(), 0.0);
    assert!(!settler.is_animating());
}

#[test]
fn completion_is_reported_once() {
    let mut settler = MotionSettler::new(0.0);
    settler.animate_to(10.0, SpringSpec::open(), None);
    assert!(run_to_completion(&mut settler, 600).is_some());

    for _ in 0..10 {
        assert_eq!(settler.step(FRAME), SettleStatus::Idle);
    }
}

#[test]
fn critically_damped_spring_does_not_overshoot_from_rest() {
    let mut settler = MotionSettler::new(1000.0);
    settler.animate_to(100.0, SpringSpec::dismiss(), None);
    for _ in 0..600 {
        settler.step(FRAME);
        assert!(
            settler.value() >= 100.0 - 0.01,
            "value {} overshot the target",
            settler.value()
        );
    }
}

#[test]
fn continuing_velocity_seeds_the_spring() {
    let mut settler = MotionSettler::new(500.0);
    settler.animate_to(400.0, SpringSpec::snap(), Some(2000.0));
    assert_eq!(settler.velocity(), 2000.0);

    settler.step(FRAME);
    assert!(
        settler.value() > 500.0,
        "a downward release keeps moving down briefly, got {}",
        settler.value()
    );
}

#[test]
fn interrupt_preserves_position_and_velocity() {
    let mut settler = MotionSettler::new(700.0);
    settler.animate_to(400.0, SpringSpec::snap(), None);

    // ~100ms in flight.
    for _ in 0..6 {
        settler.step(FRAME);
    }
    let value_before = settler.value();
    let velocity_before = settler.velocity();
    assert!(velocity_before < 0.0, "moving toward the smaller offset");

    settler.interrupt(100.0);
    assert_eq!(settler.value(), value_before);
    assert_eq!(settler.velocity(), velocity_before);

    settler.step(0.001);
    assert!(
        (settler.value() - value_before).abs() <= velocity_before.abs() * 0.001 + 0.5,
        "no discontinuity right after the interrupt"
    );
    assert!(run_to_completion(&mut settler, 600).is_some());
    assert_eq!(settler.value(), 100.0);
}

#[test]
fn interrupt_keeps_spring_spec() {
    let mut settler = MotionSettler::new(0.0);
    let spec = SpringSpec::from_coefficients(300.0, 25.0, 0.8);
    settler.animate_to(100.0, spec, None);
    settler.step(FRAME);
    let first = settler.current_animation();
    let second = settler.interrupt(50.0);
    assert_ne!(first, Some(second));
    assert_eq!(settler.current_animation(), Some(second));
}

#[test]
fn superseded_animation_never_completes() {
    let mut settler = MotionSettler::new(0.0);
    let first = settler.animate_to(100.0, SpringSpec::snap(), None);
    settler.step(FRAME);
    let second = settler.animate_to(200.0, SpringSpec::snap(), None);

    let completed = run_to_completion(&mut settler, 600);
    assert_eq!(completed, Some(second));
    assert_ne!(completed, Some(first));
}

#[test]
fn stop_and_snap_cancel_animation() {
    let mut settler = MotionSettler::new(0.0);
    settler.animate_to(100.0, SpringSpec::snap(), None);
    settler.step(FRAME);
    let frozen = settler.value();
    settler.stop();
    assert_eq!(settler.step(FRAME), SettleStatus::Idle);
    assert_eq!(settler.value(), frozen);

    settler.animate_to(100.0, SpringSpec::snap(), None);
    settler.snap_to(250.0);
    assert_eq!(settler.value(), 250.0);
    assert!(!settler.is_animating());
}

#[test]
fn non_positive_or_invalid_dt_is_ignored() {
    let mut settler = MotionSettler::new(0.0);
    settler.animate_to(100.0, SpringSpec::snap(), None);
    assert_eq!(settler.step(0.0), SettleStatus::Running);
    assert_eq!(settler.step(-1.0), SettleStatus::Running);
    assert_eq!(settler.step(f32::NAN), SettleStatus::Running);
    assert_eq!(settler.value(), 0.0);
}

#[test]
fn long_stall_completes_in_one_step() {
    let mut settler = MotionSettler::new(700.0);
    let id = settler.animate_to(400.0, SpringSpec::snap(), None);
    assert_eq!(settler.step(40_000.0), SettleStatus::Completed(id));
    assert_eq!(settler.value(), 400.0);

    let id = settler.animate_to(100.0, SpringSpec::dismiss(), Some(-1500.0));
    assert_eq!(settler.step(1e6), SettleStatus::Completed(id));
    assert_eq!(settler.value(), 100.0);

    let id = settler.animate_to(900.0, SpringSpec::open(), None);
    assert_eq!(settler.step(f32::MAX), SettleStatus::Completed(id));
    assert_eq!(settler.value(), 900.0);
    assert_eq!(settler.velocity(), 0.0);
}

#[test]
fn frame_rate_does_not_change_the_outcome_much() {
    let mut coarse = MotionSettler::new(0.0);
    let mut fine = MotionSettler::new(0.0);
    coarse.animate_to(300.0, SpringSpec::snap(), None);
    fine.animate_to(300.0, SpringSpec::snap(), None);

    for _ in 0..5 {
        coarse.step(0.05);
    }
    for _ in 0..250 {
        fine.step(0.001);
    }
    assert!(
        (coarse.value() - fine.value()).abs() < 1.0,
        "coarse {} vs fine {}",
        coarse.value(),
        fine.value()
    );
}
