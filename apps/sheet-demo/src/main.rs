use snapkit_foundation::EventClock;
use snapkit_testing::SurfaceRobot;
use snapkit_ui::prelude::*;
use snapkit_ui::Size;
use std::time::Duration;

const SCREEN_HEIGHT: f32 = 900.0;
const DRAWER_WIDTH: f32 = 320.0;
const VIEWPORT: Size = Size::new(420.0, SCREEN_HEIGHT);

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== snapkit sheet demo ===");
    println!("Scripted gestures on a bottom sheet and an edge drawer.");
    println!("Set RUST_LOG=debug to see snap decisions.");
    println!();

    if let Err(err) = run() {
        log::error!("demo failed: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), SurfaceError> {
    realtime_open()?;
    sheet_script()?;
    share_sheet_script()?;
    drawer_script()?;
    Ok(())
}

fn log_events(name: &'static str, surface: &SurfacePresenter) {
    surface.add_listener(move |event| log::info!("{}: {:?}", name, event));
}

/// Plays the opening animation against the wall clock.
fn realtime_open() -> Result<(), SurfaceError> {
    let sheet = mount_surface(
        SurfaceKind::Sheet,
        SurfaceConfig::sheet().with_extent(SCREEN_HEIGHT),
    )?;
    log_events("realtime", &sheet);

    let clock = EventClock::new();
    sheet.on_frame(clock.now_nanos());
    sheet.open(None)?;
    while sheet.is_animating() {
        std::thread::sleep(Duration::from_millis(16));
        sheet.on_frame(clock.now_nanos());
        log::debug!("realtime: offset {:.1}", sheet.offset());
    }
    log::info!(
        "realtime: rested at {:?} after {} ms",
        sheet.current_snap(),
        clock.now_ms()
    );
    Ok(())
}

fn sheet_script() -> Result<(), SurfaceError> {
    let sheet = mount_surface(
        SurfaceKind::Sheet,
        SurfaceConfig::sheet().with_extent(SCREEN_HEIGHT),
    )?;
    log_events("sheet", &sheet);
    let mut robot = SurfaceRobot::new(sheet);

    robot.presenter().open(None)?;
    robot.wait_for_idle();
    report(&robot, "opened");

    let half = robot.presenter().offset();
    robot.drag((200.0, half + 20.0), (200.0, half - 30.0), 50, 5);
    robot.wait_for_idle();
    report(&robot, "flicked up");

    let full = robot.presenter().offset();
    robot.drag_and_hold((200.0, full + 20.0), (200.0, full + 420.0), 400, 20, 80);
    robot.wait_for_idle();
    report(&robot, "slow drag down");

    robot.tap(200.0, 10.0);
    robot.wait_for_idle();
    report(&robot, "scrim tap");
    Ok(())
}

fn share_sheet_script() -> Result<(), SurfaceError> {
    let sheet = mount_surface(
        SurfaceKind::Sheet,
        SurfaceConfig::share_sheet()
            .with_extent(SCREEN_HEIGHT)
            .with_chrome(SheetChrome::new(56.0, 72.0)),
    )?;
    log_events("share", &sheet);
    let list = ScrollPosition::new(0.0);
    list.set_max_value(1200.0);
    sheet.set_content_scroll(std::rc::Rc::new(list.clone()));

    let mut robot = SurfaceRobot::new(sheet);
    robot.presenter().open(Some(SnapPoint::Full))?;
    robot.wait_for_idle();
    report(&robot, "share opened");

    list.scroll_to(300.0);
    let y = robot.presenter().offset() + 200.0;
    let taken = robot.press(200.0, y);
    robot.cancel();
    log::info!("share: press over scrolled list taken by sheet: {}", taken);

    list.scroll_to(0.0);
    robot.drag((200.0, y), (200.0, y + 60.0), 40, 4);
    robot.wait_for_idle();
    report(&robot, "share dragged from list top");
    log::info!(
        "share: footer shift {:.1}",
        robot.presenter().footer_offset()
    );
    Ok(())
}

fn drawer_script() -> Result<(), SurfaceError> {
    let drawer = mount_surface(SurfaceKind::Drawer, SurfaceConfig::drawer(DRAWER_WIDTH))?;
    log_events("drawer", &drawer);
    let mut robot = SurfaceRobot::new(drawer);

    log::info!(
        "drawer: hover at edge previews: {}",
        robot.hover(8.0, 300.0)
    );
    log::info!(
        "drawer: press away from edge taken: {}",
        robot.press(120.0, 300.0)
    );

    robot.drag((4.0, 300.0), (260.0, 300.0), 160, 8);
    robot.wait_for_idle();
    report(&robot, "edge swipe");

    robot.drag((280.0, 300.0), (200.0, 300.0), 40, 4);
    robot.wait_for_idle();
    report(&robot, "swipe back");
    Ok(())
}

fn report(robot: &SurfaceRobot, label: &str) {
    let presenter = robot.presenter();
    log::info!(
        "{}: {:?} at {:?}, bounds {:?}, scrim {:.2}, largest frame jump {:.1}",
        label,
        presenter.phase(),
        presenter.current_snap(),
        presenter.surface_rect(VIEWPORT),
        presenter.scrim_opacity(),
        robot.max_frame_jump()
    );
}
