//! End-to-end visibility checks against fake screens.

mod common;

use std::time::{Duration, Instant};

use clickshot_core::capture::{CaptureError, CaptureTarget, UnsupportedScreen};
use clickshot_core::matchers::{
    Matcher, assert_that, eventually_visible, eventually_visible_within, is, visible,
};
use clickshot_core::reference::ReferenceError;
use clickshot_core::{MatchError, Rect, RegionError, Session, WaitConfig};

use common::{FrameSequence, SharedScreen, blank_screen, paint, region, textured, write_reference};

const OK_BUTTON: Rect = Rect::new(1485, 1051, 134, 51);

fn page_properties() -> clickshot_core::Region {
    region(
        "page_properties",
        CaptureTarget::window("Page Properties"),
        &[("ok_button", OK_BUTTON)],
    )
}

fn dialog_with_ok_button() -> image::RgbaImage {
    let mut screen = blank_screen(1700, 1150);
    paint(&mut screen, &textured(134, 51, 1), OK_BUTTON);
    screen
}

fn images_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_reference(dir.path(), "page_properties", "ok_button", &textured(134, 51, 1));
    dir
}

#[test]
fn test_ok_button_is_visible() {
    let images = images_dir();
    let session = Session::builder()
        .screen(SharedScreen::new(dialog_with_ok_button()))
        .images_dir(images.path())
        .build();
    let region = page_properties();
    let ok_button = session.element(&region, "ok_button").unwrap();

    assert_that(&ok_button, is(visible()));

    let result = ok_button.match_once().unwrap();
    assert!(result.found);
    assert_eq!(result.rect, Some(OK_BUTTON));
    assert!(result.confidence > 0.999);
}

#[test]
fn test_visible_is_single_shot_and_repeatable() {
    let images = images_dir();
    let screen = SharedScreen::new(dialog_with_ok_button());
    let session = Session::builder()
        .screen(screen.clone())
        .images_dir(images.path())
        .build();
    let region = page_properties();
    let ok_button = session.element(&region, "ok_button").unwrap();

    let first = visible().check(&ok_button).unwrap();
    let second = visible().check(&ok_button).unwrap();

    assert!(first.passed && second.passed);
    assert_eq!(first.details, second.details);
    assert_eq!(screen.capture_count(), 2);
}

#[test]
fn test_missing_element_fails_and_saves_searched_area() {
    let images = images_dir();
    let failures = tempfile::tempdir().unwrap();
    let screen = SharedScreen::new(blank_screen(1700, 1150));
    let session = Session::builder()
        .screen(screen.clone())
        .images_dir(images.path())
        .failure_dir(failures.path())
        .build();
    let region = page_properties();
    let ok_button = session.element(&region, "ok_button").unwrap();

    let result = visible().check(&ok_button).unwrap();

    assert!(!result.passed);
    assert!(result.message.contains("is not visible"));
    assert_eq!(screen.capture_count(), 1);

    let saved = failures.path().join("page_properties-ok_button.png");
    let image = image::open(&saved).unwrap();
    // expected rect grown by the default 16px search margin
    assert_eq!((image.width(), image.height()), (134 + 32, 51 + 32));
}

#[test]
#[should_panic(expected = "is not visible")]
fn test_assert_that_panics_on_failure() {
    let images = images_dir();
    let session = Session::builder()
        .screen(SharedScreen::new(blank_screen(1700, 1150)))
        .images_dir(images.path())
        .build();
    let region = page_properties();

    assert_that(&session.element(&region, "ok_button").unwrap(), is(visible()));
}

#[test]
fn test_unknown_element_is_reported_with_available_names() {
    let session = Session::builder()
        .screen(SharedScreen::new(blank_screen(10, 10)))
        .build();
    let region = page_properties();

    let err = session.element(&region, "cancel_button").unwrap_err();
    match err {
        RegionError::UnknownElement {
            element, available, ..
        } => {
            assert_eq!(element, "cancel_button");
            assert_eq!(available, "ok_button");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_eventually_visible_polls_until_found() {
    let images = images_dir();
    let session = Session::builder()
        .screen(FrameSequence::new(vec![
            blank_screen(1700, 1150),
            blank_screen(1700, 1150),
            dialog_with_ok_button(),
        ]))
        .images_dir(images.path())
        .wait(WaitConfig::from_millis(5_000, 10))
        .build();
    let region = page_properties();
    let ok_button = session.element(&region, "ok_button").unwrap();

    let result = eventually_visible().check(&ok_button).unwrap();

    assert!(result.passed, "{}", result.message);
    let details = result.details.unwrap();
    assert_eq!(details["attempts"], 3);
    assert_eq!(details["found"], true);
}

#[test]
fn test_eventually_visible_times_out_within_one_interval() {
    let images = tempfile::tempdir().unwrap();
    write_reference(images.path(), "sidebar", "title", &textured(20, 10, 5));
    let session = Session::builder()
        .screen(SharedScreen::new(blank_screen(100, 60)))
        .images_dir(images.path())
        .build();
    let sidebar = region(
        "sidebar",
        CaptureTarget::app("Firefox"),
        &[("title", Rect::new(10, 10, 20, 10))],
    );
    let title = session.element(&sidebar, "title").unwrap();

    let timeout = Duration::from_millis(300);
    let interval = Duration::from_millis(50);
    let start = Instant::now();
    let result = eventually_visible_within(timeout, interval)
        .check(&title)
        .unwrap();
    let elapsed = start.elapsed();

    assert!(!result.passed);
    assert!(result.message.contains("did not become visible within 300ms"));
    assert!(elapsed >= timeout, "returned early after {elapsed:?}");
    assert!(elapsed < timeout + interval, "overran the deadline: {elapsed:?}");
}

#[test]
fn test_eventually_visible_deadline_holds_for_large_elements() {
    let images = tempfile::tempdir().unwrap();
    write_reference(images.path(), "popup", "empty_popup", &textured(300, 180, 9));
    let session = Session::builder()
        .screen(SharedScreen::new(blank_screen(1400, 400)))
        .images_dir(images.path())
        .build();
    let popup = region(
        "popup",
        CaptureTarget::app("Firefox"),
        &[("empty_popup", Rect::new(900, 120, 300, 180))],
    );
    let empty_popup = session.element(&popup, "empty_popup").unwrap();

    let timeout = Duration::from_millis(300);
    let interval = Duration::from_millis(250);
    let start = Instant::now();
    let result = eventually_visible_within(timeout, interval)
        .check(&empty_popup)
        .unwrap();
    let elapsed = start.elapsed();

    assert!(!result.passed);
    assert!(elapsed >= timeout, "returned early after {elapsed:?}");
    assert!(elapsed < timeout + interval, "overran the deadline: {elapsed:?}");
}

#[test]
fn test_capture_errors_propagate_instead_of_failing_the_assertion() {
    let images = images_dir();
    let session = Session::builder()
        .screen(UnsupportedScreen)
        .images_dir(images.path())
        .build();
    let region = page_properties();
    let ok_button = session.element(&region, "ok_button").unwrap();

    let err = visible().check(&ok_button).unwrap_err();
    assert!(matches!(err, MatchError::Capture(CaptureError::Unsupported)));

    let start = Instant::now();
    let err = eventually_visible().check(&ok_button).unwrap_err();
    assert!(matches!(err, MatchError::Capture(CaptureError::Unsupported)));
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[test]
fn test_missing_reference_image_is_an_error() {
    let images = tempfile::tempdir().unwrap();
    let session = Session::builder()
        .screen(SharedScreen::new(dialog_with_ok_button()))
        .images_dir(images.path())
        .build();
    let region = page_properties();
    let ok_button = session.element(&region, "ok_button").unwrap();

    let err = ok_button.match_once().unwrap_err();
    assert!(matches!(
        err,
        MatchError::Reference(ReferenceError::NotFound { .. })
    ));
}
