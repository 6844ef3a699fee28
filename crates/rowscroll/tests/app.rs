//! Host-side behavior of the browser runtime, driven without a browser.

#![cfg(not(target_arch = "wasm32"))]

use proptest::prelude::*;
use rowscroll::browser::runtime::urls;
use rowscroll::{
    Event, MediaElement, MediaOp, MotionPreference, MouseButton, Point, Runtime, Size, Widget,
};
use rowscroll_test::{fixture, Harness};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn fixture_runtime(motion: MotionPreference) -> Runtime {
    let yaml = fixture::manifest_yaml(fixture::three_records());
    Runtime::from_manifest(&yaml, Size::new(1024.0, 768.0), motion).unwrap()
}

fn row_center(runtime: &Runtime, index: usize) -> Point {
    runtime.list().rows()[index].bounds().center()
}

#[test]
fn test_press_release_click_still_expands() {
    let mut harness = Harness::builtin();
    harness.press("row-4").assert_dragging(true);
    harness.release().assert_dragging(false);
    harness.click("row-4").assert_expanded(Some(4));
    harness.settle().assert_exists("[data-testid='panel-4']");
}

#[test]
fn test_release_outside_the_list_ends_drag() {
    let mut rt = fixture_runtime(MotionPreference::Reduced);
    let p = row_center(&rt, 0);
    rt.handle(&Event::MouseDown {
        position: p,
        button: MouseButton::Left,
    });
    assert!(rt.state().is_dragging());
    rt.handle(&Event::MouseUp {
        position: Point::new(-40.0, -40.0),
        button: MouseButton::Left,
    });
    assert!(!rt.state().is_dragging());
}

#[test]
fn test_direct_media_mounts_video_with_current_mute() {
    let mut rt = fixture_runtime(MotionPreference::Reduced);
    rt.frame(0.0);

    rt.handle(&Event::MouseMove {
        position: row_center(&rt, 1),
    });
    let frame = rt.frame(FRAME_MS).unwrap();
    assert_eq!(
        frame.media,
        MediaOp::Mount(MediaElement::Video {
            src: "https://cdn.example.com/gojira.mp4".to_string(),
            muted: true,
        })
    );

    let button = rt.list().header().button_bounds().center();
    rt.handle(&Event::MouseMove { position: button });
    assert_eq!(rt.frame(2.0 * FRAME_MS).unwrap().media, MediaOp::Clear);
    for event in [
        Event::MouseDown {
            position: button,
            button: MouseButton::Left,
        },
        Event::MouseUp {
            position: button,
            button: MouseButton::Left,
        },
        Event::Click {
            position: button,
            button: MouseButton::Left,
        },
    ] {
        rt.handle(&event);
    }
    assert!(!rt.state().is_muted());

    rt.handle(&Event::MouseMove {
        position: row_center(&rt, 1),
    });
    let frame = rt.frame(3.0 * FRAME_MS).unwrap();
    assert!(matches!(
        frame.media,
        MediaOp::Mount(MediaElement::Video { muted: false, .. })
    ));
}

#[test]
fn test_unresolvable_media_shows_an_empty_panel() {
    let mut rt = fixture_runtime(MotionPreference::Reduced);
    rt.handle(&Event::MouseMove {
        position: row_center(&rt, 2),
    });
    let frame = rt.frame(0.0).unwrap();
    let surface = frame.surface.unwrap();
    assert_eq!(surface.row, 2);
    assert_eq!(surface.element, None);
    assert_eq!(frame.media, MediaOp::Keep);
}

#[test]
fn test_expanded_row_link_opens_outbound_url() {
    let mut harness = Harness::builtin();
    harness.click("row-0").settle();
    harness.click_link("panel-0");
    let commands = harness.take_commands();
    let opened: Vec<&str> = commands.iter().flat_map(urls).collect();
    assert_eq!(opened.len(), 1);
    assert!(opened[0].contains("youtube.com"));
    harness.assert_expanded(Some(0));
}

#[test]
fn test_resize_reclamps_the_preview() {
    let mut rt = fixture_runtime(MotionPreference::Reduced);
    let p = Point::new(900.0, row_center(&rt, 0).y);
    rt.handle(&Event::MouseMove { position: p });
    rt.handle(&Event::Resize {
        width: 800.0,
        height: 600.0,
    });
    let frame = rt.frame(0.0).unwrap();
    let bounds = frame.surface.unwrap().bounds;
    assert!(bounds.right() <= 800.0);
    assert!(bounds.bottom() <= 600.0);
}

fn event_strategy() -> impl Strategy<Value = Event> {
    let point = (0.0f32..1024.0, 0.0f32..768.0).prop_map(|(x, y)| Point::new(x, y));
    prop_oneof![
        5 => point.clone().prop_map(|position| Event::MouseMove { position }),
        1 => point.clone().prop_map(|position| Event::MouseDown {
            position,
            button: MouseButton::Left,
        }),
        1 => point.clone().prop_map(|position| Event::MouseUp {
            position,
            button: MouseButton::Left,
        }),
        2 => point.clone().prop_map(|position| Event::Click {
            position,
            button: MouseButton::Left,
        }),
        1 => Just(Event::MouseLeave),
        1 => (point, -300.0f32..300.0).prop_map(|(position, delta_y)| Event::Wheel {
            position,
            delta_y,
        }),
    ]
}

proptest! {
    #[test]
    fn test_media_ops_track_the_surface(
        steps in prop::collection::vec((event_strategy(), 0u8..6), 1..50)
    ) {
        let mut rt = fixture_runtime(MotionPreference::Full);
        let mut dom: Option<MediaElement> = None;
        let mut t = 0.0;

        for (event, frames) in steps {
            rt.handle(&event);
            for _ in 0..=frames {
                t += FRAME_MS;
                let Some(frame) = rt.frame(t) else { continue };
                match frame.media {
                    MediaOp::Keep => {}
                    MediaOp::Clear => dom = None,
                    MediaOp::Mount(element) => dom = Some(element),
                    MediaOp::SetMuted(muted) => {
                        if let Some(MediaElement::Video { muted: m, .. }) = dom.as_mut() {
                            *m = muted;
                        }
                    }
                }
                let expected = frame.surface.and_then(|s| s.element);
                prop_assert_eq!(&dom, &expected);
            }
        }
    }
}
