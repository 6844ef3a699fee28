//! Browser event handling: converts DOM events to rowscroll [`Event`]s.

use rowscroll_core::{Event, MouseButton, Point, Size, TouchId};
use web_sys::{Element, MouseEvent, TouchEvent, WheelEvent};

/// Pixels per line for line-mode wheel deltas.
const WHEEL_LINE_HEIGHT: f32 = 20.0;

/// Top-left of `element` in client coordinates.
pub fn client_origin(element: &Element) -> Point {
    let rect = element.get_bounding_client_rect();
    Point::new(rect.left() as f32, rect.top() as f32)
}

/// Convert a DOM mouse event of type `event_type`.
///
/// `origin` is the canvas's client position; `mouseup` arrives from the
/// window, so offsets relative to the target would be wrong there.
pub fn mouse_event_to_rowscroll(event: &MouseEvent, event_type: &str, origin: Point) -> Option<Event> {
    let position = Point::new(
        event.client_x() as f32 - origin.x,
        event.client_y() as f32 - origin.y,
    );
    let button = MouseButton::from_dom(event.button());

    match event_type {
        "mousemove" => Some(Event::MouseMove { position }),
        "mousedown" => Some(Event::MouseDown { position, button }),
        "mouseup" => Some(Event::MouseUp { position, button }),
        "click" => Some(Event::Click { position, button }),
        "mouseleave" => Some(Event::MouseLeave),
        _ => None,
    }
}

/// Convert a DOM `wheel` event to a pixel scroll. Page-mode deltas scroll
/// by `page_height`.
pub fn wheel_event_to_rowscroll(event: &WheelEvent, origin: Point, page_height: f32) -> Event {
    let position = Point::new(
        event.client_x() as f32 - origin.x,
        event.client_y() as f32 - origin.y,
    );
    let delta = event.delta_y() as f32;
    let delta_y = match event.delta_mode() {
        WheelEvent::DOM_DELTA_LINE => delta * WHEEL_LINE_HEIGHT,
        WheelEvent::DOM_DELTA_PAGE => delta * page_height,
        _ => delta,
    };
    Event::Wheel { position, delta_y }
}

/// Convert a DOM touch event, one [`Event`] per changed touch.
pub fn touch_event_to_rowscroll(event: &TouchEvent, event_type: &str, origin: Point) -> Vec<Event> {
    let touches = event.changed_touches();
    let mut events = Vec::with_capacity(touches.length() as usize);

    for i in 0..touches.length() {
        let Some(touch) = touches.get(i) else {
            continue;
        };
        let id = TouchId(touch.identifier());
        let position = Point::new(
            touch.client_x() as f32 - origin.x,
            touch.client_y() as f32 - origin.y,
        );
        match event_type {
            "touchstart" => events.push(Event::TouchStart { id, position }),
            "touchend" => events.push(Event::TouchEnd { id, position }),
            "touchcancel" => events.push(Event::TouchCancel { id }),
            _ => {}
        }
    }

    events
}

/// Current window inner size.
pub fn viewport_size(window: &web_sys::Window) -> Option<Size> {
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Size::new(width as f32, height as f32))
}
