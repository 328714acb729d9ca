//! Canvas gesture listeners feeding the interaction controller.

use brotscope_core::{Gesture, InteractionController, SurfacePoint, ViewportControl};
use leptos::*;
use wasm_bindgen::closure::WasmClosure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, PointerEvent, TouchEvent, TouchList, WheelEvent};

/// Handle returned by the canvas interaction hook.
pub struct InteractionHandle {
    /// Whether a pointer or single-touch drag is in progress.
    pub is_dragging: Signal<bool>,
}

/// Inline style for an interactive canvas: no browser touch panning, and a
/// grab cursor that closes while dragging.
pub fn canvas_style(is_dragging: bool) -> &'static str {
    if is_dragging {
        "touch-action: none; cursor: grabbing;"
    } else {
        "touch-action: none; cursor: grab;"
    }
}

fn surface_point(canvas: &HtmlCanvasElement, client_x: f64, client_y: f64) -> SurfacePoint {
    let rect = canvas.get_bounding_client_rect();
    SurfacePoint::new(client_x - rect.left(), client_y - rect.top())
}

fn touch_points(canvas: &HtmlCanvasElement, touches: &TouchList) -> Vec<SurfacePoint> {
    (0..touches.length())
        .filter_map(|i| touches.get(i))
        .map(|t| surface_point(canvas, t.client_x() as f64, t.client_y() as f64))
        .collect()
}

fn listen<T>(
    canvas: &HtmlCanvasElement,
    event: &str,
    passive: bool,
    closure: Closure<T>,
) -> Result<(), JsValue>
where
    T: ?Sized + WasmClosure,
{
    let options = web_sys::AddEventListenerOptions::new();
    options.set_passive(passive);
    canvas.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

/// Build the gesture sink shared by every listener of one canvas.
///
/// The viewport signal is only written when a gesture actually moves the
/// view, so renders keyed on it do not fire for a bare pointer-down.
fn gesture_applier<V>(
    viewport: RwSignal<V>,
    is_dragging: RwSignal<bool>,
) -> impl Fn(&HtmlCanvasElement, Gesture) + Copy + 'static
where
    V: ViewportControl + Clone + 'static,
{
    let controller = store_value(InteractionController::new());

    move |canvas: &HtmlCanvasElement, gesture: Gesture| {
        let width = canvas.width() as f64;
        let height = canvas.height() as f64;

        let mut next = viewport.get_untracked();
        let changed = controller
            .try_update_value(|c| c.handle(&gesture, width, height, &mut next))
            .unwrap_or(false);
        if changed {
            viewport.set(next);
        }

        let dragging = controller
            .try_with_value(|c| c.is_dragging())
            .unwrap_or(false);
        if dragging != is_dragging.get_untracked() {
            is_dragging.set(dragging);
        }
    }
}

/// Attach pointer, wheel and touch listeners to `canvas_ref` and apply every
/// gesture to `viewport`.
///
/// Wheel and touch listeners are non-passive: the page must not scroll or
/// zoom while the canvas handles the gesture.
pub fn use_canvas_interaction<V>(
    canvas_ref: NodeRef<leptos::html::Canvas>,
    viewport: RwSignal<V>,
) -> InteractionHandle
where
    V: ViewportControl + Clone + 'static,
{
    let is_dragging = create_rw_signal(false);
    let apply = gesture_applier(viewport, is_dragging);

    create_effect(move |attached: Option<bool>| {
        if attached == Some(true) {
            return true;
        }
        let Some(canvas_el) = canvas_ref.get() else {
            return false;
        };
        let canvas: HtmlCanvasElement = canvas_el.unchecked_ref::<HtmlCanvasElement>().clone();

        if let Err(e) = attach_listeners(&canvas, apply) {
            log::error!("Failed to attach canvas listeners: {:?}", e);
            return false;
        }
        true
    });

    InteractionHandle {
        is_dragging: is_dragging.into(),
    }
}

fn attach_listeners<A>(canvas: &HtmlCanvasElement, apply: A) -> Result<(), JsValue>
where
    A: Fn(&HtmlCanvasElement, Gesture) + Copy + 'static,
{
    let c = canvas.clone();
    let on_pointer_down = Closure::<dyn FnMut(PointerEvent)>::new(move |e: PointerEvent| {
        // Keep receiving moves when the pointer leaves the canvas mid-drag
        let _ = c.set_pointer_capture(e.pointer_id());
        let at = surface_point(&c, e.client_x() as f64, e.client_y() as f64);
        apply(&c, Gesture::PointerDown(at));
    });
    listen(canvas, "pointerdown", true, on_pointer_down)?;

    let c = canvas.clone();
    let on_pointer_move = Closure::<dyn FnMut(PointerEvent)>::new(move |e: PointerEvent| {
        // Touch drags arrive through the touch listeners
        if e.pointer_type() == "touch" {
            return;
        }
        let at = surface_point(&c, e.client_x() as f64, e.client_y() as f64);
        apply(&c, Gesture::PointerMove(at));
    });
    listen(canvas, "pointermove", true, on_pointer_move)?;

    for name in ["pointerup", "pointercancel"] {
        let c = canvas.clone();
        let on_pointer_up = Closure::<dyn FnMut(PointerEvent)>::new(move |_: PointerEvent| {
            apply(&c, Gesture::PointerUp);
        });
        listen(canvas, name, true, on_pointer_up)?;
    }

    let c = canvas.clone();
    let on_wheel = Closure::<dyn FnMut(WheelEvent)>::new(move |e: WheelEvent| {
        e.prevent_default();
        let at = surface_point(&c, e.client_x() as f64, e.client_y() as f64);
        apply(
            &c,
            Gesture::Wheel {
                delta_y: e.delta_y(),
                at,
            },
        );
    });
    listen(canvas, "wheel", false, on_wheel)?;

    let c = canvas.clone();
    let on_touch_start = Closure::<dyn FnMut(TouchEvent)>::new(move |e: TouchEvent| {
        e.prevent_default();
        apply(&c, Gesture::TouchStart(touch_points(&c, &e.touches())));
    });
    listen(canvas, "touchstart", false, on_touch_start)?;

    let c = canvas.clone();
    let on_touch_move = Closure::<dyn FnMut(TouchEvent)>::new(move |e: TouchEvent| {
        e.prevent_default();
        apply(&c, Gesture::TouchMove(touch_points(&c, &e.touches())));
    });
    listen(canvas, "touchmove", false, on_touch_move)?;

    let c = canvas.clone();
    let on_touch_end = Closure::<dyn FnMut(TouchEvent)>::new(move |e: TouchEvent| {
        // Lifting one finger of a pinch continues as a single-touch drag
        let remaining = touch_points(&c, &e.touches());
        if remaining.is_empty() {
            apply(&c, Gesture::TouchEnd);
        } else {
            apply(&c, Gesture::TouchStart(remaining));
        }
    });
    listen(canvas, "touchend", false, on_touch_end)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use brotscope_core::ViewportState;
    use wasm_bindgen_test::*;
    use web_sys::{PointerEventInit, WheelEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    fn attached_canvas() -> HtmlCanvasElement {
        let document = web_sys::window().unwrap().document().unwrap();
        let canvas = document
            .create_element("canvas")
            .unwrap()
            .dyn_into::<HtmlCanvasElement>()
            .unwrap();
        canvas.set_width(100);
        canvas.set_height(100);
        document.body().unwrap().append_child(&canvas).unwrap();
        canvas
    }

    fn wheel(delta_y: f64) -> WheelEvent {
        let init = WheelEventInit::new();
        init.set_delta_y(delta_y);
        init.set_cancelable(true);
        WheelEvent::new_with_event_init_dict("wheel", &init).unwrap()
    }

    #[wasm_bindgen_test]
    fn wheel_over_canvas_zooms_viewport() {
        let runtime = create_runtime();
        let canvas = attached_canvas();
        let viewport = create_rw_signal(ViewportState::default());
        let is_dragging = create_rw_signal(false);

        attach_listeners(&canvas, gesture_applier(viewport, is_dragging)).unwrap();
        canvas.dispatch_event(&wheel(-100.0)).unwrap();

        assert!(viewport.get_untracked().zoom > 1.0);
        assert!(!is_dragging.get_untracked());

        canvas.remove();
        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn zero_delta_wheel_leaves_viewport_untouched() {
        let runtime = create_runtime();
        let canvas = attached_canvas();
        let viewport = create_rw_signal(ViewportState::default());
        let is_dragging = create_rw_signal(false);

        attach_listeners(&canvas, gesture_applier(viewport, is_dragging)).unwrap();
        canvas.dispatch_event(&wheel(0.0)).unwrap();

        assert_eq!(viewport.get_untracked(), ViewportState::default());

        canvas.remove();
        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn pointer_down_and_up_toggle_dragging() {
        let runtime = create_runtime();
        let canvas = attached_canvas();
        let viewport = create_rw_signal(ViewportState::default());
        let is_dragging = create_rw_signal(false);

        attach_listeners(&canvas, gesture_applier(viewport, is_dragging)).unwrap();

        let init = PointerEventInit::new();
        init.set_pointer_type("mouse");
        let down = PointerEvent::new_with_event_init_dict("pointerdown", &init).unwrap();
        canvas.dispatch_event(&down).unwrap();
        assert!(is_dragging.get_untracked());

        let up = PointerEvent::new_with_event_init_dict("pointerup", &init).unwrap();
        canvas.dispatch_event(&up).unwrap();
        assert!(!is_dragging.get_untracked());

        canvas.remove();
        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn cursor_closes_while_dragging() {
        assert!(canvas_style(false).contains("cursor: grab;"));
        assert!(canvas_style(true).contains("cursor: grabbing;"));
        assert!(canvas_style(true).starts_with("touch-action: none;"));
    }
}
