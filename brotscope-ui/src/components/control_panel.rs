//! Parameter panels for the two renderers.

use crate::components::ResetButton;
use brotscope_core::{
    ColorStops, PreciseViewport, PrecisionConfig, Rgb, ViewportState, EXPLORER_CONFIG,
};
use leptos::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stop {
    Interior,
    Mid,
    Outer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PreciseField {
    CenterX,
    CenterY,
    Zoom,
}

/// Rebuild `viewport` with one coordinate replaced by user text.
///
/// The other two coordinates go through their decimal form, so the result
/// is parsed uniformly at `precision`.
fn with_precise_field(
    viewport: &PreciseViewport,
    field: PreciseField,
    text: &str,
    precision: &PrecisionConfig,
) -> Result<PreciseViewport, String> {
    let mut cx = viewport.center_x.to_decimal_string();
    let mut cy = viewport.center_y.to_decimal_string();
    let mut zoom = viewport.zoom.to_decimal_string();
    match field {
        PreciseField::CenterX => cx = text.to_string(),
        PreciseField::CenterY => cy = text.to_string(),
        PreciseField::Zoom => zoom = text.to_string(),
    }
    PreciseViewport::from_strings(
        &cx,
        &cy,
        &zoom,
        viewport.max_iterations,
        precision.precision_bits(),
    )
}

#[component]
fn Field(label: &'static str, children: Children) -> impl IntoView {
    view! {
        <label class="field">
            <span class="field-label">{label}</span>
            {children()}
        </label>
    }
}

#[component]
pub fn GpuControls(
    viewport: RwSignal<ViewportState>,
    colors: RwSignal<ColorStops>,
    status: WriteSignal<Option<String>>,
    on_reset: Callback<()>,
    on_handoff: Callback<()>,
) -> impl IntoView {
    let color_input = move |stop: Stop| {
        let value = move || {
            let c = colors.get();
            match stop {
                Stop::Interior => c.interior.to_hex(),
                Stop::Mid => c.mid.to_hex(),
                Stop::Outer => c.outer.to_hex(),
            }
        };
        view! {
            <input
                type="color"
                prop:value=value
                on:input=move |ev| match Rgb::from_hex(&event_target_value(&ev)) {
                    Ok(rgb) => colors.update(|c| match stop {
                        Stop::Interior => c.interior = rgb,
                        Stop::Mid => c.mid = rgb,
                        Stop::Outer => c.outer = rgb,
                    }),
                    Err(e) => status.set(Some(e)),
                }
            />
        }
    };

    let parse_f64 = move |ev: &ev::Event| -> Option<f64> {
        let text = event_target_value(ev);
        match text.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Some(v),
            _ => {
                status.set(Some(format!("Not a number: {text}")));
                None
            }
        }
    };

    view! {
        <div class="control-panel">
            <Field label="Color 1">{color_input(Stop::Interior)}</Field>
            <Field label="Color 2">{color_input(Stop::Mid)}</Field>
            <Field label="Color 3">{color_input(Stop::Outer)}</Field>
            <Field label="Center X">
                <input
                    type="number"
                    step="0.01"
                    prop:value=move || viewport.get().center_x.to_string()
                    on:change=move |ev| {
                        if let Some(v) = parse_f64(&ev) {
                            viewport.update(|vp| vp.center_x = v);
                        }
                    }
                />
            </Field>
            <Field label="Center Y">
                <input
                    type="number"
                    step="0.01"
                    prop:value=move || viewport.get().center_y.to_string()
                    on:change=move |ev| {
                        if let Some(v) = parse_f64(&ev) {
                            viewport.update(|vp| vp.center_y = v);
                        }
                    }
                />
            </Field>
            <Field label="Zoom">
                <input
                    type="number"
                    min=EXPLORER_CONFIG.zoom_min.to_string()
                    max=EXPLORER_CONFIG.zoom_max.to_string()
                    step="0.1"
                    prop:value=move || viewport.get().zoom.to_string()
                    on:change=move |ev| {
                        if let Some(v) = parse_f64(&ev) {
                            viewport.update(|vp| vp.set_zoom(v));
                        }
                    }
                />
            </Field>
            <Field label="Max Iter">
                <input
                    type="number"
                    min="10"
                    max=EXPLORER_CONFIG.fast_iteration_cap.to_string()
                    step="10"
                    prop:value=move || viewport.get().max_iterations.to_string()
                    on:change=move |ev| { match event_target_value(&ev).trim().parse::<u32>() {
                        Ok(v) => viewport.update(|vp| vp.max_iterations = v),
                        Err(e) => status.set(Some(format!("Invalid iteration count: {e}"))),
                    } }
                />
            </Field>
            <ResetButton on_click=on_reset />
            <button class="handoff-button" on:click=move |_| on_handoff.call(())>
                "Switch to High Precision (CPU)"
            </button>
        </div>
    }
}

#[component]
pub fn CpuControls(
    viewport: RwSignal<PreciseViewport>,
    precision: RwSignal<PrecisionConfig>,
    status: WriteSignal<Option<String>>,
    on_reset: Callback<()>,
) -> impl IntoView {
    let precise_input = move |field: PreciseField| {
        let value = move || {
            let vp = viewport.get();
            match field {
                PreciseField::CenterX => vp.center_x.to_decimal_string(),
                PreciseField::CenterY => vp.center_y.to_decimal_string(),
                PreciseField::Zoom => vp.zoom.to_decimal_string(),
            }
        };
        view! {
            <input
                type="text"
                prop:value=value
                on:change=move |ev| {
                    let text = event_target_value(&ev);
                    let current = viewport.get_untracked();
                    match with_precise_field(&current, field, &text, &precision.get_untracked()) {
                        Ok(vp) => viewport.set(vp),
                        Err(e) => status.set(Some(e)),
                    }
                }
            />
        }
    };

    view! {
        <div class="control-panel">
            <Field label="Center X">{precise_input(PreciseField::CenterX)}</Field>
            <Field label="Center Y">{precise_input(PreciseField::CenterY)}</Field>
            <Field label="Zoom">{precise_input(PreciseField::Zoom)}</Field>
            <Field label="Max Iter">
                <input
                    type="number"
                    min="50"
                    max="5000"
                    step="50"
                    prop:value=move || viewport.get().max_iterations.to_string()
                    on:change=move |ev| { match event_target_value(&ev).trim().parse::<u32>() {
                        Ok(v) => viewport.update(|vp| vp.max_iterations = v),
                        Err(e) => status.set(Some(format!("Invalid iteration count: {e}"))),
                    } }
                />
            </Field>
            <Field label="Precision">
                <input
                    type="number"
                    min=EXPLORER_CONFIG.min_precision_digits.to_string()
                    max=EXPLORER_CONFIG.max_precision_digits.to_string()
                    step="8"
                    prop:value=move || precision.get().digits.to_string()
                    on:change=move |ev| { match event_target_value(&ev).trim().parse::<u32>() {
                        Ok(digits) => {
                            let config = PrecisionConfig::new(digits);
                            precision.set(config);
                            viewport.update(|vp| *vp = vp.with_precision(config.precision_bits()));
                        }
                        Err(e) => status.set(Some(format!("Invalid precision: {e}"))),
                    } }
                />
            </Field>
            <ResetButton on_click=on_reset />
            <p class="hint">
                "Increase precision when zooming very deep. "
                "Rendering is CPU-intensive and may take time."
            </p>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn replacing_one_precise_field_keeps_the_others() {
        let precision = PrecisionConfig::default();
        let vp = PreciseViewport::default_with_precision(precision.precision_bits());

        let moved = with_precise_field(&vp, PreciseField::CenterX, "-0.75", &precision).unwrap();

        assert_eq!(moved.center_x.to_f64(), -0.75);
        assert_eq!(moved.center_y.to_f64(), vp.center_y.to_f64());
        assert_eq!(moved.zoom.to_f64(), vp.zoom.to_f64());
        assert_eq!(moved.max_iterations, vp.max_iterations);
    }

    #[wasm_bindgen_test]
    fn invalid_precise_text_is_reported() {
        let precision = PrecisionConfig::default();
        let vp = PreciseViewport::default_with_precision(precision.precision_bits());

        assert!(with_precise_field(&vp, PreciseField::Zoom, "abc", &precision).is_err());
        assert!(with_precise_field(&vp, PreciseField::Zoom, "0", &precision).is_err());
    }
}
