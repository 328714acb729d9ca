//! High-precision canvas: progressive tile-row passes on the render button.

use crate::hooks::{canvas_style, use_canvas_interaction};
use crate::rendering::{
    get_2d_context, performance_now, yield_to_browser, CanvasSink, RenderGeneration,
};
use brotscope_compute::{ProgressiveRenderer, RenderOutcome};
use brotscope_core::{ColorStops, PreciseViewport, PrecisionConfig, RenderProgress};
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

#[component]
pub fn CpuCanvas(
    viewport: RwSignal<PreciseViewport>,
    #[prop(into)] precision: Signal<PrecisionConfig>,
    #[prop(into)] colors: Signal<ColorStops>,
    status: WriteSignal<Option<String>>,
    size: u32,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<leptos::html::Canvas>();
    let renderer = ProgressiveRenderer::new();
    let generation = RenderGeneration::new();
    let progress = create_rw_signal(RenderProgress::default());
    let rendering = create_rw_signal(false);

    let interaction = use_canvas_interaction(canvas_ref, viewport);

    {
        let generation = generation.clone();
        on_cleanup(move || {
            generation.advance();
        });
    }

    let start_render = move |_| {
        if renderer.is_rendering() {
            return;
        }
        let Some(canvas_el) = canvas_ref.get_untracked() else {
            return;
        };
        let canvas = canvas_el.unchecked_ref::<HtmlCanvasElement>();
        let ctx = match get_2d_context(canvas) {
            Ok(ctx) => ctx,
            Err(e) => {
                log::error!("No 2d context: {:?}", e);
                return;
            }
        };

        // Everything the pass reads is captured here, before the first pixel
        let vp = viewport.get_untracked();
        let precision = precision.get_untracked();
        let stops = colors.get_untracked();
        let mut sink = CanvasSink::new(ctx, &generation).with_progress(progress);
        let renderer = renderer.clone();

        rendering.set(true);
        status.set(Some("Rendering...".to_string()));

        spawn_local(async move {
            let start = performance_now();
            let outcome = renderer
                .render_precise(&vp, precision, size, size, &stops, &mut sink, yield_to_browser)
                .await;

            if let RenderOutcome::Completed(_) = outcome {
                log::info!(
                    "High-precision pass: {:.0}ms at {} digits ({} bits)",
                    performance_now() - start,
                    precision.digits,
                    precision.precision_bits()
                );
                let _ = rendering.try_set(false);
                let _ = status.try_set(None);
            }
        });
    };

    let size_attr = size.to_string();
    view! {
        <div class="cpu-canvas">
            <canvas
                node_ref=canvas_ref
                width=size_attr.clone()
                height=size_attr
                class="explorer-canvas"
                style=move || canvas_style(interaction.is_dragging.get())
            />
            <div class="render-bar">
                <button on:click=start_render disabled=move || rendering.get()>
                    {move || if rendering.get() { "Rendering…" } else { "Render" }}
                </button>
                <progress
                    max="100"
                    value=move || progress.get().percentage().to_string()
                />
            </div>
        </div>
    }
}
