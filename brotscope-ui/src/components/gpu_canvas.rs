//! Real-time canvas: GPU escape-time frames, CPU fallback without an adapter.

use crate::hooks::{canvas_style, use_canvas_interaction};
use crate::rendering::{get_2d_context, yield_to_browser, CanvasSink, RenderGeneration};
use brotscope_compute::{ProgressiveRenderer, RenderOutcome};
use brotscope_core::{gpu_precision_exhausted, ColorStops, ViewportState};
use brotscope_gpu::{GpuAvailability, GpuContext, GpuRenderer};
use leptos::*;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

#[derive(Clone)]
enum Backend {
    Pending,
    Gpu(Rc<GpuRenderer>),
    /// No usable adapter: real-time frames come from the progressive f64 path.
    CpuFallback,
}

fn precision_hint(viewport: &ViewportState, width: u32) -> Option<String> {
    gpu_precision_exhausted(viewport, width).then(|| {
        "Float precision exhausted at this zoom. Switch to high precision for detail.".to_string()
    })
}

/// Whether a fallback pass that just ended should run again for a newer view.
///
/// A rejected pass lost the race to one already in flight, so it leaves the
/// dirty mark for that pass to pick up.
fn needs_rerun(outcome: &RenderOutcome, dirty: &Cell<bool>) -> bool {
    match outcome {
        RenderOutcome::Rejected => {
            dirty.set(true);
            false
        }
        RenderOutcome::Completed(_) => dirty.replace(false),
    }
}

fn canvas_context(canvas_ref: NodeRef<leptos::html::Canvas>) -> Option<CanvasRenderingContext2d> {
    let canvas_el = canvas_ref.get()?;
    let canvas = canvas_el.unchecked_ref::<HtmlCanvasElement>();
    match get_2d_context(canvas) {
        Ok(ctx) => Some(ctx),
        Err(e) => {
            log::error!("No 2d context: {:?}", e);
            None
        }
    }
}

#[component]
pub fn GpuCanvas(
    viewport: RwSignal<ViewportState>,
    #[prop(into)] colors: Signal<ColorStops>,
    status: WriteSignal<Option<String>>,
    size: u32,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<leptos::html::Canvas>();
    let backend = create_rw_signal(Backend::Pending);
    let generation = RenderGeneration::new();
    let fallback = ProgressiveRenderer::new();
    let dirty = Rc::new(Cell::new(false));

    let interaction = use_canvas_interaction(canvas_ref, viewport);

    spawn_local(async move {
        match GpuContext::try_init().await {
            GpuAvailability::Available(ctx) => {
                let renderer = GpuRenderer::new(ctx);
                log::info!("Real-time renderer on {}", renderer.adapter_name());
                let _ = backend.try_set(Backend::Gpu(Rc::new(renderer)));
            }
            GpuAvailability::Unavailable(reason) => {
                log::warn!("GPU unavailable, using CPU fallback: {reason}");
                let _ = status.try_set(Some(format!(
                    "GPU unavailable ({reason}). Rendering on the CPU."
                )));
                let _ = backend.try_set(Backend::CpuFallback);
            }
        }
    });

    {
        let generation = generation.clone();
        on_cleanup(move || {
            generation.advance();
        });
    }

    create_effect(move |_| {
        let vp = viewport.get();
        let stops = colors.get();
        let current = backend.get();
        let Some(ctx) = canvas_context(canvas_ref) else {
            return;
        };

        match current {
            Backend::Pending => {}
            Backend::Gpu(renderer) => {
                let mut sink = CanvasSink::new(ctx, &generation);
                spawn_local(async move {
                    match renderer.render_to_sink(&vp, &stops, size, size, &mut sink).await {
                        Ok(result) => {
                            log::debug!("GPU frame in {:.1}ms", result.compute_time_ms);
                            if !sink.is_stale() {
                                let _ = status.try_set(precision_hint(&vp, size));
                            }
                        }
                        Err(e) => {
                            log::warn!("GPU render failed: {e}");
                            let _ = status.try_set(Some(e.to_string()));
                            if e.is_fatal_to_backend() {
                                let _ = backend.try_set(Backend::CpuFallback);
                            }
                        }
                    }
                });
            }
            Backend::CpuFallback => {
                // One pass at a time; the running pass picks up the latest
                // viewport when it finishes.
                if fallback.is_rendering() {
                    dirty.set(true);
                    return;
                }
                let fallback = fallback.clone();
                let generation = generation.clone();
                let dirty = dirty.clone();
                spawn_local(async move {
                    let (mut vp, mut stops) = (vp, stops);
                    loop {
                        let mut sink = CanvasSink::new(ctx.clone(), &generation);
                        let outcome = fallback
                            .render_fast(&vp, size, size, &stops, &mut sink, yield_to_browser)
                            .await;
                        if !needs_rerun(&outcome, &dirty) {
                            break;
                        }
                        match (viewport.try_get_untracked(), colors.try_get_untracked()) {
                            (Some(next_vp), Some(next_stops)) => {
                                vp = next_vp;
                                stops = next_stops;
                            }
                            _ => break,
                        }
                    }
                });
            }
        }
    });

    let size_attr = size.to_string();
    view! {
        <canvas
            node_ref=canvas_ref
            width=size_attr.clone()
            height=size_attr
            class="explorer-canvas"
            style=move || canvas_style(interaction.is_dragging.get())
        />
    }
}
