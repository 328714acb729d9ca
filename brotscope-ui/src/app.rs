use crate::components::{CpuCanvas, CpuControls, GpuCanvas, GpuControls};
use crate::rendering::canvas_size;
use brotscope_core::{
    recommended_digits, ColorStops, Handoff, PreciseViewport, PrecisionConfig, ViewportControl,
    ViewportState, EXPLORER_CONFIG,
};
use leptos::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Real-time f32 rendering, interactive pan and zoom.
    Gpu,
    /// Arbitrary-precision progressive rendering on demand.
    Cpu,
}

/// Precise view and working precision for a handoff from the real-time view.
///
/// The user's precision is kept unless the view needs more digits.
fn precise_from_handoff(
    handoff: &Handoff,
    current: PrecisionConfig,
    width: u32,
) -> (PreciseViewport, PrecisionConfig) {
    let probe = handoff.to_precise(&current);
    let needed = recommended_digits(&probe, width);
    let precision = if needed > current.digits {
        PrecisionConfig::new(needed)
    } else {
        current
    };
    (handoff.to_precise(&precision), precision)
}

#[component]
pub fn App() -> impl IntoView {
    let size = canvas_size();

    let mode = create_rw_signal(RenderMode::Gpu);
    let (status, set_status) = create_signal(None::<String>);
    let colors = create_rw_signal(ColorStops::default());

    let gpu_viewport = create_rw_signal(ViewportState::default());
    let precision = create_rw_signal(PrecisionConfig::default());
    let cpu_viewport = create_rw_signal(PreciseViewport::default_with_precision(
        precision.get_untracked().precision_bits(),
    ));

    let on_gpu_reset = Callback::new(move |_| {
        gpu_viewport.update(|vp| vp.reset());
        set_status.set(None);
    });

    let on_cpu_reset = Callback::new(move |_| {
        cpu_viewport.set(PreciseViewport::default_with_precision(
            precision.get_untracked().precision_bits(),
        ));
        set_status.set(None);
    });

    let on_handoff = Callback::new(move |_| {
        let handoff = Handoff::new(gpu_viewport.get_untracked(), colors.get_untracked());
        match handoff.to_json() {
            Ok(json) => log::debug!("Handoff to high precision: {json}"),
            Err(e) => log::warn!("{e}"),
        }

        let (viewport, config) = precise_from_handoff(&handoff, precision.get_untracked(), size);
        precision.set(config);
        cpu_viewport.set(viewport);
        set_status.set(None);
        mode.set(RenderMode::Cpu);
    });

    view! {
        <div class="app">
            <header class="app-header">
                <h1>{move || {
                    let suffix = match mode.get() {
                        RenderMode::Gpu => "GPU",
                        RenderMode::Cpu => "High Precision CPU",
                    };
                    format!("{} ({suffix})", EXPLORER_CONFIG.display_name)
                }}</h1>
                <nav class="mode-switch">
                    <button
                        class:active=move || mode.get() == RenderMode::Gpu
                        on:click=move |_| { set_status.set(None); mode.set(RenderMode::Gpu) }
                    >
                        "GPU"
                    </button>
                    <button
                        class:active=move || mode.get() == RenderMode::Cpu
                        on:click=move |_| { set_status.set(None); mode.set(RenderMode::Cpu) }
                    >
                        "High Precision"
                    </button>
                </nav>
            </header>

            <Show when=move || status.get().is_some()>
                <div class="status">{move || status.get().unwrap_or_default()}</div>
            </Show>

            <main class="explorer">
                {move || match mode.get() {
                    RenderMode::Gpu => view! {
                        <GpuControls
                            viewport=gpu_viewport
                            colors=colors
                            status=set_status
                            on_reset=on_gpu_reset
                            on_handoff=on_handoff
                        />
                        <GpuCanvas
                            viewport=gpu_viewport
                            colors=colors
                            status=set_status
                            size=size
                        />
                    }.into_view(),
                    RenderMode::Cpu => view! {
                        <CpuControls
                            viewport=cpu_viewport
                            precision=precision
                            status=set_status
                            on_reset=on_cpu_reset
                        />
                        <CpuCanvas
                            viewport=cpu_viewport
                            precision=precision
                            colors=colors
                            status=set_status
                            size=size
                        />
                    }.into_view(),
                }}
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn handoff_keeps_framing_and_user_precision() {
        let handoff = Handoff::new(
            ViewportState::new(-0.743, 0.131, 10.0, 300),
            ColorStops::default(),
        );

        let (viewport, precision) = precise_from_handoff(&handoff, PrecisionConfig::default(), 600);

        assert_eq!(precision, PrecisionConfig::default());
        assert_eq!(viewport.max_iterations, 300);
        assert!((viewport.center_x.to_f64() + 0.743).abs() < 1e-12);
        assert!((viewport.zoom.to_f64() - 10.0).abs() < 1e-12);
    }

    #[wasm_bindgen_test]
    fn handoff_raises_precision_for_deep_views() {
        let handoff = Handoff::new(
            ViewportState::new(-0.743, 0.131, 82_500.0, 300),
            ColorStops::default(),
        );
        let low = PrecisionConfig::new(EXPLORER_CONFIG.min_precision_digits);

        let (_, precision) = precise_from_handoff(&handoff, low, 600);

        assert!(precision.digits >= low.digits);
        let recommended = recommended_digits(&handoff.to_precise(&low), 600);
        assert_eq!(precision.digits, recommended.max(low.digits));
    }
}
