use leptos::*;

#[component]
fn HomeIcon() -> impl IntoView {
    view! {
        <svg
            width="18"
            height="18"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
        >
            <path d="M3 9l9-7 9 7v11a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2z"/>
            <polyline points="9 22 9 12 15 12 15 22"/>
        </svg>
    }
}

#[component]
pub fn ResetButton(on_click: Callback<()>) -> impl IntoView {
    view! {
        <button
            class="reset-button"
            on:click=move |_| on_click.call(())
            title="Reset to the default view"
        >
            <HomeIcon />
            " Reset View"
        </button>
    }
}
