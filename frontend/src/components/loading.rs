use leptos::prelude::*;

/// Full-width spinner shown while the session or the user info resolves
#[component]
pub fn LoadingScreen() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[60vh]">
            <span
                role="progressbar"
                aria-label="Loading"
                class="loading loading-spinner loading-lg text-primary"
            ></span>
        </div>
    }
}
