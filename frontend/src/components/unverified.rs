use crate::auth::use_auth;
use leptos::prelude::*;

/// Shown to signed-in users whose email address is not verified yet
#[component]
pub fn UnverifiedScreen() -> impl IntoView {
    let state = use_auth().state;
    let email = move || {
        state.with(|s| {
            s.session
                .user
                .as_ref()
                .and_then(|u| u.email.clone())
                .unwrap_or_default()
        })
    };

    view! {
        <div class="hero min-h-[60vh]">
            <div class="hero-content text-center">
                <div role="alert" class="alert alert-warning max-w-md">
                    <div>
                        <p class="font-semibold">"Please verify your email address."</p>
                        <Show when=move || !email().is_empty()>
                            <p class="text-sm">
                                "We sent a verification link to " {email} "."
                            </p>
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}
