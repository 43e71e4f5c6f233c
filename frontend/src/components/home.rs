use crate::auth::use_auth;
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    let state = use_auth().state;
    let greeting = move || {
        state.with(|s| match s.user() {
            Some(user) => format!("Welcome back, {}!", user.display_name()),
            None => "Welcome back!".to_string(),
        })
    };

    view! {
        <div class="max-w-3xl mx-auto py-8 space-y-4">
            <h1 class="text-3xl font-bold">{greeting}</h1>
            <p class="text-base-content/70">"Your tasks will show up here."</p>
        </div>
    }
}
