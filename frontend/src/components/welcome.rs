use crate::auth::use_auth;
use leptos::prelude::*;
use tasktracker::TopBarAction;

#[component]
pub fn WelcomeScreen() -> impl IntoView {
    let auth = use_auth();

    view! {
        <div class="hero min-h-[60vh]">
            <div class="hero-content text-center">
                <div class="max-w-md space-y-4">
                    <h1 class="text-4xl font-bold">"Welcome to Task Tracker"</h1>
                    <p class="text-base-content/70">"Please log in or sign up!"</p>
                    <button
                        class="btn btn-primary"
                        on:click=move |_| auth.dispatch(TopBarAction::Login)
                    >
                        "Login"
                    </button>
                </div>
            </div>
        </div>
    }
}
