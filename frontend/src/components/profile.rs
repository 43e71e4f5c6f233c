use crate::auth::use_auth;
use crate::components::loading::LoadingScreen;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tasktracker::{AppState, ProfileView};
use tasktracker_shared::{UpdateUserInfoRequest, UserInfo};

#[component]
pub fn ProfilePage() -> impl IntoView {
    let auth = use_auth();
    let state = auth.state;
    let profile = Memo::new(move |_| state.with(AppState::profile_view));
    let user = Memo::new(move |_| match profile.get() {
        ProfileView::Ready(info) => Some(info),
        _ => None,
    });
    let waiting = move || profile.with(|p| *p == ProfileView::Waiting);
    let editable = move || user.with(Option::is_some);

    let (first_name, set_first_name) = signal(String::new());
    let (last_name, set_last_name) = signal(String::new());
    let (nickname, set_nickname) = signal(String::new());
    let (is_saving, set_is_saving) = signal(false);
    let (notification, set_notification) = signal(Option::<(String, bool)>::None); // message, is error

    // refill the form whenever a new profile arrives
    Effect::new(move |_| {
        if let Some(info) = user.get() {
            set_first_name.set(info.first_name);
            set_last_name.set(info.last_name);
            set_nickname.set(info.nickname);
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(current) = user.get_untracked() else {
            return;
        };

        let edited = UserInfo {
            first_name: first_name.get_untracked(),
            last_name: last_name.get_untracked(),
            nickname: nickname.get_untracked(),
            ..current.clone()
        };
        let update = UpdateUserInfoRequest::between(&current, &edited);
        let controller = auth.controller();

        set_is_saving.set(true);
        set_notification.set(None);
        spawn_local(async move {
            match controller.update_profile(update).await {
                Ok(_) => set_notification.set(Some(("Profile saved".to_string(), false))),
                Err(e) => {
                    log::warn!("{}", e);
                    set_notification.set(Some((format!("Saving failed: {}", e.message()), true)));
                }
            }
            set_is_saving.set(false);
        });
    };

    // clear the notification after 3 seconds
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    let field = move |id: &'static str,
                      label: &'static str,
                      value: ReadSignal<String>,
                      set_value: WriteSignal<String>| {
        view! {
            <div class="form-control">
                <label class="label" for=id>
                    <span class="label-text">{label}</span>
                </label>
                <input
                    id=id
                    type="text"
                    class="input input-bordered"
                    prop:value=value
                    on:input=move |ev| set_value.set(event_target_value(&ev))
                />
            </div>
        }
    };

    view! {
        <div class="max-w-3xl mx-auto py-8 space-y-6">
            <h1 class="text-3xl font-bold">"My Profile"</h1>

            <Show when=move || !waiting() fallback=|| view! { <LoadingScreen /> }>
                <Show when=move || notification.get().is_some()>
                    <div class="toast toast-top toast-end z-50">
                        <div class=move || {
                            match notification.get() {
                                Some((_, true)) => "alert alert-error shadow-lg",
                                _ => "alert alert-success shadow-lg",
                            }
                        }>
                            <span>{move || notification.get().map(|(msg, _)| msg).unwrap_or_default()}</span>
                        </div>
                    </div>
                </Show>

                <div class="card bg-base-100 shadow">
                    <div class="card-body flex-row items-center gap-4">
                        <div class="avatar">
                            <div class="w-16 rounded-full bg-base-300">
                                <Show when=move || user.with(|u| u.as_ref().is_some_and(|u| !u.picture.is_empty()))>
                                    <img
                                        src=move || user.with(|u| u.as_ref().map(|u| u.picture.clone()).unwrap_or_default())
                                        alt=move || user.with(|u| u.as_ref().map(UserInfo::display_name).unwrap_or_default())
                                    />
                                </Show>
                            </div>
                        </div>
                        <Show
                            when=editable
                            fallback=|| view! {
                                <p class="text-base-content/70">"Your profile could not be loaded."</p>
                            }
                        >
                            <div>
                                <p class="text-xl font-semibold">
                                    {move || user.with(|u| u.as_ref().map(UserInfo::display_name).unwrap_or_default())}
                                </p>
                                <p class="text-base-content/70">
                                    {move || user.with(|u| u.as_ref().map(|u| u.email.clone()).unwrap_or_default())}
                                </p>
                            </div>
                        </Show>
                    </div>
                </div>

                <form class="card bg-base-100 shadow" on:submit=on_submit>
                    <fieldset class="card-body" disabled=move || !editable()>
                        {field("first-name", "First name", first_name, set_first_name)}
                        {field("last-name", "Last name", last_name, set_last_name)}
                        {field("nickname", "Nickname", nickname, set_nickname)}
                        <div class="card-actions justify-end mt-4">
                            <button class="btn btn-primary" disabled=move || is_saving.get() || !editable()>
                                {move || if is_saving.get() {
                                    view! { <span class="loading loading-spinner"></span> "Saving..." }.into_any()
                                } else {
                                    "Save".into_any()
                                }}
                            </button>
                        </div>
                    </fieldset>
                </form>
            </Show>
        </div>
    }
}
