use leptos::prelude::*;
use tasktracker::{MenuItem, TopBar, TopBarAction, UserMenu};
use uuid::Uuid;

/// Application header: logo, then either a Login button or the avatar menu.
#[component]
pub fn TopAppBar(
    #[prop(into)] bar: Signal<TopBar>,
    #[prop(into)] on_login: Callback<()>,
    #[prop(into)] on_logout: Callback<()>,
    #[prop(into)] on_my_profile: Callback<()>,
    #[prop(into)] on_home: Callback<()>,
) -> impl IntoView {
    let fire = move |action: TopBarAction| match action {
        TopBarAction::Login => on_login.run(()),
        TopBarAction::Logout => on_logout.run(()),
        TopBarAction::MyProfile => on_my_profile.run(()),
        TopBarAction::Home => on_home.run(()),
    };

    let menu = RwSignal::new(UserMenu::default());
    let menu_id = format!("user-menu-{}", Uuid::new_v4().simple());
    let is_open = move || menu.with(UserMenu::is_open);

    let choose = move |item: MenuItem| {
        if let Some(action) = menu.try_update(|m| m.select(item)) {
            fire(action);
        }
    };

    view! {
        <header class="navbar bg-primary text-primary-content shadow-md px-4">
            <div class="flex-1">
                <button
                    class="btn btn-ghost p-0 h-auto min-h-0"
                    on:click=move |_| on_home.run(())
                >
                    <img class="w-[60px] align-middle" src="/logo.svg" alt="Task Tracker logo" />
                </button>
            </div>

            {move || match bar.get() {
                TopBar::Guest => view! {
                    <div class="flex-none">
                        <button
                            class="btn btn-ghost"
                            on:click=move |_| on_login.run(())
                        >
                            "Login"
                        </button>
                    </div>
                }
                .into_any(),
                TopBar::Member { nickname, picture } => {
                    let menu_id = menu_id.clone();
                    view! {
                        <div class="flex-none relative">
                            <button
                                class="btn btn-ghost btn-circle avatar"
                                aria-haspopup="menu"
                                aria-controls=menu_id.clone()
                                aria-expanded=move || is_open().to_string()
                                on:click=move |_| menu.update(UserMenu::open)
                            >
                                <div class="w-10 rounded-full bg-base-300">
                                    <img src=picture.unwrap_or_default() alt=nickname.unwrap_or_default() />
                                </div>
                            </button>

                            // click-away layer
                            <Show when=is_open>
                                <div
                                    class="fixed inset-0 z-10"
                                    on:click=move |_| menu.update(UserMenu::dismiss)
                                ></div>
                            </Show>

                            // kept mounted so the menu element always exists
                            <ul
                                id=menu_id
                                role="menu"
                                class="menu menu-sm bg-base-100 text-base-content rounded-box shadow absolute right-0 mt-3 w-40 z-20"
                                class:hidden=move || !is_open()
                            >
                                {MenuItem::ALL
                                    .into_iter()
                                    .map(|item| {
                                        view! {
                                            <li role="menuitem" on:click=move |_| choose(item)>
                                                <a>{item.label()}</a>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        </div>
                    }
                    .into_any()
                }
            }}
        </header>
    }
}
