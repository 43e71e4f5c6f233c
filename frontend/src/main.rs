use leptos::prelude::*;
use tasktracker_frontend::{App, app_config};

// Use lol_alloc as the global allocator for smaller WASM size
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    console_error_panic_hook::set_once();

    let config = app_config();
    if let Some(level) = config.log_level.to_level()
        && let Err(e) = console_log::init_with_level(level)
    {
        // a logger is already installed and still receives this
        log::warn!("console logger not installed: {}", e);
    }

    // still mount on a bad config; the identity provider reports it on login
    if let Err(e) = config.clone().validate() {
        log::error!("{}", e);
    }

    mount_to_body(move || view! { <App config=config /> });
}
