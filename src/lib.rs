pub mod api;
mod app;
pub mod auth;
mod components;
pub mod config;
pub mod feedback;
mod logging;
pub mod models;
pub mod nav;
mod pages;
pub mod scroll;
mod state;
pub mod storage;

use crate::app::App;
use crate::config::EnvConfig;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::models::{StoredSession, Student};
    use crate::storage::{
        load_flag, load_json, save_flag, save_json, BrowserStorage, KeyValueStore,
        FEEDBACK_SOUND_KEY, SESSION_KEY,
    };
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_session_storage_roundtrip() {
        BrowserStorage.remove(SESSION_KEY);
        assert!(load_json::<StoredSession>(&BrowserStorage, SESSION_KEY).is_none());

        let session = StoredSession {
            student: Student {
                id: "s1".into(),
                enrollment_no: "SOE2021CS001".into(),
                first_name: None,
                last_name: None,
                department: Some("CSE".into()),
                year_of_study: None,
                is_active: true,
            },
            token: "t1".into(),
            expires_at: chrono::Utc::now(),
        };
        save_json(&BrowserStorage, SESSION_KEY, &session);
        assert_eq!(load_json(&BrowserStorage, SESSION_KEY), Some(session));

        BrowserStorage.remove(SESSION_KEY);
        assert!(BrowserStorage.get(SESSION_KEY).is_none());
    }

    #[wasm_bindgen_test]
    fn test_feedback_flag_defaults_until_saved() {
        BrowserStorage.remove(FEEDBACK_SOUND_KEY);
        assert!(load_flag(&BrowserStorage, FEEDBACK_SOUND_KEY, true));
        save_flag(&BrowserStorage, FEEDBACK_SOUND_KEY, false);
        assert!(!load_flag(&BrowserStorage, FEEDBACK_SOUND_KEY, true));
        BrowserStorage.remove(FEEDBACK_SOUND_KEY);
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();

    let config = EnvConfig::load();
    logging::init(config.log_level);
    if let Err(e) = config.validate() {
        // Keep running: pages that need the backend show the request error.
        log::error!("invalid configuration: {e}");
    }
    log::info!("starting against {}", config.supabase_url);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
