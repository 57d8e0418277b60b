use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::ShortcutHelp;
use crate::feedback::HapticFeedback;
use crate::nav::{DomSampler, NavigationManager, NavigationService, Navigator};
use crate::state::{AppContext, KeyboardContext};
use crate::storage::{load_flag, BrowserStorage, FEEDBACK_SOUND_KEY};

fn build_service(
    tolerance: f64,
    help_open: RwSignal<bool>,
    navigate: impl Fn(&str) + 'static,
) -> Option<NavigationService> {
    let Some(sampler) = DomSampler::from_window() else {
        log::warn!("no document; keyboard navigation disabled");
        return None;
    };
    let navigator = Navigator::new(sampler).with_lateral_tolerance(tolerance);
    let feedback = HapticFeedback::detect(load_flag(&BrowserStorage, FEEDBACK_SOUND_KEY, true));
    let manager = NavigationManager::new(navigator, Box::new(feedback))
        .with_router(navigate)
        .with_help(move || help_open.set(true));
    Some(NavigationService::new(manager))
}

/// Owns the app's keyboard navigation for as long as it is mounted.
///
/// Must sit inside the `<Router>`; shortcuts that change pages go through
/// the router.
#[component]
pub fn KeyboardNavigation(children: Children) -> impl IntoView {
    let app = expect_context::<AppContext>();
    let tolerance = app.0.config.with_value(|c| c.nav_lateral_tolerance);
    let help_open = RwSignal::new(false);

    let navigate = use_navigate();
    let service = build_service(tolerance, help_open, move |path| {
        navigate(path, Default::default())
    });
    let keyboard = KeyboardContext::new(help_open, service);
    provide_context(keyboard);

    // Effects run after the first render, once the page is in the DOM.
    Effect::new(move |_| keyboard.bind());

    let location = use_location();
    Effect::new(move |_| {
        let path = location.pathname.get();
        keyboard.page_changed(&path);
    });

    on_cleanup(move || keyboard.teardown());

    view! {
        {children()}
        <ShortcutHelp />
    }
}
