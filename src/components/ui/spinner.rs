use icons::Loader;
use leptos::prelude::*;
use tw_merge::tw_merge;

#[component]
pub fn Spinner(#[prop(into, optional)] class: String) -> impl IntoView {
    let merged_class = tw_merge!("size-4 animate-spin", class);

    view! { <Loader class=merged_class attr:role="status" attr:aria-label="Loading" /> }
}

/// Full-screen placeholder while the session is being checked.
#[component]
pub fn LoadingScreen(#[prop(into, default = "Loading...".to_string())] label: String) -> impl IntoView {
    view! {
        <div class="flex min-h-screen items-center justify-center gap-3 bg-background text-lg font-bold">
            <Spinner class="size-6" />
            {label}
        </div>
    }
}
