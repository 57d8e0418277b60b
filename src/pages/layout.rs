use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::state::{AppContext, KeyboardContext};

pub(crate) const NAV_LINKS: &[(&str, &str)] = &[
    ("/dashboard", "Dashboard"),
    ("/subjects", "Subjects"),
    ("/tests", "Tests"),
    ("/pyqs", "PYQs"),
    ("/study-resources", "Study Plans"),
    ("/connect-mentor", "Mentors"),
    ("/community", "Community"),
    ("/resources", "Resources"),
];

/// Anchor styled like the primary button.
pub(crate) const LINK_BUTTON: &str = "inline-flex h-8 items-center justify-center border-2 border-black bg-university-primary px-3 text-sm font-bold uppercase tracking-wide text-white shadow-[4px_4px_0_0_#000] hover:bg-university-forest focus-visible:ring-4 focus-visible:ring-university-accent outline-none";

#[component]
pub fn SiteHeader() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let auth = app_state.0.auth;
    let keyboard = expect_context::<KeyboardContext>();
    let navigate = StoredValue::new(use_navigate());
    let location = use_location();

    let on_sign_out = move |_| {
        spawn_local(async move {
            auth.sign_out().await;
            navigate.with_value(|nav| nav("/auth", Default::default()));
        });
    };

    view! {
        <header class="sticky top-0 z-30 border-b-4 border-black bg-background">
            <div class="mx-auto flex h-16 max-w-7xl items-center justify-between gap-4 px-4">
                <a href="/" class="flex flex-col leading-none">
                    <span class="text-lg font-black text-university-primary">"Silver Oak University"</span>
                    <span class="text-xs font-bold tracking-widest text-muted-foreground">"GATE CLUB"</span>
                </a>

                <Show when=move || auth.is_authenticated() fallback=|| ().into_view()>
                    <nav class="hidden items-center gap-1 lg:flex" aria-label="Main">
                        {NAV_LINKS
                            .iter()
                            .map(|(href, label)| {
                                let href = *href;
                                let active = move || location.pathname.get() == href;
                                view! {
                                    <a
                                        href=href
                                        aria-current=move || active().then_some("page")
                                        class="px-2 py-1 text-sm font-bold hover:bg-university-accent/30 aria-[current=page]:bg-university-accent"
                                    >
                                        {*label}
                                    </a>
                                }
                            })
                            .collect_view()}
                    </nav>
                </Show>

                <div class="flex items-center gap-2">
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Sm
                        attr:title="Keyboard shortcuts (Shift+?)"
                        on:click=move |_| keyboard.help_open.set(true)
                    >
                        <kbd class="font-mono">"?"</kbd>
                    </Button>
                    <Show
                        when=move || auth.is_authenticated()
                        fallback=|| {
                            view! {
                                <a href="/auth" class=LINK_BUTTON>
                                    "Sign In"
                                </a>
                            }
                        }
                    >
                        <span class="hidden text-sm font-bold md:inline">
                            {move || auth.student.with(|s| s.as_ref().map(|s| s.display_name()))}
                        </span>
                        <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=on_sign_out>
                            "Sign Out"
                        </Button>
                    </Show>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn SiteFooter() -> impl IntoView {
    view! {
        <footer class="mt-16 border-t-4 border-black bg-university-forest py-8 text-white">
            <div class="mx-auto flex max-w-7xl flex-col gap-2 px-4 text-sm md:flex-row md:justify-between">
                <span class="font-black">"Silver Oak University · GATE CLUB"</span>
                <span class="opacity-80">
                    "Press " <kbd class="font-mono">"Shift+?"</kbd> " for keyboard shortcuts"
                </span>
            </div>
        </footer>
    }
}

/// Header, page body and footer for signed-in pages.
#[component]
pub fn AppLayout(children: Children) -> impl IntoView {
    view! {
        <div class="flex min-h-screen flex-col bg-background">
            <SiteHeader />
            <main class="mx-auto w-full max-w-7xl flex-1 px-4 py-8">{children()}</main>
            <SiteFooter />
        </div>
    }
}

#[component]
pub fn PageTitle(
    #[prop(into)] title: String,
    #[prop(into, optional)] subtitle: Option<String>,
) -> impl IntoView {
    view! {
        <div class="mb-8 flex flex-col gap-2">
            <h1 class="text-3xl font-black md:text-4xl">{title}</h1>
            {subtitle.map(|s| view! { <p class="text-muted-foreground">{s}</p> })}
        </div>
    }
}
