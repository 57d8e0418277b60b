use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use super::layout::{AppLayout, PageTitle};
use crate::components::protected_route::DASHBOARD_PATH;
use crate::components::ui::{Alert, AlertDescription, Button, Spinner};
use crate::models::BRANCHES;
use crate::state::AppContext;

#[component]
pub fn BranchSelectionPage() -> impl IntoView {
    let auth = expect_context::<AppContext>().0.auth;
    let navigate = StoredValue::new(use_navigate());

    let selected: RwSignal<Option<&'static str>> = RwSignal::new(None);
    let saving = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    let on_continue = move |_| {
        let Some(code) = selected.get() else {
            return;
        };
        saving.set(true);
        error.set(None);
        spawn_local(async move {
            match auth.update_branch(code.to_string()).await {
                Ok(_) => navigate.with_value(|nav| nav(DASHBOARD_PATH, Default::default())),
                Err(e) => error.set(Some(e.to_string())),
            }
            saving.set(false);
        });
    };

    view! {
        <AppLayout>
            <PageTitle
                title="Choose your branch"
                subtitle="Study plans, papers and resources are tailored to it."
            />
            <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-3" role="radiogroup" aria-label="Branch">
                {BRANCHES
                    .iter()
                    .map(|(code, label)| {
                        let code = *code;
                        let checked = move || selected.get() == Some(code);
                        view! {
                            <button
                                type="button"
                                role="radio"
                                aria-checked=move || checked().to_string()
                                class=move || {
                                    let base = "flex flex-col items-start gap-1 border-2 border-black p-5 text-left shadow-[4px_4px_0_0_#000] outline-none focus-visible:ring-4 focus-visible:ring-university-accent";
                                    if checked() {
                                        format!("{base} bg-university-primary text-white")
                                    } else {
                                        format!("{base} bg-card hover:bg-university-accent/20")
                                    }
                                }
                                on:click=move |_| selected.set(Some(code))
                            >
                                <span class="text-2xl font-black">{code}</span>
                                <span class="text-sm">{*label}</span>
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                <Alert class="mt-6 border-destructive bg-destructive/10">
                    <AlertDescription class="text-destructive">
                        {move || error.get().unwrap_or_default()}
                    </AlertDescription>
                </Alert>
            </Show>

            <div class="mt-8">
                <Button
                    attr:disabled=move || selected.get().is_none() || saving.get()
                    on:click=on_continue
                >
                    <Show when=move || saving.get() fallback=|| ().into_view()>
                        <Spinner />
                    </Show>
                    "Continue"
                </Button>
            </div>
        </AppLayout>
    }
}
