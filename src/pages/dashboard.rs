use leptos::prelude::*;

use super::layout::{AppLayout, PageTitle, NAV_LINKS};
use super::QueryStatus;
use crate::components::hooks::use_query;
use crate::components::ui::{Card, CardContent, CardDescription, CardGrid, CardHeader, CardTitle, Label};
use crate::models::TestStatistics;
use crate::state::{AppContext, KeyboardContext};
use crate::storage::{load_flag, save_flag, BrowserStorage, FEEDBACK_SOUND_KEY};

#[component]
fn StatCard(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <Card class="py-4">
            <CardContent class="flex flex-col gap-1">
                <span class="text-xs font-bold uppercase tracking-widest text-muted-foreground">{label}</span>
                <span class="text-3xl font-black">{move || value.get()}</span>
            </CardContent>
        </Card>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let auth = app.auth;

    let stats = use_query(move || {
        let api = app.api.get_value();
        let student_id = auth.student.with(|s| s.as_ref().map(|s| s.id.clone()));
        async move {
            match student_id {
                Some(id) => api.get_test_statistics(&id).await,
                None => Ok(TestStatistics::default()),
            }
        }
    });

    let stat = move |f: fn(&TestStatistics) -> String| {
        Signal::derive(move || stats.data.with(|d| d.as_ref().map(f).unwrap_or_else(|| "–".to_string())))
    };

    let sound = RwSignal::new(load_flag(&BrowserStorage, FEEDBACK_SOUND_KEY, true));
    let on_sound = move |_| {
        let value = !sound.get_untracked();
        sound.set(value);
        save_flag(&BrowserStorage, FEEDBACK_SOUND_KEY, value);
    };

    let keyboard = expect_context::<KeyboardContext>();
    let keys_enabled = RwSignal::new(keyboard.is_enabled());
    let on_keys = move |_| {
        let value = !keys_enabled.get_untracked();
        keys_enabled.set(value);
        if value {
            keyboard.enable();
        } else {
            keyboard.disable();
        }
    };

    let greeting = move || {
        auth.student.with(|s| match s {
            Some(s) => format!("Welcome back, {}", s.display_name()),
            None => "Welcome back".to_string(),
        })
    };
    let branch = move || {
        auth.student
            .with(|s| s.as_ref().and_then(|s| s.department.clone()))
            .map(|d| format!("Branch: {d}"))
    };

    view! {
        <AppLayout>
            <PageTitle title=greeting() subtitle=branch().unwrap_or_default() />

            <QueryStatus query=stats />
            <div class="mb-10 grid gap-4 sm:grid-cols-2 lg:grid-cols-4">
                <StatCard
                    label="Mock tests completed"
                    value=stat(|s| format!("{}/{}", s.completed_mock_tests, s.total_mock_tests))
                />
                <StatCard label="Average mock score" value=stat(|s| s.average_mock_score.to_string()) />
                <StatCard
                    label="Speed tests completed"
                    value=stat(|s| format!("{}/{}", s.completed_speed_tests, s.total_speed_tests))
                />
                <StatCard
                    label="Speed accuracy"
                    value=stat(|s| format!("{}%", s.average_speed_accuracy))
                />
            </div>

            <h2 class="mb-4 text-xl font-black">"Quick links"</h2>
            <CardGrid>
                {NAV_LINKS
                    .iter()
                    .filter(|(href, _)| *href != "/dashboard")
                    .map(|(href, label)| {
                        view! {
                            <a href=*href class="outline-none focus-visible:ring-4 focus-visible:ring-university-accent">
                                <Card class="h-full hover:bg-university-accent/20">
                                    <CardHeader>
                                        <CardTitle>{*label}</CardTitle>
                                    </CardHeader>
                                </Card>
                            </a>
                        }
                    })
                    .collect_view()}
            </CardGrid>

            <Card class="mt-10 max-w-md">
                <CardHeader>
                    <CardTitle>"Preferences"</CardTitle>
                    <CardDescription>"The feedback tone setting applies on next load."</CardDescription>
                </CardHeader>
                <CardContent>
                    <Label html_for="feedback-sound">
                        <input
                            id="feedback-sound"
                            type="checkbox"
                            class="size-4 accent-university-primary"
                            prop:checked=move || sound.get()
                            on:change=on_sound
                        />
                        "Play a tone on shortcuts"
                    </Label>
                    <Label html_for="keyboard-nav" class="mt-3">
                        <input
                            id="keyboard-nav"
                            type="checkbox"
                            class="size-4 accent-university-primary"
                            prop:checked=move || keys_enabled.get()
                            on:change=on_keys
                        />
                        "Keyboard shortcuts"
                    </Label>
                </CardContent>
            </Card>
        </AppLayout>
    }
}
