mod auth;
mod branch;
mod community;
mod dashboard;
mod exam;
mod landing;
mod layout;
mod learning;

pub use auth::AuthPage;
pub use branch::BranchSelectionPage;
pub use community::{CommunityPage, ConnectMentorPage, NotFoundPage};
pub use dashboard::DashboardPage;
pub use exam::{MockPapersPage, PyqsPage, TestsPage};
pub use landing::LandingPage;
pub use learning::{ResourcesPage, StudyResourcesPage, SubjectsPage};

use leptos::prelude::*;

use crate::components::hooks::QueryState;
use crate::components::ui::{Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Input, Spinner};
use crate::state::AuthState;

/// Case-insensitive substring match against any field; blank terms match.
pub(crate) fn matches_search(term: &str, fields: &[&str]) -> bool {
    let term = term.trim().to_lowercase();
    term.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(&term))
}

/// Newest year first, original order kept inside a year.
pub(crate) fn group_by_year<T>(items: Vec<T>, year: impl Fn(&T) -> i32) -> Vec<(i32, Vec<T>)> {
    let mut groups: Vec<(i32, Vec<T>)> = Vec::new();
    for item in items {
        let y = year(&item);
        match groups.iter_mut().find(|(g, _)| *g == y) {
            Some((_, list)) => list.push(item),
            None => groups.push((y, vec![item])),
        }
    }
    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups
}

pub(crate) fn student_branch(auth: AuthState) -> Option<String> {
    auth.student
        .with(|s| s.as_ref().and_then(|s| s.department.clone()))
}

#[component]
pub(crate) fn QueryStatus<T: Send + Sync + 'static>(query: QueryState<T>) -> impl IntoView {
    view! {
        <Show when=move || query.loading.get() fallback=|| ().into_view()>
            <div class="mb-4 flex items-center gap-2 text-sm font-bold">
                <Spinner />
                "Loading..."
            </div>
        </Show>
        <Show when=move || query.error.get().is_some() fallback=|| ().into_view()>
            <Alert class="mb-4 flex items-center justify-between gap-4 border-destructive bg-destructive/10">
                <AlertDescription class="text-destructive">
                    {move || query.error.get().unwrap_or_default()}
                </AlertDescription>
                <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=move |_| query.refetch()>
                    "Retry"
                </Button>
            </Alert>
        </Show>
    }
}

#[component]
pub(crate) fn EmptyState(message: &'static str) -> impl IntoView {
    view! {
        <div class="border-2 border-dashed border-black p-10 text-center">
            <h3 class="mb-2 text-lg font-black">"Nothing here"</h3>
            <p class="text-sm text-muted-foreground">{message}</p>
        </div>
    }
}

/// Search field; `/` focuses it from anywhere on the page.
#[component]
pub(crate) fn SearchBox(value: RwSignal<String>, placeholder: &'static str) -> impl IntoView {
    view! {
        <div class="mb-6 w-full md:max-w-md">
            <Input r#type="search" placeholder=placeholder bind_value=value />
        </div>
    }
}
