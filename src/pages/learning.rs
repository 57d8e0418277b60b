use leptos::prelude::*;

use super::layout::{AppLayout, PageTitle};
use super::{matches_search, student_branch, EmptyState, QueryStatus, SearchBox};
use crate::components::hooks::use_query;
use crate::components::ui::{Card, CardContent, CardDescription, CardFooter, CardGrid, CardHeader, CardTitle};
use crate::models::{StudyPlan, SubjectResource};
use crate::state::AppContext;

fn resource_card(resource: SubjectResource) -> impl IntoView {
    let rating = resource
        .rating
        .map(|r| format!("★ {r:.1} ({})", resource.total_ratings.unwrap_or(0)))
        .unwrap_or_default();
    let price = if resource.is_free.unwrap_or(true) { "Free" } else { "Premium" };
    view! {
        <Card attr:tabindex="0" class="outline-none focus-visible:ring-4 focus-visible:ring-university-accent">
            <CardHeader>
                <CardTitle>{resource.title}</CardTitle>
                <CardDescription>
                    {format!("{} · {} · {}", resource.subject, resource.kind, resource.difficulty_level)}
                </CardDescription>
            </CardHeader>
            <CardContent class="text-sm">{resource.description.unwrap_or_default()}</CardContent>
            <CardFooter class="justify-between text-xs font-bold uppercase">
                <span>{price}</span>
                <span>{rating}</span>
            </CardFooter>
        </Card>
    }
}

fn plan_card(plan: StudyPlan) -> impl IntoView {
    let enrolled = plan
        .enrolled_students
        .map(|n| format!("{n} enrolled"))
        .unwrap_or_default();
    view! {
        <Card attr:tabindex="0" class="outline-none focus-visible:ring-4 focus-visible:ring-university-accent">
            <CardHeader>
                <CardTitle>{plan.title}</CardTitle>
                <CardDescription>{format!("{} · {}", plan.branch, plan.kind)}</CardDescription>
            </CardHeader>
            <CardContent class="flex flex-col gap-1 text-sm">
                <span>{format!("{} days · {:.1} h/day", plan.duration_days, plan.daily_hours)}</span>
                <span>{format!("{} topics · {} mock tests", plan.total_topics, plan.mock_tests_included)}</span>
            </CardContent>
            <CardFooter class="text-xs font-bold uppercase text-muted-foreground">{enrolled}</CardFooter>
        </Card>
    }
}

#[component]
pub fn StudyResourcesPage() -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let search = RwSignal::new(String::new());

    let popular = use_query(move || {
        let api = app.api.get_value();
        async move { api.get_popular_study_plans().await }
    });
    let plans = use_query(move || {
        let api = app.api.get_value();
        let branch = student_branch(app.auth);
        async move { api.get_study_plans(branch.as_deref()).await }
    });
    let featured = use_query(move || {
        let api = app.api.get_value();
        async move { api.get_featured_resources().await }
    });

    view! {
        <AppLayout>
            <PageTitle title="Study Plans & Resources" subtitle="Structured plans and hand-picked material." />

            <h2 class="mb-4 text-2xl font-black">"Popular plans"</h2>
            <QueryStatus query=popular />
            <CardGrid>
                {move || popular.data.get().unwrap_or_default().into_iter().map(plan_card).collect_view()}
            </CardGrid>

            <h2 class="mb-4 mt-12 text-2xl font-black">"Plans for your branch"</h2>
            <SearchBox value=search placeholder="Search plans" />
            <QueryStatus query=plans />
            {move || {
                let term = search.get();
                let list: Vec<_> = plans.data.with(|d| {
                    d.iter()
                        .flatten()
                        .filter(|p| {
                            let description = p.description.as_deref().unwrap_or_default();
                            matches_search(&term, &[&p.title, &p.kind, description])
                        })
                        .cloned()
                        .collect()
                });
                if list.is_empty() && !plans.loading.get() {
                    view! { <EmptyState message="No study plans match your search." /> }.into_any()
                } else {
                    view! { <CardGrid>{list.into_iter().map(plan_card).collect_view()}</CardGrid> }.into_any()
                }
            }}

            <h2 class="mb-4 mt-12 text-2xl font-black">"Featured resources"</h2>
            <QueryStatus query=featured />
            <CardGrid>
                {move || featured.data.get().unwrap_or_default().into_iter().map(resource_card).collect_view()}
            </CardGrid>
        </AppLayout>
    }
}

/// Distinct subjects in first-seen order.
fn subjects_of(resources: &[SubjectResource]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for r in resources {
        if !out.contains(&r.subject) {
            out.push(r.subject.clone());
        }
    }
    out
}

#[component]
pub fn SubjectsPage() -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let search = RwSignal::new(String::new());
    let subject: RwSignal<Option<String>> = RwSignal::new(None);

    let resources = use_query(move || {
        let api = app.api.get_value();
        let branch = student_branch(app.auth);
        async move { api.get_subject_resources(branch.as_deref(), None).await }
    });

    let subjects = move || resources.data.with(|d| d.as_deref().map(subjects_of).unwrap_or_default());

    let chip = move |value: Option<String>, label: String| {
        let active = {
            let value = value.clone();
            Memo::new(move |_| subject.with(|s| *s == value))
        };
        view! {
            <button
                type="button"
                aria-pressed=move || active.get().to_string()
                class=move || {
                    if active.get() {
                        "border-2 border-black bg-university-primary px-3 py-1 text-sm font-bold text-white"
                    } else {
                        "border-2 border-black bg-background px-3 py-1 text-sm font-bold hover:bg-university-accent/20"
                    }
                }
                on:click=move |_| subject.set(value.clone())
            >
                {label}
            </button>
        }
    };

    view! {
        <AppLayout>
            <PageTitle title="Subjects" subtitle="Lectures, notes and practice sets for your branch." />
            <SearchBox value=search placeholder="Search resources" />
            <div class="mb-6 flex flex-wrap gap-2">
                {chip(None, "All".to_string())}
                {move || {
                    subjects()
                        .into_iter()
                        .map(|s| chip(Some(s.clone()), s))
                        .collect_view()
                }}
            </div>
            <QueryStatus query=resources />
            {move || {
                let term = search.get();
                let chosen = subject.get();
                let list: Vec<_> = resources.data.with(|d| {
                    d.iter()
                        .flatten()
                        .filter(|r| chosen.as_ref().map_or(true, |s| *s == r.subject))
                        .filter(|r| matches_search(&term, &[&r.title, &r.subject, &r.kind]))
                        .cloned()
                        .collect()
                });
                if list.is_empty() && !resources.loading.get() {
                    view! { <EmptyState message="Try adjusting your search or filter criteria." /> }.into_any()
                } else {
                    view! { <CardGrid>{list.into_iter().map(resource_card).collect_view()}</CardGrid> }.into_any()
                }
            }}
        </AppLayout>
    }
}

const RESOURCE_BLOCKS: &[(&str, &str, &[(&str, &str)])] = &[
    (
        "Syllabus & Exam Pattern",
        "Official syllabus and marking schemes.",
        &[
            ("Official GATE website", "https://gate2025.iitr.ac.in/"),
            ("Mock papers", "/mock-papers"),
        ],
    ),
    (
        "Notes & Cheatsheets",
        "Concise notes prepared by faculty and toppers.",
        &[("Formula sheets", "/study-resources"), ("Subject notes", "/subjects")],
    ),
    (
        "Helpful Links & Tools",
        "Official sites, calculators and practice utilities.",
        &[
            ("Previous year papers", "/pyqs"),
            ("Speed tests", "/tests"),
        ],
    ),
];

#[component]
pub fn ResourcesPage() -> impl IntoView {
    view! {
        <AppLayout>
            <PageTitle title="GATE Resources" subtitle="Everything official, in one place." />
            <CardGrid>
                {RESOURCE_BLOCKS
                    .iter()
                    .map(|(title, description, links)| {
                        view! {
                            <Card>
                                <CardHeader>
                                    <CardTitle>{*title}</CardTitle>
                                    <CardDescription>{*description}</CardDescription>
                                </CardHeader>
                                <CardContent class="flex flex-col gap-2">
                                    {links
                                        .iter()
                                        .map(|(label, href)| {
                                            view! {
                                                <a
                                                    href=*href
                                                    class="font-bold text-university-primary underline-offset-4 hover:underline focus-visible:outline-4 focus-visible:outline-university-accent"
                                                >
                                                    {*label}
                                                </a>
                                            }
                                        })
                                        .collect_view()}
                                </CardContent>
                            </Card>
                        }
                    })
                    .collect_view()}
            </CardGrid>
        </AppLayout>
    }
}
