use leptos::prelude::*;

use super::layout::{AppLayout, PageTitle};
use super::{group_by_year, matches_search, student_branch, EmptyState, QueryStatus, SearchBox};
use crate::components::hooks::use_query;
use crate::components::ui::{Card, CardContent, CardDescription, CardFooter, CardGrid, CardHeader, CardTitle};
use crate::models::{MockTest, PreviousYearPaper, SpeedTest, BRANCHES};
use crate::nav::{Chord, Shortcut};
use crate::state::{AppContext, KeyboardContext};

fn paper_matches(paper: &PreviousYearPaper, term: &str) -> bool {
    let subjects = paper.subjects_covered.as_deref().unwrap_or_default().join(" ");
    matches_search(term, &[&paper.exam_name, &paper.paper_code, &paper.branch, &subjects])
}

fn paper_card(paper: PreviousYearPaper) -> impl IntoView {
    let solutions = match (paper.has_solutions, paper.has_video_solutions) {
        (_, Some(true)) => "Video solutions",
        (Some(true), _) => "Solutions",
        _ => "No solutions yet",
    };
    view! {
        <Card attr:tabindex="0" class="outline-none focus-visible:ring-4 focus-visible:ring-university-accent">
            <CardHeader>
                <CardTitle>{paper.exam_name}</CardTitle>
                <CardDescription>{format!("{} · {} · {}", paper.paper_code, paper.branch, paper.difficulty)}</CardDescription>
            </CardHeader>
            <CardContent class="text-sm">
                {format!(
                    "{} questions · {} marks · {} min",
                    paper.total_questions,
                    paper.total_marks,
                    paper.duration,
                )}
            </CardContent>
            <CardFooter class="text-xs font-bold uppercase text-muted-foreground">{solutions}</CardFooter>
        </Card>
    }
}

fn papers_by_year(papers: Vec<PreviousYearPaper>) -> impl IntoView {
    group_by_year(papers, |p| p.year)
        .into_iter()
        .map(|(year, papers)| {
            view! {
                <section class="mb-10">
                    <h2 class="mb-4 text-2xl font-black">{year}</h2>
                    <CardGrid>{papers.into_iter().map(paper_card).collect_view()}</CardGrid>
                </section>
            }
        })
        .collect_view()
}

/// Previous year papers for the signed-in student's branch.
#[component]
pub fn PyqsPage() -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let search = RwSignal::new(String::new());

    let papers = use_query(move || {
        let api = app.api.get_value();
        let branch = student_branch(app.auth);
        async move { api.get_previous_year_papers(branch.as_deref()).await }
    });

    let visible = move || {
        let term = search.get();
        papers.data.with(|d| {
            d.iter()
                .flatten()
                .filter(|p| paper_matches(p, &term))
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    view! {
        <AppLayout>
            <PageTitle title="Previous Year Questions" subtitle="Official GATE papers for your branch." />
            <SearchBox value=search placeholder="Search papers by name, code or subject" />
            <QueryStatus query=papers />
            {move || {
                let list = visible();
                if list.is_empty() && !papers.loading.get() {
                    view! { <EmptyState message="No papers match your search." /> }.into_any()
                } else {
                    papers_by_year(list).into_any()
                }
            }}
        </AppLayout>
    }
}

/// Every branch's papers, filterable by branch.
#[component]
pub fn MockPapersPage() -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let search = RwSignal::new(String::new());
    let branch = RwSignal::new(String::new());

    let papers = use_query(move || {
        let api = app.api.get_value();
        let branch = branch.get();
        async move {
            let branch = (!branch.is_empty()).then_some(branch);
            api.get_previous_year_papers(branch.as_deref()).await
        }
    });

    let on_branch = move |ev: web_sys::Event| branch.set(event_target_value(&ev));

    view! {
        <AppLayout>
            <PageTitle title="Mock Papers" subtitle="Practice with papers from every GATE discipline." />
            <div class="mb-6 flex flex-col gap-3 md:flex-row">
                <SearchBox value=search placeholder="Search papers" />
                <select
                    aria-label="Branch"
                    class="h-10 border-2 border-black bg-background px-3 text-sm font-bold"
                    on:change=on_branch
                >
                    <option value="">"All branches"</option>
                    {BRANCHES
                        .iter()
                        .map(|(code, label)| view! { <option value=*code>{*label}</option> })
                        .collect_view()}
                </select>
            </div>
            <QueryStatus query=papers />
            {move || {
                let term = search.get();
                let list: Vec<_> = papers.data.with(|d| {
                    d.iter().flatten().filter(|p| paper_matches(p, &term)).cloned().collect()
                });
                if list.is_empty() && !papers.loading.get() {
                    view! { <EmptyState message="Try adjusting your search or filter criteria." /> }.into_any()
                } else {
                    papers_by_year(list).into_any()
                }
            }}
        </AppLayout>
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum TestTab {
    Mock,
    Speed,
}

fn mock_test_card(test: MockTest) -> impl IntoView {
    let subjects = test.subjects.unwrap_or_default().join(", ");
    let status = match (test.is_completed, test.best_score) {
        (Some(true), Some(best)) => format!("Completed · best {best:.0}"),
        (Some(true), None) => "Completed".to_string(),
        _ => "Not attempted".to_string(),
    };
    view! {
        <Card attr:tabindex="0" class="outline-none focus-visible:ring-4 focus-visible:ring-university-accent">
            <CardHeader>
                <CardTitle>{test.title}</CardTitle>
                <CardDescription>{test.description.unwrap_or_default()}</CardDescription>
            </CardHeader>
            <CardContent class="flex flex-col gap-1 text-sm">
                <span>{format!("{} questions · {} marks · {} min", test.total_questions, test.total_marks, test.duration)}</span>
                <span class="text-muted-foreground">{subjects}</span>
            </CardContent>
            <CardFooter class="justify-between text-xs font-bold uppercase">
                <span>{test.difficulty}</span>
                <span>{status}</span>
            </CardFooter>
        </Card>
    }
}

fn speed_test_card(test: SpeedTest) -> impl IntoView {
    let accuracy = test
        .average_accuracy
        .map(|a| format!("{a:.0}% avg accuracy"))
        .unwrap_or_default();
    view! {
        <Card attr:tabindex="0" class="outline-none focus-visible:ring-4 focus-visible:ring-university-accent">
            <CardHeader>
                <CardTitle>{test.title}</CardTitle>
                <CardDescription>{format!("{} · {}", test.subject, test.topic)}</CardDescription>
            </CardHeader>
            <CardContent class="text-sm">
                {format!("{} questions in {} min", test.total_questions, test.duration)}
            </CardContent>
            <CardFooter class="justify-between text-xs font-bold uppercase">
                <span>{test.difficulty}</span>
                <span>{accuracy}</span>
            </CardFooter>
        </Card>
    }
}

#[component]
pub fn TestsPage() -> impl IntoView {
    let app = expect_context::<AppContext>().0;
    let tab = RwSignal::new(TestTab::Mock);

    let mock = use_query(move || {
        let api = app.api.get_value();
        async move { api.get_mock_tests().await }
    });
    let speed = use_query(move || {
        let api = app.api.get_value();
        async move { api.get_speed_tests(None).await }
    });

    // Registered again on each visit; the chord replaces the old entry.
    let keyboard = expect_context::<KeyboardContext>();
    for (key, target, description) in [
        ("1", TestTab::Mock, "Show mock tests"),
        ("2", TestTab::Speed, "Show speed tests"),
    ] {
        keyboard.register_shortcut(
            Shortcut::run(Chord::new(key).alt(), description, "Tests", move || {
                // The page may be gone; its signal is then disposed.
                let _ = tab.try_set(target);
            })
            .local(),
        );
    }

    let tab_button = move |target: TestTab, label: &'static str| {
        let selected = move || tab.get() == target;
        view! {
            <button
                type="button"
                role="tab"
                aria-selected=move || selected().to_string()
                class=move || {
                    if selected() {
                        "border-2 border-black bg-university-primary px-4 py-2 font-bold text-white"
                    } else {
                        "border-2 border-black bg-background px-4 py-2 font-bold hover:bg-university-accent/20"
                    }
                }
                on:click=move |_| tab.set(target)
            >
                {label}
            </button>
        }
    };

    view! {
        <AppLayout>
            <PageTitle title="Tests" subtitle="Full-length mock tests and topic-wise speed drills." />
            <div class="mb-6 flex gap-3" role="tablist">
                {tab_button(TestTab::Mock, "Mock Tests")}
                {tab_button(TestTab::Speed, "Speed Tests")}
            </div>
            {move || match tab.get() {
                TestTab::Mock => view! {
                    <QueryStatus query=mock />
                    <CardGrid>
                        {move || mock.data.get().unwrap_or_default().into_iter().map(mock_test_card).collect_view()}
                    </CardGrid>
                }
                .into_any(),
                TestTab::Speed => view! {
                    <QueryStatus query=speed />
                    <CardGrid>
                        {move || speed.data.get().unwrap_or_default().into_iter().map(speed_test_card).collect_view()}
                    </CardGrid>
                }
                .into_any(),
            }}
        </AppLayout>
    }
}
