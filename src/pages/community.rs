use leptos::prelude::*;

use super::layout::{AppLayout, PageTitle, LINK_BUTTON};
use super::{matches_search, EmptyState, SearchBox};
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardFooter, CardGrid, CardHeader, CardTitle};

struct Mentor {
    name: &'static str,
    title: &'static str,
    specialization: &'static str,
    gate_rank: &'static str,
    experience: &'static str,
    rating: f32,
    available: bool,
    subjects: &'static [&'static str],
}

const MENTORS: &[Mentor] = &[
    Mentor {
        name: "Dr. Rajesh Kumar",
        title: "Senior Faculty, Computer Science",
        specialization: "Computer Science & IT",
        gate_rank: "AIR 15 (2019)",
        experience: "8 years",
        rating: 4.9,
        available: true,
        subjects: &["Data Structures", "Algorithms", "DBMS", "Computer Networks"],
    },
    Mentor {
        name: "Prof. Anita Sharma",
        title: "Associate Professor, Mathematics",
        specialization: "Engineering Mathematics",
        gate_rank: "AIR 8 (2018)",
        experience: "12 years",
        rating: 4.8,
        available: true,
        subjects: &["Linear Algebra", "Calculus", "Probability", "Statistics"],
    },
    Mentor {
        name: "Dr. Vikram Singh",
        title: "Head of Department, Mechanical",
        specialization: "Mechanical Engineering",
        gate_rank: "AIR 22 (2017)",
        experience: "15 years",
        rating: 4.9,
        available: false,
        subjects: &["Thermodynamics", "Fluid Mechanics", "Machine Design", "Manufacturing"],
    },
    Mentor {
        name: "Dr. Priya Patel",
        title: "Assistant Professor, Electronics",
        specialization: "Electronics & Communication",
        gate_rank: "AIR 31 (2020)",
        experience: "6 years",
        rating: 4.7,
        available: true,
        subjects: &["Analog Circuits", "Digital Electronics", "Control Systems", "Communications"],
    },
    Mentor {
        name: "Prof. Amit Gupta",
        title: "Senior Faculty, Civil Engineering",
        specialization: "Civil Engineering",
        gate_rank: "AIR 19 (2016)",
        experience: "11 years",
        rating: 4.8,
        available: true,
        subjects: &["Structural Analysis", "Geotechnical", "Water Resources", "Transportation"],
    },
    Mentor {
        name: "Dr. Neha Agarwal",
        title: "Associate Professor, Electrical",
        specialization: "Electrical Engineering",
        gate_rank: "AIR 12 (2019)",
        experience: "9 years",
        rating: 4.9,
        available: true,
        subjects: &["Electric Circuits", "Power Systems", "Electrical Machines", "Control Systems"],
    },
];

impl Mentor {
    fn matches(&self, term: &str) -> bool {
        let subjects = self.subjects.join(" ");
        matches_search(term, &[self.name, self.specialization, &subjects])
    }
}

#[component]
pub fn ConnectMentorPage() -> impl IntoView {
    let search = RwSignal::new(String::new());
    let available_only = RwSignal::new(false);
    let requested: RwSignal<Option<&'static str>> = RwSignal::new(None);

    let mentor_card = move |mentor: &'static Mentor| {
        view! {
            <Card attr:tabindex="0" class="outline-none focus-visible:ring-4 focus-visible:ring-university-accent">
                <CardHeader>
                    <CardTitle>{mentor.name}</CardTitle>
                    <CardDescription>{mentor.title}</CardDescription>
                </CardHeader>
                <CardContent class="flex flex-col gap-1 text-sm">
                    <span class="font-bold">{mentor.specialization}</span>
                    <span>{format!("{} · {} · ★ {:.1}", mentor.gate_rank, mentor.experience, mentor.rating)}</span>
                    <span class="text-muted-foreground">{mentor.subjects.join(", ")}</span>
                </CardContent>
                <CardFooter class="justify-between">
                    <span class="text-xs font-bold uppercase">
                        {if mentor.available { "Available" } else { "Busy" }}
                    </span>
                    <Button
                        size=ButtonSize::Sm
                        attr:disabled=!mentor.available
                        on:click=move |_| requested.set(Some(mentor.name))
                    >
                        "Request session"
                    </Button>
                </CardFooter>
            </Card>
        }
    };

    view! {
        <AppLayout>
            <PageTitle title="Connect with Mentors" subtitle="Book time with faculty and GATE toppers." />
            <div class="mb-6 flex flex-col gap-3 md:flex-row md:items-center">
                <SearchBox value=search placeholder="Search by name, subject or specialization" />
                <Button
                    variant=ButtonVariant::Outline
                    size=ButtonSize::Sm
                    attr:aria-pressed=move || available_only.get().to_string()
                    on:click=move |_| available_only.update(|v| *v = !*v)
                >
                    {move || if available_only.get() { "Showing available" } else { "Show available only" }}
                </Button>
            </div>
            <Show when=move || requested.get().is_some() fallback=|| ().into_view()>
                <p class="mb-6 border-2 border-black bg-university-accent/20 p-3 text-sm font-bold" role="status">
                    {move || requested.get().map(|name| format!("Session request sent to {name}."))}
                </p>
            </Show>
            {move || {
                let term = search.get();
                let only_available = available_only.get();
                let list: Vec<&'static Mentor> = MENTORS
                    .iter()
                    .filter(|m| !only_available || m.available)
                    .filter(|m| m.matches(&term))
                    .collect();
                if list.is_empty() {
                    view! { <EmptyState message="No mentors found." /> }.into_any()
                } else {
                    view! { <CardGrid>{list.into_iter().map(mentor_card).collect_view()}</CardGrid> }.into_any()
                }
            }}
        </AppLayout>
    }
}

const COMMUNITY_SECTIONS: &[(&str, &str)] = &[
    ("Announcements", "Official updates, events and notices from the club."),
    ("Q&A Discussions", "Ask questions and get crisp answers from peers and mentors."),
    ("Study Groups", "Form small subject-specific groups to stay accountable."),
    ("Preparation Tips", "Short, actionable tips from toppers and faculty."),
];

#[component]
pub fn CommunityPage() -> impl IntoView {
    view! {
        <AppLayout>
            <PageTitle title="GATE Community" subtitle="Learn together with peers, alumni and faculty." />
            <div class="grid gap-6 md:grid-cols-2">
                {COMMUNITY_SECTIONS
                    .iter()
                    .map(|(title, description)| {
                        view! {
                            <Card attr:tabindex="0" class="outline-none focus-visible:ring-4 focus-visible:ring-university-accent">
                                <CardHeader>
                                    <CardTitle>{*title}</CardTitle>
                                    <CardDescription>{*description}</CardDescription>
                                </CardHeader>
                            </Card>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="mt-8">
                <a href="/connect-mentor" class=LINK_BUTTON>"Talk to a mentor"</a>
            </div>
        </AppLayout>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex min-h-screen flex-col items-center justify-center gap-4 bg-background p-4 text-center">
            <h1 class="text-6xl font-black">"404"</h1>
            <p class="text-muted-foreground">"This page does not exist."</p>
            <a href="/" class=LINK_BUTTON>"Back to home"</a>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentor_search_covers_subjects() {
        let found: Vec<_> = MENTORS
            .iter()
            .filter(|m| m.matches("thermo"))
            .map(|m| m.name)
            .collect();
        assert_eq!(found, vec!["Dr. Vikram Singh"]);
        assert_eq!(MENTORS.iter().filter(|m| m.matches("")).count(), MENTORS.len());
    }
}
