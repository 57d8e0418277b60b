use leptos::prelude::*;

use super::layout::{SiteFooter, SiteHeader, LINK_BUTTON};
use crate::components::ui::{Card, CardDescription, CardGrid, CardHeader, CardTitle};
use crate::components::SmoothScroll;

const FEATURES: &[(&str, &str)] = &[
    ("Study Materials Hub", "Subject-wise notes and lectures for every GATE discipline."),
    ("Previous Year Papers", "Fifteen years of GATE papers with solutions and difficulty tags."),
    ("Mock Test Engine", "Full-length tests in the GATE format with detailed analytics."),
    ("Video Lectures", "Faculty sessions from Silver Oak University."),
    ("Community Learning", "Study with peers, alumni mentors and faculty."),
    ("Progress Analytics", "Track scores and accuracy across every attempt."),
];

const SUBJECTS: &[(&str, &str)] = &[
    ("Engineering Mathematics", "Linear Algebra, Calculus, Differential Equations, Complex Variables"),
    ("Computer Science & IT", "Programming, Data Structures, Algorithms, Networks, Databases"),
    ("Electrical Engineering", "Circuit Analysis, Power Systems, Control Systems, Signals"),
    ("Mechanical Engineering", "Thermodynamics, Fluid Mechanics, Manufacturing, Machine Design"),
    ("Civil Engineering", "Structural Analysis, Geotechnical, Transportation, Environmental"),
    ("Chemical Engineering", "Process Technology, Heat Transfer, Mass Transfer, Reactions"),
];

const STATS: &[(&str, &str)] = &[("15,000+", "Active Students"), ("95%", "Success Rate"), ("27", "GATE Subjects")];

fn card_list(items: &'static [(&'static str, &'static str)]) -> impl IntoView {
    items
        .iter()
        .map(|(title, description)| {
            view! {
                <Card attr:tabindex="0" class="focus-visible:outline-4 focus-visible:outline-university-accent">
                    <CardHeader>
                        <CardTitle>{*title}</CardTitle>
                        <CardDescription>{*description}</CardDescription>
                    </CardHeader>
                </Card>
            }
        })
        .collect_view()
}

#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <SmoothScroll show_progress=true>
            <SiteHeader />
            <section class="border-b-4 border-black bg-university-primary px-4 py-24 text-white">
                <div class="mx-auto flex max-w-5xl flex-col gap-8">
                    <span class="w-fit border-2 border-white px-3 py-1 text-xs font-bold uppercase tracking-widest">
                        "Silver Oak University Excellence"
                    </span>
                    <h1 class="text-5xl font-black leading-tight lg:text-7xl">
                        "GATE CLUB"
                        <span class="mt-2 block text-3xl font-normal lg:text-4xl">"Digital Excellence Hub"</span>
                    </h1>
                    <p class="max-w-2xl text-xl opacity-90">
                        "Prepare for GATE with study plans, previous year papers and mock tests in one place."
                    </p>
                    <div class="flex flex-col gap-4 sm:flex-row">
                        <a href="/auth" class=LINK_BUTTON>"Access Student Portal"</a>
                        <a href="/subjects" class=LINK_BUTTON>"Browse Subjects"</a>
                    </div>
                    <dl class="grid grid-cols-3 gap-6 pt-8">
                        {STATS
                            .iter()
                            .map(|(value, label)| {
                                view! {
                                    <div class="text-center">
                                        <dt class="text-sm opacity-80">{*label}</dt>
                                        <dd class="text-3xl font-black text-university-accent">{*value}</dd>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </dl>
                </div>
            </section>

            <section class="mx-auto max-w-7xl px-4 py-20">
                <h2 class="mb-10 text-4xl font-black">"Everything you need to crack GATE"</h2>
                <CardGrid>{card_list(FEATURES)}</CardGrid>
            </section>

            <section class="mx-auto max-w-7xl px-4 pb-20">
                <h2 class="mb-10 text-4xl font-black">"Subjects"</h2>
                <CardGrid>{card_list(SUBJECTS)}</CardGrid>
            </section>

            <SiteFooter />
        </SmoothScroll>
    }
}
