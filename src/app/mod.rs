use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::components::{KeyboardNavigation, ProtectedRoute};
use crate::config::EnvConfig;
use crate::pages::{
    AuthPage, BranchSelectionPage, CommunityPage, ConnectMentorPage, DashboardPage, LandingPage,
    MockPapersPage, NotFoundPage, PyqsPage, ResourcesPage, StudyResourcesPage, SubjectsPage,
    TestsPage,
};
use crate::state::{AppContext, AppState};

#[component]
pub fn App(config: EnvConfig) -> impl IntoView {
    let state = AppState::new(config);
    provide_context(AppContext(state));
    state.auth.init();

    // Keyboard navigation needs the router for its page shortcuts.
    view! {
        <Router>
            <KeyboardNavigation>
                <Routes fallback=NotFoundPage>
                    <Route path=path!("") view=LandingPage />
                    <Route path=path!("auth") view=AuthPage />
                    <Route path=path!("branch-selection") view=move || view! {
                        <ProtectedRoute require_branch=false>
                            <BranchSelectionPage />
                        </ProtectedRoute>
                    } />
                    <Route path=path!("dashboard") view=move || view! {
                        <ProtectedRoute>
                            <DashboardPage />
                        </ProtectedRoute>
                    } />
                    <Route path=path!("pyqs") view=move || view! {
                        <ProtectedRoute>
                            <PyqsPage />
                        </ProtectedRoute>
                    } />
                    <Route path=path!("tests") view=move || view! {
                        <ProtectedRoute>
                            <TestsPage />
                        </ProtectedRoute>
                    } />
                    <Route path=path!("study-resources") view=move || view! {
                        <ProtectedRoute>
                            <StudyResourcesPage />
                        </ProtectedRoute>
                    } />
                    <Route path=path!("subjects") view=move || view! {
                        <ProtectedRoute>
                            <SubjectsPage />
                        </ProtectedRoute>
                    } />
                    <Route path=path!("mock-papers") view=move || view! {
                        <ProtectedRoute>
                            <MockPapersPage />
                        </ProtectedRoute>
                    } />
                    <Route path=path!("connect-mentor") view=move || view! {
                        <ProtectedRoute>
                            <ConnectMentorPage />
                        </ProtectedRoute>
                    } />
                    <Route path=path!("community") view=move || view! {
                        <ProtectedRoute>
                            <CommunityPage />
                        </ProtectedRoute>
                    } />
                    <Route path=path!("resources") view=move || view! {
                        <ProtectedRoute>
                            <ResourcesPage />
                        </ProtectedRoute>
                    } />
                </Routes>
            </KeyboardNavigation>
        </Router>
    }
}
