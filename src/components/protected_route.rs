use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_location;

use crate::components::ui::LoadingScreen;
use crate::models::Student;
use crate::state::AppContext;

pub const AUTH_PATH: &str = "/auth";
pub const BRANCH_SELECTION_PATH: &str = "/branch-selection";
pub const DASHBOARD_PATH: &str = "/dashboard";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    Loading,
    Redirect(&'static str),
    Render,
}

/// Decide what a protected page shows for the current session.
pub fn route_guard(
    student: Option<&Student>,
    loading: bool,
    require_branch: bool,
    path: &str,
) -> Guard {
    if loading {
        return Guard::Loading;
    }
    let Some(student) = student else {
        return Guard::Redirect(AUTH_PATH);
    };
    let on_selection = path == BRANCH_SELECTION_PATH;
    match (student.branch_selected(), on_selection) {
        (false, false) if require_branch => Guard::Redirect(BRANCH_SELECTION_PATH),
        (true, true) => Guard::Redirect(DASHBOARD_PATH),
        _ => Guard::Render,
    }
}

#[component]
pub fn ProtectedRoute(
    #[prop(default = true)] require_branch: bool,
    children: ChildrenFn,
) -> impl IntoView {
    let auth = expect_context::<AppContext>().0.auth;
    let location = use_location();
    // Store children so the view sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    // Memoised so a refreshed student record does not remount the page.
    let guard = Memo::new(move |_| {
        auth.student.with(|s| {
            route_guard(
                s.as_ref(),
                auth.loading.get(),
                require_branch,
                &location.pathname.get(),
            )
        })
    });

    move || match guard.get() {
        Guard::Loading => view! { <LoadingScreen /> }.into_any(),
        Guard::Redirect(path) => view! { <Redirect path=path /> }.into_any(),
        Guard::Render => children.with_value(|c| c()).into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(department: Option<&str>) -> Student {
        Student {
            id: "s1".into(),
            enrollment_no: "SOE2021CS001".into(),
            first_name: Some("Asha".into()),
            last_name: Some("Rao".into()),
            department: department.map(str::to_string),
            year_of_study: Some(3),
            is_active: true,
        }
    }

    #[test]
    fn test_waits_while_session_is_checked() {
        assert_eq!(route_guard(None, true, true, "/dashboard"), Guard::Loading);
    }

    #[test]
    fn test_signed_out_goes_to_auth() {
        assert_eq!(
            route_guard(None, false, true, "/tests"),
            Guard::Redirect(AUTH_PATH)
        );
    }

    #[test]
    fn test_missing_branch() {
        let s = student(None);
        assert_eq!(
            route_guard(Some(&s), false, true, "/dashboard"),
            Guard::Redirect(BRANCH_SELECTION_PATH)
        );
        assert_eq!(
            route_guard(Some(&s), false, false, BRANCH_SELECTION_PATH),
            Guard::Render
        );
    }

    #[test]
    fn test_chosen_branch_leaves_selection_page() {
        let s = student(Some("CSE"));
        assert_eq!(
            route_guard(Some(&s), false, false, BRANCH_SELECTION_PATH),
            Guard::Redirect(DASHBOARD_PATH)
        );
        assert_eq!(route_guard(Some(&s), false, true, "/pyqs"), Guard::Render);
    }
}
