use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use crate::components::protected_route::{BRANCH_SELECTION_PATH, DASHBOARD_PATH};
use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardDescription, CardHeader, CardTitle, Input, Label, Spinner,
};
use crate::models::Student;
use crate::state::AppContext;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthMode {
    SignIn,
    FirstTime,
}

/// Two operands in `1..=10` for the arithmetic check.
fn captcha_operands() -> (u32, u32) {
    let mut bytes = [0u8; 2];
    if let Err(e) = getrandom::getrandom(&mut bytes) {
        log::warn!("getrandom failed, using fixed captcha: {e}");
    }
    (u32::from(bytes[0] % 10) + 1, u32::from(bytes[1] % 10) + 1)
}

fn captcha_solved(operands: (u32, u32), answer: &str) -> bool {
    answer.trim().parse::<u32>().ok() == Some(operands.0 + operands.1)
}

fn landing_path(student: &Student) -> &'static str {
    if student.branch_selected() {
        DASHBOARD_PATH
    } else {
        BRANCH_SELECTION_PATH
    }
}

#[component]
pub fn AuthPage() -> impl IntoView {
    let auth = expect_context::<AppContext>().0.auth;
    let navigate = StoredValue::new(use_navigate());

    let mode = RwSignal::new(AuthMode::SignIn);
    let enrollment = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let captcha = captcha_operands();
    let captcha_answer = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let submitting = RwSignal::new(false);

    let verified = move || captcha_solved(captcha, &captcha_answer.get());

    // Already signed in: skip the form.
    Effect::new(move |_| {
        if auth.loading.get() {
            return;
        }
        if let Some(path) = auth.student.with(|s| s.as_ref().map(landing_path)) {
            navigate.with_value(|nav| nav(path, Default::default()));
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if !verified() {
            error.set(Some("Please complete the security verification".to_string()));
            return;
        }

        let enrollment_val = enrollment.get();
        let password_val = password.get();
        let first_time = mode.get() == AuthMode::FirstTime;

        submitting.set(true);
        error.set(None);

        spawn_local(async move {
            let result = if first_time {
                auth.sign_up(enrollment_val, password_val).await
            } else {
                auth.sign_in(enrollment_val, password_val).await
            };
            match result {
                Ok(student) => {
                    let path = landing_path(&student);
                    navigate.with_value(|nav| nav(path, Default::default()));
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    let tab = move |target: AuthMode, label: &'static str| {
        let selected = move || mode.get() == target;
        view! {
            <button
                type="button"
                role="tab"
                aria-selected=move || selected().to_string()
                class=move || {
                    if selected() {
                        "flex-1 border-2 border-black bg-university-primary py-2 text-sm font-bold uppercase text-white"
                    } else {
                        "flex-1 border-2 border-black bg-background py-2 text-sm font-bold uppercase hover:bg-university-accent/20"
                    }
                }
                on:click=move |_| {
                    mode.set(target);
                    error.set(None);
                }
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="flex min-h-screen items-center justify-center bg-university-primary p-4">
            <Card class="w-full max-w-md">
                <CardHeader class="text-center">
                    <CardTitle class="text-2xl text-university-forest">"Silver Oak University"</CardTitle>
                    <CardDescription>"GATE CLUB - Student Access Portal"</CardDescription>
                </CardHeader>

                <CardContent>
                    <div class="mb-5 flex gap-3" role="tablist">
                        {tab(AuthMode::SignIn, "Sign In")}
                        {tab(AuthMode::FirstTime, "First Time")}
                    </div>

                    <form class="flex flex-col gap-4" on:submit=on_submit>
                        <Show when=move || mode.get() == AuthMode::FirstTime fallback=|| ().into_view()>
                            <p class="border-2 border-black bg-university-accent/20 p-3 text-sm">
                                <strong>"First time accessing GATE CLUB?"</strong>
                                " Enter your enrollment number and create a password for future logins."
                            </p>
                        </Show>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="enrollment">"Enrollment Number"</Label>
                            <Input
                                id="enrollment"
                                placeholder="e.g., SOE2021CS001"
                                autocomplete="username"
                                bind_value=enrollment
                                required=true
                                class="uppercase"
                            />
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="password">
                                {move || if mode.get() == AuthMode::FirstTime { "Create Password" } else { "Password" }}
                            </Label>
                            <div class="flex gap-2">
                                {move || {
                                    let kind = if show_password.get() { "text" } else { "password" };
                                    view! {
                                        <Input
                                            id="password"
                                            r#type=kind
                                            placeholder="Enter your password"
                                            autocomplete="current-password"
                                            bind_value=password
                                            required=true
                                        />
                                    }
                                }}
                                <Button
                                    attr:r#type="button"
                                    variant=ButtonVariant::Outline
                                    size=ButtonSize::Sm
                                    class="h-10"
                                    on:click=move |_| show_password.update(|v| *v = !*v)
                                >
                                    {move || if show_password.get() { "Hide" } else { "Show" }}
                                </Button>
                            </div>
                        </div>

                        <div class="flex flex-col gap-1.5">
                            <Label html_for="captcha">"Security Verification"</Label>
                            <div class="flex items-center gap-2 text-sm font-bold">
                                {format!("{} + {} =", captcha.0, captcha.1)}
                                <Input
                                    id="captcha"
                                    r#type="number"
                                    placeholder="Answer"
                                    bind_value=captcha_answer
                                    class="w-24"
                                />
                                <Show when=verified fallback=|| ().into_view()>
                                    <span class="text-university-forest">"✓"</span>
                                </Show>
                            </div>
                        </div>

                        <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                            <Alert class="border-destructive bg-destructive/10">
                                <AlertDescription class="text-destructive">
                                    {move || error.get().unwrap_or_default()}
                                </AlertDescription>
                            </Alert>
                        </Show>

                        <Button class="w-full" attr:disabled=move || submitting.get() || !verified()>
                            <Show when=move || submitting.get() fallback=|| ().into_view()>
                                <Spinner />
                            </Show>
                            {move || match (submitting.get(), mode.get()) {
                                (true, _) => "Signing In...",
                                (false, AuthMode::SignIn) => "Sign In",
                                (false, AuthMode::FirstTime) => "Create Password & Sign In",
                            }}
                        </Button>
                    </form>
                </CardContent>
            </Card>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captcha_operands_in_range() {
        for _ in 0..50 {
            let (a, b) = captcha_operands();
            assert!((1..=10).contains(&a) && (1..=10).contains(&b));
        }
    }

    #[test]
    fn test_captcha_answer() {
        assert!(captcha_solved((3, 4), " 7 "));
        assert!(!captcha_solved((3, 4), "8"));
        assert!(!captcha_solved((3, 4), "seven"));
    }
}
