use leptos::prelude::*;

use crate::components::ui::{Button, ButtonSize, ButtonVariant, Card, CardContent, CardHeader, CardTitle};
use crate::state::KeyboardContext;

/// Overlay listing every registered shortcut by category.
///
/// Opened with `Shift+?`; the close button carries `data-close` so Escape
/// dismisses it through focus navigation.
#[component]
pub fn ShortcutHelp() -> impl IntoView {
    let keyboard = expect_context::<KeyboardContext>();
    let help_open = keyboard.help_open;

    view! {
        <Show when=move || help_open.get() fallback=|| ().into_view()>
            <div
                class="fixed inset-0 z-50 flex items-center justify-center bg-black/50 p-4"
                role="dialog"
                aria-modal="true"
                aria-labelledby="shortcut-help-title"
                on:click=move |_| help_open.set(false)
            >
                <Card
                    class="max-h-[80vh] w-full max-w-lg overflow-y-auto"
                    on:click=move |ev: web_sys::MouseEvent| {
                        ev.stop_propagation()
                    }
                >
                    <CardHeader class="flex-row items-center justify-between">
                        <CardTitle attr:id="shortcut-help-title">"Keyboard shortcuts"</CardTitle>
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            attr:data-close=""
                            attr:aria-label="Close"
                            on:click=move |_| help_open.set(false)
                        >
                            "×"
                        </Button>
                    </CardHeader>
                    <CardContent class="flex flex-col gap-5">
                        {move || {
                            keyboard
                                .shortcut_groups()
                                .into_iter()
                                .map(|group| {
                                    view! {
                                        <section class="flex flex-col gap-2">
                                            <h3 class="text-xs font-black uppercase tracking-widest text-university-primary">
                                                {group.category}
                                            </h3>
                                            <ul class="flex flex-col gap-1.5">
                                                {group
                                                    .entries
                                                    .into_iter()
                                                    .map(|entry| {
                                                        view! {
                                                            <li class="flex items-center justify-between gap-4 text-sm">
                                                                <span>{entry.description}</span>
                                                                <kbd class="border-2 border-black bg-muted px-2 py-0.5 font-mono text-xs">
                                                                    {entry.keys}
                                                                </kbd>
                                                            </li>
                                                        }
                                                    })
                                                    .collect_view()}
                                            </ul>
                                        </section>
                                    }
                                })
                                .collect_view()
                        }}
                    </CardContent>
                </Card>
            </div>
        </Show>
    }
}
