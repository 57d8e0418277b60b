use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::scroll::ScrollPhysics;

fn viewport_height() -> f64 {
    window()
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

fn set_body_overflow(hidden: bool) {
    let Some(body) = document().body() else {
        return;
    };
    let style = body.style();
    let _ = if hidden {
        style.set_property("overflow", "hidden")
    } else {
        style.remove_property("overflow").map(|_| ())
    };
}

fn schedule_frame(physics: StoredValue<ScrollPhysics>, offset: RwSignal<f64>) {
    let cb = Closure::once_into_js(move || {
        // The component may have unmounted between frames.
        let Some(more) = physics.try_update_value(|p| p.step()) else {
            return;
        };
        offset.set(physics.with_value(|p| p.scroll_top()));
        if more {
            schedule_frame(physics, offset);
        }
    });
    if let Err(e) = window().request_animation_frame(cb.unchecked_ref()) {
        log::warn!("requestAnimationFrame failed: {e:?}");
    }
}

/// Inertial scrolling container for long landing pages.
///
/// The page itself stops scrolling while this is mounted; wheel and touch
/// input move the content with eased `translateY` instead.
#[component]
pub fn SmoothScroll(
    #[prop(default = 1.0)] smooth: f64,
    #[prop(optional)] show_progress: bool,
    children: Children,
) -> impl IntoView {
    let physics = StoredValue::new(ScrollPhysics::new(smooth));
    let offset = RwSignal::new(0.0);
    let progress = RwSignal::new(0.0);
    let content_ref = NodeRef::<html::Div>::new();

    let measure = move || {
        if let Some(content) = content_ref.get_untracked() {
            let max = content.scroll_height() as f64 - viewport_height();
            physics.update_value(|p| p.set_max_scroll(max));
        }
    };

    let drive = move |start: bool| {
        progress.set(physics.with_value(|p| p.progress()));
        if start {
            schedule_frame(physics, offset);
        }
    };

    set_body_overflow(true);
    on_cleanup(|| set_body_overflow(false));

    let on_wheel = move |ev: web_sys::WheelEvent| {
        ev.prevent_default();
        measure();
        let start = physics
            .try_update_value(|p| p.wheel(ev.delta_y()))
            .unwrap_or(false);
        drive(start);
    };

    let first_touch_y = |ev: &web_sys::TouchEvent| ev.touches().get(0).map(|t| t.client_y() as f64);

    let on_touch_start = move |ev: web_sys::TouchEvent| {
        measure();
        if let Some(y) = first_touch_y(&ev) {
            physics.update_value(|p| p.touch_start(y));
        }
    };

    let on_touch_move = move |ev: web_sys::TouchEvent| {
        let Some(y) = first_touch_y(&ev) else {
            return;
        };
        ev.prevent_default();
        let start = physics
            .try_update_value(|p| p.touch_move(y))
            .unwrap_or(false);
        drive(start);
    };

    let on_touch_end = move |_: web_sys::TouchEvent| {
        physics.update_value(|p| p.touch_end());
    };

    // Keep keyboard focus on screen: scroll so the focused element sits in
    // the upper third of the viewport.
    let on_focus_in = move |ev: web_sys::FocusEvent| {
        let (Some(content), Some(target)) = (
            content_ref.get_untracked(),
            ev.target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok()),
        ) else {
            return;
        };
        let top = target.get_bounding_client_rect().top()
            - content.get_bounding_client_rect().top();
        measure();
        let start = physics
            .try_update_value(|p| p.scroll_to(top - viewport_height() / 3.0))
            .unwrap_or(false);
        drive(start);
    };

    view! {
        <div
            class="fixed inset-0 overflow-hidden"
            on:wheel=on_wheel
            on:touchstart=on_touch_start
            on:touchmove=on_touch_move
            on:touchend=on_touch_end
            on:focusin=on_focus_in
            // scrollIntoView may scroll the clipped wrapper itself; undo it.
            on:scroll=move |ev| {
                event_target::<web_sys::HtmlElement>(&ev).set_scroll_top(0)
            }
        >
            <Show when=move || show_progress fallback=|| ().into_view()>
                <div
                    class="fixed left-0 top-0 z-40 h-1 bg-university-accent"
                    style:width=move || format!("{:.2}%", progress.get() * 100.0)
                />
            </Show>
            <div
                node_ref=content_ref
                class="will-change-transform"
                style:transform=move || format!("translate3d(0, {:.2}px, 0)", -offset.get())
            >
                {children()}
            </div>
        </div>
    }
}
