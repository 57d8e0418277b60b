use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos_dom::helpers::{window_event_listener, WindowListenerHandle};
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, MutationObserver, MutationObserverInit};

use super::dispatcher::{KeyOutcome, NavigationManager};
use super::dom::{DomElement, DomSampler};
use super::shortcut::{KeyInput, Shortcut, ShortcutGroup};

type Manager = NavigationManager<DomSampler>;

/// Calls that arrived while the manager was busy with a key event.
enum Pending {
    Register(Shortcut),
    Enable,
    Disable,
}

struct Bindings {
    keydown: WindowListenerHandle,
    focusin: WindowListenerHandle,
    unload: WindowListenerHandle,
    observer: Option<MutationObserver>,
    _on_mutation: Option<Closure<dyn FnMut(js_sys::Array, MutationObserver)>>,
}

impl Bindings {
    fn release(self) {
        self.keydown.remove();
        self.focusin.remove();
        self.unload.remove();
        if let Some(observer) = self.observer {
            observer.disconnect();
        }
    }
}

/// Owns the navigation manager and its window listeners.
///
/// Built once by the app root and shared through context. Listeners hold a
/// clone of the manager; if an event arrives while the manager is already
/// borrowed (focus moved by a shortcut, a callback registering a new
/// shortcut) it is dropped or queued instead of re-entering.
pub struct NavigationService {
    manager: Rc<RefCell<Manager>>,
    pending: Rc<RefCell<Vec<Pending>>>,
    bindings: Rc<RefCell<Option<Bindings>>>,
}

impl NavigationService {
    pub fn new(manager: Manager) -> Self {
        Self {
            manager: Rc::new(RefCell::new(manager)),
            pending: Rc::new(RefCell::new(Vec::new())),
            bindings: Rc::new(RefCell::new(None)),
        }
    }

    /// Install key, focus and unload listeners plus the DOM observer.
    /// Calling it twice keeps the first set.
    pub fn bind(&self) {
        if self.is_bound() {
            return;
        }

        let manager = self.manager.clone();
        let pending = self.pending.clone();
        let keydown = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
            let input = KeyInput::from(&ev);
            let outcome = match manager.try_borrow_mut() {
                Ok(mut m) => m.handle_key(&input),
                Err(_) => return,
            };
            if outcome.is_handled() {
                ev.prevent_default();
                ev.stop_propagation();
            }
            if let KeyOutcome::Deferred(f) = outcome {
                f();
            }
            drain(&manager, &pending);
        });

        let manager = self.manager.clone();
        let focusin = window_event_listener(ev::focusin, move |ev: web_sys::FocusEvent| {
            let Some(el) = ev.target().and_then(|t| t.dyn_into::<HtmlElement>().ok()) else {
                return;
            };
            if let Ok(mut m) = manager.try_borrow_mut() {
                m.handle_focus(&DomElement::new(el));
            }
        });

        let bindings = self.bindings.clone();
        let unload = window_event_listener(ev::beforeunload, move |_| {
            release(&bindings);
        });

        let (observer, on_mutation) = match self.observe() {
            Some((o, cb)) => (Some(o), Some(cb)),
            None => (None, None),
        };

        if let Ok(mut m) = self.manager.try_borrow_mut() {
            m.dom_changed();
        }

        *self.bindings.borrow_mut() = Some(Bindings {
            keydown,
            focusin,
            unload,
            observer,
            _on_mutation: on_mutation,
        });
        log::debug!("keyboard navigation bound");
    }

    fn observe(
        &self,
    ) -> Option<(
        MutationObserver,
        Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
    )> {
        let body = web_sys::window()?.document()?.body()?;

        let manager = self.manager.clone();
        let cb = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
            move |_records: js_sys::Array, _observer: MutationObserver| {
                if let Ok(mut m) = manager.try_borrow_mut() {
                    m.dom_changed();
                }
            },
        );

        let observer = match MutationObserver::new(cb.as_ref().unchecked_ref()) {
            Ok(o) => o,
            Err(e) => {
                log::warn!("mutation observer unavailable: {e:?}");
                return None;
            }
        };
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        if let Err(e) = observer.observe_with_options(&body, &init) {
            log::warn!("could not observe document body: {e:?}");
            return None;
        }
        Some((observer, cb))
    }

    pub fn is_bound(&self) -> bool {
        self.bindings.borrow().is_some()
    }

    /// Remove every listener and disconnect the observer. Safe to call more
    /// than once, and before [`bind`](Self::bind).
    pub fn teardown(&self) {
        release(&self.bindings);
    }

    pub fn register_shortcut(&self, shortcut: Shortcut) {
        self.apply(Pending::Register(shortcut));
    }

    pub fn enable(&self) {
        self.apply(Pending::Enable);
    }

    pub fn disable(&self) {
        self.apply(Pending::Disable);
    }

    pub fn is_enabled(&self) -> bool {
        self.manager
            .try_borrow()
            .map(|m| m.is_enabled())
            .unwrap_or(true)
    }

    pub fn shortcut_groups(&self) -> Vec<ShortcutGroup> {
        self.manager
            .try_borrow()
            .map(|m| m.shortcut_groups())
            .unwrap_or_default()
    }

    /// Rebuild the navigation context for a new route.
    pub fn page_changed(&self, path: &str) {
        match self.manager.try_borrow_mut() {
            Ok(mut m) => m.page_changed(path),
            Err(_) => log::debug!("route change to {path} while dispatching; observer will resample"),
        }
    }

    fn apply(&self, op: Pending) {
        self.pending.borrow_mut().push(op);
        drain(&self.manager, &self.pending);
    }
}

impl Drop for NavigationService {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn release(bindings: &RefCell<Option<Bindings>>) {
    let taken = bindings.borrow_mut().take();
    if let Some(b) = taken {
        b.release();
        log::debug!("keyboard navigation released");
    }
}

fn drain(manager: &RefCell<Manager>, pending: &RefCell<Vec<Pending>>) {
    let Ok(mut m) = manager.try_borrow_mut() else {
        return;
    };
    let ops = std::mem::take(&mut *pending.borrow_mut());
    for op in ops {
        match op {
            Pending::Register(s) => m.register_shortcut(s),
            Pending::Enable => m.enable(),
            Pending::Disable => m.disable(),
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::feedback::NoFeedback;
    use crate::nav::{Chord, Navigator};
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn service() -> Rc<NavigationService> {
        let sampler = DomSampler::from_window().unwrap();
        let manager = NavigationManager::new(Navigator::new(sampler), Box::new(NoFeedback));
        Rc::new(NavigationService::new(manager))
    }

    fn press(key: &str) {
        let init = web_sys::KeyboardEventInit::new();
        init.set_key(key);
        init.set_bubbles(true);
        init.set_cancelable(true);
        let event = web_sys::KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init)
            .unwrap();
        web_sys::window().unwrap().dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    fn teardown_before_bind_and_twice_is_harmless() {
        let nav = service();
        nav.teardown();
        assert!(!nav.is_bound());

        nav.bind();
        assert!(nav.is_bound());
        nav.teardown();
        nav.teardown();
        assert!(!nav.is_bound());
    }

    #[wasm_bindgen_test]
    fn second_bind_keeps_first_listeners() {
        let nav = service();
        let hits = Rc::new(std::cell::Cell::new(0));
        let counter = hits.clone();
        nav.register_shortcut(Shortcut::run(Chord::new("f8"), "Count", "Test", move || {
            counter.set(counter.get() + 1)
        }));

        nav.bind();
        nav.bind();
        press("F8");
        assert_eq!(hits.get(), 1);

        nav.teardown();
        press("F8");
        assert_eq!(hits.get(), 1);
    }

    #[wasm_bindgen_test]
    fn callback_can_disable_while_dispatching() {
        let nav = service();
        let weak = Rc::downgrade(&nav);
        nav.register_shortcut(Shortcut::run(Chord::new("f9"), "Disable", "Test", move || {
            if let Some(nav) = weak.upgrade() {
                nav.disable();
            }
        }));
        nav.bind();

        press("F9");
        assert!(!nav.is_enabled());
        let next = nav.manager.borrow_mut().handle_key(&KeyInput::new("f9"));
        assert!(matches!(next, KeyOutcome::Ignored));
        nav.teardown();
    }

    #[wasm_bindgen_test]
    fn calls_during_a_key_event_drain_in_order() {
        let nav = service();
        {
            let _busy = nav.manager.borrow_mut();
            nav.disable();
            nav.enable();
            nav.register_shortcut(Shortcut::run(Chord::new("f7"), "Late", "Test", || {}));
            assert_eq!(nav.pending.borrow().len(), 3);
        }
        drain(&nav.manager, &nav.pending);
        assert!(nav.pending.borrow().is_empty());
        assert!(nav.is_enabled());
        assert!(nav.manager.borrow().shortcuts().iter().any(|s| s.description == "Late"));

        {
            let _busy = nav.manager.borrow_mut();
            nav.enable();
            nav.disable();
        }
        drain(&nav.manager, &nav.pending);
        assert!(!nav.is_enabled());
    }

    #[wasm_bindgen_test]
    fn beforeunload_releases_bindings() {
        let nav = service();
        nav.bind();
        let unload = web_sys::Event::new("beforeunload").unwrap();
        web_sys::window().unwrap().dispatch_event(&unload).unwrap();
        assert!(!nav.is_bound());
    }
}
