use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full border-2 border-black px-4 py-3 text-sm font-medium"}
    clx! {AlertDescription, p, "text-sm leading-relaxed"}
}

pub use components::*;
