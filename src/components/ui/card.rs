use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "bg-card text-card-foreground flex flex-col gap-4 border-2 border-black py-5 shadow-[6px_6px_0_0_#000]"}
    clx! {CardHeader, div, "flex flex-col gap-1.5 px-5"}
    clx! {CardTitle, h2, "text-lg font-black leading-tight"}
    clx! {CardDescription, p, "text-muted-foreground text-sm"}
    clx! {CardContent, div, "px-5"}
    clx! {CardFooter, footer, "flex items-center gap-2 px-5"}
    clx! {CardGrid, div, "grid gap-6 sm:grid-cols-2 lg:grid-cols-3"}
}

pub use components::*;
