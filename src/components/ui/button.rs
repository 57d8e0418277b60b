use leptos::prelude::*;
use leptos_ui::variants;

variants! {
    Button {
        base: "inline-flex items-center justify-center gap-2 whitespace-nowrap text-sm font-bold uppercase tracking-wide transition-transform disabled:pointer-events-none disabled:opacity-50 [&_svg]:pointer-events-none [&_svg:not([class*='size-'])]:size-4 [&_svg]:shrink-0 shrink-0 outline-none focus-visible:ring-4 focus-visible:ring-university-accent hover:cursor-pointer active:translate-x-[2px] active:translate-y-[2px] active:shadow-none touch-manipulation select-none",
        variants: {
            variant: {
                Default: "border-2 border-black bg-university-primary text-white shadow-[4px_4px_0_0_#000] hover:bg-university-forest",
                Outline: "border-2 border-black bg-background text-foreground shadow-[4px_4px_0_0_#000] hover:bg-university-accent/20",
                Ghost: "hover:bg-university-primary/10",
                Destructive: "border-2 border-black bg-destructive text-white shadow-[4px_4px_0_0_#000] hover:bg-destructive/90",
                Link: "text-university-primary underline-offset-4 hover:underline",
            },
            size: {
                Default: "h-10 px-5 py-2",
                Sm: "h-8 px-3",
                Lg: "h-12 px-8 text-base",
                Icon: "size-10",
            }
        },
        component: {
            element: button,
            support_href: true,
            support_aria_current: true
        }
    }
}
