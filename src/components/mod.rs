pub mod hooks;
pub mod keyboard;
pub mod protected_route;
pub mod shortcut_help;
pub mod smooth_scroll;
pub mod ui;

pub use keyboard::KeyboardNavigation;
pub use protected_route::ProtectedRoute;
pub use shortcut_help::ShortcutHelp;
pub use smooth_scroll::SmoothScroll;
