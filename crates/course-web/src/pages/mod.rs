//! Page Components

mod chapter_setup;
mod chapter_view;
mod course_setup;

pub use chapter_setup::ChapterSetupPage;
pub use chapter_view::ChapterViewPage;
pub use course_setup::CourseSetupPage;

use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

/// Route parameter read once when the page mounts
fn route_param(name: &str) -> String {
    use_params_map().with_untracked(|params| params.get(name).unwrap_or_default())
}
