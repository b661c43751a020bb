//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use crate::api::Api;
use crate::components::{ConfettiOverlay, Toaster};
use crate::pages::{ChapterSetupPage, ChapterViewPage, CourseSetupPage};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_context(Api::new());

    view! {
        <Router>
            <ConfettiOverlay />
            <Toaster />
            <main class="app">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/teacher/courses/:course_id") view=CourseSetupPage />
                    <Route
                        path=path!("/teacher/courses/:course_id/chapters/:chapter_id")
                        view=ChapterSetupPage
                    />
                    <Route
                        path=path!("/courses/:course_id/chapters/:chapter_id")
                        view=ChapterViewPage
                    />
                </Routes>
            </main>
        </Router>
    }
}
