//! Chapter Page (student view)

use course_core::{ChapterId, CourseId, CourseSnapshot};
use leptos::prelude::*;
use rust_decimal::Decimal;

use super::route_param;
use crate::api::Api;
use crate::components::EnrollButton;

#[component]
pub fn ChapterViewPage() -> impl IntoView {
    let api = expect_context::<Api>();
    let course_id = CourseId::new(route_param("course_id"));
    let chapter_id = ChapterId::new(route_param("chapter_id"));

    let course = RwSignal::new(None::<CourseSnapshot>);
    let gateway = api.gateway.clone();
    leptos::task::spawn_local(async move {
        match gateway.course(&course_id).await {
            Ok(snapshot) => course.set(Some(snapshot)),
            Err(err) => tracing::error!(course = %course_id, error = %err, "Failed to load course for chapter view"),
        }
    });

    view! {
        <div class="chapter-view">
            {move || {
                course
                    .get()
                    .and_then(|course| {
                        let chapter = course.chapters.iter().find(|c| c.id == chapter_id)?.clone();
                        let price = course.price.unwrap_or(Decimal::ZERO);
                        Some(view! {
                            <div class="chapter-header">
                                <h2>{chapter.title.clone()}</h2>
                                {(!chapter.is_free).then(|| view! {
                                    <p class="locked">"You need to purchase this course to watch this chapter."</p>
                                    <EnrollButton course_id=course.id.clone() price=price />
                                })}
                            </div>
                        })
                    })
            }}
        </div>
    }
}
