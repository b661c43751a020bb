//! Chapter Setup Page

use std::sync::Arc;

use course_core::{
    ChapterId, ChapterSnapshot, CourseId, FieldController, ResourcePath, Services,
    validation::{Access, Description, Title},
};
use leptos::prelude::*;

use super::route_param;
use crate::api::Api;
use crate::components::{CompletionBadge, field_card};

#[component]
pub fn ChapterSetupPage() -> impl IntoView {
    let api = expect_context::<Api>();
    let course_id = CourseId::new(route_param("course_id"));
    let chapter_id = ChapterId::new(route_param("chapter_id"));
    let back = format!("/teacher/courses/{course_id}");

    let version = RwSignal::new(0_u64);
    let initial = RwSignal::new(None::<ChapterSnapshot>);
    let latest = RwSignal::new(None::<ChapterSnapshot>);
    let load_failed = RwSignal::new(false);

    let gateway = api.gateway.clone();
    Effect::new(move |_| {
        version.track();
        let gateway = gateway.clone();
        let (course_id, chapter_id) = (course_id.clone(), chapter_id.clone());
        leptos::task::spawn_local(async move {
            match gateway.chapter(&course_id, &chapter_id).await {
                Ok(chapter) => {
                    if initial.with_untracked(Option::is_none) {
                        initial.set(Some(chapter.clone()));
                    }
                    latest.set(Some(chapter));
                    load_failed.set(false);
                }
                Err(err) => {
                    tracing::error!(chapter = %chapter_id, error = %err, "Failed to load chapter");
                    load_failed.set(true);
                }
            }
        });
    });

    let services = api.services(move || version.update(|v| *v += 1));
    let completion = Signal::derive(move || latest.with(|c| c.as_ref().map(ChapterSnapshot::completion)));

    view! {
        <div class="chapter-setup">
            <a href=back class="back-link">"Back to course setup"</a>
            <div class="page-header">
                <h1>"Chapter creation"</h1>
                <CompletionBadge completion=completion />
            </div>
            <Show when=move || load_failed.get()>
                <p class="load-error">"Could not load this chapter."</p>
            </Show>
            {move || initial.get().map(|chapter| chapter_fields(&chapter, &services))}
        </div>
    }
}

fn chapter_fields(chapter: &ChapterSnapshot, services: &Services) -> impl IntoView + use<> {
    let path = ResourcePath::chapter(chapter.course_id.clone(), chapter.id.clone());
    let title = FieldController::<Title>::new(path.clone(), Some(chapter.title.clone()), services.clone());
    let description =
        FieldController::<Description>::new(path.clone(), chapter.description.clone(), services.clone());
    let access = FieldController::<Access>::new(path, Some(chapter.is_free), services.clone());

    view! {
        <div class="fields">
            {field_card(Arc::new(title))}
            {field_card(Arc::new(description))}
            {field_card(Arc::new(access))}
        </div>
    }
}
