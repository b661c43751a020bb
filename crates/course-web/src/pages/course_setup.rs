//! Course Setup Page
//!
//! Teacher view of one course. Field cards are built once from the first
//! snapshot; later refreshes only feed the completion indicator.

use std::sync::Arc;

use course_core::{
    CourseId, CourseSnapshot, FieldController, ResourcePath, Services,
    validation::{Description, Price, Title},
};
use leptos::prelude::*;

use super::route_param;
use crate::api::Api;
use crate::components::{CompletionBadge, field_card};

#[component]
pub fn CourseSetupPage() -> impl IntoView {
    let api = expect_context::<Api>();
    let course_id = CourseId::new(route_param("course_id"));

    let version = RwSignal::new(0_u64);
    let initial = RwSignal::new(None::<CourseSnapshot>);
    let latest = RwSignal::new(None::<CourseSnapshot>);
    let load_failed = RwSignal::new(false);

    let gateway = api.gateway.clone();
    Effect::new(move |_| {
        version.track();
        let gateway = gateway.clone();
        let course_id = course_id.clone();
        leptos::task::spawn_local(async move {
            match gateway.course(&course_id).await {
                Ok(course) => {
                    if initial.with_untracked(Option::is_none) {
                        initial.set(Some(course.clone()));
                    }
                    latest.set(Some(course));
                }
                Err(err) => {
                    tracing::error!(course = %course_id, error = %err, "Failed to load course");
                    load_failed.set(true);
                }
            }
        });
    });

    // celebrate the moment the last required field gets filled in
    let confetti = api.confetti.clone();
    Effect::new(move |was_complete: Option<Option<bool>>| {
        let complete = latest.with(|course| {
            course.as_ref().map(|c| {
                let (filled, total) = c.completion();
                filled == total
            })
        });
        if let (Some(Some(false)), Some(true)) = (was_complete, complete) {
            confetti.open();
        }
        complete
    });

    let services = api.services(move || version.update(|v| *v += 1));
    let completion = Signal::derive(move || latest.with(|c| c.as_ref().map(CourseSnapshot::completion)));

    view! {
        <div class="course-setup">
            <div class="page-header">
                <h1>"Course setup"</h1>
                <CompletionBadge completion=completion />
            </div>
            <Show when=move || load_failed.get()>
                <p class="load-error">"Could not load this course."</p>
            </Show>
            {move || initial.get().map(|course| course_fields(&course, &services))}
        </div>
    }
}

fn course_fields(course: &CourseSnapshot, services: &Services) -> impl IntoView + use<> {
    let path = ResourcePath::course(course.id.clone());
    let title = FieldController::<Title>::new(path.clone(), Some(course.title.clone()), services.clone());
    let description =
        FieldController::<Description>::new(path.clone(), course.description.clone(), services.clone());
    let price = FieldController::<Price>::new(path, course.price, services.clone());

    view! {
        <div class="fields">
            {field_card(Arc::new(title))}
            {field_card(Arc::new(description))}
            {field_card(Arc::new(price))}
        </div>
    }
}
