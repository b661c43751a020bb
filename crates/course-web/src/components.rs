//! UI Components

use std::sync::Arc;

use course_core::{
    CourseId, Enrollment, FieldController, FieldKind, FieldState, NotificationKind,
    validation::{Access, Description, Price, Title},
};
use leptos::prelude::*;
use rust_decimal::Decimal;
use tokio::sync::watch;

use crate::api::{Api, WindowNavigator};

/// Follow a watch channel from a reactive signal
pub fn mirror<T>(mut changes: watch::Receiver<T>) -> ReadSignal<T>
where
    T: Clone + Send + Sync + 'static,
{
    let (value, set_value) = signal(changes.borrow_and_update().clone());
    leptos::task::spawn_local(async move {
        while changes.changed().await.is_ok() {
            let next = changes.borrow_and_update().clone();
            // signal disposed with its page
            if set_value.try_set(next).is_some() {
                break;
            }
        }
    });
    value
}

/// Form control for one field kind
pub trait FieldWidget: FieldKind {
    fn widget(draft: Signal<Self::Input>, disabled: Signal<bool>, on_input: Callback<Self::Input>) -> AnyView;
}

impl FieldWidget for Title {
    fn widget(draft: Signal<String>, disabled: Signal<bool>, on_input: Callback<String>) -> AnyView {
        view! {
            <input
                type="text"
                placeholder="e.g. 'Introduction to the course'"
                prop:value=move || draft.get()
                disabled=move || disabled.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        }
        .into_any()
    }
}

impl FieldWidget for Description {
    fn widget(draft: Signal<String>, disabled: Signal<bool>, on_input: Callback<String>) -> AnyView {
        view! {
            <textarea
                placeholder="e.g. 'This course is about...'"
                prop:value=move || draft.get()
                disabled=move || disabled.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        }
        .into_any()
    }
}

impl FieldWidget for Price {
    fn widget(draft: Signal<String>, disabled: Signal<bool>, on_input: Callback<String>) -> AnyView {
        view! {
            <input
                type="number"
                step="0.05"
                min="0"
                placeholder="Set a price for your course"
                prop:value=move || draft.get()
                disabled=move || disabled.get()
                on:input=move |ev| on_input.run(event_target_value(&ev))
            />
        }
        .into_any()
    }
}

impl FieldWidget for Access {
    fn widget(draft: Signal<bool>, disabled: Signal<bool>, on_input: Callback<bool>) -> AnyView {
        view! {
            <label class="checkbox-row">
                <input
                    type="checkbox"
                    prop:checked=move || draft.get()
                    disabled=move || disabled.get()
                    on:change=move |ev| on_input.run(event_target_checked(&ev))
                />
                <span class="hint">
                    "Check this box if you want to make this chapter free for preview"
                </span>
            </label>
        }
        .into_any()
    }
}

/// Display/edit card driven by a [`FieldController`]
pub fn field_card<K: FieldWidget>(controller: Arc<FieldController<K>>) -> impl IntoView {
    let state = mirror(controller.subscribe());
    let editing = Memo::new(move |_| state.with(FieldState::is_editing));
    let heading = controller.heading();
    let edit_label = controller.edit_label();

    let draft = Signal::derive(move || state.with(|s| s.draft.clone()));
    let submitting = Signal::derive(move || state.with(|s| s.submitting));
    let on_input = {
        let controller = controller.clone();
        Callback::new(move |input: K::Input| {
            controller.set_draft(input);
        })
    };

    let toggle = {
        let controller = controller.clone();
        move |_| {
            controller.toggle();
        }
    };
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let controller = controller.clone();
        leptos::task::spawn_local(async move {
            controller.submit().await;
        });
    };

    view! {
        <div class="field-card">
            <div class="field-card-header">
                {heading}
                <button class="btn btn-ghost" on:click=toggle>
                    {move || if editing.get() { "Cancel".to_string() } else { edit_label.clone() }}
                </button>
            </div>
            {move || {
                if editing.get() {
                    view! {
                        <form class="field-form" on:submit=on_submit.clone()>
                            {K::widget(draft, submitting, on_input)}
                            <p class="field-error">{move || state.with(|s| s.errors.join(", "))}</p>
                            <button
                                type="submit"
                                class="btn btn-primary"
                                disabled=move || !state.with(FieldState::can_submit)
                            >
                                "Save"
                            </button>
                        </form>
                    }
                    .into_any()
                } else {
                    view! {
                        <p class=move || {
                            if state.with(|s| s.display().placeholder) {
                                "field-value placeholder"
                            } else {
                                "field-value"
                            }
                        }>{move || state.with(|s| s.display().text)}</p>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

/// Checkout button for a locked chapter
#[component]
pub fn EnrollButton(course_id: CourseId, price: Decimal) -> impl IntoView {
    let api = expect_context::<Api>();
    let enrollment = Arc::new(Enrollment::new(
        course_id,
        price,
        api.gateway.clone(),
        api.notifier(),
        Arc::new(WindowNavigator),
    ));
    let loading = mirror(enrollment.subscribe());
    let label = enrollment.label();

    let enroll = move |_| {
        let enrollment = enrollment.clone();
        leptos::task::spawn_local(async move {
            enrollment.enroll().await;
        });
    };

    view! {
        <button class="btn btn-sm btn-primary" on:click=enroll disabled=move || loading.get()>
            {label}
        </button>
    }
}

/// "Complete all fields (2/3)"
#[component]
pub fn CompletionBadge(#[prop(into)] completion: Signal<Option<(usize, usize)>>) -> impl IntoView {
    view! {
        <span class="completion">
            {move || completion.get().map(|(filled, total)| format!("Complete all fields ({filled}/{total})"))}
        </span>
    }
}

/// Shows the front of the toast queue, one at a time
#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<Api>().toasts;

    Effect::new(move |_| {
        if let Some(toast) = toasts.with(|queue| queue.visible().cloned()) {
            let id = toast.id;
            let duration = toast.kind.duration().to_std().unwrap_or_default();
            set_timeout(
                move || {
                    toasts.update(|queue| {
                        if queue.visible().is_some_and(|front| front.id == id) {
                            queue.dismiss();
                        }
                    });
                },
                duration,
            );
        }
    });

    view! {
        <div class="toaster">
            {move || {
                toasts
                    .with(|queue| queue.visible().cloned())
                    .map(|toast| {
                        let class = match toast.kind {
                            NotificationKind::Success => "toast toast-success",
                            NotificationKind::Error => "toast toast-error",
                        };
                        view! { <div class=class>{toast.message}</div> }
                    })
            }}
        </div>
    }
}

/// Celebration overlay, closed on click
#[component]
pub fn ConfettiOverlay() -> impl IntoView {
    let store = expect_context::<Api>().confetti;
    let open = mirror(store.subscribe());

    view! {
        {move || {
            open.get()
                .then(|| {
                    let store = store.clone();
                    view! {
                        <div class="confetti" on:click=move |_| store.close()>
                            <span>"🎉"</span>
                        </div>
                    }
                })
        }}
    }
}
