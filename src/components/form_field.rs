//! Form Field Helpers
//!
//! Errors appear under a field once the user has typed in it or left it.

use leptos::prelude::*;

use crate::forms::FieldError;

/// Names of fields the user has edited or left at least once
#[derive(Clone, Copy)]
pub struct Touched(RwSignal<Vec<&'static str>>);

impl Touched {
    pub fn new() -> Self {
        Self(RwSignal::new(Vec::new()))
    }

    pub fn mark(&self, field: &'static str) {
        if !self.0.with_untracked(|fields| fields.contains(&field)) {
            self.0.update(|fields| fields.push(field));
        }
    }

    pub fn has(&self, field: &'static str) -> bool {
        self.0.with(|fields| fields.contains(&field))
    }

    pub fn reset(&self) {
        self.0.set(Vec::new());
    }
}

/// Error line for `field`, shown only once the field is touched
#[component]
pub fn FieldMessage<F>(
    touched: Touched,
    field: &'static str,
    label: &'static str,
    error: F,
) -> impl IntoView
where
    F: Fn() -> Option<FieldError> + Send + Sync + 'static,
{
    move || {
        if !touched.has(field) {
            return None;
        }
        error().map(|e| view! { <div class="field-error">{e.message(label)}</div> })
    }
}

/// Banner for a failed submit or load
#[component]
pub fn ErrorBanner(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message.get().map(|text| {
            view! {
                <div class="alert alert-error">
                    <span class="material-icons">"error_outline"</span>
                    <span>{text}</span>
                </div>
            }
        })
    }
}

#[component]
pub fn Loading(#[prop(into, optional)] text: Option<String>) -> impl IntoView {
    let text = text.unwrap_or_else(|| "Loading...".to_string());
    view! {
        <div class="loading-state">
            <div class="spinner"></div>
            <p>{text}</p>
        </div>
    }
}
