//! Delete Confirm Button Component
//!
//! Inline delete button that asks for confirmation before acting.

use leptos::prelude::*;

/// Inline delete confirmation button
///
/// Shows `label` initially. When clicked, shows "Delete?" with confirm and
/// cancel buttons.
///
/// # Arguments
/// * `label` - Text of the initial button
/// * `button_class` - CSS class for the initial button
/// * `disabled` - Disables the initial button (e.g. while a delete is in flight)
/// * `on_confirm` - Callback to execute when user confirms deletion
#[component]
pub fn DeleteConfirmButton(
    #[prop(into)] label: String,
    #[prop(into)] button_class: String,
    #[prop(into, optional)] disabled: MaybeProp<bool>,
    #[prop(into)] on_confirm: Callback<()>,
) -> impl IntoView {
    let (confirm_delete, set_confirm_delete) = signal(false);

    view! {
        <Show when=move || !confirm_delete.get()>
            <button
                type="button"
                class=button_class.clone()
                disabled=move || disabled.get().unwrap_or(false)
                on:click=move |ev| {
                    ev.stop_propagation();
                    set_confirm_delete.set(true);
                }
            >
                <span class="material-icons">"delete"</span>
                {label.clone()}
            </button>
        </Show>
        <Show when=move || confirm_delete.get()>
            <span class="delete-confirm">
                <span class="delete-confirm-text">"Delete?"</span>
                <button
                    type="button"
                    class="btn btn-danger confirm-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirm_delete.set(false);
                        on_confirm.run(());
                    }
                >
                    "Yes, delete"
                </button>
                <button
                    type="button"
                    class="btn btn-outline cancel-btn"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_confirm_delete.set(false);
                    }
                >
                    "Cancel"
                </button>
            </span>
        </Show>
    }
}
