//! Profile Page
//!
//! Loads the signed-in user fresh from the server and saves edits back.

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::info;

use crate::api;
use crate::components::{ErrorBanner, FieldMessage, Loading, Touched};
use crate::format::initials;
use crate::forms::{can_submit, ProfileForm};
use crate::models::User;
use crate::session::use_session;

/// Text input bound to one `ProfileForm` field
fn profile_input(
    form: RwSignal<ProfileForm>,
    touched: Touched,
    field: &'static str,
    input_type: &'static str,
    get: fn(&ProfileForm) -> &String,
    set: fn(&mut ProfileForm, String),
) -> impl IntoView {
    view! {
        <input
            id=field
            type=input_type
            class="form-input"
            prop:value=move || form.with(|f| get(f).clone())
            on:input=move |ev| {
                let value = event_target_value(&ev);
                form.update(|f| set(f, value));
                touched.mark(field);
            }
            on:blur=move |_| touched.mark(field)
        />
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let session = use_session();
    let api = session.api();

    let form = RwSignal::new(ProfileForm::default());
    let touched = Touched::new();
    let (user, set_user) = signal(None::<User>);
    let (loading, set_loading) = signal(true);
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (saved, set_saved) = signal(false);

    spawn_local(async move {
        match api::current_user(&api).await {
            Ok(me) => {
                form.try_set(ProfileForm::from_user(&me));
                set_user.try_set(Some(me));
            }
            Err(e) => {
                set_error.try_set(Some(session.handle_error("failed to load profile", &e)));
            }
        }
        set_loading.try_set(false);
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        if !can_submit(current.is_valid(), saving.get_untracked()) {
            return;
        }
        set_saving.set(true);
        set_saved.set(false);
        set_error.set(None);
        spawn_local(async move {
            match api::update_profile(&api, &current.to_update()).await {
                Ok(updated) => {
                    info!(user_id = %updated.id, "profile updated");
                    form.try_set(ProfileForm::from_user(&updated));
                    set_user.try_set(Some(updated.clone()));
                    session.refresh_user(updated);
                    touched.reset();
                    set_saved.try_set(true);
                }
                Err(e) => {
                    set_error.try_set(Some(session.handle_error("failed to update profile", &e)));
                }
            }
            set_saving.try_set(false);
        });
    };

    let on_reset = move |_| {
        if let Some(me) = user.get_untracked() {
            form.set(ProfileForm::from_user(&me));
            touched.reset();
            set_saved.set(false);
        }
    };

    let dirty = move || {
        user.with(|u| u.as_ref().is_some_and(|me| form.with(|f| *f != ProfileForm::from_user(me))))
    };

    view! {
        <div class="profile-page">
            <div class="page-header">
                <h1 class="page-title">"My Profile"</h1>
                <p class="page-subtitle">"Update your personal information"</p>
            </div>

            <ErrorBanner message=error />
            <Show when=move || saved.get()>
                <div class="alert alert-success">
                    <span class="material-icons">"check_circle"</span>
                    <span>"Profile updated"</span>
                </div>
            </Show>

            <Show when=move || !loading.get() fallback=|| view! { <Loading text="Loading profile..." /> }>
                {move || user.get().map(|me| view! {
                    <div class="profile-summary">
                        <div class="profile-avatar">{initials(&me.first_name, &me.last_name)}</div>
                        <div class="profile-identity">
                            <h2>{me.full_name()}</h2>
                            <p>{me.email.clone()}</p>
                            <span class="role-badge">{if me.is_admin() { "Administrator" } else { "Member" }}</span>                        </div>
                    </div>
                })}

                <form class="profile-form" on:submit=on_submit>
                    <div class="form-row">
                        <div class="form-group">
                            <label for="firstName" class="form-label">"First Name"</label>
                            {profile_input(form, touched, "firstName", "text", |f| &f.first_name, |f, v| f.first_name = v)}
                            <FieldMessage touched=touched field="firstName" label="First name" error=move || form.with(|f| f.first_name_error()) />
                        </div>
                        <div class="form-group">
                            <label for="lastName" class="form-label">"Last Name"</label>
                            {profile_input(form, touched, "lastName", "text", |f| &f.last_name, |f, v| f.last_name = v)}
                            <FieldMessage touched=touched field="lastName" label="Last name" error=move || form.with(|f| f.last_name_error()) />
                        </div>
                    </div>
                    <div class="form-group">
                        <label for="username" class="form-label">"Username"</label>
                        {profile_input(form, touched, "username", "text", |f| &f.username, |f, v| f.username = v)}
                        <FieldMessage touched=touched field="username" label="Username" error=move || form.with(|f| f.username_error()) />
                    </div>
                    <div class="form-group">
                        <label for="email" class="form-label">"Email"</label>
                        {profile_input(form, touched, "email", "email", |f| &f.email, |f, v| f.email = v)}
                        <FieldMessage touched=touched field="email" label="Email" error=move || form.with(|f| f.email_error()) />
                    </div>
                    <div class="form-actions">
                        <button type="button" class="btn btn-outline" disabled=move || !dirty() on:click=on_reset>
                            "Discard changes"
                        </button>
                        <button
                            type="submit"
                            class="btn btn-primary"
                            disabled=move || !can_submit(form.with(ProfileForm::is_valid), saving.get())
                        >
                            {move || if saving.get() { "Saving..." } else { "Save Profile" }}
                        </button>
                    </div>
                </form>
            </Show>
        </div>
    }
}
