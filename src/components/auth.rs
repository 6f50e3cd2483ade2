//! Login and Registration Pages

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::{ErrorBanner, FieldMessage, Touched};
use crate::forms::{can_submit, password_strength, FieldError, LoginForm, RegisterForm, Strength};
use crate::router::Route;
use crate::session::use_session;

#[component]
pub fn LoginPage(return_url: Option<String>) -> impl IntoView {
    let session = use_session();
    let form = RwSignal::new(LoginForm::default());
    let touched = Touched::new();
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (show_password, set_show_password) = signal(false);
    let return_url = StoredValue::new(return_url);

    let valid = move || form.with(LoginForm::is_valid);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        if !can_submit(current.is_valid(), submitting.get_untracked()) {
            return;
        }
        set_submitting.set(true);
        set_error.set(None);
        spawn_local(async move {
            // On success the page is replaced, so these writes may find it gone
            if let Err(message) = session.login(current.credentials(), return_url.get_value()).await {
                set_error.try_set(Some(message));
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <div class="auth-header">
                    <h1>"Welcome back"</h1>
                    <p>"Log in to continue to ProjectFlow"</p>
                </div>

                <ErrorBanner message=error />

                <form class="auth-form" on:submit=on_submit>
                    <div class="form-group">
                        <label for="email" class="form-label">"Email"</label>
                        <input
                            id="email"
                            type="email"
                            class="form-control"
                            autocomplete="email"
                            prop:value=move || form.with(|f| f.email.clone())
                            on:input=move |ev| {
                                form.update(|f| f.email = event_target_value(&ev));
                                touched.mark("email");
                            }
                            on:blur=move |_| touched.mark("email")
                        />
                        <FieldMessage touched=touched field="email" label="Email" error=move || form.with(|f| f.email_error()) />
                    </div>

                    <div class="form-group">
                        <div class="label-row">
                            <label for="password" class="form-label">"Password"</label>
                            <a href=Route::ForgotPassword.href() class="forgot-password">"Forgot Password?"</a>
                        </div>
                        <div class="password-input">
                            <input
                                id="password"
                                class="form-control"
                                autocomplete="current-password"
                                type=move || if show_password.get() { "text" } else { "password" }
                                prop:value=move || form.with(|f| f.password.clone())
                                on:input=move |ev| {
                                    form.update(|f| f.password = event_target_value(&ev));
                                    touched.mark("password");
                                }
                                on:blur=move |_| touched.mark("password")
                            />
                            <button
                                type="button"
                                class="password-toggle"
                                on:click=move |_| set_show_password.update(|v| *v = !*v)
                            >
                                <span class="material-icons">
                                    {move || if show_password.get() { "visibility_off" } else { "visibility" }}
                                </span>
                            </button>
                        </div>
                        <FieldMessage touched=touched field="password" label="Password" error=move || form.with(|f| f.password_error()) />
                    </div>

                    <button
                        type="submit"
                        class="btn btn-primary btn-block"
                        disabled=move || !can_submit(valid(), submitting.get())
                    >
                        {move || if submitting.get() { "Logging in..." } else { "Log in" }}
                    </button>
                </form>

                <div class="auth-footer">
                    <p>"Don't have an account? " <a href=Route::Register.href()>"Sign up"</a></p>
                </div>
            </div>
        </div>
    }
}

/// Text input bound to one `RegisterForm` field
fn register_input(
    form: RwSignal<RegisterForm>,
    touched: Touched,
    field: &'static str,
    input_type: &'static str,
    get: fn(&RegisterForm) -> &String,
    set: fn(&mut RegisterForm, String),
) -> impl IntoView {
    view! {
        <input
            id=field
            type=input_type
            class="form-control"
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
pub fn RegisterPage() -> impl IntoView {
    let session = use_session();
    let form = RwSignal::new(RegisterForm::default());
    let touched = Touched::new();
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (mismatch, set_mismatch) = signal(false);

    let valid = move || form.with(RegisterForm::is_valid);
    let strength = move || form.with(|f| password_strength(&f.password));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        if !can_submit(current.is_valid(), submitting.get_untracked()) {
            return;
        }
        let data = match current.to_request() {
            Ok(data) => data,
            Err(_) => {
                set_mismatch.set(true);
                return;
            }
        };
        set_mismatch.set(false);
        set_submitting.set(true);
        set_error.set(None);
        spawn_local(async move {
            if let Err(message) = session.register(data).await {
                set_error.try_set(Some(message));
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card auth-card-wide">
                <div class="auth-header">
                    <h1>"Create an account"</h1>
                    <p>"Start managing your projects today"</p>
                </div>

                <ErrorBanner message=error />

                <form class="auth-form" on:submit=on_submit>
                    <div class="form-row">
                        <div class="form-group">
                            <label for="firstName" class="form-label">"First Name"</label>
                            {register_input(form, touched, "firstName", "text", |f| &f.first_name, |f, v| f.first_name = v)}
                            <FieldMessage touched=touched field="firstName" label="First name" error=move || form.with(|f| f.first_name_error()) />
                        </div>
                        <div class="form-group">
                            <label for="lastName" class="form-label">"Last Name"</label>
                            {register_input(form, touched, "lastName", "text", |f| &f.last_name, |f, v| f.last_name = v)}
                            <FieldMessage touched=touched field="lastName" label="Last name" error=move || form.with(|f| f.last_name_error()) />
                        </div>
                    </div>

                    <div class="form-group">
                        <label for="username" class="form-label">"Username"</label>
                        {register_input(form, touched, "username", "text", |f| &f.username, |f, v| f.username = v)}
                        <FieldMessage touched=touched field="username" label="Username" error=move || form.with(|f| f.username_error()) />
                    </div>

                    <div class="form-group">
                        <label for="email" class="form-label">"Email"</label>
                        {register_input(form, touched, "email", "email", |f| &f.email, |f, v| f.email = v)}
                        <FieldMessage touched=touched field="email" label="Email" error=move || form.with(|f| f.email_error()) />
                    </div>

                    <div class="form-group">
                        <label for="password" class="form-label">"Password"</label>
                        {register_input(form, touched, "password", "password", |f| &f.password, |f, v| f.password = v)}
                        <FieldMessage touched=touched field="password" label="Password" error=move || form.with(|f| f.password_error()) />
                        <Show when=move || form.with(|f| !f.password.is_empty())>
                            <div class="password-strength">
                                <div class="strength-bar">
                                    <div
                                        class=move || format!("strength-fill {}", Strength::of(strength()).class())
                                        style:width=move || format!("{}%", strength())
                                    ></div>
                                </div>
                                <span class="strength-text">{move || Strength::of(strength()).label()}</span>
                            </div>
                        </Show>
                    </div>

                    <div class="form-group">
                        <label for="confirmPassword" class="form-label">"Confirm Password"</label>
                        {register_input(form, touched, "confirmPassword", "password", |f| &f.confirm_password, |f, v| f.confirm_password = v)}
                        <FieldMessage touched=touched field="confirmPassword" label="Password confirmation" error=move || form.with(|f| f.confirm_error()) />
                        <Show when=move || mismatch.get()>
                            <div class="field-error">{FieldError::Mismatch.message("Password")}</div>
                        </Show>
                    </div>

                    <div class="form-group">
                        <label class="form-checkbox">
                            <input
                                type="checkbox"
                                prop:checked=move || form.with(|f| f.agree_to_terms)
                                on:change=move |ev| {
                                    form.update(|f| f.agree_to_terms = event_target_checked(&ev));
                                    touched.mark("agreeToTerms");
                                }
                            />
                            <span>"I agree to the Terms of Service and Privacy Policy"</span>
                        </label>
                        <FieldMessage touched=touched field="agreeToTerms" label="Terms" error=move || form.with(|f| f.terms_error()) />
                    </div>

                    <button
                        type="submit"
                        class="btn btn-primary btn-block"
                        disabled=move || !can_submit(valid(), submitting.get())
                    >
                        {move || if submitting.get() { "Creating account..." } else { "Create account" }}
                    </button>
                </form>

                <div class="auth-footer">
                    <p>"Already have an account? " <a href=Route::Login { return_url: None }.href()>"Log in"</a></p>
                </div>
            </div>
        </div>
    }
}
