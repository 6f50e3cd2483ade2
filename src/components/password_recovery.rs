//! Forgot / Reset Password Pages

use leptos::prelude::*;
use leptos::task::spawn_local;
use tracing::error;

use crate::api;
use crate::components::{ErrorBanner, FieldMessage, Touched};
use crate::forms::{can_submit, ForgotPasswordForm, ResetPasswordForm};
use crate::router::{use_navigator, Route};
use crate::session::use_session;

#[component]
pub fn ForgotPasswordPage() -> impl IntoView {
    let api = use_session().api();
    let form = RwSignal::new(ForgotPasswordForm::default());
    let touched = Touched::new();
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (sent, set_sent) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        if !can_submit(current.is_valid(), submitting.get_untracked()) {
            return;
        }
        set_submitting.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::forgot_password(&api, current.email.trim()).await {
                Ok(()) => {
                    set_sent.try_set(true);
                }
                Err(e) => {
                    error!("password reset request failed: {}", e);
                    set_error.try_set(Some(e.user_message_or("Could not send the reset link")));
                }
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <div class="auth-header">
                    <h1>"Forgot password"</h1>
                    <p>"Enter your email and we'll send you a reset link"</p>
                </div>

                <Show
                    when=move || sent.get()
                    fallback=move || view! {
                        <ErrorBanner message=error />
                        <form class="auth-form" on:submit=on_submit>
                            <div class="form-group">
                                <label for="email" class="form-label">"Email"</label>
                                <input
                                    id="email"
                                    type="email"
                                    class="form-control"
                                    prop:value=move || form.with(|f| f.email.clone())
                                    on:input=move |ev| {
                                        form.update(|f| f.email = event_target_value(&ev));
                                        touched.mark("email");
                                    }
                                    on:blur=move |_| touched.mark("email")
                                />
                                <FieldMessage touched=touched field="email" label="Email" error=move || form.with(|f| f.email_error()) />
                            </div>
                            <button
                                type="submit"
                                class="btn btn-primary btn-block"
                                disabled=move || !can_submit(form.with(|f| f.is_valid()), submitting.get())
                            >
                                {move || if submitting.get() { "Sending..." } else { "Send reset link" }}
                            </button>
                        </form>
                    }
                >
                    <div class="alert alert-success">
                        <span class="material-icons">"mark_email_read"</span>
                        <span>"If an account exists for that address, a reset link is on its way."</span>
                    </div>
                </Show>

                <div class="auth-footer">
                    <p>"Remember your password? " <a href=Route::Login { return_url: None }.href()>"Log in"</a></p>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn ResetPasswordPage(token: Option<String>) -> impl IntoView {
    let api = use_session().api();
    let nav = use_navigator();
    let form = RwSignal::new(ResetPasswordForm::default());
    let touched = Touched::new();
    let (submitting, set_submitting) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let has_token = token.is_some();
    let token = StoredValue::new(token.unwrap_or_default());

    let valid = move || has_token && form.with(ResetPasswordForm::is_valid);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let current = form.get_untracked();
        if !can_submit(has_token && current.is_valid(), submitting.get_untracked()) {
            return;
        }
        set_submitting.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::reset_password(&api, &token.get_value(), &current.password).await {
                Ok(()) => nav.navigate(Route::Login { return_url: None }),
                Err(e) => {
                    error!("password reset failed: {}", e);
                    set_error.try_set(Some(e.user_message_or("Could not reset the password")));
                }
            }
            set_submitting.try_set(false);
        });
    };

    view! {
        <div class="auth-page">
            <div class="auth-card">
                <div class="auth-header">
                    <h1>"Reset password"</h1>
                    <p>"Choose a new password for your account"</p>
                </div>

                <Show when=move || !has_token>
                    <div class="alert alert-error">"This reset link is missing its token. Request a new one."</div>
                </Show>
                <ErrorBanner message=error />

                <form class="auth-form" on:submit=on_submit>
                    <div class="form-group">
                        <label for="password" class="form-label">"New Password"</label>
                        <input
                            id="password"
                            type="password"
                            class="form-control"
                            prop:value=move || form.with(|f| f.password.clone())
                            on:input=move |ev| {
                                form.update(|f| f.password = event_target_value(&ev));
                                touched.mark("password");
                            }
                            on:blur=move |_| touched.mark("password")
                        />
                        <FieldMessage touched=touched field="password" label="Password" error=move || form.with(|f| f.password_error()) />
                    </div>
                    <div class="form-group">
                        <label for="confirmPassword" class="form-label">"Confirm Password"</label>
                        <input
                            id="confirmPassword"
                            type="password"
                            class="form-control"
                            prop:value=move || form.with(|f| f.confirm_password.clone())
                            on:input=move |ev| {
                                form.update(|f| f.confirm_password = event_target_value(&ev));
                                touched.mark("confirmPassword");
                            }
                            on:blur=move |_| touched.mark("confirmPassword")
                        />
                        <FieldMessage touched=touched field="confirmPassword" label="Password confirmation" error=move || form.with(|f| f.confirm_error()) />
                    </div>
                    <button
                        type="submit"
                        class="btn btn-primary btn-block"
                        disabled=move || !can_submit(valid(), submitting.get())
                    >
                        {move || if submitting.get() { "Resetting..." } else { "Reset password" }}
                    </button>
                </form>

                <div class="auth-footer">
                    <p><a href=Route::ForgotPassword.href()>"Request a new link"</a></p>
                </div>
            </div>
        </div>
    }
}
