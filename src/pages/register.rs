//! Public registration page.

use leptos::prelude::*;

/// Accounts are provisioned by the backend; this page points back to login.
#[component]
pub fn RegisterPage() -> impl IntoView {
    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Register"</h1>
                <p>"Ask an administrator for an account, then sign in."</p>
                <a href="/login" class="login-button">
                    "Back to sign in"
                </a>
            </div>
        </div>
    }
}
