//! Login gate: shared-secret check and session cookie
//!
//! The gate only guards the rendered pages; it is deliberately thin. When
//! no password is configured, /login just redirects to the dashboard.

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::{base_html, AppState};
use patoweb_core::{Session, SESSION_COOKIE};

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub password: String,
}

/// Login form page
pub async fn page_login(State(state): State<AppState>) -> Response {
    if state.config.server.auth.is_none() {
        return Redirect::to("/").into_response();
    }
    Html(base_html("Entrar", &render_login_form(false))).into_response()
}

/// Check the submitted password and issue the session cookie
pub async fn post_login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = match &state.config.server.auth {
        Some(auth) => auth,
        None => return Redirect::to("/").into_response(),
    };

    if !Session::password_matches(&form.password, &auth.password) {
        log::warn!("Rejected login attempt");
        return Html(base_html("Entrar", &render_login_form(true))).into_response();
    }

    let cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE,
        Session::token_for(&auth.password)
    );
    let mut response = Redirect::to("/").into_response();
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}

/// Drop the session cookie
pub async fn post_logout(State(_state): State<AppState>) -> Response {
    let cookie = format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE);
    let mut response = Redirect::to("/login").into_response();
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}

fn render_login_form(failed: bool) -> String {
    let warning = if failed {
        r#"<p class='text-sm text-red-600 mb-3'>Senha incorreta.</p>"#
    } else {
        ""
    };
    format!(
        r#"<div class='min-h-screen flex items-center justify-center'>
    <div class='bg-white rounded-xl shadow-sm p-8 w-full max-w-sm'>
        <h1 class='text-xl font-bold text-emerald-700 mb-1'>&#9917; Painel da Patota</h1>
        <p class='text-sm text-gray-500 mb-4'>Digite a senha do grupo para entrar.</p>
        {}
        <form method='post' action='/login' class='space-y-3'>
            <input type='password' name='password' placeholder='Senha'
                class='w-full px-3 py-2 border rounded-lg' autofocus>
            <button class='w-full px-3 py-2 bg-emerald-600 text-white rounded-lg hover:bg-emerald-700'>Entrar</button>
        </form>
    </div>
</div>"#,
        warning
    )
}
