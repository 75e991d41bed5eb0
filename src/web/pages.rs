/*
 * Responsibility
 * - server-rendered pages (/, /auth, /welcome, /dashboard, /settings)
 * - 各ページは RenderGate / AuthedLayout を通してから描画する
 * - sign-in / sign-up / verification の実処理は identity provider 側 (form の送信先のみ)
 */
use axum::extract::State;
use axum::response::Html;

use crate::state::AppState;
use crate::web::html::{document, escape};
use crate::web::layout::{AuthedLayout, RenderGate};

pub async fn home() -> Html<String> {
    document(
        "Build Your Dream SaaS",
        "<main class=\"hero\">\
         <h1>Build Your Dream SaaS</h1>\
         <p>The most straight-forward template to use for innovative ideas.</p>\
         <a class=\"cta\" href=\"/auth\">Get Started</a>\
         </main>",
    )
}

/// Sign-in / sign-up entry. Only reachable without a session.
pub async fn auth(State(state): State<AppState>, _gate: RenderGate) -> Html<String> {
    let base = escape(&state.auth_base_url);

    let body = format!(
        "<main class=\"auth\">\
         <h1>Welcome</h1>\
         <form method=\"post\" action=\"{base}/api/auth/sign-in/email\">\
         <input type=\"email\" name=\"email\" required>\
         <input type=\"password\" name=\"password\" minlength=\"8\" required>\
         <input type=\"hidden\" name=\"callbackURL\" value=\"/dashboard\">\
         <button type=\"submit\">Sign in</button>\
         </form>\
         <form method=\"post\" action=\"{base}/api/auth/sign-up/email\">\
         <input type=\"text\" name=\"name\" minlength=\"2\" required>\
         <input type=\"email\" name=\"email\" required>\
         <input type=\"password\" name=\"password\" minlength=\"8\" required>\
         <input type=\"hidden\" name=\"callbackURL\" value=\"/welcome\">\
         <button type=\"submit\">Create account</button>\
         </form>\
         <div class=\"providers\">\
         <a href=\"{base}/api/auth/sign-in/social?provider=google\">Google</a>\
         <a href=\"{base}/api/auth/sign-in/social?provider=github\">Github</a>\
         </div>\
         </main>"
    );

    document("Sign in", &body)
}

/// Post-registration landing. Needs a session but is not limited to new users.
pub async fn welcome(gate: RenderGate) -> Html<String> {
    let name = gate
        .session
        .as_ref()
        .and_then(|s| s.user.display_name())
        .unwrap_or("there");

    let body = format!(
        "<main class=\"welcome\">\
         <h1>Welcome to YourApp, {}</h1>\
         <p>A simple platform to manage your workflow and boost productivity.</p>\
         <a class=\"cta\" href=\"/dashboard\">Get Started</a>\
         </main>",
        escape(name)
    );

    document("Welcome", &body)
}

pub async fn dashboard(State(state): State<AppState>, layout: AuthedLayout) -> Html<String> {
    let user = layout.user();
    let greeting = escape(user.display_name().unwrap_or("there"));

    let alert = if user.email_verified {
        String::new()
    } else {
        verification_alert(&state.auth_base_url, &user.email)
    };

    let main = format!(
        "<h1>Hello, {greeting}!</h1>\
         <p>Welcome to your dashboard</p>\
         {alert}\
         <h2>Overview:</h2>\
         <section class=\"cards\">\
         <div class=\"card\"><h3>Projects</h3><p>12</p></div>\
         <div class=\"card\"><h3>Tasks</h3><p>48</p></div>\
         <div class=\"card\"><h3>Team</h3><p>8</p></div>\
         </section>"
    );

    layout.render("Dashboard", &main)
}

pub async fn settings(layout: AuthedLayout) -> Html<String> {
    let user = layout.user();

    let image = user
        .image
        .as_deref()
        .filter(|s| !s.is_empty())
        .map(|src| format!("<img src=\"{}\" alt=\"avatar\">", escape(src)))
        .unwrap_or_default();

    let main = format!(
        "<h1>Settings</h1>\
         <p>Manage your account settings and preferences</p>\
         <section class=\"profile\">\
         {image}\
         <dl>\
         <dt>Name</dt><dd>{}</dd>\
         <dt>Email</dt><dd>{}</dd>\
         <dt>Email verified</dt><dd>{}</dd>\
         </dl>\
         </section>",
        escape(&user.name),
        escape(&user.email),
        if user.email_verified { "yes" } else { "no" },
    );

    layout.render("Settings", &main)
}

fn verification_alert(auth_base_url: &str, email: &str) -> String {
    format!(
        "<div class=\"alert\" role=\"alert\">\
         <strong>Wait a second!</strong>\
         <p>It looks like your email address has not been verified yet.</p>\
         <form method=\"post\" action=\"{}/api/auth/send-verification-email\">\
         <input type=\"hidden\" name=\"email\" value=\"{}\">\
         <button type=\"submit\">Send verification request.</button>\
         </form>\
         </div>",
        escape(auth_base_url),
        escape(email),
    )
}
