//! Login and logout commands.

use anyhow::{Context as _, Result};
use mobistore_auth::SessionStore;
use mobistore_commerce::navigation::NavigationDirective;
use mobistore_router::{HistoryNavigator, Navigator, Resolution, Route};
use serde_json::json;
use tracing::{info, warn};

use super::LoginArgs;
use crate::context::Context;

/// Log in and optionally continue at the return URL.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let store = ctx.session_store();
    let mut session = ctx.load_session()?;

    let user = session.login(&args.user)?.user.clone();
    store
        .save(&session)
        .with_context(|| format!("Failed to save session to {}", store.path().display()))?;

    // Go through the login route so unsafe return URLs are dropped.
    let continue_at = match args.return_url {
        Some(return_url) => {
            let login_url = NavigationDirective::login_redirect(return_url).to_url();
            match ctx.route_table().resolve(&login_url, &session)? {
                Resolution::Render {
                    route: Route::Login { return_url },
                } => return_url,
                _ => None,
            }
        }
        None => None,
    };

    info!(user = %user, continue_at = ?continue_at, "logged in");

    let mut navigator = HistoryNavigator::new();
    if let Some(url) = &continue_at {
        navigator.navigate(&NavigationDirective::to(url.clone()));
    }

    if ctx.output.is_json() {
        ctx.output
            .json(&json!({ "user": user, "continue_at": navigator.current() }));
        return Ok(());
    }

    ctx.output.success(&format!("Logged in as {}", user));
    if let Some(url) = navigator.current() {
        ctx.output.kv("Continue at", url);
    }
    Ok(())
}

/// Log out and remove the session file.
pub async fn logout(ctx: &Context) -> Result<()> {
    let store = ctx.session_store();
    let was_logged_in = clear_session(&store)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "logged_out": was_logged_in }));
        return Ok(());
    }
    match was_logged_in {
        Some(true) => ctx.output.success("Logged out"),
        Some(false) => ctx.output.info("Not logged in"),
        None => ctx.output.warn("Session file was unreadable and has been removed"),
    }
    Ok(())
}

/// Drop the stored session, even when the file cannot be read.
///
/// Returns whether someone was logged in, `None` if the file was unreadable.
fn clear_session(store: &SessionStore) -> Result<Option<bool>> {
    let was_logged_in = match store.load() {
        Ok(mut session) => Some(session.logout()),
        Err(e) => {
            warn!(path = %store.path().display(), error = %e, "discarding unreadable session");
            None
        }
    };

    store
        .clear()
        .with_context(|| format!("Failed to remove {}", store.path().display()))?;
    Ok(was_logged_in)
}
