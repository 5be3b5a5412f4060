//! Auth shell commands
//!
//! Login always succeeds; there is no credential check on the device.

use super::Route;
use crate::app::AppState;
use crate::config::{GUEST_DISPLAY_NAME, GUEST_ROLE};
use crate::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub welcome: &'static str,
    pub name: String,
    pub role: String,
    pub signed_in: bool,
    pub header: Vec<Route>,
    pub bottom_nav: Vec<Route>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub title: &'static str,
    pub subtitle: String,
    pub actions: Vec<Route>,
}

/// Submit the login form
pub fn login(email: &str, _password: &str) -> Route {
    tracing::info!("Login submitted for: {}", email);
    Route::Home
}

/// Clear the local session and return to the login screen
pub async fn logout(state: &AppState) -> Result<Route> {
    state.session().sign_out_local().await?;
    Ok(Route::Login)
}

/// Name and role of the signed-in user, or the guest placeholder
async fn greeting(state: &AppState) -> Result<(String, String, bool)> {
    Ok(match state.session().current_user().await? {
        Some(user) => (user.display_name(), user.role, true),
        None => (GUEST_DISPLAY_NAME.to_string(), GUEST_ROLE.to_string(), false),
    })
}

pub async fn home(state: &AppState) -> Result<HomeView> {
    let (name, role, signed_in) = greeting(state).await?;

    Ok(HomeView {
        welcome: "WELCOME!",
        name,
        role,
        signed_in,
        header: Route::header_links(),
        bottom_nav: Route::bottom_nav(),
    })
}

pub async fn form(state: &AppState) -> Result<FormView> {
    let (name, role, _) = greeting(state).await?;

    Ok(FormView {
        title: "Welcome to Form",
        subtitle: format!("{} - {}", name, role),
        actions: vec![Route::FormStartSubmission, Route::ViewPreviousEntries],
    })
}
