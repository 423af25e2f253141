use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};

use crate::{types::AuthCallback, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<AuthCallback>>,
) -> Html<&'static str> {
    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    if params.get("state") != Some(&shared_state.expected_state) {
        warning!("Rejecting callback with unexpected state parameter");
        return Html("<h4>State mismatch.</h4>");
    }

    // The sender resolves exactly once; later hits find it already gone.
    let Some(code_tx) = shared_state.code_tx.lock().await.take() else {
        return Html("<h4>Authorization code already received.</h4>");
    };

    if code_tx.send(code.clone()).is_err() {
        warning!("Received an authorization code but the login flow is no longer waiting");
        return Html("<h4>Login flow is no longer running.</h4>");
    }

    Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
}
