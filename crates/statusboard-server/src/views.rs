// SPDX-License-Identifier: Apache-2.0

//! Page view models and rendering.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Kiosk board; the page script polls `/status` and `/urgent`.
#[derive(Template)]
#[template(path = "index.html")]
pub(crate) struct IndexView {
    pub stale_after_min: u64,
}

#[derive(Template)]
#[template(path = "login.html")]
pub(crate) struct LoginView {
    pub error: Option<String>,
}

pub(crate) struct StatusOption {
    pub label: String,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "admin.html")]
pub(crate) struct AdminView {
    pub status_options: Vec<StatusOption>,
    pub location: String,
    pub note: String,
    pub stale_after_min: u64,
}

const STATUS_CHOICES: [&str; 5] = [
    "In Office",
    "In a Meeting",
    "On Campus",
    "Away",
    "Do Not Disturb",
];

impl AdminView {
    /// Prefills the form from the current board; a custom status is listed first.
    pub(crate) fn from_board(
        status: &str,
        location: String,
        note: String,
        stale_after_min: u64,
    ) -> Self {
        let mut status_options: Vec<StatusOption> = STATUS_CHOICES
            .iter()
            .map(|choice| StatusOption {
                label: (*choice).to_string(),
                selected: *choice == status,
            })
            .collect();
        if !STATUS_CHOICES.contains(&status) {
            status_options.insert(
                0,
                StatusOption {
                    label: status.to_string(),
                    selected: true,
                },
            );
        }
        Self {
            status_options,
            location,
            note,
            stale_after_min,
        }
    }
}

pub(crate) fn render_template<T: Template>(template: T) -> Response {
    render_template_with_status(StatusCode::OK, template)
}

pub(crate) fn render_template_with_status<T: Template>(
    status: StatusCode,
    template: T,
) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("template rendering failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "template rendering error").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_view_escapes_error_text() {
        let html = LoginView {
            error: Some("<b>Wrong PIN</b>".to_string()),
        }
        .render()
        .expect("render login");
        assert!(html.contains("&lt;b&gt;Wrong PIN"));
        assert!(!html.contains("<b>Wrong PIN"));
    }

    #[test]
    fn admin_view_preselects_current_status() {
        let html = AdminView::from_board("Away", "Gym".to_string(), String::new(), 20)
            .render()
            .expect("render admin");
        assert!(html.contains("<option selected>Away</option>"));
        assert!(html.contains("<option>In Office</option>"));
        assert!(html.contains("value=\"Gym\""));
    }

    #[test]
    fn admin_view_keeps_custom_status() {
        let view = AdminView::from_board("Lunch", String::new(), String::new(), 20);
        assert_eq!(view.status_options[0].label, "Lunch");
        assert!(view.status_options[0].selected);
        assert_eq!(view.status_options.iter().filter(|o| o.selected).count(), 1);
    }
}
