// feedback-backend/src/api/handlers/page_handler.rs
use crate::api::dto::feedback_dto::{AuditSummaryDto, FeedbackDto};
use crate::api::AppState;
use crate::domain::feedback_form::FeedbackField;
use crate::error::AppResult;
use crate::utils::html::escape;
use crate::utils::validation::{MAX_TEXT_LENGTH, RATING_MAX, RATING_MIN};
use axum::{extract::State, response::Html, routing::get, Router};
use std::fmt::Write;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body,
    )
}

fn rating_fieldset(field: FeedbackField) -> String {
    let mut options = String::new();
    for value in RATING_MIN..=RATING_MAX {
        let _ = write!(
            options,
            r#"<label><input type="radio" name="{name}" value="{value}" required> {value}</label>"#,
            name = field.as_str(),
            value = value,
        );
    }
    format!(
        "<fieldset><legend>{}</legend>{}</fieldset>\n",
        field.section_name(),
        options
    )
}

fn feedback_form_page() -> String {
    let ratings: String = FeedbackField::RATINGS
        .iter()
        .map(|field| rating_fieldset(*field))
        .collect();

    let body = format!(
        r#"<h1>Workshop Feedback</h1>
<form id="feedbackForm" method="post" action="/submit-feedback">
{ratings}<label for="most_valuable">What was most valuable?</label>
<textarea id="most_valuable" name="most_valuable" maxlength="{max}" required></textarea>
<label for="improvements">What could be improved?</label>
<textarea id="improvements" name="improvements" maxlength="{max}" required></textarea>
<fieldset><legend>Would you recommend this to others?</legend>
<label><input type="radio" name="recommend" value="Yes" required> Yes</label>
<label><input type="radio" name="recommend" value="No"> No</label>
</fieldset>
<button type="submit">Submit Feedback</button>
</form>"#,
        ratings = ratings,
        max = MAX_TEXT_LENGTH,
    );

    layout("Workshop Feedback", &body)
}

fn success_page() -> String {
    layout(
        "Thank You",
        r#"<h1>Thank you!</h1>
<p>Your feedback has been submitted successfully.</p>
<p><a href="/">Submit another response</a></p>"#,
    )
}

fn admin_page(records: &[FeedbackDto], summary: &AuditSummaryDto) -> String {
    let mut rows = String::new();
    for record in records {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td><td>{}</td><td>{}</td></tr>\n",
            record.id,
            record.created_at.format("%Y-%m-%d %H:%M:%S"),
            record.content_quality,
            record.clarity,
            record.engagement,
            record.satisfaction,
            record.apply_likelihood,
            escape(&record.most_valuable),
            escape(&record.improvements),
            escape(&record.recommend),
        );
    }

    let body = format!(
        r#"<h1>Feedback Submissions</h1>
<p>Total: {total} | Email failures: {email_failed} | Database errors: {database_error}</p>
<table>
<thead><tr><th>ID</th><th>Submitted</th><th>Content</th><th>Clarity</th><th>Engagement</th><th>Satisfaction</th><th>Apply</th><th>Most Valuable</th><th>Improvements</th><th>Recommend</th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#,
        total = records.len(),
        email_failed = summary.email_failed,
        database_error = summary.database_error,
        rows = rows,
    );

    layout("Feedback Admin", &body)
}

pub async fn index_handler() -> Html<String> {
    Html(feedback_form_page())
}

pub async fn success_handler() -> Html<String> {
    Html(success_page())
}

/// 全件を新しい順に表示
pub async fn admin_handler(State(app_state): State<AppState>) -> AppResult<Html<String>> {
    let records = app_state.feedback_service.list_all().await?;
    let summary = app_state.feedback_service.audit_summary().await?;
    Ok(Html(admin_page(&records, &summary)))
}

pub fn page_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/success", get(success_handler))
        .route("/admin", get(admin_handler))
        .with_state(app_state)
}
