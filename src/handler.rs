//! Contact-form submission handler
//!
//! A linear decision sequence: CORS preflight, method gate, body checks,
//! field validation, configuration check, then dispatch to the injected
//! mailer. Every request is independent; nothing is persisted.

use crate::config::AppState;
use crate::logger;
use crate::mailer::OutboundEmail;
use crate::response;
use crate::validate;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;

/// One contact-form submission, parsed from the request body.
///
/// Lives only for the duration of the request. `company` and `service`
/// are optional and default to empty.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Submission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub message: String,
}

pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    if state.config.logging.access_log {
        logger::log_request(state.logger.as_ref(), req.method(), req.uri());
    }

    let resp = process(req, &state).await;

    if state.config.logging.access_log {
        logger::log_response(state.logger.as_ref(), resp.status().as_u16());
    }
    Ok(resp)
}

async fn process<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    // Preflight: answer OPTIONS immediately, CORS headers only
    if req.method() == Method::OPTIONS {
        return response::options_response();
    }

    if req.method() != Method::POST {
        state
            .logger
            .warn(&format!("Method not allowed: {}", req.method()));
        return response::error_response(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed");
    }

    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        state.logger.warn("Request body exceeds configured limit");
        return resp;
    }

    let body = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            // Transport failure mid-read, not a client mistake
            state.logger.error(&format!("Failed to read request body: {e}"));
            return server_error_response();
        }
    };

    let submission: Submission = match serde_json::from_slice(&body) {
        Ok(s) => s,
        Err(_) => {
            return response::error_response(StatusCode::BAD_REQUEST, "No data received");
        }
    };

    let missing = validate::missing_required_fields(&submission);
    if !missing.is_empty() {
        return response::error_response(
            StatusCode::BAD_REQUEST,
            &format!("Missing required fields: {}", missing.join(", ")),
        );
    }

    if !validate::is_valid_email(&submission.email) {
        return response::error_response(StatusCode::BAD_REQUEST, "Invalid email format");
    }

    // Missing credentials are an expected deployment state, reported per
    // request rather than crashing at startup
    let Some(mailer) = state.mailer.as_ref() else {
        state
            .logger
            .error("Contact submission received but no email API key is configured");
        return response::error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Email service not configured properly",
        );
    };
    let Some(to_address) = state.config.email.to_address.as_deref() else {
        state
            .logger
            .error("Contact submission received but no recipient address is configured");
        return response::error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Email recipient not configured properly",
        );
    };

    let notification = OutboundEmail {
        from: state.config.email.from_address.clone(),
        to: vec![to_address.to_string()],
        subject: format!("New Business Inquiry from {}", submission.name),
        html: notification_html(&submission),
        reply_to: Some(submission.email.clone()),
    };

    if let Err(e) = mailer.send(&notification).await {
        state.logger.error(&format!("Failed to send notification email: {e}"));
        log_unsent_submission(state, &submission);
        return response::json_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &serde_json::json!({
                "error": "Failed to send email notification",
                "message": "Your message was received but we could not send email confirmation. \
                            We will still follow up manually."
            }),
        );
    }

    if state.config.email.send_confirmation {
        let confirmation = OutboundEmail {
            from: state.config.email.from_address.clone(),
            to: vec![submission.email.clone()],
            subject: "We received your message".to_string(),
            html: confirmation_html(&submission),
            reply_to: None,
        };
        // Acknowledgement failure never fails the request
        if let Err(e) = mailer.send(&confirmation).await {
            state
                .logger
                .warn(&format!("Failed to send confirmation email: {e}"));
        }
    }

    response::json_response(
        StatusCode::OK,
        &serde_json::json!({
            "success": true,
            "message": "Your message has been received! We will get back to you within 24 hours.",
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }),
    )
}

/// Reject oversized bodies from the Content-Length header before reading.
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let declared = req.headers().get(hyper::header::CONTENT_LENGTH)?;
    let size = declared.to_str().ok()?.parse::<u64>().ok()?;
    (size > max_body_size).then(response::too_large_response)
}

fn server_error_response() -> Response<Full<Bytes>> {
    response::json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &serde_json::json!({
            "error": "Server error occurred",
            "message": "Please try again or contact us directly via email"
        }),
    )
}

/// Keep the submission recoverable from the logs when delivery fails.
fn log_unsent_submission(state: &AppState, submission: &Submission) {
    let detail = serde_json::to_string(submission)
        .unwrap_or_else(|_| format!("{submission:?}"));
    state
        .logger
        .error(&format!("Unsent submission for manual follow-up: {detail}"));
}

fn notification_html(submission: &Submission) -> String {
    let or_not_specified = |s: &str| {
        if s.trim().is_empty() {
            "Not specified".to_string()
        } else {
            escape_html(s)
        }
    };

    format!(
        "<h2>New Contact Form Submission</h2>\
         <p><strong>Name:</strong> {name}</p>\
         <p><strong>Email:</strong> {email}</p>\
         <p><strong>Company:</strong> {company}</p>\
         <p><strong>Service:</strong> {service}</p>\
         <p><strong>Message:</strong></p>\
         <p>{message}</p>\
         <hr>\
         <p><small>This message was sent through the contact form.</small></p>",
        name = escape_html(&submission.name),
        email = escape_html(&submission.email),
        company = or_not_specified(&submission.company),
        service = or_not_specified(&submission.service),
        message = escape_html(&submission.message).replace('\n', "<br>"),
    )
}

fn confirmation_html(submission: &Submission) -> String {
    format!(
        "<p>Hi {name},</p>\
         <p>Thanks for reaching out! Your message has been received and we \
         will get back to you within 24 hours.</p>",
        name = escape_html(&submission.name),
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
