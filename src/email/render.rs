//! Notification rendering
//!
//! Two flows share the same skeleton: a detail table, an optional
//! free-text section, a download list, and one or more action links.
//! Request-supplied text is always HTML-escaped before interpolation;
//! newlines in free text become `<br>` after escaping.

use chrono::{DateTime, Utc};

use crate::api::dto::{EditedUploadMetadata, RawUploadMetadata, UploadedFileRef};
use crate::config::AppConfig;

/// A fully rendered notification, ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEnvelope {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub html_body: String,
}

/// Static inputs the renderers need beyond the request itself
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Sender address for every notification
    pub sender: String,
    /// Fixed recipient for review requests
    pub reviewer: String,
    /// Application UI base, for action links
    pub app_base_url: String,
    /// Public file-serving base of the storage provider
    pub download_url: String,
    /// Bucket name as it appears in public file URLs
    pub bucket_name: String,
}

impl RenderContext {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            sender: config.email.sender.clone(),
            reviewer: config.email.reviewer.clone(),
            app_base_url: config.app.base_url.trim_end_matches('/').to_string(),
            download_url: config.storage.download_url.trim_end_matches('/').to_string(),
            bucket_name: config.storage.bucket_name.clone(),
        }
    }
}

/// Render the editor-assignment notification for a raw-footage upload
pub fn render_editor_email(
    metadata: &RawUploadMetadata,
    files: &[UploadedFileRef],
    ctx: &RenderContext,
) -> NotificationEnvelope {
    let subject = format!(
        "New Footage: {} - {}",
        metadata.client_name, metadata.footage_type
    );

    let mut rows = vec![
        detail_row("Client", &metadata.client_name),
        detail_row("Shoot Date", &metadata.shoot_date),
        detail_row("Footage Type", &metadata.footage_type),
    ];
    if let Some(music) = &metadata.music_type {
        rows.push(detail_row("Music", music));
    }

    let instructions = metadata
        .instructions
        .as_deref()
        .map(|text| {
            format!(
                "<h3>Instructions</h3>\n<p>{}</p>\n",
                escape_multiline(text)
            )
        })
        .unwrap_or_default();

    let body = html_document(
        &subject,
        &format!(
            "<h2>New footage from {}</h2>\n\
             <table>\n{}</table>\n\
             {}\
             <h3>Files</h3>\n{}\n\
             <p><a class=\"action\" href=\"{}/upload\">Upload the edited version</a></p>",
            escape(&metadata.client_name),
            rows.join(""),
            instructions,
            file_list(files, ctx),
            ctx.app_base_url,
        ),
    );

    NotificationEnvelope {
        to: metadata.editor.clone(),
        from: ctx.sender.clone(),
        subject,
        html_body: body,
    }
}

/// Render the review-request notification for an edited-video upload
///
/// `review_id` correlates the approve/revise links with the stored
/// review context; `submitted_at` is the render-time timestamp shown
/// in the detail table.
pub fn render_review_email(
    metadata: &EditedUploadMetadata,
    files: &[UploadedFileRef],
    review_id: &str,
    submitted_at: DateTime<Utc>,
    ctx: &RenderContext,
) -> NotificationEnvelope {
    let subject = format!("Review Required: {}", metadata.project_name);

    let rows = [
        detail_row("Project", &metadata.project_name),
        detail_row("Client", &metadata.client_name),
        detail_row("Editor", &metadata.editor_name),
        detail_row(
            "Submitted",
            &submitted_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        ),
    ];

    let notes = metadata
        .description
        .as_deref()
        .map(|text| format!("<h3>Editor Notes</h3>\n<p>{}</p>\n", escape_multiline(text)))
        .unwrap_or_default();

    let project_param = urlencoding::encode(&metadata.project_name);
    let approve_url = format!(
        "{}/review?action=approve&id={}&project={}",
        ctx.app_base_url, review_id, project_param
    );
    let revise_url = format!(
        "{}/review?action=revise&id={}&project={}",
        ctx.app_base_url, review_id, project_param
    );

    let body = html_document(
        &subject,
        &format!(
            "<h2>{} is ready for review</h2>\n\
             <table>\n{}</table>\n\
             {}\
             <h3>Files</h3>\n{}\n\
             <p>\n\
             <a class=\"action approve\" href=\"{}\">Approve</a>\n\
             <a class=\"action revise\" href=\"{}\">Request Revisions</a>\n\
             </p>",
            escape(&metadata.project_name),
            rows.join(""),
            notes,
            file_list(files, ctx),
            approve_url,
            revise_url,
        ),
    );

    NotificationEnvelope {
        to: ctx.reviewer.clone(),
        from: ctx.sender.clone(),
        subject,
        html_body: body,
    }
}

/// Human-readable size, largest unit up to GB, 2 decimals with
/// trailing zeros trimmed
pub fn format_size(bytes: Option<u64>) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

    let bytes = bytes.unwrap_or(0);
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut scaled = bytes as f64;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let mut value = format!("{:.2}", scaled);
    if value.contains('.') {
        value = value
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string();
    }

    format!("{} {}", value, UNITS[unit])
}

fn escape(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}

fn escape_multiline(text: &str) -> String {
    escape(text).replace("\r\n", "\n").replace('\n', "<br>\n")
}

fn detail_row(label: &str, value: &str) -> String {
    format!(
        "<tr><th>{}</th><td>{}</td></tr>\n",
        label,
        escape(value)
    )
}

fn file_list(files: &[UploadedFileRef], ctx: &RenderContext) -> String {
    let items: String = files
        .iter()
        .map(|file| {
            format!(
                "<li><a href=\"{}\">{}</a> ({})</li>\n",
                download_href(ctx, &file.file_path),
                escape(&file.file_name),
                format_size(file.size),
            )
        })
        .collect();
    format!("<ul>\n{}</ul>", items)
}

/// Public download URL for an object key
///
/// The key arrives unverified from the client on `complete`, so each
/// segment is percent-encoded and the assembled URL is attribute-escaped
/// before it lands inside an `href`.
fn download_href(ctx: &RenderContext, file_path: &str) -> String {
    let encoded_path: String = file_path
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    let href = format!(
        "{}/file/{}/{}",
        ctx.download_url, ctx.bucket_name, encoded_path
    );
    html_escape::encode_double_quoted_attribute(&href).into_owned()
}

fn html_document(title: &str, content: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{}</title>\n\
         <style>\n\
         body {{ font-family: Helvetica, Arial, sans-serif; color: #222; }}\n\
         table th {{ text-align: left; padding-right: 12px; }}\n\
         a.action {{ display: inline-block; padding: 8px 16px; background: #2d6cdf; color: #fff; text-decoration: none; border-radius: 4px; }}\n\
         a.action.revise {{ background: #b33; }}\n\
         </style>\n\
         </head>\n\
         <body>\n\
         {}\n\
         </body>\n\
         </html>\n",
        escape(title),
        content
    )
}
