//! HTML page templates.
//!
//! Pages are assembled with `format!`. Every interpolated value except the
//! rendered document body goes through [`escape_html`].

use std::fmt::Write;

use axum::http::StatusCode;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use sb_renderer::escape_html;
use sb_site::RenderedDocument;

/// Characters encoded in `href` paths. `/` is kept as the segment separator.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:56rem;margin:0 auto;\
padding:1rem 2rem;line-height:1.6}\
header a{text-decoration:none;color:inherit}\
nav.breadcrumbs{font-size:.9rem;margin-bottom:1rem}\
.mermaid{margin:1.5rem 0;text-align:center}\
pre{overflow-x:auto;background:#f5f5f5;padding:.75rem}\
table{border-collapse:collapse}td,th{border:1px solid #ccc;padding:.25rem .5rem}";

/// Build an `href` for a URL prefix and a relative path.
pub(crate) fn href(prefix: &str, path: &str) -> String {
    format!("{prefix}{}", utf8_percent_encode(path, PATH_SEGMENT))
}

/// Wrap page content in the common layout.
fn layout(app_name: &str, title: &str, body: &str, script_url: Option<&str>) -> String {
    let app_name = escape_html(app_name);
    let script = script_url.map_or_else(String::new, |url| {
        format!("<script src=\"{}\"></script>\n", escape_html(url))
    });

    format!(
        "<!DOCTYPE html>\n\
<html lang=\"en\">\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
<title>{title} - {app_name}</title>\n\
<style>{STYLE}</style>\n\
</head>\n\
<body>\n\
<header><a href=\"/\">{app_name}</a></header>\n\
<main>\n\
{body}\
</main>\n\
{script}\
</body>\n\
</html>\n",
        title = escape_html(title),
    )
}

/// Index page listing subjects.
pub(crate) fn index_page(app_name: &str, subjects: &[String]) -> String {
    let mut body = String::from("<h1>Subjects</h1>\n");
    if subjects.is_empty() {
        body.push_str("<p>No subjects found.</p>\n");
    } else {
        body.push_str("<ul class=\"subjects\">\n");
        for subject in subjects {
            let _ = writeln!(
                body,
                "<li><a href=\"{}\">{}</a></li>",
                href("/subject/", subject),
                escape_html(subject)
            );
        }
        body.push_str("</ul>\n");
    }

    layout(app_name, "Subjects", &body, None)
}

/// Subject page listing documents.
///
/// `documents` are paths relative to the docs root; they are displayed
/// relative to the subject directory.
pub(crate) fn subject_page(app_name: &str, subject: &str, documents: &[String]) -> String {
    let prefix = format!("{subject}/");
    let mut body = format!(
        "<nav class=\"breadcrumbs\"><a href=\"/\">Home</a></nav>\n<h1>{}</h1>\n",
        escape_html(subject)
    );

    if documents.is_empty() {
        body.push_str("<p>No documents found.</p>\n");
    } else {
        body.push_str("<ul class=\"documents\">\n");
        for path in documents {
            let display = path.strip_prefix(&prefix).unwrap_or(path);
            let _ = writeln!(
                body,
                "<li><a href=\"{}\">{}</a></li>",
                href("/view/", path),
                escape_html(display)
            );
        }
        body.push_str("</ul>\n");
    }

    layout(app_name, subject, &body, None)
}

/// Rendered document page.
///
/// The document HTML is inserted as-is. The diagram renderer script is only
/// loaded when the page has diagram containers.
pub(crate) fn document_page(app_name: &str, document: &RenderedDocument, script_url: &str) -> String {
    let body = format!(
        "<nav class=\"breadcrumbs\"><a href=\"/\">Home</a> / <a href=\"{}\">{}</a></nav>\n\
<article>\n{}</article>\n",
        href("/subject/", &document.subject),
        escape_html(&document.subject),
        document.html
    );
    let has_diagrams = document.html.contains("class=\"mermaid\"");

    layout(
        app_name,
        &document.title,
        &body,
        has_diagrams.then_some(script_url),
    )
}

/// Error page for a status code.
pub(crate) fn error_page(status: StatusCode, message: &str) -> String {
    let title = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to subjects</a></p>\n",
        escape_html(&title),
        escape_html(message)
    );

    layout("Study Buddy", &title, &body, None)
}
