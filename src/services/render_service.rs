use axum::{
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};
use log::debug;

use crate::components::TemplateSet;
use crate::errors::WikiError;
use crate::services::link_service::LinkTransformer;
use crate::types::Page;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Template whose body goes through wiki-link expansion
pub const VIEW_TEMPLATE: &str = "view";
pub const EDIT_TEMPLATE: &str = "edit";

/// Turns a page into an HTML or JSON response
#[derive(Debug, Clone)]
pub struct PageRenderer {
    templates: TemplateSet,
    links: LinkTransformer,
}

impl PageRenderer {
    pub fn new(templates: TemplateSet, links: LinkTransformer) -> Self {
        Self { templates, links }
    }

    /// Negotiate on `Accept`: exactly `application/json` gets JSON, anything
    /// else gets the named HTML template.
    pub fn render(&self, headers: &HeaderMap, template: &str, page: &Page) -> Result<Response, WikiError> {
        if wants_json(headers) {
            debug!("Rendering page {:?} as JSON", page.title);
            return self.render_json(page);
        }
        self.render_html(template, page)
    }

    pub fn render_json(&self, page: &Page) -> Result<Response, WikiError> {
        let body = serde_json::to_string(page)?;
        Ok(([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response())
    }

    pub fn render_html(&self, template: &str, page: &Page) -> Result<Response, WikiError> {
        debug!("Rendering page {:?} with template {:?}", page.title, template);
        let html = self.expand(template, page)?;
        Ok(([(header::CONTENT_TYPE, HTML_CONTENT_TYPE)], html).into_response())
    }

    /// Expand a template to a string. Only the view template expands links;
    /// every other template shows the raw body, escaped.
    pub fn expand(&self, template: &str, page: &Page) -> Result<String, WikiError> {
        let title = html_escape::encode_safe(&page.title);
        let body = if template == VIEW_TEMPLATE {
            self.links.expand(&page.body)
        } else {
            html_escape::encode_text(&page.body).into_owned()
        };
        self.templates.render(template, &title, &body)
    }
}

fn wants_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "application/json")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, http::{HeaderValue, StatusCode}};
    use pretty_assertions::assert_eq;

    fn renderer() -> PageRenderer {
        PageRenderer::new(TemplateSet::builtin(), LinkTransformer::default())
    }

    fn json_headers(accept: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(accept));
        headers
    }

    async fn body_string(resp: Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn json_accept_renders_json() {
        let page = Page::new("Home", "see [Other]");
        let resp = renderer().render(&json_headers("application/json"), VIEW_TEMPLATE, &page).unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
        assert_eq!(body_string(resp).await, r#"{"title":"Home","content":"see [Other]"}"#);
    }

    #[tokio::test]
    async fn other_accept_values_render_html() {
        let page = Page::new("Home", "x");
        for accept in ["application/json, text/html", "text/html", "*/*"] {
            let resp = renderer().render(&json_headers(accept), VIEW_TEMPLATE, &page).unwrap();
            assert_eq!(resp.headers()[header::CONTENT_TYPE], HTML_CONTENT_TYPE);
        }
        let resp = renderer().render(&HeaderMap::new(), VIEW_TEMPLATE, &page).unwrap();
        assert_eq!(resp.headers()[header::CONTENT_TYPE], HTML_CONTENT_TYPE);
    }

    #[test]
    fn view_expands_links() {
        let html = renderer().expand(VIEW_TEMPLATE, &Page::new("Home", "see [Other] page")).unwrap();
        assert!(html.contains("<h1>Home</h1>"));
        assert!(html.contains("see <a href=\"/Other\">Other</a> page"));
    }

    #[test]
    fn edit_shows_raw_escaped_body() {
        let html = renderer().expand(EDIT_TEMPLATE, &Page::new("Home", "[Other] <b>")).unwrap();
        assert!(html.contains(">[Other] &lt;b&gt;</textarea>"));
        assert!(!html.contains("<a href=\"/Other\">"));
    }

    #[test]
    fn unknown_template_fails() {
        let err = renderer().render_html("nope", &Page::placeholder("Home")).unwrap_err();
        assert!(matches!(err, WikiError::Render(_)));
    }
}
