use std::sync::OnceLock;

use regex::{Captures, Regex};

/// How page text is treated when wiki links are expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkMode {
    /// Text and link labels pass through unescaped. Page bodies may carry raw HTML.
    #[default]
    Literal,
    /// Text is HTML-escaped before links are expanded.
    Escaped,
}

fn page_link() -> &'static Regex {
    static PAGE_LINK: OnceLock<Regex> = OnceLock::new();
    PAGE_LINK.get_or_init(|| Regex::new(r"\[(.+)\]").expect("Invalid page link regex"))
}

/// Rewrites `[Title]` markers into links to `/Title`
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkTransformer {
    mode: LinkMode,
}

impl LinkTransformer {
    pub fn new(mode: LinkMode) -> Self {
        Self { mode }
    }

    /// Expand every bracketed span into an anchor.
    ///
    /// Matching is greedy within a line, so `[a][b]` becomes one link whose
    /// target and label are `a][b`.
    pub fn expand(&self, text: &str) -> String {
        match self.mode {
            LinkMode::Literal => page_link()
                .replace_all(text, |caps: &Captures| {
                    let target = &caps[1];
                    format!("<a href=\"/{target}\">{target}</a>")
                })
                .into_owned(),
            LinkMode::Escaped => expand_escaped(text),
        }
    }
}

/// Text and labels escaped as HTML text, link targets as a double-quoted attribute
fn expand_escaped(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in page_link().captures_iter(text) {
        let (Some(whole), Some(target)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        out.push_str(&html_escape::encode_text(&text[last..whole.start()]));
        out.push_str(&format!(
            "<a href=\"/{}\">{}</a>",
            html_escape::encode_double_quoted_attribute(target.as_str()),
            html_escape::encode_text(target.as_str()),
        ));
        last = whole.end();
    }
    out.push_str(&html_escape::encode_text(&text[last..]));
    out
}
