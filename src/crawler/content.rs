//! Main-content extraction
//!
//! Strips page chrome (navigation, scripts, banners, ads) from a parsed
//! document and returns the readable text of its main content area.

use scraper::{Html, Selector};

/// Elements removed before looking for content, by tag, role and class
const CHROME_SELECTORS: &[&str] = &[
    "script, style, nav, header, footer, aside, iframe, noscript",
    r#"[role="navigation"], [role="banner"], [role="contentinfo"]"#,
    ".nav, .navbar, .header, .footer, .sidebar, .menu, .advertisement",
];

/// Main content candidates, highest priority first
pub const MAIN_CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    r#"[role="main"]"#,
    ".content",
    ".main-content",
    "#content",
    "#main",
];

/// Extracts the main textual content of an HTML document
///
/// Never fails: malformed markup still yields a (possibly empty) string.
///
/// # Example
///
/// ```
/// use simplify_crawler::crawler::extract_content;
///
/// let html = r#"<html><body>
///     <nav>Home | About</nav>
///     <main><h1>Welcome</h1>
///     <p>Plain   words.</p></main>
/// </body></html>"#;
/// assert_eq!(extract_content(html), "Welcome Plain words.");
/// ```
pub fn extract_content(html: &str) -> String {
    extract_document_content(Html::parse_document(html))
}

/// Same as [`extract_content`] for an already parsed document
///
/// Takes the document by value because chrome is removed in place.
pub(crate) fn extract_document_content(mut document: Html) -> String {
    strip_chrome(&mut document);

    let text = match main_content_text(&document) {
        Some(text) if !text.is_empty() => text,
        _ => body_text(&document),
    };

    collapse_whitespace(&text)
}

/// Detaches every chrome subtree from the document tree
fn strip_chrome(document: &mut Html) {
    for group in CHROME_SELECTORS {
        let Ok(selector) = Selector::parse(group) else {
            continue;
        };

        let ids: Vec<_> = document.select(&selector).map(|element| element.id()).collect();
        for id in ids {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
            }
        }
    }
}

/// Text of the first main-content selector that matches anything
///
/// When a selector matches several elements their text is concatenated.
fn main_content_text(document: &Html) -> Option<String> {
    for candidate in MAIN_CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(candidate) else {
            continue;
        };

        let mut matches = document.select(&selector).peekable();
        if matches.peek().is_none() {
            continue;
        }

        return Some(matches.flat_map(|element| element.text()).collect());
    }
    None
}

fn body_text(document: &Html) -> String {
    match Selector::parse("body") {
        Ok(selector) => document
            .select(&selector)
            .flat_map(|element| element.text())
            .collect(),
        Err(_) => document.root_element().text().collect(),
    }
}

/// Collapses whitespace runs (including newlines) to single spaces and trims
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
