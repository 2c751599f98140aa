pub(crate) mod fighter;
pub(crate) mod roster;
pub(crate) mod search;

pub(crate) use ::scraper::Html;
use ::scraper::{ElementRef, Selector};
use reqwest::Url;
use tracing::debug;

use crate::error::{Result, SherdogError};

/// Fetch a URL and parse the response body as an HTML document.
pub(crate) async fn get_document(client: &reqwest::Client, url: &str) -> Result<Html> {
    debug!(url, "fetching page");

    let response = client.get(url).send().await.map_err(|e| SherdogError::Http {
        url: url.to_owned(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SherdogError::UnexpectedStatus {
            url: url.to_owned(),
            status,
        });
    }

    let body = response.text().await.map_err(|e| SherdogError::ResponseBody {
        url: url.to_owned(),
        source: e,
    })?;

    Ok(Html::parse_document(&body))
}

/// Extract trimmed text content from the first element matching `selector`
/// inside `element`. Returns `None` if nothing matches or the text is blank.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|e| element_text(&e))
        .filter(|t| !t.is_empty())
}

/// All text of an element, concatenated and trimmed, with line breaks removed.
pub(crate) fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .trim()
        .replace(['\n', '\t'], "")
}

/// Non-blank text nodes of an element, each trimmed.
pub(crate) fn text_nodes<'a>(element: &ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    element.text().map(str::trim).filter(|t| !t.is_empty())
}

/// Build `{base}{path}` with the given query parameters, percent-encoded.
pub(crate) fn build_url(base: &str, path: &str, params: &[(&str, String)]) -> Result<Url> {
    let raw = format!("{}{path}", base.trim_end_matches('/'));
    Url::parse_with_params(&raw, params).map_err(|e| SherdogError::InvalidUrl {
        url: raw,
        reason: e.to_string(),
    })
}

/// Resolve a possibly relative link found on a page against the site root.
pub(crate) fn absolute_url(base: &str, href: &str) -> Result<String> {
    let base_url = Url::parse(base).map_err(|e| SherdogError::InvalidUrl {
        url: base.to_owned(),
        reason: e.to_string(),
    })?;
    base_url
        .join(href)
        .map(String::from)
        .map_err(|e| SherdogError::InvalidUrl {
            url: href.to_owned(),
            reason: e.to_string(),
        })
}
