use std::collections::HashSet;

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::social::is_social_media_host;
use super::{CrawlerRunConfig, Image, Link};

static BASE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("base[href]").expect("Failed to parse base selector"));

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("Failed to parse link selector"));

static IMAGE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img").expect("Failed to parse image selector"));

/// Attributes lazy-loading scripts park the real image source in.
const LAZY_SOURCE_ATTRS: &[&str] = &["data-src", "data-lazy-src", "data-original"];

const SKIPPED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:", "data:"];

#[derive(Debug, Default)]
pub struct Extracted {
    pub internal: Vec<Link>,
    pub external: Vec<Link>,
    pub images: Vec<Image>,
}

pub fn extract(html: &str, page_url: &Url, config: &CrawlerRunConfig) -> Extracted {
    let document = Html::parse_document(html);
    let base = document_base(&document, page_url);
    let (internal, external) = extract_links(&document, &base, page_url, config);
    let images = extract_images(&document, &base, config);

    Extracted {
        internal,
        external,
        images,
    }
}

/// Resolution base: a `<base href>` if the document declares one, else the page URL.
fn document_base(document: &Html, page_url: &Url) -> Url {
    document
        .select(&BASE_SELECTOR)
        .next()
        .and_then(|base| base.value().attr("href"))
        .and_then(|href| page_url.join(href.trim()).ok())
        .unwrap_or_else(|| page_url.clone())
}

fn extract_links(
    document: &Html,
    base: &Url,
    page_url: &Url,
    config: &CrawlerRunConfig,
) -> (Vec<Link>, Vec<Link>) {
    let site = page_url.host_str().map(site_host);
    let mut seen = HashSet::new();
    let mut internal = Vec::new();
    let mut external = Vec::new();

    for element in document.select(&LINK_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(mut target) = resolve(base, href) else {
            continue;
        };
        target.set_fragment(None);

        let href = target.to_string();
        if !seen.insert(href.clone()) {
            continue;
        }

        let link = Link {
            href,
            text: collapsed_text(&element),
            title: non_empty(element.value().attr("title")),
        };

        let host = target.host_str().map(site_host);
        if host.is_some() && host == site {
            internal.push(link);
        } else {
            if config.exclude_social_media_links
                && target.host_str().is_some_and(is_social_media_host)
            {
                continue;
            }
            external.push(link);
        }
    }

    (internal, external)
}

fn extract_images(document: &Html, base: &Url, config: &CrawlerRunConfig) -> Vec<Image> {
    let mut seen = HashSet::new();
    let mut images = Vec::new();

    for element in document.select(&IMAGE_SELECTOR) {
        let Some(raw) = image_source(&element, config.wait_for_images) else {
            continue;
        };
        let Some(target) = resolve(base, raw) else {
            continue;
        };

        let src = target.to_string();
        if !seen.insert(src.clone()) {
            continue;
        }
        images.push(Image {
            src,
            alt: non_empty(element.value().attr("alt")),
        });
    }

    images
}

/// Picks the source an `img` will end up displaying.
///
/// Without waiting only the literal `src` counts. With waiting, a lazy-load
/// attribute beats a missing or placeholder `src`, and `srcset` is the last resort.
fn image_source<'a>(element: &ElementRef<'a>, wait_for_images: bool) -> Option<&'a str> {
    let value = element.value();
    let src = value.attr("src").map(str::trim).filter(|s| !s.is_empty());

    if !wait_for_images {
        return src.filter(|s| !is_inline_data(s));
    }

    if let Some(src) = src.filter(|s| !is_inline_data(s)) {
        return Some(src);
    }

    LAZY_SOURCE_ATTRS
        .iter()
        .filter_map(|attr| value.attr(attr))
        .map(str::trim)
        .find(|s| !s.is_empty() && !is_inline_data(s))
        .or_else(|| value.attr("srcset").and_then(first_srcset_candidate))
}

fn first_srcset_candidate(srcset: &str) -> Option<&str> {
    srcset
        .split(',')
        .filter_map(|candidate| candidate.split_whitespace().next())
        .find(|s| !is_inline_data(s))
}

fn resolve(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }
    let lower = href.to_ascii_lowercase();
    if SKIPPED_SCHEMES.iter().any(|scheme| lower.starts_with(scheme)) {
        return None;
    }

    let url = base.join(href).ok()?;
    matches!(url.scheme(), "http" | "https").then_some(url)
}

fn is_inline_data(src: &str) -> bool {
    src.get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("data:"))
}

/// Host used for same-site comparison.
fn site_host(host: &str) -> String {
    let host = host.to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(rest) => rest.to_string(),
        None => host,
    }
}

fn collapsed_text(element: &ElementRef) -> Option<String> {
    let text = element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");
    (!text.is_empty()).then_some(text)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
