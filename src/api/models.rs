use serde::Serialize;

use crate::crawler::{CrawlResult, EXTERNAL, IMAGES, INTERNAL, Image, Link};

/// Fields of the crawl form. A repeated field keeps its first value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CrawlForm {
    pub url: Option<String>,
}

impl CrawlForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let url = pairs
            .into_iter()
            .find(|(name, _)| name == "url")
            .map(|(_, value)| value);
        CrawlForm { url }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct LinkSets {
    pub internal: Vec<Link>,
    pub external: Vec<Link>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct MediaSets {
    pub images: Vec<Image>,
}

/// Success envelope returned by `POST /crawl`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct CrawlPayload {
    pub links: LinkSets,
    pub media: MediaSets,
}

impl From<CrawlResult> for CrawlPayload {
    fn from(mut result: CrawlResult) -> Self {
        CrawlPayload {
            links: LinkSets {
                internal: result.links.remove(INTERNAL).unwrap_or_default(),
                external: result.links.remove(EXTERNAL).unwrap_or_default(),
            },
            media: MediaSets {
                images: result.media.remove(IMAGES).unwrap_or_default(),
            },
        }
    }
}
