use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use url::Url;

const HEADER_RATE_LIMIT: &str = "x-ratelimit-limit";
const HEADER_RATE_REMAINING: &str = "x-ratelimit-remaining";
const HEADER_RATE_RESET: &str = "x-ratelimit-reset";

/// A decoded body together with what the response headers said about it.
#[derive(Debug, Clone)]
pub struct Response<T> {
    pub data: T,
    pub meta: ResponseMeta,
}

impl<T> Response<T> {
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// Rate limit snapshot taken from the `X-RateLimit-*` headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rate {
    pub limit: u32,
    pub remaining: u32,
    pub reset: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMeta {
    pub status: u16,
    pub rate: Option<Rate>,
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
    pub first_page: Option<u32>,
    pub last_page: Option<u32>,
}

impl ResponseMeta {
    pub fn from_parts(status: u16, headers: &HeaderMap) -> Self {
        let mut meta = Self {
            status,
            rate: parse_rate(headers),
            ..Default::default()
        };

        if let Some(link) = headers.get(reqwest::header::LINK).and_then(|v| v.to_str().ok()) {
            for (rel, page) in parse_link_pages(link) {
                match rel {
                    "next" => meta.next_page = Some(page),
                    "prev" => meta.prev_page = Some(page),
                    "first" => meta.first_page = Some(page),
                    "last" => meta.last_page = Some(page),
                    _ => {}
                }
            }
        }

        meta
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Option<T> {
    headers.get(name)?.to_str().ok()?.trim().parse().ok()
}

fn parse_rate(headers: &HeaderMap) -> Option<Rate> {
    let limit = header_number(headers, HEADER_RATE_LIMIT)?;
    let remaining = header_number(headers, HEADER_RATE_REMAINING)?;
    let reset: i64 = header_number(headers, HEADER_RATE_RESET)?;

    Some(Rate {
        limit,
        remaining,
        reset: Utc.timestamp_opt(reset, 0).single()?,
    })
}

/// Yields `(rel, page)` for every entry of a `Link` header that carries a `page` parameter.
fn parse_link_pages(link: &str) -> Vec<(&str, u32)> {
    link.split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let target = parts
                .next()?
                .trim()
                .strip_prefix('<')?
                .strip_suffix('>')?;
            let rel = parts
                .find_map(|p| p.trim().strip_prefix("rel="))?
                .trim_matches('"');

            let url = Url::parse(target).ok()?;
            let page = url
                .query_pairs()
                .find(|(k, _)| k == "page")
                .and_then(|(_, v)| v.parse().ok())?;

            Some((rel, page))
        })
        .collect()
}
