//! Builds Wayback Machine [CDX server] query URLs.
//!
//! [CDX server]: https://github.com/internetarchive/wayback/tree/master/wayback-cdx-server

use std::fmt;

pub static CDX_ENDPOINT: &str = "http://web.archive.org/cdx/search/cdx";

/// Filter keys the CDX server is asked to filter on. Anything else is dropped.
static SUPPORTED_FILTER_KEYS: [&str; 4] = ["statuscode", "mimetype", "!statuscode", "!mimetype"];

/// A `from`/`to` timestamp pair, passed to the server as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub from: String,
    pub to: String,
}

impl DateRange {
    /// Splits `"2012-2015"` on the first `-`. Returns `None` if there is no
    /// `-` at all.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let (from, to) = s.split_once('-')?;
        Some(Self {
            from: from.into(),
            to: to.into(),
        })
    }
}

/// A single `key:value` CDX filter, e.g. `statuscode:200` or
/// `!mimetype:text/html`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CdxFilter(String);

impl CdxFilter {
    /// Splits a comma-separated filter list, keeping input order.
    #[must_use]
    pub fn parse_list(s: &str) -> Vec<Self> {
        if s.is_empty() {
            return Vec::new();
        }
        s.split(',').map(|f| Self(f.into())).collect()
    }

    /// Text before the first `:`, or the whole filter if there is none.
    #[must_use]
    pub fn key(&self) -> &str {
        self.0.split(':').next().unwrap_or_default()
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        SUPPORTED_FILTER_KEYS.contains(&self.key())
    }
}

impl From<&str> for CdxFilter {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl fmt::Display for CdxFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CdxQueryOptions {
    pub date_range: Option<DateRange>,
    pub filters: Vec<CdxFilter>,
    /// One of `exact`, `prefix`, `host` or `domain`; not checked.
    pub match_scope: Option<String>,
}

/// Returns the CDX query URL listing every archived URL under `domain`.
#[must_use]
pub fn build_cdx_url(domain: &str, options: &CdxQueryOptions) -> String {
    build_cdx_url_with_endpoint(CDX_ENDPOINT, domain, options)
}

/// Same as [`build_cdx_url`] against a different CDX server.
///
/// Parameters are appended in a fixed order: date range, filters, then match
/// scope. Nothing is percent-encoded, so the domain and filter values reach
/// the server byte for byte.
#[must_use]
pub fn build_cdx_url_with_endpoint(
    endpoint: &str,
    domain: &str,
    options: &CdxQueryOptions,
) -> String {
    let mut url = format!(
        "{}?url=*.{}/*&output=json&fl=original&collapse=urlkey",
        endpoint, domain
    );

    if let Some(DateRange { from, to }) = &options.date_range {
        url.push_str("&from=");
        url.push_str(from);
        url.push_str("&to=");
        url.push_str(to);
    }

    for filter in &options.filters {
        if filter.is_supported() {
            url.push_str("&filter=");
            url.push_str(&filter.0);
        } else {
            log::debug!("dropping unsupported filter: {}", filter);
        }
    }

    if let Some(scope) = options.match_scope.as_deref().filter(|s| !s.is_empty()) {
        url.push_str("&matchType=");
        url.push_str(scope);
    }

    url
}
