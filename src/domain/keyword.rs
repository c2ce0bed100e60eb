use url::Url;

pub const RELEVANT_KEYWORDS: [&str; 10] = [
    "mission",
    "values",
    "about",
    "history",
    "leadership",
    "team",
    "executives",
    "awards",
    "products",
    "services",
];

pub fn contains_relevant_keyword(url: &Url) -> bool {
    let url = url.as_str().to_lowercase();
    RELEVANT_KEYWORDS.iter().any(|keyword| url.contains(keyword))
}

/// Host and explicit port must match; the scheme is not compared.
/// `Url` drops a port equal to the scheme default, so `:443` on https is no port.
pub fn same_domain(url: &Url, base: &Url) -> bool {
    url.host_str().is_some() && url.host_str() == base.host_str() && url.port() == base.port()
}
