use url::form_urlencoded;

pub const SEARCH_BASE_URL: &str = "https://www.google.com/search";

/// How to build an outbound search link for one music service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSite {
    pub domain: &'static str,
    pub icon: &'static str,
    pub name: &'static str,
}

pub const APPLE_MUSIC: SearchSite = SearchSite {
    domain: "music.apple.com",
    icon: "./applemusic.png",
    name: "Apple Music",
};

pub const SPOTIFY: SearchSite = SearchSite {
    domain: "open.spotify.com",
    icon: "./spotify.png",
    name: "Spotify",
};

/// Link cells are emitted in this order; it matches the page's column headers.
pub const SEARCH_SITES: [SearchSite; 2] = [APPLE_MUSIC, SPOTIFY];

/// Web search for `query` restricted to the site's domain, form-encoded
/// (`"a b site:x"` becomes `q=a+b+site%3Ax`).
pub fn search_url(site: &SearchSite, query: &str) -> String {
    let q = format!("{query} site:{}", site.domain);
    let params = form_urlencoded::Serializer::new(String::new())
        .append_pair("q", &q)
        .finish();
    format!("{SEARCH_BASE_URL}?{params}")
}
