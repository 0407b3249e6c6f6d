use url::Url;

/// Domains whose stories are excluded from the generated output.
#[derive(Debug, Clone)]
pub struct Blacklist {
    domains: Vec<String>,
}

impl Blacklist {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|domain| domain.into().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Coarse substring check against a raw URL, used when reading the feed
    /// list. Story links get the precise hostname check instead.
    pub fn matches_url(&self, url: &str) -> bool {
        let url = url.to_ascii_lowercase();
        self.domains.iter().any(|domain| url.contains(domain))
    }

    /// Hostname check: the link's host must equal a blacklisted domain or be
    /// a sub-domain of it. `notfool.com` does not match `fool.com`.
    pub fn matches_link(&self, link: &str) -> bool {
        let host = match Url::parse(link) {
            Ok(parsed) => match parsed.host_str() {
                Some(host) => host.to_ascii_lowercase(),
                None => return false,
            },
            Err(_) => return false,
        };
        self.domains
            .iter()
            .any(|domain| host == *domain || host.ends_with(&format!(".{domain}")))
    }
}
