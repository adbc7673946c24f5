use reqwest::Url;

/// URLs of the Mood It server, relative to a configured base.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// `base` must be an `http`/`https` URL; the config loader checks this.
    pub fn new(base: Url) -> Self {
        Endpoints { base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn path(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        let prefix = self.base.path().trim_end_matches('/');
        url.set_path(&format!("{prefix}{path}"));
        url.set_query(None);
        url.set_fragment(None);
        url
    }

    pub fn login(&self) -> Url {
        self.path("/login")
    }

    pub fn mood_tracks(&self, mood: &str) -> Url {
        let mut url = self.path("/mood-tracks");
        url.query_pairs_mut().append_pair("mood", mood);
        url
    }

    pub fn all_liked_tracks(&self) -> Url {
        self.path("/all-liked-tracks")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoints(base: &str) -> Endpoints {
        Endpoints::new(Url::parse(base).unwrap())
    }

    #[test]
    fn builds_fixed_endpoints() {
        let endpoints = endpoints("http://127.0.0.1:8000");
        assert_eq!(endpoints.login().as_str(), "http://127.0.0.1:8000/login");
        assert_eq!(
            endpoints.all_liked_tracks().as_str(),
            "http://127.0.0.1:8000/all-liked-tracks"
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        let endpoints = endpoints("https://example.com/moodit/");
        assert_eq!(
            endpoints.mood_tracks("happy").as_str(),
            "https://example.com/moodit/mood-tracks?mood=happy"
        );
    }

    #[test]
    fn encodes_mood_value() {
        let url = endpoints("http://localhost:8000").mood_tracks("rock & roll #1");
        assert_eq!(url.query(), Some("mood=rock+%26+roll+%231"));

        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "mood");
        assert_eq!(value, "rock & roll #1");
    }
}
