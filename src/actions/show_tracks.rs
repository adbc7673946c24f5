use std::fmt::Display;
use std::sync::Mutex;

use reqwest::Url;

use crate::endpoints::Endpoints;
use crate::render::{Applied, RemoteListRenderer};
use crate::source::TrackSource;
use crate::view::ListView;

pub const NO_MATCHING_TRACKS: &str = "No matching tracks found.";
pub const NO_LIKED_TRACKS: &str = "You have no liked songs.";

/// Which track list to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackFilter {
    Mood(String),
    Liked,
}

impl TrackFilter {
    pub fn url(&self, endpoints: &Endpoints) -> Url {
        match self {
            TrackFilter::Mood(mood) => endpoints.mood_tracks(mood),
            TrackFilter::Liked => endpoints.all_liked_tracks(),
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            TrackFilter::Mood(_) => NO_MATCHING_TRACKS,
            TrackFilter::Liked => NO_LIKED_TRACKS,
        }
    }
}

impl Display for TrackFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackFilter::Mood(mood) => write!(f, "Mood: {mood}"),
            TrackFilter::Liked => write!(f, "Liked songs"),
        }
    }
}

pub async fn show_tracks<S: TrackSource, V: ListView>(
    renderer: &RemoteListRenderer<S>,
    endpoints: &Endpoints,
    filter: &TrackFilter,
    view: &Mutex<V>,
) -> Applied {
    renderer
        .render(&filter.url(endpoints), filter.placeholder(), view)
        .await
}

pub async fn select_mood<S: TrackSource, V: ListView>(
    renderer: &RemoteListRenderer<S>,
    endpoints: &Endpoints,
    mood: &str,
    view: &Mutex<V>,
) -> Applied {
    show_tracks(renderer, endpoints, &TrackFilter::Mood(mood.to_string()), view).await
}

pub async fn show_all_liked<S: TrackSource, V: ListView>(
    renderer: &RemoteListRenderer<S>,
    endpoints: &Endpoints,
    view: &Mutex<V>,
) -> Applied {
    show_tracks(renderer, endpoints, &TrackFilter::Liked, view).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderError;

    /// Records requested URLs and answers every request with `[]`.
    #[derive(Default)]
    struct EmptySource(Mutex<Vec<String>>);

    impl TrackSource for EmptySource {
        async fn fetch(&self, url: &Url) -> Result<String, RenderError> {
            self.0.lock().unwrap().push(url.to_string());
            Ok("[]".to_string())
        }
    }

    fn endpoints() -> Endpoints {
        Endpoints::new(Url::parse("http://127.0.0.1:8000").unwrap())
    }

    #[tokio::test]
    async fn mood_uses_encoded_query_and_mood_placeholder() {
        let renderer = RemoteListRenderer::new(EmptySource::default());
        let view = Mutex::new(Vec::new());

        select_mood(&renderer, &endpoints(), "lo-fi & chill", &view).await;

        assert_eq!(*view.lock().unwrap(), [NO_MATCHING_TRACKS]);
        assert_eq!(
            renderer_urls(&renderer),
            ["http://127.0.0.1:8000/mood-tracks?mood=lo-fi+%26+chill"]
        );
    }

    #[tokio::test]
    async fn liked_uses_liked_placeholder() {
        let renderer = RemoteListRenderer::new(EmptySource::default());
        let view = Mutex::new(vec!["A – B".to_string()]);

        show_all_liked(&renderer, &endpoints(), &view).await;

        assert_eq!(*view.lock().unwrap(), [NO_LIKED_TRACKS]);
        assert_eq!(
            renderer_urls(&renderer),
            ["http://127.0.0.1:8000/all-liked-tracks"]
        );
    }

    #[test]
    fn filter_titles() {
        assert_eq!(TrackFilter::Mood("sad".to_string()).to_string(), "Mood: sad");
        assert_eq!(TrackFilter::Liked.to_string(), "Liked songs");
    }

    fn renderer_urls(renderer: &RemoteListRenderer<EmptySource>) -> Vec<String> {
        renderer.source().0.lock().unwrap().clone()
    }
}
