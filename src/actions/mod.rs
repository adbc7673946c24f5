pub mod show_tracks;
