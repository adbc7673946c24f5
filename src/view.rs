use chrono::{DateTime, Local};

/// A list container whose rows are replaced wholesale on every render.
pub trait ListView {
    fn replace_rows(&mut self, rows: Vec<String>);
}

impl ListView for Vec<String> {
    fn replace_rows(&mut self, rows: Vec<String>) {
        *self = rows;
    }
}

/// The track list shown to the user, with the time it was last replaced.
#[derive(Debug, Default)]
pub struct TrackListView {
    rows: Vec<String>,
    updated_at: Option<DateTime<Local>>,
}

impl TrackListView {
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn updated_at(&self) -> Option<DateTime<Local>> {
        self.updated_at
    }
}

impl ListView for TrackListView {
    fn replace_rows(&mut self, rows: Vec<String>) {
        self.rows = rows;
        self.updated_at = Some(Local::now());
    }
}
