use serde::de::Error as _;
use serde::Deserialize;

/// Top-level shape of a chart JSON file: `{ "data": [ {song, artist}, ... ] }`.
/// A file without `data` simply has no entries. Entries stay untyped until
/// [`ChartFile::entries`] so one malformed record does not sink the whole file.
#[derive(Debug, Default, Deserialize)]
pub struct ChartFile {
    #[serde(default)]
    pub data: Vec<serde_json::Value>,
}

impl ChartFile {
    /// Parse a chart file. The root must be a JSON object; arrays and scalars are
    /// rejected even where serde would accept them as a struct sequence.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let root: serde_json::Value = serde_json::from_str(raw)?;
        if !root.is_object() {
            return Err(serde_json::Error::custom("expected a JSON object with a `data` key"));
        }
        ChartFile::deserialize(root)
    }

    pub fn entries(&self) -> impl Iterator<Item = Result<ChartEntry, serde_json::Error>> + '_ {
        self.data.iter().map(|v| ChartEntry::deserialize(v))
    }
}

/// One song/artist record as it appears in a chart file. Missing fields stay `None`
/// and are inserted as NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChartEntry {
    #[serde(default)]
    pub song: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
}

impl ChartEntry {
    pub fn new(song: impl Into<String>, artist: impl Into<String>) -> Self {
        Self { song: Some(song.into()), artist: Some(artist.into()) }
    }

    /// `song - artist` with `null` standing in for absent fields, for log lines.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.song.as_deref().unwrap_or("null"),
            self.artist.as_deref().unwrap_or("null")
        )
    }
}

/// A stored pair from the `hot100` relation. Either column may be NULL in the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hot100Row {
    pub artist: Option<String>,
    pub song: Option<String>,
}

impl Hot100Row {
    pub fn new(artist: impl Into<String>, song: impl Into<String>) -> Self {
        Self { artist: Some(artist.into()), song: Some(song.into()) }
    }
}
