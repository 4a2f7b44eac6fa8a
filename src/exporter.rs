//! HTML export of the stored pairs, one table row per pair with a search link per
//! music service.

pub mod search;
pub mod template;

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, error, info};

use crate::error::PipelineError;
use crate::storage::RowSource;
use crate::types::Hot100Row;
use search::{search_url, SEARCH_SITES};
use template::Template;

pub const PAGE_TITLE: &str = "Billboard Hot 100 Search Links";

pub const PAGE: Template = Template::new(
    r#"
<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>{{title}}</title>
    <style>
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        .container {
            max-width: 1200px;
            margin: 0 auto;
        }
        table {
            width: 100%;
            border-collapse: collapse;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.2);
            border-radius: 8px;
            overflow: hidden;
        }
        th {
            background-color: #4a90e2;
            color: white;
            padding: 12px;
            text-align: left;
        }
        td {
            padding: 12px;
            border-bottom: 1px solid #ddd;
        }
        tr:hover {
            background-color: #f8f9fa;
        }
        .search-icon {
            width: 16px;
            height: 16px;
            vertical-align: middle;
        }
        a {
            color: #4a90e2;
            text-decoration: none;
        }
        a:hover {
            text-decoration: underline;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>{{title}}</h1>
        <table>
            <thead>
                <tr>
                    <th>Artist</th>
                    <th>Song</th>
                    <th>Apple Music</th>
                    <th>Spotify</th>
                </tr>
            </thead>
            <tbody>
                {{table_rows}}
            </tbody>
        </table>
    </div>
</body>
</html>
"#,
);

/// Escapes `&`, `<` and `>` only. Quotes pass through unchanged.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// One `<tr>` for a stored pair. The search query uses the raw values; only the
/// visible cells are escaped.
pub fn render_row(row: &Hot100Row) -> Result<String, PipelineError> {
    let artist = row.artist.as_deref().ok_or(PipelineError::MissingField("artist"))?;
    let song = row.song.as_deref().ok_or(PipelineError::MissingField("song"))?;
    let query = format!("{artist} {song}");

    let mut parts = Vec::with_capacity(4 + SEARCH_SITES.len());
    parts.push("<tr>".to_string());
    parts.push(format!("<td>{}</td>", escape_html(artist)));
    parts.push(format!("<td>{}</td>", escape_html(song)));
    for site in &SEARCH_SITES {
        parts.push(format!(
            r#"<td><a href="{}" target="_blank"><img src="{}" class="search-icon" alt="{}"></a></td>"#,
            search_url(site, &query),
            site.icon,
            site.name
        ));
    }
    parts.push("</tr>".to_string());
    Ok(parts.join("\n"))
}

/// Render every row, dropping (and logging) the ones that fail.
pub fn render_rows(rows: &[Hot100Row]) -> Vec<String> {
    rows.iter()
        .filter_map(|row| match render_row(row) {
            Ok(html) => Some(html),
            Err(e) => {
                error!(
                    "Error creating table row for {} - {}: {e}",
                    row.artist.as_deref().unwrap_or("null"),
                    row.song.as_deref().unwrap_or("null")
                );
                None
            }
        })
        .collect()
}

pub fn render_page(rows: &[String]) -> Result<String, PipelineError> {
    let table_rows = rows.join("\n");
    PAGE.fill(&[("title", PAGE_TITLE), ("table_rows", table_rows.as_str())])
        .inspect_err(|e| {
            error!("Error formatting HTML template: {e}");
            debug!("Number of rows: {}", rows.len());
            debug!("First row sample: {}", rows.first().map(String::as_str).unwrap_or("No rows"));
        })
}

/// Query, render and assemble the whole document. Fails when no row renders.
pub async fn build_document(source: &dyn RowSource) -> Result<(String, usize)> {
    let rows = source.fetch_rows().await.context("Database error")?;
    debug!("Fetched {} rows", rows.len());

    let rendered = render_rows(&rows);
    if rendered.is_empty() {
        return Err(PipelineError::NoRows.into());
    }
    let html = render_page(&rendered)?;
    Ok((html, rendered.len()))
}

/// Build the document and write it to `output`, replacing any existing file.
/// Nothing is written unless the document was assembled. Returns the row count.
pub async fn export_to(source: &dyn RowSource, output: &Path) -> Result<usize> {
    let (html, count) = build_document(source).await?;
    tokio::fs::write(output, html)
        .await
        .with_context(|| format!("writing {}", output.display()))?;

    let shown = tokio::fs::canonicalize(output).await.unwrap_or_else(|_| output.to_path_buf());
    info!("HTML file has been generated: {} ({count} rows)", shown.display());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StaticRows;

    #[test]
    fn escapes_markup_in_cells() {
        assert_eq!(escape_html("<script>&</script>"), "&lt;script&gt;&amp;&lt;/script&gt;");
        assert_eq!(escape_html(r#"Guns N' "Roses""#), r#"Guns N' "Roses""#);
    }

    #[test]
    fn row_has_escaped_cells_and_raw_query() {
        let html = render_row(&Hot100Row::new("Simon & Garfunkel", "<script>")).unwrap();
        assert!(html.contains("<td>Simon &amp; Garfunkel</td>"));
        assert!(html.contains("<td>&lt;script&gt;</td>"));
        assert!(!html.contains("<td><script></td>"));
        // query built from unescaped values: "&" -> %26, "<" -> %3C
        assert!(html.contains("q=Simon+%26+Garfunkel+%3Cscript%3E+site%3Amusic.apple.com"));
    }

    #[test]
    fn row_links_apple_music_before_spotify() {
        let html = render_row(&Hot100Row::new("Abba", "Dancing Queen")).unwrap();
        assert_eq!(html.matches("<a href=").count(), 2);
        let apple = html.find("site%3Amusic.apple.com").unwrap();
        let spotify = html.find("site%3Aopen.spotify.com").unwrap();
        assert!(apple < spotify);
        assert!(html.contains(r#"<img src="./applemusic.png" class="search-icon" alt="Apple Music">"#));
        assert!(html.starts_with("<tr>\n") && html.ends_with("\n</tr>"));
    }

    #[test]
    fn null_columns_drop_the_row() {
        let rows = vec![
            Hot100Row { artist: None, song: Some("Orphan".into()) },
            Hot100Row::new("Abba", "Waterloo"),
        ];
        let rendered = render_rows(&rows);
        assert_eq!(rendered.len(), 1);
        assert!(rendered[0].contains("Waterloo"));
        assert!(matches!(render_row(&rows[0]), Err(PipelineError::MissingField("artist"))));
    }

    #[test]
    fn page_has_headers_and_rows() {
        let page = render_page(&["<tr>\n<td>x</td>\n</tr>".to_string()]).unwrap();
        assert!(page.contains("<title>Billboard Hot 100 Search Links</title>"));
        assert!(page.contains("<th>Apple Music</th>\n                    <th>Spotify</th>"));
        assert!(page.contains("<td>x</td>"));
        assert!(!page.contains("{{"));
    }

    #[tokio::test]
    async fn empty_source_is_an_error_and_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out.html");
        let err = export_to(&StaticRows::default(), &out).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<PipelineError>(), Some(PipelineError::NoRows)));
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn all_rows_failing_counts_as_empty() {
        let source = StaticRows(vec![Hot100Row { artist: Some("Abba".into()), song: None }]);
        let err = build_document(&source).await.unwrap_err();
        assert!(matches!(err.downcast_ref::<PipelineError>(), Some(PipelineError::NoRows)));
    }

    #[tokio::test]
    async fn export_overwrites_existing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out.html");
        std::fs::write(&out, "stale").unwrap();
        let source = StaticRows(vec![Hot100Row::new("Abba", "Dancing Queen"), Hot100Row::new("Daft Punk", "One More Time")]);

        let n = export_to(&source, &out).await.unwrap();
        assert_eq!(n, 2);
        let html = std::fs::read_to_string(&out).unwrap();
        assert!(!html.contains("stale"));
        assert!(html.find("Abba").unwrap() < html.find("Daft Punk").unwrap());
    }

    #[tokio::test]
    async fn write_failure_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("missing_dir").join("out.html");
        let source = StaticRows(vec![Hot100Row::new("Abba", "Waterloo")]);
        assert!(export_to(&source, &out).await.is_err());
    }
}
