use std::fmt::Write as _;

use crate::scorer::ScoredArticle;

const CSV_HEADER: &str = "published,source,title,link,score";

/// Render ranked articles as CSV (RFC 4180, CRLF line endings).
#[must_use]
pub fn scored_articles_csv(articles: &[ScoredArticle]) -> String {
    let mut out = String::with_capacity(64 * (articles.len() + 1));
    out.push_str(CSV_HEADER);
    out.push_str("\r\n");
    for scored in articles {
        let a = &scored.article;
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "{},{},{},{},{}\r\n",
            a.published,
            quote(&a.source),
            quote(a.title.as_deref().unwrap_or("")),
            quote(&a.link),
            scored.score
        );
    }
    out
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
