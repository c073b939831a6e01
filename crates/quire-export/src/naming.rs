//! Artifact names derived from tab titles

use chrono::NaiveDate;

/// `YYYYMMDD`
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

pub fn markdown_file_name(title: &str, date: NaiveDate) -> String {
    format!("{}_{}.md", title, date_stamp(date))
}

pub fn document_file_name(title: &str) -> String {
    format!("{}.docx", title)
}

pub fn print_title(title: &str, date: NaiveDate) -> String {
    format!("{}_{}", title, date_stamp(date))
}

/// Reduce a suggested name to a bare file name that cannot escape its
/// directory. Separators are replaced rather than cut, so no part of the
/// title is lost.
pub fn sanitize_file_name(file_name: &str) -> String {
    let replaced: String = file_name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c => c,
        })
        .collect();
    let name = replaced.trim().trim_start_matches('.').trim();

    if name.is_empty() {
        "export".to_string()
    } else {
        name.to_string()
    }
}
