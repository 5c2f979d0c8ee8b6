use chrono::{DateTime, Utc};
use std::fmt::Write;

const TITLE: &str = "Combined Audio Transcription";

/// RFC 1123 with the zone spelled out, e.g. `Mon, 02 Jan 2006 15:04:05 UTC`
pub fn format_rfc1123(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%a, %d %b %Y %H:%M:%S UTC").to_string()
}

fn display_name(name: &str) -> &str {
    name.rsplit(|c: char| c == '/' || c == '\\')
        .find(|segment| !segment.is_empty())
        .unwrap_or(name)
}

/// Build the combined transcript document.
///
/// `transcripts[i]` belongs to `filenames[i]`; the sections keep that order. File names
/// are shown by base name only.
pub fn combine<S: AsRef<str>>(
    transcripts: &[String],
    filenames: &[S],
    generated_at: DateTime<Utc>,
) -> String {
    debug_assert_eq!(transcripts.len(), filenames.len());

    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');
    out.push_str(&"=".repeat(TITLE.len()));
    out.push('\n');
    let _ = writeln!(out, "Generated: {}", format_rfc1123(generated_at));
    let _ = writeln!(out, "Total Files: {}", transcripts.len());
    out.push('\n');

    for (i, (text, name)) in transcripts.iter().zip(filenames).enumerate() {
        let _ = write!(
            out,
            "\n--- File {}: {} ---\n\n",
            i + 1,
            display_name(name.as_ref())
        );
        out.push_str(text);
        out.push_str("\n\n");
    }

    out
}
