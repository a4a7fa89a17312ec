//! HTML fragments for HTML-based surfaces.
//!
//! All user- and service-provided text goes through [`escape_html`]; the only
//! markup in the output is the fixed structure produced here.

use pluginchat_models::{EntryBody, StatusLine, TranscriptEntry, GENERATED_NOTICE};

/// Escape `&`, `<`, `>`, `"` and `'`.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render one transcript line as a `div.chatline`.
pub fn render_entry(entry: &TranscriptEntry) -> String {
    let class = entry.role.css_class();
    let label = entry.role.label();
    let content = match &entry.body {
        EntryBody::Text { text } => escape_html(text),
        EntryBody::Generated { files } if files.is_empty() => GENERATED_NOTICE.to_string(),
        EntryBody::Generated { files } => {
            let items: String = files
                .iter()
                .map(|file| {
                    format!(
                        "<li><b>{}</b> <span class=\"filesize\">({} Bytes)</span></li>",
                        escape_html(&file.path),
                        file.size_bytes
                    )
                })
                .collect();
            format!("{GENERATED_NOTICE}<br><ul class=\"filelist\">{items}</ul>")
        }
    };
    format!("<div class=\"chatline {class}\"><b class=\"{class}\">{label}</b> {content}</div>")
}

/// Render the status slot; empty when idle.
pub fn render_status(status: &StatusLine) -> String {
    match status {
        StatusLine::Idle => String::new(),
        StatusLine::Pending(text) => {
            format!("<div class=\"chatline ai-status\">{}</div>", escape_html(text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pluginchat_models::{GeneratedFile, Role};

    #[test]
    fn escapes_all_markup_characters() {
        assert_eq!(
            escape_html(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#039;y&#039;)&lt;/script&gt;"
        );
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(escape_html("Prompt empfangen ✓"), "Prompt empfangen ✓");
    }

    #[test]
    fn user_text_is_never_structural() {
        let entry = TranscriptEntry::text(Role::User, "<b>bold</b>");
        let html = render_entry(&entry);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>bold"));
        assert!(html.starts_with("<div class=\"chatline user\"><b class=\"user\">You:</b> "));
    }

    #[test]
    fn generated_entry_lists_files_in_order() {
        let entry = TranscriptEntry::generated(vec![
            GeneratedFile::new("x.xml", 120),
            GeneratedFile::new("lib/<evil>.jar", 7),
        ]);
        let html = render_entry(&entry);
        assert!(html.contains("Plugin generated!<br><ul class=\"filelist\">"));
        let first = html.find("x.xml").unwrap();
        let second = html.find("lib/&lt;evil&gt;.jar").unwrap();
        assert!(first < second);
        assert!(html.contains("(120 Bytes)"));
    }

    #[test]
    fn generated_entry_without_files_has_no_list() {
        let html = render_entry(&TranscriptEntry::generated(vec![]));
        assert!(html.contains("Plugin generated!"));
        assert!(!html.contains("<ul"));
        assert!(!html.contains("<li"));
    }

    #[test]
    fn status_rendering() {
        assert_eq!(render_status(&StatusLine::Idle), "");
        assert_eq!(
            render_status(&StatusLine::Pending("<busy>".into())),
            "<div class=\"chatline ai-status\">&lt;busy&gt;</div>"
        );
    }
}
