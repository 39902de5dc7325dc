//! Clickable control that opens the widget.

#[derive(Debug, Clone, PartialEq, Eq)]
enum Caption {
    Text(String),
    Html(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerButton {
    caption: Caption,
    enabled: bool,
}

impl TriggerButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            caption: Caption::Text(text.into()),
            enabled: true,
        }
    }

    pub fn with_html(html: impl Into<String>) -> Self {
        Self {
            caption: Caption::Html(html.into()),
            enabled: true,
        }
    }

    /// Caption as plain text; markup is dropped from an HTML caption.
    pub fn text(&self) -> String {
        match &self.caption {
            Caption::Text(text) => text.clone(),
            Caption::Html(html) => strip_tags(html),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.caption = Caption::Text(text.into());
    }

    /// Caption as HTML; a text caption is escaped.
    pub fn html(&self) -> String {
        match &self.caption {
            Caption::Text(text) => escape_html(text),
            Caption::Html(html) => html.clone(),
        }
    }

    pub fn set_html(&mut self, html: impl Into<String>) {
        self.caption = Caption::Html(html.into());
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl Default for TriggerButton {
    fn default() -> Self {
        Self::new("Upload image")
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_caption_and_state() {
        let button = TriggerButton::default();
        assert_eq!(button.text(), "Upload image");
        assert!(button.is_enabled());
    }

    #[test]
    fn test_text_caption_is_escaped_as_html() {
        let button = TriggerButton::new("Photos <new> & more");
        assert_eq!(button.html(), "Photos &lt;new&gt; &amp; more");
        assert_eq!(button.text(), "Photos <new> & more");
    }

    #[test]
    fn test_html_caption_as_text() {
        let mut button = TriggerButton::default();
        button.set_html("<b>Pick</b> photo&hellip;");
        assert_eq!(button.html(), "<b>Pick</b> photo&hellip;");
        assert_eq!(button.text(), "Pick photo&hellip;");
    }

    #[test]
    fn test_toggle_enabled() {
        let mut button = TriggerButton::new("Upload");
        button.set_enabled(false);
        assert!(!button.is_enabled());
    }
}
