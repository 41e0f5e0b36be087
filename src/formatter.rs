use teloxide::types::ParseMode;

/// Characters Telegram's MarkdownV2 parser treats as markup. Every one of
/// them must be backslash-escaped when it appears in plain text.
const RESERVED: &[char] = &[
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\',
];

/// Send options attached to every outbound message.
#[derive(Debug, Clone, PartialEq)]
pub struct SendOptions {
    pub parse_mode: ParseMode,
    pub disable_link_preview: bool,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            parse_mode: ParseMode::MarkdownV2,
            disable_link_preview: true,
        }
    }
}

/// One outbound reply: MarkdownV2 body plus send options.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedMessage {
    pub body: String,
    pub options: SendOptions,
}

impl FormattedMessage {
    /// Wraps a body already composed with the markup helpers in this module.
    pub fn from_markup(body: String) -> Self {
        Self {
            body,
            options: SendOptions::default(),
        }
    }
}

/// Escapes free text and attaches the default send options.
pub fn render(raw: &str) -> FormattedMessage {
    FormattedMessage::from_markup(escape(raw))
}

/// Escapes every MarkdownV2-reserved character in `text`. Total over the
/// input domain: any string has a valid escaped form.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if RESERVED.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Bold span with an escaped interior.
pub fn bold(text: &str) -> String {
    format!("*{}*", escape(text))
}

/// Inline link with an escaped label. Inside the URL part only `)` and `\`
/// are significant to the parser.
pub fn link(label: &str, url: &str) -> String {
    let url = url.replace('\\', "\\\\").replace(')', "\\)");
    format!("[{}]({})", escape(label), url)
}

/// True when `text` contains a character from `reserved` that is not
/// preceded by a backslash. Test helper for the escaping discipline.
#[cfg(test)]
pub(crate) fn has_unescaped(text: &str, reserved: &[char]) -> bool {
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            chars.next();
            continue;
        }
        if reserved.contains(&ch) {
            return true;
        }
    }
    false
}
