//! Share links for the short summary.
//!
//! Links are plain string templates; the text is percent-encoded so it
//! survives accents, emoji and line breaks.

/// Subject line of the e-mail link
pub const EMAIL_SUBJECT: &str = "Resultados Calculadora de Abono";

/// Percent-encode everything except RFC 3986 unreserved characters.
pub fn percent_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 3);
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// `mailto:` link. Mail clients expect CRLF line breaks in the body.
pub fn email_link(subject: &str, body: &str) -> String {
    let body = body.replace("\r\n", "\n").replace('\n', "\r\n");
    format!(
        "mailto:?subject={}&body={}",
        percent_encode(subject),
        percent_encode(&body)
    )
}

pub fn whatsapp_link(text: &str) -> String {
    format!("https://wa.me/?text={}", percent_encode(text))
}

pub fn telegram_link(text: &str) -> String {
    format!("https://t.me/share/url?text={}", percent_encode(text))
}

/// All three links, labelled, in display order
pub fn share_links(text: &str) -> [(&'static str, String); 3] {
    [
        ("Email", email_link(EMAIL_SUBJECT, text)),
        ("WhatsApp", whatsapp_link(text)),
        ("Telegram", telegram_link(text)),
    ]
}
