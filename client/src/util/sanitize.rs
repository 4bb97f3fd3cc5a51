//! HTML sanitizer for memory rich text.
//!
//! DESIGN
//! ======
//! Memory bodies are stored as editor-produced HTML and re-injected with
//! `inner_html`, so everything crossing that boundary goes through [`clean`].
//! The filter is allow-list only: the tag set matches what the editor
//! toolbar can produce (headings, paragraphs, lists, task items, blockquote,
//! code, formatting marks, links, images, tables) and the attribute set is
//! the handful those elements legitimately carry. Everything else is
//! dropped: unknown elements are unwrapped around their children,
//! `script`/`style` lose their contents too, event handlers never match the
//! attribute list, and `href`/`src` values resolving to a `javascript:`
//! scheme are removed with whitespace and entity obfuscation folded away
//! before the check.
//!
//! The parser is deliberately small: one pass that understands tags,
//! comments, and quoted attribute values. It never balances or reorders the
//! tree; the browser's parser owns those judgments.

#[cfg(test)]
#[path = "sanitize_test.rs"]
mod sanitize_test;

const ALLOWED_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "br", "hr", "ul", "ol", "li",
    "blockquote", "pre", "code", "strong", "b", "em", "i", "u", "s", "del",
    "mark", "span", "div", "a", "img", "table", "thead", "tbody", "tr", "th",
    "td", "label", "input",
];

const ALLOWED_ATTRS: &[&str] = &[
    "href", "src", "alt", "title", "class", "id", "data-type", "data-checked",
    "type", "checked", "disabled", "target", "rel",
];

/// Attributes carrying URLs, subject to the scheme check.
const URL_ATTRS: &[&str] = &["href", "src"];

/// Elements whose entire contents are discarded along with the tags.
const DROP_CONTENT_TAGS: &[&str] = &["script", "style"];

struct Tag {
    name: String,
    closing: bool,
    attrs: Vec<(String, Option<String>)>,
}

/// Sanitize one HTML fragment for `inner_html` injection.
#[must_use]
pub fn clean(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        rest = &rest[lt..];

        if let Some(stripped) = rest.strip_prefix("<!--") {
            rest = stripped.find("-->").map_or("", |end| &stripped[end + 3..]);
            continue;
        }
        if rest.starts_with("<!") || rest.starts_with("<?") {
            rest = rest.find('>').map_or("", |end| &rest[end + 1..]);
            continue;
        }

        let Some((tag, after)) = parse_tag(rest) else {
            // A bracket that never forms a tag is text.
            out.push_str("&lt;");
            rest = &rest[1..];
            continue;
        };

        if tag.closing {
            if ALLOWED_TAGS.contains(&tag.name.as_str()) {
                out.push_str("</");
                out.push_str(&tag.name);
                out.push('>');
            }
            rest = after;
            continue;
        }

        if DROP_CONTENT_TAGS.contains(&tag.name.as_str()) {
            rest = skip_dropped_content(after, &tag.name);
            continue;
        }

        if ALLOWED_TAGS.contains(&tag.name.as_str()) {
            emit_tag(&mut out, &tag);
        }
        rest = after;
    }

    out.push_str(rest);
    out
}

/// Parse the tag starting at `rest` (which begins with `<`). Returns the
/// tag and the remainder after its `>`, or `None` when the bracket does not
/// open real markup.
fn parse_tag(rest: &str) -> Option<(Tag, &str)> {
    let inner = rest.strip_prefix('<')?;
    let (closing, inner) = match inner.strip_prefix('/') {
        Some(stripped) => (true, stripped),
        None => (false, inner),
    };
    if !inner.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let end = tag_end(inner)?;
    let body = &inner[..end];
    let after = &inner[end + 1..];

    let name_len = body
        .bytes()
        .position(|b| !b.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    let name = body[..name_len].to_ascii_lowercase();
    let attrs = if closing {
        Vec::new()
    } else {
        parse_attrs(&body[name_len..])
    };
    Some((Tag { name, closing, attrs }, after))
}

/// Byte index of the `>` closing this tag, skipping quoted attribute values.
fn tag_end(inner: &str) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (i, b) in inner.bytes().enumerate() {
        match quote {
            Some(q) => {
                if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'>' => return Some(i),
                _ => {}
            },
        }
    }
    None
}

fn parse_attrs(mut src: &str) -> Vec<(String, Option<String>)> {
    let mut attrs = Vec::new();
    loop {
        src = src.trim_start();
        if src.is_empty() {
            return attrs;
        }
        if let Some(stripped) = src.strip_prefix('/') {
            src = stripped;
            continue;
        }
        let name_len = src
            .bytes()
            .position(|b| b.is_ascii_whitespace() || b == b'=' || b == b'/')
            .unwrap_or(src.len());
        if name_len == 0 {
            // Stray quote or similar junk: skip one character.
            let mut chars = src.chars();
            chars.next();
            src = chars.as_str();
            continue;
        }
        let name = src[..name_len].to_ascii_lowercase();
        src = &src[name_len..];

        let trimmed = src.trim_start();
        if let Some(eq_rest) = trimmed.strip_prefix('=') {
            let (value, after) = parse_attr_value(eq_rest.trim_start());
            attrs.push((name, Some(value)));
            src = after;
        } else {
            attrs.push((name, None));
            src = trimmed;
        }
    }
}

fn parse_attr_value(src: &str) -> (String, &str) {
    if let Some(stripped) = src.strip_prefix('"') {
        match stripped.find('"') {
            Some(end) => (stripped[..end].to_owned(), &stripped[end + 1..]),
            None => (stripped.to_owned(), ""),
        }
    } else if let Some(stripped) = src.strip_prefix('\'') {
        match stripped.find('\'') {
            Some(end) => (stripped[..end].to_owned(), &stripped[end + 1..]),
            None => (stripped.to_owned(), ""),
        }
    } else {
        let end = src
            .bytes()
            .position(|b| b.is_ascii_whitespace())
            .unwrap_or(src.len());
        (src[..end].to_owned(), &src[end..])
    }
}

/// Discard everything through the matching close tag, case-insensitively.
/// A missing close tag discards the rest of the input.
fn skip_dropped_content<'a>(rest: &'a str, name: &str) -> &'a str {
    let needle = format!("</{name}");
    let needle_bytes = needle.as_bytes();
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i + needle_bytes.len() <= bytes.len() {
        if bytes[i..i + needle_bytes.len()].eq_ignore_ascii_case(needle_bytes) {
            let after = &rest[i + needle_bytes.len()..];
            return after.find('>').map_or("", |gt| &after[gt + 1..]);
        }
        i += 1;
    }
    ""
}

fn emit_tag(out: &mut String, tag: &Tag) {
    out.push('<');
    out.push_str(&tag.name);
    for (name, value) in &tag.attrs {
        if !ALLOWED_ATTRS.contains(&name.as_str()) {
            continue;
        }
        match value {
            None => {
                out.push(' ');
                out.push_str(name);
            }
            Some(value) => {
                if URL_ATTRS.contains(&name.as_str()) && is_script_url(value) {
                    continue;
                }
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                push_escaped_attr(out, value);
                out.push('"');
            }
        }
    }
    out.push('>');
}

fn push_escaped_attr(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            other => out.push(other),
        }
    }
}

/// Does this URL value resolve to the `javascript:` scheme once whitespace,
/// control characters, and character references are folded away?
fn is_script_url(value: &str) -> bool {
    let decoded = decode_entities(value);
    let compact: String = decoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace() && !c.is_ascii_control())
        .collect();
    compact.to_ascii_lowercase().starts_with("javascript:")
}

/// Minimal character-reference decoding for the scheme check. Unknown
/// references pass through unchanged; this never feeds emitted output.
fn decode_entities(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let Some(semi) = rest[1..].find(';').map(|i| i + 1) else {
            out.push_str(rest);
            return out;
        };
        match decode_entity(&rest[1..semi]) {
            Some(c) => out.push(c),
            None => out.push_str(&rest[..=semi]),
        }
        rest = &rest[semi + 1..];
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(num) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
        return u32::from_str_radix(num, 16).ok().and_then(char::from_u32);
    }
    if let Some(num) = entity.strip_prefix('#') {
        return num.parse::<u32>().ok().and_then(char::from_u32);
    }
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "colon" => Some(':'),
        "Tab" => Some('\t'),
        "NewLine" => Some('\n'),
        _ => None,
    }
}
