use super::*;

pub(crate) fn parse_html(html: &str) -> Result<Dom> {
    let mut dom = Dom::new();
    let root = dom.root;
    parse_into(&mut dom, root, html)?;
    dom.initialize_form_control_values(root)?;
    Ok(dom)
}

/// Parses `html` and appends the resulting nodes under `parent`.
pub(crate) fn parse_into(dom: &mut Dom, parent: NodeId, html: &str) -> Result<()> {
    let mut stack = vec![parent];
    let bytes = html.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        if starts_with_at(bytes, i, b"<!--") {
            let end = find_subslice(bytes, i + 4, b"-->")
                .ok_or_else(|| Error::HtmlParse("unclosed HTML comment".into()))?;
            i = end + 3;
            continue;
        }

        if bytes[i] == b'<' && bytes.get(i + 1).is_some_and(|b| *b == b'/') {
            let (tag, next) = parse_end_tag(html, i)?;
            i = next;
            // Stray end tags are ignored instead of unwinding the whole stack.
            if let Some(index) = (1..stack.len())
                .rev()
                .find(|index| dom.is_tag(stack[*index], &tag))
            {
                stack.truncate(index);
            }
            continue;
        }

        if bytes[i] == b'<' && bytes.get(i + 1).is_some_and(|b| *b == b'!') {
            i = parse_declaration_tag(html, i)?;
            continue;
        }

        if bytes[i] == b'<' && bytes.get(i + 1).is_some_and(|b| b.is_ascii_alphabetic()) {
            let (tag, attrs, self_closing, next) = parse_start_tag(html, i)?;
            i = next;

            close_optional_start_tag(dom, &mut stack, &tag);

            let parent = *stack
                .last()
                .ok_or_else(|| Error::HtmlParse("missing parent element".into()))?;
            let node = dom.create_element(parent, &tag, attrs);

            if is_raw_text_tag(&tag) && !self_closing {
                let close = find_case_insensitive_end_tag(bytes, i, tag.as_bytes())
                    .ok_or_else(|| Error::HtmlParse(format!("unclosed <{tag}>")))?;
                let body = html
                    .get(i..close)
                    .ok_or_else(|| Error::HtmlParse(format!("invalid <{tag}> body")))?;
                let text = if tag == "script" || tag == "style" {
                    body.to_string()
                } else {
                    decode_html_character_references(body)
                };
                if !text.is_empty() {
                    dom.create_text(node, text);
                }
                let (_, after_end) = parse_end_tag(html, close)?;
                i = after_end;
                continue;
            }

            if !self_closing && !is_void_tag(&tag) {
                stack.push(node);
            }
            continue;
        }

        let text_start = i;
        i += 1;
        while i < bytes.len() && bytes[i] != b'<' {
            i += 1;
        }

        let text = html
            .get(text_start..i)
            .ok_or_else(|| Error::HtmlParse("invalid text node".into()))?;
        let decoded = decode_html_character_references(text);
        if !decoded.is_empty() {
            let parent = *stack
                .last()
                .ok_or_else(|| Error::HtmlParse("missing parent element".into()))?;
            dom.create_text(parent, decoded);
        }
    }

    Ok(())
}

fn close_optional_start_tag(dom: &Dom, stack: &mut Vec<NodeId>, tag: &str) {
    // (tag that closes, open tag being closed, open tags that stop the search)
    let rules: &[(&[&str], &str, &[&str])] = &[
        (&["li"], "li", &["ol", "ul", "menu"]),
        (&["option", "optgroup"], "option", &["optgroup", "select", "datalist"]),
        (&["dt", "dd"], "dt", &["dl"]),
        (&["dt", "dd"], "dd", &["dl"]),
    ];

    for (openers, closes, boundaries) in rules {
        if !openers.contains(&tag) {
            continue;
        }
        for index in (1..stack.len()).rev() {
            let Some(open_tag) = dom.tag_name(stack[index]) else {
                continue;
            };
            if open_tag == *closes {
                stack.truncate(index);
                break;
            }
            if boundaries.contains(&open_tag) {
                break;
            }
        }
    }

    if is_optional_paragraph_terminator_tag(tag) {
        if let Some(index) = (1..stack.len()).rev().find(|index| dom.is_tag(stack[*index], "p")) {
            stack.truncate(index);
        }
    }
}

fn is_optional_paragraph_terminator_tag(tag: &str) -> bool {
    matches!(
        tag,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "div"
            | "dl"
            | "fieldset"
            | "footer"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "main"
            | "nav"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "table"
            | "ul"
    )
}

fn is_raw_text_tag(tag: &str) -> bool {
    matches!(tag, "script" | "style" | "textarea" | "title")
}

pub(crate) fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

type StartTag = (String, Vec<(String, String)>, bool, usize);

fn parse_start_tag(html: &str, at: usize) -> Result<StartTag> {
    let bytes = html.as_bytes();
    let mut i = at;
    if bytes.get(i) != Some(&b'<') {
        return Err(Error::HtmlParse("expected '<'".into()));
    }
    i += 1;

    let tag_start = i;
    while i < bytes.len() && is_tag_char(bytes[i]) {
        i += 1;
    }
    let tag = html
        .get(tag_start..i)
        .ok_or_else(|| Error::HtmlParse("invalid tag name".into()))?
        .to_ascii_lowercase();
    if tag.is_empty() {
        return Err(Error::HtmlParse("empty tag name".into()));
    }

    let mut attrs: Vec<(String, String)> = Vec::new();
    let mut self_closing = false;

    loop {
        skip_ws(bytes, &mut i);
        if i >= bytes.len() {
            return Err(Error::HtmlParse(format!("unclosed start tag <{tag}>")));
        }

        if bytes[i] == b'>' {
            i += 1;
            break;
        }

        if bytes[i] == b'/' && bytes.get(i + 1) == Some(&b'>') {
            self_closing = true;
            i += 2;
            break;
        }

        if !is_attr_name_char(bytes[i]) {
            // Skip junk such as a stray quote or slash and keep going.
            i += 1;
            continue;
        }

        let name_start = i;
        while i < bytes.len() && is_attr_name_char(bytes[i]) {
            i += 1;
        }
        let name = html
            .get(name_start..i)
            .ok_or_else(|| Error::HtmlParse("invalid attribute name".into()))?
            .to_ascii_lowercase();

        skip_ws(bytes, &mut i);
        let value = if bytes.get(i) == Some(&b'=') {
            i += 1;
            skip_ws(bytes, &mut i);
            parse_attr_value(html, bytes, &mut i)?
        } else {
            String::new()
        };

        // First occurrence wins, as in browsers.
        if !attrs.iter().any(|(existing, _)| existing == &name) {
            attrs.push((name, value));
        }
    }

    Ok((tag, attrs, self_closing, i))
}

fn parse_declaration_tag(html: &str, at: usize) -> Result<usize> {
    let bytes = html.as_bytes();
    let mut i = at + 2;
    let mut quote: Option<u8> = None;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'\'' || b == b'"' => quote = Some(b),
            None if b == b'>' => return Ok(i + 1),
            None => {}
        }
        i += 1;
    }

    Err(Error::HtmlParse("unclosed declaration tag".into()))
}

fn parse_end_tag(html: &str, at: usize) -> Result<(String, usize)> {
    let bytes = html.as_bytes();
    if !(bytes.get(at) == Some(&b'<') && bytes.get(at + 1) == Some(&b'/')) {
        return Err(Error::HtmlParse("expected end tag".into()));
    }
    let mut i = at + 2;
    skip_ws(bytes, &mut i);

    let tag_start = i;
    while i < bytes.len() && is_tag_char(bytes[i]) {
        i += 1;
    }
    let tag = html
        .get(tag_start..i)
        .ok_or_else(|| Error::HtmlParse("invalid end tag".into()))?
        .to_ascii_lowercase();

    while i < bytes.len() && bytes[i] != b'>' {
        i += 1;
    }
    if i >= bytes.len() {
        return Err(Error::HtmlParse("unclosed end tag".into()));
    }

    Ok((tag, i + 1))
}

fn parse_attr_value(html: &str, bytes: &[u8], i: &mut usize) -> Result<String> {
    if *i >= bytes.len() {
        return Err(Error::HtmlParse("missing attribute value".into()));
    }

    if bytes[*i] == b'\'' || bytes[*i] == b'"' {
        let quote = bytes[*i];
        *i += 1;
        let start = *i;
        while *i < bytes.len() && bytes[*i] != quote {
            *i += 1;
        }
        if *i >= bytes.len() {
            return Err(Error::HtmlParse("unclosed quoted attribute value".into()));
        }
        let value = html
            .get(start..*i)
            .ok_or_else(|| Error::HtmlParse("invalid attribute value".into()))?;
        *i += 1;
        return Ok(decode_html_character_references(value));
    }

    let start = *i;
    while *i < bytes.len() && !bytes[*i].is_ascii_whitespace() && bytes[*i] != b'>' {
        *i += 1;
    }
    let value = html
        .get(start..*i)
        .ok_or_else(|| Error::HtmlParse("invalid attribute value".into()))?;
    Ok(decode_html_character_references(value))
}

fn decode_html_character_references(src: &str) -> String {
    if !src.contains('&') {
        return src.to_string();
    }

    fn decode_numeric(value: &str) -> Option<char> {
        let codepoint = match value.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => value.parse::<u32>().ok()?,
        };
        char::from_u32(codepoint)
    }

    fn decode_named(value: &str) -> Option<char> {
        match value {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some('\u{00A0}'),
            "copy" => Some('©'),
            "reg" => Some('®'),
            "trade" => Some('™'),
            "hellip" => Some('…'),
            "middot" => Some('·'),
            "ndash" => Some('–'),
            "mdash" => Some('—'),
            "larr" => Some('←'),
            "rarr" => Some('→'),
            "times" => Some('×'),
            _ => None,
        }
    }

    let mut out = String::with_capacity(src.len());
    let mut rest = src;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let decoded = tail.find(';').and_then(|semi| {
            let raw = &tail[..semi];
            let ch = match raw.strip_prefix('#') {
                Some(numeric) => decode_numeric(numeric),
                None => decode_named(raw),
            }?;
            Some((ch, semi + 1))
        });
        match decoded {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

fn skip_ws(bytes: &[u8], i: &mut usize) {
    while *i < bytes.len() && bytes[*i].is_ascii_whitespace() {
        *i += 1;
    }
}

fn is_tag_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

fn is_attr_name_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':' || b == b'@' || b == b'.'
}

fn starts_with_at(bytes: &[u8], at: usize, needle: &[u8]) -> bool {
    bytes
        .get(at..at + needle.len())
        .is_some_and(|window| window == needle)
}

fn find_subslice(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || from > bytes.len() {
        return None;
    }
    bytes[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| from + pos)
}

fn find_case_insensitive_end_tag(bytes: &[u8], from: usize, tag: &[u8]) -> Option<usize> {
    let mut i = from;
    while i + 2 + tag.len() <= bytes.len() {
        if bytes[i] == b'<'
            && bytes[i + 1] == b'/'
            && bytes[i + 2..i + 2 + tag.len()].eq_ignore_ascii_case(tag)
        {
            let after = bytes.get(i + 2 + tag.len());
            if after.is_none_or(|b| b.is_ascii_whitespace() || *b == b'>') {
                return Some(i);
            }
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_tree_with_void_and_optional_tags() -> Result<()> {
        let dom = parse_html(
            "<ul><li>one<li>two</ul><p>para<div>block</div><input name=q value=x><br/>",
        )?;
        assert_eq!(dom.query_selector_all("ul > li")?.len(), 2);
        let div = dom.query_selector("div")?.expect("div");
        assert!(dom.parent(div) == Some(dom.root));
        let input = dom.query_selector("input")?.expect("input");
        assert_eq!(dom.value(input)?, "x");
        Ok(())
    }

    #[test]
    fn decodes_entities_in_text_and_attributes() -> Result<()> {
        let dom = parse_html(
            r#"<a href="/a?x=1&amp;y=2" title="&quot;hi&quot;">Tom &amp; Jerry &#8369; &unknown; &</a>"#,
        )?;
        let link = dom.query_selector("a")?.expect("a");
        assert_eq!(dom.attr(link, "href").as_deref(), Some("/a?x=1&y=2"));
        assert_eq!(dom.attr(link, "title").as_deref(), Some("\"hi\""));
        assert_eq!(dom.text_content(link), "Tom & Jerry ₱ &unknown; &");
        Ok(())
    }

    #[test]
    fn keeps_script_and_textarea_bodies_as_text() -> Result<()> {
        let dom = parse_html(
            "<script>if (a < b) { go('</div>'); }</script><textarea name='notes'>a &lt; b</textarea>",
        )?;
        let script = dom.query_selector("script")?.expect("script");
        assert_eq!(dom.text_content(script), "if (a < b) { go('</div>'); }");
        let notes = dom.query_selector("textarea")?.expect("textarea");
        assert_eq!(dom.value(notes)?, "a < b");
        Ok(())
    }

    #[test]
    fn stray_end_tag_does_not_close_open_elements() -> Result<()> {
        let dom = parse_html("<div class='card'></span><p>x</p></div>")?;
        assert_eq!(dom.query_selector_all(".card > p")?.len(), 1);
        Ok(())
    }

    #[test]
    fn reports_unclosed_markup() {
        assert!(matches!(parse_html("<div"), Err(Error::HtmlParse(_))));
        assert!(matches!(parse_html("<!-- open"), Err(Error::HtmlParse(_))));
        assert!(matches!(parse_html("<script>x"), Err(Error::HtmlParse(_))));
    }
}
