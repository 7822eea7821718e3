use super::*;

pub(crate) fn is_form_control(dom: &Dom, node_id: NodeId) -> bool {
    ["input", "select", "textarea", "button"]
        .iter()
        .any(|tag| dom.is_tag(node_id, tag))
}

/// The lowercased `type` attribute of an `<input>`, defaulting to `text`.
pub(crate) fn input_type(dom: &Dom, node_id: NodeId) -> Option<String> {
    if !dom.is_tag(node_id, "input") {
        return None;
    }
    Some(
        dom.attr(node_id, "type")
            .map(|kind| kind.to_ascii_lowercase())
            .unwrap_or_else(|| "text".to_string()),
    )
}

pub(crate) fn is_checkable_input(dom: &Dom, node_id: NodeId) -> bool {
    input_type(dom, node_id).is_some_and(|kind| kind == "checkbox" || kind == "radio")
}

pub(crate) fn is_file_input(dom: &Dom, node_id: NodeId) -> bool {
    input_type(dom, node_id).is_some_and(|kind| kind == "file")
}

/// Controls whose value the user edits as text.
pub(crate) fn is_text_entry_control(dom: &Dom, node_id: NodeId) -> bool {
    if dom.is_tag(node_id, "textarea") {
        return true;
    }
    input_type(dom, node_id).is_some_and(|kind| {
        !matches!(
            kind.as_str(),
            "checkbox" | "radio" | "file" | "submit" | "reset" | "button" | "image" | "hidden"
        )
    })
}

pub(crate) fn is_submit_control(dom: &Dom, node_id: NodeId) -> bool {
    if dom.is_tag(node_id, "button") {
        return dom
            .attr(node_id, "type")
            .map(|kind| kind.eq_ignore_ascii_case("submit"))
            .unwrap_or(true);
    }
    input_type(dom, node_id).is_some_and(|kind| kind == "submit" || kind == "image")
}

pub(crate) fn form_of(dom: &Dom, node_id: NodeId) -> Option<NodeId> {
    if dom.is_tag(node_id, "form") {
        return Some(node_id);
    }
    dom.find_ancestor_by_tag(node_id, "form")
}

pub(crate) fn form_controls(dom: &Dom, form: NodeId) -> Vec<NodeId> {
    let mut descendants = Vec::new();
    dom.collect_elements_descendants_dfs(form, &mut descendants);
    descendants
        .into_iter()
        .filter(|node| is_form_control(dom, *node))
        .collect()
}

fn is_successful_control(dom: &Dom, control: NodeId) -> bool {
    if dom.disabled(control) || dom.is_tag(control, "button") {
        return false;
    }
    if dom
        .attr(control, "name")
        .is_none_or(|name| name.is_empty())
    {
        return false;
    }
    match input_type(dom, control).as_deref() {
        Some("submit" | "reset" | "button" | "image" | "file") => false,
        Some("checkbox" | "radio") => dom.checked(control),
        _ => true,
    }
}

/// Name/value pairs a submission of `form` would carry, in tree order.
pub(crate) fn form_data_entries(dom: &Dom, form: NodeId) -> Result<Vec<(String, String)>> {
    let mut entries = Vec::new();
    for control in form_controls(dom, form) {
        if !is_successful_control(dom, control) {
            continue;
        }
        let name = dom.attr(control, "name").unwrap_or_default();
        if dom.is_tag(control, "select") && dom.selected_option(control).is_none() {
            continue;
        }
        let value = dom.value(control)?;
        entries.push((name, value));
    }
    Ok(entries)
}

pub(crate) fn encode_form_urlencoded(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                encode_form_urlencoded_component(name),
                encode_form_urlencoded_component(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_form_urlencoded_component(src: &str) -> String {
    let mut out = String::new();
    for b in src.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'*' | b'-' | b'.' | b'_') {
            out.push(b as char);
        } else if b == b' ' {
            out.push('+');
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}
