use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectorAttrCondition {
    Exists { key: String },
    Eq { key: String, value: String },
    StartsWith { key: String, value: String },
    EndsWith { key: String, value: String },
    Contains { key: String, value: String },
    Includes { key: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SelectorPseudoClass {
    FirstChild,
    LastChild,
    Checked,
    Disabled,
    Enabled,
    Required,
    Not(Vec<Vec<SelectorPart>>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SelectorStep {
    pub(crate) tag: Option<String>,
    pub(crate) universal: bool,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attrs: Vec<SelectorAttrCondition>,
    pub(crate) pseudo_classes: Vec<SelectorPseudoClass>,
}

impl SelectorStep {
    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.attrs.is_empty()
            && !self.universal
            && self.pseudo_classes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SelectorCombinator {
    Descendant,
    Child,
    AdjacentSibling,
    GeneralSibling,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorPart {
    pub(crate) step: SelectorStep,
    // Relation to previous (left) selector part.
    pub(crate) combinator: Option<SelectorCombinator>,
}

pub(crate) fn parse_selector_chain(selector: &str) -> Result<Vec<SelectorPart>> {
    let selector = selector.trim();
    if selector.is_empty() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }

    let tokens = tokenize_selector(selector)?;
    let mut steps = Vec::new();
    let mut pending_combinator: Option<SelectorCombinator> = None;

    for token in tokens {
        let combinator = match token.as_str() {
            ">" => Some(SelectorCombinator::Child),
            "+" => Some(SelectorCombinator::AdjacentSibling),
            "~" => Some(SelectorCombinator::GeneralSibling),
            _ => None,
        };
        if let Some(combinator) = combinator {
            if pending_combinator.is_some() || steps.is_empty() {
                return Err(Error::UnsupportedSelector(selector.into()));
            }
            pending_combinator = Some(combinator);
            continue;
        }

        let step = parse_selector_step(&token)?;
        let combinator = if steps.is_empty() {
            None
        } else {
            Some(
                pending_combinator
                    .take()
                    .unwrap_or(SelectorCombinator::Descendant),
            )
        };
        steps.push(SelectorPart { step, combinator });
    }

    if steps.is_empty() || pending_combinator.is_some() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }

    Ok(steps)
}

pub(crate) fn parse_selector_groups(selector: &str) -> Result<Vec<Vec<SelectorPart>>> {
    split_selector_groups(selector)?
        .iter()
        .map(|group| parse_selector_chain(group))
        .collect()
}

/// Tracks `[...]` and `(...)` nesting while walking a selector.
#[derive(Default)]
struct Nesting {
    brackets: usize,
    parens: usize,
}

impl Nesting {
    fn feed(&mut self, ch: char, selector: &str) -> Result<()> {
        match ch {
            '[' => self.brackets += 1,
            ']' => {
                self.brackets = self
                    .brackets
                    .checked_sub(1)
                    .ok_or_else(|| Error::UnsupportedSelector(selector.into()))?;
            }
            '(' => self.parens += 1,
            ')' => {
                self.parens = self
                    .parens
                    .checked_sub(1)
                    .ok_or_else(|| Error::UnsupportedSelector(selector.into()))?;
            }
            _ => {}
        }
        Ok(())
    }

    fn top_level(&self) -> bool {
        self.brackets == 0 && self.parens == 0
    }
}

pub(crate) fn split_selector_groups(selector: &str) -> Result<Vec<String>> {
    let mut groups = Vec::new();
    let mut current = String::new();
    let mut nesting = Nesting::default();

    for ch in selector.chars() {
        if ch == ',' && nesting.top_level() {
            let trimmed = current.trim();
            if trimmed.is_empty() {
                return Err(Error::UnsupportedSelector(selector.into()));
            }
            groups.push(trimmed.to_string());
            current.clear();
            continue;
        }
        nesting.feed(ch, selector)?;
        current.push(ch);
    }

    let trimmed = current.trim();
    if !nesting.top_level() || trimmed.is_empty() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }
    groups.push(trimmed.to_string());
    Ok(groups)
}

pub(crate) fn tokenize_selector(selector: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut nesting = Nesting::default();

    let flush = |current: &mut String, tokens: &mut Vec<String>| {
        if !current.trim().is_empty() {
            tokens.push(current.trim().to_string());
        }
        current.clear();
    };

    for ch in selector.chars() {
        match ch {
            '>' | '+' | '~' if nesting.top_level() => {
                flush(&mut current, &mut tokens);
                tokens.push(ch.to_string());
            }
            ch if ch.is_ascii_whitespace() && nesting.top_level() => {
                flush(&mut current, &mut tokens);
            }
            _ => {
                nesting.feed(ch, selector)?;
                current.push(ch);
            }
        }
    }

    if !nesting.top_level() {
        return Err(Error::UnsupportedSelector(selector.into()));
    }
    flush(&mut current, &mut tokens);
    Ok(tokens)
}

pub(crate) fn parse_selector_step(part: &str) -> Result<SelectorStep> {
    let part = part.trim();
    if part.is_empty() {
        return Err(Error::UnsupportedSelector(part.into()));
    }

    let bytes = part.as_bytes();
    let mut i = 0usize;
    let mut step = SelectorStep::default();

    while i < bytes.len() {
        match bytes[i] {
            b'*' => {
                if step.universal {
                    return Err(Error::UnsupportedSelector(part.into()));
                }
                step.universal = true;
                i += 1;
            }
            b'#' => {
                let Some((id, next)) = parse_selector_ident(part, i + 1) else {
                    return Err(Error::UnsupportedSelector(part.into()));
                };
                if step.id.replace(id).is_some() {
                    return Err(Error::UnsupportedSelector(part.into()));
                }
                i = next;
            }
            b'.' => {
                let Some((class_name, next)) = parse_selector_ident(part, i + 1) else {
                    return Err(Error::UnsupportedSelector(part.into()));
                };
                step.classes.push(class_name);
                i = next;
            }
            b'[' => {
                let (attr, next) = parse_selector_attr_condition(part, i)?;
                step.attrs.push(attr);
                i = next;
            }
            b':' => {
                let (pseudo, next) = parse_selector_pseudo(part, i)?;
                step.pseudo_classes.push(pseudo);
                i = next;
            }
            _ => {
                if !step.is_empty() {
                    return Err(Error::UnsupportedSelector(part.into()));
                }
                let Some((tag, next)) = parse_selector_ident(part, i) else {
                    return Err(Error::UnsupportedSelector(part.into()));
                };
                step.tag = Some(tag.to_ascii_lowercase());
                i = next;
            }
        }
    }

    if step.is_empty() {
        return Err(Error::UnsupportedSelector(part.into()));
    }
    Ok(step)
}

fn parse_selector_pseudo(part: &str, colon: usize) -> Result<(SelectorPseudoClass, usize)> {
    let unsupported = || Error::UnsupportedSelector(part.into());
    let (name, next) = parse_selector_ident(part, colon + 1).ok_or_else(unsupported)?;
    let pseudo = match name.to_ascii_lowercase().as_str() {
        "first-child" => SelectorPseudoClass::FirstChild,
        "last-child" => SelectorPseudoClass::LastChild,
        "checked" => SelectorPseudoClass::Checked,
        "disabled" => SelectorPseudoClass::Disabled,
        "enabled" => SelectorPseudoClass::Enabled,
        "required" => SelectorPseudoClass::Required,
        "not" => {
            let rest = part.get(next..).ok_or_else(unsupported)?;
            if !rest.starts_with('(') {
                return Err(unsupported());
            }
            let close = find_matching_paren(rest).ok_or_else(unsupported)?;
            let inner = rest.get(1..close).ok_or_else(unsupported)?;
            let groups = parse_selector_groups(inner)?;
            return Ok((SelectorPseudoClass::Not(groups), next + close + 1));
        }
        _ => return Err(unsupported()),
    };
    Ok((pseudo, next))
}

fn find_matching_paren(body: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, ch) in body.char_indices() {
        match (quote, ch) {
            (Some(q), _) if ch == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(ch),
            (None, '(') => depth += 1,
            (None, ')') => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn parse_selector_ident(src: &str, start: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    if start >= bytes.len() || !is_selector_ident_char(bytes[start]) {
        return None;
    }
    let mut end = start + 1;
    while end < bytes.len() && is_selector_ident_char(bytes[end]) {
        end += 1;
    }
    Some((src.get(start..end)?.to_string(), end))
}

fn is_selector_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn parse_selector_attr_condition(
    src: &str,
    open_bracket: usize,
) -> Result<(SelectorAttrCondition, usize)> {
    let unsupported = || Error::UnsupportedSelector(src.into());
    let bytes = src.as_bytes();

    let key_start = skip_whitespace(bytes, open_bracket + 1);
    let mut i = key_start;
    while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || matches!(bytes[i], b'_' | b'-')) {
        i += 1;
    }
    if key_start == i {
        return Err(unsupported());
    }
    let key = src.get(key_start..i).ok_or_else(unsupported)?.to_ascii_lowercase();

    i = skip_whitespace(bytes, i);
    match bytes.get(i) {
        Some(b']') => return Ok((SelectorAttrCondition::Exists { key }, i + 1)),
        None => return Err(unsupported()),
        _ => {}
    }

    let (op, after_op) = match (bytes.get(i), bytes.get(i + 1)) {
        (Some(b'='), _) => (b'=', i + 1),
        (Some(op @ (b'^' | b'$' | b'*' | b'~')), Some(b'=')) => (*op, i + 2),
        _ => return Err(unsupported()),
    };

    let (value, after_value) = parse_selector_attr_value(src, skip_whitespace(bytes, after_op))?;
    let close = skip_whitespace(bytes, after_value);
    if bytes.get(close) != Some(&b']') {
        return Err(unsupported());
    }

    let cond = match op {
        b'^' => SelectorAttrCondition::StartsWith { key, value },
        b'$' => SelectorAttrCondition::EndsWith { key, value },
        b'*' => SelectorAttrCondition::Contains { key, value },
        b'~' => SelectorAttrCondition::Includes { key, value },
        _ => SelectorAttrCondition::Eq { key, value },
    };
    Ok((cond, close + 1))
}

fn parse_selector_attr_value(src: &str, start: usize) -> Result<(String, usize)> {
    let unsupported = || Error::UnsupportedSelector(src.into());
    let bytes = src.as_bytes();
    let Some(&first) = bytes.get(start) else {
        return Err(unsupported());
    };

    if first == b'"' || first == b'\'' {
        let close = bytes[start + 1..]
            .iter()
            .position(|b| *b == first)
            .map(|offset| start + 1 + offset)
            .ok_or_else(unsupported)?;
        let raw = src.get(start + 1..close).ok_or_else(unsupported)?;
        return Ok((raw.to_string(), close + 1));
    }

    let mut i = start;
    while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b']' {
        i += 1;
    }
    let raw = src.get(start..i).ok_or_else(unsupported)?;
    Ok((raw.to_string(), i))
}

impl Dom {
    pub(crate) fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all(selector)?.into_iter().next())
    }

    pub(crate) fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        self.query_selector_all_from(self.root, selector)
    }

    pub(crate) fn query_selector_from(
        &self,
        root: NodeId,
        selector: &str,
    ) -> Result<Option<NodeId>> {
        Ok(self.query_selector_all_from(root, selector)?.into_iter().next())
    }

    pub(crate) fn query_selector_all_from(
        &self,
        root: NodeId,
        selector: &str,
    ) -> Result<Vec<NodeId>> {
        let groups = parse_selector_groups(selector)?;

        let mut ids = Vec::new();
        self.collect_elements_descendants_dfs(root, &mut ids);

        Ok(ids
            .into_iter()
            .filter(|candidate| {
                groups
                    .iter()
                    .any(|steps| self.matches_selector_chain(*candidate, steps))
            })
            .collect())
    }

    pub(crate) fn matches_selector(&self, node_id: NodeId, selector: &str) -> Result<bool> {
        if self.element(node_id).is_none() {
            return Ok(false);
        }
        let groups = parse_selector_groups(selector)?;
        Ok(groups
            .iter()
            .any(|steps| self.matches_selector_chain(node_id, steps)))
    }

    pub(crate) fn closest(&self, node_id: NodeId, selector: &str) -> Result<Option<NodeId>> {
        let groups = parse_selector_groups(selector)?;
        let mut cursor = Some(node_id);
        while let Some(current) = cursor {
            if groups
                .iter()
                .any(|steps| self.matches_selector_chain(current, steps))
            {
                return Ok(Some(current));
            }
            cursor = self.parent_element(current);
        }
        Ok(None)
    }

    fn element_siblings(&self, node_id: NodeId) -> Vec<NodeId> {
        self.parent(node_id)
            .map(|parent| {
                self.nodes[parent.0]
                    .children
                    .iter()
                    .copied()
                    .filter(|child| self.element(*child).is_some())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn previous_element_sibling(&self, node_id: NodeId) -> Option<NodeId> {
        let siblings = self.element_siblings(node_id);
        let pos = siblings.iter().position(|id| *id == node_id)?;
        pos.checked_sub(1).map(|prev| siblings[prev])
    }

    pub(crate) fn matches_selector_chain(&self, node_id: NodeId, steps: &[SelectorPart]) -> bool {
        let Some(last) = steps.last() else {
            return false;
        };
        if !self.matches_step(node_id, &last.step) {
            return false;
        }

        let mut current = node_id;
        for idx in (1..steps.len()).rev() {
            let prev_step = &steps[idx - 1].step;
            let combinator = steps[idx]
                .combinator
                .unwrap_or(SelectorCombinator::Descendant);

            let matched = match combinator {
                SelectorCombinator::Child => self
                    .parent(current)
                    .filter(|parent| self.matches_step(*parent, prev_step)),
                SelectorCombinator::Descendant => {
                    let mut cursor = self.parent(current);
                    let mut found = None;
                    while let Some(parent) = cursor {
                        if self.matches_step(parent, prev_step) {
                            found = Some(parent);
                            break;
                        }
                        cursor = self.parent(parent);
                    }
                    found
                }
                SelectorCombinator::AdjacentSibling => self
                    .previous_element_sibling(current)
                    .filter(|sibling| self.matches_step(*sibling, prev_step)),
                SelectorCombinator::GeneralSibling => {
                    let mut cursor = self.previous_element_sibling(current);
                    let mut found = None;
                    while let Some(sibling) = cursor {
                        if self.matches_step(sibling, prev_step) {
                            found = Some(sibling);
                            break;
                        }
                        cursor = self.previous_element_sibling(sibling);
                    }
                    found
                }
            };

            let Some(matched) = matched else {
                return false;
            };
            current = matched;
        }

        true
    }

    pub(crate) fn matches_step(&self, node_id: NodeId, step: &SelectorStep) -> bool {
        let Some(element) = self.element(node_id) else {
            return false;
        };

        if let Some(tag) = &step.tag {
            if !element.tag_name.eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        if let Some(id) = &step.id {
            if element.attr("id") != Some(id.as_str()) {
                return false;
            }
        }

        if step
            .classes
            .iter()
            .any(|class_name| !element.has_class(class_name))
        {
            return false;
        }

        let attrs_match = step.attrs.iter().all(|cond| match cond {
            SelectorAttrCondition::Exists { key } => element.has_attr(key),
            SelectorAttrCondition::Eq { key, value } => element.attr(key) == Some(value.as_str()),
            SelectorAttrCondition::StartsWith { key, value } => element
                .attr(key)
                .is_some_and(|attr| !value.is_empty() && attr.starts_with(value.as_str())),
            SelectorAttrCondition::EndsWith { key, value } => element
                .attr(key)
                .is_some_and(|attr| !value.is_empty() && attr.ends_with(value.as_str())),
            SelectorAttrCondition::Contains { key, value } => element
                .attr(key)
                .is_some_and(|attr| !value.is_empty() && attr.contains(value.as_str())),
            SelectorAttrCondition::Includes { key, value } => element
                .attr(key)
                .is_some_and(|attr| attr.split_whitespace().any(|token| token == value)),
        });
        if !attrs_match {
            return false;
        }

        step.pseudo_classes.iter().all(|pseudo| match pseudo {
            SelectorPseudoClass::FirstChild => {
                self.element_siblings(node_id).first() == Some(&node_id)
            }
            SelectorPseudoClass::LastChild => {
                self.element_siblings(node_id).last() == Some(&node_id)
            }
            SelectorPseudoClass::Checked => element.checked,
            SelectorPseudoClass::Disabled => element.disabled,
            SelectorPseudoClass::Enabled => !element.disabled,
            SelectorPseudoClass::Required => element.required,
            SelectorPseudoClass::Not(groups) => !groups
                .iter()
                .any(|steps| self.matches_selector_chain(node_id, steps)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_attribute_operators_and_groups() -> Result<()> {
        let groups = parse_selector_groups(
            r#"input[required], select[required], a[href*="/delete/"]"#,
        )?;
        assert_eq!(groups.len(), 3);
        assert_eq!(
            groups[2][0].step.attrs,
            vec![SelectorAttrCondition::Contains {
                key: "href".into(),
                value: "/delete/".into()
            }]
        );
        Ok(())
    }

    #[test]
    fn rejects_dangling_combinator_and_unknown_pseudo() {
        assert!(matches!(
            parse_selector_chain("form >"),
            Err(Error::UnsupportedSelector(_))
        ));
        assert!(matches!(
            parse_selector_chain("input:hover"),
            Err(Error::UnsupportedSelector(_))
        ));
        assert!(matches!(
            split_selector_groups("a,,b"),
            Err(Error::UnsupportedSelector(_))
        ));
    }

    #[test]
    fn matches_descendant_child_and_pseudo_classes() -> Result<()> {
        let dom = html::parse_html(
            r#"<form class="filter-form">
                 <div><input name="search" required></div>
                 <input type="checkbox" name="furnished" checked>
                 <button type="submit" disabled>Go</button>
               </form>"#,
        )?;
        assert_eq!(dom.query_selector_all(".filter-form input")?.len(), 2);
        assert_eq!(dom.query_selector_all(".filter-form > input")?.len(), 1);
        assert_eq!(dom.query_selector_all("input:required")?.len(), 1);
        assert_eq!(dom.query_selector_all("input:checked")?.len(), 1);
        assert_eq!(dom.query_selector_all("button:disabled")?.len(), 1);
        assert_eq!(dom.query_selector_all("input:not([type=checkbox])")?.len(), 1);
        let search = dom.query_selector(r#"input[name="search"]"#)?.expect("search");
        assert_eq!(dom.closest(search, "form")?, dom.query_selector("form")?);
        Ok(())
    }
}
