use super::*;
use crate::platform::MockFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeType {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) node_type: NodeType,
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag_name: String,
    // Source order is kept so serialization is stable.
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) value: String,
    pub(crate) checked: bool,
    pub(crate) disabled: bool,
    pub(crate) readonly: bool,
    pub(crate) required: bool,
    pub(crate) files: Vec<MockFile>,
    // Select whose value was set to something no option carries.
    pub(crate) selection_cleared: bool,
}

impl Element {
    pub(crate) fn new(tag_name: &str, attrs: Vec<(String, String)>) -> Self {
        let lookup = |name: &str| attrs.iter().find(|(key, _)| key == name).map(|(_, v)| v);
        let value = lookup("value").cloned().unwrap_or_default();
        let checked = lookup("checked").is_some();
        let disabled = lookup("disabled").is_some();
        let readonly = lookup("readonly").is_some();
        let required = lookup("required").is_some();
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs,
            value,
            checked,
            disabled,
            readonly,
            required,
            files: Vec::new(),
            selection_cleared: false,
        }
    }

    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub(crate) fn is_checkable(&self) -> bool {
        self.tag_name == "input"
            && self.attr("type").is_some_and(|kind| {
                kind.eq_ignore_ascii_case("checkbox") || kind.eq_ignore_ascii_case("radio")
            })
    }

    pub(crate) fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|(key, _)| key == name)
    }

    fn insert_attr(&mut self, name: &str, value: &str) {
        if let Some(slot) = self.attrs.iter_mut().find(|(key, _)| key == name) {
            slot.1 = value.to_string();
        } else {
            self.attrs.push((name.to_string(), value.to_string()));
        }
    }

    fn drop_attr(&mut self, name: &str) {
        self.attrs.retain(|(key, _)| key != name);
    }

    pub(crate) fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class_name))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Dom {
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
}

impl Dom {
    pub(crate) fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub(crate) fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    pub(crate) fn create_element(
        &mut self,
        parent: NodeId,
        tag_name: &str,
        attrs: Vec<(String, String)>,
    ) -> NodeId {
        self.create_node(
            Some(parent),
            NodeType::Element(Element::new(tag_name, attrs)),
        )
    }

    pub(crate) fn create_detached_element(&mut self, tag_name: &str) -> NodeId {
        self.create_node(None, NodeType::Element(Element::new(tag_name, Vec::new())))
    }

    pub(crate) fn create_text(&mut self, parent: NodeId, text: String) -> NodeId {
        self.create_node(Some(parent), NodeType::Text(text))
    }

    pub(crate) fn element(&self, node_id: NodeId) -> Option<&Element> {
        match &self.nodes.get(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    pub(crate) fn element_mut(&mut self, node_id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes.get_mut(node_id.0)?.node_type {
            NodeType::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_or_err(&self, node_id: NodeId, what: &str) -> Result<&Element> {
        self.element(node_id)
            .ok_or_else(|| Error::Runtime(format!("{what} target is not an element")))
    }

    fn element_mut_or_err(&mut self, node_id: NodeId, what: &str) -> Result<&mut Element> {
        self.element_mut(node_id)
            .ok_or_else(|| Error::Runtime(format!("{what} target is not an element")))
    }

    pub(crate) fn tag_name(&self, node_id: NodeId) -> Option<&str> {
        self.element(node_id).map(|e| e.tag_name.as_str())
    }

    pub(crate) fn is_tag(&self, node_id: NodeId, tag: &str) -> bool {
        self.tag_name(node_id)
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
    }

    pub(crate) fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.nodes.get(node_id.0).and_then(|node| node.parent)
    }

    pub(crate) fn parent_element(&self, node_id: NodeId) -> Option<NodeId> {
        self.parent(node_id)
            .filter(|parent| self.element(*parent).is_some())
    }

    pub(crate) fn is_connected(&self, node_id: NodeId) -> bool {
        let mut cursor = Some(node_id);
        while let Some(current) = cursor {
            if current == self.root {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    pub(crate) fn find_ancestor_by_tag(&self, node_id: NodeId, tag: &str) -> Option<NodeId> {
        let mut cursor = self.parent(node_id);
        while let Some(current) = cursor {
            if self.is_tag(current, tag) {
                return Some(current);
            }
            cursor = self.parent(current);
        }
        None
    }

    pub(crate) fn collect_elements_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        let mut stack = vec![node_id];
        while let Some(node) = stack.pop() {
            if matches!(self.nodes[node.0].node_type, NodeType::Element(_)) {
                out.push(node);
            }
            for child in self.nodes[node.0].children.iter().rev() {
                stack.push(*child);
            }
        }
    }

    pub(crate) fn collect_elements_descendants_dfs(&self, node_id: NodeId, out: &mut Vec<NodeId>) {
        for child in &self.nodes[node_id.0].children {
            self.collect_elements_dfs(*child, out);
        }
    }

    pub(crate) fn text_content(&self, node_id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![node_id];
        while let Some(node) = stack.pop() {
            match &self.nodes[node.0].node_type {
                NodeType::Text(text) => out.push_str(text),
                NodeType::Document | NodeType::Element(_) => {
                    for child in self.nodes[node.0].children.iter().rev() {
                        stack.push(*child);
                    }
                }
            }
        }
        out
    }

    pub(crate) fn set_text_content(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        self.element_or_err(node_id, "textContent")?;
        self.detach_children(node_id);
        if !value.is_empty() {
            self.create_text(node_id, value.to_string());
        }
        Ok(())
    }

    pub(crate) fn set_inner_html(&mut self, node_id: NodeId, markup: &str) -> Result<()> {
        self.element_or_err(node_id, "innerHTML")?;
        self.detach_children(node_id);
        html::parse_into(self, node_id, markup)?;
        self.initialize_form_control_values(node_id)
    }

    fn detach_children(&mut self, node_id: NodeId) {
        let old_children = std::mem::take(&mut self.nodes[node_id.0].children);
        for child in old_children {
            self.nodes[child.0].parent = None;
        }
    }

    pub(crate) fn initialize_form_control_values(&mut self, scope: NodeId) -> Result<()> {
        let mut nodes = Vec::new();
        self.collect_elements_dfs(scope, &mut nodes);
        for node in nodes {
            if self.is_tag(node, "textarea") {
                let text = self.text_content(node);
                self.element_mut_or_err(node, "textarea")?.value = text;
            } else if self.is_tag(node, "select") {
                self.sync_select_value(node)?;
            }
        }
        Ok(())
    }

    /// Current value; checkboxes and radios report their `value` attribute, or `on`.
    pub(crate) fn value(&self, node_id: NodeId) -> Result<String> {
        let element = self.element_or_err(node_id, "value")?;
        if element.is_checkable() {
            return Ok(element.attr("value").unwrap_or("on").to_string());
        }
        Ok(element.value.clone())
    }

    pub(crate) fn set_value(&mut self, node_id: NodeId, value: &str) -> Result<()> {
        if self.is_tag(node_id, "select") {
            return self.set_select_value(node_id, value);
        }
        let element = self.element_mut_or_err(node_id, "value")?;
        if element.is_checkable() {
            element.insert_attr("value", value);
        }
        element.value = value.to_string();
        Ok(())
    }

    pub(crate) fn select_options(&self, select_node: NodeId) -> Vec<NodeId> {
        let mut descendants = Vec::new();
        self.collect_elements_descendants_dfs(select_node, &mut descendants);
        descendants
            .into_iter()
            .filter(|node| self.is_tag(*node, "option"))
            .collect()
    }

    pub(crate) fn option_value(&self, option_node: NodeId) -> String {
        match self.element(option_node).and_then(|e| e.attr("value")) {
            Some(value) => value.to_string(),
            None => self.option_text(option_node),
        }
    }

    /// Label text with whitespace collapsed, as `HTMLOptionElement.text` reports it.
    pub(crate) fn option_text(&self, option_node: NodeId) -> String {
        self.text_content(option_node)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The option marked `selected`, else the first one unless the selection was cleared.
    pub(crate) fn selected_option(&self, select_node: NodeId) -> Option<NodeId> {
        let options = self.select_options(select_node);
        let marked = options
            .iter()
            .copied()
            .find(|option| self.element(*option).is_some_and(|e| e.has_attr("selected")));
        if marked.is_some() {
            return marked;
        }
        let cleared = self
            .element(select_node)
            .is_some_and(|select| select.selection_cleared);
        if cleared { None } else { options.first().copied() }
    }

    pub(crate) fn set_select_value(&mut self, select_node: NodeId, requested: &str) -> Result<()> {
        if !self.is_tag(select_node, "select") {
            return Err(Error::Runtime("set value target is not a select".into()));
        }
        let options = self.select_options(select_node);
        let matched = options
            .iter()
            .copied()
            .find(|option| self.option_value(*option) == requested);

        for option in &options {
            let element = self.element_mut_or_err(*option, "option")?;
            if Some(*option) == matched {
                element.insert_attr("selected", "");
            } else {
                element.drop_attr("selected");
            }
        }

        let value = matched.map(|option| self.option_value(option));
        let select = self.element_mut_or_err(select_node, "select")?;
        select.selection_cleared = matched.is_none();
        select.value = value.unwrap_or_default();
        Ok(())
    }

    fn sync_select_value(&mut self, select_node: NodeId) -> Result<()> {
        let value = self
            .selected_option(select_node)
            .map(|option| self.option_value(option))
            .unwrap_or_default();
        self.element_mut_or_err(select_node, "select")?.value = value;
        Ok(())
    }

    pub(crate) fn checked(&self, node_id: NodeId) -> bool {
        self.element(node_id).is_some_and(|e| e.checked)
    }

    pub(crate) fn set_checked(&mut self, node_id: NodeId, checked: bool) -> Result<()> {
        self.element_mut_or_err(node_id, "checked")?.checked = checked;
        Ok(())
    }

    pub(crate) fn disabled(&self, node_id: NodeId) -> bool {
        self.element(node_id).is_some_and(|e| e.disabled)
    }

    pub(crate) fn set_disabled(&mut self, node_id: NodeId, disabled: bool) -> Result<()> {
        let element = self.element_mut_or_err(node_id, "disabled")?;
        element.disabled = disabled;
        if disabled {
            element.insert_attr("disabled", "");
        } else {
            element.drop_attr("disabled");
        }
        Ok(())
    }

    pub(crate) fn readonly(&self, node_id: NodeId) -> bool {
        self.element(node_id).is_some_and(|e| e.readonly)
    }

    pub(crate) fn files(&self, node_id: NodeId) -> &[MockFile] {
        self.element(node_id)
            .map(|e| e.files.as_slice())
            .unwrap_or_default()
    }

    pub(crate) fn set_files(&mut self, node_id: NodeId, files: &[MockFile]) -> Result<bool> {
        let element = self.element_mut_or_err(node_id, "files")?;
        if element.files == files {
            return Ok(false);
        }
        element.files = files.to_vec();
        element.value = files
            .first()
            .map(|file| format!("C:\\fakepath\\{}", file.name))
            .unwrap_or_default();
        Ok(true)
    }

    pub(crate) fn attr(&self, node_id: NodeId, name: &str) -> Option<String> {
        self.element(node_id)
            .and_then(|e| e.attr(name).map(str::to_string))
    }

    pub(crate) fn set_attr(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let lowered = name.to_ascii_lowercase();
        let is_option = {
            let element = self.element_mut_or_err(node_id, "setAttribute")?;
            element.insert_attr(&lowered, value);
            match lowered.as_str() {
                "value" => element.value = value.to_string(),
                "checked" => element.checked = true,
                "disabled" => element.disabled = true,
                "readonly" => element.readonly = true,
                "required" => element.required = true,
                _ => {}
            }
            element.tag_name == "option"
        };
        if is_option && (lowered == "selected" || lowered == "value") {
            if let Some(select) = self.find_ancestor_by_tag(node_id, "select") {
                if lowered == "selected" {
                    self.element_mut_or_err(select, "select")?.selection_cleared = false;
                }
                self.sync_select_value(select)?;
            }
        }
        Ok(())
    }

    pub(crate) fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if matches!(self.nodes[parent.0].node_type, NodeType::Text(_)) {
            return Err(Error::Runtime(
                "appendChild target cannot have children".into(),
            ));
        }
        if child == self.root || child == parent {
            return Err(Error::Runtime("invalid appendChild node".into()));
        }

        // Prevent cycles: parent must not be inside child's subtree.
        let mut cursor = Some(parent);
        while let Some(node) = cursor {
            if node == child {
                return Err(Error::Runtime("appendChild would create a cycle".into()));
            }
            cursor = self.parent(node);
        }

        if let Some(old_parent) = self.parent(child) {
            self.nodes[old_parent.0].children.retain(|id| *id != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    pub(crate) fn remove_node(&mut self, node: NodeId) -> Result<()> {
        if node == self.root {
            return Err(Error::Runtime("cannot remove document root".into()));
        }
        let Some(parent) = self.parent(node) else {
            return Ok(());
        };
        self.nodes[parent.0].children.retain(|id| *id != node);
        self.nodes[node.0].parent = None;
        Ok(())
    }

    pub(crate) fn class_contains(&self, node_id: NodeId, class_name: &str) -> bool {
        self.element(node_id)
            .is_some_and(|element| element.has_class(class_name))
    }

    pub(crate) fn class_add(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self.element_mut_or_err(node_id, "classList")?;
        let mut classes = class_tokens(element.attr("class"));
        if !classes.iter().any(|name| name == class_name) {
            classes.push(class_name.to_string());
        }
        set_class_attr(element, &classes);
        Ok(())
    }

    pub(crate) fn class_remove(&mut self, node_id: NodeId, class_name: &str) -> Result<()> {
        let element = self.element_mut_or_err(node_id, "classList")?;
        let mut classes = class_tokens(element.attr("class"));
        let before = classes.len();
        classes.retain(|name| name != class_name);
        if classes.len() != before {
            set_class_attr(element, &classes);
        }
        Ok(())
    }

    pub(crate) fn style_get(&self, node_id: NodeId, name: &str) -> String {
        let decls = parse_style_declarations(self.element(node_id).and_then(|e| e.attr("style")));
        decls
            .into_iter()
            .find(|(prop, _)| prop == name)
            .map(|(_, value)| value)
            .unwrap_or_default()
    }

    pub(crate) fn style_set(&mut self, node_id: NodeId, name: &str, value: &str) -> Result<()> {
        let element = self.element_mut_or_err(node_id, "style")?;
        let mut decls = parse_style_declarations(element.attr("style"));
        if let Some(pos) = decls.iter().position(|(prop, _)| prop == name) {
            if value.is_empty() {
                decls.remove(pos);
            } else {
                decls[pos].1 = value.to_string();
            }
        } else if !value.is_empty() {
            decls.push((name.to_string(), value.to_string()));
        }

        if decls.is_empty() {
            element.drop_attr("style");
        } else {
            element.insert_attr("style", &serialize_style_declarations(&decls));
        }
        Ok(())
    }

    pub(crate) fn dump_node(&self, node_id: NodeId) -> String {
        stacker::maybe_grow(64 * 1024, 2 * 1024 * 1024, || {
            match &self.nodes[node_id.0].node_type {
                NodeType::Document => self.nodes[node_id.0]
                    .children
                    .iter()
                    .map(|child| self.dump_node(*child))
                    .collect(),
                NodeType::Text(text) => {
                    let raw_parent = self
                        .parent(node_id)
                        .is_some_and(|parent| self.is_tag(parent, "script") || self.is_tag(parent, "style"));
                    if raw_parent {
                        text.clone()
                    } else {
                        escape_html_text(text)
                    }
                }
                NodeType::Element(element) => {
                    let mut out = String::new();
                    out.push('<');
                    out.push_str(&element.tag_name);
                    for (key, value) in &element.attrs {
                        out.push(' ');
                        out.push_str(key);
                        out.push_str("=\"");
                        out.push_str(&escape_html_attr(value));
                        out.push('"');
                    }
                    out.push('>');
                    if html::is_void_tag(&element.tag_name) {
                        return out;
                    }
                    for child in &self.nodes[node_id.0].children {
                        out.push_str(&self.dump_node(*child));
                    }
                    out.push_str("</");
                    out.push_str(&element.tag_name);
                    out.push('>');
                    out
                }
            }
        })
    }
}

pub(crate) fn class_tokens(class_attr: Option<&str>) -> Vec<String> {
    class_attr
        .map(|value| value.split_whitespace().map(ToOwned::to_owned).collect())
        .unwrap_or_default()
}

fn set_class_attr(element: &mut Element, classes: &[String]) {
    if classes.is_empty() {
        element.drop_attr("class");
    } else {
        element.insert_attr("class", &classes.join(" "));
    }
}

pub(crate) fn parse_style_declarations(style_attr: Option<&str>) -> Vec<(String, String)> {
    let mut out = Vec::new();
    let Some(style_attr) = style_attr else {
        return out;
    };

    let bytes = style_attr.as_bytes();
    let mut start = 0usize;
    let mut paren_depth = 0isize;
    let mut quote: Option<u8> = None;

    for (i, ch) in bytes.iter().copied().enumerate() {
        match (quote, ch) {
            (Some(q), _) if ch == q => quote = None,
            (Some(_), _) => {}
            (None, b'\'') | (None, b'"') => quote = Some(ch),
            (None, b'(') => paren_depth += 1,
            (None, b')') => paren_depth = (paren_depth - 1).max(0),
            (None, b';') if paren_depth == 0 => {
                push_style_declaration(&style_attr[start..i], &mut out);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_style_declaration(&style_attr[start..], &mut out);
    out
}

fn push_style_declaration(raw_decl: &str, out: &mut Vec<(String, String)>) {
    let Some((name, value)) = raw_decl.trim().split_once(':') else {
        return;
    };
    let name = name.trim().to_ascii_lowercase();
    if name.is_empty() {
        return;
    }
    let value = value.trim().to_string();
    if let Some(pos) = out.iter().position(|(existing, _)| existing == &name) {
        out[pos].1 = value;
    } else {
        out.push((name, value));
    }
}

fn serialize_style_declarations(decls: &[(String, String)]) -> String {
    decls
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_html_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_html_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(markup: &str) -> Dom {
        html::parse_html(markup).expect("markup should parse")
    }

    #[test]
    fn style_set_replaces_and_removes_declarations() -> Result<()> {
        let mut dom = parse("<div id='menu' style='display: flex; color: red'></div>");
        let menu = dom.query_selector("#menu")?.expect("menu");
        dom.style_set(menu, "display", "none")?;
        assert_eq!(dom.attr(menu, "style").as_deref(), Some("display: none; color: red;"));
        dom.style_set(menu, "display", "")?;
        dom.style_set(menu, "color", "")?;
        assert_eq!(dom.attr(menu, "style"), None);
        Ok(())
    }

    #[test]
    fn select_value_follows_selected_attribute_and_assignment() -> Result<()> {
        let mut dom = parse(
            "<select id='s'><option value='a'>A</option><option value='b' selected>B</option></select>",
        );
        let select = dom.query_selector("#s")?.expect("select");
        assert_eq!(dom.value(select)?, "b");
        dom.set_value(select, "a")?;
        assert_eq!(dom.value(select)?, "a");
        let selected = dom.selected_option(select).expect("selected option");
        assert_eq!(dom.option_text(selected), "A");
        dom.set_value(select, "missing")?;
        assert_eq!(dom.value(select)?, "");
        assert_eq!(dom.selected_option(select), None);

        let b = dom.select_options(select)[1];
        dom.set_attr(b, "selected", "")?;
        assert_eq!(dom.value(select)?, "b");
        Ok(())
    }

    #[test]
    fn checkables_report_their_value_attribute_or_on() -> Result<()> {
        let mut dom = parse(
            "<input type='checkbox' id='agree'><input type='RADIO' id='floor' value='high'>",
        );
        let agree = dom.query_selector("#agree")?.expect("agree");
        let floor = dom.query_selector("#floor")?.expect("floor");
        assert_eq!(dom.value(agree)?, "on");
        assert_eq!(dom.value(floor)?, "high");
        dom.set_value(agree, "yes")?;
        assert_eq!(dom.value(agree)?, "yes");
        assert_eq!(dom.attr(agree, "value").as_deref(), Some("yes"));
        Ok(())
    }

    #[test]
    fn class_helpers_keep_other_tokens() -> Result<()> {
        let mut dom = parse("<input id='f' class='form-input error'>");
        let field = dom.query_selector("#f")?.expect("field");
        dom.class_remove(field, "error")?;
        assert_eq!(dom.attr(field, "class").as_deref(), Some("form-input"));
        dom.class_add(field, "error")?;
        dom.class_add(field, "error")?;
        assert_eq!(dom.attr(field, "class").as_deref(), Some("form-input error"));
        Ok(())
    }

    #[test]
    fn remove_node_detaches_and_is_idempotent() -> Result<()> {
        let mut dom = parse("<div class='alert'>Saved</div>");
        let alert = dom.query_selector(".alert")?.expect("alert");
        dom.remove_node(alert)?;
        dom.remove_node(alert)?;
        assert!(!dom.is_connected(alert));
        assert!(dom.query_selector(".alert")?.is_none());
        Ok(())
    }

    #[test]
    fn inner_html_replaces_children() -> Result<()> {
        let mut dom = parse("<div id='box'><p>old</p></div>");
        let target = dom.query_selector("#box")?.expect("box");
        dom.set_inner_html(target, "<h4>Reservation Summary</h4><p>new &amp; shiny</p>")?;
        assert_eq!(dom.text_content(target), "Reservation Summarynew & shiny");
        assert_eq!(
            dom.dump_node(target),
            "<div id=\"box\"><h4>Reservation Summary</h4><p>new &amp; shiny</p></div>"
        );
        Ok(())
    }
}
