use super::*;

impl Page {
    /// Replaces a text field's value the way typing does: one `input` event,
    /// with `change` held back until [`Page::blur`].
    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) || self.dom.readonly(target) {
            return Ok(());
        }
        if !forms::is_text_entry_control(&self.dom, target) {
            return Err(self.type_mismatch(selector, target, "input or textarea"));
        }
        self.dom.set_value(target, text)?;
        if !self.dirty_fields.contains(&target) {
            self.dirty_fields.push(target);
        }
        self.dispatch_event(target, "input")?;
        Ok(())
    }

    /// Commits a typed value: fires `change` if the field was edited since the last one.
    pub fn blur(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.commit_change(target)
    }

    /// Sets a field the way a picker or autofill does: `input` then `change`.
    pub fn set_value(&mut self, selector: &str, value: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.disabled(target) || self.dom.readonly(target) {
            return Ok(());
        }
        if !forms::is_text_entry_control(&self.dom, target) {
            return Err(self.type_mismatch(selector, target, "input or textarea"));
        }
        self.dom.set_value(target, value)?;
        self.dispatch_event(target, "input")?;
        self.dirty_fields.retain(|node| *node != target);
        self.dispatch_event(target, "change")?;
        Ok(())
    }

    pub fn select_option(&mut self, selector: &str, value: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if !self.dom.is_tag(target, "select") {
            return Err(self.type_mismatch(selector, target, "select"));
        }
        if self.dom.disabled(target) {
            return Ok(());
        }
        let known = self
            .dom
            .select_options(target)
            .into_iter()
            .any(|option| self.dom.option_value(option) == value);
        if !known {
            return Err(Error::Runtime(format!(
                "no option with value {value:?} in {selector}"
            )));
        }
        self.dom.set_select_value(target, value)?;
        self.dispatch_event(target, "input")?;
        self.dispatch_event(target, "change")?;
        Ok(())
    }

    pub fn set_checked(&mut self, selector: &str, checked: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        if !forms::is_checkable_input(&self.dom, target) {
            return Err(self.type_mismatch(selector, target, "checkbox or radio"));
        }
        if self.dom.disabled(target) || self.dom.checked(target) == checked {
            return Ok(());
        }
        self.set_checked_state(target, checked)?;
        self.dispatch_event(target, "input")?;
        self.dispatch_event(target, "change")?;
        Ok(())
    }

    /// Picks files in a file input; `change` fires when the selection differs.
    pub fn set_input_files(&mut self, selector: &str, files: &[MockFile]) -> Result<()> {
        let target = self.select_one(selector)?;
        if !forms::is_file_input(&self.dom, target) {
            return Err(self.type_mismatch(selector, target, "input[type=file]"));
        }
        if self.dom.disabled(target) {
            return Ok(());
        }
        if self.dom.set_files(target, files)? {
            self.dispatch_event(target, "input")?;
            self.dispatch_event(target, "change")?;
        }
        Ok(())
    }

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        self.commit_pending_changes()?;
        self.click_node(target)
    }

    /// Submits the form of the matched element (or the form itself).
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let Some(form) = forms::form_of(&self.dom, target) else {
            return Ok(());
        };
        self.commit_pending_changes()?;
        let submitter = (target != form && forms::is_submit_control(&self.dom, target))
            .then_some(target);
        self.request_submit(form, submitter)
    }

    pub fn press_key(&mut self, key: &str) -> Result<()> {
        self.press_key_with(key, KeyModifiers::default())
    }

    /// Fires `keydown` on the document.
    pub fn press_key_with(&mut self, key: &str, modifiers: KeyModifiers) -> Result<()> {
        let mut event = EventState::new("keydown", ListenerTarget::Node(self.dom.root));
        event.key = Some(key.to_string());
        event.modifiers = modifiers;
        self.dispatch(event)?;
        Ok(())
    }

    /// Resizes the viewport and fires `resize` on the window.
    pub fn set_viewport_width(&mut self, width: u32) -> Result<()> {
        self.viewport_width = width;
        self.trace_event_line(format!("[event] viewport width={width}"));
        self.dispatch(EventState::new("resize", ListenerTarget::Window))?;
        Ok(())
    }

    fn commit_change(&mut self, target: NodeId) -> Result<()> {
        if let Some(pos) = self.dirty_fields.iter().position(|node| *node == target) {
            self.dirty_fields.remove(pos);
            self.dispatch_event(target, "change")?;
        }
        Ok(())
    }

    /// Focus moving away commits whatever was typed.
    fn commit_pending_changes(&mut self) -> Result<()> {
        for target in std::mem::take(&mut self.dirty_fields) {
            self.dispatch_event(target, "change")?;
        }
        Ok(())
    }

    fn type_mismatch(&self, selector: &str, target: NodeId, expected: &str) -> Error {
        Error::TypeMismatch {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual: self.node_label(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_into_a_select_is_a_type_mismatch() -> Result<()> {
        let mut page = Page::from_html(r#"<select id="s"><option>1</option></select>"#)?;
        let err = page.type_text("#s", "x").err();
        assert!(matches!(err, Some(Error::TypeMismatch { .. })));
        assert!(matches!(
            page.type_text("#missing", "x"),
            Err(Error::SelectorNotFound(_))
        ));
        Ok(())
    }

    #[test]
    fn readonly_and_disabled_fields_ignore_typing() -> Result<()> {
        let mut page = Page::from_html(
            r#"<input id="ro" readonly value="fixed"><input id="off" disabled value="off">"#,
        )?;
        page.type_text("#ro", "changed")?;
        page.type_text("#off", "changed")?;
        page.assert_value("#ro", "fixed")?;
        page.assert_value("#off", "off")?;
        Ok(())
    }

    #[test]
    fn change_fires_on_blur_or_when_focus_moves() -> Result<()> {
        let mut page = Page::from_html(
            r#"<form method="post">
                 <input type="date" name="check_in" id="in">
                 <input type="date" name="check_out" id="out">
                 <button type="button" id="other">Other</button>
               </form>"#,
        )?;
        page.type_text("#in", "2026-05-02")?;
        page.assert_attr("#out", "min", "2026-01-01")?;
        page.blur("#in")?;
        page.assert_attr("#out", "min", "2026-05-02")?;

        page.type_text("#in", "2026-06-01")?;
        page.click("#other")?;
        page.assert_attr("#out", "min", "2026-06-01")?;
        Ok(())
    }

    #[test]
    fn unknown_option_is_an_error() -> Result<()> {
        let mut page = Page::from_html(r#"<select id="s"><option value="a">A</option></select>"#)?;
        assert!(matches!(page.select_option("#s", "b"), Err(Error::Runtime(_))));
        page.select_option("#s", "a")?;
        page.assert_value("#s", "a")?;
        Ok(())
    }
}
