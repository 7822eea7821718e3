use super::*;

impl Page {
    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        self.check(selector, target, expected, actual)
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.value(target)?;
        self.check(selector, target, expected, actual)
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    pub fn assert_missing(&self, selector: &str) -> Result<()> {
        let Some(found) = self.dom.query_selector(selector)? else {
            return Ok(());
        };
        Err(Error::AssertionFailed {
            selector: selector.to_string(),
            expected: "no match".to_string(),
            actual: self.node_label(found),
            dom_snippet: self.node_snippet(found),
        })
    }

    pub fn assert_attr(&self, selector: &str, name: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self
            .dom
            .attr(target, name)
            .unwrap_or_else(|| format!("<no {name} attribute>"));
        self.check(selector, target, expected, actual)
    }

    pub fn assert_class(&self, selector: &str, class_name: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.dom.class_contains(target, class_name) {
            return Ok(());
        }
        Err(Error::AssertionFailed {
            selector: selector.to_string(),
            expected: format!("class {class_name}"),
            actual: self.dom.attr(target, "class").unwrap_or_default(),
            dom_snippet: self.node_snippet(target),
        })
    }

    pub fn assert_style(&self, selector: &str, property: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.style_get(target, property);
        self.check(selector, target, expected, actual)
    }

    /// Inline `display: none` on the matched element.
    pub fn assert_hidden(&self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let display = self.dom.style_get(target, "display");
        self.check(selector, target, "display: none", format!("display: {display}"))
    }

    pub fn assert_visible(&self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let display = self.dom.style_get(target, "display");
        if display != "none" {
            return Ok(());
        }
        Err(Error::AssertionFailed {
            selector: selector.to_string(),
            expected: "visible".to_string(),
            actual: "display: none".to_string(),
            dom_snippet: self.node_snippet(target),
        })
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    fn check(&self, selector: &str, target: NodeId, expected: &str, actual: String) -> Result<()> {
        if actual == expected {
            return Ok(());
        }
        Err(Error::AssertionFailed {
            selector: selector.to_string(),
            expected: expected.to_string(),
            actual,
            dom_snippet: self.node_snippet(target),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_carry_the_actual_value_and_a_snippet() -> Result<()> {
        let page = Page::from_html(r#"<p id="rate" class="price">₱9,000.00</p>"#)?;
        page.assert_text("#rate", "₱9,000.00")?;
        let err = page.assert_text("#rate", "₱1.00").err();
        let Some(Error::AssertionFailed {
            actual, dom_snippet, ..
        }) = err
        else {
            panic!("expected an assertion failure, got {err:?}");
        };
        assert_eq!(actual, "₱9,000.00");
        assert!(dom_snippet.starts_with("<p id=\"rate\""));

        assert!(page.assert_missing("#rate").is_err());
        page.assert_missing("#other")?;
        assert!(page.assert_class("#rate", "error").is_err());
        assert!(page.assert_hidden("#rate").is_err());
        page.assert_visible("#rate")?;
        Ok(())
    }
}
