use super::*;

fn is_truthy(value: f64) -> bool {
    !value.is_nan() && value != 0.0
}

/// New minimum when the edited minimum overshoots the maximum.
pub(crate) fn clamp_min(min_value: &str, max_value: &str) -> Option<String> {
    let min = format::parse_js_float(min_value);
    let max = format::parse_js_float(max_value);
    (is_truthy(max) && min > max).then(|| format::format_js_number(max))
}

/// New maximum when the edited maximum undershoots the minimum.
pub(crate) fn clamp_max(min_value: &str, max_value: &str) -> Option<String> {
    let min = format::parse_js_float(min_value);
    let max = format::parse_js_float(max_value);
    (is_truthy(min) && max < min).then(|| format::format_js_number(min))
}

impl Page {
    pub(crate) fn install_price_clamp(&mut self) -> Result<()> {
        let Some(fields) = PriceFields::resolve(&self.dom)? else {
            return Ok(());
        };
        self.add_listener(
            ListenerTarget::Node(fields.min),
            "input",
            Handler::ClampMinPrice(fields),
        );
        self.add_listener(
            ListenerTarget::Node(fields.max),
            "input",
            Handler::ClampMaxPrice(fields),
        );
        Ok(())
    }

    pub(crate) fn clamp_min_price(&mut self, fields: PriceFields) -> Result<()> {
        let min = self.dom.value(fields.min)?;
        let max = self.dom.value(fields.max)?;
        if let Some(clamped) = clamp_min(&min, &max) {
            self.dom.set_value(fields.min, &clamped)?;
        }
        Ok(())
    }

    pub(crate) fn clamp_max_price(&mut self, fields: PriceFields) -> Result<()> {
        let min = self.dom.value(fields.min)?;
        let max = self.dom.value(fields.max)?;
        if let Some(clamped) = clamp_max(&min, &max) {
            self.dom.set_value(fields.max, &clamped)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_only_when_bounds_cross() {
        assert_eq!(clamp_min("9000", "8000"), Some("8000".to_string()));
        assert_eq!(clamp_min("7000", "8000"), None);
        assert_eq!(clamp_min("9000", ""), None);
        assert_eq!(clamp_min("9000", "0"), None);
        assert_eq!(clamp_max("5000", "4500.5"), Some("5000".to_string()));
        assert_eq!(clamp_max("5000.5", "10"), Some("5000.5".to_string()));
        assert_eq!(clamp_max("", "10"), None);
        assert_eq!(clamp_max("5000", "abc"), None);
    }

    #[test]
    fn editing_either_bound_clamps_it() -> Result<()> {
        let mut page = Page::from_html(
            r#"<form class="filter-form">
                 <input name="min_price" type="number">
                 <input name="max_price" type="number">
               </form>"#,
        )?;
        page.type_text("input[name='min_price']", "10000")?;
        page.type_text("input[name='max_price']", "8000")?;
        page.assert_value("input[name='max_price']", "10000")?;
        page.assert_value("input[name='min_price']", "10000")?;

        page.type_text("input[name='min_price']", "12000")?;
        page.assert_value("input[name='min_price']", "10000")?;
        Ok(())
    }
}
