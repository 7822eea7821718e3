use super::*;

pub(crate) const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

/// A required value counts as missing when nothing but whitespace was entered.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl Page {
    pub(crate) fn install_form_validation(&mut self) -> Result<()> {
        for form in self.dom.query_selector_all(markup::FORM)? {
            self.add_listener(
                ListenerTarget::Node(form),
                "submit",
                Handler::ValidateRequiredFields,
            );
        }
        Ok(())
    }

    pub(crate) fn validate_on_submit(&mut self, event: &mut EventState) -> Result<()> {
        let Some(form) = event.current_node() else {
            return Ok(());
        };
        if self.dom.class_contains(form, markup::CONFIRM_FORM_CLASS) {
            return Ok(());
        }
        if !self.flag_required_fields(form)? {
            event.default_prevented = true;
            self.alert(MISSING_FIELDS_MESSAGE);
        }
        Ok(())
    }

    /// Marks every empty required field with the error class; true when none are empty.
    pub(crate) fn flag_required_fields(&mut self, form: NodeId) -> Result<bool> {
        let mut valid = true;
        for field in self.dom.query_selector_all_from(form, markup::REQUIRED_FIELDS)? {
            if is_blank(&self.dom.value(field)?) {
                self.dom.class_add(field, markup::ERROR_CLASS)?;
                valid = false;
            } else {
                self.dom.class_remove(field, markup::ERROR_CLASS)?;
            }
        }
        Ok(valid)
    }

    pub(crate) fn clear_field_error(&mut self, event: &EventState) -> Result<()> {
        let Some(target) = event.target_node() else {
            return Ok(());
        };
        if self.dom.matches_selector(target, markup::FORM_FIELD)? {
            self.dom.class_remove(target, markup::ERROR_CLASS)?;
        }
        Ok(())
    }
}
