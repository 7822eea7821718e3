use super::*;

pub(crate) const PROCESSING_LABEL: &str = "Processing...";

/// A submit button in its loading state, with the label to put back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LoadingButton {
    pub(crate) button: NodeId,
    pub(crate) label: String,
}

impl Page {
    pub(crate) fn enter_submit_loading(&mut self, event: &EventState) -> Result<()> {
        if event.default_prevented {
            return Ok(());
        }
        let Some(form) = event.target_node() else {
            return Ok(());
        };
        let Some(button) = self.dom.query_selector_from(form, markup::SUBMIT_BUTTON)? else {
            return Ok(());
        };
        if self.dom.class_contains(button, markup::LOADING_CLASS) {
            return Ok(());
        }
        let label = self.dom.text_content(button);
        self.dom.class_add(button, markup::LOADING_CLASS)?;
        self.dom.set_disabled(button, true)?;
        self.dom.set_text_content(button, PROCESSING_LABEL)?;
        self.behaviors.loading_buttons.push(LoadingButton { button, label });
        Ok(())
    }

    /// Puts every loading button back the way it was.
    pub(crate) fn restore_loading_buttons(&mut self) -> Result<()> {
        for LoadingButton { button, label } in std::mem::take(&mut self.behaviors.loading_buttons) {
            self.dom.class_remove(button, markup::LOADING_CLASS)?;
            self.dom.set_disabled(button, false)?;
            self.dom.set_text_content(button, &label)?;
        }
        Ok(())
    }
}
