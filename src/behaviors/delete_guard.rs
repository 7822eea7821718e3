use super::*;

pub(crate) const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you want to delete this item?";

impl Page {
    pub(crate) fn install_delete_confirmations(&mut self) -> Result<()> {
        for link in self.dom.query_selector_all(markup::DELETE_LINK)? {
            self.add_listener(ListenerTarget::Node(link), "click", Handler::ConfirmDelete);
        }
        Ok(())
    }

    pub(crate) fn confirm_delete(&mut self, event: &mut EventState) {
        if !self.confirm(DELETE_CONFIRM_MESSAGE) {
            event.default_prevented = true;
        }
    }
}
