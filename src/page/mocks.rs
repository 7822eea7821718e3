use super::*;

impl Page {
    /// Queues the answer for the next `confirm` dialog.
    pub fn enqueue_confirm_response(&mut self, accepted: bool) {
        self.platform_mocks.confirm_responses.push_back(accepted);
    }

    /// Answer used once the queue is empty; starts out as "cancel".
    pub fn set_default_confirm_response(&mut self, accepted: bool) {
        self.platform_mocks.default_confirm_response = accepted;
    }

    pub fn take_alert_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform_mocks.alert_messages)
    }

    pub fn take_console_messages(&mut self) -> Vec<String> {
        std::mem::take(&mut self.platform_mocks.console_messages)
    }

    pub fn take_location_navigations(&mut self) -> Vec<LocationNavigation> {
        std::mem::take(&mut self.platform_mocks.location_navigations)
    }

    pub(crate) fn alert(&mut self, message: &str) {
        self.platform_mocks.alert_messages.push(message.to_string());
        self.trace_line(format!("[dialog] alert message={message}"));
    }

    pub(crate) fn confirm(&mut self, message: &str) -> bool {
        let accepted = self
            .platform_mocks
            .confirm_responses
            .pop_front()
            .unwrap_or(self.platform_mocks.default_confirm_response);
        self.trace_line(format!(
            "[dialog] confirm message={message} accepted={accepted}"
        ));
        accepted
    }

    pub(crate) fn console_log(&mut self, message: &str) {
        self.platform_mocks.console_messages.push(message.to_string());
        self.trace_line(format!("[console] {message}"));
    }
}
