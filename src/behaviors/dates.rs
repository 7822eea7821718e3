use super::*;

pub(crate) const CHECK_OUT_MESSAGE: &str = "Check-out date must be after check-in date";

/// An already-entered check-out that a new check-in has overtaken.
pub(crate) fn check_out_is_stale(check_in: &str, check_out: &str) -> bool {
    !check_out.is_empty() && check_out < check_in
}

/// A freshly entered check-out that falls before the check-in.
pub(crate) fn check_out_is_rejected(check_in: &str, check_out: &str) -> bool {
    !check_in.is_empty() && check_out < check_in
}

impl Page {
    pub(crate) fn install_date_validation(&mut self) -> Result<()> {
        let Some(fields) = DateFields::resolve(&self.dom)? else {
            return Ok(());
        };
        let today = format::iso_date(self.wall_clock_ms());
        self.dom.set_attr(fields.check_in, "min", &today)?;
        self.dom.set_attr(fields.check_out, "min", &today)?;
        self.add_listener(
            ListenerTarget::Node(fields.check_in),
            "change",
            Handler::CheckInChanged(fields),
        );
        self.add_listener(
            ListenerTarget::Node(fields.check_out),
            "change",
            Handler::CheckOutChanged(fields),
        );
        Ok(())
    }

    pub(crate) fn check_in_changed(&mut self, fields: DateFields) -> Result<()> {
        let check_in = self.dom.value(fields.check_in)?;
        self.dom.set_attr(fields.check_out, "min", &check_in)?;
        if check_out_is_stale(&check_in, &self.dom.value(fields.check_out)?) {
            self.dom.set_value(fields.check_out, "")?;
        }
        Ok(())
    }

    pub(crate) fn check_out_changed(&mut self, fields: DateFields) -> Result<()> {
        let check_in = self.dom.value(fields.check_in)?;
        if check_out_is_rejected(&check_in, &self.dom.value(fields.check_out)?) {
            self.alert(CHECK_OUT_MESSAGE);
            self.dom.set_value(fields.check_out, "")?;
        }
        Ok(())
    }
}
