use super::*;

pub(crate) const DISMISS_DELAY_MS: i64 = 5_000;
pub(crate) const SLIDE_OUT_MS: i64 = 300;
pub(crate) const SLIDE_OUT_ANIMATION: &str = "slideOut 0.3s ease-out";

impl Page {
    pub(crate) fn install_alert_dismissal(&mut self) -> Result<()> {
        for alert in self.dom.query_selector_all(markup::ALERT)? {
            self.schedule_timeout(TimerCallback::FadeAlert { alert }, DISMISS_DELAY_MS);
        }
        Ok(())
    }

    pub(crate) fn fade_alert(&mut self, alert: NodeId) -> Result<()> {
        self.dom.style_set(alert, "animation", SLIDE_OUT_ANIMATION)?;
        self.schedule_timeout(TimerCallback::RemoveAlert { alert }, SLIDE_OUT_MS);
        Ok(())
    }
}
