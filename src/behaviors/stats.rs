use super::*;

pub(crate) const STAT_STEPS: i64 = 50;
pub(crate) const STAT_DURATION_MS: i64 = 1_000;
pub(crate) const STAT_TICK_MS: i64 = STAT_DURATION_MS / STAT_STEPS;

/// One dashboard number counting up from zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct StatCounter {
    pub(crate) node: NodeId,
    pub(crate) current: f64,
    pub(crate) target: f64,
    pub(crate) increment: f64,
}

impl StatCounter {
    /// None when the stat text does not start with an integer.
    pub(crate) fn start(node: NodeId, text: &str) -> Option<Self> {
        let target = format::parse_js_int(text)?;
        let increment = (target / STAT_STEPS as f64).ceil();
        Some(Self {
            node,
            current: 0.0,
            target,
            increment,
        })
    }

    /// Advances by one increment; the flag is set once the target is reached.
    pub(crate) fn tick(self) -> (Self, bool) {
        let current = self.current + self.increment;
        if current >= self.target {
            (
                Self {
                    current: self.target,
                    ..self
                },
                true,
            )
        } else {
            (Self { current, ..self }, false)
        }
    }
}

impl Page {
    pub(crate) fn animate_dashboard_stats(&mut self) -> Result<()> {
        for node in self.dom.query_selector_all(markup::STAT_VALUE)? {
            let Some(counter) = StatCounter::start(node, &self.dom.text_content(node)) else {
                continue;
            };
            self.dom.set_text_content(node, "0")?;
            self.schedule_interval(TimerCallback::StatTick(counter), STAT_TICK_MS);
        }
        Ok(())
    }

    /// Renders one tick; returns the counter to keep running, if any.
    pub(crate) fn tick_stat(&mut self, counter: StatCounter) -> Result<Option<StatCounter>> {
        let (next, done) = counter.tick();
        self.dom
            .set_text_content(next.node, &format::format_js_number(next.current))?;
        Ok((!done).then_some(next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(mut counter: StatCounter) -> (StatCounter, usize) {
        let mut ticks = 0;
        loop {
            ticks += 1;
            let (next, done) = counter.tick();
            counter = next;
            if done {
                return (counter, ticks);
            }
        }
    }

    #[test]
    fn counters_land_exactly_on_their_target() {
        let node = NodeId(1);
        for (text, ticks) in [("120", 40), ("7 units", 7), ("50", 50), ("0", 1), ("-30", 1)] {
            let Some(counter) = StatCounter::start(node, text) else {
                panic!("{text} should parse");
            };
            let (end, taken) = run_to_end(counter);
            assert_eq!(end.current, end.target, "{text}");
            assert_eq!(taken, ticks, "{text}");
        }
        assert!(StatCounter::start(node, "N/A").is_none());
    }

    #[test]
    fn oversized_stats_still_animate() -> Result<()> {
        let mut page = Page::from_html(
            r#"<section class="dashboard">
                 <span class="stat-value" id="views">98765432109876543210987 views</span>
               </section>"#,
        )?;
        page.assert_text("#views", "0")?;
        page.flush()?;
        page.assert_text("#views", "9.876543210987654e+22")?;
        Ok(())
    }

    #[test]
    fn dashboard_stats_count_up_on_the_clock() -> Result<()> {
        let mut page = Page::from_html(
            r#"<section class="dashboard">
                 <div class="stat-card"><span class="stat-value" id="units">120</span></div>
                 <div class="stat-card"><span class="stat-value" id="rate">98%</span></div>
                 <div class="stat-card"><span class="stat-value" id="na">N/A</span></div>
               </section>"#,
        )?;
        page.assert_text("#units", "0")?;
        page.assert_text("#rate", "0")?;
        page.assert_text("#na", "N/A")?;

        page.advance_time(20)?;
        page.assert_text("#units", "3")?;
        page.assert_text("#rate", "2")?;

        page.flush()?;
        page.assert_text("#units", "120")?;
        page.assert_text("#rate", "98")?;
        assert!(page.pending_timers().is_empty());
        Ok(())
    }

    #[test]
    fn stats_outside_a_dashboard_are_static() -> Result<()> {
        let page = Page::from_html(r#"<span class="stat-value" id="units">120</span>"#)?;
        page.assert_text("#units", "120")?;
        assert!(page.pending_timers().is_empty());
        Ok(())
    }
}
