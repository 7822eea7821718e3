use super::*;

impl Page {
    /// Virtual milliseconds since the page was first loaded.
    pub fn now_ms(&self) -> i64 {
        self.scheduler.now_ms
    }

    pub fn clear_timer(&mut self, timer_id: i64) -> bool {
        let existed = self.scheduler.cancel(timer_id);
        self.trace_timer_line(format!("[timer] clear id={timer_id} existed={existed}"));
        existed
    }

    pub fn clear_all_timers(&mut self) -> usize {
        let cleared = self.scheduler.task_queue.len();
        self.scheduler.task_queue.clear();
        self.trace_timer_line(format!("[timer] clear_all cleared={cleared}"));
        cleared
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.scheduler.pending()
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Runtime(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let from = self.scheduler.now_ms;
        let target = from.saturating_add(delta_ms);
        let ran = self.run_timers_until(target)?;
        self.trace_timer_line(format!(
            "[timer] advance delta_ms={delta_ms} from={from} to={} ran_due={ran}",
            self.scheduler.now_ms
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        if target_ms < self.scheduler.now_ms {
            return Err(Error::Runtime(format!(
                "advance_time_to requires target >= now_ms (target={target_ms}, now_ms={})",
                self.scheduler.now_ms
            )));
        }
        let from = self.scheduler.now_ms;
        let ran = self.run_timers_until(target_ms)?;
        self.trace_timer_line(format!(
            "[timer] advance_to from={from} to={} ran_due={ran}",
            self.scheduler.now_ms
        ));
        Ok(())
    }

    /// Runs every queued timer, moving the clock forward as needed.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.scheduler.now_ms;
        let ran = self.run_timer_queue(None, true)?;
        self.trace_timer_line(format!(
            "[timer] flush from={from} to={} ran={ran}",
            self.scheduler.now_ms
        ));
        Ok(())
    }

    pub fn run_next_timer(&mut self) -> Result<bool> {
        let Some(next_idx) = self.scheduler.next_task_index(None) else {
            self.trace_timer_line("[timer] run_next none".into());
            return Ok(false);
        };
        let task = self.scheduler.task_queue.remove(next_idx);
        if task.due_at > self.scheduler.now_ms {
            self.scheduler.now_ms = task.due_at;
        }
        self.execute_timer_task(task)?;
        Ok(true)
    }

    pub fn run_due_timers(&mut self) -> Result<usize> {
        let ran = self.run_timer_queue(Some(self.scheduler.now_ms), false)?;
        self.trace_timer_line(format!(
            "[timer] run_due now_ms={} ran={ran}",
            self.scheduler.now_ms
        ));
        Ok(ran)
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Runtime(
                "set_timer_step_limit requires at least 1 step".into(),
            ));
        }
        self.scheduler.timer_step_limit = max_steps;
        Ok(())
    }

    pub(crate) fn schedule_timeout(&mut self, callback: TimerCallback, delay_ms: i64) -> i64 {
        let label = callback.label();
        let task = self.scheduler.push(callback, delay_ms, None);
        self.trace_timer_line(format!(
            "[timer] schedule timeout id={} callback={label} due_at={}",
            task.id, task.due_at
        ));
        task.id
    }

    pub(crate) fn schedule_interval(&mut self, callback: TimerCallback, interval_ms: i64) -> i64 {
        let label = callback.label();
        let task = self.scheduler.push(callback, interval_ms, Some(interval_ms));
        self.trace_timer_line(format!(
            "[timer] schedule interval id={} callback={label} due_at={} interval_ms={interval_ms}",
            task.id, task.due_at
        ));
        task.id
    }

    // Each timer runs with the clock at its own due time.
    fn run_timers_until(&mut self, target_ms: i64) -> Result<usize> {
        let ran = self.run_timer_queue(Some(target_ms), true)?;
        self.scheduler.now_ms = target_ms;
        Ok(ran)
    }

    pub(crate) fn run_timer_queue(
        &mut self,
        due_limit: Option<i64>,
        advance_clock: bool,
    ) -> Result<usize> {
        let mut steps = 0usize;
        while let Some(next_idx) = self.scheduler.next_task_index(due_limit) {
            steps += 1;
            if steps > self.scheduler.timer_step_limit {
                return Err(self.timer_step_limit_error(
                    self.scheduler.timer_step_limit,
                    steps,
                    due_limit,
                ));
            }
            let task = self.scheduler.task_queue.remove(next_idx);
            if advance_clock && task.due_at > self.scheduler.now_ms {
                self.scheduler.now_ms = task.due_at;
            }
            self.execute_timer_task(task)?;
        }
        Ok(steps)
    }

    pub(crate) fn timer_step_limit_error(
        &self,
        max_steps: usize,
        steps: usize,
        due_limit: Option<i64>,
    ) -> Error {
        let due_limit_desc = due_limit
            .map(|value| value.to_string())
            .unwrap_or_else(|| "none".into());
        let next_task_desc = self
            .scheduler
            .next_task_index(due_limit)
            .and_then(|idx| self.scheduler.task_queue.get(idx))
            .map(|task| {
                format!(
                    "id={},due_at={},callback={}",
                    task.id,
                    task.due_at,
                    task.callback.label()
                )
            })
            .unwrap_or_else(|| "none".into());

        Error::Runtime(format!(
            "flush exceeded max task steps: limit={max_steps}, steps={steps}, now_ms={}, due_limit={due_limit_desc}, pending_tasks={}, next_task={next_task_desc}",
            self.scheduler.now_ms,
            self.scheduler.task_queue.len(),
        ))
    }

    pub(crate) fn execute_timer_task(&mut self, task: ScheduledTask) -> Result<()> {
        stacker::grow(32 * 1024 * 1024, || self.execute_timer_task_impl(task))
    }

    fn execute_timer_task_impl(&mut self, task: ScheduledTask) -> Result<()> {
        self.trace_timer_line(format!(
            "[timer] run id={} callback={} due_at={} now_ms={}",
            task.id,
            task.callback.label(),
            task.due_at,
            self.scheduler.now_ms
        ));

        let next = self.run_timer_callback(task.callback)?;

        if let (Some(interval_ms), Some(callback)) = (task.interval_ms, next) {
            let due_at = task.due_at.saturating_add(interval_ms);
            let order = self.scheduler.allocate_task_order();
            self.scheduler.task_queue.push(ScheduledTask {
                id: task.id,
                due_at,
                order,
                interval_ms: Some(interval_ms),
                callback,
            });
            self.trace_timer_line(format!(
                "[timer] requeue id={} due_at={due_at} interval_ms={interval_ms}",
                task.id
            ));
        }
        Ok(())
    }
}
