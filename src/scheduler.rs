use super::*;
use crate::behaviors::stats::StatCounter;

/// Deferred work queued by page behaviors.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TimerCallback {
    /// Starts the slide-out animation of a flash message.
    FadeAlert { alert: NodeId },
    RemoveAlert { alert: NodeId },
    /// Debounced re-evaluation of the responsive navigation layout.
    ReevaluateNav,
    /// Debounced live search over the apartment cards.
    ApplySearch { input: NodeId },
    StatTick(StatCounter),
    /// Completion of an asynchronous file read.
    FileLoaded { input: NodeId, data_url: String },
}

impl TimerCallback {
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::FadeAlert { .. } => "fade-alert",
            Self::RemoveAlert { .. } => "remove-alert",
            Self::ReevaluateNav => "reevaluate-nav",
            Self::ApplySearch { .. } => "apply-search",
            Self::StatTick(_) => "stat-tick",
            Self::FileLoaded { .. } => "file-loaded",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ScheduledTask {
    pub(crate) id: i64,
    pub(crate) due_at: i64,
    pub(crate) order: i64,
    pub(crate) interval_ms: Option<i64>,
    pub(crate) callback: TimerCallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: i64,
    pub due_at: i64,
    pub order: i64,
    pub interval_ms: Option<i64>,
}

#[derive(Debug)]
pub(crate) struct SchedulerState {
    pub(crate) task_queue: Vec<ScheduledTask>,
    pub(crate) now_ms: i64,
    pub(crate) timer_step_limit: usize,
    pub(crate) next_timer_id: i64,
    pub(crate) next_task_order: i64,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self {
            task_queue: Vec::new(),
            now_ms: 0,
            timer_step_limit: 10_000,
            next_timer_id: 1,
            next_task_order: 0,
        }
    }
}

impl SchedulerState {
    pub(crate) fn allocate_timer_id(&mut self) -> i64 {
        let id = self.next_timer_id;
        self.next_timer_id += 1;
        id
    }

    pub(crate) fn allocate_task_order(&mut self) -> i64 {
        let order = self.next_task_order;
        self.next_task_order += 1;
        order
    }

    pub(crate) fn push(
        &mut self,
        callback: TimerCallback,
        delay_ms: i64,
        interval_ms: Option<i64>,
    ) -> ScheduledTask {
        let delay_ms = delay_ms.max(0);
        let task = ScheduledTask {
            id: self.allocate_timer_id(),
            due_at: self.now_ms.saturating_add(delay_ms),
            order: self.allocate_task_order(),
            interval_ms: interval_ms.map(|value| value.max(0)),
            callback,
        };
        self.task_queue.push(task.clone());
        task
    }

    pub(crate) fn cancel(&mut self, timer_id: i64) -> bool {
        let before = self.task_queue.len();
        self.task_queue.retain(|task| task.id != timer_id);
        self.task_queue.len() != before
    }

    pub(crate) fn next_task_index(&self, due_limit: Option<i64>) -> Option<usize> {
        self.task_queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)
    }

    pub(crate) fn pending(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
                interval_ms: task.interval_ms,
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }
}
