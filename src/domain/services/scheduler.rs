use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;

use crate::domain::models::ChatEvent;
use crate::domain::models::Event;

/// Delayed chat events that can all be aborted at once.
pub struct ScheduledTasks {
    tx: mpsc::UnboundedSender<Event>,
    tasks: Vec<JoinHandle<()>>,
}

impl ScheduledTasks {
    pub fn new(tx: mpsc::UnboundedSender<Event>) -> ScheduledTasks {
        return ScheduledTasks { tx, tasks: vec![] };
    }

    pub fn schedule(&mut self, delay: Duration, event: ChatEvent) {
        self.tasks.retain(|task| return !task.is_finished());

        let tx = self.tx.clone();
        self.tasks.push(tokio::spawn(async move {
            if !delay.is_zero() {
                time::sleep(delay).await;
            }

            if tx.send(Event::Chat(event)).is_err() {
                tracing::debug!("event channel closed before scheduled event fired");
            }
        }));
    }

    pub fn pending(&self) -> usize {
        return self
            .tasks
            .iter()
            .filter(|task| return !task.is_finished())
            .count();
    }

    pub fn cancel_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for ScheduledTasks {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
