//! Drives a [`SettingsDomain`]: applies messages, runs the tasks they
//! produce and feeds the resulting messages back in.

use std::collections::VecDeque;

use log::debug;

use crate::common::messages::CrossDomainEvent;
use crate::common::task::Task;
use crate::domains::settings::SettingsDomain;
use crate::domains::settings::messages::Message;
use crate::domains::settings::state::SettingsState;
use crate::domains::settings::view::Screen;

#[derive(Debug)]
pub struct Runtime {
    domain: SettingsDomain,
    events: Vec<CrossDomainEvent>,
}

impl Runtime {
    pub fn new(domain: SettingsDomain) -> Self {
        Self {
            domain,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &SettingsState {
        &self.domain.state
    }

    pub fn view(&self) -> Screen {
        self.domain.view()
    }

    /// Apply one message and hand back its task without running it.
    pub fn dispatch(&mut self, message: Message) -> Task<Message> {
        debug!("Dispatch: {}", message.sanitized_display());
        let result = self.domain.update(message);
        self.events.extend(result.events);
        result.task
    }

    /// Apply `message`, then run every task it leads to until no work is
    /// left. The futures of one task run concurrently and their messages are
    /// applied in request order. Returns how many messages were applied.
    pub async fn settle(&mut self, message: Message) -> usize {
        let mut queue = VecDeque::from([message]);
        let mut applied = 0;
        while let Some(next) = queue.pop_front() {
            let task = self.dispatch(next);
            applied += 1;
            if task.is_none() {
                continue;
            }
            let outputs = futures::future::join_all(task.into_futures()).await;
            queue.extend(outputs);
        }
        applied
    }

    /// Events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<CrossDomainEvent> {
        std::mem::take(&mut self.events)
    }
}
