use crate::common::task::Task;
use crate::domains::settings::messages::Message;

/// Routes outside the settings screen that it can send the viewer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Login,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Dashboard => "/dashboard",
            Route::Login => "/login",
        }
    }
}

/// Events the settings screen emits for the surrounding application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossDomainEvent {
    /// The viewer is not allowed here and should be sent elsewhere.
    NavigateTo(Route),
    /// A profile was created or updated on the service.
    ProfilesChanged,
    /// A vehicle was created or updated on the service.
    VehiclesChanged,
}

/// Result of a domain update operation that can emit events
#[derive(Debug)]
pub struct DomainUpdateResult {
    /// The task to execute (may produce more messages)
    pub task: Task<Message>,
    /// Events to broadcast to the rest of the application immediately
    pub events: Vec<CrossDomainEvent>,
}

impl DomainUpdateResult {
    /// Create a result with just a task
    pub fn task(task: Task<Message>) -> Self {
        Self {
            task,
            events: Vec::new(),
        }
    }

    /// Create a result with neither task nor events
    pub fn none() -> Self {
        Self::task(Task::none())
    }

    /// Add an event to this result
    pub fn add_event(mut self, event: CrossDomainEvent) -> Self {
        self.events.push(event);
        self
    }
}
