//! Trigger Bridge: lets a control outside the form request update/delete.
//!
//! Two inputs are accepted. [`FormCommand`] is a typed request sent through
//! the runtime queue. Parents that only speak counters pass request counts to
//! [`TriggerBridge`], which turns every change into exactly one command.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormCommand {
    Create,
    Update,
    Delete,
    Back,
}

/// Last observed value of each request counter. Both start at zero, and a
/// counter that goes back to zero is recorded without firing.
#[derive(Debug, Clone, Default)]
pub struct TriggerBridge {
    update_seen: u64,
    delete_seen: u64,
}

impl TriggerBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe_update(&mut self, count: u64) -> Option<FormCommand> {
        observe(&mut self.update_seen, count).then_some(FormCommand::Update)
    }

    pub fn observe_delete(&mut self, count: u64) -> Option<FormCommand> {
        observe(&mut self.delete_seen, count).then_some(FormCommand::Delete)
    }
}

fn observe(seen: &mut u64, count: u64) -> bool {
    if *seen == count {
        return false;
    }
    *seen = count;
    count != 0
}
