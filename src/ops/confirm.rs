/// Asks the user to approve a destructive action.
///
/// Async so that a front end can answer from a dialog, a terminal prompt or
/// a script without the callers caring which.
#[allow(async_fn_in_trait)]
pub trait Confirm {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt the same way without asking (`--yes`, tests)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset(pub bool);

impl Confirm for Preset {
    async fn confirm(&self, prompt: &str) -> bool {
        tracing::debug!(prompt, answer = self.0, "confirmation answered without prompting");
        self.0
    }
}
