use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    Navigated { target: String },
    Cancelled,
}

/// Automatic navigation armed after a successful submission.
///
/// The redirect fires once `delay` elapses unless [`ScheduledRedirect::cancel`] is called
/// first. Dropping the handle cancels it as well.
#[derive(Debug)]
pub struct ScheduledRedirect {
    target: String,
    delay: Duration,
    cancel: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<RedirectOutcome>>,
}

impl ScheduledRedirect {
    pub fn schedule(target: impl Into<String>, delay: Duration) -> Self {
        let target = target.into();
        let (cancel, cancelled) = oneshot::channel::<()>();
        let destination = target.clone();

        let task = tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep(delay) => RedirectOutcome::Navigated { target: destination },
                _ = cancelled => RedirectOutcome::Cancelled,
            }
        });

        Self {
            target,
            delay,
            cancel: Some(cancel),
            task: Some(task),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// The submitter navigated on their own; the timer must not fire.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    pub async fn wait(mut self) -> RedirectOutcome {
        match self.task.take() {
            Some(task) => task.await.unwrap_or(RedirectOutcome::Cancelled),
            None => RedirectOutcome::Cancelled,
        }
    }
}
