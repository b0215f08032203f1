//! Tracks which feeds a refresh has received, and reports it to an optional listener

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::feed::SprintWindow;

/// One of the three feeds a grid is built from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feed {
    Roster,
    HolidaysAndLeaves,
    Plan,
}

impl Feed {
    pub const ALL: [Feed; 3] = [Feed::Roster, Feed::HolidaysAndLeaves, Feed::Plan];
}

impl Display for Feed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Feed::Roster => write!(f, "team roster"),
            Feed::HolidaysAndLeaves => write!(f, "holidays and leaves"),
            Feed::Plan => write!(f, "optimizer plan"),
        }
    }
}

/// An event that happens during a refresh
#[derive(Clone, Debug, PartialEq)]
pub enum RefreshEvent {
    NotStarted,
    /// The three feeds of a sprint have been requested
    Fetching{ sprint: String },
    FeedReceived{ feed: Feed },
    FeedFailed{ feed: Feed },
    /// Every feed has been received, the cache is being written
    Saving,
    Finished{ success: bool },
}

impl Display for RefreshEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshEvent::NotStarted => write!(f, "Not started"),
            RefreshEvent::Fetching{sprint} => write!(f, "Fetching the feeds of {}...", sprint),
            RefreshEvent::FeedReceived{feed} => write!(f, "Received the {}", feed),
            RefreshEvent::FeedFailed{feed} => write!(f, "Unable to get the {}", feed),
            RefreshEvent::Saving => write!(f, "Saving the cache..."),
            RefreshEvent::Finished{success: true} => write!(f, "Refresh successfully finished"),
            RefreshEvent::Finished{success: false} => write!(f, "Refresh finished with errors"),
        }
    }
}

impl Default for RefreshEvent {
    fn default() -> Self {
        Self::NotStarted
    }
}


/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<RefreshEvent>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<RefreshEvent>;

/// Create a feeback channel, that can be used to retrieve the current progress of a refresh
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(RefreshEvent::default())
}


/// The outcome of the refresh of one sprint, feed by feed
pub struct RefreshProgress {
    sprint: String,
    received: Vec<Feed>,
    failed: Vec<(Feed, String)>,
    save_error: Option<String>,
    feedback_channel: Option<FeedbackSender>,
}

impl RefreshProgress {
    pub fn new(window: &SprintWindow) -> Self {
        Self {
            sprint: window.to_string(),
            received: Vec::new(),
            failed: Vec::new(),
            save_error: None,
            feedback_channel: None,
        }
    }

    pub fn new_with_feedback_channel(window: &SprintWindow, channel: FeedbackSender) -> Self {
        let mut progress = Self::new(window);
        progress.feedback_channel = Some(channel);
        progress
    }

    /// Record the result of fetching a feed, and returns its content if it succeeded
    pub fn track<T>(&mut self, feed: Feed, result: Result<T, Box<dyn Error>>) -> Option<T> {
        match result {
            Ok(content) => {
                log::debug!("[{}] Received the {}", self.sprint, feed);
                self.received.push(feed);
                self.feedback(RefreshEvent::FeedReceived{ feed });
                Some(content)
            },
            Err(err) => {
                log::error!("[{}] Unable to get the {}: {}", self.sprint, feed, err);
                self.failed.push((feed, err.to_string()));
                self.feedback(RefreshEvent::FeedFailed{ feed });
                None
            },
        }
    }

    /// Record that the fetched snapshot could not be written to disk
    pub fn save_failed(&mut self, err: &dyn Error) {
        log::warn!("[{}] Unable to save the cache: {}", self.sprint, err);
        self.save_error = Some(err.to_string());
    }

    /// The feeds that could not be fetched, with the reason why
    pub fn failed_feeds(&self) -> &[(Feed, String)] {
        &self.failed
    }

    /// Whether every feed has been received (the snapshot can be replaced)
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && Feed::ALL.iter().all(|feed| self.received.contains(feed))
    }

    /// Whether every feed has been received and saved
    pub fn is_success(&self) -> bool {
        self.is_complete() && self.save_error.is_none()
    }

    /// Send an event as a feedback to the listener (if any).
    pub fn feedback(&mut self, event: RefreshEvent) {
        if let Some(sender) = self.feedback_channel.as_ref() {
            // Nobody listening is not an error
            let _ = sender.send(event);
        }
    }

    /// Log a summary, tell the listener the refresh is over, and returns whether it succeeded
    pub fn finish(&mut self) -> bool {
        let success = self.is_success();
        if success {
            log::info!("[{}] Refresh finished", self.sprint);
        } else if self.is_complete() {
            log::warn!("[{}] Refresh finished, but the cache could not be saved", self.sprint);
        } else {
            let failed: Vec<String> = self.failed.iter().map(|(feed, _)| feed.to_string()).collect();
            log::warn!("[{}] Refresh failed ({}). The previous snapshot, if any, is kept", self.sprint, failed.join(", "));
        }
        self.feedback(RefreshEvent::Finished{ success });
        success
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> SprintWindow {
        SprintWindow::parse("2025-04-07", "2025-04-18").unwrap()
    }

    #[test]
    fn every_feed_is_needed() {
        let mut progress = RefreshProgress::new(&window());
        assert_eq!(progress.track(Feed::Roster, Ok(1)), Some(1));
        assert_eq!(progress.track::<u32>(Feed::Plan, Err("optimizer is down".into())), None);
        assert!(progress.is_complete() == false);

        assert_eq!(progress.failed_feeds().len(), 1);
        assert_eq!(progress.failed_feeds()[0].0, Feed::Plan);
        assert_eq!(progress.failed_feeds()[0].1, "optimizer is down");
    }

    #[test]
    fn save_errors_are_not_fetch_errors() {
        let mut progress = RefreshProgress::new(&window());
        for feed in Feed::ALL.iter() {
            progress.track(*feed, Ok(()));
        }
        assert!(progress.is_success());

        let err: Box<dyn Error> = "disk full".into();
        progress.save_failed(err.as_ref());
        assert!(progress.is_complete());
        assert!(progress.is_success() == false);
        assert!(progress.failed_feeds().is_empty());
    }

    #[test]
    fn listener_sees_every_feed() {
        let (sender, receiver) = feedback_channel();
        let mut progress = RefreshProgress::new_with_feedback_channel(&window(), sender);

        progress.track::<()>(Feed::HolidaysAndLeaves, Err("timeout".into()));
        assert_eq!(*receiver.borrow(), RefreshEvent::FeedFailed{ feed: Feed::HolidaysAndLeaves });

        assert!(progress.finish() == false);
        assert_eq!(*receiver.borrow(), RefreshEvent::Finished{ success: false });
    }
}
