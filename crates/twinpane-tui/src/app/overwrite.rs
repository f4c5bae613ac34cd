//! Overwrite resolution for conflicting copy/move requests.
//!
//! A session holds the conflicts reported for one request and turns the
//! user's answers into forced engine requests, one answer at a time.

use std::collections::VecDeque;
use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use twinpane_ops::{Conflict, OperationMode, OperationRequest};

/// Answer to "Overwrite NAME?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Replace the head conflict, then ask about the next.
    Overwrite,
    /// Leave the head conflict alone, then ask about the next.
    Skip,
    /// Replace everything still queued in one request.
    OverwriteAll,
    /// Leave everything still queued alone.
    SkipAll,
    /// Stop asking; nothing further is written.
    Cancel,
}

impl Decision {
    /// Map a key to a decision; other keys are ignored by the prompt.
    pub fn from_key_event(key: KeyEvent) -> Option<Self> {
        match key.code {
            KeyCode::Char('y' | 'Y') => Some(Self::Overwrite),
            KeyCode::Char('n' | 'N') => Some(Self::Skip),
            KeyCode::Char('a' | 'A') => Some(Self::OverwriteAll),
            KeyCode::Char('s' | 'S') => Some(Self::SkipAll),
            KeyCode::Esc => Some(Self::Cancel),
            _ => None,
        }
    }
}

/// Effect of one decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Forced request to hand to the engine, if the decision writes anything.
    pub request: Option<OperationRequest>,
    /// No conflicts remain; the prompt closes.
    pub finished: bool,
}

/// Conflicts awaiting an answer, in the order the engine reported them.
#[derive(Debug, Clone)]
pub struct OverwriteSession {
    queue: VecDeque<Conflict>,
    destination: PathBuf,
    mode: OperationMode,
    overwrite_all: bool,
    skip_all: bool,
    invocations: usize,
}

impl OverwriteSession {
    /// Start a session for conflicts of a request into `destination`.
    pub fn new(conflicts: Vec<Conflict>, destination: PathBuf, mode: OperationMode) -> Self {
        Self {
            queue: conflicts.into(),
            destination,
            mode,
            overwrite_all: false,
            skip_all: false,
            invocations: 0,
        }
    }

    /// The conflict being asked about.
    pub fn current(&self) -> Option<&Conflict> {
        self.queue.front()
    }

    /// Conflicts still queued, including the current one.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn mode(&self) -> OperationMode {
        self.mode
    }

    /// Engine requests produced so far.
    pub fn invocations(&self) -> usize {
        self.invocations
    }

    pub fn overwrite_all(&self) -> bool {
        self.overwrite_all
    }

    pub fn skip_all(&self) -> bool {
        self.skip_all
    }

    fn forced(&mut self, conflicts: impl IntoIterator<Item = Conflict>) -> Option<OperationRequest> {
        let sources: Vec<_> = conflicts.into_iter().map(|c| c.source).collect();
        if sources.is_empty() {
            return None;
        }
        self.invocations += 1;
        Some(OperationRequest::new(sources, self.destination.clone(), self.mode, true))
    }

    /// Apply a decision to the head of the queue.
    pub fn decide(&mut self, decision: Decision) -> Resolution {
        let request = match decision {
            Decision::Overwrite => {
                let head = self.queue.pop_front();
                self.forced(head)
            }
            Decision::Skip => {
                self.queue.pop_front();
                None
            }
            Decision::OverwriteAll => {
                self.overwrite_all = true;
                let rest: Vec<_> = self.queue.drain(..).collect();
                self.forced(rest)
            }
            Decision::SkipAll => {
                self.skip_all = true;
                self.queue.clear();
                None
            }
            Decision::Cancel => {
                self.queue.clear();
                self.overwrite_all = false;
                self.skip_all = false;
                None
            }
        };
        Resolution {
            request,
            finished: self.queue.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use twinpane_core::{Entry, EntryKind};

    fn conflict(name: &str) -> Conflict {
        let mut source = Entry::parent_of("/src");
        source.kind = EntryKind::File;
        source.name = name.into();
        source.path = PathBuf::from("/src").join(name);
        Conflict::new(source, PathBuf::from("/dst").join(name))
    }

    fn session(names: &[&str]) -> OverwriteSession {
        OverwriteSession::new(
            names.iter().map(|n| conflict(n)).collect(),
            PathBuf::from("/dst"),
            OperationMode::Copy,
        )
    }

    fn source_names(request: &OperationRequest) -> Vec<&str> {
        request.sources.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_overwrite_all_is_one_batch() {
        let mut session = session(&["a", "b", "c"]);
        let resolution = session.decide(Decision::OverwriteAll);

        assert!(resolution.finished);
        let request = resolution.request.unwrap();
        assert!(request.force);
        assert_eq!(source_names(&request), vec!["a", "b", "c"]);
        assert_eq!(request.destination, PathBuf::from("/dst"));
        assert_eq!(session.invocations(), 1);
        assert!(session.overwrite_all());
    }

    #[test]
    fn test_overwrite_all_after_skip_covers_rest() {
        let mut session = session(&["a", "b", "c"]);
        assert_eq!(
            session.decide(Decision::Skip),
            Resolution {
                request: None,
                finished: false
            }
        );
        let request = session.decide(Decision::OverwriteAll).request.unwrap();
        assert_eq!(source_names(&request), vec!["b", "c"]);
        assert_eq!(session.invocations(), 1);
    }

    #[test]
    fn test_skip_all_invokes_nothing() {
        let mut session = session(&["a", "b", "c"]);
        let resolution = session.decide(Decision::SkipAll);
        assert_eq!(
            resolution,
            Resolution {
                request: None,
                finished: true
            }
        );
        assert_eq!(session.invocations(), 0);
        assert!(session.skip_all());
    }

    #[test]
    fn test_one_at_a_time() {
        let mut session = session(&["a", "b", "c"]);
        assert_eq!(session.current().unwrap().name(), "a");

        let first = session.decide(Decision::Overwrite);
        assert!(!first.finished);
        assert_eq!(source_names(first.request.as_ref().unwrap()), vec!["a"]);

        assert!(session.decide(Decision::Skip).request.is_none());
        assert_eq!(session.current().unwrap().name(), "c");
        assert_eq!(session.remaining(), 1);

        let last = session.decide(Decision::Overwrite);
        assert!(last.finished);
        assert_eq!(source_names(last.request.as_ref().unwrap()), vec!["c"]);
        assert_eq!(session.invocations(), 2);
    }

    #[test]
    fn test_cancel_clears_everything() {
        let mut session = session(&["a", "b"]);
        let resolution = session.decide(Decision::Cancel);
        assert!(resolution.finished);
        assert!(resolution.request.is_none());
        assert!(!session.overwrite_all());
        assert!(!session.skip_all());
        assert!(session.current().is_none());
    }

    #[test]
    fn test_decision_keys() {
        let key = |c| KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE);
        assert_eq!(Decision::from_key_event(key('y')), Some(Decision::Overwrite));
        assert_eq!(Decision::from_key_event(key('n')), Some(Decision::Skip));
        assert_eq!(Decision::from_key_event(key('A')), Some(Decision::OverwriteAll));
        assert_eq!(Decision::from_key_event(key('s')), Some(Decision::SkipAll));
        assert_eq!(
            Decision::from_key_event(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
            Some(Decision::Cancel)
        );
        assert_eq!(Decision::from_key_event(key('x')), None);
    }
}
