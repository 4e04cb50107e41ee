//! Hero typewriter
//!
//! Types each phrase one character at a time, holds, deletes it, then moves
//! on to the next phrase, forever.

use folio_dom::{DomTree, NodeId};
use folio_runtime::{EventLoop, TaskHandle};

use crate::config::TypewriterConfig;
use crate::error::SetupError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Typing,
    Deleting,
}

/// Typewriter state machine
///
/// `char_index` counts Unicode scalar values and always stays within the
/// current phrase.
#[derive(Debug, Clone)]
pub struct Typewriter {
    phrases: Vec<String>,
    phrase_index: usize,
    char_index: usize,
    phase: Phase,
    timing: TypewriterConfig,
}

impl Typewriter {
    pub fn new(config: &TypewriterConfig) -> Result<Self, SetupError> {
        let phrases: Vec<String> = config.phrases.iter().filter(|p| !p.is_empty()).cloned().collect();
        if phrases.is_empty() {
            return Err(SetupError::NoPhrases);
        }
        Ok(Self {
            phrases,
            phrase_index: 0,
            char_index: 0,
            phase: Phase::Typing,
            timing: config.clone(),
        })
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    pub fn char_index(&self) -> usize {
        self.char_index
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn phrase_len(&self) -> usize {
        self.phrases[self.phrase_index].chars().count()
    }

    /// Visible text
    pub fn text(&self) -> String {
        self.phrases[self.phrase_index].chars().take(self.char_index).collect()
    }

    /// Advance one character; returns the new text and the delay to the next step
    pub fn step(&mut self) -> (String, u64) {
        match self.phase {
            Phase::Typing => {
                self.char_index = (self.char_index + 1).min(self.phrase_len());
                let text = self.text();
                if self.char_index == self.phrase_len() {
                    self.phase = Phase::Deleting;
                    (text, self.timing.hold_full_ms)
                } else {
                    (text, self.timing.type_ms)
                }
            }
            Phase::Deleting => {
                self.char_index = self.char_index.saturating_sub(1);
                let text = self.text();
                if self.char_index == 0 {
                    self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
                    self.phase = Phase::Typing;
                    (text, self.timing.hold_empty_ms)
                } else {
                    (text, self.timing.delete_ms)
                }
            }
        }
    }
}

/// Typewriter bound to the hero subtitle
#[derive(Debug)]
pub struct TypewriterTask {
    node: NodeId,
    machine: Typewriter,
    handle: TaskHandle,
}

impl TypewriterTask {
    /// Clear the subtitle and schedule the first step
    pub fn start<J: Clone>(
        tree: &mut DomTree,
        node: Option<NodeId>,
        config: &TypewriterConfig,
        event_loop: &mut EventLoop<J>,
        job: J,
    ) -> Result<Self, SetupError> {
        let node = node.ok_or(SetupError::MissingElement("hero subtitle"))?;
        let machine = Typewriter::new(config)?;

        tree.set_text_content(node, "");
        let handle = event_loop.set_timeout(job, config.start_delay_ms);
        Ok(Self { node, machine, handle })
    }

    pub fn machine(&self) -> &Typewriter {
        &self.machine
    }

    /// Run one step and re-arm under the same handle
    pub fn step<J: Clone>(&mut self, tree: &mut DomTree, event_loop: &mut EventLoop<J>, job: J) {
        if self.handle.is_stopped() {
            return;
        }
        let (text, delay) = self.machine.step();
        tree.set_text_content(self.node, &text);
        // A zero delay would re-arm at the current instant forever
        event_loop.schedule(&self.handle, job, delay.max(1));
    }

    pub fn stop(&self) {
        self.handle.stop();
    }

    pub fn is_stopped(&self) -> bool {
        self.handle.is_stopped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::Document;

    fn config(phrases: &[&str]) -> TypewriterConfig {
        TypewriterConfig {
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
            ..TypewriterConfig::default()
        }
    }

    #[test]
    fn test_types_holds_and_deletes() {
        let mut tw = Typewriter::new(&config(&["ab", "c"])).unwrap();

        assert_eq!(tw.step(), ("a".to_string(), 100));
        assert_eq!(tw.step(), ("ab".to_string(), 2000));
        assert_eq!(tw.phase(), Phase::Deleting);
        assert_eq!(tw.step(), ("a".to_string(), 50));
        assert_eq!(tw.step(), (String::new(), 1200));
        assert_eq!(tw.phrase_index(), 1);
        assert_eq!(tw.phase(), Phase::Typing);
    }

    #[test]
    fn test_wraps_to_first_phrase() {
        let mut tw = Typewriter::new(&config(&["x", "y"])).unwrap();
        // x typed, x deleted, y typed, y deleted
        for _ in 0..4 {
            tw.step();
        }
        assert_eq!(tw.phrase_index(), 0);
        assert_eq!(tw.char_index(), 0);
        assert_eq!(tw.step().0, "x");
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let mut tw = Typewriter::new(&config(&["Código"])).unwrap();
        let typed: Vec<String> = (0..6).map(|_| tw.step().0).collect();
        assert_eq!(typed[1], "Có");
        assert_eq!(typed[5], "Código");
        assert_eq!(tw.char_index(), 6);
        assert_eq!(tw.phase(), Phase::Deleting);
    }

    #[test]
    fn test_no_phrases() {
        assert_eq!(Typewriter::new(&config(&[])).unwrap_err(), SetupError::NoPhrases);
        assert_eq!(Typewriter::new(&config(&[""])).unwrap_err(), SetupError::NoPhrases);
    }

    #[test]
    fn test_task_runs_until_stopped() {
        let mut doc = Document::new("about:blank");
        let body = doc.body();
        let subtitle = doc.tree_mut().create_element("p");
        doc.tree_mut().set_text_content(subtitle, "static");
        doc.tree_mut().append_child(body, subtitle);

        let mut loop_ = EventLoop::new();
        let mut task =
            TypewriterTask::start(doc.tree_mut(), Some(subtitle), &config(&["hi"]), &mut loop_, ()).unwrap();
        assert_eq!(doc.tree().text_content(subtitle), "");

        assert!(loop_.tick(999).is_empty());
        for () in loop_.tick(1) {
            task.step(doc.tree_mut(), &mut loop_, ());
        }
        assert_eq!(doc.tree().text_content(subtitle), "h");

        task.stop();
        assert!(loop_.tick(10_000).is_empty());
        assert_eq!(doc.tree().text_content(subtitle), "h");
    }

    #[test]
    fn test_zero_delays_still_advance_the_clock() {
        let mut doc = Document::new("about:blank");
        let body = doc.body();
        let subtitle = doc.tree_mut().create_element("p");
        doc.tree_mut().append_child(body, subtitle);

        let zero = TypewriterConfig {
            start_delay_ms: 0,
            type_ms: 0,
            delete_ms: 0,
            hold_full_ms: 0,
            hold_empty_ms: 0,
            ..config(&["ab"])
        };
        let mut loop_ = EventLoop::new();
        let mut task = TypewriterTask::start(doc.tree_mut(), Some(subtitle), &zero, &mut loop_, ()).unwrap();

        let mut steps = 0;
        while let Some(()) = loop_.pop_due(10) {
            task.step(doc.tree_mut(), &mut loop_, ());
            steps += 1;
        }
        // One step per millisecond from t=0 through t=10
        assert_eq!(steps, 11);
        assert_eq!(loop_.now(), 10);
    }
}
