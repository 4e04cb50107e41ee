//! Statistic counters
//!
//! Each `.stat-number` counts up from zero to the number in its text, then
//! snaps back to the exact original text.

use folio_dom::{DomTree, NodeId};
use folio_runtime::{EventLoop, TaskHandle};

use crate::config::CounterConfig;
use crate::error::SetupError;

/// Parsed counter text: `prefix` + `target` + `suffix`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterSpec {
    pub prefix: String,
    pub target: u64,
    pub suffix: String,
}

impl CounterSpec {
    /// Parse text like `150+` or `~25`
    pub fn parse(text: &str) -> Result<Self, SetupError> {
        let unparsable = || SetupError::UnparsableCounter(text.to_string());
        let trimmed = text.trim();
        let (body, suffix) = match trimmed.strip_suffix('+') {
            Some(rest) => (rest, "+"),
            None => (trimmed, ""),
        };

        let digits_at = body
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit())
            .last()
            .map(|(i, _)| i)
            .ok_or_else(unparsable)?;
        let target = body[digits_at..].parse().map_err(|_| unparsable())?;

        Ok(Self {
            prefix: body[..digits_at].to_string(),
            target,
            suffix: suffix.to_string(),
        })
    }

    pub fn render(&self, value: u64) -> String {
        format!("{}{}{}", self.prefix, value, self.suffix)
    }
}

#[derive(Debug)]
struct Counter {
    node: NodeId,
    spec: CounterSpec,
    original: String,
    value: f64,
    increment: f64,
    ticks: u32,
    handle: Option<TaskHandle>,
}

/// All counters on the page; started at most once
#[derive(Debug)]
pub struct CounterGroup {
    counters: Vec<Counter>,
    config: CounterConfig,
    started: bool,
}

impl CounterGroup {
    /// Parse every counter; unparsable ones are skipped
    pub fn setup(tree: &DomTree, nodes: &[NodeId], config: &CounterConfig) -> Self {
        let counters = nodes
            .iter()
            .filter_map(|&node| {
                let original = tree.text_content(node);
                match CounterSpec::parse(&original) {
                    Ok(spec) => Some(Counter {
                        node,
                        increment: spec.target as f64 / f64::from(config.steps.max(1)),
                        spec,
                        original,
                        value: 0.0,
                        ticks: 0,
                        handle: None,
                    }),
                    Err(e) => {
                        tracing::debug!("Skipping counter: {}", e);
                        None
                    }
                }
            })
            .collect();

        Self {
            counters,
            config: config.clone(),
            started: false,
        }
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Reset every counter to zero and schedule its ticks
    ///
    /// Returns false if the group already ran.
    pub fn start<J: Clone>(&mut self, tree: &mut DomTree, event_loop: &mut EventLoop<J>, job: impl Fn(usize) -> J) -> bool {
        if self.started {
            return false;
        }
        self.started = true;

        let interval = self.config.interval_ms();
        for (index, counter) in self.counters.iter_mut().enumerate() {
            tree.set_text_content(counter.node, &counter.spec.render(0));
            counter.handle = Some(event_loop.set_interval(job(index), interval));
        }
        tracing::debug!("Started {} counters", self.counters.len());
        true
    }

    /// Advance one counter by one step
    pub fn tick(&mut self, tree: &mut DomTree, index: usize) {
        let steps = self.config.steps.max(1);
        let Some(counter) = self.counters.get_mut(index) else {
            return;
        };

        counter.value += counter.increment;
        counter.ticks += 1;

        if counter.value >= counter.spec.target as f64 || counter.ticks >= steps {
            tree.set_text_content(counter.node, &counter.original);
            if let Some(handle) = counter.handle.take() {
                handle.stop();
            }
            tracing::trace!("Counter {:?} finished", counter.node);
        } else {
            let shown = counter.value.floor() as u64;
            tree.set_text_content(counter.node, &counter.spec.render(shown));
        }
    }

    pub fn is_running(&self) -> bool {
        self.counters.iter().any(|c| c.handle.is_some())
    }

    pub fn stop(&mut self) {
        for counter in &mut self.counters {
            if let Some(handle) = counter.handle.take() {
                handle.stop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::Document;

    #[test]
    fn test_parse() {
        assert_eq!(
            CounterSpec::parse("150+").unwrap(),
            CounterSpec { prefix: String::new(), target: 150, suffix: "+".into() }
        );
        assert_eq!(CounterSpec::parse(" 3 ").unwrap().target, 3);
        assert_eq!(CounterSpec::parse("~25").unwrap().prefix, "~");
        assert_eq!(
            CounterSpec::parse("many").unwrap_err(),
            SetupError::UnparsableCounter("many".into())
        );
        assert!(CounterSpec::parse("+").is_err());
    }

    fn stat(doc: &mut Document, text: &str) -> NodeId {
        let body = doc.body();
        let tree = doc.tree_mut();
        let node = tree.create_element("div");
        tree.set_text_content(node, text);
        tree.append_child(body, node);
        node
    }

    #[test]
    fn test_counts_up_monotonically_to_exact_text() {
        let mut doc = Document::new("about:blank");
        let node = stat(&mut doc, "150+");
        let mut loop_ = EventLoop::new();
        let mut group = CounterGroup::setup(doc.tree(), &[node], &CounterConfig::default());

        assert!(group.start(doc.tree_mut(), &mut loop_, |i| i));
        assert_eq!(doc.tree().text_content(node), "0+");

        let mut previous = 0;
        let mut ticks = 0;
        while group.is_running() {
            for index in loop_.tick(50) {
                group.tick(doc.tree_mut(), index);
                ticks += 1;
            }
            let text = doc.tree().text_content(node);
            let shown: u64 = text.trim_end_matches('+').parse().unwrap();
            assert!(shown >= previous);
            previous = shown;
        }

        assert_eq!(doc.tree().text_content(node), "150+");
        assert_eq!(ticks, 30);
        assert!(!loop_.has_pending_work());
    }

    #[test]
    fn test_starts_once_and_skips_bad_text() {
        let mut doc = Document::new("about:blank");
        let good = stat(&mut doc, "12");
        let bad = stat(&mut doc, "lots");
        let mut loop_ = EventLoop::new();
        let mut group = CounterGroup::setup(doc.tree(), &[good, bad], &CounterConfig::default());

        assert_eq!(group.len(), 1);
        assert!(group.start(doc.tree_mut(), &mut loop_, |i| i));
        assert!(!group.start(doc.tree_mut(), &mut loop_, |i| i));
        assert_eq!(loop_.pending(), 1);
        assert_eq!(doc.tree().text_content(bad), "lots");
    }

    #[test]
    fn test_zero_target_finishes_first_tick() {
        let mut doc = Document::new("about:blank");
        let node = stat(&mut doc, "0");
        let mut loop_ = EventLoop::new();
        let mut group = CounterGroup::setup(doc.tree(), &[node], &CounterConfig::default());
        group.start(doc.tree_mut(), &mut loop_, |i| i);

        for index in loop_.tick(50) {
            group.tick(doc.tree_mut(), index);
        }
        assert!(!group.is_running());
        assert_eq!(doc.tree().text_content(node), "0");
    }
}
