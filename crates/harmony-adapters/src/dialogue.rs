//! Dialogue adapter: conversational coherence against directive pressure

use harmony_core::Result;
use harmony_invariant::{InvariantKernel, InvariantParameters, InvariantRecord};
use tracing::trace;

/// Phrases counted as directive push when no keyword list is given
pub const DEFAULT_DIRECTIVE_KEYWORDS: [&str; 5] = ["should", "must", "need to", "have to", "ought to"];

/// Applies the growth invariant to dialogue influence
#[derive(Debug, Clone, Copy, Default)]
pub struct DialogueAdapter {
    kernel: InvariantKernel,
}

impl DialogueAdapter {
    pub fn new(params: InvariantParameters) -> Result<Self> {
        Ok(Self {
            kernel: InvariantKernel::new(params)?,
        })
    }

    pub fn with_kernel(kernel: InvariantKernel) -> Self {
        Self { kernel }
    }

    pub fn kernel(&self) -> &InvariantKernel {
        &self.kernel
    }

    /// Dialogue coherence as coherence, recipient resistance as stress and
    /// linguistic push as forcing
    pub fn check_influence(
        &self,
        t: &[f64],
        dialogue_coherence: &[f64],
        recipient_resistance: &[f64],
        linguistic_push: &[f64],
    ) -> InvariantRecord {
        self.kernel
            .check(t, dialogue_coherence, recipient_resistance, linguistic_push)
    }

    /// Directive phrases per word for each utterance
    ///
    /// Matching is case-insensitive and counts non-overlapping occurrences,
    /// so "must" also matches inside "mustard". Empty keywords are ignored
    /// and an utterance with no words counts as one word.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use harmony_adapters::DialogueAdapter;
    ///
    /// let push = DialogueAdapter::default()
    ///     .estimate_linguistic_push(&["You MUST do this now", "Take your time"], None);
    /// assert_eq!(push, vec![0.2, 0.0]);
    /// ```
    pub fn estimate_linguistic_push<S: AsRef<str>>(
        &self,
        texts: &[S],
        keywords: Option<&[&str]>,
    ) -> Vec<f64> {
        let keywords: Vec<String> = keywords
            .unwrap_or(&DEFAULT_DIRECTIVE_KEYWORDS)
            .iter()
            .filter(|k| !k.is_empty())
            .map(|k| k.to_lowercase())
            .collect();

        texts
            .iter()
            .map(|text| {
                let text = text.as_ref();
                let lowered = text.to_lowercase();
                let directives: usize = keywords
                    .iter()
                    .map(|k| lowered.matches(k.as_str()).count())
                    .sum();
                let words = text.split_whitespace().count().max(1);
                trace!(directives, words, "Linguistic push");
                directives as f64 / words as f64
            })
            .collect()
    }
}
