//! Chat module - question/answer turns about the uploaded document

/// Answer text used when a question could not be answered
pub const GENERIC_FAILURE_ANSWER: &str = "Sorry, something went wrong while answering that question.";

/// One question and its answer
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    /// Question as submitted
    pub question: String,

    /// Answer text (or the generic failure message)
    pub answer: String,

    /// Server-side query time in seconds, if reported
    pub query_time: Option<f64>,

    /// Tokens consumed, if reported
    pub token_usage: Option<u64>,

    /// Whether the answer is the generic failure message
    pub failed: bool,
}

impl ChatTurn {
    /// A successfully answered turn
    pub fn answered(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            query_time: None,
            token_usage: None,
            failed: false,
        }
    }

    /// A turn whose request failed
    pub fn failure(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: GENERIC_FAILURE_ANSWER.to_string(),
            query_time: None,
            token_usage: None,
            failed: true,
        }
    }
}

/// Ordered list of turns
///
/// Turns are never mutated once added. Each turn is keyed by the sequence
/// number of the question that produced it, and the transcript stays sorted
/// by that key, so an answer that arrives late still lands in question order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    entries: Vec<(u64, ChatTurn)>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn after every existing one
    pub fn push(&mut self, turn: ChatTurn) {
        let seq = self.entries.last().map(|(s, _)| s + 1).unwrap_or(0);
        self.entries.push((seq, turn));
    }

    /// Insert a turn at the position given by its question sequence number
    ///
    /// Turns with equal sequence numbers keep arrival order.
    pub fn insert(&mut self, seq: u64, turn: ChatTurn) {
        let at = self.entries.partition_point(|(s, _)| *s <= seq);
        self.entries.insert(at, (seq, turn));
    }

    /// Turns in order
    pub fn turns(&self) -> impl Iterator<Item = &ChatTurn> {
        self.entries.iter().map(|(_, t)| t)
    }

    /// Most recent turn in transcript order
    pub fn last(&self) -> Option<&ChatTurn> {
        self.entries.last().map(|(_, t)| t)
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no turns
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every turn
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
