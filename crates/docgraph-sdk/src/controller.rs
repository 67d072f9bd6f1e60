//! Upload/chat controller.
//!
//! All front-end state lives in [`Controller`] and only changes through its
//! operations. Every request is split into a `begin_*` step that validates
//! input, raises the loading flag and hands out a ticket, and a `finish_*`
//! step that applies the response carried back with that ticket. The
//! `submit_*` helpers run both steps around a [`DocumentService`] call.
//!
//! Requests may overlap. Tickets carry a sequence number and the epoch they
//! were issued in; the epoch advances on every applied upload and on
//! [`Controller::clear`]. Responses from an older epoch are dropped, upload
//! responses older than the last applied upload are dropped, and chat turns
//! are ordered by the sequence number of their question.

use crate::error::{ControllerError, SdkError};
use crate::service::{ChatAnswer, DocumentService, UploadFile, UploadReceipt};
use docgraph_domain::{
    project, ChatTurn, ClusterAssignment, ClusterMap, DocumentKind, Projection, Transcript, Triple,
};
use tracing::{debug, info, warn};

/// Handle for an upload in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    seq: u64,
    kind: DocumentKind,
    file_name: String,
}

impl UploadTicket {
    /// Kind the document is uploaded as
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Name of the uploaded file
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

/// Handle for a graph fetch in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphTicket {
    seq: u64,
    epoch: u64,
    upload_id: String,
}

impl GraphTicket {
    /// Upload the graph belongs to
    pub fn upload_id(&self) -> &str {
        &self.upload_id
    }
}

/// Handle for a chat question in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionTicket {
    seq: u64,
    epoch: u64,
    kind: DocumentKind,
    upload_id: String,
    question: String,
}

impl QuestionTicket {
    /// Question text
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Upload the question is about
    pub fn upload_id(&self) -> &str {
        &self.upload_id
    }

    /// Kind of the document, which selects the chat endpoint
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }
}

/// What a `finish_*` step did with a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The response was applied to the state
    Applied,
    /// The request failed; the failure is visible in the state
    Failed,
    /// The response was superseded and ignored
    Stale,
    /// Nothing was sent (empty question or no document)
    Skipped,
}

/// Front-end state for one browsing session
#[derive(Debug, Default)]
pub struct Controller {
    upload_id: Option<String>,
    kind: Option<DocumentKind>,
    status_message: Option<String>,
    error_message: Option<String>,
    input: String,
    transcript: Transcript,
    triples: Vec<Triple>,
    clusters: ClusterMap,
    graph: Projection,

    next_seq: u64,
    epoch: u64,
    upload_floor: u64,
    graph_floor: u64,

    uploads_in_flight: usize,
    graph_fetches_in_flight: usize,
    questions_in_flight: usize,
}

impl Controller {
    /// Create an empty controller with no document
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // State accessors
    // ---------------------------------------------------------------------

    /// Identifier of the current document
    pub fn upload_id(&self) -> Option<&str> {
        self.upload_id.as_deref()
    }

    /// Kind of the current document
    pub fn document_kind(&self) -> Option<DocumentKind> {
        self.kind
    }

    /// Status message of the last applied upload
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// User-visible error from the last failed upload or graph fetch
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Current contents of the question input field
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the contents of the question input field
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Question/answer transcript for the current document
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Triples of the current document
    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    /// Cluster assignments of the current document
    pub fn clusters(&self) -> &ClusterMap {
        &self.clusters
    }

    /// Projected graph of the current document
    pub fn graph(&self) -> &Projection {
        &self.graph
    }

    /// An upload is in flight
    pub fn is_uploading(&self) -> bool {
        self.uploads_in_flight > 0
    }

    /// A graph fetch is in flight
    pub fn is_loading_graph(&self) -> bool {
        self.graph_fetches_in_flight > 0
    }

    /// A question is in flight
    pub fn is_asking(&self) -> bool {
        self.questions_in_flight > 0
    }

    /// Any request is in flight
    pub fn is_busy(&self) -> bool {
        self.is_uploading() || self.is_loading_graph() || self.is_asking()
    }

    // ---------------------------------------------------------------------
    // Upload
    // ---------------------------------------------------------------------

    /// Validate a selected file and mark an upload as in flight
    ///
    /// `kind` overrides the kind inferred from the file extension.
    pub fn begin_upload(
        &mut self,
        file: &UploadFile,
        kind: Option<DocumentKind>,
    ) -> Result<UploadTicket, ControllerError> {
        if file.is_empty() {
            return Err(ControllerError::NoFileSelected);
        }

        let kind = kind
            .or_else(|| DocumentKind::from_path(&file.file_name))
            .ok_or_else(|| ControllerError::UnknownDocumentKind(file.file_name.clone()))?;

        self.uploads_in_flight += 1;
        Ok(UploadTicket {
            seq: self.take_seq(),
            kind,
            file_name: file.file_name.clone(),
        })
    }

    /// Apply the result of an upload
    ///
    /// On success the document becomes current: transcript and graph are
    /// reset and, for documents with a graph, a graph ticket is returned for
    /// the follow-up fetch. On failure only the error message changes.
    pub fn finish_upload(
        &mut self,
        ticket: UploadTicket,
        result: Result<UploadReceipt, SdkError>,
    ) -> (Outcome, Option<GraphTicket>) {
        self.uploads_in_flight = self.uploads_in_flight.saturating_sub(1);

        if ticket.seq < self.upload_floor {
            debug!(file = %ticket.file_name, "Dropping superseded upload response");
            return (Outcome::Stale, None);
        }

        match result {
            Ok(receipt) => {
                info!(upload_id = %receipt.upload_id, kind = %ticket.kind, "Document ready");

                self.epoch += 1;
                self.upload_floor = ticket.seq + 1;
                self.upload_id = Some(receipt.upload_id);
                self.kind = Some(ticket.kind);
                self.status_message = Some(receipt.message);
                self.error_message = None;
                self.transcript.clear();
                self.reset_graph();

                let graph_ticket = if ticket.kind.has_graph() {
                    self.begin_graph_fetch()
                } else {
                    None
                };
                (Outcome::Applied, graph_ticket)
            }
            Err(e) => {
                warn!(file = %ticket.file_name, error = %e, "Upload failed");
                self.error_message = Some(format!("Upload failed: {}", e));
                (Outcome::Failed, None)
            }
        }
    }

    /// Make a previously uploaded document current without uploading again
    ///
    /// Behaves like an applied upload: in-flight responses become stale and
    /// a graph ticket is returned for documents with a graph.
    pub fn resume(&mut self, upload_id: impl Into<String>, kind: DocumentKind) -> Option<GraphTicket> {
        let upload_id = upload_id.into();
        if upload_id.is_empty() {
            return None;
        }

        self.epoch += 1;
        self.upload_floor = self.next_seq;
        self.upload_id = Some(upload_id);
        self.kind = Some(kind);
        self.status_message = None;
        self.error_message = None;
        self.transcript.clear();
        self.reset_graph();

        if kind.has_graph() {
            self.begin_graph_fetch()
        } else {
            None
        }
    }

    /// Upload a file and, for PDFs, load its graph
    ///
    /// Returns the upload outcome; graph failures are reported through
    /// [`Controller::error_message`] without touching the upload.
    pub async fn submit_file<S: DocumentService>(
        &mut self,
        service: &S,
        file: UploadFile,
        kind: Option<DocumentKind>,
    ) -> Result<Outcome, ControllerError> {
        let ticket = self.begin_upload(&file, kind)?;
        let result = service.upload(ticket.kind, &file).await;
        let (outcome, graph_ticket) = self.finish_upload(ticket, result);

        if let Some(graph_ticket) = graph_ticket {
            self.load_graph(service, graph_ticket).await;
        }
        Ok(outcome)
    }

    // ---------------------------------------------------------------------
    // Graph
    // ---------------------------------------------------------------------

    /// Mark a graph fetch for the current document as in flight
    ///
    /// `None` when there is no current document or it has no graph.
    pub fn begin_graph_fetch(&mut self) -> Option<GraphTicket> {
        let upload_id = self.upload_id.clone()?;
        if !self.kind.is_some_and(|k| k.has_graph()) {
            return None;
        }

        self.graph_fetches_in_flight += 1;
        Some(GraphTicket {
            seq: self.take_seq(),
            epoch: self.epoch,
            upload_id,
        })
    }

    /// Apply fetched triples and cluster assignments
    pub fn finish_graph_fetch(
        &mut self,
        ticket: GraphTicket,
        result: Result<(Vec<Triple>, Vec<ClusterAssignment>), SdkError>,
    ) -> Outcome {
        self.graph_fetches_in_flight = self.graph_fetches_in_flight.saturating_sub(1);

        if ticket.epoch != self.epoch {
            debug!(upload_id = %ticket.upload_id, seq = ticket.seq, "Dropping graph for a previous document");
            return Outcome::Stale;
        }
        if ticket.seq < self.graph_floor {
            debug!(upload_id = %ticket.upload_id, seq = ticket.seq, "Dropping superseded graph response");
            return Outcome::Stale;
        }

        match result {
            Ok((triples, assignments)) => {
                self.graph_floor = ticket.seq + 1;
                self.error_message = None;
                self.clusters = assignments.into_iter().collect();
                self.graph = project(&triples, &self.clusters);
                self.triples = triples;
                info!(
                    upload_id = %ticket.upload_id,
                    nodes = self.graph.node_count(),
                    edges = self.graph.edge_count(),
                    "Graph loaded"
                );
                Outcome::Applied
            }
            Err(e) => {
                warn!(upload_id = %ticket.upload_id, error = %e, "Graph fetch failed");
                self.error_message = Some(format!("Failed to load graph: {}", e));
                Outcome::Failed
            }
        }
    }

    /// Fetch triples and clusters for a graph ticket and apply them
    pub async fn load_graph<S: DocumentService>(&mut self, service: &S, ticket: GraphTicket) -> Outcome {
        let result = tokio::try_join!(
            service.fetch_triples(&ticket.upload_id),
            service.fetch_clusters(&ticket.upload_id)
        );
        self.finish_graph_fetch(ticket, result)
    }

    /// Re-fetch the graph of the current document
    pub async fn refresh_graph<S: DocumentService>(&mut self, service: &S) -> Outcome {
        match self.begin_graph_fetch() {
            Some(ticket) => self.load_graph(service, ticket).await,
            None => Outcome::Skipped,
        }
    }

    // ---------------------------------------------------------------------
    // Chat
    // ---------------------------------------------------------------------

    /// Take the question from the input field and mark it as in flight
    ///
    /// `None` (and no state change) when the question is blank or there is
    /// no current document.
    pub fn begin_question(&mut self) -> Option<QuestionTicket> {
        let question = self.input.trim();
        if question.is_empty() {
            return None;
        }
        let upload_id = self.upload_id.clone().filter(|id| !id.is_empty())?;
        let kind = self.kind?;

        let question = question.to_string();
        self.input.clear();
        self.questions_in_flight += 1;

        Some(QuestionTicket {
            seq: self.take_seq(),
            epoch: self.epoch,
            kind,
            upload_id,
            question,
        })
    }

    /// Record the answer (or a generic failure turn) for a question
    pub fn finish_question(
        &mut self,
        ticket: QuestionTicket,
        result: Result<ChatAnswer, SdkError>,
    ) -> Outcome {
        self.questions_in_flight = self.questions_in_flight.saturating_sub(1);

        if ticket.epoch != self.epoch {
            debug!(upload_id = %ticket.upload_id, seq = ticket.seq, "Dropping answer for a previous document");
            return Outcome::Stale;
        }

        let (turn, outcome) = match result {
            Ok(answer) => (
                ChatTurn {
                    question: ticket.question,
                    answer: answer.answer,
                    query_time: answer.query_time,
                    token_usage: answer.token_usage,
                    failed: false,
                },
                Outcome::Applied,
            ),
            Err(e) => {
                warn!(upload_id = %ticket.upload_id, error = %e, "Question failed");
                (ChatTurn::failure(ticket.question), Outcome::Failed)
            }
        };

        self.transcript.insert(ticket.seq, turn);
        outcome
    }

    /// Send the question in the input field and record the turn
    pub async fn submit_question<S: DocumentService>(&mut self, service: &S) -> Outcome {
        let Some(ticket) = self.begin_question() else {
            return Outcome::Skipped;
        };
        let result = service
            .ask(ticket.kind, &ticket.upload_id, &ticket.question)
            .await;
        self.finish_question(ticket, result)
    }

    // ---------------------------------------------------------------------
    // Reset
    // ---------------------------------------------------------------------

    /// Forget the current document and everything derived from it
    ///
    /// Responses to requests issued before the clear are dropped.
    pub fn clear(&mut self) {
        self.epoch += 1;
        self.upload_floor = self.next_seq;
        self.upload_id = None;
        self.kind = None;
        self.status_message = None;
        self.error_message = None;
        self.input.clear();
        self.transcript.clear();
        self.reset_graph();
    }

    /// Drop the graph; fetches issued before this point become stale
    fn reset_graph(&mut self) {
        self.graph_floor = self.next_seq;
        self.triples.clear();
        self.clusters = ClusterMap::new();
        self.graph = Projection::default();
    }

    fn take_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn receipt(id: &str) -> UploadReceipt {
        UploadReceipt {
            message: "PDF uploaded successfully".to_string(),
            upload_id: id.to_string(),
        }
    }

    fn answer(text: &str) -> ChatAnswer {
        ChatAnswer {
            answer: text.to_string(),
            query_time: None,
            token_usage: None,
        }
    }

    fn with_document(kind: DocumentKind, id: &str) -> Controller {
        let mut controller = Controller::new();
        let file = UploadFile::new(format!("doc.{}", kind), b"data".to_vec());
        let ticket = controller.begin_upload(&file, None).unwrap();
        let (outcome, graph) = controller.finish_upload(ticket, Ok(receipt(id)));
        assert_eq!(outcome, Outcome::Applied);
        if let Some(graph) = graph {
            controller.finish_graph_fetch(graph, Ok((Vec::new(), Vec::new())));
        }
        controller
    }

    #[test]
    fn test_begin_upload_requires_file() {
        let mut controller = Controller::new();
        let err = controller
            .begin_upload(&UploadFile::new("a.pdf", Vec::new()), None)
            .unwrap_err();
        assert_eq!(err, ControllerError::NoFileSelected);
        assert!(!controller.is_uploading());
    }

    #[test]
    fn test_begin_upload_unknown_kind() {
        let mut controller = Controller::new();
        let err = controller
            .begin_upload(&UploadFile::new("notes.txt", b"x".to_vec()), None)
            .unwrap_err();
        assert!(matches!(err, ControllerError::UnknownDocumentKind(_)));

        let ticket = controller
            .begin_upload(&UploadFile::new("notes.txt", b"x".to_vec()), Some(DocumentKind::Csv))
            .unwrap();
        assert_eq!(ticket.kind(), DocumentKind::Csv);
    }

    #[test]
    fn test_csv_upload_has_no_graph_fetch() {
        let mut controller = Controller::new();
        let ticket = controller
            .begin_upload(&UploadFile::new("rows.csv", b"a,b".to_vec()), None)
            .unwrap();
        assert!(controller.is_uploading());

        let (outcome, graph) = controller.finish_upload(ticket, Ok(receipt("3")));
        assert_eq!(outcome, Outcome::Applied);
        assert!(graph.is_none());
        assert!(!controller.is_uploading());
        assert_eq!(controller.upload_id(), Some("3"));
        assert_eq!(controller.document_kind(), Some(DocumentKind::Csv));
    }

    #[test]
    fn test_failed_upload_keeps_previous_document() {
        let mut controller = with_document(DocumentKind::Pdf, "1");

        let ticket = controller
            .begin_upload(&UploadFile::new("next.pdf", b"%PDF".to_vec()), None)
            .unwrap();
        let (outcome, _) = controller.finish_upload(
            ticket,
            Err(SdkError::Connection("refused".to_string())),
        );

        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(controller.upload_id(), Some("1"));
        assert!(controller.error_message().unwrap().contains("refused"));
    }

    #[test]
    fn test_older_upload_response_is_stale() {
        let mut controller = Controller::new();
        let first = controller
            .begin_upload(&UploadFile::new("a.pdf", b"1".to_vec()), None)
            .unwrap();
        let second = controller
            .begin_upload(&UploadFile::new("b.pdf", b"2".to_vec()), None)
            .unwrap();

        let (outcome, _) = controller.finish_upload(second, Ok(receipt("b")));
        assert_eq!(outcome, Outcome::Applied);
        let (outcome, graph) = controller.finish_upload(first, Ok(receipt("a")));
        assert_eq!(outcome, Outcome::Stale);
        assert!(graph.is_none());
        assert_eq!(controller.upload_id(), Some("b"));
    }

    #[test]
    fn test_graph_fetch_projects_triples() {
        let mut controller = Controller::new();
        let ticket = controller
            .begin_upload(&UploadFile::new("p.pdf", b"%PDF".to_vec()), None)
            .unwrap();
        let (_, graph) = controller.finish_upload(ticket, Ok(receipt("9")));
        let graph = graph.expect("pdf uploads fetch a graph");
        assert!(controller.is_loading_graph());
        assert_eq!(graph.upload_id(), "9");

        let outcome = controller.finish_graph_fetch(
            graph,
            Ok((
                vec![Triple::new("A", "knows", "B")],
                vec![ClusterAssignment::new("B", 2)],
            )),
        );
        assert_eq!(outcome, Outcome::Applied);
        assert!(!controller.is_loading_graph());
        assert_eq!(controller.graph().node_count(), 2);
        assert_eq!(controller.graph().node("B").unwrap().cluster, 2);
        assert_eq!(controller.triples().len(), 1);
    }

    #[test]
    fn test_graph_failure_keeps_upload() {
        let mut controller = Controller::new();
        let ticket = controller
            .begin_upload(&UploadFile::new("p.pdf", b"%PDF".to_vec()), None)
            .unwrap();
        let (_, graph) = controller.finish_upload(ticket, Ok(receipt("9")));

        let outcome = controller.finish_graph_fetch(
            graph.unwrap(),
            Err(SdkError::Http {
                status: 500,
                body: "boom".to_string(),
            }),
        );
        assert_eq!(outcome, Outcome::Failed);
        assert_eq!(controller.upload_id(), Some("9"));
        assert!(controller.error_message().unwrap().starts_with("Failed to load graph"));
    }

    #[test]
    fn test_older_graph_response_is_stale() {
        let mut controller = Controller::new();
        let older = controller.resume("7", DocumentKind::Pdf).unwrap();
        let newer = controller.begin_graph_fetch().unwrap();
        assert!(controller.is_loading_graph());

        let outcome = controller.finish_graph_fetch(
            newer,
            Ok((vec![Triple::new("NEW", "r", "X")], Vec::new())),
        );
        assert_eq!(outcome, Outcome::Applied);

        let outcome = controller.finish_graph_fetch(
            older,
            Ok((vec![Triple::new("OLD", "r", "Y")], Vec::new())),
        );
        assert_eq!(outcome, Outcome::Stale);
        assert_eq!(controller.graph().nodes[0].id, "NEW");
        assert_eq!(controller.triples()[0].subject, "NEW");
        assert!(!controller.is_loading_graph());
    }

    #[test]
    fn test_older_graph_failure_does_not_report_error() {
        let mut controller = Controller::new();
        let older = controller.resume("7", DocumentKind::Pdf).unwrap();
        let newer = controller.begin_graph_fetch().unwrap();

        controller.finish_graph_fetch(newer, Ok((vec![Triple::new("OK", "r", "Z")], Vec::new())));
        let outcome = controller.finish_graph_fetch(
            older,
            Err(SdkError::Connection("late".to_string())),
        );

        assert_eq!(outcome, Outcome::Stale);
        assert!(controller.error_message().is_none());
        assert_eq!(controller.graph().nodes[0].id, "OK");
    }

    #[test]
    fn test_refresh_after_failed_fetch_clears_error() {
        let mut controller = Controller::new();
        let first = controller.resume("7", DocumentKind::Pdf).unwrap();
        controller.finish_graph_fetch(first, Err(SdkError::Connection("down".to_string())));
        assert!(controller.error_message().is_some());

        let retry = controller.begin_graph_fetch().unwrap();
        let outcome = controller.finish_graph_fetch(retry, Ok((vec![Triple::new("A", "r", "B")], Vec::new())));
        assert_eq!(outcome, Outcome::Applied);
        assert!(controller.error_message().is_none());
    }

    #[test]
    fn test_question_skipped_without_document() {
        let mut controller = Controller::new();
        controller.set_input("anything?");
        assert!(controller.begin_question().is_none());
        assert_eq!(controller.input(), "anything?");
        assert!(!controller.is_asking());
    }

    #[test]
    fn test_blank_question_skipped() {
        let mut controller = with_document(DocumentKind::Csv, "1");
        controller.set_input("   ");
        assert!(controller.begin_question().is_none());
    }

    #[test]
    fn test_question_clears_input_and_records_turn() {
        let mut controller = with_document(DocumentKind::Pdf, "1");
        controller.set_input("  what is it?  ");

        let ticket = controller.begin_question().unwrap();
        assert_eq!(ticket.question(), "what is it?");
        assert_eq!(ticket.kind(), DocumentKind::Pdf);
        assert_eq!(controller.input(), "");
        assert!(controller.is_asking());

        let outcome = controller.finish_question(ticket, Ok(answer("a report")));
        assert_eq!(outcome, Outcome::Applied);
        assert!(!controller.is_asking());
        assert_eq!(controller.transcript().last().unwrap().answer, "a report");
    }

    #[test]
    fn test_failed_question_appends_generic_turn() {
        let mut controller = with_document(DocumentKind::Csv, "1");
        controller.set_input("why?");
        let ticket = controller.begin_question().unwrap();

        let outcome = controller.finish_question(ticket, Err(SdkError::Decode("bad".to_string())));
        assert_eq!(outcome, Outcome::Failed);
        let turn = controller.transcript().last().unwrap();
        assert!(turn.failed);
        assert_eq!(turn.question, "why?");
    }

    #[test]
    fn test_late_answer_keeps_question_order() {
        let mut controller = with_document(DocumentKind::Pdf, "1");

        controller.set_input("first");
        let first = controller.begin_question().unwrap();
        controller.set_input("second");
        let second = controller.begin_question().unwrap();

        controller.finish_question(second, Ok(answer("two")));
        controller.finish_question(first, Ok(answer("one")));

        let answers: Vec<_> = controller
            .transcript()
            .turns()
            .map(|t| t.answer.as_str())
            .collect();
        assert_eq!(answers, ["one", "two"]);
    }

    #[test]
    fn test_clear_drops_in_flight_responses() {
        let mut controller = with_document(DocumentKind::Pdf, "1");
        controller.set_input("q");
        let question = controller.begin_question().unwrap();
        let upload = controller
            .begin_upload(&UploadFile::new("x.pdf", b"1".to_vec()), None)
            .unwrap();

        controller.clear();
        assert_eq!(controller.upload_id(), None);

        assert_eq!(controller.finish_question(question, Ok(answer("a"))), Outcome::Stale);
        assert_eq!(controller.finish_upload(upload, Ok(receipt("2"))).0, Outcome::Stale);
        assert!(controller.transcript().is_empty());
        assert_eq!(controller.upload_id(), None);
        assert!(!controller.is_busy());
    }

    #[test]
    fn test_resume_existing_upload() {
        let mut controller = Controller::new();
        assert!(controller.resume("", DocumentKind::Pdf).is_none());
        assert_eq!(controller.upload_id(), None);

        let ticket = controller.resume("41", DocumentKind::Pdf).unwrap();
        assert_eq!(ticket.upload_id(), "41");
        assert_eq!(controller.upload_id(), Some("41"));

        assert!(controller.resume("42", DocumentKind::Csv).is_none());
        assert_eq!(
            controller.finish_graph_fetch(ticket, Ok((Vec::new(), Vec::new()))),
            Outcome::Stale
        );
        assert_eq!(controller.document_kind(), Some(DocumentKind::Csv));
    }

    #[test]
    fn test_new_upload_resets_transcript_and_drops_old_answers() {
        let mut controller = with_document(DocumentKind::Csv, "1");
        controller.set_input("old question");
        let old = controller.begin_question().unwrap();

        let ticket = controller
            .begin_upload(&UploadFile::new("new.csv", b"a".to_vec()), None)
            .unwrap();
        controller.finish_upload(ticket, Ok(receipt("2")));

        assert_eq!(controller.finish_question(old, Ok(answer("old"))), Outcome::Stale);
        assert!(controller.transcript().is_empty());
        assert_eq!(controller.upload_id(), Some("2"));
    }
}
