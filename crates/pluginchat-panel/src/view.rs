//! Rendering state machine of the chat surface.
//!
//! [`ChatView`] owns the append-only transcript, the transient status slot
//! and the prompt input buffer. It is pure state: hosts feed it
//! [`PanelEvent`]s and user submissions and render whatever it holds.
//!
//! Every incoming event runs through the same fixed checks, in order:
//!
//! 1. `showStatus` sets the status slot.
//! 2. `showError` clears it and appends an error line.
//! 3. `showSteps` clears it, appends one narration line per step and the
//!    "plugin generated" entry.
//! 4. a non-empty payload `msg` appends a narration line.
//! 5. a non-empty payload `error` appends an error line.
//! 6. the view asks to be scrolled to the newest entry.
//!
//! Checks 4 and 5 run whatever branch was taken before them.

use pluginchat_models::{PanelEvent, Role, StatusLine, SurfaceMessage, TranscriptEntry};

/// Status text shown while a prompt is being processed.
pub const ANALYZING_TEXT: &str = "Analyzing prompt…";

/// State of one chat surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatView {
    transcript: Vec<TranscriptEntry>,
    status: StatusLine,
    input: String,
    scroll_generation: u64,
}

impl ChatView {
    /// A fresh view holding only the greeting.
    pub fn new(greeting: &str) -> Self {
        Self {
            transcript: vec![TranscriptEntry::text(Role::Assistant, greeting)],
            status: StatusLine::Idle,
            input: String::new(),
            scroll_generation: 0,
        }
    }

    /// Entries in display order, greeting first.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// The transient status slot.
    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    /// Current content of the prompt input.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Replace the prompt input buffer.
    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Bumped whenever the view should scroll to its newest entry.
    pub fn scroll_generation(&self) -> u64 {
        self.scroll_generation
    }

    /// Submit the current input buffer. See [`submit_text`](Self::submit_text).
    pub fn submit(&mut self) -> Option<SurfaceMessage> {
        let input = std::mem::take(&mut self.input);
        let message = self.submit_text(&input);
        if message.is_none() {
            // Whitespace-only input stays where the user left it.
            self.input = input;
        }
        message
    }

    /// Record a user submission and produce the message for the controller.
    ///
    /// Blank input is ignored: no entry, no status change, no message.
    pub fn submit_text(&mut self, text: &str) -> Option<SurfaceMessage> {
        let prompt = text.trim();
        if prompt.is_empty() {
            return None;
        }

        self.transcript.push(TranscriptEntry::text(Role::User, prompt));
        self.status = StatusLine::Pending(ANALYZING_TEXT.to_string());
        self.input.clear();
        self.scroll_generation += 1;
        Some(SurfaceMessage::send_prompt(prompt))
    }

    /// Apply a controller event. Returns the number of entries appended.
    pub fn apply(&mut self, event: &PanelEvent) -> usize {
        let before = self.transcript.len();

        match event {
            PanelEvent::ShowStatus { text } => {
                self.status = StatusLine::Pending(text.clone());
            }
            PanelEvent::ShowError { text } => {
                self.status = StatusLine::Idle;
                self.push_text(Role::Error, text);
            }
            PanelEvent::ShowSteps { steps, files, .. } => {
                self.status = StatusLine::Idle;
                for step in steps {
                    self.push_text(Role::AssistantStatus, step);
                }
                self.transcript.push(TranscriptEntry::generated(files.clone()));
            }
        }

        if let Some(msg) = event.payload_msg().filter(|m| !m.is_empty()) {
            self.push_text(Role::AssistantStatus, msg);
        }
        if let Some(error) = event.payload_error().filter(|e| !e.is_empty()) {
            self.push_text(Role::Error, error);
        }

        self.scroll_generation += 1;
        self.transcript.len() - before
    }

    fn push_text(&mut self, role: Role, text: &str) {
        self.transcript.push(TranscriptEntry::text(role, text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pluginchat_models::{EntryBody, GeneratedFile};

    fn view() -> ChatView {
        ChatView::new("Please describe your plugin.")
    }

    fn roles(view: &ChatView) -> Vec<Role> {
        view.transcript().iter().map(|e| e.role).collect()
    }

    fn text_of(entry: &TranscriptEntry) -> &str {
        match &entry.body {
            EntryBody::Text { text } => text,
            EntryBody::Generated { .. } => "<generated>",
        }
    }

    fn steps(
        steps: &[&str],
        files: Vec<GeneratedFile>,
        msg: Option<&str>,
        error: Option<&str>,
    ) -> PanelEvent {
        PanelEvent::ShowSteps {
            steps: steps.iter().map(ToString::to_string).collect(),
            files,
            msg: msg.map(str::to_string),
            error: error.map(str::to_string),
        }
    }

    #[test]
    fn starts_with_single_greeting_and_idle_status() {
        let view = view();
        assert_eq!(roles(&view), vec![Role::Assistant]);
        assert_eq!(text_of(&view.transcript()[0]), "Please describe your plugin.");
        assert!(view.status().is_idle());
    }

    #[test]
    fn submit_appends_user_entry_and_sets_pending() {
        let mut view = view();
        view.set_input("  build an HL7 router  ");
        let message = view.submit();

        assert_eq!(message, Some(SurfaceMessage::send_prompt("build an HL7 router")));
        assert_eq!(roles(&view), vec![Role::Assistant, Role::User]);
        assert_eq!(text_of(&view.transcript()[1]), "build an HL7 router");
        assert_eq!(view.status().text(), Some(ANALYZING_TEXT));
        assert_eq!(view.input(), "");
    }

    #[test]
    fn blank_submission_changes_nothing() {
        for blank in ["", "   ", "\t\n"] {
            let mut view = view();
            view.set_input(blank);
            assert_eq!(view.submit(), None);
            assert_eq!(view.transcript().len(), 1);
            assert!(view.status().is_idle());
            assert_eq!(view.scroll_generation(), 0);
        }
    }

    #[test]
    fn show_status_touches_only_the_status_slot() {
        let mut view = view();
        assert_eq!(view.apply(&PanelEvent::status("Analyzing prompt…")), 0);
        assert_eq!(view.status().text(), Some("Analyzing prompt…"));
        assert_eq!(view.transcript().len(), 1);
    }

    #[test]
    fn steps_then_generated_notice_with_files() {
        let mut view = view();
        view.submit_text("x");
        let appended = view.apply(&steps(
            &["a", "b"],
            vec![GeneratedFile::new("x.xml", 120)],
            None,
            None,
        ));

        assert_eq!(appended, 3);
        let tail = &view.transcript()[2..];
        assert_eq!(tail[0].role, Role::AssistantStatus);
        assert_eq!(text_of(&tail[0]), "a");
        assert_eq!(text_of(&tail[1]), "b");
        assert_eq!(tail[2].role, Role::Assistant);
        assert_eq!(
            tail[2].body,
            EntryBody::Generated {
                files: vec![GeneratedFile::new("x.xml", 120)]
            }
        );
        assert!(view.status().is_idle());
    }

    #[test]
    fn empty_file_list_yields_bare_notice() {
        let mut view = view();
        view.apply(&steps(&[], vec![], None, None));
        let last = view.transcript().last().unwrap();
        assert_eq!(last.body, EntryBody::Generated { files: vec![] });
    }

    #[test]
    fn show_error_clears_status_and_appends_one_entry() {
        let mut view = view();
        view.submit_text("x");
        let appended = view.apply(&PanelEvent::error("Backend error: Internal Server Error"));
        assert_eq!(appended, 1);
        let last = view.transcript().last().unwrap();
        assert_eq!(last.role, Role::Error);
        assert_eq!(text_of(last), "Backend error: Internal Server Error");
        assert!(view.status().is_idle());
    }

    #[test]
    fn payload_error_is_rendered_after_steps() {
        let mut view = view();
        view.apply(&steps(&["a"], vec![], None, Some("partial failure")));
        assert_eq!(
            roles(&view),
            vec![
                Role::Assistant,
                Role::AssistantStatus,
                Role::Assistant,
                Role::Error
            ]
        );
        assert_eq!(text_of(view.transcript().last().unwrap()), "partial failure");
    }

    #[test]
    fn msg_precedes_payload_error() {
        let mut view = view();
        let appended = view.apply(&steps(&[], vec![], Some("saved"), Some("but slow")));
        assert_eq!(appended, 3);
        let tail = &view.transcript()[2..];
        assert_eq!((tail[0].role, text_of(&tail[0])), (Role::AssistantStatus, "saved"));
        assert_eq!((tail[1].role, text_of(&tail[1])), (Role::Error, "but slow"));
    }

    #[test]
    fn empty_msg_and_error_are_skipped() {
        let mut view = view();
        let appended = view.apply(&steps(&[], vec![], Some(""), Some("")));
        assert_eq!(appended, 1);
    }

    #[test]
    fn transcript_is_append_only() {
        let mut view = view();
        view.submit_text("first");
        let snapshot = view.transcript().to_vec();
        view.apply(&PanelEvent::status("working"));
        view.apply(&steps(&["a"], vec![], Some("m"), None));
        view.apply(&PanelEvent::error("e"));
        assert_eq!(&view.transcript()[..snapshot.len()], snapshot.as_slice());
    }

    #[test]
    fn every_event_requests_a_scroll() {
        let mut view = view();
        view.apply(&PanelEvent::status("s"));
        view.apply(&PanelEvent::error("e"));
        assert_eq!(view.scroll_generation(), 2);
    }

    #[test]
    fn typing_does_not_request_a_scroll() {
        let mut view = view();
        view.set_input("H");
        view.set_input("HL7 router");
        assert_eq!(view.scroll_generation(), 0);

        assert!(view.submit().is_some());
        assert_eq!(view.scroll_generation(), 1);
        view.set_input("next");
        assert_eq!(view.scroll_generation(), 1);
    }
}
