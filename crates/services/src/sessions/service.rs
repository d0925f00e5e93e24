use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;

use drill_core::Clock;
use drill_core::analytics::{AnalyticsRecorder, rounded_percent};
use drill_core::distractor::{DistractorError, generate_options_with};
use drill_core::mastery::{MasteryPolicy, MasteryTracker};
use drill_core::model::{
    AccuracySummary, DrillMode, DrillSettings, FieldKey, Outcome, SessionStats, TermDraft,
    TermKey, TermRecord,
};

use super::events::{EventQueue, SessionEvent};
use super::phase::{Command, SessionPhase};
use super::progress::SessionProgress;
use super::queue::WorkingQueue;
use super::turn::{AnswerResult, SubmittedAnswer, Turn, normalize_answer};
use crate::error::SessionError;

//
// ─── ADVANCE RESULT ────────────────────────────────────────────────────────────
//

/// What `advance` moved the session to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Turn(Turn),
    Completed(SessionStats),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Adaptive drill over one fixed set of terms.
///
/// An explicit state machine driven by caller commands. Each pass presents
/// every still-eligible term once in shuffled order; terms leave rotation when
/// the mastery policy is met, and the session completes once none remain.
/// Events are queued for the caller alongside each command's direct result.
///
/// The event queue is unbounded: a caller that only uses the returned values
/// should still call [`drain_events`](Self::drain_events) now and then, or
/// the session holds a copy of every turn and answer until it is dropped.
pub struct DrillSession {
    settings: DrillSettings,
    clock: Clock,
    rng: StdRng,
    phase: SessionPhase,
    terms: Vec<TermRecord>,
    dropped: usize,
    queue: WorkingQueue,
    policy: MasteryPolicy,
    mastery: MasteryTracker,
    analytics: AnalyticsRecorder,
    current: Option<Turn>,
    last_result: Option<AnswerResult>,
    last_key: Option<TermKey>,
    turns_presented: u32,
    passes: u32,
    events: EventQueue,
}

impl DrillSession {
    /// Create an idle session with an OS-seeded RNG and the system clock.
    #[must_use]
    pub fn new(settings: DrillSettings) -> Self {
        let clock = Clock::default();
        Self {
            settings,
            clock,
            rng: StdRng::from_os_rng(),
            phase: SessionPhase::Idle,
            terms: Vec::new(),
            dropped: 0,
            queue: WorkingQueue::default(),
            policy: MasteryPolicy::default(),
            mastery: MasteryTracker::default(),
            analytics: AnalyticsRecorder::new(0, clock.now()),
            current: None,
            last_result: None,
            last_key: None,
            turns_presented: 0,
            passes: 0,
            events: EventQueue::default(),
        }
    }

    /// Validate the drill direction and `terms`, then start drilling in one
    /// step. Option count is the default.
    ///
    /// # Errors
    ///
    /// - `Settings` if `given` and `want` are the same field
    /// - `NoValidTerms` if every entry is malformed
    pub fn start_session(
        terms: impl IntoIterator<Item = TermDraft>,
        given: FieldKey,
        want: FieldKey,
        mode: DrillMode,
    ) -> Result<Self, SessionError> {
        let settings = DrillSettings::new(given, want, mode)?;
        let mut session = Self::new(settings);
        session.start(terms)?;
        Ok(session)
    }

    /// Use a deterministic RNG. Only meaningful before `start`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Mastery thresholds for the next `start`. A running session keeps the
    /// tracker it started with.
    #[must_use]
    pub fn with_mastery_policy(mut self, policy: MasteryPolicy) -> Self {
        self.policy = policy;
        self
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    #[must_use]
    pub fn settings(&self) -> &DrillSettings {
        &self.settings
    }

    /// Terms that survived intake filtering.
    #[must_use]
    pub fn terms(&self) -> &[TermRecord] {
        &self.terms
    }

    /// Number of entries dropped as malformed at start.
    #[must_use]
    pub fn dropped_count(&self) -> usize {
        self.dropped
    }

    #[must_use]
    pub fn current_turn(&self) -> Option<&Turn> {
        self.current.as_ref()
    }

    /// Feedback for the turn being shown, while in `ShowingFeedback`.
    #[must_use]
    pub fn last_result(&self) -> Option<&AnswerResult> {
        self.last_result.as_ref()
    }

    #[must_use]
    pub fn mastery(&self) -> &MasteryTracker {
        &self.mastery
    }

    #[must_use]
    pub fn stats(&self) -> &SessionStats {
        self.analytics.stats()
    }

    #[must_use]
    pub fn summary(&self) -> AccuracySummary {
        self.analytics.summary()
    }

    /// Number of queue passes started so far, including the first.
    #[must_use]
    pub fn passes(&self) -> u32 {
        self.passes
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == SessionPhase::Completed
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        let total = self.terms.len();
        let mastered = usize::try_from(self.mastery.mastered_count()).unwrap_or(usize::MAX);
        SessionProgress {
            total,
            mastered,
            answered: self.analytics.stats().answered(),
            remaining_in_pass: self.queue.len(),
            percent_mastered: rounded_percent(mastered, total),
            is_complete: self.is_complete(),
        }
    }

    /// Take the oldest pending event.
    pub fn next_event(&mut self) -> Option<SessionEvent> {
        self.events.pop()
    }

    /// Take all pending events in order.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain().collect()
    }

    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Consume the session, yielding its stats.
    #[must_use]
    pub fn into_stats(self) -> SessionStats {
        self.analytics.into_stats()
    }

    //
    // ─── COMMANDS ──────────────────────────────────────────────────────────────
    //

    /// Load a term set and present the first turn.
    ///
    /// Entries with a missing or blank field are dropped. On failure the
    /// session stays `Idle`.
    ///
    /// # Errors
    ///
    /// - `PreconditionViolation` unless `Idle`
    /// - `NoValidTerms` if nothing survives filtering
    pub fn start(
        &mut self,
        terms: impl IntoIterator<Item = TermDraft>,
    ) -> Result<Turn, SessionError> {
        self.require(Command::Start)?;
        self.phase = SessionPhase::Loading;

        let mut valid = Vec::new();
        let mut dropped = 0_usize;
        for draft in terms {
            match draft.validate() {
                Ok(term) => valid.push(term),
                Err(err) => {
                    tracing::trace!(%err, "dropping malformed term");
                    dropped += 1;
                }
            }
        }
        if dropped > 0 {
            tracing::warn!(dropped, kept = valid.len(), "dropped malformed terms");
        }
        if valid.is_empty() {
            self.phase = SessionPhase::Idle;
            return Err(SessionError::NoValidTerms { dropped });
        }

        let total = u32::try_from(valid.len()).unwrap_or(u32::MAX);
        self.terms = valid;
        self.dropped = dropped;
        self.mastery = MasteryTracker::new(self.policy);
        self.analytics = AnalyticsRecorder::new(total, self.clock.now());
        self.queue = WorkingQueue::shuffled((0..self.terms.len()).collect(), &mut self.rng);
        self.passes = 1;

        tracing::info!(
            terms = self.terms.len(),
            given = %self.settings.given(),
            want = %self.settings.want(),
            mode = ?self.settings.mode(),
            "drill session started"
        );

        self.phase = SessionPhase::Presenting;
        self.present_next().ok_or(SessionError::NoValidTerms { dropped })
    }

    /// Answer the current turn by typing.
    ///
    /// # Errors
    ///
    /// Returns `PreconditionViolation` unless `AwaitingAnswer`.
    pub fn submit_free_text(&mut self, value: &str) -> Result<AnswerResult, SessionError> {
        self.require(Command::SubmitFreeText)?;
        let expected = self.current_expected()?;
        let is_correct = normalize_answer(value) == normalize_answer(&expected);
        self.resolve(is_correct, SubmittedAnswer::FreeText(value.to_string()))
    }

    /// Answer the current multiple-choice turn by option index.
    ///
    /// # Errors
    ///
    /// - `PreconditionViolation` unless `AwaitingAnswer`
    /// - `NotMultipleChoice` if the turn has no options
    /// - `ChoiceOutOfRange` if `index` is past the last option
    pub fn submit_choice(&mut self, index: usize) -> Result<AnswerResult, SessionError> {
        self.require(Command::SubmitChoice)?;
        let Some(options) = self.current.as_ref().and_then(|turn| turn.options.as_ref()) else {
            return Err(SessionError::NotMultipleChoice);
        };
        if index >= options.len() {
            return Err(SessionError::ChoiceOutOfRange {
                index,
                len: options.len(),
            });
        }
        let is_correct = index == options.correct_index();
        self.resolve(is_correct, SubmittedAnswer::Choice(index))
    }

    /// Give up on the current turn. Counts as an incorrect answer.
    ///
    /// # Errors
    ///
    /// Returns `PreconditionViolation` unless `AwaitingAnswer`.
    pub fn skip(&mut self) -> Result<AnswerResult, SessionError> {
        self.require(Command::Skip)?;
        self.resolve(false, SubmittedAnswer::Skipped)
    }

    /// Leave the feedback screen: present the next turn or complete.
    ///
    /// # Errors
    ///
    /// Returns `PreconditionViolation` unless `ShowingFeedback`.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        self.require(Command::Advance)?;
        self.last_result = None;
        self.phase = SessionPhase::Presenting;

        if let Some(turn) = self.present_next() {
            return Ok(Advance::Turn(turn));
        }

        let eligible = self.mastery.eligible_terms(&self.terms, self.settings.want());
        if !eligible.is_empty() {
            self.queue = WorkingQueue::shuffled(eligible, &mut self.rng);
            self.passes += 1;
            tracing::debug!(
                pass = self.passes,
                queued = self.queue.len(),
                "rebuilt working queue"
            );
            if let Some(turn) = self.present_next() {
                return Ok(Advance::Turn(turn));
            }
        }

        Ok(Advance::Completed(self.complete()))
    }

    //
    // ─── INTERNALS ─────────────────────────────────────────────────────────────
    //

    fn require(&self, command: Command) -> Result<(), SessionError> {
        if self.phase == command.required_phase() {
            Ok(())
        } else {
            Err(SessionError::PreconditionViolation {
                command,
                phase: self.phase,
            })
        }
    }

    fn current_expected(&self) -> Result<String, SessionError> {
        self.current
            .as_ref()
            .map(|turn| turn.expected_value.clone())
            .ok_or(SessionError::PreconditionViolation {
                command: Command::SubmitFreeText,
                phase: self.phase,
            })
    }

    /// Pop the next presentable term from the queue and build its turn.
    ///
    /// Returns `None` when the queue has nothing left that is not mastered.
    fn present_next(&mut self) -> Option<Turn> {
        let want = self.settings.want();
        let mastery = &self.mastery;
        let terms = &self.terms;
        self.queue.retain(|index| !mastery.is_mastered(terms[*index].field(want)));

        let previous = self.last_key.as_ref().map(TermKey::as_str);
        let index = self
            .queue
            .pop_avoiding(previous, |i| terms[i].field(want), &mut self.rng)?;

        let turn = self.build_turn(index);
        self.last_key = Some(self.terms[index].key(want));
        self.current = Some(turn.clone());
        self.phase = SessionPhase::AwaitingAnswer;
        self.events.push(SessionEvent::TurnReady(turn.clone()));
        Some(turn)
    }

    fn build_turn(&mut self, index: usize) -> Turn {
        let given = self.settings.given();
        let want = self.settings.want();
        let term = &self.terms[index];
        let expected_value = term.field(want).to_string();

        let options = if self.settings.is_multiple_choice() {
            let count = usize::from(self.settings.option_count());
            match generate_options_with(&expected_value, &self.terms, want, count, &mut self.rng) {
                Ok(set) => Some(set),
                Err(DistractorError::InsufficientPool { distinct }) => {
                    tracing::warn!(distinct, "too few distinct answers, using free text");
                    None
                }
                Err(err) => {
                    tracing::warn!(%err, "could not build options, using free text");
                    None
                }
            }
        } else {
            None
        };

        self.turns_presented = self.turns_presented.saturating_add(1);
        tracing::debug!(
            turn = self.turns_presented,
            term = index,
            mc = options.is_some(),
            "presenting turn"
        );

        Turn {
            number: self.turns_presented,
            term_index: index,
            prompt_field: given,
            expected_field: want,
            prompt_value: term.field(given).to_string(),
            expected_value,
            display_fields: term.display_fields(),
            options,
        }
    }

    fn resolve(
        &mut self,
        is_correct: bool,
        submitted: SubmittedAnswer,
    ) -> Result<AnswerResult, SessionError> {
        let Some(turn) = self.current.take() else {
            return Err(SessionError::PreconditionViolation {
                command: match submitted {
                    SubmittedAnswer::FreeText(_) => Command::SubmitFreeText,
                    SubmittedAnswer::Choice(_) => Command::SubmitChoice,
                    SubmittedAnswer::Skipped => Command::Skip,
                },
                phase: self.phase,
            });
        };

        let key = TermKey::new(turn.expected_value.as_str());
        let was_mastered = self.mastery.is_mastered(key.as_str());
        let counts = self.mastery.record_outcome(&key, is_correct);
        let newly_mastered = !was_mastered && self.mastery.is_mastered(key.as_str());
        self.analytics
            .record(Outcome::from_correct(is_correct), self.mastery.mastered_count());

        let result = AnswerResult {
            turn_number: turn.number,
            is_correct,
            correct_value: turn.expected_value.clone(),
            display_fields: turn.display_fields.clone(),
            submitted,
            counts,
            newly_mastered,
        };
        self.current = Some(turn);
        self.last_result = Some(result.clone());
        self.phase = SessionPhase::ShowingFeedback;
        self.events.push(SessionEvent::AnswerResult(result.clone()));
        Ok(result)
    }

    fn complete(&mut self) -> SessionStats {
        self.current = None;
        self.phase = SessionPhase::Completed;
        self.analytics.mark_completed(self.clock.now());

        let stats = self.analytics.stats().clone();
        let summary = self.analytics.summary();
        tracing::info!(
            mastered = stats.mastered_count,
            answers = stats.response_log.len(),
            accuracy = summary.accuracy_percent,
            passes = self.passes,
            "drill session completed"
        );
        self.events.push(SessionEvent::SessionComplete(stats.clone()));
        stats
    }
}

impl fmt::Debug for DrillSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrillSession")
            .field("phase", &self.phase)
            .field("terms_len", &self.terms.len())
            .field("queued", &self.queue.len())
            .field("mastered", &self.mastery.mastered_count())
            .field("answers", &self.analytics.stats().answered())
            .field("passes", &self.passes)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
