//! Simulated upload sessions.
//!
//! # Flow
//!
//! ```text
//! submit(files) ──▶ busy? ──yes──▶ SessionActive (+ toast)
//!                    │no
//!                    ▼
//!               screen files ──none──▶ EmptySubmission (a toast per rejection)
//!                    │some
//!                    ▼
//!  run: 0% ─tick─▶ +5..14% ─tick─▶ ... ─▶ 100% ─delay─▶ on_accepted ─▶ Idle ─▶ toast
//! ```
//!
//! The driver does not depend on an async runtime: the host passes a sleep
//! function (`tokio::time::sleep`, `gloo_timers::future::sleep`, ...). A
//! session can be stopped through its [`SessionHandle`], or by dropping the
//! `run` future. Only one session runs per [`Uploader`] at a time.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use uuid::Uuid;

use crate::config::{Timing, UploaderConfig};
use crate::error::{UploadError, UploadResult};
use crate::models::{CandidateFile, Progress, UploadPolicy};
use crate::notify::{Notification, Notifier};
use crate::progress::{ProgressMeter, ProgressSource, RandomProgress};
use crate::validation::screen_with;

// =============================================================================
// Uploader
// =============================================================================

/// Validates submissions and hands out upload sessions.
#[derive(Debug)]
pub struct Uploader<N> {
    policy: UploadPolicy,
    timing: Timing,
    notifier: N,
    seed: Option<u64>,
    busy: Arc<AtomicBool>,
}

impl<N: Notifier + Clone> Uploader<N> {
    pub fn new(policy: UploadPolicy, notifier: N) -> Self {
        Self {
            policy,
            timing: Timing::default(),
            notifier,
            seed: None,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn from_config(config: UploaderConfig, notifier: N) -> Self {
        Self::new(config.policy, notifier).with_timing(config.timing)
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Seed the random progress of every session (reproducible runs).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Whether a session is currently holding this uploader.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Validate `files` and open a session for the accepted ones.
    ///
    /// Every rejection is notified as soon as it is found. No session is
    /// created when nothing is accepted or when another session is running.
    pub fn submit<H>(&self, files: Vec<CandidateFile<H>>) -> UploadResult<UploadSession<H, N>> {
        let Some(guard) = BusyGuard::acquire(&self.busy) else {
            log::warn!("Upload refused: a session is already running");
            let err = UploadError::SessionActive;
            if let Some(notification) = err.notification() {
                self.notifier.notify(notification);
            }
            return Err(err);
        };

        let policy = &self.policy;
        let notifier = &self.notifier;
        let screening = screen_with(files, policy, |rejection| {
            log::info!("Rejected: {}", rejection);
            notifier.notify(Notification::rejected(rejection, policy));
        });

        if screening.ignored > 0 {
            log::debug!(
                "Single-file policy: ignoring {} extra file(s)",
                screening.ignored
            );
        }

        if screening.accepted.is_empty() {
            return Err(UploadError::EmptySubmission {
                rejected: screening.rejected,
            });
        }

        let source = match self.seed {
            Some(seed) => RandomProgress::seeded(seed),
            None => RandomProgress::new(),
        };

        Ok(UploadSession {
            handle: SessionHandle::new(),
            accepted: screening.accepted,
            multiple: policy.allow_multiple,
            timing: self.timing,
            notifier: self.notifier.clone(),
            source,
            _busy: guard,
        })
    }

    /// [`submit`](Self::submit) then [`run`](UploadSession::run).
    pub async fn upload<H, Sl, Fut, P, C>(
        &self,
        files: Vec<CandidateFile<H>>,
        sleep: Sl,
        on_progress: P,
        on_accepted: C,
    ) -> UploadResult<SessionOutcome>
    where
        Sl: Fn(Duration) -> Fut,
        Fut: Future<Output = ()>,
        P: FnMut(Progress),
        C: FnOnce(Vec<CandidateFile<H>>),
    {
        let session = self.submit(files)?;
        Ok(session.run(sleep, on_progress, on_accepted).await)
    }
}

/// Holds the uploader's busy flag for the lifetime of a session.
#[derive(Debug)]
struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

// =============================================================================
// Cancellation
// =============================================================================

/// Cloneable switch for stopping a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: Uuid,
    cancelled: Arc<AtomicBool>,
}

impl SessionHandle {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Stop the session at its next tick. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Guard that cancels the session when dropped (view teardown).
    pub fn cancel_on_drop(&self) -> CancelGuard {
        CancelGuard(Some(self.clone()))
    }
}

/// Cancels its session on drop unless disarmed.
#[derive(Debug)]
pub struct CancelGuard(Option<SessionHandle>);

impl CancelGuard {
    /// Let the session continue after this guard is dropped.
    pub fn disarm(mut self) {
        self.0 = None;
    }
}

impl Drop for CancelGuard {
    fn drop(&mut self) {
        if let Some(handle) = self.0.take() {
            handle.cancel();
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "outcome")]
pub enum SessionOutcome {
    /// The completion handler received `accepted` files.
    Completed { accepted: usize },
    /// Stopped before completion; `at` is the last published percentage.
    Cancelled { at: u8 },
}

/// One in-flight simulated upload.
#[derive(Debug)]
pub struct UploadSession<H, N, S = RandomProgress> {
    handle: SessionHandle,
    accepted: Vec<CandidateFile<H>>,
    multiple: bool,
    timing: Timing,
    notifier: N,
    source: S,
    _busy: BusyGuard,
}

impl<H, N: Notifier, S: ProgressSource> UploadSession<H, N, S> {
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    /// Files that passed validation, in submission order.
    pub fn accepted(&self) -> &[CandidateFile<H>] {
        &self.accepted
    }

    /// Replace the progress source.
    pub fn with_source<S2: ProgressSource>(self, source: S2) -> UploadSession<H, N, S2> {
        UploadSession {
            handle: self.handle,
            accepted: self.accepted,
            multiple: self.multiple,
            timing: self.timing,
            notifier: self.notifier,
            source,
            _busy: self._busy,
        }
    }

    /// Drive the session to completion or cancellation.
    ///
    /// `on_progress` sees `Running(0)`, then each tick up to exactly
    /// `Running(100)`, then `Idle` once `on_accepted` has run. After a
    /// cancellation nothing more is published.
    pub async fn run<Sl, Fut, P, C>(self, sleep: Sl, mut on_progress: P, on_accepted: C) -> SessionOutcome
    where
        Sl: Fn(Duration) -> Fut,
        Fut: Future<Output = ()>,
        P: FnMut(Progress),
        C: FnOnce(Vec<CandidateFile<H>>),
    {
        let UploadSession {
            handle,
            accepted,
            multiple,
            timing,
            notifier,
            mut source,
            _busy,
        } = self;

        let mut meter = ProgressMeter::new();

        if handle.is_cancelled() {
            log::info!("Session {} cancelled before start", handle.id());
            return SessionOutcome::Cancelled { at: 0 };
        }

        log::info!("📤 Session {} started with {} file(s)", handle.id(), accepted.len());
        on_progress(Progress::Running(meter.percent()));

        while !meter.is_complete() {
            sleep(timing.tick_interval).await;
            if handle.is_cancelled() {
                log::info!("Session {} cancelled at {}%", handle.id(), meter.percent());
                return SessionOutcome::Cancelled { at: meter.percent() };
            }
            let percent = meter.advance(source.next_increment());
            log::trace!("Session {} at {}%", handle.id(), percent);
            on_progress(Progress::Running(percent));
        }

        sleep(timing.completion_delay).await;
        if handle.is_cancelled() {
            log::info!("Session {} cancelled before completion", handle.id());
            return SessionOutcome::Cancelled { at: meter.percent() };
        }

        let names: Vec<String> = accepted.iter().map(|f| f.name().to_string()).collect();
        on_accepted(accepted);
        on_progress(Progress::Idle);
        notifier.notify(Notification::completed(
            names.iter().map(String::as_str),
            multiple,
        ));

        log::info!("✅ Session {} completed ({} file(s))", handle.id(), names.len());
        SessionOutcome::Completed {
            accepted: names.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIB;
    use crate::error::Rejection;
    use crate::notify::{MemoryNotifier, NotificationLevel};
    use crate::progress::FixedProgress;
    use std::cell::{Cell, RefCell};
    use tokio::time::{sleep, Instant};

    #[derive(Debug, PartialEq)]
    enum Event {
        Progress(Progress),
        Accepted(Vec<String>),
    }

    fn make_uploader(policy: UploadPolicy) -> (Uploader<MemoryNotifier>, MemoryNotifier) {
        let notifier = MemoryNotifier::new();
        (Uploader::new(policy, notifier.clone()), notifier)
    }

    fn names<H>(files: &[CandidateFile<H>]) -> Vec<String> {
        files.iter().map(|f| f.name().to_string()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_pdf_completes() {
        let (uploader, notifier) = make_uploader(UploadPolicy::default());
        let events = RefCell::new(Vec::new());

        let outcome = uploader
            .upload(
                vec![CandidateFile::new("bpc.pdf", "application/pdf", 2 * MIB)],
                sleep,
                |p| events.borrow_mut().push(Event::Progress(p)),
                |files| events.borrow_mut().push(Event::Accepted(names(&files))),
            )
            .await
            .unwrap();

        assert_eq!(outcome, SessionOutcome::Completed { accepted: 1 });

        let events = events.into_inner();
        assert_eq!(events.first(), Some(&Event::Progress(Progress::Running(0))));
        let tail = &events[events.len() - 3..];
        assert_eq!(
            tail,
            &[
                Event::Progress(Progress::Running(100)),
                Event::Accepted(vec!["bpc.pdf".into()]),
                Event::Progress(Progress::Idle),
            ]
        );

        let toasts = notifier.entries();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].level, NotificationLevel::Success);
        assert_eq!(toasts[0].description, "O arquivo bpc.pdf foi enviado com sucesso.");
        assert!(!uploader.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_monotonic_and_exact_for_many_seeds() {
        for seed in 0..50 {
            let (uploader, _) = make_uploader(UploadPolicy::default());
            let uploader = uploader.with_seed(seed);
            let events = RefCell::new(Vec::new());

            uploader
                .upload(
                    vec![CandidateFile::new("a.png", "image/png", 10)],
                    sleep,
                    |p| events.borrow_mut().push(Event::Progress(p)),
                    |files| events.borrow_mut().push(Event::Accepted(names(&files))),
                )
                .await
                .unwrap();

            let events = events.into_inner();
            let accepted_at = events
                .iter()
                .position(|e| matches!(e, Event::Accepted(_)))
                .unwrap();
            let percents: Vec<u8> = events[..accepted_at]
                .iter()
                .filter_map(|e| match e {
                    Event::Progress(p) => p.percent(),
                    _ => None,
                })
                .collect();

            assert!(percents.windows(2).all(|w| w[0] <= w[1]), "seed {}", seed);
            assert_eq!(percents.last(), Some(&100), "seed {}", seed);
            assert_eq!(percents.iter().filter(|p| **p == 100).count(), 1);
            // 5..=14 per tick means 8 to 20 ticks
            assert!((9..=21).contains(&percents.len()), "seed {}", seed);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timing_follows_intervals() {
        let (uploader, _) = make_uploader(UploadPolicy::default());
        let session = uploader
            .submit(vec![CandidateFile::new("a.pdf", "application/pdf", 1)])
            .unwrap()
            .with_source(FixedProgress(10));

        let start = Instant::now();
        session.run(sleep, |_| {}, |_| {}).await;

        // 10 ticks of 300ms, then the 500ms completion delay
        assert_eq!(start.elapsed(), Duration::from_millis(3_500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_oversized_png_starts_nothing() {
        let (uploader, notifier) = make_uploader(UploadPolicy::default());

        let err = uploader
            .submit(vec![CandidateFile::new("foto.png", "image/png", 6 * MIB)])
            .unwrap_err();

        assert!(matches!(
            err,
            UploadError::EmptySubmission { ref rejected }
                if matches!(rejected.as_slice(), [Rejection::TooLarge { .. }])
        ));
        let toasts = notifier.entries();
        assert_eq!(toasts.len(), 1);
        assert!(toasts[0].description.contains("muito grande"));
        assert!(!uploader.is_busy());

        let called = Cell::new(false);
        let result = uploader
            .upload(
                vec![CandidateFile::new("foto.png", "image/png", 6 * MIB)],
                sleep,
                |_| {},
                |_| called.set(true),
            )
            .await;
        assert!(result.is_err());
        assert!(!called.get());
    }

    #[tokio::test(start_paused = true)]
    async fn test_mixed_submission_accepts_only_valid() {
        let (uploader, notifier) = make_uploader(UploadPolicy::default().multiple());
        let received = RefCell::new(None);

        let outcome = uploader
            .upload(
                vec![
                    CandidateFile::new("laudo.pdf", "application/pdf", MIB),
                    CandidateFile::new("rg.jpg", "image/jpeg", 8 * MIB),
                    CandidateFile::new("anim.gif", "image/gif", MIB),
                ],
                sleep,
                |_| {},
                |files| *received.borrow_mut() = Some(names(&files)),
            )
            .await
            .unwrap();

        assert_eq!(outcome, SessionOutcome::Completed { accepted: 1 });
        assert_eq!(received.into_inner(), Some(vec!["laudo.pdf".to_string()]));
        assert_eq!(notifier.errors().len(), 2);
        let last = notifier.entries().pop().unwrap();
        assert_eq!(last.level, NotificationLevel::Success);
        assert_eq!(last.description, "1 arquivo(s) foram enviados com sucesso.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_policy_delivers_at_most_one() {
        let (uploader, _) = make_uploader(UploadPolicy::default());
        let received = RefCell::new(Vec::new());

        uploader
            .upload(
                vec![
                    CandidateFile::new("a.pdf", "application/pdf", 1),
                    CandidateFile::new("b.pdf", "application/pdf", 1),
                ],
                sleep,
                |_| {},
                |files| *received.borrow_mut() = names(&files),
            )
            .await
            .unwrap();

        assert_eq!(received.into_inner(), vec!["a.pdf".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_at_40_stops_everything() {
        let (uploader, notifier) = make_uploader(UploadPolicy::default());
        let session = uploader
            .submit(vec![CandidateFile::new("a.pdf", "application/pdf", 1)])
            .unwrap()
            .with_source(FixedProgress(10));
        let handle = session.handle();
        let seen = RefCell::new(Vec::new());
        let called = Cell::new(false);

        let outcome = session
            .run(
                sleep,
                |p| {
                    seen.borrow_mut().push(p);
                    if p == Progress::Running(40) {
                        handle.cancel();
                    }
                },
                |_| called.set(true),
            )
            .await;

        assert_eq!(outcome, SessionOutcome::Cancelled { at: 40 });
        assert_eq!(seen.into_inner().last(), Some(&Progress::Running(40)));
        assert!(!called.get());
        assert!(notifier.is_empty());
        assert!(!uploader.is_busy());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_guard_on_teardown() {
        let (uploader, _) = make_uploader(UploadPolicy::default());
        let session = uploader
            .submit(vec![CandidateFile::new("a.pdf", "application/pdf", 1)])
            .unwrap();
        let handle = session.handle();

        {
            let _view = handle.cancel_on_drop();
        }
        assert!(handle.is_cancelled());

        let called = Cell::new(false);
        let outcome = session.run(sleep, |_| {}, |_| called.set(true)).await;
        assert_eq!(outcome, SessionOutcome::Cancelled { at: 0 });
        assert!(!called.get());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disarmed_guard_does_not_cancel() {
        let (uploader, _) = make_uploader(UploadPolicy::default());
        let session = uploader
            .submit(vec![CandidateFile::new("a.pdf", "application/pdf", 1)])
            .unwrap();
        let handle = session.handle();
        handle.cancel_on_drop().disarm();
        assert!(!handle.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submit_is_refused_while_active() {
        let (uploader, notifier) = make_uploader(UploadPolicy::default());
        let first = uploader
            .submit(vec![CandidateFile::new("a.pdf", "application/pdf", 1)])
            .unwrap();
        assert!(uploader.is_busy());

        let err = uploader
            .submit(vec![CandidateFile::new("b.pdf", "application/pdf", 1)])
            .unwrap_err();
        assert_eq!(err, UploadError::SessionActive);
        assert_eq!(notifier.entries(), vec![Notification::busy()]);

        first.run(sleep, |_| {}, |_| {}).await;
        assert!(!uploader.is_busy());
        assert!(uploader
            .submit(vec![CandidateFile::new("b.pdf", "application/pdf", 1)])
            .is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_unrun_session_releases_uploader() {
        let (uploader, _) = make_uploader(UploadPolicy::default());
        let session = uploader
            .submit(vec![CandidateFile::new("a.pdf", "application/pdf", 1)])
            .unwrap();
        drop(session);
        assert!(!uploader.is_busy());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&SessionOutcome::Cancelled { at: 40 }).unwrap();
        assert_eq!(json, r#"{"outcome":"cancelled","at":40}"#);
    }
}
