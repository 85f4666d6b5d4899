//! Submit debouncing.
//!
//! At most one create-sale call is outstanding at a time. A second submit
//! while one is in flight is refused before it reaches the network.

use storedesk_core::DraftId;

/// Proof that a submission was started. Handed back to [`SubmissionGuard::finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionTicket {
    draft: DraftId,
    seq: u64,
}

impl SubmissionTicket {
    pub fn draft(&self) -> DraftId {
        self.draft
    }
}

/// Returned by [`SubmissionGuard::begin`] when a submission is already running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlreadyInFlight {
    pub draft: DraftId,
}

#[derive(Debug, Default)]
pub struct SubmissionGuard {
    in_flight: Option<SubmissionTicket>,
    next_seq: u64,
}

impl SubmissionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight_for(&self, draft: DraftId) -> bool {
        self.in_flight.as_ref().is_some_and(|t| t.draft == draft)
    }

    pub fn begin(&mut self, draft: DraftId) -> Result<SubmissionTicket, AlreadyInFlight> {
        if let Some(current) = &self.in_flight {
            return Err(AlreadyInFlight { draft: current.draft });
        }
        self.next_seq += 1;
        let ticket = SubmissionTicket {
            draft,
            seq: self.next_seq,
        };
        self.in_flight = Some(ticket.clone());
        Ok(ticket)
    }

    /// Release the guard. Returns `false` for a ticket that is not the one in
    /// flight (stale or already finished); the guard is left untouched then.
    pub fn finish(&mut self, ticket: &SubmissionTicket) -> bool {
        if self.in_flight.as_ref() != Some(ticket) {
            return false;
        }
        self.in_flight = None;
        true
    }

    /// Tie `ticket` to a scope: the returned handle releases it on drop unless
    /// [`ReleaseOnDrop::disarm`] ran first.
    pub fn release_on_drop(&mut self, ticket: &SubmissionTicket) -> ReleaseOnDrop<'_> {
        ReleaseOnDrop {
            guard: self,
            ticket: ticket.clone(),
            armed: true,
        }
    }
}

/// Releases a ticket whose submission was abandoned mid-flight, e.g. a submit
/// future dropped by a timeout.
#[derive(Debug)]
#[must_use = "dropping the handle releases the ticket immediately"]
pub struct ReleaseOnDrop<'a> {
    guard: &'a mut SubmissionGuard,
    ticket: SubmissionTicket,
    armed: bool,
}

impl ReleaseOnDrop<'_> {
    /// The submission reached an outcome; leave the ticket for `finish`.
    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for ReleaseOnDrop<'_> {
    fn drop(&mut self) {
        if self.armed && self.guard.finish(&self.ticket) {
            tracing::warn!(draft = %self.ticket.draft, "submission abandoned; draft unlocked");
        }
    }
}
