/// Which network-driven stage a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchTarget {
    Catalog,
    Detail,
    Homeworld,
}

/// Issued when a stage starts a request. A completion carrying a ticket commits
/// only while the ticket still names the stage's current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub target: FetchTarget,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StageState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct Stage<T> {
    target: FetchTarget,
    generation: u64,
    state: StageState<T>,
}

impl<T> Stage<T> {
    pub fn new(target: FetchTarget) -> Self {
        Self {
            target,
            generation: 0,
            state: StageState::Idle,
        }
    }

    pub fn target(&self) -> FetchTarget {
        self.target
    }

    pub fn state(&self) -> &StageState<T> {
        &self.state
    }

    /// Drops any previous payload or error and marks every earlier ticket stale.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = StageState::Loading;
        Ticket {
            target: self.target,
            generation: self.generation,
        }
    }

    /// Back to idle; in-flight requests become stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = StageState::Idle;
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.target == self.target
            && ticket.generation == self.generation
            && matches!(self.state, StageState::Loading)
    }

    /// Applies a completion. Returns `false` and leaves the stage untouched
    /// when the ticket is stale.
    pub fn commit(&mut self, ticket: Ticket, outcome: Result<T, String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.state = match outcome {
            Ok(payload) => StageState::Loaded(payload),
            Err(message) => StageState::Failed(message),
        };
        true
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, StageState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match &self.state {
            StageState::Loaded(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            StageState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_latest_ticket_commits() {
        let mut stage: Stage<&str> = Stage::new(FetchTarget::Detail);
        let first = stage.begin();
        let second = stage.begin();
        assert!(!stage.commit(first, Ok("stale")));
        assert!(stage.is_loading());
        assert!(stage.commit(second, Ok("fresh")));
        assert_eq!(stage.loaded(), Some(&"fresh"));
    }

    #[test]
    fn a_ticket_commits_once() {
        let mut stage: Stage<u8> = Stage::new(FetchTarget::Catalog);
        let ticket = stage.begin();
        assert!(stage.commit(ticket, Err("boom".into())));
        assert!(!stage.commit(ticket, Ok(1)));
        assert_eq!(stage.error(), Some("boom"));
    }

    #[test]
    fn reset_invalidates_in_flight_ticket() {
        let mut stage: Stage<u8> = Stage::new(FetchTarget::Homeworld);
        let ticket = stage.begin();
        stage.reset();
        assert!(!stage.commit(ticket, Ok(7)));
        assert_eq!(stage.state(), &StageState::Idle);
    }

    #[test]
    fn tickets_of_other_stages_are_rejected() {
        let mut stage: Stage<u8> = Stage::new(FetchTarget::Detail);
        let ticket = stage.begin();
        let foreign = Ticket {
            target: FetchTarget::Homeworld,
            generation: ticket.generation,
        };
        assert!(!stage.commit(foreign, Ok(1)));
    }
}
