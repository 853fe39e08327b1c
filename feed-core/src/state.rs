//! Load lifecycle state machine for feedsync.
//!
//! This module provides a pure, side-effect-free state machine for the
//! refresh / load-more lifecycle of the post list. The state machine takes
//! events as input and produces a new state plus a list of actions to
//! execute.
//!
//! The actual I/O (cache reads, page fetches, publishing) is performed by
//! feed-client, not by this module. This enables instant unit testing
//! without HTTP mocks.

/// Tag distinguishing successive refresh rounds.
///
/// Every accepted refresh bumps the generation. Fetch completions carry
/// the generation they were issued under; a completion whose tag no longer
/// matches the current generation is discarded without touching state, so
/// a superseded load can never clobber the round that replaced it.
pub type Generation = u64;

/// Load state machine - NO I/O, just state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet; the list is whatever the consumer seeded.
    Idle,
    /// First page load in progress (cache read plus page-1 fetch).
    LoadingFirst {
        /// Generation of this load round.
        generation: Generation,
    },
    /// A follow-on page fetch is in progress.
    LoadingMore {
        /// Generation of this load round.
        generation: Generation,
    },
    /// The last load settled successfully.
    Ready {
        /// Generation of the round that settled.
        generation: Generation,
    },
    /// The last load failed; the snapshot keeps its previous contents.
    Failed {
        /// Generation of the round that failed.
        generation: Generation,
    },
}

impl LoadState {
    /// Create a new state machine in the Idle state.
    pub fn new() -> Self {
        Self::Idle
    }

    /// Process an event and return the new state plus actions to execute.
    ///
    /// This is a pure function - no side effects. The caller (feed-client)
    /// is responsible for executing the returned actions.
    pub fn on_event(self, event: LoadEvent) -> (Self, Vec<LoadAction>) {
        match (self, event) {
            // A refresh is accepted from every state and supersedes any
            // load still in flight: the old round's completions will carry
            // a stale generation and fall through to the no-op arm below.
            (state, LoadEvent::RefreshRequested) => {
                let generation = state.generation().saturating_add(1);
                (
                    Self::LoadingFirst { generation },
                    vec![
                        LoadAction::ReadCache { generation },
                        LoadAction::FetchFirst { generation },
                    ],
                )
            }

            // Load-more is only honored once the previous load settled.
            // From Failed it doubles as the retry path.
            (Self::Ready { generation } | Self::Failed { generation }, LoadEvent::MoreRequested) => {
                (
                    Self::LoadingMore { generation },
                    vec![LoadAction::FetchNext { generation }],
                )
            }

            // Completions for the current generation.
            (
                Self::LoadingFirst { generation },
                LoadEvent::PageLoaded {
                    generation: tag,
                    count: _,
                },
            ) if tag == generation => (
                Self::Ready { generation },
                vec![
                    LoadAction::ReplaceSnapshot,
                    LoadAction::ClearError,
                    LoadAction::ResetPages,
                ],
            ),
            (
                Self::LoadingMore { generation },
                LoadEvent::PageLoaded {
                    generation: tag,
                    count: _,
                },
            ) if tag == generation => (
                Self::Ready { generation },
                vec![LoadAction::AppendSnapshot, LoadAction::ClearError],
            ),
            (
                Self::LoadingFirst { generation } | Self::LoadingMore { generation },
                LoadEvent::LoadFailed {
                    generation: tag,
                    error,
                },
            ) if tag == generation => (
                Self::Failed { generation },
                vec![LoadAction::PublishError { error }],
            ),

            // Everything else: stale completions, load-more while a load
            // is already in flight, completions with no load pending.
            (state, _) => (state, vec![]),
        }
    }

    /// Check if a load is currently in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::LoadingFirst { .. } | Self::LoadingMore { .. })
    }

    /// The generation of the current load round (0 before the first one).
    pub fn generation(&self) -> Generation {
        match self {
            Self::Idle => 0,
            Self::LoadingFirst { generation }
            | Self::LoadingMore { generation }
            | Self::Ready { generation }
            | Self::Failed { generation } => *generation,
        }
    }
}

impl Default for LoadState {
    fn default() -> Self {
        Self::new()
    }
}

/// Events that can occur in the load lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadEvent {
    /// Consumer asked for a fresh first page.
    RefreshRequested,
    /// Consumer reached the end of the list and wants the next page.
    MoreRequested,
    /// A page fetch completed successfully.
    PageLoaded {
        /// Generation the fetch was issued under.
        generation: Generation,
        /// Number of posts in the fetched page. Zero is a valid page.
        count: usize,
    },
    /// A page fetch failed.
    LoadFailed {
        /// Generation the fetch was issued under.
        generation: Generation,
        /// Human-readable description of the failure.
        error: String,
    },
}

/// Actions to be executed by feed-client.
///
/// These are instructions, not side effects. The feed-client interprets
/// these and performs the actual I/O and publishing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadAction {
    /// Read the cache and publish its contents as a provisional snapshot.
    ReadCache {
        /// Generation the read belongs to, checked again before publishing.
        generation: Generation,
    },
    /// Fetch the first remote page.
    FetchFirst {
        /// Generation to tag the completion with.
        generation: Generation,
    },
    /// Fetch the next remote page (the runtime advances the page counter).
    FetchNext {
        /// Generation to tag the completion with.
        generation: Generation,
    },
    /// Replace the published snapshot with the fetched page.
    ReplaceSnapshot,
    /// Append the fetched page to the published snapshot.
    AppendSnapshot,
    /// Clear any published error message.
    ClearError,
    /// Publish an error message.
    PublishError {
        /// Human-readable description of the failure.
        error: String,
    },
    /// Rewind the page counter and cache scan to the beginning.
    ResetPages,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let state = LoadState::new();
        assert!(matches!(state, LoadState::Idle));
        assert_eq!(state.generation(), 0);
    }

    #[test]
    fn refresh_from_idle_starts_first_load() {
        let state = LoadState::Idle;
        let (new_state, actions) = state.on_event(LoadEvent::RefreshRequested);

        assert!(matches!(new_state, LoadState::LoadingFirst { generation: 1 }));
        assert!(actions
            .iter()
            .any(|a| matches!(a, LoadAction::ReadCache { generation: 1 })));
        assert!(actions
            .iter()
            .any(|a| matches!(a, LoadAction::FetchFirst { generation: 1 })));
    }

    #[test]
    fn refresh_bumps_generation() {
        let state = LoadState::Ready { generation: 3 };
        let (new_state, _) = state.on_event(LoadEvent::RefreshRequested);

        assert!(matches!(new_state, LoadState::LoadingFirst { generation: 4 }));
    }

    #[test]
    fn first_page_success_settles_ready() {
        let state = LoadState::LoadingFirst { generation: 1 };
        let (new_state, actions) = state.on_event(LoadEvent::PageLoaded {
            generation: 1,
            count: 10,
        });

        assert!(matches!(new_state, LoadState::Ready { generation: 1 }));
        assert!(actions
            .iter()
            .any(|a| matches!(a, LoadAction::ReplaceSnapshot)));
        assert!(actions.iter().any(|a| matches!(a, LoadAction::ClearError)));
        assert!(actions.iter().any(|a| matches!(a, LoadAction::ResetPages)));
    }

    #[test]
    fn first_page_failure_settles_failed() {
        let state = LoadState::LoadingFirst { generation: 1 };
        let (new_state, actions) = state.on_event(LoadEvent::LoadFailed {
            generation: 1,
            error: "connection refused".into(),
        });

        assert!(matches!(new_state, LoadState::Failed { generation: 1 }));
        assert!(actions.iter().any(|a| matches!(
            a,
            LoadAction::PublishError { error } if error == "connection refused"
        )));
    }

    #[test]
    fn more_from_ready_starts_next_fetch() {
        let state = LoadState::Ready { generation: 2 };
        let (new_state, actions) = state.on_event(LoadEvent::MoreRequested);

        assert!(matches!(new_state, LoadState::LoadingMore { generation: 2 }));
        assert!(actions
            .iter()
            .any(|a| matches!(a, LoadAction::FetchNext { generation: 2 })));
    }

    #[test]
    fn more_from_failed_retries() {
        let state = LoadState::Failed { generation: 1 };
        let (new_state, actions) = state.on_event(LoadEvent::MoreRequested);

        assert!(matches!(new_state, LoadState::LoadingMore { generation: 1 }));
        assert!(actions
            .iter()
            .any(|a| matches!(a, LoadAction::FetchNext { generation: 1 })));
    }

    #[test]
    fn more_while_loading_is_ignored() {
        let state = LoadState::LoadingFirst { generation: 1 };
        let (new_state, actions) = state.clone().on_event(LoadEvent::MoreRequested);
        assert_eq!(new_state, state);
        assert!(actions.is_empty());

        let state = LoadState::LoadingMore { generation: 1 };
        let (new_state, actions) = state.clone().on_event(LoadEvent::MoreRequested);
        assert_eq!(new_state, state);
        assert!(actions.is_empty());
    }

    #[test]
    fn more_from_idle_is_ignored() {
        let state = LoadState::Idle;
        let (new_state, actions) = state.on_event(LoadEvent::MoreRequested);

        assert!(matches!(new_state, LoadState::Idle));
        assert!(actions.is_empty());
    }

    #[test]
    fn more_success_appends_without_page_reset() {
        let state = LoadState::LoadingMore { generation: 1 };
        let (new_state, actions) = state.on_event(LoadEvent::PageLoaded {
            generation: 1,
            count: 10,
        });

        assert!(matches!(new_state, LoadState::Ready { generation: 1 }));
        assert!(actions
            .iter()
            .any(|a| matches!(a, LoadAction::AppendSnapshot)));
        assert!(actions.iter().any(|a| matches!(a, LoadAction::ClearError)));
        assert!(!actions.iter().any(|a| matches!(a, LoadAction::ResetPages)));
    }

    #[test]
    fn empty_page_still_settles_ready() {
        let state = LoadState::LoadingMore { generation: 1 };
        let (new_state, actions) = state.on_event(LoadEvent::PageLoaded {
            generation: 1,
            count: 0,
        });

        assert!(matches!(new_state, LoadState::Ready { generation: 1 }));
        assert!(actions
            .iter()
            .any(|a| matches!(a, LoadAction::AppendSnapshot)));
    }

    #[test]
    fn stale_success_is_discarded() {
        let state = LoadState::LoadingFirst { generation: 2 };
        let (new_state, actions) = state.on_event(LoadEvent::PageLoaded {
            generation: 1,
            count: 10,
        });

        assert!(matches!(new_state, LoadState::LoadingFirst { generation: 2 }));
        assert!(actions.is_empty());
    }

    #[test]
    fn stale_failure_is_discarded() {
        let state = LoadState::Ready { generation: 2 };
        let (new_state, actions) = state.on_event(LoadEvent::LoadFailed {
            generation: 1,
            error: "timeout".into(),
        });

        assert!(matches!(new_state, LoadState::Ready { generation: 2 }));
        assert!(actions.is_empty());
    }

    #[test]
    fn refresh_supersedes_inflight_load() {
        // First refresh issues generation 1.
        let state = LoadState::Idle;
        let (state, _) = state.on_event(LoadEvent::RefreshRequested);
        assert!(matches!(state, LoadState::LoadingFirst { generation: 1 }));

        // Second refresh before the first settles issues generation 2.
        let (state, _) = state.on_event(LoadEvent::RefreshRequested);
        assert!(matches!(state, LoadState::LoadingFirst { generation: 2 }));

        // The late completion of round 1 changes nothing.
        let (state, actions) = state.on_event(LoadEvent::PageLoaded {
            generation: 1,
            count: 10,
        });
        assert!(matches!(state, LoadState::LoadingFirst { generation: 2 }));
        assert!(actions.is_empty());

        // Round 2 settles normally.
        let (state, actions) = state.on_event(LoadEvent::PageLoaded {
            generation: 2,
            count: 10,
        });
        assert!(matches!(state, LoadState::Ready { generation: 2 }));
        assert!(actions
            .iter()
            .any(|a| matches!(a, LoadAction::ReplaceSnapshot)));
    }

    #[test]
    fn inflight_more_is_superseded_by_refresh() {
        let state = LoadState::LoadingMore { generation: 1 };
        let (state, _) = state.on_event(LoadEvent::RefreshRequested);
        assert!(matches!(state, LoadState::LoadingFirst { generation: 2 }));

        // The load-more completion from round 1 is now stale.
        let (state, actions) = state.on_event(LoadEvent::PageLoaded {
            generation: 1,
            count: 10,
        });
        assert!(matches!(state, LoadState::LoadingFirst { generation: 2 }));
        assert!(actions.is_empty());
    }

    #[test]
    fn failed_is_not_terminal() {
        let state = LoadState::Failed { generation: 1 };
        let (new_state, actions) = state.on_event(LoadEvent::RefreshRequested);

        assert!(matches!(new_state, LoadState::LoadingFirst { generation: 2 }));
        assert!(!actions.is_empty());
    }

    #[test]
    fn is_loading_helper() {
        assert!(!LoadState::Idle.is_loading());
        assert!(LoadState::LoadingFirst { generation: 1 }.is_loading());
        assert!(LoadState::LoadingMore { generation: 1 }.is_loading());
        assert!(!LoadState::Ready { generation: 1 }.is_loading());
        assert!(!LoadState::Failed { generation: 1 }.is_loading());
    }

    #[test]
    fn generation_saturates_at_max() {
        let state = LoadState::Ready {
            generation: Generation::MAX,
        };
        let (new_state, _) = state.on_event(LoadEvent::RefreshRequested);
        assert_eq!(new_state.generation(), Generation::MAX);
    }
}
