//! The draw engine.
//!
//! Given a requesting participant, pick one valid recipient uniformly at
//! random and commit the assignment through the store's conditional claim.
//! The engine is strictly greedy per request: it does not look ahead to keep
//! a perfect matching possible for everyone else, and it never retries on
//! its own. A participant who has already drawn always gets their committed
//! recipient back.

use std::collections::HashSet;

use kanau::processor::Processor;
use rand::Rng;
use sqlx::SqlitePool;

use crate::entities::participant::{
    ClaimRecipient, GetParticipantById, ListRoster, Participant,
};
use crate::framework::DatabaseProcessor;

/// Errors produced by [`DrawEngine::draw`].
#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    /// The requesting id is not on the roster.
    #[error("participant {0} not found")]
    ParticipantNotFound(i64),

    /// Every remaining participant is excluded for this requester. Terminal
    /// for this call; recovery (adding participants, resetting the cycle) is
    /// an admin action.
    #[error("no eligible candidates left to draw")]
    NoEligibleCandidates,

    /// A concurrent draw claimed the chosen recipient between snapshot and
    /// commit. Transient: retrying the whole call re-runs the algorithm on a
    /// fresh snapshot.
    #[error("a concurrent draw claimed the chosen recipient")]
    ClaimConflict,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// A committed (or re-read) assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawOutcome {
    pub recipient_id: i64,
    pub recipient_name: String,
    /// `true` when the assignment already existed before this call.
    pub already_drawn: bool,
}

/// The candidate set for `requester` over a roster snapshot: everyone except
/// the requester, the requester's partner (when set), and anyone already
/// claimed as a recipient.
pub fn eligible_candidates<'a>(
    roster: &'a [Participant],
    requester: &Participant,
) -> Vec<&'a Participant> {
    let claimed: HashSet<i64> = roster.iter().filter_map(|p| p.drawn_id).collect();

    roster
        .iter()
        .filter(|p| p.id != requester.id)
        .filter(|p| Some(p.id) != requester.partner_id)
        .filter(|p| !claimed.contains(&p.id))
        .collect()
}

/// Draws recipients against the roster store.
pub struct DrawEngine {
    processor: DatabaseProcessor,
}

impl DrawEngine {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            processor: DatabaseProcessor { pool },
        }
    }

    /// Assign a recipient to `participant_id`, or return the existing
    /// assignment.
    ///
    /// The candidate snapshot may be stale by commit time; the conditional
    /// claim re-checks both the requester's slot and the recipient's
    /// availability in a single atomic statement, so a lost race can never
    /// corrupt the roster — it only surfaces as [`DrawError::ClaimConflict`].
    pub async fn draw(&self, participant_id: i64) -> Result<DrawOutcome, DrawError> {
        let requester = self
            .fetch(participant_id)
            .await?
            .ok_or(DrawError::ParticipantNotFound(participant_id))?;

        if let Some(outcome) = self.existing_assignment(&requester).await? {
            return Ok(outcome);
        }

        let roster = self.processor.process(ListRoster).await?;
        let candidates = eligible_candidates(&roster, &requester);
        if candidates.is_empty() {
            return Err(DrawError::NoEligibleCandidates);
        }

        let chosen = {
            let mut rng = rand::rng();
            candidates[rng.random_range(0..candidates.len())]
        };

        let applied = self
            .processor
            .process(ClaimRecipient {
                giver: requester.id,
                recipient: chosen.id,
            })
            .await?;

        if applied {
            tracing::debug!(
                giver = requester.id,
                recipient = chosen.id,
                "Draw committed"
            );
            return Ok(DrawOutcome {
                recipient_id: chosen.id,
                recipient_name: chosen.name.clone(),
                already_drawn: false,
            });
        }

        // The claim did not apply. If this participant drew concurrently
        // (double submit), hand back the committed assignment; otherwise the
        // chosen recipient was claimed by someone else first.
        let requester = self
            .fetch(participant_id)
            .await?
            .ok_or(DrawError::ParticipantNotFound(participant_id))?;
        if let Some(outcome) = self.existing_assignment(&requester).await? {
            return Ok(outcome);
        }

        tracing::debug!(
            giver = requester.id,
            recipient = chosen.id,
            "Draw lost the race for its chosen recipient"
        );
        Err(DrawError::ClaimConflict)
    }

    async fn fetch(&self, id: i64) -> Result<Option<Participant>, sqlx::Error> {
        self.processor.process(GetParticipantById { id }).await
    }

    /// Resolve a committed assignment, if any.
    ///
    /// A `drawn_id` pointing at a deleted row would have been nulled by the
    /// deletion cleanup; if one slips through anyway the participant is
    /// treated as not having drawn rather than failing the call.
    async fn existing_assignment(
        &self,
        requester: &Participant,
    ) -> Result<Option<DrawOutcome>, sqlx::Error> {
        let Some(drawn_id) = requester.drawn_id else {
            return Ok(None);
        };
        Ok(self.fetch(drawn_id).await?.map(|recipient| DrawOutcome {
            recipient_id: recipient.id,
            recipient_name: recipient.name,
            already_drawn: true,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::participant::{InsertParticipant, ResetDraws, SetPartnerPair};
    use crate::store;

    fn row(id: i64, name: &str, partner_id: Option<i64>, drawn_id: Option<i64>) -> Participant {
        Participant {
            id,
            name: name.to_string(),
            partner_id,
            drawn_id,
            created_at: 0,
        }
    }

    #[test]
    fn test_candidates_exclude_self() {
        let roster = vec![row(1, "Anna", None, None), row(2, "Ben", None, None)];
        let picks = eligible_candidates(&roster, &roster[0]);
        assert_eq!(picks.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_candidates_exclude_partner() {
        let roster = vec![
            row(1, "Anna", Some(2), None),
            row(2, "Ben", Some(1), None),
            row(3, "Clara", None, None),
        ];
        let picks = eligible_candidates(&roster, &roster[0]);
        assert_eq!(picks.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_candidates_exclude_claimed_recipients() {
        // Ben already drew Clara, so Clara is out for everyone else.
        let roster = vec![
            row(1, "Anna", None, None),
            row(2, "Ben", None, Some(3)),
            row(3, "Clara", None, None),
        ];
        let picks = eligible_candidates(&roster, &roster[0]);
        assert_eq!(picks.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_unset_partner_excludes_nothing_extra() {
        let roster = vec![
            row(1, "Anna", None, None),
            row(2, "Ben", None, None),
            row(3, "Clara", None, None),
        ];
        let picks = eligible_candidates(&roster, &roster[0]);
        assert_eq!(picks.len(), 2);
    }

    async fn engine_with(names: &[&str]) -> (DrawEngine, DatabaseProcessor, Vec<i64>) {
        let pool = store::open_in_memory().await.unwrap();
        let processor = DatabaseProcessor { pool: pool.clone() };
        let mut ids = Vec::new();
        for name in names {
            let p = processor
                .process(InsertParticipant {
                    name: name.to_string(),
                })
                .await
                .unwrap();
            ids.push(p.id);
        }
        (DrawEngine::new(pool), processor, ids)
    }

    #[tokio::test]
    async fn test_unknown_participant_is_not_found() {
        let (engine, _, _) = engine_with(&["Anna", "Ben"]).await;
        match engine.draw(999).await {
            Err(DrawError::ParticipantNotFound(999)) => {}
            other => panic!("expected ParticipantNotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_draw_is_idempotent() {
        let (engine, _, ids) = engine_with(&["Anna", "Ben", "Clara"]).await;

        let first = engine.draw(ids[0]).await.unwrap();
        assert!(!first.already_drawn);
        assert_ne!(first.recipient_id, ids[0]);

        let second = engine.draw(ids[0]).await.unwrap();
        assert!(second.already_drawn);
        assert_eq!(second.recipient_id, first.recipient_id);
        assert_eq!(second.recipient_name, first.recipient_name);
    }

    #[tokio::test]
    async fn test_mutual_partners_exhaust() {
        let (engine, processor, ids) = engine_with(&["Anna", "Ben"]).await;
        processor
            .process(SetPartnerPair { a: ids[0], b: ids[1] })
            .await
            .unwrap();

        for id in &ids {
            match engine.draw(*id).await {
                Err(DrawError::NoEligibleCandidates) => {}
                other => panic!("expected NoEligibleCandidates, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_full_cycle_is_a_derangement() {
        let (engine, processor, ids) = engine_with(&["Anna", "Ben", "Clara", "David"]).await;

        // A greedy draw order can paint the last participant into a corner
        // (only themselves left unclaimed). That is documented behavior, not
        // a bug; reset and run the cycle again until it completes.
        'cycle: for _ in 0..50 {
            for id in &ids {
                match engine.draw(*id).await {
                    Ok(outcome) => assert_ne!(outcome.recipient_id, *id),
                    Err(DrawError::NoEligibleCandidates) => {
                        processor.process(ResetDraws).await.unwrap();
                        continue 'cycle;
                    }
                    Err(other) => panic!("unexpected draw failure: {other:?}"),
                }
            }

            let roster = processor.process(ListRoster).await.unwrap();
            let drawn: Vec<i64> = roster.iter().filter_map(|p| p.drawn_id).collect();
            assert_eq!(drawn.len(), ids.len(), "every participant drew");
            let distinct: std::collections::HashSet<i64> = drawn.iter().copied().collect();
            assert_eq!(drawn.len(), distinct.len(), "recipients must be distinct");
            for p in &roster {
                assert_ne!(p.drawn_id, Some(p.id), "no fixed points");
            }
            return;
        }
        panic!("greedy cycle failed to complete in 50 attempts");
    }

    #[tokio::test]
    async fn test_reset_allows_fresh_draw() {
        let (engine, processor, ids) = engine_with(&["Anna", "Ben", "Clara"]).await;

        let first = engine.draw(ids[0]).await.unwrap();
        assert!(!first.already_drawn);

        processor.process(ResetDraws).await.unwrap();

        let fresh = engine.draw(ids[0]).await.unwrap();
        assert!(!fresh.already_drawn);
        assert_ne!(fresh.recipient_id, ids[0]);
    }

    #[tokio::test]
    async fn test_concurrent_draws_keep_recipients_distinct() {
        let names: Vec<String> = (0..8).map(|i| format!("P{i}")).collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let (engine, processor, ids) = engine_with(&name_refs).await;
        let engine = std::sync::Arc::new(engine);

        let mut handles = Vec::new();
        for id in ids.clone() {
            let engine = engine.clone();
            handles.push(tokio::spawn(async move {
                // ClaimConflict is the documented retryable outcome; retry
                // until this participant either commits or exhausts.
                loop {
                    match engine.draw(id).await {
                        Ok(outcome) => break Ok(outcome),
                        Err(DrawError::ClaimConflict) => continue,
                        Err(other) => break Err(other),
                    }
                }
            }));
        }

        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) | Err(DrawError::NoEligibleCandidates) => {}
                Err(other) => panic!("unexpected draw failure: {other:?}"),
            }
        }

        let roster = processor.process(ListRoster).await.unwrap();
        let drawn: Vec<i64> = roster.iter().filter_map(|p| p.drawn_id).collect();
        let distinct: std::collections::HashSet<i64> = drawn.iter().copied().collect();
        assert_eq!(drawn.len(), distinct.len(), "recipients must be distinct");
        for p in &roster {
            if let Some(drawn_id) = p.drawn_id {
                assert_ne!(drawn_id, p.id);
                assert_ne!(Some(drawn_id), p.partner_id);
            }
        }
    }
}
