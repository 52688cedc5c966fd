//! The `participants` table and its query messages.
//!
//! All roster access goes through [`DatabaseProcessor`], one message struct
//! per query. Admin mutations are plain writes; the one primitive with
//! concurrency semantics is [`ClaimRecipient`], whose single UPDATE is the
//! atomicity boundary the draw engine relies on.

use kanau::processor::Processor;

use crate::framework::DatabaseProcessor;

/// A roster row.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Participant {
    pub id: i64,
    pub name: String,
    /// Declared partner, excluded from this participant's draws. Symmetric
    /// when set through [`SetPartnerPair`]; storage does not enforce it.
    pub partner_id: Option<i64>,
    /// The recipient this participant has drawn, if any.
    pub drawn_id: Option<i64>,
    pub created_at: i64,
}

/// `{id, name}` projection for the public listing.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ParticipantRef {
    pub id: i64,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Point reads and listings
// ---------------------------------------------------------------------------

/// Fetch a single participant by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetParticipantById {
    pub id: i64,
}

impl Processor<GetParticipantById> for DatabaseProcessor {
    type Output = Option<Participant>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetParticipantById")]
    async fn process(&self, query: GetParticipantById) -> Result<Option<Participant>, sqlx::Error> {
        sqlx::query_as::<_, Participant>(
            "SELECT id, name, partner_id, drawn_id, created_at \
             FROM participants WHERE id = ?",
        )
        .bind(query.id)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Public listing: `{id, name}` ordered by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParticipants;

impl Processor<ListParticipants> for DatabaseProcessor {
    type Output = Vec<ParticipantRef>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListParticipants")]
    async fn process(&self, _query: ListParticipants) -> Result<Vec<ParticipantRef>, sqlx::Error> {
        sqlx::query_as::<_, ParticipantRef>("SELECT id, name FROM participants ORDER BY name")
            .fetch_all(&self.pool)
            .await
    }
}

/// Full roster snapshot ordered by name. Feeds both the admin table and the
/// draw engine's candidate computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListRoster;

impl Processor<ListRoster> for DatabaseProcessor {
    type Output = Vec<Participant>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListRoster")]
    async fn process(&self, _query: ListRoster) -> Result<Vec<Participant>, sqlx::Error> {
        sqlx::query_as::<_, Participant>(
            "SELECT id, name, partner_id, drawn_id, created_at \
             FROM participants ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
    }
}

/// Number of roster rows. Used by first-boot seeding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountParticipants;

impl Processor<CountParticipants> for DatabaseProcessor {
    type Output = i64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:CountParticipants")]
    async fn process(&self, _query: CountParticipants) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM participants")
            .fetch_one(&self.pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// Admin mutations
// ---------------------------------------------------------------------------

/// Insert a new participant. The unique index on `name` (case-insensitive)
/// rejects duplicates; callers can detect that via
/// [`sqlx::error::DatabaseError::is_unique_violation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertParticipant {
    pub name: String,
}

impl Processor<InsertParticipant> for DatabaseProcessor {
    type Output = Participant;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:InsertParticipant")]
    async fn process(&self, insert: InsertParticipant) -> Result<Participant, sqlx::Error> {
        sqlx::query_as::<_, Participant>(
            "INSERT INTO participants (name) VALUES (?) \
             RETURNING id, name, partner_id, drawn_id, created_at",
        )
        .bind(insert.name)
        .fetch_one(&self.pool)
        .await
    }
}

/// Delete a participant and null out every reference to it.
///
/// The row delete and the `partner_id`/`drawn_id` cleanup commit in one
/// transaction, so a concurrent draw never observes a dangling reference.
/// Returns whether a row was actually deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteParticipant {
    pub id: i64,
}

impl Processor<DeleteParticipant> for DatabaseProcessor {
    type Output = bool;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:DeleteParticipant")]
    async fn process(&self, delete: DeleteParticipant) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM participants WHERE id = ?")
            .bind(delete.id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query("UPDATE participants SET partner_id = NULL WHERE partner_id = ?")
            .bind(delete.id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE participants SET drawn_id = NULL WHERE drawn_id = ?")
            .bind(delete.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}

/// Declare `a` and `b` as partners, writing both directions.
///
/// Deliberately permissive: ids are not validated against the roster and the
/// previous partners of `a`/`b` keep their now one-sided references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPartnerPair {
    pub a: i64,
    pub b: i64,
}

impl Processor<SetPartnerPair> for DatabaseProcessor {
    type Output = ();
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:SetPartnerPair")]
    async fn process(&self, pair: SetPartnerPair) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("UPDATE participants SET partner_id = ? WHERE id = ?")
            .bind(pair.b)
            .bind(pair.a)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE participants SET partner_id = ? WHERE id = ?")
            .bind(pair.a)
            .bind(pair.b)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

/// Clear every `drawn_id` for a new cycle, leaving partner pairings intact.
/// Returns how many assignments were cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetDraws;

impl Processor<ResetDraws> for DatabaseProcessor {
    type Output = u64;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ResetDraws")]
    async fn process(&self, _reset: ResetDraws) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE participants SET drawn_id = NULL WHERE drawn_id IS NOT NULL")
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected())
    }
}

// ---------------------------------------------------------------------------
// The draw commit primitive
// ---------------------------------------------------------------------------

/// Conditionally record `recipient` as `giver`'s drawn recipient.
///
/// The single UPDATE re-checks both sides of the race inside one atomic
/// statement: the giver must still be undrawn, and the recipient must not
/// have been claimed by any other row in the meantime. Applied iff exactly
/// one row changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimRecipient {
    pub giver: i64,
    pub recipient: i64,
}

impl Processor<ClaimRecipient> for DatabaseProcessor {
    type Output = bool;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ClaimRecipient")]
    async fn process(&self, claim: ClaimRecipient) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE participants SET drawn_id = ?1 \
             WHERE id = ?2 AND drawn_id IS NULL \
             AND ?1 NOT IN (SELECT drawn_id FROM participants WHERE drawn_id IS NOT NULL)",
        )
        .bind(claim.recipient)
        .bind(claim.giver)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store;

    async fn roster_of(processor: &DatabaseProcessor, names: &[&str]) -> Vec<Participant> {
        let mut rows = Vec::new();
        for name in names {
            let row = processor
                .process(InsertParticipant {
                    name: name.to_string(),
                })
                .await
                .unwrap();
            rows.push(row);
        }
        rows
    }

    async fn fetch(processor: &DatabaseProcessor, id: i64) -> Participant {
        processor
            .process(GetParticipantById { id })
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test]
    async fn test_insert_returns_fresh_row() {
        let pool = store::open_in_memory().await.unwrap();
        let processor = DatabaseProcessor { pool };

        let row = processor
            .process(InsertParticipant {
                name: "Anna".to_string(),
            })
            .await
            .unwrap();

        assert!(row.id > 0);
        assert_eq!(row.name, "Anna");
        assert_eq!(row.partner_id, None);
        assert_eq!(row.drawn_id, None);
        assert!(row.created_at > 0);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_unique_violation() {
        let pool = store::open_in_memory().await.unwrap();
        let processor = DatabaseProcessor { pool };
        roster_of(&processor, &["Anna"]).await;

        for dup in ["Anna", "anna"] {
            let err = processor
                .process(InsertParticipant {
                    name: dup.to_string(),
                })
                .await
                .unwrap_err();
            match err {
                sqlx::Error::Database(db) => assert!(db.is_unique_violation()),
                other => panic!("expected unique violation, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_claim_is_one_shot_per_giver() {
        let pool = store::open_in_memory().await.unwrap();
        let processor = DatabaseProcessor { pool };
        let rows = roster_of(&processor, &["Anna", "Ben", "Clara"]).await;
        let (anna, ben, clara) = (rows[0].id, rows[1].id, rows[2].id);

        assert!(
            processor
                .process(ClaimRecipient {
                    giver: anna,
                    recipient: ben
                })
                .await
                .unwrap()
        );
        // Second claim by the same giver must not apply, even for a free
        // recipient.
        assert!(
            !processor
                .process(ClaimRecipient {
                    giver: anna,
                    recipient: clara
                })
                .await
                .unwrap()
        );
        assert_eq!(fetch(&processor, anna).await.drawn_id, Some(ben));
    }

    #[tokio::test]
    async fn test_claim_refuses_taken_recipient() {
        let pool = store::open_in_memory().await.unwrap();
        let processor = DatabaseProcessor { pool };
        let rows = roster_of(&processor, &["Anna", "Ben", "Clara"]).await;
        let (anna, ben, clara) = (rows[0].id, rows[1].id, rows[2].id);

        assert!(
            processor
                .process(ClaimRecipient {
                    giver: anna,
                    recipient: clara
                })
                .await
                .unwrap()
        );
        // Clara is already somebody's recipient.
        assert!(
            !processor
                .process(ClaimRecipient {
                    giver: ben,
                    recipient: clara
                })
                .await
                .unwrap()
        );
        assert_eq!(fetch(&processor, ben).await.drawn_id, None);

        assert!(
            processor
                .process(ClaimRecipient {
                    giver: ben,
                    recipient: anna
                })
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_delete_clears_references() {
        let pool = store::open_in_memory().await.unwrap();
        let processor = DatabaseProcessor { pool };
        let rows = roster_of(&processor, &["Anna", "Ben", "Clara"]).await;
        let (anna, ben, clara) = (rows[0].id, rows[1].id, rows[2].id);

        processor
            .process(SetPartnerPair { a: anna, b: ben })
            .await
            .unwrap();
        assert!(
            processor
                .process(ClaimRecipient {
                    giver: clara,
                    recipient: anna
                })
                .await
                .unwrap()
        );

        assert!(processor.process(DeleteParticipant { id: anna }).await.unwrap());

        let ben_row = fetch(&processor, ben).await;
        assert_eq!(ben_row.partner_id, None);
        let clara_row = fetch(&processor, clara).await;
        assert_eq!(clara_row.drawn_id, None);

        let listed = processor.process(ListParticipants).await.unwrap();
        assert!(listed.iter().all(|p| p.id != anna));

        // Deleting again reports nothing deleted.
        assert!(!processor.process(DeleteParticipant { id: anna }).await.unwrap());
    }

    #[tokio::test]
    async fn test_set_partner_pair_is_permissive() {
        let pool = store::open_in_memory().await.unwrap();
        let processor = DatabaseProcessor { pool };
        let rows = roster_of(&processor, &["Anna", "Ben"]).await;
        let (anna, ben) = (rows[0].id, rows[1].id);

        // An id matching no row simply updates nothing.
        processor
            .process(SetPartnerPair { a: anna, b: 999 })
            .await
            .unwrap();
        assert_eq!(fetch(&processor, anna).await.partner_id, Some(999));

        // Re-pairing overwrites; the old dangling reference is gone.
        processor
            .process(SetPartnerPair { a: anna, b: ben })
            .await
            .unwrap();
        assert_eq!(fetch(&processor, anna).await.partner_id, Some(ben));
        assert_eq!(fetch(&processor, ben).await.partner_id, Some(anna));
    }

    #[tokio::test]
    async fn test_reset_clears_draws_keeps_partners() {
        let pool = store::open_in_memory().await.unwrap();
        let processor = DatabaseProcessor { pool };
        let rows = roster_of(&processor, &["Anna", "Ben", "Clara"]).await;
        let (anna, ben, clara) = (rows[0].id, rows[1].id, rows[2].id);

        processor
            .process(SetPartnerPair { a: anna, b: ben })
            .await
            .unwrap();
        assert!(
            processor
                .process(ClaimRecipient {
                    giver: anna,
                    recipient: clara
                })
                .await
                .unwrap()
        );
        assert!(
            processor
                .process(ClaimRecipient {
                    giver: clara,
                    recipient: anna
                })
                .await
                .unwrap()
        );

        let cleared = processor.process(ResetDraws).await.unwrap();
        assert_eq!(cleared, 2);

        let roster = processor.process(ListRoster).await.unwrap();
        assert!(roster.iter().all(|p| p.drawn_id.is_none()));
        assert_eq!(fetch(&processor, anna).await.partner_id, Some(ben));
        assert_eq!(fetch(&processor, ben).await.partner_id, Some(anna));
    }
}
