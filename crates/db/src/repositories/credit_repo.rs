//! Repository for the `movie_persons` credit table.

use marquee_core::types::DbId;
use sqlx::PgPool;

use crate::models::credit::{CreditInfo, CreditInput};

pub struct CreditRepo;

impl CreditRepo {
    /// Credits for a movie: directors and writers first, then cast by billing order.
    pub async fn list_for_movie(
        pool: &PgPool,
        movie_id: DbId,
    ) -> Result<Vec<CreditInfo>, sqlx::Error> {
        sqlx::query_as::<_, CreditInfo>(
            "SELECT p.id AS person_id, p.name, p.profile_url,
                    mp.credit_type, mp.character_name, mp.billing_order
             FROM movie_persons mp
             JOIN persons p ON p.id = mp.person_id
             WHERE mp.movie_id = $1
             ORDER BY CASE mp.credit_type
                         WHEN 'director' THEN 0
                         WHEN 'writer' THEN 1
                         WHEN 'producer' THEN 2
                         ELSE 3
                      END,
                      mp.billing_order, p.name",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
    }

    /// Replace every credit on a movie in one transaction.
    ///
    /// A credit without an explicit `billing_order` takes its position in
    /// `credits`. Unknown persons surface as a foreign-key violation and a
    /// repeated (person, credit type) pair as a unique violation.
    pub async fn replace_for_movie(
        pool: &PgPool,
        movie_id: DbId,
        credits: &[CreditInput],
    ) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM movie_persons WHERE movie_id = $1")
            .bind(movie_id)
            .execute(&mut *tx)
            .await?;

        for (idx, credit) in credits.iter().enumerate() {
            sqlx::query(
                "INSERT INTO movie_persons
                    (movie_id, person_id, credit_type, character_name, billing_order)
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(movie_id)
            .bind(credit.person_id)
            .bind(&credit.credit_type)
            .bind(&credit.character_name)
            .bind(credit.billing_order.unwrap_or(idx as i32))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
