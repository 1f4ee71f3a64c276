//! Repository for the `user_movie_lists` table (favorites, watchlist, watched).

use marquee_core::types::DbId;
use marquee_core::user_list::ListType;
use sqlx::PgPool;

use crate::models::user_list::ListedMovie;

pub struct UserListRepo;

impl UserListRepo {
    /// Put a movie on one of the user's lists. Idempotent.
    ///
    /// Adding to a list that displaces another (watched over watchlist)
    /// removes the displaced entry in the same transaction. Returns `true`
    /// when a new entry was created.
    pub async fn add(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
        list_type: ListType,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO user_movie_lists (user_id, movie_id, list_type)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_user_movie_lists_entry DO NOTHING",
        )
        .bind(user_id)
        .bind(movie_id)
        .bind(list_type.as_str())
        .execute(&mut *tx)
        .await?
        .rows_affected()
            > 0;

        if let Some(displaced) = list_type.displaces() {
            sqlx::query(
                "DELETE FROM user_movie_lists
                 WHERE user_id = $1 AND movie_id = $2 AND list_type = $3",
            )
            .bind(user_id)
            .bind(movie_id)
            .bind(displaced.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    /// Take a movie off a list. Returns `false` if it was not there.
    pub async fn remove(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
        list_type: ListType,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM user_movie_lists
             WHERE user_id = $1 AND movie_id = $2 AND list_type = $3",
        )
        .bind(user_id)
        .bind(movie_id)
        .bind(list_type.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// The user's listed movies, most recently added first. `None` returns all lists.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        list_type: Option<ListType>,
    ) -> Result<Vec<ListedMovie>, sqlx::Error> {
        sqlx::query_as::<_, ListedMovie>(
            "SELECT upper(l.list_type) AS list_type, l.created_at AS added_at,
                    m.id AS movie_id, m.title, m.release_date, m.poster_url
             FROM user_movie_lists l
             JOIN movies m ON m.id = l.movie_id
             WHERE l.user_id = $1 AND ($2::TEXT IS NULL OR l.list_type = $2)
             ORDER BY l.created_at DESC, l.id DESC",
        )
        .bind(user_id)
        .bind(list_type.map(ListType::as_str))
        .fetch_all(pool)
        .await
    }

    /// Which of the user's lists currently contain `movie_id`.
    pub async fn lists_containing(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
    ) -> Result<Vec<ListType>, sqlx::Error> {
        let rows: Vec<String> = sqlx::query_scalar(
            "SELECT list_type FROM user_movie_lists
             WHERE user_id = $1 AND movie_id = $2
             ORDER BY list_type",
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.iter().filter_map(|s| ListType::parse(s).ok()).collect())
    }
}
