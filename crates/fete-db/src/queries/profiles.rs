//! Database query functions for the `profiles` table.

use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Profile;

/// Fetch the profile row for a user, if one exists.
pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .context("failed to fetch profile")?;

    Ok(profile)
}

/// Create or update the user's profile row (1:1 on user_id).
pub async fn upsert_profile(
    pool: &PgPool,
    user_id: Uuid,
    full_name: Option<&str>,
    avatar_url: Option<&str>,
) -> Result<Profile> {
    let profile = sqlx::query_as::<_, Profile>(
        "INSERT INTO profiles (user_id, full_name, avatar_url) \
         VALUES ($1, $2, $3) \
         ON CONFLICT (user_id) DO UPDATE SET \
             full_name = EXCLUDED.full_name, \
             avatar_url = EXCLUDED.avatar_url, \
             updated_at = now() \
         RETURNING *",
    )
    .bind(user_id)
    .bind(full_name)
    .bind(avatar_url)
    .fetch_one(pool)
    .await
    .context("failed to upsert profile")?;

    Ok(profile)
}
