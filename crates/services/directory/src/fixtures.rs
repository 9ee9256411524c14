//! Deterministic seed data for the testing profile.
//!
//! The feed-derived dataset and the canonical seed user are written in one
//! transaction: either every fixture row is committed or none is.

use common::AppResult;
use domain::{format_feed, DomainResult, Password, SpaceObject, User};
use domain::{SEED_USER_EMAIL, SEED_USER_PASSWORD};

use crate::unit_of_work::Persistence;

/// Bundled near-earth object feed in the NeoWs format.
const NEO_FEED: &str = include_str!("../fixtures/neo_feed.json");

/// Outcome of a successful seed.
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub space_objects: usize,
    pub seed_user: User,
}

/// Parse the bundled feed.
pub fn bundled_feed() -> DomainResult<Vec<SpaceObject>> {
    format_feed(NEO_FEED)
}

/// Seed the bundled feed and the canonical seed user.
pub async fn seed(persistence: &Persistence) -> AppResult<SeedReport> {
    let objects = bundled_feed()?;
    let password_hash = Password::new(SEED_USER_PASSWORD)?.into_string();

    seed_with(
        persistence,
        objects,
        SEED_USER_EMAIL.to_string(),
        password_hash,
    )
    .await
}

/// Seed the given objects and user atomically.
pub async fn seed_with(
    persistence: &Persistence,
    objects: Vec<SpaceObject>,
    email: String,
    password_hash: String,
) -> AppResult<SeedReport> {
    let report = persistence
        .transaction(|ctx| {
            Box::pin(async move {
                let space_objects = ctx.space_objects().insert_many(objects).await?;
                let seed_user = ctx.users().create(email, password_hash).await?;
                Ok(SeedReport {
                    space_objects,
                    seed_user,
                })
            })
        })
        .await?;

    tracing::info!(
        space_objects = report.space_objects,
        seed_user = %report.seed_user.email,
        "Fixture data seeded"
    );

    Ok(report)
}
