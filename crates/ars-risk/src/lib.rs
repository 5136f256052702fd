//! ars-risk
//!
//! Questionnaire catalogs and the risk-stratification engine. Pure data and
//! pure functions; no storage or network access.
//!
//! Scoring runs in three steps:
//!
//! 1. [`classify::classify`] normalizes one raw answer and assigns it a tier.
//! 2. [`aggregate::aggregate_group`] folds the tiers of one question group
//!    into a group risk value using the combination table.
//! 3. [`stratify::stratify`] sums group values into a band and attaches the
//!    recommendation text for that band.

pub mod aggregate;
pub mod catalog;
pub mod catalogs;
pub mod classify;
pub mod error;
pub mod index;
pub mod key;
pub mod recommendation;
pub mod stratify;

use std::sync::LazyLock;

use ars_core::models::risk::Platform;

use catalog::QuestionCatalog;
use index::QuestionIndex;

/// The catalog a platform's submissions are scored against.
pub fn catalog(platform: Platform) -> &'static QuestionCatalog {
    match platform {
        Platform::Web => &catalogs::web::CATALOG,
        Platform::Ussd => &catalogs::ussd::CATALOG,
    }
}

/// Precomputed question lookup for a platform's catalog.
pub fn index(platform: Platform) -> &'static QuestionIndex {
    static WEB: LazyLock<QuestionIndex> =
        LazyLock::new(|| QuestionIndex::build(&catalogs::web::CATALOG));
    static USSD: LazyLock<QuestionIndex> =
        LazyLock::new(|| QuestionIndex::build(&catalogs::ussd::CATALOG));

    match platform {
        Platform::Web => &WEB,
        Platform::Ussd => &USSD,
    }
}
