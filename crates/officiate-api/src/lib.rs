//! JSON REST API for the officiating manager.
//!
//! Exposes an axum [`Router`] backed by any
//! [`officiate_core::store::OfficiatingStore`]. Auth, TLS, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", officiate_api::api_router(store.clone()))
//! ```

pub mod certifications;
pub mod error;
pub mod event_positions;
pub mod events;
pub mod extract;
pub mod meets;
pub mod officials;
pub mod organization;
pub mod positions;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use officiate_core::store::OfficiatingStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: OfficiatingStore + 'static,
{
  Router::new()
    // Certifications and officials
    .route(
      "/certifications",
      get(certifications::list::<S>).post(certifications::create::<S>),
    )
    .route(
      "/certifications/{id}",
      get(certifications::get_one::<S>)
        .put(certifications::update::<S>)
        .delete(certifications::delete::<S>),
    )
    .route("/officials", get(officials::list::<S>).post(officials::create::<S>))
    .route(
      "/officials/{id}",
      get(officials::get_one::<S>)
        .put(officials::update::<S>)
        .delete(officials::delete::<S>),
    )
    // Organization
    .route(
      "/leagues",
      get(organization::list_leagues::<S>).post(organization::create_league::<S>),
    )
    .route(
      "/leagues/{id}",
      get(organization::get_league::<S>)
        .put(organization::update_league::<S>)
        .delete(organization::delete_league::<S>),
    )
    .route(
      "/divisions",
      get(organization::list_divisions::<S>).post(organization::create_division::<S>),
    )
    .route(
      "/divisions/{id}",
      get(organization::get_division::<S>)
        .put(organization::update_division::<S>)
        .delete(organization::delete_division::<S>),
    )
    .route(
      "/teams",
      get(organization::list_teams::<S>).post(organization::create_team::<S>),
    )
    .route(
      "/teams/{id}",
      get(organization::get_team::<S>)
        .put(organization::update_team::<S>)
        .delete(organization::delete_team::<S>),
    )
    .route(
      "/pools",
      get(organization::list_pools::<S>).post(organization::create_pool::<S>),
    )
    .route(
      "/pools/{id}",
      get(organization::get_pool::<S>)
        .put(organization::update_pool::<S>)
        .delete(organization::delete_pool::<S>),
    )
    // Position catalog
    .route(
      "/strategies",
      get(positions::list_strategies::<S>).post(positions::create_strategy::<S>),
    )
    .route(
      "/strategies/{id}",
      get(positions::get_strategy::<S>)
        .put(positions::update_strategy::<S>)
        .delete(positions::delete_strategy::<S>),
    )
    .route("/positions", get(positions::list::<S>).post(positions::create::<S>))
    .route(
      "/positions/{id}",
      get(positions::get_one::<S>)
        .put(positions::update::<S>)
        .delete(positions::delete::<S>),
    )
    .route(
      "/positions/{id}/eligible-officials",
      get(positions::eligible_officials::<S>),
    )
    // Events
    .route("/events", get(events::list::<S>).post(events::create::<S>))
    .route("/events/delete-selected", post(events::delete_selected::<S>))
    .route("/events/delete-all", post(events::delete_all::<S>))
    .route(
      "/events/{id}",
      get(events::get_one::<S>)
        .put(events::update::<S>)
        .delete(events::delete::<S>),
    )
    // Event positions
    .route(
      "/event-positions",
      get(event_positions::list::<S>).post(event_positions::set::<S>),
    )
    .route("/event-positions/auto-assign", post(event_positions::auto_assign::<S>))
    .route("/event-positions/remove-all", post(event_positions::remove_all::<S>))
    .route("/event-positions/{id}", delete(event_positions::delete::<S>))
    // Meets and assignments
    .route("/meets", get(meets::list::<S>).post(meets::create::<S>))
    .route(
      "/meets/{id}",
      get(meets::get_one::<S>)
        .put(meets::update::<S>)
        .delete(meets::delete::<S>),
    )
    .route(
      "/assignments",
      get(meets::list_assignments::<S>).post(meets::create_assignment::<S>),
    )
    .route(
      "/assignments/{id}",
      get(meets::get_assignment::<S>)
        .put(meets::update_assignment::<S>)
        .delete(meets::delete_assignment::<S>),
    )
    .with_state(store)
}
