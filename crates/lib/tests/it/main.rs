/*! Integration tests for Bazaar.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - merge: The merge engine's observable contract, including every
 *   property from the update-reconciliation design
 * - store: Engine persistence and revision conflicts
 * - auth: Login, access tokens, and expiry
 * - users: Registration, verification, and password flows
 * - categories / products / carts / orders: CRUD semantics per resource
 * - server: One end-to-end pass over the HTTP surface
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("bazaar=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod auth;
mod carts;
mod categories;
mod helpers;
mod merge;
mod orders;
mod products;
mod server;
mod store;
mod users;
