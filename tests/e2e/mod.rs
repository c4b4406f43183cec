// End-to-end tests for the Student Admin backend
//
// Each test spawns the real router on an ephemeral port, backed by the
// in-memory error log store, and a fake upstream catalog API also served by
// axum. Tests own their app and catalog so they run in parallel.
//
// The Postgres repository test needs Docker and is ignored by default:
//   cargo test --test e2e_tests -- --ignored

mod helpers;
mod test_dashboard;
mod test_error_handling;
