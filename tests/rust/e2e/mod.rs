//! End-to-end tests - the HTTP router driven in-process
//!
//! Requests go through the full middleware stack via `tower::ServiceExt`,
//! without binding a socket.

mod http_api_tests;
