//! Page acquisition over HTTP.
//!
//! One unconditional GET per call: no retries, no cookies, no session.

pub mod http_client;
