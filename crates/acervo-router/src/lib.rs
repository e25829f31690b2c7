//! Exact-match route registry for the acervo HTTP service.
//!
//! The service exposes a fixed, small set of routes, so routing is a plain
//! string lookup per HTTP method: no path parameters, no wildcards, no
//! trailing-slash normalization. [`Router::find`] returns `None` for
//! unregistered `(method, path)` pairs and for any method outside
//! GET/POST/PUT/DELETE; the dispatcher answers such requests with 404.

mod router;

pub use router::Router;
