//! The route registry.

use std::collections::HashMap;

use http::Method;

/// An exact-match route registry.
///
/// One path map per supported HTTP method. Lookup compares the request path
/// against registered paths byte-for-byte; `/clientes` and `/clientes/` are
/// different routes.
///
/// The registry is generic over the stored value so it can be exercised with
/// plain strings in tests and hold boxed handler functions in the server.
///
/// # Example
///
/// ```rust
/// use acervo_router::Router;
/// use http::Method;
///
/// let mut router = Router::new();
/// router.get("/clientes", "listar");
/// router.post("/clientes", "criar");
///
/// assert_eq!(router.find(&Method::GET, "/clientes"), Some(&"listar"));
/// assert_eq!(router.find(&Method::GET, "/documentos"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Router<T> {
    get: HashMap<String, T>,
    post: HashMap<String, T>,
    put: HashMap<String, T>,
    delete: HashMap<String, T>,
}

impl<T> Router<T> {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            get: HashMap::new(),
            post: HashMap::new(),
            put: HashMap::new(),
            delete: HashMap::new(),
        }
    }

    /// Registers a GET route.
    pub fn get(&mut self, path: impl Into<String>, value: T) {
        self.get.insert(path.into(), value);
    }

    /// Registers a POST route.
    pub fn post(&mut self, path: impl Into<String>, value: T) {
        self.post.insert(path.into(), value);
    }

    /// Registers a PUT route.
    pub fn put(&mut self, path: impl Into<String>, value: T) {
        self.put.insert(path.into(), value);
    }

    /// Registers a DELETE route.
    pub fn delete(&mut self, path: impl Into<String>, value: T) {
        self.delete.insert(path.into(), value);
    }

    /// Looks up the value registered for `(method, path)`.
    ///
    /// Returns `None` when the pair was never registered or when the method
    /// is not one of GET, POST, PUT or DELETE.
    #[must_use]
    pub fn find(&self, method: &Method, path: &str) -> Option<&T> {
        let map = match *method {
            Method::GET => &self.get,
            Method::POST => &self.post,
            Method::PUT => &self.put,
            Method::DELETE => &self.delete,
            _ => return None,
        };
        map.get(path)
    }

    /// Returns the number of registered routes across all methods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.get.len() + self.post.len() + self.put.len() + self.delete.len()
    }

    /// Returns true if no routes are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_new() {
        let router: Router<&str> = Router::new();
        assert!(router.is_empty());
        assert_eq!(router.len(), 0);
    }

    #[test]
    fn test_router_exact_match() {
        let mut router = Router::new();
        router.get("/clientes", "listar");

        assert_eq!(router.find(&Method::GET, "/clientes"), Some(&"listar"));
        assert_eq!(router.find(&Method::GET, "/documentos"), None);
    }

    #[test]
    fn test_router_method_isolation() {
        let mut router = Router::new();
        router.get("/clientes", "listar");
        router.post("/clientes", "criar");
        router.put("/clientes", "atualizar");
        router.delete("/clientes", "deletar");

        assert_eq!(router.find(&Method::GET, "/clientes"), Some(&"listar"));
        assert_eq!(router.find(&Method::POST, "/clientes"), Some(&"criar"));
        assert_eq!(router.find(&Method::PUT, "/clientes"), Some(&"atualizar"));
        assert_eq!(router.find(&Method::DELETE, "/clientes"), Some(&"deletar"));
    }

    #[test]
    fn test_router_unregistered_method() {
        let mut router = Router::new();
        router.get("/clientes", "listar");

        assert_eq!(router.find(&Method::POST, "/clientes"), None);
    }

    #[test]
    fn test_router_unsupported_method() {
        let mut router = Router::new();
        router.get("/clientes", "listar");

        assert_eq!(router.find(&Method::PATCH, "/clientes"), None);
        assert_eq!(router.find(&Method::OPTIONS, "/clientes"), None);
        assert_eq!(router.find(&Method::HEAD, "/clientes"), None);
    }

    #[test]
    fn test_router_no_trailing_slash_normalization() {
        let mut router = Router::new();
        router.get("/clientes", "listar");

        // Exact string match only: a trailing slash is a different route.
        assert_eq!(router.find(&Method::GET, "/clientes/"), None);
    }

    #[test]
    fn test_router_no_prefix_or_pattern_match() {
        let mut router = Router::new();
        router.get("/documentos", "listar");

        assert_eq!(router.find(&Method::GET, "/documentos/buscar"), None);
        assert_eq!(router.find(&Method::GET, "/documentos/123"), None);
    }

    #[test]
    fn test_router_overwrite_keeps_latest() {
        let mut router = Router::new();
        router.get("/clientes", "antigo");
        router.get("/clientes", "novo");

        assert_eq!(router.find(&Method::GET, "/clientes"), Some(&"novo"));
        assert_eq!(router.len(), 1);
    }

    #[test]
    fn test_router_len_counts_all_methods() {
        let mut router = Router::new();
        router.get("/clientes", "a");
        router.post("/clientes", "b");
        router.get("/documentos", "c");

        assert_eq!(router.len(), 3);
        assert!(!router.is_empty());
    }
}
