//! # Specification Model
//!
//! The parsed form of a RAML document, reduced to what the validator
//! compares against an Apigility project: a title, a version and a tree of
//! resources with their declared methods.
//!
//! Everything here is built once by the parser and read-only afterwards.

use serde::Serialize;

use crate::http::HttpMethod;

/// A parsed API specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Specification {
    /// Document title. Doubles as the Apigility module name when no
    /// override is given.
    pub title: String,
    /// API version (`v1`, `1`, ...), if the document declares one.
    pub version: Option<String>,
    /// Top-level resources in declaration order.
    pub resources: Vec<Resource>,
}

impl Specification {
    /// Create a specification with no resources.
    pub fn new(title: impl Into<String>, version: Option<String>) -> Self {
        Self {
            title: title.into(),
            version,
            resources: Vec::new(),
        }
    }

    /// Append a top-level resource.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }
}

/// An endpoint of the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    /// Absolute URI template, including every parent segment.
    pub uri: String,
    /// Human-readable name used in diagnostics.
    pub display_name: String,
    /// Declared methods in declaration order. At most one per verb.
    pub methods: Vec<Method>,
    /// Nested resources in declaration order.
    pub resources: Vec<Resource>,
}

impl Resource {
    pub fn new(uri: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            display_name: display_name.into(),
            methods: Vec::new(),
            resources: Vec::new(),
        }
    }

    /// Add a method, replacing an earlier declaration of the same verb.
    pub fn with_method(mut self, method: Method) -> Self {
        self.insert_method(method);
        self
    }

    /// In-place variant of [`with_method`](Self::with_method).
    pub fn insert_method(&mut self, method: Method) {
        match self.methods.iter_mut().find(|m| m.method == method.method) {
            Some(existing) => *existing = method,
            None => self.methods.push(method),
        }
    }

    /// Append a nested resource.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Upper-case names of the declared methods, in declaration order.
    pub fn method_names(&self) -> Vec<&'static str> {
        self.methods.iter().map(|m| m.method.as_str()).collect()
    }
}

/// A method declared on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub method: HttpMethod,
    /// Description text; empty when the document declares none.
    pub description: String,
}

impl Method {
    pub fn new(method: HttpMethod, description: impl Into<String>) -> Self {
        Self {
            method,
            description: description.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widgets() -> Resource {
        Resource::new("/widgets", "Widgets")
            .with_method(Method::new(HttpMethod::Get, "List widgets"))
            .with_method(Method::new(HttpMethod::Post, "Create a widget"))
    }

    #[test]
    fn method_names_keep_declaration_order() {
        assert_eq!(widgets().method_names(), vec!["GET", "POST"]);

        let reversed = Resource::new("/w", "w")
            .with_method(Method::new(HttpMethod::Post, ""))
            .with_method(Method::new(HttpMethod::Get, ""));
        assert_eq!(reversed.method_names(), vec!["POST", "GET"]);
    }

    #[test]
    fn redeclared_method_replaces_in_place() {
        let r = widgets().with_method(Method::new(HttpMethod::Get, "Browse widgets"));
        assert_eq!(r.methods.len(), 2);
        assert_eq!(r.method_names(), vec!["GET", "POST"]);
        assert_eq!(r.methods[0].description, "Browse widgets");
    }

    #[test]
    fn specification_keeps_resource_order() {
        let spec = Specification::new("Shop", Some("v1".into()))
            .with_resource(Resource::new("/b", "b"))
            .with_resource(Resource::new("/a", "a"));
        let uris: Vec<&str> = spec.resources.iter().map(|r| r.uri.as_str()).collect();
        assert_eq!(uris, vec!["/b", "/a"]);
    }
}
