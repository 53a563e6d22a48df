//! # Validator
//!
//! Compares one [`Specification`] with one Apigility module. Each check
//! appends zero or more diagnostics to a shared list and returns; none of
//! them stops the pipeline.
//!
//! Route matching is a prefix match: a resource `/widgets` is served by
//! any route whose pattern starts with `/widgets`, so `/widgets[/:id]`
//! and `/widgets-archive` both match. Every matching route is checked.

use std::path::PathBuf;

use arv_config::{DocumentationConfig, MethodScope, ModuleConfig, ProjectLayout, Route};
use arv_core::{json_list, ucfirst, Diagnostic, Resource, Specification};

use crate::error::ValidateError;
use crate::report::Report;

/// Validation pipeline for one module.
#[derive(Debug)]
pub struct Validator<'a> {
    spec: &'a Specification,
    layout: ProjectLayout,
    module: String,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Validator<'a> {
    /// `module` overrides the module name; by default it is the
    /// specification title.
    pub fn new(spec: &'a Specification, project_root: impl Into<PathBuf>, module: Option<&str>) -> Self {
        let module = module.unwrap_or(&spec.title).to_string();
        Self {
            spec,
            layout: ProjectLayout::new(project_root),
            module,
            diagnostics: Vec::new(),
        }
    }

    /// Name of the module being validated.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Run every check and return the report.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::Config`] if the module config is missing or
    /// malformed, or if a matched route names a controller with no method
    /// config. Mismatches are never errors.
    pub fn run(mut self) -> Result<Report, ValidateError> {
        let spec = self.spec;
        let module = self.module.clone();
        tracing::info!(
            module = %module,
            project = %self.layout.root().display(),
            resources = spec.resources.len(),
            "validating module against specification"
        );

        self.check_module_exists(&module);
        self.check_version_exists(&module, spec.version.as_deref());
        self.check_endpoints(&module, &spec.resources)?;

        tracing::info!(
            module = %module,
            diagnostics = self.diagnostics.len(),
            "validation finished"
        );
        Ok(Report::new(module, self.diagnostics))
    }

    /// Record a diagnostic if `module/<module>` is not a directory.
    pub fn check_module_exists(&mut self, module: &str) {
        let dir = self.layout.module_dir(module);
        if !dir.is_dir() {
            tracing::debug!(path = %dir.display(), "module directory missing");
            self.diagnostics
                .push(Diagnostic::structural(format!("The {module} module does not exist")));
        }
    }

    /// Record a diagnostic if `module/<module>/src/<Version>` is not a
    /// directory, or if the specification declares no version.
    pub fn check_version_exists(&mut self, module: &str, version: Option<&str>) {
        let Some(version) = version else {
            self.diagnostics.push(Diagnostic::structural(format!(
                "No version declared in the specification for the {module} module"
            )));
            return;
        };
        let dir = self.layout.version_dir(module, &ucfirst(version));
        if !dir.is_dir() {
            tracing::debug!(path = %dir.display(), "version directory missing");
            self.diagnostics.push(Diagnostic::structural(format!(
                "No service with version {version} found for the {module} module"
            )));
        }
    }

    /// Match each resource against the module's routes and check every
    /// matching route.
    pub fn check_endpoints(&mut self, module: &str, resources: &[Resource]) -> Result<(), ValidateError> {
        let config = self
            .layout
            .load_module_config(module)
            .map_err(|e| ValidateError::config(module, e))?;

        let documentation = self
            .layout
            .load_documentation_config(module)
            .map_err(|e| ValidateError::config(module, e))?;
        if documentation.is_none() {
            self.diagnostics.push(Diagnostic::documentation(format!(
                "Missing documentation for the module {module}"
            )));
        }

        for resource in resources {
            let mut found = false;
            for route in config.routes() {
                if !route.pattern.starts_with(&resource.uri) {
                    continue;
                }
                found = true;
                tracing::debug!(
                    resource = %resource.uri,
                    route = %route.name,
                    pattern = %route.pattern,
                    "route matches resource"
                );

                self.check_endpoint_methods(route, &config, resource, MethodScope::Collection)
                    .map_err(|e| ValidateError::config(module, e))?;
                if let Some(docs) = &documentation {
                    self.check_documentation(route, docs, resource, MethodScope::Collection);
                }
            }

            if !found {
                self.diagnostics.push(Diagnostic::structural(format!(
                    "Endpoint {} not found",
                    resource.display_name
                )));
            }
        }
        Ok(())
    }

    /// Compare the methods the route's controller implements with the
    /// methods the resource declares.
    pub fn check_endpoint_methods(
        &mut self,
        route: &Route,
        config: &ModuleConfig,
        resource: &Resource,
        scope: MethodScope,
    ) -> Result<(), arv_config::ConfigError> {
        let implemented = config.implemented_methods(&route.controller, scope)?;
        let specified = resource.method_names();

        let unspecified: Vec<&str> = implemented
            .iter()
            .map(String::as_str)
            .filter(|m| !specified.contains(m))
            .collect();
        let unimplemented: Vec<&str> = specified
            .iter()
            .copied()
            .filter(|m| !implemented.iter().any(|i| i == m))
            .collect();

        if unspecified.is_empty() && unimplemented.is_empty() {
            return Ok(());
        }

        tracing::debug!(
            resource = %resource.uri,
            controller = %route.controller,
            ?unspecified,
            ?unimplemented,
            "method coverage differs"
        );
        self.diagnostics.push(
            Diagnostic::coverage(format!("Missing methods for {} resource!", resource.display_name))
                .with_detail(format!("  Expected {}", json_list(&specified)))
                .with_detail(format!("  Implemented {}", json_list(implemented))),
        );
        Ok(())
    }

    /// Compare each declared method's description with the documented one.
    pub fn check_documentation(
        &mut self,
        route: &Route,
        documentation: &DocumentationConfig,
        resource: &Resource,
        scope: MethodScope,
    ) {
        for method in &resource.methods {
            let verb = method.method.as_str();
            let identifier = format!("{} {verb} ({})", resource.display_name, scope.key());

            match documentation.description(&route.controller, scope, verb) {
                Some(found) if found == method.description => {}
                Some(found) => self.diagnostics.push(
                    Diagnostic::documentation(format!("Documentation does not match for {identifier}"))
                        .with_detail(format!("  Expected: {}", method.description))
                        .with_detail(format!("     Found: {found}")),
                ),
                None => self
                    .diagnostics
                    .push(Diagnostic::documentation(format!("Missing documentation for {identifier}"))),
            }
        }
    }
}
