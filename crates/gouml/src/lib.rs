//! gouml - PlantUML class diagrams from Go source code.
//!
//! Go files are discovered and parsed, their struct and interface
//! declarations are collected into a namespace-organized model, implicit
//! interface satisfaction is resolved, and the model is rendered as PlantUML
//! class-diagram text.

pub mod builder;
pub mod config;
pub mod render;
pub mod resolver;
pub mod source;

mod error;

pub use gouml_core::{model, naming, visibility};

pub use error::GoumlError;

use std::path::{Path, PathBuf};

use log::{debug, info, trace};

use builder::ModelBuilder;
use config::AppConfig;
use model::Model;
use render::DiagramRenderer;
use resolver::SatisfactionResolver;
use source::SourcePackage;

/// Builder for turning Go sources into class diagrams.
///
/// This provides an API for processing Go code through loading, model
/// building, interface resolution, and rendering stages.
///
/// # Examples
///
/// ```rust
/// use gouml::DiagramBuilder;
///
/// let builder = DiagramBuilder::default();
///
/// let packages = builder
///     .load_sources([("shapes/shape.go", "package shapes\ntype Shape interface { Area() float64 }\n")])
///     .expect("Failed to parse");
///
/// let model = builder.build(&packages);
/// let text = builder.render(&model);
///
/// assert!(text.contains("interface Shape"));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use gouml::{DiagramBuilder, config::AppConfig};
    ///
    /// let builder = DiagramBuilder::new(AppConfig::default());
    /// ```
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Discover and parse the Go files under `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`GoumlError::Io`] if the directory cannot be walked or a file
    /// cannot be read, and [`GoumlError::Parse`] for the first file that does
    /// not parse.
    pub fn load(&self, dir: impl AsRef<Path>) -> Result<Vec<SourcePackage>, GoumlError> {
        let dir = dir.as_ref();
        info!(dir = dir.display().to_string(); "Loading Go sources");

        let paths = source::discover(dir, self.config.source())?;
        source::parse_files(&paths)
    }

    /// Parse in-memory `(path, source)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`GoumlError::Parse`] for the first source that does not parse.
    pub fn load_sources<'a, I, P>(&self, sources: I) -> Result<Vec<SourcePackage>, GoumlError>
    where
        I: IntoIterator<Item = (P, &'a str)>,
        P: Into<PathBuf>,
    {
        source::load_sources(sources, self.config.source())
    }

    /// Build the declaration model and resolve interface satisfaction.
    pub fn build(&self, packages: &[SourcePackage]) -> Model {
        info!(packages = packages.len(); "Building declaration model");

        let mut model = ModelBuilder::new().build(packages);
        SatisfactionResolver::new().resolve(&mut model);

        debug!(namespaces = model.len(); "Model ready");
        trace!(model:?; "Resolved model");
        model
    }

    /// Load, build and resolve in one step.
    ///
    /// # Errors
    ///
    /// See [`DiagramBuilder::load`].
    pub fn parse_dir(&self, dir: impl AsRef<Path>) -> Result<Model, GoumlError> {
        let packages = self.load(dir)?;
        Ok(self.build(&packages))
    }

    /// Render the model as PlantUML text.
    pub fn render(&self, model: &Model) -> String {
        DiagramRenderer::new(*self.config.render()).render(model)
    }
}
