use crate::config::GeneratorConfig;
use crate::diagram::ComponentNode;
use ahash::AHashMap;
use chrono::{DateTime, Utc};

mod emitter;
mod format;
pub mod json;
pub mod naming;
pub mod terraform;
pub mod yaml;

pub use emitter::{EmitContext, Emitter, create_emitter};
pub use format::Format;

/// Text returned for a format no emitter is registered for.
pub const NO_COMPONENTS: &str = "# No components on canvas";

/// A generated document plus the metadata shown next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDocument {
    pub format: Format,
    pub text: String,
}

impl GeneratedDocument {
    /// Number of `\n`-separated lines, counting a trailing empty line.
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Size of the text in bytes (UTF-8).
    pub fn byte_size(&self) -> usize {
        self.text.len()
    }

    pub fn file_name(&self) -> String {
        self.format.file_name()
    }
}

/// Dispatches a node list to the emitter registered for the requested format.
///
/// Generation never fails: an empty node list yields the format's skeleton, and an
/// unknown format name yields [`NO_COMPONENTS`].
pub struct Generator {
    config: GeneratorConfig,
    registry: AHashMap<String, Box<dyn Emitter>>,
}

pub struct GeneratorBuilder {
    config: GeneratorConfig,
    registry: AHashMap<String, Box<dyn Emitter>>,
}

impl GeneratorBuilder {
    pub fn new() -> Self {
        let mut registry: AHashMap<String, Box<dyn Emitter>> = AHashMap::new();
        emitter::register_default_emitters(&mut registry);
        Self {
            config: GeneratorConfig::default(),
            registry,
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers `emitter` under its format name, replacing any existing one.
    pub fn with_emitter(mut self, emitter: Box<dyn Emitter>) -> Self {
        self.registry
            .insert(emitter.format_name().to_ascii_lowercase(), emitter);
        self
    }

    pub fn build(self) -> Generator {
        Generator {
            config: self.config,
            registry: self.registry,
        }
    }
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Generator {
    fn default() -> Self {
        GeneratorBuilder::new().build()
    }
}

impl Generator {
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    pub fn new(config: GeneratorConfig) -> Self {
        GeneratorBuilder::new().with_config(config).build()
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Registered format names, sorted.
    pub fn formats(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.registry.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn generate(&self, nodes: &[ComponentNode], format: Format) -> String {
        self.generate_at(nodes, format.as_str(), Utc::now())
    }

    /// Like [`Generator::generate`] but with an untyped format name, e.g. from a UI selector.
    pub fn generate_named(&self, nodes: &[ComponentNode], format_name: &str) -> String {
        self.generate_at(nodes, format_name, Utc::now())
    }

    /// Generates with a fixed timestamp, which makes the output fully reproducible.
    pub fn generate_at(
        &self,
        nodes: &[ComponentNode],
        format_name: &str,
        generated_at: DateTime<Utc>,
    ) -> String {
        let Some(emitter) = self.lookup(format_name) else {
            log::warn!("No emitter registered for format '{}'", format_name);
            return NO_COMPONENTS.to_string();
        };

        let ctx = EmitContext {
            config: &self.config,
            generated_at,
        };

        let text = if nodes.is_empty() {
            emitter.skeleton(&ctx)
        } else {
            match emitter.emit(nodes, &ctx) {
                Ok(text) => text,
                Err(_) => {
                    log::error!(
                        "Emitter '{}' failed on {} components; showing its skeleton",
                        emitter.format_name(),
                        nodes.len()
                    );
                    emitter.skeleton(&ctx)
                }
            }
        };

        log::debug!(
            "Generated {} output for {} components ({} bytes)",
            emitter.format_name(),
            nodes.len(),
            text.len()
        );

        if text.is_empty() {
            NO_COMPONENTS.to_string()
        } else {
            text
        }
    }

    pub fn document(&self, nodes: &[ComponentNode], format: Format) -> GeneratedDocument {
        GeneratedDocument {
            format,
            text: self.generate(nodes, format),
        }
    }

    fn lookup(&self, format_name: &str) -> Option<&dyn Emitter> {
        let key = format_name.trim().to_ascii_lowercase();
        self.registry
            .get(&key)
            .or_else(|| {
                key.parse::<Format>()
                    .ok()
                    .and_then(|format| self.registry.get(format.as_str()))
            })
            .map(|emitter| &**emitter)
    }
}

/// Generates `format` text for `nodes` with the default configuration.
pub fn generate(nodes: &[ComponentNode], format: Format) -> String {
    Generator::default().generate(nodes, format)
}
