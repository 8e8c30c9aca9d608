use super::emitter::{EmitContext, Emitter};
use super::naming::{comment_text, dns_label, node_slug, yaml_scalar};
use crate::config::GeneratorConfig;
use crate::diagram::{ComponentKind, ComponentNode};
use itertools::Itertools;
use std::fmt::{self, Write};

/// Renders Kubernetes manifests: a namespace followed by one manifest per node.
pub struct YamlEmitter;

impl Emitter for YamlEmitter {
    fn format_name(&self) -> &str {
        "yaml"
    }

    fn skeleton(&self, ctx: &EmitContext<'_>) -> String {
        format!(
            "# Kubernetes Configuration\n# Add components to the canvas to generate YAML manifests\n\n{}",
            namespace_manifest(ctx.config).trim_end()
        )
    }

    fn emit(&self, nodes: &[ComponentNode], ctx: &EmitContext<'_>) -> Result<String, fmt::Error> {
        let config = ctx.config;
        let mut manifests = Vec::with_capacity(nodes.len() + 1);

        let mut namespace = String::new();
        writeln!(namespace, "# Generated Kubernetes Configuration")?;
        writeln!(namespace, "# Infrastructure as Code for {}", comment_text(&config.project_name))?;
        writeln!(namespace)?;
        namespace.push_str(&namespace_manifest(config));
        manifests.push(namespace);

        for (index, node) in nodes.iter().enumerate() {
            manifests.push(render_manifest(node, index + 1, config)?);
        }

        Ok(manifests.iter().join("---\n"))
    }
}

fn namespace_manifest(config: &GeneratorConfig) -> String {
    let namespace = dns_label(&config.namespace);
    format!(
        "apiVersion: v1\nkind: Namespace\nmetadata:\n  name: {0}\n  labels:\n    managed-by: {0}\n",
        namespace
    )
}

fn render_manifest(
    node: &ComponentNode,
    index: usize,
    config: &GeneratorConfig,
) -> Result<String, fmt::Error> {
    let resource_name = dns_label(&format!("{}-{}", node.kind.as_str(), index));
    let namespace = dns_label(&config.namespace);
    let mut out = String::new();

    match &node.kind {
        ComponentKind::Server => {
            let app = yaml_scalar(&node_slug(node, &resource_name));
            writeln!(out, "apiVersion: apps/v1")?;
            writeln!(out, "kind: Deployment")?;
            writeln!(out, "metadata:")?;
            writeln!(out, "  name: {}", resource_name)?;
            writeln!(out, "  namespace: {}", namespace)?;
            writeln!(out, "  labels:")?;
            writeln!(out, "    app: {}", app)?;
            writeln!(out, "    managed-by: {}", namespace)?;
            writeln!(out, "spec:")?;
            writeln!(out, "  replicas: 1")?;
            writeln!(out, "  selector:")?;
            writeln!(out, "    matchLabels:")?;
            writeln!(out, "      app: {}", app)?;
            writeln!(out, "  template:")?;
            writeln!(out, "    metadata:")?;
            writeln!(out, "      labels:")?;
            writeln!(out, "        app: {}", app)?;
            writeln!(out, "    spec:")?;
            writeln!(out, "      containers:")?;
            writeln!(out, "      - name: {}", app)?;
            writeln!(out, "        image: nginx:latest")?;
            writeln!(out, "        ports:")?;
            writeln!(out, "        - containerPort: 80")?;
            writeln!(out, "        resources:")?;
            writeln!(out, "          requests:")?;
            writeln!(out, "            memory: \"64Mi\"")?;
            writeln!(out, "            cpu: \"250m\"")?;
            writeln!(out, "          limits:")?;
            writeln!(out, "            memory: \"128Mi\"")?;
            writeln!(out, "            cpu: \"500m\"")?;
        }
        other => {
            let kind = other.as_str();
            writeln!(out, "# {} configuration", comment_text(kind))?;
            writeln!(out, "# Resource: {}", comment_text(node.display_name()))?;
            writeln!(out, "# Type: {}", comment_text(kind))?;
            writeln!(out, "apiVersion: v1")?;
            writeln!(out, "kind: ConfigMap")?;
            writeln!(out, "metadata:")?;
            writeln!(out, "  name: {}-config", resource_name)?;
            writeln!(out, "  namespace: {}", namespace)?;
            writeln!(out, "data:")?;
            writeln!(out, "  component-type: {}", yaml_scalar(kind))?;
            writeln!(out, "  component-name: {}", yaml_scalar(node.display_name()))?;
        }
    }

    Ok(out)
}
