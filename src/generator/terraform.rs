use super::emitter::{EmitContext, Emitter};
use super::naming::{comment_text, hcl_string, node_slug, terraform_identifier};
use crate::config::GeneratorConfig;
use crate::diagram::kind::{ENGINE, INSTANCE_CLASS, INSTANCE_TYPE, MULTI_AZ, STORAGE_GB};
use crate::diagram::{ComponentKind, ComponentNode};
use itertools::Itertools;
use std::fmt::{self, Write};

/// Renders AWS-flavoured Terraform: provider boilerplate plus one block per node.
pub struct TerraformEmitter;

impl Emitter for TerraformEmitter {
    fn format_name(&self) -> &str {
        "terraform"
    }

    fn skeleton(&self, ctx: &EmitContext<'_>) -> String {
        skeleton_text(ctx.config)
    }

    fn emit(&self, nodes: &[ComponentNode], ctx: &EmitContext<'_>) -> Result<String, fmt::Error> {
        let config = ctx.config;
        let mut sections = Vec::with_capacity(nodes.len() + 5);

        let mut settings = String::new();
        writeln!(settings, "# Generated Terraform Configuration")?;
        writeln!(settings, "# Infrastructure as Code for {}", comment_text(&config.project_name))?;
        writeln!(settings)?;
        settings.push_str(&terraform_settings(config));
        sections.push(settings);

        sections.push("provider \"aws\" {\n  region = var.aws_region\n}".to_string());
        sections.push(variable_block(
            "aws_region",
            "AWS region",
            &config.aws_region,
        ));
        sections.push(variable_block(
            "environment",
            "Environment name",
            &config.environment,
        ));

        if nodes.iter().any(|n| n.kind == ComponentKind::Server) {
            sections.push(AMI_LOOKUP.to_string());
        }

        for (index, node) in nodes.iter().enumerate() {
            sections.push(render_resource(node, index + 1, config)?);
        }

        Ok(format!("{}\n", sections.iter().join("\n\n")))
    }
}

const AMI_LOOKUP: &str = r#"data "aws_ami" "ubuntu" {
  most_recent = true
  owners      = ["099720109477"]

  filter {
    name   = "name"
    values = ["ubuntu/images/hvm-ssd/ubuntu-jammy-22.04-amd64-server-*"]
  }
}"#;

fn skeleton_text(config: &GeneratorConfig) -> String {
    format!(
        "# Terraform Configuration\n\
         # Add components to the canvas to generate infrastructure code\n\
         \n\
         {}\n\
         \n\
         provider \"aws\" {{\n  region = {}\n}}",
        terraform_settings(config),
        hcl_string(&config.aws_region)
    )
}

/// The `terraform { ... }` block, without a trailing newline.
fn terraform_settings(config: &GeneratorConfig) -> String {
    format!(
        "terraform {{\n  required_version = {}\n  required_providers {{\n    aws = {{\n      source  = \"hashicorp/aws\"\n      version = {}\n    }}\n  }}\n}}",
        hcl_string(&config.terraform_version),
        hcl_string(&config.aws_provider_version)
    )
}

fn variable_block(name: &str, description: &str, default: &str) -> String {
    format!(
        "variable \"{}\" {{\n  description = {}\n  type        = string\n  default     = {}\n}}",
        name,
        hcl_string(description),
        hcl_string(default)
    )
}

fn render_resource(
    node: &ComponentNode,
    index: usize,
    config: &GeneratorConfig,
) -> Result<String, fmt::Error> {
    let resource_name = terraform_identifier(node.kind.as_str(), index);
    let mut out = String::new();

    match &node.kind {
        ComponentKind::Server => {
            let props = &node.properties;
            writeln!(out, "resource \"aws_instance\" \"{}\" {{", resource_name)?;
            writeln!(out, "  ami           = data.aws_ami.ubuntu.id")?;
            writeln!(out, "  instance_type = {}", hcl_string(&INSTANCE_TYPE.resolve_text(props)))?;
            writeln!(out)?;
            writeln!(out, "  root_block_device {{")?;
            writeln!(out, "    volume_size = {}", STORAGE_GB.resolve_u64(props))?;
            writeln!(out, "    volume_type = \"gp3\"")?;
            writeln!(out, "  }}")?;
            writeln!(out)?;
            write_tags(&mut out, node.display_name(), config)?;
            write!(out, "}}")?;
        }
        ComponentKind::Database => {
            let props = &node.properties;
            let engine = ENGINE.resolve_text(props);
            let identifier = node_slug(node, &resource_name.replace('_', "-"));
            writeln!(out, "resource \"aws_db_instance\" \"{}\" {{", resource_name)?;
            writeln!(out, "  identifier     = {}", hcl_string(&identifier))?;
            writeln!(out, "  engine         = {}", hcl_string(&engine))?;
            if let Some(version) = engine_version(&engine) {
                writeln!(out, "  engine_version = {}", hcl_string(version))?;
            }
            writeln!(out, "  instance_class = {}", hcl_string(&INSTANCE_CLASS.resolve_text(props)))?;
            writeln!(out)?;
            writeln!(out, "  allocated_storage     = 20")?;
            writeln!(out, "  max_allocated_storage = 100")?;
            writeln!(out, "  storage_type          = \"gp3\"")?;
            writeln!(out, "  storage_encrypted     = true")?;
            writeln!(out)?;
            writeln!(out, "  multi_az = {}", MULTI_AZ.resolve_bool(props))?;
            writeln!(out)?;
            write_tags(&mut out, node.display_name(), config)?;
            write!(out, "}}")?;
        }
        other => {
            let kind = comment_text(other.as_str());
            writeln!(out, "# {} resource", kind)?;
            writeln!(out, "# Configuration for {}", comment_text(node.display_name()))?;
            write!(out, "# Resource type: {}", kind)?;
        }
    }

    Ok(out)
}

fn write_tags(out: &mut String, name: &str, config: &GeneratorConfig) -> fmt::Result {
    writeln!(out, "  tags = {{")?;
    writeln!(out, "    Name        = {}", hcl_string(name))?;
    writeln!(out, "    Environment = var.environment")?;
    writeln!(out, "    ManagedBy   = {}", hcl_string(&config.project_name))?;
    writeln!(out, "  }}")
}

/// Default major version for the engines offered in the property panel.
fn engine_version(engine: &str) -> Option<&'static str> {
    match engine {
        "mysql" => Some("8.0"),
        "postgres" => Some("16"),
        "mariadb" => Some("10.11"),
        "oracle" => Some("19"),
        _ => None,
    }
}
