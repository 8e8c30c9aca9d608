//! Generator tests
//!
//! Output-level checks for the Terraform, YAML and JSON emitters and the dispatcher.
//!
mod common;
use common::*;
use infragraph::generator::json::InfrastructureDocument;
use infragraph::generator::{EmitContext, Emitter, NO_COMPONENTS};
use infragraph::prelude::*;
use serde::Deserialize;
use std::fmt;

const TERRAFORM_SKELETON: &str = r#"# Terraform Configuration
# Add components to the canvas to generate infrastructure code

terraform {
  required_version = ">= 1.0"
  required_providers {
    aws = {
      source  = "hashicorp/aws"
      version = "~> 5.0"
    }
  }
}

provider "aws" {
  region = "us-east-1"
}"#;

const YAML_SKELETON: &str = r#"# Kubernetes Configuration
# Add components to the canvas to generate YAML manifests

apiVersion: v1
kind: Namespace
metadata:
  name: infragraph
  labels:
    managed-by: infragraph"#;

fn yaml_documents(text: &str) -> Vec<serde_yaml::Value> {
    serde_yaml::Deserializer::from_str(text)
        .map(|doc| serde_yaml::Value::deserialize(doc).expect("valid YAML document"))
        .collect()
}

#[cfg(test)]
mod dispatcher_tests {
    use super::*;

    #[test]
    fn test_empty_canvas_yields_skeletons() {
        let generator = Generator::default();
        assert_eq!(generator.generate(&[], Format::Terraform), TERRAFORM_SKELETON);
        assert_eq!(generator.generate(&[], Format::Yaml), YAML_SKELETON);

        let json = generator.generate(&[], Format::Json);
        let doc: InfrastructureDocument = serde_json::from_str(&json).expect("valid JSON");
        assert!(doc.infrastructure.is_empty());
        assert_eq!(doc.metadata.components, 0);
    }

    #[test]
    fn test_skeleton_does_not_depend_on_previous_calls() {
        let generator = Generator::default();
        let first = generator.generate(&[], Format::Terraform);
        let _ = generator.generate(&every_kind(), Format::Terraform);
        let _ = generator.generate(&every_kind(), Format::Yaml);
        assert_eq!(generator.generate(&[], Format::Terraform), first);
        assert_eq!(generator.generate(&[], Format::Yaml), YAML_SKELETON);
    }

    #[test]
    fn test_every_format_returns_text() {
        let generator = Generator::default();
        for format in Format::ALL {
            assert!(!generator.generate(&[], format).is_empty());
            assert!(!generator.generate(&every_kind(), format).is_empty());
            assert!(!generator.generate(&[web_server()], format).is_empty());
        }
    }

    #[test]
    fn test_unknown_format_falls_back_to_comment() {
        let generator = Generator::default();
        assert_eq!(generator.generate_named(&[web_server()], "xml"), NO_COMPONENTS);
        assert_eq!(generator.generate_named(&[], "cloudformation"), NO_COMPONENTS);
    }

    #[test]
    fn test_format_aliases() {
        let generator = Generator::default();
        let nodes = [web_server()];
        assert_eq!(
            generator.generate_named(&nodes, "tf"),
            generator.generate(&nodes, Format::Terraform)
        );
        assert_eq!(
            generator.generate_named(&nodes, " K8S "),
            generator.generate(&nodes, Format::Yaml)
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let generator = Generator::default();
        let nodes = three_tier().nodes;
        assert_eq!(
            generator.generate(&nodes, Format::Terraform),
            generator.generate(&nodes, Format::Terraform)
        );
        assert_eq!(
            generator.generate_at(&nodes, "json", fixed_time()),
            generator.generate_at(&nodes, "json", fixed_time())
        );
    }

    #[test]
    fn test_document_metadata() {
        let generator = Generator::default();
        let document = generator.document(&[web_server()], Format::Yaml);
        assert_eq!(document.file_name(), "infrastructure.yml");
        assert_eq!(document.byte_size(), document.text.len());
        assert_eq!(document.line_count(), document.text.split('\n').count());

        assert_eq!(
            generator.document(&[], Format::Terraform).file_name(),
            "infrastructure.tf"
        );
        assert_eq!(
            generator.document(&[], Format::Json).file_name(),
            "infrastructure.json"
        );
    }

    struct MarkdownEmitter;

    impl Emitter for MarkdownEmitter {
        fn format_name(&self) -> &str {
            "markdown"
        }

        fn skeleton(&self, _ctx: &EmitContext<'_>) -> String {
            "_empty_".to_string()
        }

        fn emit(
            &self,
            nodes: &[ComponentNode],
            ctx: &EmitContext<'_>,
        ) -> std::result::Result<String, fmt::Error> {
            use std::fmt::Write;
            let mut out = String::new();
            writeln!(out, "# {}", ctx.config.project_name)?;
            for node in nodes {
                writeln!(out, "- {} ({})", node.display_name(), node.kind)?;
            }
            Ok(out)
        }
    }

    #[test]
    fn test_custom_emitter_registration() {
        let generator = Generator::builder()
            .with_emitter(Box::new(MarkdownEmitter))
            .build();

        assert_eq!(generator.formats(), vec!["json", "markdown", "terraform", "yaml"]);
        assert_eq!(generator.generate_named(&[], "markdown"), "_empty_");
        assert_eq!(
            generator.generate_named(&[web_server()], "Markdown"),
            "# InfraGraph\n- Web (server)\n"
        );
    }

    #[test]
    fn test_free_function_uses_default_config() {
        let text = infragraph::generator::generate(&[web_server()], Format::Terraform);
        assert!(text.contains("ManagedBy   = \"InfraGraph\""));
    }
}

#[cfg(test)]
mod terraform_tests {
    use super::*;

    #[test]
    fn test_server_defaults() {
        let node = ComponentNode::bare("n1", ComponentKind::Server, "Web");
        let hcl = Generator::default().generate(&[node], Format::Terraform);

        assert!(hcl.contains("resource \"aws_instance\" \"server_1\" {"));
        assert!(hcl.contains("instance_type = \"t3.micro\""));
        assert!(hcl.contains("volume_size = 20"));
        assert!(hcl.contains("Name        = \"Web\""));
    }

    #[test]
    fn test_server_scenario_with_instance_type() {
        let hcl = Generator::default().generate(&[web_server()], Format::Terraform);

        assert!(hcl.contains("instance_type = \"t3.small\""));
        assert!(hcl.contains("volume_size = 20"));
        assert!(!hcl.contains("undefined"));
        assert!(hcl.contains("data \"aws_ami\" \"ubuntu\""));
        assert!(hcl.ends_with("}\n"));
    }

    #[test]
    fn test_database_multi_az_defaults_to_false() {
        let node = ComponentNode::bare("n1", ComponentKind::Database, "Orders DB");
        let hcl = Generator::default().generate(&[node], Format::Terraform);

        assert!(hcl.contains("resource \"aws_db_instance\" \"database_1\" {"));
        assert!(hcl.contains("multi_az = false"));
        assert!(hcl.contains("engine         = \"mysql\""));
        assert!(hcl.contains("engine_version = \"8.0\""));
        assert!(hcl.contains("instance_class = \"db.t3.micro\""));
        assert!(hcl.contains("identifier     = \"orders-db\""));
        assert!(!hcl.contains("aws_ami"));
    }

    #[test]
    fn test_database_properties_are_mapped() {
        let hcl = Generator::default().generate(&three_tier().nodes, Format::Terraform);
        assert!(hcl.contains("engine         = \"postgres\""));
        assert!(hcl.contains("engine_version = \"16\""));
        assert!(hcl.contains("multi_az = true"));
    }

    #[test]
    fn test_malformed_values_fall_back_to_defaults() {
        let nodes = vec![
            ComponentNode::bare("n1", ComponentKind::Server, "Web")
                .with_property("storage", "lots")
                .with_property("instanceType", ""),
            ComponentNode::bare("n2", ComponentKind::Database, "Db").with_property("multiAZ", "maybe"),
        ];
        let hcl = Generator::default().generate(&nodes, Format::Terraform);
        assert!(hcl.contains("volume_size = 20"));
        assert!(hcl.contains("instance_type = \"t3.micro\""));
        assert!(hcl.contains("multi_az = false"));
    }

    #[test]
    fn test_identifiers_are_distinct() {
        let nodes = vec![
            ComponentNode::new("a", ComponentKind::Server, "Web"),
            ComponentNode::new("b", ComponentKind::Server, "Web"),
            ComponentNode::new("c", ComponentKind::Database, "Db"),
        ];
        let hcl = Generator::default().generate(&nodes, Format::Terraform);
        assert!(hcl.contains("\"server_1\""));
        assert!(hcl.contains("\"server_2\""));
        assert!(hcl.contains("\"database_3\""));
    }

    #[test]
    fn test_unknown_type_renders_placeholder() {
        let node = ComponentNode::new("n1", ComponentKind::parse("message-queue"), "Jobs");
        let hcl = Generator::default().generate(&[node], Format::Terraform);
        assert!(hcl.contains("# message-queue resource"));
        assert!(hcl.contains("# Configuration for Jobs"));
        assert!(hcl.contains("# Resource type: message-queue"));
    }

    #[test]
    fn test_blocks_are_balanced_and_separated() {
        let mut nodes = every_kind();
        nodes.push(ComponentNode::new(
            "weird",
            ComponentKind::Server,
            "Web \"prod\" ${var.x} {x}",
        ));
        let hcl = Generator::default().generate(&nodes, Format::Terraform);

        assert_eq!(brace_balance(&hcl), 0);
        assert!(hcl.contains("}\n\nresource \"aws_instance\" \"server_1\""));
        assert!(hcl.contains("loadbalancer\n\nresource \"aws_db_instance\""));
        assert!(hcl.contains("Name        = \"Web \\\"prod\\\" $${var.x} {x}\""));
    }

    #[test]
    fn test_empty_names_do_not_break_generation() {
        let nodes = vec![
            ComponentNode::bare("n1", ComponentKind::Server, ""),
            ComponentNode::bare("n2", ComponentKind::Database, "   "),
        ];
        let hcl = Generator::default().generate(&nodes, Format::Terraform);
        assert!(hcl.contains("Name        = \"Unnamed\""));
        assert!(hcl.contains("identifier     = \"database-2\""));
        assert_eq!(brace_balance(&hcl), 0);
    }

    #[test]
    fn test_config_is_applied() {
        let config = GeneratorConfig {
            project_name: "Shop".to_string(),
            aws_region: "eu-west-1".to_string(),
            environment: "prod".to_string(),
            ..GeneratorConfig::default()
        };
        let generator = Generator::new(config);

        let skeleton = generator.generate(&[], Format::Terraform);
        assert!(skeleton.contains("region = \"eu-west-1\""));

        let hcl = generator.generate(&[web_server()], Format::Terraform);
        assert!(hcl.contains("# Infrastructure as Code for Shop"));
        assert!(hcl.contains("default     = \"prod\""));
        assert!(hcl.contains("ManagedBy   = \"Shop\""));
    }
}

#[cfg(test)]
mod yaml_tests {
    use super::*;

    #[test]
    fn test_empty_canvas_namespace() {
        let docs = yaml_documents(YAML_SKELETON);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0]["kind"], "Namespace");
        assert_eq!(docs[0]["metadata"]["name"], "infragraph");
    }

    #[test]
    fn test_manifest_per_node() {
        let nodes = every_kind();
        let yaml = Generator::default().generate(&nodes, Format::Yaml);
        let docs = yaml_documents(&yaml);

        assert_eq!(docs.len(), nodes.len() + 1);
        assert_eq!(docs[0]["kind"], "Namespace");
        assert_eq!(yaml.matches("\n---\n").count(), nodes.len());
        assert!(!yaml.trim_end().ends_with("---"));
    }

    #[test]
    fn test_server_deployment() {
        let node = ComponentNode::new("n1", ComponentKind::Server, "Web Server");
        let yaml = Generator::default().generate(&[node], Format::Yaml);
        let docs = yaml_documents(&yaml);

        let deployment = &docs[1];
        assert_eq!(deployment["kind"], "Deployment");
        assert_eq!(deployment["metadata"]["name"], "server-1");
        assert_eq!(deployment["metadata"]["namespace"], "infragraph");
        assert_eq!(deployment["metadata"]["labels"]["app"], "web-server");
        assert_eq!(deployment["spec"]["replicas"], 1);

        let container = &deployment["spec"]["template"]["spec"]["containers"][0];
        assert_eq!(container["resources"]["requests"]["memory"], "64Mi");
        assert_eq!(container["resources"]["limits"]["cpu"], "500m");
    }

    #[test]
    fn test_other_types_become_config_maps() {
        let nodes = vec![
            ComponentNode::new("n1", ComponentKind::Storage, "Assets"),
            ComponentNode::new("n2", ComponentKind::parse("message-queue"), "true"),
        ];
        let yaml = Generator::default().generate(&nodes, Format::Yaml);
        let docs = yaml_documents(&yaml);

        assert_eq!(docs[1]["kind"], "ConfigMap");
        assert_eq!(docs[1]["metadata"]["name"], "storage-1-config");
        assert_eq!(docs[1]["data"]["component-type"], "storage");
        assert_eq!(docs[1]["data"]["component-name"], "Assets");

        assert_eq!(docs[2]["metadata"]["name"], "message-queue-2-config");
        assert_eq!(docs[2]["data"]["component-name"], "true");
    }

    #[test]
    fn test_number_like_names_stay_strings() {
        let nodes = vec![
            ComponentNode::new("n1", ComponentKind::Storage, "0x1F"),
            ComponentNode::new("n2", ComponentKind::Storage, "0o17"),
            ComponentNode::new("n3", ComponentKind::Server, "0b11"),
        ];
        let docs = yaml_documents(&Generator::default().generate(&nodes, Format::Yaml));

        assert_eq!(docs[1]["data"]["component-name"], "0x1F");
        assert_eq!(docs[2]["data"]["component-name"], "0o17");
        assert!(docs[1]["data"]["component-name"].is_string());
        assert!(docs[2]["data"]["component-name"].is_string());
        assert_eq!(docs[3]["metadata"]["labels"]["app"], "0b11");
    }

    #[test]
    fn test_unicode_line_breaks_cannot_inject_keys() {
        let name = "a\u{2028}kind: Secret";
        let nodes = vec![
            ComponentNode::new("n1", ComponentKind::Storage, name),
            ComponentNode::new("n2", ComponentKind::Lambda, "b\u{85}data: x\u{2029}y"),
        ];
        let yaml = Generator::default().generate(&nodes, Format::Yaml);
        let docs = yaml_documents(&yaml);

        assert_eq!(docs.len(), 3);
        assert_eq!(docs[1]["kind"], "ConfigMap");
        assert_eq!(docs[1]["data"]["component-name"], name);
        assert_eq!(docs[2]["kind"], "ConfigMap");
        assert_eq!(docs[2]["data"]["component-name"], "b\u{85}data: x\u{2029}y");
        assert_eq!(docs[2]["data"].as_mapping().map(|m| m.len()), Some(2));
        assert!(!yaml.contains('\u{2028}'));
        assert!(!yaml.contains('\u{85}'));
    }

    #[test]
    fn test_custom_namespace() {
        let generator = Generator::new(GeneratorConfig {
            namespace: "Shop Prod".to_string(),
            ..GeneratorConfig::default()
        });
        let docs = yaml_documents(&generator.generate(&[web_server()], Format::Yaml));
        assert_eq!(docs[0]["metadata"]["name"], "shop-prod");
        assert_eq!(docs[1]["metadata"]["namespace"], "shop-prod");
    }
}

#[cfg(test)]
mod json_tests {
    use super::*;

    #[test]
    fn test_document_shape() {
        let nodes = three_tier().nodes;
        let json = Generator::default().generate_at(&nodes, "json", fixed_time());
        let doc: InfrastructureDocument = serde_json::from_str(&json).expect("valid JSON");

        assert_eq!(doc.version, "1.0");
        assert_eq!(doc.metadata.name, "InfraGraph Configuration");
        assert_eq!(doc.metadata.generated_at, "2024-05-01T12:30:00.000Z");
        assert_eq!(doc.metadata.components, nodes.len());
        assert_eq!(doc.infrastructure.len(), nodes.len());

        for (i, (entry, node)) in doc.infrastructure.iter().zip(&nodes).enumerate() {
            assert_eq!(entry.id, node.id);
            assert_eq!(entry.name, node.name);
            assert_eq!(entry.kind, node.kind.as_str());
            assert_eq!(entry.position, node.position);
            assert_eq!(entry.properties, node.properties);
            assert_eq!(entry.metadata.index, i + 1);
        }
    }

    #[test]
    fn test_raw_keys() {
        let json = Generator::default().generate_at(&[web_server()], "json", fixed_time());
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(value["metadata"]["generatedAt"], "2024-05-01T12:30:00.000Z");
        assert_eq!(value["infrastructure"][0]["type"], "server");
        assert_eq!(value["infrastructure"][0]["properties"]["instanceType"], "t3.small");
        assert_eq!(value["infrastructure"][0]["metadata"]["index"], 1);
    }

    #[test]
    fn test_every_kind_parses() {
        let nodes = every_kind();
        let json = Generator::default().generate(&nodes, Format::Json);
        let doc: InfrastructureDocument = serde_json::from_str(&json).expect("valid JSON");
        assert_eq!(doc.infrastructure.len(), nodes.len());
        assert_eq!(doc.infrastructure[11].kind, "message-queue");
    }
}
