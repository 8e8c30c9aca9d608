//! Common test utilities for building diagrams and generator inputs.
use chrono::{DateTime, TimeZone, Utc};
use infragraph::prelude::*;

/// A fixed generation time, so JSON output is reproducible.
#[allow(dead_code)]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// A single server named "Web" with only `instanceType` set.
#[allow(dead_code)]
pub fn web_server() -> ComponentNode {
    ComponentNode::bare("n1", ComponentKind::Server, "Web").with_property("instanceType", "t3.small")
}

/// A small three-tier graph: a server, a database and a bucket, wired together.
#[allow(dead_code)]
pub fn three_tier() -> Diagram {
    Diagram::new(
        vec![
            ComponentNode::new("node-1", ComponentKind::Server, "Web Server")
                .with_label("EC2 Instance")
                .at(Position::new(100.0, 120.0)),
            ComponentNode::new("node-2", ComponentKind::Database, "Orders DB")
                .with_label("RDS Database")
                .at(Position::new(360.0, 120.0))
                .with_property("engine", "postgres")
                .with_property("multiAZ", true),
            ComponentNode::new("node-3", ComponentKind::Storage, "Assets")
                .with_label("S3 Storage")
                .at(Position::new(360.0, 300.0)),
        ],
        vec![
            Connection::new("node-1", "node-2"),
            Connection {
                source_handle: Some("bottom".to_string()),
                target_handle: Some("top".to_string()),
                ..Connection::new("node-1", "node-3")
            },
        ],
    )
}

/// Every catalog kind once, plus one kind outside the catalog.
#[allow(dead_code)]
pub fn every_kind() -> Vec<ComponentNode> {
    ComponentKind::KNOWN
        .iter()
        .cloned()
        .chain(std::iter::once(ComponentKind::Other("message-queue".to_string())))
        .enumerate()
        .map(|(i, kind)| {
            let name = format!("{} {}", kind.label(), i + 1);
            ComponentNode::new(format!("node-{}", i + 1), kind, name)
        })
        .collect()
}

/// Counts `{` and `}` outside of string literals and comment lines.
#[allow(dead_code)]
pub fn brace_balance(hcl: &str) -> i64 {
    let mut depth = 0i64;
    for line in hcl.lines() {
        if line.trim_start().starts_with('#') {
            continue;
        }
        let mut in_string = false;
        let mut escaped = false;
        for c in line.chars() {
            match c {
                _ if escaped => escaped = false,
                '\\' if in_string => escaped = true,
                '"' => in_string = !in_string,
                '{' if !in_string => depth += 1,
                '}' if !in_string => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return depth;
            }
        }
    }
    depth
}

/// The exchange document the canvas would save for a two-node graph.
#[allow(dead_code)]
pub const CANVAS_EXPORT_JSON: &str = r#"{
  "nodes": [
    {
      "id": "node-1",
      "position": { "x": 250, "y": 100 },
      "type": "infra",
      "data": {
        "type": "server",
        "label": "EC2 Instance",
        "name": "Api Server",
        "icon": "Server",
        "properties": { "instanceType": "t3.large", "region": "eu-west-1", "storage": 50 }
      }
    },
    {
      "id": "node-2",
      "position": { "x": 500, "y": 100 },
      "type": "infra",
      "data": {
        "type": "lambda",
        "label": "Lambda",
        "name": "Thumbnailer",
        "properties": { "runtime": "python3.9", "memorySize": 256, "notes": null }
      }
    }
  ],
  "edges": [
    { "id": "edge-node-1-node-2", "source": "node-1", "target": "node-2",
      "sourceHandle": "right", "targetHandle": "left" }
  ]
}"#;
