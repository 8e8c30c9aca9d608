use super::property::{PropertyInput, PropertySpec};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of an infrastructure component placed on the canvas.
///
/// Every catalog lookup (display text, property schema, code templates) is a total
/// `match` over this enumeration. Type strings that are not part of the catalog are
/// kept verbatim in `Other` so they survive import/export and render through the
/// generic placeholder branch of each emitter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentKind {
    Server,
    Database,
    Storage,
    LoadBalancer,
    Vpc,
    Cdn,
    Security,
    Lambda,
    Monitoring,
    Gateway,
    Iam,
    Other(String),
}

/// Palette grouping used by the component library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Compute,
    Storage,
    Network,
    Management,
    Unknown,
}

impl Category {
    pub fn title(self) -> &'static str {
        match self {
            Category::Compute => "Compute",
            Category::Storage => "Storage",
            Category::Network => "Network",
            Category::Management => "Management",
            Category::Unknown => "Other",
        }
    }
}

impl ComponentKind {
    /// All known kinds, in palette order.
    pub const KNOWN: [ComponentKind; 11] = [
        ComponentKind::Server,
        ComponentKind::Lambda,
        ComponentKind::LoadBalancer,
        ComponentKind::Database,
        ComponentKind::Storage,
        ComponentKind::Vpc,
        ComponentKind::Gateway,
        ComponentKind::Cdn,
        ComponentKind::Security,
        ComponentKind::Monitoring,
        ComponentKind::Iam,
    ];

    /// Parses a type string. Never fails: unknown strings become `Other`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "server" => ComponentKind::Server,
            "database" => ComponentKind::Database,
            "storage" => ComponentKind::Storage,
            "loadbalancer" => ComponentKind::LoadBalancer,
            "vpc" => ComponentKind::Vpc,
            "cdn" => ComponentKind::Cdn,
            "security" => ComponentKind::Security,
            "lambda" => ComponentKind::Lambda,
            "monitoring" => ComponentKind::Monitoring,
            "gateway" => ComponentKind::Gateway,
            "iam" => ComponentKind::Iam,
            other => ComponentKind::Other(other.to_string()),
        }
    }

    /// The type string used in diagrams and generated code.
    pub fn as_str(&self) -> &str {
        match self {
            ComponentKind::Server => "server",
            ComponentKind::Database => "database",
            ComponentKind::Storage => "storage",
            ComponentKind::LoadBalancer => "loadbalancer",
            ComponentKind::Vpc => "vpc",
            ComponentKind::Cdn => "cdn",
            ComponentKind::Security => "security",
            ComponentKind::Lambda => "lambda",
            ComponentKind::Monitoring => "monitoring",
            ComponentKind::Gateway => "gateway",
            ComponentKind::Iam => "iam",
            ComponentKind::Other(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ComponentKind::Other(_))
    }

    /// Display name shown in the component library.
    pub fn label(&self) -> &str {
        match self {
            ComponentKind::Server => "EC2 Instance",
            ComponentKind::Database => "RDS Database",
            ComponentKind::Storage => "S3 Storage",
            ComponentKind::LoadBalancer => "Load Balancer",
            ComponentKind::Vpc => "VPC",
            ComponentKind::Cdn => "CloudFront",
            ComponentKind::Security => "Security Group",
            ComponentKind::Lambda => "Lambda",
            ComponentKind::Monitoring => "CloudWatch",
            ComponentKind::Gateway => "Internet Gateway",
            ComponentKind::Iam => "IAM Role",
            ComponentKind::Other(raw) => raw,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ComponentKind::Server => "Virtual compute instance",
            ComponentKind::Database => "Managed database service",
            ComponentKind::Storage => "Object storage service",
            ComponentKind::LoadBalancer => "Traffic distribution service",
            ComponentKind::Vpc => "Virtual private cloud",
            ComponentKind::Cdn => "Content delivery network",
            ComponentKind::Security => "Network security rules",
            ComponentKind::Lambda => "Serverless compute function",
            ComponentKind::Monitoring => "Observability service",
            ComponentKind::Gateway => "Network gateway",
            ComponentKind::Iam => "Identity and access management",
            ComponentKind::Other(_) => "Infrastructure component",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            ComponentKind::Server | ComponentKind::Lambda | ComponentKind::LoadBalancer => {
                Category::Compute
            }
            ComponentKind::Database | ComponentKind::Storage => Category::Storage,
            ComponentKind::Vpc
            | ComponentKind::Gateway
            | ComponentKind::Cdn
            | ComponentKind::Security => Category::Network,
            ComponentKind::Monitoring | ComponentKind::Iam => Category::Management,
            ComponentKind::Other(_) => Category::Unknown,
        }
    }

    /// Badge colour class used when rendering the node.
    pub fn accent(&self) -> &'static str {
        match self {
            ComponentKind::Server => "bg-blue-600",
            ComponentKind::Database => "bg-emerald-600",
            ComponentKind::Storage => "bg-amber-600",
            ComponentKind::LoadBalancer => "bg-purple-600",
            ComponentKind::Vpc => "bg-indigo-600",
            ComponentKind::Cdn => "bg-pink-600",
            ComponentKind::Security => "bg-red-600",
            ComponentKind::Lambda => "bg-orange-600",
            ComponentKind::Monitoring => "bg-teal-600",
            ComponentKind::Gateway => "bg-cyan-600",
            ComponentKind::Iam => "bg-slate-600",
            ComponentKind::Other(_) => "bg-zinc-600",
        }
    }

    /// The editable properties of this kind, with their defaults.
    pub fn property_schema(&self) -> &'static [PropertySpec] {
        match self {
            ComponentKind::Server => SERVER_PROPERTIES,
            ComponentKind::Database => DATABASE_PROPERTIES,
            ComponentKind::Lambda => LAMBDA_PROPERTIES,
            _ => &[],
        }
    }
}

pub(crate) const INSTANCE_TYPE: PropertySpec = PropertySpec {
    key: "instanceType",
    label: "Instance Type",
    input: PropertyInput::Select(&["t3.micro", "t3.small", "t3.medium", "t3.large"]),
    default: "t3.micro",
};

pub(crate) const REGION: PropertySpec = PropertySpec {
    key: "region",
    label: "Region",
    input: PropertyInput::Select(&["us-east-1", "us-west-2", "eu-west-1", "ap-southeast-1"]),
    default: "us-east-1",
};

pub(crate) const STORAGE_GB: PropertySpec = PropertySpec {
    key: "storage",
    label: "Storage (GB)",
    input: PropertyInput::Number,
    default: "20",
};

pub(crate) const ENGINE: PropertySpec = PropertySpec {
    key: "engine",
    label: "Database Engine",
    input: PropertyInput::Select(&["mysql", "postgres", "mariadb", "oracle"]),
    default: "mysql",
};

pub(crate) const INSTANCE_CLASS: PropertySpec = PropertySpec {
    key: "instanceClass",
    label: "Instance Class",
    input: PropertyInput::Select(&["db.t3.micro", "db.t3.small", "db.t3.medium"]),
    default: "db.t3.micro",
};

pub(crate) const MULTI_AZ: PropertySpec = PropertySpec {
    key: "multiAZ",
    label: "Multi-AZ Deployment",
    input: PropertyInput::Boolean,
    default: "false",
};

pub(crate) const RUNTIME: PropertySpec = PropertySpec {
    key: "runtime",
    label: "Runtime",
    input: PropertyInput::Select(&["nodejs14.x", "python3.9"]),
    default: "nodejs14.x",
};

pub(crate) const MEMORY_SIZE: PropertySpec = PropertySpec {
    key: "memorySize",
    label: "Memory Size (MB)",
    input: PropertyInput::Number,
    default: "128",
};

const SERVER_PROPERTIES: &[PropertySpec] = &[INSTANCE_TYPE, REGION, STORAGE_GB];
const DATABASE_PROPERTIES: &[PropertySpec] = &[ENGINE, INSTANCE_CLASS, MULTI_AZ];
const LAMBDA_PROPERTIES: &[PropertySpec] = &[RUNTIME, MEMORY_SIZE];

impl From<String> for ComponentKind {
    fn from(raw: String) -> Self {
        ComponentKind::parse(&raw)
    }
}

impl From<ComponentKind> for String {
    fn from(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
