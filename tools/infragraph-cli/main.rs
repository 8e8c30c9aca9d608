use clap::{Parser, Subcommand};
use infragraph::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Generate Terraform, Kubernetes YAML or JSON from infrastructure diagrams
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Generator configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the saved workspace diagram
    #[arg(short, long, global = true, default_value = ".")]
    store: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate code from a diagram file, or from the saved workspace when no file is given
    Generate {
        /// Diagram exchange file (JSON)
        input: Option<PathBuf>,
        /// terraform, yaml or json
        #[arg(short, long, default_value = "terraform")]
        format: Format,
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check that a diagram file can be imported
    Validate { input: PathBuf },
    /// List the available output formats
    Formats,
    /// Add a component to the workspace
    Add {
        /// Component type, e.g. server or database
        kind: String,
        #[arg(long, default_value_t = 0.0)]
        x: f64,
        #[arg(long, default_value_t = 0.0)]
        y: f64,
    },
    /// Set a property on a workspace component
    Set {
        id: String,
        key: String,
        value: String,
    },
    /// Rename a workspace component
    Rename { id: String, name: String },
    /// Remove a workspace component and its connections
    Remove { id: String },
    /// Connect two workspace components
    Connect { source: String, target: String },
    /// Remove every component and forget the saved diagram
    Clear,
    /// Export the workspace diagram as JSON
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace the workspace diagram with an exported file
    Import { input: PathBuf },
    /// Print the workspace contents and the generated preview
    Show {
        #[arg(short, long, default_value = "terraform")]
        format: Format,
    },
}

impl Cli {
    fn init_logging(&self) {
        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}

fn main() {
    let cli = Cli::parse();
    cli.init_logging();

    let config = GeneratorConfig::load(cli.config.as_deref())
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    match cli.command {
        Command::Generate {
            input,
            format,
            output,
        } => run_generate(input, format, output, &cli.store, config),
        Command::Validate { input } => run_validate(&input),
        Command::Formats => {
            let generator = Generator::new(config);
            for name in generator.formats() {
                let label = name
                    .parse::<Format>()
                    .map(|f| f.label())
                    .unwrap_or("custom");
                println!("{:<10} {}", name, label);
            }
        }
        Command::Clear => {
            let mut workspace = open_workspace(&cli.store, config);
            workspace
                .clear()
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            println!("Workspace cleared.");
        }
        Command::Export { output } => {
            let workspace = open_workspace(&cli.store, config);
            let json = workspace
                .export_json()
                .unwrap_or_else(|e| exit_with_error(&e.to_string()));
            write_output(output, &json);
        }
        Command::Import { input } => {
            let text = read_file(&input);
            let mut workspace = open_workspace(&cli.store, config);
            workspace
                .import_json(&text)
                .unwrap_or_else(|e| exit_with_error(&format!("Import failed: {}", e)));
            println!(
                "Imported {} components and {} connections.",
                workspace.nodes().len(),
                workspace.edges().len()
            );
        }
        Command::Show { format } => {
            let mut workspace = open_workspace(&cli.store, config);
            workspace.select_format(format);
            print_workspace(&workspace);
        }
        Command::Add { kind, x, y } => edit(&cli.store, config, |workspace| {
            let kind = ComponentKind::parse(kind.trim());
            if !kind.is_known() {
                log::warn!("'{}' is not a catalog component type", kind);
            }
            let id = workspace.add_component(kind, Position::new(x, y))?;
            println!("Added {}", id);
            Ok(())
        }),
        Command::Set { id, key, value } => edit(&cli.store, config, |workspace| {
            workspace.set_property(&id, &key, PropertyValue::from_input(&value))?;
            println!("Set {}.{} = {}", id, key, value);
            Ok(())
        }),
        Command::Rename { id, name } => edit(&cli.store, config, |workspace| {
            workspace.rename(&id, name)?;
            println!("Renamed {}", id);
            Ok(())
        }),
        Command::Remove { id } => edit(&cli.store, config, |workspace| {
            let node = workspace.remove_component(&id)?;
            println!("Removed {} ({})", node.id, node.display_name());
            Ok(())
        }),
        Command::Connect { source, target } => edit(&cli.store, config, |workspace| {
            let id = workspace.connect(&source, &target, None, None)?;
            println!("Connected {}", id);
            Ok(())
        }),
    }
}

fn run_generate(
    input: Option<PathBuf>,
    format: Format,
    output: Option<PathBuf>,
    store: &Path,
    config: GeneratorConfig,
) {
    let start = Instant::now();
    let diagram = match input {
        Some(path) => import_json(&read_file(&path))
            .unwrap_or_else(|e| exit_with_error(&format!("Import failed: {}", e))),
        None => open_workspace(store, config.clone()).diagram().clone(),
    };

    let generator = Generator::new(config);
    let document = generator.document(&diagram.nodes, format);
    log::info!(
        "Generated {} ({} lines, {} bytes) in {:?}",
        document.file_name(),
        document.line_count(),
        document.byte_size(),
        start.elapsed()
    );
    write_output(output, &document.text);
}

fn run_validate(input: &Path) {
    match import_json(&read_file(input)) {
        Ok(diagram) => {
            let unknown = diagram.nodes.iter().filter(|n| !n.kind.is_known()).count();
            println!(
                "Valid diagram: {} components, {} connections",
                diagram.nodes.len(),
                diagram.edges.len()
            );
            if unknown > 0 {
                println!("  {} component(s) have an unknown type", unknown);
            }
        }
        Err(e) => exit_with_error(&format!("Invalid diagram: {}", e)),
    }
}

/// Opens the workspace, applies one mutation and reports its error, if any.
fn edit(
    dir: &Path,
    config: GeneratorConfig,
    apply: impl FnOnce(&mut Workspace<FileStore>) -> std::result::Result<(), WorkspaceError>,
) {
    let mut workspace = open_workspace(dir, config);
    apply(&mut workspace).unwrap_or_else(|e| exit_with_error(&e.to_string()));
}

fn print_workspace(workspace: &Workspace<FileStore>) {
    println!("--- Components ({}) ---", workspace.nodes().len());
    for node in workspace.nodes() {
        println!(
            "{:<10} {:<14} {:<24} ({}, {})",
            node.id,
            node.kind.as_str(),
            node.display_name(),
            node.position.x,
            node.position.y
        );
        for (key, value) in &node.properties {
            println!("{:>12} {} = {}", "", key, value);
        }
    }

    println!("\n--- Connections ({}) ---", workspace.edges().len());
    for edge in workspace.edges() {
        println!("{}: {} -> {}", edge.id, edge.source, edge.target);
    }

    let document = workspace.document();
    println!(
        "\n--- {} ({} lines, {} bytes) ---",
        document.file_name(),
        document.line_count(),
        document.byte_size()
    );
    println!("{}", document.text);
}

fn open_workspace(dir: &Path, config: GeneratorConfig) -> Workspace<FileStore> {
    Workspace::open(FileStore::in_dir(dir), config)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to open workspace: {}", e)))
}

fn read_file(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read '{}': {}", path.display(), e))
    })
}

fn write_output(output: Option<PathBuf>, text: &str) {
    match output {
        Some(path) => {
            fs::write(&path, text).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write '{}': {}", path.display(), e))
            });
            println!("Wrote {}", path.display());
        }
        None => println!("{}", text),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
