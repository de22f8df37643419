//! Bone attachment mapping command implementations

use anyhow::{Context, Result};
use clap::{ArgGroup, Subcommand, ValueEnum};
use console::style;
use glam::{Quat, Vec3};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use rig_anim::{BoneAttachmentMapping, MappingStore};

use crate::utils::{format_node, format_quat, format_vec3, mapping_table};

#[derive(Subcommand)]
pub enum MappingCommands {
    /// List every mapping in file order
    List,

    /// Show one mapping in detail
    Show {
        /// Position of the mapping in the file
        index: usize,
    },

    /// Add a mapping
    Add {
        /// Model the attachment follows
        root_model: String,

        /// Animation the root model plays
        root_animation: String,

        /// Model being attached
        attached_model: String,

        /// Animation the attached model plays
        attached_animation: String,

        /// Node on the root skeleton to attach to
        #[arg(short, long)]
        node: Option<usize>,

        /// Offset from the node as X,Y,Z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        position: Option<Vec3>,

        /// Rotation offset as a quaternion X,Y,Z,W
        #[arg(long, value_parser = parse_quat, allow_hyphen_values = true)]
        rotation: Option<Quat>,
    },

    /// Remove mappings matching every given filter
    #[command(group(ArgGroup::new("filter").required(true).multiple(true)))]
    Remove {
        /// Position of the mapping in the file
        #[arg(long, group = "filter")]
        index: Option<usize>,

        #[arg(long, group = "filter")]
        root_model: Option<String>,

        #[arg(long, group = "filter")]
        root_animation: Option<String>,

        #[arg(long, group = "filter")]
        attached_model: Option<String>,

        #[arg(long, group = "filter")]
        attached_animation: Option<String>,
    },

    /// Find the root animation an attachment animation is mapped under
    FindRoot {
        root_model: String,
        attached_model: String,
        attached_animation: String,
    },

    /// Check that the file decodes completely
    Validate,

    /// Export mappings in another format
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Pretty-printed JSON array
    Json,
    /// One `root.anim -> attached.anim` line per mapping
    Text,
}

fn parse_floats<const N: usize>(value: &str) -> Result<[f32; N], String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {N} comma-separated numbers, got '{value}'"));
    }

    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("invalid number '{part}': {e}"))?;
    }
    Ok(out)
}

fn parse_vec3(value: &str) -> Result<Vec3, String> {
    parse_floats::<3>(value).map(Vec3::from_array)
}

fn parse_quat(value: &str) -> Result<Quat, String> {
    parse_floats::<4>(value).map(Quat::from_array)
}

pub fn execute(path: &Path, command: MappingCommands) -> Result<()> {
    match command {
        MappingCommands::List => execute_list(path),
        MappingCommands::Show { index } => execute_show(path, index),
        MappingCommands::Add {
            root_model,
            root_animation,
            attached_model,
            attached_animation,
            node,
            position,
            rotation,
        } => {
            let mapping = BoneAttachmentMapping::new(
                root_model,
                root_animation,
                attached_model,
                attached_animation,
                node,
            )
            .with_offset(
                position.unwrap_or(Vec3::ZERO),
                rotation.unwrap_or(Quat::IDENTITY),
            );
            execute_add(path, mapping)
        }
        MappingCommands::Remove {
            index,
            root_model,
            root_animation,
            attached_model,
            attached_animation,
        } => {
            let filter = RemoveFilter {
                index,
                root_model,
                root_animation,
                attached_model,
                attached_animation,
            };
            execute_remove(path, &filter)
        }
        MappingCommands::FindRoot {
            root_model,
            attached_model,
            attached_animation,
        } => execute_find_root(path, &root_model, &attached_model, &attached_animation),
        MappingCommands::Validate => execute_validate(path),
        MappingCommands::Export { format, output } => execute_export(path, format, output),
    }
}

/// Load strictly before a rewrite, so damaged records are never saved away
fn load_for_edit(path: &Path) -> Result<MappingStore> {
    if !path.exists() {
        return Ok(MappingStore::new());
    }

    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    MappingStore::read_from(&mut BufReader::new(file)).with_context(|| {
        format!(
            "Refusing to rewrite damaged mapping file: {} (run `mappings validate`)",
            path.display()
        )
    })
}

fn save(path: &Path, store: &MappingStore) -> Result<()> {
    store
        .save(path)
        .with_context(|| format!("Failed to save mapping file: {}", path.display()))
}

fn execute_list(path: &Path) -> Result<()> {
    let store = MappingStore::load(path);

    if store.is_empty() {
        println!("No mappings in {}", style(path.display()).cyan());
        return Ok(());
    }

    mapping_table(&store).printstd();
    println!(
        "\n{} mappings in {}",
        style(store.len()).green(),
        style(path.display()).cyan()
    );
    Ok(())
}

fn execute_show(path: &Path, index: usize) -> Result<()> {
    let store = MappingStore::load(path);
    let Some(mapping) = store.get(index) else {
        anyhow::bail!(
            "No mapping at index {} ({} mappings in {})",
            index,
            store.len(),
            path.display()
        );
    };

    println!("\n{}", style(mapping.mapping_string()).bold().underlined());
    println!("Root model:         {}", style(&mapping.root_model).cyan());
    println!("Root animation:     {}", style(&mapping.root_animation).yellow());
    println!("Attached model:     {}", style(&mapping.attached_model).cyan());
    println!(
        "Attached animation: {}",
        style(&mapping.attached_animation).yellow()
    );
    println!("Node:               {}", format_node(mapping.attach_to_node));
    println!("Position:           {}", format_vec3(mapping.position));
    println!("Rotation:           {}", format_quat(mapping.rotation));
    Ok(())
}

fn execute_add(path: &Path, mapping: BoneAttachmentMapping) -> Result<()> {
    let mut store = load_for_edit(path)?;
    let description = mapping.mapping_string();

    if let Some(index) = store.iter().position(|m| m.is_same_mapping(&mapping)) {
        let existing = store.get(index).map(|m| m.mapping_string()).unwrap_or_default();
        anyhow::bail!("'{description}' conflicts with mapping {index} ({existing})");
    }
    store.add(mapping);

    save(path, &store)?;
    println!("✓ Added {}", style(description).green());
    Ok(())
}

struct RemoveFilter {
    index: Option<usize>,
    root_model: Option<String>,
    root_animation: Option<String>,
    attached_model: Option<String>,
    attached_animation: Option<String>,
}

impl RemoveFilter {
    fn matches(&self, position: usize, mapping: &BoneAttachmentMapping) -> bool {
        fn field(filter: Option<&String>, value: &str) -> bool {
            filter.is_none_or(|f| f == value)
        }

        self.index.is_none_or(|i| i == position)
            && field(self.root_model.as_ref(), &mapping.root_model)
            && field(self.root_animation.as_ref(), &mapping.root_animation)
            && field(self.attached_model.as_ref(), &mapping.attached_model)
            && field(self.attached_animation.as_ref(), &mapping.attached_animation)
    }
}

fn execute_remove(path: &Path, filter: &RemoveFilter) -> Result<()> {
    let mut store = load_for_edit(path)?;

    let mut position = 0;
    let removed = store.remove_if(|mapping| {
        let matched = filter.matches(position, mapping);
        position += 1;
        matched
    });

    if removed == 0 {
        println!("No matching mappings in {}", style(path.display()).cyan());
        return Ok(());
    }

    save(path, &store)?;
    println!(
        "✓ Removed {} mappings, {} left",
        style(removed).green(),
        store.len()
    );
    Ok(())
}

fn execute_find_root(
    path: &Path,
    root_model: &str,
    attached_model: &str,
    attached_animation: &str,
) -> Result<()> {
    let store = MappingStore::load(path);
    match store.find_root_animation(root_model, attached_model, attached_animation) {
        Some(animation) => {
            println!("{animation}");
            Ok(())
        }
        None => anyhow::bail!(
            "No mapping attaches {attached_model}.{attached_animation} to {root_model}"
        ),
    }
}

fn execute_validate(path: &Path) -> Result<()> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let store = MappingStore::read_from(&mut reader)
        .with_context(|| format!("Failed to decode mapping file: {}", path.display()))?;

    println!(
        "✓ Mapping file '{}' is valid ({} mappings)",
        style(path.display()).cyan(),
        style(store.len()).green()
    );
    Ok(())
}

fn execute_export(path: &Path, format: ExportFormat, output: Option<PathBuf>) -> Result<()> {
    let store = MappingStore::load(path);

    let rendered = match format {
        ExportFormat::Json => {
            let mappings: Vec<&BoneAttachmentMapping> = store.iter().collect();
            let mut json =
                serde_json::to_string_pretty(&mappings).context("Failed to serialize mappings")?;
            json.push('\n');
            json
        }
        ExportFormat::Text => store
            .iter()
            .map(|m| format!("{}\n", m.mapping_string()))
            .collect(),
    };

    match output {
        Some(output) => {
            fs::write(&output, rendered)
                .with_context(|| format!("Failed to write output file: {}", output.display()))?;
            log::info!("Exported {} mappings to {}", store.len(), output.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vec3() {
        assert_eq!(parse_vec3("1, -2.5,3"), Ok(Vec3::new(1.0, -2.5, 3.0)));
        assert!(parse_vec3("1,2").is_err());
        assert!(parse_vec3("1,x,3").is_err());
    }

    #[test]
    fn test_parse_quat() {
        assert_eq!(parse_quat("0,0,0,1"), Ok(Quat::IDENTITY));
        assert!(parse_quat("0,0,1").is_err());
    }

    #[test]
    fn test_remove_filter_requires_every_field() {
        let mapping = BoneAttachmentMapping::new("hero", "walk", "sword", "default", Some(3));
        let filter = RemoveFilter {
            index: None,
            root_model: Some("hero".to_string()),
            root_animation: None,
            attached_model: Some("shield".to_string()),
            attached_animation: None,
        };
        assert!(!filter.matches(0, &mapping));

        let filter = RemoveFilter {
            attached_model: Some("sword".to_string()),
            ..filter
        };
        assert!(filter.matches(0, &mapping));
        assert!(
            !RemoveFilter {
                index: Some(1),
                ..filter
            }
            .matches(0, &mapping)
        );
    }
}
