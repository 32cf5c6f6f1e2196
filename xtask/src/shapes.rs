//! Tree shape report
//!
//! This module provides the `shapes` subcommand, which inserts the same key
//! sequence into a `BinarySearchTree`, an `AvlTree`, and a `BTree` and
//! prints how tall each one ends up.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use ordkit::tree::{AvlTree, BTree, BinarySearchTree};
use serde::Serialize;

/// Arguments for the shapes subcommand
#[derive(Args, Debug)]
pub struct ShapesArgs {
    /// Order in which keys are inserted
    #[arg(long, short = 'o', value_enum, default_value_t = KeyOrder::Ascending)]
    pub order: KeyOrder,

    /// Number of keys to insert
    #[arg(long, short = 'n', default_value_t = 1000)]
    pub count: u32,

    /// Maximum keys per B-tree node
    #[arg(long, short = 't', default_value_t = 2)]
    pub split_threshold: usize,

    /// Skip the unbalanced tree
    #[arg(long)]
    pub skip_unbalanced: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Key insertion order
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOrder {
    /// `0, 1, 2, ...`
    Ascending,
    /// `n-1, n-2, ...`
    Descending,
    /// `0, n-1, 1, n-2, ...`
    Zigzag,
}

impl KeyOrder {
    fn keys(self, count: u32) -> Vec<u32> {
        match self {
            Self::Ascending => (0..count).collect(),
            Self::Descending => (0..count).rev().collect(),
            Self::Zigzag => {
                let mut low = 0;
                let mut high = count;
                let mut keys = Vec::with_capacity(count as usize);
                while low < high {
                    keys.push(low);
                    low += 1;
                    if low < high {
                        high -= 1;
                        keys.push(high);
                    }
                }
                keys
            }
        }
    }
}

/// Output format
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Shape of one tree after all inserts
#[derive(Debug, Serialize)]
struct TreeShape {
    structure: &'static str,
    size: usize,
    /// Height as the structure reports it
    height: usize,
    /// Number of node levels from root to leaves
    levels: usize,
    node_count: usize,
}

/// Full report printed by the subcommand
#[derive(Debug, Serialize)]
struct ShapeReport {
    order: KeyOrder,
    count: u32,
    split_threshold: usize,
    trees: Vec<TreeShape>,
}

/// Run the shapes subcommand
pub fn run(args: ShapesArgs) -> Result<()> {
    tracing::info!(order = ?args.order, count = args.count, "building trees");
    let report = build_report(&args)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text(&report),
    }
    Ok(())
}

fn build_report(args: &ShapesArgs) -> Result<ShapeReport> {
    let keys = args.order.keys(args.count);
    let mut trees = Vec::with_capacity(3);

    if !args.skip_unbalanced {
        let tree: BinarySearchTree<u32> = keys.iter().copied().collect();
        trees.push(TreeShape {
            structure: "BinarySearchTree",
            size: tree.len(),
            height: tree.height(),
            levels: tree.height(),
            node_count: tree.len(),
        });
    }

    let avl: AvlTree<u32> = keys.iter().copied().collect();
    avl.validate().context("AVL tree failed validation")?;
    trees.push(TreeShape {
        structure: "AvlTree",
        size: avl.len(),
        height: avl.height(),
        levels: avl.height(),
        node_count: avl.len(),
    });

    let mut btree = BTree::new(args.split_threshold)
        .with_context(|| format!("invalid --split-threshold {}", args.split_threshold))?;
    btree.extend(keys.iter().map(|&key| (key, ())));
    btree.validate().context("B-tree failed validation")?;
    trees.push(TreeShape {
        structure: "BTree",
        size: btree.len(),
        height: btree.height(),
        levels: btree.height() + 1,
        node_count: btree.node_count(),
    });

    Ok(ShapeReport {
        order: args.order,
        count: args.count,
        split_threshold: args.split_threshold,
        trees,
    })
}

fn print_text(report: &ShapeReport) {
    println!(
        "{} keys, {:?} order, B-tree split threshold {}",
        report.count, report.order, report.split_threshold
    );
    println!(
        "{:<18} {:>8} {:>8} {:>8} {:>10}",
        "structure", "size", "height", "levels", "nodes"
    );
    for tree in &report.trees {
        println!(
            "{:<18} {:>8} {:>8} {:>8} {:>10}",
            tree.structure, tree.size, tree.height, tree.levels, tree.node_count
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zigzag_alternates_ends() {
        assert_eq!(KeyOrder::Zigzag.keys(5), vec![0, 4, 1, 3, 2]);
        assert_eq!(KeyOrder::Zigzag.keys(4), vec![0, 3, 1, 2]);
        assert!(KeyOrder::Zigzag.keys(0).is_empty());
    }

    #[test]
    fn report_counts_btree_levels() {
        let args = ShapesArgs {
            order: KeyOrder::Ascending,
            count: 1000,
            split_threshold: 2,
            skip_unbalanced: false,
            format: OutputFormat::Json,
        };
        let report = build_report(&args).unwrap();
        let btree = report.trees.iter().find(|tree| tree.structure == "BTree").unwrap();
        assert_eq!(btree.size, 1000);
        assert_eq!(btree.levels, btree.height + 1);
    }

    #[test]
    fn report_builds_degenerate_tree_in_place() {
        let args = ShapesArgs {
            order: KeyOrder::Descending,
            count: 20_000,
            split_threshold: 4,
            skip_unbalanced: false,
            format: OutputFormat::Text,
        };
        let report = build_report(&args).unwrap();
        let unbalanced = report
            .trees
            .iter()
            .find(|tree| tree.structure == "BinarySearchTree")
            .unwrap();
        assert_eq!(unbalanced.height, 20_000);
    }
}
