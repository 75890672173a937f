use std::fmt::Write as _;
use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use ordered_bst::ordered::Tree;
use tracing_subscriber::EnvFilter;

/// What to print for the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Order {
    /// Values in ascending order.
    Inorder,
    /// Values in pre-order, showing the shape of the tree.
    Preorder,
    /// The bracketed form, e.g. `[ 5 10 15 ]`.
    Display,
}

/// Inserts values into an unbalanced binary search tree, in the order given, and prints it.
#[derive(Debug, Parser)]
#[command(name = "bst", version, allow_negative_numbers = true)]
struct Config {
    /// Values to insert. Read from stdin when none are given.
    values: Vec<i64>,

    /// How to print the tree.
    #[arg(long, value_enum, env = "BST_ORDER", default_value_t = Order::Display)]
    order: Order,

    /// Also print the smallest value greater than this one.
    #[arg(long, allow_negative_numbers = true)]
    above: Option<i64>,

    /// Also print the size and height of the tree and whether it is sorted.
    #[arg(long)]
    stats: bool,

    /// Tracing filter, e.g. `debug` or `ordered_bst=trace`.
    #[arg(long, env = "BST_LOG", default_value = "warn")]
    log: String,
}

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(&config.log)?;

    let values = if config.values.is_empty() {
        read_values(io::stdin())?
    } else {
        config.values.clone()
    };
    tracing::debug!(count = values.len(), "inserting values");

    let tree: Tree<i64> = values.into_iter().collect();
    tracing::info!(len = tree.len(), height = tree.height(), "built tree");

    println!("{}", render(&tree, config.order)?);

    if let Some(above) = config.above {
        match tree.min_greater_than(&above).get() {
            Some(value) => println!("above {above}: {value}"),
            None => println!("above {above}: none"),
        }
    }

    if config.stats {
        println!("len: {}", tree.len());
        println!("height: {}", tree.height());
        println!("sorted: {}", tree.check_sorting_invariant());
    }

    Ok(())
}

fn init_tracing(filter: &str) -> Result<()> {
    let filter = EnvFilter::try_new(filter)
        .with_context(|| format!("invalid log filter `{filter}`"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn read_values(mut input: impl Read) -> Result<Vec<i64>> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .context("failed to read values from stdin")?;

    text
        .split_whitespace()
        .map(|token| {
            token
                .parse()
                .with_context(|| format!("`{token}` is not an integer"))
        })
        .collect()
}

fn render(tree: &Tree<i64>, order: Order) -> Result<String> {
    let mut out = String::new();
    match order {
        Order::Inorder => tree.traverse_inorder(&mut out)?,
        Order::Preorder => tree.traverse_preorder(&mut out)?,
        Order::Display => write!(out, "{tree}")?,
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_whitespace_separated_values() {
        let values = read_values("50 30\n70\t-20 ".as_bytes()).unwrap();
        assert_eq!(values, vec![50, 30, 70, -20]);
    }

    #[test]
    fn rejects_non_integers() {
        let err = read_values("1 x 3".as_bytes()).unwrap_err();
        assert_eq!(err.to_string(), "`x` is not an integer");
    }

    #[test]
    fn renders_each_order() {
        let tree: Tree<i64> = [50, 30, 70, 20, 40, 60, 80].into_iter().collect();

        assert_eq!(
            render(&tree, Order::Inorder).unwrap(),
            "20 30 40 50 60 70 80 "
        );
        assert_eq!(
            render(&tree, Order::Preorder).unwrap(),
            "50 30 20 40 70 60 80 "
        );
        assert_eq!(
            render(&tree, Order::Display).unwrap(),
            "[ 20 30 40 50 60 70 80 ]"
        );
    }

    #[test]
    fn parses_flags_and_negative_values() {
        let config = Config::try_parse_from([
            "bst", "--order", "preorder", "--above", "-5", "--stats", "3", "-7", "1",
        ])
        .unwrap();

        assert_eq!(config.values, vec![3, -7, 1]);
        assert_eq!(config.order, Order::Preorder);
        assert_eq!(config.above, Some(-5));
        assert!(config.stats);
    }
}
