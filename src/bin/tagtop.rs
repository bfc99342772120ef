//! tagtop: count hashtags in a file and print the top 10.
//!
//! Usage: `tagtop <file> [--show-order]`. With `--show-order` the tool
//! also dumps the insertion-order list forward and backward, which is
//! handy when eyeballing the table's secondary ordering.

use std::env;
use std::fs::File;
use std::io::BufReader;

use anyhow::{bail, Context, Result};
use tag_tally::{Leaderboard, TagScanner, TagTable};

const TOP: usize = 10;

fn main() -> Result<()> {
    let mut args = env::args().skip(1);
    let path = match args.next() {
        Some(p) => p,
        None => bail!("usage: tagtop <file> [--show-order]"),
    };
    let mut show_order = false;
    for flag in args {
        match flag.as_str() {
            "--show-order" => show_order = true,
            other => bail!("unknown argument: {other}"),
        }
    }

    let file = File::open(&path).with_context(|| format!("cannot open {path}"))?;
    let (table, board) = tally(BufReader::new(file))?;

    for (tag, count) in board.iter() {
        println!("#{tag}: {count}");
    }

    if show_order {
        println!("{}", order_line(table.iter(), "head", "tail"));
        println!("{}", order_line(table.iter().rev(), "tail", "head"));
    }
    Ok(())
}

fn tally<R: std::io::Read>(reader: R) -> Result<(TagTable, Leaderboard)> {
    let mut table = TagTable::new();
    let mut board = Leaderboard::new(TOP);
    for tag in TagScanner::new(reader) {
        let tag = tag.context("read error while scanning tags")?;
        let count = table.put(&tag);
        board.record(&tag, count);
    }
    Ok((table, board))
}

// Diagnostic rendering of one traversal direction, e.g.
// `head-> one <=> two <=> three <-tail`.
fn order_line<'a, I>(entries: I, from: &str, to: &str) -> String
where
    I: Iterator<Item = (&'a str, u64)>,
{
    let tags: Vec<&str> = entries.map(|(tag, _)| tag).collect();
    if tags.is_empty() {
        return format!("{from}-> (empty) <-{to}");
    }
    format!("{from}-> {} <-{to}", tags.join(" <=> "))
}
