//! Interactive cart shell.
//!
//! Reads one command per line and applies it to the store before reading the
//! next, so every event sees the state left by the previous one. Bad input is
//! reported and the loop keeps going; only I/O failures end it early.

use std::io::{BufRead, Write};

use shopping_cart_core::{CartStore, PersistentSlot, ProductId};
use tracing::{debug, info};

use super::{CommandError, units, write_items};

const HELP: &str = "\
Commands:
  add <id>    add one unit of a product
  dec <id>    remove one unit of a product
  rm <id>     remove a product entirely
  qty <id>    show the quantity of a product
  clear       empty the cart
  open        open the cart panel
  close       close the cart panel
  show        render the cart
  help        show this message
  quit        leave the shell";

/// A parsed shell line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Add(ProductId),
    Decrease(ProductId),
    Remove(ProductId),
    Quantity(ProductId),
    Clear,
    Open,
    Close,
    Show,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parse one line of input. Blank lines yield `None`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` for unknown commands or bad product ids.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "add" | "+" => Self::Add(product_arg("add", words.next())?),
            "dec" | "decrease" | "-" => Self::Decrease(product_arg("dec", words.next())?),
            "rm" | "remove" => Self::Remove(product_arg("rm", words.next())?),
            "qty" => Self::Quantity(product_arg("qty", words.next())?),
            "clear" => Self::Clear,
            "open" => Self::Open,
            "close" => Self::Close,
            "show" | "ls" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn product_arg(command: &'static str, arg: Option<&str>) -> Result<ProductId, CommandError> {
    let arg = arg.ok_or_else(|| CommandError::InvalidArgument {
        command,
        reason: "missing product id".to_string(),
    })?;
    arg.parse().map_err(|e| CommandError::InvalidArgument {
        command,
        reason: format!("{arg:?}: {e}"),
    })
}

/// Run the shell until `quit` or end of input.
///
/// # Errors
///
/// Returns `CommandError` if reading input or writing output fails.
pub fn run<S: PersistentSlot>(
    store: &mut CartStore<S>,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<(), CommandError> {
    info!(key = store.key(), "Cart shell started");

    for line in input.lines() {
        let line = line?;
        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "error: {e}")?;
                continue;
            }
        };

        debug!(?command, "Shell event");
        if command == ShellCommand::Quit {
            break;
        }
        apply(store, command, &mut out)?;
        out.flush()?;
    }

    info!(total = store.total_quantity(), "Cart shell finished");
    Ok(())
}

/// Apply one command and write its response.
///
/// # Errors
///
/// Returns `CommandError` if output cannot be written.
pub fn apply<S: PersistentSlot>(
    store: &mut CartStore<S>,
    command: ShellCommand,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    match command {
        ShellCommand::Add(id) => {
            store.increase(id);
            writeln!(out, "#{id} x {}", store.get_quantity(id))?;
        }
        ShellCommand::Decrease(id) => {
            store.decrease(id);
            writeln!(out, "#{id} x {}", store.get_quantity(id))?;
        }
        ShellCommand::Remove(id) => {
            store.remove(id);
            writeln!(out, "#{id} x {}", store.get_quantity(id))?;
        }
        ShellCommand::Quantity(id) => {
            writeln!(out, "{}", store.get_quantity(id))?;
        }
        ShellCommand::Clear => {
            store.clear();
            writeln!(out, "Cart is empty")?;
        }
        ShellCommand::Open => {
            store.open();
            write_items(store, out)?;
        }
        ShellCommand::Close => {
            store.close();
            writeln!(out, "Cart closed")?;
        }
        ShellCommand::Show => {
            if store.is_open() {
                write_items(store, out)?;
            } else {
                writeln!(out, "Cart closed ({})", units(store.total_quantity()))?;
            }
        }
        ShellCommand::Help => writeln!(out, "{HELP}")?,
        ShellCommand::Quit => {}
    }
    Ok(())
}
