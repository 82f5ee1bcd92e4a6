//! Interactive menu over a loaded family tree.
//!
//! Reads selections from any `BufRead` and writes to any `Write`, so the
//! loop runs against stdin/stdout in the binary and against buffers in tests.

use std::io::{self, BufRead, Write};

use tracing::{debug, instrument};

use crate::application::{ApplicationResult, FamilyTree};

const MENU: &str = "\
Please select from the following options:
1. Print the list of family members
2. Find the grandparent(s) of a specific family member
3. Print the names of family members with a specified number of siblings
4. Print the names of family members with a specified number of children
5. Print the name(s) of the family member(s) with the most grandchildren
6. Exit program
";

const LAST_OPTION: u32 = 6;

/// Run the menu until the user exits or input ends.
#[instrument(level = "debug", skip_all)]
pub fn run_menu<R: BufRead, W: Write>(
    tree: &FamilyTree,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    loop {
        writeln!(out)?;
        write!(out, "{MENU}\nSelection: ")?;
        out.flush()?;

        let Some(selection) = read_selection(input, out)? else {
            return Ok(());
        };
        debug!("menu selection: {}", selection);
        writeln!(out)?;

        let keep_going = match selection {
            1 => {
                print_members(tree, out)?;
                true
            }
            2 => print_grandparents(tree, input, out)?,
            3 => print_with_sibling_count(tree, input, out)?,
            4 => print_with_child_count(tree, input, out)?,
            5 => {
                print_most_grandchildren(tree, out)?;
                true
            }
            _ => false,
        };
        if !keep_going {
            return Ok(());
        }
    }
}

/// Next trimmed line, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn read_selection<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<u32>> {
    while let Some(line) = read_line(input)? {
        match line.parse::<u32>() {
            Ok(n) if (1..=LAST_OPTION).contains(&n) => return Ok(Some(n)),
            _ => {
                write!(
                    out,
                    "You did not input a valid value.  Please input a selection between 1-{LAST_OPTION}: "
                )?;
                out.flush()?;
            }
        }
    }
    Ok(None)
}

fn read_count<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    what: &str,
) -> io::Result<Option<usize>> {
    write!(out, "Please type the {what} count: ")?;
    out.flush()?;
    while let Some(line) = read_line(input)? {
        match line.parse::<usize>() {
            Ok(n) => return Ok(Some(n)),
            Err(_) => {
                write!(
                    out,
                    "You did not input a valid value.  Please input a non-negative number: "
                )?;
                out.flush()?;
            }
        }
    }
    Ok(None)
}

fn read_name<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<Option<String>> {
    write!(out, "Please type the name of the family member: ")?;
    out.flush()?;
    while let Some(line) = read_line(input)? {
        if !line.is_empty() {
            return Ok(Some(line));
        }
        write!(
            out,
            "You did not input a name.  Please input the name of a family member: "
        )?;
        out.flush()?;
    }
    Ok(None)
}

fn write_names<W: Write>(out: &mut W, names: &[String]) -> io::Result<()> {
    for name in names {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

fn print_members<W: Write>(tree: &FamilyTree, out: &mut W) -> io::Result<()> {
    match tree.family_members_name_list() {
        Ok(names) => {
            writeln!(out, "The list of family members are:")?;
            for (i, name) in names.iter().enumerate() {
                writeln!(out, "{}.\t{}", i + 1, name)?;
            }
        }
        Err(e) => writeln!(
            out,
            "Unable to retrieve the list of family member names: {e}"
        )?,
    }
    Ok(())
}

// Returns false when input ended while prompting.
fn print_grandparents<R: BufRead, W: Write>(
    tree: &FamilyTree,
    input: &mut R,
    out: &mut W,
) -> io::Result<bool> {
    let Some(name) = read_name(input, out)? else {
        return Ok(false);
    };
    match tree.grandparent_name_list(&name) {
        Ok(names) if names.is_empty() => {
            writeln!(
                out,
                "Family member {name} does not have any grandparents in the family tree"
            )?;
        }
        Ok(names) => {
            writeln!(
                out,
                "The grandparent(s) for {name} in the family tree is/are:"
            )?;
            write_names(out, &names)?;
        }
        Err(e) => writeln!(out, "Unable to retrieve grandparent info for {name}: {e}")?,
    }
    Ok(true)
}

fn print_with_sibling_count<R: BufRead, W: Write>(
    tree: &FamilyTree,
    input: &mut R,
    out: &mut W,
) -> io::Result<bool> {
    let Some(count) = read_count(input, out, "sibling")? else {
        return Ok(false);
    };
    writeln!(out)?;
    let names = tree.members_with_sibling_count(count);
    print_count_result(out, names, count, "siblings")?;
    Ok(true)
}

fn print_with_child_count<R: BufRead, W: Write>(
    tree: &FamilyTree,
    input: &mut R,
    out: &mut W,
) -> io::Result<bool> {
    let Some(count) = read_count(input, out, "child")? else {
        return Ok(false);
    };
    writeln!(out)?;
    let names = tree.members_with_child_count(count);
    print_count_result(out, names, count, "children")?;
    Ok(true)
}

fn print_count_result<W: Write>(
    out: &mut W,
    result: ApplicationResult<Vec<String>>,
    count: usize,
    noun: &str,
) -> io::Result<()> {
    match result {
        Ok(names) if names.is_empty() => {
            writeln!(out, "There are no family members that have {count} {noun}")
        }
        Ok(names) => {
            writeln!(
                out,
                "The family member(s) with {count} {noun} in the family tree is/are:"
            )?;
            write_names(out, &names)
        }
        Err(e) => writeln!(out, "Unable to retrieve {noun} count info: {e}"),
    }
}

fn print_most_grandchildren<W: Write>(tree: &FamilyTree, out: &mut W) -> io::Result<()> {
    match tree.members_with_most_grandchildren() {
        Ok(names) if names.is_empty() => writeln!(out, "No family member has any grandchildren"),
        Ok(names) => {
            writeln!(
                out,
                "The family member(s) with the most grandchildren is/are:"
            )?;
            write_names(out, &names)
        }
        Err(e) => writeln!(
            out,
            "Unable to determine what family member has the most grandchildren: {e}"
        ),
    }
}
