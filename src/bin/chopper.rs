use chopper::{ensure_directory, partition, persist_all, ChopperError, PartitionOptions, Table};
use std::io::{self, BufRead};
use std::time::Instant;

fn prompt(input: &mut impl BufRead, text: &str) -> io::Result<String> {
    Ok(prompt_raw(input, text)?.trim().to_string())
}

/// Like `prompt`, but only the line ending is stripped so answers such as
/// a lone space or a literal tab survive.
fn prompt_raw(input: &mut impl BufRead, text: &str) -> io::Result<String> {
    println!("{}", text);
    let mut line = String::new();
    input.read_line(&mut line)?;
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

/// Custom separators must be a single byte (the CSV reader's delimiter).
fn parse_delimiter(custom: &str) -> Result<u8, ChopperError> {
    match custom.as_bytes() {
        [b] => Ok(*b),
        _ => Err(ChopperError::Config(format!(
            "separator must be a single character, got '{}'",
            custom
        ))),
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!(
        "\nWelcome to CHOPPER - Creating Hundreds Of Puny Pieces Employing REPL\n\
         Right now, CHOPPER only supports CSV/Delimited Text files :-(\n"
    );

    let input_file = prompt(&mut input, "Input file path:")?;

    let sep_choice = prompt(
        &mut input,
        "\nWhat is your file's separator?\n\
         (1) Comma (',') - DEFAULT\n\
         (2) Tab ('\\t')\n\
         (3) Other",
    )?;

    let delimiter = match sep_choice.as_str() {
        "2" => b'\t',
        "3" => {
            let custom = prompt_raw(&mut input, "Type out your custom delimiter, please!")?;
            parse_delimiter(&custom)?
        }
        _ => b',',
    };

    let mut table = Table::load(&input_file, delimiter)?;

    println!(
        "\nCool file! Much data. Loaded {} rows, {} columns.\n\n\
         CHOPPER can:\n\
         \x20   1. Split this into separate files by unique values in specified columns\n\
         \x20      (ex. if your file includes 'State' and 'City' columns, you can get one\n\
         \x20      file per city per state).\n\
         \x20   2. Set a max file size by row count (ex. split the whole file into files\n\
         \x20      of 250000 rows).\n\
         \x20   3. Do both of the above (ex. one file per 1000 rows per city per state).\n\n\
         Pretty cool, I know!",
        table.len(),
        table.columns().len()
    );

    let cols_choice = prompt(
        &mut input,
        "\nWould you like to split by values in one or more columns?\n\
         (1) No - DEFAULT\n\
         (2) Yes",
    )?;

    let mut columns = None;
    if cols_choice == "2" {
        table.normalize_columns();
        println!("\nHere is a breakdown of unique values per column in your file:");
        for (name, count) in table.unique_counts() {
            println!("{:<30} {}", name, count);
        }
        columns = Some(prompt(
            &mut input,
            "\nProvide a comma-separated list of column headers to split by.",
        )?);
    }

    let size_choice = prompt(
        &mut input,
        "\nWould you like to limit file size by number of rows?\n\
         (1) No - DEFAULT\n\
         (2) Yes",
    )?;

    // group_size of 0 bypasses size splitting
    let mut group_size = 0;
    if size_choice == "2" {
        let raw = prompt(&mut input, "\nMax rows per file?")?;
        group_size = raw.parse::<usize>().ok().filter(|&n| n > 0).ok_or_else(|| {
            ChopperError::Config(format!("max rows per file must be a positive integer, got '{}'", raw))
        })?;
    }

    println!("Splitting file. Please wait...");

    let start = Instant::now();
    let options = PartitionOptions { columns, group_size };
    let groups = partition(&table, &options)?;

    println!("\nCreated {} file groups.", groups.len());

    let prefix = prompt(
        &mut input,
        "\nFiles will be named like:\n\
         '{prefix_}{unique_column_value}{_file_number_if_split_by_size}.csv'.\n\n\
         Example: 'CoolPeopleWhoLiveIn_Somerville_MA_1.csv'.\n\n\
         What would you like to use as a filename prefix?",
    )?;

    let destination = prompt(
        &mut input,
        "\nWhere would you like to output these files?\n\
         Will create a new directory if the specified path does not exist",
    )?;

    ensure_directory(&destination)?;
    let written = persist_all(&groups, &destination, &prefix)?;

    println!(
        "\nAll done! Wrote {} files in {:.2}s.",
        written,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
