//! tinydb CLI
//!
//! Command-line interface operating on a device image file.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tinydb::catalog::ColumnMeta;
use tinydb::{ColumnDef, Config, Database, FileDevice, Predicate, Result, TableSession, TinyDbError, Value};
use tracing_subscriber::{fmt, EnvFilter};

/// tinydb CLI
#[derive(Parser, Debug)]
#[command(name = "tinydb")]
#[command(about = "Tiny table store for EEPROM-class devices")]
#[command(version)]
struct Args {
    /// Device image file
    #[arg(short, long, default_value = "./tinydb.eep")]
    image: PathBuf,

    /// Device length in bytes
    #[arg(short, long, default_value = "1024")]
    size: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the image and write an empty catalog
    Init,

    /// Zero every byte of the device
    Clear,

    /// Print the catalog
    Dump,

    /// Create a table
    Create {
        /// Table name
        name: String,

        /// Maximum rows
        capacity: usize,

        /// Columns as name:TYPE (e.g. a:INT b:CHAR5)
        #[arg(required = true)]
        columns: Vec<String>,
    },

    /// Insert one row
    Insert {
        table: String,

        /// Values as column=value
        #[arg(required = true)]
        values: Vec<String>,
    },

    /// Read a column
    Select {
        table: String,
        column: String,

        /// Logical row to read
        #[arg(short, long, default_value = "0")]
        nth: usize,

        /// Read every matching row
        #[arg(short, long, conflicts_with = "nth")]
        all: bool,

        /// Condition such as a>=3
        #[arg(short = 'w', long = "where")]
        condition: Option<String>,
    },

    /// Overwrite one column of a row
    Update {
        table: String,

        /// Assignment as column=value
        assignment: String,

        /// Logical row to update
        #[arg(short, long, default_value = "0")]
        nth: usize,

        /// Condition such as a>=3
        #[arg(short = 'w', long = "where")]
        condition: Option<String>,
    },

    /// Delete rows
    Delete {
        table: String,

        /// Logical row to delete
        #[arg(short, long, default_value = "0")]
        nth: usize,

        /// Delete every matching row
        #[arg(short, long, conflicts_with = "nth")]
        all: bool,

        /// Condition such as a>=3
        #[arg(short = 'w', long = "where")]
        condition: Option<String>,
    },

    /// Count rows
    Count {
        table: String,

        /// Condition such as a>=3
        #[arg(short = 'w', long = "where")]
        condition: Option<String>,
    },
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,tinydb=info"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    tracing::info!("tinydb v{}", tinydb::VERSION);
    tracing::info!("Image: {} ({} bytes)", args.image.display(), args.size);

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = Config::builder()
        .device_len(args.size)
        .image_path(&args.image)
        .build();

    let mut db: Database<FileDevice> = Database::open_image(config)?;

    match args.command {
        Commands::Init => {
            println!(
                "initialized {} ({} bytes free)",
                args.image.display(),
                db.free_bytes()
            );
        }

        Commands::Clear => {
            db.clear_all()?;
            println!("cleared {}", args.image.display());
        }

        Commands::Dump => {
            println!("{}", db.dump()?);
        }

        Commands::Create {
            name,
            capacity,
            columns,
        } => {
            let columns = columns
                .iter()
                .map(|decl| {
                    ColumnDef::parse(decl).ok_or_else(|| {
                        TinyDbError::InvalidSchema(format!("expected name:TYPE, got '{}'", decl))
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let record = db.create_table(&name, capacity, &columns)?;
            println!(
                "created '{}' ({} rows, {} data bytes, {} free)",
                record.name,
                record.capacity,
                record.data_len(),
                db.free_bytes()
            );
        }

        Commands::Insert { table, values } => {
            let mut session = db.open_table(&table)?;
            let mut row = Vec::with_capacity(values.len());
            for assignment in &values {
                row.push(parse_assignment(&session, assignment)?);
            }

            let writer = row
                .into_iter()
                .fold(session.begin_row(), |writer, (column, value)| {
                    writer.set(&column, value)
                });
            writer.commit()?;
            println!("inserted 1 row into '{}'", table);
        }

        Commands::Select {
            table,
            column,
            nth,
            all,
            condition,
        } => {
            let mut session = db.open_table(&table)?;
            apply_condition(&mut session, condition.as_deref())?;

            if all {
                for value in session.select_all(&column)? {
                    println!("{}", value);
                }
            } else {
                println!("{}", session.select(&column, nth)?);
            }
        }

        Commands::Update {
            table,
            assignment,
            nth,
            condition,
        } => {
            let mut session = db.open_table(&table)?;
            apply_condition(&mut session, condition.as_deref())?;

            let (column, value) = parse_assignment(&session, &assignment)?;
            session.update(&column, value, nth)?;
            session.finalize()?;
            println!("updated row {} of '{}'", nth, table);
        }

        Commands::Delete {
            table,
            nth,
            all,
            condition,
        } => {
            let mut session = db.open_table(&table)?;
            apply_condition(&mut session, condition.as_deref())?;

            let deleted = if all {
                session.delete_all()?
            } else {
                session.delete_at(nth)?;
                1
            };
            session.finalize()?;
            println!("deleted {} row(s) from '{}'", deleted, table);
        }

        Commands::Count { table, condition } => {
            let mut session = db.open_table(&table)?;
            apply_condition(&mut session, condition.as_deref())?;
            println!("{}", session.count());
        }
    }

    db.sync()
}

/// Narrow `session` by a `column<op>value` condition
fn apply_condition(session: &mut TableSession<'_, FileDevice>, condition: Option<&str>) -> Result<()> {
    let Some(condition) = condition else {
        return Ok(());
    };

    let (column, predicate, text) = Predicate::split_condition(condition).ok_or_else(|| {
        TinyDbError::Config(format!("expected column<op>value, got '{}'", condition))
    })?;
    let threshold = parse_value(session.name(), session.columns(), column, text)?;
    session.filter(column, predicate, threshold)?;
    Ok(())
}

/// Split `column=value` and parse the value for the column's type
fn parse_assignment(session: &TableSession<'_, FileDevice>, assignment: &str) -> Result<(String, Value)> {
    let (column, text) = assignment.split_once('=').ok_or_else(|| {
        TinyDbError::Config(format!("expected column=value, got '{}'", assignment))
    })?;
    let column = column.trim();
    let value = parse_value(session.name(), session.columns(), column, text.trim())?;
    Ok((column.to_string(), value))
}

fn parse_value(table: &str, columns: &[ColumnMeta], column: &str, text: &str) -> Result<Value> {
    let meta = columns
        .iter()
        .find(|c| c.name == column)
        .ok_or_else(|| TinyDbError::ColumnNotFound {
            table: table.to_string(),
            column: column.to_string(),
        })?;

    Value::parse(meta.column_type, text).ok_or_else(|| TinyDbError::TypeMismatch {
        column: column.to_string(),
        expected: meta.column_type.to_string(),
        found: format!("'{}'", text),
    })
}
