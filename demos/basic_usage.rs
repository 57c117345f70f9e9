//! Basic usage: log, drain and render entries

use diagnostics_logger::prelude::*;
use diagnostics_logger::{context, info, warning};

fn main() -> Result<()> {
    let diagnostics = Diagnostics::new();
    let logger = diagnostics.logger();

    info!(logger, "Service {name} starting", name = "inventory");
    warning!(logger, "Cache {cache} is cold", cache = "products");
    logger.notice_with_context(
        "Loaded {count} rows in {table}",
        context! { count = 1_250, table = "items" },
    );
    logger.log("critical", "Replica {id} unreachable", context! { id = 3 })?;

    println!("--- text ---");
    for line in logger.print_entries(false, Some(TimestampFormat::Human)) {
        println!("{}", line);
    }

    println!("--- json ---");
    println!(
        "{}",
        diagnostics.dump(OutputFormat::Json, &FormatterConfig::new())?
    );

    // Anything logged after the dump goes to stderr when the session ends.
    let session = diagnostics.session_to_stderr();
    session.logger().debug("flushed to stderr on exit");
    Ok(())
}
