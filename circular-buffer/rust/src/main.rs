use std::io::{self, BufRead, BufWriter, Write};

use anyhow::{Context, Result};
use circular_buffer::RingBuffer;
use tracing::{debug, info};

mod config;
mod telemetry;

/// Prints the last `CAPACITY` lines read from stdin
fn main() -> Result<()> {
    let config = config::get()?;
    telemetry::init(config.get_log_level())?;
    info!(%config, "initialized config");

    let rb = RingBuffer::<String>::new(config.get_capacity())?;

    let mut total = 0usize;
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read line from stdin")?;
        rb.put(line);
        total += 1;
    }

    let retained = rb.drain();
    let discarded = total - retained.len();
    debug!(?rb, "drained ring buffer");
    info!(total, retained = retained.len(), discarded, "finished reading stdin");

    let mut writer = BufWriter::new(io::stdout().lock());
    for line in &retained {
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;

    Ok(())
}
