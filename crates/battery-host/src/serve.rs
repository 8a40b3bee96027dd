//! Line-oriented transport for the method channel
//!
//! Each input line is one encoded method call. Each call produces exactly
//! one output line: the encoded reply, which is empty for a not-implemented
//! method.

use battery_channel::{MethodChannel, MethodResponse};
use std::io::{self, BufRead, Write};

/// Error code for lines that are not valid method calls
pub const MALFORMED: &str = "MALFORMED";

/// Counters reported when the input ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    pub handled: usize,
    pub malformed: usize,
}

/// Serve calls from `reader` until EOF
pub fn serve<R: BufRead, W: Write>(
    channel: &MethodChannel,
    mut reader: R,
    mut writer: W,
) -> io::Result<ServeStats> {
    let mut stats = ServeStats::default();
    let mut line = Vec::new();

    // Raw bytes: a line that is not UTF-8 is malformed, not fatal
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }

        let message = line.trim_ascii();
        if message.is_empty() {
            continue;
        }

        let reply = match channel.handle_message(message) {
            Ok(reply) => {
                stats.handled += 1;
                reply
            }
            Err(e) => {
                tracing::warn!("Malformed call on {}: {}", channel.name(), e);
                stats.malformed += 1;
                channel
                    .codec()
                    .encode_response(&MethodResponse::error(MALFORMED, e.to_string()))
                    .map_err(io::Error::other)?
            }
        };

        writer.write_all(&reply)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    Ok(stats)
}
