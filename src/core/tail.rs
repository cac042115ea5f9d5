// ChatScribe - core/tail.rs
//
// Tail locate: find the byte offset of the last N lines of a transcript by
// scanning backward from end-of-file in bounded windows, without reading
// the whole file. Core layer: operates on Read + Seek handles only.

use crate::core::model::TailStart;
use std::io::{self, Read, Seek, SeekFrom};

/// Locate the byte offset from which a forward read yields the last
/// `lines` lines of the transcript.
///
/// The reader's position is reset internally; callers seek to the returned
/// offset themselves. `window_bytes` caps how much of the file is held in
/// memory at once -- each loop iteration reads one window from the tail
/// backward and counts newlines right-to-left. The offset of the first
/// requested line is the byte after the (N+1)-th newline from the end.
///
/// Returns `TailStart::Empty` for a zero-length file or `lines == 0`, and
/// `TailStart::Offset(0)` when the file holds `lines` lines or fewer.
///
/// A final line without a trailing newline counts as one line, so
/// `"a\nb"` with `lines == 1` resolves to the offset of `"b"`.
pub fn locate_tail<R: Read + Seek>(
    reader: &mut R,
    lines: u32,
    window_bytes: usize,
) -> io::Result<TailStart> {
    let len = reader.seek(SeekFrom::End(0))?;
    if len == 0 || lines == 0 {
        return Ok(TailStart::Empty);
    }

    let window = window_bytes.max(1);
    let mut buf = vec![0u8; window];
    let wanted = u64::from(lines);
    let mut pos = len;
    let mut nlines: u64 = 0;
    let mut at_eof = true;

    // Scan until the (N+1)-th newline from the end is found or the file
    // start is reached. `nlines == wanted` alone is not enough to stop: the
    // newline *before* the Nth-last line may still be in an earlier window.
    while pos > 0 && nlines <= wanted {
        let size = pos.min(window as u64) as usize;
        pos -= size as u64;
        reader.seek(SeekFrom::Start(pos))?;

        let chunk = &mut buf[..size];
        // A short read here is an I/O failure, not a smaller tail.
        reader.read_exact(chunk)?;

        if at_eof {
            // The partial final line (no trailing newline) counts as a line.
            if chunk[size - 1] != b'\n' {
                nlines += 1;
            }
            at_eof = false;
        }

        for i in (0..size).rev() {
            if chunk[i] == b'\n' {
                nlines += 1;
                if nlines > wanted {
                    return Ok(TailStart::Offset(pos + i as u64 + 1));
                }
            }
        }
    }

    // Fewer lines in the file than requested: recall starts at the top.
    Ok(TailStart::Offset(0))
}
