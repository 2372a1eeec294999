use reqwest::header::HeaderMap;

/// Length of `": "` plus the trailing CRLF on each header line.
const HEADER_LINE_OVERHEAD: u64 = 4;
/// CRLF closing the header block.
const HEADER_BLOCK_TERMINATOR: u64 = 2;

/// Estimates the on-wire size of a response header block.
///
/// Each distinct name is counted once with its separator, plus the byte
/// length of all of its values; the blank line ending the block is included.
#[must_use]
pub fn estimate_header_size(headers: &HeaderMap) -> u64 {
    let mut total = HEADER_BLOCK_TERMINATOR;
    for name in headers.keys() {
        total = total
            .saturating_add(len_u64(name.as_str().len()))
            .saturating_add(HEADER_LINE_OVERHEAD);
        for value in headers.get_all(name) {
            total = total.saturating_add(len_u64(value.as_bytes().len()));
        }
    }
    total
}

fn len_u64(len: usize) -> u64 {
    u64::try_from(len).unwrap_or(u64::MAX)
}
