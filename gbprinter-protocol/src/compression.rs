//! Run-length decoding of compressed DATA payloads
//!
//! The console compresses tile data with a simple RLE scheme. Each run
//! starts with a control byte:
//! - bit 7 set: the next byte repeats `(control & 0x7F) + 2` times
//! - bit 7 clear: the next `control + 1` bytes are copied as-is

/// Errors that can occur while decompressing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecompressError {
    /// A control byte promises more bytes than the input holds
    Truncated,
    /// The expanded data does not fit the output buffer
    OutputOverflow,
}

const RUN_FLAG: u8 = 0x80;

/// Expand `src` into `dst`
///
/// Returns the number of bytes written to `dst`.
pub fn decompress(src: &[u8], dst: &mut [u8]) -> Result<usize, DecompressError> {
    let mut read = 0;
    let mut written = 0;

    while read < src.len() {
        let control = src[read];
        read += 1;

        if control & RUN_FLAG != 0 {
            let len = (control & !RUN_FLAG) as usize + 2;
            let value = *src.get(read).ok_or(DecompressError::Truncated)?;
            read += 1;

            let out = dst
                .get_mut(written..written + len)
                .ok_or(DecompressError::OutputOverflow)?;
            out.fill(value);
            written += len;
        } else {
            let len = control as usize + 1;
            let literal = src
                .get(read..read + len)
                .ok_or(DecompressError::Truncated)?;
            read += len;

            let out = dst
                .get_mut(written..written + len)
                .ok_or(DecompressError::OutputOverflow)?;
            out.copy_from_slice(literal);
            written += len;
        }
    }

    Ok(written)
}
