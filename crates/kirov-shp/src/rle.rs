//! Run-length decoding of compressed SHP frames.
//!
//! The stream is a sequence of opcodes, each introduced by a control byte:
//!
//! | Control byte | Run                | Length                               |
//! |--------------|--------------------|--------------------------------------|
//! | `00..=7F`    | literal            | `b + 1` raw bytes follow             |
//! | `80..=BF`    | short repeat       | `(b & 0x3F) + 3`                     |
//! | `C0..=DF`    | medium repeat      | `(b & 0x1F) + 9`                     |
//! | `E0..=EF`    | long repeat        | `((b & 0x0F) << 8 \| n) + 17`        |
//! | `F0..=FF`    | very long repeat   | `((b & 0x07) << 16 \| n1 << 8 \| n2) + 273` |
//!
//! Repeat runs are followed by the byte to repeat. Decoding stops when the
//! frame is full or the input runs out.

use crate::error::RleError;

/// Decode an RLE stream into exactly `width * height` palette indices.
///
/// Repeat runs are clipped at the end of the frame. A literal run that would
/// overflow the frame, or any opcode cut short by the end of the input, is an
/// error. Input that ends early on an opcode boundary leaves the rest of the
/// frame as index 0.
pub fn decode_rle(input: &[u8], width: usize, height: usize) -> Result<Vec<u8>, RleError> {
    let capacity = width * height;
    let mut output = vec![0u8; capacity];
    let mut src = Source { input, pos: 0 };
    let mut out = 0usize;

    while out < capacity && src.pos < input.len() {
        let control = src.next()?;

        if control < 0x80 {
            let count = control as usize + 1;
            if out + count > capacity {
                return Err(RleError::OutputOverrun {
                    at: out,
                    count,
                    capacity,
                });
            }
            output[out..out + count].copy_from_slice(src.take(count)?);
            out += count;
            continue;
        }

        let count = if control < 0xC0 {
            (control & 0x3F) as usize + 3
        } else if control < 0xE0 {
            (control & 0x1F) as usize + 9
        } else if control < 0xF0 {
            let low = src.next()? as usize;
            (((control & 0x0F) as usize) << 8 | low) + 17
        } else {
            let mid = src.next()? as usize;
            let low = src.next()? as usize;
            (((control & 0x07) as usize) << 16 | mid << 8 | low) + 273
        };

        let value = src.next()?;
        let end = (out + count).min(capacity);
        output[out..end].fill(value);
        out = end;
    }

    Ok(output)
}

struct Source<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Source<'a> {
    #[inline]
    fn next(&mut self) -> Result<u8, RleError> {
        let byte = *self
            .input
            .get(self.pos)
            .ok_or(RleError::TruncatedInput { at: self.pos })?;
        self.pos += 1;
        Ok(byte)
    }

    #[inline]
    fn take(&mut self, count: usize) -> Result<&'a [u8], RleError> {
        let bytes = self
            .input
            .get(self.pos..self.pos + count)
            .ok_or(RleError::TruncatedInput { at: self.pos })?;
        self.pos += count;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_copies_verbatim() {
        let input = [0x03, 9, 0, 255, 17];
        assert_eq!(decode_rle(&input, 2, 2).unwrap(), vec![9, 0, 255, 17]);
    }

    #[test]
    fn test_short_repeat() {
        // 0x81 -> (1 & 0x3F) + 3 = 4
        assert_eq!(decode_rle(&[0x81, 7], 4, 1).unwrap(), vec![7; 4]);
    }

    #[test]
    fn test_medium_repeat() {
        // 0xC1 -> (1 & 0x1F) + 9 = 10
        assert_eq!(decode_rle(&[0xC1, 5], 10, 1).unwrap(), vec![5; 10]);
    }

    #[test]
    fn test_long_repeat() {
        // 0xE0 0x03 -> 3 + 17 = 20
        assert_eq!(decode_rle(&[0xE0, 0x03, 2], 5, 4).unwrap(), vec![2; 20]);
    }

    #[test]
    fn test_very_long_repeat() {
        // 0xF0 0x00 0x01 -> 1 + 273 = 274
        let decoded = decode_rle(&[0xF0, 0x00, 0x01, 6], 274, 1).unwrap();
        assert_eq!(decoded, vec![6; 274]);
    }

    #[test]
    fn test_repeats_clip_at_frame_end() {
        // Each stream encodes one more byte than the frame holds.
        assert_eq!(decode_rle(&[0x80, 1], 2, 1).unwrap(), vec![1; 2]);
        assert_eq!(decode_rle(&[0xC0, 1], 8, 1).unwrap(), vec![1; 8]);
        assert_eq!(decode_rle(&[0xE0, 0x00, 1], 16, 1).unwrap(), vec![1; 16]);
        assert_eq!(decode_rle(&[0xF0, 0x00, 0x00, 1], 272, 1).unwrap(), vec![1; 272]);
    }

    #[test]
    fn test_clipped_run_stops_decoding() {
        // Trailing opcodes after the frame fills are ignored.
        assert_eq!(decode_rle(&[0x81, 3, 0x00, 9], 2, 2).unwrap(), vec![3; 4]);
    }

    #[test]
    fn test_mixed_stream() {
        let input = [0x01, 4, 5, 0x80, 6, 0x00, 7];
        assert_eq!(decode_rle(&input, 6, 1).unwrap(), vec![4, 5, 6, 6, 6, 7]);
    }

    #[test]
    fn test_short_input_leaves_zeros() {
        assert_eq!(decode_rle(&[0x00, 8], 3, 1).unwrap(), vec![8, 0, 0]);
    }

    #[test]
    fn test_literal_overrun_is_error() {
        assert_eq!(
            decode_rle(&[0x02, 1, 2, 3], 2, 1),
            Err(RleError::OutputOverrun {
                at: 0,
                count: 3,
                capacity: 2
            })
        );
    }

    #[test]
    fn test_truncated_inputs() {
        assert!(matches!(decode_rle(&[0x03, 1, 2], 4, 1), Err(RleError::TruncatedInput { .. })));
        assert!(matches!(decode_rle(&[0x85], 4, 1), Err(RleError::TruncatedInput { .. })));
        assert!(matches!(decode_rle(&[0xE1], 4, 1), Err(RleError::TruncatedInput { .. })));
        assert!(matches!(decode_rle(&[0xF1, 0x00], 4, 1), Err(RleError::TruncatedInput { .. })));
    }

    #[test]
    fn test_empty_frame() {
        assert_eq!(decode_rle(&[0x81, 1], 0, 5).unwrap(), Vec::<u8>::new());
    }
}
