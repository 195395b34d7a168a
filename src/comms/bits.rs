//! Bit codec: message payloads to and from flat bit sequences.
//!
//! Text is carried one 8-bit unit per character, most significant bit first.
//! Audio is carried as 16-bit signed PCM, each sample's two bytes in
//! little-endian order and each byte most significant bit first.
//!
//! Decoding is lossy on misaligned input: a trailing partial byte is dropped,
//! and for audio a trailing partial sample is dropped with it.

use crate::error::{Error, Result};
use bitvec::prelude::*;

/// Flat bit sequence used between all stages of the link
pub type Bits = BitVec<u8, Msb0>;

/// Full scale used when quantising audio to 16-bit PCM
const PCM_SCALE_OUT: f32 = 32767.0;

/// Divisor used when converting 16-bit PCM back to floating point
const PCM_SCALE_IN: f32 = 32768.0;

/// Converts text to bits, eight per character.
///
/// # Returns
///
/// A bit sequence of exactly `8 * text.chars().count()` bits, or
/// [`Error::UnsupportedCharacter`] for the first character above U+00FF
pub fn text_to_bits(text: &str) -> Result<Bits> {
    let bytes = text
        .chars()
        .enumerate()
        .map(|(position, ch)| {
            u8::try_from(u32::from(ch)).map_err(|_| Error::UnsupportedCharacter { ch, position })
        })
        .collect::<Result<Vec<u8>>>()?;

    Ok(Bits::from_vec(bytes))
}

/// Converts bits back to text, one character per complete 8-bit group.
///
/// Any trailing 1-7 bits are silently dropped.
pub fn bits_to_text(bits: &BitSlice<u8, Msb0>) -> String {
    bytes_from_bits(bits).into_iter().map(char::from).collect()
}

/// Converts normalised audio samples to bits, sixteen per sample.
///
/// Samples are clipped to [-1.0, 1.0] and scaled by 32767 with truncation
/// toward zero.
pub fn audio_to_bits(samples: &[f32]) -> Bits {
    let bytes: Vec<u8> = samples
        .iter()
        .flat_map(|&sample| {
            let pcm = (sample.clamp(-1.0, 1.0) * PCM_SCALE_OUT) as i16;
            pcm.to_le_bytes()
        })
        .collect();

    Bits::from_vec(bytes)
}

/// Converts bits back to audio samples, passing the sample rate through.
///
/// Each complete byte pair becomes one sample divided by 32768. A trailing
/// partial byte, and a trailing unpaired byte, are dropped.
pub fn bits_to_audio(bits: &BitSlice<u8, Msb0>, sample_rate: u32) -> (Vec<f32>, u32) {
    let samples = bytes_from_bits(bits)
        .chunks_exact(2)
        .map(|pair| f32::from(i16::from_le_bytes([pair[0], pair[1]])) / PCM_SCALE_IN)
        .collect();

    (samples, sample_rate)
}

/// Packs complete 8-bit groups into bytes, dropping any trailing partial group
fn bytes_from_bits(bits: &BitSlice<u8, Msb0>) -> Vec<u8> {
    bits.chunks_exact(8).map(|byte| byte.load_be::<u8>()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_text_to_bits_layout() {
        let bits = text_to_bits("HI").unwrap();
        assert_eq!(bits.len(), 16);
        assert_eq!(
            bits.as_bitslice(),
            bits![u8, Msb0; 0, 1, 0, 0, 1, 0, 0, 0, 0, 1, 0, 0, 1, 0, 0, 1]
        );
    }

    #[test]
    fn test_text_round_trip() {
        let text = "Hamming codes, 1950. caf\u{e9}";
        let bits = text_to_bits(text).unwrap();
        assert_eq!(bits.len(), 8 * text.chars().count());
        assert_eq!(bits_to_text(&bits), text);
    }

    #[test]
    fn test_text_rejects_wide_characters() {
        let err = text_to_bits("ok\u{3a9}").unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedCharacter {
                ch: '\u{3a9}',
                position: 2
            }
        );
    }

    #[test]
    fn test_bits_to_text_drops_partial_byte() {
        let mut bits = text_to_bits("AB").unwrap();
        bits.extend_from_bitslice(bits![u8, Msb0; 1, 1, 1]);
        assert_eq!(bits_to_text(&bits), "AB");

        bits.truncate(13);
        assert_eq!(bits_to_text(&bits), "A");
    }

    #[test]
    fn test_empty_payloads() {
        assert!(text_to_bits("").unwrap().is_empty());
        assert_eq!(bits_to_text(BitSlice::<u8, Msb0>::empty()), "");
        assert!(audio_to_bits(&[]).is_empty());
        assert_eq!(bits_to_audio(BitSlice::<u8, Msb0>::empty(), 8000), (vec![], 8000));
    }

    #[test]
    fn test_audio_bit_layout() {
        // 0.5 * 32767 = 16383.5 -> 16383 = 0x3FFF, little-endian bytes FF 3F
        let bits = audio_to_bits(&[0.5]);
        assert_eq!(bits.len(), 16);
        assert_eq!(
            bits.as_bitslice(),
            bits![u8, Msb0; 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 1, 1, 1, 1, 1]
        );
    }

    #[test]
    fn test_audio_round_trip_precision() {
        let samples = [0.0, 0.25, -0.25, 0.999, -0.999];
        let bits = audio_to_bits(&samples);
        assert_eq!(bits.len(), 16 * samples.len());

        let (recovered, rate) = bits_to_audio(&bits, 44_100);
        assert_eq!(rate, 44_100);
        assert_eq!(recovered.len(), samples.len());
        for (original, decoded) in samples.iter().zip(&recovered) {
            assert_abs_diff_eq!(*original, *decoded, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_audio_clipping() {
        let bits = audio_to_bits(&[3.0, -3.0]);
        let (recovered, _) = bits_to_audio(&bits, 8000);
        assert_abs_diff_eq!(recovered[0], 32767.0 / 32768.0, epsilon = 1e-7);
        assert_abs_diff_eq!(recovered[1], -32767.0 / 32768.0, epsilon = 1e-7);
    }

    #[test]
    fn test_bits_to_audio_drops_partial_sample() {
        let mut bits = audio_to_bits(&[0.5, -0.5]);
        // Cut into the middle of the second sample
        bits.truncate(27);
        let (recovered, _) = bits_to_audio(&bits, 8000);
        assert_eq!(recovered.len(), 1);
        assert_abs_diff_eq!(recovered[0], 16383.0 / 32768.0, epsilon = 1e-7);
    }
}
