use crate::error::Result;
use crate::gemini::{Attachment, GeminiClient, TTS_SAMPLE_RATE};

/// Speech-to-text over a recorded clip.
pub async fn transcribe(client: &GeminiClient, audio: &Attachment) -> Result<String> {
    let text = client.transcribe(audio).await?;
    Ok(text)
}

/// Text-to-speech: the model returns raw PCM16; wrap it in a WAV
/// container so the result plays anywhere.
pub async fn speak(client: &GeminiClient, text: &str, voice: &str) -> Result<Vec<u8>> {
    let pcm = client.speak(text, voice).await?;
    Ok(wav_from_pcm16(&pcm, TTS_SAMPLE_RATE))
}

/// Frame little-endian mono PCM16 as a WAV file (44-byte RIFF header).
pub fn wav_from_pcm16(pcm: &[u8], sample_rate: u32) -> Vec<u8> {
    const CHANNELS: u16 = 1;
    const BITS_PER_SAMPLE: u16 = 16;
    let byte_rate = sample_rate * u32::from(CHANNELS) * u32::from(BITS_PER_SAMPLE) / 8;
    let block_align = CHANNELS * BITS_PER_SAMPLE / 8;
    let data_len = pcm.len() as u32;

    let mut wav = Vec::with_capacity(44 + pcm.len());
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&(36 + data_len).to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes()); // PCM chunk size
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM format
    wav.extend_from_slice(&CHANNELS.to_le_bytes());
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&block_align.to_le_bytes());
    wav.extend_from_slice(&BITS_PER_SAMPLE.to_le_bytes());
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_len.to_le_bytes());
    wav.extend_from_slice(pcm);
    wav
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wav_header_frames_the_stream() {
        let pcm = [0u8, 1, 2, 3];
        let wav = wav_from_pcm16(&pcm, 24_000);

        assert_eq!(wav.len(), 48);
        assert_eq!(&wav[0..4], b"RIFF");
        assert_eq!(&wav[8..12], b"WAVE");
        // chunk size = 36 + data
        assert_eq!(u32::from_le_bytes(wav[4..8].try_into().unwrap()), 40);
        // sample rate at offset 24
        assert_eq!(u32::from_le_bytes(wav[24..28].try_into().unwrap()), 24_000);
        // byte rate = 24000 * 2
        assert_eq!(u32::from_le_bytes(wav[28..32].try_into().unwrap()), 48_000);
        // data length and payload
        assert_eq!(u32::from_le_bytes(wav[40..44].try_into().unwrap()), 4);
        assert_eq!(&wav[44..], &pcm);
    }
}
