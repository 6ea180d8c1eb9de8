//! Leading/trailing silence removal

use serde::Deserialize;

use crate::machine::StereoFrame;

/// Silence trimming parameters
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrimSettings {
    /// A frame is audible when its peak magnitude exceeds this value
    pub threshold: u8,
    /// Frames kept before the first audible frame
    pub lead_in_frames: usize,
    /// Seconds kept after the last audible frame
    pub tail_seconds: f32,
    /// Shortest buffer ever returned (unless the input itself is shorter)
    pub min_frames: usize,
}

impl Default for TrimSettings {
    fn default() -> Self {
        Self {
            threshold: 2,
            lead_in_frames: 100,
            tail_seconds: 0.25,
            min_frames: 1000,
        }
    }
}

impl TrimSettings {
    /// Frames kept after the last audible frame at `sample_rate`
    pub fn tail_frames(&self, sample_rate: u32) -> usize {
        (self.tail_seconds.max(0.0) * sample_rate as f32) as usize
    }
}

/// Peak magnitude across both channels of a frame
fn peak(frame: &StereoFrame) -> u8 {
    frame[0].unsigned_abs().max(frame[1].unsigned_abs())
}

/// Trim silence from both ends of `frames`.
///
/// Keeps `lead_in_frames` before the first frame louder than the threshold and
/// `tail_seconds` after the last one, clamped to the buffer. A buffer with no
/// audible frame yields its first `min_frames` frames, as does any trim that
/// would come out shorter than `min_frames`.
pub fn trim_silence<'a>(
    frames: &'a [StereoFrame],
    settings: &TrimSettings,
    sample_rate: u32,
) -> &'a [StereoFrame] {
    let min_prefix = &frames[..settings.min_frames.min(frames.len())];

    let mut audible = frames
        .iter()
        .enumerate()
        .filter(|(_, frame)| peak(frame) > settings.threshold)
        .map(|(i, _)| i);

    let Some(first) = audible.next() else {
        return min_prefix;
    };
    let last = audible.last().unwrap_or(first);

    let start = first.saturating_sub(settings.lead_in_frames);
    let end = last
        .saturating_add(settings.tail_frames(sample_rate))
        .min(frames.len());

    let trimmed = &frames[start..end];
    if trimmed.len() < settings.min_frames {
        return min_prefix;
    }
    trimmed
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 44_100;

    fn silence(len: usize) -> Vec<StereoFrame> {
        vec![[0, 0]; len]
    }

    /// Silence with loud frames at the given indices
    fn buffer_with_hits(len: usize, hits: &[usize]) -> Vec<StereoFrame> {
        let mut frames = silence(len);
        for &i in hits {
            frames[i] = [60, -60];
        }
        frames
    }

    #[test]
    fn test_trims_both_ends() {
        let frames = buffer_with_hits(30_000, &[5_000, 6_000]);
        let trimmed = trim_silence(&frames, &TrimSettings::default(), RATE);

        // 100 frames of lead-in, 0.25 s (11025 frames) of tail
        assert_eq!(trimmed.len(), 100 + 1_000 + 11_025);
        assert_eq!(trimmed[100], [60, -60]);
    }

    #[test]
    fn test_tail_clamped_to_buffer() {
        let frames = buffer_with_hits(8_000, &[3_000]);
        let trimmed = trim_silence(&frames, &TrimSettings::default(), RATE);

        assert_eq!(trimmed.len(), 8_000 - 2_900);
        assert_eq!(trimmed[100], [60, -60]);
    }

    #[test]
    fn test_lead_in_clamped_to_start() {
        let frames = buffer_with_hits(20_000, &[40]);
        let trimmed = trim_silence(&frames, &TrimSettings::default(), RATE);
        assert_eq!(trimmed[40], [60, -60]);
        assert_eq!(trimmed.len(), 40 + 11_025);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut frames = silence(5_000);
        frames[10] = [2, -2];
        let trimmed = trim_silence(&frames, &TrimSettings::default(), RATE);

        // Peak of exactly 2 is still silence
        assert_eq!(trimmed.len(), 1_000);
        assert_eq!(trimmed.as_ptr(), frames.as_ptr());
    }

    #[test]
    fn test_right_channel_counts() {
        let mut frames = silence(20_000);
        frames[500] = [0, -3];
        let trimmed = trim_silence(&frames, &TrimSettings::default(), RATE);
        assert_eq!(trimmed[100], [0, -3]);
    }

    #[test]
    fn test_all_silent_keeps_min_prefix() {
        let frames = silence(50_000);
        let trimmed = trim_silence(&frames, &TrimSettings::default(), RATE);
        assert_eq!(trimmed.len(), 1_000);
    }

    #[test]
    fn test_short_trim_falls_back_to_prefix() {
        // Sound right at the end: the trimmed window would be 150 frames
        let frames = buffer_with_hits(1_200, &[1_150]);
        let trimmed = trim_silence(&frames, &TrimSettings::default(), RATE);

        assert_eq!(trimmed.len(), 1_000);
        assert_eq!(trimmed.as_ptr(), frames.as_ptr());
    }

    #[test]
    fn test_input_shorter_than_minimum() {
        let frames = buffer_with_hits(300, &[150]);
        let trimmed = trim_silence(&frames, &TrimSettings::default(), RATE);
        assert_eq!(trimmed.len(), 300);
    }

    #[test]
    fn test_empty_input() {
        let trimmed = trim_silence(&[], &TrimSettings::default(), RATE);
        assert!(trimmed.is_empty());
    }

    #[test]
    fn test_never_shorter_than_minimum() {
        let settings = TrimSettings::default();
        let cases = [
            buffer_with_hits(2_000, &[1_990]),
            buffer_with_hits(1_500, &[700, 1_400]),
            buffer_with_hits(40_000, &[39_999]),
            buffer_with_hits(40_000, &[0]),
            silence(1_000),
        ];
        for frames in &cases {
            let trimmed = trim_silence(frames, &settings, RATE);
            assert!(trimmed.len() >= settings.min_frames);
        }
    }

    #[test]
    fn test_trim_is_idempotent() {
        let settings = TrimSettings::default();
        let cases = [
            buffer_with_hits(30_000, &[5_000, 6_000]),
            buffer_with_hits(8_000, &[3_000]),
            buffer_with_hits(1_500, &[700, 1_400]),
            buffer_with_hits(1_200, &[1_150]),
            buffer_with_hits(20_000, &[40]),
            silence(50_000),
            silence(10),
        ];
        for frames in &cases {
            let once = trim_silence(frames, &settings, RATE);
            let twice = trim_silence(once, &settings, RATE);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_custom_settings() {
        let settings = TrimSettings {
            threshold: 10,
            lead_in_frames: 0,
            tail_seconds: 0.0,
            min_frames: 1,
        };
        let mut frames = silence(100);
        frames[20] = [5, 5];
        frames[30] = [20, 0];
        frames[40] = [0, 11];

        let trimmed = trim_silence(&frames, &settings, RATE);
        assert_eq!(trimmed.len(), 10);
        assert_eq!(trimmed[0], [20, 0]);
    }
}
